use std::collections::HashMap;
use std::fmt;

use super::model::{CelestialBody, Player, PlayerTable};
use super::sign::{Element, Modality, ZodiacSign};
use super::venus::{VENUS_CYCLE, VenusColor};

// ---------------------------------------------------------------------------
// Grouping column selector
// ---------------------------------------------------------------------------

/// A categorical axis a table can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupColumn {
    VenusInterval,
    /// Color part of the Venus interval (`Red_3` → `Red`).
    VenusColor,
    Sign(CelestialBody),
    Element(CelestialBody),
    Modality(CelestialBody),
}

impl GroupColumn {
    /// Display order of the column's vocabulary.
    pub fn category_order(self) -> Vec<String> {
        match self {
            GroupColumn::VenusInterval => VENUS_CYCLE.iter().map(|v| v.to_string()).collect(),
            GroupColumn::VenusColor => VenusColor::ALL.iter().map(|c| c.to_string()).collect(),
            GroupColumn::Sign(_) => ZodiacSign::ALL.iter().map(|s| s.to_string()).collect(),
            GroupColumn::Element(_) => Element::ALL.iter().map(|e| e.to_string()).collect(),
            GroupColumn::Modality(_) => Modality::ALL.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Category of a player, or `None` when the underlying cell is outside
    /// the vocabulary.
    pub fn category(self, player: &Player) -> Option<String> {
        match self {
            GroupColumn::VenusInterval => player.venus_cycle.known().map(|v| v.to_string()),
            GroupColumn::VenusColor => player.venus_cycle.known().map(|v| v.color.to_string()),
            GroupColumn::Sign(body) => player.sign(body).known().map(|s| s.to_string()),
            GroupColumn::Element(body) => {
                player.sign(body).known().map(|s| s.classify().0.to_string())
            }
            GroupColumn::Modality(body) => {
                player.sign(body).known().map(|s| s.classify().1.to_string())
            }
        }
    }
}

impl fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupColumn::VenusInterval => write!(f, "Venus interval"),
            GroupColumn::VenusColor => write!(f, "Venus color"),
            GroupColumn::Sign(body) => write!(f, "{} sign", body.label()),
            GroupColumn::Element(body) => write!(f, "{} element", body.label()),
            GroupColumn::Modality(body) => write!(f, "{} modality", body.label()),
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub category: String,
    pub count: usize,
}

/// Counts per category, in display order. Rows whose value is outside the
/// column's vocabulary are tallied in `unclassified` instead of a bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    pub buckets: Vec<Bucket>,
    pub unclassified: usize,
}

impl AggregationResult {
    /// Rows counted in buckets.
    pub fn classified(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// `(category, count)` pairs in display order.
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.buckets
            .iter()
            .map(|b| (b.category.as_str(), b.count))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Count occurrences of each value.
///
/// Values listed in `order` come first, in that order; values missing from
/// `order` follow in first-seen order. Categories with no rows are omitted.
pub fn count_by<I, S>(values: I, order: &[S]) -> Vec<Bucket>
where
    I: IntoIterator<Item = String>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut first_seen: Vec<String> = Vec::new();
    for value in values {
        let count = counts.entry(value).or_insert_with_key(|key| {
            first_seen.push(key.clone());
            0
        });
        *count += 1;
    }

    let listed = order.iter().map(|c| c.as_ref().to_string());
    let unlisted = first_seen
        .into_iter()
        .filter(|v| !order.iter().any(|c| c.as_ref() == v));

    listed
        .chain(unlisted)
        .filter_map(|category| {
            let count = counts.remove(&category)?;
            Some(Bucket { category, count })
        })
        .collect()
}

/// Group `table` by `column` and count rows per category, presented in
/// `order`.
pub fn aggregate<S: AsRef<str>>(
    table: &PlayerTable,
    column: GroupColumn,
    order: &[S],
) -> AggregationResult {
    let mut unclassified = 0;
    let values = table.players.iter().filter_map(|p| {
        let category = column.category(p);
        if category.is_none() {
            unclassified += 1;
        }
        category
    });
    let buckets = count_by(values, order);

    if unclassified > 0 {
        log::debug!("{unclassified} rows have no {column} category");
    }
    AggregationResult {
        buckets,
        unclassified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{FilterCriteria, filter};
    use crate::data::model::tests::player;
    use crate::data::model::{Categorical, Metric};

    fn with_venus(label: &str, gp: f64) -> Player {
        let mut p = player([1.0; Metric::COUNT]);
        p.venus_cycle = Categorical::parse(label);
        p.metrics[Metric::GamesPlayed.index()] = gp;
        p
    }

    fn with_sun(sign: &str) -> Player {
        let mut p = player([1.0; Metric::COUNT]);
        p.signs[CelestialBody::Sun.index()] = Categorical::parse(sign);
        p
    }

    #[test]
    fn filter_then_aggregate_by_venus_interval() {
        let table = PlayerTable::new(vec![with_venus("Red_3", 12.0), with_venus("Blue_1", 5.0)], vec![]);
        let criteria = FilterCriteria::default().with(Metric::GamesPlayed, 10.0);
        let filtered = filter(&table, &criteria);

        let column = GroupColumn::VenusInterval;
        let result = aggregate(&filtered, column, &column.category_order());
        assert_eq!(result.pairs(), vec![("Red_3", 1)]);
        assert_eq!(result.unclassified, 0);
    }

    #[test]
    fn buckets_follow_cycle_order_and_skip_empty_categories() {
        let table = PlayerTable::new(
            vec![
                with_venus("Red_2", 1.0),
                with_venus("White_1", 1.0),
                with_venus("Red_2", 1.0),
                with_venus("Blue_5", 1.0),
            ],
            vec![],
        );
        let column = GroupColumn::VenusInterval;
        let result = aggregate(&table, column, &column.category_order());
        assert_eq!(result.pairs(), vec![("White_1", 1), ("Blue_5", 1), ("Red_2", 2)]);
    }

    #[test]
    fn counts_sum_to_rows_except_unclassified() {
        let table = PlayerTable::new(
            vec![
                with_sun("LEO"),
                with_sun("ARIES"),
                with_sun("OPHIUCHUS"),
                with_sun("LEO"),
                with_sun("PISCES"),
            ],
            vec![],
        );
        let column = GroupColumn::Sign(CelestialBody::Sun);
        let result = aggregate(&table, column, &column.category_order());
        assert_eq!(result.pairs(), vec![("ARIES", 1), ("LEO", 2), ("PISCES", 1)]);
        assert_eq!(result.unclassified, 1);
        assert_eq!(result.classified() + result.unclassified, table.len());
    }

    #[test]
    fn element_and_modality_derive_from_the_selected_body() {
        let table = PlayerTable::new(
            vec![with_sun("LEO"), with_sun("LIBRA"), with_sun("CANCER")],
            vec![],
        );
        let element = GroupColumn::Element(CelestialBody::Sun);
        let modality = GroupColumn::Modality(CelestialBody::Sun);
        assert_eq!(
            aggregate(&table, element, &element.category_order()).pairs(),
            vec![("fire", 1), ("air", 1), ("water", 1)]
        );
        assert_eq!(
            aggregate(&table, modality, &modality.category_order()).pairs(),
            vec![("cardinal", 2), ("fix", 1)]
        );
        // Every other body is ARIES in the fixture.
        let moon = GroupColumn::Element(CelestialBody::Moon);
        assert_eq!(
            aggregate(&table, moon, &moon.category_order()).pairs(),
            vec![("fire", 3)]
        );
    }

    #[test]
    fn venus_color_groups_by_prefix() {
        let table = PlayerTable::new(
            vec![
                with_venus("Red_2", 1.0),
                with_venus("Red_4", 1.0),
                with_venus("Black_1", 1.0),
                with_venus("bogus", 1.0),
            ],
            vec![],
        );
        let column = GroupColumn::VenusColor;
        let result = aggregate(&table, column, &column.category_order());
        assert_eq!(result.pairs(), vec![("Black", 1), ("Red", 2)]);
        assert_eq!(result.unclassified, 1);
    }

    #[test]
    fn unlisted_categories_are_appended_in_first_seen_order() {
        let values = ["b", "z", "a", "y", "z", "b"].map(String::from);
        let buckets = count_by(values, &["a", "b", "c"]);
        let pairs: Vec<(&str, usize)> = buckets
            .iter()
            .map(|b| (b.category.as_str(), b.count))
            .collect();
        assert_eq!(pairs, vec![("a", 1), ("b", 2), ("z", 2), ("y", 1)]);
    }

    #[test]
    fn empty_table_aggregates_to_nothing() {
        let column = GroupColumn::Sign(CelestialBody::Mars);
        let result = aggregate(&PlayerTable::default(), column, &column.category_order());
        assert!(result.is_empty());
        assert_eq!(result.unclassified, 0);
    }
}
