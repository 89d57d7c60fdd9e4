//! Pure recomputation of everything a tab draws:
//! `(table, criteria, selection) -> RenderModel`. The UI calls these on every
//! control change and only renders the result.

use eframe::egui::Color32;

use crate::chart::ChartConfig;
use crate::data::aggregate::{GroupColumn, aggregate};
use crate::data::filter::{FilterCriteria, filter};
use crate::data::model::{CelestialBody, PlayerTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartEntry {
    pub label: String,
    pub count: usize,
    pub color: Color32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub entries: Vec<ChartEntry>,
    /// Rows left out because their category is outside the vocabulary.
    pub unclassified: usize,
}

impl Chart {
    /// Aggregate `table` by `column` and colour the result.
    pub fn build(title: impl Into<String>, kind: ChartKind, table: &PlayerTable, column: GroupColumn) -> Self {
        let config = ChartConfig::for_column(column);
        let result = aggregate(table, column, &config.category_order());
        let colors = config.colors(&result);
        let entries = result
            .buckets
            .into_iter()
            .zip(colors)
            .map(|(bucket, color)| ChartEntry {
                label: bucket.category,
                count: bucket.count,
                color,
            })
            .collect();
        Chart {
            title: title.into(),
            kind,
            entries,
            unclassified: result.unclassified,
        }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// What one tab shows after a recomputation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderModel {
    pub filtered: PlayerTable,
    pub bar: Chart,
    pub pies: Vec<Chart>,
}

/// Venus Cycle tab: players per interval, and the color split.
pub fn venus_view(table: &PlayerTable, criteria: &FilterCriteria) -> RenderModel {
    let filtered = filter(table, criteria);
    log::debug!("Venus view: {} of {} players pass", filtered.len(), table.len());

    let bar = Chart::build(
        "Total Player Count by Venus Interval",
        ChartKind::Bar,
        &filtered,
        GroupColumn::VenusInterval,
    );
    let pies = vec![Chart::build(
        "Venus Cycle Distribution",
        ChartKind::Pie,
        &filtered,
        GroupColumn::VenusColor,
    )];
    RenderModel {
        filtered,
        bar,
        pies,
    }
}

/// Horoscope tab: players per sign of `body`. The element / modality split
/// always classifies the Sun sign, whichever body is selected.
pub fn horoscope_view(
    table: &PlayerTable,
    criteria: &FilterCriteria,
    body: CelestialBody,
) -> RenderModel {
    let filtered = filter(table, criteria);
    log::debug!(
        "Horoscope view ({}): {} of {} players pass",
        body.label(),
        filtered.len(),
        table.len()
    );

    let bar = Chart::build(
        format!("Total Player Count by {} Sign", body.label()),
        ChartKind::Bar,
        &filtered,
        GroupColumn::Sign(body),
    );
    let pies = vec![
        Chart::build(
            "Players by element",
            ChartKind::Pie,
            &filtered,
            GroupColumn::Element(CelestialBody::Sun),
        ),
        Chart::build(
            "Players by modality",
            ChartKind::Pie,
            &filtered,
            GroupColumn::Modality(CelestialBody::Sun),
        ),
    ];
    RenderModel {
        filtered,
        bar,
        pies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::NamedColor;
    use crate::data::model::tests::player;
    use crate::data::model::{Categorical, Metric};

    fn table() -> PlayerTable {
        let mut a = player([1.0; Metric::COUNT]);
        a.metrics[Metric::GamesPlayed.index()] = 12.0;
        a.venus_cycle = Categorical::parse("Red_3");
        a.signs[CelestialBody::Mars.index()] = Categorical::parse("LIBRA");

        let mut b = player([1.0; Metric::COUNT]);
        b.metrics[Metric::GamesPlayed.index()] = 5.0;
        b.venus_cycle = Categorical::parse("Blue_1");

        let mut c = player([1.0; Metric::COUNT]);
        c.metrics[Metric::GamesPlayed.index()] = 40.0;
        c.venus_cycle = Categorical::parse("Purple_9");
        c.signs[CelestialBody::Mars.index()] = Categorical::parse("??");

        PlayerTable::new(vec![a, b, c], vec![])
    }

    #[test]
    fn venus_view_filters_then_counts() {
        let criteria = FilterCriteria::default().with(Metric::GamesPlayed, 10.0);
        let view = venus_view(&table(), &criteria);

        assert_eq!(view.filtered.len(), 2);
        assert_eq!(view.bar.kind, ChartKind::Bar);
        assert_eq!(view.bar.entries.len(), 1);
        assert_eq!(view.bar.entries[0].label, "Red_3");
        assert_eq!(view.bar.entries[0].count, 1);
        assert_eq!(view.bar.entries[0].color, NamedColor::Red.color32());
        assert_eq!(view.bar.unclassified, 1);

        let pie = &view.pies[0];
        assert_eq!(pie.title, "Venus Cycle Distribution");
        assert_eq!(pie.total(), 1);
    }

    #[test]
    fn horoscope_bar_uses_selected_body() {
        let view = horoscope_view(&table(), &FilterCriteria::default(), CelestialBody::Mars);

        assert_eq!(view.bar.title, "Total Player Count by Mars Sign");
        let labels: Vec<&str> = view.bar.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["ARIES", "LIBRA"]);
        assert_eq!(view.bar.unclassified, 1);

        let titles: Vec<&str> = view.pies.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Players by element", "Players by modality"]);
        // Every Sun in the fixture is ARIES; the Mars values do not leak in.
        assert_eq!(view.pies[0].entries.len(), 1);
        assert_eq!(view.pies[0].entries[0].label, "fire");
        assert_eq!(view.pies[0].entries[0].count, 3);
        assert_eq!(view.pies[0].unclassified, 0);
        assert_eq!(view.pies[1].entries[0].label, "cardinal");
        assert_eq!(view.pies[1].entries[0].count, 3);
    }

    #[test]
    fn element_and_modality_pies_classify_the_sun() {
        let mut p = player([1.0; Metric::COUNT]);
        p.signs[CelestialBody::Sun.index()] = Categorical::parse("LEO");
        p.signs[CelestialBody::Mars.index()] = Categorical::parse("CANCER");
        let table = PlayerTable::new(vec![p], vec![]);

        let view = horoscope_view(&table, &FilterCriteria::default(), CelestialBody::Mars);
        assert_eq!(view.bar.entries[0].label, "CANCER");
        let element: Vec<&str> = view.pies[0].entries.iter().map(|e| e.label.as_str()).collect();
        let modality: Vec<&str> = view.pies[1].entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(element, vec!["fire"]);
        assert_eq!(modality, vec!["fix"]);
    }

    #[test]
    fn criteria_excluding_everything_render_empty_charts() {
        let criteria = FilterCriteria::default().with(Metric::Points, 1_000.0);
        let view = horoscope_view(&table(), &criteria, CelestialBody::Sun);
        assert!(view.filtered.is_empty());
        assert!(view.bar.is_empty());
        assert!(view.pies.iter().all(Chart::is_empty));
        assert_eq!(view.bar.unclassified, 0);
    }
}
