use super::model::{Metric, Player, PlayerTable};

// ---------------------------------------------------------------------------
// Filter predicate: one minimum threshold per metric
// ---------------------------------------------------------------------------

/// Per-metric minimum thresholds. A row passes when every metric is strictly
/// greater than its threshold, so the all-zero default still drops rows with
/// a zero (or missing) metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    thresholds: [f64; Metric::COUNT],
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            thresholds: [0.0; Metric::COUNT],
        }
    }
}

impl FilterCriteria {
    /// Copy of these criteria with one threshold replaced.
    pub fn with(mut self, metric: Metric, minimum: f64) -> Self {
        self.thresholds[metric.index()] = minimum;
        self
    }

    pub fn threshold(&self, metric: Metric) -> f64 {
        self.thresholds[metric.index()]
    }

    /// Mutable access for slider widgets.
    pub fn threshold_mut(&mut self, metric: Metric) -> &mut f64 {
        &mut self.thresholds[metric.index()]
    }

    pub fn passes(&self, player: &Player) -> bool {
        Metric::ALL
            .iter()
            .all(|&m| player.metric(m) > self.threshold(m))
    }
}

/// Stable filter producing a new table of copied rows.
pub fn filter(table: &PlayerTable, criteria: &FilterCriteria) -> PlayerTable {
    let players = table
        .players
        .iter()
        .filter(|p| criteria.passes(p))
        .cloned()
        .collect();
    PlayerTable::new(players, table.extra_columns.clone())
}

// ---------------------------------------------------------------------------
// Slider bounds
// ---------------------------------------------------------------------------

/// Games a player needs before their efficiency rating counts toward the
/// slider bound; a handful of games can produce absurd ratings.
const EFFICIENCY_MIN_GAMES: f64 = 10.0;

/// Upper bound of a metric's slider: the floored observed maximum, 0 when
/// nothing is observed.
pub fn slider_max(table: &PlayerTable, metric: Metric) -> f64 {
    let max = if metric == Metric::Efficiency {
        table
            .players
            .iter()
            .filter(|p| p.metric(Metric::GamesPlayed) > EFFICIENCY_MIN_GAMES)
            .map(|p| p.metric(metric))
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
    } else {
        table.metric_max(metric)
    };
    max.map_or(0.0, |v| v.floor().max(0.0))
}
