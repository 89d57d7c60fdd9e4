use std::path::PathBuf;
use std::sync::Arc;

use crate::data::filter::{FilterCriteria, slider_max};
use crate::data::loader::DatasetLoader;
use crate::data::model::{CelestialBody, Metric, PlayerTable};
use crate::view::{RenderModel, horoscope_view, venus_view};

// ---------------------------------------------------------------------------
// Per-tab state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Venus,
    Horoscope,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Venus, Tab::Horoscope];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Venus => "Venus Cycle",
            Tab::Horoscope => "Horoscope",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            Tab::Venus => "NBA Players by Venus Cycle",
            Tab::Horoscope => "NBA Players by Horoscopic Signs",
        }
    }
}

/// Controls of one tab. Tabs never share filter state.
#[derive(Debug, Clone, Default)]
pub struct TabState {
    pub criteria: FilterCriteria,
    pub show_table: bool,
    /// Result of the last recomputation (None until a table is loaded).
    pub view: Option<RenderModel>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loader of the current input file; holds the cached table.
    pub loader: Option<DatasetLoader>,

    /// Loaded table (None until a load succeeds). Shared read-only.
    pub table: Option<Arc<PlayerTable>>,

    /// Upper bound of each metric slider, from the loaded table.
    pub slider_max: [f64; Metric::COUNT],

    pub tab: Tab,
    pub venus: TabState,
    pub horoscope: TabState,

    /// Body shown on the horoscope tab.
    pub body: CelestialBody,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            loader: None,
            table: None,
            slider_max: [0.0; Metric::COUNT],
            tab: Tab::Venus,
            venus: TabState::default(),
            horoscope: TabState::default(),
            body: CelestialBody::Sun,
            status_message: None,
        }
    }
}

impl AppState {
    /// Load `path` with a fresh loader and make it the current dataset.
    ///
    /// On failure the previous loader and table stay current; only the status
    /// message changes.
    pub fn open(&mut self, path: impl Into<PathBuf>) {
        let loader = DatasetLoader::new(path);
        match loader.load() {
            Ok(table) => {
                self.set_table(table);
                self.loader = Some(loader);
                self.status_message = None;
            }
            Err(e) => {
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a loaded table, reset filters and recompute both tabs.
    pub fn set_table(&mut self, table: Arc<PlayerTable>) {
        for metric in Metric::ALL {
            self.slider_max[metric.index()] = slider_max(&table, metric);
        }
        self.venus = TabState::default();
        self.horoscope = TabState::default();
        self.table = Some(table);
        self.refresh(Tab::Venus);
        self.refresh(Tab::Horoscope);
    }

    pub fn tab_state(&self, tab: Tab) -> &TabState {
        match tab {
            Tab::Venus => &self.venus,
            Tab::Horoscope => &self.horoscope,
        }
    }

    pub fn tab_state_mut(&mut self, tab: Tab) -> &mut TabState {
        match tab {
            Tab::Venus => &mut self.venus,
            Tab::Horoscope => &mut self.horoscope,
        }
    }

    /// Recompute a tab's view after any control change.
    pub fn refresh(&mut self, tab: Tab) {
        let Some(table) = self.table.clone() else {
            return;
        };
        let body = self.body;
        let state = self.tab_state_mut(tab);
        state.view = Some(match tab {
            Tab::Venus => venus_view(&table, &state.criteria),
            Tab::Horoscope => horoscope_view(&table, &state.criteria, body),
        });
    }

    /// Select the horoscope body and recompute that tab.
    pub fn set_body(&mut self, body: CelestialBody) {
        self.body = body;
        self.refresh(Tab::Horoscope);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::tests::player;

    fn state_with(rows: usize) -> AppState {
        let players = (0..rows)
            .map(|i| player([(i + 1) as f64; Metric::COUNT]))
            .collect();
        let mut state = AppState::default();
        state.set_table(Arc::new(PlayerTable::new(players, vec![])));
        state
    }

    #[test]
    fn set_table_computes_bounds_and_views() {
        let state = state_with(3);
        assert_eq!(state.slider_max[Metric::Points.index()], 3.0);
        for tab in Tab::ALL {
            let view = state.tab_state(tab).view.as_ref().expect("view");
            assert_eq!(view.filtered.len(), 3);
        }
    }

    #[test]
    fn tabs_keep_independent_criteria() {
        let mut state = state_with(3);
        *state.venus.criteria.threshold_mut(Metric::GamesPlayed) = 2.0;
        state.refresh(Tab::Venus);

        let venus = state.venus.view.as_ref().expect("venus");
        let horoscope = state.horoscope.view.as_ref().expect("horoscope");
        assert_eq!(venus.filtered.len(), 1);
        assert_eq!(horoscope.filtered.len(), 3);
    }

    #[test]
    fn set_body_retitles_horoscope_chart() {
        let mut state = state_with(2);
        state.set_body(CelestialBody::NorthNode);
        let view = state.horoscope.view.as_ref().expect("view");
        assert_eq!(view.bar.title, "Total Player Count by North Node Sign");
    }

    #[test]
    fn failed_open_reports_status_and_keeps_no_table() {
        let mut state = AppState::default();
        state.open("/nonexistent/players.csv");
        assert!(state.table.is_none());
        assert!(state.loader.is_none());
        let msg = state.status_message.as_deref().unwrap_or_default();
        assert!(msg.contains("data unavailable"), "{msg}");
    }

    #[test]
    fn failed_open_keeps_the_previous_dataset() {
        let header: Vec<&str> = Metric::ALL
            .iter()
            .map(|m| m.column())
            .chain(CelestialBody::ALL.iter().map(|b| b.column()))
            .chain(["venus_cycle"])
            .collect();
        let row: Vec<&str> = std::iter::repeat("5")
            .take(Metric::COUNT)
            .chain(std::iter::repeat("LEO").take(CelestialBody::COUNT))
            .chain(["Red_2"])
            .collect();
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("temp file");
        writeln!(file, "{}\n{}", header.join(","), row.join(",")).expect("write");

        let mut state = AppState::default();
        state.open(file.path());
        assert!(state.status_message.is_none());
        let table = state.table.clone().expect("table");

        state.open("/nonexistent/players.csv");
        let loader = state.loader.as_ref().expect("loader");
        assert_eq!(loader.path(), file.path());
        assert!(Arc::ptr_eq(state.table.as_ref().expect("table"), &table));
        assert!(state.status_message.is_some());
    }

    #[test]
    fn refresh_without_table_is_a_no_op() {
        let mut state = AppState::default();
        state.refresh(Tab::Horoscope);
        assert!(state.horoscope.view.is_none());
    }
}
