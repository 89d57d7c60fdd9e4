use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

const BAR_HEIGHT: f32 = 420.0;
const PIE_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AstroHoopsApp {
    pub state: AppState,
}

impl AstroHoopsApp {
    /// Start with the table at `data` already loaded (or the load error shown).
    pub fn new(data: std::path::PathBuf) -> Self {
        let mut state = AppState::default();
        state.open(data);
        Self { state }
    }
}

impl eframe::App for AstroHoopsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                central(ui, &self.state);
            });
        });
    }
}

fn central(ui: &mut Ui, state: &AppState) {
    let tab = state.tab;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(tab.heading());
    });

    let Some(view) = &state.tab_state(tab).view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a player table to begin  (File → Open…)");
        });
        return;
    };

    if state.tab_state(tab).show_table {
        table::player_table(ui, &view.filtered, tab);
        ui.separator();
    }

    plot::chart(ui, &view.bar, BAR_HEIGHT);
    ui.separator();

    ui.columns(view.pies.len().max(1), |columns| {
        for (col, pie) in columns.iter_mut().zip(&view.pies) {
            plot::chart(col, pie, PIE_HEIGHT);
        }
    });
}
