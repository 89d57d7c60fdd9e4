use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{CelestialBody, Metric};
use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel for the active tab.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    let tab = state.tab;
    let bounds = state.slider_max;
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Body selector (horoscope only) ----
            if tab == Tab::Horoscope {
                ui.strong("Which Planet?");
                let current = state.body;
                egui::ComboBox::from_id_salt("planet")
                    .selected_text(current.label())
                    .show_ui(ui, |ui: &mut Ui| {
                        for body in CelestialBody::SELECTABLE {
                            if ui.selectable_label(current == body, body.label()).clicked()
                                && current != body
                            {
                                state.body = body;
                                changed = true;
                            }
                        }
                    });
                ui.separator();
            }

            let tab_state = state.tab_state_mut(tab);

            // ---- Metric thresholds ----
            egui::CollapsingHeader::new(RichText::new("Display filters").strong())
                .id_salt(("filters", tab.title()))
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for metric in Metric::ALL {
                        let max = bounds[metric.index()];
                        let slider = egui::Slider::new(
                            tab_state.criteria.threshold_mut(metric),
                            0.0..=max,
                        )
                        .step_by(1.0)
                        .text(metric.label());
                        changed |= ui.add(slider).changed();
                    }
                    if ui.small_button("Reset").clicked() {
                        tab_state.criteria = Default::default();
                        changed = true;
                    }
                });

            ui.separator();
            ui.checkbox(&mut tab_state.show_table, "Show table");
        });

    if changed {
        state.refresh(tab);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for tab in Tab::ALL {
            if ui.selectable_label(state.tab == tab, tab.title()).clicked() {
                state.tab = tab;
            }
        }

        ui.separator();

        if let Some(table) = &state.table {
            let visible = state
                .tab_state(state.tab)
                .view
                .as_ref()
                .map_or(0, |v| v.filtered.len());
            ui.label(format!("{} players loaded, {visible} visible", table.len()));
        }
        if let Some(loader) = &state.loader {
            ui.label(RichText::new(loader.path().display().to_string()).weak());
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open player table")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(path);
    }
}
