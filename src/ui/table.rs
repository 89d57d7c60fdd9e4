use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CelestialBody, Metric, Player, PlayerTable};
use crate::state::Tab;

const ROW_HEIGHT: f32 = 18.0;

/// Column headers of the player table on `tab`.
pub fn headers(table: &PlayerTable, tab: Tab) -> Vec<String> {
    let mut headers = table.extra_columns.clone();
    headers.extend(Metric::ALL.iter().map(|m| m.column().to_string()));
    match tab {
        Tab::Venus => {
            headers.push("venus_cycle".into());
            headers.push("color".into());
        }
        Tab::Horoscope => {
            headers.extend(CelestialBody::ALL.iter().map(|b| b.column().to_string()));
        }
    }
    headers
}

/// Cells of one player, matching [`headers`].
pub fn cells(table: &PlayerTable, player: &Player, tab: Tab) -> Vec<String> {
    let mut cells: Vec<String> = table
        .extra_columns
        .iter()
        .map(|c| player.extra.get(c).map(|v| v.to_string()).unwrap_or_default())
        .collect();
    cells.extend(Metric::ALL.iter().map(|&m| format!("{:.2}", player.metric(m))));
    match tab {
        Tab::Venus => {
            cells.push(player.venus_cycle.to_string());
            cells.push(
                player
                    .venus_cycle
                    .known()
                    .map(|v| v.color.to_string())
                    .unwrap_or_default(),
            );
        }
        Tab::Horoscope => {
            cells.extend(CelestialBody::ALL.iter().map(|&b| player.sign(b).to_string()));
        }
    }
    cells
}

/// Render the filtered players as a scrollable table.
pub fn player_table(ui: &mut Ui, table: &PlayerTable, tab: Tab) {
    ui.heading("Players");
    let headers = headers(table, tab);

    TableBuilder::new(ui)
        .id_salt(("players", tab.title()))
        .striped(true)
        .max_scroll_height(320.0)
        .columns(Column::auto().resizable(true), headers.len())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for h in &headers {
                header.col(|ui| {
                    ui.strong(h);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, table.len(), |mut row| {
                let player = &table.players[row.index()];
                for cell in cells(table, player, tab) {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
