use std::f64::consts::TAU;

use eframe::egui::{self, Color32, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, Polygon};

use crate::chart::BACKGROUND;
use crate::view::{Chart, ChartKind};

/// Outline so white bars and slices stay visible on the light background.
const OUTLINE: Stroke = Stroke {
    width: 1.0,
    color: Color32::DARK_GRAY,
};

/// Segments of a full circle.
const PIE_RESOLUTION: usize = 180;

/// Draw a chart from a render model.
pub fn chart(ui: &mut Ui, chart: &Chart, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(&chart.title);
    });

    if chart.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("No players match the current filters.");
            });
        });
    } else {
        egui::Frame::default().fill(BACKGROUND).show(ui, |ui: &mut Ui| match chart.kind {
            ChartKind::Bar => bar_chart(ui, chart, height),
            ChartKind::Pie => pie_chart(ui, chart, height),
        });
    }

    if chart.unclassified > 0 {
        ui.label(
            egui::RichText::new(format!(
                "{} players with an unrecognised value are not shown",
                chart.unclassified
            ))
            .weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// Bar chart (counts per category, fixed order)
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, chart: &Chart, height: f32) {
    let bars: Vec<Bar> = chart
        .entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(i as f64, e.count as f64)
                .name(&e.label)
                .fill(e.color)
                .stroke(OUTLINE)
                .width(0.8)
        })
        .collect();

    let labels: Vec<String> = chart.entries.iter().map(|e| e.label.clone()).collect();

    Plot::new(("bar", chart.title.as_str()))
        .height(height)
        .y_axis_label("count")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > f64::EPSILON || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

// ---------------------------------------------------------------------------
// Pie chart (share per category)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, chart: &Chart, height: f32) {
    let total = chart.total() as f64;

    Plot::new(("pie", chart.title.as_str()))
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for entry in &chart.entries {
                let sweep = entry.count as f64 / total * TAU;
                let share = 100.0 * entry.count as f64 / total;
                plot_ui.polygon(
                    Polygon::new(slice(start, sweep))
                        .fill_color(entry.color)
                        .stroke(OUTLINE)
                        .name(format!("{} ({share:.1}%)", entry.label)),
                );
                start += sweep;
            }
        });
}

/// Closed outline of a unit-circle slice starting at 12 o'clock, clockwise.
fn slice(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
    let arc = (0..=steps).map(|k| {
        let angle = start + sweep * k as f64 / steps as f64;
        [angle.sin(), angle.cos()]
    });
    std::iter::once([0.0, 0.0]).chain(arc).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_starts_at_centre_and_spans_the_sweep() {
        let pts = slice(0.0, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        assert!(pts[1][0].abs() < 1e-12 && (pts[1][1] - 1.0).abs() < 1e-12);
        let last = pts[pts.len() - 1];
        assert!((last[0] - 1.0).abs() < 1e-12 && last[1].abs() < 1e-12);
        assert_eq!(pts.len(), 2 + PIE_RESOLUTION / 4);
    }
}
