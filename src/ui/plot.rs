use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Plot, PlotBounds, PlotPoints, Points};

use crate::color::Gradient;
use crate::render::{Chart, GRADIENT_STEPS, Legend};
use crate::state::AppState;

/// Height of the continuous colour bar, in points.
const COLOR_BAR_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Marker scatter (central panel)
// ---------------------------------------------------------------------------

/// Render the marker scatter in the central panel.
pub fn scatter_plot(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Choose a .tsv file to view markers  (File → Open…)");
        });
        return;
    }

    let chart = match &state.chart {
        Some(Ok(chart)) => chart,
        Some(Err(msg)) => {
            ui.label(RichText::new(msg).color(Color32::RED));
            return;
        }
        None => {
            ui.label("Select a marker to plot.");
            return;
        }
    };

    ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_top(|ui: &mut Ui| {
                draw_chart(ui, chart);
                ui.add_space(12.0);
                ui.vertical(|ui: &mut Ui| draw_legend(ui, &chart.legend));
            });
        });
}

fn draw_chart(ui: &mut Ui, chart: &Chart) {
    let [x_min, x_max] = padded(chart.x_range);
    let [y_min, y_max] = padded(chart.y_range);

    Plot::new("marker_scatter")
        .width(chart.width_px)
        .height(chart.height_px)
        .show_axes(chart.show_tick_labels)
        .x_axis_label(chart.x_title.clone())
        .y_axis_label(chart.y_title.clone())
        .show_x(false)
        .show_y(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_double_click_reset(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));

            for series in &chart.series {
                let points = Points::new(PlotPoints::from(series.points.clone()))
                    .name(&series.name)
                    .color(series.color)
                    .radius(chart.point_radius)
                    .filled(true);
                plot_ui.points(points);
            }
        });
}

/// Widen a degenerate axis range so the plot can still be drawn.
fn padded([min, max]: [f64; 2]) -> [f64; 2] {
    if max - min > 0.0 {
        [min, max]
    } else {
        [min - 0.5, max + 0.5]
    }
}

fn draw_legend(ui: &mut Ui, legend: &Legend) {
    match legend {
        Legend::Categorical { title, entries } => {
            ui.strong(title);
            for (label, color) in entries {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("●").color(*color));
                    ui.label(label);
                });
            }
        }
        Legend::ColorBar { column, min, max } => {
            ui.strong(column);
            ui.monospace(format!("{max:.4}"));
            color_bar(ui);
            ui.monospace(format!("{min:.4}"));
        }
    }
}

/// Vertical viridis bar, high values on top.
fn color_bar(ui: &mut Ui) {
    let (rect, _) =
        ui.allocate_exact_size(egui::vec2(18.0, COLOR_BAR_HEIGHT), egui::Sense::hover());
    let gradient = Gradient::viridis();
    let step = rect.height() / GRADIENT_STEPS as f32;

    let painter = ui.painter();
    for i in 0..GRADIENT_STEPS {
        let t = 1.0 - i as f64 / (GRADIENT_STEPS - 1) as f64;
        let top = rect.top() + i as f32 * step;
        let slice = egui::Rect::from_min_max(
            egui::pos2(rect.left(), top),
            egui::pos2(rect.right(), top + step),
        );
        painter.rect_filled(slice, 0.0, gradient.color_at(t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        assert_eq!(padded([0.0, 10.0]), [0.0, 10.0]);
        assert_eq!(padded([3.0, 3.0]), [2.5, 3.5]);
    }
}
