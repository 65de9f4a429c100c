use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use crate::data::filter::ScaleBounds;
use crate::data::stats::ScaleStats;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – chart options
// ---------------------------------------------------------------------------

/// Render the left options panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Options");
    ui.separator();

    if ui.button("Choose a file…").clicked() {
        open_file_dialog(state);
    }
    ui.add_space(4.0);

    if state.table.is_none() {
        ui.label("No file loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Marker selector ----
            ui.strong("Select the marker to plot");
            if state.choices.is_empty() {
                ui.label(
                    RichText::new("No selectable columns in this file.").color(Color32::RED),
                );
            }
            let current = state.config.marker.clone();
            let mut picked: Option<String> = None;
            egui::ComboBox::from_id_salt("marker_choice")
                .selected_text(&current)
                .width(ui.available_width() * 0.9)
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &state.choices {
                        if ui.selectable_label(current == *col, col).clicked() {
                            picked = Some(col.clone());
                        }
                    }
                });
            if let Some(col) = picked {
                if col != current {
                    state.select_marker(col);
                }
            }
            ui.separator();

            // Edit a copy; the marker change above has already been applied.
            let mut config = state.config.clone();

            // ---- Figure options ----
            egui::Grid::new("figure_options")
                .num_columns(2)
                .spacing([8.0, 4.0])
                .show(ui, |ui: &mut Ui| {
                    ui.label("Figure width");
                    ui.add(DragValue::new(&mut config.width).speed(0.1));
                    ui.end_row();

                    ui.label("Figure height");
                    ui.add(DragValue::new(&mut config.height).speed(0.1));
                    ui.end_row();

                    ui.label("Dot size");
                    ui.add(DragValue::new(&mut config.dot_size).speed(0.5).max_decimals(2));
                    ui.end_row();
                });

            // ---- Numeric scale ----
            let numeric = state.stats().copied().zip(state.effective_bounds());
            if let Some((stats, bounds)) = numeric {
                ui.separator();
                ui.strong("Colour scale");
                let mut edited = bounds;
                let speed = scale_speed(&stats);

                egui::Grid::new("scale_options")
                    .num_columns(2)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui: &mut Ui| {
                        ui.label("Set minimum value for the scale");
                        ui.add(DragValue::new(&mut edited.min).speed(speed));
                        ui.end_row();

                        ui.label("Set maximum value for the scale");
                        ui.add(DragValue::new(&mut edited.max).speed(speed));
                        ui.end_row();
                    });

                if edited != bounds {
                    config.scale = Some(edited);
                }
                if config.scale.is_some() && ui.small_button("Reset to defaults").clicked() {
                    config.scale = None;
                }

                ui.checkbox(&mut config.filter_outliers, "Hide points outside the scale");

                ui.add_space(4.0);
                stats_table(ui, &stats, edited);
            }

            state.update_config(config);
        });
}

fn scale_speed(stats: &ScaleStats) -> f64 {
    let span = stats.max - stats.min;
    if span > 0.0 { span / 200.0 } else { 0.01 }
}

/// Summary statistics of the numeric marker.
fn stats_table(ui: &mut Ui, stats: &ScaleStats, bounds: ScaleBounds) {
    let rows = [
        ("Values", stats.count.to_string()),
        ("Missing", stats.missing.to_string()),
        ("Min", format!("{:.4}", stats.min)),
        ("Q1", format!("{:.4}", stats.q1)),
        ("Q3", format!("{:.4}", stats.q3)),
        ("Max", format!("{:.4}", stats.max)),
        ("IQR", format!("{:.4}", stats.iqr)),
        ("Lower fence", format!("{:.4}", stats.lower)),
        ("Upper fence", format!("{:.4}", stats.upper)),
        ("Scale", format!("{:.4} – {:.4}", bounds.min, bounds.max)),
    ];

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(TableColumn::auto())
        .column(TableColumn::remainder())
        .body(|mut body| {
            for (label, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(label);
                    });
                    row.col(|ui| {
                        ui.monospace(value);
                    });
                });
            }
        });
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

        if let (Some(table), Some(source)) = (&state.table, &state.source) {
            ui.label(format!("{source}: {} rows", table.n_rows()));
            if let Some(Ok(chart)) = &state.chart {
                ui.label(format!("{} plotted", chart.point_count()));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Choose a file")
        .add_filter("Tab-separated values", &["tsv"])
        .pick_file();

    let Some(path) = file else { return };
    match crate::data::loader::load_file(&path) {
        Ok(table) => {
            log::info!(
                "Loaded {} rows with columns {:?}",
                table.n_rows(),
                table.column_names()
            );
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            state.set_table(table, source);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.set_load_error(format!("Error: {e:#}"));
        }
    }
}
