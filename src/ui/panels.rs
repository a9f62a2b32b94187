use std::path::PathBuf;

use eframe::egui::{self, Color32, DragValue, RichText, ScrollArea, Ui};

use crate::data::export;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – event filter and axis bounds
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Final states");
    ui.separator();

    if state.store.is_empty() {
        ui.label("No files loaded.");
        return;
    }

    let labels = state.store.available_labels();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for label in &labels {
                let mut checked = state.is_label_selected(label);
                let text = format!("{}  ({label})", state.config.display_name(label));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_label(label);
                }
            }

            ui.add_space(8.0);
            ui.strong("X-axis bounds");
            ui.separator();
            bounds_widgets(ui, state);
        });
}

fn bounds_widgets(ui: &mut Ui, state: &mut AppState) {
    let (Some(limits), Some((mut lo, mut hi))) = (state.limits, state.effective_range) else {
        ui.label("No data in the current selection.");
        return;
    };

    let mut changed = false;
    egui::Grid::new("bounds").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("X-axis min");
        changed |= ui
            .add(DragValue::new(&mut lo).speed(1.0).range(limits.min..=limits.max))
            .changed();
        ui.end_row();

        ui.label("X-axis max");
        changed |= ui
            .add(DragValue::new(&mut hi).speed(1.0).range(limits.min..=limits.max))
            .changed();
        ui.end_row();
    });
    if changed {
        state.set_bounds(lo, hi);
    }
    if ui.small_button("Reset to data range").clicked() {
        state.reset_bounds();
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
            ui.separator();
            if ui.button("Export bin tables…").clicked() {
                export_dialog(state, ExportKind::Bins);
                ui.close_menu();
            }
            if ui.button("Export statistics…").clicked() {
                export_dialog(state, ExportKind::Stats);
                ui.close_menu();
            }
        });

        ui.separator();

        if !state.store.is_empty() {
            ui.label(format!("{} files loaded", state.store.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let files: Option<Vec<PathBuf>> = rfd::FileDialog::new()
        .set_title("Open event files")
        .add_filter("Text files", &["txt", "TXT"])
        .pick_files();

    if let Some(paths) = files {
        state.ingest_paths(&paths);
    }
}

enum ExportKind {
    Bins,
    Stats,
}

fn export_dialog(state: &mut AppState, kind: ExportKind) {
    let default_name = match kind {
        ExportKind::Bins => "histograms.csv",
        ExportKind::Stats => "statistics.csv",
    };
    let Some(path) = rfd::FileDialog::new()
        .set_title("Export CSV")
        .add_filter("CSV", &["csv"])
        .set_file_name(default_name)
        .save_file()
    else {
        return;
    };

    let result = match kind {
        ExportKind::Bins => export::export_bin_tables(&path, &state.exportable_tables()),
        ExportKind::Stats => export::export_stats(&path, &state.exportable_stats()),
    };
    if let Err(e) = result {
        log::error!("Export failed: {e:#}");
        state.status_message = Some(format!("Error: {e:#}"));
    }
}
