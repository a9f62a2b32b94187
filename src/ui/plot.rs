use eframe::egui::{self, Align2, Color32, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoint, Text};

use crate::color::SUMMED_COLOR;
use crate::data::histogram::BinTable;
use crate::state::{AppState, HistogramView};

/// Changes requested while drawing, applied once the views are released.
enum ViewAction {
    SetBins(String, usize),
    ToggleCounts(String),
}

// ---------------------------------------------------------------------------
// Histogram list (central panel)
// ---------------------------------------------------------------------------

/// Render one histogram + stats table per dataset, then the summed one.
pub fn histogram_panel(ui: &mut Ui, state: &mut AppState) {
    if state.views.is_empty() {
        let notice = state.notice.clone().unwrap_or_default();
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(notice);
        });
        return;
    }

    let mut actions = Vec::new();
    let current: &AppState = state;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for view in &current.views {
                view_section(ui, current, view, &mut actions);
                ui.separator();
            }
        });

    for action in actions {
        match action {
            ViewAction::SetBins(key, bins) => state.set_bins(&key, bins),
            ViewAction::ToggleCounts(key) => state.toggle_show_counts(&key),
        }
    }
}

fn view_section(ui: &mut Ui, state: &AppState, view: &HistogramView, actions: &mut Vec<ViewAction>) {
    ui.heading(&view.title);

    ui.horizontal(|ui: &mut Ui| {
        egui::ComboBox::from_id_salt(("bins", &view.key))
            .selected_text(format!("{} bins", view.bins))
            .show_ui(ui, |ui: &mut Ui| {
                for &opt in &state.config.bin_options {
                    if ui.selectable_label(opt == view.bins, opt.to_string()).clicked()
                        && opt != view.bins
                    {
                        actions.push(ViewAction::SetBins(view.key.clone(), opt));
                    }
                }
            });

        let mut show = state.show_counts.contains(&view.key);
        if ui.checkbox(&mut show, "Show bin counts").changed() {
            actions.push(ViewAction::ToggleCounts(view.key.clone()));
        }
    });

    let color = if view.is_summed() {
        SUMMED_COLOR
    } else {
        state.color_map.color_for(&view.key)
    };

    ui.horizontal_top(|ui: &mut Ui| {
        let plot_width = (ui.available_width() * 0.75).max(200.0);
        match &view.table {
            Ok(table) => {
                let show_counts = state.show_counts.contains(&view.key);
                bar_plot(ui, view, table, color, show_counts, plot_width);
            }
            Err(e) => {
                ui.label(RichText::new(e.to_string()).color(Color32::YELLOW));
            }
        }

        ui.vertical(|ui: &mut Ui| match &view.stats {
            Ok(stats) => {
                egui::Grid::new(("stats", &view.key))
                    .striped(true)
                    .num_columns(2)
                    .show(ui, |ui: &mut Ui| {
                        ui.strong("Statistic");
                        ui.strong("Value");
                        ui.end_row();
                        for (name, value) in stats.rows() {
                            ui.label(name);
                            ui.label(value);
                            ui.end_row();
                        }
                    });
            }
            Err(e) => {
                ui.label(e.to_string());
            }
        });
    });
}

fn bar_plot(
    ui: &mut Ui,
    view: &HistogramView,
    table: &BinTable,
    color: Color32,
    show_counts: bool,
    width: f32,
) {
    let bars: Vec<Bar> = table
        .bins()
        .iter()
        .map(|b| Bar::new(b.center(), b.count as f64).width(table.width()))
        .collect();
    let (x_lo, x_hi) = match (table.bins().first(), table.bins().last()) {
        (Some(first), Some(last)) => (first.lower, last.upper),
        _ => (0.0, 1.0),
    };

    Plot::new(("histogram", &view.key))
        .width(width)
        .height(250.0)
        .x_axis_label("Invariant Mass")
        .y_axis_label(table.count_axis_label())
        .include_x(x_lo)
        .include_x(x_hi)
        .include_y(0.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color).name(&view.title));
            if show_counts {
                for b in table.bins().iter().filter(|b| b.count > 0) {
                    plot_ui.text(
                        Text::new(PlotPoint::new(b.center(), b.count as f64), b.count.to_string())
                            .anchor(Align2::CENTER_BOTTOM),
                    );
                }
            }
        });
}
