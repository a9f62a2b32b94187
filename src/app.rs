use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct MassPlotApp {
    pub state: AppState,
}

impl MassPlotApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Files dropped onto the window count as uploads.
    fn ingest_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let mut paths = Vec::new();
        for file in dropped {
            match (file.path, file.bytes) {
                (Some(path), _) => paths.push(path),
                (None, Some(bytes)) => self.state.ingest_bytes(&file.name, &bytes),
                (None, None) => log::warn!("Dropped file {} has no content", file.name),
            }
        }
        if !paths.is_empty() {
            self.state.ingest_paths(&paths);
        }
    }
}

impl Default for MassPlotApp {
    fn default() -> Self {
        Self::new(AppState::default())
    }
}

impl eframe::App for MassPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ingest_dropped_files(ctx);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: event filter, bounds ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: histograms ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::histogram_panel(ui, &mut self.state);
        });
    }
}
