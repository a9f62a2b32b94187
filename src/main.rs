use std::path::PathBuf;

use eframe::egui;
use massplot::app::MassPlotApp;
use massplot::data::loader;
use massplot::state::AppState;
use massplot::Config;

/// Environment variable naming a JSON config file.
const CONFIG_ENV: &str = "MASSPLOT_CONFIG";

fn load_config() -> Config {
    let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) else {
        return Config::default();
    };
    match Config::load(&path) {
        Ok(config) => {
            log::info!("Using config {}", path.display());
            config
        }
        Err(e) => {
            log::error!("Ignoring config {}: {e:#}", path.display());
            Config::default()
        }
    }
}

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::new(load_config());

    // Files or upload folders given on the command line are loaded up front.
    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if !args.is_empty() {
        state.ingest_paths(&loader::expand_dirs(&args));
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Invariant Mass Event Plotter",
        options,
        Box::new(move |_cc| Ok(Box::new(MassPlotApp::new(state)))),
    )
}
