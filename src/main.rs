// main.rs
mod app;
mod config;
mod logging;
mod utils;

use app::App;
use eframe::NativeOptions;

fn main() {
    logging::init();

    let load = config::load_settings();
    tracing::info!(path = %config::config_path().display(), "settings loaded");

    let native_options = NativeOptions {
        initial_window_size: Some(egui::Vec2::new(900.0, 720.0)),
        resizable: true,
        ..Default::default()
    };
    eframe::run_native(
        "CR3 to DNG Converter",
        native_options,
        Box::new(move |_cc| Box::new(App::new(load.settings, load.warnings))),
    );
}
