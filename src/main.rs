mod app;
mod color;
mod data;
mod pipeline;
mod state;
mod ui;

use std::path::PathBuf;

use app::ClimaScopeApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset path as the first argument.
    let initial_file: Option<PathBuf> = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "ClimaScope – CMIP6 Anomaly Explorer",
        options,
        Box::new(move |_cc| {
            let app = match &initial_file {
                Some(path) => ClimaScopeApp::with_file(path),
                None => ClimaScopeApp::default(),
            };
            Ok(Box::new(app))
        }),
    )
}
