mod app;
mod color;
mod data;
mod error;
mod render;
mod state;
mod ui;

use app::CometViewerApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 1000.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "COMET Data Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(CometViewerApp::default()))),
    )
}
