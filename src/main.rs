//! Garment Studio - UV texture compositing with a live placement editor
//!
//! Main entry point for the application.

use eframe::egui;
use garment_studio::GarmentStudioApp;
use std::path::PathBuf;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Starting Garment Studio v{}", env!("CARGO_PKG_VERSION"));

    // Template path: first CLI argument, falling back to template.png when
    // one sits next to the binary. Without either, a placeholder atlas is
    // used and everything still works.
    let template_path = std::env::args().nth(1).map(PathBuf::from).or_else(|| {
        let default = PathBuf::from("template.png");
        default.exists().then_some(default)
    });

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Garment Studio"),
        vsync: true,
        multisampling: 0,
        ..Default::default()
    };

    // Run the app
    eframe::run_native(
        "Garment Studio",
        native_options,
        Box::new(move |cc| Box::new(GarmentStudioApp::new(cc, template_path))),
    )
}
