#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod keyboard;
mod model;
mod settings;
mod theme;
mod theory;
mod ui;

use crate::app::KeyscopeApp;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Keyscope")
            .with_inner_size([960.0, 480.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    let run_result = eframe::run_native(
        "Keyscope",
        native_options,
        Box::new(|cc| {
            let app = KeyscopeApp::new(cc)?;
            Ok(Box::new(app))
        }),
    );

    if let Err(e) = run_result {
        return Err(anyhow::anyhow!("Eframe run error: {}", e));
    }

    Ok(())
}
