mod app;
mod color;
mod config;
mod state;
mod ui;

use app::StudentScoresApp;
use clap::Parser;
use config::{Cli, Config};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_cli(&cli)?;

    let state = AppState::with_dataset(config.charts.clone(), &config.data_path)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Performance Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(StudentScoresApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
