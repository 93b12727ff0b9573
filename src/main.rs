mod app;
mod booth;
mod canvas;
mod config;
mod coordinate;
mod editor;
mod error;
mod export;
mod notice;
mod readout;
mod session;
mod ui;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::BoothPlanApp;
use canvas::PlanCanvas;
use config::{Cli, EditorConfig};
use editor::PlanEditor;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EditorConfig::from(Cli::parse());
    let booths = export::load_booths(&config.booths_path)?;
    let plan_image = config
        .image_path
        .as_deref()
        .map(app::load_plan_image)
        .transpose()
        .context("loading plan image")?;
    let editor = PlanEditor::create(booths, PlanCanvas::new(config.notice_hold))?;

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1280.0, 800.0)),
        min_window_size: Some(egui::vec2(800.0, 600.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Booth Plan Editor",
        native_options,
        Box::new(move |cc| Box::new(BoothPlanApp::new(cc, editor, plan_image, &config))),
    )
    .map_err(|err| anyhow::anyhow!("window failed: {err:?}"))
}
