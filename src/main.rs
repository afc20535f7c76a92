// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use eframe::egui;

use statement_analyzer::app::StatementApp;
use statement_analyzer::config::Settings;
use statement_analyzer::logging;

fn main() -> Result<()> {
    logging::init_logging();

    let settings = Settings::load().context("Failed to load settings")?;
    let title = settings.window.title.clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window.width, settings.window.height])
            .with_title(title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(StatementApp::new(cc, &settings))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
