// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Inscribe - text overlays for rotating backgrounds.
//!
//! A cross-platform desktop application for placing styled text labels
//! on a rotating set of background images, with per-background undo/redo
//! and background reordering.

mod app;
mod io;
mod models;
mod ui;
mod util;

use app::InscribeApp;
use anyhow::Result;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Background images may be given on the command line
    let backgrounds: Vec<String> = std::env::args().skip(1).collect();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Inscribe - Text Overlay Editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Inscribe",
        options,
        Box::new(move |_cc| Ok(Box::new(InscribeApp::new(backgrounds)))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
