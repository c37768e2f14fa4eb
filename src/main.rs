// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone editor - define detection zones over a reference image
//!
//! A cross-platform desktop application for drawing the polygonal zones
//! and minimum object sizes a motion detector watches.

mod app;
mod ui;

use anyhow::Result;
use app::ZoneEditorApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Zone Editor"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "zonedit",
        options,
        Box::new(|_cc| Ok(Box::new(ZoneEditorApp::new()))),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
