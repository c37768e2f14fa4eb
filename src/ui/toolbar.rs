// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar and tool selection UI.
//!
//! This module provides the toolbar interface for choosing what a click on
//! a vertex of the active zone does.

use crate::app::Tool;

/// Display the toolbar with tool selection buttons.
pub fn show(ui: &mut egui::Ui, current_tool: &mut Tool) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        ui.label("Tools:");

        ui.separator();

        // Move tool
        if ui.selectable_label(*current_tool == Tool::Move, "✥ Move").clicked() {
            *current_tool = Tool::Move;
        }

        // Insert vertex tool
        if ui.selectable_label(*current_tool == Tool::InsertVertex, "➕ Insert point").clicked() {
            *current_tool = Tool::InsertVertex;
        }

        // Remove vertex tool
        if ui.selectable_label(*current_tool == Tool::RemoveVertex, "➖ Remove point").clicked() {
            *current_tool = Tool::RemoveVertex;
        }

        ui.separator();

        // Tool description
        let tool_text = match current_tool {
            Tool::Move => "Drag points or rectangle corners, click inside a zone to select it",
            Tool::InsertVertex => "Click a point to insert a new point after it",
            Tool::RemoveVertex => "Click a point to remove it (zones keep at least 3 points)",
        };

        ui.label(egui::RichText::new(tool_text).italics().weak());
    });
}
