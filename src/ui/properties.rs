// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone properties panel.
//!
//! This module provides the properties panel for listing zones, editing the
//! active zone's parameters and points, and setting the document's upload
//! defaults.

use zonedit::{EditSession, Zone, ZoneEdit};

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    SelectZone(u32),
    AddZone,
    DeleteZone(u32),
    EditZone(u32, ZoneEdit),
    InsertVertexAfter(usize),
    RemoveVertex(usize),
    SetUploadDefaults(bool, String),
}

/// Display the properties panel.
pub fn show(ui: &mut egui::Ui, session: &EditSession) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Zones");
        ui.separator();

        let active = session.active_zone();
        for (id, zone) in session.document().zones() {
            ui.horizontal(|ui| {
                let label = format!("{}. {}", id, zone.name);
                if ui.selectable_label(active == Some(id), label).clicked() {
                    action = PropertiesAction::SelectZone(id);
                }
                if ui.small_button("🗑").on_hover_text("Delete zone").clicked() {
                    action = PropertiesAction::DeleteZone(id);
                }
            });
        }
        if ui.button("➕ Add Zone").clicked() {
            action = PropertiesAction::AddZone;
        }

        if let Some(id) = active {
            if let Ok(zone) = session.document().zone(id) {
                ui.add_space(10.0);
                ui.heading(format!("Zone {}", id));
                ui.separator();
                if let Some(edit) = zone_fields(ui, zone) {
                    action = PropertiesAction::EditZone(id, edit);
                }

                ui.add_space(10.0);
                ui.label(egui::RichText::new("Points").strong());
                if let Some(points_action) = point_rows(ui, session, zone) {
                    action = points_action;
                }

                egui::CollapsingHeader::new("Overlay paths").show(ui, |ui| {
                    ui.label("Polygon");
                    ui.code(session.editor().polygon_path());
                    ui.label("Minimum rectangle");
                    ui.code(session.editor().min_rect_path());
                });
            }
        }

        ui.add_space(10.0);
        ui.heading("Export");
        ui.separator();
        let doc = session.document();
        let mut upload = doc.upload_to_s3;
        let mut bucket = doc.s3_bucket.clone();
        let upload_changed = ui.checkbox(&mut upload, "Upload to S3").changed();
        let bucket_changed = ui
            .horizontal(|ui| {
                ui.label("S3 bucket:");
                ui.text_edit_singleline(&mut bucket).changed()
            })
            .inner;
        if upload_changed || bucket_changed {
            action = PropertiesAction::SetUploadDefaults(upload, bucket);
        }
    });

    action
}

/// Editable scalar fields of a zone. Returns the edit made this frame.
fn zone_fields(ui: &mut egui::Ui, zone: &Zone) -> Option<ZoneEdit> {
    let mut edit = None;

    egui::Grid::new("zone_fields").num_columns(2).show(ui, |ui| {
        let mut name = zone.name.clone();
        ui.label("Name");
        if ui.text_edit_singleline(&mut name).changed() {
            edit = Some(ZoneEdit::Rename(name));
        }
        ui.end_row();

        let mut warmup = zone.warmup;
        ui.label("Warmup (s)");
        if ui.add(egui::DragValue::new(&mut warmup)).changed() {
            edit = Some(ZoneEdit::Warmup(warmup));
        }
        ui.end_row();

        let mut cooldown = zone.cooldown;
        ui.label("Cooldown (s)");
        if ui.add(egui::DragValue::new(&mut cooldown)).changed() {
            edit = Some(ZoneEdit::Cooldown(cooldown));
        }
        ui.end_row();

        let mut continuation = zone.continuation;
        ui.label("Continuation");
        if ui.add(egui::DragValue::new(&mut continuation)).changed() {
            edit = Some(ZoneEdit::Continuation(continuation));
        }
        ui.end_row();

        let (mut x, mut y) = (zone.minimum_x, zone.minimum_y);
        ui.label("Minimum size");
        let resized = ui
            .horizontal(|ui| {
                let x_changed = ui.add(egui::DragValue::new(&mut x).suffix(" px")).changed();
                ui.label("×");
                let y_changed = ui.add(egui::DragValue::new(&mut y).suffix(" px")).changed();
                x_changed || y_changed
            })
            .inner;
        if resized {
            edit = Some(ZoneEdit::MinimumSize { x, y });
        }
        ui.end_row();

        let mut upload = zone.upload_to_s3;
        ui.label("Upload");
        if ui.checkbox(&mut upload, "to S3").changed() {
            edit = Some(ZoneEdit::UploadToS3(upload));
        }
        ui.end_row();

        let mut bucket = zone.s3_bucket.clone();
        ui.label("S3 bucket");
        if ui.text_edit_singleline(&mut bucket).changed() {
            edit = Some(ZoneEdit::S3Bucket(bucket));
        }
        ui.end_row();
    });

    edit
}

/// One row per vertex with insert-after and remove buttons.
fn point_rows(ui: &mut egui::Ui, session: &EditSession, zone: &Zone) -> Option<PropertiesAction> {
    let mut action = None;
    let active_point = session.editor().active_point();

    for (index, point) in zone.points.iter().enumerate() {
        ui.horizontal(|ui| {
            let text = egui::RichText::new(format!("{}: {}", index, point)).monospace();
            let text = if active_point == Some(index) { text.strong() } else { text };
            ui.label(text);
            if ui.small_button("+").on_hover_text("Insert point after").clicked() {
                action = Some(PropertiesAction::InsertVertexAfter(index));
            }
            if ui.small_button("−").on_hover_text("Remove point").clicked() {
                action = Some(PropertiesAction::RemoveVertex(index));
            }
        });
    }

    action
}
