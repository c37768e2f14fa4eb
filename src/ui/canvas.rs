// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drawing canvas for the reference image and zone overlay.
//!
//! This module provides the main canvas area where users can view the
//! reference image, drag the active zone's points and minimum rectangle
//! corners, and pick a zone by clicking inside it.

use crate::app::Tool;
use zonedit::editor::drag::{Corner, Handle};
use zonedit::{EditSession, Point, PointerPos};

/// Screen radius within which a press grabs a handle.
const HANDLE_RADIUS: f32 = 8.0;

/// Result of canvas interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasAction {
    None,
    SelectZone(u32),
    PressHandle(Handle, PointerPos),
    DragTo(PointerPos),
    Release,
    InsertVertexAfter(usize),
    RemoveVertex(usize),
}

/// Pointer drag events seen on the image during one frame.
#[derive(Debug, Default)]
struct DragInput {
    pressed: Option<(Handle, PointerPos)>,
    moved_to: Option<PointerPos>,
    stopped: bool,
}

/// Turn one frame's drag events into session gestures. A press always comes
/// before a release from the same frame.
fn drag_actions(input: DragInput, dragging: bool) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    let pressed = input.pressed.is_some();

    if let Some((handle, pos)) = input.pressed {
        actions.push(CanvasAction::PressHandle(handle, pos));
    } else if let Some(pos) = input.moved_to.filter(|_| dragging) {
        actions.push(CanvasAction::DragTo(pos));
    }
    if input.stopped && (dragging || pressed) {
        actions.push(CanvasAction::Release);
    }
    actions
}

/// Mapping between image pixels and the on-screen image rectangle.
struct ImageTransform {
    rect: egui::Rect,
    scale: f32,
}

impl ImageTransform {
    fn to_screen(&self, p: Point) -> egui::Pos2 {
        self.rect.min + egui::vec2(p.x as f32, p.y as f32) * self.scale
    }

    fn to_image(&self, pos: egui::Pos2) -> PointerPos {
        let rel = (pos - self.rect.min) / self.scale;
        PointerPos::new(rel.x as f64, rel.y as f64)
    }
}

/// Display the main canvas area and handle mouse interactions. Returns the
/// gestures to apply, in order.
pub fn show(
    ui: &mut egui::Ui,
    session: &EditSession,
    current_tool: Tool,
    image_texture: &Option<egui::TextureHandle>,
) -> Vec<CanvasAction> {
    let mut actions = Vec::new();
    // Set background color
    ui.style_mut().visuals.extreme_bg_color = egui::Color32::from_gray(40);

    let available_size = ui.available_size();
    let size = session.document().image_size();

    // Create a frame for the canvas
    egui::Frame::canvas(ui.style()).show(ui, |ui| {
        ui.set_min_size(available_size);

        let Some(texture) = image_texture.as_ref().filter(|_| size.width > 0 && size.height > 0)
        else {
            show_placeholder(ui, session);
            return;
        };

        // Calculate scaling to fit the image in the available space
        let available = ui.available_size();
        let scale = (available.x / size.width as f32).min(available.y / size.height as f32);
        let display = egui::vec2(size.width as f32, size.height as f32) * scale;

        // Center the image
        let offset = (available - display) / 2.0;
        let image_rect = egui::Rect::from_min_size(ui.min_rect().min + offset, display);
        let transform = ImageTransform { rect: image_rect, scale };

        ui.painter().image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        let response = ui.allocate_rect(image_rect, egui::Sense::click_and_drag());

        let mut input = DragInput {
            stopped: response.drag_stopped(),
            ..Default::default()
        };
        if response.drag_started() {
            let press = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let (Tool::Move, Some(pos)) = (current_tool, press) {
                input.pressed = hit_handle(session, &transform, pos)
                    .map(|handle| (handle, transform.to_image(pos)));
            }
        } else if response.dragged() {
            input.moved_to = response.interact_pointer_pos().map(|pos| transform.to_image(pos));
        }
        actions = drag_actions(input, session.drag().is_dragging());

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match click_action(session, &transform, current_tool, pos) {
                    CanvasAction::None => {}
                    action => actions.push(action),
                }
            }
        }

        draw_overlay(ui.painter(), session, &transform);
    });

    // Display current tool info at the bottom
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(format!("Current tool: {:?}", current_tool));
        ui.separator();
        match session.active_zone() {
            Some(id) => ui.label(format!("Editing zone {}", id)),
            None => ui.label("No zone selected"),
        };
        if size.width > 0 {
            ui.separator();
            ui.label(format!("{}x{}", size.width, size.height));
        }
    });

    actions
}

fn show_placeholder(ui: &mut egui::Ui, session: &EditSession) {
    let message = if session.document().image().source.is_empty() {
        "Open an image and a zones file to begin"
    } else {
        "Loading image..."
    };

    ui.centered_and_justified(|ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.heading(
                egui::RichText::new("Zone Editor")
                    .size(32.0)
                    .color(egui::Color32::from_gray(200)),
            );
            ui.add_space(20.0);
            ui.label(egui::RichText::new(message).color(egui::Color32::from_gray(180)));
            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("File → Open Image... / Load Zones...")
                    .weak()
                    .color(egui::Color32::from_gray(130)),
            );
        });
    });
}

/// Find the handle of the active zone under a screen position. Rectangle
/// corners win over vertices.
fn hit_handle(session: &EditSession, transform: &ImageTransform, pos: egui::Pos2) -> Option<Handle> {
    let editor = session.editor();
    let near = |p: Point| transform.to_screen(p).distance(pos) <= HANDLE_RADIUS;

    for corner in [Corner::First, Corner::Second] {
        if editor.min_corner(corner).is_some_and(|p| near(p)) {
            return Some(Handle::MinCorner(corner));
        }
    }
    hit_vertex(session, transform, pos).map(Handle::Vertex)
}

fn hit_vertex(session: &EditSession, transform: &ImageTransform, pos: egui::Pos2) -> Option<usize> {
    let id = session.active_zone()?;
    let zone = session.document().zone(id).ok()?;
    zone.points
        .iter()
        .position(|p| transform.to_screen(*p).distance(pos) <= HANDLE_RADIUS)
}

fn click_action(
    session: &EditSession,
    transform: &ImageTransform,
    tool: Tool,
    pos: egui::Pos2,
) -> CanvasAction {
    match (tool, hit_vertex(session, transform, pos)) {
        (Tool::InsertVertex, Some(index)) => CanvasAction::InsertVertexAfter(index),
        (Tool::RemoveVertex, Some(index)) => CanvasAction::RemoveVertex(index),
        (Tool::Move, None) => {
            let at = transform.to_image(pos);
            session
                .document()
                .zones()
                .find(|(_, zone)| zone.contains(at.x, at.y))
                .map_or(CanvasAction::None, |(id, _)| CanvasAction::SelectZone(id))
        }
        _ => CanvasAction::None,
    }
}

/// Draw every zone, then the active zone's handles and minimum rectangle.
fn draw_overlay(painter: &egui::Painter, session: &EditSession, transform: &ImageTransform) {
    let active = session.active_zone();

    for (id, zone) in session.document().zones() {
        if zone.points.is_empty() {
            continue;
        }
        let color = if Some(id) == active {
            egui::Color32::YELLOW
        } else {
            egui::Color32::from_gray(160)
        };
        let screen_points: Vec<egui::Pos2> =
            zone.points.iter().map(|p| transform.to_screen(*p)).collect();

        painter.text(
            screen_points[0] + egui::vec2(0.0, -HANDLE_RADIUS),
            egui::Align2::LEFT_BOTTOM,
            &zone.name,
            egui::FontId::proportional(14.0),
            color,
        );
        painter.add(egui::Shape::closed_line(
            screen_points,
            egui::Stroke::new(2.0, color),
        ));
    }

    let editor = session.editor();

    if let Some(rect) = editor.min_rect() {
        let corners: Vec<egui::Pos2> = rect.iter().map(|p| transform.to_screen(*p)).collect();
        painter.add(egui::Shape::closed_line(
            corners,
            egui::Stroke::new(1.5, egui::Color32::LIGHT_BLUE),
        ));
        for corner in [Corner::First, Corner::Second] {
            if let Some(p) = editor.min_corner(corner) {
                let handle = egui::Rect::from_center_size(
                    transform.to_screen(p),
                    egui::vec2(HANDLE_RADIUS, HANDLE_RADIUS),
                );
                painter.rect_filled(handle, 0.0, egui::Color32::LIGHT_BLUE);
                painter.rect_stroke(handle, 0.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
            }
        }
    }

    let Some(zone) = active.and_then(|id| session.document().zone(id).ok()) else {
        return;
    };
    for (index, point) in zone.points.iter().enumerate() {
        let center = transform.to_screen(*point);
        let fill = if editor.active_point() == Some(index) {
            egui::Color32::RED
        } else {
            egui::Color32::WHITE
        };
        painter.circle_filled(center, HANDLE_RADIUS / 2.0, fill);
        painter.circle_stroke(center, HANDLE_RADIUS / 2.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
    }
}
