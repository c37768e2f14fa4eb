// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the egui::App trait. It owns the editing session, turns canvas and panel
//! interactions into session gestures, and runs image decoding off the UI
//! thread.

use crate::ui::{canvas, properties, toolbar};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use zonedit::io::{media, serialization};
use zonedit::models::document::ImageTicket;
use zonedit::{EditError, EditSession};

/// What a click on a vertex of the active zone does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Move,
    InsertVertex,
    RemoveVertex,
}

/// Result of a background image load, tagged with the request it answers.
struct LoadedImageData {
    ticket: ImageTicket,
    image: Result<media::LoadedImage, String>,
}

/// Main application state.
pub struct ZoneEditorApp {
    /// Currently selected tool
    current_tool: Tool,

    /// The zone document and its editing state
    session: EditSession,

    /// Zones file the document was loaded from, if any
    zones_path: Option<PathBuf>,

    /// Loaded image texture for display
    image_texture: Option<egui::TextureHandle>,

    /// Channel background image loads report back on
    image_sender: Sender<LoadedImageData>,
    image_receiver: Receiver<LoadedImageData>,

    /// Loading state message
    loading_message: Option<String>,

    /// Last error shown to the user
    error_message: Option<String>,
}

impl Default for ZoneEditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl ZoneEditorApp {
    /// Create a new zone editor instance.
    pub fn new() -> Self {
        let (image_sender, image_receiver) = channel();
        Self {
            current_tool: Tool::Move,
            session: EditSession::new(),
            zones_path: None,
            image_texture: None,
            image_sender,
            image_receiver,
            loading_message: None,
            error_message: None,
        }
    }

    /// Show an error to the user.
    fn report(&mut self, message: String) {
        log::error!("{}", message);
        self.error_message = Some(message);
    }

    /// Log a rejected gesture. These are expected while editing and are not
    /// surfaced as alerts, except for the invariant guards.
    fn rejected(&mut self, err: EditError) {
        match err {
            EditError::LastZone | EditError::MinimumVertices { .. } => {
                self.report(format!("Cannot do that: {}", err))
            }
            _ => log::warn!("Gesture rejected: {}", err),
        }
    }

    /// Start a new document with one default zone.
    fn new_document(&mut self) {
        if let Err(e) = self.session.generate_default_zone() {
            self.rejected(e);
        }
    }

    /// Load a zones file and the image it refers to.
    fn import_zones(&mut self, path: PathBuf) {
        let data = match serialization::import(&path) {
            Ok(data) => data,
            Err(e) => {
                self.report(format!("Failed to load zones: {:#}", e));
                return;
            }
        };

        match self.session.load_zones(data) {
            Ok(ticket) => {
                log::info!("Imported zones from {}", path.display());
                self.zones_path = Some(path);
                if let Some(ticket) = ticket {
                    self.image_texture = None;
                    self.load_referenced_image(ticket);
                }
            }
            Err(e) => self.report(format!("Failed to load zones: {}", e)),
        }
    }

    /// Decode the image a zones file names, if it is a local file.
    fn load_referenced_image(&mut self, ticket: ImageTicket) {
        match media::resolve_source(&ticket.source, self.zones_path.as_deref()) {
            Ok(path) => self.spawn_image_load(ticket, path),
            Err(e) => self.report(format!("Failed to load image: {:#}", e)),
        }
    }

    /// Open an image file as the new reference image. The current image and
    /// texture stay until the new one decodes.
    fn open_image(&mut self, path: PathBuf) {
        let ticket = self
            .session
            .begin_image_load(path.to_string_lossy().to_string());
        self.spawn_image_load(ticket, path);
    }

    /// Decode an image on a background thread.
    fn spawn_image_load(&mut self, ticket: ImageTicket, path: PathBuf) {
        self.loading_message = Some("Loading image...".to_string());
        let sender = self.image_sender.clone();

        std::thread::spawn(move || {
            let image = media::load_image(&path).map_err(|e| format!("{:#}", e));
            if let Ok(ref img) = image {
                log::info!("Decoded image: {} ({}x{})", path.display(), img.width, img.height);
            }
            if sender.send(LoadedImageData { ticket, image }).is_err() {
                log::debug!("Editor closed before {} finished loading", path.display());
            }
        });
    }

    /// Apply finished image loads. Loads superseded by a newer request are
    /// dropped.
    fn poll_image_loads(&mut self, ctx: &egui::Context) {
        while let Ok(loaded) = self.image_receiver.try_recv() {
            if !self.session.document().is_current(&loaded.ticket) {
                log::debug!("Dropping superseded image {}", loaded.ticket.source);
                continue;
            }
            self.loading_message = None;

            match loaded.image {
                Ok(img) => {
                    if let Err(e) = self.session.finish_image_load(&loaded.ticket, img.size()) {
                        self.rejected(e);
                        continue;
                    }
                    // Create egui texture from the loaded image data
                    let size = [img.width as usize, img.height as usize];
                    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &img.pixels);
                    self.image_texture = Some(ctx.load_texture(
                        "reference_image",
                        color_image,
                        egui::TextureOptions::LINEAR,
                    ));
                    if self.session.document().is_empty() {
                        self.new_document();
                    }
                }
                Err(e) => self.report(format!("Failed to load image: {}", e)),
            }
        }
    }

    /// Export zones to a file.
    fn export_zones(&mut self, path: &Path) {
        match serialization::export(&self.session.to_file(), path) {
            Ok(()) => log::info!("Exported zones to {}", path.display()),
            Err(e) => self.report(format!("Failed to export zones: {:#}", e)),
        }
    }

    fn handle_properties(&mut self, action: properties::PropertiesAction) {
        use properties::PropertiesAction;

        let result = match action {
            PropertiesAction::None => Ok(()),
            PropertiesAction::SelectZone(id) => self.session.select_zone(id),
            PropertiesAction::AddZone => {
                self.session.add_zone();
                Ok(())
            }
            PropertiesAction::DeleteZone(id) => self.session.delete_zone(id).map(|_| ()),
            PropertiesAction::EditZone(id, edit) => self.session.update_zone(id, edit),
            PropertiesAction::InsertVertexAfter(index) => {
                self.session.insert_vertex_after(index).map(|_| ())
            }
            PropertiesAction::RemoveVertex(index) => self.session.remove_vertex(index).map(|_| ()),
            PropertiesAction::SetUploadDefaults(upload, bucket) => {
                self.session.set_upload_defaults(upload, bucket);
                Ok(())
            }
        };
        if let Err(e) = result {
            self.rejected(e);
        }
    }

    fn handle_canvas(&mut self, action: canvas::CanvasAction) {
        use canvas::CanvasAction;

        let result = match action {
            CanvasAction::None => Ok(()),
            CanvasAction::SelectZone(id) => self.session.select_zone(id),
            CanvasAction::PressHandle(handle, pos) => self.session.begin_drag(handle, pos),
            CanvasAction::DragTo(pos) => self.session.drag_to(pos).map(|_| ()),
            CanvasAction::Release => {
                self.session.end_drag();
                Ok(())
            }
            CanvasAction::InsertVertexAfter(index) => {
                self.session.insert_vertex_after(index).map(|_| ())
            }
            CanvasAction::RemoveVertex(index) => self.session.remove_vertex(index).map(|_| ()),
        };
        if let Err(e) = result {
            self.rejected(e);
        }
    }

    fn menu_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("New Zones").clicked() {
                    self.new_document();
                    ui.close_menu();
                }
                if ui.button("Open Image...").clicked() {
                    // Open native file picker
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Images", &["jpg", "jpeg", "png", "bmp", "tiff", "tif"])
                        .pick_file()
                    {
                        self.open_image(path);
                    }
                    ui.close_menu();
                }
                if ui.button("Load Zones...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Zones", &["json", "yaml", "yml"])
                        .pick_file()
                    {
                        self.import_zones(path);
                    }
                    ui.close_menu();
                }
                ui.separator();
                ui.menu_button("Export Zones", |ui| {
                    if ui.button("Export as JSON...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("JSON", &["json"])
                            .set_file_name("zones.json")
                            .save_file()
                        {
                            self.export_zones(&path);
                        }
                        ui.close_menu();
                    }
                    if ui.button("Export as YAML...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("YAML", &["yaml", "yml"])
                            .set_file_name("zones.yaml")
                            .save_file()
                        {
                            self.export_zones(&path);
                        }
                        ui.close_menu();
                    }
                });
                ui.separator();
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Add Zone").clicked() {
                    self.session.add_zone();
                    ui.close_menu();
                }
                let active = self.session.active_zone();
                if ui
                    .add_enabled(active.is_some(), egui::Button::new("Delete Zone"))
                    .clicked()
                {
                    if let Some(id) = active {
                        if let Err(e) = self.session.delete_zone(id) {
                            self.rejected(e);
                        }
                    }
                    ui.close_menu();
                }
            });
        });
    }
}

impl eframe::App for ZoneEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed image loading
        self.poll_image_loads(ctx);

        // Request repaint if still loading (to update spinner)
        if self.loading_message.is_some() {
            ctx.request_repaint();
        }

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            self.menu_bar(ctx, ui);
        });

        // Toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar::show(ui, &mut self.current_tool);
        });

        // Error banner
        if let Some(message) = self.error_message.clone() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(egui::Color32::LIGHT_RED, message);
                    if ui.small_button("Dismiss").clicked() {
                        self.error_message = None;
                    }
                });
            });
        }

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| properties::show(ui, &self.session))
            .inner;
        self.handle_properties(properties_action);

        // Handle keyboard events
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.session.end_drag();
        }

        // Handle Delete key to remove the selected point
        // Only process if no text field is focused (to avoid deleting while editing names)
        if !ctx.wants_keyboard_input()
            && ctx.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace))
        {
            if let Some(index) = self.session.editor().active_point() {
                if let Err(e) = self.session.remove_vertex(index) {
                    self.rejected(e);
                }
            }
        }

        // Main canvas (center)
        let canvas_actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                // Show loading overlay if loading
                if let Some(ref message) = self.loading_message {
                    ui.centered_and_justified(|ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(20.0);
                            ui.spinner();
                            ui.add_space(10.0);
                            ui.label(
                                egui::RichText::new(message)
                                    .size(16.0)
                                    .color(egui::Color32::from_gray(200)),
                            );
                        });
                    });
                    Vec::new()
                } else {
                    canvas::show(ui, &self.session, self.current_tool, &self.image_texture)
                }
            })
            .inner;
        for action in canvas_actions {
            self.handle_canvas(action);
        }
    }
}
