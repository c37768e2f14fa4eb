// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The editing session the host dispatches gestures to.
//!
//! An [`EditSession`] owns one [`ZoneDocument`] together with the editor
//! state for its active zone and the pointer drag state. Each method is one
//! user gesture: it runs to completion, recomputes the derived overlay data
//! and either succeeds or leaves everything unchanged.

pub mod drag;
pub mod polygon;

use crate::error::{EditError, EditResult};
use crate::models::document::{DocumentFile, ImageTicket, ZoneDocument};
use crate::models::zone::{Point, PointerPos, ZoneEdit};
use crate::util::geometry::ImageSize;
use drag::{DragSession, Handle};
use polygon::PolygonEditor;

/// A zone document open for editing.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    document: ZoneDocument,
    editor: PolygonEditor,
    drag: DragSession,
}

impl EditSession {
    /// Create a session over an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &ZoneDocument {
        &self.document
    }

    pub fn editor(&self) -> &PolygonEditor {
        &self.editor
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn active_zone(&self) -> Option<u32> {
        self.editor.active_zone()
    }

    /// Replace the document contents with a zones file and open zone 1.
    pub fn load_zones(&mut self, file: DocumentFile) -> EditResult<Option<ImageTicket>> {
        let ticket = self.document.load_zones(file)?;
        self.reset_editing();
        if self.document.contains(1) {
            self.editor.select_zone(&self.document, 1)?;
        }
        Ok(ticket)
    }

    /// Replace the document contents with one default zone and open it.
    pub fn generate_default_zone(&mut self) -> EditResult<()> {
        self.document.generate_default_zone();
        self.reset_editing();
        self.editor.select_zone(&self.document, 1)
    }

    /// Append a default zone. The active zone does not change.
    pub fn add_zone(&mut self) -> u32 {
        self.document.add_zone()
    }

    /// Delete a zone and open its successor, or its predecessor when the
    /// last zone was deleted.
    pub fn delete_zone(&mut self, id: u32) -> EditResult<Option<u32>> {
        let next = self.document.delete_zone(id)?;
        self.reset_editing();
        if let Some(next) = next {
            self.editor.select_zone(&self.document, next)?;
        }
        Ok(next)
    }

    /// Open a zone for editing.
    pub fn select_zone(&mut self, id: u32) -> EditResult<()> {
        self.editor.select_zone(&self.document, id)?;
        self.drag.end();
        Ok(())
    }

    /// Change one of a zone's scalar fields.
    ///
    /// Resizing the active zone's minimum rectangle re-opens the zone so the
    /// rectangle is re-seeded from the new size.
    pub fn update_zone(&mut self, id: u32, edit: ZoneEdit) -> EditResult<()> {
        let reseed = edit.resizes_minimum() && self.editor.active_zone() == Some(id);
        self.document.update_zone(id, edit)?;
        if reseed {
            self.select_zone(id)?;
        }
        Ok(())
    }

    /// Set the document-level upload defaults written on export.
    pub fn set_upload_defaults(&mut self, upload_to_s3: bool, s3_bucket: String) {
        self.document.upload_to_s3 = upload_to_s3;
        self.document.s3_bucket = s3_bucket;
    }

    pub fn insert_vertex_after(&mut self, index: usize) -> EditResult<usize> {
        self.ensure_idle()?;
        self.editor.insert_vertex_after(&mut self.document, index)
    }

    pub fn remove_vertex(&mut self, index: usize) -> EditResult<Point> {
        self.ensure_idle()?;
        self.editor.remove_vertex(&mut self.document, index)
    }

    /// Press on a handle of the active zone.
    pub fn begin_drag(&mut self, handle: Handle, pointer: PointerPos) -> EditResult<()> {
        let anchor = self.anchor(handle)?;
        self.drag.begin(handle, pointer, anchor)?;
        if let Handle::Vertex(index) = handle {
            self.editor.set_active_point(Some(index));
        }
        Ok(())
    }

    /// Move the pressed handle with the pointer.
    pub fn drag_to(&mut self, pointer: PointerPos) -> EditResult<Point> {
        let (handle, offset) = self.drag.active()?;
        match handle {
            Handle::Vertex(index) => {
                self.editor
                    .drag_vertex(&mut self.document, index, pointer, offset)
            }
            Handle::MinCorner(corner) => {
                self.editor
                    .drag_min_corner(&mut self.document, corner, pointer, offset)
            }
        }
    }

    /// Release the pointer.
    pub fn end_drag(&mut self) -> Option<Handle> {
        self.drag.end()
    }

    /// Start loading a new reference image.
    pub fn begin_image_load(&mut self, source: String) -> ImageTicket {
        self.document.begin_image_load(source)
    }

    /// Apply decoded image dimensions and re-center the active zone's
    /// minimum rectangle on the image.
    pub fn finish_image_load(&mut self, ticket: &ImageTicket, size: ImageSize) -> EditResult<()> {
        self.document.finish_image_load(ticket, size)?;
        if let Some(id) = self.editor.active_zone() {
            self.editor.select_zone(&self.document, id)?;
        }
        Ok(())
    }

    /// Snapshot the document in its file form for export.
    pub fn to_file(&self) -> DocumentFile {
        self.document.to_file()
    }

    pub fn serialize(&self) -> serde_json::Result<serde_json::Value> {
        self.document.serialize()
    }

    fn anchor(&self, handle: Handle) -> EditResult<Point> {
        let id = self.editor.active_zone().ok_or(EditError::NoActiveZone)?;
        match handle {
            Handle::Vertex(index) => self
                .document
                .zone(id)?
                .points
                .get(index)
                .copied()
                .ok_or(EditError::VertexNotFound { zone: id, index }),
            Handle::MinCorner(corner) => self
                .editor
                .min_corner(corner)
                .ok_or(EditError::NoActiveZone),
        }
    }

    fn ensure_idle(&self) -> EditResult<()> {
        match self.drag.active() {
            Ok((handle, _)) => Err(EditError::DragInProgress(handle)),
            Err(_) => Ok(()),
        }
    }

    fn reset_editing(&mut self) {
        self.editor.reset();
        self.drag.end();
    }
}
