// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometry editing for the active zone.
//!
//! Exactly one zone is open for editing at a time. The editor keeps the
//! active zone's minimum rectangle as two opposite corners, derives the four
//! displayed corners from them, and rebuilds the overlay path strings after
//! every change.

use super::drag::Corner;
use crate::error::{EditError, EditResult};
use crate::models::document::ZoneDocument;
use crate::models::zone::{defaults, Point, PointerPos, Zone};
use crate::util::geometry;

/// Editing state for the active zone. Never serialized.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonEditor {
    active_zone: Option<u32>,
    active_point: Option<usize>,
    min_corners: Option<(Point, Point)>,
    min_rect: Option<[Point; 4]>,
    polygon_path: String,
    min_rect_path: String,
}

impl PolygonEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the active zone and all derived state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn active_zone(&self) -> Option<u32> {
        self.active_zone
    }

    /// Index of the vertex last pressed, if any.
    pub fn active_point(&self) -> Option<usize> {
        self.active_point
    }

    pub fn set_active_point(&mut self, index: Option<usize>) {
        self.active_point = index;
    }

    pub fn min_corner(&self, corner: Corner) -> Option<Point> {
        self.min_corners.map(|(first, second)| match corner {
            Corner::First => first,
            Corner::Second => second,
        })
    }

    /// The minimum rectangle as top-left, top-right, bottom-right,
    /// bottom-left.
    pub fn min_rect(&self) -> Option<[Point; 4]> {
        self.min_rect
    }

    /// SVG points string for the active zone's polygon.
    pub fn polygon_path(&self) -> &str {
        &self.polygon_path
    }

    /// SVG points string for the active zone's minimum rectangle.
    pub fn min_rect_path(&self) -> &str {
        &self.min_rect_path
    }

    /// Open a zone for editing and seed its minimum rectangle, centered on
    /// the image, from the stored size.
    pub fn select_zone(&mut self, doc: &ZoneDocument, id: u32) -> EditResult<()> {
        let zone = doc.zone(id)?;
        let corners = geometry::centered_corners(
            doc.image_size().midpoint(),
            zone.minimum_x,
            zone.minimum_y,
        );

        self.active_zone = Some(id);
        self.active_point = None;
        self.min_corners = Some(corners);
        self.min_rect = Some(geometry::rect_from_corners(corners.0, corners.1));
        self.recompute_render_paths(doc);
        log::debug!("Selected zone {} ({})", id, zone.name);
        Ok(())
    }

    /// Insert the midpoint of vertex `index` and its cyclic successor.
    ///
    /// The midpoint goes right after `index`, except for the closing edge
    /// (last to first) where it is appended at the end of the list. Returns
    /// the index of the new vertex.
    pub fn insert_vertex_after(&mut self, doc: &mut ZoneDocument, index: usize) -> EditResult<usize> {
        let (id, zone) = self.active_zone_mut(doc)?;
        let count = zone.points.len();
        if index >= count {
            return Err(EditError::VertexNotFound { zone: id, index });
        }

        let next = if index + 1 >= count { 0 } else { index + 1 };
        let point = geometry::midpoint(zone.points[index], zone.points[next]);
        let inserted_at = if next == 0 {
            zone.points.push(point);
            count
        } else {
            zone.points.insert(next, point);
            next
        };
        log::debug!("Zone {}: inserted vertex {} at {}", id, inserted_at, point);

        self.recompute_render_paths(doc);
        Ok(inserted_at)
    }

    /// Remove a vertex, keeping at least three.
    pub fn remove_vertex(&mut self, doc: &mut ZoneDocument, index: usize) -> EditResult<Point> {
        let (id, zone) = self.active_zone_mut(doc)?;
        if zone.points.len() <= defaults::MIN_VERTICES {
            log::warn!("Must maintain at least {} points", defaults::MIN_VERTICES);
            return Err(EditError::MinimumVertices {
                minimum: defaults::MIN_VERTICES,
            });
        }
        if index >= zone.points.len() {
            return Err(EditError::VertexNotFound { zone: id, index });
        }

        let removed = zone.points.remove(index);
        log::debug!("Zone {}: removed vertex {} at {}", id, index, removed);

        match self.active_point {
            Some(active) if active == index => self.active_point = None,
            Some(active) if active > index => self.active_point = Some(active - 1),
            _ => {}
        }
        self.recompute_render_paths(doc);
        Ok(removed)
    }

    /// Move a vertex to the pointer, less the press offset, clamped into
    /// the image.
    pub fn drag_vertex(
        &mut self,
        doc: &mut ZoneDocument,
        index: usize,
        pointer: PointerPos,
        offset: PointerPos,
    ) -> EditResult<Point> {
        let size = doc.image_size();
        let (id, zone) = self.active_zone_mut(doc)?;
        let point = geometry::clamp_to_image(pointer.minus(offset), size);
        let slot = zone
            .points
            .get_mut(index)
            .ok_or(EditError::VertexNotFound { zone: id, index })?;
        *slot = point;

        self.active_point = Some(index);
        self.recompute_render_paths(doc);
        Ok(point)
    }

    /// Move a minimum rectangle corner and store the resulting size in the
    /// active zone.
    pub fn drag_min_corner(
        &mut self,
        doc: &mut ZoneDocument,
        corner: Corner,
        pointer: PointerPos,
        offset: PointerPos,
    ) -> EditResult<Point> {
        let size = doc.image_size();
        let (first, second) = self.min_corners.ok_or(EditError::NoActiveZone)?;
        let (_, zone) = self.active_zone_mut(doc)?;

        let point = geometry::clamp_to_image(pointer.minus(offset), size);
        let (first, second) = match corner {
            Corner::First => (point, second),
            Corner::Second => (first, point),
        };
        zone.minimum_x = first.x.abs_diff(second.x);
        zone.minimum_y = first.y.abs_diff(second.y);

        self.min_corners = Some((first, second));
        self.min_rect = Some(geometry::rect_from_corners(first, second));
        self.recompute_render_paths(doc);
        Ok(point)
    }

    /// Rebuild both overlay path strings from the current geometry.
    pub fn recompute_render_paths(&mut self, doc: &ZoneDocument) {
        self.polygon_path = match self.active_zone.and_then(|id| doc.zone(id).ok()) {
            Some(zone) => geometry::render_path(&zone.points),
            None => String::new(),
        };
        self.min_rect_path = match &self.min_rect {
            Some(rect) => geometry::render_path(rect),
            None => String::new(),
        };
    }

    fn active_zone_mut<'a>(&self, doc: &'a mut ZoneDocument) -> EditResult<(u32, &'a mut Zone)> {
        let id = self.active_zone.ok_or(EditError::NoActiveZone)?;
        Ok((id, doc.zone_mut(id)?))
    }
}
