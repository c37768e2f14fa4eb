// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone document state management.
//!
//! This module manages the ordered zone collection, the reference image and
//! the document-level export settings. Zone ids are dense and 1-based: after
//! every operation the ids are exactly `1..=len()`.

use super::zone::{Zone, ZoneEdit};
use crate::error::{EditError, EditResult};
use crate::util::geometry::ImageSize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete zones file contents for serialization.
///
/// Zone ids are string keys in the file and integers here. Field names and
/// order match the files the motion detector reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    pub zones: BTreeMap<u32, Zone>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub upload_to_s3: bool,
    #[serde(default)]
    pub s3_bucket: String,
}

/// Identifies one image load request.
///
/// Handed out by [`ZoneDocument::begin_image_load`] and checked when the
/// decoded dimensions come back. The source it names only becomes the
/// document's image once the load finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTicket {
    pub source: String,
    generation: u64,
}

/// The reference image the zones are drawn over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    /// Path, URL or data URI, exported as-is.
    pub source: String,
    /// Pixel dimensions, zero until the image has been decoded.
    pub size: ImageSize,
    generation: u64,
}

impl ImageRef {
    /// Whether decoded dimensions are available.
    pub fn is_loaded(&self) -> bool {
        self.size.width > 0 && self.size.height > 0
    }

    /// Supersede any load in flight. Source and size are left alone.
    fn request(&mut self, source: String) -> ImageTicket {
        self.generation += 1;
        ImageTicket {
            source,
            generation: self.generation,
        }
    }

    fn commit(&mut self, ticket: &ImageTicket, size: ImageSize) {
        self.source = ticket.source.clone();
        self.size = size;
    }
}

/// The zone collection being edited.
#[derive(Debug, Clone, Default)]
pub struct ZoneDocument {
    zones: BTreeMap<u32, Zone>,
    image: ImageRef,
    pub upload_to_s3: bool,
    pub s3_bucket: String,
}

impl ZoneDocument {
    /// Create an empty document with no image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every zone with the contents of a zones file.
    ///
    /// Ids must be positive. Ids with gaps are renumbered densely in
    /// ascending order. Returns a ticket when the image source changed and
    /// needs to be (re)loaded.
    pub fn load_zones(&mut self, file: DocumentFile) -> EditResult<Option<ImageTicket>> {
        if file.zones.contains_key(&0) {
            return Err(EditError::InvalidZoneId(0));
        }

        let count = file.zones.len();
        let dense = file.zones.keys().copied().eq(1..=count as u32);
        if !dense {
            log::warn!("Zone ids are not contiguous, renumbering {} zones from 1", count);
        }
        self.zones = (1..).zip(file.zones.into_values()).collect();
        self.upload_to_s3 = file.upload_to_s3;
        self.s3_bucket = file.s3_bucket;

        // The file names its own image, so the source is taken as-is and the
        // old dimensions no longer apply.
        if file.image != self.image.source {
            self.image.source = file.image;
            self.image.size = ImageSize::default();
        }
        let ticket = if self.image.is_loaded() {
            None
        } else {
            Some(self.image.request(self.image.source.clone()))
        };

        log::info!("Loaded {} zones", self.zones.len());
        Ok(ticket)
    }

    /// Replace every zone with a single default zone, id 1.
    pub fn generate_default_zone(&mut self) {
        self.zones.clear();
        self.zones.insert(1, Zone::default());
        log::info!("Generated default zone");
    }

    /// Append a default zone and return its id.
    pub fn add_zone(&mut self) -> u32 {
        let id = self.zones.len() as u32 + 1;
        self.zones.insert(id, Zone::default());
        log::info!("Added zone {}, total: {}", id, self.zones.len());
        id
    }

    /// Remove a zone and shift every later zone down by one id.
    ///
    /// Returns the id that should become active: the zone now occupying the
    /// deleted slot, else the new last zone.
    pub fn delete_zone(&mut self, id: u32) -> EditResult<Option<u32>> {
        if self.zones.len() == 1 {
            log::warn!("Must keep at least 1 zone");
            return Err(EditError::LastZone);
        }
        let removed = self.zones.remove(&id).ok_or(EditError::ZoneNotFound(id))?;

        // Every key above the hole moves down exactly one slot.
        let shifted = self.zones.split_off(&id);
        self.zones
            .extend(shifted.into_iter().map(|(key, zone)| (key - 1, zone)));

        log::info!(
            "Deleted zone {} ({}), total: {}",
            id,
            removed.name,
            self.zones.len()
        );

        let next = [id, id.saturating_sub(1)]
            .into_iter()
            .find(|candidate| self.zones.contains_key(candidate));
        Ok(next)
    }

    /// Look up a zone.
    pub fn zone(&self, id: u32) -> EditResult<&Zone> {
        self.zones.get(&id).ok_or(EditError::ZoneNotFound(id))
    }

    /// Look up a zone for modification.
    pub fn zone_mut(&mut self, id: u32) -> EditResult<&mut Zone> {
        self.zones.get_mut(&id).ok_or(EditError::ZoneNotFound(id))
    }

    /// Apply a field edit to a zone.
    pub fn update_zone(&mut self, id: u32, edit: ZoneEdit) -> EditResult<()> {
        log::debug!("Zone {}: {:?}", id, edit);
        self.zone_mut(id)?.apply(edit);
        Ok(())
    }

    /// Iterate zones in id order.
    pub fn zones(&self) -> impl Iterator<Item = (u32, &Zone)> {
        self.zones.iter().map(|(id, zone)| (*id, zone))
    }

    /// Get the number of zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.zones.contains_key(&id)
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }

    pub fn image_size(&self) -> ImageSize {
        self.image.size
    }

    /// Start loading a new reference image.
    ///
    /// Any load still in flight for a previous image is superseded. The
    /// current image stays in place until [`Self::finish_image_load`]
    /// succeeds, so a load that fails leaves the document unchanged.
    pub fn begin_image_load(&mut self, source: String) -> ImageTicket {
        log::info!("Loading image {}", source);
        self.image.request(source)
    }

    /// Whether `ticket` names the most recently requested image.
    pub fn is_current(&self, ticket: &ImageTicket) -> bool {
        ticket.generation == self.image.generation
    }

    /// Record the decoded dimensions of the image named by `ticket`.
    pub fn finish_image_load(&mut self, ticket: &ImageTicket, size: ImageSize) -> EditResult<()> {
        if !self.is_current(ticket) {
            log::warn!("Ignoring stale image load for {}", ticket.source);
            return Err(EditError::StaleImageLoad(ticket.source.clone()));
        }
        self.image.commit(ticket, size);
        log::info!(
            "Image {} is {}x{}",
            self.image.source,
            size.width,
            size.height
        );
        Ok(())
    }

    /// Snapshot the document in its file form.
    pub fn to_file(&self) -> DocumentFile {
        DocumentFile {
            zones: self.zones.clone(),
            image: self.image.source.clone(),
            upload_to_s3: self.upload_to_s3,
            s3_bucket: self.s3_bucket.clone(),
        }
    }

    /// Serialize the document to its JSON value.
    pub fn serialize(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.to_file())
    }
}
