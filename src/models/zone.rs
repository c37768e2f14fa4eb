// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zone data structures.
//!
//! This module defines the core data structures for representing zones:
//! a named polygon in image pixel coordinates plus the parameters a motion
//! detector applies to it (timing thresholds, minimum object size and the
//! upload destination).

use crate::util::geometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Default values for optional zone fields.
pub mod defaults {
    use super::Point;

    pub const NAME: &str = "New Zone";
    pub const WARMUP: u32 = 2;
    pub const COOLDOWN: u32 = 5;
    pub const CONTINUATION: u32 = 3;
    pub const MINIMUM_X: u32 = 50;
    pub const MINIMUM_Y: u32 = 50;
    pub const UPLOAD_TO_S3: bool = false;

    /// Smallest number of vertices a zone polygon may be reduced to.
    pub const MIN_VERTICES: usize = 3;

    /// Polygon given to freshly created zones.
    pub const STARTER_TRIANGLE: [Point; 3] = [
        Point { x: 100, y: 100 },
        Point { x: 200, y: 100 },
        Point { x: 150, y: 200 },
    ];
}

/// A 2D point in integer image pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A pointer position in image pixel space, as reported by the host.
///
/// Unlike [`Point`] this may be fractional and may lie outside the image.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPos {
    pub x: f64,
    pub y: f64,
}

impl PointerPos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `anchor` to this position.
    pub fn offset_from(self, anchor: Point) -> PointerPos {
        PointerPos::new(self.x - anchor.x as f64, self.y - anchor.y as f64)
    }

    /// This position shifted back by `offset`.
    pub fn minus(self, offset: PointerPos) -> PointerPos {
        PointerPos::new(self.x - offset.x, self.y - offset.y)
    }
}

impl From<Point> for PointerPos {
    fn from(p: Point) -> Self {
        PointerPos::new(p.x as f64, p.y as f64)
    }
}

/// A zone as it appears in a zones file, with every optional field absent
/// when the file omits it.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneRecord {
    #[serde(default)]
    pub name: String,
    pub points: Vec<Point>,
    pub warmup: Option<u32>,
    pub cooldown: Option<u32>,
    pub continuation: Option<u32>,
    #[serde(alias = "minimumX")]
    pub minimum_x: Option<u32>,
    #[serde(alias = "minimumY")]
    pub minimum_y: Option<u32>,
    #[serde(alias = "uploadToS3")]
    pub upload_to_s3: Option<bool>,
    #[serde(alias = "s3Bucket")]
    pub s3_bucket: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named polygonal region with its detection parameters.
///
/// Zones are deserialized through [`ZoneRecord`], which is where missing
/// optional fields receive their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoneRecord")]
pub struct Zone {
    pub name: String,
    pub points: Vec<Point>,
    pub warmup: u32,
    pub cooldown: u32,
    pub continuation: u32,
    pub minimum_x: u32,
    pub minimum_y: u32,
    pub upload_to_s3: bool,
    pub s3_bucket: String,
    /// Fields this editor does not know about, kept for export.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<ZoneRecord> for Zone {
    fn from(record: ZoneRecord) -> Self {
        Self {
            name: record.name,
            points: record.points,
            warmup: record.warmup.unwrap_or(defaults::WARMUP),
            cooldown: record.cooldown.unwrap_or(defaults::COOLDOWN),
            continuation: record.continuation.unwrap_or(defaults::CONTINUATION),
            minimum_x: record.minimum_x.unwrap_or(defaults::MINIMUM_X),
            minimum_y: record.minimum_y.unwrap_or(defaults::MINIMUM_Y),
            upload_to_s3: record.upload_to_s3.unwrap_or(defaults::UPLOAD_TO_S3),
            s3_bucket: record.s3_bucket.unwrap_or_default(),
            extra: record.extra,
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::new(defaults::NAME.to_string(), defaults::STARTER_TRIANGLE.to_vec())
    }
}

impl Zone {
    /// Create a zone with the given name and polygon and default parameters.
    pub fn new(name: String, points: Vec<Point>) -> Self {
        Self {
            name,
            points,
            warmup: defaults::WARMUP,
            cooldown: defaults::COOLDOWN,
            continuation: defaults::CONTINUATION,
            minimum_x: defaults::MINIMUM_X,
            minimum_y: defaults::MINIMUM_Y,
            upload_to_s3: defaults::UPLOAD_TO_S3,
            s3_bucket: String::new(),
            extra: Map::new(),
        }
    }

    /// Get the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Test whether an image position lies inside the zone polygon.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        geometry::polygon_contains(&self.points, x, y)
    }

    /// Whether an object with this bounding box is large enough to count
    /// as a hit in this zone.
    pub fn admits(&self, width: u32, height: u32) -> bool {
        width >= self.minimum_x && height >= self.minimum_y
    }

    /// Axis-aligned bounds of the polygon, `None` for an empty polygon.
    pub fn bounding_box(&self) -> Option<(Point, Point)> {
        geometry::bounding_box(&self.points)
    }

    /// Apply a single field edit.
    pub fn apply(&mut self, edit: ZoneEdit) {
        match edit {
            ZoneEdit::Rename(name) => self.name = name,
            ZoneEdit::Warmup(v) => self.warmup = v,
            ZoneEdit::Cooldown(v) => self.cooldown = v,
            ZoneEdit::Continuation(v) => self.continuation = v,
            ZoneEdit::MinimumSize { x, y } => {
                self.minimum_x = x;
                self.minimum_y = y;
            }
            ZoneEdit::UploadToS3(v) => self.upload_to_s3 = v,
            ZoneEdit::S3Bucket(bucket) => self.s3_bucket = bucket,
        }
    }
}

/// An edit to one of a zone's scalar fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneEdit {
    Rename(String),
    Warmup(u32),
    Cooldown(u32),
    Continuation(u32),
    MinimumSize { x: u32, y: u32 },
    UploadToS3(bool),
    S3Bucket(String),
}

impl ZoneEdit {
    /// Whether the edit changes the stored minimum rectangle size.
    pub fn resizes_minimum(&self) -> bool {
        matches!(self, ZoneEdit::MinimumSize { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_optional_fields_get_defaults() {
        let zone: Zone = serde_json::from_value(json!({
            "name": "Driveway",
            "points": [{"x": 1, "y": 2}, {"x": 3, "y": 4}, {"x": 5, "y": 6}]
        }))
        .unwrap();

        assert_eq!(zone.warmup, 2);
        assert_eq!(zone.cooldown, 5);
        assert_eq!(zone.continuation, 3);
        assert_eq!(zone.minimum_x, 50);
        assert_eq!(zone.minimum_y, 50);
        assert!(!zone.upload_to_s3);
        assert_eq!(zone.s3_bucket, "");
        assert!(zone.extra.is_empty());
    }

    #[test]
    fn test_unnamed_zone_gets_empty_name() {
        let zone: Zone = serde_json::from_value(json!({
            "points": [{"x": 1, "y": 2}, {"x": 3, "y": 4}, {"x": 5, "y": 6}]
        }))
        .unwrap();

        assert_eq!(zone.name, "");
        assert_eq!(zone.warmup, 2);
        assert_eq!(zone.points.len(), 3);
    }

    #[test]
    fn test_camel_case_aliases_accepted() {
        let zone: Zone = serde_json::from_value(json!({
            "name": "Porch",
            "points": [],
            "minimumX": 12,
            "minimumY": 34,
            "uploadToS3": true,
            "s3Bucket": "frames"
        }))
        .unwrap();

        assert_eq!((zone.minimum_x, zone.minimum_y), (12, 34));
        assert!(zone.upload_to_s3);
        assert_eq!(zone.s3_bucket, "frames");
    }

    #[test]
    fn test_serializes_snake_case_in_order_with_extras() {
        let zone: Zone = serde_json::from_value(json!({
            "name": "Gate",
            "points": [{"x": 0, "y": 0}],
            "color": "red"
        }))
        .unwrap();

        let text = serde_json::to_string(&zone).unwrap();
        assert_eq!(
            text,
            r#"{"name":"Gate","points":[{"x":0,"y":0}],"warmup":2,"cooldown":5,"continuation":3,"minimum_x":50,"minimum_y":50,"upload_to_s3":false,"s3_bucket":"","color":"red"}"#
        );
    }

    #[test]
    fn test_default_zone_is_starter_triangle() {
        let zone = Zone::default();
        assert_eq!(zone.name, "New Zone");
        assert_eq!(zone.points, defaults::STARTER_TRIANGLE.to_vec());
        assert_eq!(zone.vertex_count(), 3);
    }

    #[test]
    fn test_zone_queries() {
        let zone = Zone::default();
        assert!(zone.contains(150.0, 120.0));
        assert!(!zone.contains(0.0, 0.0));
        assert!(zone.admits(50, 50));
        assert!(!zone.admits(49, 80));
        assert_eq!(
            zone.bounding_box(),
            Some((Point::new(100, 100), Point::new(200, 200)))
        );
    }

    #[test]
    fn test_apply_edits() {
        let mut zone = Zone::default();
        zone.apply(ZoneEdit::Rename("Yard".into()));
        zone.apply(ZoneEdit::MinimumSize { x: 10, y: 20 });
        zone.apply(ZoneEdit::S3Bucket("bucket".into()));
        assert_eq!(zone.name, "Yard");
        assert_eq!((zone.minimum_x, zone.minimum_y), (10, 20));
        assert_eq!(zone.s3_bucket, "bucket");
        assert!(ZoneEdit::MinimumSize { x: 1, y: 1 }.resizes_minimum());
        assert!(!ZoneEdit::Warmup(1).resizes_minimum());
    }
}
