// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides the elementary 2D operations the editor is built
//! on: clamping pointer positions into the image, edge midpoints,
//! axis-aligned rectangles from two opposite corners, and the flattened
//! `"x,y "` path strings the overlay is drawn from.

use crate::models::zone::{Point, PointerPos};
use std::fmt::Write;

/// Pixel dimensions of the reference image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Center of the image, rounded down to whole pixels.
    pub fn midpoint(&self) -> Point {
        Point::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

/// Clamp a pointer position into `[0, width] x [0, height]` and round it to
/// whole pixels.
pub fn clamp_to_image(pos: PointerPos, size: ImageSize) -> Point {
    let x = pos.x.clamp(0.0, size.width as f64);
    let y = pos.y.clamp(0.0, size.height as f64);
    Point::new(x.round() as i32, y.round() as i32)
}

/// Narrow to `i32`, pinning values outside its range to the nearest end.
fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Midpoint of two vertices, rounding halves up.
pub fn midpoint(a: Point, b: Point) -> Point {
    let mid = |p: i32, q: i32| saturate((p as i64 + q as i64 + 1).div_euclid(2));
    Point::new(mid(a.x, b.x), mid(a.y, b.y))
}

/// Axis-aligned rectangle with `a` and `b` as opposite corners, returned as
/// top-left, top-right, bottom-right, bottom-left.
pub fn rect_from_corners(a: Point, b: Point) -> [Point; 4] {
    let (left, right) = (a.x.min(b.x), a.x.max(b.x));
    let (top, bottom) = (a.y.min(b.y), a.y.max(b.y));
    [
        Point::new(left, top),
        Point::new(right, top),
        Point::new(right, bottom),
        Point::new(left, bottom),
    ]
}

/// Two opposite corners of a `width` x `height` box centered on `center`.
///
/// Sizes too large for the coordinate space pin the corners at the `i32`
/// limits.
pub fn centered_corners(center: Point, width: u32, height: u32) -> (Point, Point) {
    let first = (
        center.x as i64 - (width / 2) as i64,
        center.y as i64 - (height / 2) as i64,
    );
    let second = (first.0 + width as i64, first.1 + height as i64);
    (
        Point::new(saturate(first.0), saturate(first.1)),
        Point::new(saturate(second.0), saturate(second.1)),
    )
}

/// Flatten points into an SVG `points` attribute: `"x,y "` per vertex.
pub fn render_path<'a>(points: impl IntoIterator<Item = &'a Point>) -> String {
    let mut path = String::new();
    for p in points {
        // Writing into a String cannot fail.
        let _ = write!(path, "{},{} ", p.x, p.y);
    }
    path
}

/// Even-odd point in polygon test. Points on an edge may land either side.
pub fn polygon_contains(vertices: &[Point], x: f64, y: f64) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x as f64, vertices[i].y as f64);
        let (xj, yj) = (vertices[j].x as f64, vertices[j].y as f64);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Bounding box of a vertex list as `(min, max)` corners.
pub fn bounding_box(vertices: &[Point]) -> Option<(Point, Point)> {
    let first = *vertices.first()?;
    Some(vertices.iter().skip(1).fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_out_of_bounds_pointer() {
        let size = ImageSize::new(800, 600);
        let clamped = clamp_to_image(PointerPos::new(-50.0, 9999.0), size);
        assert_eq!(clamped, Point::new(0, 600));
    }

    #[test]
    fn test_clamp_rounds_inside_image() {
        let size = ImageSize::new(800, 600);
        assert_eq!(clamp_to_image(PointerPos::new(10.4, 20.6), size), Point::new(10, 21));
        assert_eq!(clamp_to_image(PointerPos::new(800.0, 0.0), size), Point::new(800, 0));
    }

    #[test]
    fn test_midpoint_rounds_half_up() {
        assert_eq!(midpoint(Point::new(100, 100), Point::new(200, 100)), Point::new(150, 100));
        assert_eq!(midpoint(Point::new(0, 0), Point::new(1, 3)), Point::new(1, 2));
    }

    #[test]
    fn test_midpoint_near_coordinate_limits() {
        let far = Point::new(i32::MAX, i32::MAX);
        assert_eq!(midpoint(far, far), far);
        assert_eq!(
            midpoint(Point::new(i32::MAX - 1, 0), Point::new(i32::MAX, 0)),
            Point::new(i32::MAX, 0)
        );
        assert_eq!(
            midpoint(Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX)),
            Point::new(0, 0)
        );
    }

    #[test]
    fn test_rect_from_corners_any_order() {
        let expected = [
            Point::new(10, 20),
            Point::new(60, 20),
            Point::new(60, 90),
            Point::new(10, 90),
        ];
        assert_eq!(rect_from_corners(Point::new(10, 20), Point::new(60, 90)), expected);
        assert_eq!(rect_from_corners(Point::new(60, 20), Point::new(10, 90)), expected);
        assert_eq!(rect_from_corners(Point::new(60, 90), Point::new(10, 20)), expected);
    }

    #[test]
    fn test_centered_corners() {
        let (a, b) = centered_corners(Point::new(400, 300), 50, 50);
        assert_eq!(a, Point::new(375, 275));
        assert_eq!(b, Point::new(425, 325));
    }

    #[test]
    fn test_centered_corners_oversized_box() {
        let (a, b) = centered_corners(Point::new(400, 300), 4_000_000_000, u32::MAX);
        assert_eq!(a, Point::new(400 - 2_000_000_000, 300 - (u32::MAX / 2) as i32));
        assert_eq!(b, Point::new(2_000_000_400, i32::MAX));
    }

    #[test]
    fn test_render_path_format() {
        let pts = [Point::new(100, 100), Point::new(200, 100), Point::new(150, 200)];
        assert_eq!(render_path(&pts), "100,100 200,100 150,200 ");
        assert_eq!(render_path(&Vec::<Point>::new()), "");
    }

    #[test]
    fn test_polygon_contains() {
        let triangle = [Point::new(100, 100), Point::new(200, 100), Point::new(150, 200)];
        assert!(polygon_contains(&triangle, 150.0, 130.0));
        assert!(!polygon_contains(&triangle, 10.0, 10.0));
        assert!(!polygon_contains(&triangle[..2], 150.0, 100.0));
    }

    #[test]
    fn test_bounding_box() {
        let triangle = [Point::new(100, 100), Point::new(200, 100), Point::new(150, 200)];
        assert_eq!(
            bounding_box(&triangle),
            Some((Point::new(100, 100), Point::new(200, 200)))
        );
        assert_eq!(bounding_box(&[]), None);
    }
}
