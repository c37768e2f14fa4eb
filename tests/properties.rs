// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Property tests for the editing invariants.

use proptest::prelude::*;
use zonedit::util::geometry::{self, ImageSize};
use zonedit::{EditSession, Handle, Point, PointerPos, ZoneEdit};

fn session_with(count: usize) -> EditSession {
    let mut session = EditSession::new();
    session.generate_default_zone().unwrap();
    for _ in 1..count {
        session.add_zone();
    }
    for id in 1..=count as u32 {
        session
            .update_zone(id, ZoneEdit::Rename(format!("zone {}", id)))
            .unwrap();
    }
    session
}

proptest! {
    #[test]
    fn delete_keeps_ids_dense_and_ordered(count in 2usize..12, pick in 0usize..12) {
        let target = (pick % count) as u32 + 1;
        let mut session = session_with(count);
        session.delete_zone(target).unwrap();

        let ids: Vec<u32> = session.document().zones().map(|(id, _)| id).collect();
        prop_assert_eq!(ids, (1..count as u32).collect::<Vec<_>>());

        let names: Vec<String> = session.document().zones().map(|(_, z)| z.name.clone()).collect();
        let expected: Vec<String> = (1..=count as u32)
            .filter(|id| *id != target)
            .map(|id| format!("zone {}", id))
            .collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn clamped_points_stay_in_image(
        x in -10_000.0f64..10_000.0,
        y in -10_000.0f64..10_000.0,
        width in 1u32..4000,
        height in 1u32..4000,
    ) {
        let p = geometry::clamp_to_image(PointerPos::new(x, y), ImageSize::new(width, height));
        prop_assert!(p.x >= 0 && p.x <= width as i32);
        prop_assert!(p.y >= 0 && p.y <= height as i32);
    }

    #[test]
    fn dragged_vertex_stays_in_image(x in -5_000.0f64..5_000.0, y in -5_000.0f64..5_000.0) {
        let mut session = session_with(1);
        let ticket = session.begin_image_load("frame.png".into());
        session.finish_image_load(&ticket, ImageSize::new(800, 600)).unwrap();

        session.begin_drag(Handle::Vertex(1), PointerPos::new(200.0, 100.0)).unwrap();
        let p = session.drag_to(PointerPos::new(x, y)).unwrap();
        prop_assert!((0..=800).contains(&p.x) && (0..=600).contains(&p.y));
        prop_assert_eq!(session.document().zone(1).unwrap().points[1], p);
    }

    #[test]
    fn rectangle_matches_its_corners(
        ax in -100i32..100, ay in -100i32..100,
        bx in -100i32..100, by in -100i32..100,
    ) {
        let rect = geometry::rect_from_corners(Point::new(ax, ay), Point::new(bx, by));
        prop_assert_eq!(rect[0].y, rect[1].y);
        prop_assert_eq!(rect[1].x, rect[2].x);
        prop_assert_eq!(rect[2].y, rect[3].y);
        prop_assert_eq!(rect[3].x, rect[0].x);
        prop_assert_eq!((rect[1].x - rect[0].x) as u32, ax.abs_diff(bx));
        prop_assert_eq!((rect[3].y - rect[0].y) as u32, ay.abs_diff(by));
    }
}
