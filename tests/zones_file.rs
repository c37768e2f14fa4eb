// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Zones file import/export through the editing session.

use serde_json::{json, Value};
use zonedit::io::serialization;
use zonedit::util::geometry::ImageSize;
use zonedit::{EditSession, Handle, PointerPos};

fn sample() -> Value {
    json!({
        "zones": {
            "1": {
                "name": "Driveway",
                "points": [{"x": 10, "y": 20}, {"x": 300, "y": 20}, {"x": 150, "y": 400}],
                "warmup": 4,
                "cooldown": 10,
                "continuation": 6,
                "minimum_x": 80,
                "minimum_y": 60,
                "upload_to_s3": true,
                "s3_bucket": "driveway-frames"
            },
            "2": {
                "name": "Porch",
                "points": [{"x": 500, "y": 100}, {"x": 600, "y": 100}, {"x": 550, "y": 200}],
                "camera": "front"
            }
        },
        "image": "frame.jpg",
        "upload_to_s3": true,
        "s3_bucket": "motion"
    })
}

fn load(value: Value) -> EditSession {
    let file = serialization::from_json_str(&value.to_string()).unwrap();
    let mut session = EditSession::new();
    session.load_zones(file).unwrap();
    session
}

#[test]
fn test_round_trip_fills_defaults_and_keeps_fields() {
    let session = load(sample());
    let exported = session.serialize().unwrap();

    let mut expected = sample();
    let porch = &mut expected["zones"]["2"];
    porch["warmup"] = json!(2);
    porch["cooldown"] = json!(5);
    porch["continuation"] = json!(3);
    porch["minimum_x"] = json!(50);
    porch["minimum_y"] = json!(50);
    porch["upload_to_s3"] = json!(false);
    porch["s3_bucket"] = json!("");

    assert_eq!(exported, expected);
}

#[test]
fn test_minimal_zone_gets_documented_defaults() {
    let file = serialization::from_json_str(
        r#"{"zones": {"1": {"points":[{"x":0,"y":0},{"x":5,"y":0},{"x":0,"y":5}]}}, "image": "x.png"}"#,
    )
    .unwrap();
    let mut session = EditSession::new();
    session.load_zones(file).unwrap();

    let zone = session.document().zone(1).unwrap();
    assert_eq!(zone.name, "");
    assert_eq!(zone.points.len(), 3);
    assert_eq!(
        (zone.warmup, zone.cooldown, zone.continuation),
        (2, 5, 3)
    );
    assert_eq!((zone.minimum_x, zone.minimum_y), (50, 50));
    assert!(!zone.upload_to_s3);

    let exported = session.serialize().unwrap();
    assert_eq!(exported["upload_to_s3"], json!(false));
    assert_eq!(exported["s3_bucket"], json!(""));
    assert_eq!(exported["image"], json!("x.png"));
}

#[test]
fn test_edits_survive_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.json");

    let mut session = load(sample());
    let ticket = session.begin_image_load("frame.jpg".into());
    session.finish_image_load(&ticket, ImageSize::new(640, 480)).unwrap();
    session.delete_zone(1).unwrap();
    session
        .begin_drag(Handle::Vertex(0), PointerPos::new(500.0, 100.0))
        .unwrap();
    session.drag_to(PointerPos::new(900.0, -20.0)).unwrap();
    session.end_drag();

    serialization::export(&session.to_file(), &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"upload_to_s3\""));
    assert!(text.contains("\"s3_bucket\""));

    let reread = serialization::import(&path).unwrap();
    assert_eq!(reread.zones.len(), 1);
    let porch = &reread.zones[&1];
    assert_eq!(porch.name, "Porch");
    assert_eq!((porch.points[0].x, porch.points[0].y), (640, 0));
    assert_eq!(porch.extra["camera"], json!("front"));
}

#[test]
fn test_yaml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.yaml");

    let session = load(sample());
    serialization::export(&session.to_file(), &path).unwrap();
    let reread = serialization::import(&path).unwrap();
    assert_eq!(reread, session.to_file());
}

#[test]
fn test_minimum_size_beyond_coordinate_range_loads() {
    let mut session = load(json!({
        "zones": {"1": {
            "name": "wide",
            "points": [{"x": 0, "y": 0}, {"x": 5, "y": 0}, {"x": 0, "y": 5}],
            "minimum_x": 4000000000u64
        }},
        "image": "x.png"
    }));
    let ticket = session.begin_image_load("x.png".into());
    session.finish_image_load(&ticket, ImageSize::new(640, 480)).unwrap();

    assert_eq!(session.active_zone(), Some(1));
    let exported = session.serialize().unwrap();
    assert_eq!(exported["zones"]["1"]["minimum_x"], json!(4000000000u64));
}

#[test]
fn test_unreadable_file_leaves_session_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zones.json");
    std::fs::write(&path, "{ not json").unwrap();

    let session = load(sample());
    assert!(serialization::import(&path).is_err());
    assert!(serialization::import(&dir.path().join("missing.json")).is_err());
    assert_eq!(session.document().len(), 2);
}
