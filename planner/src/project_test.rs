#![allow(clippy::float_cmp)]

use std::f64::consts::PI;

use super::*;
use crate::render::HeadlessRenderer;

fn record(name: &str) -> ItemRecord {
    ItemRecord {
        name: name.into(),
        width: 1.0,
        depth: 0.5,
        height: 0.8,
        floor_height: 0.0,
        color: Color(0x0033_6699),
        opacity: 0,
        is_blocked: false,
        x: 0.2,
        z: -0.1,
        rotation: 0.0,
    }
}

fn project(items: Vec<ItemRecord>) -> Project {
    Project { version: PROJECT_VERSION, room: RoomConfig::default(), items }
}

// =============================================================
// Snapshot / serialization
// =============================================================

#[test]
fn snapshot_captures_room_and_items_in_order() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    reg.add_item(&ItemConfig::furniture("Bed", 1.6, 2.0, 0.5, Color(1)).at(0.1, 0.2).with_rotation(PI), &mut r);
    reg.add_item(&ItemConfig::blocked_zone("Door", 0.9, 0.9, 2.0, 0), &mut r);

    let room = RoomConfig::new(5.0, 3.0, 2.6);
    let p = Project::snapshot(&room, &reg);
    assert_eq!(p.version, 1);
    assert_eq!(p.room, room);
    assert_eq!(p.items.len(), 2);
    assert_eq!(p.items[0].name, "Bed");
    assert_eq!((p.items[0].x, p.items[0].z, p.items[0].rotation), (0.1, 0.2, PI));
    assert!(p.items[1].is_blocked);
    assert_eq!(p.items[1].opacity, 50);
}

#[test]
fn json_uses_camel_case_keys_and_no_ids() {
    let text = project(vec![record("Desk")]).to_json().unwrap();
    assert!(text.contains("\"floorHeight\""));
    assert!(text.contains("\"isBlocked\""));
    assert!(!text.contains("\"id\""));
    assert!(!text.contains("floor_height"));
}

#[test]
fn pretty_json_parses_back() {
    let p = project(vec![record("Desk"), record("Chair")]);
    let text = p.to_json_pretty().unwrap();
    assert!(text.contains('\n'));
    assert_eq!(Project::from_json(&text).unwrap(), p);
}

#[test]
fn missing_optional_item_fields_default() {
    let text = r#"{"version":1,"room":{"width":4,"depth":3,"height":2.5},
        "items":[{"name":"Box","width":1,"depth":1,"height":1,"color":0,"x":0,"z":0}]}"#;
    let p = Project::from_json(text).unwrap();
    let item = &p.items[0];
    assert_eq!(item.floor_height, 0.0);
    assert_eq!(item.rotation, 0.0);
    assert_eq!(item.opacity, 0);
    assert!(!item.is_blocked);
}

#[test]
fn missing_items_is_empty_layout() {
    let p = Project::from_json(r#"{"version":1,"room":{"width":4,"depth":3,"height":2.5}}"#).unwrap();
    assert!(p.items.is_empty());
}

// =============================================================
// Validation
// =============================================================

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(Project::from_json("{not json"), Err(ProjectError::Json(_))));
    assert!(matches!(Project::from_json(r#"{"version":1}"#), Err(ProjectError::Json(_))));
}

#[test]
fn unknown_version_is_rejected() {
    let text = r#"{"version":2,"room":{"width":4,"depth":3,"height":2.5},"items":[]}"#;
    let err = Project::from_json(text).unwrap_err();
    assert!(matches!(err, ProjectError::UnsupportedVersion { found: 2, expected: 1 }));
    assert_eq!(err.to_string(), "unsupported project version 2 (expected 1)");
}

#[test]
fn invalid_room_is_rejected() {
    let mut p = project(Vec::new());
    p.room.width = -1.0;
    assert!(matches!(p.validate(), Err(ProjectError::InvalidRoom(_))));
}

#[test]
fn invalid_item_reports_index() {
    let mut bad = record("Bad");
    bad.depth = 0.0;
    let p = project(vec![record("Ok"), bad]);
    let err = p.validate().unwrap_err();
    assert!(matches!(err, ProjectError::InvalidItem { index: 1, .. }));
    assert_eq!(err.to_string(), "invalid item at index 1: item depth must be a positive finite number, got 0");
}

#[test]
fn item_opacity_and_floor_height_are_checked() {
    let mut loud = record("Loud");
    loud.opacity = 150;
    assert_eq!(loud.validate(), Err(ItemError::InvalidOpacity(150)));

    let mut sunk = record("Sunk");
    sunk.floor_height = -0.5;
    assert_eq!(sunk.validate(), Err(ItemError::InvalidFloorHeight(-0.5)));
}

#[test]
fn non_finite_placement_is_rejected() {
    let mut lost = record("Lost");
    lost.rotation = f64::NAN;
    assert!(matches!(lost.validate(), Err(ItemError::NonFinite { field: "rotation", .. })));
}

#[test]
fn record_to_config_carries_everything() {
    let mut rec = record("Shelf");
    rec.floor_height = 1.2;
    rec.rotation = PI;
    let config = rec.to_config();
    assert_eq!(config.floor_height, Some(1.2));
    assert_eq!(config.rotation, Some(PI));
    assert_eq!((config.x, config.z), (Some(0.2), Some(-0.1)));
}
