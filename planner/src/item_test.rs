#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::render::{HeadlessRenderer, VisualKind};

fn desk() -> ItemConfig {
    ItemConfig::furniture("Desk", 1.2, 0.6, 0.75, Color(0x00C0_8040))
}

fn body_of(r: &HeadlessRenderer, reg: &ItemRegistry, id: ItemId) -> Transform {
    r.get(reg.visual(id).unwrap().body).unwrap().transform
}

fn label_of(r: &HeadlessRenderer, reg: &ItemRegistry, id: ItemId) -> Transform {
    r.get(reg.visual(id).unwrap().label).unwrap().transform
}

// =============================================================
// Color
// =============================================================

#[test]
fn color_from_hex() {
    assert_eq!(Color::from_hex("#ff8000"), Some(Color(0x00FF_8000)));
    assert_eq!(Color::from_hex("00ff00"), Some(Color(0x0000_FF00)));
    assert_eq!(Color::from_hex("#FFF"), None);
    assert_eq!(Color::from_hex("#gg0000"), None);
    assert_eq!(Color::from_hex("#+12345"), None);
}

#[test]
fn color_to_hex() {
    assert_eq!(Color(0x00AB_CDEF).to_hex(), "#abcdef");
    assert_eq!(Color(0x10).to_hex(), "#000010");
}

#[test]
fn color_darken_rounds_each_channel() {
    assert_eq!(Color(0x00FF_FFFF).darken(0.6), Color(0x0099_9999));
    assert_eq!(Color(0x0001_0203).darken(0.5), Color(0x0001_0102));
}

#[test]
fn color_serializes_as_number() {
    assert_eq!(serde_json::to_string(&Color(0x00B0_B0B0)).unwrap(), "11579568");
}

// =============================================================
// ItemConfig / ItemSettings
// =============================================================

#[test]
fn config_defaults() {
    let s = desk().settings();
    assert_eq!(s.floor_height, 0.0);
    assert_eq!(s.opacity, 0);
    assert!(!s.is_blocked);
}

#[test]
fn blocked_zone_forces_gray_and_default_opacity() {
    let c = ItemConfig::blocked_zone("Door swing", 0.9, 0.9, 2.0, 0);
    assert_eq!(c.color, Color(BLOCKED_COLOR));
    assert_eq!(c.opacity, Some(BLOCKED_DEFAULT_OPACITY));
    assert_eq!(c.is_blocked, Some(true));

    let explicit = ItemConfig::blocked_zone("Radiator", 1.0, 0.2, 0.6, 20);
    assert_eq!(explicit.opacity, Some(20));
}

#[test]
fn config_effective_dims_follow_rotation() {
    assert_eq!(desk().effective_dims(), (1.2, 0.6));
    assert_eq!(desk().with_rotation(FRAC_PI_2).effective_dims(), (0.6, 1.2));
}

#[test]
fn config_deserializes_camel_case_with_missing_optionals() {
    let c: ItemConfig =
        serde_json::from_str(r#"{"name":"Bed","width":1.6,"depth":2.0,"height":0.5,"color":255,"floorHeight":0.1}"#)
            .unwrap();
    assert_eq!(c.floor_height, Some(0.1));
    assert_eq!(c.rotation, None);
    assert_eq!(c.color, Color(255));
}

#[test]
fn settings_validation() {
    assert!(desk().settings().validate().is_ok());

    let mut s = desk().settings();
    s.width = 0.0;
    assert_eq!(s.validate(), Err(ItemError::InvalidDimension { field: "width", value: 0.0 }));

    let mut s = desk().settings();
    s.height = f64::INFINITY;
    assert!(matches!(s.validate(), Err(ItemError::InvalidDimension { field: "height", .. })));

    let mut s = desk().settings();
    s.floor_height = -0.1;
    assert_eq!(s.validate(), Err(ItemError::InvalidFloorHeight(-0.1)));

    let mut s = desk().settings();
    s.opacity = 101;
    assert_eq!(s.validate(), Err(ItemError::InvalidOpacity(101)));
}

// =============================================================
// Item
// =============================================================

#[test]
fn item_transforms() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let item = reg.add_item(&desk().with_floor_height(0.5).at(1.0, -0.5), &mut r);

    let body = item.body_transform();
    assert_eq!(body.position.x, 1.0);
    assert_eq!(body.position.z, -0.5);
    assert!((body.position.y - (0.5 + 0.375)).abs() < 1e-12);

    let label = item.label_transform();
    assert!((label.position.y - (0.5 + 0.75 + LABEL_OFFSET)).abs() < 1e-12);
    assert_eq!(label.rotation_y, 0.0);
}

#[test]
fn summary_uses_gray_for_blocked() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    reg.add_item(&ItemConfig::blocked_zone("Door", 0.9, 0.8, 2.0, 0), &mut r);
    let summary = &reg.summaries()[0];
    assert!(summary.is_blocked);
    assert_eq!(summary.color, Color(BLOCKED_COLOR));
    assert_eq!(summary.dims_label(), "0.9×0.8");
}

// =============================================================
// ItemRegistry
// =============================================================

#[test]
fn ids_are_monotonic_from_one() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let a = reg.add_item(&desk(), &mut r).id;
    let b = reg.add_item(&desk(), &mut r).id;
    assert_eq!(a, ItemId(1));
    assert_eq!(b, ItemId(2));
    assert_eq!(reg.ids(), vec![a, b]);
}

#[test]
fn ids_are_not_reused_after_remove_or_clear() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let a = reg.add_item(&desk(), &mut r).id;
    reg.remove_item(a, &mut r);
    let b = reg.add_item(&desk(), &mut r).id;
    assert_eq!(b, ItemId(2));
    reg.clear(&mut r);
    assert_eq!(reg.add_item(&desk(), &mut r).id, ItemId(3));
}

#[test]
fn add_applies_template_position_and_rotation() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let item = reg.add_item(&desk().at(0.3, 0.4).with_rotation(FRAC_PI_2), &mut r);
    assert_eq!((item.x, item.z), (0.3, 0.4));
    assert_eq!(item.rotation, FRAC_PI_2);
    assert_eq!(item.effective_dims(), (0.6, 1.2));
}

#[test]
fn remove_destroys_visuals() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let id = reg.add_item(&desk(), &mut r).id;
    assert_eq!(r.len(), 2);

    let removed = reg.remove_item(id, &mut r).unwrap();
    assert_eq!(removed.id, id);
    assert!(r.is_empty());
    assert!(reg.is_empty());
    assert!(reg.visual(id).is_none());
}

#[test]
fn remove_unknown_is_none() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    reg.add_item(&desk(), &mut r);
    assert!(reg.remove_item(ItemId(42), &mut r).is_none());
    assert_eq!(reg.len(), 1);
}

#[test]
fn update_position_moves_body_and_label() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let id = reg.add_item(&desk(), &mut r).id;

    assert!(reg.update_item_position(id, 1.1, -0.7, &mut r));
    assert_eq!(reg.get(id).unwrap().position(), WorldPoint::new(1.1, -0.7));

    let body = body_of(&r, &reg, id);
    assert_eq!((body.position.x, body.position.z), (1.1, -0.7));
    let label = label_of(&r, &reg, id);
    assert_eq!((label.position.x, label.position.z), (1.1, -0.7));
}

#[test]
fn update_position_after_remove_is_noop() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let id = reg.add_item(&desk(), &mut r).id;
    reg.remove_item(id, &mut r);
    assert!(!reg.update_item_position(id, 1.0, 1.0, &mut r));
    assert!(reg.is_empty());
    assert!(r.is_empty());
}

#[test]
fn update_rotation_turns_body_only() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let id = reg.add_item(&desk().at(0.2, 0.2), &mut r).id;

    assert!(reg.update_item_rotation(id, FRAC_PI_2, &mut r));
    assert_eq!(reg.get(id).unwrap().rotation, FRAC_PI_2);
    assert_eq!(body_of(&r, &reg, id).rotation_y, FRAC_PI_2);
    assert_eq!(label_of(&r, &reg, id).rotation_y, 0.0);
    // Position is untouched.
    assert_eq!(reg.get(id).unwrap().position(), WorldPoint::new(0.2, 0.2));
    assert!(!reg.update_item_rotation(ItemId(9), 0.0, &mut r));
}

#[test]
fn update_settings_rebuilds_visual_and_keeps_placement() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    let id = reg.add_item(&desk().at(0.5, 0.1).with_rotation(FRAC_PI_2), &mut r).id;
    let before = reg.visual(id).unwrap();

    let mut settings = reg.get(id).unwrap().settings();
    settings.name = "Standing desk".into();
    settings.height = 1.1;
    settings.color = Color(0x0000_00FF);
    assert!(reg.update_item_settings(id, &settings, &mut r));

    let after = reg.visual(id).unwrap();
    assert_ne!(before, after);
    assert!(r.get(before.body).is_none());
    assert_eq!(r.len(), 2);

    let item = reg.get(id).unwrap();
    assert_eq!(item.name, "Standing desk");
    assert_eq!((item.x, item.z, item.rotation), (0.5, 0.1, FRAC_PI_2));

    let body = r.get(after.body).unwrap();
    assert!((body.transform.position.y - 0.55).abs() < 1e-12);
    assert!(matches!(&body.kind, VisualKind::Body { appearance, .. } if appearance.fill == Color(0x0000_00FF)));
}

#[test]
fn update_settings_unknown_id() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    assert!(!reg.update_item_settings(ItemId(1), &desk().settings(), &mut r));
    assert!(r.is_empty());
}

#[test]
fn iteration_is_insertion_order() {
    let mut r = HeadlessRenderer::new();
    let mut reg = ItemRegistry::new();
    for name in ["a", "b", "c"] {
        reg.add_item(&ItemConfig::furniture(name, 1.0, 1.0, 1.0, Color(0)), &mut r);
    }
    let names: Vec<&str> = reg.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(reg.as_slice().len(), 3);
    assert_eq!(reg.next_id(), ItemId(4));
}
