#![allow(clippy::float_cmp)]

use std::f64::consts::FRAC_PI_2;

use super::*;

fn down_at(x: f64, z: f64) -> Ray {
    Ray { origin: DVec3::new(x, 50.0, z), direction: DVec3::NEG_Y }
}

fn floor_box(x: f64, z: f64, w: f64, h: f64, d: f64, rotation_y: f64) -> BoxVolume {
    BoxVolume { center: DVec3::new(x, h / 2.0, z), half_extents: DVec3::new(w / 2.0, h / 2.0, d / 2.0), rotation_y }
}

// =============================================================
// ray_distance
// =============================================================

#[test]
fn ray_from_above_hits_top_face() {
    let vol = floor_box(0.0, 0.0, 1.0, 0.8, 0.5, 0.0);
    let t = ray_distance(&down_at(0.2, 0.1), &vol).unwrap();
    assert!((t - (50.0 - 0.8)).abs() < 1e-9);
}

#[test]
fn ray_outside_footprint_misses() {
    let vol = floor_box(0.0, 0.0, 1.0, 0.8, 0.5, 0.0);
    assert!(ray_distance(&down_at(0.6, 0.0), &vol).is_none());
    assert!(ray_distance(&down_at(0.0, 0.3), &vol).is_none());
}

#[test]
fn rotation_swaps_footprint_for_picking() {
    // 1.0 wide, 0.5 deep; rotated 90° it is 0.5 along X and 1.0 along Z.
    let vol = floor_box(0.0, 0.0, 1.0, 0.8, 0.5, FRAC_PI_2);
    assert!(ray_distance(&down_at(0.0, 0.45), &vol).is_some());
    assert!(ray_distance(&down_at(0.45, 0.0), &vol).is_none());
}

#[test]
fn ray_starting_inside_reports_zero() {
    let vol = floor_box(0.0, 0.0, 1.0, 1.0, 1.0, 0.0);
    let ray = Ray { origin: DVec3::new(0.0, 0.5, 0.0), direction: DVec3::NEG_Y };
    assert_eq!(ray_distance(&ray, &vol), Some(0.0));
}

#[test]
fn box_behind_ray_misses() {
    let vol = floor_box(0.0, 0.0, 1.0, 1.0, 1.0, 0.0);
    let ray = Ray { origin: DVec3::new(0.0, 5.0, 0.0), direction: DVec3::Y };
    assert!(ray_distance(&ray, &vol).is_none());
}

#[test]
fn horizontal_ray_hits_side_face() {
    let vol = floor_box(0.0, 0.0, 1.0, 1.0, 1.0, 0.0);
    let ray = Ray { origin: DVec3::new(-3.0, 0.5, 0.0), direction: DVec3::X };
    let t = ray_distance(&ray, &vol).unwrap();
    assert!((t - 2.5).abs() < 1e-9);
}

#[test]
fn horizontal_ray_above_box_misses() {
    let vol = floor_box(0.0, 0.0, 1.0, 1.0, 1.0, 0.0);
    let ray = Ray { origin: DVec3::new(-3.0, 1.5, 0.0), direction: DVec3::X };
    assert!(ray_distance(&ray, &vol).is_none());
}

// =============================================================
// nearest
// =============================================================

#[test]
fn nearest_with_no_candidates_is_none() {
    assert!(nearest(&down_at(0.0, 0.0), Vec::new()).is_none());
}

#[test]
fn nearest_prefers_taller_item_from_above() {
    let low = (ItemId(1), floor_box(0.0, 0.0, 1.0, 0.4, 1.0, 0.0));
    let tall = (ItemId(2), floor_box(0.0, 0.0, 0.5, 2.0, 0.5, 0.0));
    let hit = nearest(&down_at(0.0, 0.0), vec![low, tall]).unwrap();
    assert_eq!(hit.item_id, ItemId(2));
    assert!((hit.distance - 48.0).abs() < 1e-9);
}

#[test]
fn nearest_skips_misses() {
    let far_away = (ItemId(1), floor_box(3.0, 3.0, 1.0, 5.0, 1.0, 0.0));
    let under = (ItemId(2), floor_box(0.0, 0.0, 1.0, 0.4, 1.0, 0.0));
    let hit = nearest(&down_at(0.0, 0.0), vec![far_away, under]).unwrap();
    assert_eq!(hit.item_id, ItemId(2));
}

#[test]
fn nearest_tie_goes_to_lowest_id() {
    let a = (ItemId(7), floor_box(0.0, 0.0, 1.0, 0.8, 1.0, 0.0));
    let b = (ItemId(3), floor_box(0.2, 0.0, 1.0, 0.8, 1.0, 0.0));
    let hit = nearest(&down_at(0.1, 0.0), vec![a, b]).unwrap();
    assert_eq!(hit.item_id, ItemId(3));
}
