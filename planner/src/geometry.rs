//! Pure floor-plan geometry: pointer projection, rotation snapping, and
//! room clamping.
//!
//! Every function here is side-effect free. Rotation handling rounds half
//! away from zero (`f64::round`) in both [`snap_angle`] and
//! [`effective_dims`], so a rotation that snaps to 90° always presents its
//! depth along world X.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use glam::DVec3;

use crate::camera::{Camera, Point};
use crate::consts::{PARALLEL_EPSILON, SNAP_RAD};
use crate::room::RoomConfig;

/// A point on the floor plane (Y = 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPoint {
    pub x: f64,
    pub z: f64,
}

impl WorldPoint {
    #[must_use]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }
}

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Intersect a ray with the floor plane.
///
/// Returns `None` when the ray runs parallel to the floor or points away
/// from it.
#[must_use]
pub fn intersect_floor(ray: &Ray) -> Option<WorldPoint> {
    let denom = ray.direction.y;
    if denom.abs() <= PARALLEL_EPSILON {
        return None;
    }
    let t = -ray.origin.y / denom;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    let hit = ray.at(t);
    Some(WorldPoint { x: hit.x, z: hit.z })
}

/// Project an element-local pointer position onto the floor.
#[must_use]
pub fn pointer_to_world(pointer: Point, camera: &Camera) -> Option<WorldPoint> {
    let ray = camera.ray(pointer)?;
    intersect_floor(&ray)
}

/// Index of the nearest 90° step, in `0..4`. Non-finite input counts as 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn quadrant(rotation: f64) -> i64 {
    let steps = (rotation / SNAP_RAD).round();
    if !steps.is_finite() {
        return 0;
    }
    (steps as i64).rem_euclid(4)
}

/// Width and depth as seen along world X and Z after snapped rotation.
#[must_use]
pub fn effective_dims(width: f64, depth: f64, rotation: f64) -> (f64, f64) {
    if quadrant(rotation) % 2 == 1 { (depth, width) } else { (width, depth) }
}

/// Clamp one coordinate so a centered extent stays inside a centered span.
/// An extent wider than the span pins the center to 0.
fn clamp_axis(value: f64, span: f64, extent: f64) -> f64 {
    let lower = -span / 2.0 + extent / 2.0;
    let upper = span / 2.0 - extent / 2.0;
    if lower > upper {
        return 0.0;
    }
    value.max(lower).min(upper)
}

/// Clamp an item center so its effective footprint lies inside the room.
#[must_use]
pub fn clamp_to_room(x: f64, z: f64, eff_w: f64, eff_d: f64, room_width: f64, room_depth: f64) -> (f64, f64) {
    (clamp_axis(x, room_width, eff_w), clamp_axis(z, room_depth, eff_d))
}

/// Clamp a footprint of `width × depth` at `rotation` into `room`.
#[must_use]
pub fn clamp_footprint(point: WorldPoint, width: f64, depth: f64, rotation: f64, room: &RoomConfig) -> WorldPoint {
    let (w, d) = effective_dims(width, depth, rotation);
    let (x, z) = clamp_to_room(point.x, point.z, w, d, room.width, room.depth);
    WorldPoint { x, z }
}

/// Round an angle to the nearest multiple of 90°.
#[must_use]
pub fn snap_angle(angle: f64) -> f64 {
    (angle / SNAP_RAD).round() * SNAP_RAD
}

/// Wrap an angle into `[0, 2π)`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= std::f64::consts::TAU { 0.0 } else { wrapped }
}

/// Snap `rotation` after turning it by `steps` quarter turns.
#[must_use]
pub fn turn(rotation: f64, steps: i32) -> f64 {
    normalize_angle(snap_angle(rotation + f64::from(steps) * SNAP_RAD))
}
