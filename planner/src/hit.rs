//! Ray picking against item volumes.
//!
//! Items are boxes rotated about the vertical axis. A pick casts the camera
//! ray through every candidate and keeps the closest entry distance; exact
//! ties go to the lowest id, which is the item placed first.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use std::cmp::Ordering;

use glam::{DQuat, DVec3};

use crate::geometry::Ray;
use crate::item::ItemId;

/// A box in world space, rotated about +Y around its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxVolume {
    pub center: DVec3,
    pub half_extents: DVec3,
    pub rotation_y: f64,
}

/// A candidate that a ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub item_id: ItemId,
    pub distance: f64,
}

/// Distance along `ray` at which it enters `volume`, or 0 when the origin is
/// already inside. `None` on a miss.
#[must_use]
pub fn ray_distance(ray: &Ray, volume: &BoxVolume) -> Option<f64> {
    let to_local = DQuat::from_rotation_y(-volume.rotation_y);
    let origin = to_local * (ray.origin - volume.center);
    let dir = to_local * ray.direction;

    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let h = volume.half_extents[axis];
        if d.abs() < f64::EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

/// Pick the closest candidate under `ray`.
pub fn nearest<I>(ray: &Ray, candidates: I) -> Option<Hit>
where
    I: IntoIterator<Item = (ItemId, BoxVolume)>,
{
    let mut best: Option<Hit> = None;
    for (item_id, volume) in candidates {
        let Some(distance) = ray_distance(ray, &volume) else {
            continue;
        };
        let closer = match best {
            None => true,
            Some(b) => match distance.total_cmp(&b.distance) {
                Ordering::Less => true,
                Ordering::Equal => item_id < b.item_id,
                Ordering::Greater => false,
            },
        };
        if closer {
            best = Some(Hit { item_id, distance });
        }
    }
    best
}
