//! Cameras and the screen ↔ world conversions used by pointer input.
//!
//! Pointer coordinates arrive in element-local CSS pixels. A [`Camera`]
//! turns them into normalized device coordinates and unprojects a world ray
//! through its inverse view-projection matrix. Both the top-down plan camera
//! and the free-view perspective camera go through the same path, so
//! picking and floor projection never care which one is active.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use glam::{DMat4, DVec2, DVec3};

use crate::consts::{
    FREE_CAMERA_FAR, FREE_CAMERA_FOV_DEG, FREE_CAMERA_NEAR, PLAN_CAMERA_FAR, PLAN_CAMERA_HEIGHT, PLAN_CAMERA_NEAR,
    PLAN_VIEW_PADDING,
};
use crate::geometry::Ray;
use crate::room::RoomConfig;

/// A point in element-local screen space (CSS pixels, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// A viewport with no usable area cannot map pointers to NDC.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Projection parameters. Angles are in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Orthographic { left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64 },
    Perspective { fov_y: f64, near: f64, far: f64 },
}

/// A positioned camera bound to a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub projection: Projection,
    pub eye: DVec3,
    pub target: DVec3,
    pub up: DVec3,
    pub viewport: Viewport,
}

impl Camera {
    /// Top-down orthographic camera framing `room` inside `viewport`.
    ///
    /// The frustum keeps [`PLAN_VIEW_PADDING`] meters around the room on the
    /// tighter axis and stretches the other axis to the viewport aspect.
    /// Screen-up points toward world −Z.
    #[must_use]
    pub fn plan(room: &RoomConfig, viewport: Viewport) -> Self {
        let room_aspect = room.width / room.depth;
        let view_aspect = if viewport.is_degenerate() { room_aspect } else { viewport.aspect() };

        let (view_w, view_h) = if view_aspect > room_aspect {
            let h = room.depth + PLAN_VIEW_PADDING * 2.0;
            (h * view_aspect, h)
        } else {
            let w = room.width + PLAN_VIEW_PADDING * 2.0;
            (w, w / view_aspect)
        };

        Self {
            projection: Projection::Orthographic {
                left: -view_w / 2.0,
                right: view_w / 2.0,
                bottom: -view_h / 2.0,
                top: view_h / 2.0,
                near: PLAN_CAMERA_NEAR,
                far: PLAN_CAMERA_FAR,
            },
            eye: DVec3::new(0.0, PLAN_CAMERA_HEIGHT, 0.0),
            target: DVec3::ZERO,
            up: DVec3::NEG_Z,
            viewport,
        }
    }

    /// Default oblique perspective camera for free view.
    #[must_use]
    pub fn free(viewport: Viewport) -> Self {
        Self {
            projection: Projection::Perspective {
                fov_y: FREE_CAMERA_FOV_DEG.to_radians(),
                near: FREE_CAMERA_NEAR,
                far: FREE_CAMERA_FAR,
            },
            eye: DVec3::new(0.0, 4.0, 6.0),
            target: DVec3::ZERO,
            up: DVec3::Y,
            viewport,
        }
    }

    /// Combined projection × view matrix (OpenGL clip conventions).
    #[must_use]
    pub fn view_projection(&self) -> DMat4 {
        let view = DMat4::look_at_rh(self.eye, self.target, self.up);
        let proj = match self.projection {
            Projection::Orthographic { left, right, bottom, top, near, far } => {
                DMat4::orthographic_rh_gl(left, right, bottom, top, near, far)
            }
            Projection::Perspective { fov_y, near, far } => {
                DMat4::perspective_rh_gl(fov_y, self.viewport.aspect(), near, far)
            }
        };
        proj * view
    }

    /// Convert an element-local pixel point to normalized device coordinates.
    #[must_use]
    pub fn screen_to_ndc(&self, screen: Point) -> Option<DVec2> {
        if self.viewport.is_degenerate() {
            return None;
        }
        Some(DVec2::new(
            (screen.x / self.viewport.width) * 2.0 - 1.0,
            -(screen.y / self.viewport.height) * 2.0 + 1.0,
        ))
    }

    /// Cast a world-space ray through a screen point.
    ///
    /// The ray starts on the near plane and points away from the camera.
    /// Returns `None` for a degenerate viewport or a singular camera.
    #[must_use]
    pub fn ray(&self, screen: Point) -> Option<Ray> {
        let ndc = self.screen_to_ndc(screen)?;
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(DVec3::new(ndc.x, ndc.y, -1.0));
        let far = inv.project_point3(DVec3::new(ndc.x, ndc.y, 1.0));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        let direction = (far - near).normalize_or_zero();
        if direction == DVec3::ZERO {
            return None;
        }
        Some(Ray { origin: near, direction })
    }

    /// Project a world point back to element-local pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: DVec3) -> Option<Point> {
        if self.viewport.is_degenerate() {
            return None;
        }
        let ndc = self.view_projection().project_point3(world);
        if !ndc.is_finite() {
            return None;
        }
        Some(Point {
            x: (ndc.x + 1.0) / 2.0 * self.viewport.width,
            y: (1.0 - ndc.y) / 2.0 * self.viewport.height,
        })
    }
}
