//! Room dimensions.
//!
//! The room is centered on the world origin: its floor spans
//! `[-width/2, width/2] × [-depth/2, depth/2]` on the XZ plane. It is only
//! ever replaced as a whole.

#[cfg(test)]
#[path = "room_test.rs"]
mod room_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_ROOM_DEPTH, DEFAULT_ROOM_HEIGHT, DEFAULT_ROOM_WIDTH};

/// Error returned when a room has an unusable dimension.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoomError {
    #[error("room {field} must be a positive finite number, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },
}

/// Room extents in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self { width: DEFAULT_ROOM_WIDTH, depth: DEFAULT_ROOM_DEPTH, height: DEFAULT_ROOM_HEIGHT }
    }
}

impl RoomConfig {
    #[must_use]
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self { width, depth, height }
    }

    /// Check that every dimension is positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError::InvalidDimension`] naming the first bad field.
    pub fn validate(&self) -> Result<(), RoomError> {
        for (field, value) in [("width", self.width), ("depth", self.depth), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(RoomError::InvalidDimension { field, value });
            }
        }
        Ok(())
    }
}
