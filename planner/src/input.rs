//! Input model: pointer events, modifier keys, buttons, and the interaction
//! state machine's states.
//!
//! This module defines the types consumed by the engine. A `PointerEvent`
//! abstracts mouse and touch so both go through the same handlers, and
//! `Modifiers` captures the keys held at the time of an event. `InputState`
//! is the gesture being tracked between events, carrying the context needed
//! to commit on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::geometry::WorldPoint;
use crate::item::{ItemConfig, ItemId};
use crate::render::VisualHandle;

/// Modifier keys held during an event. Only `Shift` means anything here:
/// it reverses rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key, named as the host reports it (e.g. `"Delete"`, `"Escape"`, `"r"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// `Delete` or `Backspace`.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }

    #[must_use]
    pub fn is_cancel(&self) -> bool {
        self.0 == "Escape"
    }

    /// The rotate shortcut, `r` in either case.
    #[must_use]
    pub fn is_rotate(&self) -> bool {
        self.0.eq_ignore_ascii_case("r")
    }
}

/// Where a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    /// A touch event with the number of active touch points.
    Touch { touches: u32 },
}

/// A pointer event in element-local pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub source: PointerSource,
}

impl PointerEvent {
    #[must_use]
    pub fn mouse(x: f64, y: f64) -> Self {
        Self { position: Point::new(x, y), source: PointerSource::Mouse }
    }

    #[must_use]
    pub fn touch(x: f64, y: f64, touches: u32) -> Self {
        Self { position: Point::new(x, y), source: PointerSource::Touch { touches } }
    }

    /// Whether the engine should react to this event. Multi-touch belongs to
    /// camera gestures and is ignored.
    #[must_use]
    pub fn is_single(&self) -> bool {
        match self.source {
            PointerSource::Mouse => true,
            PointerSource::Touch { touches } => touches == 1,
        }
    }
}

/// Which camera the view is using.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Top-down orthographic editing view.
    #[default]
    Plan,
    /// Free orbiting view; editing is disabled.
    Free,
}

/// Cursor the host should show over the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Crosshair,
    Grabbing,
}

impl CursorStyle {
    /// CSS cursor name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Crosshair => "crosshair",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Persistent UI state that survives between gestures.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected item, if any.
    pub selected_id: Option<ItemId>,
    pub view_mode: ViewMode,
}

/// Internal state for the interaction state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A template is waiting to be placed; its ghost follows the pointer.
    PlacementPending {
        /// Template with rotation always set.
        template: ItemConfig,
        /// The ghost visual showing where the item would land.
        ghost: VisualHandle,
        /// Last clamped ghost position, if the pointer has hit the floor yet.
        ghost_position: Option<WorldPoint>,
    },
    /// The user is moving an existing item across the floor.
    Dragging {
        /// Id of the item being dragged.
        id: ItemId,
        /// Pointer-to-center offset captured on grab, kept for the whole drag.
        offset_x: f64,
        offset_z: f64,
    },
}

impl InputState {
    #[must_use]
    pub fn is_placing(&self) -> bool {
        matches!(self, Self::PlacementPending { .. })
    }

    /// The item being dragged, if any.
    #[must_use]
    pub fn dragging(&self) -> Option<ItemId> {
        match self {
            Self::Dragging { id, .. } => Some(*id),
            _ => None,
        }
    }
}
