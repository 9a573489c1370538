//! Project format: the saved layout as versioned JSON.
//!
//! A project is the room plus every item's attributes and placement. Ids are
//! not stored; restoring a project assigns fresh ones. Keys are camelCase:
//!
//! ```json
//! {
//!   "version": 1,
//!   "room": { "width": 4.2, "depth": 2.32, "height": 2.5 },
//!   "items": [
//!     { "name": "Desk", "width": 1.2, "depth": 0.6, "height": 0.75,
//!       "floorHeight": 0, "color": 12615744, "opacity": 0,
//!       "isBlocked": false, "x": 0.5, "z": -0.3, "rotation": 0 }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use serde::{Deserialize, Serialize};

use crate::consts::PROJECT_VERSION;
use crate::item::{Color, Item, ItemConfig, ItemError, ItemRegistry, ItemSettings};
use crate::room::{RoomConfig, RoomError};

/// Error returned when project text cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("malformed project JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported project version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("invalid room: {0}")]
    InvalidRoom(#[from] RoomError),
    #[error("invalid item at index {index}: {reason}")]
    InvalidItem { index: usize, reason: ItemError },
}

/// One saved item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    #[serde(default)]
    pub floor_height: f64,
    pub color: Color,
    #[serde(default)]
    pub opacity: u8,
    #[serde(default)]
    pub is_blocked: bool,
    pub x: f64,
    pub z: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl ItemRecord {
    fn settings(&self) -> ItemSettings {
        ItemSettings {
            name: self.name.clone(),
            width: self.width,
            depth: self.depth,
            height: self.height,
            floor_height: self.floor_height,
            color: self.color,
            opacity: self.opacity,
            is_blocked: self.is_blocked,
        }
    }

    /// Check attributes and placement.
    ///
    /// # Errors
    ///
    /// Returns the first [`ItemError`] found.
    pub fn validate(&self) -> Result<(), ItemError> {
        self.settings().validate()?;
        for (field, value) in [("x", self.x), ("z", self.z), ("rotation", self.rotation)] {
            if !value.is_finite() {
                return Err(ItemError::NonFinite { field, value });
            }
        }
        Ok(())
    }

    /// The template that re-creates this item.
    #[must_use]
    pub fn to_config(&self) -> ItemConfig {
        ItemConfig {
            name: self.name.clone(),
            width: self.width,
            depth: self.depth,
            height: self.height,
            color: self.color,
            floor_height: Some(self.floor_height),
            opacity: Some(self.opacity),
            rotation: Some(self.rotation),
            is_blocked: Some(self.is_blocked),
            x: Some(self.x),
            z: Some(self.z),
        }
    }
}

impl From<&Item> for ItemRecord {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            width: item.width,
            depth: item.depth,
            height: item.height,
            floor_height: item.floor_height,
            color: item.color,
            opacity: item.opacity,
            is_blocked: item.is_blocked,
            x: item.x,
            z: item.z,
            rotation: item.rotation,
        }
    }
}

/// A saved layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub version: u32,
    pub room: RoomConfig,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

impl Project {
    /// Capture the current room and items, in registry order.
    #[must_use]
    pub fn snapshot(room: &RoomConfig, registry: &ItemRegistry) -> Self {
        Self { version: PROJECT_VERSION, room: *room, items: registry.iter().map(ItemRecord::from).collect() }
    }

    /// Parse and validate project text.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError`] for malformed JSON or a project that fails
    /// [`Project::validate`].
    pub fn from_json(text: &str) -> Result<Self, ProjectError> {
        let project: Self = serde_json::from_str(text)?;
        project.validate()?;
        Ok(project)
    }

    /// Check the version, the room, and every item.
    ///
    /// # Errors
    ///
    /// Returns the first problem found as a [`ProjectError`].
    pub fn validate(&self) -> Result<(), ProjectError> {
        if self.version != PROJECT_VERSION {
            return Err(ProjectError::UnsupportedVersion { found: self.version, expected: PROJECT_VERSION });
        }
        self.room.validate()?;
        for (index, item) in self.items.iter().enumerate() {
            item.validate().map_err(|reason| ProjectError::InvalidItem { index, reason })?;
        }
        Ok(())
    }

    /// Compact JSON, as written by autosave.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, as produced by export.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, ProjectError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
