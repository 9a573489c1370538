//! Item model: placed furniture and blocked zones, and the registry that
//! owns them.
//!
//! This module defines the attribute types that describe an item
//! (`ItemConfig` for templates, `ItemSettings` for the editable attribute
//! set, `Item` for a placed instance) and the runtime store that owns every
//! live item (`ItemRegistry`).
//!
//! The registry is the only writer of item state. Each mutation updates the
//! canonical record first and then pushes the matching change to the
//! [`Renderer`], so a visual is always a projection of the record and never
//! the other way around.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{BLOCKED_COLOR, BLOCKED_DEFAULT_OPACITY, LABEL_OFFSET};
use crate::geometry::{self, WorldPoint};
use crate::hit::BoxVolume;
use crate::render::{ItemVisual, Renderer, Transform};

/// Unique identifier for a placed item. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Packed `0xRRGGBB` color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// Parse `#rrggbb` or `rrggbb`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match u32::from_str_radix(digits, 16) {
            Ok(value) => Some(Self(value)),
            Err(_) => None,
        }
    }

    /// Format as `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0x00FF_FFFF)
    }

    #[must_use]
    pub fn channels(self) -> (u8, u8, u8) {
        let [_, r, g, b] = self.0.to_be_bytes();
        (r, g, b)
    }

    /// Scale each channel by `factor`, rounding to the nearest integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn darken(self, factor: f64) -> Self {
        let (r, g, b) = self.channels();
        let scale = |c: u8| (f64::from(c) * factor).round().clamp(0.0, 255.0) as u32;
        Self((scale(r) << 16) | (scale(g) << 8) | scale(b))
    }
}

/// Error returned when item attributes are unusable.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ItemError {
    #[error("item {field} must be a positive finite number, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },
    #[error("item floor height must be a non-negative finite number, got {0}")]
    InvalidFloorHeight(f64),
    #[error("item opacity must be between 0 and 100, got {0}")]
    InvalidOpacity(u8),
    #[error("item {field} must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
}

/// The editable attribute set of an item. Position and rotation are not part
/// of it; they change through dragging and rotating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSettings {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub floor_height: f64,
    pub color: Color,
    /// Requested transparency, 0–100 percent.
    pub opacity: u8,
    pub is_blocked: bool,
}

impl ItemSettings {
    /// Check extents, floor height, and opacity.
    ///
    /// # Errors
    ///
    /// Returns the first [`ItemError`] found.
    pub fn validate(&self) -> Result<(), ItemError> {
        for (field, value) in [("width", self.width), ("depth", self.depth), ("height", self.height)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ItemError::InvalidDimension { field, value });
            }
        }
        if !(self.floor_height.is_finite() && self.floor_height >= 0.0) {
            return Err(ItemError::InvalidFloorHeight(self.floor_height));
        }
        if self.opacity > 100 {
            return Err(ItemError::InvalidOpacity(self.opacity));
        }
        Ok(())
    }
}

/// Template for a new item. Optional fields take their defaults on add:
/// floor height 0, opacity 0, rotation 0, not blocked, centered at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl ItemConfig {
    /// A furniture template with all optional fields unset.
    #[must_use]
    pub fn furniture(name: impl Into<String>, width: f64, depth: f64, height: f64, color: Color) -> Self {
        Self {
            name: name.into(),
            width,
            depth,
            height,
            color,
            floor_height: None,
            opacity: None,
            rotation: None,
            is_blocked: None,
            x: None,
            z: None,
        }
    }

    /// A blocked-zone template. The color is forced to the neutral gray and
    /// an opacity of 0 becomes 50 so the zone never hides what is under it.
    #[must_use]
    pub fn blocked_zone(name: impl Into<String>, width: f64, depth: f64, height: f64, opacity: u8) -> Self {
        let opacity = if opacity == 0 { BLOCKED_DEFAULT_OPACITY } else { opacity };
        Self {
            opacity: Some(opacity),
            is_blocked: Some(true),
            ..Self::furniture(name, width, depth, height, Color(BLOCKED_COLOR))
        }
    }

    #[must_use]
    pub fn with_floor_height(mut self, floor_height: f64) -> Self {
        self.floor_height = Some(floor_height);
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn at(mut self, x: f64, z: f64) -> Self {
        self.x = Some(x);
        self.z = Some(z);
        self
    }

    /// The attribute set this template produces, with defaults applied.
    #[must_use]
    pub fn settings(&self) -> ItemSettings {
        ItemSettings {
            name: self.name.clone(),
            width: self.width,
            depth: self.depth,
            height: self.height,
            floor_height: self.floor_height.unwrap_or(0.0),
            color: self.color,
            opacity: self.opacity.unwrap_or(0),
            is_blocked: self.is_blocked.unwrap_or(false),
        }
    }

    /// Width and depth along world axes at the template's current rotation.
    #[must_use]
    pub fn effective_dims(&self) -> (f64, f64) {
        geometry::effective_dims(self.width, self.depth, self.rotation.unwrap_or(0.0))
    }
}

/// A placed item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub floor_height: f64,
    pub color: Color,
    pub opacity: u8,
    pub x: f64,
    pub z: f64,
    /// Radians about +Y. Mutation paths keep this a normalized multiple of 90°.
    pub rotation: f64,
    pub is_blocked: bool,
}

impl Item {
    fn from_config(id: ItemId, config: &ItemConfig) -> Self {
        let settings = config.settings();
        let mut item = Self {
            id,
            name: String::new(),
            width: 0.0,
            depth: 0.0,
            height: 0.0,
            floor_height: 0.0,
            color: Color::default(),
            opacity: 0,
            x: config.x.unwrap_or(0.0),
            z: config.z.unwrap_or(0.0),
            rotation: config.rotation.unwrap_or(0.0),
            is_blocked: false,
        };
        item.apply_settings(settings);
        item
    }

    fn apply_settings(&mut self, settings: ItemSettings) {
        self.name = settings.name;
        self.width = settings.width;
        self.depth = settings.depth;
        self.height = settings.height;
        self.floor_height = settings.floor_height;
        self.color = settings.color;
        self.opacity = settings.opacity;
        self.is_blocked = settings.is_blocked;
    }

    #[must_use]
    pub fn settings(&self) -> ItemSettings {
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

    #[must_use]
    pub fn position(&self) -> WorldPoint {
        WorldPoint { x: self.x, z: self.z }
    }

    #[must_use]
    pub fn effective_dims(&self) -> (f64, f64) {
        geometry::effective_dims(self.width, self.depth, self.rotation)
    }

    /// Where the item's box sits: centered vertically on its own height.
    #[must_use]
    pub fn body_transform(&self) -> Transform {
        Transform::new(self.x, self.floor_height + self.height / 2.0, self.z, self.rotation)
    }

    /// Where the item's label floats, just above its top face.
    #[must_use]
    pub fn label_transform(&self) -> Transform {
        Transform::new(self.x, self.floor_height + self.height + LABEL_OFFSET, self.z, 0.0)
    }

    /// Pick volume matching the body transform.
    #[must_use]
    pub fn volume(&self) -> BoxVolume {
        let t = self.body_transform();
        BoxVolume {
            center: t.position,
            half_extents: glam::DVec3::new(self.width / 2.0, self.height / 2.0, self.depth / 2.0),
            rotation_y: t.rotation_y,
        }
    }
}

/// A row in the item list shown next to the plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSummary {
    pub id: ItemId,
    pub name: String,
    pub color: Color,
    pub is_blocked: bool,
    pub width: f64,
    pub depth: f64,
}

impl ItemSummary {
    /// Footprint as `W×D`.
    #[must_use]
    pub fn dims_label(&self) -> String {
        format!("{}×{}", self.width, self.depth)
    }
}

impl From<&Item> for ItemSummary {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            color: if item.is_blocked { Color(BLOCKED_COLOR) } else { item.color },
            is_blocked: item.is_blocked,
            width: item.width,
            depth: item.depth,
        }
    }
}

/// In-memory store of placed items, in insertion order.
#[derive(Debug)]
pub struct ItemRegistry {
    items: Vec<Item>,
    visuals: HashMap<ItemId, ItemVisual>,
    next_id: u64,
}

impl Default for ItemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRegistry {
    /// Create an empty registry. The first item gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self { items: Vec::new(), visuals: HashMap::new(), next_id: 1 }
    }

    /// Add an item built from `config` and create its visual.
    pub fn add_item(&mut self, config: &ItemConfig, renderer: &mut dyn Renderer) -> &Item {
        let id = ItemId(self.next_id);
        self.next_id += 1;

        let item = Item::from_config(id, config);
        let visual = renderer.create_visual(&item);
        renderer.set_visual_transform(visual.body, item.body_transform());
        renderer.set_visual_transform(visual.label, item.label_transform());
        debug!(%id, name = %item.name, x = item.x, z = item.z, "item added");

        self.visuals.insert(id, visual);
        let index = self.items.len();
        self.items.push(item);
        &self.items[index]
    }

    /// Remove an item and destroy its visual. Returns `None` for unknown ids.
    pub fn remove_item(&mut self, id: ItemId, renderer: &mut dyn Renderer) -> Option<Item> {
        let index = self.items.iter().position(|i| i.id == id)?;
        if let Some(visual) = self.visuals.remove(&id) {
            renderer.destroy_visual(visual.body);
            renderer.destroy_visual(visual.label);
        }
        debug!(%id, "item removed");
        Some(self.items.remove(index))
    }

    /// Move an item's center. Returns false for unknown ids.
    pub fn update_item_position(&mut self, id: ItemId, x: f64, z: f64, renderer: &mut dyn Renderer) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.x = x;
        item.z = z;
        if let Some(visual) = self.visuals.get(&id) {
            renderer.set_visual_transform(visual.body, item.body_transform());
            renderer.set_visual_transform(visual.label, item.label_transform());
        }
        true
    }

    /// Set an item's rotation. Does not re-clamp; callers that rotate must
    /// re-clamp against the new effective footprint themselves.
    pub fn update_item_rotation(&mut self, id: ItemId, rotation: f64, renderer: &mut dyn Renderer) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.rotation = rotation;
        if let Some(visual) = self.visuals.get(&id) {
            renderer.set_visual_transform(visual.body, item.body_transform());
        }
        true
    }

    /// Replace an item's attributes, keeping id, position, and rotation.
    /// The visual is destroyed and rebuilt.
    pub fn update_item_settings(&mut self, id: ItemId, settings: &ItemSettings, renderer: &mut dyn Renderer) -> bool {
        let Some(item) = self.items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        item.apply_settings(settings.clone());

        if let Some(old) = self.visuals.remove(&id) {
            renderer.destroy_visual(old.body);
            renderer.destroy_visual(old.label);
        }
        let visual = renderer.create_visual(item);
        renderer.set_visual_transform(visual.body, item.body_transform());
        renderer.set_visual_transform(visual.label, item.label_transform());
        self.visuals.insert(id, visual);
        debug!(%id, name = %item.name, "item settings updated");
        true
    }

    /// Remove every item. Ids keep counting from where they were.
    pub fn clear(&mut self, renderer: &mut dyn Renderer) {
        for (_, visual) in self.visuals.drain() {
            renderer.destroy_visual(visual.body);
            renderer.destroy_visual(visual.label);
        }
        self.items.clear();
    }

    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The visuals currently backing an item.
    #[must_use]
    pub fn visual(&self, id: ItemId) -> Option<ItemVisual> {
        self.visuals.get(&id).copied()
    }

    /// Items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|i| i.id).collect()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<ItemSummary> {
        self.items.iter().map(ItemSummary::from).collect()
    }

    /// The id the next added item will receive.
    #[must_use]
    pub fn next_id(&self) -> ItemId {
        ItemId(self.next_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
