//! Rendering contract and the in-memory reference renderer.
//!
//! The engine never draws. It drives a [`Renderer`] through opaque
//! [`VisualHandle`]s: create a visual when an item appears, move it when the
//! item moves, destroy it when the item goes away, and ask it which item is
//! under the pointer. The registry's item state stays the source of truth;
//! visuals are a projection that can be torn down and rebuilt at any time.
//!
//! [`Appearance`] and [`Label`] derive the material and label parameters a
//! real backend needs from item attributes, so every backend styles items
//! the same way.
//!
//! [`HeadlessRenderer`] implements the contract without a GPU. It records
//! every visual and its transform and answers picks by casting the camera
//! ray against item bodies.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::BTreeMap;

use glam::DVec3;
use tracing::trace;

use crate::camera::{Camera, Point};
use crate::consts::{
    BLOCKED_COLOR, BLOCKED_EDGE_COLOR, EDGE_DARKEN_FACTOR, GHOST_BLOCKED_COLOR, GHOST_OPACITY, LABEL_ASPECT,
    LABEL_FOOTPRINT_RATIO, LABEL_MAX_CHARS, LABEL_MAX_WIDTH,
};
use crate::hit::{self, BoxVolume};
use crate::item::{Color, Item, ItemConfig, ItemId, ItemSettings};

/// Opaque reference to something the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VisualHandle(pub u64);

/// The pair of visuals owned by one item: its box and its floating label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemVisual {
    pub body: VisualHandle,
    pub label: VisualHandle,
}

/// World placement of a visual. Rotation is about +Y, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: DVec3,
    pub rotation_y: f64,
}

impl Transform {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, rotation_y: f64) -> Self {
        Self { position: DVec3::new(x, y, z), rotation_y }
    }
}

/// Material parameters for an item box or placement ghost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub fill: Color,
    /// Material opacity in `0.0..=1.0` (1.0 is opaque).
    pub opacity: f64,
    pub transparent: bool,
    pub edge: Color,
    pub edge_opacity: f64,
}

impl Appearance {
    #[must_use]
    pub fn for_item(settings: &ItemSettings) -> Self {
        let fill = if settings.is_blocked { Color(BLOCKED_COLOR) } else { settings.color };
        Self {
            fill,
            opacity: 1.0 - f64::from(settings.opacity) / 100.0,
            transparent: settings.opacity > 0 || settings.is_blocked,
            edge: if settings.is_blocked { Color(BLOCKED_EDGE_COLOR) } else { fill.darken(EDGE_DARKEN_FACTOR) },
            edge_opacity: if settings.is_blocked { 0.4 } else { 0.8 },
        }
    }

    #[must_use]
    pub fn for_ghost(settings: &ItemSettings) -> Self {
        Self {
            fill: if settings.is_blocked { Color(GHOST_BLOCKED_COLOR) } else { settings.color },
            opacity: GHOST_OPACITY,
            transparent: true,
            edge: Color(0x00FF_FFFF),
            edge_opacity: 0.7,
        }
    }
}

/// Floating name tag drawn above an item.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub width: f64,
    pub height: f64,
}

impl Label {
    /// Size the label to fit inside the item's footprint and shorten long names.
    #[must_use]
    pub fn for_item(settings: &ItemSettings) -> Self {
        let text = if settings.name.chars().count() > LABEL_MAX_CHARS {
            let mut short: String = settings.name.chars().take(LABEL_MAX_CHARS - 1).collect();
            short.push('…');
            short
        } else {
            settings.name.clone()
        };
        let width = LABEL_MAX_WIDTH.min(settings.width.min(settings.depth) * LABEL_FOOTPRINT_RATIO);
        Self { text, width, height: width / LABEL_ASPECT }
    }
}

/// Everything the core needs from a rendering backend.
pub trait Renderer {
    /// Build the body and label visuals for a newly added or rebuilt item.
    fn create_visual(&mut self, item: &Item) -> ItemVisual;

    /// Release a visual. Unknown handles are ignored.
    fn destroy_visual(&mut self, handle: VisualHandle);

    fn set_visual_transform(&mut self, handle: VisualHandle, transform: Transform);

    /// Build the translucent preview shown while a template is being placed.
    fn create_ghost_visual(&mut self, template: &ItemConfig) -> VisualHandle;

    /// The item whose body is nearest along the ray under `pointer`.
    fn pick_visual(&self, pointer: Point, camera: &Camera) -> Option<ItemId>;
}

/// What a recorded visual represents.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualKind {
    Body { item_id: ItemId, half_extents: DVec3, appearance: Appearance },
    Label { item_id: ItemId, label: Label },
    Ghost { half_extents: DVec3, appearance: Appearance },
}

/// A visual as recorded by [`HeadlessRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Visual {
    pub kind: VisualKind,
    pub transform: Transform,
}

/// Renderer that keeps visuals in memory instead of drawing them.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    visuals: BTreeMap<VisualHandle, Visual>,
    next_handle: u64,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, handle: VisualHandle) -> Option<&Visual> {
        self.visuals.get(&handle)
    }

    /// Number of live visuals of any kind.
    #[must_use]
    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    /// Handles of all live placement ghosts.
    #[must_use]
    pub fn ghosts(&self) -> Vec<VisualHandle> {
        self.visuals
            .iter()
            .filter(|(_, v)| matches!(v.kind, VisualKind::Ghost { .. }))
            .map(|(h, _)| *h)
            .collect()
    }

    fn insert(&mut self, kind: VisualKind, transform: Transform) -> VisualHandle {
        self.next_handle += 1;
        let handle = VisualHandle(self.next_handle);
        self.visuals.insert(handle, Visual { kind, transform });
        handle
    }

    fn body_volumes(&self) -> impl Iterator<Item = (ItemId, BoxVolume)> + '_ {
        self.visuals.values().filter_map(|v| match v.kind {
            VisualKind::Body { item_id, half_extents, .. } => Some((
                item_id,
                BoxVolume { center: v.transform.position, half_extents, rotation_y: v.transform.rotation_y },
            )),
            _ => None,
        })
    }
}

fn half_extents(width: f64, height: f64, depth: f64) -> DVec3 {
    DVec3::new(width / 2.0, height / 2.0, depth / 2.0)
}

impl Renderer for HeadlessRenderer {
    fn create_visual(&mut self, item: &Item) -> ItemVisual {
        let settings = item.settings();
        let body = self.insert(
            VisualKind::Body {
                item_id: item.id,
                half_extents: half_extents(item.width, item.height, item.depth),
                appearance: Appearance::for_item(&settings),
            },
            item.body_transform(),
        );
        let label =
            self.insert(VisualKind::Label { item_id: item.id, label: Label::for_item(&settings) }, item.label_transform());
        trace!(item_id = %item.id, body = body.0, label = label.0, "visual created");
        ItemVisual { body, label }
    }

    fn destroy_visual(&mut self, handle: VisualHandle) {
        self.visuals.remove(&handle);
    }

    fn set_visual_transform(&mut self, handle: VisualHandle, transform: Transform) {
        if let Some(visual) = self.visuals.get_mut(&handle) {
            visual.transform = transform;
        }
    }

    fn create_ghost_visual(&mut self, template: &ItemConfig) -> VisualHandle {
        let settings = template.settings();
        let transform = Transform::new(
            0.0,
            settings.floor_height + settings.height / 2.0,
            0.0,
            template.rotation.unwrap_or_default(),
        );
        self.insert(
            VisualKind::Ghost {
                half_extents: half_extents(settings.width, settings.height, settings.depth),
                appearance: Appearance::for_ghost(&settings),
            },
            transform,
        )
    }

    fn pick_visual(&self, pointer: Point, camera: &Camera) -> Option<ItemId> {
        let ray = camera.ray(pointer)?;
        hit::nearest(&ray, self.body_volumes()).map(|h| h.item_id)
    }
}
