//! Interaction engine: turns pointer, key, and toolbar input into item
//! mutations.
//!
//! [`EngineCore`] owns everything an editing session needs (the item
//! registry, the room, the camera, the session state, and the renderer) and
//! never talks to persistence or UI directly. Every handler returns the
//! [`Action`]s the host should perform, in order.

use tracing::{debug, info};

use crate::camera::{Camera, Viewport};
use crate::geometry::{self, WorldPoint};
use crate::input::{Button, CursorStyle, InputState, Key, Modifiers, PointerEvent, UiState, ViewMode};
use crate::item::{Item, ItemConfig, ItemError, ItemId, ItemRegistry, ItemSettings, ItemSummary};
use crate::project::{Project, ProjectError};
use crate::render::{Renderer, Transform};
use crate::room::{RoomConfig, RoomError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ItemCreated(ItemId),
    ItemUpdated(ItemId),
    ItemRemoved(ItemId),
    RoomChanged,
    /// A committing change happened; persist the project.
    Autosave,
    RefreshItemList,
    ShowPlacementHint,
    HidePlacementHint,
    SetCursor(CursorStyle),
    RenderNeeded,
}

/// Core engine state. Generic over the rendering backend so tests can run
/// against [`crate::render::HeadlessRenderer`].
pub struct EngineCore<R: Renderer> {
    pub items: ItemRegistry,
    pub room: RoomConfig,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub renderer: R,
}

impl<R: Renderer> EngineCore<R> {
    /// Engine with the default room and viewport.
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self::with_room(RoomConfig::default(), Viewport::default(), renderer)
    }

    #[must_use]
    pub fn with_room(room: RoomConfig, viewport: Viewport, renderer: R) -> Self {
        Self {
            items: ItemRegistry::new(),
            room,
            camera: Camera::plan(&room, viewport),
            ui: UiState::default(),
            input: InputState::Idle,
            renderer,
        }
    }

    fn is_free_view(&self) -> bool {
        self.ui.view_mode == ViewMode::Free
    }

    fn rebuild_camera(&mut self) {
        let viewport = self.camera.viewport;
        self.camera = match self.ui.view_mode {
            ViewMode::Plan => Camera::plan(&self.room, viewport),
            ViewMode::Free => Camera::free(viewport),
        };
    }

    // --- Viewport / view mode ---

    /// Update the element size and refit the camera.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        self.camera.viewport = viewport;
        self.rebuild_camera();
        vec![Action::RenderNeeded]
    }

    /// Switch between plan and free view. Leaving plan view cancels any
    /// placement, ends any drag, and clears the selection.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Vec<Action> {
        if self.ui.view_mode == mode {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if mode == ViewMode::Free {
            actions.extend(self.cancel_placement());
            actions.extend(self.end_drag());
            self.ui.selected_id = None;
        }
        self.ui.view_mode = mode;
        self.rebuild_camera();
        debug!(?mode, "view mode changed");
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Placement ---

    /// Begin placing a copy of `template`. Any pending placement is replaced
    /// and a drag in progress ends where it is.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError`] when the template's dimensions or rotation are
    /// unusable. Nothing changes in that case.
    pub fn start_placement(&mut self, template: &ItemConfig) -> Result<Vec<Action>, ItemError> {
        template.settings().validate()?;
        let rotation = template.rotation.unwrap_or(0.0);
        if !rotation.is_finite() {
            return Err(ItemError::NonFinite { field: "rotation", value: rotation });
        }
        if self.is_free_view() {
            return Ok(Vec::new());
        }

        let mut actions = self.end_drag();
        self.discard_ghost();
        let mut template = template.clone();
        template.rotation = Some(geometry::normalize_angle(geometry::snap_angle(rotation)));
        let ghost = self.renderer.create_ghost_visual(&template);
        debug!(name = %template.name, "placement started");
        self.input = InputState::PlacementPending { template, ghost, ghost_position: None };
        actions.extend([Action::ShowPlacementHint, Action::SetCursor(CursorStyle::Crosshair), Action::RenderNeeded]);
        Ok(actions)
    }

    /// Drop the pending template and its ghost. No-op when nothing is pending.
    pub fn cancel_placement(&mut self) -> Vec<Action> {
        if !self.discard_ghost() {
            return Vec::new();
        }
        debug!("placement cancelled");
        vec![Action::HidePlacementHint, Action::SetCursor(CursorStyle::Default), Action::RenderNeeded]
    }

    fn discard_ghost(&mut self) -> bool {
        if let InputState::PlacementPending { ghost, .. } = self.input {
            self.renderer.destroy_visual(ghost);
            self.input = InputState::Idle;
            true
        } else {
            false
        }
    }

    /// Turn the pending template a quarter turn clockwise. Only the ghost
    /// changes; nothing is committed.
    pub fn rotate_pending_ghost(&mut self) -> Vec<Action> {
        if self.is_free_view() {
            return Vec::new();
        }
        let InputState::PlacementPending { template, ghost, ghost_position } = &mut self.input else {
            return Vec::new();
        };
        let rotation = geometry::turn(template.rotation.unwrap_or(0.0), 1);
        template.rotation = Some(rotation);
        let at = ghost_position.unwrap_or(WorldPoint::new(0.0, 0.0));
        let transform = ghost_transform(template, at);
        let ghost = *ghost;
        self.renderer.set_visual_transform(ghost, transform);
        vec![Action::RenderNeeded]
    }

    // --- Pointer input ---

    pub fn on_pointer_down(&mut self, event: PointerEvent, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.is_free_view() || !event.is_single() || button != Button::Primary {
            return Vec::new();
        }
        let Some(world) = geometry::pointer_to_world(event.position, &self.camera) else {
            return Vec::new();
        };

        if let InputState::PlacementPending { template, .. } = &self.input {
            let template = template.clone();
            return self.commit_placement(&template, world);
        }

        let Some(item) = self.renderer.pick_visual(event.position, &self.camera).and_then(|id| self.items.get(id))
        else {
            self.ui.selected_id = None;
            return Vec::new();
        };

        let id = item.id;
        let (offset_x, offset_z) = (world.x - item.x, world.z - item.z);
        self.ui.selected_id = Some(id);
        self.input = InputState::Dragging { id, offset_x, offset_z };
        debug!(%id, offset_x, offset_z, "drag started");
        vec![Action::SetCursor(CursorStyle::Grabbing)]
    }

    fn commit_placement(&mut self, template: &ItemConfig, world: WorldPoint) -> Vec<Action> {
        let at = clamp_template(template, world, &self.room);
        let config = template.clone().at(at.x, at.z);
        let id = self.items.add_item(&config, &mut self.renderer).id;
        self.discard_ghost();
        debug!(%id, x = at.x, z = at.z, "placement committed");
        vec![
            Action::ItemCreated(id),
            Action::HidePlacementHint,
            Action::SetCursor(CursorStyle::Default),
            Action::RefreshItemList,
            Action::Autosave,
            Action::RenderNeeded,
        ]
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent, _modifiers: Modifiers) -> Vec<Action> {
        if self.is_free_view() || !event.is_single() {
            return Vec::new();
        }
        let Some(world) = geometry::pointer_to_world(event.position, &self.camera) else {
            return Vec::new();
        };

        match &mut self.input {
            InputState::PlacementPending { template, ghost, ghost_position } => {
                let at = clamp_template(template, world, &self.room);
                *ghost_position = Some(at);
                let transform = ghost_transform(template, at);
                let ghost = *ghost;
                self.renderer.set_visual_transform(ghost, transform);
                vec![Action::RenderNeeded]
            }
            InputState::Dragging { id, offset_x, offset_z } => {
                let (id, offset_x, offset_z) = (*id, *offset_x, *offset_z);
                let Some(item) = self.items.get(id) else {
                    self.input = InputState::Idle;
                    return Vec::new();
                };
                let target = WorldPoint::new(world.x - offset_x, world.z - offset_z);
                let at = geometry::clamp_footprint(target, item.width, item.depth, item.rotation, &self.room);
                self.items.update_item_position(id, at.x, at.z, &mut self.renderer);
                vec![Action::ItemUpdated(id), Action::RenderNeeded]
            }
            InputState::Idle => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, _event: PointerEvent, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.is_free_view() {
            return Vec::new();
        }
        self.end_drag()
    }

    fn end_drag(&mut self) -> Vec<Action> {
        let Some(id) = self.input.dragging() else {
            return Vec::new();
        };
        self.input = InputState::Idle;
        debug!(%id, "drag ended");
        vec![Action::SetCursor(CursorStyle::Default), Action::Autosave]
    }

    /// Secondary click: rotate the pending ghost, or the item under the
    /// pointer (`Shift` turns it the other way).
    pub fn on_context_menu(&mut self, event: PointerEvent, modifiers: Modifiers) -> Vec<Action> {
        if self.is_free_view() {
            return Vec::new();
        }
        if self.input.is_placing() {
            return self.rotate_pending_ghost();
        }
        match self.renderer.pick_visual(event.position, &self.camera) {
            Some(id) => self.rotate_item(id, if modifiers.shift { -1 } else { 1 }),
            None => Vec::new(),
        }
    }

    // --- Keyboard ---

    /// `Escape` cancels placement, `R` rotates (`Shift` reverses), and
    /// `Delete`/`Backspace` removes the selected item.
    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.is_free_view() {
            return Vec::new();
        }
        if key.is_cancel() {
            return self.cancel_placement();
        }
        if key.is_rotate() {
            if self.input.is_placing() {
                return self.rotate_pending_ghost();
            }
            let steps = if modifiers.shift { -1 } else { 1 };
            return match self.ui.selected_id {
                Some(id) => self.rotate_item(id, steps),
                None => Vec::new(),
            };
        }
        if key.is_delete() {
            if let Some(id) = self.ui.selected_id {
                return self.remove_item(id);
            }
        }
        Vec::new()
    }

    // --- Item commands ---

    /// Turn an item a quarter turn clockwise and pull it back inside the room.
    pub fn rotate_item_by_id(&mut self, id: ItemId) -> Vec<Action> {
        self.rotate_item(id, 1)
    }

    fn rotate_item(&mut self, id: ItemId, steps: i32) -> Vec<Action> {
        let Some(item) = self.items.get(id) else {
            return Vec::new();
        };
        let rotation = geometry::turn(item.rotation, steps);
        let at = geometry::clamp_footprint(item.position(), item.width, item.depth, rotation, &self.room);
        self.items.update_item_rotation(id, rotation, &mut self.renderer);
        self.items.update_item_position(id, at.x, at.z, &mut self.renderer);
        self.ui.selected_id = Some(id);
        debug!(%id, rotation, x = at.x, z = at.z, "item rotated");
        vec![Action::ItemUpdated(id), Action::Autosave, Action::RenderNeeded]
    }

    /// Delete an item. Ends a drag or selection that refers to it.
    pub fn remove_item(&mut self, id: ItemId) -> Vec<Action> {
        if self.items.remove_item(id, &mut self.renderer).is_none() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        if self.input.dragging() == Some(id) {
            self.input = InputState::Idle;
            actions.push(Action::SetCursor(CursorStyle::Default));
        }
        if self.ui.selected_id == Some(id) {
            self.ui.selected_id = None;
        }
        actions.extend([Action::ItemRemoved(id), Action::RefreshItemList, Action::Autosave, Action::RenderNeeded]);
        actions
    }

    /// Replace an item's attributes and re-clamp it under its new footprint.
    ///
    /// # Errors
    ///
    /// Returns [`ItemError`] when `settings` fail validation. Nothing changes
    /// in that case.
    pub fn update_item_settings(&mut self, id: ItemId, settings: &ItemSettings) -> Result<Vec<Action>, ItemError> {
        settings.validate()?;
        if self.items.get(id).is_none() {
            return Ok(Vec::new());
        }
        let mut actions = self.cancel_placement();
        self.items.update_item_settings(id, settings, &mut self.renderer);
        if let Some(item) = self.items.get(id) {
            let at = geometry::clamp_footprint(item.position(), item.width, item.depth, item.rotation, &self.room);
            self.items.update_item_position(id, at.x, at.z, &mut self.renderer);
        }
        actions.extend([Action::ItemUpdated(id), Action::RefreshItemList, Action::Autosave, Action::RenderNeeded]);
        Ok(actions)
    }

    // --- Room / project ---

    /// Replace the room and refit the camera. Items that no longer fit are
    /// pulled back inside the new walls.
    ///
    /// # Errors
    ///
    /// Returns [`RoomError`] for a non-positive or non-finite dimension.
    pub fn apply_room(&mut self, room: RoomConfig) -> Result<Vec<Action>, RoomError> {
        room.validate()?;
        self.room = room;
        self.rebuild_camera();
        let mut actions = vec![Action::RoomChanged];
        for id in self.items.ids() {
            let Some(item) = self.items.get(id) else {
                continue;
            };
            let at = geometry::clamp_footprint(item.position(), item.width, item.depth, item.rotation, &self.room);
            if at != item.position() {
                self.items.update_item_position(id, at.x, at.z, &mut self.renderer);
                actions.push(Action::ItemUpdated(id));
            }
        }
        debug!(width = room.width, depth = room.depth, height = room.height, "room applied");
        actions.extend([Action::Autosave, Action::RenderNeeded]);
        Ok(actions)
    }

    /// Replace the whole layout with `project`.
    ///
    /// The project is validated before anything changes. On success every
    /// item is removed, the room is replaced, and the project's items are
    /// re-added in order with fresh ids, snapped to a quarter turn and kept
    /// inside the new room.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError`] when the project fails validation. The
    /// current layout is left untouched in that case.
    pub fn restore_project(&mut self, project: &Project) -> Result<Vec<Action>, ProjectError> {
        project.validate()?;

        let mut actions = self.cancel_placement();
        if self.input.dragging().is_some() {
            self.input = InputState::Idle;
            actions.push(Action::SetCursor(CursorStyle::Default));
        }
        self.ui.selected_id = None;
        self.items.clear(&mut self.renderer);

        self.room = project.room;
        self.rebuild_camera();
        for record in &project.items {
            let config = settle(record.to_config(), &self.room);
            self.items.add_item(&config, &mut self.renderer);
        }
        info!(items = self.items.len(), width = self.room.width, depth = self.room.depth, "project restored");
        actions.extend([Action::RoomChanged, Action::RefreshItemList, Action::RenderNeeded]);
        Ok(actions)
    }

    /// Snapshot the current layout.
    #[must_use]
    pub fn project(&self) -> Project {
        Project::snapshot(&self.room, &self.items)
    }

    // --- Queries ---

    /// The currently selected item, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.ui.view_mode
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    #[must_use]
    pub fn summaries(&self) -> Vec<ItemSummary> {
        self.items.summaries()
    }
}

/// Clamp a pointer position for a template at its current rotation.
fn clamp_template(template: &ItemConfig, world: WorldPoint, room: &RoomConfig) -> WorldPoint {
    geometry::clamp_footprint(world, template.width, template.depth, template.rotation.unwrap_or(0.0), room)
}

/// Snap a stored template's rotation and clamp its position into `room`.
fn settle(config: ItemConfig, room: &RoomConfig) -> ItemConfig {
    let rotation = geometry::normalize_angle(geometry::snap_angle(config.rotation.unwrap_or(0.0)));
    let stored = WorldPoint::new(config.x.unwrap_or(0.0), config.z.unwrap_or(0.0));
    let at = geometry::clamp_footprint(stored, config.width, config.depth, rotation, room);
    config.with_rotation(rotation).at(at.x, at.z)
}

fn ghost_transform(template: &ItemConfig, at: WorldPoint) -> Transform {
    let floor = template.floor_height.unwrap_or(0.0);
    Transform::new(at.x, floor + template.height / 2.0, at.z, template.rotation.unwrap_or(0.0))
}
