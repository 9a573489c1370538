//! Editor host: routes engine actions to persistence and UI collaborators.
//!
//! [`Editor`] forwards input to its [`EngineCore`] and performs the returned
//! [`Action`]s. Persistence is best-effort. A failed save is logged and the
//! session carries on.

#[cfg(test)]
#[path = "editor_test.rs"]
mod editor_test;

use tracing::{info, warn};

use crate::camera::Viewport;
use crate::engine::{Action, EngineCore};
use crate::input::{Button, CursorStyle, Key, Modifiers, PointerEvent, ViewMode};
use crate::item::{ItemConfig, ItemError, ItemId, ItemSettings, ItemSummary};
use crate::project::{Project, ProjectError};
use crate::render::Renderer;
use crate::room::{RoomConfig, RoomError};

/// Error raised by a persistence backend.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("project data: {0}")]
    Project(#[from] ProjectError),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Where autosaved projects go.
pub trait Persistence {
    /// Store `project` as the current layout.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when the backend cannot write.
    fn autosave(&mut self, project: &Project) -> Result<(), PersistError>;

    /// The last saved project text, or `None` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when the backend cannot read.
    fn load(&mut self) -> Result<Option<String>, PersistError>;
}

/// The parts of the page around the view.
pub trait Ui {
    fn refresh_item_list(&mut self, items: &[ItemSummary]);
    fn show_placement_hint(&mut self);
    fn hide_placement_hint(&mut self);
    fn set_cursor_style(&mut self, style: CursorStyle);
}

/// An engine wired to its collaborators.
pub struct Editor<R: Renderer, P: Persistence, U: Ui> {
    pub core: EngineCore<R>,
    pub persistence: P,
    pub ui: U,
}

impl<R: Renderer, P: Persistence, U: Ui> Editor<R, P, U> {
    #[must_use]
    pub fn new(core: EngineCore<R>, persistence: P, ui: U) -> Self {
        Self { core, persistence, ui }
    }

    /// Perform `actions` in order.
    pub fn dispatch(&mut self, actions: &[Action]) {
        for action in actions {
            match *action {
                Action::Autosave => self.autosave_now(),
                Action::RefreshItemList => {
                    let summaries = self.core.summaries();
                    self.ui.refresh_item_list(&summaries);
                }
                Action::ShowPlacementHint => self.ui.show_placement_hint(),
                Action::HidePlacementHint => self.ui.hide_placement_hint(),
                Action::SetCursor(style) => self.ui.set_cursor_style(style),
                Action::ItemCreated(_)
                | Action::ItemUpdated(_)
                | Action::ItemRemoved(_)
                | Action::RoomChanged
                | Action::RenderNeeded => {}
            }
        }
    }

    fn run(&mut self, actions: Vec<Action>) -> Vec<Action> {
        self.dispatch(&actions);
        actions
    }

    /// Save the current layout now. Failures are logged, not returned.
    pub fn autosave_now(&mut self) {
        let project = self.core.project();
        if let Err(e) = self.persistence.autosave(&project) {
            warn!(error = %e, "autosave failed");
        }
    }

    /// Restore the last saved layout. `Ok(false)` when nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] when the backend cannot read or the saved text
    /// is not a valid project. The current layout is kept in that case.
    pub fn load_saved(&mut self) -> Result<bool, PersistError> {
        let Some(text) = self.persistence.load()? else {
            return Ok(false);
        };
        self.import_json(&text)?;
        Ok(true)
    }

    /// Lenient [`Editor::load_saved`]: failures are logged and reported as
    /// nothing restored.
    pub fn restore_saved(&mut self) -> bool {
        match self.load_saved() {
            Ok(restored) => restored,
            Err(e) => {
                warn!(error = %e, "saved project could not be restored");
                false
            }
        }
    }

    /// The current layout as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Json`] if serialization fails.
    pub fn export_json(&self) -> Result<String, ProjectError> {
        self.core.project().to_json_pretty()
    }

    /// Replace the layout with project text. Nothing changes on error.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError`] for malformed or invalid project text.
    pub fn import_json(&mut self, text: &str) -> Result<(), ProjectError> {
        let project = Project::from_json(text)?;
        let actions = self.core.restore_project(&project)?;
        info!(items = project.items.len(), "project imported");
        self.dispatch(&actions);
        Ok(())
    }

    // --- Forwarded input ---

    pub fn on_pointer_down(&mut self, event: PointerEvent, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_pointer_down(event, button, modifiers);
        self.run(actions)
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_pointer_move(event, modifiers);
        self.run(actions)
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_pointer_up(event, button, modifiers);
        self.run(actions)
    }

    pub fn on_context_menu(&mut self, event: PointerEvent, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_context_menu(event, modifiers);
        self.run(actions)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        let actions = self.core.on_key_down(key, modifiers);
        self.run(actions)
    }

    // --- Forwarded commands ---

    /// # Errors
    ///
    /// See [`EngineCore::start_placement`].
    pub fn start_placement(&mut self, template: &ItemConfig) -> Result<Vec<Action>, ItemError> {
        let actions = self.core.start_placement(template)?;
        Ok(self.run(actions))
    }

    pub fn cancel_placement(&mut self) -> Vec<Action> {
        let actions = self.core.cancel_placement();
        self.run(actions)
    }

    pub fn rotate_pending_ghost(&mut self) -> Vec<Action> {
        let actions = self.core.rotate_pending_ghost();
        self.run(actions)
    }

    pub fn rotate_item_by_id(&mut self, id: ItemId) -> Vec<Action> {
        let actions = self.core.rotate_item_by_id(id);
        self.run(actions)
    }

    pub fn remove_item(&mut self, id: ItemId) -> Vec<Action> {
        let actions = self.core.remove_item(id);
        self.run(actions)
    }

    /// # Errors
    ///
    /// See [`EngineCore::update_item_settings`].
    pub fn update_item_settings(&mut self, id: ItemId, settings: &ItemSettings) -> Result<Vec<Action>, ItemError> {
        let actions = self.core.update_item_settings(id, settings)?;
        Ok(self.run(actions))
    }

    /// # Errors
    ///
    /// See [`EngineCore::apply_room`].
    pub fn apply_room(&mut self, room: RoomConfig) -> Result<Vec<Action>, RoomError> {
        let actions = self.core.apply_room(room)?;
        Ok(self.run(actions))
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Action> {
        let actions = self.core.set_viewport(viewport);
        self.run(actions)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Vec<Action> {
        let actions = self.core.set_view_mode(mode);
        self.run(actions)
    }
}
