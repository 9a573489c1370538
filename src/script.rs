//! Scripted event replay.
//!
//! A script is JSON lines, one tagged event per line:
//!
//! ```text
//! # place a desk against the right wall
//! {"event":"start_placement","name":"Desk","width":1.2,"depth":0.6,"height":0.75,"color":12615744}
//! {"event":"pointer_down","x":790,"y":300}
//! {"event":"key_down","key":"r"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Pointer coordinates
//! are element-local pixels in the configured viewport.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use planner::camera::Viewport;
use planner::editor::{Editor, Persistence, Ui};
use planner::engine::Action;
use planner::input::{Button, Key, Modifiers, PointerEvent, ViewMode};
use planner::item::{ItemConfig, ItemError, ItemId, ItemSettings};
use planner::render::Renderer;
use planner::room::{RoomConfig, RoomError};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Room(#[from] RoomError),
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: malformed event: {source}")]
    Parse { line: usize, source: serde_json::Error },
    #[error("line {line}: rejected: {source}")]
    Rejected { line: usize, source: CommandError },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ScriptButton> for Button {
    fn from(button: ScriptButton) -> Self {
        match button {
            ScriptButton::Primary => Self::Primary,
            ScriptButton::Middle => Self::Middle,
            ScriptButton::Secondary => Self::Secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptViewMode {
    Plan,
    Free,
}

impl From<ScriptViewMode> for ViewMode {
    fn from(mode: ScriptViewMode) -> Self {
        match mode {
            ScriptViewMode::Plan => Self::Plan,
            ScriptViewMode::Free => Self::Free,
        }
    }
}

fn pointer(x: f64, y: f64, touches: Option<u32>) -> PointerEvent {
    match touches {
        Some(touches) => PointerEvent::touch(x, y, touches),
        None => PointerEvent::mouse(x, y),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    PointerDown {
        x: f64,
        y: f64,
        #[serde(default)]
        touches: Option<u32>,
        #[serde(default)]
        button: ScriptButton,
    },
    PointerMove {
        x: f64,
        y: f64,
        #[serde(default)]
        touches: Option<u32>,
    },
    PointerUp {
        x: f64,
        y: f64,
        #[serde(default)]
        touches: Option<u32>,
    },
    ContextMenu {
        x: f64,
        y: f64,
        #[serde(default)]
        shift: bool,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        shift: bool,
    },
    StartPlacement(ItemConfig),
    CancelPlacement,
    RotateGhost,
    SetViewMode {
        mode: ScriptViewMode,
    },
    SetViewport {
        width: f64,
        height: f64,
    },
    ApplyRoom(RoomConfig),
    RemoveItem {
        id: ItemId,
    },
    RotateItem {
        id: ItemId,
    },
    UpdateItem {
        id: ItemId,
        settings: ItemSettings,
    },
}

/// Parse one script line. `Ok(None)` for blank and comment lines.
///
/// # Errors
///
/// Returns the JSON error for anything else that is not a known event.
pub fn parse_line(line: &str) -> Result<Option<ScriptEvent>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    serde_json::from_str(trimmed).map(Some)
}

/// Feed one event to the editor.
///
/// # Errors
///
/// Returns [`CommandError`] when the editor rejects a command's payload.
pub fn apply<R, P, U>(editor: &mut Editor<R, P, U>, event: ScriptEvent) -> Result<Vec<Action>, CommandError>
where
    R: Renderer,
    P: Persistence,
    U: Ui,
{
    let none = Modifiers::default();
    let actions = match event {
        ScriptEvent::PointerDown { x, y, touches, button } => {
            editor.on_pointer_down(pointer(x, y, touches), button.into(), none)
        }
        ScriptEvent::PointerMove { x, y, touches } => editor.on_pointer_move(pointer(x, y, touches), none),
        ScriptEvent::PointerUp { x, y, touches } => editor.on_pointer_up(pointer(x, y, touches), Button::Primary, none),
        ScriptEvent::ContextMenu { x, y, shift } => editor.on_context_menu(PointerEvent::mouse(x, y), Modifiers { shift }),
        ScriptEvent::KeyDown { key, shift } => editor.on_key_down(&Key::new(key), Modifiers { shift }),
        ScriptEvent::StartPlacement(template) => editor.start_placement(&template)?,
        ScriptEvent::CancelPlacement => editor.cancel_placement(),
        ScriptEvent::RotateGhost => editor.rotate_pending_ghost(),
        ScriptEvent::SetViewMode { mode } => editor.set_view_mode(mode.into()),
        ScriptEvent::SetViewport { width, height } => editor.set_viewport(Viewport::new(width, height)),
        ScriptEvent::ApplyRoom(room) => editor.apply_room(room)?,
        ScriptEvent::RemoveItem { id } => editor.remove_item(id),
        ScriptEvent::RotateItem { id } => editor.rotate_item_by_id(id),
        ScriptEvent::UpdateItem { id, settings } => editor.update_item_settings(id, &settings)?,
    };
    Ok(actions)
}

/// Replay every event in `text`. Stops at the first bad line.
///
/// # Errors
///
/// Returns [`ScriptError`] with the 1-based line number of the first line
/// that fails to parse or is rejected.
pub fn replay<R, P, U>(editor: &mut Editor<R, P, U>, text: &str) -> Result<usize, ScriptError>
where
    R: Renderer,
    P: Persistence,
    U: Ui,
{
    let mut applied = 0;
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let Some(event) = parse_line(raw).map_err(|source| ScriptError::Parse { line, source })? else {
            continue;
        };
        let actions = apply(editor, event).map_err(|source| ScriptError::Rejected { line, source })?;
        debug!(line, actions = actions.len(), "event replayed");
        applied += 1;
    }
    Ok(applied)
}
