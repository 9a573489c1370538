//! Terminal stand-ins for the page around the view.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use planner::editor::Ui;
use planner::engine::EngineCore;
use planner::input::CursorStyle;
use planner::item::ItemSummary;
use planner::render::Renderer;
use tracing::{debug, info};

/// [`Ui`] that reports every notification through `tracing`.
#[derive(Debug, Default)]
pub struct LogUi {
    /// Number of rows in the last item list shown.
    pub listed: usize,
    pub hint_visible: bool,
    pub cursor: CursorStyle,
}

impl Ui for LogUi {
    fn refresh_item_list(&mut self, items: &[ItemSummary]) {
        self.listed = items.len();
        info!(count = items.len(), "item list refreshed");
        for item in items {
            debug!(id = %item.id, name = %item.name, dims = %item.dims_label(), blocked = item.is_blocked, "item");
        }
    }

    fn show_placement_hint(&mut self) {
        self.hint_visible = true;
        info!("click on the floor to place; right click or R rotates, Escape cancels");
    }

    fn hide_placement_hint(&mut self) {
        self.hint_visible = false;
        debug!("placement hint hidden");
    }

    fn set_cursor_style(&mut self, style: CursorStyle) {
        self.cursor = style;
        debug!(cursor = style.as_str(), "cursor changed");
    }
}

/// Human-readable layout listing printed by `roomplan show`.
#[must_use]
pub fn describe<R: Renderer>(core: &EngineCore<R>) -> String {
    let room = core.room;
    let mut out = format!("room {} × {} × {} m\n", room.width, room.depth, room.height);
    if core.items.is_empty() {
        out.push_str("no items\n");
        return out;
    }
    for item in core.items.iter() {
        let summary = ItemSummary::from(item);
        let kind = if item.is_blocked { "blocked" } else { "item" };
        out.push_str(&format!(
            "#{} {kind} {} {} at ({:.2}, {:.2}) {}° {}\n",
            item.id,
            summary.name,
            summary.dims_label(),
            item.x,
            item.z,
            item.rotation.to_degrees().round(),
            summary.color.to_hex(),
        ));
    }
    out
}
