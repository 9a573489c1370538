use std::f64::consts::FRAC_PI_2;

use planner::item::{Color, ItemConfig};
use planner::render::HeadlessRenderer;

use super::*;

fn core() -> EngineCore<HeadlessRenderer> {
    EngineCore::new(HeadlessRenderer::new())
}

#[test]
fn describe_empty_layout() {
    assert_eq!(describe(&core()), "room 4.2 × 2.32 × 2.5 m\nno items\n");
}

#[test]
fn describe_lists_items_in_order() {
    let mut core = core();
    let desk = ItemConfig::furniture("Desk", 1.2, 0.6, 0.75, Color(0x00C0_8040)).at(0.5, -0.25).with_rotation(FRAC_PI_2);
    core.items.add_item(&desk, &mut core.renderer);
    core.items.add_item(&ItemConfig::blocked_zone("Door", 0.9, 0.9, 2.0, 0), &mut core.renderer);

    let text = describe(&core);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "#1 item Desk 1.2×0.6 at (0.50, -0.25) 90° #c08040");
    assert_eq!(lines[2], "#2 blocked Door 0.9×0.9 at (0.00, 0.00) 0° #b0b0b0");
}

#[test]
fn log_ui_tracks_state() {
    let mut ui = LogUi::default();
    ui.show_placement_hint();
    ui.set_cursor_style(CursorStyle::Crosshair);
    assert!(ui.hint_visible);
    assert_eq!(ui.cursor, CursorStyle::Crosshair);

    ui.hide_placement_hint();
    ui.refresh_item_list(&[]);
    assert!(!ui.hint_visible);
    assert_eq!(ui.listed, 0);
}
