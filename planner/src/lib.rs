//! Placement and manipulation engine for the room planner.
//!
//! This crate owns everything between raw pointer input and the item layout:
//! projecting screen points onto the floor, clamping rotated footprints to
//! the room, tracking items and their visuals, and the interaction state
//! machine for placing, dragging, and rotating. Drawing, page widgets, and
//! storage stay outside behind the [`render::Renderer`],
//! [`editor::Ui`], and [`editor::Persistence`] traits. Handlers return
//! [`engine::Action`]s; [`editor::Editor`] turns them into collaborator calls.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Interaction state machine, [`engine::EngineCore`] |
//! | [`editor`] | Persistence and UI traits, action dispatch |
//! | [`item`] | Item types and the item registry |
//! | [`project`] | Versioned project format, validation |
//! | [`room`] | Room dimensions |
//! | [`camera`] | Plan and free cameras, screen to world rays |
//! | [`geometry`] | Floor projection, footprint clamping, angle snapping |
//! | [`hit`] | Ray picking against item volumes |
//! | [`input`] | Pointer, key, and session state types |
//! | [`render`] | Rendering contract and the headless renderer |
//! | [`consts`] | Shared numeric constants (snap step, defaults, colors) |

pub mod camera;
pub mod consts;
pub mod editor;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod item;
pub mod project;
pub mod render;
pub mod room;
