//! Shared numeric constants for the planner crate.

// ── Rotation ────────────────────────────────────────────────────

/// π / 2 (90°). Items only ever turn in steps of this size.
pub const SNAP_RAD: f64 = std::f64::consts::FRAC_PI_2;

// ── Room ────────────────────────────────────────────────────────

/// Default room width in meters.
pub const DEFAULT_ROOM_WIDTH: f64 = 4.2;

/// Default room depth in meters.
pub const DEFAULT_ROOM_DEPTH: f64 = 2.32;

/// Default room height in meters.
pub const DEFAULT_ROOM_HEIGHT: f64 = 2.5;

// ── Cameras ─────────────────────────────────────────────────────

/// Margin in meters kept around the room by the plan camera frustum.
pub const PLAN_VIEW_PADDING: f64 = 0.6;

/// Height of the plan camera above the floor.
pub const PLAN_CAMERA_HEIGHT: f64 = 50.0;

pub const PLAN_CAMERA_NEAR: f64 = 0.1;
pub const PLAN_CAMERA_FAR: f64 = 200.0;

/// Vertical field of view of the free-view camera, in degrees.
pub const FREE_CAMERA_FOV_DEG: f64 = 50.0;
pub const FREE_CAMERA_NEAR: f64 = 0.1;
pub const FREE_CAMERA_FAR: f64 = 1000.0;

/// Rays with a vertical component below this are treated as parallel to the floor.
pub const PARALLEL_EPSILON: f64 = 1e-9;

// ── Visuals ─────────────────────────────────────────────────────

/// Height of an item label above the item's top face.
pub const LABEL_OFFSET: f64 = 0.25;

/// Widest a label may get, in meters.
pub const LABEL_MAX_WIDTH: f64 = 0.9;

/// Label width as a fraction of the smaller footprint side.
pub const LABEL_FOOTPRINT_RATIO: f64 = 0.9;

/// Label texture aspect ratio (width : height).
pub const LABEL_ASPECT: f64 = 4.0;

/// Labels longer than this many characters get truncated.
pub const LABEL_MAX_CHARS: usize = 14;

/// Neutral fill forced onto blocked zones.
pub const BLOCKED_COLOR: u32 = 0x00B0_B0B0;

/// Edge color for blocked zones.
pub const BLOCKED_EDGE_COLOR: u32 = 0x0088_8888;

/// Ghost fill used when placing a blocked zone.
pub const GHOST_BLOCKED_COLOR: u32 = 0x00AA_AAAA;

/// Material opacity of the placement ghost.
pub const GHOST_OPACITY: f64 = 0.45;

/// Factor applied to each channel of the fill to get the edge color.
pub const EDGE_DARKEN_FACTOR: f64 = 0.6;

/// Opacity percentage given to new blocked zones when none was chosen.
pub const BLOCKED_DEFAULT_OPACITY: u8 = 50;

// ── Project format ──────────────────────────────────────────────

/// The only project format version this crate reads and writes.
pub const PROJECT_VERSION: u32 = 1;
