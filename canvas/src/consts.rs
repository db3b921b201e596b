//! Shared numeric constants for the canvas crate.

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width an item may have, in canvas units.
pub const MIN_ITEM_WIDTH: f64 = 60.0;

/// Width given to newly placed items, in canvas units.
pub const DEFAULT_ITEM_WIDTH: f64 = 300.0;

/// Height/width ratio assumed until a photo's image has loaded.
pub const DEFAULT_ASPECT_RATIO: f64 = 0.75;

/// Spacing between grid cells when placing a batch of photos.
pub const GRID_GAP: f64 = 40.0;

/// Default wall dimensions in canvas units.
pub const DEFAULT_WALL_WIDTH: f64 = 3000.0;
pub const DEFAULT_WALL_HEIGHT: f64 = 2000.0;

/// Default wall background color.
pub const DEFAULT_BACKGROUND: &str = "#f5f5f4";

// ── Viewport ────────────────────────────────────────────────────

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom applied when a wall is opened or the view is reset.
pub const DEFAULT_ZOOM: f64 = 0.5;

/// Zoom increment for the toolbar buttons.
pub const ZOOM_STEP: f64 = 0.1;

/// Zoom change per pixel of vertical wheel delta.
pub const WHEEL_ZOOM_SPEED: f64 = 0.001;

/// Smallest zoom change a wheel event produces. Zoom is rounded to two
/// decimals, so anything finer would be lost.
pub const MIN_WHEEL_ZOOM_STEP: f64 = 0.01;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space hit slop in pixels around a resize handle center.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Drawn size of a resize handle square, in screen pixels.
pub const HANDLE_SIZE_PX: f64 = 10.0;
