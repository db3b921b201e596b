//! Grid placement for batches of newly added photos.
//!
//! Used by the editor when photos are picked onto an open wall and by the
//! server when a wall is created pre-populated with photos, so both produce
//! identical layouts.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::camera::Point;
use crate::consts::{DEFAULT_ASPECT_RATIO, DEFAULT_ITEM_WIDTH, GRID_GAP};
use crate::doc::Rect;

/// Number of grid columns for `count` items: `ceil(sqrt(count))`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn grid_columns(count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let root = (count as f64).sqrt().ceil() as usize;
    // Guard against sqrt rounding just below a perfect square.
    if root * root < count { root + 1 } else { root }
}

/// Top-left positions for `count` default-sized items laid out row-major.
///
/// With no `existing` content the grid is centered in the wall bounds
/// (clamped so it never starts left of or above the origin). Otherwise it
/// starts one gap to the right of the existing content, top-aligned with it.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_positions(count: usize, existing: Option<Rect>, wall_width: f64, wall_height: f64) -> Vec<Point> {
    let columns = grid_columns(count);
    if columns == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(columns);

    let cell_w = DEFAULT_ITEM_WIDTH;
    let cell_h = DEFAULT_ITEM_WIDTH * DEFAULT_ASPECT_RATIO;
    let grid_w = columns as f64 * cell_w + (columns - 1) as f64 * GRID_GAP;
    let grid_h = rows as f64 * cell_h + (rows - 1) as f64 * GRID_GAP;

    let origin = match existing {
        Some(bounds) => Point::new(bounds.right() + GRID_GAP, bounds.y),
        None => Point::new(((wall_width - grid_w) / 2.0).max(0.0), ((wall_height - grid_h) / 2.0).max(0.0)),
    };

    (0..count)
        .map(|i| {
            let col = i % columns;
            let row = i / columns;
            Point::new(
                origin.x + col as f64 * (cell_w + GRID_GAP),
                origin.y + row as f64 * (cell_h + GRID_GAP),
            )
        })
        .collect()
}
