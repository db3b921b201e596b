#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::aspect::AspectRatios;
use crate::camera::{Camera, Point};
use crate::consts::HANDLE_RADIUS_PX;
use crate::doc::{ItemId, PhotoSet, Rect, WallDoc};

/// Corner resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
}

impl Handle {
    /// All handles in the order they are hit-tested and drawn.
    pub const ALL: [Handle; 4] = [Handle::Nw, Handle::Ne, Handle::Sw, Handle::Se];

    /// Handle sits on the left edge; dragging it moves `x`.
    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Self::Nw | Self::Sw)
    }

    /// Handle sits on the top edge; dragging it moves `y`.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::Nw | Self::Ne)
    }

    /// Width growth produced by a horizontal canvas-space pointer delta.
    /// Dragging a handle away from the box grows it.
    #[must_use]
    pub fn growth_from_dx(self, dx: f64) -> f64 {
        if self.is_left() { -dx } else { dx }
    }

    /// Position of this handle on `rect`.
    #[must_use]
    pub fn corner(self, rect: &Rect) -> Point {
        let x = if self.is_left() { rect.x } else { rect.right() };
        let y = if self.is_top() { rect.y } else { rect.bottom() };
        Point::new(x, y)
    }

    /// CSS cursor shown while hovering or dragging this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
        }
    }
}

/// Which part of an item was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(Handle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub item_id: ItemId,
    pub part: HitPart,
}

/// Test which item (if any) is under `canvas_pt`.
///
/// Handles of the selected item are checked first, with a slop of
/// [`HANDLE_RADIUS_PX`] screen pixels capped at a quarter of the item's
/// shorter side, so the middle of the item stays draggable. Bodies are then tested from the
/// highest z-order down. Items whose photo is not in `photos` are not drawn,
/// so they are not hittable either.
#[must_use]
pub fn hit_test(
    canvas_pt: Point,
    doc: &WallDoc,
    photos: &PhotoSet,
    aspects: &AspectRatios,
    camera: &Camera,
    selected_id: Option<ItemId>,
) -> Option<Hit> {
    if let Some(sel) = selected_id {
        if let Some(item) = doc.get(&sel).filter(|item| photos.contains_key(&item.photo_id)) {
            let rect = item.rect(aspects.ratio(&item.photo_id));
            let slop = camera.screen_dist_to_canvas(HANDLE_RADIUS_PX).min(rect.width.min(rect.height) / 4.0);
            for handle in Handle::ALL {
                let c = handle.corner(&rect);
                if (canvas_pt.x - c.x).abs() <= slop && (canvas_pt.y - c.y).abs() <= slop {
                    return Some(Hit { item_id: sel, part: HitPart::Handle(handle) });
                }
            }
        }
    }

    doc.sorted_items()
        .into_iter()
        .rev()
        .filter(|item| photos.contains_key(&item.photo_id))
        .find(|item| item.rect(aspects.ratio(&item.photo_id)).contains(canvas_pt))
        .map(|item| Hit { item_id: item.id, part: HitPart::Body })
}
