//! Document model: walls, wall items, resolved photos, and the in-memory store.
//!
//! This module defines the data types that describe what is placed on a wall
//! (`WallItem`), the wall itself (`Wall`), a sparse-update type for persisting
//! gesture results (`PartialWallItem`), and the runtime store that owns all
//! live items of the open wall (`WallDoc`).
//!
//! Item height is never stored. It is derived from width and the photo's
//! aspect ratio (see [`crate::aspect`]), so the geometry operations here take
//! the ratio as input instead of reading a height field.
//!
//! Data flows into this layer from the network (JSON deserialization) and from
//! the input engine (mutations). Renderers read from `WallDoc` via
//! `sorted_items` to determine paint order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aspect::AspectRatios;
use crate::camera::Point;
use crate::consts::{DEFAULT_ITEM_WIDTH, MIN_ITEM_WIDTH};
use crate::hit::Handle;
use crate::layout;

/// Unique identifier for a wall.
pub type WallId = Uuid;
/// Unique identifier for a wall item.
pub type ItemId = Uuid;
/// Identifier of a photo record owned outside the wall.
pub type PhotoId = Uuid;

/// Photos resolved for rendering, keyed by id.
pub type PhotoSet = HashMap<PhotoId, PhotoRef>;

/// A named, fixed-size canvas belonging to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: WallId,
    pub name: String,
    pub owner_id: Uuid,
    /// Canvas width in canvas units.
    pub width: f64,
    /// Canvas height in canvas units.
    pub height: f64,
    /// CSS color painted behind the items.
    pub background_color: String,
    /// Present when the wall is publicly readable.
    pub share_token: Option<String>,
    /// Milliseconds since Unix epoch.
    pub created_at: i64,
    /// Milliseconds since Unix epoch.
    pub updated_at: i64,
}

impl Wall {
    /// Whether anyone holding the share token may view this wall.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.share_token.is_some()
    }
}

/// A photo record resolved into a renderable image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    pub id: PhotoId,
    pub image_url: String,
    pub display_name: String,
}

/// One placed photo on a wall, as stored and on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallItem {
    pub id: ItemId,
    pub wall_id: WallId,
    /// Weak reference; the photo may disappear, leaving the item unrenderable.
    pub photo_id: PhotoId,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    /// Authoritative width. Height follows from the photo's aspect ratio.
    pub width: f64,
    /// Paint and hit-test priority; higher wins.
    pub z_index: i64,
}

impl WallItem {
    /// Position and width, the persisted part of an item's box.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry { x: self.x, y: self.y, width: self.width }
    }

    /// Derived height for the given aspect ratio.
    #[must_use]
    pub fn height(&self, aspect: f64) -> f64 {
        self.width * aspect
    }

    /// Full bounding box for the given aspect ratio.
    #[must_use]
    pub fn rect(&self, aspect: f64) -> Rect {
        self.geometry().rect(aspect)
    }
}

/// Sparse update for a wall item. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialWallItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl PartialWallItem {
    /// True when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.width.is_none() && self.z_index.is_none()
    }
}

/// Everything the read-only viewer needs, as served for a share token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedWall {
    pub wall: Wall,
    /// Ascending z.
    pub items: Vec<WallItem>,
    pub photos: Vec<PhotoRef>,
}

/// Top-left position plus width of an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Geometry {
    #[must_use]
    pub fn rect(self, aspect: f64) -> Rect {
        Rect { x: self.x, y: self.y, width: self.width, height: self.width * aspect }
    }
}

/// Axis-aligned rectangle in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.right() && pt.y >= self.y && pt.y <= self.bottom()
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect { x, y, width: self.right().max(other.right()) - x, height: self.bottom().max(other.bottom()) - y }
    }
}

/// Resize a box from one corner handle.
///
/// `growth` is the requested width change (positive grows). The width is
/// floored at [`MIN_ITEM_WIDTH`]; the growth actually applied moves the left
/// edge for left handles and the top edge (scaled by `aspect`) for top
/// handles, so the corner diagonally opposite `handle` stays put.
#[must_use]
pub fn resized(orig: Geometry, handle: Handle, growth: f64, aspect: f64) -> Geometry {
    if !growth.is_finite() {
        return orig;
    }
    let width = (orig.width + growth).max(MIN_ITEM_WIDTH);
    let applied = width - orig.width;
    let x = if handle.is_left() { orig.x - applied } else { orig.x };
    let y = if handle.is_top() { orig.y - applied * aspect } else { orig.y };
    Geometry { x, y, width }
}

/// In-memory store of the items on the open wall.
///
/// Tracks the highest z-order handed out so that every bump is strictly
/// greater than anything seen before, even after items are removed.
pub struct WallDoc {
    items: HashMap<ItemId, WallItem>,
    max_z: i64,
}

impl WallDoc {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { items: HashMap::new(), max_z: 0 }
    }

    /// Insert or replace an item.
    pub fn insert(&mut self, item: WallItem) {
        self.max_z = self.max_z.max(item.z_index);
        self.items.insert(item.id, item);
    }

    /// Remove an item by id, returning it if it was present. The photo it
    /// references is untouched.
    pub fn remove_item(&mut self, id: &ItemId) -> Option<WallItem> {
        self.items.remove(id)
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&WallItem> {
        self.items.get(id)
    }

    /// Replace all items with a full snapshot and reseed the z counter.
    pub fn load_snapshot(&mut self, items: Vec<WallItem>) {
        self.items.clear();
        self.max_z = 0;
        for item in items {
            self.insert(item);
        }
    }

    /// Highest z-order handed out or loaded so far.
    #[must_use]
    pub fn max_z(&self) -> i64 {
        self.max_z
    }

    fn next_z(&mut self) -> i64 {
        self.max_z += 1;
        self.max_z
    }

    /// Give an item a new maximum z-order. Returns the new value, or `None`
    /// when the id is unknown.
    pub fn bring_to_front(&mut self, id: &ItemId) -> Option<i64> {
        if !self.items.contains_key(id) {
            return None;
        }
        let z = self.next_z();
        let item = self.items.get_mut(id)?;
        item.z_index = z;
        Some(z)
    }

    /// Place `photo_ids` as new items in a grid.
    ///
    /// An empty wall gets the grid centered in its bounds; otherwise the grid
    /// starts to the right of the existing content. Each item receives the
    /// default width and a fresh z-order in input order.
    pub fn add_items(
        &mut self,
        wall_id: WallId,
        photo_ids: &[PhotoId],
        wall_width: f64,
        wall_height: f64,
        aspects: &AspectRatios,
    ) -> Vec<WallItem> {
        let existing = self.content_bounds(aspects);
        let positions = layout::grid_positions(photo_ids.len(), existing, wall_width, wall_height);
        let mut created = Vec::with_capacity(photo_ids.len());
        for (photo_id, pos) in photo_ids.iter().zip(positions) {
            let item = WallItem {
                id: Uuid::new_v4(),
                wall_id,
                photo_id: *photo_id,
                x: pos.x,
                y: pos.y,
                width: DEFAULT_ITEM_WIDTH,
                z_index: self.next_z(),
            };
            self.items.insert(item.id, item.clone());
            created.push(item);
        }
        created
    }

    /// Translate an item and make it the topmost. Width is untouched, and an
    /// item already above everything else keeps its z-order.
    pub fn move_item(&mut self, id: &ItemId, dx: f64, dy: f64) -> Option<&WallItem> {
        if !self.is_frontmost(id) {
            self.bring_to_front(id)?;
        }
        let item = self.items.get_mut(id)?;
        item.x += dx;
        item.y += dy;
        Some(item)
    }

    /// Resize an item from `handle` by `growth` canvas units of width.
    pub fn resize_item(&mut self, id: &ItemId, handle: Handle, growth: f64, aspects: &AspectRatios) -> Option<&WallItem> {
        let item = self.items.get_mut(id)?;
        let next = resized(item.geometry(), handle, growth, aspects.ratio(&item.photo_id));
        item.x = next.x;
        item.y = next.y;
        item.width = next.width;
        Some(item)
    }

    fn is_frontmost(&self, id: &ItemId) -> bool {
        let Some(item) = self.items.get(id) else {
            return false;
        };
        item.z_index == self.max_z && self.items.values().all(|other| other.id == item.id || other.z_index < item.z_index)
    }

    /// Return all items sorted by `(z_index, id)` for paint order.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<&WallItem> {
        let mut items: Vec<&WallItem> = self.items.values().collect();
        items.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// Bounding box of every item, or `None` when the wall is empty.
    #[must_use]
    pub fn content_bounds(&self, aspects: &AspectRatios) -> Option<Rect> {
        self.items
            .values()
            .map(|item| item.rect(aspects.ratio(&item.photo_id)))
            .reduce(|acc, r| acc.union(&r))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for WallDoc {
    fn default() -> Self {
        Self::new()
    }
}
