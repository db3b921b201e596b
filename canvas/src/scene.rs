//! Scene passes: the renderer-independent list of what to paint.
//!
//! Both the editor and the read-only viewer build a [`ScenePass`] from their
//! document and hand it to [`crate::render`]. Items whose photo did not
//! resolve are left out of the pass entirely, so a missing photo never
//! breaks the rest of the wall.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::aspect::AspectRatios;
use crate::camera::{Camera, Point};
use crate::consts::{DEFAULT_BACKGROUND, DEFAULT_WALL_HEIGHT, DEFAULT_WALL_WIDTH};
use crate::doc::{ItemId, PhotoId, PhotoSet, Rect, Wall, WallDoc};
use crate::hit::Handle;

/// One paintable item with its derived box.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub item_id: ItemId,
    pub photo_id: PhotoId,
    pub image_url: String,
    pub display_name: String,
    pub rect: Rect,
    pub z_index: i64,
}

/// Outline and corner handles for the selected item.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionBox {
    pub item_id: ItemId,
    pub rect: Rect,
    pub handles: [(Handle, Point); 4],
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePass {
    pub camera: Camera,
    pub wall_width: f64,
    pub wall_height: f64,
    pub background: String,
    /// Paint order: ascending z.
    pub items: Vec<SceneItem>,
    pub selection: Option<SelectionBox>,
}

/// Build a scene pass.
///
/// `selected` is honored only when it names an item that made it into the
/// pass; the read-only viewer always passes `None`.
#[must_use]
pub fn build(
    wall: Option<&Wall>,
    doc: &WallDoc,
    photos: &PhotoSet,
    aspects: &AspectRatios,
    camera: Camera,
    selected: Option<ItemId>,
) -> ScenePass {
    let items: Vec<SceneItem> = doc
        .sorted_items()
        .into_iter()
        .filter_map(|item| {
            let photo = photos.get(&item.photo_id)?;
            Some(SceneItem {
                item_id: item.id,
                photo_id: item.photo_id,
                image_url: photo.image_url.clone(),
                display_name: photo.display_name.clone(),
                rect: item.rect(aspects.ratio(&item.photo_id)),
                z_index: item.z_index,
            })
        })
        .collect();

    let selection = selected.and_then(|id| {
        let rect = items.iter().find(|i| i.item_id == id)?.rect;
        Some(SelectionBox { item_id: id, rect, handles: Handle::ALL.map(|h| (h, h.corner(&rect))) })
    });

    ScenePass {
        camera,
        wall_width: wall.map_or(DEFAULT_WALL_WIDTH, |w| w.width),
        wall_height: wall.map_or(DEFAULT_WALL_HEIGHT, |w| w.height),
        background: wall.map_or_else(|| DEFAULT_BACKGROUND.to_owned(), |w| w.background_color.clone()),
        items,
        selection,
    }
}
