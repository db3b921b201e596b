#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use std::mem;

use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::aspect::AspectRatios;
use crate::camera::{Camera, Point};
use crate::consts::ZOOM_STEP;
use crate::doc::{ItemId, PartialWallItem, PhotoId, PhotoRef, PhotoSet, Wall, WallDoc, WallItem, resized};
use crate::hit::{Hit, HitPart, hit_test};
use crate::images::ImageLoadFn;
use crate::input::{Button, InputState, Key, UiState, WheelDelta};
use crate::render::Surface;
use crate::scene::{self, ScenePass};

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRAB: &str = "grab";
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// New items were placed locally and should be persisted.
    ItemsCreated(Vec<WallItem>),
    /// A gesture finished; persist the changed fields once.
    ItemUpdated { id: ItemId, fields: PartialWallItem },
    ItemDeleted { id: ItemId },
    /// A gesture started: route window-level pointer events to the engine
    /// until [`Action::ReleasePointer`].
    CapturePointer,
    /// The gesture ended: drop the window-level subscription.
    ReleasePointer,
    SetCursor(String),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub wall: Option<Wall>,
    pub doc: WallDoc,
    pub photos: PhotoSet,
    pub aspects: AspectRatios,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub dpr: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_aspects(AspectRatios::new())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a core that shares an existing aspect-ratio table.
    #[must_use]
    pub fn with_aspects(aspects: AspectRatios) -> Self {
        Self {
            wall: None,
            doc: WallDoc::new(),
            photos: PhotoSet::new(),
            aspects,
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        }
    }

    // --- Data inputs ---

    /// Replace the whole session with a freshly loaded wall.
    ///
    /// Resets the camera and selection. An in-flight gesture is abandoned
    /// without a commit.
    pub fn open_wall(&mut self, wall: Wall, items: Vec<WallItem>, photos: Vec<PhotoRef>) -> Vec<Action> {
        let mut actions = Vec::new();
        if !mem::take(&mut self.input).is_idle() {
            actions.push(Action::ReleasePointer);
        }
        self.wall = Some(wall);
        self.doc.load_snapshot(items);
        self.photos = photos.into_iter().map(|p| (p.id, p)).collect();
        self.camera.reset();
        self.ui = UiState::default();
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Apply updated wall metadata (name, background, share state).
    pub fn update_wall(&mut self, wall: Wall) -> Vec<Action> {
        self.wall = Some(wall);
        vec![Action::RenderNeeded]
    }

    /// Merge resolved photo references into the session.
    pub fn load_photos(&mut self, photos: Vec<PhotoRef>) -> Vec<Action> {
        if photos.is_empty() {
            return Vec::new();
        }
        self.photos.extend(photos.into_iter().map(|p| (p.id, p)));
        vec![Action::RenderNeeded]
    }

    /// Place the given photos on the wall as a grid of new items.
    ///
    /// Photo references must already be loaded via [`Self::load_photos`] for
    /// the new items to render.
    pub fn add_photos(&mut self, photo_ids: &[PhotoId]) -> Vec<Action> {
        let Some(wall) = &self.wall else {
            return Vec::new();
        };
        if photo_ids.is_empty() {
            return Vec::new();
        }
        let created = self.doc.add_items(wall.id, photo_ids, wall.width, wall.height, &self.aspects);
        vec![Action::ItemsCreated(created), Action::RenderNeeded]
    }

    /// Report an image's natural size. Only the first report per photo counts.
    pub fn record_image_size(&mut self, photo_id: PhotoId, natural_width: f64, natural_height: f64) -> Vec<Action> {
        if self.aspects.record(photo_id, natural_width, natural_height) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    /// Remove an item locally, clearing the selection if it pointed there.
    pub fn remove_item(&mut self, id: &ItemId) -> Vec<Action> {
        if self.ui.selected_id.as_ref() == Some(id) {
            self.ui.selected_id = None;
        }
        match self.doc.remove_item(id) {
            Some(item) => vec![Action::ItemDeleted { id: item.id }, Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Remove the selected item, if any.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        match self.ui.selected_id {
            Some(id) => self.remove_item(&id),
            None => Vec::new(),
        }
    }

    // --- Viewport ---

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    pub fn zoom_in(&mut self) -> Vec<Action> {
        self.camera.zoom_by(ZOOM_STEP);
        vec![Action::RenderNeeded]
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        self.camera.zoom_by(-ZOOM_STEP);
        vec![Action::RenderNeeded]
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera.reset();
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Start a gesture. Ignored while another gesture is active or for
    /// non-primary buttons.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !self.input.is_idle() || button != Button::Primary {
            return Vec::new();
        }
        let canvas_pt = self.camera.screen_to_canvas(screen_pt);
        match self.hit(canvas_pt) {
            Some(Hit { item_id, part: HitPart::Handle(handle) }) => {
                let Some(item) = self.doc.get(&item_id) else {
                    return Vec::new();
                };
                self.input = InputState::Resizing { id: item_id, handle, start_screen: screen_pt, orig: item.geometry() };
                vec![Action::CapturePointer, Action::SetCursor(handle.cursor().to_owned())]
            }
            Some(Hit { item_id, part: HitPart::Body }) => {
                self.ui.selected_id = Some(item_id);
                self.doc.bring_to_front(&item_id);
                let Some(item) = self.doc.get(&item_id) else {
                    return Vec::new();
                };
                self.input = InputState::Moving { id: item_id, start_screen: screen_pt, orig_x: item.x, orig_y: item.y };
                vec![Action::CapturePointer, Action::SetCursor(CURSOR_GRABBING.to_owned()), Action::RenderNeeded]
            }
            None => {
                self.ui.selected_id = None;
                self.input = InputState::Panning {
                    start_screen: screen_pt,
                    orig_pan: Point::new(self.camera.pan_x, self.camera.pan_y),
                };
                vec![Action::CapturePointer, Action::SetCursor(CURSOR_GRABBING.to_owned()), Action::RenderNeeded]
            }
        }
    }

    /// Track the pointer. While idle this only updates the hover cursor.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.input.is_idle() {
            let canvas_pt = self.camera.screen_to_canvas(screen_pt);
            return vec![Action::SetCursor(self.hover_cursor(canvas_pt).to_owned())];
        }
        if self.drag_to(screen_pt) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    /// Finish the active gesture and emit its single commit.
    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        self.drag_to(screen_pt);

        let mut actions = Vec::new();
        match mem::take(&mut self.input) {
            InputState::Moving { id, .. } => {
                if let Some(item) = self.doc.get(&id) {
                    actions.push(Action::ItemUpdated {
                        id,
                        fields: PartialWallItem {
                            x: Some(item.x),
                            y: Some(item.y),
                            z_index: Some(item.z_index),
                            ..PartialWallItem::default()
                        },
                    });
                }
            }
            InputState::Resizing { id, .. } => {
                if let Some(item) = self.doc.get(&id) {
                    actions.push(Action::ItemUpdated {
                        id,
                        fields: PartialWallItem {
                            x: Some(item.x),
                            y: Some(item.y),
                            width: Some(item.width),
                            ..PartialWallItem::default()
                        },
                    });
                }
            }
            InputState::Panning { .. } | InputState::Idle => {}
        }
        let canvas_pt = self.camera.screen_to_canvas(screen_pt);
        actions.push(Action::ReleasePointer);
        actions.push(Action::SetCursor(self.hover_cursor(canvas_pt).to_owned()));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// End the active gesture where it began, as a release without motion.
    /// Used when the host cannot follow the pointer.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        match self.input.start_screen() {
            Some(start) => self.on_pointer_up(start),
            None => Vec::new(),
        }
    }

    /// Wheel zooms without adjusting pan.
    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.camera.zoom_by_wheel(delta.dy);
        vec![Action::RenderNeeded]
    }

    /// Delete / Backspace removes the selection unless focus is in a text field.
    pub fn on_key_down(&mut self, key: &Key, in_text_input: bool) -> Vec<Action> {
        if in_text_input || !key.is_delete() {
            return Vec::new();
        }
        self.delete_selected()
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ItemId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&WallItem> {
        self.doc.get(id)
    }

    #[must_use]
    pub fn wall(&self) -> Option<&Wall> {
        self.wall.as_ref()
    }

    #[must_use]
    pub fn scene(&self) -> ScenePass {
        scene::build(self.wall.as_ref(), &self.doc, &self.photos, &self.aspects, self.camera, self.ui.selected_id)
    }

    // --- Internals ---

    fn hit(&self, canvas_pt: Point) -> Option<Hit> {
        hit_test(canvas_pt, &self.doc, &self.photos, &self.aspects, &self.camera, self.ui.selected_id)
    }

    fn hover_cursor(&self, canvas_pt: Point) -> &'static str {
        match self.hit(canvas_pt) {
            Some(Hit { part: HitPart::Handle(handle), .. }) => handle.cursor(),
            Some(Hit { part: HitPart::Body, .. }) => CURSOR_GRAB,
            None => CURSOR_DEFAULT,
        }
    }

    /// Recompute the gesture's effect from its starting values. Returns
    /// whether anything changed.
    fn drag_to(&mut self, screen_pt: Point) -> bool {
        match self.input {
            InputState::Idle => false,
            InputState::Panning { start_screen, orig_pan } => {
                let d = screen_pt.delta_from(start_screen);
                self.camera.pan_by(orig_pan.x + d.x - self.camera.pan_x, orig_pan.y + d.y - self.camera.pan_y);
                true
            }
            InputState::Moving { id, start_screen, orig_x, orig_y } => {
                let d = self.camera.to_canvas_delta(screen_pt.delta_from(start_screen));
                let Some((x, y)) = self.doc.get(&id).map(|item| (item.x, item.y)) else {
                    return false;
                };
                self.doc.move_item(&id, orig_x + d.x - x, orig_y + d.y - y).is_some()
            }
            InputState::Resizing { id, handle, start_screen, orig } => {
                let d = self.camera.to_canvas_delta(screen_pt.delta_from(start_screen));
                let Some((photo_id, width)) = self.doc.get(&id).map(|item| (item.photo_id, item.width)) else {
                    return false;
                };
                let target = resized(orig, handle, handle.growth_from_dx(d.x), self.aspects.ratio(&photo_id));
                self.doc.resize_item(&id, handle, target.width - width, &self.aspects).is_some()
            }
        }
    }
}

/// Browser-bound editor: an [`EngineCore`] plus the canvas it paints.
pub struct Engine {
    surface: Surface,
    pub core: EngineCore,
}

impl Engine {
    /// Bind to `canvas`. `on_image_load` receives each photo's natural
    /// size as its image finishes loading.
    ///
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, aspects: AspectRatios, on_image_load: ImageLoadFn) -> Result<Self, JsValue> {
        Ok(Self { surface: Surface::new(canvas, on_image_load)?, core: EngineCore::with_aspects(aspects) })
    }

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        self.surface.set_viewport(width_css, height_css, dpr);
    }

    /// Paint the current scene.
    ///
    /// # Errors
    ///
    /// Returns an error if a canvas call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let pass = self.core.scene();
        self.surface.paint(&pass)
    }
}
