//! Read-only wall viewer used for shared links.
//!
//! Pans on any drag and zooms on the wheel. There is no selection, no hit
//! testing and nothing is ever persisted.

#[cfg(test)]
#[path = "viewer_test.rs"]
mod viewer_test;

use std::mem;

use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::aspect::AspectRatios;
use crate::camera::{Camera, Point};
use crate::consts::ZOOM_STEP;
use crate::doc::{PhotoId, PhotoRef, PhotoSet, Wall, WallDoc, WallItem};
use crate::engine::Action;
use crate::images::ImageLoadFn;
use crate::input::{Button, InputState, WheelDelta};
use crate::render::Surface;
use crate::scene::{self, ScenePass};

/// Browser-independent viewer state.
#[derive(Default)]
pub struct ViewerCore {
    pub wall: Option<Wall>,
    pub doc: WallDoc,
    pub photos: PhotoSet,
    pub aspects: AspectRatios,
    pub camera: Camera,
    /// Only `Idle` and `Panning` occur here.
    pub input: InputState,
}

impl ViewerCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_aspects(aspects: AspectRatios) -> Self {
        Self { aspects, ..Self::default() }
    }

    /// Show a shared wall, resetting the view.
    pub fn open(&mut self, wall: Wall, items: Vec<WallItem>, photos: Vec<PhotoRef>) -> Vec<Action> {
        let mut actions = Vec::new();
        if !mem::take(&mut self.input).is_idle() {
            actions.push(Action::ReleasePointer);
        }
        self.wall = Some(wall);
        self.doc.load_snapshot(items);
        self.photos = photos.into_iter().map(|p| (p.id, p)).collect();
        self.camera.reset();
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn record_image_size(&mut self, photo_id: PhotoId, natural_width: f64, natural_height: f64) -> Vec<Action> {
        if self.aspects.record(photo_id, natural_width, natural_height) {
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !self.input.is_idle() || button != Button::Primary {
            return Vec::new();
        }
        self.input = InputState::Panning {
            start_screen: screen_pt,
            orig_pan: Point::new(self.camera.pan_x, self.camera.pan_y),
        };
        vec![Action::CapturePointer, Action::SetCursor("grabbing".to_owned())]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Panning { start_screen, orig_pan } = self.input else {
            return Vec::new();
        };
        let d = screen_pt.delta_from(start_screen);
        self.camera.pan_by(orig_pan.x + d.x - self.camera.pan_x, orig_pan.y + d.y - self.camera.pan_y);
        vec![Action::RenderNeeded]
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point) -> Vec<Action> {
        if self.input.is_idle() {
            return Vec::new();
        }
        let mut actions = self.on_pointer_move(screen_pt);
        self.input = InputState::Idle;
        actions.push(Action::ReleasePointer);
        actions.push(Action::SetCursor("grab".to_owned()));
        actions
    }

    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        match self.input.start_screen() {
            Some(start) => self.on_pointer_up(start),
            None => Vec::new(),
        }
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.camera.zoom_by_wheel(delta.dy);
        vec![Action::RenderNeeded]
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

    #[must_use]
    pub fn scene(&self) -> ScenePass {
        scene::build(self.wall.as_ref(), &self.doc, &self.photos, &self.aspects, self.camera, None)
    }
}

/// Browser-bound viewer: a [`ViewerCore`] plus its canvas.
pub struct Viewer {
    surface: Surface,
    pub core: ViewerCore,
}

impl Viewer {
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, aspects: AspectRatios, on_image_load: ImageLoadFn) -> Result<Self, JsValue> {
        Ok(Self { surface: Surface::new(canvas, on_image_load)?, core: ViewerCore::with_aspects(aspects) })
    }

    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.surface.set_viewport(width_css, height_css, dpr);
    }

    /// # Errors
    ///
    /// Returns an error if a canvas call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let pass = self.core.scene();
        self.surface.paint(&pass)
    }
}
