//! Rendering: draws a [`ScenePass`] to a 2D context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It receives a read-only scene pass and produces pixels. It does not mutate
//! any application state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::HANDLE_SIZE_PX;
use crate::images::{ImageCache, ImageLoadFn};
use crate::scene::{ScenePass, SelectionBox};

const SELECTION_COLOR: &str = "#2563eb";
const HANDLE_FILL: &str = "#ffffff";
/// Selection outline width in screen pixels.
const SELECTION_LINE_PX: f64 = 2.0;

/// A canvas element, its 2D context, and the images drawn into it.
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: ImageCache,
    viewport_width: f64,
    viewport_height: f64,
    dpr: f64,
}

impl Surface {
    /// # Errors
    ///
    /// Returns an error if the canvas has no 2D context.
    pub fn new(canvas: HtmlCanvasElement, on_image_load: ImageLoadFn) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            images: ImageCache::new(on_image_load),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
        })
    }

    /// Resize the backing store to `width_css x height_css` at `dpr`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
        self.canvas.set_width((width_css * dpr).round().max(0.0) as u32);
        self.canvas.set_height((height_css * dpr).round().max(0.0) as u32);
    }

    /// Start any missing image loads, then draw the pass.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn paint(&mut self, pass: &ScenePass) -> Result<(), JsValue> {
        for item in &pass.items {
            self.images.ensure(item.photo_id, &item.image_url)?;
        }
        draw(&self.ctx, pass, &self.images, self.viewport_width, self.viewport_height, self.dpr)
    }
}

/// Draw the full scene: wall background, photos, and selection UI.
///
/// `viewport_w` and `viewport_h` are in CSS pixels. `dpr` is the device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    pass: &ScenePass,
    images: &ImageCache,
    viewport_w: f64,
    viewport_h: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    let camera = pass.camera;

    // Layer 1: clear and set up transforms.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport_w, viewport_h);
    ctx.translate(camera.pan_x, camera.pan_y)?;
    ctx.scale(camera.zoom, camera.zoom)?;

    // Layer 2: the wall itself.
    ctx.set_fill_style_str(&pass.background);
    ctx.fill_rect(0.0, 0.0, pass.wall_width, pass.wall_height);

    // Layer 3: photos in z-order (bottom first). Unloaded images are skipped.
    for item in &pass.items {
        if let Some(img) = images.ready(&item.photo_id) {
            ctx.draw_image_with_html_image_element_and_dw_and_dh(
                img,
                item.rect.x,
                item.rect.y,
                item.rect.width,
                item.rect.height,
            )?;
        }
    }

    // Layer 4: selection UI.
    if let Some(selection) = &pass.selection {
        draw_selection(ctx, selection, camera.zoom);
    }
    Ok(())
}

/// Outline plus square corner handles, sized in screen pixels.
fn draw_selection(ctx: &CanvasRenderingContext2d, selection: &SelectionBox, zoom: f64) {
    let rect = selection.rect;
    ctx.set_stroke_style_str(SELECTION_COLOR);
    ctx.set_line_width(SELECTION_LINE_PX / zoom);
    ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);

    let size = HANDLE_SIZE_PX / zoom;
    let half = size / 2.0;
    ctx.set_fill_style_str(HANDLE_FILL);
    for (_, corner) in &selection.handles {
        ctx.fill_rect(corner.x - half, corner.y - half, size, size);
        ctx.stroke_rect(corner.x - half, corner.y - half, size, size);
    }
}
