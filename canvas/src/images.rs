//! Image cache: one `<img>` element per photo, created on first paint.
//!
//! When an image finishes loading, its natural size is reported through the
//! callback so the owner can record the photo's aspect ratio and schedule a
//! redraw. An image that never loads, or loads with zero size, is simply not
//! drawn.

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlImageElement;

use crate::doc::PhotoId;

/// Receives `(photo_id, natural_width, natural_height)` once per image.
pub type ImageLoadFn = Rc<dyn Fn(PhotoId, f64, f64)>;

pub struct ImageCache {
    images: HashMap<PhotoId, HtmlImageElement>,
    on_load: ImageLoadFn,
}

impl ImageCache {
    #[must_use]
    pub fn new(on_load: ImageLoadFn) -> Self {
        Self { images: HashMap::new(), on_load }
    }

    /// Start loading `url` for `photo_id` unless an element already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the image element cannot be created.
    pub fn ensure(&mut self, photo_id: PhotoId, url: &str) -> Result<(), JsValue> {
        if self.images.contains_key(&photo_id) {
            return Ok(());
        }
        let img = HtmlImageElement::new()?;
        let loaded = img.clone();
        let on_load = Rc::clone(&self.on_load);
        let cb = Closure::once_into_js(move || {
            on_load(photo_id, f64::from(loaded.natural_width()), f64::from(loaded.natural_height()));
        });
        img.set_onload(Some(cb.unchecked_ref()));
        img.set_cross_origin(Some("anonymous"));
        img.set_src(url);
        self.images.insert(photo_id, img);
        Ok(())
    }

    /// The element for `photo_id` if it finished loading with a usable size.
    #[must_use]
    pub fn ready(&self, photo_id: &PhotoId) -> Option<&HtmlImageElement> {
        self.images.get(photo_id).filter(|img| img.complete() && img.natural_width() > 0)
    }
}
