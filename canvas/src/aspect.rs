//! Per-photo aspect-ratio measurements shared by every renderer.
//!
//! Item height is never stored: it is derived from the item width and the
//! height/width ratio of the referenced photo. The ratio is only known once
//! the image has loaded somewhere, so until then [`DEFAULT_ASPECT_RATIO`] is
//! used. A single [`AspectRatios`] handle is cloned into both the editor and
//! the read-only viewer, so a photo measured in one is never re-measured in
//! the other.

#[cfg(test)]
#[path = "aspect_test.rs"]
mod aspect_test;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::consts::DEFAULT_ASPECT_RATIO;
use crate::doc::PhotoId;

/// Shared, process-local cache of measured photo aspect ratios.
///
/// Cloning yields another handle to the same cache. The engine runs on the
/// single browser thread, so the cache is `Rc`/`RefCell` based.
#[derive(Debug, Clone, Default)]
pub struct AspectRatios {
    inner: Rc<RefCell<HashMap<PhotoId, f64>>>,
}

impl AspectRatios {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ratio (height / width) for `photo_id`, or the default when unmeasured.
    #[must_use]
    pub fn ratio(&self, photo_id: &PhotoId) -> f64 {
        self.inner
            .borrow()
            .get(photo_id)
            .copied()
            .unwrap_or(DEFAULT_ASPECT_RATIO)
    }

    /// Record the natural dimensions of a loaded image.
    ///
    /// Returns `true` when this is the first measurement for the photo. Later
    /// reports and degenerate sizes are ignored.
    pub fn record(&self, photo_id: PhotoId, natural_width: f64, natural_height: f64) -> bool {
        if !(natural_width > 0.0 && natural_height > 0.0) || !natural_width.is_finite() || !natural_height.is_finite() {
            return false;
        }
        let mut map = self.inner.borrow_mut();
        if map.contains_key(&photo_id) {
            return false;
        }
        map.insert(photo_id, natural_height / natural_width);
        true
    }

    /// Number of measured photos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}
