//! Window-level pointer listeners held for the duration of one gesture.
//!
//! Dropping a [`PointerSubscription`] removes its listeners, so a gesture
//! can never leak them past its release.

use gloo_events::EventListener;
use wasm_bindgen::JsValue;
use web_sys::Event;

/// `pointermove`, `pointerup` and `pointercancel` on the window.
pub struct PointerSubscription {
    _listeners: [EventListener; 3],
}

impl PointerSubscription {
    /// Route window pointer movement to `on_move` and release (or cancel) to
    /// `on_up` until dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no window.
    pub fn new<M, U>(on_move: M, on_up: U) -> Result<Self, JsValue>
    where
        M: FnMut(&Event) + 'static,
        U: Fn(&Event) + Clone + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let on_cancel = on_up.clone();
        Ok(Self {
            _listeners: [
                EventListener::new(&window, "pointermove", on_move),
                EventListener::new(&window, "pointerup", on_up),
                EventListener::new(&window, "pointercancel", on_cancel),
            ],
        })
    }
}
