//! Input model: buttons, keys, wheel deltas, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Each active variant carries the values captured at gesture
//! start, so every frame recomputes from the original geometry instead of
//! accumulating deltas, and the single commit on release is exact.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{Geometry, ItemId};
use crate::hit::Handle;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
    /// Back, forward and any other extra button.
    Other,
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    #[must_use]
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Other,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Backspace"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this key removes the selected item.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Delete" | "Backspace")
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the currently selected item, if any.
    pub selected_id: Option<ItemId>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the empty background pans the view.
    Panning {
        /// Screen-space pointer position at gesture start.
        start_screen: Point,
        /// Pan offset at gesture start.
        orig_pan: Point,
    },
    /// Dragging an item body moves it.
    Moving {
        id: ItemId,
        /// Screen-space pointer position at gesture start.
        start_screen: Point,
        /// Item x at the start of the drag.
        orig_x: f64,
        /// Item y at the start of the drag.
        orig_y: f64,
    },
    /// Dragging a corner handle of the selected item resizes it.
    Resizing {
        id: ItemId,
        handle: Handle,
        /// Screen-space pointer position at gesture start.
        start_screen: Point,
        /// Item position and width at the start of the resize.
        orig: Geometry,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Screen position where the active gesture began.
    #[must_use]
    pub fn start_screen(&self) -> Option<Point> {
        match *self {
            Self::Idle => None,
            Self::Panning { start_screen, .. } | Self::Moving { start_screen, .. } | Self::Resizing { start_screen, .. } => {
                Some(start_screen)
            }
        }
    }
}
