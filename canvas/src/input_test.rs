use uuid::Uuid;

use super::*;

// =============================================================
// Button
// =============================================================

#[test]
fn button_from_dom_codes() {
    assert_eq!(Button::from_dom(0), Button::Primary);
    assert_eq!(Button::from_dom(1), Button::Middle);
    assert_eq!(Button::from_dom(2), Button::Secondary);
    assert_eq!(Button::from_dom(3), Button::Other);
    assert_eq!(Button::from_dom(4), Button::Other);
    assert_eq!(Button::from_dom(-1), Button::Other);
}

// =============================================================
// Key
// =============================================================

#[test]
fn delete_and_backspace_remove() {
    assert!(Key("Delete".into()).is_delete());
    assert!(Key("Backspace".into()).is_delete());
    assert!(!Key("Escape".into()).is_delete());
    assert!(!Key("d".into()).is_delete());
}

// =============================================================
// InputState
// =============================================================

#[test]
fn input_state_default_is_idle() {
    assert!(InputState::default().is_idle());
}

#[test]
fn gestures_are_not_idle() {
    let panning = InputState::Panning { start_screen: Point::new(0.0, 0.0), orig_pan: Point::new(3.0, 4.0) };
    let moving = InputState::Moving { id: Uuid::new_v4(), start_screen: Point::new(1.0, 1.0), orig_x: 0.0, orig_y: 0.0 };
    assert!(!panning.is_idle());
    assert!(!moving.is_idle());
    assert_eq!(panning.start_screen(), Some(Point::new(0.0, 0.0)));
    assert_eq!(moving.start_screen(), Some(Point::new(1.0, 1.0)));
    assert!(InputState::Idle.start_screen().is_none());
}

#[test]
fn ui_state_default_has_no_selection() {
    assert!(UiState::default().selected_id.is_none());
}
