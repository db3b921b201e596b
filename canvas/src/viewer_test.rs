#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn shared_wall() -> (Wall, WallItem, PhotoRef) {
    let wall = Wall {
        id: Uuid::new_v4(),
        name: "Trip".into(),
        owner_id: Uuid::new_v4(),
        width: 3000.0,
        height: 2000.0,
        background_color: "#ffffff".into(),
        share_token: Some("ab".repeat(32)),
        created_at: 0,
        updated_at: 0,
    };
    let item = WallItem { id: Uuid::new_v4(), wall_id: wall.id, photo_id: Uuid::new_v4(), x: 0.0, y: 0.0, width: 300.0, z_index: 1 };
    let photo = PhotoRef { id: item.photo_id, image_url: "/p.jpg".into(), display_name: "p".into() };
    (wall, item, photo)
}

#[test]
fn drag_over_item_pans_instead_of_moving() {
    let (wall, item, photo) = shared_wall();
    let mut viewer = ViewerCore::new();
    viewer.open(wall, vec![item.clone()], vec![photo]);

    let down = viewer.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    assert_eq!(down.first(), Some(&Action::CapturePointer));
    viewer.on_pointer_move(Point::new(40.0, 50.0));
    let up = viewer.on_pointer_up(Point::new(40.0, 50.0));

    assert!(up.contains(&Action::ReleasePointer));
    assert!(!up.iter().any(|a| matches!(a, Action::ItemUpdated { .. })));
    assert_eq!(viewer.camera.pan_x, 30.0);
    assert_eq!(viewer.camera.pan_y, 40.0);
    assert_eq!(viewer.doc.get(&item.id).map(|i| (i.x, i.y)), Some((0.0, 0.0)));
}

#[test]
fn scene_never_has_selection() {
    let (wall, item, photo) = shared_wall();
    let mut viewer = ViewerCore::new();
    viewer.open(wall, vec![item], vec![photo]);
    viewer.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    let pass = viewer.scene();
    assert_eq!(pass.items.len(), 1);
    assert!(pass.selection.is_none());
}

#[test]
fn wheel_zoom_and_reset() {
    let mut viewer = ViewerCore::new();
    viewer.on_wheel(WheelDelta { dx: 0.0, dy: -200.0 });
    assert_eq!(viewer.camera.zoom, 0.7);
    viewer.zoom_out();
    assert_eq!(viewer.camera.zoom, 0.6);
    viewer.reset_view();
    assert_eq!(viewer.camera, Camera::default());
}

#[test]
fn cancel_gesture_returns_to_idle() {
    let mut viewer = ViewerCore::new();
    viewer.on_pointer_down(Point::new(10.0, 10.0), Button::Primary);
    viewer.on_pointer_move(Point::new(40.0, 50.0));
    let actions = viewer.cancel_gesture();
    assert!(actions.contains(&Action::ReleasePointer));
    assert!(viewer.input.is_idle());
    assert_eq!(viewer.camera.pan_x, 0.0);
}

#[test]
fn trackpad_wheel_deltas_still_zoom() {
    let mut viewer = ViewerCore::new();
    for _ in 0..50 {
        viewer.on_wheel(WheelDelta { dx: 0.0, dy: -4.0 });
    }
    assert!(viewer.camera.zoom > 0.5);
}

#[test]
fn shared_aspects_are_visible_to_viewer() {
    let (wall, item, photo) = shared_wall();
    let aspects = AspectRatios::new();
    let mut viewer = ViewerCore::with_aspects(aspects.clone());
    viewer.open(wall, vec![item.clone()], vec![photo]);
    assert!(aspects.record(item.photo_id, 100.0, 100.0));
    assert_eq!(viewer.scene().items[0].rect.height, 300.0);
    assert!(viewer.record_image_size(item.photo_id, 10.0, 20.0).is_empty());
}

#[test]
fn move_while_idle_does_nothing() {
    let mut viewer = ViewerCore::new();
    assert!(viewer.on_pointer_move(Point::new(5.0, 5.0)).is_empty());
    assert!(viewer.on_pointer_up(Point::new(5.0, 5.0)).is_empty());
}
