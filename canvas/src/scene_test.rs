#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{PhotoRef, WallItem};

fn make_item(z: i64) -> WallItem {
    WallItem {
        id: Uuid::new_v4(),
        wall_id: Uuid::nil(),
        photo_id: Uuid::new_v4(),
        x: 10.0,
        y: 20.0,
        width: 200.0,
        z_index: z,
    }
}

fn resolve(photos: &mut PhotoSet, item: &WallItem) {
    photos.insert(
        item.photo_id,
        PhotoRef { id: item.photo_id, image_url: format!("/img/{}", item.photo_id), display_name: "sunset".into() },
    );
}

fn wall() -> Wall {
    Wall {
        id: Uuid::new_v4(),
        name: "Gallery".into(),
        owner_id: Uuid::new_v4(),
        width: 1200.0,
        height: 800.0,
        background_color: "#202020".into(),
        share_token: None,
        created_at: 0,
        updated_at: 0,
    }
}

#[test]
fn items_paint_in_ascending_z() {
    let mut doc = WallDoc::new();
    let mut photos = PhotoSet::new();
    for z in [7, 2, 5] {
        let item = make_item(z);
        resolve(&mut photos, &item);
        doc.insert(item);
    }
    let pass = build(None, &doc, &photos, &AspectRatios::new(), Camera::default(), None);
    let zs: Vec<i64> = pass.items.iter().map(|i| i.z_index).collect();
    assert_eq!(zs, vec![2, 5, 7]);
}

#[test]
fn unresolved_items_are_omitted() {
    let mut doc = WallDoc::new();
    let mut photos = PhotoSet::new();
    let shown_a = make_item(1);
    let missing = make_item(2);
    let shown_b = make_item(3);
    resolve(&mut photos, &shown_a);
    resolve(&mut photos, &shown_b);
    for item in [&shown_a, &missing, &shown_b] {
        doc.insert(item.clone());
    }

    let pass = build(None, &doc, &photos, &AspectRatios::new(), Camera::default(), Some(missing.id));
    let ids: Vec<ItemId> = pass.items.iter().map(|i| i.item_id).collect();
    assert_eq!(ids, vec![shown_a.id, shown_b.id]);
    assert!(pass.selection.is_none(), "an unrenderable item cannot show a selection");
}

#[test]
fn heights_follow_measured_aspect() {
    let mut doc = WallDoc::new();
    let mut photos = PhotoSet::new();
    let item = make_item(1);
    resolve(&mut photos, &item);
    doc.insert(item.clone());
    let aspects = AspectRatios::new();

    let before = build(None, &doc, &photos, &aspects, Camera::default(), None);
    assert_eq!(before.items[0].rect.height, 200.0 * 0.75);

    assert!(aspects.record(item.photo_id, 300.0, 450.0));
    let after = build(None, &doc, &photos, &aspects, Camera::default(), None);
    assert_eq!(after.items[0].rect.height, 300.0);
}

#[test]
fn selection_has_four_corner_handles() {
    let mut doc = WallDoc::new();
    let mut photos = PhotoSet::new();
    let item = make_item(1);
    resolve(&mut photos, &item);
    doc.insert(item.clone());

    let pass = build(None, &doc, &photos, &AspectRatios::new(), Camera::default(), Some(item.id));
    let Some(sel) = pass.selection else {
        panic!("selection expected");
    };
    assert_eq!(sel.item_id, item.id);
    assert_eq!(sel.handles[0], (Handle::Nw, Point::new(10.0, 20.0)));
    assert_eq!(sel.handles[3], (Handle::Se, Point::new(210.0, 170.0)));
}

#[test]
fn wall_supplies_bounds_and_background() {
    let w = wall();
    let pass = build(Some(&w), &WallDoc::new(), &PhotoSet::new(), &AspectRatios::new(), Camera::default(), None);
    assert_eq!(pass.wall_width, 1200.0);
    assert_eq!(pass.wall_height, 800.0);
    assert_eq!(pass.background, "#202020");
    assert!(pass.items.is_empty());
}

#[test]
fn missing_wall_uses_defaults() {
    let pass = build(None, &WallDoc::new(), &PhotoSet::new(), &AspectRatios::new(), Camera::default(), None);
    assert_eq!(pass.wall_width, DEFAULT_WALL_WIDTH);
    assert_eq!(pass.wall_height, DEFAULT_WALL_HEIGHT);
    assert_eq!(pass.background, DEFAULT_BACKGROUND);
}
