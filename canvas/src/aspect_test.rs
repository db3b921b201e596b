#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

#[test]
fn unmeasured_photo_uses_default_ratio() {
    let ratios = AspectRatios::new();
    assert_eq!(ratios.ratio(&Uuid::new_v4()), DEFAULT_ASPECT_RATIO);
    assert!(ratios.is_empty());
}

#[test]
fn record_stores_height_over_width() {
    let ratios = AspectRatios::new();
    let photo = Uuid::new_v4();
    assert!(ratios.record(photo, 1600.0, 900.0));
    assert_eq!(ratios.ratio(&photo), 900.0 / 1600.0);
    assert_eq!(ratios.len(), 1);
}

#[test]
fn first_measurement_wins() {
    let ratios = AspectRatios::new();
    let photo = Uuid::new_v4();
    assert!(ratios.record(photo, 100.0, 200.0));
    assert!(!ratios.record(photo, 100.0, 50.0));
    assert_eq!(ratios.ratio(&photo), 2.0);
}

#[test]
fn degenerate_sizes_are_ignored() {
    let ratios = AspectRatios::new();
    let photo = Uuid::new_v4();
    assert!(!ratios.record(photo, 0.0, 100.0));
    assert!(!ratios.record(photo, 100.0, 0.0));
    assert!(!ratios.record(photo, f64::NAN, 100.0));
    assert!(!ratios.record(photo, f64::INFINITY, 100.0));
    assert!(ratios.is_empty());
}

#[test]
fn clones_share_measurements() {
    let editor = AspectRatios::new();
    let viewer = editor.clone();
    let photo = Uuid::new_v4();
    assert!(viewer.record(photo, 400.0, 300.0));
    assert_eq!(editor.ratio(&photo), 0.75);
    assert!(!editor.record(photo, 400.0, 300.0), "measured once in either context is never re-measured");
    assert_eq!(editor.len(), 1);
}
