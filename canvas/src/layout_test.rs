#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn columns_are_ceil_sqrt() {
    assert_eq!(grid_columns(0), 0);
    assert_eq!(grid_columns(1), 1);
    assert_eq!(grid_columns(2), 2);
    assert_eq!(grid_columns(4), 2);
    assert_eq!(grid_columns(5), 3);
    assert_eq!(grid_columns(9), 3);
    assert_eq!(grid_columns(10), 4);
    assert_eq!(grid_columns(10_000), 100);
}

#[test]
fn empty_batch_has_no_positions() {
    assert!(grid_positions(0, None, 3000.0, 2000.0).is_empty());
}

#[test]
fn four_items_form_centered_two_by_two() {
    let pts = grid_positions(4, None, 3000.0, 2000.0);
    assert_eq!(pts.len(), 4);

    // Grid: 2 * 300 + 40 wide, 2 * 225 + 40 tall.
    assert_eq!(pts[0], Point::new(1180.0, 755.0));
    assert_eq!(pts[1], Point::new(1520.0, 755.0));
    assert_eq!(pts[2], Point::new(1180.0, 1020.0));
    assert_eq!(pts[3], Point::new(1520.0, 1020.0));
}

#[test]
fn single_item_is_centered() {
    let pts = grid_positions(1, None, 3000.0, 2000.0);
    assert_eq!(pts, vec![Point::new(1350.0, 887.5)]);
}

#[test]
fn oversized_grid_clamps_to_origin() {
    let pts = grid_positions(100, None, 500.0, 500.0);
    assert_eq!(pts[0], Point::new(0.0, 0.0));
}

#[test]
fn appending_starts_right_of_existing_content() {
    let existing = Rect { x: 100.0, y: 50.0, width: 400.0, height: 300.0 };
    let pts = grid_positions(3, Some(existing), 3000.0, 2000.0);
    assert_eq!(pts[0], Point::new(540.0, 50.0));
    assert_eq!(pts[1], Point::new(880.0, 50.0));
    assert_eq!(pts[2], Point::new(540.0, 315.0));
}
