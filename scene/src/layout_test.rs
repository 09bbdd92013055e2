#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

#[test]
fn child_width_splits_and_pads() {
    assert_eq!(child_width(1000.0, 3, 20.0, 320.0), 313.0);
    assert_eq!(child_width(1000.0, 4, 20.0, 320.0), 230.0);
}

#[test]
fn child_width_single_child_is_fixed_and_clamped() {
    assert_eq!(child_width(1000.0, 1, 20.0, 320.0), 320.0);
    assert_eq!(child_width(200.0, 1, 20.0, 320.0), 200.0);
}

#[test]
fn child_width_never_negative() {
    assert_eq!(child_width(30.0, 5, 20.0, 320.0), 0.0);
    assert_eq!(child_width(100.0, 0, 20.0, 320.0), 0.0);
}

#[test]
fn row_places_children_left_to_right() {
    let slots = row(Rect::new(100.0, 50.0, 900.0, 40.0), 3, 20.0, 320.0);
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0], Rect::new(100.0, 50.0, 280.0, 40.0));
    assert_eq!(slots[1].x, 400.0);
    assert_eq!(slots[2].x, 700.0);
    assert!(slots.iter().all(|r| r.y == 50.0 && r.height == 40.0));
}

#[test]
fn row_of_nothing_is_empty() {
    assert!(row(Rect::new(0.0, 0.0, 10.0, 10.0), 0, 1.0, 1.0).is_empty());
}

#[test]
fn grid_columns_is_ceil_sqrt() {
    assert_eq!(grid_columns(0), 0);
    assert_eq!(grid_columns(1), 1);
    assert_eq!(grid_columns(2), 2);
    assert_eq!(grid_columns(4), 2);
    assert_eq!(grid_columns(5), 3);
    assert_eq!(grid_columns(9), 3);
    assert_eq!(grid_columns(10), 4);
}

#[test]
fn grid_offsets_are_centered() {
    let offsets = grid_offsets(4, 10.0);
    assert_eq!(
        offsets,
        vec![Point::new(-5.0, -5.0), Point::new(5.0, -5.0), Point::new(-5.0, 5.0), Point::new(5.0, 5.0)]
    );
    assert_eq!(grid_offsets(1, 10.0), vec![Point::new(0.0, 0.0)]);
    assert!(grid_offsets(0, 10.0).is_empty());
}

#[test]
fn grid_offsets_partial_last_row() {
    let offsets = grid_offsets(3, 10.0);
    assert_eq!(offsets.len(), 3);
    assert_eq!(offsets[2], Point::new(-5.0, 5.0));
}

#[test]
fn jitter_stays_inside_rect() {
    let mut rng = StdRng::seed_from_u64(7);
    let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
    for _ in 0..200 {
        let p = jitter_within(rect, 1.0, &mut rng);
        assert!(rect.contains(p), "{p:?} outside {rect:?}");
    }
}

#[test]
fn zero_jitter_is_center() {
    let mut rng = StdRng::seed_from_u64(1);
    let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
    assert_eq!(jitter_within(rect, 0.0, &mut rng), Point::new(20.0, 20.0));
}
