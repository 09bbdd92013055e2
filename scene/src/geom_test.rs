#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn rect_center() {
    let r = Rect::new(10.0, 20.0, 100.0, 40.0);
    assert_eq!(r.center(), Point::new(60.0, 40.0));
}

#[test]
fn rect_around_is_centered() {
    let r = Rect::around(Point::new(5.0, 5.0), 10.0);
    assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(r.center(), Point::new(5.0, 5.0));
}

#[test]
fn rect_contains_edges() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(r.contains(Point::new(0.0, 0.0)));
    assert!(r.contains(Point::new(10.0, 10.0)));
    assert!(!r.contains(Point::new(10.1, 5.0)));
}

#[test]
fn rect_inset_never_negative() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(30.0, 8.0);
    assert_eq!(r.width, 0.0);
    assert_eq!(r.height, 0.0);
}

#[test]
fn lerp_clamps() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, -10.0);
    assert_eq!(a.lerp(b, 0.5), Point::new(5.0, -5.0));
    assert_eq!(a.lerp(b, 2.0), b);
    assert_eq!(a.lerp(b, -1.0), a);
}
