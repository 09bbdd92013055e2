//! Free layout functions shared by every container kind.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use rand::Rng;

use crate::geom::{Point, Rect};

/// Width of each of `count` children laid out in a row of `parent_width`.
///
/// A lone child gets `single` (clamped to the parent); otherwise each child
/// gets `floor(parent_width / count) - padding`, never negative.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn child_width(parent_width: f64, count: usize, padding: f64, single: f64) -> f64 {
    match count {
        0 => 0.0,
        1 => single.min(parent_width).max(0.0),
        n => ((parent_width / n as f64).floor() - padding).max(0.0),
    }
}

/// Slots for `count` children laid out left to right across `region`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn row(region: Rect, count: usize, padding: f64, single: f64) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let width = child_width(region.width, count, padding, single);
    let pitch = (region.width / count as f64).floor();
    (0..count)
        .map(|i| Rect::new(region.x + pitch * i as f64, region.y, width, region.height))
        .collect()
}

/// Columns of a square-ish grid holding `n` cells: `ceil(sqrt(n))`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn grid_columns(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (n as f64).sqrt().ceil() as usize
}

/// Offsets of `n` grid cells of pitch `cell`, centered on the origin.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn grid_offsets(n: usize, cell: f64) -> Vec<Point> {
    let cols = grid_columns(n);
    if cols == 0 {
        return Vec::new();
    }
    let rows = n.div_ceil(cols);
    let half_w = (cols - 1) as f64 / 2.0;
    let half_h = (rows - 1) as f64 / 2.0;
    (0..n)
        .map(|i| {
            let col = (i % cols) as f64;
            let row = (i / cols) as f64;
            Point::new((col - half_w) * cell, (row - half_h) * cell)
        })
        .collect()
}

/// A random point near the center of `rect`, within `fraction` of its size.
pub fn jitter_within<R: Rng + ?Sized>(rect: Rect, fraction: f64, rng: &mut R) -> Point {
    let fraction = fraction.clamp(0.0, 1.0);
    let center = rect.center();
    let dx = (rng.random::<f64>() - 0.5) * rect.width * fraction;
    let dy = (rng.random::<f64>() - 0.5) * rect.height * fraction;
    Point::new(center.x + dx, center.y + dy)
}
