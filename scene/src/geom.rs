#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::Serialize;

/// A point in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise sum.
    #[must_use]
    pub fn offset(self, by: Point) -> Self {
        Self { x: self.x + by.x, y: self.y + by.y }
    }

    /// Linear interpolation toward `to`; `t` is clamped to `0..=1`.
    #[must_use]
    pub fn lerp(self, to: Point, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self { x: self.x + (to.x - self.x) * t, y: self.y + (to.y - self.y) * t }
    }
}

/// Axis-aligned rectangle; `x`/`y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `size` centered on `center`.
    #[must_use]
    pub fn around(center: Point, size: f64) -> Self {
        Self { x: center.x - size / 2.0, y: center.y - size / 2.0, width: size, height: size }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.x + self.width / 2.0, y: self.y + self.height / 2.0 }
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// Shrink from the top by `top` and from every side by `margin`.
    #[must_use]
    pub fn inset(&self, top: f64, margin: f64) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + top + margin,
            width: (self.width - 2.0 * margin).max(0.0),
            height: (self.height - top - 2.0 * margin).max(0.0),
        }
    }
}
