//! Geometry primitives
//!
//! Value types shared by windows and graphical objects. All coordinates are
//! viewport coordinates (application-chosen, y growing upwards).

use serde::{Deserialize, Serialize};

/// A location within a window's viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// RGB color with every component clamped to `[0.0, 1.0]`
///
/// Out-of-range components are clamped at construction, never rejected.
/// Serialized as a `[r, g, b]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Color {
    red: f64,
    green: f64,
    blue: f64,
}

impl Color {
    pub const BLACK: Color = Color::raw(0.0, 0.0, 0.0);
    pub const RED: Color = Color::raw(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::raw(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::raw(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::raw(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::raw(1.0, 0.0, 1.0);
    pub const CYAN: Color = Color::raw(0.0, 1.0, 1.0);
    pub const DARK_RED: Color = Color::raw(0.75, 0.0, 0.0);
    pub const DARK_GREEN: Color = Color::raw(0.0, 0.75, 0.0);
    pub const DARK_BLUE: Color = Color::raw(0.0, 0.0, 0.75);
    pub const LIGHT_RED: Color = Color::raw(1.0, 0.75, 0.75);
    pub const LIGHT_GREEN: Color = Color::raw(0.75, 1.0, 0.75);
    pub const LIGHT_BLUE: Color = Color::raw(0.75, 0.75, 1.0);
    pub const GRAY: Color = Color::raw(0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Color = Color::raw(0.8, 0.8, 0.8);
    pub const DARK_GRAY: Color = Color::raw(0.2, 0.2, 0.2);
    pub const WHITE: Color = Color::raw(1.0, 1.0, 1.0);

    /// Create a color, clamping each component into `[0.0, 1.0]`
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self {
            red: clamp_unit(red),
            green: clamp_unit(green),
            blue: clamp_unit(blue),
        }
    }

    const fn raw(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    /// Components as `f32`, the form GL vertex data wants
    pub fn to_f32(self) -> [f32; 3] {
        [self.red as f32, self.green as f32, self.blue as f32]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<[f64; 3]> for Color {
    fn from(rgb: [f64; 3]) -> Self {
        Color::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Color> for [f64; 3] {
    fn from(color: Color) -> Self {
        [color.red, color.green, color.blue]
    }
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Axis-aligned box anchored at its left-bottom corner
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self { left, bottom, width, height }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.bottom + self.height / 2.0)
    }

    /// Inclusive on all four edges
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right() && y >= self.bottom && y <= self.top()
    }

    /// Smallest box covering both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let left = self.left.min(other.left);
        let bottom = self.bottom.min(other.bottom);
        let right = self.right().max(other.right());
        let top = self.top().max(other.top());

        BoundingBox::new(left, bottom, right - left, top - bottom)
    }

    pub fn translate(&self, dx: f64, dy: f64) -> BoundingBox {
        BoundingBox::new(self.left + dx, self.bottom + dy, self.width, self.height)
    }

    /// True if either dimension is negative
    pub fn is_inverted(&self) -> bool {
        self.width < 0.0 || self.height < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_clamps_components() {
        let c = Color::new(-0.5, 0.25, 7.0);
        assert_eq!(c.red(), 0.0);
        assert_eq!(c.green(), 0.25);
        assert_eq!(c.blue(), 1.0);
    }

    #[test]
    fn test_color_from_triple_clamps() {
        let c: Color = [2.0, 0.5, -1.0].into();
        assert_eq!(c, Color::new(1.0, 0.5, 0.0));
    }

    #[test]
    fn test_box_contains_edges() {
        let b = BoundingBox::new(10.0, 20.0, 30.0, 40.0);
        assert!(b.contains(10.0, 20.0));
        assert!(b.contains(40.0, 60.0));
        assert!(b.contains(10.0, 60.0));
        assert!(b.contains(40.0, 20.0));
        assert!(b.contains(25.0, 20.0));
        assert!(!b.contains(9.999, 20.0));
        assert!(!b.contains(40.0, 60.001));
    }

    #[test]
    fn test_box_union() {
        let a = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
        let b = BoundingBox::new(5.0, 5.0, 1.0, 1.0);
        assert_eq!(a.union(&b), BoundingBox::new(0.0, 0.0, 6.0, 6.0));
        assert_eq!(b.union(&a), a.union(&b));
    }

    #[test]
    fn test_box_translate_keeps_size() {
        let b = BoundingBox::new(1.0, 2.0, 3.0, 4.0).translate(-1.0, 3.0);
        assert_eq!(b, BoundingBox::new(0.0, 5.0, 3.0, 4.0));
    }
}
