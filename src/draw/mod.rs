//! Immediate-mode drawing surface
//!
//! `paint` implementations draw through a `Canvas`. Backends only have to
//! provide the primitive operations; outlines, circles and polygons are built
//! from lines and triangles unless a backend overrides them.
//! `RecordingCanvas` keeps the high-level calls so tests can inspect them.

pub mod stroke_font;

use std::f64::consts::PI;

use crate::geometry::{Color, Point};

/// Segments used to approximate circles
pub const CIRCLE_SEGMENTS: usize = 48;

/// Drawing operations available to `paint` implementations
pub trait Canvas {
    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Color);

    /// Set the color used by subsequent drawing calls
    fn set_color(&mut self, color: Color);

    fn color(&self) -> Color;

    fn draw_point(&mut self, x: f64, y: f64);

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64);

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point);

    fn draw_rectangle(&mut self, left: f64, bottom: f64, width: f64, height: f64) {
        let (right, top) = (left + width, bottom + height);
        self.draw_line(left, bottom, right, bottom);
        self.draw_line(right, bottom, right, top);
        self.draw_line(right, top, left, top);
        self.draw_line(left, top, left, bottom);
    }

    fn fill_rectangle(&mut self, left: f64, bottom: f64, width: f64, height: f64) {
        let (right, top) = (left + width, bottom + height);
        let lb = Point::new(left, bottom);
        let rt = Point::new(right, top);
        self.fill_triangle(lb, Point::new(right, bottom), rt);
        self.fill_triangle(lb, rt, Point::new(left, top));
    }

    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let points = circle_points(cx, cy, radius);
        self.draw_polygon(&points);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let points = circle_points(cx, cy, radius);
        self.fill_polygon(&points);
    }

    /// Closed outline through `points`
    fn draw_polygon(&mut self, points: &[Point]) {
        if points.len() < 2 {
            return;
        }
        for (i, p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            self.draw_line(p.x, p.y, q.x, q.y);
        }
    }

    /// Text in the built-in stroke font, baseline starting at (x, y)
    ///
    /// `height` is the capital letter height in viewport units.
    fn draw_text(&mut self, x: f64, y: f64, text: &str, height: f64) {
        stroke_font::draw_text(self, x, y, text, height);
    }

    /// Filled convex polygon (triangle fan from the first point)
    fn fill_polygon(&mut self, points: &[Point]) {
        if points.len() < 3 {
            return;
        }
        let first = points[0];
        for pair in points[1..].windows(2) {
            self.fill_triangle(first, pair[0], pair[1]);
        }
    }
}

/// Points on a circle, counter-clockwise starting at angle zero
pub fn circle_points(cx: f64, cy: f64, radius: f64) -> Vec<Point> {
    (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / CIRCLE_SEGMENTS as f64;
            Point::new(cx + radius * angle.cos(), cy + radius * angle.sin())
        })
        .collect()
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Point { x: f64, y: f64, color: Color },
    Line { from: Point, to: Point, color: Color },
    Triangle { points: [Point; 3], color: Color },
    Rectangle { left: f64, bottom: f64, width: f64, height: f64, filled: bool, color: Color },
    Circle { center: Point, radius: f64, filled: bool, color: Color },
    Polygon { points: Vec<Point>, filled: bool, color: Color },
    Text { at: Point, text: String, height: f64, color: Color },
}

/// Canvas that records every call instead of rasterizing it
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    color: Color,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn color(&self) -> Color {
        self.color
    }

    fn draw_point(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::Point { x, y, color: self.color });
    }

    fn draw_line(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.commands.push(DrawCommand::Line {
            from: Point::new(x0, y0),
            to: Point::new(x1, y1),
            color: self.color,
        });
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) {
        self.commands.push(DrawCommand::Triangle { points: [a, b, c], color: self.color });
    }

    fn draw_rectangle(&mut self, left: f64, bottom: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Rectangle {
            left,
            bottom,
            width,
            height,
            filled: false,
            color: self.color,
        });
    }

    fn fill_rectangle(&mut self, left: f64, bottom: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::Rectangle {
            left,
            bottom,
            width,
            height,
            filled: true,
            color: self.color,
        });
    }

    fn draw_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.commands.push(DrawCommand::Circle {
            center: Point::new(cx, cy),
            radius,
            filled: false,
            color: self.color,
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        self.commands.push(DrawCommand::Circle {
            center: Point::new(cx, cy),
            radius,
            filled: true,
            color: self.color,
        });
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            filled: false,
            color: self.color,
        });
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            filled: true,
            color: self.color,
        });
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, height: f64) {
        self.commands.push(DrawCommand::Text {
            at: Point::new(x, y),
            text: text.to_owned(),
            height,
            color: self.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts primitives to check the provided shape decompositions
    #[derive(Default)]
    struct PrimitiveCounter {
        color: Color,
        lines: usize,
        triangles: usize,
    }

    impl Canvas for PrimitiveCounter {
        fn clear(&mut self, _color: Color) {}
        fn set_color(&mut self, color: Color) {
            self.color = color;
        }
        fn color(&self) -> Color {
            self.color
        }
        fn draw_point(&mut self, _x: f64, _y: f64) {}
        fn draw_line(&mut self, _x0: f64, _y0: f64, _x1: f64, _y1: f64) {
            self.lines += 1;
        }
        fn fill_triangle(&mut self, _a: Point, _b: Point, _c: Point) {
            self.triangles += 1;
        }
    }

    #[test]
    fn test_default_shapes_decompose_into_primitives() {
        let mut c = PrimitiveCounter::default();
        c.draw_rectangle(0.0, 0.0, 1.0, 1.0);
        assert_eq!(c.lines, 4);
        c.fill_rectangle(0.0, 0.0, 1.0, 1.0);
        assert_eq!(c.triangles, 2);
        c.fill_circle(0.0, 0.0, 1.0);
        assert_eq!(c.triangles, 2 + CIRCLE_SEGMENTS - 2);
        c.draw_circle(0.0, 0.0, 1.0);
        assert_eq!(c.lines, 4 + CIRCLE_SEGMENTS);
        c.draw_text(0.0, 0.0, "T1", 1.0);
        assert_eq!(c.lines, 4 + CIRCLE_SEGMENTS + 5);
    }

    #[test]
    fn test_degenerate_polygons_draw_nothing() {
        let mut c = PrimitiveCounter::default();
        c.draw_polygon(&[Point::new(0.0, 0.0)]);
        c.fill_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!((c.lines, c.triangles), (0, 0));
    }

    #[test]
    fn test_recording_canvas_keeps_text() {
        let mut c = RecordingCanvas::new();
        c.set_color(Color::BLUE);
        c.draw_text(-1.0, 2.0, "12:00", 0.5);
        assert_eq!(
            c.commands(),
            &[DrawCommand::Text {
                at: Point::new(-1.0, 2.0),
                text: "12:00".into(),
                height: 0.5,
                color: Color::BLUE,
            }]
        );
    }

    #[test]
    fn test_recording_canvas_tags_current_color() {
        let mut c = RecordingCanvas::new();
        c.set_color(Color::RED);
        c.fill_rectangle(1.0, 2.0, 3.0, 4.0);
        assert_eq!(
            c.commands(),
            &[DrawCommand::Rectangle {
                left: 1.0,
                bottom: 2.0,
                width: 3.0,
                height: 4.0,
                filled: true,
                color: Color::RED,
            }]
        );
    }
}
