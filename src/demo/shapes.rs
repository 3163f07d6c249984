//! Draggable shapes and the window that spawns them

use std::f64::consts::PI;

use objwin::input::CursorShape;
use objwin::object::{EventResponse, GraphicalObject, ObjectContext, ObjectState, Paint};
use objwin::window::{ObjectWindowContext, ObjectWindowHandler, WindowCore};
use objwin::{Canvas, Color, Key, MouseButton, Point};
use tracing::debug;

/// Filled circle. `L` locks it in place, `D` deletes it.
pub struct Circle {
    state: ObjectState,
    color: Color,
    locked: bool,
}

impl Circle {
    pub fn new(cx: f64, cy: f64, radius: f64, color: Color) -> Self {
        Self {
            state: ObjectState::new(cx - radius, cy - radius, 2.0 * radius, 2.0 * radius),
            color,
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl Paint for Circle {
    fn paint(&self, canvas: &mut dyn Canvas) {
        let b = self.bounds();
        let radius = b.width / 2.0;
        let (cx, cy) = (b.left + radius, b.bottom + radius);

        canvas.set_color(self.color);
        canvas.fill_circle(cx, cy, radius);
        if self.is_locked() {
            canvas.set_color(Color::BLACK);
            canvas.draw_circle(cx, cy, radius);
        }
    }
}

impl GraphicalObject for Circle {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }

    fn mouse_dragged(&mut self, _ctx: &mut ObjectContext, x: f64, y: f64) -> EventResponse {
        if self.is_locked() {
            return EventResponse::Claimed;
        }
        let (dx, dy) = self.state.hit_offset();
        self.move_to(x - dx, y - dy);
        EventResponse::Claimed
    }

    fn key_pressed(&mut self, ctx: &mut ObjectContext, key: Key, _x: f64, _y: f64) -> EventResponse {
        if key.matches_ignore_case('l') {
            self.locked = !self.locked;
            debug!("{} locked: {}", self.id(), self.locked);
            EventResponse::Claimed
        } else if key.matches_ignore_case('d') {
            ctx.remove_self();
            EventResponse::Claimed
        } else {
            EventResponse::Ignored
        }
    }
}

/// Filled rectangle that shows its outline while hovered
pub struct Rectangle {
    state: ObjectState,
    color: Color,
}

impl Rectangle {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64, color: Color) -> Self {
        let mut state = ObjectState::new(left, bottom, width, height);
        state.set_cursor(CursorShape::RightArrow);
        Self { state, color }
    }
}

impl Paint for Rectangle {
    fn paint(&self, canvas: &mut dyn Canvas) {
        let b = self.bounds();
        canvas.set_color(self.color);
        canvas.fill_rectangle(b.left, b.bottom, b.width, b.height);
        if self.is_mouse_over() {
            canvas.set_color(Color::BLACK);
            canvas.draw_rectangle(b.left, b.bottom, b.width, b.height);
        }
    }
}

impl GraphicalObject for Rectangle {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }
}

/// Five-pointed star inscribed in its box
pub struct Star {
    state: ObjectState,
    color: Color,
}

impl Star {
    pub fn new(cx: f64, cy: f64, radius: f64, color: Color) -> Self {
        let mut state = ObjectState::new(cx - radius, cy - radius, 2.0 * radius, 2.0 * radius);
        state.set_cursor(CursorShape::Spray);
        Self { state, color }
    }

    /// Outline vertices, alternating outer and inner points, first one up
    pub fn points(&self) -> Vec<Point> {
        let b = self.bounds();
        let outer = b.width / 2.0;
        let inner = outer * 0.4;
        let (cx, cy) = (b.left + outer, b.bottom + outer);

        (0..10)
            .map(|i| {
                let r = if i % 2 == 0 { outer } else { inner };
                let angle = PI / 2.0 + i as f64 * PI / 5.0;
                Point::new(cx + r * angle.cos(), cy + r * angle.sin())
            })
            .collect()
    }
}

impl Paint for Star {
    fn paint(&self, canvas: &mut dyn Canvas) {
        let b = self.bounds();
        let center = Point::new(b.left + b.width / 2.0, b.bottom + b.height / 2.0);
        let points = self.points();

        canvas.set_color(self.color);
        // The star is not convex, so fan out from the center
        for (i, p) in points.iter().enumerate() {
            let q = points[(i + 1) % points.len()];
            canvas.fill_triangle(center, *p, q);
        }
    }
}

impl GraphicalObject for Star {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }
}

const PALETTE: [Color; 4] = [Color::RED, Color::DARK_GREEN, Color::BLUE, Color::MAGENTA];

/// Right click spawns the next shape at the pointer, `R` clears the window
#[derive(Debug, Default)]
pub struct ShapesHandler {
    spawned: usize,
}

impl ShapesHandler {
    fn spawn(&mut self, x: f64, y: f64) -> Box<dyn GraphicalObject> {
        let color = PALETTE[self.spawned % PALETTE.len()];
        let shape: Box<dyn GraphicalObject> = match self.spawned % 3 {
            0 => Box::new(Circle::new(x, y, 1.0, color)),
            1 => Box::new(Rectangle::new(x - 1.0, y - 0.75, 2.0, 1.5, color)),
            _ => Box::new(Star::new(x, y, 1.25, color)),
        };
        self.spawned += 1;
        shape
    }
}

impl ObjectWindowHandler for ShapesHandler {
    fn paint(&self, core: &WindowCore, canvas: &mut dyn Canvas) {
        core.draw_axes(canvas, 1.0, 1.0);
    }

    fn mouse_pressed(&mut self, ctx: &mut ObjectWindowContext<'_>, x: f64, y: f64, button: MouseButton) {
        if button == MouseButton::Right && ctx.claimed_by().is_none() {
            let id = ctx.add(self.spawn(x, y));
            debug!("Spawned {} at ({:.2}, {:.2})", id, x, y);
        }
    }

    fn key_pressed(&mut self, ctx: &mut ObjectWindowContext<'_>, key: Key, _x: f64, _y: f64) {
        if ctx.claimed_by().is_none() && key.matches_ignore_case('r') {
            debug!("Removing {} objects", ctx.objects().len());
            ctx.remove_all();
        }
    }
}
