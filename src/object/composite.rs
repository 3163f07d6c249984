//! Composite objects
//!
//! A `CompositeObject` groups child objects and behaves as one object: it is
//! hit-tested and dragged by the union of its children's boxes.

use crate::draw::Canvas;
use crate::geometry::Color;
use crate::window::WindowId;

use super::{GraphicalObject, ObjectState, Paint};

/// Graphical object made of an ordered set of children
pub struct CompositeObject {
    state: ObjectState,
    children: Vec<Box<dyn GraphicalObject>>,
}

impl CompositeObject {
    pub fn new() -> Self {
        Self {
            state: ObjectState::new(0.0, 0.0, 0.0, 0.0),
            children: Vec::new(),
        }
    }

    /// Append a child; the composite's box grows to cover it
    pub fn add(&mut self, mut child: Box<dyn GraphicalObject>) {
        let bounds = if self.children.is_empty() {
            child.bounds()
        } else {
            self.state.bounds().union(&child.bounds())
        };
        self.state.set_bounds(bounds);
        child.set_window(self.state.window());
        self.children.push(child);
    }

    pub fn children(&self) -> &[Box<dyn GraphicalObject>] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for CompositeObject {
    fn default() -> Self {
        Self::new()
    }
}

impl Paint for CompositeObject {
    fn paint(&self, canvas: &mut dyn Canvas) {
        let b = self.state.bounds();
        canvas.set_color(Color::BLUE);
        canvas.draw_rectangle(b.left, b.bottom, b.width, b.height);

        for child in &self.children {
            child.paint(canvas);
        }
    }
}

impl GraphicalObject for CompositeObject {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }

    /// Children keep their position relative to the composite's corner
    fn move_to(&mut self, left: f64, bottom: f64) {
        let b = self.state.bounds();
        let (dx, dy) = (left - b.left, bottom - b.bottom);
        for child in &mut self.children {
            let cb = child.bounds();
            child.move_to(cb.left + dx, cb.bottom + dy);
        }
        self.state.move_to(left, bottom);
    }

    fn set_window(&mut self, window: Option<WindowId>) -> Option<WindowId> {
        for child in &mut self.children {
            child.set_window(window);
        }
        self.state.set_window(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{DrawCommand, RecordingCanvas};
    use crate::geometry::BoundingBox;
    use crate::input::KeyModifiers;
    use crate::object::tests::TestBox;
    use crate::object::ObjectContext;

    #[test]
    fn test_bounds_are_union_of_children() {
        let mut c = CompositeObject::new();
        c.add(Box::new(TestBox::new(0.0, 0.0, 2.0, 2.0)));
        assert_eq!(c.bounds(), BoundingBox::new(0.0, 0.0, 2.0, 2.0));

        c.add(Box::new(TestBox::new(5.0, 5.0, 1.0, 1.0)));
        assert_eq!(c.bounds(), BoundingBox::new(0.0, 0.0, 6.0, 6.0));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_first_child_replaces_initial_box() {
        let mut c = CompositeObject::new();
        c.add(Box::new(TestBox::new(10.0, 10.0, 1.0, 1.0)));
        // The empty composite's (0,0) corner must not leak into the union
        assert_eq!(c.bounds(), BoundingBox::new(10.0, 10.0, 1.0, 1.0));
    }

    #[test]
    fn test_move_translates_children() {
        let mut c = CompositeObject::new();
        c.add(Box::new(TestBox::new(0.0, 0.0, 2.0, 2.0)));
        c.add(Box::new(TestBox::new(5.0, 5.0, 1.0, 1.0)));

        c.move_to(10.0, 20.0);
        assert_eq!(c.bounds(), BoundingBox::new(10.0, 20.0, 6.0, 6.0));
        assert_eq!(c.children()[0].bounds(), BoundingBox::new(10.0, 20.0, 2.0, 2.0));
        assert_eq!(c.children()[1].bounds(), BoundingBox::new(15.0, 25.0, 1.0, 1.0));
    }

    #[test]
    fn test_drag_moves_whole_group() {
        let mut c = CompositeObject::new();
        c.add(Box::new(TestBox::new(0.0, 0.0, 4.0, 4.0)));
        assert!(c.hit(1.0, 1.0));

        let mut ctx = ObjectContext::new(None, KeyModifiers::empty());
        c.mouse_dragged(&mut ctx, 11.0, 11.0);
        assert_eq!(c.children()[0].bounds(), BoundingBox::new(10.0, 10.0, 4.0, 4.0));
    }

    #[test]
    fn test_paint_frames_then_children() {
        let mut c = CompositeObject::new();
        c.add(Box::new(TestBox::new(0.0, 0.0, 2.0, 2.0)));
        c.add(Box::new(TestBox::new(5.0, 5.0, 1.0, 1.0)));

        let mut canvas = RecordingCanvas::new();
        c.paint(&mut canvas);
        let rects: Vec<(f64, bool, Color)> = canvas
            .commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Rectangle { left, width, filled, color, .. } => {
                    Some((*left + *width, *filled, *color))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (6.0, false, Color::BLUE),
                (2.0, true, Color::GRAY),
                (6.0, true, Color::GRAY),
            ]
        );
    }

    #[test]
    fn test_window_propagates_to_children() {
        let mut c = CompositeObject::new();
        c.add(Box::new(TestBox::new(0.0, 0.0, 1.0, 1.0)));
        let w = WindowId::next();
        c.set_window(Some(w));
        assert_eq!(c.children()[0].window(), Some(w));

        // Children added later inherit the current owner
        c.add(Box::new(TestBox::new(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(c.children()[1].window(), Some(w));
    }
}
