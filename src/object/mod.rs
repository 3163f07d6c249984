//! Graphical objects
//!
//! A graphical object is a positioned, sized item living inside an
//! `ObjectWindow`. Concrete objects embed an `ObjectState` and implement
//! `Paint`; everything else in `GraphicalObject` has a default that reads and
//! writes that state.

pub mod composite;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::draw::Canvas;
use crate::geometry::BoundingBox;
use crate::input::{CursorShape, Key, KeyModifiers, MouseButton};
use crate::window::WindowId;

pub use composite::CompositeObject;

/// Shared by every object type, so ids are unique across the process
static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a graphical object, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        ObjectId(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

/// Cursor an object shows while the pointer is over it, unless changed
pub const DEFAULT_OBJECT_CURSOR: CursorShape = CursorShape::Crosshair;

/// State every graphical object carries
#[derive(Debug)]
pub struct ObjectState {
    id: ObjectId,
    bounds: BoundingBox,
    mouse_over: bool,
    /// Pointer displacement from (left, bottom) at the last successful hit
    hit_offset: (f64, f64),
    cursor: CursorShape,
    /// Owning window, if any (non-owning)
    window: Option<WindowId>,
}

impl ObjectState {
    pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
        Self::with_bounds(BoundingBox::new(left, bottom, width, height))
    }

    pub fn with_bounds(bounds: BoundingBox) -> Self {
        Self {
            id: ObjectId::next(),
            bounds: sanitize(bounds),
            mouse_over: false,
            hit_offset: (0.0, 0.0),
            cursor: DEFAULT_OBJECT_CURSOR,
            window: None,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: BoundingBox) {
        self.bounds = sanitize(bounds);
    }

    pub fn move_to(&mut self, left: f64, bottom: f64) {
        self.bounds.left = left;
        self.bounds.bottom = bottom;
    }

    pub fn mouse_over(&self) -> bool {
        self.mouse_over
    }

    pub fn set_mouse_over(&mut self, flag: bool) {
        self.mouse_over = flag;
    }

    pub fn hit_offset(&self) -> (f64, f64) {
        self.hit_offset
    }

    /// Inclusive containment test that remembers the offset on success
    pub fn hit(&mut self, x: f64, y: f64) -> bool {
        if self.bounds.contains(x, y) {
            self.hit_offset = (x - self.bounds.left, y - self.bounds.bottom);
            true
        } else {
            false
        }
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: CursorShape) -> CursorShape {
        std::mem::replace(&mut self.cursor, cursor)
    }

    pub fn window(&self) -> Option<WindowId> {
        self.window
    }

    pub fn set_window(&mut self, window: Option<WindowId>) -> Option<WindowId> {
        std::mem::replace(&mut self.window, window)
    }

    /// Copy geometry and cursor from `other`, keeping this object's identity
    /// and ownership
    pub fn assign_from(&mut self, other: &ObjectState) {
        self.bounds = other.bounds;
        self.hit_offset = other.hit_offset;
        self.cursor = other.cursor;
    }
}

impl Clone for ObjectState {
    /// Same geometry, fresh identity, not attached to any window
    fn clone(&self) -> Self {
        Self {
            id: ObjectId::next(),
            bounds: self.bounds,
            mouse_over: false,
            hit_offset: self.hit_offset,
            cursor: DEFAULT_OBJECT_CURSOR,
            window: None,
        }
    }
}

fn sanitize(mut bounds: BoundingBox) -> BoundingBox {
    if bounds.is_inverted() {
        warn!(
            "Negative object size {}x{}, clamping to zero",
            bounds.width, bounds.height
        );
        bounds.width = bounds.width.max(0.0);
        bounds.height = bounds.height.max(0.0);
    }
    bounds
}

/// Whether an object consumed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Claimed,
    Ignored,
}

/// Request an object makes of its owning collection from inside a hook
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectCommand {
    /// Remove (and drop) the object whose hook issued the command
    RemoveSelf,
    RemoveAll,
}

/// Context handed to object event hooks
///
/// Commands are applied by the owning `ObjectSet` once the hook returns, so
/// an object can safely ask to be removed from its own handler. The owning
/// window repaints after every event it forwards to an object.
#[derive(Debug)]
pub struct ObjectContext {
    window: Option<WindowId>,
    modifiers: KeyModifiers,
    commands: Vec<ObjectCommand>,
}

impl ObjectContext {
    pub fn new(window: Option<WindowId>, modifiers: KeyModifiers) -> Self {
        Self {
            window,
            modifiers,
            commands: Vec::new(),
        }
    }

    pub fn window(&self) -> Option<WindowId> {
        self.window
    }

    /// Modifiers held during the latest mouse-button or key event
    pub fn key_modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    pub fn remove_self(&mut self) {
        self.commands.push(ObjectCommand::RemoveSelf);
    }

    pub fn remove_all(&mut self) {
        self.commands.push(ObjectCommand::RemoveAll);
    }

    pub fn commands(&self) -> &[ObjectCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<ObjectCommand> {
        self.commands
    }
}

/// Draw an object in viewport coordinates
pub trait Paint {
    fn paint(&self, canvas: &mut dyn Canvas);
}

/// A positioned, sized, identity-carrying object inside an `ObjectWindow`
pub trait GraphicalObject: Paint {
    fn state(&self) -> &ObjectState;

    fn state_mut(&mut self) -> &mut ObjectState;

    fn id(&self) -> ObjectId {
        self.state().id()
    }

    fn bounds(&self) -> BoundingBox {
        self.state().bounds()
    }

    fn left(&self) -> f64 {
        self.bounds().left
    }

    fn bottom(&self) -> f64 {
        self.bounds().bottom
    }

    fn width(&self) -> f64 {
        self.bounds().width
    }

    fn height(&self) -> f64 {
        self.bounds().height
    }

    fn set_bounds(&mut self, bounds: BoundingBox) {
        self.state_mut().set_bounds(bounds);
    }

    fn is_mouse_over(&self) -> bool {
        self.state().mouse_over()
    }

    /// Inclusive hit test; records the hit offset used by `mouse_dragged`
    fn hit(&mut self, x: f64, y: f64) -> bool {
        self.state_mut().hit(x, y)
    }

    /// Move the left-bottom corner, keeping the size
    fn move_to(&mut self, left: f64, bottom: f64) {
        self.state_mut().move_to(left, bottom);
    }

    fn mouse_pressed(
        &mut self,
        _ctx: &mut ObjectContext,
        _x: f64,
        _y: f64,
        _button: MouseButton,
    ) -> EventResponse {
        EventResponse::Ignored
    }

    fn mouse_released(
        &mut self,
        _ctx: &mut ObjectContext,
        _x: f64,
        _y: f64,
        _button: MouseButton,
    ) -> EventResponse {
        EventResponse::Ignored
    }

    fn mouse_moved(&mut self, _ctx: &mut ObjectContext, _x: f64, _y: f64) -> EventResponse {
        EventResponse::Ignored
    }

    /// Follows the pointer, preserving the offset captured by the last hit
    fn mouse_dragged(&mut self, _ctx: &mut ObjectContext, x: f64, y: f64) -> EventResponse {
        let (dx, dy) = self.state().hit_offset();
        self.move_to(x - dx, y - dy);
        EventResponse::Claimed
    }

    fn key_pressed(&mut self, _ctx: &mut ObjectContext, _key: Key, _x: f64, _y: f64) -> EventResponse {
        EventResponse::Ignored
    }

    /// Written by the owning window's hover tracking only
    fn set_mouse_over(&mut self, flag: bool) {
        self.state_mut().set_mouse_over(flag);
    }

    fn cursor(&self) -> CursorShape {
        self.state().cursor()
    }

    /// Returns the previous cursor
    fn set_cursor(&mut self, cursor: CursorShape) -> CursorShape {
        self.state_mut().set_cursor(cursor)
    }

    fn window(&self) -> Option<WindowId> {
        self.state().window()
    }

    /// Returns the previous owner
    fn set_window(&mut self, window: Option<WindowId>) -> Option<WindowId> {
        self.state_mut().set_window(window)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::geometry::Color;

    /// Minimal filled box used across object and window tests
    #[derive(Debug, Clone)]
    pub(crate) struct TestBox {
        pub state: ObjectState,
    }

    impl TestBox {
        pub fn new(left: f64, bottom: f64, width: f64, height: f64) -> Self {
            Self {
                state: ObjectState::new(left, bottom, width, height),
            }
        }
    }

    impl Paint for TestBox {
        fn paint(&self, canvas: &mut dyn Canvas) {
            let b = self.bounds();
            canvas.set_color(Color::GRAY);
            canvas.fill_rectangle(b.left, b.bottom, b.width, b.height);
        }
    }

    impl GraphicalObject for TestBox {
        fn state(&self) -> &ObjectState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ObjectState {
            &mut self.state
        }
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let a = TestBox::new(0.0, 0.0, 1.0, 1.0);
        let b = TestBox::new(0.0, 0.0, 1.0, 1.0);
        assert_ne!(a.id(), b.id());
        assert!(b.id() > a.id());
    }

    #[test]
    fn test_ids_increase_across_object_kinds() {
        let a = TestBox::new(0.0, 0.0, 1.0, 1.0);
        let b = super::CompositeObject::new();
        let c = a.clone();
        let d = TestBox::new(0.0, 0.0, 1.0, 1.0);
        let ids = [a.id(), b.id(), c.id(), d.id()];
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "{:?}", ids);
    }

    #[test]
    fn test_clone_gets_fresh_identity() {
        let mut a = TestBox::new(1.0, 2.0, 3.0, 4.0);
        a.set_cursor(CursorShape::Help);
        a.set_mouse_over(true);

        let b = a.clone();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.bounds(), b.bounds());
        assert_eq!(b.cursor(), DEFAULT_OBJECT_CURSOR);
        assert!(!b.is_mouse_over());
        assert_eq!(b.window(), None);
    }

    #[test]
    fn test_assign_keeps_identity() {
        let mut a = TestBox::new(0.0, 0.0, 1.0, 1.0);
        let mut b = TestBox::new(5.0, 5.0, 2.0, 2.0);
        b.set_cursor(CursorShape::Wait);
        let id = a.id();

        a.state.assign_from(&b.state);
        assert_eq!(a.id(), id);
        assert_eq!(a.bounds(), BoundingBox::new(5.0, 5.0, 2.0, 2.0));
        assert_eq!(a.cursor(), CursorShape::Wait);
    }

    #[test]
    fn test_hit_is_inclusive_and_records_offset() {
        let mut obj = TestBox::new(10.0, 20.0, 30.0, 40.0);
        assert!(obj.hit(10.0, 20.0));
        assert_eq!(obj.state().hit_offset(), (0.0, 0.0));
        assert!(obj.hit(40.0, 60.0));
        assert_eq!(obj.state().hit_offset(), (30.0, 40.0));
        assert!(!obj.hit(40.1, 60.0));
        // A miss leaves the last offset alone
        assert_eq!(obj.state().hit_offset(), (30.0, 40.0));
    }

    #[test]
    fn test_drag_preserves_hit_offset() {
        let mut obj = TestBox::new(10.0, 10.0, 20.0, 20.0);
        assert!(obj.hit(15.0, 18.0));

        let mut ctx = ObjectContext::new(None, KeyModifiers::empty());
        let response = obj.mouse_dragged(&mut ctx, 100.0, 200.0);
        assert_eq!(response, EventResponse::Claimed);
        assert_eq!(obj.left(), 95.0);
        assert_eq!(obj.bottom(), 192.0);
        assert_eq!(obj.width(), 20.0);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_negative_size_is_clamped() {
        let obj = TestBox::new(0.0, 0.0, -5.0, 3.0);
        assert_eq!(obj.width(), 0.0);
        assert_eq!(obj.height(), 3.0);
    }

    #[test]
    fn test_setters_return_previous_values() {
        let mut obj = TestBox::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(obj.set_cursor(CursorShape::Text), DEFAULT_OBJECT_CURSOR);
        assert_eq!(obj.cursor(), CursorShape::Text);

        let w = WindowId::next();
        assert_eq!(obj.set_window(Some(w)), None);
        assert_eq!(obj.set_window(None), Some(w));
    }

    #[test]
    fn test_default_hooks_ignore_events() {
        let mut obj = TestBox::new(0.0, 0.0, 1.0, 1.0);
        let mut ctx = ObjectContext::new(None, KeyModifiers::empty());
        assert_eq!(
            obj.mouse_pressed(&mut ctx, 0.5, 0.5, MouseButton::Left),
            EventResponse::Ignored
        );
        assert_eq!(obj.key_pressed(&mut ctx, Key::from_char('x'), 0.5, 0.5), EventResponse::Ignored);
        assert!(ctx.commands().is_empty());
    }
}
