//! Object windows
//!
//! An `ObjectWindow` owns an ordered collection of graphical objects and
//! routes input to them. Insertion order is paint order, so the most recently
//! added object is drawn last and wins hit tests.
//!
//! Every input event passes through three phases:
//! 1. object phase: the active object (the one under the pointer) gets the
//!    event,
//! 2. application phase: the `ObjectWindowHandler` hook,
//! 3. base phase: shared window behavior, run by `window::dispatch`.

use tracing::{debug, warn};

use crate::draw::Canvas;
use crate::input::{Key, KeyModifiers, MouseButton};
use crate::object::{EventResponse, GraphicalObject, ObjectCommand, ObjectContext, ObjectId};

use super::{Window, WindowCore, WindowId};

/// Ordered, owning collection of graphical objects plus the active object
pub struct ObjectSet {
    window: WindowId,
    objects: Vec<Box<dyn GraphicalObject>>,
    /// Always names a member of `objects`
    active: Option<ObjectId>,
}

impl ObjectSet {
    pub fn new(window: WindowId) -> Self {
        Self {
            window,
            objects: Vec::new(),
            active: None,
        }
    }

    /// Append an object on top of the others
    pub fn add(&mut self, mut object: Box<dyn GraphicalObject>) -> ObjectId {
        if let Some(previous) = object.set_window(Some(self.window)) {
            if previous != self.window {
                warn!("{} moved from {} to {}", object.id(), previous, self.window);
            }
        }
        let id = object.id();
        debug!("Added {} to {}", id, self.window);
        self.objects.push(object);
        id
    }

    /// Remove and drop the first object with `id`
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let Some(pos) = self.objects.iter().position(|o| o.id() == id) else {
            return false;
        };
        if self.active == Some(id) {
            self.active = None;
        }
        self.objects.remove(pos);
        debug!("Removed {} from {}", id, self.window);
        true
    }

    pub fn remove_all(&mut self) {
        self.active = None;
        self.objects.clear();
    }

    /// Topmost object containing (x, y)
    pub fn hit(&mut self, x: f64, y: f64) -> Option<ObjectId> {
        self.objects
            .iter_mut()
            .rev()
            .find_map(|o| o.hit(x, y).then(|| o.id()))
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.iter().any(|o| o.id() == id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&(dyn GraphicalObject + 'static)> {
        self.objects.iter().find(|o| o.id() == id).map(|o| o.as_ref())
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut (dyn GraphicalObject + 'static)> {
        self.objects.iter_mut().find(|o| o.id() == id).map(|o| o.as_mut())
    }

    /// Objects in paint order (bottom to top)
    pub fn objects(&self) -> &[Box<dyn GraphicalObject>] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Run a hook on object `id`, then apply the commands it issued
    fn forward<F>(&mut self, id: ObjectId, modifiers: KeyModifiers, hook: F) -> Option<EventResponse>
    where
        F: FnOnce(&mut (dyn GraphicalObject + 'static), &mut ObjectContext) -> EventResponse,
    {
        let mut ctx = ObjectContext::new(Some(self.window), modifiers);
        let object = self.get_mut(id)?;
        let response = hook(object, &mut ctx);

        for command in ctx.into_commands() {
            match command {
                ObjectCommand::RemoveSelf => {
                    self.remove(id);
                }
                ObjectCommand::RemoveAll => self.remove_all(),
            }
        }
        Some(response)
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        for object in &self.objects {
            object.paint(canvas);
        }
    }
}

/// Access handed to `ObjectWindowHandler` hooks
pub struct ObjectWindowContext<'a> {
    core: &'a mut WindowCore,
    objects: &'a mut ObjectSet,
    claimed_by: Option<ObjectId>,
}

impl<'a> ObjectWindowContext<'a> {
    pub fn core(&self) -> &WindowCore {
        self.core
    }

    pub fn core_mut(&mut self) -> &mut WindowCore {
        self.core
    }

    pub fn objects(&self) -> &ObjectSet {
        self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectSet {
        self.objects
    }

    pub fn add(&mut self, object: Box<dyn GraphicalObject>) -> ObjectId {
        self.core.repaint();
        self.objects.add(object)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.core.repaint();
        self.objects.remove(id)
    }

    pub fn remove_all(&mut self) {
        self.core.repaint();
        self.objects.remove_all();
    }

    pub fn repaint(&mut self) {
        self.core.repaint();
    }

    /// Object that claimed the current event in the object phase, if any
    pub fn claimed_by(&self) -> Option<ObjectId> {
        self.claimed_by
    }
}

/// Application behavior of an `ObjectWindow`
///
/// Hooks run after the objects have seen the event. All default to no-op.
#[allow(unused_variables)]
pub trait ObjectWindowHandler {
    /// Draw the window's own content; objects are drawn on top afterwards
    fn paint(&self, core: &WindowCore, canvas: &mut dyn Canvas) {}

    fn mouse_pressed(&mut self, ctx: &mut ObjectWindowContext<'_>, x: f64, y: f64, button: MouseButton) {}

    fn mouse_released(&mut self, ctx: &mut ObjectWindowContext<'_>, x: f64, y: f64, button: MouseButton) {}

    fn mouse_moved(&mut self, ctx: &mut ObjectWindowContext<'_>, x: f64, y: f64) {}

    fn mouse_dragged(&mut self, ctx: &mut ObjectWindowContext<'_>, x: f64, y: f64) {}

    fn mouse_entered(&mut self, ctx: &mut ObjectWindowContext<'_>) {}

    fn mouse_exited(&mut self, ctx: &mut ObjectWindowContext<'_>) {}

    fn key_pressed(&mut self, ctx: &mut ObjectWindowContext<'_>, key: Key, x: f64, y: f64) {}

    fn resized(&mut self, ctx: &mut ObjectWindowContext<'_>, width: i32, height: i32) {}

    fn timer_expired(&mut self, ctx: &mut ObjectWindowContext<'_>) {}
}

/// Plain object window without application behavior
impl ObjectWindowHandler for () {}

/// Window owning graphical objects, with hover tracking and dragging
pub struct ObjectWindow<H: ObjectWindowHandler = ()> {
    core: WindowCore,
    objects: ObjectSet,
    handler: H,
}

impl<H: ObjectWindowHandler> ObjectWindow<H> {
    pub fn new(core: WindowCore, handler: H) -> Self {
        let objects = ObjectSet::new(core.id());
        Self { core, objects, handler }
    }

    pub fn add(&mut self, object: Box<dyn GraphicalObject>) -> ObjectId {
        self.core.repaint();
        self.objects.add(object)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        self.core.repaint();
        self.objects.remove(id)
    }

    pub fn remove_all(&mut self) {
        self.core.repaint();
        self.objects.remove_all();
    }

    pub fn hit(&mut self, x: f64, y: f64) -> Option<ObjectId> {
        self.objects.hit(x, y)
    }

    pub fn active(&self) -> Option<ObjectId> {
        self.objects.active()
    }

    pub fn objects(&self) -> &ObjectSet {
        &self.objects
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Object phase: hand the event to the active object, if there is one
    fn forward_to_active<F>(&mut self, hook: F) -> Option<ObjectId>
    where
        F: FnOnce(&mut (dyn GraphicalObject + 'static), &mut ObjectContext) -> EventResponse,
    {
        let id = self.objects.active()?;
        let modifiers = self.core.key_modifiers();
        let response = self.objects.forward(id, modifiers, hook)?;
        self.core.repaint();
        (response == EventResponse::Claimed).then_some(id)
    }

    /// Hover state machine: track which object is under the pointer
    fn track_hover(&mut self, x: f64, y: f64) -> Option<ObjectId> {
        let hit = self.objects.hit(x, y);
        let previous = self.objects.active();
        if hit == previous {
            return None;
        }

        if let Some(prev) = previous {
            if let Some(object) = self.objects.get_mut(prev) {
                object.set_mouse_over(false);
            }
            let normal = self.core.normal_cursor();
            self.core.set_cursor(normal);
        }
        self.objects.active = hit;
        self.core.repaint();

        let id = hit?;
        self.objects.get_mut(id)?.set_mouse_over(true);

        // The hook may change the object's cursor or remove the object
        let modifiers = self.core.key_modifiers();
        let response = self
            .objects
            .forward(id, modifiers, |o, ctx| o.mouse_moved(ctx, x, y));
        if let Some(object) = self.objects.get(id) {
            let cursor = object.cursor();
            self.core.set_cursor(cursor);
        }
        (response? == EventResponse::Claimed).then_some(id)
    }

    fn context(&mut self, claimed_by: Option<ObjectId>) -> (&mut H, ObjectWindowContext<'_>) {
        let ctx = ObjectWindowContext {
            core: &mut self.core,
            objects: &mut self.objects,
            claimed_by,
        };
        (&mut self.handler, ctx)
    }
}

impl<H: ObjectWindowHandler> Window for ObjectWindow<H> {
    fn core(&self) -> &WindowCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WindowCore {
        &mut self.core
    }

    fn paint(&mut self, canvas: &mut dyn Canvas) {
        self.handler.paint(&self.core, canvas);
    }

    /// Objects are painted on top of the window content, in insertion order
    fn postpaint(&mut self, canvas: &mut dyn Canvas) {
        self.objects.paint(canvas);
    }

    fn mouse_pressed(&mut self, x: f64, y: f64, button: MouseButton) {
        let claimed = self.forward_to_active(|o, ctx| o.mouse_pressed(ctx, x, y, button));
        let (handler, mut ctx) = self.context(claimed);
        handler.mouse_pressed(&mut ctx, x, y, button);
    }

    fn mouse_released(&mut self, x: f64, y: f64, button: MouseButton) {
        let claimed = self.forward_to_active(|o, ctx| o.mouse_released(ctx, x, y, button));
        let (handler, mut ctx) = self.context(claimed);
        handler.mouse_released(&mut ctx, x, y, button);
    }

    fn mouse_moved(&mut self, x: f64, y: f64) {
        let claimed = self.track_hover(x, y);
        let (handler, mut ctx) = self.context(claimed);
        handler.mouse_moved(&mut ctx, x, y);
    }

    fn mouse_dragged(&mut self, x: f64, y: f64) {
        let claimed = self.forward_to_active(|o, ctx| o.mouse_dragged(ctx, x, y));
        let (handler, mut ctx) = self.context(claimed);
        handler.mouse_dragged(&mut ctx, x, y);
    }

    fn mouse_entered(&mut self) {
        let (handler, mut ctx) = self.context(None);
        handler.mouse_entered(&mut ctx);
    }

    fn mouse_exited(&mut self) {
        let (handler, mut ctx) = self.context(None);
        handler.mouse_exited(&mut ctx);
    }

    fn key_pressed(&mut self, key: Key, x: f64, y: f64) {
        let claimed = self.forward_to_active(|o, ctx| o.key_pressed(ctx, key, x, y));
        let (handler, mut ctx) = self.context(claimed);
        handler.key_pressed(&mut ctx, key, x, y);
    }

    fn resized(&mut self, width: i32, height: i32) {
        let (handler, mut ctx) = self.context(None);
        handler.resized(&mut ctx, width, height);
    }

    fn timer_expired(&mut self) {
        let (handler, mut ctx) = self.context(None);
        handler.timer_expired(&mut ctx);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::draw::{DrawCommand, RecordingCanvas};
    use crate::geometry::{BoundingBox, Color};
    use crate::input::{CursorShape, QuitPolicy};
    use crate::object::tests::TestBox;
    use crate::object::{ObjectState, Paint};
    use crate::window::{dispatch, Flow, WindowEvent, WindowSpec};

    /// Object counting hook calls through shared cells
    struct Tracker {
        state: ObjectState,
        moved: Rc<Cell<u32>>,
        pressed: Rc<Cell<u32>>,
        dropped: Rc<Cell<u32>>,
        delete_key: Option<char>,
        hover_cursor: Option<CursorShape>,
        remove_on_hover: bool,
    }

    impl Tracker {
        fn new(left: f64, bottom: f64, size: f64) -> Self {
            Self {
                state: ObjectState::new(left, bottom, size, size),
                moved: Rc::default(),
                pressed: Rc::default(),
                dropped: Rc::default(),
                delete_key: None,
                hover_cursor: None,
                remove_on_hover: false,
            }
        }
    }

    impl Drop for Tracker {
        fn drop(&mut self) {
            self.dropped.set(self.dropped.get() + 1);
        }
    }

    impl Paint for Tracker {
        fn paint(&self, canvas: &mut dyn Canvas) {
            let b = self.state.bounds();
            canvas.set_color(Color::GREEN);
            canvas.draw_rectangle(b.left, b.bottom, b.width, b.height);
        }
    }

    impl GraphicalObject for Tracker {
        fn state(&self) -> &ObjectState {
            &self.state
        }

        fn state_mut(&mut self) -> &mut ObjectState {
            &mut self.state
        }

        fn mouse_moved(&mut self, ctx: &mut ObjectContext, _x: f64, _y: f64) -> EventResponse {
            self.moved.set(self.moved.get() + 1);
            if let Some(cursor) = self.hover_cursor {
                self.set_cursor(cursor);
            }
            if self.remove_on_hover {
                ctx.remove_self();
            }
            EventResponse::Ignored
        }

        fn mouse_pressed(
            &mut self,
            _ctx: &mut ObjectContext,
            _x: f64,
            _y: f64,
            _button: MouseButton,
        ) -> EventResponse {
            self.pressed.set(self.pressed.get() + 1);
            EventResponse::Claimed
        }

        fn key_pressed(&mut self, ctx: &mut ObjectContext, key: Key, _x: f64, _y: f64) -> EventResponse {
            match self.delete_key {
                Some(c) if key == c => {
                    ctx.remove_self();
                    EventResponse::Claimed
                }
                _ => EventResponse::Ignored,
            }
        }
    }

    /// Handler recording what the application phase saw
    #[derive(Default)]
    struct Recorder {
        presses: Vec<Option<ObjectId>>,
        keys: Vec<Key>,
    }

    impl ObjectWindowHandler for Recorder {
        fn paint(&self, _core: &WindowCore, canvas: &mut dyn Canvas) {
            canvas.set_color(Color::BLACK);
            canvas.draw_point(0.0, 0.0);
        }

        fn mouse_pressed(&mut self, ctx: &mut ObjectWindowContext<'_>, _x: f64, _y: f64, _button: MouseButton) {
            self.presses.push(ctx.claimed_by());
        }

        fn key_pressed(&mut self, _ctx: &mut ObjectWindowContext<'_>, key: Key, _x: f64, _y: f64) {
            self.keys.push(key);
        }
    }

    fn window<H: ObjectWindowHandler>(handler: H) -> ObjectWindow<H> {
        ObjectWindow::new(WindowCore::new(WindowSpec::new("objects")).unwrap(), handler)
    }

    fn press(w: &mut dyn Window, x: f64, y: f64) -> Flow {
        dispatch(
            w,
            &WindowEvent::MousePressed {
                x,
                y,
                button: MouseButton::Left,
                modifiers: KeyModifiers::empty(),
            },
            &QuitPolicy::default(),
        )
    }

    #[test]
    fn test_hit_prefers_topmost() {
        let mut w = window(());
        let a = w.add(Box::new(TestBox::new(0.0, 0.0, 10.0, 10.0)));
        let b = w.add(Box::new(TestBox::new(5.0, 5.0, 10.0, 10.0)));

        assert_eq!(w.hit(7.0, 7.0), Some(b));
        assert_eq!(w.hit(1.0, 1.0), Some(a));
        assert_eq!(w.hit(50.0, 50.0), None);
    }

    #[test]
    fn test_hit_includes_edges() {
        let mut w = window(());
        let a = w.add(Box::new(TestBox::new(10.0, 20.0, 30.0, 40.0)));
        assert_eq!(w.hit(10.0, 20.0), Some(a));
        assert_eq!(w.hit(40.0, 60.0), Some(a));
        assert_eq!(w.hit(40.01, 60.0), None);
    }

    #[test]
    fn test_add_sets_back_reference() {
        let mut w = window(());
        let id = w.add(Box::new(TestBox::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(w.objects().get(id).and_then(|o| o.window()), Some(w.core().id()));
    }

    #[test]
    fn test_hover_transitions_once() {
        let mut w = window(());
        let tracker = Tracker::new(0.0, 0.0, 10.0);
        let moved = tracker.moved.clone();
        let id = w.add(Box::new(tracker));
        w.objects.get_mut(id).unwrap().set_cursor(CursorShape::Help);
        w.core.take_repaint();

        w.mouse_moved(5.0, 5.0);
        assert_eq!(w.active(), Some(id));
        assert!(w.objects().get(id).unwrap().is_mouse_over());
        assert_eq!(w.core().cursor(), CursorShape::Help);
        assert_eq!(moved.get(), 1);
        assert!(w.core.take_repaint());

        // Moving within the same object is not a transition
        w.mouse_moved(6.0, 6.0);
        assert_eq!(moved.get(), 1);
        assert!(!w.core.needs_repaint());

        w.mouse_moved(50.0, 50.0);
        assert_eq!(w.active(), None);
        assert!(!w.objects().get(id).unwrap().is_mouse_over());
        assert_eq!(w.core().cursor(), w.core().normal_cursor());
        assert!(w.core.take_repaint());
    }

    #[test]
    fn test_hover_moves_between_overlapping_objects() {
        let mut w = window(());
        let a = w.add(Box::new(Tracker::new(0.0, 0.0, 10.0)));
        let b = w.add(Box::new(Tracker::new(5.0, 5.0, 10.0)));

        w.mouse_moved(2.0, 2.0);
        assert_eq!(w.active(), Some(a));
        w.mouse_moved(7.0, 7.0);
        assert_eq!(w.active(), Some(b));
        assert!(!w.objects().get(a).unwrap().is_mouse_over());
        assert!(w.objects().get(b).unwrap().is_mouse_over());
    }

    #[test]
    fn test_press_goes_to_active_then_handler() {
        let mut w = window(Recorder::default());
        let tracker = Tracker::new(0.0, 0.0, 10.0);
        let pressed = tracker.pressed.clone();
        let id = w.add(Box::new(tracker));

        // No active object yet: only the handler sees the press
        press(&mut w, 5.0, 5.0);
        assert_eq!(pressed.get(), 0);

        w.mouse_moved(5.0, 5.0);
        press(&mut w, 5.0, 5.0);
        assert_eq!(pressed.get(), 1);
        assert_eq!(w.handler().presses, vec![None, Some(id)]);
    }

    #[test]
    fn test_drag_moves_active_object_with_offset() {
        let mut w = window(());
        let id = w.add(Box::new(TestBox::new(10.0, 10.0, 20.0, 20.0)));
        w.mouse_moved(15.0, 12.0);
        w.mouse_dragged(115.0, 212.0);
        assert_eq!(
            w.objects().get(id).unwrap().bounds(),
            BoundingBox::new(110.0, 210.0, 20.0, 20.0)
        );
    }

    #[test]
    fn test_remove_clears_active() {
        let mut w = window(());
        let a = w.add(Box::new(TestBox::new(0.0, 0.0, 10.0, 10.0)));
        w.mouse_moved(1.0, 1.0);
        assert_eq!(w.active(), Some(a));

        assert!(w.remove(a));
        assert_eq!(w.active(), None);
        assert!(w.objects().is_empty());
        assert!(!w.remove(a));

        // Events after removal reach nothing stale
        w.mouse_dragged(3.0, 3.0);
        press(&mut w, 1.0, 1.0);
    }

    #[test]
    fn test_hover_cursor_read_after_mouse_moved() {
        let mut w = window(());
        let mut tracker = Tracker::new(0.0, 0.0, 10.0);
        tracker.hover_cursor = Some(CursorShape::Help);
        let id = w.add(Box::new(tracker));

        w.mouse_moved(5.0, 5.0);
        assert_eq!(w.active(), Some(id));
        assert_eq!(w.core().cursor(), CursorShape::Help);
    }

    #[test]
    fn test_object_removed_on_hover_leaves_cursor_alone() {
        let mut w = window(());
        let mut tracker = Tracker::new(0.0, 0.0, 10.0);
        tracker.hover_cursor = Some(CursorShape::Help);
        tracker.remove_on_hover = true;
        let dropped = tracker.dropped.clone();
        w.add(Box::new(tracker));
        let before = w.core().cursor();

        w.mouse_moved(5.0, 5.0);
        assert_eq!(dropped.get(), 1);
        assert_eq!(w.active(), None);
        assert_eq!(w.core().cursor(), before);
    }

    #[test]
    fn test_remove_other_keeps_active() {
        let mut w = window(());
        let a = w.add(Box::new(TestBox::new(0.0, 0.0, 10.0, 10.0)));
        let b = w.add(Box::new(TestBox::new(20.0, 0.0, 10.0, 10.0)));
        w.mouse_moved(1.0, 1.0);
        assert_eq!(w.active(), Some(a));

        assert!(w.remove(b));
        assert_eq!(w.active(), Some(a));
        assert_eq!(w.objects().len(), 1);

        w.mouse_dragged(3.0, 3.0);
        assert_eq!(w.objects().get(a).unwrap().bounds().left, 2.0);
    }

    #[test]
    fn test_remove_all_drops_objects() {
        let mut w = window(());
        let p = Tracker::new(0.0, 0.0, 10.0);
        let q = Tracker::new(20.0, 0.0, 10.0);
        let (dp, dq) = (p.dropped.clone(), q.dropped.clone());
        w.add(Box::new(p));
        w.add(Box::new(q));
        w.mouse_moved(1.0, 1.0);

        w.remove_all();
        assert_eq!((dp.get(), dq.get()), (1, 1));
        assert_eq!(w.active(), None);
        assert!(w.core().needs_repaint());
    }

    #[test]
    fn test_dropping_window_drops_objects() {
        let p = Tracker::new(0.0, 0.0, 10.0);
        let dropped = p.dropped.clone();
        let mut w = window(());
        w.add(Box::new(p));
        drop(w);
        assert_eq!(dropped.get(), 1);
    }

    #[test]
    fn test_object_removes_itself_from_key_handler() {
        let mut w = window(Recorder::default());
        let mut p = Tracker::new(0.0, 0.0, 10.0);
        p.delete_key = Some('d');
        let dropped = p.dropped.clone();
        w.add(Box::new(p));
        w.mouse_moved(5.0, 5.0);

        let flow = dispatch(
            &mut w,
            &WindowEvent::KeyPressed {
                key: Key::from_char('d'),
                x: 5.0,
                y: 5.0,
                modifiers: KeyModifiers::empty(),
            },
            &QuitPolicy::default(),
        );
        assert_eq!(flow, Flow::Continue);
        assert_eq!(dropped.get(), 1);
        assert_eq!(w.active(), None);
        assert!(w.objects().is_empty());
        // Application phase still ran
        assert_eq!(w.handler().keys, vec![Key::from_char('d')]);
    }

    #[test]
    fn test_claimed_event_still_reaches_base_phase() {
        let mut w = window(());
        let mut p = Tracker::new(0.0, 0.0, 10.0);
        p.delete_key = Some('x');
        w.add(Box::new(p));
        w.mouse_moved(5.0, 5.0);

        let flow = dispatch(
            &mut w,
            &WindowEvent::KeyPressed { key: Key::F4, x: 5.0, y: 5.0, modifiers: KeyModifiers::ALT },
            &QuitPolicy::default(),
        );
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn test_objects_paint_over_window_in_order() {
        let mut w = window(Recorder::default());
        w.add(Box::new(TestBox::new(0.0, 0.0, 1.0, 1.0)));
        w.add(Box::new(Tracker::new(2.0, 2.0, 1.0)));

        let mut canvas = RecordingCanvas::new();
        w.paint_all(&mut canvas);
        let cmds = canvas.commands();
        assert_eq!(cmds.len(), 4);
        assert!(matches!(cmds[0], DrawCommand::Clear(_)));
        assert!(matches!(cmds[1], DrawCommand::Point { .. }));
        assert!(matches!(cmds[2], DrawCommand::Rectangle { filled: true, .. }));
        assert!(matches!(cmds[3], DrawCommand::Rectangle { filled: false, .. }));
    }
}
