//! Windows
//!
//! `WindowCore` holds what every window needs: physical geometry, the
//! viewport mapping, cursor and background state, and the queue of requests
//! the event loop forwards to the platform. The `Window` trait adds the paint
//! pipeline and the input hooks, and `dispatch` runs one event through a
//! window, finishing with the base behavior shared by every window.

pub mod object_window;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::draw::Canvas;
use crate::error::{Error, Result};
use crate::geometry::Color;
use crate::input::{CursorShape, Key, KeyModifiers, MouseButton, QuitPolicy};

pub use object_window::{ObjectSet, ObjectWindow, ObjectWindowContext, ObjectWindowHandler};

static NEXT_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

/// Physical size used when no size is given
pub const DEFAULT_WIDTH: i32 = 800;
pub const DEFAULT_HEIGHT: i32 = 600;
/// Physical position used when no position is given
pub const DEFAULT_POSITION: (i32, i32) = (100, 100);
/// Longest physical side of a window sized from its viewport
pub const DEFAULT_LONGEST_SIDE: i32 = 800;

/// Process-unique identity of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) fn next() -> Self {
        WindowId(NEXT_WINDOW_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Application coordinate system of a window's drawing area
///
/// `min_x`/`min_y` map to the left/bottom edge, `max_x`/`max_y` to the
/// right/top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Viewport {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True if both axes have positive extent
    pub fn is_valid(&self) -> bool {
        self.width() > 0.0 && self.height() > 0.0
    }

    /// Map a physical pixel position (origin top-left) into viewport
    /// coordinates (origin bottom-left)
    pub fn to_viewport(&self, px: f64, py: f64, width: i32, height: i32) -> (f64, f64) {
        let w = f64::from(width.max(1));
        let h = f64::from(height.max(1));
        let x = self.min_x + px * self.width() / w;
        let y = self.max_y - py * self.height() / h;
        (x, y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(0.0, f64::from(DEFAULT_WIDTH), 0.0, f64::from(DEFAULT_HEIGHT))
    }
}

/// Construction parameters of a window
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub viewport: Viewport,
    pub background: Color,
    pub cursor: CursorShape,
}

impl WindowSpec {
    /// 800x600 at (100, 100), viewport matching the pixel grid
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x: DEFAULT_POSITION.0,
            y: DEFAULT_POSITION.1,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            viewport: Viewport::default(),
            background: Color::WHITE,
            cursor: CursorShape::default(),
        }
    }

    /// Given physical size with a viewport of `0..width` x `0..height`
    pub fn with_size(title: impl Into<String>, width: i32, height: i32) -> Self {
        Self::new(title)
            .size(width, height)
            .viewport(Viewport::new(0.0, f64::from(width), 0.0, f64::from(height)))
    }

    /// Size the window from its viewport: the longer side gets
    /// `DEFAULT_LONGEST_SIDE` pixels and the aspect ratio is kept
    pub fn from_viewport(
        title: impl Into<String>,
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    ) -> Result<Self> {
        Self::fit_viewport(
            title,
            Viewport::new(min_x, max_x, min_y, max_y),
            DEFAULT_LONGEST_SIDE,
        )
    }

    /// Like `from_viewport`, with an explicit longest side
    pub fn fit_viewport(
        title: impl Into<String>,
        viewport: Viewport,
        longest_side: i32,
    ) -> Result<Self> {
        if !viewport.is_valid() || longest_side <= 0 {
            return Err(Error::DegenerateViewport {
                min_x: viewport.min_x,
                max_x: viewport.max_x,
                min_y: viewport.min_y,
                max_y: viewport.max_y,
            });
        }

        let longest = f64::from(longest_side);
        let (width, height) = if viewport.width() >= viewport.height() {
            let h = longest * viewport.height() / viewport.width();
            (longest_side, (h.round() as i32).max(1))
        } else {
            let w = longest * viewport.width() / viewport.height();
            ((w.round() as i32).max(1), longest_side)
        };

        Ok(Self::new(title).size(width, height).viewport(viewport))
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn cursor(mut self, cursor: CursorShape) -> Self {
        self.cursor = cursor;
        self
    }
}

/// Change a window wants the platform to carry out
#[derive(Debug, Clone, PartialEq)]
pub enum WindowRequest {
    SetTitle(String),
    SetPosition { x: i32, y: i32 },
    SetSize { width: i32, height: i32 },
    SetVisible(bool),
    SetCursor(CursorShape),
    SetBackground(Color),
    /// One-shot timer
    StartTimer(Duration),
    Close,
    /// Leave the event loop
    Quit,
}

/// State shared by every window
#[derive(Debug)]
pub struct WindowCore {
    id: WindowId,
    title: String,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    visible: bool,
    viewport: Viewport,
    cursor: CursorShape,
    normal_cursor: CursorShape,
    modifiers: KeyModifiers,
    background: Color,
    needs_repaint: bool,
    requests: Vec<WindowRequest>,
}

impl WindowCore {
    pub fn new(spec: WindowSpec) -> Result<Self> {
        if spec.width <= 0 || spec.height <= 0 {
            return Err(Error::InvalidWindowSize {
                width: spec.width,
                height: spec.height,
            });
        }
        warn_if_degenerate(&spec.viewport);

        let id = WindowId::next();
        debug!(
            "Created {} \"{}\" {}x{}+{}+{}",
            id, spec.title, spec.width, spec.height, spec.x, spec.y
        );

        Ok(Self {
            id,
            title: spec.title,
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: spec.height,
            visible: true,
            viewport: spec.viewport,
            cursor: spec.cursor,
            normal_cursor: spec.cursor,
            modifiers: KeyModifiers::empty(),
            background: spec.background,
            needs_repaint: true,
            requests: Vec::new(),
        })
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.requests.push(WindowRequest::SetTitle(self.title.clone()));
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.requests.push(WindowRequest::SetPosition { x, y });
    }

    /// Physical width in pixels
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Physical height in pixels
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn set_size(&mut self, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            warn!("Ignoring window size {}x{} for {}", width, height, self.id);
            return;
        }
        self.width = width;
        self.height = height;
        self.requests.push(WindowRequest::SetSize { width, height });
    }

    /// Record a size change reported by the platform
    pub(crate) fn set_physical_size(&mut self, width: i32, height: i32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.requests.push(WindowRequest::SetVisible(visible));
    }

    /// Returns the previous cursor
    pub fn set_cursor(&mut self, cursor: CursorShape) -> CursorShape {
        let previous = std::mem::replace(&mut self.cursor, cursor);
        if previous != cursor {
            self.requests.push(WindowRequest::SetCursor(cursor));
        }
        previous
    }

    pub fn cursor(&self) -> CursorShape {
        self.cursor
    }

    /// Cursor shown when the pointer is not over any object
    pub fn normal_cursor(&self) -> CursorShape {
        self.normal_cursor
    }

    pub fn set_normal_cursor(&mut self, cursor: CursorShape) {
        self.normal_cursor = cursor;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        warn_if_degenerate(&viewport);
        self.viewport = viewport;
        self.needs_repaint = true;
    }

    pub fn min_x(&self) -> f64 {
        self.viewport.min_x
    }

    pub fn max_x(&self) -> f64 {
        self.viewport.max_x
    }

    pub fn min_y(&self) -> f64 {
        self.viewport.min_y
    }

    pub fn max_y(&self) -> f64 {
        self.viewport.max_y
    }

    /// Physical pixel position to viewport coordinates
    pub fn to_viewport(&self, px: f64, py: f64) -> (f64, f64) {
        self.viewport.to_viewport(px, py, self.width, self.height)
    }

    /// Modifiers held during the latest mouse-button or key event
    pub fn key_modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    pub(crate) fn set_key_modifiers(&mut self, modifiers: KeyModifiers) {
        self.modifiers = modifiers;
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
        self.requests.push(WindowRequest::SetBackground(color));
        self.needs_repaint = true;
    }

    /// Ask for a repaint after the current batch of events
    pub fn repaint(&mut self) {
        self.needs_repaint = true;
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    pub(crate) fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }

    /// One-shot timer; `timer_expired` runs once after `msec` milliseconds
    pub fn start_timer(&mut self, msec: u64) {
        self.requests
            .push(WindowRequest::StartTimer(Duration::from_millis(msec)));
    }

    pub fn close(&mut self) {
        self.requests.push(WindowRequest::Close);
    }

    /// Leave the event loop once the current event has been handled
    pub fn request_quit(&mut self) {
        self.requests.push(WindowRequest::Quit);
    }

    pub fn pending_requests(&self) -> &[WindowRequest] {
        &self.requests
    }

    pub(crate) fn take_requests(&mut self) -> Vec<WindowRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Light grid every `x_inc`/`y_inc` units and black axes through the
    /// origin with arrow heads at the positive ends
    pub fn draw_axes(&self, canvas: &mut dyn Canvas, x_inc: f64, y_inc: f64) {
        let vp = self.viewport;
        if !vp.is_valid() {
            return;
        }

        canvas.set_color(Color::LIGHT_GRAY);
        if x_inc > 0.0 {
            let mut x = (vp.min_x / x_inc).ceil() * x_inc;
            while x <= vp.max_x {
                canvas.draw_line(x, vp.min_y, x, vp.max_y);
                x += x_inc;
            }
        }
        if y_inc > 0.0 {
            let mut y = (vp.min_y / y_inc).ceil() * y_inc;
            while y <= vp.max_y {
                canvas.draw_line(vp.min_x, y, vp.max_x, y);
                y += y_inc;
            }
        }

        let ax = vp.width() / 50.0;
        let ay = vp.height() / 50.0;
        canvas.set_color(Color::BLACK);
        if vp.min_y <= 0.0 && 0.0 <= vp.max_y {
            canvas.draw_line(vp.min_x, 0.0, vp.max_x, 0.0);
            canvas.draw_line(vp.max_x, 0.0, vp.max_x - ax, ay / 2.0);
            canvas.draw_line(vp.max_x, 0.0, vp.max_x - ax, -ay / 2.0);
        }
        if vp.min_x <= 0.0 && 0.0 <= vp.max_x {
            canvas.draw_line(0.0, vp.min_y, 0.0, vp.max_y);
            canvas.draw_line(0.0, vp.max_y, ax / 2.0, vp.max_y - ay);
            canvas.draw_line(0.0, vp.max_y, -ax / 2.0, vp.max_y - ay);
        }
    }
}

fn warn_if_degenerate(viewport: &Viewport) {
    if !viewport.is_valid() {
        warn!(
            "Window vertical or horizontal viewport dimension zero or negative (x: {}..{}, y: {}..{})",
            viewport.min_x, viewport.max_x, viewport.min_y, viewport.max_y
        );
    }
}

/// A window: paint pipeline plus input hooks
///
/// Every hook defaults to doing nothing. Positions are viewport coordinates.
pub trait Window {
    fn core(&self) -> &WindowCore;

    fn core_mut(&mut self) -> &mut WindowCore;

    fn paint(&mut self, canvas: &mut dyn Canvas);

    /// Runs before `paint`; clears to the background color
    fn prepaint(&mut self, canvas: &mut dyn Canvas) {
        canvas.clear(self.core().background());
    }

    /// Runs after `paint`; the platform presents the frame afterwards
    fn postpaint(&mut self, _canvas: &mut dyn Canvas) {}

    fn paint_all(&mut self, canvas: &mut dyn Canvas) {
        self.prepaint(canvas);
        self.paint(canvas);
        self.postpaint(canvas);
    }

    fn mouse_pressed(&mut self, _x: f64, _y: f64, _button: MouseButton) {}

    fn mouse_released(&mut self, _x: f64, _y: f64, _button: MouseButton) {}

    fn mouse_moved(&mut self, _x: f64, _y: f64) {}

    fn mouse_dragged(&mut self, _x: f64, _y: f64) {}

    fn mouse_entered(&mut self) {}

    fn mouse_exited(&mut self) {}

    fn key_pressed(&mut self, _key: Key, _x: f64, _y: f64) {}

    /// New physical size in pixels
    fn resized(&mut self, _width: i32, _height: i32) {}

    fn timer_expired(&mut self) {}
}

/// Input event already converted to viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    MousePressed { x: f64, y: f64, button: MouseButton, modifiers: KeyModifiers },
    MouseReleased { x: f64, y: f64, button: MouseButton, modifiers: KeyModifiers },
    MouseMoved { x: f64, y: f64 },
    MouseDragged { x: f64, y: f64 },
    MouseEntered,
    MouseExited,
    KeyPressed { key: Key, x: f64, y: f64, modifiers: KeyModifiers },
    Resized { width: i32, height: i32 },
    TimerExpired,
}

/// What the event loop should do after a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one event through a window
///
/// Updates the modifier snapshot, calls the window's hook, then applies the
/// base behavior every window shares (the quit chord).
pub fn dispatch(window: &mut dyn Window, event: &WindowEvent, quit: &QuitPolicy) -> Flow {
    match *event {
        WindowEvent::MousePressed { x, y, button, modifiers } => {
            window.core_mut().set_key_modifiers(modifiers);
            window.mouse_pressed(x, y, button);
        }
        WindowEvent::MouseReleased { x, y, button, modifiers } => {
            window.core_mut().set_key_modifiers(modifiers);
            window.mouse_released(x, y, button);
        }
        WindowEvent::MouseMoved { x, y } => window.mouse_moved(x, y),
        WindowEvent::MouseDragged { x, y } => window.mouse_dragged(x, y),
        WindowEvent::MouseEntered => window.mouse_entered(),
        WindowEvent::MouseExited => window.mouse_exited(),
        WindowEvent::KeyPressed { key, x, y, modifiers } => {
            window.core_mut().set_key_modifiers(modifiers);
            window.key_pressed(key, x, y);

            if quit.should_quit(key, modifiers) {
                info!("Quit key pressed in {}", window.core().id());
                return Flow::Quit;
            }
        }
        WindowEvent::Resized { width, height } => {
            window.core_mut().set_physical_size(width, height);
            window.resized(width, height);
        }
        WindowEvent::TimerExpired => window.timer_expired(),
    }

    Flow::Continue
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::draw::{DrawCommand, RecordingCanvas};
    use crate::input::KeyChord;

    /// Window that records hook calls
    pub(crate) struct LogWindow {
        pub core: WindowCore,
        pub log: Vec<String>,
    }

    impl LogWindow {
        pub fn new() -> Self {
            Self {
                core: WindowCore::new(WindowSpec::new("log")).unwrap(),
                log: Vec::new(),
            }
        }
    }

    impl Window for LogWindow {
        fn core(&self) -> &WindowCore {
            &self.core
        }

        fn core_mut(&mut self) -> &mut WindowCore {
            &mut self.core
        }

        fn paint(&mut self, canvas: &mut dyn Canvas) {
            canvas.set_color(Color::RED);
            canvas.draw_point(1.0, 1.0);
        }

        fn key_pressed(&mut self, key: Key, _x: f64, _y: f64) {
            self.log.push(format!("key {}", key));
        }

        fn resized(&mut self, width: i32, height: i32) {
            self.log.push(format!("resized {}x{}", width, height));
        }

        fn timer_expired(&mut self) {
            self.log.push("timer".into());
        }
    }

    #[test]
    fn test_defaults() {
        let core = WindowCore::new(WindowSpec::new("defaults")).unwrap();
        assert_eq!((core.x(), core.y()), (100, 100));
        assert_eq!((core.width(), core.height()), (800, 600));
        assert_eq!(core.viewport(), Viewport::new(0.0, 800.0, 0.0, 600.0));
        assert_eq!(core.cursor(), CursorShape::RightArrow);
        assert!(core.needs_repaint());
    }

    #[test]
    fn test_invalid_physical_size_is_rejected() {
        let err = WindowCore::new(WindowSpec::new("bad").size(0, 100)).unwrap_err();
        assert!(matches!(err, Error::InvalidWindowSize { width: 0, height: 100 }));
    }

    #[test]
    fn test_degenerate_viewport_only_warns() {
        let spec = WindowSpec::new("flat").viewport(Viewport::new(0.0, 10.0, 5.0, 5.0));
        assert!(WindowCore::new(spec).is_ok());
    }

    #[test]
    fn test_from_viewport_keeps_aspect_ratio() {
        let spec = WindowSpec::from_viewport("wide", -2.0, 2.0, -1.0, 1.0).unwrap();
        assert_eq!((spec.width, spec.height), (800, 400));

        let spec = WindowSpec::from_viewport("tall", 0.0, 1.0, 0.0, 4.0).unwrap();
        assert_eq!((spec.width, spec.height), (200, 800));

        assert!(matches!(
            WindowSpec::from_viewport("none", 0.0, 0.0, 0.0, 1.0),
            Err(Error::DegenerateViewport { .. })
        ));
    }

    #[test]
    fn test_viewport_transform_maps_corners() {
        let core = WindowCore::new(
            WindowSpec::new("vp")
                .size(400, 200)
                .viewport(Viewport::new(-1.0, 1.0, 10.0, 20.0)),
        )
        .unwrap();
        assert_eq!(core.to_viewport(0.0, 0.0), (-1.0, 20.0));
        assert_eq!(core.to_viewport(400.0, 200.0), (1.0, 10.0));
        assert_eq!(core.to_viewport(200.0, 100.0), (0.0, 15.0));
    }

    #[test]
    fn test_pixel_grid_maps_exactly() {
        let vp = Viewport::new(0.0, 100.0, 0.0, 100.0);
        assert_eq!(vp.to_viewport(55.0, 55.0, 100, 100), (55.0, 45.0));
        assert_eq!(vp.to_viewport(15.0, 15.0, 100, 100), (15.0, 85.0));
        let vp = Viewport::new(-10.0, 10.0, -10.0, 10.0);
        assert_eq!(vp.to_viewport(300.0, 100.0, 400, 400), (5.0, 5.0));
    }

    #[test]
    fn test_requests_are_queued() {
        let mut core = WindowCore::new(WindowSpec::new("req")).unwrap();
        core.set_title("renamed");
        assert_eq!(core.set_cursor(CursorShape::Wait), CursorShape::RightArrow);
        // Setting the same cursor again is not a request
        core.set_cursor(CursorShape::Wait);
        core.start_timer(250);
        core.set_size(-1, 10);

        assert_eq!(
            core.take_requests(),
            vec![
                WindowRequest::SetTitle("renamed".into()),
                WindowRequest::SetCursor(CursorShape::Wait),
                WindowRequest::StartTimer(Duration::from_millis(250)),
            ]
        );
        assert!(core.pending_requests().is_empty());
        assert_eq!((core.width(), core.height()), (800, 600));
    }

    #[test]
    fn test_geometry_setters_queue_requests() {
        let mut core = WindowCore::new(WindowSpec::new("geo")).unwrap();
        core.take_repaint();
        core.set_position(10, 20);
        core.set_visible(false);
        core.set_normal_cursor(CursorShape::Help);
        core.set_viewport(Viewport::new(0.0, 1.0, 0.0, 1.0));

        assert_eq!((core.x(), core.y()), (10, 20));
        assert!(!core.is_visible());
        assert_eq!(core.normal_cursor(), CursorShape::Help);
        assert_eq!(core.max_x(), 1.0);
        assert!(core.needs_repaint());
        assert_eq!(
            core.take_requests(),
            vec![
                WindowRequest::SetPosition { x: 10, y: 20 },
                WindowRequest::SetVisible(false),
            ]
        );
    }

    #[test]
    fn test_paint_all_clears_then_paints() {
        let mut w = LogWindow::new();
        w.core.set_background_color(Color::BLUE);
        let mut canvas = RecordingCanvas::new();
        w.paint_all(&mut canvas);
        assert_eq!(
            canvas.commands(),
            &[
                DrawCommand::Clear(Color::BLUE),
                DrawCommand::Point { x: 1.0, y: 1.0, color: Color::RED },
            ]
        );
    }

    #[test]
    fn test_dispatch_runs_hook_then_quit_chord() {
        let mut w = LogWindow::new();
        let policy = QuitPolicy::default();

        let flow = dispatch(
            &mut w,
            &WindowEvent::KeyPressed { key: Key::F4, x: 0.0, y: 0.0, modifiers: KeyModifiers::ALT },
            &policy,
        );
        assert_eq!(flow, Flow::Quit);
        assert_eq!(w.log, vec!["key F4".to_string()]);
        assert_eq!(w.core.key_modifiers(), KeyModifiers::ALT);

        let flow = dispatch(
            &mut w,
            &WindowEvent::KeyPressed {
                key: Key::F4,
                x: 0.0,
                y: 0.0,
                modifiers: KeyModifiers::ALT | KeyModifiers::CTRL,
            },
            &policy,
        );
        assert_eq!(flow, Flow::Continue);
    }

    #[test]
    fn test_custom_quit_chord() {
        let mut w = LogWindow::new();
        let policy = QuitPolicy::new(KeyChord::new(Key::ESCAPE, KeyModifiers::empty()));
        let esc = WindowEvent::KeyPressed {
            key: Key::ESCAPE,
            x: 0.0,
            y: 0.0,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(dispatch(&mut w, &esc, &policy), Flow::Quit);
        assert_eq!(dispatch(&mut w, &esc, &QuitPolicy::disabled()), Flow::Continue);
    }

    #[test]
    fn test_resize_updates_core_before_hook() {
        let mut w = LogWindow::new();
        dispatch(&mut w, &WindowEvent::Resized { width: 320, height: 240 }, &QuitPolicy::default());
        assert_eq!((w.core.width(), w.core.height()), (320, 240));
        assert_eq!(w.log, vec!["resized 320x240".to_string()]);
        // Viewport is application-owned and stays put
        assert_eq!(w.core.viewport(), Viewport::default());
    }

    #[test]
    fn test_draw_axes_draws_grid_and_arrows() {
        let core = WindowCore::new(
            WindowSpec::new("axes").viewport(Viewport::new(-2.0, 2.0, -2.0, 2.0)),
        )
        .unwrap();
        let mut canvas = RecordingCanvas::new();
        core.draw_axes(&mut canvas, 1.0, 1.0);

        let black = canvas
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { color, .. } if *color == Color::BLACK))
            .count();
        let grid = canvas.commands().len() - black;
        assert_eq!(black, 6);
        assert_eq!(grid, 10);
    }
}
