//! Platform layer
//!
//! A `Platform` owns the native side of every window: creation, requests
//! such as title or cursor changes, rendering and event delivery. Events come
//! out in physical pixel coordinates tagged with the opaque handle of the
//! native window; the event loop maps handles back to windows through the
//! `WindowRegistry`.

pub mod headless;
pub mod registry;
#[cfg(unix)]
pub mod x11;

use crate::draw::Canvas;
use crate::error::Result;
use crate::input::{ButtonState, Key, KeyModifiers, MouseButton};
use crate::window::{Viewport, WindowCore, WindowRequest};

pub use headless::HeadlessPlatform;
pub use registry::WindowRegistry;
#[cfg(unix)]
pub use x11::X11Platform;

/// Opaque identifier of a native window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlatformHandle(pub u64);

/// Native event, positions in physical pixels (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Window contents need redrawing
    Expose { window: PlatformHandle },
    Resized { window: PlatformHandle, width: i32, height: i32 },
    MouseButton {
        window: PlatformHandle,
        button: MouseButton,
        state: ButtonState,
        x: f64,
        y: f64,
        modifiers: KeyModifiers,
    },
    /// `dragging` is set while any mouse button is held
    MouseMotion { window: PlatformHandle, x: f64, y: f64, dragging: bool },
    Key {
        window: PlatformHandle,
        key: Key,
        x: f64,
        y: f64,
        modifiers: KeyModifiers,
    },
    Entered { window: PlatformHandle },
    Exited { window: PlatformHandle },
    /// The user asked to close the window (e.g. from the title bar)
    CloseRequested { window: PlatformHandle },
    /// The platform is going away
    Quit,
}

impl PlatformEvent {
    /// Handle the event is addressed to, `None` for global events
    pub fn window(&self) -> Option<PlatformHandle> {
        match *self {
            PlatformEvent::Expose { window }
            | PlatformEvent::Resized { window, .. }
            | PlatformEvent::MouseButton { window, .. }
            | PlatformEvent::MouseMotion { window, .. }
            | PlatformEvent::Key { window, .. }
            | PlatformEvent::Entered { window }
            | PlatformEvent::Exited { window }
            | PlatformEvent::CloseRequested { window } => Some(window),
            PlatformEvent::Quit => None,
        }
    }
}

/// Native windowing backend
pub trait Platform {
    /// Create and show a native window for `core`
    fn create_window(&mut self, core: &WindowCore) -> Result<PlatformHandle>;

    fn destroy_window(&mut self, handle: PlatformHandle) -> Result<()>;

    /// Carry out a window request. Timer, close and quit requests are handled
    /// by the event loop and never reach the platform.
    fn apply(&mut self, handle: PlatformHandle, request: &WindowRequest) -> Result<()>;

    /// Render one frame: set up `viewport`, let `paint` draw, then present
    fn render(
        &mut self,
        handle: PlatformHandle,
        viewport: &Viewport,
        paint: &mut dyn FnMut(&mut dyn Canvas),
    ) -> Result<()>;

    /// Move every pending event into `out` without blocking
    fn drain_events(&mut self, out: &mut Vec<PlatformEvent>) -> Result<()>;

    /// Resolve once new events may be available
    #[allow(async_fn_in_trait)]
    async fn wait_readable(&mut self);
}
