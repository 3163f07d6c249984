//! objwin: windows that dispatch input to the graphical objects they hold
//!
//! An `ObjectWindow` keeps an ordered set of `GraphicalObject`s. Pointer and
//! key events are routed to the topmost object under the pointer (or the one
//! being dragged) before the window's own handler sees them. The
//! `EventLoop` owns every open window and drives them from a `Platform`:
//! X11/GLX for real displays, or the scripted `HeadlessPlatform`.

pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod input;
pub mod object;
pub mod platform;
pub mod runtime;
pub mod stopwatch;
pub mod window;

pub use config::Config;
pub use draw::Canvas;
pub use error::{Error, Result};
pub use geometry::{BoundingBox, Color, Point};
pub use input::{ButtonState, CursorShape, Key, KeyChord, KeyModifiers, MouseButton, QuitPolicy};
pub use object::{
    CompositeObject, EventResponse, GraphicalObject, ObjectContext, ObjectId, ObjectState, Paint,
};
pub use platform::{HeadlessPlatform, Platform, PlatformEvent, PlatformHandle};
#[cfg(unix)]
pub use platform::X11Platform;
pub use runtime::EventLoop;
pub use stopwatch::Stopwatch;
pub use window::{
    ObjectWindow, ObjectWindowContext, ObjectWindowHandler, Viewport, Window, WindowCore,
    WindowEvent, WindowId, WindowSpec,
};
