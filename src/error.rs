//! Toolkit error type
//!
//! Only setup misuse and platform failures surface as errors. Steady-state
//! event handling never returns one; problems there are logged.

use thiserror::Error;

use crate::platform::PlatformHandle;

#[derive(Debug, Error)]
pub enum Error {
    /// The native graphics subsystem was initialized twice in one process
    #[error("Graphics environment already initialized")]
    GraphicsAlreadyInitialized,

    /// `EventLoop::run` was called a second time in this process
    #[error("Event loop already running, action ignored")]
    EventLoopAlreadyRunning,

    /// Physical window size would be zero or negative
    #[error("Window size {width}x{height} is zero or negative; check order of constructor arguments")]
    InvalidWindowSize { width: i32, height: i32 },

    /// Viewport extent zero or negative where a physical size must be derived from it
    #[error("Window vertical or horizontal dimension zero or negative (x: {min_x}..{max_x}, y: {min_y}..{max_y})")]
    DegenerateViewport {
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
    },

    /// A request named a platform window that is not registered
    #[error("Unknown platform window {0:?}")]
    UnknownWindow(PlatformHandle),

    /// Backend failure (X connection, GLX, runtime setup)
    #[error(transparent)]
    Platform(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
