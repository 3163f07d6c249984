//! Event loop
//!
//! Owns the platform, the window registry and the timer queue. Each wakeup
//! drains the platform's pending events, dispatches them batch-wise, forwards
//! the requests windows queued meanwhile, and repaints the windows that asked
//! for it. Waiting is done on a current-thread tokio runtime, racing the next
//! timer deadline against platform readiness.

pub mod timers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::Context;
use tracing::{debug, error, info, trace, warn};

use crate::draw::Canvas;
use crate::error::{Error, Result};
use crate::input::{ButtonState, QuitPolicy};
use crate::platform::{Platform, PlatformEvent, PlatformHandle, WindowRegistry};
use crate::window::{dispatch, Flow, Window, WindowEvent, WindowId, WindowRequest};

pub use timers::TimerQueue;

/// Set by the first `EventLoop::run` in the process
static RUN_GUARD: AtomicBool = AtomicBool::new(false);

/// Why the loop woke up
enum Wake {
    Timer,
    Readable,
}

/// Event loop driving every window of a platform
pub struct EventLoop<P: Platform> {
    platform: P,
    registry: WindowRegistry,
    timers: TimerQueue,
    quit_policy: QuitPolicy,
    guard: &'static AtomicBool,
}

impl<P: Platform> EventLoop<P> {
    pub fn new(platform: P) -> Self {
        Self::with_guard(platform, &RUN_GUARD)
    }

    pub(crate) fn with_guard(platform: P, guard: &'static AtomicBool) -> Self {
        Self {
            platform,
            registry: WindowRegistry::new(),
            timers: TimerQueue::new(),
            quit_policy: QuitPolicy::default(),
            guard,
        }
    }

    pub fn with_quit_policy(mut self, quit_policy: QuitPolicy) -> Self {
        self.quit_policy = quit_policy;
        self
    }

    pub fn quit_policy(&self) -> &QuitPolicy {
        &self.quit_policy
    }

    /// Create the native window and register `window` under its handle
    pub fn open(&mut self, window: Box<dyn Window>) -> Result<WindowId> {
        let handle = self.platform.create_window(window.core())?;
        let id = self.registry.insert(handle, window);
        info!("Opened {} as {:?}", id, handle);
        Ok(id)
    }

    /// Deregister and drop a window, destroying its native counterpart
    pub fn close(&mut self, id: WindowId) -> bool {
        let Some((handle, window)) = self.registry.remove(id) else {
            return false;
        };
        drop(window);
        if let Err(e) = self.platform.destroy_window(handle) {
            warn!("Failed to destroy native window {:?}: {}", handle, e);
        }
        info!("Closed {}", id);
        true
    }

    pub fn window(&self, id: WindowId) -> Option<&(dyn Window + 'static)> {
        self.registry.get(id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut (dyn Window + 'static)> {
        self.registry.get_mut(id)
    }

    pub fn handle_of(&self, id: WindowId) -> Option<PlatformHandle> {
        self.registry.handle_of(id)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Run until a quit is requested or the last window closes
    ///
    /// Only one run is allowed per process; later calls fail without
    /// entering the loop.
    pub fn run(&mut self) -> Result<()> {
        if self.guard.swap(true, Ordering::SeqCst) {
            error!("Event loop already running, action ignored");
            return Err(Error::EventLoopAlreadyRunning);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("Failed to build event loop runtime")?;

        info!("Entering event loop with {} window(s)", self.registry.len());
        runtime.block_on(self.run_async())
    }

    async fn run_async(&mut self) -> Result<()> {
        let mut events = Vec::new();
        if self.flush() == Flow::Quit {
            return Ok(());
        }

        loop {
            self.platform.drain_events(&mut events)?;
            if !events.is_empty() {
                if self.pump(std::mem::take(&mut events)) == Flow::Quit {
                    info!("Leaving event loop");
                    return Ok(());
                }
                continue;
            }

            if self.registry.is_empty() {
                info!("Last window closed, leaving event loop");
                return Ok(());
            }

            let deadline = self.timers.next_deadline();
            let wake = tokio::select! {
                biased;
                _ = sleep_until(deadline) => Wake::Timer,
                _ = self.platform.wait_readable() => Wake::Readable,
            };

            match wake {
                Wake::Timer => {
                    if self.fire_timers(Instant::now()) == Flow::Quit {
                        info!("Leaving event loop");
                        return Ok(());
                    }
                }
                Wake::Readable => trace!("Platform readable"),
            }
        }
    }

    /// Dispatch one batch of platform events, then flush requests and
    /// repaint
    pub fn pump(&mut self, events: Vec<PlatformEvent>) -> Flow {
        let mut flow = Flow::Continue;
        for event in events {
            if self.handle_event(event) == Flow::Quit {
                flow = Flow::Quit;
                break;
            }
        }
        if self.flush() == Flow::Quit {
            flow = Flow::Quit;
        }
        flow
    }

    /// Run `timer_expired` for every timer due at `now`
    pub fn fire_timers(&mut self, now: Instant) -> Flow {
        for id in self.timers.pop_expired(now) {
            let Some(window) = self.registry.get_mut(id) else {
                debug!("Dropping timer for closed {}", id);
                continue;
            };
            if dispatch(window, &WindowEvent::TimerExpired, &self.quit_policy) == Flow::Quit {
                return Flow::Quit;
            }
        }
        self.flush()
    }

    fn handle_event(&mut self, event: PlatformEvent) -> Flow {
        let Some(handle) = event.window() else {
            info!("Platform quit");
            return Flow::Quit;
        };
        let Some(id) = self.registry.lookup(handle) else {
            debug!("Event for unknown window {:?}: {:?}", handle, event);
            return Flow::Continue;
        };
        let Some(window) = self.registry.get_mut(id) else {
            return Flow::Continue;
        };

        let window_event = match event {
            PlatformEvent::Expose { .. } => {
                window.core_mut().repaint();
                return Flow::Continue;
            }
            PlatformEvent::CloseRequested { .. } => {
                self.close(id);
                return Flow::Continue;
            }
            PlatformEvent::Quit => return Flow::Quit,
            PlatformEvent::Resized { width, height, .. } => {
                window.core_mut().repaint();
                WindowEvent::Resized { width, height }
            }
            PlatformEvent::MouseButton { button, state, x, y, modifiers, .. } => {
                let (x, y) = window.core().to_viewport(x, y);
                match state {
                    ButtonState::Pressed => WindowEvent::MousePressed { x, y, button, modifiers },
                    ButtonState::Released => WindowEvent::MouseReleased { x, y, button, modifiers },
                }
            }
            PlatformEvent::MouseMotion { x, y, dragging, .. } => {
                let (x, y) = window.core().to_viewport(x, y);
                if dragging {
                    WindowEvent::MouseDragged { x, y }
                } else {
                    WindowEvent::MouseMoved { x, y }
                }
            }
            PlatformEvent::Key { key, x, y, modifiers, .. } => {
                let (x, y) = window.core().to_viewport(x, y);
                WindowEvent::KeyPressed { key, x, y, modifiers }
            }
            PlatformEvent::Entered { .. } => WindowEvent::MouseEntered,
            PlatformEvent::Exited { .. } => WindowEvent::MouseExited,
        };

        dispatch(window, &window_event, &self.quit_policy)
    }

    /// Forward queued window requests to the platform and repaint dirty
    /// windows
    fn flush(&mut self) -> Flow {
        let mut flow = Flow::Continue;
        let now = Instant::now();

        for id in self.registry.ids() {
            let Some(handle) = self.registry.handle_of(id) else {
                continue;
            };
            let Some(window) = self.registry.get_mut(id) else {
                continue;
            };

            let mut close = false;
            for request in window.core_mut().take_requests() {
                match request {
                    WindowRequest::StartTimer(delay) => self.timers.schedule_after(now, delay, id),
                    WindowRequest::Quit => flow = Flow::Quit,
                    WindowRequest::Close => close = true,
                    other => {
                        if let Err(e) = self.platform.apply(handle, &other) {
                            warn!("Failed to apply {:?} to {}: {}", other, id, e);
                        }
                    }
                }
            }
            if close {
                self.close(id);
                continue;
            }

            if window.core_mut().take_repaint() {
                let viewport = window.core().viewport();
                if let Err(e) = self
                    .platform
                    .render(handle, &viewport, &mut |canvas: &mut dyn Canvas| window.paint_all(canvas))
                {
                    warn!("Failed to repaint {}: {}", id, e);
                }
            }
        }

        flow
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
