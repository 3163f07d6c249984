//! Headless platform
//!
//! Runs the toolkit without a display server. Events are scripted, frames
//! are recorded as draw commands and applied requests are logged, so whole
//! event-loop runs can be checked in tests.

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::draw::{Canvas, DrawCommand, RecordingCanvas};
use crate::error::{Error, Result};
use crate::window::{Viewport, WindowCore, WindowRequest};

use super::{Platform, PlatformEvent, PlatformHandle};

#[derive(Debug, Default)]
struct HeadlessWindow {
    title: String,
    frames: Vec<Vec<DrawCommand>>,
    applied: Vec<WindowRequest>,
}

/// Platform with a scripted event queue and recorded output
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    next_handle: u64,
    script: VecDeque<PlatformEvent>,
    windows: HashMap<PlatformHandle, HeadlessWindow>,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for the next `drain_events`
    pub fn push_event(&mut self, event: PlatformEvent) {
        self.script.push_back(event);
    }

    pub fn push_events(&mut self, events: impl IntoIterator<Item = PlatformEvent>) {
        self.script.extend(events);
    }

    pub fn is_open(&self, handle: PlatformHandle) -> bool {
        self.windows.contains_key(&handle)
    }

    pub fn title(&self, handle: PlatformHandle) -> Option<&str> {
        self.windows.get(&handle).map(|w| w.title.as_str())
    }

    /// Frames rendered so far, oldest first
    pub fn frames(&self, handle: PlatformHandle) -> &[Vec<DrawCommand>] {
        self.windows
            .get(&handle)
            .map(|w| w.frames.as_slice())
            .unwrap_or(&[])
    }

    pub fn last_frame(&self, handle: PlatformHandle) -> Option<&[DrawCommand]> {
        self.frames(handle).last().map(Vec::as_slice)
    }

    /// Requests applied to the window, oldest first
    pub fn applied(&self, handle: PlatformHandle) -> &[WindowRequest] {
        self.windows
            .get(&handle)
            .map(|w| w.applied.as_slice())
            .unwrap_or(&[])
    }

    fn window_mut(&mut self, handle: PlatformHandle) -> Result<&mut HeadlessWindow> {
        self.windows
            .get_mut(&handle)
            .ok_or(Error::UnknownWindow(handle))
    }
}

impl Platform for HeadlessPlatform {
    fn create_window(&mut self, core: &WindowCore) -> Result<PlatformHandle> {
        self.next_handle += 1;
        let handle = PlatformHandle(self.next_handle);
        self.windows.insert(
            handle,
            HeadlessWindow {
                title: core.title().to_string(),
                ..Default::default()
            },
        );
        trace!("Headless window {:?} for {}", handle, core.id());
        Ok(handle)
    }

    fn destroy_window(&mut self, handle: PlatformHandle) -> Result<()> {
        self.windows
            .remove(&handle)
            .map(|_| ())
            .ok_or(Error::UnknownWindow(handle))
    }

    fn apply(&mut self, handle: PlatformHandle, request: &WindowRequest) -> Result<()> {
        let window = self.window_mut(handle)?;
        if let WindowRequest::SetTitle(title) = request {
            window.title = title.clone();
        }
        window.applied.push(request.clone());
        Ok(())
    }

    fn render(
        &mut self,
        handle: PlatformHandle,
        _viewport: &Viewport,
        paint: &mut dyn FnMut(&mut dyn Canvas),
    ) -> Result<()> {
        let window = self.window_mut(handle)?;
        let mut canvas = RecordingCanvas::new();
        paint(&mut canvas);
        window.frames.push(canvas.take_commands());
        Ok(())
    }

    /// Hands out the whole script; once it is exhausted, reports `Quit`
    fn drain_events(&mut self, out: &mut Vec<PlatformEvent>) -> Result<()> {
        if self.script.is_empty() {
            out.push(PlatformEvent::Quit);
        } else {
            out.extend(self.script.drain(..));
        }
        Ok(())
    }

    async fn wait_readable(&mut self) {
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowSpec;

    #[test]
    fn test_records_frames_and_requests() {
        let mut platform = HeadlessPlatform::new();
        let core = WindowCore::new(WindowSpec::new("headless")).unwrap();
        let handle = platform.create_window(&core).unwrap();
        assert_eq!(platform.title(handle), Some("headless"));

        platform
            .apply(handle, &WindowRequest::SetTitle("renamed".into()))
            .unwrap();
        assert_eq!(platform.title(handle), Some("renamed"));
        assert_eq!(platform.applied(handle).len(), 1);

        platform
            .render(handle, &core.viewport(), &mut |canvas: &mut dyn Canvas| canvas.draw_point(1.0, 2.0))
            .unwrap();
        assert_eq!(platform.frames(handle).len(), 1);
        assert!(matches!(
            platform.last_frame(handle),
            Some([DrawCommand::Point { .. }])
        ));
    }

    #[test]
    fn test_unknown_handle_is_an_error() {
        let mut platform = HeadlessPlatform::new();
        let err = platform
            .apply(PlatformHandle(42), &WindowRequest::SetVisible(false))
            .unwrap_err();
        assert!(matches!(err, Error::UnknownWindow(PlatformHandle(42))));
        assert!(platform.destroy_window(PlatformHandle(42)).is_err());
    }

    #[test]
    fn test_drain_reports_quit_when_idle() {
        let mut platform = HeadlessPlatform::new();
        platform.push_event(PlatformEvent::Expose { window: PlatformHandle(1) });

        let mut events = Vec::new();
        platform.drain_events(&mut events).unwrap();
        assert_eq!(events, vec![PlatformEvent::Expose { window: PlatformHandle(1) }]);

        events.clear();
        platform.drain_events(&mut events).unwrap();
        assert_eq!(events, vec![PlatformEvent::Quit]);
    }
}
