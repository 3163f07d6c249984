//! Window registry
//!
//! Maps native handles to the windows the application registered, so events
//! arriving from the platform can be routed to the right `Window`.

use std::collections::HashMap;

use tracing::debug;

use crate::window::{Window, WindowId};

use super::PlatformHandle;

struct Registered {
    handle: PlatformHandle,
    window: Box<dyn Window>,
}

/// Registered windows, by native handle and by window id
#[derive(Default)]
pub struct WindowRegistry {
    handles: HashMap<PlatformHandle, WindowId>,
    windows: HashMap<WindowId, Registered>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `window` under `handle`, replacing any earlier registration
    /// of either
    pub fn insert(&mut self, handle: PlatformHandle, window: Box<dyn Window>) -> WindowId {
        let id = window.core().id();
        if let Some(old) = self.handles.insert(handle, id) {
            if old != id {
                self.windows.remove(&old);
            }
        }
        if let Some(old) = self.windows.insert(id, Registered { handle, window }) {
            if old.handle != handle {
                self.handles.remove(&old.handle);
            }
        }
        debug!("Registered {} as {:?}", id, handle);
        id
    }

    pub fn remove(&mut self, id: WindowId) -> Option<(PlatformHandle, Box<dyn Window>)> {
        let registered = self.windows.remove(&id)?;
        self.handles.remove(&registered.handle);
        debug!("Deregistered {} ({:?})", id, registered.handle);
        Some((registered.handle, registered.window))
    }

    pub fn lookup(&self, handle: PlatformHandle) -> Option<WindowId> {
        self.handles.get(&handle).copied()
    }

    pub fn handle_of(&self, id: WindowId) -> Option<PlatformHandle> {
        self.windows.get(&id).map(|r| r.handle)
    }

    pub fn get(&self, id: WindowId) -> Option<&(dyn Window + 'static)> {
        self.windows.get(&id).map(|r| r.window.as_ref())
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut (dyn Window + 'static)> {
        self.windows.get_mut(&id).map(|r| r.window.as_mut())
    }

    /// Registered window ids in ascending (creation) order
    pub fn ids(&self) -> Vec<WindowId> {
        let mut ids: Vec<WindowId> = self.windows.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::tests::LogWindow;

    #[test]
    fn test_insert_lookup_remove() {
        let mut registry = WindowRegistry::new();
        let a = registry.insert(PlatformHandle(7), Box::new(LogWindow::new()));
        let b = registry.insert(PlatformHandle(9), Box::new(LogWindow::new()));

        assert_eq!(registry.lookup(PlatformHandle(7)), Some(a));
        assert_eq!(registry.handle_of(b), Some(PlatformHandle(9)));
        assert_eq!(registry.ids(), vec![a, b]);

        let (handle, window) = registry.remove(a).unwrap();
        assert_eq!(handle, PlatformHandle(7));
        assert_eq!(window.core().id(), a);
        assert_eq!(registry.lookup(PlatformHandle(7)), None);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reused_handle_replaces_window() {
        let mut registry = WindowRegistry::new();
        let a = registry.insert(PlatformHandle(1), Box::new(LogWindow::new()));
        let b = registry.insert(PlatformHandle(1), Box::new(LogWindow::new()));
        assert!(registry.get(a).is_none());
        assert_eq!(registry.lookup(PlatformHandle(1)), Some(b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_no_fixed_capacity() {
        let mut registry = WindowRegistry::new();
        for i in 0..64 {
            registry.insert(PlatformHandle(i), Box::new(LogWindow::new()));
        }
        assert_eq!(registry.len(), 64);
    }
}
