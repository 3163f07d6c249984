//! X11 platform
//!
//! Windows are plain top-level X windows created through x11rb with a GLX
//! visual. Rendering goes through one shared GLX context (`GlContext`) and
//! a batched `GlCanvas`. Events are drained non-blockingly; a background
//! poll thread (`X11EventStream`) wakes the event loop when the socket
//! becomes readable.

mod cursor;
mod event_stream;
mod gl_canvas;
mod gl_context;
mod keymap;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use tracing::{debug, error, info, trace, warn};
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{
    Atom, AtomEnum, ButtonPressEvent, ChangeWindowAttributesAux, ColormapAlloc, ConfigureWindowAux,
    ConnectionExt as _, CreateWindowAux, EventMask, PropMode, Window as XWindow, WindowClass,
};
use x11rb::protocol::Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use crate::draw::Canvas;
use crate::error::{Error, Result};
use crate::input::ButtonState;
use crate::window::{Viewport, WindowCore, WindowRequest};

use super::{Platform, PlatformEvent, PlatformHandle};
use cursor::Cursors;
use event_stream::X11EventStream;
use gl_canvas::GlCanvas;
use gl_context::GlContext;
use keymap::Keymap;

/// Set once the X11/GLX environment has been brought up in this process
static GRAPHICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

struct Atoms {
    wm_protocols: Atom,
    wm_delete_window: Atom,
    net_wm_name: Atom,
    utf8_string: Atom,
}

impl Atoms {
    fn new(conn: &RustConnection) -> anyhow::Result<Self> {
        let intern = |name: &str| -> anyhow::Result<Atom> {
            Ok(conn.intern_atom(false, name.as_bytes())?.reply()?.atom)
        };

        Ok(Self {
            wm_protocols: intern("WM_PROTOCOLS")?,
            wm_delete_window: intern("WM_DELETE_WINDOW")?,
            net_wm_name: intern("_NET_WM_NAME")?,
            utf8_string: intern("UTF8_STRING")?,
        })
    }
}

/// Native state of one window
#[derive(Debug, Clone, Copy)]
struct NativeWindow {
    colormap: u32,
    width: i32,
    height: i32,
}

pub struct X11Platform {
    conn: Arc<RustConnection>,
    root: XWindow,
    atoms: Atoms,
    events: X11EventStream,
    keymap: Keymap,
    cursors: Cursors,
    windows: HashMap<XWindow, NativeWindow>,
    // Declared before `gl` so GL objects go away while the context exists
    canvas: Option<GlCanvas>,
    gl: GlContext,
}

impl X11Platform {
    /// Connect to `$DISPLAY` and set up GLX. Only one platform may be
    /// connected per process.
    pub fn connect() -> Result<Self> {
        if GRAPHICS_INITIALIZED.swap(true, Ordering::SeqCst) {
            error!("Graphics environment already initialized");
            return Err(Error::GraphicsAlreadyInitialized);
        }

        let (conn, screen_num) = x11rb::connect(None).context("Failed to connect to X server")?;
        let conn = Arc::new(conn);
        info!("Connected to X server, screen {}", screen_num);

        let screen = conn
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| anyhow!("Screen {} not found", screen_num))?;
        let root = screen.root;

        let atoms = Atoms::new(&conn)?;
        let keymap = load_keymap(&conn)?;
        let cursors = Cursors::new(&conn, root)?;
        let gl = GlContext::new(screen_num)?;
        let events = X11EventStream::new(conn.clone())?;

        Ok(Self {
            conn,
            root,
            atoms,
            events,
            keymap,
            cursors,
            windows: HashMap::new(),
            canvas: None,
            gl,
        })
    }

    fn xid(handle: PlatformHandle) -> XWindow {
        handle.0 as XWindow
    }

    fn handle(xid: XWindow) -> PlatformHandle {
        PlatformHandle(xid as u64)
    }

    fn native(&self, handle: PlatformHandle) -> Result<NativeWindow> {
        self.windows
            .get(&Self::xid(handle))
            .copied()
            .ok_or(Error::UnknownWindow(handle))
    }

    fn set_title(&self, xid: XWindow, title: &str) -> anyhow::Result<()> {
        self.conn.change_property8(
            PropMode::REPLACE,
            xid,
            AtomEnum::WM_NAME,
            AtomEnum::STRING,
            title.as_bytes(),
        )?;
        self.conn.change_property8(
            PropMode::REPLACE,
            xid,
            self.atoms.net_wm_name,
            self.atoms.utf8_string,
            title.as_bytes(),
        )?;
        Ok(())
    }

    /// Translate one X event; `None` for events the toolkit does not use
    fn translate(&mut self, event: Event) -> Option<PlatformEvent> {
        let translated = match event {
            Event::Expose(e) if e.count == 0 => PlatformEvent::Expose {
                window: Self::handle(e.window),
            },
            Event::ConfigureNotify(e) => {
                let native = self.windows.get_mut(&e.window)?;
                let (width, height) = (e.width as i32, e.height as i32);
                if (native.width, native.height) == (width, height) {
                    return None;
                }
                native.width = width;
                native.height = height;
                PlatformEvent::Resized {
                    window: Self::handle(e.window),
                    width,
                    height,
                }
            }
            Event::ButtonPress(e) => button_event(&e, ButtonState::Pressed),
            Event::ButtonRelease(e) => button_event(&e, ButtonState::Released),
            Event::MotionNotify(e) => PlatformEvent::MouseMotion {
                window: Self::handle(e.event),
                x: e.event_x as f64,
                y: e.event_y as f64,
                dragging: keymap::any_button_held(e.state),
            },
            Event::KeyPress(e) => {
                let modifiers = keymap::modifiers_from_state(e.state);
                let key = self.keymap.key(e.detail, modifiers)?;
                PlatformEvent::Key {
                    window: Self::handle(e.event),
                    key,
                    x: e.event_x as f64,
                    y: e.event_y as f64,
                    modifiers,
                }
            }
            Event::EnterNotify(e) => PlatformEvent::Entered {
                window: Self::handle(e.event),
            },
            Event::LeaveNotify(e) => PlatformEvent::Exited {
                window: Self::handle(e.event),
            },
            Event::ClientMessage(e)
                if e.type_ == self.atoms.wm_protocols
                    && e.format == 32
                    && e.data.as_data32()[0] == self.atoms.wm_delete_window =>
            {
                PlatformEvent::CloseRequested {
                    window: Self::handle(e.window),
                }
            }
            Event::MappingNotify(_) => {
                match load_keymap(&self.conn) {
                    Ok(keymap) => self.keymap = keymap,
                    Err(e) => warn!("Failed to reload keyboard mapping: {}", e),
                }
                return None;
            }
            Event::Error(e) => {
                warn!("X11 error: {:?}", e);
                return None;
            }
            other => {
                trace!("Ignoring X11 event {:?}", other);
                return None;
            }
        };
        Some(translated)
    }
}

fn button_event(e: &ButtonPressEvent, state: ButtonState) -> PlatformEvent {
    PlatformEvent::MouseButton {
        window: X11Platform::handle(e.event),
        button: keymap::mouse_button(e.detail),
        state,
        x: e.event_x as f64,
        y: e.event_y as f64,
        modifiers: keymap::modifiers_from_state(e.state),
    }
}

fn load_keymap(conn: &RustConnection) -> anyhow::Result<Keymap> {
    let setup = conn.setup();
    let (min, max) = (setup.min_keycode, setup.max_keycode);
    let reply = conn
        .get_keyboard_mapping(min, max - min + 1)?
        .reply()
        .context("Failed to get keyboard mapping")?;
    Ok(Keymap::new(min, reply.keysyms_per_keycode, reply.keysyms))
}

impl Platform for X11Platform {
    fn create_window(&mut self, core: &WindowCore) -> Result<PlatformHandle> {
        let conn = self.conn.as_ref();

        let colormap = conn.generate_id().map_err(anyhow::Error::from)?;
        conn.create_colormap(ColormapAlloc::NONE, colormap, self.root, self.gl.visual_id())
            .map_err(anyhow::Error::from)?;

        let xid = conn.generate_id().map_err(anyhow::Error::from)?;
        let event_mask = EventMask::EXPOSURE
            | EventMask::STRUCTURE_NOTIFY
            | EventMask::KEY_PRESS
            | EventMask::BUTTON_PRESS
            | EventMask::BUTTON_RELEASE
            | EventMask::POINTER_MOTION
            | EventMask::ENTER_WINDOW
            | EventMask::LEAVE_WINDOW;
        let cursor = self.cursors.get(conn, core.cursor())?;

        conn.create_window(
            self.gl.depth(),
            xid,
            self.root,
            core.x() as i16,
            core.y() as i16,
            core.width() as u16,
            core.height() as u16,
            0,
            WindowClass::INPUT_OUTPUT,
            self.gl.visual_id(),
            &CreateWindowAux::new()
                .event_mask(event_mask)
                .colormap(colormap)
                .background_pixel(0)
                .border_pixel(0)
                .cursor(cursor),
        )
        .map_err(anyhow::Error::from)?;

        conn.change_property32(
            PropMode::REPLACE,
            xid,
            self.atoms.wm_protocols,
            AtomEnum::ATOM,
            &[self.atoms.wm_delete_window],
        )
        .map_err(anyhow::Error::from)?;
        self.set_title(xid, core.title())?;

        if core.is_visible() {
            conn.map_window(xid).map_err(anyhow::Error::from)?;
        }
        // Round trip so the window exists before GLX binds to it
        conn.get_input_focus()
            .map_err(anyhow::Error::from)?
            .reply()
            .map_err(anyhow::Error::from)?;

        self.windows.insert(
            xid,
            NativeWindow {
                colormap,
                width: core.width(),
                height: core.height(),
            },
        );
        debug!("Created X11 window 0x{:x} for {}", xid, core.id());
        Ok(Self::handle(xid))
    }

    fn destroy_window(&mut self, handle: PlatformHandle) -> Result<()> {
        let xid = Self::xid(handle);
        let native = self
            .windows
            .remove(&xid)
            .ok_or(Error::UnknownWindow(handle))?;

        self.gl.release(xid);
        self.conn.destroy_window(xid).map_err(anyhow::Error::from)?;
        self.conn
            .free_colormap(native.colormap)
            .map_err(anyhow::Error::from)?;
        self.conn.flush().map_err(anyhow::Error::from)?;
        debug!("Destroyed X11 window 0x{:x}", xid);
        Ok(())
    }

    fn apply(&mut self, handle: PlatformHandle, request: &WindowRequest) -> Result<()> {
        self.native(handle)?;
        let xid = Self::xid(handle);
        let conn = self.conn.as_ref();

        match request {
            WindowRequest::SetTitle(title) => self.set_title(xid, title)?,
            WindowRequest::SetPosition { x, y } => {
                conn.configure_window(xid, &ConfigureWindowAux::new().x(*x).y(*y))
                    .map_err(anyhow::Error::from)?;
            }
            WindowRequest::SetSize { width, height } => {
                conn.configure_window(
                    xid,
                    &ConfigureWindowAux::new()
                        .width(*width as u32)
                        .height(*height as u32),
                )
                .map_err(anyhow::Error::from)?;
            }
            WindowRequest::SetVisible(true) => {
                conn.map_window(xid).map_err(anyhow::Error::from)?;
            }
            WindowRequest::SetVisible(false) => {
                conn.unmap_window(xid).map_err(anyhow::Error::from)?;
            }
            WindowRequest::SetCursor(shape) => {
                let cursor = self.cursors.get(conn, *shape)?;
                conn.change_window_attributes(
                    xid,
                    &ChangeWindowAttributesAux::new().cursor(cursor),
                )
                .map_err(anyhow::Error::from)?;
            }
            // Painted by the canvas on the next frame
            WindowRequest::SetBackground(_) => {}
            WindowRequest::StartTimer(_) | WindowRequest::Close | WindowRequest::Quit => {
                debug!("{:?} is handled by the event loop", request);
            }
        }
        Ok(())
    }

    fn render(
        &mut self,
        handle: PlatformHandle,
        viewport: &Viewport,
        paint: &mut dyn FnMut(&mut dyn Canvas),
    ) -> Result<()> {
        let native = self.native(handle)?;
        let xid = Self::xid(handle);

        self.gl.make_current(xid)?;
        if self.canvas.is_none() {
            self.canvas = Some(GlCanvas::new()?);
        }
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.begin(native.width, native.height, viewport);
            paint(canvas);
            canvas.flush();
        }
        self.gl.swap_buffers(xid);
        Ok(())
    }

    fn drain_events(&mut self, out: &mut Vec<PlatformEvent>) -> Result<()> {
        self.events.flush()?;
        while let Some(event) = self.events.poll_next_event()? {
            if let Some(event) = self.translate(event) {
                out.push(event);
            }
        }
        Ok(())
    }

    async fn wait_readable(&mut self) {
        self.events.wait_readable().await;
    }
}

impl Drop for X11Platform {
    fn drop(&mut self) {
        // GL objects need a live context; drop them before any window goes
        self.canvas = None;

        let handles: Vec<PlatformHandle> = self.windows.keys().map(|&xid| Self::handle(xid)).collect();
        for handle in handles {
            if let Err(e) = self.destroy_window(handle) {
                warn!("Failed to destroy window {:?}: {}", handle, e);
            }
        }
        if let Err(e) = self.cursors.free(&self.conn) {
            warn!("Failed to free cursors: {}", e);
        }
        if let Err(e) = self.conn.flush() {
            warn!("Failed to flush X connection: {}", e);
        }
    }
}
