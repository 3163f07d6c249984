//! OpenGL context creation using GLX directly
//!
//! GLX needs an Xlib display, so the context lives on its own connection.
//! Windows are created through x11rb with the visual picked here and made
//! current by XID, which works because X resources are shared between
//! connections to the same server.

use std::ffi::CString;
use std::ptr;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info, warn};
use x11_dl::glx::{self, Glx};
use x11_dl::xlib::{self, Xlib};

unsafe extern "C" fn x_error_handler(
    _display: *mut xlib::Display,
    event: *mut xlib::XErrorEvent,
) -> i32 {
    if !event.is_null() {
        let (error_code, request_code, minor_code) =
            unsafe { ((*event).error_code, (*event).request_code, (*event).minor_code) };
        warn!(
            "X Error: code={}, request={}, minor={}",
            error_code, request_code, minor_code
        );
    }
    // Handled; the default handler would exit the process
    0
}

/// GLX context shared by every window of the platform
pub struct GlContext {
    glx: Glx,
    xlib: Xlib,
    display: *mut xlib::Display,
    context: glx::GLXContext,
    visual_id: u32,
    depth: u8,
    current: Option<u32>,
}

impl GlContext {
    pub fn new(screen_num: usize) -> Result<Self> {
        let xlib = Xlib::open().context("Failed to load libX11")?;
        let glx = Glx::open().context("Failed to load libGLX")?;

        let display_name = std::env::var("DISPLAY").unwrap_or_else(|_| ":0".into());
        let display_cstr = CString::new(display_name)?;

        let display = unsafe { (xlib.XOpenDisplay)(display_cstr.as_ptr()) };
        if display.is_null() {
            return Err(anyhow!("Failed to open X11 display for GLX"));
        }

        unsafe {
            (xlib.XSetErrorHandler)(Some(x_error_handler));
        }

        let mut major = 0;
        let mut minor = 0;
        let has_glx = unsafe { (glx.glXQueryVersion)(display, &mut major, &mut minor) };
        if has_glx == 0 {
            unsafe { (xlib.XCloseDisplay)(display) };
            return Err(anyhow!("GLX extension not available"));
        }
        info!("GLX version {}.{}", major, minor);

        let attribs = [
            glx::GLX_DRAWABLE_TYPE as i32, glx::GLX_WINDOW_BIT as i32,
            glx::GLX_RENDER_TYPE as i32, glx::GLX_RGBA_BIT as i32,
            glx::GLX_DOUBLEBUFFER as i32, 1,
            glx::GLX_RED_SIZE as i32, 8,
            glx::GLX_GREEN_SIZE as i32, 8,
            glx::GLX_BLUE_SIZE as i32, 8,
            0,
        ];

        let mut num_configs = 0;
        let configs_ptr = unsafe {
            (glx.glXChooseFBConfig)(display, screen_num as i32, attribs.as_ptr(), &mut num_configs)
        };
        if configs_ptr.is_null() || num_configs == 0 {
            unsafe { (xlib.XCloseDisplay)(display) };
            return Err(anyhow!("No suitable GLX FBConfig found"));
        }

        let config = unsafe { *configs_ptr };
        unsafe { (xlib.XFree)(configs_ptr as *mut _) };

        let vinfo = unsafe { (glx.glXGetVisualFromFBConfig)(display, config) };
        if vinfo.is_null() {
            unsafe { (xlib.XCloseDisplay)(display) };
            return Err(anyhow!("FBConfig has no X visual"));
        }
        let (visual_id, depth) = unsafe { ((*vinfo).visualid as u32, (*vinfo).depth as u8) };
        unsafe { (xlib.XFree)(vinfo as *mut _) };
        debug!("GLX visual 0x{:x}, depth {}", visual_id, depth);

        let context = unsafe {
            (glx.glXCreateNewContext)(
                display,
                config,
                glx::GLX_RGBA_TYPE as i32,
                ptr::null_mut(),
                1, // Direct
            )
        };
        if context.is_null() {
            unsafe { (xlib.XCloseDisplay)(display) };
            return Err(anyhow!("glXCreateNewContext failed"));
        }

        Ok(Self {
            glx,
            xlib,
            display,
            context,
            visual_id,
            depth,
            current: None,
        })
    }

    pub fn visual_id(&self) -> u32 {
        self.visual_id
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Bind the context to `drawable`; GL functions are loaded on first use
    pub fn make_current(&mut self, drawable: u32) -> Result<()> {
        if self.current == Some(drawable) {
            return Ok(());
        }

        let ok = unsafe { (self.glx.glXMakeCurrent)(self.display, drawable as u64, self.context) };
        if ok == 0 {
            return Err(anyhow!("glXMakeCurrent failed for window 0x{:x}", drawable));
        }

        if self.current.is_none() {
            let glx = &self.glx;
            gl::load_with(|symbol| {
                let Ok(symbol_cstr) = CString::new(symbol) else {
                    return ptr::null();
                };
                unsafe {
                    match (glx.glXGetProcAddress)(symbol_cstr.as_ptr() as *const _) {
                        Some(f) => f as *const _,
                        None => ptr::null(),
                    }
                }
            });
            info!("OpenGL functions loaded");
        }

        self.current = Some(drawable);
        Ok(())
    }

    pub fn swap_buffers(&self, drawable: u32) {
        unsafe {
            (self.glx.glXSwapBuffers)(self.display, drawable as u64);
        }
    }

    /// Forget the binding to `drawable` before the window is destroyed
    pub fn release(&mut self, drawable: u32) {
        if self.current == Some(drawable) {
            unsafe {
                (self.glx.glXMakeCurrent)(self.display, 0, ptr::null_mut());
            }
            // Keep `Some` so functions are not reloaded
            self.current = Some(0);
        }
    }
}

impl Drop for GlContext {
    fn drop(&mut self) {
        unsafe {
            (self.glx.glXMakeCurrent)(self.display, 0, ptr::null_mut());
            (self.glx.glXDestroyContext)(self.display, self.context);
            (self.xlib.XCloseDisplay)(self.display);
        }
    }
}
