//! Cursor shapes from the X cursor font

use std::collections::HashMap;

use anyhow::Result;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{ConnectionExt as _, Font, Window};
use x11rb::rust_connection::RustConnection;

use crate::input::CursorShape;

/// Glyph in the standard `cursor` font, `None` for shapes it has no glyph for
fn glyph(shape: CursorShape) -> Option<u16> {
    let glyph = match shape {
        CursorShape::RightArrow => 94,      // right_ptr
        CursorShape::LeftArrow => 68,       // left_ptr
        CursorShape::Info => 58,            // hand1
        CursorShape::Destroy => 88,         // pirate
        CursorShape::Help => 92,            // question_arrow
        CursorShape::Cycle => 50,           // exchange
        CursorShape::Spray => 122,          // spraycan
        CursorShape::Wait => 150,           // watch
        CursorShape::Text => 152,           // xterm
        CursorShape::Crosshair | CursorShape::FullCrosshair => 34,
        CursorShape::UpDown => 116,         // sb_v_double_arrow
        CursorShape::LeftRight => 108,      // sb_h_double_arrow
        CursorShape::TopSide => 138,
        CursorShape::BottomSide => 16,
        CursorShape::LeftSide => 70,
        CursorShape::RightSide => 96,
        CursorShape::TopLeftCorner => 134,
        CursorShape::TopRightCorner => 136,
        CursorShape::BottomRightCorner => 14,
        CursorShape::BottomLeftCorner => 12,
        CursorShape::Inherit | CursorShape::None => return None,
    };
    Some(glyph)
}

/// Lazily created X cursors, one per shape
pub struct Cursors {
    font: Font,
    root: Window,
    cache: HashMap<CursorShape, u32>,
}

impl Cursors {
    pub fn new(conn: &RustConnection, root: Window) -> Result<Self> {
        let font = conn.generate_id()?;
        conn.open_font(font, b"cursor")?;
        Ok(Self {
            font,
            root,
            cache: HashMap::new(),
        })
    }

    /// Cursor id for `shape`; `0` means inherit from the parent
    pub fn get(&mut self, conn: &RustConnection, shape: CursorShape) -> Result<u32> {
        if shape == CursorShape::Inherit {
            return Ok(0);
        }
        if let Some(&cursor) = self.cache.get(&shape) {
            return Ok(cursor);
        }

        let cursor = match glyph(shape) {
            Some(glyph) => {
                let cursor = conn.generate_id()?;
                conn.create_glyph_cursor(
                    cursor,
                    self.font,
                    self.font,
                    glyph,     // source_char
                    glyph + 1, // mask_char
                    0, 0, 0,
                    0xffff, 0xffff, 0xffff,
                )?;
                cursor
            }
            None => self.blank(conn)?,
        };

        self.cache.insert(shape, cursor);
        Ok(cursor)
    }

    /// Invisible cursor from an empty 1x1 bitmap
    fn blank(&self, conn: &RustConnection) -> Result<u32> {
        let pixmap = conn.generate_id()?;
        conn.create_pixmap(1, pixmap, self.root, 1, 1)?;
        let cursor = conn.generate_id()?;
        conn.create_cursor(cursor, pixmap, pixmap, 0, 0, 0, 0, 0, 0, 0, 0)?;
        conn.free_pixmap(pixmap)?;
        Ok(cursor)
    }

    pub fn free(&mut self, conn: &RustConnection) -> Result<()> {
        for (_, cursor) in self.cache.drain() {
            conn.free_cursor(cursor)?;
        }
        conn.close_font(self.font)?;
        Ok(())
    }
}
