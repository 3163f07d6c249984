//! Keycode, keysym and modifier translation

use tracing::trace;
use x11rb::protocol::xproto::KeyButMask;

use crate::input::{Key, KeyModifiers, MouseButton};

const XK_BACKSPACE: u32 = 0xff08;
const XK_TAB: u32 = 0xff09;
const XK_RETURN: u32 = 0xff0d;
const XK_ESCAPE: u32 = 0xff1b;
const XK_HOME: u32 = 0xff50;
const XK_LEFT: u32 = 0xff51;
const XK_UP: u32 = 0xff52;
const XK_RIGHT: u32 = 0xff53;
const XK_DOWN: u32 = 0xff54;
const XK_PAGE_UP: u32 = 0xff55;
const XK_PAGE_DOWN: u32 = 0xff56;
const XK_END: u32 = 0xff57;
const XK_INSERT: u32 = 0xff63;
const XK_KP_ENTER: u32 = 0xff8d;
const XK_F1: u32 = 0xffbe;
const XK_F12: u32 = 0xffc9;
const XK_DELETE: u32 = 0xffff;

/// Key for an X keysym, `None` for keys outside the unified key space
pub fn keysym_to_key(keysym: u32) -> Option<Key> {
    let key = match keysym {
        // Latin-1 keysyms equal their code points
        0x20..=0x7e | 0xa0..=0xff => Key(keysym),
        XK_F1..=XK_F12 => Key::special(1 + keysym - XK_F1),
        XK_LEFT => Key::LEFT,
        XK_UP => Key::UP,
        XK_RIGHT => Key::RIGHT,
        XK_DOWN => Key::DOWN,
        XK_PAGE_UP => Key::PAGE_UP,
        XK_PAGE_DOWN => Key::PAGE_DOWN,
        XK_HOME => Key::HOME,
        XK_END => Key::END,
        XK_INSERT => Key::INSERT,
        XK_RETURN | XK_KP_ENTER => Key::ENTER,
        XK_BACKSPACE => Key::BACKSPACE,
        XK_TAB => Key::TAB,
        XK_ESCAPE => Key::ESCAPE,
        XK_DELETE => Key::DELETE,
        _ => return None,
    };
    Some(key)
}

pub fn modifiers_from_state(state: KeyButMask) -> KeyModifiers {
    let mut modifiers = KeyModifiers::empty();
    if state.contains(KeyButMask::SHIFT) {
        modifiers |= KeyModifiers::SHIFT;
    }
    if state.contains(KeyButMask::CONTROL) {
        modifiers |= KeyModifiers::CTRL;
    }
    if state.contains(KeyButMask::MOD1) {
        modifiers |= KeyModifiers::ALT;
    }
    modifiers
}

/// Whether any pointer button is held in `state`
pub fn any_button_held(state: KeyButMask) -> bool {
    [
        KeyButMask::BUTTON1,
        KeyButMask::BUTTON2,
        KeyButMask::BUTTON3,
        KeyButMask::BUTTON4,
        KeyButMask::BUTTON5,
    ]
    .into_iter()
    .any(|button| state.contains(button))
}

pub fn mouse_button(detail: u8) -> MouseButton {
    match detail {
        1 => MouseButton::Left,
        2 => MouseButton::Middle,
        3 => MouseButton::Right,
        other => MouseButton::Other(other),
    }
}

/// Keyboard mapping fetched once from the server
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    min_keycode: u8,
    keysyms_per_keycode: u8,
    keysyms: Vec<u32>,
}

impl Keymap {
    pub fn new(min_keycode: u8, keysyms_per_keycode: u8, keysyms: Vec<u32>) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode,
            keysyms,
        }
    }

    /// Keysym for `keycode`, using the shifted column when Shift is held
    pub fn keysym(&self, keycode: u8, shift: bool) -> Option<u32> {
        let per = self.keysyms_per_keycode as usize;
        if per == 0 || keycode < self.min_keycode {
            return None;
        }
        let base = (keycode - self.min_keycode) as usize * per;
        let row = self.keysyms.get(base..base + per)?;

        let unshifted = row.first().copied().filter(|&sym| sym != 0)?;
        let shifted = row.get(1).copied().filter(|&sym| sym != 0);
        match (shift, shifted) {
            (true, Some(sym)) => Some(sym),
            // Single-column letters: shift means upper case
            (true, None) if (b'a' as u32..=b'z' as u32).contains(&unshifted) => {
                Some(unshifted - 0x20)
            }
            _ => Some(unshifted),
        }
    }

    pub fn key(&self, keycode: u8, modifiers: KeyModifiers) -> Option<Key> {
        let keysym = self.keysym(keycode, modifiers.contains(KeyModifiers::SHIFT))?;
        let key = keysym_to_key(keysym);
        if key.is_none() {
            trace!("Unmapped keysym 0x{:x} for keycode {}", keysym, keycode);
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keysyms_map_to_keys() {
        assert_eq!(keysym_to_key('a' as u32), Some(Key::from_char('a')));
        assert_eq!(keysym_to_key(0xe9), Some(Key::from_char('é')));
        assert_eq!(keysym_to_key(XK_F1), Some(Key::F1));
        assert_eq!(keysym_to_key(XK_F12), Some(Key::F12));
        assert_eq!(keysym_to_key(XK_KP_ENTER), Some(Key::ENTER));
        assert_eq!(keysym_to_key(XK_PAGE_DOWN), Some(Key::PAGE_DOWN));
        assert_eq!(keysym_to_key(0xffe1), None); // Shift_L
    }

    #[test]
    fn test_state_translation() {
        let state = KeyButMask::SHIFT | KeyButMask::MOD1 | KeyButMask::BUTTON1;
        assert_eq!(
            modifiers_from_state(state),
            KeyModifiers::SHIFT | KeyModifiers::ALT
        );
        assert!(any_button_held(state));
        assert!(!any_button_held(KeyButMask::CONTROL));
        assert_eq!(mouse_button(3), MouseButton::Right);
        assert_eq!(mouse_button(8), MouseButton::Other(8));
    }

    #[test]
    fn test_keymap_columns() {
        // keycode 10: 'q'/'Q', keycode 11: single-column 'w', keycode 12: F4
        let keymap = Keymap::new(
            10,
            2,
            vec!['q' as u32, 'Q' as u32, 'w' as u32, 0, XK_F1 + 3, 0],
        );
        assert_eq!(keymap.key(10, KeyModifiers::empty()), Some(Key::from_char('q')));
        assert_eq!(keymap.key(10, KeyModifiers::SHIFT), Some(Key::from_char('Q')));
        assert_eq!(keymap.key(11, KeyModifiers::SHIFT), Some(Key::from_char('W')));
        assert_eq!(keymap.key(12, KeyModifiers::ALT), Some(Key::F4));
        assert_eq!(keymap.key(9, KeyModifiers::empty()), None);
        assert_eq!(keymap.key(40, KeyModifiers::empty()), None);
    }
}
