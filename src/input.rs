//! Input vocabulary
//!
//! Mouse buttons, the unified key space, modifier snapshots, cursor shapes and
//! the key chord used by the window-level quit policy.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use thiserror::Error;

/// Offset added to non-printable key codes so that every key fits in one
/// integer space
pub const SPECIAL_KEY_OFFSET: u32 = 10000;

/// Mouse button reported with press/release events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    /// Any other button, with the platform's button number
    Other(u8),
}

/// Whether a button went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

bitflags! {
    /// Keyboard modifiers held during the latest mouse or key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL  = 1 << 1;
        const ALT   = 1 << 2;
    }
}

/// A key in the unified key space
///
/// Printable keys carry their character code; special keys are
/// `SPECIAL_KEY_OFFSET + code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(pub u32);

impl Key {
    pub const F1: Key = Key::special(1);
    pub const F2: Key = Key::special(2);
    pub const F3: Key = Key::special(3);
    pub const F4: Key = Key::special(4);
    pub const F5: Key = Key::special(5);
    pub const F6: Key = Key::special(6);
    pub const F7: Key = Key::special(7);
    pub const F8: Key = Key::special(8);
    pub const F9: Key = Key::special(9);
    pub const F10: Key = Key::special(10);
    pub const F11: Key = Key::special(11);
    pub const F12: Key = Key::special(12);
    pub const LEFT: Key = Key::special(100);
    pub const UP: Key = Key::special(101);
    pub const RIGHT: Key = Key::special(102);
    pub const DOWN: Key = Key::special(103);
    pub const PAGE_UP: Key = Key::special(104);
    pub const PAGE_DOWN: Key = Key::special(105);
    pub const HOME: Key = Key::special(106);
    pub const END: Key = Key::special(107);
    pub const INSERT: Key = Key::special(108);

    pub const BACKSPACE: Key = Key(8);
    pub const TAB: Key = Key(9);
    pub const ENTER: Key = Key(13);
    pub const ESCAPE: Key = Key(27);
    pub const SPACE: Key = Key(32);
    pub const DELETE: Key = Key(127);

    /// Special (non-printable) key from its platform-neutral code
    pub const fn special(code: u32) -> Key {
        Key(SPECIAL_KEY_OFFSET + code)
    }

    pub fn from_char(c: char) -> Key {
        Key(c as u32)
    }

    pub fn is_special(&self) -> bool {
        self.0 > SPECIAL_KEY_OFFSET
    }

    /// Character for printable keys, `None` for special keys
    pub fn as_char(&self) -> Option<char> {
        if self.is_special() {
            None
        } else {
            char::from_u32(self.0)
        }
    }

    /// Case-insensitive match against a character
    pub fn matches_ignore_case(&self, c: char) -> bool {
        self.as_char().is_some_and(|k| k.eq_ignore_ascii_case(&c))
    }
}

impl PartialEq<char> for Key {
    fn eq(&self, other: &char) -> bool {
        self.0 == *other as u32
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::from_char(c)
    }
}

const NAMED_KEYS: &[(&str, Key)] = &[
    ("F1", Key::F1),
    ("F2", Key::F2),
    ("F3", Key::F3),
    ("F4", Key::F4),
    ("F5", Key::F5),
    ("F6", Key::F6),
    ("F7", Key::F7),
    ("F8", Key::F8),
    ("F9", Key::F9),
    ("F10", Key::F10),
    ("F11", Key::F11),
    ("F12", Key::F12),
    ("Left", Key::LEFT),
    ("Up", Key::UP),
    ("Right", Key::RIGHT),
    ("Down", Key::DOWN),
    ("PageUp", Key::PAGE_UP),
    ("PageDown", Key::PAGE_DOWN),
    ("Home", Key::HOME),
    ("End", Key::END),
    ("Insert", Key::INSERT),
    ("Backspace", Key::BACKSPACE),
    ("Tab", Key::TAB),
    ("Enter", Key::ENTER),
    ("Return", Key::ENTER),
    ("Escape", Key::ESCAPE),
    ("Esc", Key::ESCAPE),
    ("Space", Key::SPACE),
    ("Delete", Key::DELETE),
];

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED_KEYS.iter().find(|(_, k)| k == self) {
            return f.write_str(name);
        }
        match self.as_char() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, "Key({})", self.0),
        }
    }
}

/// Cursor shapes a window or object can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    #[default]
    RightArrow,
    LeftArrow,
    Info,
    Destroy,
    Help,
    Cycle,
    Spray,
    Wait,
    Text,
    Crosshair,
    UpDown,
    LeftRight,
    TopSide,
    BottomSide,
    LeftSide,
    RightSide,
    TopLeftCorner,
    TopRightCorner,
    BottomRightCorner,
    BottomLeftCorner,
    /// Use the parent window's cursor
    Inherit,
    /// Blank cursor
    None,
    FullCrosshair,
}

/// Errors produced while parsing a key chord such as `"Alt+F4"`
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChordError {
    #[error("empty key chord")]
    Empty,

    #[error("unknown modifier `{0}` in key chord")]
    UnknownModifier(String),

    #[error("unknown key `{0}` in key chord")]
    UnknownKey(String),
}

/// A key together with the exact modifier set that must be held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub modifiers: KeyModifiers,
}

impl KeyChord {
    pub fn new(key: Key, modifiers: KeyModifiers) -> Self {
        Self { key, modifiers }
    }

    /// True if `key` was pressed with exactly this chord's modifiers.
    /// Letters match in either case.
    pub fn matches(&self, key: Key, modifiers: KeyModifiers) -> bool {
        let same_key = match (self.key.as_char(), key.as_char()) {
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(&b),
            _ => self.key == key,
        };
        same_key && self.modifiers == modifiers
    }
}

impl FromStr for KeyChord {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key_part, modifier_parts)) = parts.split_last() else {
            return Err(ChordError::Empty);
        };
        if key_part.is_empty() {
            return Err(ChordError::Empty);
        }

        let mut modifiers = KeyModifiers::empty();
        for part in modifier_parts {
            modifiers |= match part.to_ascii_lowercase().as_str() {
                "shift" => KeyModifiers::SHIFT,
                "ctrl" | "control" => KeyModifiers::CTRL,
                "alt" => KeyModifiers::ALT,
                _ => return Err(ChordError::UnknownModifier(part.to_string())),
            };
        }

        let key = if let Some((_, key)) = NAMED_KEYS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key_part))
        {
            *key
        } else {
            let mut chars = key_part.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::from_char(c),
                _ => return Err(ChordError::UnknownKey(key_part.to_string())),
            }
        };

        Ok(KeyChord { key, modifiers })
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CTRL) {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("Shift+")?;
        }
        write!(f, "{}", self.key)
    }
}

/// Window-level reaction to a reserved "quit" key chord
///
/// The base phase of every key dispatch consults this policy after the
/// window's own handlers have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuitPolicy {
    chord: Option<KeyChord>,
}

impl QuitPolicy {
    pub fn new(chord: KeyChord) -> Self {
        Self { chord: Some(chord) }
    }

    /// No key combination quits
    pub fn disabled() -> Self {
        Self { chord: None }
    }

    pub fn chord(&self) -> Option<KeyChord> {
        self.chord
    }

    pub fn should_quit(&self, key: Key, modifiers: KeyModifiers) -> bool {
        self.chord.is_some_and(|chord| chord.matches(key, modifiers))
    }
}

impl Default for QuitPolicy {
    /// Alt+F4
    fn default() -> Self {
        Self::new(KeyChord::new(Key::F4, KeyModifiers::ALT))
    }
}
