//! Pointer and keyboard events fed to the editor.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    /// Movement with the button held.
    Drag { position: Point },
    Up { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Drag { position }
            | PointerEvent::Up { position } => position,
        }
    }
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Delete,
    Backspace,
    Escape,
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowUp => f.write_str("up"),
            Key::ArrowDown => f.write_str("down"),
            Key::ArrowLeft => f.write_str("left"),
            Key::ArrowRight => f.write_str("right"),
            Key::Delete => f.write_str("delete"),
            Key::Backspace => f.write_str("backspace"),
            Key::Escape => f.write_str("escape"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}

/// Error for key names that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key: {0}")]
pub struct UnknownKey(pub String);

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = match s.to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Key::ArrowUp,
            "down" | "arrowdown" => Key::ArrowDown,
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            "delete" | "del" => Key::Delete,
            "backspace" => Key::Backspace,
            "escape" | "esc" => Key::Escape,
            "plus" => Key::Char('+'),
            "minus" => Key::Char('-'),
            _ => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c.to_ascii_lowercase()),
                    _ => return Err(UnknownKey(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

/// Keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Parse a chord such as `ctrl+g`, `shift+left` or `delete`.
pub fn parse_key_chord(chord: &str) -> Result<(Key, Modifiers), UnknownKey> {
    let chord = chord.trim();
    // A bare "+" (or "ctrl++") names the plus key itself.
    let (prefix, key) = match chord.strip_suffix("++") {
        Some(prefix) => (prefix, "+"),
        None if chord == "+" => ("", "+"),
        None => match chord.rsplit_once('+') {
            Some((prefix, key)) => (prefix, key),
            None => ("", chord),
        },
    };

    let mut modifiers = Modifiers::default();
    for part in prefix.split('+').filter(|p| !p.is_empty()) {
        match part.trim().to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            "alt" | "option" => modifiers.alt = true,
            "meta" | "cmd" | "super" => modifiers.meta = true,
            _ => return Err(UnknownKey(chord.to_string())),
        }
    }
    Ok((key.trim().parse()?, modifiers))
}
