//! Keyboard jogging
//!
//! Arrow and page keys jog the machine while held: key-down starts a
//! continuous jog, key-up stops the axis. Auto-repeat events are ignored.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use vcpkit_core::{AxisLetter, CommandApi, JogSign};

/// Keys the window receives
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Other(String),
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            "pageup" | "pgup" => Key::PageUp,
            "pagedown" | "pgdn" => Key::PageDown,
            _ => Key::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub auto_repeat: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            auto_repeat: false,
        }
    }

    pub fn repeat(key: Key) -> Self {
        Self {
            key,
            auto_repeat: true,
        }
    }
}

/// What the forwarder did with a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Forwarded,
    IgnoredRepeat,
    Unhandled,
}

/// Axis and direction a key jogs
pub fn jog_mapping(key: &Key) -> Option<(AxisLetter, JogSign)> {
    match key {
        Key::Up => Some((AxisLetter::Y, JogSign::Positive)),
        Key::Down => Some((AxisLetter::Y, JogSign::Negative)),
        Key::Right => Some((AxisLetter::X, JogSign::Positive)),
        Key::Left => Some((AxisLetter::X, JogSign::Negative)),
        Key::PageUp => Some((AxisLetter::Z, JogSign::Positive)),
        Key::PageDown => Some((AxisLetter::Z, JogSign::Negative)),
        Key::Other(_) => None,
    }
}

pub struct JogKeyForwarder {
    commands: Rc<dyn CommandApi>,
}

impl JogKeyForwarder {
    pub fn new(commands: Rc<dyn CommandApi>) -> Self {
        Self { commands }
    }

    pub fn key_pressed(&self, event: &KeyEvent) -> KeyOutcome {
        self.forward(event, true)
    }

    pub fn key_released(&self, event: &KeyEvent) -> KeyOutcome {
        self.forward(event, false)
    }

    fn forward(&self, event: &KeyEvent, pressed: bool) -> KeyOutcome {
        if event.auto_repeat {
            return KeyOutcome::IgnoredRepeat;
        }
        let Some((axis, sign)) = jog_mapping(&event.key) else {
            tracing::debug!(
                "Unhandled key {} event: {}",
                if pressed { "press" } else { "release" },
                event.key
            );
            return KeyOutcome::Unhandled;
        };
        let sign = if pressed { sign } else { JogSign::Stop };
        if let Err(e) = self.commands.jog(axis, sign) {
            tracing::warn!("Keyboard jog {} {} failed: {}", axis.upper(), sign, e);
        }
        KeyOutcome::Forwarded
    }
}
