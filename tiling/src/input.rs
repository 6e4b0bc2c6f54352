//! Input model: mouse buttons, modifier keys, keys and wheel deltas, and
//! the mapping from raw key presses to editor shortcuts.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button: confirm the selected candidate.
    Primary,
    /// Middle mouse button. Unused.
    Middle,
    /// Right mouse button: remove the tile under the pointer.
    Secondary,
}

/// A keyboard key as reported by the host (e.g. `"ArrowRight"`, `"z"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// Candidate step for this scroll: up selects the next candidate, down the
    /// previous one, no vertical motion does nothing.
    #[must_use]
    pub fn step(self) -> isize {
        if self.dy < 0.0 {
            1
        } else if self.dy > 0.0 {
            -1
        } else {
            0
        }
    }
}

/// Editor action bound to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NextCandidate,
    PreviousCandidate,
    Undo,
    Redo,
    Export,
}

impl Shortcut {
    /// Map a key press to its shortcut, if any.
    ///
    /// Ctrl+Shift+Z arrives as an upper-case `"Z"` and means redo.
    #[must_use]
    pub fn from_key(key: &Key, mods: Modifiers) -> Option<Self> {
        match (key.0.as_str(), mods.ctrl) {
            ("ArrowRight", _) => Some(Self::NextCandidate),
            ("ArrowLeft", _) => Some(Self::PreviousCandidate),
            ("z", true) if !mods.shift => Some(Self::Undo),
            ("z" | "Z" | "y" | "Y", true) => Some(Self::Redo),
            ("s" | "S", true) => Some(Self::Export),
            _ => None,
        }
    }
}
