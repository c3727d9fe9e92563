//! Input model: modifier keys, pointer targets, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. At most one gesture exists at a time, so dragging and panning
//! can never run concurrently. Each active variant carries what is needed to
//! apply per-frame updates and to revert on cancellation.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::PinId;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
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

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A pin's body.
    Pin(PinId),
    /// Empty canvas.
    Canvas,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"z"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    fn is(&self, name: &str) -> bool {
        self.0.eq_ignore_ascii_case(name)
    }

    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.is("Escape")
    }
}

/// Keyboard shortcut resolved from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Undo,
    Redo,
    Cancel,
}

impl Shortcut {
    /// Map a key press to a board shortcut, if it is one.
    #[must_use]
    pub fn from_key(key: &Key, modifiers: Modifiers) -> Option<Self> {
        if key.is_escape() {
            return Some(Self::Cancel);
        }
        if !modifiers.command() {
            return None;
        }
        if key.is("z") {
            return Some(if modifiers.shift { Self::Redo } else { Self::Undo });
        }
        if key.is("y") {
            return Some(Self::Redo);
        }
        None
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving a pin.
    DraggingPin {
        /// Id of the pin being dragged.
        id: PinId,
        /// Board-space pointer position minus pin position at grab time.
        grab_offset: Point,
        /// Pin position at grab time, restored on cancel and used as the undo point.
        origin: Point,
    },
    /// The user is panning the canvas.
    Panning {
        /// Pointer position minus viewport offset at pointer-down.
        anchor: Point,
        /// Viewport offset at pointer-down, restored on cancel.
        origin_offset: Point,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingPin { .. })
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    /// Id of the pin being dragged, if any.
    #[must_use]
    pub fn dragged_pin(&self) -> Option<PinId> {
        match self {
            Self::DraggingPin { id, .. } => Some(*id),
            _ => None,
        }
    }
}
