//! Raw input events.
//!
//! The host translates its platform events into these and hands them to
//! [`crate::Gui::dispatch_pointer`] / [`crate::Gui::dispatch_key`]. Hosts
//! that only have DOM-style event names can go through
//! [`crate::Gui::dispatch_named`], which parses them with [`PointerKind`]'s
//! `FromStr` and rejects anything it does not recognise.

use std::str::FromStr;

use crate::error::GuiError;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Left mouse button (also a touch).
    #[default]
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Button pressed (`mousedown`, `touchstart`).
    Down,
    /// Pointer moved (`mousemove`, `touchmove`).
    Move,
    /// Button released (`mouseup`, `touchend`).
    Up,
    /// Pointer left the canvas (`mouseout`, `touchcancel`).
    Out,
    /// Wheel notch (`wheel`).
    Wheel,
}

impl FromStr for PointerKind {
    type Err = GuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mousedown" | "touchstart" | "pointerdown" => Ok(Self::Down),
            "mousemove" | "touchmove" | "pointermove" => Ok(Self::Move),
            "mouseup" | "touchend" | "pointerup" => Ok(Self::Up),
            "mouseout" | "mouseleave" | "touchcancel" | "pointerleave" => Ok(Self::Out),
            "wheel" => Ok(Self::Wheel),
            other => Err(GuiError::UnknownEventKind(other.to_string())),
        }
    }
}

/// A pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Canvas x.
    pub x: f32,
    /// Canvas y.
    pub y: f32,
    /// Button involved (down/up).
    pub button: MouseButton,
    /// Wheel delta; positive scrolls down/right.
    pub delta: f32,
    /// Modifier keys state.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Creates an event with the left button and no modifiers.
    #[must_use]
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self {
            kind,
            x,
            y,
            button: MouseButton::Left,
            delta: 0.0,
            modifiers: Modifiers::default(),
        }
    }

    /// Button press.
    #[must_use]
    pub fn down(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    /// Pointer move.
    #[must_use]
    pub fn moved(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    /// Button release.
    #[must_use]
    pub fn up(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    /// Pointer left the canvas.
    #[must_use]
    pub fn out(x: f32, y: f32) -> Self {
        Self::new(PointerKind::Out, x, y)
    }

    /// Wheel notch.
    #[must_use]
    pub fn wheel(x: f32, y: f32, delta: f32) -> Self {
        Self {
            delta,
            ..Self::new(PointerKind::Wheel, x, y)
        }
    }
}

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Any other key; printable input arrives as [`KeyInput::Typed`].
    Other,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// What happened on the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Key pressed.
    Pressed(Key),
    /// Key released.
    Released(Key),
    /// Printable character produced.
    Typed(char),
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// What happened.
    pub input: KeyInput,
    /// Modifier keys state.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Key press without modifiers.
    #[must_use]
    pub fn pressed(key: Key) -> Self {
        Self { input: KeyInput::Pressed(key), modifiers: Modifiers::default() }
    }

    /// Key release without modifiers.
    #[must_use]
    pub fn released(key: Key) -> Self {
        Self { input: KeyInput::Released(key), modifiers: Modifiers::default() }
    }

    /// Typed character without modifiers.
    #[must_use]
    pub fn typed(ch: char) -> Self {
        Self { input: KeyInput::Typed(ch), modifiers: Modifiers::default() }
    }
}

/// The raw event that triggered an action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// Pointer input.
    Pointer(PointerEvent),
    /// Keyboard input.
    Key(KeyEvent),
    /// Programmatic change (e.g. a linked scroller moved a viewer).
    Synthetic,
}
