//! Action callbacks.

use crate::control::ControlId;
use crate::input::RawEvent;

/// Kind-specific payload of an action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionValue {
    /// Button clicked.
    Clicked,
    /// Check box or option state.
    Selected(bool),
    /// Slider value.
    Value(f32),
    /// Ranger values.
    Range {
        /// Low thumb.
        low: f32,
        /// High thumb.
        high: f32,
    },
    /// Scroller position and visible fraction.
    Scroll {
        /// Thumb center.
        value: f32,
        /// Visible fraction.
        used: f32,
    },
    /// Panel position after a drag.
    Position {
        /// Parent-local x.
        x: f32,
        /// Parent-local y.
        y: f32,
    },
    /// Text field contents.
    Text(String),
    /// Viewer center in content coordinates.
    View {
        /// Content x.
        x: f32,
        /// Content y.
        y: f32,
    },
    /// Pane opened or closed.
    Open(bool),
}

/// What an action handler receives.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionEvent {
    /// Control that produced the action.
    pub source: ControlId,
    /// Source control's name.
    pub name: String,
    /// Input that triggered it.
    pub raw: RawEvent,
    /// Payload.
    pub value: ActionValue,
    /// False for in-progress drag updates, true for the terminating update.
    pub is_final: bool,
}

/// A registered action callback. One per control.
pub type ActionHandler = Box<dyn FnMut(&ActionEvent) + Send>;
