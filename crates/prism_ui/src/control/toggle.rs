//! Two-state controls.

use super::behavior::{Effect, Phase, Response};
use crate::action::ActionValue;

/// Check box state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkbox {
    /// Checked.
    pub selected: bool,
}

impl Checkbox {
    /// Toggles when the press ends, wherever the pointer is by then.
    pub(crate) fn pointer(&mut self, phase: Phase) -> Response {
        match phase {
            Phase::Press => Response { redraw: true, ..Response::NONE },
            Phase::Release => {
                self.selected = !self.selected;
                Response::report(ActionValue::Selected(self.selected))
            }
            Phase::Drag | Phase::Wheel(_) => Response::NONE,
        }
    }
}

/// Option button state.
///
/// Options sharing a group name are mutually exclusive: selecting one
/// deselects the others. An option without a group behaves like a check box
/// that cannot be unchecked by clicking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionButton {
    /// Exclusive group name.
    pub group: Option<String>,
    /// Selected.
    pub selected: bool,
}

impl OptionButton {
    /// Creates an unselected option in `group`.
    #[must_use]
    pub fn in_group(group: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            selected: false,
        }
    }

    pub(crate) fn pointer(&mut self, phase: Phase) -> Response {
        match phase {
            Phase::Press => Response { redraw: true, ..Response::NONE },
            Phase::Release => {
                self.selected = true;
                Response::report(ActionValue::Selected(true)).with_effect(Effect::SelectOption)
            }
            Phase::Drag | Phase::Wheel(_) => Response::NONE,
        }
    }
}
