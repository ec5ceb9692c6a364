//! Per-kind behavior components and the pointer contract they share.
//!
//! Every kind runs the same hover/active state machine (driven by the
//! router); the behavior only decides what a press, a drag, a release or a
//! wheel notch *means* for its own state, and which value to report.

use prism_core::Rect;

use super::panel::{Pane, PaneTab, Panel};
use super::scroller::Scroller;
use super::slider::{Ranger, Slider};
use super::text_field::TextField;
use super::toggle::{Checkbox, OptionButton};
use super::tooltip::TooltipState;
use super::viewer::Viewer;
use super::{Capabilities, Capability, ControlKind};
use crate::action::ActionValue;
use crate::config::TextConfig;

/// Pointer as seen from inside the receiving control.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LocalPointer {
    /// Local-frame x.
    pub x: f32,
    /// Local-frame y.
    pub y: f32,
    /// Local frame width.
    pub w: f32,
    /// Local frame height.
    pub h: f32,
    /// Part under the pointer when the pick target is this control.
    pub part: Option<u8>,
    /// Pointer is over this control.
    pub over: bool,
    /// Canvas position.
    pub canvas: (f32, f32),
    /// Control paints an opaque background.
    pub opaque: bool,
    /// Control's parent-local rectangle.
    pub rect: Rect,
}

/// Pointer phase delivered to a behavior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Phase {
    /// Button went down on this control.
    Press,
    /// Pointer moved while this control is active.
    Drag,
    /// Button released (or pointer left the canvas) while active.
    Release,
    /// Wheel notch over this control.
    Wheel(f32),
}

/// Side effect that reaches beyond the control itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Effect {
    /// Nothing outside the control changes.
    None,
    /// Move the control to a new parent-local position (clamping applies).
    MoveTo(f32, f32),
    /// Deselect the rest of the option group.
    SelectOption,
    /// Open or close the tab's pane.
    TogglePane,
    /// Take keyboard focus.
    Focus,
    /// A scroller moved; update whatever it is linked to.
    ScrollLinked,
    /// A viewer panned; update its linked scrollers.
    PanLinked,
}

/// Outcome of delivering a pointer phase.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Response {
    /// Value to report to the action handler, if any.
    pub value: Option<ActionValue>,
    /// Effect for the GUI to apply.
    pub effect: Effect,
    /// Control needs a redraw.
    pub redraw: bool,
}

impl Response {
    pub(crate) const NONE: Self = Self {
        value: None,
        effect: Effect::None,
        redraw: false,
    };

    pub(crate) fn report(value: ActionValue) -> Self {
        Self {
            value: Some(value),
            effect: Effect::None,
            redraw: true,
        }
    }

    pub(crate) fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
}

/// The kind-specific part of a control.
#[derive(Debug)]
pub enum Behavior {
    /// Push button.
    Button,
    /// Static text and/or icon.
    Label,
    /// Check box.
    Checkbox(Checkbox),
    /// Option in an exclusive group.
    OptionButton(OptionButton),
    /// Single-value slider.
    Slider(Slider),
    /// Two-thumb range slider.
    Ranger(Ranger),
    /// Scroller.
    Scroller(Scroller),
    /// Text entry.
    TextField(TextField),
    /// Draggable container.
    Panel(Panel),
    /// Side-docked container.
    Pane(Pane),
    /// Pane tab.
    PaneTab(PaneTab),
    /// Image viewport.
    Viewer(Viewer),
    /// Tooltip.
    Tooltip(TooltipState),
}

impl Behavior {
    /// Kind of control this behavior implements.
    #[must_use]
    pub fn kind(&self) -> ControlKind {
        match self {
            Self::Button => ControlKind::Button,
            Self::Label => ControlKind::Label,
            Self::Checkbox(_) => ControlKind::Checkbox,
            Self::OptionButton(_) => ControlKind::OptionButton,
            Self::Slider(_) => ControlKind::Slider,
            Self::Ranger(_) => ControlKind::Ranger,
            Self::Scroller(_) => ControlKind::Scroller,
            Self::TextField(_) => ControlKind::TextField,
            Self::Panel(_) => ControlKind::Panel,
            Self::Pane(_) => ControlKind::Pane,
            Self::PaneTab(_) => ControlKind::PaneTab,
            Self::Viewer(_) => ControlKind::Viewer,
            Self::Tooltip(_) => ControlKind::Tooltip,
        }
    }

    /// Capabilities of this kind.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        use Capability::{Container, Drag, Focus, Icon, Orient, Text, Toggle, Value};
        match self {
            Self::Button | Self::Label => Capabilities::of(&[Orient, Text, Icon]),
            Self::Checkbox(_) | Self::OptionButton(_) => Capabilities::of(&[Orient, Text, Toggle]),
            Self::Slider(_) | Self::Ranger(_) | Self::Scroller(_) => Capabilities::of(&[Orient, Value]),
            Self::TextField(_) => Capabilities::of(&[Orient, Text, Focus]),
            Self::Panel(_) => Capabilities::of(&[Drag, Container]),
            Self::Pane(_) => Capabilities::of(&[Container]),
            Self::PaneTab(_) | Self::Tooltip(_) => Capabilities::of(&[Text]),
            Self::Viewer(_) => Capabilities::NONE,
        }
    }

    pub(crate) fn opaque_by_default(&self) -> bool {
        !matches!(self, Self::Label)
    }

    /// Tooltips are display-only.
    pub(crate) fn pickable(&self) -> bool {
        !matches!(self, Self::Tooltip(_))
    }

    /// Delivers a pointer phase.
    pub(crate) fn pointer(&mut self, phase: Phase, p: &LocalPointer, text: &TextConfig) -> Response {
        match self {
            Self::Button => match phase {
                Phase::Press => Response { redraw: true, ..Response::NONE },
                Phase::Release => Response::report(ActionValue::Clicked),
                Phase::Drag | Phase::Wheel(_) => Response::NONE,
            },
            Self::Label | Self::Pane(_) | Self::Tooltip(_) => Response::NONE,
            Self::Checkbox(c) => c.pointer(phase),
            Self::OptionButton(o) => o.pointer(phase),
            Self::Slider(s) => s.pointer(phase, p),
            Self::Ranger(r) => r.pointer(phase, p),
            Self::Scroller(s) => s.pointer(phase, p),
            Self::TextField(t) => t.pointer(phase, p, text),
            Self::Panel(panel) => panel.pointer(phase, p),
            Self::PaneTab(_) => match phase {
                Phase::Release if p.over => Response { redraw: true, ..Response::NONE }.with_effect(Effect::TogglePane),
                Phase::Press | Phase::Release => Response { redraw: true, ..Response::NONE },
                Phase::Drag | Phase::Wheel(_) => Response::NONE,
            },
            Self::Viewer(v) => v.pointer(phase, p),
        }
    }

    /// Current value, as reported by `value()` queries.
    #[must_use]
    pub fn value(&self) -> Option<ActionValue> {
        match self {
            Self::Checkbox(c) => Some(ActionValue::Selected(c.selected)),
            Self::OptionButton(o) => Some(ActionValue::Selected(o.selected)),
            Self::Slider(s) => Some(ActionValue::Value(s.value())),
            Self::Ranger(r) => Some(ActionValue::Range { low: r.low(), high: r.high() }),
            Self::Scroller(s) => Some(ActionValue::Scroll { value: s.value(), used: s.used() }),
            Self::TextField(t) => Some(ActionValue::Text(t.text().to_string())),
            Self::Pane(p) => Some(ActionValue::Open(p.open)),
            Self::Viewer(v) => {
                let (x, y) = v.center();
                Some(ActionValue::View { x, y })
            }
            Self::Button | Self::Label | Self::Panel(_) | Self::PaneTab(_) | Self::Tooltip(_) => None,
        }
    }
}

/// Pointer fixture shared by the behavior tests.
#[cfg(test)]
pub(crate) fn pointer_at(x: f32, y: f32, w: f32, h: f32, part: Option<u8>) -> LocalPointer {
    LocalPointer {
        x,
        y,
        w,
        h,
        part,
        over: true,
        canvas: (x, y),
        opaque: true,
        rect: Rect::new(0.0, 0.0, w, h),
    }
}
