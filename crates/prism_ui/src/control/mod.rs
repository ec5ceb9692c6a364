//! Controls.
//!
//! There is one concrete [`Control`] type. What makes a button a button and a
//! slider a slider is its [`Behavior`] component, selected at construction.
//! Operations that only make sense for some kinds are gated by
//! [`Capability`]; asking a control for a capability it lacks is a
//! [`crate::GuiError::Unsupported`], never a silent no-op.

mod behavior;
mod panel;
mod scroller;
mod slider;
mod text_field;
mod toggle;
mod tooltip;
mod viewer;

pub use behavior::Behavior;
pub(crate) use behavior::{Effect, LocalPointer, Phase, Response};
pub(crate) use panel::layout_tabs;
pub(crate) use tooltip::place as place_tooltip;
pub use panel::{Panel, Pane, PaneTab, Side};
pub use scroller::{Axis, Scroller};
pub(crate) use slider::track_span;
pub use slider::{Ranger, Slider, Ticks};
pub use text_field::{KeyOutcome, TextField, Validator};
pub use toggle::{Checkbox, OptionButton};
pub use tooltip::TooltipState;
pub use viewer::Viewer;

use std::sync::Arc;

use prism_core::{Orientation, PickKey, Rect, Surface};

use crate::action::ActionHandler;
use crate::scheme::SchemeId;

/// Part index of a track (the control body).
pub const PART_TRACK: u8 = 0;
/// Part index of a single thumb, or a ranger's low thumb.
pub const PART_THUMB: u8 = 1;
/// Part index of a ranger's high thumb.
pub const PART_THUMB_HIGH: u8 = 2;

/// Unique identifier for a control. Never reused within a GUI instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub u64);

impl ControlId {
    /// Creates a new control ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Control state flags (bitfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlFlags(u32);

impl ControlFlags {
    /// Control is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Control is enabled (can receive input).
    pub const ENABLED: u32 = 1 << 1;
    /// Control is capturing the pointer after a press.
    pub const ACTIVE: u32 = 1 << 2;
    /// Pointer is over the control.
    pub const OVER: u32 = 1 << 3;
    /// Control holds keyboard focus.
    pub const FOCUSED: u32 = 1 << 4;
    /// Display and pick buffers are stale.
    pub const DIRTY: u32 = 1 << 5;
    /// Control paints an opaque background.
    pub const OPAQUE: u32 = 1 << 6;

    /// Default flags for a new control.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::ENABLED | Self::DIRTY | Self::OPAQUE);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag. Returns true if the flag changed.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) -> bool {
        let before = self.has(flag);
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
        before != on
    }
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Observable interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Not drawn and not pickable.
    Hidden,
    /// Visible, pointer elsewhere.
    Idle,
    /// Visible, pointer over it, no press in progress.
    Hover,
    /// Capturing the pointer after a press.
    Active,
    /// Visible but not accepting input.
    Disabled,
}

/// Kind of control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// Push button.
    Button,
    /// Static text and/or icon.
    Label,
    /// Two-state check box.
    Checkbox,
    /// Member of a mutually exclusive option group.
    OptionButton,
    /// Single-value slider.
    Slider,
    /// Two-thumb range slider.
    Ranger,
    /// Scrollbar-like value/used pair.
    Scroller,
    /// Single line text entry.
    TextField,
    /// Draggable container.
    Panel,
    /// Side-docked container.
    Pane,
    /// Tab that opens and closes a pane.
    PaneTab,
    /// Viewport onto a larger image.
    Viewer,
    /// Delayed hover help.
    Tooltip,
}

impl ControlKind {
    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Label => "label",
            Self::Checkbox => "checkbox",
            Self::OptionButton => "option",
            Self::Slider => "slider",
            Self::Ranger => "ranger",
            Self::Scroller => "scroller",
            Self::TextField => "textfield",
            Self::Panel => "panel",
            Self::Pane => "pane",
            Self::PaneTab => "tab",
            Self::Viewer => "viewer",
            Self::Tooltip => "tooltip",
        }
    }
}

/// An operation family a control kind may or may not support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Can be re-oriented.
    Orient,
    /// Carries a text face.
    Text,
    /// Carries an icon face.
    Icon,
    /// Configurable drag-to-move.
    Drag,
    /// Has a selected state.
    Toggle,
    /// Has a numeric value.
    Value,
    /// Accepts keyboard focus.
    Focus,
    /// Holds child controls.
    Container,
}

impl Capability {
    const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Set of capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities(u32);

impl Capabilities {
    /// No capabilities.
    pub const NONE: Self = Self(0);

    /// Builds a set from a list.
    #[must_use]
    pub const fn of(list: &[Capability]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < list.len() {
            bits |= list[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Returns true if the set contains `cap`.
    #[inline]
    #[must_use]
    pub const fn has(self, cap: Capability) -> bool {
        (self.0 & cap.bit()) != 0
    }
}

/// Horizontal alignment of a face inside its control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Text content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextFace {
    /// The text.
    pub text: String,
    /// Alignment.
    pub align: Align,
}

/// Icon content: an already-decoded image.
#[derive(Debug, Clone)]
pub struct IconFace {
    /// Image pixels.
    pub image: Arc<Surface>,
    /// Alignment.
    pub align: Align,
}

/// The two offscreen surfaces a control owns.
#[derive(Debug, Clone)]
pub struct Buffers {
    /// What the user sees.
    pub display: Surface,
    /// Flat key-colored silhouette used for hit testing.
    pub pick: Surface,
}

impl Buffers {
    pub(crate) fn empty() -> Self {
        Self {
            display: Surface::new(0, 0),
            pick: Surface::new(0, 0),
        }
    }
}

/// A single widget instance.
pub struct Control {
    pub(crate) id: ControlId,
    pub(crate) name: String,
    /// Position in the parent and size of the local (unrotated) frame.
    pub(crate) rect: Rect,
    pub(crate) orientation: Orientation,
    pub(crate) flags: ControlFlags,
    pub(crate) scheme: Option<SchemeId>,
    pub(crate) corners: [f32; 4],
    pub(crate) text: Option<TextFace>,
    pub(crate) icon: Option<IconFace>,
    pub(crate) parent: Option<ControlId>,
    pub(crate) children: Vec<ControlId>,
    pub(crate) key: PickKey,
    pub(crate) buffers: Buffers,
    pub(crate) behavior: Behavior,
    pub(crate) action: Option<ActionHandler>,
    pub(crate) tooltip: Option<ControlId>,
}

impl std::fmt::Debug for Control {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("rect", &self.rect)
            .field("orientation", &self.orientation)
            .field("state", &self.visual_state())
            .finish_non_exhaustive()
    }
}

impl Control {
    pub(crate) fn new(id: ControlId, name: String, rect: Rect, key: PickKey, behavior: Behavior) -> Self {
        let mut flags = ControlFlags::DEFAULT;
        if !behavior.opaque_by_default() {
            flags.clear(ControlFlags::OPAQUE);
        }
        Self {
            id,
            name,
            rect,
            orientation: Orientation::East,
            flags,
            scheme: None,
            corners: [0.0; 4],
            text: None,
            icon: None,
            parent: None,
            children: Vec::new(),
            key,
            buffers: Buffers::empty(),
            behavior,
            action: None,
            tooltip: None,
        }
    }

    /// Control id.
    #[must_use]
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// Unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind.
    #[must_use]
    pub fn kind(&self) -> ControlKind {
        self.behavior.kind()
    }

    /// Supported capabilities.
    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.behavior.capabilities()
    }

    /// Position in the parent and local frame size.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Rectangle the control occupies in its parent after orientation.
    #[must_use]
    pub fn footprint(&self) -> Rect {
        let (w, h) = self.orientation.footprint(self.rect.width, self.rect.height);
        Rect::new(self.rect.x, self.rect.y, w, h)
    }

    /// Orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Raw state flags.
    #[must_use]
    pub fn flags(&self) -> ControlFlags {
        self.flags
    }

    /// Returns true if the control is visible.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.has(ControlFlags::VISIBLE)
    }

    /// Returns true if the control accepts input.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.flags.has(ControlFlags::ENABLED)
    }

    /// Returns true while the control captures the pointer.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.flags.has(ControlFlags::ACTIVE)
    }

    /// Returns true if the pointer is over the control.
    #[inline]
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.flags.has(ControlFlags::OVER)
    }

    /// Returns true if the control has keyboard focus.
    #[inline]
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.flags.has(ControlFlags::FOCUSED)
    }

    /// Returns true if the buffers need rebuilding.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.flags.has(ControlFlags::DIRTY)
    }

    /// Returns true if the control paints an opaque background.
    #[inline]
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.flags.has(ControlFlags::OPAQUE)
    }

    /// Derived interaction state.
    #[must_use]
    pub fn visual_state(&self) -> VisualState {
        if !self.is_visible() {
            VisualState::Hidden
        } else if !self.is_enabled() {
            VisualState::Disabled
        } else if self.is_active() {
            VisualState::Active
        } else if self.is_over() {
            VisualState::Hover
        } else {
            VisualState::Idle
        }
    }

    /// Text content, if any. For text fields this is the edited text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.behavior {
            Behavior::TextField(field) => Some(field.text()),
            _ => self.text.as_ref().map(|t| t.text.as_str()),
        }
    }

    /// Text alignment, if the control carries text.
    #[must_use]
    pub fn text_align(&self) -> Option<Align> {
        self.text.as_ref().map(|t| t.align)
    }

    /// Per-corner radii (tl, tr, br, bl).
    #[must_use]
    pub fn corners(&self) -> [f32; 4] {
        self.corners
    }

    /// Scheme override, if any.
    #[must_use]
    pub fn scheme(&self) -> Option<SchemeId> {
        self.scheme
    }

    /// Parent container.
    #[must_use]
    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    /// Children in z-order (last is topmost).
    #[must_use]
    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    /// Pick key.
    #[must_use]
    pub fn key(&self) -> PickKey {
        self.key
    }

    /// Attached tooltip control.
    #[must_use]
    pub fn tooltip(&self) -> Option<ControlId> {
        self.tooltip
    }

    /// Behavior component.
    #[must_use]
    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    /// Display buffer (as of the last rebuild).
    #[must_use]
    pub fn display_buffer(&self) -> &Surface {
        &self.buffers.display
    }

    /// Pick buffer (as of the last rebuild).
    #[must_use]
    pub fn pick_buffer(&self) -> &Surface {
        &self.buffers.pick
    }

    /// Returns true if an action handler is registered.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Marks the buffers stale.
    #[inline]
    pub(crate) fn mark_dirty(&mut self) {
        self.flags.set(ControlFlags::DIRTY);
    }

    /// Draws into the pick buffer only when visible, enabled and, for
    /// containers, opaque.
    pub(crate) fn is_pickable(&self) -> bool {
        self.is_visible()
            && self.is_enabled()
            && self.behavior.pickable()
            && (self.is_opaque() || !self.capabilities().has(Capability::Container))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::PickAllocator;

    fn control(behavior: Behavior) -> Control {
        let key = PickAllocator::new().allocate(ControlId(1)).unwrap();
        Control::new(ControlId(1), "c".into(), Rect::new(10.0, 10.0, 100.0, 30.0), key, behavior)
    }

    #[test]
    fn test_visual_state_precedence() {
        let mut c = control(Behavior::Button);
        assert_eq!(c.visual_state(), VisualState::Idle);
        c.flags.set(ControlFlags::OVER);
        assert_eq!(c.visual_state(), VisualState::Hover);
        c.flags.set(ControlFlags::ACTIVE);
        assert_eq!(c.visual_state(), VisualState::Active);
        c.flags.clear(ControlFlags::ENABLED);
        assert_eq!(c.visual_state(), VisualState::Disabled);
        c.flags.clear(ControlFlags::VISIBLE);
        assert_eq!(c.visual_state(), VisualState::Hidden);
    }

    #[test]
    fn test_footprint_swaps_for_vertical() {
        let mut c = control(Behavior::Button);
        c.orientation = Orientation::North;
        assert_eq!(c.footprint(), Rect::new(10.0, 10.0, 30.0, 100.0));
    }

    #[test]
    fn test_capability_sets() {
        let caps = Capabilities::of(&[Capability::Text, Capability::Orient]);
        assert!(caps.has(Capability::Text));
        assert!(caps.has(Capability::Orient));
        assert!(!caps.has(Capability::Container));
        assert!(!Capabilities::NONE.has(Capability::Text));
    }

    #[test]
    fn test_flag_assign_reports_change() {
        let mut flags = ControlFlags::DEFAULT;
        assert!(!flags.assign(ControlFlags::VISIBLE, true));
        assert!(flags.assign(ControlFlags::VISIBLE, false));
        assert!(!flags.has(ControlFlags::VISIBLE));
    }

    #[test]
    fn test_transparent_container_not_pickable() {
        let mut c = control(Behavior::Panel(Panel::default()));
        assert!(c.is_pickable());
        c.flags.clear(ControlFlags::OPAQUE);
        assert!(!c.is_pickable());

        let mut label = control(Behavior::Label);
        label.flags.clear(ControlFlags::OPAQUE);
        assert!(label.is_pickable());
    }
}
