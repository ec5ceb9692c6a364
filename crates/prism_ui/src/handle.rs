//! Fluent control handle.
//!
//! ```ignore
//! gui.control(ok)
//!     .text("OK")
//!     .corners(&[6.0])
//!     .scheme("green")
//!     .on_action(|e| println!("{} clicked", e.name));
//! ```
//!
//! Every setter here is the logged form of the matching [`Gui`] method: an
//! error is reported through `tracing::warn!` and leaves the control as it
//! was, so a chain never stops half way with a panic.

use std::sync::Arc;

use prism_core::{Orientation, Surface};

use crate::action::ActionEvent;
use crate::control::{Align, Axis, ControlId, Ticks, Validator};
use crate::error::GuiResult;
use crate::gui::Gui;

/// Chainable view of one control.
pub struct ControlMut<'a> {
    gui: &'a mut Gui,
    id: ControlId,
}

impl std::fmt::Debug for ControlMut<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ControlMut").field(&self.id).finish()
    }
}

impl<'a> ControlMut<'a> {
    pub(crate) fn new(gui: &'a mut Gui, id: ControlId) -> Self {
        Self { gui, id }
    }

    /// Id of the control.
    #[must_use]
    pub fn id(&self) -> ControlId {
        self.id
    }

    /// Returns true if the control still exists.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.gui.contains(self.id)
    }

    /// The GUI behind the handle.
    pub fn gui(&mut self) -> &mut Gui {
        &mut *self.gui
    }

    fn apply(self, operation: &'static str, f: impl FnOnce(&mut Gui, ControlId) -> GuiResult<()>) -> Self {
        if let Err(err) = f(&mut *self.gui, self.id) {
            tracing::warn!(control = ?self.id, operation, %err, "control operation ignored");
        }
        self
    }

    /// Shows the control.
    pub fn show(self) -> Self {
        self.apply("show", Gui::show)
    }

    /// Hides the control.
    pub fn hide(self) -> Self {
        self.apply("hide", Gui::hide)
    }

    /// Enables the control.
    pub fn enable(self) -> Self {
        self.apply("enable", Gui::enable)
    }

    /// Disables the control.
    pub fn disable(self) -> Self {
        self.apply("disable", Gui::disable)
    }

    /// Moves the control within its parent.
    pub fn move_to(self, x: f32, y: f32) -> Self {
        self.apply("move", |g, id| g.move_to(id, x, y))
    }

    /// Resizes the local frame.
    pub fn resize(self, w: f32, h: f32) -> Self {
        self.apply("resize", |g, id| g.resize(id, w, h))
    }

    /// Re-orients the control.
    pub fn orient(self, orientation: Orientation) -> Self {
        self.apply("orient", |g, id| g.orient(id, orientation))
    }

    /// Sets the text.
    pub fn text(self, text: &str) -> Self {
        self.apply("text", |g, id| g.set_text(id, text))
    }

    /// Sets the text alignment.
    pub fn align(self, align: Align) -> Self {
        self.apply("align", |g, id| g.set_align(id, align))
    }

    /// Sets the icon.
    pub fn icon(self, image: Arc<Surface>, align: Align) -> Self {
        self.apply("icon", |g, id| g.set_icon(id, image, align))
    }

    /// Sets corner radii (1 or 4 values).
    pub fn corners(self, radii: &[f32]) -> Self {
        self.apply("corners", |g, id| g.set_corners(id, radii))
    }

    /// Opaque background.
    pub fn opaque(self) -> Self {
        self.apply("opaque", |g, id| g.set_opaque(id, true))
    }

    /// Transparent background.
    pub fn transparent(self) -> Self {
        self.apply("transparent", |g, id| g.set_opaque(id, false))
    }

    /// Per-control color scheme.
    pub fn scheme(self, name: &str) -> Self {
        self.apply("scheme", |g, id| g.set_scheme(id, name))
    }

    /// Slider or scroller value.
    pub fn value(self, value: f32) -> Self {
        self.apply("value", |g, id| g.set_value(id, value))
    }

    /// Slider or ranger limits.
    pub fn limits(self, min: f32, max: f32) -> Self {
        self.apply("limits", |g, id| g.set_limits(id, min, max))
    }

    /// Ranger values.
    pub fn range(self, low: f32, high: f32) -> Self {
        self.apply("range", |g, id| g.set_range(id, low, high))
    }

    /// Slider ticks.
    pub fn ticks(self, major: u32, minor: u32, stick: bool) -> Self {
        self.apply("ticks", |g, id| g.set_ticks(id, Some(Ticks { major, minor }), stick))
    }

    /// Scroller visible fraction.
    pub fn used(self, used: f32) -> Self {
        self.apply("used", |g, id| g.set_used(id, used))
    }

    /// Check box or option state.
    pub fn selected(self, selected: bool) -> Self {
        self.apply("selected", |g, id| g.set_selected(id, selected))
    }

    /// Option group.
    pub fn group(self, group: &str) -> Self {
        self.apply("group", |g, id| g.set_group(id, group))
    }

    /// Text field validator.
    pub fn validator(self, validator: impl Fn(&str) -> bool + Send + 'static) -> Self {
        let validator: Validator = Box::new(validator);
        self.apply("validator", |g, id| g.set_validator(id, validator))
    }

    /// Panel drag-to-move.
    pub fn draggable(self, draggable: bool) -> Self {
        self.apply("draggable", |g, id| g.set_draggable(id, draggable))
    }

    /// Keep a dragged panel on screen.
    pub fn constrained(self, constrained: bool) -> Self {
        self.apply("constrained", |g, id| g.set_constrained(id, constrained))
    }

    /// Viewer content.
    pub fn content(self, content: Arc<Surface>) -> Self {
        self.apply("content", |g, id| g.set_content(id, content))
    }

    /// Links a scroller to this viewer.
    pub fn link(self, scroller: ControlId, axis: Axis) -> Self {
        self.apply("link", |g, id| g.link_scroller(id, scroller, axis))
    }

    /// Tooltip text.
    pub fn tooltip(self, text: &str) -> Self {
        self.apply("tooltip", |g, id| g.set_tooltip(id, text).map(|_| ()))
    }

    /// Action callback.
    pub fn on_action(self, handler: impl FnMut(&ActionEvent) + Send + 'static) -> Self {
        self.apply("action", |g, id| g.set_action(id, handler))
    }

    /// Moves `child` into this control.
    pub fn child(self, child: ControlId) -> Self {
        self.apply("add_child", |g, id| g.add_child(id, child))
    }

    /// Raises the control above its siblings.
    pub fn to_front(self) -> Self {
        self.apply("to_front", Gui::to_front)
    }

    /// Lowers the control below its siblings.
    pub fn to_back(self) -> Self {
        self.apply("to_back", Gui::to_back)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlKind;

    #[test]
    fn test_chain_skips_failures() {
        let mut gui = Gui::with_size(200, 100);
        let b = gui.create(ControlKind::Button, "b", 0.0, 0.0, 60.0, 20.0).unwrap();
        let id = gui
            .control(b)
            .text("Go")
            .corners(&[1.0, 2.0])
            .value(3.0)
            .move_to(5.0, 6.0)
            .id();
        let c = gui.get(id).unwrap();
        assert_eq!(c.text(), Some("Go"));
        assert_eq!(c.corners(), [0.0; 4]);
        assert_eq!((c.rect().x, c.rect().y), (5.0, 6.0));
    }

    #[test]
    fn test_dead_handle_is_inert() {
        let mut gui = Gui::with_size(200, 100);
        let b = gui.create(ControlKind::Button, "b", 0.0, 0.0, 60.0, 20.0).unwrap();
        gui.destroy(b);
        let handle = gui.control(b).show().text("x");
        assert!(!handle.is_live());
        assert!(gui.is_empty());
    }
}
