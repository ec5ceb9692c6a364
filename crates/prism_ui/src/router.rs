//! Event router.
//!
//! Pointer events are resolved against the composed pick surface. The
//! router remembers three controls:
//!
//! - `hover`: the pick target under the pointer,
//! - `active`: the control that took the last press. While set, moves and
//!   the terminating up/out go to it directly, whatever the pick surface says,
//! - `focus`: the text field that receives keys.
//!
//! They are plain ids. A control that is hidden, disabled or destroyed is
//! dropped from all three before anything else can reach it.

use crate::action::ActionValue;
use crate::control::{Behavior, Capability, Control, ControlFlags, ControlId, Effect, KeyOutcome, LocalPointer, Phase};
use crate::error::GuiResult;
use crate::gui::Gui;
use crate::input::{Key, KeyEvent, KeyInput, PointerEvent, PointerKind, RawEvent};
use crate::timer::TimerAction;

/// Hover, capture and focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RouterState {
    pub hover: Option<ControlId>,
    pub hover_part: Option<u8>,
    pub active: Option<ControlId>,
    pub focus: Option<ControlId>,
}

type Hit = Option<(ControlId, u8)>;

impl Gui {
    /// Control under the pointer.
    #[must_use]
    pub fn hovered(&self) -> Option<ControlId> {
        self.router.hover
    }

    /// Part of the hovered control under the pointer.
    #[must_use]
    pub fn hovered_part(&self) -> Option<u8> {
        self.router.hover_part
    }

    /// Control capturing the pointer.
    #[must_use]
    pub fn active(&self) -> Option<ControlId> {
        self.router.active
    }

    /// Control with keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<ControlId> {
        self.router.focus
    }

    /// Parses a DOM-style event name and dispatches it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GuiError::UnknownEventKind`] for names the router
    /// does not know. Nothing changes in that case.
    pub fn dispatch_named(&mut self, kind: &str, x: f32, y: f32) -> GuiResult<()> {
        let kind = kind.parse::<PointerKind>().map_err(|err| {
            tracing::warn!(%err, "pointer event ignored");
            err
        })?;
        self.dispatch_pointer(PointerEvent::new(kind, x, y));
        Ok(())
    }

    /// Routes one pointer event.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) {
        if !event.x.is_finite() || !event.y.is_finite() {
            tracing::warn!(?event, "pointer event with non-finite position ignored");
            return;
        }
        // Hit testing must see the tree as it is now, not as of the last draw.
        self.refresh();
        let hit = self
            .hit_test(event.x, event.y)
            .filter(|&(id, _)| self.accepts_input(id));
        tracing::trace!(kind = ?event.kind, x = event.x, y = event.y, ?hit, "pointer");

        match event.kind {
            PointerKind::Move => self.pointer_moved(event, hit),
            PointerKind::Down => self.pointer_down(event, hit),
            PointerKind::Up => self.pointer_up(event, hit),
            PointerKind::Out => self.pointer_up(event, None),
            PointerKind::Wheel => {
                self.update_hover(hit);
                if let Some((id, part)) = hit {
                    self.deliver(id, Phase::Wheel(event.delta), event, Some(part));
                }
            }
        }
    }

    /// Shown, enabled and still alive.
    pub(crate) fn accepts_input(&self, id: ControlId) -> bool {
        self.tree.is_shown(id) && self.tree.get(id).is_some_and(Control::is_enabled)
    }

    fn pointer_moved(&mut self, event: PointerEvent, hit: Hit) {
        let Some(active) = self.router.active else {
            self.update_hover(hit);
            return;
        };
        let over = hit.map(|h| h.0) == Some(active);
        self.set_flag(active, ControlFlags::OVER, over);
        let part = hit.filter(|h| h.0 == active).map(|h| h.1);
        self.deliver(active, Phase::Drag, event, part);
    }

    fn pointer_down(&mut self, event: PointerEvent, hit: Hit) {
        if let Some(stale) = self.router.active {
            tracing::debug!(?stale, "press while captured, releasing stale capture");
            self.pointer_up(event, hit);
        }
        self.update_hover(hit);
        let raw = RawEvent::Pointer(event);
        let Some((id, part)) = hit else {
            self.set_focus(None, raw);
            return;
        };
        let focusable = self
            .tree
            .get(id)
            .is_some_and(|c| c.capabilities().has(Capability::Focus));
        if !focusable {
            self.set_focus(None, raw);
        }
        self.set_flag(id, ControlFlags::ACTIVE, true);
        self.set_flag(id, ControlFlags::OVER, true);
        self.router.active = Some(id);
        self.schedule_tooltip(id, TimerAction::Hide);
        tracing::debug!(?id, part, "pointer captured");
        self.deliver(id, Phase::Press, event, Some(part));
    }

    fn pointer_up(&mut self, event: PointerEvent, hit: Hit) {
        if let Some(active) = self.router.active.take() {
            let over = hit.map(|h| h.0) == Some(active);
            self.set_flag(active, ControlFlags::ACTIVE, false);
            self.set_flag(active, ControlFlags::OVER, over);
            tracing::debug!(?active, over, "pointer released");
            let part = hit.filter(|h| h.0 == active).map(|h| h.1);
            self.deliver(active, Phase::Release, event, part);
        }
        self.update_hover(hit);
    }

    /// Moves hover to `hit`, scheduling tooltips on enter and leave.
    fn update_hover(&mut self, hit: Hit) {
        let next = hit.map(|h| h.0);
        self.router.hover_part = hit.map(|h| h.1);
        let previous = self.router.hover;
        if previous == next {
            return;
        }
        self.router.hover = next;
        if let Some(left) = previous {
            if self.router.active != Some(left) {
                self.set_flag(left, ControlFlags::OVER, false);
            }
            self.schedule_tooltip(left, TimerAction::Hide);
        }
        if let Some(entered) = next {
            self.set_flag(entered, ControlFlags::OVER, true);
            self.schedule_tooltip(entered, TimerAction::Show);
        }
        tracing::trace!(?previous, ?next, "hover changed");
    }

    fn set_flag(&mut self, id: ControlId, flag: u32, on: bool) {
        if let Some(c) = self.tree.get_mut(id) {
            if c.flags.assign(flag, on) {
                c.mark_dirty();
                self.renderer.invalidate_scene();
            }
        }
    }

    /// Hands a pointer phase to the control's behavior and applies the result.
    fn deliver(&mut self, id: ControlId, phase: Phase, event: PointerEvent, part: Option<u8>) {
        let Some((ox, oy)) = self.tree.origin(id) else {
            return;
        };
        let text = self.config().text;
        let Some(c) = self.tree.get_mut(id) else {
            return;
        };
        let fp = c.footprint();
        let [x, y, w, h] = c.orientation.xy(event.x - ox, event.y - oy, fp.width, fp.height);
        let local = LocalPointer {
            x,
            y,
            w,
            h,
            part,
            over: c.is_over(),
            canvas: (event.x, event.y),
            opaque: c.is_opaque(),
            rect: c.rect,
        };
        let response = c.behavior.pointer(phase, &local, &text);
        if response.redraw {
            c.mark_dirty();
            self.renderer.invalidate_scene();
        }

        let raw = RawEvent::Pointer(event);
        let is_final = matches!(phase, Phase::Release | Phase::Wheel(_));
        self.apply_effect(id, response.effect, raw);
        if let Some(value) = response.value {
            self.fire(id, value, raw, is_final);
        }
    }

    fn apply_effect(&mut self, id: ControlId, effect: Effect, raw: RawEvent) {
        match effect {
            Effect::None => {}
            Effect::MoveTo(x, y) => self.drag_to(id, x, y, raw),
            Effect::SelectOption => self.deselect_group(id),
            Effect::TogglePane => {
                let pane = match self.tree.get(id).map(Control::behavior) {
                    Some(Behavior::PaneTab(tab)) => tab.pane,
                    _ => return,
                };
                let open = !self.is_pane_open(pane);
                if let Err(err) = self.open_pane(pane, open) {
                    tracing::warn!(?id, %err, "tab lost its pane");
                    return;
                }
                self.fire(pane, ActionValue::Open(open), raw, true);
            }
            Effect::Focus => self.set_focus(Some(id), raw),
            Effect::ScrollLinked => self.sync_viewer_from_scroller(id),
            Effect::PanLinked => self.sync_scrollers_from_viewer(id),
        }
    }

    /// Moves a dragged panel, keeping it inside its parent (or the canvas)
    /// when constrained.
    fn drag_to(&mut self, id: ControlId, x: f32, y: f32, raw: RawEvent) {
        let Some(c) = self.tree.get(id) else {
            return;
        };
        let constrained = matches!(&c.behavior, Behavior::Panel(p) if p.constrained);
        let (x, y) = if constrained {
            let bounds = match c.parent.and_then(|p| self.tree.get(p)) {
                Some(parent) => {
                    let fp = parent.footprint();
                    prism_core::Rect::sized(fp.width, fp.height)
                }
                None => self.renderer.bounds(),
            };
            let fp = c.footprint();
            prism_core::Rect::new(x, y, fp.width, fp.height).clamped_origin(&bounds)
        } else {
            (x, y)
        };
        if let Some(c) = self.tree.get_mut(id) {
            if c.rect.x == x && c.rect.y == y {
                return;
            }
            c.rect.x = x;
            c.rect.y = y;
        }
        self.renderer.invalidate_scene();
        self.fire(id, ActionValue::Position { x, y }, raw, false);
    }

    /// Routes one keyboard event to the focused text field. Returns true if
    /// the event was consumed.
    pub fn dispatch_key(&mut self, event: KeyEvent) -> bool {
        let raw = RawEvent::Key(event);
        if event.input == KeyInput::Pressed(Key::Tab) {
            return self.cycle_focus(event.modifiers.shift, raw);
        }
        let Some(id) = self.router.focus else {
            return false;
        };
        let outcome = match self.tree.get_mut(id).map(|c| &mut c.behavior) {
            Some(Behavior::TextField(field)) => field.key(event.input),
            _ => {
                self.router.focus = None;
                return false;
            }
        };
        tracing::trace!(?id, ?outcome, "key");
        match outcome {
            KeyOutcome::Ignored => return false,
            KeyOutcome::Moved => self.touch(id),
            KeyOutcome::Changed => {
                self.touch(id);
                self.fire_text(id, raw, false);
            }
            KeyOutcome::Commit => self.fire_text(id, raw, true),
            KeyOutcome::Blur => self.set_focus(None, raw),
        }
        true
    }

    fn fire_text(&mut self, id: ControlId, raw: RawEvent, is_final: bool) {
        if let Some(text) = self.tree.get(id).and_then(Control::text).map(str::to_string) {
            self.fire(id, ActionValue::Text(text), raw, is_final);
        }
    }

    /// Moves focus to the next (or previous) shown, enabled text field in
    /// paint order.
    fn cycle_focus(&mut self, backwards: bool, raw: RawEvent) -> bool {
        let fields: Vec<ControlId> = self
            .tree
            .iter_dfs()
            .filter(|&id| {
                self.accepts_input(id)
                    && self
                        .tree
                        .get(id)
                        .is_some_and(|c| c.capabilities().has(Capability::Focus))
            })
            .collect();
        if fields.is_empty() {
            return false;
        }
        let n = fields.len();
        let next = match self.router.focus.and_then(|f| fields.iter().position(|&id| id == f)) {
            Some(i) if backwards => fields[(i + n - 1) % n],
            Some(i) => fields[(i + 1) % n],
            None if backwards => fields[n - 1],
            None => fields[0],
        };
        self.set_focus(Some(next), raw);
        true
    }

    /// Moves keyboard focus. The field losing focus commits its text.
    pub(crate) fn set_focus(&mut self, next: Option<ControlId>, raw: RawEvent) {
        self.move_focus(next, raw, true);
    }

    fn move_focus(&mut self, next: Option<ControlId>, raw: RawEvent, commit: bool) {
        let previous = self.router.focus;
        if previous == next {
            return;
        }
        self.router.focus = next;
        if let Some(old) = previous {
            self.set_flag(old, ControlFlags::FOCUSED, false);
            if commit {
                self.fire_text(old, raw, true);
            }
        }
        if let Some(new) = next {
            self.set_flag(new, ControlFlags::FOCUSED, true);
        }
        tracing::debug!(?previous, ?next, "focus changed");
    }

    /// Returns `held` if it is `root` or inside `root`.
    fn within(&self, root: ControlId, held: Option<ControlId>) -> Option<ControlId> {
        held.filter(|&h| h == root || self.tree.is_ancestor(root, h))
    }

    /// Clears capture, hover and focus held by `root` or its descendants.
    /// `commit` decides whether a focused field reports its final text.
    pub(crate) fn drop_interaction(&mut self, root: ControlId, commit: bool) {
        if let Some(active) = self.within(root, self.router.active) {
            self.router.active = None;
            self.set_flag(active, ControlFlags::ACTIVE, false);
            self.set_flag(active, ControlFlags::OVER, false);
            tracing::debug!(?active, "capture dropped");
        }
        if let Some(hover) = self.within(root, self.router.hover) {
            self.router.hover = None;
            self.router.hover_part = None;
            self.set_flag(hover, ControlFlags::OVER, false);
            self.schedule_tooltip(hover, TimerAction::Hide);
        }
        if self.within(root, self.router.focus).is_some() {
            self.move_focus(None, RawEvent::Synthetic, commit);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;

    use super::*;
    use crate::action::ActionEvent;
    use crate::control::{ControlKind, VisualState};
    use crate::GuiError;

    fn recorder(gui: &mut Gui, id: ControlId) -> Arc<Mutex<Vec<ActionEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        gui.set_action(id, move |e| sink.lock().push(e.clone())).unwrap();
        log
    }

    #[test]
    fn test_click_fires_once() {
        let mut gui = Gui::with_size(200, 100);
        let b = gui.create(ControlKind::Button, "b", 10.0, 10.0, 100.0, 30.0).unwrap();
        let log = recorder(&mut gui, b);

        gui.dispatch_pointer(PointerEvent::down(20.0, 20.0));
        assert_eq!(gui.active(), Some(b));
        assert_eq!(gui.get(b).unwrap().visual_state(), VisualState::Active);
        gui.dispatch_pointer(PointerEvent::up(20.0, 20.0));
        assert_eq!(gui.active(), None);
        assert_eq!(gui.get(b).unwrap().visual_state(), VisualState::Hover);

        let log = log.lock();
        assert_eq!(log.len(), 1);
        assert!(log[0].is_final);
        assert_eq!(log[0].value, ActionValue::Clicked);
    }

    #[test]
    fn test_capture_survives_leaving() {
        let mut gui = Gui::with_size(200, 100);
        let b = gui.create(ControlKind::Button, "b", 10.0, 10.0, 100.0, 30.0).unwrap();
        let other = gui.create(ControlKind::Button, "other", 120.0, 10.0, 50.0, 30.0).unwrap();
        gui.dispatch_pointer(PointerEvent::down(20.0, 20.0));
        gui.dispatch_pointer(PointerEvent::moved(130.0, 20.0));
        assert_eq!(gui.active(), Some(b));
        assert!(!gui.get(b).unwrap().is_over());
        assert!(!gui.get(other).unwrap().is_over());

        gui.dispatch_pointer(PointerEvent::out(300.0, 20.0));
        assert_eq!(gui.get(b).unwrap().visual_state(), VisualState::Idle);
        assert_eq!(gui.hovered(), None);
    }

    #[test]
    fn test_unknown_kind_changes_nothing() {
        let mut gui = Gui::with_size(200, 100);
        let b = gui.create(ControlKind::Button, "b", 10.0, 10.0, 100.0, 30.0).unwrap();
        gui.dispatch_named("mousemove", 20.0, 20.0).unwrap();
        let before = gui.router;
        assert_eq!(
            gui.dispatch_named("dblclick", 20.0, 20.0),
            Err(GuiError::UnknownEventKind("dblclick".into()))
        );
        assert_eq!(gui.router, before);
        assert_eq!(gui.hovered(), Some(b));
    }

    #[test]
    fn test_focus_and_typing() {
        let mut gui = Gui::with_size(300, 100);
        let a = gui.create(ControlKind::TextField, "a", 10.0, 10.0, 100.0, 20.0).unwrap();
        let b = gui.create(ControlKind::TextField, "b", 10.0, 40.0, 100.0, 20.0).unwrap();
        let log = recorder(&mut gui, a);

        gui.dispatch_pointer(PointerEvent::down(20.0, 15.0));
        gui.dispatch_pointer(PointerEvent::up(20.0, 15.0));
        assert_eq!(gui.focused(), Some(a));
        assert!(gui.dispatch_key(KeyEvent::typed('h')));
        assert!(gui.dispatch_key(KeyEvent::typed('i')));
        assert!(gui.dispatch_key(KeyEvent::pressed(Key::Tab)));
        assert_eq!(gui.focused(), Some(b));
        assert!(gui.get(b).unwrap().is_focused());
        assert!(!gui.get(a).unwrap().is_focused());

        let log = log.lock();
        let finals: Vec<_> = log.iter().filter(|e| e.is_final).collect();
        assert_eq!(log.len(), 3);
        assert_eq!(finals.len(), 1);
        assert_eq!(finals[0].value, ActionValue::Text("hi".into()));
    }

    #[test]
    fn test_empty_click_blurs() {
        let mut gui = Gui::with_size(300, 100);
        let a = gui.create(ControlKind::TextField, "a", 10.0, 10.0, 100.0, 20.0).unwrap();
        gui.focus(a).unwrap();
        gui.dispatch_pointer(PointerEvent::down(250.0, 90.0));
        assert_eq!(gui.focused(), None);
        assert!(!gui.dispatch_key(KeyEvent::typed('x')));
    }

    #[test]
    fn test_hide_drops_capture() {
        let mut gui = Gui::with_size(200, 100);
        let b = gui.create(ControlKind::Button, "b", 10.0, 10.0, 100.0, 30.0).unwrap();
        let log = recorder(&mut gui, b);
        gui.dispatch_pointer(PointerEvent::down(20.0, 20.0));
        gui.hide(b).unwrap();
        assert_eq!(gui.active(), None);
        assert_eq!(gui.hovered(), None);
        gui.dispatch_pointer(PointerEvent::up(20.0, 20.0));
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_panel_drag_is_constrained() {
        let mut gui = Gui::with_size(200, 100);
        let p = gui.create(ControlKind::Panel, "p", 50.0, 20.0, 60.0, 40.0).unwrap();
        let log = recorder(&mut gui, p);
        gui.dispatch_pointer(PointerEvent::down(60.0, 30.0));
        gui.dispatch_pointer(PointerEvent::moved(300.0, 30.0));
        assert_eq!(gui.get(p).unwrap().rect().x, 140.0);
        gui.dispatch_pointer(PointerEvent::up(300.0, 30.0));

        let log = log.lock();
        let last = log.last().unwrap();
        assert!(last.is_final);
        assert_eq!(last.value, ActionValue::Position { x: 140.0, y: 20.0 });
    }
}
