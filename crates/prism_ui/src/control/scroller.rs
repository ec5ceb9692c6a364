//! Scroller: a thumb whose length shows the visible fraction of some content.
//!
//! `value` is the thumb center in `[0, 1]` and `used` its length as a
//! fraction of the track. The thumb never extends past either end of the
//! track, so `value` lives in `[used / 2, 1 - used / 2]`.

use super::behavior::{Effect, LocalPointer, Phase, Response};
use super::{ControlId, PART_THUMB};
use crate::action::ActionValue;
use crate::error::{GuiError, GuiResult};

/// What a scroller moves when linked to a viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal view position.
    Horizontal,
    /// Vertical view position.
    Vertical,
}

/// Scroller state.
#[derive(Debug, Clone, PartialEq)]
pub struct Scroller {
    value: f32,
    used: f32,
    grab: Option<f32>,
    /// Viewer this scroller drives (non-owning).
    pub(crate) link: Option<(ControlId, Axis)>,
}

impl Default for Scroller {
    fn default() -> Self {
        Self {
            value: 0.5,
            used: 0.1,
            grab: None,
            link: None,
        }
    }
}

impl Scroller {
    /// Thumb center in `[used/2, 1 - used/2]`.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Visible fraction in `(0, 1]`.
    #[must_use]
    pub fn used(&self) -> f32 {
        self.used
    }

    /// Linked viewer, if any.
    #[must_use]
    pub fn link(&self) -> Option<(ControlId, Axis)> {
        self.link
    }

    /// Sets the value, clamped so the thumb stays on the track. Returns true
    /// if the value changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        let half = self.used * 0.5;
        let v = if value.is_nan() { self.value } else { value.clamp(half, 1.0 - half) };
        let changed = (v - self.value).abs() > f32::EPSILON;
        self.value = v;
        changed
    }

    /// Sets the visible fraction and re-clamps the value.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::InvalidArgument`] unless `0 < used <= 1`.
    pub fn set_used(&mut self, used: f32) -> GuiResult<()> {
        if !(used > 0.0 && used <= 1.0) {
            return Err(GuiError::invalid("used", format!("must be in (0, 1], got {used}")));
        }
        self.used = used;
        self.set_value(self.value);
        Ok(())
    }

    /// Local x extent of the thumb in a frame `w` wide.
    #[must_use]
    pub fn thumb_span(&self, w: f32) -> (f32, f32) {
        let len = (self.used * w).max(4.0_f32.min(w));
        let center = self.value * w;
        ((center - len * 0.5).max(0.0), (center + len * 0.5).min(w))
    }

    fn effect(&self) -> Effect {
        if self.link.is_some() {
            Effect::ScrollLinked
        } else {
            Effect::None
        }
    }

    pub(crate) fn pointer(&mut self, phase: Phase, p: &LocalPointer) -> Response {
        let w = p.w.max(1.0);
        match phase {
            Phase::Press => {
                if p.part == Some(PART_THUMB) {
                    self.grab = Some(p.x / w - self.value);
                    return Response { redraw: true, ..Response::NONE };
                }
                // Clicking the track pages one thumb length toward the pointer.
                self.grab = None;
                let dir = if p.x / w < self.value { -1.0 } else { 1.0 };
                if self.set_value(self.value + dir * self.used) {
                    Response::report(ActionValue::Scroll { value: self.value, used: self.used }).with_effect(self.effect())
                } else {
                    Response { redraw: true, ..Response::NONE }
                }
            }
            Phase::Drag => {
                let Some(offset) = self.grab else {
                    return Response::NONE;
                };
                if self.set_value(p.x / w - offset) {
                    Response::report(ActionValue::Scroll { value: self.value, used: self.used }).with_effect(self.effect())
                } else {
                    Response::NONE
                }
            }
            Phase::Release => {
                self.grab = None;
                Response::report(ActionValue::Scroll { value: self.value, used: self.used })
            }
            Phase::Wheel(delta) => {
                if self.set_value(self.value + delta.signum() * self.used * 0.25) {
                    Response::report(ActionValue::Scroll { value: self.value, used: self.used }).with_effect(self.effect())
                } else {
                    Response::NONE
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::behavior::pointer_at;
    use crate::control::PART_TRACK;

    fn scroller(used: f32) -> Scroller {
        let mut s = Scroller::default();
        s.set_used(used).unwrap();
        s
    }

    #[test]
    fn test_clamps_to_used() {
        let mut s = scroller(0.2);
        s.set_value(-1.0);
        assert!((s.value() - 0.1).abs() < 1e-6);
        s.set_value(2.0);
        assert!((s.value() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_used() {
        let mut s = Scroller::default();
        assert!(s.set_used(0.0).is_err());
        assert!(s.set_used(1.5).is_err());
        assert!((s.used() - 0.1).abs() < 1e-6);
        s.set_used(1.0).unwrap();
        assert!((s.value() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_thumb_drag_is_proportional() {
        let mut s = scroller(0.2);
        let (a, b) = s.thumb_span(200.0);
        let mid = (a + b) * 0.5;
        s.pointer(Phase::Press, &pointer_at(mid, 5.0, 200.0, 10.0, Some(PART_THUMB)));
        let r = s.pointer(Phase::Drag, &pointer_at(mid + 20.0, 5.0, 200.0, 10.0, None));
        assert!((s.value() - 0.6).abs() < 1e-5);
        assert_eq!(r.effect, Effect::None);
        s.pointer(Phase::Drag, &pointer_at(1000.0, 5.0, 200.0, 10.0, None));
        assert!((s.value() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_track_press_pages() {
        let mut s = scroller(0.2);
        s.pointer(Phase::Press, &pointer_at(10.0, 5.0, 200.0, 10.0, Some(PART_TRACK)));
        assert!((s.value() - 0.3).abs() < 1e-6);
        let r = s.pointer(Phase::Drag, &pointer_at(0.0, 5.0, 200.0, 10.0, None));
        assert_eq!(r.value, None);
    }

    #[test]
    fn test_linked_scroller_reports_effect() {
        let mut s = scroller(0.2);
        s.link = Some((ControlId(3), Axis::Vertical));
        let r = s.pointer(Phase::Wheel(1.0), &pointer_at(0.0, 0.0, 200.0, 10.0, None));
        assert_eq!(r.effect, Effect::ScrollLinked);
    }
}
