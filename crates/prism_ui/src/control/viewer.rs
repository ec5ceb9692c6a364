//! Viewport onto an image larger than the control.

use std::sync::Arc;

use prism_core::Surface;

use super::behavior::{Effect, LocalPointer, Phase, Response};
use super::scroller::Axis;
use super::ControlId;
use crate::action::ActionValue;

/// Pixels scrolled per wheel notch.
pub const WHEEL_STEP: f32 = 20.0;

/// Viewer state. The view center is kept in content coordinates.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    content: Option<Arc<Surface>>,
    center: (f32, f32),
    /// Canvas pointer and view center at press time.
    anchor: Option<((f32, f32), (f32, f32))>,
    /// Scrollers driven by this viewer (non-owning).
    pub(crate) scrollers: Vec<(ControlId, Axis)>,
}

fn clamp_axis(c: f32, view: f32, content: f32) -> f32 {
    if content <= view {
        content * 0.5
    } else {
        c.clamp(view * 0.5, content - view * 0.5)
    }
}

impl Viewer {
    /// Content image.
    #[must_use]
    pub fn content(&self) -> Option<&Arc<Surface>> {
        self.content.as_ref()
    }

    /// View center in content coordinates.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    fn content_size(&self) -> (f32, f32) {
        self.content
            .as_ref()
            .map_or((0.0, 0.0), |s| (s.width() as f32, s.height() as f32))
    }

    /// Replaces the content and centers the view on it.
    pub fn set_content(&mut self, content: Arc<Surface>) {
        self.center = (content.width() as f32 * 0.5, content.height() as f32 * 0.5);
        self.content = Some(content);
    }

    /// Moves the view center, clamped so the view stays on the content.
    /// Returns true if it moved.
    pub fn set_center(&mut self, x: f32, y: f32, view_w: f32, view_h: f32) -> bool {
        let (cw, ch) = self.content_size();
        let next = (clamp_axis(x, view_w, cw), clamp_axis(y, view_h, ch));
        let moved = next != self.center;
        self.center = next;
        moved
    }

    /// Content-space origin of the top-left view pixel.
    #[must_use]
    pub fn view_origin(&self, view_w: f32, view_h: f32) -> (f32, f32) {
        (self.center.0 - view_w * 0.5, self.center.1 - view_h * 0.5)
    }

    /// Scroller `(value, used)` describing the view along `axis`.
    #[must_use]
    pub fn scroll_state(&self, axis: Axis, view_w: f32, view_h: f32) -> (f32, f32) {
        let (cw, ch) = self.content_size();
        let (c, view, content) = match axis {
            Axis::Horizontal => (self.center.0, view_w, cw),
            Axis::Vertical => (self.center.1, view_h, ch),
        };
        if content <= 0.0 {
            return (0.5, 1.0);
        }
        (c / content, (view / content).min(1.0))
    }

    /// Moves the view along `axis` to a scroller value. Returns true if it moved.
    pub fn scroll_to(&mut self, axis: Axis, value: f32, view_w: f32, view_h: f32) -> bool {
        let (cw, ch) = self.content_size();
        let (x, y) = match axis {
            Axis::Horizontal => (value * cw, self.center.1),
            Axis::Vertical => (self.center.0, value * ch),
        };
        self.set_center(x, y, view_w, view_h)
    }

    fn report(&self) -> Response {
        Response::report(ActionValue::View {
            x: self.center.0,
            y: self.center.1,
        })
        .with_effect(Effect::PanLinked)
    }

    pub(crate) fn pointer(&mut self, phase: Phase, p: &LocalPointer) -> Response {
        match phase {
            Phase::Press => {
                self.anchor = Some((p.canvas, self.center));
                Response::NONE
            }
            Phase::Drag => {
                let Some(((px, py), (cx, cy))) = self.anchor else {
                    return Response::NONE;
                };
                if self.set_center(cx - (p.canvas.0 - px), cy - (p.canvas.1 - py), p.w, p.h) {
                    self.report()
                } else {
                    Response::NONE
                }
            }
            Phase::Release => match self.anchor.take() {
                Some(_) => Response {
                    effect: Effect::None,
                    ..self.report()
                },
                None => Response::NONE,
            },
            Phase::Wheel(delta) => {
                let (cx, cy) = self.center;
                if self.set_center(cx, cy + delta.signum() * WHEEL_STEP, p.w, p.h) {
                    self.report()
                } else {
                    Response::NONE
                }
            }
        }
    }
}
