//! Sliders.
//!
//! Both kinds lay their track along the local x axis, inset by half the
//! control height at each end so a round thumb of diameter `h` fits at the
//! limits. Rotating the control (North/South) gives a vertical slider with
//! no extra code.

use super::behavior::{LocalPointer, Phase, Response};
use super::{PART_THUMB, PART_THUMB_HIGH};
use crate::action::ActionValue;
use crate::error::{GuiError, GuiResult};

/// Start and length of the usable track in a `w`×`h` local frame.
pub(crate) fn track_span(w: f32, h: f32) -> (f32, f32) {
    let pad = h * 0.5;
    (pad, (w - h).max(1.0))
}

/// Tick marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticks {
    /// Number of major intervals along the track.
    pub major: u32,
    /// Minor intervals per major interval (0 = none).
    pub minor: u32,
}

impl Ticks {
    /// Total number of snap intervals.
    #[must_use]
    pub fn intervals(self) -> u32 {
        self.major.max(1) * self.minor.max(1)
    }
}

fn check_limits(operation: &'static str, min: f32, max: f32) -> GuiResult<()> {
    if min.is_finite() && max.is_finite() && min < max {
        Ok(())
    } else {
        Err(GuiError::invalid(operation, format!("need min < max, got {min}..{max}")))
    }
}

/// Single-value slider state.
#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    min: f32,
    max: f32,
    value: f32,
    ticks: Option<Ticks>,
    stick: bool,
    grab: f32,
}

impl Default for Slider {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            value: 0.5,
            ticks: None,
            stick: false,
            grab: 0.0,
        }
    }
}

impl Slider {
    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Lower and upper limits.
    #[must_use]
    pub fn limits(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Tick configuration.
    #[must_use]
    pub fn ticks(&self) -> Option<Ticks> {
        self.ticks
    }

    /// Whether values snap to tick positions.
    #[must_use]
    pub fn sticks_to_ticks(&self) -> bool {
        self.stick
    }

    /// Changes the limits and re-clamps the value.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::InvalidArgument`] unless `min < max`.
    pub fn set_limits(&mut self, min: f32, max: f32) -> GuiResult<()> {
        check_limits("limits", min, max)?;
        self.min = min;
        self.max = max;
        self.set_value(self.value);
        Ok(())
    }

    /// Sets tick marks; `None` removes them.
    pub fn set_ticks(&mut self, ticks: Option<Ticks>) {
        self.ticks = ticks;
        self.set_value(self.value);
    }

    /// Enables or disables snapping to ticks.
    pub fn set_stick_to_ticks(&mut self, stick: bool) {
        self.stick = stick;
        self.set_value(self.value);
    }

    /// Sets the value, clamped to the limits and snapped when sticking.
    /// Returns true if the value changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        let mut v = value.clamp(self.min, self.max);
        if let (true, Some(ticks)) = (self.stick, self.ticks) {
            let step = (self.max - self.min) / ticks.intervals() as f32;
            v = self.min + ((v - self.min) / step).round() * step;
        }
        let changed = (v - self.value).abs() > f32::EPSILON;
        self.value = v;
        changed
    }

    /// Value position along the track in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        (self.value - self.min) / (self.max - self.min)
    }

    /// Local x of the thumb center.
    #[must_use]
    pub fn thumb_x(&self, w: f32, h: f32) -> f32 {
        let (start, len) = track_span(w, h);
        start + self.fraction() * len
    }

    fn value_at(&self, x: f32, w: f32, h: f32) -> f32 {
        let (start, len) = track_span(w, h);
        self.min + ((x - start) / len).clamp(0.0, 1.0) * (self.max - self.min)
    }

    fn wheel_step(&self) -> f32 {
        let intervals = self.ticks.map_or(20, Ticks::intervals);
        (self.max - self.min) / intervals as f32
    }

    pub(crate) fn pointer(&mut self, phase: Phase, p: &LocalPointer) -> Response {
        match phase {
            Phase::Press => {
                if p.part == Some(PART_THUMB) {
                    self.grab = p.x - self.thumb_x(p.w, p.h);
                    return Response { redraw: true, ..Response::NONE };
                }
                self.grab = 0.0;
                self.set_value(self.value_at(p.x, p.w, p.h));
                Response::report(ActionValue::Value(self.value))
            }
            Phase::Drag => {
                if self.set_value(self.value_at(p.x - self.grab, p.w, p.h)) {
                    Response::report(ActionValue::Value(self.value))
                } else {
                    Response::NONE
                }
            }
            Phase::Release => {
                self.grab = 0.0;
                Response::report(ActionValue::Value(self.value))
            }
            Phase::Wheel(delta) => {
                if self.set_value(self.value + delta.signum() * self.wheel_step()) {
                    Response::report(ActionValue::Value(self.value))
                } else {
                    Response::NONE
                }
            }
        }
    }
}

/// Which ranger thumb a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Thumb {
    Low,
    High,
}

/// Two-thumb range slider state. `low <= high` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranger {
    min: f32,
    max: f32,
    low: f32,
    high: f32,
    dragging: Option<Thumb>,
    grab: f32,
}

impl Default for Ranger {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            low: 0.25,
            high: 0.75,
            dragging: None,
            grab: 0.0,
        }
    }
}

impl Ranger {
    /// Low value.
    #[must_use]
    pub fn low(&self) -> f32 {
        self.low
    }

    /// High value.
    #[must_use]
    pub fn high(&self) -> f32 {
        self.high
    }

    /// Lower and upper limits.
    #[must_use]
    pub fn limits(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Changes the limits and re-clamps both values.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::InvalidArgument`] unless `min < max`.
    pub fn set_limits(&mut self, min: f32, max: f32) -> GuiResult<()> {
        check_limits("limits", min, max)?;
        self.min = min;
        self.max = max;
        self.set_range(self.low, self.high);
        Ok(())
    }

    /// Sets both values; they are clamped and swapped if out of order.
    /// Returns true if either changed.
    pub fn set_range(&mut self, low: f32, high: f32) -> bool {
        let (a, b) = if low <= high { (low, high) } else { (high, low) };
        let a = a.clamp(self.min, self.max);
        let b = b.clamp(self.min, self.max);
        let changed = (a - self.low).abs() > f32::EPSILON || (b - self.high).abs() > f32::EPSILON;
        self.low = a;
        self.high = b;
        changed
    }

    fn x_of(&self, v: f32, w: f32, h: f32) -> f32 {
        let (start, len) = track_span(w, h);
        start + (v - self.min) / (self.max - self.min) * len
    }

    /// Local x of the low and high thumb centers.
    #[must_use]
    pub fn thumb_xs(&self, w: f32, h: f32) -> (f32, f32) {
        (self.x_of(self.low, w, h), self.x_of(self.high, w, h))
    }

    fn value_at(&self, x: f32, w: f32, h: f32) -> f32 {
        let (start, len) = track_span(w, h);
        self.min + ((x - start) / len).clamp(0.0, 1.0) * (self.max - self.min)
    }

    fn report(&self) -> Response {
        Response::report(ActionValue::Range {
            low: self.low,
            high: self.high,
        })
    }

    fn move_thumb(&mut self, thumb: Thumb, v: f32) -> bool {
        let before = (self.low, self.high);
        match thumb {
            Thumb::Low => self.low = v.clamp(self.min, self.high),
            Thumb::High => self.high = v.clamp(self.low, self.max),
        }
        before != (self.low, self.high)
    }

    pub(crate) fn pointer(&mut self, phase: Phase, p: &LocalPointer) -> Response {
        match phase {
            Phase::Press => {
                let (lx, hx) = self.thumb_xs(p.w, p.h);
                let thumb = match p.part {
                    Some(PART_THUMB) => Thumb::Low,
                    Some(PART_THUMB_HIGH) => Thumb::High,
                    _ if (p.x - lx).abs() <= (p.x - hx).abs() => Thumb::Low,
                    _ => Thumb::High,
                };
                self.dragging = Some(thumb);
                if p.part.is_some_and(|part| part == PART_THUMB || part == PART_THUMB_HIGH) {
                    self.grab = p.x - if thumb == Thumb::Low { lx } else { hx };
                    return Response { redraw: true, ..Response::NONE };
                }
                self.grab = 0.0;
                self.move_thumb(thumb, self.value_at(p.x, p.w, p.h));
                self.report()
            }
            Phase::Drag => {
                let Some(thumb) = self.dragging else {
                    return Response::NONE;
                };
                let value = self.value_at(p.x - self.grab, p.w, p.h);
                if self.move_thumb(thumb, value) {
                    self.report()
                } else {
                    Response::NONE
                }
            }
            Phase::Release => {
                self.dragging = None;
                self.grab = 0.0;
                self.report()
            }
            Phase::Wheel(_) => Response::NONE,
        }
    }
}
