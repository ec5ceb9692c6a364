//! Tooltip state and placement.

use prism_core::Rect;

use super::ControlId;

/// Tooltip behavior. Holds only the id of the control it describes; the
/// owner may be destroyed at any time and every use checks it is still live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipState {
    /// Control this tooltip describes (non-owning).
    pub owner: ControlId,
}

impl TooltipState {
    /// Creates a tooltip for `owner`.
    #[must_use]
    pub fn new(owner: ControlId) -> Self {
        Self { owner }
    }
}

/// Places a `w`×`h` tip below `owner` (canvas rect), flipping above when it
/// would leave the canvas and clamping horizontally.
pub(crate) fn place(owner: Rect, w: f32, h: f32, offset: f32, canvas: Rect) -> (f32, f32) {
    let mut y = owner.bottom() + offset;
    if y + h > canvas.bottom() {
        y = owner.y - offset - h;
    }
    Rect::new(owner.x, y, w, h).clamped_origin(&canvas)
}
