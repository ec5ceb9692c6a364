//! Containers: free-floating panels and side-docked panes with tabs.

use prism_core::{Orientation, Rect};

use super::behavior::{Effect, LocalPointer, Phase, Response};
use super::ControlId;
use crate::action::ActionValue;

/// Draggable container state.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Pointer drags move the panel (needs an opaque background).
    pub draggable: bool,
    /// Dragging keeps the panel inside the canvas.
    pub constrained: bool,
    /// Pointer offset from the panel origin while dragging.
    anchor: Option<(f32, f32)>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            draggable: true,
            constrained: true,
            anchor: None,
        }
    }
}

impl Panel {
    /// Returns true while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub(crate) fn pointer(&mut self, phase: Phase, p: &LocalPointer) -> Response {
        match phase {
            Phase::Press if self.draggable && p.opaque => {
                self.anchor = Some((p.canvas.0 - p.rect.x, p.canvas.1 - p.rect.y));
                Response::NONE
            }
            Phase::Drag => match self.anchor {
                Some((ax, ay)) => Response::NONE.with_effect(Effect::MoveTo(p.canvas.0 - ax, p.canvas.1 - ay)),
                None => Response::NONE,
            },
            Phase::Release => match self.anchor.take() {
                Some(_) => Response::report(ActionValue::Position {
                    x: p.rect.x,
                    y: p.rect.y,
                }),
                None => Response::NONE,
            },
            Phase::Press | Phase::Wheel(_) => Response::NONE,
        }
    }
}

/// Canvas edge a pane docks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Top edge.
    North,
    /// Bottom edge.
    South,
    /// Right edge.
    East,
    /// Left edge.
    West,
}

impl Side {
    /// All sides.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Returns true for the left and right edges.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::East | Self::West)
    }

    /// Orientation given to tabs on this side so their text runs along the edge.
    #[must_use]
    pub const fn tab_orientation(self) -> Orientation {
        if self.is_vertical() {
            Orientation::North
        } else {
            Orientation::East
        }
    }
}

/// Side-docked container state.
///
/// At most one pane per side is open; the GUI enforces that when a tab is
/// clicked.
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    /// Docking edge.
    pub side: Side,
    /// Pane is showing.
    pub open: bool,
}

impl Pane {
    /// Creates a closed pane.
    #[must_use]
    pub fn new(side: Side) -> Self {
        Self { side, open: false }
    }

    /// Canvas rectangle of a pane docked on `side`.
    #[must_use]
    pub fn frame(side: Side, canvas_w: f32, canvas_h: f32, depth: f32) -> Rect {
        match side {
            Side::North => Rect::new(0.0, 0.0, canvas_w, depth),
            Side::South => Rect::new(0.0, canvas_h - depth, canvas_w, depth),
            Side::East => Rect::new(canvas_w - depth, 0.0, depth, canvas_h),
            Side::West => Rect::new(0.0, 0.0, depth, canvas_h),
        }
    }
}

/// Tab that opens and closes a pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneTab {
    /// Pane this tab toggles (non-owning).
    pub pane: ControlId,
}

impl PaneTab {
    /// Creates a tab for `pane`.
    #[must_use]
    pub fn new(pane: ControlId) -> Self {
        Self { pane }
    }
}

/// Positions for a strip of tabs along one canvas edge.
///
/// `footprints` are the tabs' rotated sizes in strip order. The strip hugs
/// the inner edge of an open pane, or the canvas edge when every pane on that
/// side is closed.
pub(crate) fn layout_tabs(
    side: Side,
    canvas: (f32, f32),
    depth: Option<f32>,
    gap: f32,
    footprints: &[(f32, f32)],
) -> Vec<(f32, f32)> {
    let (cw, ch) = canvas;
    let inset = depth.unwrap_or(0.0);
    let mut along = gap;
    footprints
        .iter()
        .map(|&(w, h)| {
            let pos = match side {
                Side::East => (cw - inset - w, along),
                Side::West => (inset, along),
                Side::North => (along, inset),
                Side::South => (along, ch - inset - h),
            };
            along += if side.is_vertical() { h } else { w } + gap;
            pos
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::behavior::pointer_at;

    #[test]
    fn test_opaque_panel_drags() {
        let mut panel = Panel::default();
        let mut p = pointer_at(5.0, 5.0, 100.0, 80.0, Some(0));
        p.rect = Rect::new(40.0, 50.0, 100.0, 80.0);
        p.canvas = (45.0, 55.0);
        panel.pointer(Phase::Press, &p);
        assert!(panel.is_dragging());

        p.canvas = (60.0, 75.0);
        let r = panel.pointer(Phase::Drag, &p);
        assert_eq!(r.effect, Effect::MoveTo(55.0, 70.0));
        assert_eq!(r.value, None);

        p.rect = Rect::new(55.0, 70.0, 100.0, 80.0);
        let r = panel.pointer(Phase::Release, &p);
        assert_eq!(r.value, Some(ActionValue::Position { x: 55.0, y: 70.0 }));
        assert!(!panel.is_dragging());
    }

    #[test]
    fn test_transparent_panel_does_not_drag() {
        let mut panel = Panel::default();
        let mut p = pointer_at(5.0, 5.0, 100.0, 80.0, Some(0));
        p.opaque = false;
        panel.pointer(Phase::Press, &p);
        assert_eq!(panel.pointer(Phase::Drag, &p).effect, Effect::None);
        assert_eq!(panel.pointer(Phase::Release, &p).value, None);
    }

    #[test]
    fn test_pane_frames() {
        assert_eq!(Pane::frame(Side::East, 800.0, 600.0, 200.0), Rect::new(600.0, 0.0, 200.0, 600.0));
        assert_eq!(Pane::frame(Side::South, 800.0, 600.0, 150.0), Rect::new(0.0, 450.0, 800.0, 150.0));
    }

    #[test]
    fn test_tab_strip_follows_open_pane() {
        let tabs = [(20.0, 60.0), (20.0, 40.0)];
        let closed = layout_tabs(Side::East, (800.0, 600.0), None, 4.0, &tabs);
        assert_eq!(closed, vec![(780.0, 4.0), (780.0, 68.0)]);
        let open = layout_tabs(Side::East, (800.0, 600.0), Some(200.0), 4.0, &tabs);
        assert_eq!(open[0], (580.0, 4.0));

        let top = layout_tabs(Side::North, (800.0, 600.0), None, 4.0, &[(60.0, 20.0), (50.0, 20.0)]);
        assert_eq!(top, vec![(4.0, 0.0), (68.0, 0.0)]);
    }

    #[test]
    fn test_tab_orientation() {
        assert_eq!(Side::West.tab_orientation(), Orientation::North);
        assert_eq!(Side::South.tab_orientation(), Orientation::East);
    }
}
