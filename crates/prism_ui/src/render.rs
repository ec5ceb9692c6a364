//! Dual-buffer renderer.
//!
//! Two passes per frame. The rebuild pass repaints the display and pick
//! buffers of every dirty, visible control. The composite pass walks the
//! tree in z-order and blits each visible control's buffers into the frame
//! and the canvas-wide pick surface, translated by its parent chain, rotated
//! by its orientation and clipped to its parent's footprint. Nothing is
//! repainted or recomposited when nothing changed.

use prism_core::{BlendMode, Rect, Rgba, Surface};

use crate::control::{Buffers, Control, ControlFlags, ControlId};
use crate::face::{self, FaceContext, GlyphSource};
use crate::config::TextConfig;
use crate::scheme::{SchemeId, SchemeTable};
use crate::tree::ControlTree;

/// What one [`crate::Gui::draw`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Frame counter (starts at 1).
    pub frame: u64,
    /// Controls whose buffers were rebuilt since the previous draw.
    pub rebuilt: usize,
    /// The frame was recomposited.
    pub composed: bool,
}

/// Palette and text resources used by the rebuild pass.
pub(crate) struct Resources<'a> {
    pub schemes: &'a SchemeTable,
    pub default_scheme: SchemeId,
    pub text: &'a TextConfig,
    pub glyphs: &'a dyn GlyphSource,
}

/// Owns the composed frame and pick surface.
pub struct Renderer {
    /// Composed display frame.
    frame: Surface,
    /// Composed pick surface.
    pick: Surface,
    /// Frame clear color.
    background: Rgba,
    /// Clip stack.
    clip_stack: Vec<Rect>,
    /// Something moved, appeared or disappeared since the last composite.
    scene_dirty: bool,
    /// Rebuilds since the last draw.
    rebuilt: usize,
    /// A composite happened since the last draw.
    composed: bool,
    /// Frame counter.
    frame_no: u64,
}

impl Renderer {
    /// Creates a renderer for a `width`×`height` canvas.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            frame: Surface::new(width, height),
            pick: Surface::new(width, height),
            background,
            clip_stack: Vec::with_capacity(16),
            scene_dirty: true,
            rebuilt: 0,
            composed: false,
            frame_no: 0,
        }
    }

    /// The last composed frame.
    #[must_use]
    pub fn frame(&self) -> &Surface {
        &self.frame
    }

    /// The last composed pick surface.
    #[must_use]
    pub fn pick(&self) -> &Surface {
        &self.pick
    }

    /// Canvas bounds.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.frame.bounds()
    }

    /// Frames drawn so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_no
    }

    /// Requests a recomposite without rebuilding any control.
    pub fn invalidate_scene(&mut self) {
        self.scene_dirty = true;
    }

    /// Returns true if the next draw will recomposite.
    #[must_use]
    pub fn is_scene_dirty(&self) -> bool {
        self.scene_dirty
    }

    /// Pushes a clip rect, intersected with the current one.
    pub fn push_clip(&mut self, bounds: Rect) {
        let actual_clip = match self.clip_stack.last() {
            Some(current) => current.intersection(&bounds).unwrap_or(Rect::ZERO),
            None => bounds,
        };
        self.clip_stack.push(actual_clip);
    }

    /// Pops the current clip rect.
    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Rebuilds every dirty control that is shown. Returns the count.
    pub(crate) fn rebuild_dirty(&mut self, tree: &mut ControlTree, res: &Resources<'_>) -> usize {
        let dirty: Vec<ControlId> = tree
            .iter()
            .filter(|c| c.is_dirty())
            .map(Control::id)
            .filter(|&id| tree.is_shown(id))
            .collect();
        for &id in &dirty {
            if let Some(control) = tree.get_mut(id) {
                rebuild(control, res);
            }
        }
        if !dirty.is_empty() {
            tracing::trace!(count = dirty.len(), "rebuilt control buffers");
            self.rebuilt += dirty.len();
            self.scene_dirty = true;
        }
        dirty.len()
    }

    /// Composites the tree into the frame and pick surfaces.
    pub(crate) fn compose(&mut self, tree: &ControlTree) {
        self.frame.fill(self.background);
        self.pick.clear();
        self.clip_stack.clear();
        self.push_clip(self.frame.bounds());
        for &root in tree.roots() {
            self.compose_node(tree, root, (0.0, 0.0));
        }
        self.pop_clip();
        self.scene_dirty = false;
        self.composed = true;
    }

    fn compose_node(&mut self, tree: &ControlTree, id: ControlId, origin: (f32, f32)) {
        let Some(c) = tree.get(id) else {
            return;
        };
        if !c.is_visible() {
            return;
        }
        let x = origin.0 + c.rect.x;
        let y = origin.1 + c.rect.y;
        let clip = self.current_clip();
        self.frame
            .blit(&c.buffers.display, x, y, c.orientation, clip, BlendMode::Over);
        self.pick
            .blit(&c.buffers.pick, x, y, c.orientation, clip, BlendMode::Replace);

        if !c.children.is_empty() {
            let fp = c.footprint();
            self.push_clip(Rect::new(x, y, fp.width, fp.height));
            for &child in &c.children {
                self.compose_node(tree, child, (x, y));
            }
            self.pop_clip();
        }
    }

    /// Closes a frame and returns its statistics.
    pub(crate) fn finish_frame(&mut self) -> FrameStats {
        self.frame_no += 1;
        FrameStats {
            frame: self.frame_no,
            rebuilt: std::mem::take(&mut self.rebuilt),
            composed: std::mem::take(&mut self.composed),
        }
    }

    /// Pick pixel under a canvas point.
    #[must_use]
    pub fn sample_pick(&self, x: f32, y: f32) -> Option<Rgba> {
        self.pick.sample(x, y)
    }
}

/// Repaints one control's buffers and clears its dirty flag.
fn rebuild(control: &mut Control, res: &Resources<'_>) {
    let w = control.rect.width.ceil().max(0.0) as u32;
    let h = control.rect.height.ceil().max(0.0) as u32;
    let mut buffers = std::mem::replace(&mut control.buffers, Buffers::empty());
    buffers.display.resize(w, h);
    buffers.pick.resize(w, h);

    let scheme = control.scheme.unwrap_or(res.default_scheme);
    let ctx = FaceContext {
        palette: res.schemes.palette(scheme),
        text: res.text,
        glyphs: res.glyphs,
    };
    face::paint(control, &ctx, &mut buffers.display);
    if let Err(err) = face::paint_pick(control, &mut buffers.pick) {
        tracing::warn!(control = %control.name, %err, "pick silhouette incomplete");
    }
    control.buffers = buffers;
    control.flags.clear(ControlFlags::DIRTY);
}
