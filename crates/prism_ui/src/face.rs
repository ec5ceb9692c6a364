//! Control faces: what each kind paints into its display and pick buffers.
//!
//! Both buffers are painted in the control's local (unrotated) frame; the
//! compositor applies orientation. Pick silhouettes are flat key colors with
//! no blending so every covered pixel decodes exactly.

use prism_core::{BlendMode, Orientation, PickKey, Rect, Rgba, Surface};

use crate::config::TextConfig;
use crate::control::{
    Align, Behavior, Capability, Control, VisualState, PART_THUMB, PART_THUMB_HIGH, PART_TRACK,
};
use crate::error::GuiResult;
use crate::scheme::{ColorRole, Palette};

/// Measures and draws text.
///
/// Single font, single line. Hosts with a real rasterizer implement this;
/// [`BlockGlyphs`] is the headless default.
pub trait GlyphSource: Send + Sync {
    /// Size of `text` in pixels.
    fn measure(&self, text: &str, metrics: &TextConfig) -> (f32, f32);

    /// Draws `text` with its top-left at (`x`, `y`).
    fn draw(&self, target: &mut Surface, text: &str, x: f32, y: f32, color: Rgba, metrics: &TextConfig);
}

/// Draws every visible character as a solid block in a monospace grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockGlyphs;

impl GlyphSource for BlockGlyphs {
    fn measure(&self, text: &str, metrics: &TextConfig) -> (f32, f32) {
        (text.chars().count() as f32 * metrics.char_width, metrics.size)
    }

    fn draw(&self, target: &mut Surface, text: &str, x: f32, y: f32, color: Rgba, metrics: &TextConfig) {
        let cw = metrics.char_width;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let gx = x + i as f32 * cw + cw * 0.15;
            target.fill_rect(
                Rect::new(gx, y + metrics.size * 0.2, cw * 0.7, metrics.size * 0.65),
                color,
                BlendMode::Over,
            );
        }
    }
}

/// Everything a face needs besides the control itself.
pub(crate) struct FaceContext<'a> {
    pub palette: &'a Palette,
    pub text: &'a TextConfig,
    pub glyphs: &'a dyn GlyphSource,
}

struct Painter<'a, 'b> {
    c: &'a Control,
    ctx: &'a FaceContext<'b>,
    out: &'a mut Surface,
    local: Rect,
}

impl Painter<'_, '_> {
    fn color(&self, role: ColorRole) -> Rgba {
        let color = self.ctx.palette.get(role);
        if self.c.is_enabled() {
            color
        } else {
            color.dimmed()
        }
    }

    fn face_role(&self) -> ColorRole {
        match self.c.visual_state() {
            VisualState::Active => ColorRole::FaceActive,
            VisualState::Hover => ColorRole::FaceHover,
            _ => ColorRole::Face,
        }
    }

    fn thumb_role(&self) -> ColorRole {
        if self.c.is_active() || self.c.is_over() {
            ColorRole::ThumbHover
        } else {
            ColorRole::Thumb
        }
    }

    fn background(&mut self, role: ColorRole) {
        if self.c.is_opaque() {
            let color = self.color(role);
            self.out.fill_round_rect(self.local, self.c.corners, color, BlendMode::Over);
        }
    }

    fn border(&mut self) {
        if self.c.is_opaque() && self.c.corners == [0.0; 4] {
            let color = self.color(ColorRole::Border);
            self.out.stroke_rect(self.local, 1.0, color, BlendMode::Over);
        }
    }

    fn aligned_x(&self, area: Rect, width: f32, align: Align) -> f32 {
        let pad = self.ctx.text.padding;
        match align {
            Align::Left => area.x + pad,
            Align::Center => area.x + (area.width - width) * 0.5,
            Align::Right => area.right() - pad - width,
        }
    }

    fn label(&mut self, area: Rect) {
        let Some(face) = &self.c.text else {
            return;
        };
        let (tw, th) = self.ctx.glyphs.measure(&face.text, self.ctx.text);
        let x = self.aligned_x(area, tw, face.align);
        let y = area.y + (area.height - th) * 0.5;
        let color = self.color(ColorRole::Text);
        self.ctx.glyphs.draw(self.out, &face.text, x, y, color, self.ctx.text);
    }

    fn icon(&mut self) {
        let Some(icon) = &self.c.icon else {
            return;
        };
        let (iw, ih) = (icon.image.width() as f32, icon.image.height() as f32);
        let x = self.aligned_x(self.local, iw, icon.align);
        let y = (self.local.height - ih) * 0.5;
        self.out
            .blit(&icon.image, x, y, Orientation::East, Some(self.local), BlendMode::Over);
    }

    /// Square marker box on the left, text to its right.
    fn toggle(&mut self, selected: bool, round: bool) {
        self.background(self.face_role());
        let h = self.local.height;
        let side = (h - 2.0 * self.ctx.text.padding).max(4.0);
        let bx = self.ctx.text.padding;
        let by = (h - side) * 0.5;
        let border = self.color(ColorRole::Border);
        let back = self.color(ColorRole::Back);
        let mark = self.color(ColorRole::Selected);
        if round {
            let (cx, cy, r) = (bx + side * 0.5, h * 0.5, side * 0.5);
            self.out.fill_circle(cx, cy, r, border, BlendMode::Over);
            self.out.fill_circle(cx, cy, r - 1.0, back, BlendMode::Over);
            if selected {
                self.out.fill_circle(cx, cy, r * 0.5, mark, BlendMode::Over);
            }
        } else {
            let boxed = Rect::new(bx, by, side, side);
            self.out.fill_rect(boxed, back, BlendMode::Over);
            self.out.stroke_rect(boxed, 1.0, border, BlendMode::Over);
            if selected {
                self.out.fill_rect(boxed.shrink(side * 0.25), mark, BlendMode::Over);
            }
        }
        let text_x = bx + side;
        self.label(Rect::new(text_x, 0.0, self.local.width - text_x, h));
    }

    fn track(&mut self, start: f32, len: f32) {
        let h = self.local.height;
        let thick = (h * 0.25).max(2.0);
        let color = self.color(ColorRole::Track);
        self.out.fill_round_rect(
            Rect::new(start, (h - thick) * 0.5, len, thick),
            [thick * 0.5; 4],
            color,
            BlendMode::Over,
        );
    }
}

/// Paints the display buffer. `out` is already sized to the local frame and cleared.
pub(crate) fn paint(c: &Control, ctx: &FaceContext<'_>, out: &mut Surface) {
    let local = Rect::sized(c.rect.width, c.rect.height);
    let mut p = Painter { c, ctx, out, local };
    let (w, h) = (local.width, local.height);

    match &c.behavior {
        Behavior::Button => {
            let role = p.face_role();
            p.background(role);
            p.border();
            p.icon();
            p.label(local);
        }
        Behavior::Label => {
            p.background(ColorRole::Back);
            p.icon();
            p.label(local);
        }
        Behavior::Checkbox(check) => p.toggle(check.selected, false),
        Behavior::OptionButton(option) => p.toggle(option.selected, true),
        Behavior::Slider(slider) => {
            p.background(ColorRole::Back);
            let (start, len) = crate::control::track_span(w, h);
            p.track(start, len);
            if let Some(ticks) = slider.ticks() {
                let tick = p.color(ColorRole::Tick);
                let n = ticks.intervals();
                for i in 0..=n {
                    let x = start + len * i as f32 / n as f32;
                    let major = i % ticks.minor.max(1) == 0;
                    let (top, tall) = if major { (0.0, h * 0.2) } else { (h * 0.05, h * 0.1) };
                    p.out.fill_rect(Rect::new(x - 0.5, top, 1.0, tall), tick, BlendMode::Over);
                }
            }
            let thumb = p.color(p.thumb_role());
            p.out.fill_circle(slider.thumb_x(w, h), h * 0.5, h * 0.5 - 1.0, thumb, BlendMode::Over);
        }
        Behavior::Ranger(ranger) => {
            p.background(ColorRole::Back);
            let (start, len) = crate::control::track_span(w, h);
            p.track(start, len);
            let (lx, hx) = ranger.thumb_xs(w, h);
            let band = p.color(ColorRole::Selected);
            p.out.fill_rect(Rect::new(lx, h * 0.375, hx - lx, h * 0.25), band, BlendMode::Over);
            let thumb = p.color(p.thumb_role());
            p.out.fill_circle(lx, h * 0.5, h * 0.5 - 1.0, thumb, BlendMode::Over);
            p.out.fill_circle(hx, h * 0.5, h * 0.5 - 1.0, thumb, BlendMode::Over);
        }
        Behavior::Scroller(scroller) => {
            let track = p.color(ColorRole::Track);
            p.out.fill_round_rect(local, c.corners, track, BlendMode::Over);
            let (a, b) = scroller.thumb_span(w);
            let thumb = p.color(p.thumb_role());
            p.out.fill_round_rect(Rect::new(a, 1.0, b - a, h - 2.0), c.corners, thumb, BlendMode::Over);
        }
        Behavior::TextField(field) => {
            let role = if field.is_valid() { ColorRole::Back } else { ColorRole::Invalid };
            p.background(role);
            p.border();
            let color = p.color(ColorRole::Text);
            let y = (h - ctx.text.size) * 0.5;
            ctx.glyphs.draw(p.out, field.text(), ctx.text.padding, y, color, ctx.text);
            if c.is_focused() {
                let cursor = p.color(ColorRole::Cursor);
                p.out.fill_rect(
                    Rect::new(field.caret_x(ctx.text), y, 1.0, ctx.text.size),
                    cursor,
                    BlendMode::Over,
                );
            }
        }
        Behavior::Panel(_) | Behavior::Pane(_) => {
            p.background(ColorRole::Back);
            p.border();
        }
        Behavior::PaneTab(_) => {
            let role = p.face_role();
            p.background(role);
            p.label(local);
        }
        Behavior::Viewer(viewer) => {
            if let Some(content) = viewer.content() {
                let (ox, oy) = viewer.view_origin(w, h);
                p.out
                    .copy_region(content, ox.round() as i32, oy.round() as i32, 0, 0, w as u32, h as u32);
            }
            p.border();
        }
        Behavior::Tooltip(_) => {
            p.background(ColorRole::Tip);
            p.border();
            p.label(local);
        }
    }
}

/// Paints the pick buffer.
///
/// Pickable controls paint their key (with part variants for thumbs).
/// Disabled controls paint the "no control" sentinel so they still hide
/// whatever is beneath them. Transparent containers and tooltips paint
/// nothing.
pub(crate) fn paint_pick(c: &Control, out: &mut Surface) -> GuiResult<()> {
    let local = Rect::sized(c.rect.width, c.rect.height);
    let (w, h) = (local.width, local.height);

    if !c.is_pickable() {
        let see_through = !c.behavior.pickable()
            || (!c.is_opaque() && c.capabilities().has(Capability::Container));
        if c.is_visible() && !see_through {
            out.fill_round_rect(local, c.corners, Rgba::BLACK, BlendMode::Replace);
        }
        return Ok(());
    }

    let key: PickKey = c.key;
    out.fill_round_rect(local, c.corners, key.part_color(PART_TRACK)?, BlendMode::Replace);
    match &c.behavior {
        Behavior::Slider(slider) => {
            let color = key.part_color(PART_THUMB)?;
            out.fill_circle(slider.thumb_x(w, h), h * 0.5, h * 0.5, color, BlendMode::Replace);
        }
        Behavior::Ranger(ranger) => {
            let (lx, hx) = ranger.thumb_xs(w, h);
            out.fill_circle(lx, h * 0.5, h * 0.5, key.part_color(PART_THUMB)?, BlendMode::Replace);
            out.fill_circle(hx, h * 0.5, h * 0.5, key.part_color(PART_THUMB_HIGH)?, BlendMode::Replace);
        }
        Behavior::Scroller(scroller) => {
            let (a, b) = scroller.thumb_span(w);
            out.fill_rect(Rect::new(a, 0.0, b - a, h), key.part_color(PART_THUMB)?, BlendMode::Replace);
        }
        _ => {}
    }
    Ok(())
}
