//! CPU raster surfaces.
//!
//! A [`Surface`] backs both kinds of control buffer. Display buffers are
//! painted with [`BlendMode::Over`]; pick buffers must only ever contain exact
//! key colors, so they are painted with [`BlendMode::Replace`] and none of the
//! primitives here anti-alias.
//!
//! Coverage rule: a pixel belongs to a shape when its center does.

use crate::geom::Rect;
use crate::orientation::Orientation;
use crate::pixel::Rgba;

/// How painted pixels combine with what is already there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Source-over alpha compositing.
    #[default]
    Over,
    /// Overwrite the destination (transparent source pixels are skipped).
    Replace,
}

/// Errors raised by surface operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// A pixel slice did not match `width * height`.
    #[error("pixel data has {actual} pixels, expected {expected}")]
    SizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied slice.
        actual: usize,
    },
}

/// A width × height grid of RGBA pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Creates a transparent surface. Zero-sized surfaces are allowed.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; width as usize * height as usize],
        }
    }

    /// Wraps decoded pixel data (row-major).
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::SizeMismatch`] if `pixels.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Result<Self, SurfaceError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SurfaceError::SizeMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { width, height, pixels })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bounds as a rectangle at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width as f32, self.height as f32)
    }

    /// Row-major pixel slice.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Pixel storage as raw RGBA bytes for host blitting.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Reallocates to a new size if it differs. Contents are cleared either way.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixels = vec![Rgba::TRANSPARENT; width as usize * height as usize];
        } else {
            self.clear();
        }
    }

    /// Clears to transparent.
    pub fn clear(&mut self) {
        self.fill(Rgba::TRANSPARENT);
    }

    /// Overwrites every pixel.
    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Returns the pixel at (x, y), or None outside the surface.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(self.index(x, y)).copied()
    }

    /// Samples at a floating-point position (pixel containing the point).
    #[must_use]
    pub fn sample(&self, x: f32, y: f32) -> Option<Rgba> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.get(x.floor() as u32, y.floor() as u32)
    }

    /// Writes one pixel. Out-of-bounds writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba, mode: BlendMode) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        let dst = &mut self.pixels[idx];
        *dst = match mode {
            BlendMode::Over => color.over(*dst),
            BlendMode::Replace if color.is_transparent() => *dst,
            BlendMode::Replace => color,
        };
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Integer pixel range whose centers fall inside `rect`, clipped to the surface.
    fn span(&self, rect: &Rect) -> Option<(u32, u32, u32, u32)> {
        if rect.is_empty() {
            return None;
        }
        let x0 = (rect.x - 0.5).ceil().max(0.0);
        let y0 = (rect.y - 0.5).ceil().max(0.0);
        let x1 = (rect.right() - 0.5).ceil().min(self.width as f32);
        let y1 = (rect.bottom() - 0.5).ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Fills a rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba, mode: BlendMode) {
        let Some((x0, y0, x1, y1)) = self.span(&rect) else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color, mode);
            }
        }
    }

    /// Fills a rectangle with rounded corners.
    ///
    /// `radii` are top-left, top-right, bottom-right, bottom-left; each is
    /// clamped to half the shorter side.
    pub fn fill_round_rect(&mut self, rect: Rect, radii: [f32; 4], color: Rgba, mode: BlendMode) {
        let Some((x0, y0, x1, y1)) = self.span(&rect) else {
            return;
        };
        let limit = rect.width.min(rect.height) * 0.5;
        let [tl, tr, br, bl] = radii.map(|r| r.clamp(0.0, limit));
        for y in y0..y1 {
            for x in x0..x1 {
                let cx = x as f32 + 0.5 - rect.x;
                let cy = y as f32 + 0.5 - rect.y;
                if in_rounded(cx, cy, rect.width, rect.height, tl, tr, br, bl) {
                    self.put(x, y, color, mode);
                }
            }
        }
    }

    /// Strokes the inside edge of a rectangle.
    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba, mode: BlendMode) {
        if rect.is_empty() || width <= 0.0 {
            return;
        }
        let w = width.min(rect.width * 0.5).min(rect.height * 0.5);
        self.fill_rect(Rect::new(rect.x, rect.y, rect.width, w), color, mode);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - w, rect.width, w), color, mode);
        self.fill_rect(Rect::new(rect.x, rect.y + w, w, rect.height - 2.0 * w), color, mode);
        self.fill_rect(Rect::new(rect.right() - w, rect.y + w, w, rect.height - 2.0 * w), color, mode);
    }

    /// Fills a circle.
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba, mode: BlendMode) {
        if radius <= 0.0 {
            return;
        }
        let bounds = Rect::new(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        let Some((x0, y0, x1, y1)) = self.span(&bounds) else {
            return;
        };
        let r2 = radius * radius;
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color, mode);
                }
            }
        }
    }

    /// Draws `src` (a local frame) into this surface with its footprint's
    /// top-left at (`x`, `y`), rotated by `orientation` and clipped to `clip`.
    ///
    /// Every destination pixel samples the source pixel under
    /// [`Orientation::xy`] of its center, so quarter turns are pixel exact.
    pub fn blit(
        &mut self,
        src: &Surface,
        x: f32,
        y: f32,
        orientation: Orientation,
        clip: Option<Rect>,
        mode: BlendMode,
    ) {
        let (fw, fh) = orientation.footprint(src.width as f32, src.height as f32);
        let mut target = Rect::new(x, y, fw, fh);
        if let Some(clip) = clip {
            match target.intersection(&clip) {
                Some(r) => target = r,
                None => return,
            }
        }
        let Some((x0, y0, x1, y1)) = self.span(&target) else {
            return;
        };
        for dy in y0..y1 {
            for dx in x0..x1 {
                let px = dx as f32 + 0.5 - x;
                let py = dy as f32 + 0.5 - y;
                let [lx, ly, _, _] = orientation.xy(px, py, fw, fh);
                if let Some(pixel) = src.sample(lx, ly) {
                    if !pixel.is_transparent() {
                        self.put(dx, dy, pixel, mode);
                    }
                }
            }
        }
    }

    /// Copies a `width` × `height` window of `src` starting at (`sx`, `sy`)
    /// into this surface at (`dx`, `dy`). Pixels outside either surface are skipped.
    pub fn copy_region(&mut self, src: &Surface, sx: i32, sy: i32, dx: i32, dy: i32, width: u32, height: u32) {
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let (tx, ty) = (dx + col, dy + row);
                let (fx, fy) = (sx + col, sy + row);
                if tx < 0 || ty < 0 || fx < 0 || fy < 0 {
                    continue;
                }
                if let Some(pixel) = src.get(fx as u32, fy as u32) {
                    self.put(tx as u32, ty as u32, pixel, BlendMode::Over);
                }
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn in_rounded(x: f32, y: f32, w: f32, h: f32, tl: f32, tr: f32, br: f32, bl: f32) -> bool {
    let corner = |cx: f32, cy: f32, r: f32| {
        let dx = x - cx;
        let dy = y - cy;
        dx * dx + dy * dy <= r * r
    };
    if x < tl && y < tl {
        return corner(tl, tl, tl);
    }
    if x > w - tr && y < tr {
        return corner(w - tr, tr, tr);
    }
    if x > w - br && y > h - br {
        return corner(w - br, h - br, br);
    }
    if x < bl && y > h - bl {
        return corner(bl, h - bl, bl);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = Rgba::rgb(255, 0, 0);
    const BLUE: Rgba = Rgba::rgb(0, 0, 255);

    fn count(surface: &Surface, color: Rgba) -> usize {
        surface.pixels().iter().filter(|&&p| p == color).count()
    }

    #[test]
    fn test_fill_rect_covers_pixel_centers() {
        let mut s = Surface::new(10, 10);
        s.fill_rect(Rect::new(2.0, 3.0, 4.0, 2.0), RED, BlendMode::Replace);
        assert_eq!(count(&s, RED), 8);
        assert_eq!(s.get(2, 3), Some(RED));
        assert_eq!(s.get(5, 4), Some(RED));
        assert_eq!(s.get(6, 4), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_round_rect_drops_corners() {
        let mut s = Surface::new(20, 20);
        s.fill_round_rect(Rect::sized(20.0, 20.0), [6.0; 4], RED, BlendMode::Replace);
        assert_eq!(s.get(0, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(s.get(19, 19), Some(Rgba::TRANSPARENT));
        assert_eq!(s.get(10, 10), Some(RED));
        assert_eq!(s.get(10, 0), Some(RED));
    }

    #[test]
    fn test_blit_rotations_are_pixel_exact() {
        // 4×2 source with a marker in its local top-left pixel.
        let mut src = Surface::new(4, 2);
        src.fill(BLUE);
        src.put(0, 0, RED, BlendMode::Replace);

        let cases = [
            (Orientation::East, (0, 0)),
            (Orientation::South, (1, 0)),
            (Orientation::West, (3, 1)),
            (Orientation::North, (0, 3)),
        ];
        for (o, marker) in cases {
            let mut dst = Surface::new(4, 4);
            dst.blit(&src, 0.0, 0.0, o, None, BlendMode::Replace);
            assert_eq!(count(&dst, RED), 1, "{o}");
            assert_eq!(count(&dst, BLUE), 7, "{o}");
            assert_eq!(dst.get(marker.0, marker.1), Some(RED), "{o}");
        }
    }

    #[test]
    fn test_blit_respects_clip() {
        let mut src = Surface::new(10, 10);
        src.fill(RED);
        let mut dst = Surface::new(20, 20);
        dst.blit(&src, 5.0, 5.0, Orientation::East, Some(Rect::new(0.0, 0.0, 8.0, 8.0)), BlendMode::Replace);
        assert_eq!(count(&dst, RED), 9);
    }

    #[test]
    fn test_replace_keeps_flat_colors() {
        let mut s = Surface::new(4, 4);
        s.fill_rect(Rect::sized(4.0, 4.0), RED, BlendMode::Replace);
        s.fill_rect(Rect::sized(2.0, 2.0), BLUE.with_alpha(128), BlendMode::Replace);
        assert_eq!(s.get(0, 0), Some(BLUE.with_alpha(128)));
        s.fill_rect(Rect::sized(2.0, 2.0), Rgba::TRANSPARENT, BlendMode::Replace);
        assert_eq!(s.get(0, 0), Some(BLUE.with_alpha(128)));
    }

    #[test]
    fn test_bytes_view() {
        let mut s = Surface::new(2, 1);
        s.put(1, 0, Rgba::rgba(1, 2, 3, 4), BlendMode::Replace);
        assert_eq!(s.as_bytes(), &[0, 0, 0, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_from_pixels_checks_size() {
        assert!(Surface::from_pixels(2, 2, vec![RED; 4]).is_ok());
        assert_eq!(
            Surface::from_pixels(2, 2, vec![RED; 3]),
            Err(SurfaceError::SizeMismatch { expected: 4, actual: 3 })
        );
    }
}
