//! RGBA pixels.
//!
//! Pixels are stored as straight (non-premultiplied) 8-bit RGBA so that a
//! surface can be handed to a host blitter as raw bytes.

/// An 8-bit RGBA pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgba {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component (0 = fully transparent).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black. Also the "no control" value of a pick buffer.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Solid black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Solid white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a color from RGBA components.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Creates a color from a hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        Self::rgba(
            ((hex >> 24) & 0xFF) as u8,
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Creates an opaque color from a packed 24-bit value (0xRRGGBB).
    #[must_use]
    pub const fn from_rgb24(value: u32) -> Self {
        Self::rgb(
            ((value >> 16) & 0xFF) as u8,
            ((value >> 8) & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    /// Packs the RGB components into a 24-bit value, ignoring alpha.
    #[must_use]
    pub const fn rgb24(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    #[must_use]
    pub fn from_hex_str(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::from_rgb24(value)),
            8 => Some(Self::hex(value)),
            _ => None,
        }
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns true if the pixel is fully transparent.
    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Linearly interpolates between two colors (`t` in 0..=1).
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
        Self::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Washed-out variant used for disabled faces.
    #[must_use]
    pub fn dimmed(self) -> Self {
        let gray = ((u32::from(self.r) + u32::from(self.g) + u32::from(self.b)) / 3) as u8;
        self.lerp(Self::rgba(gray, gray, gray, self.a), 0.6)
            .with_alpha((u32::from(self.a) * 3 / 5) as u8)
    }

    /// Composites `self` over `dst` (source-over).
    #[must_use]
    pub fn over(self, dst: Self) -> Self {
        match self.a {
            0 => dst,
            255 => self,
            sa => {
                let sa = u32::from(sa);
                let da = u32::from(dst.a) * (255 - sa) / 255;
                let out_a = sa + da;
                if out_a == 0 {
                    return Self::TRANSPARENT;
                }
                let ch = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * da) / out_a) as u8;
                Self::rgba(ch(self.r, dst.r), ch(self.g, dst.g), ch(self.b, dst.b), out_a as u8)
            }
        }
    }
}
