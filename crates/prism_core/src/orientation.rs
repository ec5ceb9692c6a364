//! The four cardinal orientations.
//!
//! A control is always drawn and reasoned about in its own *local* frame,
//! `w` wide and `h` tall. Its orientation decides how that frame lands in the
//! parent: its *footprint*. East is the identity, West turns the frame half
//! way round, North and South stand it on end so the footprint is `h` wide
//! and `w` tall.
//!
//! ```text
//!   East            South (+90°)       North (-90°)      West (180°)
//!   x →             ┌──┐ ↓ x           ┌──┐ ↑ x          ← x
//!  ┌──────┐         │  │               │  │            ┌──────┐
//!  │      │         │  │               │  │            │      │
//!  └──────┘         └──┘               └──┘            └──────┘
//! ```
//!
//! [`Orientation::xy`] maps parent-footprint coordinates into the local frame
//! and [`Orientation::to_parent`] maps back. They are exact inverses.

use std::fmt;
use std::str::FromStr;

/// One of the four cardinal rotations applied to a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Rotated -90°: local x runs bottom to top.
    North,
    /// Rotated +90°: local x runs top to bottom.
    South,
    /// Identity.
    #[default]
    East,
    /// Rotated 180°: local x runs right to left.
    West,
}

/// Forward transform from a control's local frame into its footprint:
/// rotate by `quarter_turns` × 90° clockwise, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation applied after rotation.
    pub translate: (f32, f32),
    /// Clockwise quarter turns (0..=3).
    pub quarter_turns: u8,
}

impl Transform {
    /// Rotation angle in radians (clockwise, y-down screen convention).
    #[must_use]
    pub fn angle(&self) -> f32 {
        f32::from(self.quarter_turns) * std::f32::consts::FRAC_PI_2
    }

    /// Applies the transform to a local point.
    #[must_use]
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let (rx, ry) = match self.quarter_turns & 3 {
            0 => (x, y),
            1 => (-y, x),
            2 => (-x, -y),
            _ => (y, -x),
        };
        (rx + self.translate.0, ry + self.translate.1)
    }
}

impl Orientation {
    /// All four orientations.
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// Returns true if the footprint swaps width and height.
    #[inline]
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }

    /// Size of the footprint in the parent for a local frame `w` × `h`.
    #[must_use]
    pub fn footprint(self, w: f32, h: f32) -> (f32, f32) {
        if self.is_vertical() {
            (h, w)
        } else {
            (w, h)
        }
    }

    /// Forward transform for a local frame `w` × `h`.
    #[must_use]
    pub fn transform(self, w: f32, h: f32) -> Transform {
        match self {
            Self::East => Transform { translate: (0.0, 0.0), quarter_turns: 0 },
            Self::South => Transform { translate: (h, 0.0), quarter_turns: 1 },
            Self::West => Transform { translate: (w, h), quarter_turns: 2 },
            Self::North => Transform { translate: (0.0, w), quarter_turns: 3 },
        }
    }

    /// Maps a point in the footprint (`x`, `y` relative to the footprint's
    /// top-left, footprint size `w` × `h`) into the local frame.
    ///
    /// Returns `[x', y', w', h']` where `w'` × `h'` is the local frame size.
    #[must_use]
    pub fn xy(self, x: f32, y: f32, w: f32, h: f32) -> [f32; 4] {
        match self {
            Self::East => [x, y, w, h],
            Self::South => [y, w - x, h, w],
            Self::West => [w - x, h - y, w, h],
            Self::North => [h - y, x, h, w],
        }
    }

    /// Maps a local point (`x`, `y` in a local frame `w` × `h`) into the
    /// footprint. Returns `[x', y', w', h']` with the footprint size.
    #[must_use]
    pub fn to_parent(self, x: f32, y: f32, w: f32, h: f32) -> [f32; 4] {
        let (px, py) = self.transform(w, h).apply(x, y);
        let (fw, fh) = self.footprint(w, h);
        [px, py, fw, fh]
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown orientation name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown orientation: {0:?} (expected north, south, east or west)")]
pub struct ParseOrientationError(pub String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Self::North),
            "south" | "s" => Ok(Self::South),
            "east" | "e" => Ok(Self::East),
            "west" | "w" => Ok(Self::West),
            _ => Err(ParseOrientationError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn close(a: [f32; 4], b: [f32; 4]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
    }

    #[test]
    fn test_round_trip_all_orientations() {
        let mut rng = StdRng::seed_from_u64(0x5EED);
        for _ in 0..2_000 {
            let w: f32 = rng.gen_range(1.0..500.0);
            let h: f32 = rng.gen_range(1.0..500.0);
            for o in Orientation::ALL {
                let (fw, fh) = o.footprint(w, h);
                let x: f32 = rng.gen_range(0.0..fw);
                let y: f32 = rng.gen_range(0.0..fh);

                let local = o.xy(x, y, fw, fh);
                assert!(close([local[2], local[3], 0.0, 0.0], [w, h, 0.0, 0.0]), "{o}: local size");

                let back = o.to_parent(local[0], local[1], local[2], local[3]);
                assert!(close(back, [x, y, fw, fh]), "{o}: {back:?} != {:?}", [x, y, fw, fh]);
            }
        }
    }

    #[test]
    fn test_local_stays_inside_frame() {
        for o in Orientation::ALL {
            let (fw, fh) = o.footprint(100.0, 20.0);
            for &(x, y) in &[(0.5, 0.5), (fw - 0.5, 0.5), (0.5, fh - 0.5), (fw - 0.5, fh - 0.5)] {
                let [lx, ly, lw, lh] = o.xy(x, y, fw, fh);
                assert!(lx > 0.0 && lx < lw && ly > 0.0 && ly < lh, "{o}: ({lx}, {ly})");
            }
        }
    }

    #[test]
    fn test_north_south_are_mirror_images() {
        // A point that South sends to the local start of the track, North sends to its end.
        let south = Orientation::South.xy(10.0, 0.0, 20.0, 100.0);
        let north = Orientation::North.xy(10.0, 100.0, 20.0, 100.0);
        assert!((south[0] - 0.0).abs() < 1e-6);
        assert!((north[0] - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse() {
        assert_eq!("North".parse::<Orientation>(), Ok(Orientation::North));
        assert_eq!(" w ".parse::<Orientation>(), Ok(Orientation::West));
        assert!("up".parse::<Orientation>().is_err());
    }
}
