//! Color schemes.
//!
//! A [`Palette`] is a fixed-shape table indexed by [`ColorRole`]. Built-in
//! schemes are derived from a six-step ramp (lightest to darkest) plus a text
//! color; custom schemes from configuration use the same shape.

use prism_core::Rgba;

/// Semantic slot in a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRole {
    /// Container background.
    Back,
    /// Idle control face.
    Face,
    /// Face while the pointer is over the control.
    FaceHover,
    /// Face while the control is active (pressed or dragging).
    FaceActive,
    /// Outline.
    Border,
    /// Slider and scroller track.
    Track,
    /// Slider and scroller thumb.
    Thumb,
    /// Thumb while hovered or dragged.
    ThumbHover,
    /// Slider tick marks.
    Tick,
    /// Text.
    Text,
    /// Check marks and selected options.
    Selected,
    /// Text cursor.
    Cursor,
    /// Background of a text field holding invalid input.
    Invalid,
    /// Tooltip background.
    Tip,
}

impl ColorRole {
    /// Number of roles.
    pub const COUNT: usize = 14;

    /// All roles in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Back,
        Self::Face,
        Self::FaceHover,
        Self::FaceActive,
        Self::Border,
        Self::Track,
        Self::Thumb,
        Self::ThumbHover,
        Self::Tick,
        Self::Text,
        Self::Selected,
        Self::Cursor,
        Self::Invalid,
        Self::Tip,
    ];

    /// Parses a role from its lowercase config name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|r| r.name() == name)
    }

    /// Config name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Back => "back",
            Self::Face => "face",
            Self::FaceHover => "face_hover",
            Self::FaceActive => "face_active",
            Self::Border => "border",
            Self::Track => "track",
            Self::Thumb => "thumb",
            Self::ThumbHover => "thumb_hover",
            Self::Tick => "tick",
            Self::Text => "text",
            Self::Selected => "selected",
            Self::Cursor => "cursor",
            Self::Invalid => "invalid",
            Self::Tip => "tip",
        }
    }
}

/// A complete color table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    colors: [Rgba; ColorRole::COUNT],
}

impl Palette {
    /// Builds a palette from a six-step ramp (0 = lightest) and a text color.
    #[must_use]
    pub const fn from_ramp(ramp: [u32; 6], text: u32) -> Self {
        let text = Rgba::from_rgb24(text);
        Self {
            colors: [
                step(&ramp, 0).with_alpha(230), // Back
                step(&ramp, 2),                 // Face
                step(&ramp, 1),                 // FaceHover
                step(&ramp, 3),                 // FaceActive
                step(&ramp, 5),                 // Border
                step(&ramp, 1),                 // Track
                step(&ramp, 4),                 // Thumb
                step(&ramp, 5),                 // ThumbHover
                step(&ramp, 5),                 // Tick
                text,
                step(&ramp, 5),                 // Selected
                text,                           // Cursor
                Rgba::rgb(230, 120, 120),       // Invalid
                step(&ramp, 0),                 // Tip
            ],
        }
    }

    /// Returns the color for a role.
    #[inline]
    #[must_use]
    pub fn get(&self, role: ColorRole) -> Rgba {
        self.colors[role as usize]
    }

    /// Replaces the color for a role.
    pub fn set(&mut self, role: ColorRole, color: Rgba) {
        self.colors[role as usize] = color;
    }
}

const fn step(ramp: &[u32; 6], i: usize) -> Rgba {
    Rgba::from_rgb24(ramp[i])
}

/// Built-in schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// Blue (default).
    Blue,
    /// Green.
    Green,
    /// Red.
    Red,
    /// Cyan.
    Cyan,
    /// Purple.
    Purple,
    /// Orange.
    Orange,
    /// Dark gray with light text.
    Dark,
    /// Light gray.
    Light,
}

impl Scheme {
    /// All built-in schemes.
    pub const ALL: [Self; 8] = [
        Self::Blue,
        Self::Green,
        Self::Red,
        Self::Cyan,
        Self::Purple,
        Self::Orange,
        Self::Dark,
        Self::Light,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Red => "red",
            Self::Cyan => "cyan",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// The scheme's palette.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Blue => Palette::from_ramp([0xDD_E8_F8, 0xB4_CC_F0, 0x88_AC_E4, 0x5C_88_D0, 0x3A_64_B0, 0x1E_3C_78], 0x10_18_28),
            Self::Green => Palette::from_ramp([0xDD_F4_DD, 0xB4_E6_B4, 0x86_D2_86, 0x5A_B4_5A, 0x3A_8C_3A, 0x1E_5A_1E], 0x10_24_10),
            Self::Red => Palette::from_ramp([0xF8_DD_DD, 0xF0_B4_B4, 0xE4_88_88, 0xD0_5C_5C, 0xB0_3A_3A, 0x78_1E_1E], 0x28_10_10),
            Self::Cyan => Palette::from_ramp([0xDD_F6_F8, 0xB4_EA_F0, 0x88_DA_E4, 0x5C_C0_D0, 0x3A_98_B0, 0x1E_64_78], 0x10_24_28),
            Self::Purple => Palette::from_ramp([0xEC_DD_F8, 0xD6_B4_F0, 0xBC_88_E4, 0x9C_5C_D0, 0x78_3A_B0, 0x4C_1E_78], 0x1E_10_28),
            Self::Orange => Palette::from_ramp([0xFC_EA_D8, 0xF8_D2_A8, 0xF0_B4_70, 0xE4_92_3C, 0xC0_6E_1E, 0x80_44_10], 0x28_18_08),
            Self::Dark => Palette::from_ramp([0x50_50_58, 0x60_60_6A, 0x48_48_50, 0x38_38_40, 0x28_28_30, 0xC8_C8_D0], 0xE8_E8_F0),
            Self::Light => Palette::from_ramp([0xFA_FA_FA, 0xEE_EE_EE, 0xDC_DC_DC, 0xC4_C4_C4, 0xA0_A0_A0, 0x60_60_60], 0x20_20_20),
        }
    }

    /// Id of this scheme in any [`SchemeTable`]. Built-ins keep their slots
    /// even when a custom palette replaces them by name.
    #[must_use]
    pub const fn id(self) -> SchemeId {
        SchemeId(self as usize)
    }

    /// Looks up a built-in scheme by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.iter().copied().find(|s| s.name() == name)
    }
}

/// Index into a GUI's [`SchemeTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemeId(usize);

/// Named palettes available to one GUI instance.
#[derive(Debug, Clone)]
pub struct SchemeTable {
    entries: Vec<(String, Palette)>,
}

impl SchemeTable {
    /// Creates a table holding all built-in schemes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Scheme::ALL
                .iter()
                .map(|s| (s.name().to_string(), s.palette()))
                .collect(),
        }
    }

    /// Adds or replaces a named palette.
    pub fn insert(&mut self, name: &str, palette: Palette) -> SchemeId {
        let name = name.trim().to_ascii_lowercase();
        if let Some(id) = self.find(&name) {
            self.entries[id.0].1 = palette;
            return id;
        }
        self.entries.push((name, palette));
        SchemeId(self.entries.len() - 1)
    }

    /// Finds a palette by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<SchemeId> {
        let name = name.trim().to_ascii_lowercase();
        self.entries.iter().position(|(n, _)| *n == name).map(SchemeId)
    }

    /// Returns the palette for an id.
    #[must_use]
    pub fn palette(&self, id: SchemeId) -> &Palette {
        &self.entries[id.0].1
    }

    /// Returns the name for an id.
    #[must_use]
    pub fn name(&self, id: SchemeId) -> &str {
        &self.entries[id.0].0
    }
}

impl Default for SchemeTable {
    fn default() -> Self {
        Self::new()
    }
}
