//! GUI configuration.
//!
//! Loaded once at startup, usually from TOML:
//!
//! ```toml
//! [canvas]
//! width = 1024
//! height = 768
//!
//! [tooltip]
//! show_delay_ms = 400
//! visible_ms = 2500
//!
//! [scheme]
//! default = "dark"
//!
//! [[scheme.custom]]
//! name = "mint"
//! ramp = ["#eefaf4", "#c8f0dc", "#96e0bc", "#64c896", "#3ca070", "#1e6446"]
//! text = "#102018"
//! ```
//!
//! Every section and field is optional.

use std::path::Path;

use prism_core::Rgba;
use serde::Deserialize;

use crate::error::{GuiError, GuiResult};
use crate::scheme::{ColorRole, Palette, Scheme, SchemeTable};

/// Canvas dimensions and clear color.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Color the frame is cleared to (`#rrggbb[aa]`); transparent when unset.
    pub background: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: None,
        }
    }
}

/// Tooltip timing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TooltipConfig {
    /// Hover time before a tooltip appears.
    pub show_delay_ms: u64,
    /// How long a tooltip stays up once shown.
    pub visible_ms: u64,
    /// Gap between the owning control and its tooltip.
    pub offset: f32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 400,
            visible_ms: 2500,
            offset: 4.0,
        }
    }
}

/// Single-font text metrics.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Font size in pixels.
    pub size: f32,
    /// Advance per character; monospace layout.
    pub char_width: f32,
    /// Inner padding around text faces.
    pub padding: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            size: 12.0,
            char_width: 7.0,
            padding: 4.0,
        }
    }
}

/// Side-docked pane geometry.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaneConfig {
    /// Depth of an open pane, measured in from its canvas edge.
    pub depth: f32,
    /// Gap before the first tab and between tabs.
    pub tab_gap: f32,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            depth: 200.0,
            tab_gap: 4.0,
        }
    }
}

/// A custom palette.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomScheme {
    /// Scheme name (case-insensitive).
    pub name: String,
    /// Six hex colors, lightest first.
    pub ramp: Vec<String>,
    /// Text color.
    pub text: String,
    /// Per-role overrides keyed by role name (`thumb = "#ff0000"`).
    #[serde(default)]
    pub overrides: std::collections::BTreeMap<String, String>,
}

/// Scheme selection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemeConfig {
    /// Default scheme for controls without one.
    pub default: String,
    /// Additional palettes.
    pub custom: Vec<CustomScheme>,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            default: Scheme::Blue.name().to_string(),
            custom: Vec::new(),
        }
    }
}

/// Complete GUI configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuiConfig {
    /// Canvas settings.
    pub canvas: CanvasConfig,
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
    /// Text metrics.
    pub text: TextConfig,
    /// Pane settings.
    pub pane: PaneConfig,
    /// Color schemes.
    pub scheme: SchemeConfig,
}

impl GuiConfig {
    /// Default configuration with a given canvas size.
    #[must_use]
    pub fn with_canvas(width: u32, height: u32) -> Self {
        let mut config = Self::default();
        config.canvas.width = width;
        config.canvas.height = height;
        config
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Config`] on malformed TOML or invalid values.
    pub fn from_toml_str(text: &str) -> GuiResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| GuiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Config`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> GuiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| GuiError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges and that every referenced scheme resolves.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Config`] describing the first problem found.
    pub fn validate(&self) -> GuiResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(GuiError::Config("canvas must be at least 1×1".into()));
        }
        if self.text.size <= 0.0 || self.text.char_width <= 0.0 {
            return Err(GuiError::Config("text size and char_width must be positive".into()));
        }
        if self.pane.depth <= 0.0 {
            return Err(GuiError::Config("pane depth must be positive".into()));
        }
        self.background()?;
        self.schemes()?;
        Ok(())
    }

    /// Parsed frame clear color.
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Config`] for an unparsable color.
    pub fn background(&self) -> GuiResult<Rgba> {
        match &self.canvas.background {
            None => Ok(Rgba::TRANSPARENT),
            Some(text) => parse_color(text),
        }
    }

    /// Builds the scheme table (built-ins plus custom palettes).
    ///
    /// # Errors
    ///
    /// Returns [`GuiError::Config`] for malformed custom schemes or an
    /// unknown default scheme.
    pub fn schemes(&self) -> GuiResult<SchemeTable> {
        let mut table = SchemeTable::new();
        for custom in &self.scheme.custom {
            table.insert(&custom.name, custom.palette()?);
        }
        if table.find(&self.scheme.default).is_none() {
            return Err(GuiError::Config(format!("unknown default scheme {:?}", self.scheme.default)));
        }
        Ok(table)
    }
}

impl CustomScheme {
    fn palette(&self) -> GuiResult<Palette> {
        if self.ramp.len() != 6 {
            return Err(GuiError::Config(format!(
                "scheme {:?}: ramp needs 6 colors, got {}",
                self.name,
                self.ramp.len()
            )));
        }
        let mut ramp = [0u32; 6];
        for (slot, text) in ramp.iter_mut().zip(&self.ramp) {
            *slot = parse_color(text)?.rgb24();
        }
        let mut palette = Palette::from_ramp(ramp, parse_color(&self.text)?.rgb24());
        for (role, color) in &self.overrides {
            let role = ColorRole::from_name(role)
                .ok_or_else(|| GuiError::Config(format!("scheme {:?}: unknown role {role:?}", self.name)))?;
            palette.set(role, parse_color(color)?);
        }
        Ok(palette)
    }
}

fn parse_color(text: &str) -> GuiResult<Rgba> {
    Rgba::from_hex_str(text).ok_or_else(|| GuiError::Config(format!("bad color {text:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(GuiConfig::from_toml_str("").unwrap(), GuiConfig::default());
    }

    #[test]
    fn test_custom_scheme() {
        let config = GuiConfig::from_toml_str(
            r##"
            [canvas]
            width = 320
            height = 200
            background = "#000000"

            [scheme]
            default = "mint"

            [[scheme.custom]]
            name = "Mint"
            ramp = ["#eefaf4", "#c8f0dc", "#96e0bc", "#64c896", "#3ca070", "#1e6446"]
            text = "#102018"
            overrides = { thumb = "#ff0000" }
            "##,
        )
        .unwrap();

        assert_eq!(config.canvas.width, 320);
        assert_eq!(config.background().unwrap(), Rgba::BLACK);
        let table = config.schemes().unwrap();
        let mint = table.find("mint").unwrap();
        assert_eq!(table.palette(mint).get(ColorRole::Thumb), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(GuiConfig::from_toml_str("[canvas]\nwidth = 0"), Err(GuiError::Config(_))));
        assert!(matches!(GuiConfig::from_toml_str("[scheme]\ndefault = \"plaid\""), Err(GuiError::Config(_))));
        assert!(matches!(GuiConfig::from_toml_str("[canvas]\nwdth = 3"), Err(GuiError::Config(_))));
        assert!(matches!(
            GuiConfig::from_toml_str("[[scheme.custom]]\nname = \"x\"\nramp = [\"#000000\"]\ntext = \"#ffffff\""),
            Err(GuiError::Config(_))
        ));
    }
}
