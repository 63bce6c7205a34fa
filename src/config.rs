//! Display configuration passed through to the rendering side.
//!
//! Loaded from YAML; every field has a default, so an empty document is valid.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::raster::LineAlgorithm;

/// Supported canvas width and height, in logical pixels.
pub const CANVAS_RANGE: RangeInclusive<u32> = 10..=400;

/// Supported screen pixels per logical pixel.
pub const SCALE_RANGE: RangeInclusive<u32> = 1..=40;

/// Canvas and color settings for rendering a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Line color as a hex string.
    #[serde(default = "default_line_color")]
    pub line_color: String,

    /// Background color as a hex string.
    #[serde(default = "default_background_color")]
    pub background_color: String,

    /// Canvas width in logical pixels.
    #[serde(default = "default_canvas_size")]
    pub width: u32,

    /// Canvas height in logical pixels.
    #[serde(default = "default_canvas_size")]
    pub height: u32,

    /// Screen pixels per logical pixel.
    #[serde(default = "default_scale")]
    pub scale: u32,

    /// Line algorithm used for figure edges.
    #[serde(default)]
    pub algorithm: LineAlgorithm,
}

fn default_line_color() -> String {
    "#0000FF".to_string()
}
fn default_background_color() -> String {
    "#ebebeb".to_string()
}
fn default_canvas_size() -> u32 {
    30
}
fn default_scale() -> u32 {
    20
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            line_color: default_line_color(),
            background_color: default_background_color(),
            width: default_canvas_size(),
            height: default_canvas_size(),
            scale: default_scale(),
            algorithm: LineAlgorithm::default(),
        }
    }
}

impl DisplayConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails, or if the parsed
    /// values do not validate.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Serializes the configuration to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| Error::ConfigParse { line: 0, message: e.to_string() })
    }

    /// Checks dimensions, scale and colors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a width or height outside
    /// [`CANVAS_RANGE`], [`Error::InvalidScale`] for a scale outside
    /// [`SCALE_RANGE`], and [`Error::InvalidColor`] for an unparseable color.
    pub fn validate(&self) -> Result<()> {
        check_canvas(self.width, self.height)?;
        check_scale(self.scale)?;
        self.line_rgba()?;
        self.background_rgba()?;
        Ok(())
    }

    /// Parsed line color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if `line_color` is not a hex color.
    pub fn line_rgba(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.line_color)
    }

    /// Parsed background color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if `background_color` is not a hex color.
    pub fn background_rgba(&self) -> Result<Rgba> {
        Rgba::from_hex(&self.background_color)
    }

    /// Framebuffer size in screen pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if a side overflows `u32`.
    pub fn frame_size(&self) -> Result<(u32, u32)> {
        frame_size(self.width, self.height, self.scale)
    }
}

pub(crate) fn check_canvas(width: u32, height: u32) -> Result<()> {
    if CANVAS_RANGE.contains(&width) && CANVAS_RANGE.contains(&height) {
        Ok(())
    } else {
        Err(Error::InvalidDimensions { width, height })
    }
}

pub(crate) fn check_scale(scale: u32) -> Result<()> {
    if SCALE_RANGE.contains(&scale) {
        Ok(())
    } else {
        Err(Error::InvalidScale { scale })
    }
}

pub(crate) fn frame_size(width: u32, height: u32, scale: u32) -> Result<(u32, u32)> {
    match (width.checked_mul(scale), height.checked_mul(scale)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(Error::InvalidDimensions { width, height }),
    }
}
