//! Logical ↔ framebuffer coordinate mapping.

use crate::config::{self, DisplayConfig};
use crate::error::{Error, Result};
use crate::geometry::Point;

/// A `width × height` logical canvas centred on the origin, drawn at `scale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    scale: u32,
}

impl Viewport {
    /// Create a viewport.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for a width or height outside
    /// [`config::CANVAS_RANGE`], or [`Error::InvalidScale`] for a scale
    /// outside [`config::SCALE_RANGE`].
    pub fn new(width: u32, height: u32, scale: u32) -> Result<Self> {
        config::check_canvas(width, height)?;
        config::check_scale(scale)?;
        Ok(Self { width, height, scale })
    }

    /// Canvas width in logical pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in logical pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Screen pixels per logical pixel.
    #[must_use]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Framebuffer size in screen pixels.
    #[must_use]
    pub const fn frame_size(&self) -> (u32, u32) {
        // At most 400 × 40 per side
        (self.width * self.scale, self.height * self.scale)
    }

    /// Grid cell (top-left origin) holding `p`, or `None` if off-canvas.
    ///
    /// The origin sits at cell `(width / 2, height / 2)`; y grows upwards in
    /// logical space and downwards on the grid.
    #[must_use]
    pub fn logical_to_grid(&self, p: Point) -> Option<(u32, u32)> {
        let gx = i64::from(p.x) + i64::from(self.width / 2);
        let gy = i64::from(self.height / 2) - i64::from(p.y);
        let gx = u32::try_from(gx).ok().filter(|&x| x < self.width)?;
        let gy = u32::try_from(gy).ok().filter(|&y| y < self.height)?;
        Some((gx, gy))
    }

    /// Top-left framebuffer corner of the block for `p`, or `None` if off-canvas.
    #[must_use]
    pub fn to_frame(&self, p: Point) -> Option<(u32, u32)> {
        let (gx, gy) = self.logical_to_grid(p)?;
        Some((gx.checked_mul(self.scale)?, gy.checked_mul(self.scale)?))
    }

    /// Logical point under a framebuffer position, such as a mouse click.
    #[must_use]
    pub fn from_frame(&self, fx: u32, fy: u32) -> Point {
        let lx = i64::from(fx / self.scale) - i64::from(self.width / 2);
        let ly = i64::from(self.height / 2) - i64::from(fy / self.scale);
        Point::new(clamp_i32(lx), clamp_i32(ly))
    }
}

impl TryFrom<&DisplayConfig> for Viewport {
    type Error = Error;

    fn try_from(config: &DisplayConfig) -> Result<Self> {
        Self::new(config.width, config.height, config.scale)
    }
}

fn clamp_i32(v: i64) -> i32 {
    // fx / scale fits in u32, so only the far ends can overflow
    i32::try_from(v).unwrap_or(if v < 0 { i32::MIN } else { i32::MAX })
}
