//! Rendering a pixel list onto a background.

use std::fmt::Write as _;

use log::trace;

use super::Viewport;
use crate::color::Rgba;
use crate::config::DisplayConfig;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::geometry::Point;
use crate::state::FigureState;

/// Something that can be painted through a [`Viewport`].
pub trait Drawable {
    /// Paint into `fb` in `color`, dropping anything off-canvas.
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba);
}

impl Drawable for Point {
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        if let Some((fx, fy)) = viewport.to_frame(*self) {
            fb.fill_rect(fx, fy, viewport.scale(), viewport.scale(), color);
        }
    }
}

impl Drawable for [Point] {
    fn draw(&self, fb: &mut Framebuffer, viewport: &Viewport, color: Rgba) {
        for pixel in self {
            pixel.draw(fb, viewport, color);
        }
    }
}

/// Paint `pixels` over the configured background.
///
/// # Errors
///
/// Returns an error if `config` does not validate.
pub fn render_pixels(config: &DisplayConfig, pixels: &[Point]) -> Result<Framebuffer> {
    config.validate()?;
    let viewport = Viewport::try_from(config)?;
    let (width, height) = viewport.frame_size();

    let mut fb = Framebuffer::new(width, height)?;
    fb.clear(config.background_rgba()?);
    pixels.draw(&mut fb, &viewport, config.line_rgba()?);

    trace!("Rendered {} pixels into {width}x{height}", pixels.len());
    Ok(fb)
}

/// Paint a figure state's pixels with its own display settings.
///
/// # Errors
///
/// See [`render_pixels`].
pub fn render_state(state: &FigureState) -> Result<Framebuffer> {
    render_pixels(state.display(), state.active_pixels())
}

/// Sidebar text for a pixel list: `(x, y);` per pixel.
#[must_use]
pub fn format_pixel_list(pixels: &[Point]) -> String {
    let mut out = String::with_capacity(pixels.len() * 10);
    for p in pixels {
        let _ = write!(out, "({}, {});", p.x, p.y);
    }
    out
}
