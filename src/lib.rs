//! # pixel-raster
//!
//! Line rasterization and 2D affine transforms on an integer pixel grid.
//!
//! Segments are turned into pixel lists by one of three classic algorithms,
//! closed figures are the concatenation of their edges, and an observable
//! state object keeps a figure, its accumulated transform, and the derived
//! pixels consistent for whatever view is listening.
//!
//! ## Features
//!
//! - **Three line algorithms**: slope-intercept, DDA and Bresenham, with shared
//!   handling of vertical, horizontal and diagonal segments
//! - **Homogeneous transforms**: translate, rotate, scale, shear and reflect
//!   across any line `y = m·x + t`
//! - **Observable state**: setters commit atomically, then notify
//! - **PNG output**: centred, y-up canvas rendered at any scale
//!
//! ## Quick Start
//!
//! ```rust
//! use pixel_raster::prelude::*;
//!
//! let mut state = FigureState::default();
//! state.apply_transform(Transform::Translate { dx: 3.0, dy: -3.0 })?;
//! assert_eq!(state.transformed().corners()[0], Point::new(-5, -5));
//!
//! let fb = render_state(&state)?;
//! let png = PngEncoder::to_bytes(&fb)?;
//! assert!(!png.is_empty());
//! # Ok::<(), pixel_raster::Error>(())
//! ```
//!
//! ## References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
//! - Foley, J. D. et al. (1990). *Computer Graphics: Principles and Practice*, ch. 3 and 5.

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types and hex conversions.
pub mod color;

/// Display configuration (colors, canvas size, scale).
pub mod config;

/// Points and segments on the pixel grid.
pub mod geometry;

/// Closed polygonal figures.
pub mod figure;

/// Line rasterization algorithms.
pub mod raster;

/// Homogeneous 2D affine transforms.
pub mod transform;

/// Observable figure and line state.
pub mod state;

// ============================================================================
// Rendering Modules
// ============================================================================

/// RGBA framebuffer.
pub mod framebuffer;

/// Viewport mapping and pixel painting.
pub mod render;

/// Output encoders (PNG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for pixel-raster operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use pixel_raster::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::DisplayConfig;
    pub use crate::error::{Error, Result};
    pub use crate::figure::Figure;
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::{Point, Segment};
    pub use crate::output::PngEncoder;
    pub use crate::raster::{rasterize, LineAlgorithm, Rasterize};
    pub use crate::render::{format_pixel_list, render_pixels, render_state, Viewport};
    pub use crate::state::{FigureState, LineState, ObserverId, SharedFigureState};
    pub use crate::transform::{Affine, ReflectionLine, Transform, TransformParams};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_end_to_end() {
        let mut state = FigureState::default();
        state
            .apply_transform(Transform::Reflect(ReflectionLine::YAxis))
            .unwrap();
        assert_eq!(state.transformed().corners()[0], Point::new(8, -2));

        let text = format_pixel_list(&state.active_pixels()[..2]);
        assert_eq!(text, "(8, -2);(7, -2);");
    }
}
