//! Rasterization of segments and figures onto the integer pixel grid.
//!
//! # Algorithms
//!
//! - **Slope-intercept**: rounds `y = m·x + b` along the major axis
//! - **DDA**: uniform parametric sampling between the endpoints
//! - **Bresenham's Line**: integer-only decision variable, no float rounding
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod line;

pub use line::{bresenham, dda, rasterize, slope_intercept, LineAlgorithm};

use crate::geometry::{Point, Segment};

/// Trait for primitives that rasterize to a pixel sequence.
pub trait Rasterize {
    /// Pixels covered by this primitive, in traversal order.
    fn pixels(&self, algorithm: LineAlgorithm) -> Vec<Point>;
}

impl Rasterize for Segment {
    fn pixels(&self, algorithm: LineAlgorithm) -> Vec<Point> {
        rasterize(algorithm, self.start, self.end)
    }
}
