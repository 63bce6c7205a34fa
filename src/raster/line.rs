//! Line rasterization algorithms.
//!
//! Every variant shares the same short-circuits for vertical, horizontal and
//! perfectly diagonal segments, so the three agree exactly on those inputs and
//! only differ in how they round generic slopes.

use std::fmt;
use std::str::FromStr;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::{Point, Segment};

/// Line rasterization algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineAlgorithm {
    /// Real-valued `y = m·x + b`, rounded per step along the major axis.
    #[serde(alias = "slope_intercept")]
    SlopeIntercept,
    /// Digital differential analyzer: uniform parametric sampling.
    Dda,
    /// Integer-only incremental algorithm with a decision variable.
    #[default]
    Bresenham,
}

impl LineAlgorithm {
    /// All algorithms, in selection order.
    pub const ALL: [Self; 3] = [Self::SlopeIntercept, Self::Dda, Self::Bresenham];

    /// Canonical name of the algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SlopeIntercept => "slope-intercept",
            Self::Dda => "dda",
            Self::Bresenham => "bresenham",
        }
    }
}

impl fmt::Display for LineAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LineAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c.to_ascii_lowercase() })
            .collect();

        match normalized.as_str() {
            "slope-intercept" => Ok(Self::SlopeIntercept),
            "dda" => Ok(Self::Dda),
            "bresenham" => Ok(Self::Bresenham),
            _ => Err(Error::InvalidParameter(format!("unknown line algorithm '{s}'"))),
        }
    }
}

/// Rasterize the segment `start -> end` with the chosen algorithm.
///
/// The result always starts at `start`, ends at `end`, and is 8-connected.
/// A degenerate segment yields the single point.
///
/// # Example
///
/// ```
/// use pixel_raster::geometry::Point;
/// use pixel_raster::raster::{rasterize, LineAlgorithm};
///
/// let pixels = rasterize(LineAlgorithm::Bresenham, Point::new(0, 0), Point::new(10, 5));
/// assert_eq!(pixels.len(), 11);
/// assert_eq!(pixels.last(), Some(&Point::new(10, 5)));
/// ```
#[must_use]
pub fn rasterize(algorithm: LineAlgorithm, start: Point, end: Point) -> Vec<Point> {
    let pixels = match algorithm {
        LineAlgorithm::SlopeIntercept => slope_intercept(start, end),
        LineAlgorithm::Dda => dda(start, end),
        LineAlgorithm::Bresenham => bresenham(start, end),
    };
    trace!("{algorithm}: {start} -> {end} = {} pixels", pixels.len());
    pixels
}

// ============================================================================
// Shared short-circuits
// ============================================================================

/// Pixels for segments every algorithm handles identically, or `None` for a
/// generic slope.
fn axis_aligned_or_diagonal(segment: Segment) -> Option<Vec<Point>> {
    let (dx, dy) = (segment.dx(), segment.dy());
    if dx == 0 {
        Some(straight_vertical(segment))
    } else if dy == 0 {
        Some(straight_horizontal(segment))
    } else if dx.abs() == dy.abs() {
        Some(perfect_diagonal(segment))
    } else {
        None
    }
}

fn straight_vertical(segment: Segment) -> Vec<Point> {
    let x = segment.start.x;
    let y0 = i64::from(segment.start.y);
    let step = segment.dy().signum();
    (0..=segment.dy().abs()).map(|i| Point::new(x, narrow(y0 + i * step))).collect()
}

fn straight_horizontal(segment: Segment) -> Vec<Point> {
    let y = segment.start.y;
    let x0 = i64::from(segment.start.x);
    let step = segment.dx().signum();
    (0..=segment.dx().abs()).map(|i| Point::new(narrow(x0 + i * step), y)).collect()
}

fn perfect_diagonal(segment: Segment) -> Vec<Point> {
    let (x0, y0) = (i64::from(segment.start.x), i64::from(segment.start.y));
    let (sx, sy) = (segment.dx().signum(), segment.dy().signum());
    (0..=segment.dx().abs()).map(|i| grid(x0 + i * sx, y0 + i * sy)).collect()
}

// ============================================================================
// Algorithm 1: Slope-intercept
// ============================================================================

/// Rasterize using the slope-intercept form `y = m·(x − x0) + y0`.
///
/// Shallow segments (`|m| <= 1`) step along x; steep ones step along y and
/// solve for x instead.
#[must_use]
pub fn slope_intercept(start: Point, end: Point) -> Vec<Point> {
    let segment = Segment::new(start, end);
    if let Some(pixels) = axis_aligned_or_diagonal(segment) {
        return pixels;
    }

    let (dx, dy) = (segment.dx(), segment.dy());
    let (x0, y0) = (i64::from(start.x), i64::from(start.y));

    if dy.abs() <= dx.abs() {
        let step = dx.signum();
        (0..=dx.abs())
            .map(|i| {
                let x = x0 + i * step;
                // y0 + dy·(x − x0)/dx over a single division
                let y = round_ratio(
                    i128::from(y0) * i128::from(dx) + i128::from(dy) * i128::from(x - x0),
                    i128::from(dx),
                );
                grid(x, y)
            })
            .collect()
    } else {
        let step = dy.signum();
        (0..=dy.abs())
            .map(|i| {
                let y = y0 + i * step;
                let x = round_ratio(
                    i128::from(x0) * i128::from(dy) + i128::from(dx) * i128::from(y - y0),
                    i128::from(dy),
                );
                grid(x, y)
            })
            .collect()
    }
}

// ============================================================================
// Algorithm 2: Digital differential analyzer
// ============================================================================

/// Rasterize by sampling `max(|dx|, |dy|) + 1` evenly spaced parameters in
/// `[0, 1]` and rounding each interpolated coordinate.
///
/// Each sample is evaluated as `(x0·steps + i·dx) / steps`, which is the same
/// rational whichever end the traversal starts from, so reversing the segment
/// reverses the output.
#[must_use]
pub fn dda(start: Point, end: Point) -> Vec<Point> {
    let segment = Segment::new(start, end);
    if let Some(pixels) = axis_aligned_or_diagonal(segment) {
        return pixels;
    }

    let (dx, dy) = (segment.dx(), segment.dy());
    let (x0, y0) = (i64::from(start.x), i64::from(start.y));
    let steps = dx.abs().max(dy.abs());

    (0..=steps)
        .map(|i| {
            let x = round_ratio(
                i128::from(x0) * i128::from(steps) + i128::from(i) * i128::from(dx),
                i128::from(steps),
            );
            let y = round_ratio(
                i128::from(y0) * i128::from(steps) + i128::from(i) * i128::from(dy),
                i128::from(steps),
            );
            grid(x, y)
        })
        .collect()
}

// ============================================================================
// Algorithm 3: Bresenham
// ============================================================================

/// Rasterize using Bresenham's integer algorithm.
///
/// The segment is normalized so iteration always runs left to right along a
/// shallow major axis; the output is mapped back to the caller's orientation.
///
/// # References
///
/// Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."
#[must_use]
pub fn bresenham(start: Point, end: Point) -> Vec<Point> {
    let segment = Segment::new(start, end);
    if let Some(pixels) = axis_aligned_or_diagonal(segment) {
        return pixels;
    }

    let (mut x0, mut y0) = (i64::from(start.x), i64::from(start.y));
    let (mut x1, mut y1) = (i64::from(end.x), i64::from(end.y));

    // Transpose steep segments so x is the major axis
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }

    let swapped = x0 > x1;
    if swapped {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = x1 - x0;
    let dy = (y1 - y0).abs();
    let ystep = if y0 < y1 { 1 } else { -1 };

    let mut decision = 2 * dy - dx;
    let mut y = y0;
    let mut pixels = Vec::with_capacity(usize::try_from(dx + 1).unwrap_or_default());

    for x in x0..=x1 {
        pixels.push(if steep { grid(y, x) } else { grid(x, y) });

        if decision > 0 {
            y += ystep;
            decision -= 2 * dx;
        }
        decision += 2 * dy;
    }

    if swapped {
        pixels.reverse();
    }
    pixels
}

// ============================================================================
// Helpers
// ============================================================================

/// `num / den` rounded half-to-even.
#[inline]
fn round_ratio(num: i128, den: i128) -> i64 {
    (num as f64 / den as f64).round_ties_even() as i64
}

/// Narrow a coordinate that lies between two `i32` endpoints.
#[inline]
fn narrow(v: i64) -> i32 {
    v as i32
}

#[inline]
fn grid(x: i64, y: i64) -> Point {
    Point::new(narrow(x), narrow(y))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = i32> {
        -200i32..200
    }

    fn point() -> impl Strategy<Value = Point> {
        (coord(), coord()).prop_map(|(x, y)| Point::new(x, y))
    }

    fn algorithm() -> impl Strategy<Value = LineAlgorithm> {
        prop::sample::select(LineAlgorithm::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        /// Output starts at `start` and ends at `end`.
        #[test]
        fn prop_includes_both_endpoints(a in point(), b in point(), algo in algorithm()) {
            let pixels = rasterize(algo, a, b);
            prop_assert_eq!(pixels.first(), Some(&a));
            prop_assert_eq!(pixels.last(), Some(&b));
        }

        /// Consecutive pixels are 8-neighbours.
        #[test]
        fn prop_eight_connected(a in point(), b in point(), algo in algorithm()) {
            let pixels = rasterize(algo, a, b);
            for w in pixels.windows(2) {
                prop_assert!(w[0].is_adjacent(w[1]), "{} -> {} not adjacent", w[0], w[1]);
                prop_assert_ne!(w[0], w[1]);
            }
        }

        /// Exactly one pixel per step along the major axis.
        #[test]
        fn prop_pixel_count_is_major_axis_plus_one(a in point(), b in point(), algo in algorithm()) {
            let pixels = rasterize(algo, a, b);
            let major = a.chebyshev_distance(b) as usize;
            prop_assert_eq!(pixels.len(), major + 1);
        }

        /// Bresenham and DDA are direction symmetric.
        #[test]
        fn prop_direction_symmetry(a in point(), b in point()) {
            for algo in [LineAlgorithm::Bresenham, LineAlgorithm::Dda] {
                let forward = rasterize(algo, a, b);
                let mut backward = rasterize(algo, b, a);
                backward.reverse();
                prop_assert_eq!(&forward, &backward);
            }
        }

        /// All variants agree on axis-aligned and 45° segments.
        #[test]
        fn prop_variants_agree_on_special_cases(a in point(), len in 0i32..100, kind in 0u8..4) {
            let b = match kind {
                0 => Point::new(a.x + len, a.y),
                1 => Point::new(a.x, a.y - len),
                2 => Point::new(a.x + len, a.y + len),
                _ => Point::new(a.x - len, a.y + len),
            };
            let reference = rasterize(LineAlgorithm::Bresenham, a, b);
            prop_assert_eq!(reference.len(), len as usize + 1);
            prop_assert_eq!(&rasterize(LineAlgorithm::Dda, a, b), &reference);
            prop_assert_eq!(&rasterize(LineAlgorithm::SlopeIntercept, a, b), &reference);
        }
    }
}
