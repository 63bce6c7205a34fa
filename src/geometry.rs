//! Geometric primitives on the integer pixel grid.
//!
//! Coordinates are logical grid units with the origin at the canvas centre and
//! `y` growing upwards.

use std::fmt;

/// A point on the integer pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
}

impl Point {
    /// Origin point (0, 0).
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point as a homogeneous 3-vector `[x, y, 1]`.
    #[must_use]
    pub fn to_homogeneous(self) -> [f64; 3] {
        [f64::from(self.x), f64::from(self.y), 1.0]
    }

    /// Chebyshev distance, the number of 8-connected steps between two pixels.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// Whether `other` is this pixel or one of its eight neighbours.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        self.chebyshev_distance(other) <= 1
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A line segment between two grid points.
///
/// Either endpoint may come first; rasterization always reports pixels from
/// `start` towards `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Segment {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Create a segment from coordinates.
    #[must_use]
    pub const fn from_coords(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    /// Signed extent along x (`end.x - start.x`).
    #[must_use]
    pub fn dx(&self) -> i64 {
        i64::from(self.end.x) - i64::from(self.start.x)
    }

    /// Signed extent along y (`end.y - start.y`).
    #[must_use]
    pub fn dy(&self) -> i64 {
        i64::from(self.end.y) - i64::from(self.start.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_equality_is_by_value() {
        assert_eq!(Point::new(3, -4), Point::from((3, -4)));
        assert_ne!(Point::new(3, -4), Point::new(-4, 3));
    }

    #[test]
    fn test_point_homogeneous() {
        assert_eq!(Point::new(-2, 7).to_homogeneous(), [-2.0, 7.0, 1.0]);
    }

    #[test]
    fn test_point_display() {
        assert_eq!(Point::new(-8, 5).to_string(), "(-8,5)");
    }

    #[test]
    fn test_point_adjacency() {
        let p = Point::new(0, 0);
        assert!(p.is_adjacent(Point::new(1, -1)));
        assert!(p.is_adjacent(p));
        assert!(!p.is_adjacent(Point::new(2, 0)));
        assert_eq!(p.chebyshev_distance(Point::new(-3, 7)), 7);
    }

    #[test]
    fn test_segment_deltas() {
        let seg = Segment::from_coords(5, -2, -5, 5);
        assert_eq!(seg.dx(), -10);
        assert_eq!(seg.dy(), 7);
        assert_eq!(Segment::from_coords(1, 1, 1, 1).dx(), 0);
    }
}
