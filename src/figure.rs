//! Closed polygonal figures.
//!
//! A [`Figure`] is an ordered list of corners; the last corner connects back to
//! the first. Its pixels are derived on demand and never cached.

use crate::error::{Error, Result};
use crate::geometry::{Point, Segment};
use crate::raster::{LineAlgorithm, Rasterize};
use crate::transform::Affine;

/// Minimum number of corners for a closed figure.
pub const MIN_CORNERS: usize = 3;

/// A closed polygon on the pixel grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Figure {
    corners: Vec<Point>,
}

impl Figure {
    /// Create a figure from its corners in edge order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] with fewer than three corners.
    pub fn new(corners: impl Into<Vec<Point>>) -> Result<Self> {
        let corners = corners.into();
        if corners.len() < MIN_CORNERS {
            return Err(Error::InvalidGeometry { corners: corners.len() });
        }
        Ok(Self { corners })
    }

    /// A four-cornered figure `a → b → c → d → a`.
    #[must_use]
    pub fn trapezoid(a: Point, b: Point, c: Point, d: Point) -> Self {
        Self { corners: vec![a, b, c, d] }
    }

    /// The corners, in declaration order.
    #[must_use]
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    /// Number of corners (and edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.corners.len()
    }

    /// Always `false`; a figure has at least three corners.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.corners.is_empty()
    }

    /// Consecutive corner pairs, wrapping from the last corner to the first.
    #[must_use]
    pub fn edges(&self) -> Vec<Segment> {
        self.corners
            .iter()
            .zip(self.corners.iter().cycle().skip(1))
            .map(|(&start, &end)| Segment::new(start, end))
            .collect()
    }

    /// Pixels of each edge, kept separate.
    #[must_use]
    pub fn edge_pixels(&self, algorithm: LineAlgorithm) -> Vec<Vec<Point>> {
        self.edges().iter().map(|edge| edge.pixels(algorithm)).collect()
    }

    /// All edge pixels concatenated in edge order.
    ///
    /// Shared corners appear once per edge that touches them; the list is not
    /// deduplicated.
    #[must_use]
    pub fn active_pixels(&self, algorithm: LineAlgorithm) -> Vec<Point> {
        self.edges().iter().flat_map(|edge| edge.pixels(algorithm)).collect()
    }

    /// A new figure whose corners are this figure's corners mapped by `matrix`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a transformed corner is off the grid.
    pub fn transformed(&self, matrix: &Affine) -> Result<Self> {
        Ok(Self { corners: matrix.apply_all(&self.corners)? })
    }
}

impl Rasterize for Figure {
    fn pixels(&self, algorithm: LineAlgorithm) -> Vec<Point> {
        self.active_pixels(algorithm)
    }
}

impl TryFrom<Vec<Point>> for Figure {
    type Error = Error;

    fn try_from(corners: Vec<Point>) -> Result<Self> {
        Self::new(corners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::rasterize;

    fn trapezoid() -> Figure {
        Figure::trapezoid(Point::new(-8, -2), Point::new(5, -2), Point::new(5, 5), Point::new(-5, 5))
    }

    #[test]
    fn test_too_few_corners() {
        let err = Figure::new(vec![Point::new(0, 0), Point::new(1, 1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { corners: 2 }));
        assert!(Figure::new(Vec::<Point>::new()).is_err());
    }

    #[test]
    fn test_triangle_is_valid() {
        let fig = Figure::new([Point::new(0, 0), Point::new(4, 0), Point::new(0, 3)]).unwrap();
        assert_eq!(fig.len(), 3);
        assert!(!fig.is_empty());
    }

    #[test]
    fn test_edges_wrap_around() {
        let edges = trapezoid().edges();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], Segment::from_coords(-8, -2, 5, -2));
        assert_eq!(edges[1], Segment::from_coords(5, -2, 5, 5));
        assert_eq!(edges[2], Segment::from_coords(5, 5, -5, 5));
        assert_eq!(edges[3], Segment::from_coords(-5, 5, -8, -2));
    }

    #[test]
    fn test_active_pixels_concatenate_edges() {
        let fig = trapezoid();
        let pixels = fig.active_pixels(LineAlgorithm::Bresenham);

        let expected: Vec<Point> = fig
            .edges()
            .iter()
            .flat_map(|e| rasterize(LineAlgorithm::Bresenham, e.start, e.end))
            .collect();
        assert_eq!(pixels, expected);

        // 14 + 8 + 11 + 8 pixels, corners counted twice
        assert_eq!(pixels.len(), 41);
    }

    #[test]
    fn test_edge_pixels_split_per_edge() {
        let per_edge = trapezoid().edge_pixels(LineAlgorithm::Dda);
        assert_eq!(per_edge.len(), 4);
        assert_eq!(per_edge[0].first(), Some(&Point::new(-8, -2)));
        assert_eq!(per_edge[3].last(), Some(&Point::new(-8, -2)));
    }

    #[test]
    fn test_transformed_keeps_original() {
        let fig = trapezoid();
        let moved = fig.transformed(&Affine::translation(3.0, -3.0)).unwrap();
        assert_eq!(
            moved.corners(),
            &[Point::new(-5, -5), Point::new(8, -5), Point::new(8, 2), Point::new(-2, 2)]
        );
        assert_eq!(fig.corners()[0], Point::new(-8, -2));
    }

    #[test]
    fn test_try_from_vec() {
        let fig: Result<Figure> = vec![Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)].try_into();
        assert!(fig.is_ok());
    }
}
