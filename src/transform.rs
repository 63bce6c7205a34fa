//! Affine transforms in homogeneous coordinates.
//!
//! Points are lifted to `[x, y, 1]` and multiplied by a 3×3 matrix. All
//! intermediate math stays real-valued; rounding back to the grid happens
//! once, per axis, after the full product.
//!
//! Elementary matrices compose by left-multiplication: `b.then(a)` means
//! "apply `b`, then `a`" and equals the matrix product `a · b`.

use std::fmt;
use std::ops::Mul;

use glam::{DMat3, DVec2, DVec3};

use crate::error::{Error, Result};
use crate::geometry::Point;

/// Tolerance used when checking that a matrix keeps the affine bottom row.
const AFFINE_EPSILON: f64 = 1e-12;

/// A 2D affine transform stored as a homogeneous 3×3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine(DMat3);

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Self = Self(DMat3::IDENTITY);

    /// Wrap a raw matrix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any entry is non-finite or the
    /// bottom row is not `[0, 0, 1]`.
    pub fn from_matrix(matrix: DMat3) -> Result<Self> {
        if !matrix.is_finite() {
            return Err(Error::InvalidParameter("matrix has non-finite entries".to_string()));
        }
        let bottom = matrix.row(2);
        if !bottom.abs_diff_eq(DVec3::Z, AFFINE_EPSILON) {
            return Err(Error::InvalidParameter(format!(
                "matrix bottom row must be [0, 0, 1], got [{}, {}, {}]",
                bottom.x, bottom.y, bottom.z
            )));
        }
        Ok(Self(matrix))
    }

    /// Translation by `(dx, dy)`.
    #[must_use]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self(DMat3::from_translation(DVec2::new(dx, dy)))
    }

    /// Counter-clockwise rotation about the origin, in degrees.
    #[must_use]
    pub fn rotation(degrees: f64) -> Self {
        Self(DMat3::from_angle(degrees.to_radians()))
    }

    /// Axis-aligned scaling; `(1, 1)` is the identity.
    #[must_use]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self(DMat3::from_diagonal(DVec3::new(sx, sy, 1.0)))
    }

    /// Shear by angles in degrees: `x' = x + tan(shx)·y`, `y' = tan(shy)·x + y`.
    #[must_use]
    pub fn shear(shx_degrees: f64, shy_degrees: f64) -> Self {
        let shx = shx_degrees.to_radians().tan();
        let shy = shy_degrees.to_radians().tan();
        Self(DMat3::from_cols(DVec3::new(1.0, shy, 0.0), DVec3::new(shx, 1.0, 0.0), DVec3::Z))
    }

    /// Mirror across the vertical axis `x = 0`.
    #[must_use]
    pub fn reflection_y_axis() -> Self {
        Self(DMat3::from_diagonal(DVec3::new(-1.0, 1.0, 1.0)))
    }

    /// Mirror across the horizontal axis `y = 0`.
    #[must_use]
    pub fn reflection_x_axis() -> Self {
        Self(DMat3::from_diagonal(DVec3::new(1.0, -1.0, 1.0)))
    }

    /// Mirror across a reflection line.
    ///
    /// For `y = m·x + t` the line is shifted onto the origin, rotated onto the
    /// x-axis, mirrored, and both steps are undone through their inverses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a non-finite slope or intercept.
    pub fn reflection(line: ReflectionLine) -> Result<Self> {
        match line {
            ReflectionLine::YAxis => Ok(Self::reflection_y_axis()),
            ReflectionLine::Line { slope, intercept } => {
                let slope = finite("reflection slope", slope)?;
                let intercept = finite("reflection intercept", intercept)?;

                let to_origin = DMat3::from_translation(DVec2::new(0.0, -intercept));
                let onto_x_axis = DMat3::from_angle(-slope.atan());

                let mirrored = onto_x_axis.inverse()
                    * Self::reflection_x_axis().0
                    * onto_x_axis;
                Ok(Self(to_origin.inverse() * mirrored * to_origin))
            }
        }
    }

    /// Apply `self`, then `next`.
    #[must_use]
    pub fn then(self, next: Self) -> Self {
        Self(next.0 * self.0)
    }

    /// The underlying matrix.
    #[must_use]
    pub const fn matrix(&self) -> DMat3 {
        self.0
    }

    /// Row-major entries, for display.
    #[must_use]
    pub fn to_rows(&self) -> [[f64; 3]; 3] {
        self.0.transpose().to_cols_array_2d()
    }

    /// Whether this is the identity within `epsilon`.
    #[must_use]
    pub fn is_identity(&self, epsilon: f64) -> bool {
        self.0.abs_diff_eq(DMat3::IDENTITY, epsilon)
    }

    /// Transform a grid point and round the result back onto the grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a coordinate is not finite or
    /// does not fit an `i32`.
    pub fn apply(&self, point: Point) -> Result<Point> {
        let v = self.0.mul_vec3(DVec3::from(point.to_homogeneous()));
        Ok(Point::new(to_grid(v.x)?, to_grid(v.y)?))
    }

    /// Transform every point, failing on the first unrepresentable one.
    ///
    /// # Errors
    ///
    /// See [`Affine::apply`].
    pub fn apply_all(&self, points: &[Point]) -> Result<Vec<Point>> {
        points.iter().map(|&p| self.apply(p)).collect()
    }
}

impl Mul for Affine {
    type Output = Self;

    /// Matrix product: `(a * b)` applies `b` first.
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl fmt::Display for Affine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "[{:>9.4} {:>9.4} {:>9.4}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

/// A line to mirror figures across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReflectionLine {
    /// The line `y = slope·x + intercept`.
    Line {
        /// Slope `m`.
        slope: f64,
        /// Y-intercept `t`.
        intercept: f64,
    },
    /// The vertical axis `x = 0`.
    YAxis,
}

impl ReflectionLine {
    /// The horizontal axis `y = 0`.
    pub const X_AXIS: Self = Self::Line { slope: 0.0, intercept: 0.0 };

    /// The line `y = slope·x + intercept`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if either value is not finite; a
    /// vertical line has no slope.
    pub fn line(slope: f64, intercept: f64) -> Result<Self> {
        Ok(Self::Line {
            slope: finite("reflection slope", slope)?,
            intercept: finite("reflection intercept", intercept)?,
        })
    }

    /// The line through two grid points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the points coincide, or if the
    /// line is vertical anywhere other than `x = 0`.
    pub fn through(a: Point, b: Point) -> Result<Self> {
        if a == b {
            return Err(Error::InvalidParameter(format!(
                "reflection axis through {a} and {b} has zero length"
            )));
        }
        if a.x == b.x {
            if a.x == 0 {
                return Ok(Self::YAxis);
            }
            return Err(Error::InvalidParameter(format!(
                "vertical reflection line x = {} has no slope",
                a.x
            )));
        }

        let slope = (f64::from(b.y) - f64::from(a.y)) / (f64::from(b.x) - f64::from(a.x));
        let intercept = f64::from(a.y) - slope * f64::from(a.x);
        Self::line(slope, intercept)
    }
}

/// One user-requested transform step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    /// Move by `(dx, dy)`.
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// Rotate counter-clockwise about the origin.
    Rotate {
        /// Angle in degrees.
        degrees: f64,
    },
    /// Scale about the origin.
    Scale {
        /// Horizontal factor.
        sx: f64,
        /// Vertical factor.
        sy: f64,
    },
    /// Shear by angles.
    Shear {
        /// Horizontal shear angle in degrees.
        shx_degrees: f64,
        /// Vertical shear angle in degrees.
        shy_degrees: f64,
    },
    /// Mirror across a line.
    Reflect(ReflectionLine),
    /// An arbitrary precomputed matrix.
    Matrix(Affine),
    /// Discard all accumulated transforms.
    Reset,
}

impl Transform {
    /// The elementary matrix for this step. `Reset` maps to the identity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for non-finite values, shear angles
    /// at an odd multiple of 90°, or an invalid reflection line.
    pub fn matrix(&self) -> Result<Affine> {
        match *self {
            Self::Translate { dx, dy } => Ok(Affine::translation(
                finite("translation dx", dx)?,
                finite("translation dy", dy)?,
            )),
            Self::Rotate { degrees } => Ok(Affine::rotation(finite("rotation", degrees)?)),
            Self::Scale { sx, sy } => {
                Ok(Affine::scale(finite("scale sx", sx)?, finite("scale sy", sy)?))
            }
            Self::Shear { shx_degrees, shy_degrees } => Ok(Affine::shear(
                shear_angle("shear x", shx_degrees)?,
                shear_angle("shear y", shy_degrees)?,
            )),
            Self::Reflect(line) => Affine::reflection(line),
            Self::Matrix(affine) => Affine::from_matrix(affine.matrix()),
            Self::Reset => Ok(Affine::IDENTITY),
        }
    }

    /// Fold this step into an accumulated transform.
    ///
    /// `Reset` discards `current`; every other step left-multiplies it.
    ///
    /// # Errors
    ///
    /// See [`Transform::matrix`].
    pub fn accumulate(&self, current: Affine) -> Result<Affine> {
        match self {
            Self::Reset => Ok(Affine::IDENTITY),
            step => Ok(current.then(step.matrix()?)),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translate { dx, dy } => write!(f, "translate({dx}, {dy})"),
            Self::Rotate { degrees } => write!(f, "rotate({degrees}°)"),
            Self::Scale { sx, sy } => write!(f, "scale({sx}, {sy})"),
            Self::Shear { shx_degrees, shy_degrees } => {
                write!(f, "shear({shx_degrees}°, {shy_degrees}°)")
            }
            Self::Reflect(ReflectionLine::YAxis) => f.write_str("reflect(x = 0)"),
            Self::Reflect(ReflectionLine::Line { slope, intercept }) => {
                write!(f, "reflect(y = {slope}·x + {intercept})")
            }
            Self::Matrix(_) => f.write_str("matrix"),
            Self::Reset => f.write_str("reset"),
        }
    }
}

/// Every transform parameter at once, rebuilt into a single matrix.
///
/// The composite applies scale, then shear, then rotation, then translation,
/// and finally the optional reflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Horizontal translation.
    pub dx: f64,
    /// Vertical translation.
    pub dy: f64,
    /// Counter-clockwise rotation in degrees.
    pub rotation_degrees: f64,
    /// Horizontal scale factor.
    pub sx: f64,
    /// Vertical scale factor.
    pub sy: f64,
    /// Horizontal shear angle in degrees.
    pub shx_degrees: f64,
    /// Vertical shear angle in degrees.
    pub shy_degrees: f64,
    /// Reflection applied last, if enabled.
    pub reflection: Option<ReflectionLine>,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            dx: 0.0,
            dy: 0.0,
            rotation_degrees: 0.0,
            sx: 1.0,
            sy: 1.0,
            shx_degrees: 0.0,
            shy_degrees: 0.0,
            reflection: None,
        }
    }
}

impl TransformParams {
    /// Identity parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the translation.
    #[must_use]
    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    /// Set the rotation angle.
    #[must_use]
    pub fn rotate(mut self, degrees: f64) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    /// Set the scale factors.
    #[must_use]
    pub fn scale(mut self, sx: f64, sy: f64) -> Self {
        self.sx = sx;
        self.sy = sy;
        self
    }

    /// Set the shear angles.
    #[must_use]
    pub fn shear(mut self, shx_degrees: f64, shy_degrees: f64) -> Self {
        self.shx_degrees = shx_degrees;
        self.shy_degrees = shy_degrees;
        self
    }

    /// Enable or disable the reflection.
    #[must_use]
    pub fn reflect(mut self, line: Option<ReflectionLine>) -> Self {
        self.reflection = line;
        self
    }

    /// Rebuild the composite matrix from the current values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any parameter is invalid; see
    /// [`Transform::matrix`].
    pub fn matrix(&self) -> Result<Affine> {
        let steps = [
            Transform::Scale { sx: self.sx, sy: self.sy },
            Transform::Shear { shx_degrees: self.shx_degrees, shy_degrees: self.shy_degrees },
            Transform::Rotate { degrees: self.rotation_degrees },
            Transform::Translate { dx: self.dx, dy: self.dy },
        ];

        let mut composite = Affine::IDENTITY;
        for step in &steps {
            composite = step.accumulate(composite)?;
        }
        if let Some(line) = self.reflection {
            composite = Transform::Reflect(line).accumulate(composite)?;
        }
        Ok(composite)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!("{name} must be finite, got {value}")))
    }
}

fn shear_angle(name: &str, degrees: f64) -> Result<f64> {
    let degrees = finite(name, degrees)?;
    if (degrees.rem_euclid(180.0) - 90.0).abs() < 1e-9 {
        return Err(Error::InvalidParameter(format!(
            "{name} angle {degrees}° has an unbounded tangent"
        )));
    }
    Ok(degrees)
}

fn to_grid(value: f64) -> Result<i32> {
    let rounded = value.round_ties_even();
    if rounded.is_finite() && rounded >= f64::from(i32::MIN) && rounded <= f64::from(i32::MAX) {
        Ok(rounded as i32)
    } else {
        Err(Error::InvalidParameter(format!("transformed coordinate {value} is off the grid")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rows_eq(actual: Affine, expected: [[f64; 3]; 3]) {
        let rows = actual.to_rows();
        for r in 0..3 {
            for c in 0..3 {
                assert_abs_diff_eq!(rows[r][c], expected[r][c], epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_translation_matrix() {
        assert_rows_eq(
            Affine::translation(3.0, -3.0),
            [[1.0, 0.0, 3.0], [0.0, 1.0, -3.0], [0.0, 0.0, 1.0]],
        );
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let r = Affine::rotation(90.0);
        assert_eq!(r.apply(Point::new(1, 0)).unwrap(), Point::new(0, 1));
        assert_eq!(r.apply(Point::new(0, 1)).unwrap(), Point::new(-1, 0));
    }

    #[test]
    fn test_scale_point() {
        let s = Transform::Scale { sx: 2.0, sy: 1.0 }.matrix().unwrap();
        assert_eq!(s.apply(Point::new(3, 4)).unwrap(), Point::new(6, 4));
    }

    #[test]
    fn test_shear_matrix_uses_tangent() {
        let sh = Affine::shear(45.0, 0.0);
        assert_rows_eq(sh, [[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(sh.apply(Point::new(0, 3)).unwrap(), Point::new(3, 3));
    }

    #[test]
    fn test_shear_at_right_angle_rejected() {
        for deg in [90.0, -90.0, 270.0] {
            let result = Transform::Shear { shx_degrees: deg, shy_degrees: 0.0 }.matrix();
            assert!(matches!(result, Err(Error::InvalidParameter(_))), "{deg}");
        }
        assert!(Transform::Shear { shx_degrees: 0.0, shy_degrees: 180.0 }.matrix().is_ok());
    }

    #[test]
    fn test_reflection_across_diagonal() {
        let m = Affine::reflection(ReflectionLine::line(1.0, 0.0).unwrap()).unwrap();
        assert_rows_eq(m, [[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
    }

    #[test]
    fn test_reflection_across_offset_line() {
        let m = Affine::reflection(ReflectionLine::line(1.0, 2.0).unwrap()).unwrap();
        assert_eq!(m.apply(Point::new(0, 0)).unwrap(), Point::new(-2, 2));
        // Points on the line stay put
        assert_eq!(m.apply(Point::new(3, 5)).unwrap(), Point::new(3, 5));
    }

    #[test]
    fn test_reflection_x_axis_line() {
        let m = Affine::reflection(ReflectionLine::X_AXIS).unwrap();
        assert_eq!(m.apply(Point::new(4, 7)).unwrap(), Point::new(4, -7));
    }

    #[test]
    fn test_reflection_y_axis_twice_is_identity() {
        let m = Affine::reflection_y_axis();
        assert_eq!(m.apply(Point::new(5, -2)).unwrap(), Point::new(-5, -2));
        assert!(m.then(m).is_identity(1e-12));
    }

    #[test]
    fn test_vertical_reflection_line_rejected() {
        assert!(matches!(ReflectionLine::line(f64::INFINITY, 0.0), Err(Error::InvalidParameter(_))));
        let raw = ReflectionLine::Line { slope: f64::NAN, intercept: 0.0 };
        assert!(matches!(Affine::reflection(raw), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_reflection_line_through_points() {
        let line = ReflectionLine::through(Point::new(0, 1), Point::new(2, 5)).unwrap();
        assert_eq!(line, ReflectionLine::Line { slope: 2.0, intercept: 1.0 });
        assert_eq!(
            ReflectionLine::through(Point::new(0, -3), Point::new(0, 4)).unwrap(),
            ReflectionLine::YAxis
        );
        assert!(matches!(
            ReflectionLine::through(Point::new(2, -3), Point::new(2, 4)),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            ReflectionLine::through(Point::new(1, 1), Point::new(1, 1)),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_then_is_left_multiplication() {
        let t = Affine::translation(10.0, 0.0);
        let r = Affine::rotation(90.0);
        let p = Point::new(1, 0);
        // translate then rotate: (11, 0) -> (0, 11)
        assert_eq!(t.then(r).apply(p).unwrap(), Point::new(0, 11));
        // rotate then translate: (0, 1) -> (10, 1)
        assert_eq!(r.then(t).apply(p).unwrap(), Point::new(10, 1));
        assert_eq!(t.then(r), r * t);
    }

    #[test]
    fn test_accumulate_and_reset() {
        let m = Transform::Translate { dx: 1.0, dy: 2.0 }.accumulate(Affine::IDENTITY).unwrap();
        let m = Transform::Scale { sx: 2.0, sy: 2.0 }.accumulate(m).unwrap();
        assert_eq!(m.apply(Point::new(0, 0)).unwrap(), Point::new(2, 4));
        assert_eq!(Transform::Reset.accumulate(m).unwrap(), Affine::IDENTITY);
    }

    #[test]
    fn test_non_finite_parameters_rejected() {
        assert!(Transform::Translate { dx: f64::NAN, dy: 0.0 }.matrix().is_err());
        assert!(Transform::Rotate { degrees: f64::INFINITY }.matrix().is_err());
        assert!(Transform::Scale { sx: 1.0, sy: f64::NEG_INFINITY }.matrix().is_err());
    }

    #[test]
    fn test_apply_off_grid_rejected() {
        let huge = Affine::scale(1e12, 1.0);
        assert!(matches!(huge.apply(Point::new(10, 0)), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn test_from_matrix_rejects_projective_matrix() {
        let projective = DMat3::from_cols(DVec3::new(1.0, 0.0, 0.5), DVec3::Y, DVec3::Z);
        assert!(Affine::from_matrix(projective).is_err());
        let ok = Affine::from_matrix(DMat3::from_cols(
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::Y,
            DVec3::new(1.0, 0.0, 1.0),
        ))
        .unwrap();
        assert_eq!(ok.apply(Point::new(3, 4)).unwrap(), Point::new(7, 4));
    }

    #[test]
    fn test_params_default_is_identity() {
        assert!(TransformParams::default().matrix().unwrap().is_identity(1e-12));
    }

    #[test]
    fn test_params_order_scale_before_translate() {
        let m = TransformParams::new().translate(1.0, 0.0).scale(3.0, 1.0).matrix().unwrap();
        // scale first: (2, 0) -> (6, 0) -> (7, 0)
        assert_eq!(m.apply(Point::new(2, 0)).unwrap(), Point::new(7, 0));
    }

    #[test]
    fn test_params_reflection_applied_last() {
        let m = TransformParams::new()
            .translate(2.0, 0.0)
            .reflect(Some(ReflectionLine::YAxis))
            .matrix()
            .unwrap();
        assert_eq!(m.apply(Point::new(1, 1)).unwrap(), Point::new(-3, 1));
    }

    #[test]
    fn test_transform_display() {
        assert_eq!(Transform::Translate { dx: 3.0, dy: -3.0 }.to_string(), "translate(3, -3)");
        assert_eq!(Transform::Reflect(ReflectionLine::YAxis).to_string(), "reflect(x = 0)");
    }
}
