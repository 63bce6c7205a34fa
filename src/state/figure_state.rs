//! The figure being transformed, and everything derived from it.

use std::fmt;

use log::{debug, warn};

use super::{ObserverId, Observers};
use crate::color::Rgba;
use crate::config::{self, DisplayConfig};
use crate::error::Result;
use crate::figure::Figure;
use crate::geometry::Point;
use crate::raster::LineAlgorithm;
use crate::transform::{Affine, Transform, TransformParams};

/// A figure, its accumulated transform, and the derived pixels.
///
/// Transforms accumulate: each applied step left-multiplies the running
/// matrix, which is always applied to the original corners. Only
/// [`Transform::Reset`] (or [`FigureState::reset_transform`]) goes back to
/// the identity.
pub struct FigureState {
    original: Figure,
    matrix: Affine,
    history: Vec<Transform>,
    algorithm: LineAlgorithm,
    transformed: Figure,
    active_pixels: Vec<Point>,
    display: DisplayConfig,
    observers: Observers<FigureState>,
}

impl FigureState {
    /// Create a state for `figure` with default display settings.
    #[must_use]
    pub fn new(figure: Figure) -> Self {
        let display = DisplayConfig::default();
        let algorithm = display.algorithm;
        let active_pixels = figure.active_pixels(algorithm);
        Self {
            transformed: figure.clone(),
            original: figure,
            matrix: Affine::IDENTITY,
            history: Vec::new(),
            algorithm,
            active_pixels,
            display,
            observers: Observers::default(),
        }
    }

    /// Create a state with explicit display settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `display` does not validate.
    pub fn with_display(figure: Figure, display: DisplayConfig) -> Result<Self> {
        display.validate()?;
        let mut state = Self::new(figure);
        state.algorithm = display.algorithm;
        state.active_pixels = state.transformed.active_pixels(state.algorithm);
        state.display = display;
        Ok(state)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The untransformed figure.
    #[must_use]
    pub fn original(&self) -> &Figure {
        &self.original
    }

    /// The figure after the accumulated transform.
    #[must_use]
    pub fn transformed(&self) -> &Figure {
        &self.transformed
    }

    /// The accumulated transform.
    #[must_use]
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    /// Steps applied since the last reset, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Transform] {
        &self.history
    }

    /// Selected line algorithm.
    #[must_use]
    pub fn algorithm(&self) -> LineAlgorithm {
        self.algorithm
    }

    /// Pixels of the transformed figure.
    #[must_use]
    pub fn active_pixels(&self) -> &[Point] {
        &self.active_pixels
    }

    /// Display settings.
    #[must_use]
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    // ========================================================================
    // Transform setters
    // ========================================================================

    /// Fold `transform` into the accumulated matrix and recompute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`](crate::Error::InvalidParameter) for an invalid transform or when a
    /// transformed corner leaves the grid. The state is unchanged on error.
    pub fn apply_transform(&mut self, transform: Transform) -> Result<()> {
        let result = transform.accumulate(self.matrix).and_then(|matrix| {
            let transformed = self.original.transformed(&matrix)?;
            Ok((matrix, transformed))
        });

        let (matrix, transformed) = match result {
            Ok(derived) => derived,
            Err(err) => {
                warn!("Rejected {transform}: {err}");
                return Err(err);
            }
        };

        if transform == Transform::Reset {
            self.history.clear();
        } else {
            self.history.push(transform);
        }
        debug!("Update matrix after {transform}:\n{matrix}");
        self.commit(matrix, transformed);
        Ok(())
    }

    /// Apply a whole parameter set as one accumulated step.
    ///
    /// # Errors
    ///
    /// See [`FigureState::apply_transform`].
    pub fn apply_params(&mut self, params: &TransformParams) -> Result<()> {
        let matrix = params.matrix().inspect_err(|err| warn!("Rejected parameters: {err}"))?;
        self.apply_transform(Transform::Matrix(matrix))
    }

    /// Restore the identity transform.
    pub fn reset_transform(&mut self) {
        self.history.clear();
        debug!("Reset matrix to identity");
        self.commit(Affine::IDENTITY, self.original.clone());
    }

    /// Replace the original corners, keeping the accumulated transform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`](crate::Error::InvalidGeometry) for fewer than three corners, or
    /// [`Error::InvalidParameter`](crate::Error::InvalidParameter) if the current transform maps a new corner
    /// off the grid. The state is unchanged on error.
    pub fn set_corners(&mut self, corners: impl Into<Vec<Point>>) -> Result<()> {
        let derived = Figure::new(corners).and_then(|figure| {
            let transformed = figure.transformed(&self.matrix)?;
            Ok((figure, transformed))
        });

        let (figure, transformed) = derived.inspect_err(|err| warn!("Rejected corners: {err}"))?;
        debug!("Update corners: {:?}", figure.corners());
        self.original = figure;
        self.commit(self.matrix, transformed);
        Ok(())
    }

    /// Switch the line algorithm and recompute.
    pub fn set_algorithm(&mut self, algorithm: LineAlgorithm) {
        debug!("Update algorithm: {algorithm}");
        self.algorithm = algorithm;
        self.display.algorithm = algorithm;
        self.commit(self.matrix, self.transformed.clone());
    }

    // ========================================================================
    // Display setters
    // ========================================================================

    /// Set the line color from a hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`](crate::Error::InvalidColor) if `color` is not a hex color.
    pub fn set_line_color(&mut self, color: &str) -> Result<()> {
        let rgba = parse_color(color)?;
        debug!("Update line_color: {rgba}");
        self.display.line_color = color.trim().to_string();
        self.notify();
        Ok(())
    }

    /// Set the background color from a hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`](crate::Error::InvalidColor) if `color` is not a hex color.
    pub fn set_background_color(&mut self, color: &str) -> Result<()> {
        let rgba = parse_color(color)?;
        debug!("Update background_color: {rgba}");
        self.display.background_color = color.trim().to_string();
        self.notify();
        Ok(())
    }

    /// Set the canvas size in logical pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`](crate::Error::InvalidDimensions) if either side is outside
    /// [`config::CANVAS_RANGE`].
    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> Result<()> {
        config::check_canvas(width, height)
            .inspect_err(|err| warn!("Rejected canvas size: {err}"))?;
        debug!("Update canvas size: {width}x{height}");
        self.display.width = width;
        self.display.height = height;
        self.notify();
        Ok(())
    }

    /// Set the display scale (screen pixels per logical pixel).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`](crate::Error::InvalidScale) for a scale outside [`config::SCALE_RANGE`].
    pub fn set_scale(&mut self, scale: u32) -> Result<()> {
        config::check_scale(scale).inspect_err(|err| warn!("Rejected scale: {err}"))?;
        debug!("Update scale: {scale}");
        self.display.scale = scale;
        self.notify();
        Ok(())
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Register an observer, called after every committed change.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&FigureState) + Send + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Call every observer with the current state, in registration order.
    pub fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        observers.notify(self);
        self.observers = observers;
    }

    /// Store derived fields together, then notify.
    fn commit(&mut self, matrix: Affine, transformed: Figure) {
        self.active_pixels = transformed.active_pixels(self.algorithm);
        self.matrix = matrix;
        self.transformed = transformed;
        debug!("Update active_pixels: {} pixels", self.active_pixels.len());
        self.notify();
    }
}

impl Default for FigureState {
    /// The trapezoid `(-8,-2) (5,-2) (5,5) (-5,5)`.
    fn default() -> Self {
        Self::new(Figure::trapezoid(
            Point::new(-8, -2),
            Point::new(5, -2),
            Point::new(5, 5),
            Point::new(-5, 5),
        ))
    }
}

impl fmt::Debug for FigureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FigureState")
            .field("original", &self.original)
            .field("matrix", &self.matrix)
            .field("history", &self.history)
            .field("algorithm", &self.algorithm)
            .field("transformed", &self.transformed)
            .field("active_pixels", &self.active_pixels.len())
            .field("display", &self.display)
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn parse_color(color: &str) -> Result<Rgba> {
    Rgba::from_hex(color).inspect_err(|err| warn!("Rejected color: {err}"))
}
