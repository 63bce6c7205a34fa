//! A single line edited by clicking its endpoints.

use std::fmt;

use log::debug;

use super::{ObserverId, Observers};
use crate::geometry::Point;
use crate::raster::{rasterize, LineAlgorithm};

/// Endpoints of one line and its pixels.
pub struct LineState {
    start: Point,
    end: Point,
    algorithm: LineAlgorithm,
    active_pixels: Vec<Point>,
    selecting_start: bool,
    observers: Observers<LineState>,
}

impl LineState {
    /// Both endpoints at the origin, Bresenham selected.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoints(Point::ORIGIN, Point::ORIGIN, LineAlgorithm::default())
    }

    /// A line from `start` to `end`.
    #[must_use]
    pub fn with_endpoints(start: Point, end: Point, algorithm: LineAlgorithm) -> Self {
        Self {
            start,
            end,
            algorithm,
            active_pixels: rasterize(algorithm, start, end),
            selecting_start: true,
            observers: Observers::default(),
        }
    }

    /// Start point.
    #[must_use]
    pub fn start(&self) -> Point {
        self.start
    }

    /// End point.
    #[must_use]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Selected algorithm.
    #[must_use]
    pub fn algorithm(&self) -> LineAlgorithm {
        self.algorithm
    }

    /// Pixels from start to end.
    #[must_use]
    pub fn active_pixels(&self) -> &[Point] {
        &self.active_pixels
    }

    /// Whether the next [`LineState::select_point`] sets the start point.
    #[must_use]
    pub fn selecting_start(&self) -> bool {
        self.selecting_start
    }

    /// Move the start point and recompute.
    pub fn set_start_point(&mut self, point: Point) {
        debug!("Update start_point: {point}");
        self.start = point;
        self.recompute();
    }

    /// Move the end point and recompute.
    pub fn set_end_point(&mut self, point: Point) {
        debug!("Update end_point: {point}");
        self.end = point;
        self.recompute();
    }

    /// Switch the algorithm and recompute.
    pub fn set_algorithm(&mut self, algorithm: LineAlgorithm) {
        debug!("Update algorithm: {algorithm}");
        self.algorithm = algorithm;
        self.recompute();
    }

    /// Set the start point and the end point on alternating calls.
    pub fn select_point(&mut self, point: Point) {
        if self.selecting_start {
            self.set_start_point(point);
        } else {
            self.set_end_point(point);
        }
        self.selecting_start = !self.selecting_start;
    }

    /// Register an observer, called after every change.
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&LineState) + Send + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    /// Remove an observer. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Call every observer with the current state.
    pub fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        observers.notify(self);
        self.observers = observers;
    }

    fn recompute(&mut self) {
        self.active_pixels = rasterize(self.algorithm, self.start, self.end);
        debug!("Update active_pixels: {} pixels", self.active_pixels.len());
        self.notify();
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineState")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("algorithm", &self.algorithm)
            .field("active_pixels", &self.active_pixels.len())
            .field("selecting_start", &self.selecting_start)
            .finish_non_exhaustive()
    }
}
