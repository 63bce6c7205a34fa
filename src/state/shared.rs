//! Thread-safe handle to a [`FigureState`].

use std::sync::{Arc, Mutex, MutexGuard};

use super::{FigureState, ObserverId};
use crate::error::{Error, Result};
use crate::geometry::Point;
use crate::transform::Transform;

/// Cloneable handle to one [`FigureState`].
///
/// Every call holds the lock across compute, commit and notify, so other
/// handles never observe a half-applied update. Observers must not call back
/// into the same handle.
#[derive(Debug, Clone, Default)]
pub struct SharedFigureState {
    inner: Arc<Mutex<FigureState>>,
}

impl SharedFigureState {
    /// Wrap `state` for sharing.
    #[must_use]
    pub fn new(state: FigureState) -> Self {
        Self { inner: Arc::new(Mutex::new(state)) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, FigureState>> {
        self.inner.lock().map_err(|_| Error::StatePoisoned)
    }

    /// Read the state under the lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatePoisoned`] if an earlier holder panicked.
    pub fn with<R>(&self, f: impl FnOnce(&FigureState) -> R) -> Result<R> {
        Ok(f(&*self.lock()?))
    }

    /// Mutate the state under the lock.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatePoisoned`], or whatever `f` returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut FigureState) -> Result<R>) -> Result<R> {
        f(&mut *self.lock()?)
    }

    /// See [`FigureState::apply_transform`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatePoisoned`] or the transform's error.
    pub fn apply_transform(&self, transform: Transform) -> Result<()> {
        self.update(|state| state.apply_transform(transform))
    }

    /// See [`FigureState::reset_transform`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatePoisoned`].
    pub fn reset_transform(&self) -> Result<()> {
        self.update(|state| {
            state.reset_transform();
            Ok(())
        })
    }

    /// Snapshot of the current pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatePoisoned`].
    pub fn active_pixels(&self) -> Result<Vec<Point>> {
        self.with(|state| state.active_pixels().to_vec())
    }

    /// See [`FigureState::subscribe`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StatePoisoned`].
    pub fn subscribe<F>(&self, observer: F) -> Result<ObserverId>
    where
        F: FnMut(&FigureState) + Send + 'static,
    {
        self.update(|state| Ok(state.subscribe(observer)))
    }
}

impl From<FigureState> for SharedFigureState {
    fn from(state: FigureState) -> Self {
        Self::new(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_updates_from_many_threads() {
        let shared = SharedFigureState::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        shared
            .subscribe(move |state: &FigureState| {
                let fresh = state.transformed().active_pixels(state.algorithm());
                assert_eq!(state.active_pixels(), fresh.as_slice());
                c.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..5 {
                        shared.apply_transform(Transform::Translate { dx: 1.0, dy: 0.0 }).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(calls.load(Ordering::SeqCst), 20);
        let first = shared.with(|s| s.transformed().corners()[0]).unwrap();
        assert_eq!(first, Point::new(12, -2));
    }

    #[test]
    fn test_reset_and_snapshot() {
        let shared = SharedFigureState::from(FigureState::default());
        let before = shared.active_pixels().unwrap();

        shared.apply_transform(Transform::Rotate { degrees: 90.0 }).unwrap();
        assert_ne!(shared.active_pixels().unwrap(), before);

        shared.reset_transform().unwrap();
        assert_eq!(shared.active_pixels().unwrap(), before);
    }

    #[test]
    fn test_poisoned_lock_reported() {
        let shared = SharedFigureState::default();
        let clone = shared.clone();
        let _ = thread::spawn(move || {
            let _guard = clone.inner.lock().unwrap();
            panic!("observer panicked");
        })
        .join();

        assert!(matches!(shared.active_pixels(), Err(Error::StatePoisoned)));
    }
}
