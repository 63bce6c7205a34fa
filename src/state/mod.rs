//! Observable state for interactive editing.
//!
//! Each state object owns its observers. Setters recompute every derived field
//! first, commit them together, and only then notify observers in registration
//! order. A setter that fails leaves the state untouched and notifies nobody.

mod figure_state;
mod line_state;
mod shared;

pub use figure_state::FigureState;
pub use line_state::LineState;
pub use shared::SharedFigureState;

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Callback invoked after each committed change.
pub type Observer<S> = Box<dyn FnMut(&S) + Send>;

/// Registration-ordered observer list.
pub(crate) struct Observers<S> {
    next_id: u64,
    entries: Vec<(ObserverId, Observer<S>)>,
}

impl<S> Default for Observers<S> {
    fn default() -> Self {
        Self { next_id: 0, entries: Vec::new() }
    }
}

impl<S> Observers<S> {
    pub(crate) fn subscribe(&mut self, observer: Observer<S>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, state: &S) {
        for (_, observer) in &mut self.entries {
            observer(state);
        }
    }
}
