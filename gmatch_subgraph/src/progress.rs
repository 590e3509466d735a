use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::mapping::Mapping;
use crate::observe::Observer;

/// Live counters of a running search, shareable across threads.
#[derive(Debug, Default)]
pub struct Progress {
    extensions: AtomicUsize,
    backtracks: AtomicUsize,
    solutions: AtomicUsize,
}

/// Point-in-time copy of [`Progress`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    /// States created by extension.
    pub extensions: usize,
    /// Backtracks performed.
    pub backtracks: usize,
    /// Mappings reported to the caller.
    pub solutions: usize,
}

impl Progress {
    /// All counters at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            extensions: AtomicUsize::new(0),
            backtracks: AtomicUsize::new(0),
            solutions: AtomicUsize::new(0),
        }
    }

    /// Count one extension.
    pub fn record_extension(&self) {
        self.extensions.fetch_add(1, Ordering::Relaxed);
    }

    /// Count one backtrack.
    pub fn record_backtrack(&self) {
        self.backtracks.fetch_add(1, Ordering::Relaxed);
    }

    /// Count `n` reported mappings.
    pub fn record_solutions(&self, n: usize) {
        self.solutions.fetch_add(n, Ordering::Relaxed);
    }

    /// Read every counter.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            extensions: self.extensions.load(Ordering::Relaxed),
            backtracks: self.backtracks.load(Ordering::Relaxed),
            solutions: self.solutions.load(Ordering::Relaxed),
        }
    }
}

impl<P, T> Observer<P, T> for &Progress
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    fn on_new_state(&mut self, _mapping: &Mapping<P, T>, _pattern: P, _target: T) {
        self.record_extension();
    }

    fn on_backtrack(&mut self, _mapping: &Mapping<P, T>, _pattern: P, _target: T) {
        self.record_backtrack();
    }
}
