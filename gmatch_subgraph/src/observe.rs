//! Instrumentation decorator for search states.
//!
//! [`Observed`] forwards every operation to the wrapped state and notifies an
//! [`Observer`] after each extension and each backtrack has been applied.
//! Observers only ever see the mapping by shared reference, so wrapping a
//! state cannot change what a search finds.

use std::hash::Hash;

use tracing::trace;

use crate::candidates::CandidatePairs;
use crate::mapping::Mapping;
use crate::state::{SearchState, StateError};

/// Callbacks fired by [`Observed`].
pub trait Observer<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// `(pattern, target)` was just added; `mapping` already contains it.
    fn on_new_state(&mut self, mapping: &Mapping<P, T>, pattern: P, target: T);

    /// `(pattern, target)` was just removed; `mapping` no longer contains it.
    fn on_backtrack(&mut self, mapping: &Mapping<P, T>, pattern: P, target: T);
}

impl<P, T, O> Observer<P, T> for &mut O
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
    O: Observer<P, T> + ?Sized,
{
    fn on_new_state(&mut self, mapping: &Mapping<P, T>, pattern: P, target: T) {
        (**self).on_new_state(mapping, pattern, target);
    }

    fn on_backtrack(&mut self, mapping: &Mapping<P, T>, pattern: P, target: T) {
        (**self).on_backtrack(mapping, pattern, target);
    }
}

/// Logs every extension and backtrack at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<P, T> Observer<P, T> for TracingObserver
where
    P: Copy + Eq + Hash + std::fmt::Debug,
    T: Copy + Eq + Hash + std::fmt::Debug,
{
    fn on_new_state(&mut self, mapping: &Mapping<P, T>, pattern: P, target: T) {
        trace!(depth = mapping.len(), ?pattern, ?target, "new state");
    }

    fn on_backtrack(&mut self, mapping: &Mapping<P, T>, pattern: P, target: T) {
        trace!(depth = mapping.len(), ?pattern, ?target, "backtrack");
    }
}

/// A state wrapped with an observer.
#[derive(Clone, Debug)]
pub struct Observed<S, O> {
    inner: S,
    observer: O,
}

impl<S, O> Observed<S, O>
where
    S: SearchState,
    O: Observer<S::Pattern, S::Target>,
{
    /// Wrap `inner`, reporting to `observer`.
    pub const fn new(inner: S, observer: O) -> Self {
        Self { inner, observer }
    }

    /// The wrapped state.
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The observer.
    pub const fn observer(&self) -> &O {
        &self.observer
    }

    /// Unwrap into the state and the observer.
    pub fn into_parts(self) -> (S, O) {
        (self.inner, self.observer)
    }
}

impl<S, O> SearchState for Observed<S, O>
where
    S: SearchState,
    O: Observer<S::Pattern, S::Target>,
{
    type Pattern = S::Pattern;
    type Target = S::Target;

    fn pattern_size(&self) -> usize {
        self.inner.pattern_size()
    }

    fn mapping(&self) -> &Mapping<S::Pattern, S::Target> {
        self.inner.mapping()
    }

    fn candidates(&self) -> CandidatePairs<S::Pattern, S::Target> {
        self.inner.candidates()
    }

    fn is_feasible(&self, pattern: S::Pattern, target: S::Target) -> bool {
        self.inner.is_feasible(pattern, target)
    }

    fn new_state(&mut self, pattern: S::Pattern, target: S::Target) -> Result<(), StateError> {
        self.inner.new_state(pattern, target)?;
        self.observer
            .on_new_state(self.inner.mapping(), pattern, target);
        Ok(())
    }

    fn backtrack(&mut self) -> Result<(S::Pattern, S::Target), StateError> {
        let (pattern, target) = self.inner.backtrack()?;
        self.observer
            .on_backtrack(self.inner.mapping(), pattern, target);
        Ok((pattern, target))
    }

    fn mapping_size(&self) -> usize {
        self.inner.mapping_size()
    }

    fn is_goal(&self) -> bool {
        self.inner.is_goal()
    }

    fn is_dead(&self) -> bool {
        self.inner.is_dead()
    }
}
