//! The search-state contract and its concrete variants.
//!
//! A state owns the partial mapping of one search. Extending it with
//! [`SearchState::new_state`] and undoing that with [`SearchState::backtrack`]
//! mutate the same mapping in place, so every state "derived" from the root
//! shares it; the LIFO discipline between the two calls is what keeps each
//! logical state intact.

use std::fmt::Debug;
use std::hash::Hash;

use thiserror::Error;

use crate::candidates::CandidatePairs;
use crate::mapping::Mapping;

mod constraints;
mod mcs;
mod terminal;
mod vf2;

pub use mcs::McsState;
pub use terminal::TerminalSet;
pub use vf2::Vf2State;

/// Contract violations surfaced by a state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// `backtrack` was called on the root (empty) mapping.
    #[error("cannot backtrack past the root state: the mapping is empty")]
    BacktrackPastRoot,
    /// `new_state` was asked to bind a pattern vertex that is already bound.
    #[error("pattern vertex {0} is already mapped")]
    PatternVertexBound(String),
    /// `new_state` was asked to bind a target vertex that is already bound.
    #[error("target vertex {0} is already mapped")]
    TargetVertexBound(String),
}

/// The complete surface a search driver needs.
///
/// Goal and dead are predicates over the current mapping. `new_state` does
/// not re-run the feasibility rules outside debug builds; callers check
/// [`SearchState::is_feasible`] first. It does reject already-bound vertices.
pub trait SearchState {
    /// Pattern vertex handle.
    type Pattern: Copy + Eq + Hash + Ord + Debug;
    /// Target vertex handle.
    type Target: Copy + Eq + Hash + Ord + Debug;

    /// Number of pattern vertices; a mapping of this size is a goal.
    fn pattern_size(&self) -> usize;

    /// The live mapping.
    fn mapping(&self) -> &Mapping<Self::Pattern, Self::Target>;

    /// Pairs worth attempting from this state.
    fn candidates(&self) -> CandidatePairs<Self::Pattern, Self::Target>;

    /// Whether `(pattern, target)` may extend the current mapping.
    ///
    /// Pure in `(pattern, target, mapping)`.
    fn is_feasible(&self, pattern: Self::Pattern, target: Self::Target) -> bool;

    /// Extend the mapping by `(pattern, target)`.
    ///
    /// # Errors
    /// [`StateError::PatternVertexBound`] or [`StateError::TargetVertexBound`]
    /// when either side is already mapped.
    fn new_state(
        &mut self,
        pattern: Self::Pattern,
        target: Self::Target,
    ) -> Result<(), StateError>;

    /// Undo the most recent extension and return the removed pair.
    ///
    /// # Errors
    /// [`StateError::BacktrackPastRoot`] when the mapping is empty.
    fn backtrack(&mut self) -> Result<(Self::Pattern, Self::Target), StateError>;

    /// Current mapping size.
    fn mapping_size(&self) -> usize {
        self.mapping().len()
    }

    /// Whether every pattern vertex is mapped.
    fn is_goal(&self) -> bool {
        self.mapping_size() == self.pattern_size()
    }

    /// Not a goal, and no candidate is feasible.
    fn is_dead(&self) -> bool {
        !self.is_goal()
            && !self
                .candidates()
                .into_iter()
                .any(|(p, t)| self.is_feasible(p, t))
    }

    /// Independent copy of the mapping.
    fn snapshot(&self) -> Mapping<Self::Pattern, Self::Target> {
        self.mapping().snapshot()
    }
}

/// Reject pairs whose pattern or target side is already bound.
pub(crate) fn ensure_unbound<P, T>(
    mapping: &Mapping<P, T>,
    pattern: P,
    target: T,
) -> Result<(), StateError>
where
    P: Copy + Eq + Hash + Debug,
    T: Copy + Eq + Hash + Debug,
{
    if mapping.contains_pattern(&pattern) {
        return Err(StateError::PatternVertexBound(format!("{pattern:?}")));
    }
    if mapping.contains_target(&target) {
        return Err(StateError::TargetVertexBound(format!("{target:?}")));
    }
    Ok(())
}
