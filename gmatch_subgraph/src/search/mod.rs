//! Depth-first search driver over any [`SearchState`].
//!
//! The driver owns no mapping of its own: it extends the state, recurses and
//! backtracks, calling `backtrack` exactly once per successful `new_state`,
//! in reverse order, including while unwinding after a visitor stop.

use tracing::{debug, info};

use crate::state::{SearchState, StateError};
use crate::visitor::Visitor;

/// Which states are handed to the visitor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VisitPolicy {
    /// Only goal states (complete mappings).
    #[default]
    Goals,
    /// Every leaf: goal states and states with no feasible extension.
    Leaves,
}

/// Counters of one finished search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Successful `new_state` calls.
    pub states_created: usize,
    /// Successful `backtrack` calls.
    pub backtracks: usize,
    /// Goal states visited.
    pub goals: usize,
    /// Leaf states visited, goals included, under [`VisitPolicy::Leaves`].
    pub leaves: usize,
    /// Whether the visitor requested a stop.
    pub stopped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

struct Driver<'v, V> {
    visitor: &'v mut V,
    policy: VisitPolicy,
    outcome: SearchOutcome,
}

/// Explore every extension of `state`, visiting per `policy`.
///
/// The state is returned to the mapping it had on entry, whether the search
/// ran to exhaustion or was stopped by the visitor.
///
/// # Errors
/// Propagates [`StateError`] from the state; this only happens when a state
/// breaks its own contract.
pub fn search<S, V>(
    state: &mut S,
    visitor: &mut V,
    policy: VisitPolicy,
) -> Result<SearchOutcome, StateError>
where
    S: SearchState,
    V: Visitor<S::Pattern, S::Target>,
{
    info!(
        pattern_size = state.pattern_size(),
        depth = state.mapping_size(),
        ?policy,
        "search start"
    );

    let mut driver = Driver {
        visitor,
        policy,
        outcome: SearchOutcome::default(),
    };
    let flow = driver.explore(state)?;
    driver.outcome.stopped = flow == Flow::Stop;

    info!(
        states = driver.outcome.states_created,
        goals = driver.outcome.goals,
        leaves = driver.outcome.leaves,
        stopped = driver.outcome.stopped,
        "search done"
    );
    Ok(driver.outcome)
}

impl<V> Driver<'_, V> {
    fn explore<S>(&mut self, state: &mut S) -> Result<Flow, StateError>
    where
        S: SearchState,
        V: Visitor<S::Pattern, S::Target>,
    {
        if state.is_goal() {
            self.outcome.goals += 1;
            if self.policy == VisitPolicy::Leaves {
                self.outcome.leaves += 1;
            }
            return Ok(self.visit(state));
        }

        // Phase 1: the candidate sequence is an owned snapshot of `state`.
        let candidates = state.candidates();
        debug!(depth = state.mapping_size(), count = candidates.len(), "candidates");

        // Phase 2: scoped extensions.
        let mut extended = false;
        for (p, t) in candidates {
            if !state.is_feasible(p, t) {
                continue;
            }
            extended = true;
            if self.with_extension(state, p, t)? == Flow::Stop {
                return Ok(Flow::Stop);
            }
        }

        if !extended && self.policy == VisitPolicy::Leaves {
            self.outcome.leaves += 1;
            return Ok(self.visit(state));
        }
        Ok(Flow::Continue)
    }

    /// Extend by `(p, t)`, explore below, then undo the extension even when
    /// the subtree failed or stopped.
    fn with_extension<S>(
        &mut self,
        state: &mut S,
        p: S::Pattern,
        t: S::Target,
    ) -> Result<Flow, StateError>
    where
        S: SearchState,
        V: Visitor<S::Pattern, S::Target>,
    {
        state.new_state(p, t)?;
        self.outcome.states_created += 1;

        let flow = self.explore(state);

        state.backtrack()?;
        self.outcome.backtracks += 1;
        flow
    }

    fn visit<S>(&mut self, state: &S) -> Flow
    where
        S: SearchState,
        V: Visitor<S::Pattern, S::Target>,
    {
        if self.visitor.visit(state.mapping()) {
            debug!(depth = state.mapping_size(), "visitor requested stop");
            Flow::Stop
        } else {
            Flow::Continue
        }
    }
}
