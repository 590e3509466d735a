use std::fmt;

use tracing::trace;

use super::constraints::{edges_consistent, vertices_compatible};
use super::terminal::PairedTerminals;
use super::{SearchState, StateError, ensure_unbound};
use crate::candidates::CandidatePairs;
use crate::config::Semantics;
use crate::graph::Graph;
use crate::mapping::Mapping;
use crate::matcher::{AlwaysMatch, Matcher};

/// Exact matching state in the VF2 style.
///
/// Pattern vertices adjacent to the mapping are matched first, smallest
/// vertex first, against the target frontier; disconnected pattern parts
/// restart from the first unmapped pattern vertex.
pub struct Vf2State<'a, G1, G2, VM = AlwaysMatch, EM = AlwaysMatch>
where
    G1: Graph,
    G2: Graph,
{
    pattern: &'a G1,
    target: &'a G2,
    vertex_matcher: &'a VM,
    edge_matcher: &'a EM,
    semantics: Semantics,
    /// Isomorphism between graphs of different order can never succeed.
    impossible: bool,
    pattern_order: Vec<G1::Vertex>,
    target_order: Vec<G2::Vertex>,
    mapping: Mapping<G1::Vertex, G2::Vertex>,
    terminals: PairedTerminals<G1::Vertex, G2::Vertex>,
}

impl<'a, G1, G2, VM, EM> Vf2State<'a, G1, G2, VM, EM>
where
    G1: Graph,
    G2: Graph,
    VM: Matcher<G1::VertexWeight, G2::VertexWeight>,
    EM: Matcher<G1::EdgeWeight, G2::EdgeWeight>,
{
    /// Root state with an empty mapping.
    pub fn new(
        pattern: &'a G1,
        target: &'a G2,
        vertex_matcher: &'a VM,
        edge_matcher: &'a EM,
        semantics: Semantics,
    ) -> Self {
        let mut pattern_order: Vec<G1::Vertex> = pattern.vertices().collect();
        pattern_order.sort_unstable();
        let mut target_order: Vec<G2::Vertex> = target.vertices().collect();
        target_order.sort_unstable();

        let impossible = semantics == Semantics::Isomorphism
            && pattern.vertex_count() != target.vertex_count();

        Self {
            pattern,
            target,
            vertex_matcher,
            edge_matcher,
            semantics,
            impossible,
            pattern_order,
            target_order,
            mapping: Mapping::new(),
            terminals: PairedTerminals::new(),
        }
    }

    /// Matching semantics of this search.
    pub const fn semantics(&self) -> Semantics {
        self.semantics
    }

    /// Unmapped neighbors of `p` split into (in frontier, outside frontier).
    fn pattern_lookahead(&self, p: G1::Vertex) -> (usize, usize) {
        self.pattern
            .neighbors(p)
            .into_iter()
            .filter(|n| !self.mapping.contains_pattern(n))
            .fold((0, 0), |(term, new), n| {
                if self.terminals.pattern.contains(&n) {
                    (term + 1, new)
                } else {
                    (term, new + 1)
                }
            })
    }

    fn target_lookahead(&self, t: G2::Vertex) -> (usize, usize) {
        self.target
            .neighbors(t)
            .into_iter()
            .filter(|n| !self.mapping.contains_target(n))
            .fold((0, 0), |(term, new), n| {
                if self.terminals.target.contains(&n) {
                    (term + 1, new)
                } else {
                    (term, new + 1)
                }
            })
    }

    fn lookahead_feasible(&self, p: G1::Vertex, t: G2::Vertex) -> bool {
        let (term_p, new_p) = self.pattern_lookahead(p);
        let (term_t, new_t) = self.target_lookahead(t);
        if term_p > term_t {
            return false;
        }
        match self.semantics {
            // New pattern neighbors may still land on frontier targets.
            Semantics::Monomorphism => term_p + new_p <= term_t + new_t,
            Semantics::Induced | Semantics::Isomorphism => new_p <= new_t,
        }
    }
}

impl<G1, G2, VM, EM> SearchState for Vf2State<'_, G1, G2, VM, EM>
where
    G1: Graph,
    G2: Graph,
    VM: Matcher<G1::VertexWeight, G2::VertexWeight>,
    EM: Matcher<G1::EdgeWeight, G2::EdgeWeight>,
{
    type Pattern = G1::Vertex;
    type Target = G2::Vertex;

    fn pattern_size(&self) -> usize {
        self.pattern_order.len()
    }

    fn mapping(&self) -> &Mapping<G1::Vertex, G2::Vertex> {
        &self.mapping
    }

    fn is_goal(&self) -> bool {
        !self.impossible && self.mapping.len() == self.pattern_order.len()
    }

    fn candidates(&self) -> CandidatePairs<G1::Vertex, G2::Vertex> {
        if self.impossible || self.mapping.len() == self.pattern_order.len() {
            return CandidatePairs::empty();
        }

        let frontier_p = self
            .terminals
            .pattern
            .open(|v| self.mapping.contains_pattern(v))
            .min();

        match frontier_p {
            Some(p) => CandidatePairs::left_scalar(
                p,
                self.terminals
                    .target
                    .open(|v| self.mapping.contains_target(v)),
            ),
            None => {
                let Some(p) = self
                    .pattern_order
                    .iter()
                    .copied()
                    .find(|v| !self.mapping.contains_pattern(v))
                else {
                    return CandidatePairs::empty();
                };
                CandidatePairs::left_scalar(
                    p,
                    self.target_order
                        .iter()
                        .copied()
                        .filter(|v| !self.mapping.contains_target(v)),
                )
            }
        }
    }

    fn is_feasible(&self, p: G1::Vertex, t: G2::Vertex) -> bool {
        if self.impossible || self.mapping.contains_pattern(&p) || self.mapping.contains_target(&t)
        {
            return false;
        }
        vertices_compatible(self.pattern, self.target, self.vertex_matcher, p, t)
            && edges_consistent(
                self.pattern,
                self.target,
                self.edge_matcher,
                &self.mapping,
                p,
                t,
                self.semantics.is_induced(),
            )
            && self.lookahead_feasible(p, t)
    }

    fn new_state(&mut self, p: G1::Vertex, t: G2::Vertex) -> Result<(), StateError> {
        ensure_unbound(&self.mapping, p, t)?;
        debug_assert!(self.is_feasible(p, t), "extension ({p:?}, {t:?}) is not feasible");

        self.mapping.put(p, t);
        let depth = self.mapping.len();
        let mapping = &self.mapping;
        self.terminals.push(
            depth,
            self.pattern.neighbors(p),
            self.target.neighbors(t),
            |v| mapping.contains_pattern(v),
            |v| mapping.contains_target(v),
        );
        trace!(depth, pattern = ?p, target = ?t, "vf2 extend");
        Ok(())
    }

    fn backtrack(&mut self) -> Result<(G1::Vertex, G2::Vertex), StateError> {
        let (p, t) = self.mapping.pop().ok_or(StateError::BacktrackPastRoot)?;
        self.terminals.pop();
        trace!(depth = self.mapping.len(), pattern = ?p, target = ?t, "vf2 backtrack");
        Ok((p, t))
    }
}

impl<G1, G2, VM, EM> Clone for Vf2State<'_, G1, G2, VM, EM>
where
    G1: Graph,
    G2: Graph,
{
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern,
            target: self.target,
            vertex_matcher: self.vertex_matcher,
            edge_matcher: self.edge_matcher,
            semantics: self.semantics,
            impossible: self.impossible,
            pattern_order: self.pattern_order.clone(),
            target_order: self.target_order.clone(),
            mapping: self.mapping.clone(),
            terminals: self.terminals.clone(),
        }
    }
}

impl<G1, G2, VM, EM> fmt::Debug for Vf2State<'_, G1, G2, VM, EM>
where
    G1: Graph,
    G2: Graph,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vf2State")
            .field("semantics", &self.semantics)
            .field("mapping", &self.mapping)
            .finish_non_exhaustive()
    }
}
