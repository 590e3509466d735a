use std::fmt;

use tracing::trace;

use super::constraints::{edges_consistent, vertices_compatible};
use super::terminal::PairedTerminals;
use super::{SearchState, StateError, ensure_unbound};
use crate::candidates::CandidatePairs;
use crate::graph::Graph;
use crate::mapping::Mapping;
use crate::matcher::{AlwaysMatch, Matcher};

/// Induced maximum-common-subgraph state.
///
/// Any partial induced common subgraph is a valid result, so the search is
/// driven over leaves rather than goals. Pattern vertices are added in
/// increasing order, which makes every common subgraph reachable along
/// exactly one path. With `connected` set, only extensions through the
/// frontier are offered once the mapping is non-empty; the ordering is then
/// lifted and duplicates are left to set-based collection.
pub struct McsState<'a, G1, G2, VM = AlwaysMatch, EM = AlwaysMatch>
where
    G1: Graph,
    G2: Graph,
{
    pattern: &'a G1,
    target: &'a G2,
    vertex_matcher: &'a VM,
    edge_matcher: &'a EM,
    connected: bool,
    pattern_order: Vec<G1::Vertex>,
    target_order: Vec<G2::Vertex>,
    mapping: Mapping<G1::Vertex, G2::Vertex>,
    terminals: PairedTerminals<G1::Vertex, G2::Vertex>,
}

impl<'a, G1, G2, VM, EM> McsState<'a, G1, G2, VM, EM>
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
        connected: bool,
    ) -> Self {
        let mut pattern_order: Vec<G1::Vertex> = pattern.vertices().collect();
        pattern_order.sort_unstable();
        let mut target_order: Vec<G2::Vertex> = target.vertices().collect();
        target_order.sort_unstable();

        Self {
            pattern,
            target,
            vertex_matcher,
            edge_matcher,
            connected,
            pattern_order,
            target_order,
            mapping: Mapping::new(),
            terminals: PairedTerminals::new(),
        }
    }

    /// Whether results are restricted to connected common subgraphs.
    pub const fn connected(&self) -> bool {
        self.connected
    }

    fn unmapped_targets(&self) -> impl Iterator<Item = G2::Vertex> + '_ {
        self.target_order
            .iter()
            .copied()
            .filter(|v| !self.mapping.contains_target(v))
    }
}

impl<G1, G2, VM, EM> SearchState for McsState<'_, G1, G2, VM, EM>
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

    fn candidates(&self) -> CandidatePairs<G1::Vertex, G2::Vertex> {
        let Some(last) = self.mapping.last_key() else {
            return CandidatePairs::cross(
                self.pattern_order.iter().copied(),
                self.target_order.iter().copied(),
            );
        };

        let target_frontier = || {
            self.terminals
                .target
                .open(|v| self.mapping.contains_target(v))
        };

        if self.connected {
            let mut frontier: Vec<G1::Vertex> = self
                .terminals
                .pattern
                .open(|v| self.mapping.contains_pattern(v))
                .collect();
            frontier.sort_unstable();
            return CandidatePairs::cross(frontier, target_frontier());
        }

        let mut frontier: Vec<G1::Vertex> = self
            .terminals
            .pattern
            .open(|v| self.mapping.contains_pattern(v))
            .filter(|v| *v > last)
            .collect();
        frontier.sort_unstable();

        let detached = self
            .pattern_order
            .iter()
            .copied()
            .filter(|v| *v > last && !self.terminals.pattern.contains(v));
        let outside = self
            .unmapped_targets()
            .filter(|v| !self.terminals.target.contains(v));

        CandidatePairs::sum([
            CandidatePairs::cross(frontier, target_frontier()),
            CandidatePairs::cross(detached, outside),
        ])
    }

    fn is_feasible(&self, p: G1::Vertex, t: G2::Vertex) -> bool {
        if self.mapping.contains_pattern(&p) || self.mapping.contains_target(&t) {
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
                true,
            )
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
        trace!(depth, pattern = ?p, target = ?t, "mcs extend");
        Ok(())
    }

    fn backtrack(&mut self) -> Result<(G1::Vertex, G2::Vertex), StateError> {
        let (p, t) = self.mapping.pop().ok_or(StateError::BacktrackPastRoot)?;
        self.terminals.pop();
        trace!(depth = self.mapping.len(), pattern = ?p, target = ?t, "mcs backtrack");
        Ok((p, t))
    }
}

impl<G1, G2, VM, EM> Clone for McsState<'_, G1, G2, VM, EM>
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
            connected: self.connected,
            pattern_order: self.pattern_order.clone(),
            target_order: self.target_order.clone(),
            mapping: self.mapping.clone(),
            terminals: self.terminals.clone(),
        }
    }
}

impl<G1, G2, VM, EM> fmt::Debug for McsState<'_, G1, G2, VM, EM>
where
    G1: Graph,
    G2: Graph,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("McsState")
            .field("connected", &self.connected)
            .field("mapping", &self.mapping)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AdjGraph, NodeId};

    fn path(n: u32) -> AdjGraph<(), ()> {
        let mut g = AdjGraph::undirected();
        for _ in 0..n {
            g.add_vertex(());
        }
        for i in 1..n {
            g.add_edge(NodeId(i - 1), NodeId(i), ()).unwrap();
        }
        g
    }

    #[test]
    fn root_offers_every_pair() {
        let p = path(2);
        let t = path(3);
        let state = McsState::new(&p, &t, &AlwaysMatch, &AlwaysMatch, false);
        assert_eq!(state.candidates().len(), 6);
        assert!(!state.is_dead());
    }

    #[test]
    fn candidates_split_frontier_from_detached_vertices() {
        let p = path(3);
        let t = path(4);
        let mut state = McsState::new(&p, &t, &AlwaysMatch, &AlwaysMatch, false);
        state.new_state(NodeId(0), NodeId(1)).unwrap();

        // Pattern frontier {1}; vertex 2 is detached. Target frontier {0, 2},
        // outside it only 3 is unmapped.
        let pairs: Vec<_> = state.candidates().into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                (NodeId(1), NodeId(0)),
                (NodeId(1), NodeId(2)),
                (NodeId(2), NodeId(3)),
            ]
        );
    }

    #[test]
    fn ordering_excludes_earlier_pattern_vertices() {
        let p = path(3);
        let t = path(3);
        let mut state = McsState::new(&p, &t, &AlwaysMatch, &AlwaysMatch, false);
        state.new_state(NodeId(1), NodeId(1)).unwrap();

        let pairs: Vec<_> = state.candidates().into_iter().collect();
        assert!(pairs.iter().all(|(p, _)| *p == NodeId(2)));
    }

    #[test]
    fn connected_mode_stays_on_the_frontier() {
        let p = path(3);
        let t = path(3);
        let mut state = McsState::new(&p, &t, &AlwaysMatch, &AlwaysMatch, true);
        state.new_state(NodeId(1), NodeId(0)).unwrap();

        let pairs: Vec<_> = state.candidates().into_iter().collect();
        assert_eq!(pairs, vec![(NodeId(0), NodeId(1)), (NodeId(2), NodeId(1))]);
    }

    #[test]
    fn feasibility_is_induced() {
        let mut p: AdjGraph<(), ()> = AdjGraph::undirected();
        p.add_vertex(());
        p.add_vertex(());
        let t = path(2);
        let mut state = McsState::new(&p, &t, &AlwaysMatch, &AlwaysMatch, false);
        state.new_state(NodeId(0), NodeId(0)).unwrap();
        assert!(!state.is_feasible(NodeId(1), NodeId(1)));
        assert!(state.is_dead());

        assert_eq!(state.backtrack().unwrap(), (NodeId(0), NodeId(0)));
        assert!(state.mapping().is_empty());
    }
}
