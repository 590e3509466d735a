//! High-level entry point tying states, driver and visitors together.
//!
//! ```
//! use gmatch_subgraph::{AdjGraph, SubgraphSearch};
//!
//! let mut edge: AdjGraph<(), ()> = AdjGraph::undirected();
//! let a = edge.add_vertex(());
//! let b = edge.add_vertex(());
//! edge.add_edge(a, b, ()).unwrap();
//!
//! let mut path: AdjGraph<(), ()> = AdjGraph::undirected();
//! let v: Vec<_> = (0..3).map(|_| path.add_vertex(())).collect();
//! path.add_edge(v[0], v[1], ()).unwrap();
//! path.add_edge(v[1], v[2], ()).unwrap();
//!
//! let all = SubgraphSearch::new(&edge, &path).enumerate_all().unwrap();
//! assert_eq!(all.len(), 4);
//! ```

use std::collections::HashSet;
use std::hash::Hash;

use tracing::info;

use crate::assignment::{CommonSubgraphs, MatchSet};
use crate::config::{Config, DedupeMode};
use crate::frontier::BestElements;
use crate::graph::Graph;
use crate::mapping::Mapping;
use crate::matcher::{AlwaysMatch, Matcher};
use crate::observe::Observed;
use crate::progress::Progress;
use crate::search::{SearchOutcome, VisitPolicy, search};
use crate::state::{McsState, SearchState, StateError, Vf2State};
use crate::visitor::Visitor;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Collects snapshots, skipping duplicates under the configured dedupe mode
/// and stopping at the configured limit.
struct Gather<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    dedupe: DedupeMode,
    limit: Option<usize>,
    seen: HashSet<Vec<T>>,
    found: Vec<Mapping<P, T>>,
}

impl<P, T> Gather<P, T>
where
    P: Copy + Eq + Hash + Ord,
    T: Copy + Eq + Hash + Ord,
{
    fn new(dedupe: DedupeMode, limit: Option<usize>) -> Self {
        Self {
            dedupe,
            limit,
            seen: HashSet::new(),
            found: Vec::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.limit.is_some_and(|n| self.found.len() >= n)
    }
}

impl<P, T> Visitor<P, T> for Gather<P, T>
where
    P: Copy + Eq + Hash + Ord,
    T: Copy + Eq + Hash + Ord,
{
    fn visit(&mut self, mapping: &Mapping<P, T>) -> bool {
        if self.is_full() {
            return true;
        }
        let fresh = match self.dedupe {
            DedupeMode::None => true,
            DedupeMode::TargetSet => self.seen.insert(mapping.target_signature()),
        };
        if fresh {
            self.found.push(mapping.snapshot());
        }
        self.is_full()
    }
}

/// A configured search of `pattern` inside `target`.
pub struct SubgraphSearch<'a, G1, G2, VM = AlwaysMatch, EM = AlwaysMatch> {
    pattern: &'a G1,
    target: &'a G2,
    vertex_matcher: VM,
    edge_matcher: EM,
    config: Config,
    progress: Option<&'a Progress>,
}

impl<'a, G1, G2> SubgraphSearch<'a, G1, G2>
where
    G1: Graph,
    G2: Graph,
{
    /// Search with default configuration and matchers that accept everything.
    pub fn new(pattern: &'a G1, target: &'a G2) -> Self {
        Self {
            pattern,
            target,
            vertex_matcher: AlwaysMatch,
            edge_matcher: AlwaysMatch,
            config: Config::default(),
            progress: None,
        }
    }
}

impl<'a, G1, G2, VM, EM> SubgraphSearch<'a, G1, G2, VM, EM>
where
    G1: Graph,
    G2: Graph,
    VM: Matcher<G1::VertexWeight, G2::VertexWeight>,
    EM: Matcher<G1::EdgeWeight, G2::EdgeWeight>,
{
    /// Replace the vertex compatibility predicate.
    pub fn vertex_matcher<M>(self, vertex_matcher: M) -> SubgraphSearch<'a, G1, G2, M, EM>
    where
        M: Matcher<G1::VertexWeight, G2::VertexWeight>,
    {
        SubgraphSearch {
            pattern: self.pattern,
            target: self.target,
            vertex_matcher,
            edge_matcher: self.edge_matcher,
            config: self.config,
            progress: self.progress,
        }
    }

    /// Replace the edge compatibility predicate.
    pub fn edge_matcher<M>(self, edge_matcher: M) -> SubgraphSearch<'a, G1, G2, VM, M>
    where
        M: Matcher<G1::EdgeWeight, G2::EdgeWeight>,
    {
        SubgraphSearch {
            pattern: self.pattern,
            target: self.target,
            vertex_matcher: self.vertex_matcher,
            edge_matcher,
            config: self.config,
            progress: self.progress,
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Report extensions, backtracks and solutions to `progress`.
    #[must_use]
    pub const fn progress(mut self, progress: &'a Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// The active configuration.
    pub const fn current_config(&self) -> &Config {
        &self.config
    }

    fn vf2_root(&self) -> Vf2State<'_, G1, G2, VM, EM> {
        Vf2State::new(
            self.pattern,
            self.target,
            &self.vertex_matcher,
            &self.edge_matcher,
            self.config.semantics,
        )
    }

    fn run<S, V>(
        &self,
        state: S,
        visitor: &mut V,
        policy: VisitPolicy,
    ) -> Result<SearchOutcome, StateError>
    where
        S: SearchState,
        V: Visitor<S::Pattern, S::Target>,
    {
        match self.progress {
            Some(progress) => search(&mut Observed::new(state, progress), visitor, policy),
            None => {
                let mut state = state;
                search(&mut state, visitor, policy)
            }
        }
    }

    fn collect(&self, limit: Option<usize>) -> Result<MatchSet<G1::Vertex, G2::Vertex>, StateError> {
        if limit == Some(0) {
            return Ok(MatchSet::default());
        }
        let mut gather = Gather::new(self.config.dedupe, limit);
        let outcome = self.run(self.vf2_root(), &mut gather, VisitPolicy::Goals)?;

        if let Some(progress) = self.progress {
            progress.record_solutions(gather.found.len());
        }
        info!(
            semantics = ?self.config.semantics,
            found = gather.found.len(),
            states = outcome.states_created,
            "subgraph search complete"
        );
        Ok(MatchSet::new(gather.found))
    }

    /// Every mapping, up to the configured limit.
    ///
    /// # Errors
    /// Only when a state breaks its own contract.
    pub fn enumerate_all(&self) -> Result<MatchSet<G1::Vertex, G2::Vertex>, StateError> {
        self.collect(self.config.limit)
    }

    /// The first mapping found, if any.
    ///
    /// # Errors
    /// Only when a state breaks its own contract.
    pub fn first(&self) -> Result<Option<Mapping<G1::Vertex, G2::Vertex>>, StateError> {
        Ok(self.collect(Some(1))?.into_iter().next())
    }

    /// At most `n` mappings; the configured limit is ignored.
    ///
    /// # Errors
    /// Only when a state breaks its own contract.
    pub fn first_n(&self, n: usize) -> Result<MatchSet<G1::Vertex, G2::Vertex>, StateError> {
        self.collect(Some(n))
    }

    /// Whether any mapping exists.
    ///
    /// # Errors
    /// Only when a state breaks its own contract.
    pub fn exists(&self) -> Result<bool, StateError> {
        Ok(self.first()?.is_some())
    }

    /// Largest induced common subgraphs, every co-optimal mapping included.
    ///
    /// Results are sorted, deduplicated per the configuration and cut to the
    /// configured limit.
    ///
    /// # Errors
    /// Only when a state breaks its own contract.
    pub fn maximum_common(&self) -> Result<CommonSubgraphs<G1::Vertex, G2::Vertex>, StateError> {
        let root = McsState::new(
            self.pattern,
            self.target,
            &self.vertex_matcher,
            &self.edge_matcher,
            self.config.connected,
        );
        let mut best = BestElements::new(|m: &Mapping<G1::Vertex, G2::Vertex>| m.len() as f64);
        let outcome = self.run(root, &mut best, VisitPolicy::Leaves)?;

        let size = best.iter().next().map_or(0, Mapping::len);
        let matches = MatchSet::new(best.into_elements())
            .sorted()
            .deduped(self.config.dedupe)
            .truncated(self.config.limit);

        if let Some(progress) = self.progress {
            progress.record_solutions(matches.len());
        }
        info!(
            size,
            found = matches.len(),
            leaves = outcome.leaves,
            connected = self.config.connected,
            "common subgraph search complete"
        );
        Ok(CommonSubgraphs { size, matches })
    }
}

#[cfg(feature = "rayon")]
impl<G1, G2, VM, EM> SubgraphSearch<'_, G1, G2, VM, EM>
where
    G1: Graph + Sync,
    G2: Graph + Sync,
    G1::Vertex: Send + Sync,
    G2::Vertex: Send + Sync,
    VM: Matcher<G1::VertexWeight, G2::VertexWeight> + Sync,
    EM: Matcher<G1::EdgeWeight, G2::EdgeWeight> + Sync,
{
    /// [`SubgraphSearch::enumerate_all`] with the root-level branches spread
    /// over rayon workers.
    ///
    /// Each worker explores one root candidate on its own copy of the root
    /// state. Results are merged in candidate order, then deduplicated and
    /// limited, so they equal the sequential results.
    ///
    /// # Errors
    /// Only when a state breaks its own contract.
    pub fn enumerate_all_par(&self) -> Result<MatchSet<G1::Vertex, G2::Vertex>, StateError> {
        let root = self.vf2_root();
        if root.is_goal() || self.config.limit == Some(0) {
            return self.enumerate_all();
        }

        let branches: Vec<(G1::Vertex, G2::Vertex)> = root
            .candidates()
            .into_iter()
            .filter(|&(p, t)| root.is_feasible(p, t))
            .collect();

        let per_branch: Vec<Result<Vec<Mapping<G1::Vertex, G2::Vertex>>, StateError>> = branches
            .into_par_iter()
            .map(|(p, t)| {
                let mut state = root.clone();
                state.new_state(p, t)?;
                let mut gather = Gather::new(self.config.dedupe, self.config.limit);
                self.run(state, &mut gather, VisitPolicy::Goals)?;
                Ok(gather.found)
            })
            .collect();

        let mut merged = Vec::new();
        for branch in per_branch {
            merged.extend(branch?);
        }
        let matches = MatchSet::new(merged)
            .deduped(self.config.dedupe)
            .truncated(self.config.limit);

        if let Some(progress) = self.progress {
            progress.record_solutions(matches.len());
        }
        info!(
            semantics = ?self.config.semantics,
            found = matches.len(),
            "parallel subgraph search complete"
        );
        Ok(matches)
    }
}
