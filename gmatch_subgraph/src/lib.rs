//! Generic backtracking engine for (sub)graph matching.
//!
//! A search walks a tree of partial mappings from pattern vertices to target
//! vertices. The tree is described by a [`SearchState`]; [`search`] walks it
//! depth first and hands goal (or leaf) states to a [`Visitor`]. Two states
//! ship with the crate: [`Vf2State`] for exact subgraph matching and
//! [`McsState`] for maximum common subgraphs. [`SubgraphSearch`] wires
//! everything together for the common cases.

pub mod assignment;
pub mod candidates;
pub mod config;
pub mod finder;
pub mod frontier;
pub mod graph;
pub mod mapping;
pub mod matcher;
pub mod observe;
pub mod progress;
pub mod search;
pub mod state;
pub mod test_harness;
pub mod visitor;

pub use assignment::{CommonSubgraphs, MatchSet};
pub use candidates::{CandidateError, CandidatePairs, NestedPairs, PairCursor};
pub use config::{Config, ConfigBuilder, DedupeMode, Semantics};
pub use finder::SubgraphSearch;
pub use frontier::BestElements;
pub use graph::{AdjGraph, EdgeSpec, Graph, GraphError, GraphSpec, NodeId};
pub use mapping::Mapping;
pub use matcher::{AlwaysMatch, EqMatch, Matcher};
pub use observe::{Observed, Observer, TracingObserver};
pub use progress::{Progress, ProgressSnapshot};
pub use search::{SearchOutcome, VisitPolicy, search};
pub use state::{McsState, SearchState, StateError, TerminalSet, Vf2State};
pub use visitor::{Collector, Counter, Visitor};
