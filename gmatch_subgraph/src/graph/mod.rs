//! Read-only graph interface consumed by the search states.
//!
//! The states never own or mutate a graph; they only need vertex enumeration,
//! vertex and edge payloads, and adjacency in both directions.

mod adjacency;

use std::fmt::Debug;
use std::hash::Hash;

pub use adjacency::{AdjGraph, EdgeSpec, GraphError, GraphSpec, NodeId};

/// Adjacency queries a pattern or target graph must answer.
pub trait Graph {
    /// Vertex handle. Ordering gives the deterministic vertex order used by the states.
    type Vertex: Copy + Eq + Hash + Ord + Debug;
    /// Payload attached to a vertex, compared by vertex matchers.
    type VertexWeight;
    /// Payload attached to an edge, compared by edge matchers.
    type EdgeWeight;

    /// Whether edges are ordered pairs.
    fn is_directed(&self) -> bool;

    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// All vertices, in ascending order.
    fn vertices(&self) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Payload of `v`, `None` if `v` is not a vertex of this graph.
    fn vertex_weight(&self, v: Self::Vertex) -> Option<&Self::VertexWeight>;

    /// Heads of the edges leaving `v` (every neighbor, for undirected graphs).
    fn successors(&self, v: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Tails of the edges entering `v` (every neighbor, for undirected graphs).
    fn predecessors(&self, v: Self::Vertex) -> impl Iterator<Item = Self::Vertex> + '_;

    /// Payload of the edge `from -> to` (or `{from, to}` when undirected).
    fn edge_weight(&self, from: Self::Vertex, to: Self::Vertex) -> Option<&Self::EdgeWeight>;

    /// Whether the edge `from -> to` exists.
    fn has_edge(&self, from: Self::Vertex, to: Self::Vertex) -> bool {
        self.edge_weight(from, to).is_some()
    }

    /// Vertices adjacent to `v` in either direction, each listed once.
    fn neighbors(&self, v: Self::Vertex) -> Vec<Self::Vertex> {
        let mut seen = indexmap::IndexSet::new();
        seen.extend(self.successors(v));
        if self.is_directed() {
            seen.extend(self.predecessors(v));
        }
        seen.into_iter().collect()
    }
}
