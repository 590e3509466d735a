use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Graph;

/// Dense vertex handle of an [`AdjGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position of the vertex in its graph's storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Errors raised while building an [`AdjGraph`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint does not name an existing vertex.
    #[error("edge endpoint {0} is not a vertex of this graph")]
    UnknownVertex(u32),
    /// Edges from a vertex to itself are not supported.
    #[error("self-loop on vertex {0} is not supported")]
    SelfLoop(u32),
}

/// Adjacency-list graph with vertex payloads `N` and edge payloads `E`.
///
/// Neighbor lists keep insertion order, which makes every traversal of the
/// search deterministic.
#[derive(Clone, Debug)]
pub struct AdjGraph<N, E> {
    directed: bool,
    weights: Vec<N>,
    /// Outgoing edges (all incident edges when undirected).
    out: Vec<IndexMap<NodeId, E>>,
    /// Incoming edge tails; unused when undirected.
    inc: Vec<IndexSet<NodeId>>,
    edge_count: usize,
}

impl<N, E> AdjGraph<N, E> {
    /// Empty graph.
    #[must_use]
    pub const fn new(directed: bool) -> Self {
        Self {
            directed,
            weights: Vec::new(),
            out: Vec::new(),
            inc: Vec::new(),
            edge_count: 0,
        }
    }

    /// Empty undirected graph.
    #[must_use]
    pub const fn undirected() -> Self {
        Self::new(false)
    }

    /// Empty directed graph.
    #[must_use]
    pub const fn directed() -> Self {
        Self::new(true)
    }

    /// Add a vertex and return its handle.
    pub fn add_vertex(&mut self, weight: N) -> NodeId {
        let id = NodeId(self.weights.len() as u32);
        self.weights.push(weight);
        self.out.push(IndexMap::new());
        self.inc.push(IndexSet::new());
        id
    }

    fn check(&self, v: NodeId) -> Result<(), GraphError> {
        if v.index() < self.weights.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(v.0))
        }
    }

    /// Add the edge `from -> to` (`{from, to}` when undirected).
    ///
    /// Adding an existing edge again replaces its payload.
    ///
    /// # Errors
    /// [`GraphError::UnknownVertex`] for a dangling endpoint,
    /// [`GraphError::SelfLoop`] when `from == to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: E) -> Result<(), GraphError>
    where
        E: Clone,
    {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Err(GraphError::SelfLoop(from.0));
        }

        let fresh = self.out[from.index()].insert(to, weight.clone()).is_none();
        if self.directed {
            self.inc[to.index()].insert(from);
        } else {
            self.out[to.index()].insert(from, weight);
        }
        if fresh {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Number of edges.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }
}

impl<N, E> Graph for AdjGraph<N, E> {
    type Vertex = NodeId;
    type VertexWeight = N;
    type EdgeWeight = E;

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn vertex_count(&self) -> usize {
        self.weights.len()
    }

    fn vertices(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.weights.len() as u32).map(NodeId)
    }

    fn vertex_weight(&self, v: NodeId) -> Option<&N> {
        self.weights.get(v.index())
    }

    fn successors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out
            .get(v.index())
            .into_iter()
            .flat_map(|edges| edges.keys().copied())
    }

    fn predecessors(&self, v: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let tails = if self.directed {
            self.inc.get(v.index())
        } else {
            None
        };
        let undirected = if self.directed {
            None
        } else {
            self.out.get(v.index())
        };
        tails
            .into_iter()
            .flat_map(|set| set.iter().copied())
            .chain(undirected.into_iter().flat_map(|edges| edges.keys().copied()))
    }

    fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<&E> {
        self.out.get(from.index())?.get(&to)
    }
}

/// Serializable description of an [`AdjGraph`].
///
/// ```json
/// { "directed": false, "vertices": ["C", "O", "H"], "edges": [{ "from": 0, "to": 1 }] }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "N: Deserialize<'de>, E: Deserialize<'de> + Default"))]
pub struct GraphSpec<N, E> {
    /// Whether edges are ordered pairs.
    #[serde(default)]
    pub directed: bool,
    /// Vertex payloads; a vertex's position is its [`NodeId`].
    pub vertices: Vec<N>,
    /// Edge list.
    #[serde(default = "Vec::new")]
    pub edges: Vec<EdgeSpec<E>>,
}

/// One edge of a [`GraphSpec`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "E: Deserialize<'de> + Default"))]
pub struct EdgeSpec<E> {
    /// Tail vertex index.
    pub from: u32,
    /// Head vertex index.
    pub to: u32,
    /// Edge payload; defaults when absent.
    #[serde(default)]
    pub label: E,
}

impl<N, E: Clone> TryFrom<GraphSpec<N, E>> for AdjGraph<N, E> {
    type Error = GraphError;

    fn try_from(spec: GraphSpec<N, E>) -> Result<Self, Self::Error> {
        let mut graph = Self::new(spec.directed);
        for weight in spec.vertices {
            graph.add_vertex(weight);
        }
        for edge in spec.edges {
            graph.add_edge(NodeId(edge.from), NodeId(edge.to), edge.label)?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut g: AdjGraph<(), ()> = AdjGraph::undirected();
        let a = g.add_vertex(());
        let b = g.add_vertex(());
        g.add_edge(a, b, ()).unwrap();

        assert!(g.has_edge(a, b));
        assert!(g.has_edge(b, a));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.predecessors(a).collect::<Vec<_>>(), vec![b]);
        assert_eq!(g.neighbors(b), vec![a]);
    }

    #[test]
    fn directed_edges_track_predecessors() {
        let mut g: AdjGraph<(), u8> = AdjGraph::directed();
        let a = g.add_vertex(());
        let b = g.add_vertex(());
        let c = g.add_vertex(());
        g.add_edge(a, b, 1).unwrap();
        g.add_edge(c, b, 2).unwrap();

        assert!(!g.has_edge(b, a));
        assert_eq!(g.edge_weight(c, b), Some(&2));
        assert_eq!(g.predecessors(b).collect::<Vec<_>>(), vec![a, c]);
        assert_eq!(g.successors(b).count(), 0);
        assert_eq!(g.neighbors(b), vec![a, c]);
    }

    #[test]
    fn rejects_bad_edges() {
        let mut g: AdjGraph<(), ()> = AdjGraph::undirected();
        let a = g.add_vertex(());
        assert_eq!(g.add_edge(a, a, ()), Err(GraphError::SelfLoop(0)));
        assert_eq!(
            g.add_edge(a, NodeId(4), ()),
            Err(GraphError::UnknownVertex(4))
        );
    }

    #[test]
    fn repeated_edge_replaces_payload() {
        let mut g: AdjGraph<(), &str> = AdjGraph::undirected();
        let a = g.add_vertex(());
        let b = g.add_vertex(());
        g.add_edge(a, b, "x").unwrap();
        g.add_edge(b, a, "y").unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weight(a, b), Some(&"y"));
    }

    #[test]
    fn builds_from_json_spec() {
        let json = r#"{
            "vertices": ["A", "B", "C"],
            "edges": [{ "from": 0, "to": 1, "label": "single" }, { "from": 1, "to": 2 }]
        }"#;
        let spec: GraphSpec<String, String> = serde_json::from_str(json).unwrap();
        let g = AdjGraph::try_from(spec).unwrap();

        assert!(!g.is_directed());
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_weight(NodeId(1), NodeId(0)).map(String::as_str), Some("single"));
        assert_eq!(g.edge_weight(NodeId(2), NodeId(1)).map(String::as_str), Some(""));
    }
}
