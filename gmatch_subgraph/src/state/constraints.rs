use crate::graph::Graph;
use crate::mapping::Mapping;
use crate::matcher::Matcher;

/// Vertex payloads of `p` and `t` are accepted by the vertex matcher.
pub(crate) fn vertices_compatible<G1, G2, VM>(
    pattern: &G1,
    target: &G2,
    matcher: &VM,
    p: G1::Vertex,
    t: G2::Vertex,
) -> bool
where
    G1: Graph,
    G2: Graph,
    VM: Matcher<G1::VertexWeight, G2::VertexWeight> + ?Sized,
{
    match (pattern.vertex_weight(p), target.vertex_weight(t)) {
        (Some(a), Some(b)) => matcher.matches(a, b),
        _ => false,
    }
}

/// One directed slot `p_from -> p_to` against `t_from -> t_to`.
///
/// A pattern edge needs a target edge accepted by the edge matcher. When
/// `induced`, a pattern non-edge also needs a target non-edge.
fn slot_consistent<G1, G2, EM>(
    pattern: &G1,
    target: &G2,
    matcher: &EM,
    (p_from, p_to): (G1::Vertex, G1::Vertex),
    (t_from, t_to): (G2::Vertex, G2::Vertex),
    induced: bool,
) -> bool
where
    G1: Graph,
    G2: Graph,
    EM: Matcher<G1::EdgeWeight, G2::EdgeWeight> + ?Sized,
{
    match (
        pattern.edge_weight(p_from, p_to),
        target.edge_weight(t_from, t_to),
    ) {
        (Some(a), Some(b)) => matcher.matches(a, b),
        (Some(_), None) => false,
        (None, Some(_)) => !induced,
        (None, None) => true,
    }
}

/// Adding `(p, t)` keeps every edge between `p` and an already mapped vertex
/// consistent with the edge between their images.
pub(crate) fn edges_consistent<G1, G2, EM>(
    pattern: &G1,
    target: &G2,
    matcher: &EM,
    mapping: &Mapping<G1::Vertex, G2::Vertex>,
    p: G1::Vertex,
    t: G2::Vertex,
    induced: bool,
) -> bool
where
    G1: Graph,
    G2: Graph,
    EM: Matcher<G1::EdgeWeight, G2::EdgeWeight> + ?Sized,
{
    let directed = pattern.is_directed();
    mapping.iter().all(|(q_p, q_t)| {
        slot_consistent(pattern, target, matcher, (p, q_p), (t, q_t), induced)
            && (!directed
                || slot_consistent(pattern, target, matcher, (q_p, p), (q_t, t), induced))
    })
}
