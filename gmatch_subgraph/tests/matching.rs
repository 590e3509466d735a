//! Table-driven match counts over small graph families.

use gmatch_subgraph::test_harness::{TestGraph, labelled_graph, plain_graph, setup_test_logging};
use gmatch_subgraph::{
    AdjGraph, Config, ConfigBuilder, DedupeMode, EqMatch, Graph, NodeId, Semantics, SubgraphSearch,
    match_test,
};
use lazy_static::lazy_static;
use rstest::rstest;

lazy_static! {
    static ref EDGE: TestGraph = plain_graph(false, 2, &[(0, 1)]);
    static ref PATH3: TestGraph = plain_graph(false, 3, &[(0, 1), (1, 2)]);
    static ref TRIANGLE: TestGraph = plain_graph(false, 3, &[(0, 1), (1, 2), (2, 0)]);
    static ref CYCLE4: TestGraph = plain_graph(false, 4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
    static ref STAR3: TestGraph = plain_graph(false, 4, &[(0, 1), (0, 2), (0, 3)]);
    static ref K4: TestGraph =
        plain_graph(false, 4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    static ref EDGE_PLUS_ISOLATED: TestGraph = plain_graph(false, 3, &[(0, 1)]);
    static ref DI_EDGE: TestGraph = plain_graph(true, 2, &[(0, 1)]);
    static ref DI_PATH3: TestGraph = plain_graph(true, 3, &[(0, 1), (1, 2)]);
    static ref DI_CYCLE3: TestGraph = plain_graph(true, 3, &[(0, 1), (1, 2), (2, 0)]);
    static ref CO: TestGraph = labelled_graph(false, &["C", "O"], &[(0, 1)]);
    static ref OCO: TestGraph = labelled_graph(false, &["O", "C", "O"], &[(0, 1), (1, 2)]);
}

fn induced(c: ConfigBuilder) -> ConfigBuilder {
    c.semantics(Semantics::Induced)
}

fn isomorphism(c: ConfigBuilder) -> ConfigBuilder {
    c.semantics(Semantics::Isomorphism)
}

fn collapse_automorphisms(c: ConfigBuilder) -> ConfigBuilder {
    c.dedupe(DedupeMode::TargetSet)
}

fn at_most_five(c: ConfigBuilder) -> ConfigBuilder {
    c.limit(Some(5))
}

match_test!(name: edge_in_star, pattern: EDGE, target: STAR3, expect: 6);
match_test!(name: path_in_cycle, pattern: PATH3, target: CYCLE4, expect: 8);
match_test!(name: path_in_cycle_induced, pattern: PATH3, target: CYCLE4, expect: 8, config: induced);
match_test!(name: path_in_clique, pattern: PATH3, target: K4, expect: 24);
match_test!(name: path_in_clique_induced, pattern: PATH3, target: K4, expect: 0, config: induced);
match_test!(name: cycle_in_clique, pattern: CYCLE4, target: K4, expect: 24);
match_test!(name: cycle_in_clique_induced, pattern: CYCLE4, target: K4, expect: 0, config: induced);
match_test!(name: cycle_automorphisms, pattern: CYCLE4, target: CYCLE4, expect: 8, config: isomorphism);
match_test!(name: path_not_isomorphic_to_cycle, pattern: PATH3, target: CYCLE4, expect: 0, config: isomorphism);
match_test!(name: triangles_in_clique_by_vertex_set, pattern: TRIANGLE, target: K4, expect: 4, config: collapse_automorphisms);
match_test!(name: limit_caps_results, pattern: TRIANGLE, target: K4, expect: 5, config: at_most_five);
match_test!(name: directed_edge_in_directed_path, pattern: DI_EDGE, target: DI_PATH3, expect: 2);
match_test!(name: directed_cycle_rotations, pattern: DI_CYCLE3, target: DI_CYCLE3, expect: 3);
match_test!(name: directed_path_in_cycle, pattern: DI_PATH3, target: DI_CYCLE3, expect: 3);
match_test!(name: carbonyl_labels, pattern: CO, target: OCO, labels: true, expect: 2);
match_test!(name: carbonyl_ignoring_labels, pattern: CO, target: OCO, expect: 4);

#[rstest]
#[case::triangle_in_clique(&*TRIANGLE, &*K4, 24)]
#[case::edge_in_triangle(&*EDGE, &*TRIANGLE, 6)]
#[case::triangle_not_in_path(&*TRIANGLE, &*PATH3, 0)]
#[case::star_in_clique(&*STAR3, &*K4, 24)]
fn enumerate_counts(#[case] pattern: &TestGraph, #[case] target: &TestGraph, #[case] expected: usize) {
    setup_test_logging();
    let found = SubgraphSearch::new(pattern, target).enumerate_all().unwrap();
    assert_eq!(found.len(), expected);
    assert!(found.iter().all(|m| m.len() == pattern.vertex_count()));
}

#[rstest]
#[case::first(1)]
#[case::three(3)]
#[case::beyond_total(100)]
fn first_n_is_a_prefix_of_all(#[case] n: usize) {
    setup_test_logging();
    let search = SubgraphSearch::new(&*PATH3, &*K4);
    let all = search.enumerate_all().unwrap().into_vec();
    let some = search.first_n(n).unwrap().into_vec();
    assert_eq!(some.len(), n.min(all.len()));
    assert_eq!(some[..], all[..some.len()]);
}

#[test]
fn first_and_exists_agree() {
    setup_test_logging();
    let hit = SubgraphSearch::new(&*TRIANGLE, &*K4);
    assert!(hit.exists().unwrap());
    assert_eq!(hit.first().unwrap().map(|m| m.len()), Some(3));

    let miss = SubgraphSearch::new(&*TRIANGLE, &*CYCLE4);
    assert!(!miss.exists().unwrap());
    assert_eq!(miss.first().unwrap(), None);
}

#[test]
fn edge_labels_must_match() {
    setup_test_logging();
    let mut pattern: AdjGraph<&str, &str> = AdjGraph::undirected();
    let c = pattern.add_vertex("C");
    let o = pattern.add_vertex("O");
    pattern.add_edge(c, o, "double").unwrap();

    let mut target: AdjGraph<&str, &str> = AdjGraph::undirected();
    let tc = target.add_vertex("C");
    let o1 = target.add_vertex("O");
    let o2 = target.add_vertex("O");
    target.add_edge(tc, o1, "single").unwrap();
    target.add_edge(tc, o2, "double").unwrap();

    let found = SubgraphSearch::new(&pattern, &target)
        .vertex_matcher(EqMatch)
        .edge_matcher(EqMatch)
        .enumerate_all()
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.first().and_then(|m| m.get(&o)), Some(o2));
}

#[rstest]
#[case::path_and_triangle(&*PATH3, &*TRIANGLE, false, 2, 12)]
#[case::path_and_triangle_connected(&*PATH3, &*TRIANGLE, true, 2, 12)]
#[case::split_graph(&*EDGE_PLUS_ISOLATED, &*EDGE_PLUS_ISOLATED, false, 3, 2)]
#[case::split_graph_connected(&*EDGE_PLUS_ISOLATED, &*EDGE_PLUS_ISOLATED, true, 2, 2)]
#[case::cycle_and_clique(&*CYCLE4, &*K4, false, 2, 48)]
fn maximum_common_subgraph(
    #[case] pattern: &TestGraph,
    #[case] target: &TestGraph,
    #[case] connected: bool,
    #[case] size: usize,
    #[case] count: usize,
) {
    setup_test_logging();
    let result = SubgraphSearch::new(pattern, target)
        .config(Config::builder().connected(connected).build())
        .maximum_common()
        .unwrap();
    assert_eq!(result.size, size);
    assert_eq!(result.matches.len(), count);
    assert!(result.matches.iter().all(|m| m.len() == size));
}

#[test]
fn maximum_common_with_dedupe_counts_vertex_sets() {
    setup_test_logging();
    let result = SubgraphSearch::new(&*PATH3, &*TRIANGLE)
        .config(Config::builder().dedupe(DedupeMode::TargetSet).build())
        .maximum_common()
        .unwrap();
    assert_eq!(result.size, 2);
    assert_eq!(result.matches.len(), 3);
}

#[test]
fn maximum_common_of_empty_pattern() {
    setup_test_logging();
    let empty = plain_graph(false, 0, &[]);
    let result = SubgraphSearch::new(&empty, &*K4).maximum_common().unwrap();
    assert_eq!(result.size, 0);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(
        result.matches.first().map(|m| m.get_inverse(&NodeId(0))),
        Some(None)
    );
}
