#![allow(dead_code)]

use std::sync::Once;

use crate::{AdjGraph, Config, ConfigBuilder, EqMatch, NodeId, SubgraphSearch};

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Graph type used by the integration tests: string labels on both vertices and edges.
pub type TestGraph = AdjGraph<&'static str, &'static str>;

/// Build a [`TestGraph`] from vertex labels and unlabelled edges.
///
/// # Panics
/// On an edge naming a vertex outside `labels` or a self-loop.
#[must_use]
pub fn labelled_graph(directed: bool, labels: &[&'static str], edges: &[(u32, u32)]) -> TestGraph {
    let mut g = AdjGraph::new(directed);
    for label in labels {
        g.add_vertex(*label);
    }
    for &(from, to) in edges {
        if let Err(e) = g.add_edge(NodeId(from), NodeId(to), "") {
            panic!("bad test graph edge ({from}, {to}): {e}");
        }
    }
    g
}

/// Same as [`labelled_graph`] with every vertex labelled `"_"`.
///
/// # Panics
/// On an edge naming a vertex outside `0..n` or a self-loop.
#[must_use]
pub fn plain_graph(directed: bool, n: usize, edges: &[(u32, u32)]) -> TestGraph {
    labelled_graph(directed, &vec!["_"; n], edges)
}

/// Description of a matching integration test.
pub struct MatchSpec<'a> {
    /// Pattern graph.
    pub pattern: &'a TestGraph,
    /// Target graph.
    pub target: &'a TestGraph,
    /// Compare vertex labels for equality.
    pub labels: bool,
    /// Number of distinct matches expected.
    pub expected_count: usize,
    /// Optional configuration builder to override defaults
    pub config_fn: Option<fn(ConfigBuilder) -> ConfigBuilder>,
}

/// Run one enumeration and compare the number of matches.
///
/// # Errors
/// When the count differs or the search fails.
#[track_caller]
pub fn run_match_test(spec: MatchSpec<'_>) -> Result<(), Box<dyn std::error::Error>> {
    setup_test_logging();

    let mut config_builder = Config::builder();
    if let Some(f) = spec.config_fn {
        config_builder = f(config_builder);
    }
    let config = config_builder.build();

    let search = SubgraphSearch::new(spec.pattern, spec.target).config(config);
    let found = if spec.labels {
        search.vertex_matcher(EqMatch).enumerate_all()?
    } else {
        search.enumerate_all()?
    };

    if found.len() != spec.expected_count {
        tracing::error!(
            "Expected {} matches, found {}: {:?}",
            spec.expected_count,
            found.len(),
            found
        );
        return Err(format!(
            "Expected {} matches, found {}",
            spec.expected_count,
            found.len()
        )
        .into());
    }

    Ok(())
}

/// Defines a test case for subgraph matching.
#[macro_export]
macro_rules! match_test {
    (
        name: $test_name:ident,
        pattern: $pattern:expr,
        target: $target:expr,
        expect: $count:expr
    ) => {
        $crate::match_test!(
            name: $test_name,
            pattern: $pattern,
            target: $target,
            labels: false,
            expect: $count
        );
    };

    (
        name: $test_name:ident,
        pattern: $pattern:expr,
        target: $target:expr,
        labels: $labels:expr,
        expect: $count:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_match_test($crate::test_harness::MatchSpec {
                pattern: &$pattern,
                target: &$target,
                labels: $labels,
                expected_count: $count,
                config_fn: None,
            })
        }
    };

    (
        name: $test_name:ident,
        pattern: $pattern:expr,
        target: $target:expr,
        expect: $count:expr,
        config: $cfg_closure:expr
    ) => {
        #[test]
        fn $test_name() -> Result<(), Box<dyn std::error::Error>> {
            $crate::test_harness::run_match_test($crate::test_harness::MatchSpec {
                pattern: &$pattern,
                target: &$target,
                labels: false,
                expected_count: $count,
                config_fn: Some($cfg_closure),
            })
        }
    };
}
