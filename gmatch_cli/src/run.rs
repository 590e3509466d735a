//! Loading graph files and running the requested search.

use std::fs;
use std::path::Path;

use gmatch_subgraph::{
    AdjGraph, EqMatch, Graph, GraphSpec, Mapping, Matcher, NodeId, SubgraphSearch,
};
use tracing::info;

use crate::args::{Args, ModeArg};
use crate::error::CliError;

/// Graph read from a JSON file: string labels on vertices and edges.
pub type LabelledGraph = AdjGraph<String, String>;

/// Read and validate a JSON graph description.
pub fn load_graph(path: &Path) -> Result<LabelledGraph, CliError> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let spec: GraphSpec<String, String> =
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let graph = LabelledGraph::try_from(spec).map_err(|source| CliError::Graph {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), vertices = graph.vertex_count(), "loaded graph");
    Ok(graph)
}

/// Lines to print for one invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum Report {
    /// Mappings, one per line.
    Mappings(Vec<Mapping<NodeId, NodeId>>),
    /// Just a count.
    Count(usize),
    /// Best common subgraphs of `size` vertices.
    Common {
        /// Covered pattern vertices.
        size: usize,
        /// Co-optimal mappings.
        mappings: Vec<Mapping<NodeId, NodeId>>,
    },
}

impl Report {
    /// Render as output lines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Mappings(mappings) => mappings.iter().map(ToString::to_string).collect(),
            Self::Count(n) => vec![n.to_string()],
            Self::Common { size, mappings } => std::iter::once(format!("size {size}"))
                .chain(mappings.iter().map(ToString::to_string))
                .collect(),
        }
    }
}

/// Run the search described by `args` on already loaded graphs.
pub fn run(
    args: &Args,
    pattern: &LabelledGraph,
    target: &LabelledGraph,
) -> Result<Report, CliError> {
    let search = SubgraphSearch::new(pattern, target).config(args.to_config());
    match (args.labels, args.edge_labels) {
        (false, false) => execute(search, args),
        (true, false) => execute(search.vertex_matcher(EqMatch), args),
        (false, true) => execute(search.edge_matcher(EqMatch), args),
        (true, true) => execute(search.vertex_matcher(EqMatch).edge_matcher(EqMatch), args),
    }
}

fn execute<VM, EM>(
    search: SubgraphSearch<'_, LabelledGraph, LabelledGraph, VM, EM>,
    args: &Args,
) -> Result<Report, CliError>
where
    VM: Matcher<String, String> + Sync,
    EM: Matcher<String, String> + Sync,
{
    let report = match args.mode {
        ModeArg::All if args.parallel => Report::Mappings(search.enumerate_all_par()?.into_vec()),
        ModeArg::All => Report::Mappings(search.enumerate_all()?.into_vec()),
        ModeArg::First => Report::Mappings(search.first()?.into_iter().collect()),
        ModeArg::Count if args.parallel => Report::Count(search.enumerate_all_par()?.len()),
        ModeArg::Count => Report::Count(search.enumerate_all()?.len()),
        ModeArg::Mcs => {
            let common = search.maximum_common()?;
            Report::Common {
                size: common.size,
                mappings: common.matches.into_vec(),
            }
        }
    };
    Ok(report)
}
