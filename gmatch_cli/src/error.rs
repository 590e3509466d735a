use std::path::PathBuf;

use gmatch_subgraph::{GraphError, StateError};
use thiserror::Error;

/// Everything that can go wrong between reading the inputs and printing results.
#[derive(Debug, Error)]
pub enum CliError {
    /// The graph file could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The graph file is not valid JSON for a graph description.
    #[error("{} is not a valid graph description: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The description names bad edges.
    #[error("{}: {source}", .path.display())]
    Graph {
        path: PathBuf,
        #[source]
        source: GraphError,
    },
    /// The search itself failed.
    #[error(transparent)]
    Search(#[from] StateError),
}
