use std::path::PathBuf;

use clap::Parser;
use gmatch_subgraph::{Config, DedupeMode, Semantics};

/// gmatch - find a pattern graph inside a target graph
#[derive(Parser, Debug)]
#[command(name = "gmatch")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the pattern graph (JSON)
    #[arg(short = 'p', long)]
    pub pattern: PathBuf,

    /// Path to the target graph (JSON)
    #[arg(short = 't', long)]
    pub target: PathBuf,

    /// What to compute
    #[arg(long, value_enum, default_value = "all")]
    pub mode: ModeArg,

    /// Matching semantics for exact modes
    #[arg(long, value_enum, default_value = "mono")]
    pub semantics: SemanticsArg,

    /// Stop after this many mappings
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// How to deduplicate results
    #[arg(long, value_enum, default_value = "none")]
    pub dedupe: DedupeArg,

    /// Vertex labels must be equal
    #[arg(long, default_value_t = false)]
    pub labels: bool,

    /// Edge labels must be equal
    #[arg(long, default_value_t = false)]
    pub edge_labels: bool,

    /// Only connected common subgraphs (mcs mode)
    #[arg(long, default_value_t = false)]
    pub connected: bool,

    /// Spread root branches over worker threads (all and count modes)
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        Config::builder()
            .semantics(self.semantics.into())
            .dedupe(self.dedupe.into())
            .limit(self.limit)
            .connected(self.connected)
            .build()
    }
}

/// Search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    /// Every mapping
    #[value(name = "all")]
    All,
    /// First mapping only
    #[value(name = "first")]
    First,
    /// Number of mappings
    #[value(name = "count")]
    Count,
    /// Maximum common subgraph
    #[value(name = "mcs")]
    Mcs,
}

/// Command-line argument wrapper for Semantics
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SemanticsArg {
    /// Non-induced subgraph
    #[value(name = "mono")]
    Mono,
    /// Induced subgraph
    #[value(name = "induced")]
    Induced,
    /// Whole-graph isomorphism
    #[value(name = "iso")]
    Iso,
}

impl From<SemanticsArg> for Semantics {
    fn from(arg: SemanticsArg) -> Self {
        match arg {
            SemanticsArg::Mono => Self::Monomorphism,
            SemanticsArg::Induced => Self::Induced,
            SemanticsArg::Iso => Self::Isomorphism,
        }
    }
}

/// Command-line argument wrapper for DedupeMode
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DedupeArg {
    /// Keep every mapping
    #[value(name = "none")]
    None,
    /// One mapping per target vertex set
    #[value(name = "target-set")]
    TargetSet,
}

impl From<DedupeArg> for DedupeMode {
    fn from(arg: DedupeArg) -> Self {
        match arg {
            DedupeArg::None => Self::None,
            DedupeArg::TargetSet => Self::TargetSet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_to_default_config() {
        let args = Args::parse_from(["gmatch", "-p", "a.json", "-t", "b.json"]);
        assert_eq!(args.mode, ModeArg::All);
        assert_eq!(args.to_config(), Config::default());
    }

    #[test]
    fn flags_reach_the_config() {
        let args = Args::parse_from([
            "gmatch",
            "--pattern",
            "a.json",
            "--target",
            "b.json",
            "--mode",
            "mcs",
            "--semantics",
            "induced",
            "--dedupe",
            "target-set",
            "--limit",
            "4",
            "--connected",
        ]);
        let config = args.to_config();
        assert_eq!(args.mode, ModeArg::Mcs);
        assert_eq!(config.semantics, Semantics::Induced);
        assert_eq!(config.dedupe, DedupeMode::TargetSet);
        assert_eq!(config.limit, Some(4));
        assert!(config.connected);
    }
}
