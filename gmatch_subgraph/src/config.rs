//! Configuration for a matching search.
//!
//! Quick examples
//!
//! Default (non-induced subgraph, every mapping reported):
//! ```
//! use gmatch_subgraph::{Config, DedupeMode, Semantics};
//! let cfg = Config::default();
//! assert_eq!(cfg.semantics, Semantics::Monomorphism);
//! assert_eq!(cfg.dedupe, DedupeMode::None);
//! ```
//!
//! Induced matches, automorphisms collapsed, at most ten results:
//! ```
//! use gmatch_subgraph::{Config, DedupeMode, Semantics};
//! let cfg = Config::builder()
//!     .semantics(Semantics::Induced)
//!     .dedupe(DedupeMode::TargetSet)
//!     .limit(Some(10))
//!     .build();
//! assert_eq!(cfg.limit, Some(10));
//! ```

use serde::{Deserialize, Serialize};

/// What a complete mapping must preserve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Semantics {
    /// Every pattern edge maps onto a target edge; extra target edges are allowed.
    #[default]
    Monomorphism,
    /// Pattern edges and non-edges are both preserved.
    Induced,
    /// Induced, and both graphs have the same number of vertices.
    Isomorphism,
}

impl Semantics {
    /// Whether pattern non-edges must map onto target non-edges.
    #[must_use]
    pub const fn is_induced(self) -> bool {
        matches!(self, Self::Induced | Self::Isomorphism)
    }
}

/// How results are deduplicated after the search.
///
/// - None: every distinct mapping is reported.
/// - TargetSet: mappings covering the same SET of target vertices are
///   collapsed into the first one found (automorphisms of the pattern).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupeMode {
    /// Keep every mapping.
    #[default]
    None,
    /// Collapse mappings onto the same target vertex set.
    TargetSet,
}

/// Global search configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Matching semantics of exact searches.
    pub semantics: Semantics,
    /// How to deduplicate matches after search.
    pub dedupe: DedupeMode,
    /// Stop after this many mappings; `None` is unbounded.
    pub limit: Option<usize>,
    /// Restrict maximum common subgraphs to connected ones.
    pub connected: bool,
}

impl Config {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(semantics: Semantics, dedupe: DedupeMode) -> Self {
        Self {
            semantics,
            dedupe,
            limit: None,
            connected: false,
        }
    }

    /// Start from the defaults and override selectively.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Matching semantics.
    #[must_use]
    pub const fn semantics(mut self, semantics: Semantics) -> Self {
        self.config.semantics = semantics;
        self
    }

    /// Post-search deduplication.
    #[must_use]
    pub const fn dedupe(mut self, dedupe: DedupeMode) -> Self {
        self.config.dedupe = dedupe;
        self
    }

    /// Maximum number of reported mappings.
    #[must_use]
    pub const fn limit(mut self, limit: Option<usize>) -> Self {
        self.config.limit = limit;
        self
    }

    /// Connected maximum common subgraphs only.
    #[must_use]
    pub const fn connected(mut self, connected: bool) -> Self {
        self.config.connected = connected;
        self
    }

    /// Finish the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        self.config
    }
}
