//! Mappings returned by a search.

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::DedupeMode;
use crate::mapping::Mapping;

/// An ordered collection of mapping snapshots found during a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchSet<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    items: Vec<Mapping<P, T>>,
}

impl<P, T> Default for MatchSet<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<P, T> MatchSet<P, T>
where
    P: Copy + Eq + Hash + Ord,
    T: Copy + Eq + Hash + Ord,
{
    /// Wrap mappings in discovery order.
    #[must_use]
    pub const fn new(items: Vec<Mapping<P, T>>) -> Self {
        Self { items }
    }

    /// Apply `mode`, keeping the first mapping of each equivalence class.
    #[must_use]
    pub fn deduped(self, mode: DedupeMode) -> Self {
        match mode {
            DedupeMode::None => self,
            DedupeMode::TargetSet => {
                let mut seen: HashSet<Vec<T>> = HashSet::new();
                let items = self
                    .items
                    .into_iter()
                    .filter(|m| seen.insert(m.target_signature()))
                    .collect();
                Self { items }
            }
        }
    }

    /// Keep at most `limit` mappings.
    #[must_use]
    pub fn truncated(mut self, limit: Option<usize>) -> Self {
        if let Some(n) = limit {
            self.items.truncate(n);
        }
        self
    }

    /// Sort by pattern-ordered pairs so results do not depend on discovery order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.items.sort_by_cached_key(Mapping::sorted_pairs);
        self
    }

    /// Whether no mapping was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Mappings in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Mapping<P, T>> {
        self.items.iter()
    }

    /// First mapping, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Mapping<P, T>> {
        self.items.first()
    }

    /// Take the mappings out.
    #[must_use]
    pub fn into_vec(self) -> Vec<Mapping<P, T>> {
        self.items
    }
}

impl<P, T> IntoIterator for MatchSet<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    type Item = Mapping<P, T>;
    type IntoIter = std::vec::IntoIter<Mapping<P, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, P, T> IntoIterator for &'a MatchSet<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    type Item = &'a Mapping<P, T>;
    type IntoIter = std::slice::Iter<'a, Mapping<P, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Result of a maximum-common-subgraph search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommonSubgraphs<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Number of pattern vertices covered by each best mapping.
    pub size: usize,
    /// The co-optimal mappings.
    pub matches: MatchSet<P, T>,
}
