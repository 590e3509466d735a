use std::hash::Hash;

use indexmap::IndexMap;

/// Frontier of a partial mapping: vertices adjacent to mapped vertices.
///
/// Each vertex is tagged with the search depth at which it first entered the
/// frontier. Vertices are never dropped when they become mapped themselves;
/// callers filter by mapping membership. Insertion order is kept so the most
/// recent additions can be undone cheaply.
#[derive(Clone, Debug)]
pub struct TerminalSet<V>
where
    V: Copy + Eq + Hash,
{
    depth_of: IndexMap<V, usize>,
}

impl<V> Default for TerminalSet<V>
where
    V: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TerminalSet<V>
where
    V: Copy + Eq + Hash,
{
    /// Empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            depth_of: IndexMap::new(),
        }
    }

    /// Add every neighbor of a newly mapped vertex that is neither already in
    /// the frontier nor `visited`, tagged with `depth`.
    ///
    /// Returns exactly the vertices added, in insertion order.
    pub fn extend(
        &mut self,
        depth: usize,
        neighbors: impl IntoIterator<Item = V>,
        visited: impl Fn(&V) -> bool,
    ) -> Vec<V> {
        let mut added = Vec::new();
        for n in neighbors {
            if self.depth_of.contains_key(&n) || visited(&n) {
                continue;
            }
            self.depth_of.insert(n, depth);
            added.push(n);
        }
        added
    }

    /// Undo an [`TerminalSet::extend`]; `added` must be its return value.
    pub fn retract(&mut self, added: &[V]) {
        for v in added.iter().rev() {
            if self.depth_of.last().is_some_and(|(last, _)| last == v) {
                self.depth_of.pop();
            } else {
                self.depth_of.shift_remove(v);
            }
        }
    }

    /// Whether `v` has entered the frontier.
    #[must_use]
    pub fn contains(&self, v: &V) -> bool {
        self.depth_of.contains_key(v)
    }

    /// Depth at which `v` entered the frontier.
    #[must_use]
    pub fn depth(&self, v: &V) -> Option<usize> {
        self.depth_of.get(v).copied()
    }

    /// Frontier vertices not rejected by `mapped`, in insertion order.
    pub fn open<'a>(&'a self, mapped: impl Fn(&V) -> bool + 'a) -> impl Iterator<Item = V> + 'a {
        self.depth_of.keys().copied().filter(move |v| !mapped(v))
    }

    /// Number of vertices ever added and not retracted.
    #[must_use]
    pub fn len(&self) -> usize {
        self.depth_of.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.depth_of.is_empty()
    }
}

/// Pattern and target frontiers grown in lockstep, one trail entry per
/// extension so each extension can be undone exactly.
#[derive(Clone, Debug)]
pub(crate) struct PairedTerminals<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    pub(crate) pattern: TerminalSet<P>,
    pub(crate) target: TerminalSet<T>,
    trail: Vec<(Vec<P>, Vec<T>)>,
}

impl<P, T> PairedTerminals<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    pub(crate) fn new() -> Self {
        Self {
            pattern: TerminalSet::new(),
            target: TerminalSet::new(),
            trail: Vec::new(),
        }
    }

    /// Record the neighbors of a freshly mapped pair.
    pub(crate) fn push(
        &mut self,
        depth: usize,
        pattern_neighbors: impl IntoIterator<Item = P>,
        target_neighbors: impl IntoIterator<Item = T>,
        pattern_mapped: impl Fn(&P) -> bool,
        target_mapped: impl Fn(&T) -> bool,
    ) {
        let added_p = self.pattern.extend(depth, pattern_neighbors, pattern_mapped);
        let added_t = self.target.extend(depth, target_neighbors, target_mapped);
        self.trail.push((added_p, added_t));
    }

    /// Undo the most recent [`PairedTerminals::push`].
    pub(crate) fn pop(&mut self) {
        if let Some((added_p, added_t)) = self.trail.pop() {
            self.pattern.retract(&added_p);
            self.target.retract(&added_t);
        }
    }
}
