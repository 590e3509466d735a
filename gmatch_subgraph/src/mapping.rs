//! Bidirectional, insertion-ordered partial mapping between pattern and target vertices.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use indexmap::IndexMap;
use itertools::Itertools;

/// An injective partial function from pattern vertices `P` to target vertices `T`.
///
/// The forward side keeps insertion order so that the most recently inserted
/// pair is always well defined; this is what makes LIFO backtracking possible.
#[derive(Clone)]
pub struct Mapping<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Pattern to target, in insertion order.
    forward: IndexMap<P, T>,
    /// Target to pattern.
    inverse: HashMap<T, P>,
}

impl<P, T> Mapping<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Create an empty mapping.
    #[contracts::debug_ensures(ret.forward.is_empty() && ret.inverse.is_empty())]
    #[must_use]
    pub fn new() -> Self {
        Self {
            forward: IndexMap::new(),
            inverse: HashMap::new(),
        }
    }

    /// Bind `pattern` to `target`.
    ///
    /// Both sides must be unbound; callers (the search states) check this
    /// before calling.
    #[contracts::debug_requires(!self.forward.contains_key(&pattern))]
    #[contracts::debug_requires(!self.inverse.contains_key(&target))]
    #[contracts::debug_ensures(self.forward.len() == self.inverse.len())]
    pub fn put(&mut self, pattern: P, target: T) {
        self.forward.insert(pattern, target);
        self.inverse.insert(target, pattern);
    }

    /// Unbind `pattern`, returning its partner.
    ///
    /// Removing the last inserted key is O(1); removing any other key keeps
    /// the remaining insertion order intact.
    pub fn remove(&mut self, pattern: &P) -> Option<T> {
        let target = self.forward.shift_remove(pattern)?;
        self.inverse.remove(&target);
        Some(target)
    }

    /// Unbind and return the most recently inserted pair.
    pub fn pop(&mut self) -> Option<(P, T)> {
        let (pattern, target) = self.forward.pop()?;
        self.inverse.remove(&target);
        Some((pattern, target))
    }

    /// Target bound to `pattern`, if any.
    #[must_use]
    pub fn get(&self, pattern: &P) -> Option<T> {
        self.forward.get(pattern).copied()
    }

    /// Pattern vertex bound to `target`, if any.
    #[must_use]
    pub fn get_inverse(&self, target: &T) -> Option<P> {
        self.inverse.get(target).copied()
    }

    /// Whether `pattern` is bound.
    #[must_use]
    pub fn contains_pattern(&self, pattern: &P) -> bool {
        self.forward.contains_key(pattern)
    }

    /// Whether `target` is bound.
    #[must_use]
    pub fn contains_target(&self, target: &T) -> bool {
        self.inverse.contains_key(target)
    }

    /// The most recently inserted pattern vertex.
    #[must_use]
    pub fn last_key(&self) -> Option<P> {
        self.forward.last().map(|(p, _)| *p)
    }

    /// Number of bound pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.forward.len(), self.inverse.len());
        self.forward.len()
    }

    /// Whether no pair is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        debug_assert_eq!(self.forward.len(), self.inverse.len());
        self.forward.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (P, T)> + '_ {
        self.forward.iter().map(|(p, t)| (*p, *t))
    }

    /// Bound pattern vertices in insertion order.
    pub fn pattern_vertices(&self) -> impl Iterator<Item = P> + '_ {
        self.forward.keys().copied()
    }

    /// Bound target vertices, in the insertion order of their partners.
    pub fn target_vertices(&self) -> impl Iterator<Item = T> + '_ {
        self.forward.values().copied()
    }

    /// Independent copy for external consumption.
    ///
    /// Live search state keeps mutating after a solution is reported, so
    /// anything handed to a visitor or a caller goes through here.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}

impl<P, T> Mapping<P, T>
where
    P: Copy + Eq + Hash + Ord,
    T: Copy + Eq + Hash + Ord,
{
    /// Pairs sorted by pattern vertex; independent of insertion order.
    #[must_use]
    pub fn sorted_pairs(&self) -> Vec<(P, T)> {
        let mut pairs: Vec<(P, T)> = self.iter().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Sorted, deduplicated set of bound target vertices.
    ///
    /// Two mappings with the same signature cover the same target vertices,
    /// which is how automorphic matches are collapsed.
    #[must_use]
    pub fn target_signature(&self) -> Vec<T> {
        let mut sig: Vec<T> = self.target_vertices().collect();
        sig.sort_unstable();
        sig.dedup();
        sig
    }
}

impl<P, T> Default for Mapping<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Equality ignores insertion order: two mappings are equal when they bind the same pairs.
impl<P, T> PartialEq for Mapping<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.forward == other.forward
    }
}

impl<P, T> Eq for Mapping<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
}

impl<P, T> Hash for Mapping<P, T>
where
    P: Copy + Eq + Hash + Ord,
    T: Copy + Eq + Hash + Ord,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_pairs().hash(state);
    }
}

impl<P, T> fmt::Debug for Mapping<P, T>
where
    P: Copy + Eq + Hash + fmt::Debug,
    T: Copy + Eq + Hash + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.forward.iter()).finish()
    }
}

/// `{p -> t, ...}` in insertion order.
impl<P, T> fmt::Display for Mapping<P, T>
where
    P: Copy + Eq + Hash + fmt::Display,
    T: Copy + Eq + Hash + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.forward
                .iter()
                .format_with(", ", |(p, t), g| g(&format_args!("{p} -> {t}")))
        )
    }
}

impl<P, T> FromIterator<(P, T)> for Mapping<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Later pairs that would break injectivity are skipped.
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (p, t) in iter {
            if !mapping.contains_pattern(&p) && !mapping.contains_target(&t) {
                mapping.put(p, t);
            }
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_and_lookup_both_directions() {
        let mut m: Mapping<u32, char> = Mapping::new();
        m.put(1, 'a');
        m.put(2, 'b');

        assert_eq!(m.get(&1), Some('a'));
        assert_eq!(m.get_inverse(&'b'), Some(2));
        assert_eq!(m.get(&3), None);
        assert_eq!(m.len(), 2);
        assert_eq!(m.last_key(), Some(2));
    }

    #[test]
    fn remove_returns_partner_and_clears_inverse() {
        let mut m: Mapping<u32, char> = Mapping::new();
        m.put(1, 'a');
        m.put(2, 'b');
        m.put(3, 'c');

        assert_eq!(m.remove(&2), Some('b'));
        assert!(!m.contains_target(&'b'));
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![(1, 'a'), (3, 'c')]);
        assert_eq!(m.remove(&2), None);
    }

    #[test]
    fn pop_is_lifo() {
        let mut m: Mapping<u32, char> = Mapping::new();
        m.put(5, 'x');
        m.put(1, 'y');
        assert_eq!(m.pop(), Some((1, 'y')));
        assert_eq!(m.last_key(), Some(5));
        assert_eq!(m.pop(), Some((5, 'x')));
        assert_eq!(m.pop(), None);
        assert!(m.is_empty());
    }

    #[test]
    fn snapshot_is_independent() {
        let mut m: Mapping<u32, u32> = Mapping::new();
        m.put(0, 10);
        let snap = m.snapshot();
        m.put(1, 11);
        assert_eq!(snap.len(), 1);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: Mapping<u32, u32> = [(0, 1), (1, 0)].into_iter().collect();
        let b: Mapping<u32, u32> = [(1, 0), (0, 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.sorted_pairs(), b.sorted_pairs());
    }

    #[test]
    fn from_iter_skips_conflicting_pairs() {
        let m: Mapping<u32, u32> = [(0, 1), (0, 2), (3, 1)].into_iter().collect();
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn display_lists_pairs_in_insertion_order() {
        let m: Mapping<u32, char> = [(2, 'b'), (0, 'a')].into_iter().collect();
        assert_eq!(m.to_string(), "{2 -> b, 0 -> a}");
        assert_eq!(Mapping::<u32, u32>::new().to_string(), "{}");
    }
}
