//! Solution collection and termination.
//!
//! The driver hands every visited mapping to a [`Visitor`]; returning `true`
//! stops the whole search. The mapping passed in is the live one, so anything
//! kept beyond the call must be a snapshot.

use std::hash::Hash;

use crate::frontier::BestElements;
use crate::mapping::Mapping;

/// Receives visited mappings and decides whether the search continues.
pub trait Visitor<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Called once per visited state; `true` requests a stop.
    fn visit(&mut self, mapping: &Mapping<P, T>) -> bool;
}

impl<P, T, F> Visitor<P, T> for F
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
    F: FnMut(&Mapping<P, T>) -> bool,
{
    fn visit(&mut self, mapping: &Mapping<P, T>) -> bool {
        self(mapping)
    }
}

/// Collects snapshots, optionally stopping after a fixed number.
#[derive(Clone, Debug)]
pub struct Collector<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    limit: Option<usize>,
    found: Vec<Mapping<P, T>>,
}

impl<P, T> Collector<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    /// Never stops the search.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            limit: None,
            found: Vec::new(),
        }
    }

    /// Stops once `n` mappings have been collected.
    #[must_use]
    pub const fn first_n(n: usize) -> Self {
        Self {
            limit: Some(n),
            found: Vec::new(),
        }
    }

    /// Stops at the first mapping.
    #[must_use]
    pub const fn first() -> Self {
        Self::first_n(1)
    }

    /// Bounded or unbounded, from an optional limit.
    #[must_use]
    pub const fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            found: Vec::new(),
        }
    }

    /// Whether the limit has been reached.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|n| self.found.len() >= n)
    }

    /// Mappings collected so far.
    #[must_use]
    pub fn found(&self) -> &[Mapping<P, T>] {
        &self.found
    }

    /// Take the collected mappings out.
    #[must_use]
    pub fn into_found(self) -> Vec<Mapping<P, T>> {
        self.found
    }
}

impl<P, T> Visitor<P, T> for Collector<P, T>
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    fn visit(&mut self, mapping: &Mapping<P, T>) -> bool {
        if self.is_full() {
            return true;
        }
        self.found.push(mapping.snapshot());
        self.is_full()
    }
}

/// Counts visits without keeping anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counter {
    /// Number of visits so far.
    pub count: usize,
}

impl<P, T> Visitor<P, T> for Counter
where
    P: Copy + Eq + Hash,
    T: Copy + Eq + Hash,
{
    fn visit(&mut self, _mapping: &Mapping<P, T>) -> bool {
        self.count += 1;
        false
    }
}

/// The frontier keeps the co-optimal mappings seen so far and never stops.
impl<P, T, F> Visitor<P, T> for BestElements<Mapping<P, T>, F>
where
    P: Copy + Eq + Hash + Ord,
    T: Copy + Eq + Hash + Ord,
    F: Fn(&Mapping<P, T>) -> f64,
{
    fn visit(&mut self, mapping: &Mapping<P, T>) -> bool {
        self.add(mapping.snapshot());
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(u8, u8)]) -> Mapping<u8, u8> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn bounded_collector_stops_at_limit() {
        let mut c = Collector::first_n(2);
        assert!(!c.visit(&mapping(&[(0, 0)])));
        assert!(c.visit(&mapping(&[(0, 1)])));
        assert_eq!(c.found().len(), 2);
    }

    #[test]
    fn unbounded_collector_never_stops() {
        let mut c = Collector::all();
        for i in 0..50 {
            assert!(!c.visit(&mapping(&[(0, i)])));
        }
        assert_eq!(c.into_found().len(), 50);
    }

    #[test]
    fn collected_mappings_are_snapshots() {
        let mut live = mapping(&[(0, 0)]);
        let mut c = Collector::all();
        c.visit(&live);
        live.put(1, 1);
        assert_eq!(c.found()[0].len(), 1);
    }

    #[test]
    fn zero_limit_collects_nothing() {
        let mut c = Collector::first_n(0);
        assert!(c.visit(&mapping(&[(0, 0)])));
        assert!(c.found().is_empty());
    }

    #[test]
    fn closures_and_frontier_are_visitors() {
        let mut seen = 0;
        let mut stop_on_second = |_: &Mapping<u8, u8>| {
            seen += 1;
            seen == 2
        };
        assert!(!stop_on_second.visit(&mapping(&[])));
        assert!(stop_on_second.visit(&mapping(&[])));

        let mut best = BestElements::new(|m: &Mapping<u8, u8>| m.len() as f64);
        best.visit(&mapping(&[(0, 0)]));
        best.visit(&mapping(&[(0, 0), (1, 1)]));
        best.visit(&mapping(&[(2, 2)]));
        assert_eq!(best.len(), 1);
        assert_eq!(best.best_value(), 2.0);
    }
}
