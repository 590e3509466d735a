//! Lazy candidate-pair algebra.
//!
//! A search state describes the `(pattern, target)` pairs worth trying as a
//! small expression instead of a materialized list: a left scalar product
//! (one pattern vertex against a collection of targets), a cross product of
//! two vertex collections, or an ordered sum of such expressions. Only the
//! operand collections are stored, so the cost of building candidates is
//! `O(|left| + |right|)` even though enumeration yields `|left| * |right|`
//! pairs.
//!
//! Two consumption shapes are offered:
//! - [`PairCursor`]: the flat, single-pass view. It is also an [`Iterator`]
//!   over pairs.
//! - [`NestedPairs`]: the nested view, which yields each outer pattern vertex
//!   together with its shared inner target collection so the inner dimension
//!   can be re-scanned without being re-derived.

use std::collections::VecDeque;
use std::sync::Arc;

use thiserror::Error;

/// Misuse of a [`PairCursor`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CandidateError {
    /// The cursor was advanced after its last pair.
    #[error("candidate sequence has no more elements")]
    Exhausted,
    /// A component of the current pair was requested before the first advance
    /// or after exhaustion.
    #[error("no current candidate pair; the cursor must be advanced first")]
    NoCurrentPair,
}

/// A composable, lazily enumerated sequence of candidate pairs.
#[derive(Clone, Debug)]
pub enum CandidatePairs<U, V> {
    /// No pairs at all.
    Empty,
    /// `(left, v)` for every `v` in `right`.
    LeftScalar {
        /// The fixed pattern vertex.
        left: U,
        /// Target vertices paired with it, in order.
        right: Arc<[V]>,
    },
    /// `(u, v)` for every `u` in `left` (outer) and `v` in `right` (inner).
    Cross {
        /// Outer pattern vertices.
        left: Vec<U>,
        /// Inner target vertices, shared by every outer element.
        right: Arc<[V]>,
    },
    /// Ordered concatenation of sub-sequences.
    Sum(Vec<CandidatePairs<U, V>>),
}

impl<U, V> Default for CandidatePairs<U, V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<U: Clone, V: Clone> CandidatePairs<U, V> {
    /// The empty sequence.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Empty
    }

    /// Exactly one pair.
    pub fn single(left: U, right: V) -> Self {
        Self::LeftScalar {
            left,
            right: Arc::from(vec![right]),
        }
    }

    /// `left` paired with each element of `right`.
    pub fn left_scalar(left: U, right: impl IntoIterator<Item = V>) -> Self {
        let right: Vec<V> = right.into_iter().collect();
        if right.is_empty() {
            return Self::Empty;
        }
        Self::LeftScalar {
            left,
            right: Arc::from(right),
        }
    }

    /// Cross product of two vertex collections.
    ///
    /// `right` is not pulled at all when `left` turns out to be empty.
    pub fn cross(left: impl IntoIterator<Item = U>, right: impl IntoIterator<Item = V>) -> Self {
        let left: Vec<U> = left.into_iter().collect();
        if left.is_empty() {
            return Self::Empty;
        }
        let right: Vec<V> = right.into_iter().collect();
        if right.is_empty() {
            return Self::Empty;
        }
        Self::Cross {
            left,
            right: Arc::from(right),
        }
    }

    /// Ordered concatenation; empty operands vanish and nested sums are flattened.
    pub fn sum(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Self::Empty => {}
                Self::Sum(inner) => flat.extend(inner.into_iter().filter(|p| !p.is_empty())),
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Self::Empty,
            1 => flat.pop().unwrap_or_default(),
            _ => Self::Sum(flat),
        }
    }

    /// Number of pairs an enumeration would yield, computed without enumerating.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty => 0,
            Self::LeftScalar { right, .. } => right.len(),
            Self::Cross { left, right } => left.len() * right.len(),
            Self::Sum(parts) => parts.iter().map(Self::len).sum(),
        }
    }

    /// Whether enumeration yields nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flat, single-pass view.
    #[must_use]
    pub fn cursor(self) -> PairCursor<U, V> {
        PairCursor::new(self)
    }

    /// Nested view: outer pattern vertices with their inner target collections.
    #[must_use]
    pub fn nested(self) -> NestedPairs<U, V> {
        let mut runs = VecDeque::new();
        flatten_into(self, &mut runs);
        NestedPairs { runs }
    }
}

impl<U: Clone, V: Clone> IntoIterator for CandidatePairs<U, V> {
    type Item = (U, V);
    type IntoIter = PairCursor<U, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

/// One outer collection sharing one inner collection.
#[derive(Debug)]
struct Run<U, V> {
    left: std::vec::IntoIter<U>,
    right: Arc<[V]>,
}

fn flatten_into<U, V>(pairs: CandidatePairs<U, V>, runs: &mut VecDeque<Run<U, V>>) {
    match pairs {
        CandidatePairs::Empty => {}
        CandidatePairs::LeftScalar { left, right } => runs.push_back(Run {
            left: vec![left].into_iter(),
            right,
        }),
        CandidatePairs::Cross { left, right } => runs.push_back(Run {
            left: left.into_iter(),
            right,
        }),
        CandidatePairs::Sum(parts) => {
            for part in parts {
                flatten_into(part, runs);
            }
        }
    }
}

/// Flat cursor over a [`CandidatePairs`] expression.
///
/// `advance` moves to the next pair and returns its first component;
/// `second` then reads the second component of that same pair.
#[derive(Debug)]
pub struct PairCursor<U, V> {
    runs: VecDeque<Run<U, V>>,
    /// Outer element currently being paired.
    left: Option<U>,
    /// Inner collection of the run `left` came from.
    right: Arc<[V]>,
    /// Index into `right` of the next pair's second component.
    next_right: usize,
    current: Option<(U, V)>,
}

impl<U: Clone, V: Clone> PairCursor<U, V> {
    fn new(pairs: CandidatePairs<U, V>) -> Self {
        let mut runs = VecDeque::new();
        flatten_into(pairs, &mut runs);
        Self {
            runs,
            left: None,
            right: Arc::from(Vec::new()),
            next_right: 0,
            current: None,
        }
    }

    /// Position on the next pair without consuming it.
    fn seek(&mut self) -> bool {
        loop {
            if self.left.is_some() {
                if self.next_right < self.right.len() {
                    return true;
                }
                self.left = None;
            }
            let Some(run) = self.runs.front_mut() else {
                return false;
            };
            match run.left.next() {
                Some(u) => {
                    self.left = Some(u);
                    self.right = Arc::clone(&run.right);
                    self.next_right = 0;
                }
                None => {
                    self.runs.pop_front();
                }
            }
        }
    }

    /// Whether another pair remains.
    pub fn has_next(&mut self) -> bool {
        self.seek()
    }

    /// Move to the next pair and return its pattern vertex.
    ///
    /// # Errors
    /// [`CandidateError::Exhausted`] once every pair has been produced.
    pub fn advance(&mut self) -> Result<U, CandidateError> {
        if !self.seek() {
            self.current = None;
            return Err(CandidateError::Exhausted);
        }
        let (Some(u), Some(v)) = (self.left.clone(), self.right.get(self.next_right).cloned())
        else {
            self.current = None;
            return Err(CandidateError::Exhausted);
        };
        self.next_right += 1;
        self.current = Some((u.clone(), v));
        Ok(u)
    }

    /// Pattern vertex of the current pair.
    ///
    /// # Errors
    /// [`CandidateError::NoCurrentPair`] before the first advance or after exhaustion.
    pub fn first(&self) -> Result<U, CandidateError> {
        self.current
            .as_ref()
            .map(|(u, _)| u.clone())
            .ok_or(CandidateError::NoCurrentPair)
    }

    /// Target vertex of the current pair.
    ///
    /// # Errors
    /// [`CandidateError::NoCurrentPair`] before the first advance or after exhaustion.
    pub fn second(&self) -> Result<V, CandidateError> {
        self.current
            .as_ref()
            .map(|(_, v)| v.clone())
            .ok_or(CandidateError::NoCurrentPair)
    }
}

impl<U: Clone, V: Clone> Iterator for PairCursor<U, V> {
    type Item = (U, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().ok()?;
        self.current.clone()
    }
}

/// Nested view over a [`CandidatePairs`] expression.
#[derive(Debug)]
pub struct NestedPairs<U, V> {
    runs: VecDeque<Run<U, V>>,
}

impl<U, V> Iterator for NestedPairs<U, V> {
    type Item = (U, Arc<[V]>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let run = self.runs.front_mut()?;
            if let Some(u) = run.left.next() {
                return Some((u, Arc::clone(&run.right)));
            }
            self.runs.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn cross_is_outer_left_inner_right() {
        let pairs: Vec<(u8, char)> = CandidatePairs::cross([1, 2], ['a', 'b', 'c'])
            .into_iter()
            .collect();
        assert_eq!(
            pairs,
            vec![
                (1, 'a'),
                (1, 'b'),
                (1, 'c'),
                (2, 'a'),
                (2, 'b'),
                (2, 'c')
            ]
        );
    }

    #[test]
    fn cross_with_empty_left_never_pulls_right() {
        let pulled = Cell::new(0);
        let right = (0..5).inspect(|_| pulled.set(pulled.get() + 1));
        let pairs: CandidatePairs<u8, i32> = CandidatePairs::cross(Vec::<u8>::new(), right);
        assert!(pairs.is_empty());
        assert_eq!(pulled.get(), 0);
    }

    #[test]
    fn cross_with_empty_right_is_empty() {
        let pairs: CandidatePairs<u8, u8> = CandidatePairs::cross([1, 2, 3], []);
        assert!(matches!(pairs, CandidatePairs::Empty));
        assert_eq!(pairs.cursor().count(), 0);
    }

    #[test]
    fn sum_concatenates_in_order() {
        let a = CandidatePairs::left_scalar(0u8, [10u8, 11]);
        let b = CandidatePairs::cross([1u8, 2], [20u8]);
        let expected: Vec<_> = a.clone().into_iter().chain(b.clone()).collect();

        let sum = CandidatePairs::sum([a, CandidatePairs::empty(), b]);
        assert_eq!(sum.len(), 4);
        assert_eq!(sum.into_iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn sum_keeps_duplicates_from_operands() {
        let a = CandidatePairs::single(1u8, 1u8);
        let sum = CandidatePairs::sum([a.clone(), a]);
        assert_eq!(sum.into_iter().collect::<Vec<_>>(), vec![(1, 1), (1, 1)]);
    }

    #[test]
    fn nested_sums_flatten() {
        let inner = CandidatePairs::sum([
            CandidatePairs::single(1u8, 1u8),
            CandidatePairs::single(2, 2),
        ]);
        let outer = CandidatePairs::sum([inner, CandidatePairs::single(3, 3)]);
        let CandidatePairs::Sum(parts) = &outer else {
            panic!("expected a sum");
        };
        assert_eq!(parts.len(), 3);
        assert_eq!(outer.len(), 3);
    }

    #[test]
    fn cursor_reports_misuse() {
        let mut cursor = CandidatePairs::single(7u8, 'z').cursor();
        assert_eq!(cursor.second(), Err(CandidateError::NoCurrentPair));
        assert!(cursor.has_next());
        assert_eq!(cursor.advance(), Ok(7));
        assert_eq!(cursor.first(), Ok(7));
        assert_eq!(cursor.second(), Ok('z'));
        assert!(!cursor.has_next());
        assert_eq!(cursor.advance(), Err(CandidateError::Exhausted));
        assert_eq!(cursor.second(), Err(CandidateError::NoCurrentPair));
        assert_eq!(cursor.advance(), Err(CandidateError::Exhausted));
    }

    #[test]
    fn has_next_does_not_consume() {
        let mut cursor = CandidatePairs::cross([1u8], [1u8, 2]).cursor();
        assert!(cursor.has_next());
        assert!(cursor.has_next());
        assert_eq!(cursor.next(), Some((1, 1)));
        assert_eq!(cursor.next(), Some((1, 2)));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn nested_shares_inner_collection() {
        let pairs = CandidatePairs::sum([
            CandidatePairs::cross([1u8, 2], ['a', 'b']),
            CandidatePairs::left_scalar(3u8, ['c']),
        ]);
        let nested: Vec<(u8, Arc<[char]>)> = pairs.nested().collect();
        assert_eq!(nested.len(), 3);
        assert!(Arc::ptr_eq(&nested[0].1, &nested[1].1));
        assert_eq!(&*nested[2].1, &['c']);
    }
}
