//! Streaming "ties for the maximum" reducer.

use std::fmt;
use std::hash::Hash;

use indexmap::IndexSet;

/// Keeps every element that achieves the best objective value seen so far.
///
/// A strictly better element replaces the whole set; an equally good one
/// joins it; a worse one is dropped. The running maximum never decreases.
pub struct BestElements<E, F>
where
    E: Eq + Hash,
    F: Fn(&E) -> f64,
{
    objective: F,
    best: f64,
    elements: IndexSet<E>,
}

impl<E, F> BestElements<E, F>
where
    E: Eq + Hash,
    F: Fn(&E) -> f64,
{
    /// Empty frontier; the best value starts at negative infinity.
    pub fn new(objective: F) -> Self {
        Self {
            objective,
            best: f64::NEG_INFINITY,
            elements: IndexSet::new(),
        }
    }

    /// Offer `element`; returns whether it was kept.
    ///
    /// NaN values compare neither greater nor equal and are rejected.
    pub fn add(&mut self, element: E) -> bool {
        let value = (self.objective)(&element);
        if value > self.best {
            self.best = value;
            self.elements.clear();
            self.elements.insert(element);
            true
        } else if value == self.best {
            self.elements.insert(element)
        } else {
            false
        }
    }

    /// The running maximum.
    #[must_use]
    pub const fn best_value(&self) -> f64 {
        self.best
    }

    /// Current co-optimal elements, in the order they were first kept.
    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.elements.iter()
    }

    /// Number of co-optimal elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been kept yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Take the co-optimal elements out.
    #[must_use]
    pub fn into_elements(self) -> Vec<E> {
        self.elements.into_iter().collect()
    }
}

impl<E, F> fmt::Debug for BestElements<E, F>
where
    E: Eq + Hash + fmt::Debug,
    F: Fn(&E) -> f64,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BestElements")
            .field("best", &self.best)
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}
