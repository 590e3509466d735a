//! Vertex and edge compatibility predicates.
//!
//! A matcher is queried many times per state, so implementations are expected
//! to be pure and cheap.

/// Decides whether a pattern element may be matched onto a target element.
pub trait Matcher<A: ?Sized, B: ?Sized> {
    /// `true` when `pattern` is compatible with `target`.
    fn matches(&self, pattern: &A, target: &B) -> bool;
}

/// Accepts every pair. The default whenever no matcher is supplied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlwaysMatch;

impl<A: ?Sized, B: ?Sized> Matcher<A, B> for AlwaysMatch {
    fn matches(&self, _pattern: &A, _target: &B) -> bool {
        true
    }
}

/// Accepts pairs whose payloads compare equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EqMatch;

impl<A, B> Matcher<A, B> for EqMatch
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    fn matches(&self, pattern: &A, target: &B) -> bool {
        pattern == target
    }
}

impl<A, B, F> Matcher<A, B> for F
where
    A: ?Sized,
    B: ?Sized,
    F: Fn(&A, &B) -> bool,
{
    fn matches(&self, pattern: &A, target: &B) -> bool {
        self(pattern, target)
    }
}
