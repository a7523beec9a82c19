//! Inclusion tests over integer cardinalities.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Boolean test over an already-computed count.
///
/// Defined for every non-negative integer. Zero is an ordinary value; no
/// implementation may treat it as "absent".
pub trait CountPredicate: Send + Sync {
    /// Returns `true` iff `value` satisfies this predicate.
    fn include(&self, value: usize) -> bool;
}

impl<F> CountPredicate for F
where
    F: Fn(usize) -> bool + Send + Sync,
{
    fn include(&self, value: usize) -> bool {
        self(value)
    }
}

/// Configurable count ranges. Bounds are inclusive unless named otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountRange {
    Any,
    Equal(usize),
    NotEqual(usize),
    LessThan(usize),
    AtMost(usize),
    GreaterThan(usize),
    AtLeast(usize),
    Between { min: usize, max: usize },
    Outside { min: usize, max: usize },
}

impl CountPredicate for CountRange {
    fn include(&self, value: usize) -> bool {
        match *self {
            CountRange::Any => true,
            CountRange::Equal(n) => value == n,
            CountRange::NotEqual(n) => value != n,
            CountRange::LessThan(n) => value < n,
            CountRange::AtMost(n) => value <= n,
            CountRange::GreaterThan(n) => value > n,
            CountRange::AtLeast(n) => value >= n,
            CountRange::Between { min, max } => (min..=max).contains(&value),
            CountRange::Outside { min, max } => !(min..=max).contains(&value),
        }
    }
}

impl fmt::Display for CountRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountRange::Any => write!(f, "any"),
            CountRange::Equal(n) => write!(f, "== {n}"),
            CountRange::NotEqual(n) => write!(f, "!= {n}"),
            CountRange::LessThan(n) => write!(f, "< {n}"),
            CountRange::AtMost(n) => write!(f, "<= {n}"),
            CountRange::GreaterThan(n) => write!(f, "> {n}"),
            CountRange::AtLeast(n) => write!(f, ">= {n}"),
            CountRange::Between { min, max } => write!(f, "in {min}..={max}"),
            CountRange::Outside { min, max } => write!(f, "not in {min}..={max}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_an_ordinary_value() {
        let positive = CountRange::GreaterThan(0);
        assert!(!positive.include(0));
        assert!(positive.include(1));

        assert!(CountRange::Equal(0).include(0));
        assert!(CountRange::AtMost(0).include(0));
        assert!(!CountRange::NotEqual(0).include(0));
        assert!(CountRange::Between { min: 0, max: 2 }.include(0));
        assert!(!CountRange::LessThan(0).include(0));
    }

    #[test]
    fn at_least_two_differs_from_more_than_one_only_by_spelling() {
        for value in 0..5 {
            assert_eq!(
                CountRange::AtLeast(2).include(value),
                CountRange::GreaterThan(1).include(value)
            );
        }
        assert!(!CountRange::AtLeast(2).include(1));
        assert!(CountRange::AtLeast(2).include(2));
    }

    #[test]
    fn ranges_are_inclusive() {
        let between = CountRange::Between { min: 2, max: 4 };
        let outside = CountRange::Outside { min: 2, max: 4 };
        for value in 0..7 {
            assert_ne!(between.include(value), outside.include(value));
        }
        assert!(between.include(2) && between.include(4));
        assert!(!between.include(5));
    }

    #[test]
    fn inverted_bounds_match_nothing() {
        let empty = CountRange::Between { min: 3, max: 1 };
        assert!((0..10).all(|value| !empty.include(value)));
    }

    #[test]
    fn closures_are_predicates() {
        let even = |value: usize| value % 2 == 0;
        assert!(even.include(0));
        assert!(!even.include(3));
    }

    #[test]
    fn display_is_readable() {
        assert_eq!(CountRange::AtLeast(2).to_string(), ">= 2");
        assert_eq!(CountRange::Between { min: 1, max: 3 }.to_string(), "in 1..=3");
    }
}
