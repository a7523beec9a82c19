//! Edge matchers decide which relation directions a traversal may follow.
//!
//! [`EdgeMatcher`] is the capability every traversal and degree metric is
//! written against. Both hooks default to `false`: a matcher that overrides
//! nothing is the closed, deny-all matcher, and traversal has to be enabled
//! positively by configuration.

mod relation;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::relation::Relation;

pub use relation::RelationMatcher;

/// Traversal direction along a typed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// From the edge's source to its target.
    Forward,
    /// From the edge's target back to its source.
    Reverse,
}

/// Pure decision function over a relation's traversal directions.
///
/// Implementations must be total: any relation, known or not, yields a
/// boolean. Matchers carry no mutable state, so a single instance can be
/// shared across any number of concurrent queries.
pub trait EdgeMatcher: Send + Sync {
    /// Returns `true` if edges of `relation` may be followed source → target.
    fn relation_forward(&self, _relation: &Relation) -> bool {
        false
    }

    /// Returns `true` if edges of `relation` may be followed target → source.
    fn relation_reverse(&self, _relation: &Relation) -> bool {
        false
    }

    /// Dispatch on a [`Direction`].
    fn allows(&self, direction: Direction, relation: &Relation) -> bool {
        match direction {
            Direction::Forward => self.relation_forward(relation),
            Direction::Reverse => self.relation_reverse(relation),
        }
    }

    /// Returns `true` if either direction is open for `relation`.
    fn accepts(&self, relation: &Relation) -> bool {
        self.relation_forward(relation) || self.relation_reverse(relation)
    }
}

/// The base matcher: nothing is traversable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DenyAll;

impl EdgeMatcher for DenyAll {}

impl<M: EdgeMatcher + ?Sized> EdgeMatcher for &M {
    fn relation_forward(&self, relation: &Relation) -> bool {
        (**self).relation_forward(relation)
    }

    fn relation_reverse(&self, relation: &Relation) -> bool {
        (**self).relation_reverse(relation)
    }
}

impl<M: EdgeMatcher + ?Sized> EdgeMatcher for Arc<M> {
    fn relation_forward(&self, relation: &Relation) -> bool {
        (**self).relation_forward(relation)
    }

    fn relation_reverse(&self, relation: &Relation) -> bool {
        (**self).relation_reverse(relation)
    }
}

impl<M: EdgeMatcher + ?Sized> EdgeMatcher for Box<M> {
    fn relation_forward(&self, relation: &Relation) -> bool {
        (**self).relation_forward(relation)
    }

    fn relation_reverse(&self, relation: &Relation) -> bool {
        (**self).relation_reverse(relation)
    }
}
