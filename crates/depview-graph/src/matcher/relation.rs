//! The closed set of configurable edge matchers.

use std::sync::Arc;

use super::EdgeMatcher;
use crate::relation::Relation;
use crate::relation_set::RelationSet;

/// Configurable edge matcher.
///
/// Every configuration a filter or traversal can carry is one of these
/// variants, so evaluation stays exhaustive:
///
/// - [`DenyAll`](Self::DenyAll) - closed for every relation.
/// - [`Scoped`](Self::Scoped) - the direction policy applies to members of
///   the set; everything else is closed.
/// - [`AllOf`](Self::AllOf) - open only where every component is open.
/// - [`AnyOf`](Self::AnyOf) - open where at least one component is open.
///
/// Empty combinators are closed, so composition never opens traversal by
/// accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationMatcher {
    DenyAll,
    Scoped {
        set: Arc<RelationSet>,
        forward: bool,
        reverse: bool,
    },
    AllOf(Vec<RelationMatcher>),
    AnyOf(Vec<RelationMatcher>),
}

impl RelationMatcher {
    /// Scope a direction policy to the members of `set`.
    pub fn scoped(set: impl Into<Arc<RelationSet>>, forward: bool, reverse: bool) -> Self {
        RelationMatcher::Scoped {
            set: set.into(),
            forward,
            reverse,
        }
    }

    /// Members of `set` are traversable source → target only.
    pub fn forward(set: impl Into<Arc<RelationSet>>) -> Self {
        Self::scoped(set, true, false)
    }

    /// Members of `set` are traversable target → source only.
    pub fn reverse(set: impl Into<Arc<RelationSet>>) -> Self {
        Self::scoped(set, false, true)
    }

    /// Members of `set` are traversable both ways.
    pub fn both(set: impl Into<Arc<RelationSet>>) -> Self {
        Self::scoped(set, true, true)
    }

    /// AND-compose with another matcher.
    ///
    /// An empty `AllOf` denies everything, so it absorbs `other`.
    pub fn and(self, other: RelationMatcher) -> Self {
        match self {
            RelationMatcher::AllOf(parts) if parts.is_empty() => RelationMatcher::AllOf(parts),
            RelationMatcher::AllOf(mut parts) => {
                parts.push(other);
                RelationMatcher::AllOf(parts)
            }
            first => RelationMatcher::AllOf(vec![first, other]),
        }
    }

    /// OR-compose with another matcher.
    pub fn or(self, other: RelationMatcher) -> Self {
        match self {
            RelationMatcher::AnyOf(mut parts) => {
                parts.push(other);
                RelationMatcher::AnyOf(parts)
            }
            first => RelationMatcher::AnyOf(vec![first, other]),
        }
    }

    fn evaluate(&self, relation: &Relation, forward: bool) -> bool {
        match self {
            RelationMatcher::DenyAll => false,
            RelationMatcher::Scoped {
                set,
                forward: allow_forward,
                reverse: allow_reverse,
            } => {
                let allowed = if forward { *allow_forward } else { *allow_reverse };
                allowed && set.contains(relation)
            }
            RelationMatcher::AllOf(parts) => {
                !parts.is_empty() && parts.iter().all(|part| part.evaluate(relation, forward))
            }
            RelationMatcher::AnyOf(parts) => {
                parts.iter().any(|part| part.evaluate(relation, forward))
            }
        }
    }
}

impl Default for RelationMatcher {
    fn default() -> Self {
        RelationMatcher::DenyAll
    }
}

impl EdgeMatcher for RelationMatcher {
    fn relation_forward(&self, relation: &Relation) -> bool {
        self.evaluate(relation, true)
    }

    fn relation_reverse(&self, relation: &Relation) -> bool {
        self.evaluate(relation, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(id: &str, forward: &str, reverse: &str) -> Relation {
        Relation::new(id, forward, reverse).unwrap()
    }

    #[test]
    fn forward_only_scope() {
        let calls = rel("calls", "calls", "called by");
        let imports = rel("imports", "imports", "imported by");
        let set = RelationSet::new("calls", [calls.clone()]);

        let matcher = RelationMatcher::forward(set);
        assert!(matcher.relation_forward(&calls));
        assert!(!matcher.relation_reverse(&calls));
        assert!(!matcher.relation_forward(&imports));
        assert!(!matcher.relation_reverse(&imports));
    }

    #[test]
    fn identical_labels_are_matched_per_direction() {
        let peer = rel("peer", "peer", "peer");
        let matcher = RelationMatcher::reverse(RelationSet::new("peers", [peer.clone()]));
        assert!(!matcher.relation_forward(&peer));
        assert!(matcher.relation_reverse(&peer));
    }

    #[test]
    fn and_requires_agreement() {
        let calls = rel("calls", "calls", "called by");
        let imports = rel("imports", "imports", "imported by");

        let wide = RelationMatcher::both(RelationSet::new("wide", [calls.clone(), imports.clone()]));
        let narrow = RelationMatcher::forward(RelationSet::new("narrow", [calls.clone()]));
        let matcher = wide.and(narrow);

        assert!(matcher.relation_forward(&calls));
        assert!(!matcher.relation_reverse(&calls));
        assert!(!matcher.relation_forward(&imports));
    }

    #[test]
    fn or_takes_any() {
        let calls = rel("calls", "calls", "called by");
        let imports = rel("imports", "imports", "imported by");

        let matcher = RelationMatcher::forward(RelationSet::new("c", [calls.clone()]))
            .or(RelationMatcher::reverse(RelationSet::new("i", [imports.clone()])));

        assert!(matcher.relation_forward(&calls));
        assert!(!matcher.relation_reverse(&calls));
        assert!(!matcher.relation_forward(&imports));
        assert!(matcher.relation_reverse(&imports));
    }

    #[test]
    fn empty_combinators_stay_closed() {
        let calls = rel("calls", "calls", "called by");
        for matcher in [
            RelationMatcher::AllOf(Vec::new()),
            RelationMatcher::AnyOf(Vec::new()),
            RelationMatcher::default(),
        ] {
            assert!(!matcher.relation_forward(&calls));
            assert!(!matcher.relation_reverse(&calls));
        }
    }

    #[test]
    fn empty_all_of_absorbs_and() {
        let calls = rel("calls", "calls", "called by");
        let open = RelationMatcher::both(RelationSet::new("calls", [calls.clone()]));
        assert!(open.relation_forward(&calls));

        let matcher = RelationMatcher::AllOf(Vec::new()).and(open);
        assert!(!matcher.relation_forward(&calls));
        assert!(!matcher.relation_reverse(&calls));
    }

    #[test]
    fn chained_builders_flatten() {
        let set = RelationSet::new("s", [rel("calls", "calls", "called by")]);
        let matcher = RelationMatcher::forward(set.clone())
            .and(RelationMatcher::both(set.clone()))
            .and(RelationMatcher::forward(set));
        match matcher {
            RelationMatcher::AllOf(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected AllOf, got {other:?}"),
        }
    }
}
