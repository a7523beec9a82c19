//! Named, immutable groups of relations.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::relation::Relation;

/// An immutable, named set of [`Relation`]s.
///
/// Sets are value objects: two sets holding the same relations are equal
/// (and hash the same) regardless of their names or how they were built.
/// Membership is total; a relation the set has never seen is simply not a
/// member. Duplicate inputs collapse into one member.
#[derive(Clone)]
pub struct RelationSet {
    name: String,
    relations: BTreeSet<Relation>,
}

impl RelationSet {
    /// Build a set, deduplicating the input relations.
    pub fn new<I>(name: impl Into<String>, relations: I) -> Self
    where
        I: IntoIterator<Item = Relation>,
    {
        Self {
            name: name.into(),
            relations: relations.into_iter().collect(),
        }
    }

    /// Build a set named after its members, joined like [`union`](Self::union).
    pub fn of<I>(relations: I) -> Self
    where
        I: IntoIterator<Item = Relation>,
    {
        let relations: BTreeSet<Relation> = relations.into_iter().collect();
        let name = relations
            .iter()
            .map(Relation::id)
            .collect::<Vec<_>>()
            .join("+");
        Self { name, relations }
    }

    /// A set with no members.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, std::iter::empty())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if `relation` is a member.
    pub fn contains(&self, relation: &Relation) -> bool {
        self.relations.contains(relation)
    }

    /// Membership test by relation id.
    pub fn contains_id(&self, id: &str) -> bool {
        self.relations.contains(id)
    }

    /// A new set holding the members of both sets, named `"<self>+<other>"`.
    pub fn union(&self, other: &RelationSet) -> RelationSet {
        Self {
            name: format!("{}+{}", self.name, other.name),
            relations: self.relations.union(&other.relations).cloned().collect(),
        }
    }

    /// A new set holding the members common to both sets.
    pub fn intersection(&self, other: &RelationSet) -> RelationSet {
        Self {
            name: format!("{}&{}", self.name, other.name),
            relations: self
                .relations
                .intersection(&other.relations)
                .cloned()
                .collect(),
        }
    }

    /// A new set holding the members of `self` that are not in `other`.
    pub fn difference(&self, other: &RelationSet) -> RelationSet {
        Self {
            name: format!("{}-{}", self.name, other.name),
            relations: self
                .relations
                .difference(&other.relations)
                .cloned()
                .collect(),
        }
    }

    /// The same members under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> RelationSet {
        Self {
            name: name.into(),
            relations: self.relations.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Members ordered by relation id.
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }
}

impl PartialEq for RelationSet {
    fn eq(&self, other: &Self) -> bool {
        self.relations == other.relations
    }
}

impl Eq for RelationSet {}

impl Hash for RelationSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.relations.hash(state);
    }
}

impl fmt::Debug for RelationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelationSet")
            .field("name", &self.name)
            .field(
                "relations",
                &self.relations.iter().map(Relation::id).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<'a> IntoIterator for &'a RelationSet {
    type Item = &'a Relation;
    type IntoIter = std::collections::btree_set::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(id: &str) -> Relation {
        Relation::new(id, id, format!("{id} (reverse)")).unwrap()
    }

    #[test]
    fn duplicates_are_collapsed() {
        let calls = rel("calls");
        let set = RelationSet::new("calls", [calls.clone(), calls.clone(), calls]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn equality_ignores_name_and_construction() {
        let a = RelationSet::new("a", [rel("calls"), rel("imports")]);
        let b = RelationSet::new("b", [rel("imports"), rel("calls")]);
        assert_eq!(a, b);
        assert_ne!(a, RelationSet::new("a", [rel("calls")]));
    }

    #[test]
    fn unknown_relation_is_not_a_member() {
        let set = RelationSet::new("calls", [rel("calls")]);
        assert!(set.contains(&rel("calls")));
        assert!(!set.contains(&rel("imports")));
        assert!(!RelationSet::empty("none").contains(&rel("calls")));
    }

    #[test]
    fn union_does_not_mutate_operands() {
        let a = RelationSet::new("a", [rel("calls")]);
        let b = RelationSet::new("b", [rel("imports")]);
        let both = a.union(&b);

        assert_eq!(both.name(), "a+b");
        assert_eq!(both.len(), 2);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn intersection_and_difference() {
        let a = RelationSet::new("a", [rel("calls"), rel("imports")]);
        let b = RelationSet::new("b", [rel("imports"), rel("contains")]);

        let common = a.intersection(&b);
        assert!(common.contains_id("imports"));
        assert_eq!(common.len(), 1);

        let only_a = a.difference(&b);
        assert!(only_a.contains_id("calls"));
        assert!(!only_a.contains_id("imports"));
    }

    #[test]
    fn iteration_is_ordered_by_id() {
        let set = RelationSet::new("s", [rel("imports"), rel("calls"), rel("contains")]);
        let ids: Vec<_> = set.iter().map(Relation::id).collect();
        assert_eq!(ids, vec!["calls", "contains", "imports"]);
    }

    #[test]
    fn of_names_the_set_after_its_members() {
        let set = RelationSet::of([rel("imports"), rel("calls")]);
        assert_eq!(set.name(), "calls+imports");
        assert_eq!(set, RelationSet::new("other", [rel("calls"), rel("imports")]));
    }
}
