//! Relation kinds and the catalog that resolves them by id.
//!
//! A [`Relation`] names a directed kind of dependency edge ("calls",
//! "imports", "contains"). It is created once per relation kind and shared by
//! reference across every graph that uses it, so cloning is an `Arc` bump.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug)]
struct RelationInner {
    id: String,
    forward: String,
    reverse: String,
}

/// A directed relationship kind between two node roles.
///
/// Identity is the stable `id`: equality, hashing and ordering ignore the
/// labels. The forward and reverse labels are free text used for display;
/// they may coincide, in which case each direction is still matched on its
/// own.
#[derive(Clone)]
pub struct Relation(Arc<RelationInner>);

impl Relation {
    /// Create a relation kind.
    ///
    /// Returns a configuration error if `id` is blank.
    pub fn new(
        id: impl Into<String>,
        forward: impl Into<String>,
        reverse: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::Configuration(
                "relation id cannot be empty".to_string(),
            ));
        }

        let forward = forward.into();
        let reverse = reverse.into();
        if forward == reverse {
            tracing::debug!(relation = %id, label = %forward, "relation uses the same label in both directions");
        }

        Ok(Self(Arc::new(RelationInner {
            id,
            forward,
            reverse,
        })))
    }

    /// Stable identifier of this relation kind.
    pub fn id(&self) -> &str {
        &self.0.id
    }

    /// Label read from source to target ("calls").
    pub fn forward_label(&self) -> &str {
        &self.0.forward
    }

    /// Label read from target to source ("called by").
    pub fn reverse_label(&self) -> &str {
        &self.0.reverse
    }

    /// Returns `true` if both handles share the same allocation.
    pub fn same_instance(&self, other: &Relation) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The serializable shape of this relation.
    pub fn descriptor(&self) -> RelationDescriptor {
        RelationDescriptor {
            id: self.0.id.clone(),
            forward: self.0.forward.clone(),
            reverse: self.0.reverse.clone(),
        }
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl PartialOrd for Relation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Relation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.id.cmp(&other.0.id)
    }
}

impl Borrow<str> for Relation {
    fn borrow(&self) -> &str {
        &self.0.id
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("id", &self.0.id)
            .field("forward", &self.0.forward)
            .field("reverse", &self.0.reverse)
            .finish()
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.id)
    }
}

/// Serializable form of a [`Relation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub id: String,
    pub forward: String,
    pub reverse: String,
}

impl RelationDescriptor {
    /// Build the relation this descriptor names.
    pub fn build(&self) -> Result<Relation> {
        Relation::new(&self.id, &self.forward, &self.reverse)
    }
}

/// Resolution table from relation id to the shared [`Relation`] instance.
///
/// Persistence shapes and configuration only carry relation ids; the catalog
/// turns them back into the instances graphs are built with. Iteration
/// follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct RelationCatalog {
    by_id: HashMap<String, Relation>,
    order: Vec<Relation>,
}

impl RelationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from relations, rejecting two different relations
    /// that share an id.
    pub fn from_relations<I>(relations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Relation>,
    {
        let mut catalog = Self::new();
        for relation in relations {
            catalog.insert(relation)?;
        }
        Ok(catalog)
    }

    /// Add a relation.
    ///
    /// Re-inserting an identical relation is a no-op. A relation whose id is
    /// already bound to different labels is rejected, since the two would
    /// silently alias.
    pub fn insert(&mut self, relation: Relation) -> Result<()> {
        if let Some(existing) = self.by_id.get(relation.id()) {
            if existing.forward_label() == relation.forward_label()
                && existing.reverse_label() == relation.reverse_label()
            {
                return Ok(());
            }
            return Err(Error::Configuration(format!(
                "relation '{}' is already defined as '{}'/'{}'",
                relation.id(),
                existing.forward_label(),
                existing.reverse_label()
            )));
        }

        self.by_id.insert(relation.id().to_string(), relation.clone());
        self.order.push(relation);
        Ok(())
    }

    /// Look up a relation without failing.
    pub fn get(&self, id: &str) -> Option<&Relation> {
        self.by_id.get(id)
    }

    /// Resolve a relation id, failing on blank or unknown ids.
    pub fn resolve(&self, id: &str) -> Result<Relation> {
        if id.trim().is_empty() {
            return Err(Error::Configuration(
                "missing relation identifier".to_string(),
            ));
        }
        self.by_id
            .get(id)
            .cloned()
            .ok_or_else(|| Error::UnknownRelation(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Relations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Relation> {
        self.order.iter()
    }
}
