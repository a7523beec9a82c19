//! Dependency models and the matchers that test analyses against them.
//!
//! A [`DependencyModel`] is the schema a graph-producing analysis
//! contributes: the node kinds it emits and the relation kinds it draws
//! edges with. [`ModelMatcher`] decides whether an analysis document applies
//! to graphs produced under a given model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::relation::Relation;
use crate::{Error, Result};

/// Schema of node kinds and relation kinds contributed by one analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyModel {
    id: String,
    node_kinds: BTreeSet<String>,
    relations: Vec<Relation>,
}

impl DependencyModel {
    /// Start building a model for the analysis identified by `id`.
    pub fn builder(id: impl Into<String>) -> DependencyModelBuilder {
        DependencyModelBuilder {
            id: id.into(),
            node_kinds: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Matching key of this model.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_kinds(&self) -> &BTreeSet<String> {
        &self.node_kinds
    }

    /// Contributed relations, in contribution order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn has_node_kind(&self, kind: &str) -> bool {
        self.node_kinds.contains(kind)
    }

    pub fn has_relation(&self, id: &str) -> bool {
        self.relations.iter().any(|relation| relation.id() == id)
    }

    /// Relation-kind tags (relation ids), in contribution order.
    pub fn relation_kinds(&self) -> impl Iterator<Item = &str> {
        self.relations.iter().map(Relation::id)
    }
}

/// Builder for [`DependencyModel`].
#[derive(Debug, Clone)]
pub struct DependencyModelBuilder {
    id: String,
    node_kinds: Vec<String>,
    relations: Vec<Relation>,
}

impl DependencyModelBuilder {
    pub fn node_kind(mut self, kind: impl Into<String>) -> Self {
        self.node_kinds.push(kind.into());
        self
    }

    pub fn node_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.node_kinds.extend(kinds.into_iter().map(Into::into));
        self
    }

    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    pub fn relations<I>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = Relation>,
    {
        self.relations.extend(relations);
        self
    }

    /// Finish the model.
    ///
    /// A node kind or relation contributed twice would alias silently, so it
    /// is rejected as a configuration error, as is a blank id or tag.
    pub fn build(self) -> Result<DependencyModel> {
        if self.id.trim().is_empty() {
            return Err(Error::Configuration(
                "dependency model id cannot be empty".to_string(),
            ));
        }

        let mut node_kinds = BTreeSet::new();
        for kind in self.node_kinds {
            if kind.trim().is_empty() {
                return Err(Error::Configuration(format!(
                    "model '{}' contributes an empty node kind",
                    self.id
                )));
            }
            if node_kinds.contains(&kind) {
                return Err(Error::Configuration(format!(
                    "model '{}' contributes node kind '{kind}' more than once",
                    self.id
                )));
            }
            node_kinds.insert(kind);
        }

        let mut seen = BTreeSet::new();
        for relation in &self.relations {
            if !seen.insert(relation.id()) {
                return Err(Error::Configuration(format!(
                    "model '{}' contributes relation '{}' more than once",
                    self.id,
                    relation.id()
                )));
            }
        }

        Ok(DependencyModel {
            id: self.id,
            node_kinds,
            relations: self.relations,
        })
    }
}

/// Predicate deciding whether an analysis applies to a [`DependencyModel`].
///
/// Matchers are pure and deterministic. The variants serialize with a
/// snake-case external tag so they can be stored with a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelMatcher {
    /// Applies to every model.
    Any,
    /// Applies to the model with this id only.
    Model(String),
    /// Applies when the model contributes every listed node kind.
    NodeKinds(BTreeSet<String>),
    /// Applies when the model contributes every listed relation id.
    RelationKinds(BTreeSet<String>),
    /// Applies when every component applies. Empty applies to nothing.
    AllOf(Vec<ModelMatcher>),
    /// Applies when any component applies.
    AnyOf(Vec<ModelMatcher>),
}

impl ModelMatcher {
    pub fn model(id: impl Into<String>) -> Self {
        ModelMatcher::Model(id.into())
    }

    pub fn node_kinds<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ModelMatcher::NodeKinds(kinds.into_iter().map(Into::into).collect())
    }

    pub fn relation_kinds<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ModelMatcher::RelationKinds(ids.into_iter().map(Into::into).collect())
    }

    /// Returns `true` if an analysis bound to this matcher applies to `model`.
    pub fn for_model(&self, model: &DependencyModel) -> bool {
        match self {
            ModelMatcher::Any => true,
            ModelMatcher::Model(id) => model.id() == id,
            ModelMatcher::NodeKinds(kinds) => kinds.iter().all(|kind| model.has_node_kind(kind)),
            ModelMatcher::RelationKinds(ids) => ids.iter().all(|id| model.has_relation(id)),
            ModelMatcher::AllOf(parts) => {
                !parts.is_empty() && parts.iter().all(|part| part.for_model(model))
            }
            ModelMatcher::AnyOf(parts) => parts.iter().any(|part| part.for_model(model)),
        }
    }
}
