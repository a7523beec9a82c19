//! Registration tables and document selection.
//!
//! Analyses are not discovered at runtime. The caller builds a
//! [`ModelRegistry`] and a [`DocumentCatalog`] at startup and passes them to
//! whatever needs them.

use rustc_hash::FxHashMap as HashMap;

use crate::document::AnalysisDocument;
use crate::model::DependencyModel;
use crate::relation::{Relation, RelationCatalog};
use crate::{Error, Result};

/// Every document in `candidates` that applies to `model`, in candidate order.
///
/// All candidates are evaluated; ties are left to the caller.
pub fn select_for_model<'a, T>(
    candidates: &'a [AnalysisDocument<T>],
    model: &DependencyModel,
) -> Vec<&'a AnalysisDocument<T>> {
    let selected: Vec<_> = candidates
        .iter()
        .filter(|document| document.for_model(model))
        .collect();

    tracing::debug!(
        model = model.id(),
        candidates = candidates.len(),
        selected = selected.len(),
        "selected analysis documents"
    );
    selected
}

/// The first document in `candidates` that applies to `model`.
pub fn best_for_model<'a, T>(
    candidates: &'a [AnalysisDocument<T>],
    model: &DependencyModel,
) -> Option<&'a AnalysisDocument<T>> {
    candidates.iter().find(|document| document.for_model(model))
}

/// Dependency models registered by graph-producing analyses.
///
/// One model per id. Relations are shared across models only when they
/// agree on labels; a relation id bound to different labels by two models is
/// rejected.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: Vec<DependencyModel>,
    index: HashMap<String, usize>,
    relations: RelationCatalog,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model contributed by an analysis.
    pub fn register(&mut self, model: DependencyModel) -> Result<()> {
        if self.index.contains_key(model.id()) {
            return Err(Error::DuplicateModel(model.id().to_string()));
        }

        // Validate every relation before touching the catalog so a rejected
        // model leaves the registry unchanged.
        for relation in model.relations() {
            if let Some(existing) = self.relations.get(relation.id()) {
                if existing.forward_label() != relation.forward_label()
                    || existing.reverse_label() != relation.reverse_label()
                {
                    return Err(Error::Configuration(format!(
                        "model '{}' redefines relation '{}'",
                        model.id(),
                        relation.id()
                    )));
                }
            }
        }
        for relation in model.relations() {
            self.relations.insert(relation.clone())?;
        }

        tracing::debug!(
            model = model.id(),
            node_kinds = model.node_kinds().len(),
            relations = model.relations().len(),
            "registered dependency model"
        );
        self.index.insert(model.id().to_string(), self.models.len());
        self.models.push(model);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&DependencyModel> {
        self.index.get(id).map(|&position| &self.models[position])
    }

    /// Find a relation contributed by any registered model.
    pub fn relation(&self, id: &str) -> Option<&Relation> {
        self.relations.get(id)
    }

    /// Every contributed relation, for resolving persisted relation ids.
    pub fn relation_catalog(&self) -> &RelationCatalog {
        &self.relations
    }

    /// Models in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyModel> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Ordered list of candidate analysis documents.
#[derive(Debug, Clone)]
pub struct DocumentCatalog<T> {
    documents: Vec<AnalysisDocument<T>>,
}

impl<T> Default for DocumentCatalog<T> {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
        }
    }
}

impl<T> DocumentCatalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, document: AnalysisDocument<T>) {
        self.documents.push(document);
    }

    /// Documents applicable to `model`, in insertion order.
    pub fn select(&self, model: &DependencyModel) -> Vec<&AnalysisDocument<T>> {
        select_for_model(&self.documents, model)
    }

    pub fn best(&self, model: &DependencyModel) -> Option<&AnalysisDocument<T>> {
        best_for_model(&self.documents, model)
    }

    pub fn by_name(&self, name: &str) -> Option<&AnalysisDocument<T>> {
        self.documents
            .iter()
            .find(|document| document.name() == name)
    }

    pub fn documents(&self) -> &[AnalysisDocument<T>] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<T> FromIterator<AnalysisDocument<T>> for DocumentCatalog<T> {
    fn from_iter<I: IntoIterator<Item = AnalysisDocument<T>>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelMatcher;

    fn fs_model() -> DependencyModel {
        DependencyModel::builder("fs")
            .node_kinds(["file", "directory"])
            .relation(Relation::new("contains", "contains", "contained in").unwrap())
            .build()
            .unwrap()
    }

    fn java_model() -> DependencyModel {
        DependencyModel::builder("java")
            .node_kinds(["type", "method"])
            .relation(Relation::new("calls", "calls", "called by").unwrap())
            .relation(Relation::new("contains", "contains", "contained in").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn selection_preserves_candidate_order() {
        let docs = vec![
            AnalysisDocument::new("fs tree", ModelMatcher::model("fs"), ()).unwrap(),
            AnalysisDocument::new("java calls", ModelMatcher::model("java"), ()).unwrap(),
            AnalysisDocument::new("anything", ModelMatcher::Any, ()).unwrap(),
        ];

        let names: Vec<_> = select_for_model(&docs, &java_model())
            .into_iter()
            .map(AnalysisDocument::name)
            .collect();
        assert_eq!(names, vec!["java calls", "anything"]);

        let best = best_for_model(&docs, &fs_model()).unwrap();
        assert_eq!(best.name(), "fs tree");
    }

    #[test]
    fn registry_rejects_duplicate_models() {
        let mut registry = ModelRegistry::new();
        registry.register(fs_model()).unwrap();
        let err = registry.register(fs_model()).unwrap_err();
        assert_eq!(err, Error::DuplicateModel("fs".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn registry_shares_agreeing_relations() {
        let mut registry = ModelRegistry::new();
        registry.register(fs_model()).unwrap();
        registry.register(java_model()).unwrap();

        assert_eq!(registry.relation_catalog().len(), 2);
        assert!(registry.relation("calls").is_some());
        let ids: Vec<_> = registry.iter().map(DependencyModel::id).collect();
        assert_eq!(ids, vec!["fs", "java"]);
    }

    #[test]
    fn registry_rejects_aliased_relation_without_side_effects() {
        let mut registry = ModelRegistry::new();
        registry.register(fs_model()).unwrap();

        let conflicting = DependencyModel::builder("js")
            .relation(Relation::new("defines", "defines", "defined in").unwrap())
            .relation(Relation::new("contains", "holds", "held by").unwrap())
            .build()
            .unwrap();
        assert!(registry.register(conflicting).is_err());
        assert!(registry.get("js").is_none());
        assert!(registry.relation("defines").is_none());
    }

    #[test]
    fn catalog_lookups() {
        let catalog: DocumentCatalog<()> = [
            AnalysisDocument::new("a", ModelMatcher::model("fs"), ()).unwrap(),
            AnalysisDocument::new("b", ModelMatcher::model("fs"), ()).unwrap(),
        ]
        .into_iter()
        .collect();

        assert_eq!(catalog.select(&fs_model()).len(), 2);
        assert_eq!(catalog.best(&fs_model()).map(AnalysisDocument::name), Some("a"));
        assert!(catalog.best(&java_model()).is_none());
        assert!(catalog.by_name("b").is_some());
    }
}
