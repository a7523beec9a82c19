//! Serializable shapes for relation sets and analysis documents.
//!
//! The persistence layer stores these as tagged records. Relations are
//! written as ids and resolved through a [`RelationCatalog`] on load.

use serde::{Deserialize, Serialize};

use crate::document::{AnalysisDocument, DocumentPayload};
use crate::model::ModelMatcher;
use crate::relation::{Relation, RelationCatalog};
use crate::relation_set::RelationSet;
use crate::{Error, Result};

/// Record tag of a persisted relation set.
pub const RELATION_SET_TAG: &str = "rel-set-info";

/// Record tag of a persisted analysis document.
pub const DOCUMENT_TAG: &str = "analysis-doc-info";

/// Persisted form of a [`RelationSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSetDescriptor {
    pub name: String,
    /// Relation ids, ordered by id.
    #[serde(default)]
    pub relations: Vec<String>,
}

impl RelationSetDescriptor {
    pub fn describe(set: &RelationSet) -> Self {
        Self {
            name: set.name().to_string(),
            relations: set.iter().map(|relation| relation.id().to_string()).collect(),
        }
    }

    /// Rebuild the set. Unknown or blank relation ids are configuration
    /// errors; duplicates collapse. The name is restored as written, so any
    /// set [`RelationSet`] can build survives the round trip.
    pub fn resolve(&self, catalog: &RelationCatalog) -> Result<RelationSet> {
        let relations = self
            .relations
            .iter()
            .map(|id| catalog.resolve(id))
            .collect::<Result<Vec<Relation>>>()?;
        Ok(RelationSet::new(&self.name, relations))
    }
}

/// Persisted form of an [`AnalysisDocument`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDescriptor<P> {
    pub name: String,
    pub matcher: ModelMatcher,
    pub payload: P,
}

impl<P: Clone> DocumentDescriptor<P> {
    pub fn describe(document: &AnalysisDocument<P>) -> Self {
        Self {
            name: document.name().to_string(),
            matcher: (**document.matcher()).clone(),
            payload: document.payload().clone(),
        }
    }
}

impl<P: DocumentPayload> DocumentDescriptor<P> {
    pub fn into_document(self) -> Result<AnalysisDocument<P>> {
        AnalysisDocument::new(self.name, self.matcher, self.payload)
    }
}

/// A tagged persistence record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record<P> {
    #[serde(rename = "rel-set-info")]
    RelationSet(RelationSetDescriptor),
    #[serde(rename = "analysis-doc-info")]
    Document(DocumentDescriptor<P>),
}

impl<P> Record<P> {
    /// The record's stable tag.
    pub fn tag(&self) -> &'static str {
        match self {
            Record::RelationSet(_) => RELATION_SET_TAG,
            Record::Document(_) => DOCUMENT_TAG,
        }
    }
}

impl<P: Serialize> Record<P> {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize {}: {e}", self.tag())))
    }
}

impl<P: for<'de> Deserialize<'de>> Record<P> {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Serialization(format!("Failed to parse record: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PropertyMap;

    fn catalog() -> RelationCatalog {
        RelationCatalog::from_relations([
            Relation::new("calls", "calls", "called by").unwrap(),
            Relation::new("imports", "imports", "imported by").unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn relation_set_round_trip_is_lossless() {
        let catalog = catalog();
        let set = RelationSet::new(
            "code",
            [
                catalog.resolve("imports").unwrap(),
                catalog.resolve("calls").unwrap(),
            ],
        );

        let record: Record<()> = Record::RelationSet(RelationSetDescriptor::describe(&set));
        let json = record.to_json().unwrap();
        assert!(json.contains(RELATION_SET_TAG));

        let Record::RelationSet(descriptor) = Record::<()>::from_json(&json).unwrap() else {
            panic!("expected a relation set record");
        };
        let restored = descriptor.resolve(&catalog).unwrap();
        assert_eq!(restored, set);
        assert_eq!(restored.name(), "code");
    }

    #[test]
    fn unresolvable_ids_are_configuration_errors() {
        let descriptor = RelationSetDescriptor {
            name: "broken".to_string(),
            relations: vec!["calls".to_string(), String::new()],
        };
        let err = descriptor.resolve(&catalog()).unwrap_err();
        assert!(err.is_configuration());

        let unknown = RelationSetDescriptor {
            name: "unknown".to_string(),
            relations: vec!["extends".to_string()],
        };
        assert_eq!(
            unknown.resolve(&catalog()).unwrap_err(),
            Error::UnknownRelation("extends".to_string())
        );
    }

    #[test]
    fn empty_set_round_trips() {
        let set = RelationSet::of(Vec::new());
        assert_eq!(set.name(), "");

        let record: Record<()> = Record::RelationSet(RelationSetDescriptor::describe(&set));
        let Record::RelationSet(descriptor) = Record::<()>::from_json(&record.to_json().unwrap())
            .unwrap()
        else {
            panic!("expected a relation set record");
        };
        let restored = descriptor.resolve(&RelationCatalog::new()).unwrap();
        assert!(restored.is_empty());
        assert_eq!(restored.name(), set.name());
        assert_eq!(restored, set);
    }

    #[test]
    fn duplicate_ids_collapse() {
        let descriptor = RelationSetDescriptor {
            name: "dup".to_string(),
            relations: vec!["calls".to_string(), "calls".to_string()],
        };
        assert_eq!(descriptor.resolve(&catalog()).unwrap().len(), 1);
    }

    #[test]
    fn document_round_trip() {
        let document = AnalysisDocument::new(
            "call graph",
            ModelMatcher::relation_kinds(["calls"]),
            PropertyMap::new().with("layout", "tree"),
        )
        .unwrap();

        let record = Record::Document(DocumentDescriptor::describe(&document));
        assert_eq!(record.tag(), DOCUMENT_TAG);
        let json = record.to_json().unwrap();

        let Record::Document(descriptor) = Record::<PropertyMap>::from_json(&json).unwrap() else {
            panic!("expected a document record");
        };
        let restored = descriptor.into_document().unwrap();
        assert_eq!(restored.name(), "call graph");
        assert_eq!(**restored.matcher(), **document.matcher());
        assert_eq!(restored.payload(), document.payload());
    }
}
