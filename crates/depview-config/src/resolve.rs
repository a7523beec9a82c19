//! Turning a validated [`AnalysisConfig`] into live matchers and pipelines.

use std::sync::Arc;

use depview_graph::{
    AnalysisDocument, DependencyModel, DocumentCatalog, FilterPipeline, ModelRegistry, NodeStage,
    PropertyMap, RelationCatalog, RelationMatcher, RelationSet,
};
use indexmap::IndexMap;
use regex::Regex;

use crate::config::{AnalysisConfig, MatcherConfig, StageConfig};
use crate::error::{ConfigError, Result};
use crate::settings::Settings;
use crate::validation::validate_schema;

/// Everything a config names, built and cross-linked.
#[derive(Debug)]
pub struct ResolvedConfig {
    pub settings: Settings,
    pub catalog: RelationCatalog,
    pub relation_sets: IndexMap<String, Arc<RelationSet>>,
    pub matchers: IndexMap<String, RelationMatcher>,
    pub models: ModelRegistry,
    pub pipelines: IndexMap<String, FilterPipeline>,
    pub documents: DocumentCatalog<PropertyMap>,
}

impl ResolvedConfig {
    pub fn relation_set(&self, name: &str) -> Result<&Arc<RelationSet>> {
        self.relation_sets
            .get(name)
            .ok_or_else(|| ConfigError::UnknownRelationSet(name.to_string()))
    }

    pub fn matcher(&self, name: &str) -> Result<&RelationMatcher> {
        self.matchers
            .get(name)
            .ok_or_else(|| ConfigError::UnknownMatcher(name.to_string()))
    }

    pub fn pipeline(&self, name: &str) -> Option<&FilterPipeline> {
        self.pipelines.get(name)
    }
}

impl AnalysisConfig {
    /// Validate, then build every relation, set, matcher, model, pipeline
    /// and document.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        validate_schema(self)?;

        let catalog = RelationCatalog::from_relations(
            self.relations
                .iter()
                .map(|descriptor| descriptor.build())
                .collect::<depview_graph::Result<Vec<_>>>()?,
        )?;

        let mut relation_sets = IndexMap::new();
        for (name, ids) in &self.relation_sets {
            let members = ids
                .iter()
                .map(|id| catalog.resolve(id))
                .collect::<depview_graph::Result<Vec<_>>>()?;
            let set = RelationSet::new(name, members);
            if set.is_empty() {
                tracing::warn!(set = %name, "relation set is empty; matchers scoped to it deny everything");
            }
            relation_sets.insert(name.clone(), Arc::new(set));
        }

        let mut matchers = IndexMap::new();
        for name in self.matchers.keys() {
            let mut visiting = Vec::new();
            let matcher = self.build_matcher(name, &relation_sets, &mut visiting)?;
            matchers.insert(name.clone(), matcher);
        }

        let mut models = ModelRegistry::new();
        for model in &self.models {
            let relations = model
                .relations
                .iter()
                .map(|id| catalog.resolve(id))
                .collect::<depview_graph::Result<Vec<_>>>()?;
            models.register(
                DependencyModel::builder(&model.id)
                    .node_kinds(model.node_kinds.iter().cloned())
                    .relations(relations)
                    .build()?,
            )?;
        }

        let mut pipelines = IndexMap::new();
        for filter in &self.filters {
            let stages = filter
                .stages
                .iter()
                .map(|stage| build_stage(stage, &matchers))
                .collect::<Result<Vec<_>>>()?;
            if filter.stages.iter().any(excludes_everything) {
                tracing::warn!(filter = %filter.name, "filter has a stage that excludes every node");
            }
            pipelines.insert(
                filter.name.clone(),
                FilterPipeline::from_stages(&filter.name, stages),
            );
        }

        let documents = self
            .documents
            .iter()
            .map(|document| {
                AnalysisDocument::new(
                    &document.name,
                    document.matcher.clone(),
                    document.properties.clone(),
                )
            })
            .collect::<depview_graph::Result<DocumentCatalog<_>>>()?;

        tracing::debug!(
            relations = catalog.len(),
            relation_sets = relation_sets.len(),
            matchers = matchers.len(),
            models = models.len(),
            pipelines = pipelines.len(),
            documents = documents.len(),
            "resolved configuration"
        );

        Ok(ResolvedConfig {
            settings: self.settings.clone(),
            catalog,
            relation_sets,
            matchers,
            models,
            pipelines,
            documents,
        })
    }

    fn build_matcher(
        &self,
        name: &str,
        sets: &IndexMap<String, Arc<RelationSet>>,
        visiting: &mut Vec<String>,
    ) -> Result<RelationMatcher> {
        if visiting.iter().any(|seen| seen == name) {
            visiting.push(name.to_string());
            return Err(ConfigError::schema(
                format!("matcher cycle: {}", visiting.join(" -> ")),
                "Composite matchers cannot refer back to themselves",
            ));
        }
        let config = self
            .matchers
            .get(name)
            .ok_or_else(|| ConfigError::UnknownMatcher(name.to_string()))?;

        visiting.push(name.to_string());
        let matcher = match config {
            MatcherConfig::Scoped {
                set,
                forward,
                reverse,
            } => {
                let set = sets
                    .get(set)
                    .ok_or_else(|| ConfigError::UnknownRelationSet(set.clone()))?;
                RelationMatcher::scoped(Arc::clone(set), *forward, *reverse)
            }
            MatcherConfig::All { of } => RelationMatcher::AllOf(
                of.iter()
                    .map(|part| self.build_matcher(part, sets, visiting))
                    .collect::<Result<_>>()?,
            ),
            MatcherConfig::Any { of } => RelationMatcher::AnyOf(
                of.iter()
                    .map(|part| self.build_matcher(part, sets, visiting))
                    .collect::<Result<_>>()?,
            ),
            MatcherConfig::Deny => RelationMatcher::DenyAll,
        };
        visiting.pop();
        Ok(matcher)
    }
}

/// Stages that can never include a node, whatever the graph.
fn excludes_everything(stage: &StageConfig) -> bool {
    match stage {
        StageConfig::NodeKinds { kinds } => kinds.is_empty(),
        StageConfig::Members { ids } => ids.is_empty(),
        StageConfig::Any { stages } => stages.iter().all(excludes_everything),
        StageConfig::All { stages } => stages.iter().any(excludes_everything),
        _ => false,
    }
}

fn build_stage(
    stage: &StageConfig,
    matchers: &IndexMap<String, RelationMatcher>,
) -> Result<NodeStage> {
    Ok(match stage {
        StageConfig::NodeKinds { kinds } => NodeStage::kinds(kinds.iter().cloned()),
        StageConfig::NamePattern { pattern } => {
            NodeStage::NamePattern(Regex::new(pattern).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })?)
        }
        StageConfig::Members { ids } => NodeStage::members(ids.iter().map(String::as_str)),
        StageConfig::Degree(degree) => {
            let matcher = matchers
                .get(&degree.matcher)
                .ok_or_else(|| ConfigError::UnknownMatcher(degree.matcher.clone()))?;
            NodeStage::degree(matcher.clone(), degree.mode, degree.range.to_range()?)
        }
        StageConfig::Not { stage } => build_stage(stage, matchers)?.negate(),
        StageConfig::All { stages } => NodeStage::AllOf(
            stages
                .iter()
                .map(|stage| build_stage(stage, matchers))
                .collect::<Result<_>>()?,
        ),
        StageConfig::Any { stages } => NodeStage::AnyOf(
            stages
                .iter()
                .map(|stage| build_stage(stage, matchers))
                .collect::<Result<_>>()?,
        ),
    })
}
