//! Pluggable config validation strategies.
//!
//! Validation checks the shape of a config and its name references without
//! building any matcher or pipeline.

use std::collections::HashSet;

use regex::Regex;

use crate::config::{AnalysisConfig, MatcherConfig, StageConfig};
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &AnalysisConfig) -> Result<()>;
}

/// Schema and reference validation.
///
/// # Example
///
/// ```
/// use depview_config::{AnalysisConfig, ConfigValidator, SchemaValidator};
///
/// let config = AnalysisConfig::from_toml_str(r#"
/// [[relations]]
/// id = "calls"
/// forward = "calls"
/// reverse = "called by"
///
/// [relation_sets]
/// calls = ["calls"]
/// "#).unwrap();
///
/// SchemaValidator.validate(&config).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &AnalysisConfig) -> Result<()> {
        let mut relations = HashSet::new();
        for relation in &config.relations {
            if relation.id.trim().is_empty() {
                return Err(ConfigError::schema(
                    "relation id cannot be empty",
                    "Give every [[relations]] entry a non-empty id",
                ));
            }
            let conflicting = config.relations.iter().any(|other| {
                other.id == relation.id
                    && (other.forward != relation.forward || other.reverse != relation.reverse)
            });
            if conflicting {
                return Err(ConfigError::schema(
                    format!("relation '{}' is defined with different labels", relation.id),
                    "Define each relation id once",
                ));
            }
            relations.insert(relation.id.as_str());
        }

        for (name, members) in &config.relation_sets {
            check_name("relation set", name)?;
            for id in members {
                if !relations.contains(id.as_str()) {
                    return Err(ConfigError::UnknownRelation(id.clone()));
                }
            }
        }

        for (name, matcher) in &config.matchers {
            check_name("matcher", name)?;
            match matcher {
                MatcherConfig::Scoped { set, .. } => {
                    if !config.relation_sets.contains_key(set) {
                        return Err(ConfigError::UnknownRelationSet(set.clone()));
                    }
                }
                MatcherConfig::All { of } | MatcherConfig::Any { of } => {
                    if let Some(missing) = of.iter().find(|n| !config.matchers.contains_key(*n)) {
                        return Err(ConfigError::UnknownMatcher(missing.clone()));
                    }
                }
                MatcherConfig::Deny => {}
            }
        }

        let mut models = HashSet::new();
        for model in &config.models {
            check_name("model", &model.id)?;
            if !models.insert(model.id.as_str()) {
                return Err(duplicate("model", &model.id));
            }
            if let Some(missing) = model
                .relations
                .iter()
                .find(|id| !relations.contains(id.as_str()))
            {
                return Err(ConfigError::UnknownRelation(missing.clone()));
            }
        }

        let mut filters = HashSet::new();
        for filter in &config.filters {
            check_name("filter", &filter.name)?;
            if !filters.insert(filter.name.as_str()) {
                return Err(duplicate("filter", &filter.name));
            }
            for stage in &filter.stages {
                validate_stage(config, stage)?;
            }
        }

        let mut documents = HashSet::new();
        for document in &config.documents {
            check_name("document", &document.name)?;
            if !documents.insert(document.name.as_str()) {
                return Err(duplicate("document", &document.name));
            }
        }

        Ok(())
    }
}

fn validate_stage(config: &AnalysisConfig, stage: &StageConfig) -> Result<()> {
    match stage {
        StageConfig::NodeKinds { .. } | StageConfig::Members { .. } => Ok(()),
        StageConfig::NamePattern { pattern } => Regex::new(pattern)
            .map(|_| ())
            .map_err(|source| ConfigError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            }),
        StageConfig::Degree(degree) => {
            if !config.matchers.contains_key(&degree.matcher) {
                return Err(ConfigError::UnknownMatcher(degree.matcher.clone()));
            }
            degree.range.to_range().map(|_| ())
        }
        StageConfig::Not { stage } => validate_stage(config, stage),
        StageConfig::All { stages } | StageConfig::Any { stages } => stages
            .iter()
            .try_for_each(|stage| validate_stage(config, stage)),
    }
}

fn check_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(ConfigError::schema(
            format!("{what} name cannot be empty"),
            format!("Give every {what} a non-empty name"),
        ));
    }
    Ok(())
}

fn duplicate(what: &str, name: &str) -> ConfigError {
    ConfigError::schema(
        format!("{what} '{name}' is defined more than once"),
        format!("Rename or remove the duplicate {what}"),
    )
}

/// Validate with [`SchemaValidator`].
pub fn validate_schema(config: &AnalysisConfig) -> Result<()> {
    SchemaValidator.validate(config)
}
