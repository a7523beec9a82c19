//! Serde shape of `depview.toml`.
//!
//! Everything here is plain data that refers to other entries by name. See
//! [`AnalysisConfig::resolve`] for turning it into live matchers and
//! pipelines.

use depview_graph::{CountRange, DegreeMode, ModelMatcher, PropertyMap, RelationDescriptor};
use figment::Figment;
use figment::providers::{Format, Toml};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::settings::Settings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub relations: Vec<RelationDescriptor>,

    /// Named relation sets, by relation id.
    #[serde(default)]
    pub relation_sets: IndexMap<String, Vec<String>>,

    #[serde(default)]
    pub matchers: IndexMap<String, MatcherConfig>,

    #[serde(default)]
    pub models: Vec<ModelConfig>,

    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
}

/// A named edge matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MatcherConfig {
    /// Opens the members of `set` in the enabled directions.
    Scoped {
        set: String,
        #[serde(default)]
        forward: bool,
        #[serde(default)]
        reverse: bool,
    },
    /// Every referenced matcher must agree.
    All { of: Vec<String> },
    /// Any referenced matcher suffices.
    Any { of: Vec<String> },
    Deny,
}

/// A dependency model contributed by a graph producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub id: String,
    #[serde(default)]
    pub node_kinds: Vec<String>,
    /// Relation ids from the `relations` table.
    #[serde(default)]
    pub relations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub name: String,
    #[serde(default)]
    pub stages: Vec<StageConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StageConfig {
    NodeKinds { kinds: Vec<String> },
    NamePattern { pattern: String },
    Members { ids: Vec<String> },
    Degree(DegreeStageConfig),
    Not { stage: Box<StageConfig> },
    All { stages: Vec<StageConfig> },
    Any { stages: Vec<StageConfig> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeStageConfig {
    /// Name of a configured matcher.
    pub matcher: String,
    #[serde(default = "default_degree_mode")]
    pub mode: DegreeMode,
    #[serde(flatten)]
    pub range: RangeConfig,
}

fn default_degree_mode() -> DegreeMode {
    DegreeMode::Incident
}

/// Count range keys. At most one may be set; none means any count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equal: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub not_equal: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub less_than: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_most: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greater_than: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_least: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub between: Option<[usize; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outside: Option<[usize; 2]>,
}

impl RangeConfig {
    /// The configured range.
    ///
    /// Fails when more than one key is set or when a two-sided range has
    /// `min > max`.
    pub fn to_range(&self) -> Result<CountRange> {
        let candidates = [
            self.equal.map(CountRange::Equal),
            self.not_equal.map(CountRange::NotEqual),
            self.less_than.map(CountRange::LessThan),
            self.at_most.map(CountRange::AtMost),
            self.greater_than.map(CountRange::GreaterThan),
            self.at_least.map(CountRange::AtLeast),
            self.between.map(|[min, max]| CountRange::Between { min, max }),
            self.outside.map(|[min, max]| CountRange::Outside { min, max }),
        ];

        let mut set = candidates.into_iter().flatten();
        let range = set.next().unwrap_or(CountRange::Any);
        if set.next().is_some() {
            return Err(ConfigError::schema(
                "degree stage sets more than one count range",
                "Keep exactly one of equal, not_equal, less_than, at_most, greater_than, at_least, between, outside",
            ));
        }

        if let CountRange::Between { min, max } | CountRange::Outside { min, max } = range {
            if min > max {
                return Err(ConfigError::schema(
                    format!("count range [{min}, {max}] has min greater than max"),
                    "Write two-sided ranges as [min, max]",
                ));
            }
        }
        Ok(range)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub name: String,
    pub matcher: ModelMatcher,
    #[serde(default)]
    pub properties: PropertyMap,
}

impl AnalysisConfig {
    /// Parse a TOML document without environment overrides.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(Figment::from(Toml::string(source)).extract()?)
    }

    /// Create from a JSON value (for configs assembled programmatically).
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    pub fn filter(&self, name: &str) -> Option<&FilterConfig> {
        self.filters.iter().find(|filter| filter.name == name)
    }
}
