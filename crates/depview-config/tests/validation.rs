//! Tests for configuration validation.

use depview_config::{AnalysisConfig, ConfigError, ConfigValidator, SchemaValidator};
use depview_graph::RelationDescriptor;

const BASE: &str = r#"
[[relations]]
id = "calls"
forward = "calls"
reverse = "called by"

[relation_sets]
calls = ["calls"]

[matchers.call-graph]
kind = "scoped"
set = "calls"
forward = true
"#;

fn config(extra: &str) -> AnalysisConfig {
    AnalysisConfig::from_toml_str(&format!("{BASE}\n{extra}")).expect("valid toml")
}

#[test]
fn base_config_is_valid() {
    assert!(SchemaValidator.validate(&config("")).is_ok());
}

#[test]
fn empty_config_is_valid() {
    assert!(SchemaValidator.validate(&AnalysisConfig::default()).is_ok());
}

#[test]
fn unknown_relation_in_set() {
    let mut cfg = config("");
    cfg.relation_sets
        .insert("broken".to_string(), vec!["extends".to_string()]);
    match SchemaValidator.validate(&cfg).unwrap_err() {
        ConfigError::UnknownRelation(id) => assert_eq!(id, "extends"),
        other => panic!("expected UnknownRelation, got {other:?}"),
    }
}

#[test]
fn unknown_set_in_matcher() {
    let cfg = config(
        r#"
[matchers.imports]
kind = "scoped"
set = "imports"
forward = true
"#,
    );
    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::UnknownRelationSet(name)) if name == "imports"
    ));
}

#[test]
fn unknown_matcher_in_stage() {
    let cfg = config(
        r#"
[[filters]]
name = "busy"
stages = [{ kind = "degree", matcher = "missing", at_least = 1 }]
"#,
    );
    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::UnknownMatcher(name)) if name == "missing"
    ));
}

#[test]
fn invalid_pattern_is_reported() {
    let cfg = config(
        r#"
[[filters]]
name = "names"
stages = [{ kind = "not", stage = { kind = "name-pattern", pattern = "([" } }]
"#,
    );
    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn inverted_range_is_reported() {
    let cfg = config(
        r#"
[[filters]]
name = "busy"
stages = [{ kind = "degree", matcher = "call-graph", between = [3, 1] }]
"#,
    );
    let err = SchemaValidator.validate(&cfg).unwrap_err();
    assert!(matches!(err, ConfigError::SchemaValidation { .. }));
    assert!(err.hint().is_some());
}

#[test]
fn duplicate_filter_names() {
    let cfg = config(
        r#"
[[filters]]
name = "dup"

[[filters]]
name = "dup"
"#,
    );
    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::SchemaValidation { message, .. }) if message.contains("dup")
    ));
}

#[test]
fn conflicting_relation_labels() {
    let mut cfg = config("");
    cfg.relations.push(RelationDescriptor {
        id: "calls".to_string(),
        forward: "invokes".to_string(),
        reverse: "invoked by".to_string(),
    });
    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::SchemaValidation { message, .. }) if message.contains("calls")
    ));
}

#[test]
fn blank_document_name() {
    let cfg = config(
        r#"
[[documents]]
name = " "
matcher = "any"
"#,
    );
    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::SchemaValidation { .. })
    ));
}

#[test]
fn model_with_unknown_relation() {
    let cfg = config(
        r#"
[[models]]
id = "code"
node_kinds = ["function"]
relations = ["calls", "imports"]
"#,
    );
    assert!(matches!(
        SchemaValidator.validate(&cfg),
        Err(ConfigError::UnknownRelation(id)) if id == "imports"
    ));
}
