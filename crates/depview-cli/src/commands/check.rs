//! Check command implementation.
//!
//! Validates and resolves the configuration without touching any graph.

use anyhow::Result;
use depview_config::AnalysisConfig;

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::ui;

pub fn execute(args: &CheckArgs, config: &AnalysisConfig) -> Result<()> {
    let resolved = utils::resolve_config(config)?;
    ui::success("Configuration is valid");

    println!("relations:     {}", resolved.catalog.len());
    println!("relation sets: {}", resolved.relation_sets.len());
    println!("matchers:      {}", resolved.matchers.len());
    println!("models:        {}", resolved.models.len());
    println!("pipelines:     {}", resolved.pipelines.len());
    println!("documents:     {}", resolved.documents.len());

    for (name, set) in &resolved.relation_sets {
        if set.is_empty() {
            ui::warning(&format!("relation set '{name}' is empty"));
        }
    }

    if args.list {
        for (name, set) in &resolved.relation_sets {
            let ids: Vec<&str> = set.iter().map(|relation| relation.id()).collect();
            println!("set {name}: {}", ids.join(", "));
        }
        for name in resolved.matchers.keys() {
            println!("matcher {name}");
        }
        for (name, pipeline) in &resolved.pipelines {
            let labels: Vec<&str> = pipeline.stages().iter().map(|stage| stage.label()).collect();
            println!("pipeline {name}: [{}]", labels.join(", "));
        }
        for document in resolved.documents.documents() {
            println!("document {}", document.name());
        }
    }

    Ok(())
}
