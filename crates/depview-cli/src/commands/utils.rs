//! Loading helpers shared by the commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use depview_config::{AnalysisConfig, ConfigDiscovery, ResolvedConfig};
use depview_graph::{DependencyGraph, GraphSnapshot, RelationCatalog};

/// Load `path`, or `depview.toml` from the current directory.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let root = std::env::current_dir().context("failed to read the current directory")?;
    let discovery = ConfigDiscovery::new(&root);
    let config = match path {
        Some(path) => discovery
            .load_from(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => discovery.load()?,
    };
    Ok(config)
}

pub fn resolve_config(config: &AnalysisConfig) -> Result<ResolvedConfig> {
    config.resolve().context("configuration is invalid")
}

/// Read a graph snapshot and resolve its relation ids.
pub fn load_graph(path: &Path, catalog: &RelationCatalog) -> Result<DependencyGraph> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read graph {}", path.display()))?;
    let graph = GraphSnapshot::from_json(&json)
        .and_then(|snapshot| snapshot.resolve(catalog))
        .with_context(|| format!("failed to load graph {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
