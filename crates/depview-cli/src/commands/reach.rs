//! Reach command implementation.

use anyhow::Result;
use depview_config::AnalysisConfig;
use depview_graph::{EdgeRecord, GraphView, NodeId, extract_subgraph, reachable};

use crate::cli::ReachArgs;
use crate::commands::utils;
use crate::ui;

pub fn execute(args: &ReachArgs, config: &AnalysisConfig) -> Result<()> {
    let resolved = utils::resolve_config(config)?;
    let matcher = resolved.matcher(&args.matcher)?;
    let graph = utils::load_graph(&args.graph, &resolved.catalog)?;

    let roots: Vec<NodeId> = args.roots.iter().map(|root| NodeId::from(root.as_str())).collect();
    for root in roots.iter().filter(|root| !graph.contains(root)) {
        ui::warning(&format!("root '{root}' is not in the graph"));
    }

    let reached = reachable(&graph, &roots, matcher);

    if args.edges {
        let edges = extract_subgraph(&graph, &reached, matcher);
        if args.json {
            let records: Vec<EdgeRecord> = edges
                .iter()
                .map(|edge| EdgeRecord {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    relation: edge.relation.id().to_string(),
                })
                .collect();
            utils::print_json(&records)?;
        } else {
            for edge in edges {
                println!(
                    "{} -[{}]-> {}",
                    edge.source,
                    edge.relation.forward_label(),
                    edge.target
                );
            }
        }
    } else if args.json {
        utils::print_json(&reached)?;
    } else {
        for id in &reached {
            println!("{id}");
        }
    }
    Ok(())
}
