//! Filter command implementation.

use anyhow::{Result, anyhow};
use depview_config::AnalysisConfig;
use depview_graph::GraphView;

use crate::cli::FilterArgs;
use crate::commands::utils;
use crate::ui;

pub fn execute(args: &FilterArgs, config: &AnalysisConfig) -> Result<()> {
    let resolved = utils::resolve_config(config)?;
    let pipeline = resolved
        .pipeline(&args.pipeline)
        .ok_or_else(|| anyhow!("unknown filter pipeline '{}'", args.pipeline))?;
    let graph = utils::load_graph(&args.graph, &resolved.catalog)?;

    if args.explain {
        for id in graph.node_ids() {
            let outcome = pipeline.evaluate(id, &graph);
            match outcome.rejected_by {
                None => println!("{id}\tincluded"),
                Some(position) => println!(
                    "{id}\texcluded by stage {position} ({})",
                    pipeline.stages()[position].label()
                ),
            }
        }
        return Ok(());
    }

    let parallel = args.parallel || resolved.settings.parallel;
    let kept = if parallel {
        pipeline.filter_par(&graph)
    } else {
        pipeline.filter(&graph)
    };

    ui::info(&format!(
        "{} of {} nodes pass '{}'",
        kept.len(),
        graph.node_count(),
        pipeline.name()
    ));

    if args.json {
        utils::print_json(&kept)?;
    } else {
        for id in &kept {
            println!("{id}");
        }
    }
    Ok(())
}
