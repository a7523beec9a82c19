//! Select command implementation.
//!
//! Reports every analysis document applicable to a model, in declaration
//! order. Ties are not broken; `--best` simply takes the first.

use anyhow::{Result, anyhow};
use depview_config::AnalysisConfig;
use depview_graph::{DocumentDescriptor, Record};

use crate::cli::SelectArgs;
use crate::commands::utils;
use crate::ui;

pub fn execute(args: &SelectArgs, config: &AnalysisConfig) -> Result<()> {
    let resolved = utils::resolve_config(config)?;
    let model = resolved
        .models
        .get(&args.model)
        .ok_or_else(|| anyhow!("unknown model '{}'", args.model))?;

    let mut selected = resolved.documents.select(model);
    if args.best {
        selected.truncate(1);
    }
    if selected.is_empty() {
        ui::warning(&format!("no analysis document applies to '{}'", args.model));
    }

    if args.json {
        let records: Vec<_> = selected
            .iter()
            .map(|document| Record::Document(DocumentDescriptor::describe(document)))
            .collect();
        utils::print_json(&records)?;
    } else {
        for document in selected {
            println!("{}", document.name());
        }
    }
    Ok(())
}
