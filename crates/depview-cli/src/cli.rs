//! Command-line interface definition.
//!
//! - `depview check` - validate the configuration
//! - `depview select` - list analysis documents that apply to a model
//! - `depview filter` - run a filter pipeline over a graph
//! - `depview reach` - nodes reachable from roots under a matcher

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// depview - relation matching and node filtering for dependency graphs
#[derive(Parser, Debug)]
#[command(name = "depview", version, about)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress logs and status messages; errors and command results still print
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file to use instead of ./depview.toml
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the configuration and summarize what it defines
    Check(CheckArgs),

    /// List the analysis documents that apply to a dependency model
    Select(SelectArgs),

    /// Run a named filter pipeline over a graph snapshot
    Filter(FilterArgs),

    /// Print the nodes reachable from roots under a named matcher
    Reach(ReachArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Also list every relation set, matcher, pipeline and document by name
    #[arg(long)]
    pub list: bool,
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Model id from the [[models]] table
    #[arg(value_name = "MODEL")]
    pub model: String,

    /// Only print the first applicable document
    #[arg(long)]
    pub best: bool,

    /// Print persisted document records as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Pipeline name from the [[filters]] table
    #[arg(value_name = "PIPELINE")]
    pub pipeline: String,

    /// Graph snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Evaluate nodes in parallel (also enabled by settings.parallel)
    #[arg(long)]
    pub parallel: bool,

    /// Show which stage excluded each rejected node
    #[arg(long, conflicts_with = "json")]
    pub explain: bool,

    /// Print surviving node ids as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ReachArgs {
    /// Root node ids
    #[arg(required = true, value_name = "ROOT")]
    pub roots: Vec<String>,

    /// Matcher name from the [matchers] table
    #[arg(short, long)]
    pub matcher: String,

    /// Graph snapshot (JSON)
    #[arg(short, long, value_name = "FILE")]
    pub graph: PathBuf,

    /// Print the traversable edges among reached nodes instead of the nodes
    #[arg(long)]
    pub edges: bool,

    /// Print JSON instead of one item per line
    #[arg(long)]
    pub json: bool,
}
