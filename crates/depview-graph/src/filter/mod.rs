//! Node filtering: count predicates, stages and pipelines.

mod count;
mod pipeline;
mod stage;

pub use count::{CountPredicate, CountRange};
pub use pipeline::{Evaluation, FilterPipeline};
pub use stage::{CountMetric, NodeFilter, NodeMetric, NodeStage};
