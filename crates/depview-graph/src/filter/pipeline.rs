//! Ordered, short-circuiting node filter pipelines.

use rayon::prelude::*;

use super::stage::{NodeFilter, NodeStage};
use crate::graph::{GraphView, NodeId};

/// Outcome of running one node through a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub included: bool,
    /// Stages evaluated before the pipeline stopped.
    pub stages_run: usize,
    /// Index of the stage that excluded the node, if any.
    pub rejected_by: Option<usize>,
}

/// A named, ordered sequence of node stages.
///
/// Stages run left to right exactly as configured and evaluation stops at
/// the first stage that excludes the node. An empty pipeline includes every
/// node.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    name: String,
    stages: Vec<NodeStage>,
}

impl FilterPipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    pub fn from_stages(name: impl Into<String>, stages: Vec<NodeStage>) -> Self {
        Self {
            name: name.into(),
            stages,
        }
    }

    /// Append a stage (builder style).
    pub fn stage(mut self, stage: NodeStage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn push(&mut self, stage: NodeStage) {
        self.stages.push(stage);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[NodeStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run `node` through the stages, recording where evaluation stopped.
    pub fn evaluate(&self, node: &NodeId, graph: &dyn GraphView) -> Evaluation {
        for (position, stage) in self.stages.iter().enumerate() {
            if !stage.include(node, graph) {
                tracing::trace!(
                    pipeline = %self.name,
                    node = %node,
                    stage = position,
                    kind = stage.label(),
                    "node excluded"
                );
                return Evaluation {
                    included: false,
                    stages_run: position + 1,
                    rejected_by: Some(position),
                };
            }
        }

        Evaluation {
            included: true,
            stages_run: self.stages.len(),
            rejected_by: None,
        }
    }

    pub fn includes(&self, node: &NodeId, graph: &dyn GraphView) -> bool {
        self.evaluate(node, graph).included
    }

    /// Surviving node ids, in the graph's node order.
    pub fn filter(&self, graph: &dyn GraphView) -> Vec<NodeId> {
        let kept: Vec<NodeId> = graph
            .node_ids()
            .into_iter()
            .filter(|node| self.includes(node, graph))
            .cloned()
            .collect();

        tracing::debug!(pipeline = %self.name, kept = kept.len(), "filter applied");
        kept
    }

    /// Same as [`filter`](Self::filter), evaluating nodes on the rayon pool.
    ///
    /// Stages hold no mutable state, so they are shared across workers as-is.
    /// Output order matches the sequential version.
    pub fn filter_par(&self, graph: &dyn GraphView) -> Vec<NodeId> {
        let kept: Vec<NodeId> = graph
            .node_ids()
            .into_par_iter()
            .filter(|node| self.includes(node, graph))
            .cloned()
            .collect();

        tracing::debug!(pipeline = %self.name, kept = kept.len(), "parallel filter applied");
        kept
    }
}

impl NodeFilter for FilterPipeline {
    fn include(&self, node: &NodeId, graph: &dyn GraphView) -> bool {
        self.includes(node, graph)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::graph::{DependencyGraph, GraphNode};

    struct Counting {
        verdict: bool,
        calls: AtomicUsize,
    }

    impl Counting {
        fn new(verdict: bool) -> Arc<Self> {
            Arc::new(Self {
                verdict,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl NodeFilter for Counting {
        fn include(&self, _node: &NodeId, _graph: &dyn GraphView) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    fn graph() -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        graph.add_node(GraphNode::new("a", "function", "a"));
        graph.add_node(GraphNode::new("b", "type", "b"));
        graph.add_node(GraphNode::new("c", "function", "c"));
        graph
    }

    #[test]
    fn empty_pipeline_includes_everything() {
        let graph = graph();
        let pipeline = FilterPipeline::new("everything");
        assert_eq!(pipeline.filter(&graph).len(), 3);

        let outcome = pipeline.evaluate(&"a".into(), &graph);
        assert!(outcome.included);
        assert_eq!(outcome.stages_run, 0);
    }

    #[test]
    fn short_circuits_at_first_exclusion() {
        let graph = graph();
        let rejecting = Counting::new(false);
        let accepting = Counting::new(true);

        let pipeline = FilterPipeline::new("p")
            .stage(NodeStage::Custom(rejecting.clone()))
            .stage(NodeStage::Custom(accepting.clone()));

        let outcome = pipeline.evaluate(&"a".into(), &graph);
        assert_eq!(
            outcome,
            Evaluation {
                included: false,
                stages_run: 1,
                rejected_by: Some(0),
            }
        );
        assert_eq!(rejecting.calls(), 1);
        assert_eq!(accepting.calls(), 0);
    }

    #[test]
    fn stage_order_is_preserved() {
        let graph = graph();
        let first = Counting::new(false);
        let second = Counting::new(true);

        let forward = FilterPipeline::new("p1-p2")
            .stage(NodeStage::Custom(first.clone()))
            .stage(NodeStage::Custom(second.clone()));
        let backward = FilterPipeline::new("p2-p1")
            .stage(NodeStage::Custom(second.clone()))
            .stage(NodeStage::Custom(first.clone()));

        let node = NodeId::from("a");
        assert_eq!(forward.evaluate(&node, &graph).stages_run, 1);
        assert_eq!(backward.evaluate(&node, &graph).stages_run, 2);
        assert_eq!(first.calls(), 2);
        assert_eq!(second.calls(), 1);

        assert_eq!(
            forward.includes(&node, &graph),
            backward.includes(&node, &graph)
        );
    }

    #[test]
    fn filter_keeps_graph_order() {
        let graph = graph();
        let pipeline = FilterPipeline::new("functions").stage(NodeStage::kinds(["function"]));

        let sequential = pipeline.filter(&graph);
        assert_eq!(sequential, vec![NodeId::from("a"), NodeId::from("c")]);
        assert_eq!(pipeline.filter_par(&graph), sequential);
    }

    #[test]
    fn pipelines_nest_as_stages() {
        let graph = graph();
        let inner = FilterPipeline::new("functions").stage(NodeStage::kinds(["function"]));
        let outer = FilterPipeline::new("not-a")
            .stage(NodeStage::Custom(Arc::new(inner)))
            .stage(NodeStage::members(["a"]).negate());

        assert_eq!(outer.filter(&graph), vec![NodeId::from("c")]);
    }
}
