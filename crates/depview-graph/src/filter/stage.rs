//! Node predicates that make up a filter pipeline.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use regex::Regex;
use rustc_hash::FxHashSet as HashSet;

use super::count::{CountPredicate, CountRange};
use crate::graph::{GraphView, NodeId};
use crate::matcher::RelationMatcher;
use crate::traversal::{DegreeMode, degree};

/// Predicate over a node in the context of its graph.
pub trait NodeFilter: Send + Sync {
    fn include(&self, node: &NodeId, graph: &dyn GraphView) -> bool;
}

/// Integer metric computed for a node, consumed by count stages.
pub trait NodeMetric: Send + Sync {
    fn measure(&self, node: &NodeId, graph: &dyn GraphView) -> usize;
}

/// The metric a [`NodeStage::Count`] feeds to its predicate.
#[derive(Clone)]
pub enum CountMetric {
    /// Edges at the node selected by `mode`, under `matcher`.
    Degree {
        matcher: RelationMatcher,
        mode: DegreeMode,
    },
    /// Any externally supplied metric.
    Custom(Arc<dyn NodeMetric>),
}

impl CountMetric {
    pub fn degree(matcher: RelationMatcher, mode: DegreeMode) -> Self {
        CountMetric::Degree { matcher, mode }
    }
}

impl NodeMetric for CountMetric {
    fn measure(&self, node: &NodeId, graph: &dyn GraphView) -> usize {
        match self {
            CountMetric::Degree { matcher, mode } => degree(graph, node, matcher, *mode),
            CountMetric::Custom(metric) => metric.measure(node, graph),
        }
    }
}

impl fmt::Debug for CountMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountMetric::Degree { matcher, mode } => f
                .debug_struct("Degree")
                .field("matcher", matcher)
                .field("mode", mode)
                .finish(),
            CountMetric::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One stage of a filter pipeline.
///
/// Nodes absent from the graph fail the kind and name stages. An empty
/// `AllOf` includes everything, an empty `AnyOf` includes nothing.
#[derive(Clone)]
pub enum NodeStage {
    /// Node kind is one of these tags.
    Kinds(BTreeSet<String>),
    /// Node name matches the pattern.
    NamePattern(Regex),
    /// Node id is one of these.
    Members(HashSet<NodeId>),
    /// The metric satisfies the count predicate.
    Count {
        metric: CountMetric,
        predicate: CountRange,
    },
    Not(Box<NodeStage>),
    AllOf(Vec<NodeStage>),
    AnyOf(Vec<NodeStage>),
    Custom(Arc<dyn NodeFilter>),
}

impl NodeStage {
    pub fn kinds<I, S>(kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NodeStage::Kinds(kinds.into_iter().map(Into::into).collect())
    }

    pub fn members<I, N>(ids: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeId>,
    {
        NodeStage::Members(ids.into_iter().map(Into::into).collect())
    }

    pub fn count(metric: CountMetric, predicate: CountRange) -> Self {
        NodeStage::Count { metric, predicate }
    }

    /// Count stage over [`degree`] at the node.
    pub fn degree(matcher: RelationMatcher, mode: DegreeMode, predicate: CountRange) -> Self {
        Self::count(CountMetric::degree(matcher, mode), predicate)
    }

    pub fn negate(self) -> Self {
        NodeStage::Not(Box::new(self))
    }

    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            NodeStage::Kinds(_) => "kinds",
            NodeStage::NamePattern(_) => "name-pattern",
            NodeStage::Members(_) => "members",
            NodeStage::Count { .. } => "count",
            NodeStage::Not(_) => "not",
            NodeStage::AllOf(_) => "all-of",
            NodeStage::AnyOf(_) => "any-of",
            NodeStage::Custom(_) => "custom",
        }
    }
}

impl NodeFilter for NodeStage {
    fn include(&self, node: &NodeId, graph: &dyn GraphView) -> bool {
        match self {
            NodeStage::Kinds(kinds) => graph
                .node(node)
                .is_some_and(|found| kinds.contains(&found.kind)),
            NodeStage::NamePattern(pattern) => graph
                .node(node)
                .is_some_and(|found| pattern.is_match(&found.name)),
            NodeStage::Members(ids) => ids.contains(node),
            NodeStage::Count { metric, predicate } => {
                predicate.include(metric.measure(node, graph))
            }
            NodeStage::Not(inner) => !inner.include(node, graph),
            NodeStage::AllOf(stages) => stages.iter().all(|stage| stage.include(node, graph)),
            NodeStage::AnyOf(stages) => stages.iter().any(|stage| stage.include(node, graph)),
            NodeStage::Custom(filter) => filter.include(node, graph),
        }
    }
}

impl fmt::Debug for NodeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeStage::Kinds(kinds) => f.debug_tuple("Kinds").field(kinds).finish(),
            NodeStage::NamePattern(pattern) => {
                f.debug_tuple("NamePattern").field(&pattern.as_str()).finish()
            }
            NodeStage::Members(ids) => f.debug_tuple("Members").field(&ids.len()).finish(),
            NodeStage::Count { metric, predicate } => f
                .debug_struct("Count")
                .field("metric", metric)
                .field("predicate", predicate)
                .finish(),
            NodeStage::Not(inner) => f.debug_tuple("Not").field(inner).finish(),
            NodeStage::AllOf(stages) => f.debug_tuple("AllOf").field(stages).finish(),
            NodeStage::AnyOf(stages) => f.debug_tuple("AnyOf").field(stages).finish(),
            NodeStage::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
