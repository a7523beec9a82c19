//! # depview-graph
//!
//! Relation matching and node filtering for typed dependency graphs.
//!
//! ## Overview
//!
//! A dependency graph connects typed nodes with edges labeled by a
//! [`Relation`]. This crate decides two things about such a graph:
//!
//! - **Which edges count**: an [`EdgeMatcher`] accepts or rejects a relation
//!   per traversal direction. Matchers deny by default.
//! - **Which nodes survive**: a [`FilterPipeline`] runs [`NodeStage`]s in
//!   order and stops at the first one that excludes a node.
//!
//! On top of those, [`DependencyModel`] describes one kind of graph and a
//! [`ModelMatcher`] selects the [`AnalysisDocument`]s applicable to it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │   Relation   │──▶│ RelationSet  │──▶│ RelationMatcher  │
//! │ (Arc, by id) │   │ (by value)   │   │ (deny by default)│
//! └──────────────┘   └──────────────┘   └────────┬─────────┘
//!                                                │
//!        ┌───────────────────────────────────────┤
//!        ▼                                       ▼
//! ┌──────────────┐                      ┌──────────────────┐
//! │  traversal   │◀─────────────────────│  FilterPipeline  │
//! │ (GraphView)  │    degree metrics    │  (NodeStage...)  │
//! └──────────────┘                      └──────────────────┘
//!
//! ┌─────────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ DependencyModel │──▶│ ModelMatcher │──▶│ AnalysisDocument │
//! └─────────────────┘   └──────────────┘   └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use depview_graph::{
//!     CountRange, DegreeMode, DependencyGraph, FilterPipeline, GraphNode, NodeStage,
//!     NodeId, Relation, RelationMatcher, RelationSet,
//! };
//!
//! # fn main() -> depview_graph::Result<()> {
//! let calls = Relation::new("calls", "calls", "called by")?;
//!
//! let mut graph = DependencyGraph::new();
//! graph.add_node(GraphNode::new("main", "function", "main"));
//! graph.add_node(GraphNode::new("run", "function", "run"));
//! graph.add_edge("main", "run", calls.clone())?;
//!
//! let matcher = RelationMatcher::forward(RelationSet::new("calls", [calls]));
//! let pipeline = FilterPipeline::new("callers").stage(NodeStage::degree(
//!     matcher,
//!     DegreeMode::Successors,
//!     CountRange::AtLeast(1),
//! ));
//!
//! assert_eq!(pipeline.filter(&graph), vec![NodeId::from("main")]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Every matcher, stage and pipeline is immutable after construction and
//! `Send + Sync`, so one pipeline can be evaluated from many threads.
//! [`FilterPipeline::filter_par`] does exactly that on the rayon pool.

pub mod document;
pub mod error;
pub mod filter;
pub mod graph;
pub mod matcher;
pub mod model;
pub mod persist;
pub mod registry;
pub mod relation;
pub mod relation_set;
pub mod traversal;

pub use document::{
    AnalysisDocument, DocumentPayload, MATCHER_KEY, Property, PropertyKey, PropertyMap,
};
pub use error::{Error, Result};
pub use filter::{
    CountMetric, CountPredicate, CountRange, Evaluation, FilterPipeline, NodeFilter, NodeMetric,
    NodeStage,
};
pub use graph::{
    DependencyGraph, EdgeRecord, GraphEdge, GraphNode, GraphSnapshot, GraphView, NodeId,
};
pub use matcher::{DenyAll, Direction, EdgeMatcher, RelationMatcher};
pub use model::{DependencyModel, DependencyModelBuilder, ModelMatcher};
pub use persist::{
    DOCUMENT_TAG, DocumentDescriptor, RELATION_SET_TAG, Record, RelationSetDescriptor,
};
pub use registry::{DocumentCatalog, ModelRegistry, best_for_model, select_for_model};
pub use relation::{Relation, RelationCatalog, RelationDescriptor};
pub use relation_set::RelationSet;
pub use traversal::{
    DegreeMode, accepted_edges, degree, extract_subgraph, predecessors, reachable, successors,
};
