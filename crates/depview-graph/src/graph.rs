//! Graph access for filters and traversals.
//!
//! The engine does not own graphs. It reads them through [`GraphView`], which
//! graph storage implements. [`DependencyGraph`] is an in-memory
//! implementation for callers that have no storage of their own.

use std::borrow::Borrow;
use std::fmt;

use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::relation::{Relation, RelationCatalog};
use crate::{Error, Result};

/// Identifier of a node within one graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A node: identity, kind tag and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: NodeId,
    pub kind: String,
    pub name: String,
}

impl GraphNode {
    pub fn new(id: impl Into<NodeId>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
        }
    }
}

/// A typed, directed edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: Relation,
}

/// Read access to a finite graph with typed edges.
pub trait GraphView: Send + Sync {
    /// Every node id, in the graph's own order.
    fn node_ids(&self) -> Vec<&NodeId>;

    fn node(&self, id: &NodeId) -> Option<&GraphNode>;

    /// Edges whose source is `id`.
    fn outgoing(&self, id: &NodeId) -> Vec<&GraphEdge>;

    /// Edges whose target is `id`.
    fn incoming(&self, id: &NodeId) -> Vec<&GraphEdge>;

    fn contains(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }
}

/// In-memory dependency graph.
///
/// Nodes keep insertion order. Parallel edges are allowed (two edges between
/// the same nodes with the same relation are two relation instances).
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<NodeId, usize>,
    edges: Vec<GraphEdge>,
    outgoing: HashMap<NodeId, Vec<usize>>,
    incoming: HashMap<NodeId, Vec<usize>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Re-adding an id replaces its kind and name.
    pub fn add_node(&mut self, node: GraphNode) {
        match self.index.get(&node.id) {
            Some(&position) => self.nodes[position] = node,
            None => {
                self.index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Add an edge between two existing nodes.
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relation: Relation,
    ) -> Result<()> {
        let source = source.into();
        let target = target.into();
        for endpoint in [&source, &target] {
            if !self.index.contains_key(endpoint) {
                return Err(Error::UnknownNode(endpoint.to_string()));
            }
        }

        let position = self.edges.len();
        self.outgoing
            .entry(source.clone())
            .or_default()
            .push(position);
        self.incoming
            .entry(target.clone())
            .or_default()
            .push(position);
        self.edges.push(GraphEdge {
            source,
            target,
            relation,
        });
        Ok(())
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Serializable snapshot of the graph with edges keyed by relation id.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self
                .edges
                .iter()
                .map(|edge| EdgeRecord {
                    source: edge.source.clone(),
                    target: edge.target.clone(),
                    relation: edge.relation.id().to_string(),
                })
                .collect(),
        }
    }

    fn edges_at(&self, positions: Option<&Vec<usize>>) -> Vec<&GraphEdge> {
        positions
            .map(|positions| positions.iter().map(|&p| &self.edges[p]).collect())
            .unwrap_or_default()
    }
}

impl GraphView for DependencyGraph {
    fn node_ids(&self) -> Vec<&NodeId> {
        self.nodes.iter().map(|node| &node.id).collect()
    }

    fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index.get(id).map(|&position| &self.nodes[position])
    }

    fn outgoing(&self, id: &NodeId) -> Vec<&GraphEdge> {
        self.edges_at(self.outgoing.get(id))
    }

    fn incoming(&self, id: &NodeId) -> Vec<&GraphEdge> {
        self.edges_at(self.incoming.get(id))
    }
}

/// Serialized edge: endpoints plus the relation id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: String,
}

/// Serializable form of a [`DependencyGraph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    /// Rebuild the graph, resolving relation ids through `catalog`.
    pub fn resolve(&self, catalog: &RelationCatalog) -> Result<DependencyGraph> {
        let mut graph = DependencyGraph::new();
        for node in &self.nodes {
            graph.add_node(node.clone());
        }
        for edge in &self.edges {
            let relation = catalog.resolve(&edge.relation)?;
            graph.add_edge(edge.source.clone(), edge.target.clone(), relation)?;
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "resolved graph snapshot"
        );
        Ok(graph)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::Serialization(format!("Failed to serialize graph: {e}")))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Serialization(format!("Failed to parse graph: {e}")))
    }
}
