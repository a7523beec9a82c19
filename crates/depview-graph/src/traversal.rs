//! Traversals built on [`EdgeMatcher`].
//!
//! An edge `a --r--> b` is followed from `a` to `b` when the matcher opens
//! `r` forward, and from `b` to `a` when it opens `r` in reverse. Visited
//! sets belong to the traversal, never to the matcher.

use std::collections::VecDeque;

use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use crate::graph::{GraphEdge, GraphView, NodeId};
use crate::matcher::EdgeMatcher;

/// Which incident edges a degree count considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeMode {
    /// Edges a traversal leaves the node along.
    Successors,
    /// Edges a traversal arrives at the node along.
    Predecessors,
    /// Every incident edge open in either direction, counted once.
    Incident,
}

fn leaves_along(edge: &GraphEdge, node: &NodeId, matcher: &dyn EdgeMatcher) -> bool {
    (edge.source == *node && matcher.relation_forward(&edge.relation))
        || (edge.target == *node && matcher.relation_reverse(&edge.relation))
}

fn arrives_along(edge: &GraphEdge, node: &NodeId, matcher: &dyn EdgeMatcher) -> bool {
    (edge.target == *node && matcher.relation_forward(&edge.relation))
        || (edge.source == *node && matcher.relation_reverse(&edge.relation))
}

fn other_end<'a>(edge: &'a GraphEdge, node: &NodeId) -> &'a NodeId {
    if edge.source == *node {
        &edge.target
    } else {
        &edge.source
    }
}

/// Incident edges of `node`, each listed once (self-loops included once).
fn incident<'g>(graph: &'g dyn GraphView, node: &NodeId) -> Vec<&'g GraphEdge> {
    let mut edges = graph.outgoing(node);
    edges.extend(
        graph
            .incoming(node)
            .into_iter()
            .filter(|edge| edge.source != edge.target),
    );
    edges
}

/// Nodes one step away from `node` in traversal direction, in edge order.
pub fn successors<'g>(
    graph: &'g dyn GraphView,
    node: &NodeId,
    matcher: &dyn EdgeMatcher,
) -> Vec<&'g NodeId> {
    incident(graph, node)
        .into_iter()
        .filter(|edge| leaves_along(edge, node, matcher))
        .map(|edge| other_end(edge, node))
        .collect()
}

/// Nodes from which one traversal step reaches `node`.
pub fn predecessors<'g>(
    graph: &'g dyn GraphView,
    node: &NodeId,
    matcher: &dyn EdgeMatcher,
) -> Vec<&'g NodeId> {
    incident(graph, node)
        .into_iter()
        .filter(|edge| arrives_along(edge, node, matcher))
        .map(|edge| other_end(edge, node))
        .collect()
}

/// Count the edges at `node` selected by `mode`.
pub fn degree(
    graph: &dyn GraphView,
    node: &NodeId,
    matcher: &dyn EdgeMatcher,
    mode: DegreeMode,
) -> usize {
    incident(graph, node)
        .into_iter()
        .filter(|edge| match mode {
            DegreeMode::Successors => leaves_along(edge, node, matcher),
            DegreeMode::Predecessors => arrives_along(edge, node, matcher),
            DegreeMode::Incident => matcher.accepts(&edge.relation),
        })
        .count()
}

/// Every node reachable from `roots`, roots included, in discovery order.
///
/// Roots missing from the graph are skipped. Cycles are handled by the
/// traversal's visited set.
pub fn reachable(
    graph: &dyn GraphView,
    roots: &[NodeId],
    matcher: &dyn EdgeMatcher,
) -> Vec<NodeId> {
    let mut visited: HashSet<NodeId> = HashSet::default();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    for root in roots {
        if graph.contains(root) && visited.insert(root.clone()) {
            order.push(root.clone());
            queue.push_back(root.clone());
        }
    }

    while let Some(current) = queue.pop_front() {
        for next in successors(graph, &current, matcher) {
            if visited.insert(next.clone()) {
                order.push(next.clone());
                queue.push_back(next.clone());
            }
        }
    }

    tracing::debug!(
        roots = roots.len(),
        reached = order.len(),
        "reachability traversal finished"
    );
    order
}

/// Every edge of the graph open in at least one direction.
pub fn accepted_edges<'g>(
    graph: &'g dyn GraphView,
    matcher: &dyn EdgeMatcher,
) -> Vec<&'g GraphEdge> {
    graph
        .node_ids()
        .into_iter()
        .flat_map(|id| graph.outgoing(id))
        .filter(|edge| matcher.accepts(&edge.relation))
        .collect()
}

/// Edges among `nodes` that the matcher opens in at least one direction.
pub fn extract_subgraph<'g>(
    graph: &'g dyn GraphView,
    nodes: &[NodeId],
    matcher: &dyn EdgeMatcher,
) -> Vec<&'g GraphEdge> {
    let members: HashSet<&NodeId> = nodes.iter().collect();
    let mut seen: HashSet<&NodeId> = HashSet::default();

    nodes
        .iter()
        .filter(|id| seen.insert(*id))
        .flat_map(|id| graph.outgoing(id))
        .filter(|edge| members.contains(&edge.target) && matcher.accepts(&edge.relation))
        .collect()
}
