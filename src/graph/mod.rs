//! Flat graph projection of dependency trees, for display and export.
//!
//! A [`TreeNode`] hierarchy is a per-archive view; rendering layers want
//! a single node/edge set covering one or more archives plus the
//! package-dependency references between them. This module produces that
//! projection and reports every cycle in the combined graph.
//!
//! Projections are ephemeral: nodes and edges are keyed by a synthetic
//! id (`"{archive_id}/{path}"`), never persisted, and rebuilt on every
//! call. A node's `depth` is its distance from the tree root along the
//! edge that created it, a layout hint with no semantic meaning.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use tracing::debug;

use crate::tree::TreeNode;

/// Projection-only view of one file in the combined graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Synthetic id: `"{archive_id}/{path}"`.
    pub id: String,
    /// Path within the archive.
    pub path: String,
    /// Distance from the tree root (direct children of the root are 1).
    pub depth: usize,
    /// Carried over from the tree node that produced this node.
    pub missing: bool,
    /// Carried over from the tree node that produced this node.
    pub circular: bool,
}

/// Kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
    /// Archive root to a direct child of the entry file.
    Contains,
    /// One file statically includes another.
    FileInclude,
    /// One archive declares a dependency on another.
    PackageDependency,
}

/// Directed edge between two synthetic node ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    /// Source node id (or archive root id for `Contains` edges).
    pub from: String,
    /// Target node id.
    pub to: String,
    /// Relationship kind.
    pub kind: EdgeKind,
}

impl GraphEdge {
    /// Convenience constructor.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }
}

/// Flattened projection of one or more trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphData {
    /// Deduplicated nodes, first occurrence order.
    pub nodes: Vec<GraphNode>,
    /// Deduplicated edges, first occurrence order.
    pub edges: Vec<GraphEdge>,
    /// Largest node depth in the projection, 0 when empty.
    pub max_depth: usize,
}

/// Flatten one dependency tree into graph data.
///
/// The synthetic root produces no node of its own: only its children
/// become graph nodes, linked from `root_id` with [`EdgeKind::Contains`]
/// edges. Deeper nodes link from their parent file node with
/// [`EdgeKind::FileInclude`] edges. Convergent includes collapse onto
/// one node per id (the first occurrence keeps its depth); duplicate
/// edges collapse as well.
#[must_use]
pub fn tree_to_graph_data(tree: &TreeNode, root_id: &str) -> GraphData {
    let mut data = GraphData::default();
    let mut seen_nodes: HashMap<String, usize> = HashMap::new();

    for child in &tree.children {
        project_node(child, root_id, None, 1, &mut data, &mut seen_nodes);
    }

    debug!(root_id, nodes = data.nodes.len(), edges = data.edges.len(), "projected tree");
    data
}

fn project_node(
    node: &TreeNode,
    root_id: &str,
    parent_id: Option<&str>,
    depth: usize,
    data: &mut GraphData,
    seen_nodes: &mut HashMap<String, usize>,
) {
    let id = format!("{root_id}/{}", node.path);

    if !seen_nodes.contains_key(&id) {
        seen_nodes.insert(id.clone(), data.nodes.len());
        data.nodes.push(GraphNode {
            id: id.clone(),
            path: node.path.clone(),
            depth,
            missing: node.missing,
            circular: node.circular,
        });
        data.max_depth = data.max_depth.max(depth);
    }

    let edge = match parent_id {
        Some(parent) => GraphEdge::new(parent, id.clone(), EdgeKind::FileInclude),
        None => GraphEdge::new(root_id, id.clone(), EdgeKind::Contains),
    };
    if !data.edges.contains(&edge) {
        data.edges.push(edge);
    }

    for child in &node.children {
        project_node(child, root_id, Some(&id), depth + 1, data, seen_nodes);
    }
}

/// Merge several projections and inter-archive package edges into one
/// combined graph.
#[must_use]
pub fn combine(graphs: impl IntoIterator<Item = GraphData>, package_edges: Vec<GraphEdge>) -> GraphData {
    let mut combined = GraphData::default();
    let mut seen_nodes: HashMap<String, usize> = HashMap::new();

    for graph in graphs {
        for node in graph.nodes {
            if !seen_nodes.contains_key(&node.id) {
                seen_nodes.insert(node.id.clone(), combined.nodes.len());
                combined.max_depth = combined.max_depth.max(node.depth);
                combined.nodes.push(node);
            }
        }
        for edge in graph.edges {
            if !combined.edges.contains(&edge) {
                combined.edges.push(edge);
            }
        }
    }

    for edge in package_edges {
        if !combined.edges.contains(&edge) {
            combined.edges.push(edge);
        }
    }

    combined
}

/// Color states for cycle detection using DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Node has not been visited.
    White,
    /// Node is currently on the recursion stack.
    Gray,
    /// Node has been fully visited.
    Black,
}

/// Find every cycle in the combined node/edge set.
///
/// Depth-first search with an explicit recursion stack: whenever a node
/// already on the stack is revisited, the slice of the stack from that
/// node's first occurrence to the current point (inclusive) is recorded
/// as one cycle, in traversal order. Fully visited nodes are never
/// re-expanded, so the search is linear in nodes plus edges; a node may
/// still appear in more than one reported cycle when the underlying
/// graph is not a simple cycle.
///
/// Edges may reference ids absent from `nodes` (external package
/// references); such endpoints participate as implicit nodes.
#[must_use]
pub fn detect_cycles(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<Vec<String>> {
    let mut graph: DiGraph<String, ()> = DiGraph::new();
    let mut indices: HashMap<&str, NodeIndex> = HashMap::new();

    for node in nodes {
        indices
            .entry(node.id.as_str())
            .or_insert_with(|| graph.add_node(node.id.clone()));
    }
    for edge in edges {
        let from = *indices
            .entry(edge.from.as_str())
            .or_insert_with(|| graph.add_node(edge.from.clone()));
        let to = *indices
            .entry(edge.to.as_str())
            .or_insert_with(|| graph.add_node(edge.to.clone()));
        if !graph.contains_edge(from, to) {
            graph.add_edge(from, to, ());
        }
    }

    let mut colors: HashMap<NodeIndex, Color> =
        graph.node_indices().map(|index| (index, Color::White)).collect();
    let mut stack: Vec<NodeIndex> = Vec::new();
    let mut cycles: Vec<Vec<String>> = Vec::new();

    for index in graph.node_indices() {
        if colors[&index] == Color::White {
            dfs_visit(&graph, index, &mut colors, &mut stack, &mut cycles);
        }
    }

    debug!(cycles = cycles.len(), "cycle detection complete");
    cycles
}

fn dfs_visit(
    graph: &DiGraph<String, ()>,
    node: NodeIndex,
    colors: &mut HashMap<NodeIndex, Color>,
    stack: &mut Vec<NodeIndex>,
    cycles: &mut Vec<Vec<String>>,
) {
    colors.insert(node, Color::Gray);
    stack.push(node);

    for neighbor in graph.neighbors(node) {
        match colors.get(&neighbor) {
            Some(Color::Gray) => {
                // Back edge: the stack slice from the neighbor's first
                // occurrence to here is one cycle.
                if let Some(start) = stack.iter().position(|&n| n == neighbor) {
                    let cycle = stack[start..].iter().map(|&n| graph[n].clone()).collect();
                    cycles.push(cycle);
                }
            }
            Some(Color::White) => {
                dfs_visit(graph, neighbor, colors, stack, cycles);
            }
            _ => {}
        }
    }

    stack.pop();
    colors.insert(node, Color::Black);
}
