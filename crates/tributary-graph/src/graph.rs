//! Core graph data structure.
//!
//! The LineageGraph wraps petgraph and adds a name index for lookups.
//! Nodes are plain string identifiers; jobs and tables share one
//! namespace and are told apart only at projection time.

use crate::edge::{Edge, GraphEdge};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique identifier for a node in the graph.
pub type NodeId = NodeIndex;

/// The directed lineage graph over object and job names.
///
/// Rebuilt from the cleaned record table on every invocation; there is
/// no persistent graph state and no mutation after construction.
#[derive(Debug, Serialize, Deserialize)]
pub struct LineageGraph {
    /// The underlying petgraph graph; node weights are the names.
    pub(crate) graph: DiGraph<String, Edge>,

    /// Maps names to graph node indexes.
    name_index: HashMap<String, NodeId>,
}

impl Default for LineageGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl LineageGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            name_index: HashMap::new(),
        }
    }

    /// Adds a node, or returns the existing index when the name is
    /// already present.
    pub fn add_node(&mut self, name: &str) -> NodeId {
        if let Some(&index) = self.name_index.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.to_string());
        self.name_index.insert(name.to_string(), index);
        index
    }

    /// Adds an edge between two nodes.
    ///
    /// Identical edges (same endpoints, same direction) are stored
    /// once: re-adding merges the new edge's job labels into the
    /// stored edge. The first edge's kind wins.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, edge: Edge) {
        match self.graph.find_edge(from, to) {
            Some(existing) => {
                let stored = &mut self.graph[existing];
                stored.jobs.extend(edge.jobs);
            }
            None => {
                self.graph.add_edge(from, to, edge);
            }
        }
    }

    /// Gets the node index for a name.
    pub fn get_index(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Gets the name for a node index.
    pub fn name(&self, index: NodeId) -> Option<&str> {
        self.graph.node_weight(index).map(String::as_str)
    }

    /// True when a node with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    /// Jobs whose mapping rows contributed the `from -> to` edge.
    pub fn jobs_for(&self, from: &str, to: &str) -> Option<&std::collections::BTreeSet<String>> {
        let from = self.get_index(from)?;
        let to = self.get_index(to)?;
        let edge = self.graph.find_edge(from, to)?;
        Some(&self.graph[edge].jobs)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates over all node names, in insertion order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Returns all edges with endpoint names for export.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        self.graph
            .edge_references()
            .map(|edge_ref| {
                let weight = edge_ref.weight();
                GraphEdge {
                    source: self.graph[edge_ref.source()].clone(),
                    target: self.graph[edge_ref.target()].clone(),
                    kind: weight.kind,
                    jobs: weight.jobs.iter().cloned().collect(),
                }
            })
            .collect()
    }

    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
        }
    }
}

/// Graph statistics for status output and the render payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}
