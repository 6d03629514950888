//! Reachability traversal over the lineage graph.
//!
//! Given a start node, a direction, and an optional depth bound, this
//! computes the set of reachable edges and the nodes they touch. This
//! is the piece every "what feeds this / what does this break"
//! question reduces to.

use crate::graph::{LineageGraph, NodeId};
use petgraph::Direction as PetDirection;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Which way to follow edges from the selected node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Impact: nodes reachable by following edges forward.
    #[default]
    Downstream,

    /// Lineage: nodes reachable by following edges backward.
    Upstream,

    /// Union of both traversals, seeded independently.
    Both,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Downstream => "downstream",
            Direction::Upstream => "upstream",
            Direction::Both => "both",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "downstream" | "down" | "impact" => Ok(Direction::Downstream),
            "upstream" | "up" | "lineage" => Ok(Direction::Upstream),
            "both" => Ok(Direction::Both),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// The result of one traversal: reachable edges and the node set they
/// touch.
///
/// Edges keep the graph's own orientation regardless of traversal
/// direction: an upstream query returns `ancestor -> descendant`
/// edges, never reversed. Ordered sets make output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachableSet {
    /// Directed edges `(from, to)` in the graph's orientation.
    pub edges: BTreeSet<(String, String)>,

    /// Every node appearing as an endpoint of a reachable edge.
    pub nodes: BTreeSet<String>,
}

impl ReachableSet {
    /// True when the traversal found no connections.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl LineageGraph {
    /// Computes the reachable edge set from `start`.
    ///
    /// A blank start, or one not present in the graph, yields an empty
    /// set: unknown-node queries are a normal display state, not an
    /// error. `max_depth` of `None` means unbounded.
    pub fn reachable(
        &self,
        start: &str,
        direction: Direction,
        max_depth: Option<usize>,
    ) -> ReachableSet {
        let mut set = ReachableSet::default();

        let start = start.trim();
        let start_index = match self.get_index(start) {
            Some(index) => index,
            None => {
                debug!(start, "start node absent from graph, empty result");
                return set;
            }
        };

        match direction {
            Direction::Downstream => self.walk(start_index, PetDirection::Outgoing, max_depth, &mut set),
            Direction::Upstream => self.walk(start_index, PetDirection::Incoming, max_depth, &mut set),
            Direction::Both => {
                self.walk(start_index, PetDirection::Outgoing, max_depth, &mut set);
                self.walk(start_index, PetDirection::Incoming, max_depth, &mut set);
            }
        }

        set
    }

    /// Iterative depth-first walk in one direction.
    ///
    /// The explicit `(node, level)` stack avoids recursion on deep
    /// chains; the visited set terminates cycles and self-loops. A
    /// node is marked visited when popped even if the depth bound
    /// stops its expansion, so the first-reached depth wins.
    fn walk(
        &self,
        start: NodeId,
        petgraph_direction: PetDirection,
        max_depth: Option<usize>,
        out: &mut ReachableSet,
    ) {
        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];

        while let Some((node, level)) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            if max_depth.is_some_and(|max| level >= max) {
                continue;
            }

            for neighbor in self.graph.neighbors_directed(node, petgraph_direction) {
                // Keep the graph's own edge orientation: walking
                // predecessors still emits ancestor -> descendant.
                let (from, to) = match petgraph_direction {
                    PetDirection::Outgoing => (node, neighbor),
                    PetDirection::Incoming => (neighbor, node),
                };

                let from_name = self.graph[from].clone();
                let to_name = self.graph[to].clone();
                out.nodes.insert(from_name.clone());
                out.nodes.insert(to_name.clone());
                out.edges.insert((from_name, to_name));

                if !visited.contains(&neighbor) {
                    stack.push((neighbor, level + 1));
                }
            }
        }
    }
}
