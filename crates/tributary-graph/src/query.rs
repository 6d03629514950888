//! Query and render interface.
//!
//! These are the types the UI collaborator speaks: a query names a
//! node, a direction, and an optional depth; the result is the
//! reachable edge/node set, and the render payload adds everything the
//! diagram and the mapping table need. Field names are camelCase on
//! the wire.
//!
//! The graph is rebuilt from the record table on every call. With a
//! few hundred rows that costs nothing and removes a whole class of
//! stale-cache bugs.

use crate::builder::{build_graph, EdgeModel};
use crate::graph::GraphStats;
use crate::project::{classify_nodes, direct_neighbors, filter_rows, NodeInfo};
use crate::traverse::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tributary_core::EdgeRecord;

/// One traversal request from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageQuery {
    /// The node the operator picked.
    pub selected_node: String,

    #[serde(default)]
    pub direction: Direction,

    /// Maximum traversal depth; absent means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl LineageQuery {
    pub fn new(selected_node: impl Into<String>) -> Self {
        Self {
            selected_node: selected_node.into(),
            direction: Direction::default(),
            max_depth: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// A reachable edge on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryEdge {
    pub from: String,
    pub to: String,
}

/// The reachable subgraph for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub edges: Vec<QueryEdge>,
    pub nodes: Vec<NodeInfo>,
}

impl QueryResult {
    /// True when the query found no connections ("no connections
    /// found" display state, not an error).
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Everything the external renderer consumes for one interaction:
/// the subgraph, the one-hop emphasis set, the filtered mapping rows,
/// and graph statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub query: LineageQuery,
    pub edges: Vec<QueryEdge>,
    pub nodes: Vec<NodeInfo>,

    /// Nodes one hop from the selection, for bold labels.
    pub emphasized: Vec<String>,

    /// The mapping rows the traversal touched.
    pub rows: Vec<EdgeRecord>,

    pub stats: GraphStats,
}

/// Answers one query over the record table.
pub fn run_query(records: &[EdgeRecord], model: EdgeModel, query: &LineageQuery) -> QueryResult {
    let graph = build_graph(records, model);
    let set = graph.reachable(&query.selected_node, query.direction, query.max_depth);

    debug!(
        node = %query.selected_node,
        direction = %query.direction,
        edges = set.edge_count(),
        "query answered"
    );

    QueryResult {
        edges: set
            .edges
            .iter()
            .map(|(from, to)| QueryEdge {
                from: from.clone(),
                to: to.clone(),
            })
            .collect(),
        nodes: classify_nodes(&set, records),
    }
}

/// Builds the full render payload for one interaction.
pub fn render_payload(
    records: &[EdgeRecord],
    model: EdgeModel,
    query: &LineageQuery,
) -> RenderPayload {
    let graph = build_graph(records, model);
    let set = graph.reachable(&query.selected_node, query.direction, query.max_depth);

    RenderPayload {
        query: query.clone(),
        edges: set
            .edges
            .iter()
            .map(|(from, to)| QueryEdge {
                from: from.clone(),
                to: to.clone(),
            })
            .collect(),
        nodes: classify_nodes(&set, records),
        emphasized: direct_neighbors(&graph, &query.selected_node, query.direction)
            .into_iter()
            .collect(),
        rows: filter_rows(records, &set),
        stats: graph.stats(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tributary_core::NodeKind;

    fn records() -> Vec<EdgeRecord> {
        vec![
            EdgeRecord::new("A", "J1", "B"),
            EdgeRecord::new("B", "J2", "C"),
        ]
    }

    #[test]
    fn test_end_to_end_downstream_direct() {
        let result = run_query(&records(), EdgeModel::Direct, &LineageQuery::new("A"));

        assert!(result.nodes.iter().any(|n| n.name == "C"));
        assert!(result
            .edges
            .contains(&QueryEdge { from: "A".into(), to: "B".into() }));
    }

    #[test]
    fn test_end_to_end_downstream_two_hop() {
        let result = run_query(&records(), EdgeModel::TwoHop, &LineageQuery::new("A"));

        assert!(result.nodes.iter().any(|n| n.name == "C"));
        assert!(result
            .edges
            .contains(&QueryEdge { from: "A".into(), to: "J1".into() }));
    }

    #[test]
    fn test_end_to_end_upstream_reaches_origin() {
        let query = LineageQuery::new("C").with_direction(Direction::Upstream);
        let result = run_query(&records(), EdgeModel::TwoHop, &query);

        assert!(result.nodes.iter().any(|n| n.name == "A"));
    }

    #[test]
    fn test_unknown_node_is_empty_not_error() {
        let result = run_query(&records(), EdgeModel::TwoHop, &LineageQuery::new("Nowhere"));
        assert!(result.is_empty());
        assert!(result.nodes.is_empty());
    }

    #[test]
    fn test_render_payload_contents() {
        let payload = render_payload(&records(), EdgeModel::TwoHop, &LineageQuery::new("A"));

        assert_eq!(payload.rows.len(), 2);
        assert_eq!(payload.emphasized, vec!["J1".to_string()]);
        assert_eq!(payload.stats.node_count, 5);
        assert!(payload
            .nodes
            .iter()
            .any(|n| n.name == "J2" && n.kind == NodeKind::Job));
    }

    #[test]
    fn test_query_wire_format() {
        let json = r#"{"selectedNode": "Stg_Sales", "direction": "upstream", "maxDepth": 3}"#;
        let query: LineageQuery = serde_json::from_str(json).unwrap();

        assert_eq!(query.selected_node, "Stg_Sales");
        assert_eq!(query.direction, Direction::Upstream);
        assert_eq!(query.max_depth, Some(3));
    }

    #[test]
    fn test_node_wire_format() {
        let result = run_query(&records(), EdgeModel::TwoHop, &LineageQuery::new("A"));
        let json = serde_json::to_value(&result).unwrap();

        let node = &json["nodes"][0];
        assert!(node.get("id").is_some());
        assert!(node.get("type").is_some());
    }

    #[test]
    fn test_query_defaults() {
        let query: LineageQuery = serde_json::from_str(r#"{"selectedNode": "A"}"#).unwrap();
        assert_eq!(query.direction, Direction::Downstream);
        assert_eq!(query.max_depth, None);
    }
}
