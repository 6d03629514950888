//! Result projection.
//!
//! Maps a traversal result back onto the record table: classifies the
//! reachable nodes for display, filters the table down to the rows the
//! traversal touched, and computes the one-hop emphasis set the
//! renderer bolds.

use crate::graph::LineageGraph;
use crate::traverse::{Direction, ReachableSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tributary_core::{EdgeRecord, NodeKind};

/// A display-ready node: its name and whether it is a job or a table.
///
/// Serialized as `{id, type}`, the shape the renderer expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeInfo {
    #[serde(rename = "id")]
    pub name: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Collects every name appearing in a job column.
///
/// Pure function of the record table; recompute after every reload
/// rather than caching.
pub fn job_names(records: &[EdgeRecord]) -> HashSet<String> {
    records.iter().map(|record| record.job.clone()).collect()
}

/// Classifies one name. Job-column membership wins even when the name
/// also appears as a source or target elsewhere.
pub fn classify(name: &str, jobs: &HashSet<String>) -> NodeKind {
    if jobs.contains(name) {
        NodeKind::Job
    } else {
        NodeKind::Table
    }
}

/// Classifies every reachable node, sorted by name.
pub fn classify_nodes(set: &ReachableSet, records: &[EdgeRecord]) -> Vec<NodeInfo> {
    let jobs = job_names(records);
    set.nodes
        .iter()
        .map(|name| NodeInfo {
            name: name.clone(),
            kind: classify(name, &jobs),
        })
        .collect()
}

/// Filters the record table to the rows the traversal touched.
///
/// A row qualifies when its source and job are reachable and its
/// target is reachable or blank (a job with no recorded downstream).
/// This is the "currently relevant ETL mapping" table shown beneath
/// the diagram.
pub fn filter_rows(records: &[EdgeRecord], set: &ReachableSet) -> Vec<EdgeRecord> {
    records
        .iter()
        .filter(|record| {
            set.contains_node(&record.source)
                && set.contains_node(&record.job)
                && (!record.has_target() || set.contains_node(&record.target))
        })
        .cloned()
        .collect()
}

/// Nodes one hop from `start` in the chosen direction.
///
/// Purely for presentation emphasis (bold labels, thicker edges); the
/// renderer owns the visual encoding.
pub fn direct_neighbors(
    graph: &LineageGraph,
    start: &str,
    direction: Direction,
) -> BTreeSet<String> {
    let one_hop = graph.reachable(start, direction, Some(1));
    let start = start.trim();
    one_hop
        .nodes
        .into_iter()
        .filter(|name| name != start)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{build_graph, EdgeModel};

    fn records() -> Vec<EdgeRecord> {
        vec![
            EdgeRecord::new("Raw_Sales", "Job_A", "Stg_Sales"),
            EdgeRecord::new("Stg_Sales", "Job_B", "Dim_Customer"),
            EdgeRecord::new("Raw_Inventory", "Job_E", "Stg_Inventory"),
        ]
    }

    #[test]
    fn test_job_column_membership_wins() {
        // Job_A also appears as a source; it is still a job
        let records = vec![
            EdgeRecord::new("Raw_Sales", "Job_A", "Stg_Sales"),
            EdgeRecord::new("Job_A", "Job_B", "Audit_Log"),
        ];
        let jobs = job_names(&records);

        assert_eq!(classify("Job_A", &jobs), NodeKind::Job);
        assert_eq!(classify("Raw_Sales", &jobs), NodeKind::Table);
        assert_eq!(classify("Audit_Log", &jobs), NodeKind::Table);
    }

    #[test]
    fn test_classify_nodes_two_hop() {
        let records = records();
        let graph = build_graph(&records, EdgeModel::TwoHop);
        let set = graph.reachable("Raw_Sales", Direction::Downstream, None);

        let nodes = classify_nodes(&set, &records);
        let job_count = nodes.iter().filter(|n| n.kind == NodeKind::Job).count();
        let table_count = nodes.iter().filter(|n| n.kind == NodeKind::Table).count();

        // Raw_Sales, Job_A, Stg_Sales, Job_B, Dim_Customer
        assert_eq!(job_count, 2);
        assert_eq!(table_count, 3);
    }

    #[test]
    fn test_filter_rows_keeps_reachable_branch_only() {
        let records = records();
        let graph = build_graph(&records, EdgeModel::TwoHop);
        let set = graph.reachable("Raw_Sales", Direction::Downstream, None);

        let rows = filter_rows(&records, &set);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.job != "Job_E"));
    }

    #[test]
    fn test_filter_rows_blank_target() {
        let records = vec![
            EdgeRecord::new("Raw_Sales", "Job_A", "Stg_Sales"),
            EdgeRecord::new("Stg_Sales", "Job_Open", ""),
        ];
        let graph = build_graph(&records, EdgeModel::TwoHop);
        let set = graph.reachable("Raw_Sales", Direction::Downstream, None);

        // The open-ended job's row is shown: source and job reachable
        let rows = filter_rows(&records, &set);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_direct_neighbors_one_hop() {
        let records = records();
        let graph = build_graph(&records, EdgeModel::TwoHop);

        let near = direct_neighbors(&graph, "Raw_Sales", Direction::Downstream);
        assert_eq!(near, BTreeSet::from(["Job_A".to_string()]));

        let near = direct_neighbors(&graph, "Stg_Sales", Direction::Both);
        assert_eq!(
            near,
            BTreeSet::from(["Job_A".to_string(), "Job_B".to_string()])
        );
    }

    #[test]
    fn test_direct_neighbors_unknown_node() {
        let graph = build_graph(&records(), EdgeModel::TwoHop);
        assert!(direct_neighbors(&graph, "Nowhere", Direction::Both).is_empty());
    }
}
