//! Graph builder for constructing the lineage graph from mapping records.
//!
//! Two edge models are supported. The direct model draws one edge per
//! record, `source -> target`, labeled with the job. The two-hop model
//! puts the job itself in the graph, `source -> job -> target`, so
//! "is this table touched by this job" is answered the same way as any
//! table-to-table query.

use crate::edge::{Edge, EdgeKind};
use crate::graph::LineageGraph;
use serde::{Deserialize, Serialize};
use tributary_core::EdgeRecord;

/// How mapping records become edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeModel {
    /// One edge per record: `source -> target`, labeled by job.
    Direct,

    /// Two edges per record: `source -> job` and `job -> target`.
    TwoHop,
}

impl EdgeModel {
    /// Whether cleaning must reject records with a blank target.
    ///
    /// The direct model cannot represent a job with no downstream;
    /// the two-hop model materializes `source -> job` alone.
    pub fn requires_target(&self) -> bool {
        matches!(self, EdgeModel::Direct)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeModel::Direct => "direct",
            EdgeModel::TwoHop => "two-hop",
        }
    }
}

impl std::fmt::Display for EdgeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EdgeModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(EdgeModel::Direct),
            "two-hop" | "two_hop" | "twohop" => Ok(EdgeModel::TwoHop),
            other => Err(format!("unknown edge model: {other}")),
        }
    }
}

/// Builds a [`LineageGraph`] from cleaned mapping records.
pub struct GraphBuilder {
    graph: LineageGraph,
    model: EdgeModel,
}

impl GraphBuilder {
    /// Creates a builder for the given edge model.
    pub fn new(model: EdgeModel) -> Self {
        Self {
            graph: LineageGraph::new(),
            model,
        }
    }

    /// Adds one record's edges to the graph.
    pub fn add_record(&mut self, record: &EdgeRecord) {
        match self.model {
            EdgeModel::Direct => {
                // Cleaning rejects blank targets for this model; a
                // record that slips through has no edge to draw.
                if !record.has_target() {
                    return;
                }
                let source = self.graph.add_node(&record.source);
                let target = self.graph.add_node(&record.target);
                self.graph
                    .add_edge(source, target, Edge::labeled(EdgeKind::Flow, &record.job));
            }
            EdgeModel::TwoHop => {
                let source = self.graph.add_node(&record.source);
                let job = self.graph.add_node(&record.job);
                self.graph
                    .add_edge(source, job, Edge::labeled(EdgeKind::Feeds, &record.job));

                if record.has_target() {
                    let target = self.graph.add_node(&record.target);
                    self.graph
                        .add_edge(job, target, Edge::labeled(EdgeKind::Produces, &record.job));
                }
            }
        }
    }

    /// Adds every record in the slice.
    pub fn add_records<'a>(&mut self, records: impl IntoIterator<Item = &'a EdgeRecord>) {
        for record in records {
            self.add_record(record);
        }
    }

    /// Finishes building and returns the graph.
    pub fn build(self) -> LineageGraph {
        self.graph
    }
}

/// Builds a graph from the record table in one call.
pub fn build_graph(records: &[EdgeRecord], model: EdgeModel) -> LineageGraph {
    let mut builder = GraphBuilder::new(model);
    builder.add_records(records);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_model_one_edge_per_record() {
        let records = vec![EdgeRecord::new("Raw_Sales", "Job_A", "Stg_Sales")];
        let graph = build_graph(&records, EdgeModel::Direct);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.contains("Raw_Sales"));
        assert!(graph.contains("Stg_Sales"));
        // The job is a label, not a node
        assert!(!graph.contains("Job_A"));
        assert!(graph.jobs_for("Raw_Sales", "Stg_Sales").unwrap().contains("Job_A"));
    }

    #[test]
    fn test_two_hop_model_splits_record() {
        let records = vec![EdgeRecord::new("S", "J", "T")];
        let graph = build_graph(&records, EdgeModel::TwoHop);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.jobs_for("S", "J").is_some());
        assert!(graph.jobs_for("J", "T").is_some());
        // No direct source -> target shortcut
        assert!(graph.jobs_for("S", "T").is_none());
    }

    #[test]
    fn test_two_hop_blank_target_materializes_one_edge() {
        let records = vec![EdgeRecord::new("S", "J", "")];
        let graph = build_graph(&records, EdgeModel::TwoHop);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.jobs_for("S", "J").is_some());
    }

    #[test]
    fn test_repeated_rows_deduplicate() {
        let records = vec![
            EdgeRecord::new("A", "Job_A", "B"),
            EdgeRecord::new("A", "Job_A", "B"),
            EdgeRecord::new("A", "Job_B", "B"),
        ];
        let graph = build_graph(&records, EdgeModel::Direct);

        assert_eq!(graph.edge_count(), 1);
        let jobs = graph.jobs_for("A", "B").unwrap();
        assert_eq!(jobs.len(), 2);
    }

    #[test]
    fn test_shared_namespace() {
        // A job name that also appears as a source gets one node
        let records = vec![
            EdgeRecord::new("A", "Job_X", "B"),
            EdgeRecord::new("Job_X", "Job_Y", "C"),
        ];
        let graph = build_graph(&records, EdgeModel::TwoHop);

        // A, Job_X, B, Job_Y, C
        assert_eq!(graph.node_count(), 5);
    }
}
