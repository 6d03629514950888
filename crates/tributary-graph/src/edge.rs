//! Edge types for the lineage graph.
//!
//! An edge is pure adjacency plus the names of the jobs that put it
//! there. The job set exists so a traversed edge can be mapped back to
//! the mapping rows that produced it; it carries no rendering weight.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a directed edge means in the chosen edge model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Source object feeds a job (two-hop model, `source -> job`).
    Feeds,

    /// Job produces a target object (two-hop model, `job -> target`).
    Produces,

    /// Data flows source to target via a job (direct model).
    Flow,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feeds => "feeds",
            Self::Produces => "produces",
            Self::Flow => "flow",
        }
    }
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An edge in the lineage graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// The kind of hop this edge represents.
    pub kind: EdgeKind,

    /// Jobs whose mapping rows contributed this edge. Identical edges
    /// from repeated rows are stored once and merge here.
    pub jobs: BTreeSet<String>,
}

impl Edge {
    /// Creates an unlabeled edge.
    pub fn new(kind: EdgeKind) -> Self {
        Self {
            kind,
            jobs: BTreeSet::new(),
        }
    }

    /// Creates an edge labeled with its contributing job.
    pub fn labeled(kind: EdgeKind, job: impl Into<String>) -> Self {
        let mut edge = Self::new(kind);
        edge.jobs.insert(job.into());
        edge
    }
}

/// A flattened edge for export to the render collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub jobs: Vec<String>,
}
