//! Tributary Graph - Lineage graph construction and traversal
//!
//! This crate turns a cleaned table of ETL mapping records into a
//! directed graph and answers reachability queries over it: which
//! objects a change would impact (downstream) and which feed into a
//! given object (upstream).
//!
//! # Architecture
//!
//! The graph uses petgraph internally with a name index for lookups.
//! Two edge models are supported: the direct model (`source ->
//! target`, job as label) and the two-hop model (`source -> job ->
//! target`, job as node). Traversal is an iterative depth-first walk
//! with a visited set, optionally depth-bounded.
//!
//! # Example
//!
//! ```no_run
//! use tributary_core::EdgeRecord;
//! use tributary_graph::{run_query, EdgeModel, LineageQuery};
//!
//! let records = vec![
//!     EdgeRecord::new("Raw_Sales", "Job_A", "Stg_Sales"),
//!     EdgeRecord::new("Stg_Sales", "Job_B", "Dim_Customer"),
//! ];
//!
//! let result = run_query(&records, EdgeModel::TwoHop, &LineageQuery::new("Raw_Sales"));
//! assert!(result.nodes.iter().any(|n| n.name == "Dim_Customer"));
//! ```

mod builder;
mod edge;
mod graph;
mod project;
mod query;
mod traverse;

pub use builder::{build_graph, EdgeModel, GraphBuilder};
pub use edge::{Edge, EdgeKind, GraphEdge};
pub use graph::{GraphStats, LineageGraph, NodeId};
pub use project::{classify, classify_nodes, direct_neighbors, filter_rows, job_names, NodeInfo};
pub use query::{render_payload, run_query, LineageQuery, QueryEdge, QueryResult, RenderPayload};
pub use traverse::{Direction, ReachableSet};
