//! Record types for ETL mapping rows.

use serde::{Deserialize, Serialize};

/// One row as read from a mapping file.
///
/// Fields are trimmed at read time but not yet validated; cleaning
/// (see [`crate::clean_records`]) decides which rows survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub source: String,
    pub job: String,
    pub target: String,
    pub job_id: Option<String>,
    pub project: Option<String>,
}

/// A cleaned ETL lineage fact: `job` reads from `source` and writes to
/// `target`.
///
/// Invariant: `source` and `job` are non-empty, trimmed, and not the
/// literal "none" in any casing. `target` may be empty only when the
/// table was cleaned for the two-hop edge model (a job with no recorded
/// downstream yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeRecord {
    pub source: String,
    pub job: String,
    pub target: String,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub job_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub project: Option<String>,
}

impl EdgeRecord {
    /// Creates a record without metadata.
    pub fn new(
        source: impl Into<String>,
        job: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            job: job.into(),
            target: target.into(),
            job_id: None,
            project: None,
        }
    }

    /// Attaches the optional job id.
    pub fn with_job_id(mut self, job_id: impl Into<String>) -> Self {
        self.job_id = Some(job_id.into());
        self
    }

    /// Attaches the optional project name.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    /// True when the record has a recorded downstream object.
    pub fn has_target(&self) -> bool {
        !self.target.is_empty()
    }
}

/// Classification of a graph node for display.
///
/// Jobs and tables share one identifier namespace; a name that appears
/// in any record's job column is a job, everything else is a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Job,
    Table,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Job => "job",
            NodeKind::Table => "table",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "job" => Ok(NodeKind::Job),
            "table" => Ok(NodeKind::Table),
            other => Err(format!("unknown node kind: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_metadata() {
        let rec = EdgeRecord::new("Raw_Sales", "Job_A", "Stg_Sales")
            .with_job_id("1042")
            .with_project("sales_mart");

        assert_eq!(rec.job_id.as_deref(), Some("1042"));
        assert_eq!(rec.project.as_deref(), Some("sales_mart"));
        assert!(rec.has_target());
    }

    #[test]
    fn test_blank_target() {
        let rec = EdgeRecord::new("Raw_Sales", "Job_A", "");
        assert!(!rec.has_target());
    }

    #[test]
    fn test_node_kind_display() {
        assert_eq!(NodeKind::Job.to_string(), "job");
        assert_eq!(NodeKind::Table.to_string(), "table");
    }

    #[test]
    fn test_record_json_shape() {
        let rec = EdgeRecord::new("A", "J", "B").with_job_id("7");
        let json = serde_json::to_value(&rec).unwrap();

        assert_eq!(json["source"], "A");
        assert_eq!(json["jobId"], "7");
        // Absent metadata is omitted, not null
        assert!(json.get("project").is_none());
    }
}
