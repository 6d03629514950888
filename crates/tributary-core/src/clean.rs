//! Row cleaning.
//!
//! Cleaning is a pure function of the raw row set: no caches, no
//! module-level state. Callers re-run it whenever the table is reloaded.

use crate::record::{EdgeRecord, RawRecord};
use tracing::debug;

/// Placeholder value some extracts use for "no object here".
const NONE_PLACEHOLDER: &str = "none";

/// Trims a field and rejects blank or placeholder values.
///
/// Returns `None` for a field that is empty after trimming or equals
/// "none" in any casing.
pub fn normalize_field(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NONE_PLACEHOLDER) {
        None
    } else {
        Some(trimmed)
    }
}

/// Cleans a raw row set into the validated record table.
///
/// A row is dropped when its source or job is blank or a "none"
/// placeholder. When `require_target` is set (the direct edge model),
/// the same applies to the target; otherwise a blank or placeholder
/// target is kept as an empty string, meaning the job has no recorded
/// downstream yet.
///
/// Dropped rows are counted and logged, not individually reported.
pub fn clean_records(rows: Vec<RawRecord>, require_target: bool) -> Vec<EdgeRecord> {
    let total = rows.len();
    let mut records = Vec::with_capacity(total);

    for row in rows {
        let (source, job) = match (normalize_field(&row.source), normalize_field(&row.job)) {
            (Some(source), Some(job)) => (source.to_string(), job.to_string()),
            _ => continue,
        };

        let target = match normalize_field(&row.target) {
            Some(target) => target.to_string(),
            None if require_target => continue,
            None => String::new(),
        };

        records.push(EdgeRecord {
            source,
            job,
            target,
            job_id: row.job_id.as_deref().and_then(normalize_field).map(String::from),
            project: row.project.as_deref().and_then(normalize_field).map(String::from),
        });
    }

    let dropped = total - records.len();
    if dropped > 0 {
        debug!(total, dropped, "dropped malformed mapping rows");
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(source: &str, job: &str, target: &str) -> RawRecord {
        RawRecord {
            source: source.to_string(),
            job: job.to_string(),
            target: target.to_string(),
            ..RawRecord::default()
        }
    }

    #[test]
    fn test_normalize_trims() {
        assert_eq!(normalize_field("  Stg_Sales  "), Some("Stg_Sales"));
        assert_eq!(normalize_field("   "), None);
        assert_eq!(normalize_field(""), None);
    }

    #[test]
    fn test_normalize_rejects_none_placeholder() {
        assert_eq!(normalize_field("none"), None);
        assert_eq!(normalize_field("NONE"), None);
        assert_eq!(normalize_field(" None "), None);
        // "none" as a substring is a real name
        assert_eq!(normalize_field("nonessential"), Some("nonessential"));
    }

    #[test]
    fn test_clean_drops_blank_source_or_job() {
        let rows = vec![
            row("A", "J1", "B"),
            row("", "J2", "C"),
            row("D", "  ", "E"),
            row("none", "J3", "F"),
        ];

        let records = clean_records(rows, true);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].job, "J1");
    }

    #[test]
    fn test_clean_trims_fields() {
        let records = clean_records(vec![row(" A ", " J1 ", " B ")], true);
        assert_eq!(records[0], EdgeRecord::new("A", "J1", "B"));
    }

    #[test]
    fn test_blank_target_policy() {
        let rows = vec![row("A", "J1", ""), row("B", "J2", "none")];

        // Direct model: the row needs a real target
        assert!(clean_records(rows.clone(), true).is_empty());

        // Two-hop model: kept, with the target blanked
        let records = clean_records(rows, false);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| !r.has_target()));
    }

    #[test]
    fn test_clean_normalizes_metadata() {
        let raw = RawRecord {
            source: "A".into(),
            job: "J1".into(),
            target: "B".into(),
            job_id: Some("  101 ".into()),
            project: Some("none".into()),
        };

        let records = clean_records(vec![raw], true);
        assert_eq!(records[0].job_id.as_deref(), Some("101"));
        assert_eq!(records[0].project, None);
    }
}
