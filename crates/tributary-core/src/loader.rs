//! Delimited mapping-file loading.
//!
//! Mapping rows arrive in one of two shapes: a combined table with
//! source/job/target columns, or two tables ("sources to jobs" and
//! "jobs to targets") joined on the job name. Column headers vary
//! between extracts, so they are resolved case-insensitively against
//! alias lists.

use crate::error::DataLoadError;
use crate::record::RawRecord;
use csv::StringRecord;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::path::Path;
use tracing::debug;

// Header aliases seen across extracts. The first entry is the
// canonical name reported in MissingColumn errors.
const SOURCE_COLUMNS: &[&str] = &["source", "source_object_name", "source_object", "source_table"];
const JOB_COLUMNS: &[&str] = &["job", "job_name"];
const TARGET_COLUMNS: &[&str] = &["target", "target_object_name", "target_object", "target_table"];
const JOB_ID_COLUMNS: &[&str] = &["jobid", "job_id"];
const PROJECT_COLUMNS: &[&str] = &["project", "project_name"];

/// Loads a combined mapping table (source, job, target per row).
///
/// Job id and project columns are picked up when present. Rows are
/// trimmed but not validated; pass the result through
/// [`crate::clean_records`].
pub fn load_mappings(path: impl AsRef<Path>) -> Result<Vec<RawRecord>, DataLoadError> {
    let path = path.as_ref();
    let mut reader = open_reader(path)?;
    let headers = reader.headers()?.clone();

    let source_col = require_column(&headers, SOURCE_COLUMNS, path)?;
    let job_col = require_column(&headers, JOB_COLUMNS, path)?;
    let target_col = require_column(&headers, TARGET_COLUMNS, path)?;
    let job_id_col = find_column(&headers, JOB_ID_COLUMNS);
    let project_col = find_column(&headers, PROJECT_COLUMNS);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawRecord {
            source: field(&record, source_col),
            job: field(&record, job_col),
            target: field(&record, target_col),
            job_id: opt_field(&record, job_id_col),
            project: opt_field(&record, project_col),
        });
    }

    debug!(path = %path.display(), rows = rows.len(), "loaded combined mapping table");
    Ok(rows)
}

/// Loads a split mapping: a sources→jobs table and a jobs→targets
/// table, joined on the job name.
///
/// A job with source rows but no target row yields records with a
/// blank target (no recorded downstream yet). A job with target rows
/// but no source rows cannot be anchored and is dropped.
pub fn load_split(
    sources_path: impl AsRef<Path>,
    targets_path: impl AsRef<Path>,
) -> Result<Vec<RawRecord>, DataLoadError> {
    let sources_path = sources_path.as_ref();
    let targets_path = targets_path.as_ref();

    // sources → jobs
    let mut reader = open_reader(sources_path)?;
    let headers = reader.headers()?.clone();
    let source_col = require_column(&headers, SOURCE_COLUMNS, sources_path)?;
    let job_col = require_column(&headers, JOB_COLUMNS, sources_path)?;

    let mut source_rows: Vec<(String, String)> = Vec::new();
    for record in reader.records() {
        let record = record?;
        source_rows.push((field(&record, source_col), field(&record, job_col)));
    }

    // jobs → targets, grouped by job for the join
    let mut reader = open_reader(targets_path)?;
    let headers = reader.headers()?.clone();
    let job_col = require_column(&headers, JOB_COLUMNS, targets_path)?;
    let target_col = require_column(&headers, TARGET_COLUMNS, targets_path)?;
    let job_id_col = find_column(&headers, JOB_ID_COLUMNS);
    let project_col = find_column(&headers, PROJECT_COLUMNS);

    let mut targets_by_job: BTreeMap<String, Vec<TargetRow>> = BTreeMap::new();
    for record in reader.records() {
        let record = record?;
        targets_by_job
            .entry(field(&record, job_col))
            .or_default()
            .push(TargetRow {
                target: field(&record, target_col),
                job_id: opt_field(&record, job_id_col),
                project: opt_field(&record, project_col),
            });
    }

    let mut rows = Vec::new();
    let mut joined_jobs: HashSet<String> = HashSet::new();

    for (source, job) in source_rows {
        match targets_by_job.get(&job) {
            Some(targets) => {
                joined_jobs.insert(job.clone());
                for t in targets {
                    rows.push(RawRecord {
                        source: source.clone(),
                        job: job.clone(),
                        target: t.target.clone(),
                        job_id: t.job_id.clone(),
                        project: t.project.clone(),
                    });
                }
            }
            None => rows.push(RawRecord {
                source,
                job,
                target: String::new(),
                job_id: None,
                project: None,
            }),
        }
    }

    let orphaned = targets_by_job
        .keys()
        .filter(|job| !joined_jobs.contains(*job))
        .count();
    if orphaned > 0 {
        debug!(orphaned, "target-only jobs with no source rows were dropped");
    }

    debug!(
        sources = %sources_path.display(),
        targets = %targets_path.display(),
        rows = rows.len(),
        "loaded split mapping tables"
    );
    Ok(rows)
}

struct TargetRow {
    target: String,
    job_id: Option<String>,
    project: Option<String>,
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>, DataLoadError> {
    let file = File::open(path).map_err(|e| DataLoadError::io(path, e))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file))
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim();
        names.iter().any(|name| header.eq_ignore_ascii_case(name))
    })
}

fn require_column(
    headers: &StringRecord,
    names: &[&'static str],
    path: &Path,
) -> Result<usize, DataLoadError> {
    find_column(headers, names).ok_or_else(|| DataLoadError::missing_column(path, names[0]))
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or("").trim().to_string()
}

fn opt_field(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .and_then(|i| record.get(i))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
