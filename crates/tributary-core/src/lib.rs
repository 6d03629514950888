//! Tributary Core - ETL mapping records and loading
//!
//! This crate owns the input side of the pipeline: reading delimited
//! mapping files, trimming and validating fields, and producing the
//! cleaned [`EdgeRecord`] table everything downstream works with.
//!
//! A mapping row states one lineage fact: process `job` reads from
//! `source` and writes to `target`. Rows arrive either as one combined
//! table or as two tables joined on the job name.

mod clean;
mod error;
mod loader;
mod record;

pub use clean::{clean_records, normalize_field};
pub use error::DataLoadError;
pub use loader::{load_mappings, load_split};
pub use record::{EdgeRecord, NodeKind, RawRecord};
