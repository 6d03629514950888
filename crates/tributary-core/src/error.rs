use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading mapping files.
///
/// All of these are blocking: the operator is told, and no traversal
/// is attempted over partially loaded data.
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited data: {0}")]
    Csv(#[from] csv::Error),

    #[error("{} is missing a required column: {column}", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
}

impl DataLoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn missing_column(path: impl Into<PathBuf>, column: &'static str) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column,
        }
    }
}
