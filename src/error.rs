use std::path::PathBuf;

use thiserror::Error;

/// Everything that can abort indexing a dataset root.
///
/// Non-numeric entries under `train/` or `test/` are not errors; they are
/// skipped by the loader.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot resolve dataset root {}: {source}", .path.display())]
    ResolveRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot expand `~`: no home directory for the current user")]
    HomeDirUnavailable,

    #[error("cannot expand `~{name}`: no such user")]
    UnknownUser { name: String },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed label file {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("label file {} has no '{column}' column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("label file {}, row {row}: '{value}' is not an integer", .path.display())]
    InvalidLabel {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("subject '{id}' has no row in the label table")]
    MissingLabel { id: String },
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
