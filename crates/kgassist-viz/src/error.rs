//! Error types for the visualizer.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VizError>;

#[derive(Debug, Error)]
pub enum VizError {
    /// No entity table in the input directory. `found` lists the tabular
    /// files that do exist there.
    #[error("entity file not found in {}", .dir.display())]
    EntitiesNotFound { dir: PathBuf, found: Vec<String> },

    #[error("relationship file not found in {}", .dir.display())]
    RelationshipsNotFound { dir: PathBuf },

    /// None of the accepted column names is present.
    #[error("{}: missing column (expected one of: {})", .file.display(), .expected.join(", "))]
    MissingColumn { file: PathBuf, expected: Vec<String> },

    #[error("{}: {message}", .file.display())]
    InvalidTable { file: PathBuf, message: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
