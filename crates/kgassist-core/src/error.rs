//! Error types for kgassist operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for kgassist operations.
pub type Result<T> = std::result::Result<T, AssistError>;

/// Errors raised while locating documents or forwarding a query.
#[derive(Debug, Error)]
pub enum AssistError {
    /// The configured project root does not exist.
    #[error("project folder not found: {}", .0.display())]
    ProjectRootMissing(PathBuf),

    /// None of the allowed document folders exist under the root.
    #[error("none of the required document folders were found in {}", .root.display())]
    NoDocuments { root: PathBuf },

    /// The requested document is not in the catalog.
    #[error("unknown document: {0}")]
    UnknownDocument(String),

    /// The question was blank.
    #[error("please enter a question")]
    EmptyQuestion,

    /// A search method other than `global` or `local`.
    #[error("invalid search method '{0}' (expected 'global' or 'local')")]
    InvalidMethod(String),

    /// The retrieval tool binary is not on the PATH.
    #[error("query tool '{0}' not found; is it installed and on the PATH?")]
    ToolNotFound(String),

    /// The retrieval tool could not be started.
    #[error("failed to start query tool '{program}': {source}")]
    ToolSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
