//! Convenience re-exports for the front-end crates.

pub use crate::catalog::{Catalog, Document};
pub use crate::config::{Config, GraphConfig, ProjectConfig, ToolConfig, WebConfig};
pub use crate::error::{AssistError, Result};
pub use crate::query::{QueryCommand, QueryOutcome, QueryRequest, SearchMethod};
