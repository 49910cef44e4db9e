//! Application state for the web server.
//!
//! The catalog is rediscovered on every call so the page always reflects
//! what is on disk. Query tool runs are blocking and go to tokio's blocking
//! pool.

use kgassist_core::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> Result<Catalog> {
        Catalog::discover(&self.config.project)
    }

    /// Forward a question about `document` (or the default document) to the
    /// query tool.
    pub async fn query(
        &self,
        document: Option<&str>,
        method: SearchMethod,
        question: String,
    ) -> std::result::Result<(Document, QueryOutcome), QueryError> {
        let catalog = self.catalog()?;
        let doc = catalog.select(document)?.clone();
        let request = QueryRequest::new(&doc.path, method, question);
        let command = QueryCommand::new(&self.config.tool, &request)?;

        let outcome = tokio::task::spawn_blocking(move || command.run())
            .await??;
        Ok((doc, outcome))
    }

    /// Path of the document's graph image, if one has been rendered.
    pub fn graph_image(&self, document: &str) -> Result<Option<PathBuf>> {
        let catalog = self.catalog()?;
        let doc = catalog.get(document)?;
        Ok(catalog.find_graph_image(doc, &self.config.graph))
    }
}

/// Failure to produce a query outcome at all.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Assist(#[from] AssistError),
    /// The blocking task panicked or was cancelled.
    #[error("query task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_error_wraps_core_errors_transparently() {
        let err = QueryError::from(AssistError::UnknownDocument("doc_x".to_string()));
        assert!(matches!(err, QueryError::Assist(AssistError::UnknownDocument(_))));
        assert_eq!(err.to_string(), AssistError::UnknownDocument("doc_x".to_string()).to_string());
    }

    #[tokio::test]
    async fn missing_project_surfaces_as_assist_error() {
        let tmp = tempfile::tempdir().unwrap();
        let state = AppState::new(Config::default().with_root(tmp.path().join("project")));
        let err = state
            .query(None, SearchMethod::Global, "q".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, QueryError::Assist(AssistError::ProjectRootMissing(_))));
    }
}
