//! Document catalog: which pre-built indexes are available.
//!
//! Only folders named in the configured allow-list are offered, in
//! allow-list order, and only if they exist on disk.

use crate::config::{GraphConfig, ProjectConfig};
use crate::error::{AssistError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A document index folder under the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub name: String,
    /// `<root>/<name>`, passed to the query tool as `--root`.
    pub path: PathBuf,
}

/// The set of document indexes found under a project root.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    aggregate: String,
    documents: Vec<Document>,
}

impl Catalog {
    /// Scan the project root for allowed document folders.
    pub fn discover(config: &ProjectConfig) -> Result<Self> {
        let root = config.root.clone();
        if !root.exists() {
            return Err(AssistError::ProjectRootMissing(root));
        }

        let documents: Vec<Document> = config
            .documents
            .iter()
            .map(|name| Document {
                name: name.clone(),
                path: root.join(name),
            })
            .filter(|doc| doc.path.is_dir())
            .collect();

        if documents.is_empty() {
            return Err(AssistError::NoDocuments { root });
        }

        tracing::debug!(
            root = %root.display(),
            available = documents.len(),
            allowed = config.documents.len(),
            "discovered documents"
        );

        Ok(Self {
            root,
            aggregate: config.aggregate.clone(),
            documents,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Available documents, in allow-list order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// The initial selection: the first available document.
    pub fn default_document(&self) -> &Document {
        // discover() guarantees at least one document
        &self.documents[0]
    }

    /// Look up an available document by name.
    pub fn get(&self, name: &str) -> Result<&Document> {
        self.documents
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| AssistError::UnknownDocument(name.to_string()))
    }

    /// Resolve an optional name, falling back to the default document.
    pub fn select(&self, name: Option<&str>) -> Result<&Document> {
        match name {
            Some(name) => self.get(name),
            None => Ok(self.default_document()),
        }
    }

    pub fn is_aggregate(&self, doc: &Document) -> bool {
        doc.name == self.aggregate
    }

    /// Every path where the document's graph image may live, in preference order.
    ///
    /// The aggregate index keeps its image in the project-level output folder;
    /// every other index keeps it in its own output folder.
    pub fn graph_image_candidates(&self, doc: &Document, graph: &GraphConfig) -> Vec<PathBuf> {
        let base = if self.is_aggregate(doc) {
            self.root.join(&graph.output_dir)
        } else {
            doc.path.join(&graph.output_dir)
        };
        graph.image_files.iter().map(|f| base.join(f)).collect()
    }

    /// The first existing graph image for the document, if any.
    pub fn find_graph_image(&self, doc: &Document, graph: &GraphConfig) -> Option<PathBuf> {
        self.graph_image_candidates(doc, graph)
            .into_iter()
            .find(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project(dirs: &[&str]) -> (tempfile::TempDir, ProjectConfig) {
        let tmp = tempfile::tempdir().unwrap();
        for d in dirs {
            fs::create_dir_all(tmp.path().join(d)).unwrap();
        }
        let config = ProjectConfig {
            root: tmp.path().to_path_buf(),
            ..ProjectConfig::default()
        };
        (tmp, config)
    }

    #[test]
    fn missing_root_is_reported() {
        let config = ProjectConfig {
            root: PathBuf::from("/nonexistent/kgassist/project"),
            ..ProjectConfig::default()
        };
        let err = Catalog::discover(&config).unwrap_err();
        assert!(matches!(err, AssistError::ProjectRootMissing(_)));
    }

    #[test]
    fn empty_root_has_no_documents() {
        let (_tmp, config) = project(&["unrelated"]);
        let err = Catalog::discover(&config).unwrap_err();
        assert!(matches!(err, AssistError::NoDocuments { .. }));
    }

    #[test]
    fn only_allowed_dirs_in_allow_list_order() {
        let (tmp, config) = project(&["all_docs", "scratch", "doc_rsopl_schedule", "doc_invoice"]);
        // A plain file with an allowed name is not a document
        fs::write(tmp.path().join("doc_power_schedule"), "not a dir").unwrap();

        let catalog = Catalog::discover(&config).unwrap();
        let names: Vec<&str> = catalog.documents().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["doc_invoice", "doc_rsopl_schedule", "all_docs"]);
        assert_eq!(catalog.default_document().name, "doc_invoice");
        assert_eq!(catalog.default_document().path, tmp.path().join("doc_invoice"));
    }

    #[test]
    fn get_rejects_unavailable_names() {
        let (_tmp, config) = project(&["doc_invoice"]);
        let catalog = Catalog::discover(&config).unwrap();
        assert!(catalog.get("doc_invoice").is_ok());
        assert!(matches!(
            catalog.get("doc_power_schedule"),
            Err(AssistError::UnknownDocument(_))
        ));
        assert!(matches!(catalog.get("scratch"), Err(AssistError::UnknownDocument(_))));
        assert_eq!(catalog.select(None).unwrap().name, "doc_invoice");
    }

    #[test]
    fn aggregate_image_lives_at_project_level() {
        let (tmp, config) = project(&["doc_invoice", "all_docs"]);
        let catalog = Catalog::discover(&config).unwrap();
        let graph = GraphConfig::default();

        let all = catalog.get("all_docs").unwrap();
        assert_eq!(
            catalog.graph_image_candidates(all, &graph)[0],
            tmp.path().join("output").join("knowledge_graph_FINAL.png")
        );

        let invoice = catalog.get("doc_invoice").unwrap();
        assert_eq!(
            catalog.graph_image_candidates(invoice, &graph)[0],
            tmp.path().join("doc_invoice/output/knowledge_graph_FINAL.png")
        );
    }

    #[test]
    fn find_graph_image_prefers_earlier_candidates() {
        let (tmp, config) = project(&["doc_invoice/output"]);
        let catalog = Catalog::discover(&config).unwrap();
        let graph = GraphConfig::default();
        let doc = catalog.get("doc_invoice").unwrap();

        assert_eq!(catalog.find_graph_image(doc, &graph), None);

        let svg = tmp.path().join("doc_invoice/output/knowledge_graph_FINAL.svg");
        fs::write(&svg, "<svg/>").unwrap();
        assert_eq!(catalog.find_graph_image(doc, &graph), Some(svg));

        let png = tmp.path().join("doc_invoice/output/knowledge_graph_FINAL.png");
        fs::write(&png, [0x89, b'P', b'N', b'G']).unwrap();
        assert_eq!(catalog.find_graph_image(doc, &graph), Some(png));
    }
}
