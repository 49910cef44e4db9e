//! Configuration management for kgassist.
//!
//! Settings live in `kgassist.toml`, found in the current directory or any
//! parent. Every section is optional; missing values fall back to the
//! defaults below.

use crate::error::{AssistError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file searched for by [`Config::load`].
pub const CONFIG_FILE_NAME: &str = "kgassist.toml";

/// kgassist configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub tool: ToolConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub web: WebConfig,
}

/// Where the document indexes live and which of them are offered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Allow-list of document folders, in display order.
    #[serde(default = "default_documents")]
    pub documents: Vec<String>,
    /// The combined index whose graph is rendered at the project level.
    #[serde(default = "default_aggregate")]
    pub aggregate: String,
}

/// The external retrieval tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default = "default_subcommand")]
    pub subcommand: String,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

/// Location of rendered knowledge graph images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Candidate image names, first existing wins.
    #[serde(default = "default_image_files")]
    pub image_files: Vec<String>,
    /// Subtitle used by the visualizer.
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

// Default value functions
fn default_root() -> PathBuf { PathBuf::from("project") }
fn default_documents() -> Vec<String> {
    [
        "doc_invoice",
        "doc_power_schedule",
        "doc_invoice_schedule",
        "doc_peak_compensation",
        "doc_rsopl_schedule",
        "all_docs",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_aggregate() -> String { "all_docs".to_string() }
fn default_program() -> String { "graphrag".to_string() }
fn default_subcommand() -> String { "query".to_string() }
fn default_output_dir() -> String { "output".to_string() }
fn default_image_files() -> Vec<String> {
    vec![
        "knowledge_graph_FINAL.png".to_string(),
        "knowledge_graph_FINAL.svg".to_string(),
    ]
}
fn default_title() -> String { "Power Trading Documents".to_string() }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8501 }

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            documents: default_documents(),
            aggregate: default_aggregate(),
        }
    }
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            subcommand: default_subcommand(),
            extra_args: Vec::new(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            image_files: default_image_files(),
            title: default_title(),
        }
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load config from kgassist.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load config from a specific file.
    ///
    /// A relative project root is resolved against the file's directory, so
    /// a config found in a parent directory still points at its own project.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AssistError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            AssistError::Config(format!("failed to parse {}: {e}", path.display()))
        })?;

        if config.project.root.is_relative() {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                config.project.root = dir.join(&config.project.root);
            }
        }
        tracing::debug!(path = %path.display(), root = %config.project.root.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AssistError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate default config as TOML string.
    pub fn default_toml() -> Result<String> {
        toml::to_string_pretty(&Config::default())
            .map_err(|e| AssistError::Config(format!("failed to serialize config: {e}")))
    }

    /// Replace the project root (command-line override).
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project.root = root.into();
        self
    }
}

/// Find kgassist.toml in current or parent directories.
fn find_config_file() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}
