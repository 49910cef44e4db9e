//! CLI command implementations.

pub mod ask;
pub mod docs;
pub mod graph;
pub mod init;
pub mod shell;
pub mod visualize;

use anyhow::Result;
use kgassist_core::config::Config;
use std::path::{Path, PathBuf};

/// Load the config file (explicit or discovered) and apply the `--root` override.
pub fn load_config(path: Option<&Path>, root: Option<PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(match root {
        Some(root) => config.with_root(root),
        None => config,
    })
}
