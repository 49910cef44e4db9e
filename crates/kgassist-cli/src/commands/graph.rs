//! Locate (and optionally open) a document's rendered knowledge graph.

use anyhow::{Context, Result};
use colored::Colorize;
use kgassist_core::prelude::*;
use std::path::Path;

pub fn run(config: &Config, doc: Option<&str>, open: bool) -> Result<()> {
    let catalog = Catalog::discover(&config.project)?;
    let doc = catalog.select(doc)?;
    show(&catalog, doc, config, open)
}

pub(crate) fn show(catalog: &Catalog, doc: &Document, config: &Config, open: bool) -> Result<()> {
    println!("{} Knowledge Graph: {}", "→".blue(), doc.name.cyan().bold());

    match catalog.find_graph_image(doc, &config.graph) {
        Some(path) => {
            println!("  {} {}", "✓".green(), path.display());
            if open {
                open_image(&path)?;
            }
        }
        None => {
            println!("  {} Knowledge graph image not found.", "•".yellow());
            for candidate in catalog.graph_image_candidates(doc, &config.graph) {
                println!("    {}", candidate.display().to_string().dimmed());
            }
        }
    }
    Ok(())
}

fn open_image(path: &Path) -> Result<()> {
    let opener = if cfg!(target_os = "macos") { "open" } else { "xdg-open" };
    std::process::Command::new(opener)
        .arg(path)
        .spawn()
        .with_context(|| format!("Failed to launch {opener} for {}", path.display()))?;
    Ok(())
}
