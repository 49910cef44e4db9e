//! Write a default kgassist.toml.

use anyhow::{Context, Result};
use colored::Colorize;
use kgassist_core::config::{Config, CONFIG_FILE_NAME};
use std::path::PathBuf;

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let base_path = match path {
        Some(p) => p,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing kgassist...", "→".blue());

    std::fs::create_dir_all(&base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    } else {
        Config::default()
            .save(&config_path)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    }

    let root = base_path.join(Config::default().project.root);
    if !root.exists() {
        println!(
            "  {} {} does not exist yet; index your documents there first",
            "•".yellow(),
            root.display()
        );
    }

    println!();
    println!("Next steps:");
    println!("  {} kgassist docs", "1.".blue());
    println!("  {} kgassist ask \"your question\" --doc <document>", "2.".blue());
    println!("  {} kgassist shell", "3.".blue());

    Ok(())
}
