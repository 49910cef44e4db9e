//! List the available document indexes.

use anyhow::Result;
use colored::Colorize;
use kgassist_core::prelude::*;

pub fn run(config: &Config) -> Result<()> {
    let catalog = Catalog::discover(&config.project)?;

    println!(
        "{} Documents in {}:",
        "→".blue(),
        catalog.root().display().to_string().cyan()
    );
    println!();

    for (i, doc) in catalog.documents().iter().enumerate() {
        let graph = match catalog.find_graph_image(doc, &config.graph) {
            Some(_) => "graph".green().to_string(),
            None => "no graph".dimmed().to_string(),
        };
        let marker = if i == 0 { " (default)".dimmed().to_string() } else { String::new() };
        println!(
            "  {} {}{} [{}]",
            format!("{}.", i + 1).blue(),
            doc.name.white().bold(),
            marker,
            graph
        );
    }

    let missing: Vec<&str> = config
        .project
        .documents
        .iter()
        .map(|s| s.as_str())
        .filter(|name| catalog.get(name).is_err())
        .collect();
    if !missing.is_empty() {
        println!();
        println!("  {} not found: {}", "•".yellow(), missing.join(", ").dimmed());
    }

    Ok(())
}
