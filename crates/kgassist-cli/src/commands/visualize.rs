//! Render a knowledge graph from entity/relationship tables.

use anyhow::Result;
use colored::Colorize;
use kgassist_core::config::Config;
use kgassist_viz::{visualize, VisualizeOptions, VisualizeReport, VizError};
use std::path::PathBuf;

pub fn run(
    config: &Config,
    dir: PathBuf,
    out: Option<PathBuf>,
    title: Option<String>,
    top: usize,
    json: bool,
) -> Result<()> {
    let mut options = VisualizeOptions::new(dir);
    options.output_dir = out;
    options.render.title = title.unwrap_or_else(|| config.graph.title.clone());
    options.top_n = top;

    if !json {
        println!("{}", "Knowledge Graph Visualizer".white().bold());
        println!("{}", "═".repeat(40).dimmed());
    }

    let report = match visualize(&options) {
        Ok(report) => report,
        Err(VizError::EntitiesNotFound { dir, found }) => {
            println!("{} Entity file not found in {}", "✗".red().bold(), dir.display());
            if found.is_empty() {
                println!("  No tabular files found in the output directory");
            } else {
                println!("  Found these files:");
                for name in found {
                    println!("    - {}", name);
                }
            }
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn print_report(report: &VisualizeReport) {
    println!();
    println!("  {} Entities from:      {}", "✓".green(), file_name(&report.entities_file));
    println!("  {} Relationships from: {}", "✓".green(), file_name(&report.relationships_file));
    println!();

    println!("{}", "Data Summary".blue().bold());
    println!("  Total entities:      {}", report.entity_count.to_string().cyan());
    println!("  Total relationships: {}", report.relationship_count.to_string().cyan());
    println!();

    if !report.type_counts.is_empty() {
        println!("{}", "Entity Types".blue().bold());
        for (entity_type, count) in &report.type_counts {
            println!("  {:<20} {}", entity_type, count.to_string().cyan());
        }
        println!();
    }

    println!("{}", "Network Statistics".blue().bold());
    println!("  Nodes:               {}", report.stats.nodes.to_string().cyan());
    println!("  Edges:               {}", report.stats.edges.to_string().cyan());
    println!("  Density:             {:.4}", report.stats.density);
    println!("  Connected components: {}", report.stats.components.to_string().cyan());
    println!();

    println!("{}", "Most Connected".blue().bold());
    for (i, row) in report.top_entities.iter().take(5).enumerate() {
        println!(
            "  {} {} {}",
            format!("{}.", i + 1).blue(),
            row.entity.white().bold(),
            format!("({})", row.connections).dimmed()
        );
    }
    println!();

    println!("{}", "═".repeat(40).dimmed());
    println!("{} Generated files:", "✓".green().bold());
    println!("  • {}", report.image_path.display());
    println!("  • {}", report.summary_path.display());
}
