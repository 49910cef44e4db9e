//! Ask a question of one document index.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use kgassist_core::prelude::*;
use std::path::Path;
use std::time::Duration;

pub fn run(config: &Config, question: &str, doc: Option<&str>, method: SearchMethod) -> Result<()> {
    let catalog = Catalog::discover(&config.project)?;
    let doc = catalog.select(doc)?;

    println!(
        "{} Asking {} ({} search)",
        "→".blue(),
        doc.name.cyan(),
        method.to_string().cyan()
    );

    let outcome = execute(config, &doc.path, method, question)?;
    print_outcome(&outcome);
    if let QueryOutcome::Failed { code, .. } = outcome {
        std::process::exit(code.unwrap_or(1).max(1));
    }
    Ok(())
}

/// Run the tool behind a spinner.
pub(crate) fn execute(
    config: &Config,
    project_path: &Path,
    method: SearchMethod,
    question: &str,
) -> Result<QueryOutcome> {
    let request = QueryRequest::new(project_path, method, question);
    let command = QueryCommand::new(&config.tool, &request)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Thinking... Please wait...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let outcome = command.run();
    spinner.finish_and_clear();
    Ok(outcome?)
}

pub(crate) fn print_outcome(outcome: &QueryOutcome) {
    println!();
    match outcome {
        QueryOutcome::Answer(text) => {
            println!("{} {}", "✓".green().bold(), "Answer".green().bold());
            println!();
            println!("{}", text.trim_end());
        }
        QueryOutcome::Failed { code, stderr } => {
            let status = code.map(|c| format!(" (exit {c})")).unwrap_or_default();
            println!("{} {}{}", "✗".red().bold(), "Error occurred".red().bold(), status.dimmed());
            println!();
            println!("{}", stderr.trim_end());
        }
    }
}
