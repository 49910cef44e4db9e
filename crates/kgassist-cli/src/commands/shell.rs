//! Interactive question loop.
//!
//! Plain lines are questions for the selected document; lines starting with
//! `:` change the selection or show things.

use anyhow::Result;
use colored::Colorize;
use kgassist_core::prelude::*;
use std::io::{self, BufRead, Write};

use super::{ask, graph};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Question(String),
    Doc(String),
    Method(String),
    Docs,
    Graph,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ShellInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellInput::Empty;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return ShellInput::Question(trimmed.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };
    match (name, arg) {
        ("doc" | "d", arg) if !arg.is_empty() => ShellInput::Doc(arg.to_string()),
        ("method" | "m", arg) if !arg.is_empty() => ShellInput::Method(arg.to_string()),
        ("docs", _) => ShellInput::Docs,
        ("graph" | "g", _) => ShellInput::Graph,
        ("help" | "h" | "?", _) => ShellInput::Help,
        ("quit" | "q" | "exit", _) => ShellInput::Quit,
        _ => ShellInput::Unknown(trimmed.to_string()),
    }
}

pub fn run(config: &Config, doc: Option<&str>, method: SearchMethod) -> Result<()> {
    let catalog = Catalog::discover(&config.project)?;
    let mut current = catalog.select(doc)?.clone();
    let mut method = method;

    println!("{}", "GraphRAG Knowledge Assistant".white().bold());
    println!("{}", "AI-powered reasoning over structured knowledge graphs".dimmed());
    println!("Type a question, or {} for commands.", ":help".cyan());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\n{} {} ", format!("[{} · {}]", current.name, method).blue(), "❯".green());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            break;
        };

        match parse_line(&line?) {
            ShellInput::Empty => {}
            ShellInput::Quit => break,
            ShellInput::Help => print_help(),
            ShellInput::Docs => {
                for doc in catalog.documents() {
                    let marker = if doc.name == current.name { "●".green() } else { "○".dimmed() };
                    println!("  {} {}", marker, doc.name);
                }
            }
            ShellInput::Doc(name) => match catalog.get(&name) {
                Ok(doc) => {
                    current = doc.clone();
                    println!("  {} document: {}", "✓".green(), current.name.cyan());
                }
                Err(e) => println!("  {} {}", "✗".red(), e),
            },
            ShellInput::Method(name) => match name.parse::<SearchMethod>() {
                Ok(m) => {
                    method = m;
                    println!("  {} method: {} ({})", "✓".green(), method.to_string().cyan(), method.help());
                }
                Err(e) => println!("  {} {}", "✗".red(), e),
            },
            ShellInput::Graph => graph::show(&catalog, &current, config, false)?,
            ShellInput::Unknown(input) => {
                println!("  {} unknown command: {} (try {})", "✗".red(), input, ":help".cyan());
            }
            ShellInput::Question(question) => {
                match ask::execute(config, &current.path, method, &question) {
                    Ok(outcome) => ask::print_outcome(&outcome),
                    // Keep the session alive if the tool is missing or fails to start
                    Err(e) => println!("  {} {}", "✗".red(), e),
                }
            }
        }
    }

    Ok(())
}

fn print_help() {
    println!("  {}  switch document", ":doc <name>".cyan());
    println!("  {}  global (reasoning across graph) | local (deep entity-level search)", ":method <m>".cyan());
    println!("  {}        list documents", ":docs".cyan());
    println!("  {}       show the knowledge graph image path", ":graph".cyan());
    println!("  {}        leave", ":quit".cyan());
}
