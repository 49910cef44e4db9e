//! kgassist CLI - ask questions of pre-built GraphRAG document indexes.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use kgassist_core::query::SearchMethod;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kgassist")]
#[command(author, version, about = "GraphRAG Knowledge Assistant - reasoning over structured knowledge graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root holding the document indexes (overrides kgassist.toml)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Config file (default: kgassist.toml in this or a parent directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default kgassist.toml
    Init {
        /// Directory to write into (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// List the available document indexes
    Docs,

    /// Ask a question of one document index
    Ask {
        /// The question
        question: String,

        /// Document index (default: first available)
        #[arg(short, long)]
        doc: Option<String>,

        /// Search method: global = reasoning across graph, local = deep entity-level search
        #[arg(short, long, default_value = "global")]
        method: SearchMethod,
    },

    /// Show where a document's knowledge graph image is
    Graph {
        /// Document index (default: first available)
        #[arg(short, long)]
        doc: Option<String>,

        /// Open the image in the system viewer
        #[arg(long)]
        open: bool,
    },

    /// Interactive question loop
    Shell {
        /// Initial document index
        #[arg(short, long)]
        doc: Option<String>,

        /// Initial search method
        #[arg(short, long, default_value = "global")]
        method: SearchMethod,
    },

    /// Render a knowledge graph image from entity/relationship tables
    Visualize {
        /// Directory holding the tables
        #[arg(short, long, default_value = "output")]
        dir: PathBuf,

        /// Where to write the image and summary (default: same as --dir)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Graph title (default: from kgassist.toml)
        #[arg(short, long)]
        title: Option<String>,

        /// Rows in the top entities summary
        #[arg(long, default_value = "20")]
        top: usize,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let load = || commands::load_config(cli.config.as_deref(), cli.root.clone());

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Docs => commands::docs::run(&load()?),
        Commands::Ask { question, doc, method } => {
            commands::ask::run(&load()?, &question, doc.as_deref(), method)
        }
        Commands::Graph { doc, open } => commands::graph::run(&load()?, doc.as_deref(), open),
        Commands::Shell { doc, method } => commands::shell::run(&load()?, doc.as_deref(), method),
        Commands::Visualize { dir, out, title, top, json } => {
            commands::visualize::run(&load()?, dir, out, title, top, json)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
