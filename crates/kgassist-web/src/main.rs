//! kgassist Web - browser front-end for GraphRAG document indexes.

use anyhow::Result;
use clap::Parser;
use kgassist_core::config::Config;
use kgassist_web::{routes, AppState};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kgassist-web")]
#[command(about = "GraphRAG Knowledge Assistant - browser front-end")]
struct Cli {
    /// Port to listen on (default: from kgassist.toml, else 8501)
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to (default: from kgassist.toml, else 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Project root holding the document indexes
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file (default: kgassist.toml in this or a parent directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(root) = cli.root {
        config = config.with_root(root);
    }
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let addr = format!("{}:{}", config.web.host, config.web.port);
    let state = AppState::new(config);

    // Surface a missing project up front; requests re-check on their own
    match state.catalog() {
        Ok(catalog) => tracing::info!(
            root = %catalog.root().display(),
            documents = catalog.documents().len(),
            "document catalog ready"
        ),
        Err(e) => tracing::warn!("{e}"),
    }

    println!("Starting GraphRAG Knowledge Assistant...");
    println!("Open http://{} in your browser", addr);

    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
