//! # kgassist Core
//!
//! Shared building blocks for the kgassist front-ends:
//!
//! - **config**: `kgassist.toml` loading with parent-directory discovery
//! - **catalog**: which pre-built document indexes exist on disk, and where
//!   their rendered knowledge graph images live
//! - **query**: building and running the external retrieval tool's command
//!   line, capturing its answer or its error output
//!
//! The retrieval itself happens in an external program (by default
//! `graphrag query`); this crate only prepares the invocation and reports
//! what came back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kgassist_core::prelude::*;
//!
//! let config = Config::load()?;
//! let catalog = Catalog::discover(&config.project)?;
//! let doc = catalog.default_document();
//!
//! let request = QueryRequest::new(&doc.path, SearchMethod::Global, "What drives peak charges?");
//! match QueryCommand::new(&config.tool, &request)?.run()? {
//!     QueryOutcome::Answer(text) => println!("{text}"),
//!     QueryOutcome::Failed { stderr, .. } => eprintln!("{stderr}"),
//! }
//! # Ok::<(), kgassist_core::AssistError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod prelude;
pub mod query;

pub use error::{AssistError, Result};
