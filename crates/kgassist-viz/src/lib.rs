//! # kgassist Viz
//!
//! Turns the entity and relationship tables written by a GraphRAG index run
//! into a static knowledge graph picture, a handful of network statistics,
//! and a CSV of the most connected entities.
//!
//! The pipeline is deliberately conventional: an undirected petgraph graph,
//! a seeded Fruchterman-Reingold layout, colors by entity type, node sizes by
//! degree, rendered to SVG.
//!
//! ```rust,no_run
//! use kgassist_viz::{visualize, VisualizeOptions};
//!
//! let report = visualize(&VisualizeOptions::new("output"))?;
//! println!("{} nodes, density {:.4}", report.stats.nodes, report.stats.density);
//! # Ok::<(), kgassist_viz::VizError>(())
//! ```

pub mod error;
pub mod graph;
pub mod layout;
pub mod load;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod summary;

pub use error::{Result, VizError};
pub use graph::{GraphStats, KnowledgeGraph};
pub use layout::{spring_layout, LayoutConfig};
pub use load::{InputFiles, Tables};
pub use model::{Entity, Relationship};
pub use pipeline::{visualize, VisualizeOptions, VisualizeReport, IMAGE_FILE, SUMMARY_FILE};
pub use render::{RenderOptions, TypePalette};
pub use summary::{top_entities, EntityConnections};
