//! End-to-end run: tables in, picture and summary out.

use crate::error::Result;
use crate::graph::{GraphStats, KnowledgeGraph};
use crate::layout::{spring_layout, LayoutConfig};
use crate::load::{InputFiles, Tables};
use crate::render::{render_svg, RenderOptions, TypePalette};
use crate::summary::{self, EntityConnections};
use serde::Serialize;
use std::path::PathBuf;

pub const IMAGE_FILE: &str = "knowledge_graph_FINAL.svg";
pub const SUMMARY_FILE: &str = "top_entities.csv";

#[derive(Debug, Clone)]
pub struct VisualizeOptions {
    /// Directory holding the entity/relationship tables.
    pub input_dir: PathBuf,
    /// Where the image and summary go; defaults to `input_dir`.
    pub output_dir: Option<PathBuf>,
    pub layout: LayoutConfig,
    pub render: RenderOptions,
    /// Rows in the top-entities summary.
    pub top_n: usize,
}

impl VisualizeOptions {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            layout: LayoutConfig::default(),
            render: RenderOptions::default(),
            top_n: 20,
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| self.input_dir.clone())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VisualizeReport {
    pub entities_file: PathBuf,
    pub relationships_file: PathBuf,
    pub entity_count: usize,
    pub relationship_count: usize,
    /// Rows per entity type; empty when the table carries no types.
    pub type_counts: Vec<(String, usize)>,
    pub stats: GraphStats,
    pub image_path: PathBuf,
    pub summary_path: PathBuf,
    pub top_entities: Vec<EntityConnections>,
}

pub fn visualize(options: &VisualizeOptions) -> Result<VisualizeReport> {
    let files = InputFiles::locate(&options.input_dir)?;
    let tables = Tables::load(&files)?;

    let graph = KnowledgeGraph::from_tables(&tables);
    let stats = graph.stats();
    tracing::info!(nodes = stats.nodes, edges = stats.edges, "graph built");

    tracing::info!(iterations = options.layout.iterations, "computing layout");
    let positions = spring_layout(&graph, &options.layout);

    let palette = TypePalette::new(&tables.entity_types());
    let svg = render_svg(&graph, &positions, &palette, &options.render);

    let out_dir = options.output_dir();
    std::fs::create_dir_all(&out_dir)?;
    let image_path = out_dir.join(IMAGE_FILE);
    std::fs::write(&image_path, svg)?;
    tracing::info!(path = %image_path.display(), "visualization saved");

    let top = summary::top_entities(&tables.relationships, options.top_n);
    let summary_path = out_dir.join(SUMMARY_FILE);
    summary::write_csv(&summary_path, &top)?;
    tracing::info!(path = %summary_path.display(), "top entities saved");

    Ok(VisualizeReport {
        entities_file: files.entities,
        relationships_file: files.relationships,
        entity_count: tables.entities.len(),
        relationship_count: tables.relationships.len(),
        type_counts: if tables.has_types() {
            tables.entity_type_counts()
        } else {
            Vec::new()
        },
        stats,
        image_path,
        summary_path,
        top_entities: top,
    })
}
