//! Static SVG rendering of a laid-out knowledge graph.
//!
//! Sizes are specified in points like a plotting library would (node area
//! `500 + 100 * degree` pt²) and converted to pixels at 100 px per inch.

use crate::graph::KnowledgeGraph;
use std::collections::HashMap;
use std::fmt::Write;

/// Qualitative 12-color palette (ColorBrewer Set3).
const SET3: [&str; 12] = [
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462",
    "#b3de69", "#fccde5", "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];
const FALLBACK_COLOR: &str = "gray";

const PX_PER_POINT: f64 = 100.0 / 72.0;
const BASE_NODE_AREA: f64 = 500.0;
const NODE_AREA_PER_DEGREE: f64 = 100.0;

/// Maps entity types to palette colors.
///
/// Types are assigned colors in the order given; past the twelfth type every
/// further type shares the last palette entry.
#[derive(Debug, Clone)]
pub struct TypePalette {
    order: Vec<String>,
    colors: HashMap<String, &'static str>,
}

impl TypePalette {
    pub fn new(types: &[String]) -> Self {
        let colors = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), SET3[i.min(SET3.len() - 1)]))
            .collect();
        Self {
            order: types.to_vec(),
            colors,
        }
    }

    pub fn color(&self, entity_type: &str) -> &'static str {
        self.colors.get(entity_type).copied().unwrap_or(FALLBACK_COLOR)
    }

    /// `(type, color)` in assignment order, for the legend.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.order.iter().map(|t| (t.as_str(), self.color(t)))
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Subtitle after "Knowledge Graph - ".
    pub title: String,
    /// Canvas edge length in pixels (square).
    pub size: u32,
    /// How many of the highest degrees set the labelling threshold.
    pub label_limit: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Power Trading Documents".to_string(),
            size: 2400,
            label_limit: 30,
        }
    }
}

/// Point size² to pixel radius.
pub fn node_radius(degree: usize) -> f64 {
    let area = BASE_NODE_AREA + NODE_AREA_PER_DEGREE * degree as f64;
    area.sqrt() / 2.0 * PX_PER_POINT
}

/// Minimum degree among the `limit` highest degrees; nodes at or above it
/// get a label. Zero for an empty graph.
pub fn label_threshold(degrees: &[usize], limit: usize) -> usize {
    let mut sorted = degrees.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.truncate(limit.min(sorted.len()));
    sorted.last().copied().unwrap_or(0)
}

/// Render the graph to an SVG document.
pub fn render_svg(
    graph: &KnowledgeGraph,
    positions: &[[f64; 2]],
    palette: &TypePalette,
    options: &RenderOptions,
) -> String {
    let size = options.size as f64;
    let header = 140.0;
    let margin = 80.0;
    let plot = (size - header - 2.0 * margin).max(1.0);
    let to_px = |p: [f64; 2]| -> (f64, f64) {
        (
            margin + (p[0] + 1.0) / 2.0 * plot,
            header + margin + (1.0 - (p[1] + 1.0) / 2.0) * plot,
        )
    };
    let pt = |v: f64| v * PX_PER_POINT;

    let degrees = graph.degree_vector();
    let threshold = label_threshold(&degrees, options.label_limit);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
        s = options.size
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    // Edges
    let _ = writeln!(
        svg,
        r#"<g stroke="gray" stroke-opacity="0.2" stroke-width="{:.2}">"#,
        pt(1.0)
    );
    for (a, b, _) in graph.edges() {
        let (x1, y1) = to_px(positions[a.index()]);
        let (x2, y2) = to_px(positions[b.index()]);
        let _ = writeln!(svg, r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}"/>"#);
    }
    let _ = writeln!(svg, "</g>");

    // Nodes
    let _ = writeln!(
        svg,
        r#"<g fill-opacity="0.8" stroke="black" stroke-width="{:.2}">"#,
        pt(1.5)
    );
    for (idx, node) in graph.nodes() {
        let (cx, cy) = to_px(positions[idx.index()]);
        let _ = writeln!(
            svg,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{:.1}" fill="{}"><title>{}</title></circle>"#,
            node_radius(degrees[idx.index()]),
            palette.color(&node.entity_type),
            escape(&node.title)
        );
    }
    let _ = writeln!(svg, "</g>");

    // Labels for high-degree nodes
    let _ = writeln!(
        svg,
        r#"<g font-family="sans-serif" font-size="{:.1}" font-weight="bold" text-anchor="middle" dominant-baseline="central">"#,
        pt(10.0)
    );
    for (idx, node) in graph.nodes() {
        if degrees[idx.index()] < threshold {
            continue;
        }
        let (x, y) = to_px(positions[idx.index()]);
        let _ = writeln!(svg, r#"<text x="{x:.1}" y="{y:.1}">{}</text>"#, escape(&node.title));
    }
    let _ = writeln!(svg, "</g>");

    // Title
    let _ = writeln!(
        svg,
        r#"<g font-family="sans-serif" font-weight="bold" text-anchor="middle"><text x="{x:.1}" y="{y1:.1}" font-size="{fs:.1}">Knowledge Graph - {title}</text><text x="{x:.1}" y="{y2:.1}" font-size="{fs:.1}">{n} Entities | {m} Relationships</text></g>"#,
        x = size / 2.0,
        y1 = pt(22.0) + 20.0,
        y2 = 2.0 * pt(22.0) + 30.0,
        fs = pt(22.0),
        title = escape(&options.title),
        n = graph.node_count(),
        m = graph.edge_count(),
    );

    write_legend(&mut svg, palette, margin, header + margin);
    svg.push_str("</svg>\n");
    svg
}

fn write_legend(svg: &mut String, palette: &TypePalette, x: f64, y: f64) {
    let row = 12.0 * PX_PER_POINT * 1.6;
    let entries: Vec<(&str, &str)> = palette.entries().collect();
    let longest = entries.iter().map(|(t, _)| t.chars().count()).max().unwrap_or(0).max(12);
    let width = 40.0 + longest as f64 * 12.0 * PX_PER_POINT * 0.65;
    let height = row * (entries.len() as f64 + 1.0) + 20.0;

    let _ = writeln!(svg, r#"<g font-family="sans-serif">"#);
    let _ = writeln!(
        svg,
        r##"<rect x="{x:.1}" y="{y:.1}" width="{width:.1}" height="{height:.1}" fill="white" fill-opacity="0.8" stroke="#cccccc"/>"##
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="{:.1}">Entity Types</text>"#,
        x + 12.0,
        y + row,
        14.0 * PX_PER_POINT
    );
    for (i, (entity_type, color)) in entries.iter().enumerate() {
        let ry = y + row * (i as f64 + 2.0);
        let _ = writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="24" height="16" fill="{color}"/><text x="{:.1}" y="{:.1}" font-size="{:.1}">{}</text>"#,
            x + 12.0,
            ry - 14.0,
            x + 44.0,
            ry,
            12.0 * PX_PER_POINT,
            escape(&entity_type.to_uppercase())
        );
    }
    let _ = writeln!(svg, "</g>");
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
