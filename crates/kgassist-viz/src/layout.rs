//! Seeded Fruchterman-Reingold spring layout.
//!
//! Positions start uniformly random in the unit square; each iteration moves
//! every node along its net force, capped by a temperature that cools
//! linearly to zero. Attraction is scaled by edge weight. The result is
//! centered and rescaled so the largest coordinate magnitude is 1.

use crate::graph::KnowledgeGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Distances are clamped to this to avoid division by zero.
const MIN_DISTANCE: f64 = 0.01;
/// Stop early once the mean displacement per node falls below this.
const THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Optimal distance between nodes.
    pub k: f64,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            k: 1.5,
            iterations: 50,
            seed: 42,
        }
    }
}

/// Compute a position for every node, indexed by `NodeIndex::index()`.
pub fn spring_layout(graph: &KnowledgeGraph, config: &LayoutConfig) -> Vec<[f64; 2]> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![[0.0, 0.0]],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();

    let neighbours = neighbour_lists(graph, n);

    let k = config.k;
    let mut temperature = 0.1 * span(&pos);
    let cooling = temperature / (config.iterations as f64 + 1.0);
    let mut displacement = vec![[0.0f64; 2]; n];

    for _ in 0..config.iterations {
        for (i, disp) in displacement.iter_mut().enumerate() {
            let mut d = [0.0, 0.0];
            // Repulsion between every pair
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (dx, dy, dist) = offset(&pos, i, j);
                let force = k * k / (dist * dist);
                d[0] += dx * force;
                d[1] += dy * force;
            }
            // Attraction along edges only
            for &(j, weight) in &neighbours[i] {
                let (dx, dy, dist) = offset(&pos, i, j);
                let force = weight * dist / k;
                d[0] -= dx * force;
                d[1] -= dy * force;
            }
            *disp = d;
        }

        let mut moved = 0.0;
        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = (d[0] * d[0] + d[1] * d[1]).sqrt().max(MIN_DISTANCE);
            let step = [d[0] * temperature / length, d[1] * temperature / length];
            p[0] += step[0];
            p[1] += step[1];
            moved += (step[0] * step[0] + step[1] * step[1]).sqrt();
        }
        temperature -= cooling;

        if moved / (n as f64) < THRESHOLD {
            break;
        }
    }

    rescale(&mut pos);
    pos
}

/// Weighted neighbours of each node; self-loops exert no force.
fn neighbour_lists(graph: &KnowledgeGraph, n: usize) -> Vec<Vec<(usize, f64)>> {
    let mut neighbours = vec![Vec::new(); n];
    for (a, b, edge) in graph.edges() {
        let (a, b) = (a.index(), b.index());
        if a == b {
            continue;
        }
        neighbours[a].push((b, edge.weight));
        neighbours[b].push((a, edge.weight));
    }
    neighbours
}

/// Vector from `j` to `i` and its clamped length.
fn offset(pos: &[[f64; 2]], i: usize, j: usize) -> (f64, f64, f64) {
    let dx = pos[i][0] - pos[j][0];
    let dy = pos[i][1] - pos[j][1];
    (dx, dy, (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE))
}

/// Larger of the x and y extents.
fn span(pos: &[[f64; 2]]) -> f64 {
    let extent = |axis: usize| {
        let (lo, hi) = pos
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p[axis]), hi.max(p[axis]))
            });
        hi - lo
    };
    extent(0).max(extent(1))
}

/// Center on the mean and scale into [-1, 1].
fn rescale(pos: &mut [[f64; 2]]) {
    let n = pos.len() as f64;
    let mean = pos
        .iter()
        .fold([0.0, 0.0], |acc, p| [acc[0] + p[0] / n, acc[1] + p[1] / n]);
    let mut limit: f64 = 0.0;
    for p in pos.iter_mut() {
        p[0] -= mean[0];
        p[1] -= mean[1];
        limit = limit.max(p[0].abs()).max(p[1].abs());
    }
    if limit > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= limit;
            p[1] /= limit;
        }
    }
}
