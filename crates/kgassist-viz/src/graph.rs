//! In-memory knowledge graph built from the loaded tables.
//!
//! Backed by an undirected petgraph `Graph` with a title index for O(1)
//! lookup. One node per entity title, at most one edge per node pair.

use crate::load::Tables;
use crate::model::{Entity, Relationship};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct EntityNode {
    pub title: String,
    pub entity_type: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationEdge {
    pub description: String,
    pub weight: f64,
}

/// Basic network statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub components: usize,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    graph: UnGraph<EntityNode, RelationEdge>,
    /// Map from entity title to petgraph's internal index.
    index: HashMap<String, NodeIndex>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from tables: all entities first, then every relationship whose
    /// endpoints are both known entities.
    pub fn from_tables(tables: &Tables) -> Self {
        let mut graph = Self::new();
        for entity in &tables.entities {
            graph.add_entity(entity);
        }
        let dropped = tables
            .relationships
            .iter()
            .filter(|rel| !graph.add_relationship(rel))
            .count();
        if dropped > 0 {
            tracing::debug!(dropped, "relationships with unknown endpoints skipped");
        }
        graph
    }

    /// Insert an entity, or refresh the attributes of an existing title.
    pub fn add_entity(&mut self, entity: &Entity) -> NodeIndex {
        let data = EntityNode {
            title: entity.title.clone(),
            entity_type: entity.entity_type.clone(),
            description: entity.description.clone(),
        };
        if let Some(&idx) = self.index.get(&entity.title) {
            self.graph[idx] = data;
            return idx;
        }
        let idx = self.graph.add_node(data);
        self.index.insert(entity.title.clone(), idx);
        idx
    }

    /// Connect two known entities. Returns false, adding nothing, when either
    /// endpoint is missing.
    pub fn add_relationship(&mut self, rel: &Relationship) -> bool {
        let Some(&a) = self.index.get(&rel.source) else {
            return false;
        };
        let Some(&b) = self.index.get(&rel.target) else {
            return false;
        };
        let data = RelationEdge {
            description: rel.description.clone(),
            weight: rel.weight,
        };
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge] = data,
            None => {
                self.graph.add_edge(a, b, data);
            }
        }
        true
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    pub fn node(&self, title: &str) -> Option<&EntityNode> {
        self.index.get(title).map(|idx| &self.graph[*idx])
    }

    /// Nodes in insertion order, which is also index order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &EntityNode)> {
        self.graph
            .node_indices()
            .map(move |idx| (idx, &self.graph[idx]))
    }

    /// Edge endpoints with their data.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &RelationEdge)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// Degree of every node, indexed by `NodeIndex::index()`. A self-loop
    /// counts twice.
    pub fn degree_vector(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.graph.node_count()];
        for edge in self.graph.edge_references() {
            degrees[edge.source().index()] += 1;
            degrees[edge.target().index()] += 1;
        }
        degrees
    }

    /// Degree of one node; a self-loop counts twice. Pairs are unique, so a
    /// node has at most one self-loop.
    pub fn degree(&self, title: &str) -> Option<usize> {
        let idx = *self.index.get(title)?;
        let others = self
            .graph
            .edges(idx)
            .filter(|e| e.source() != e.target())
            .count();
        let self_loop = self.graph.find_edge(idx, idx).is_some();
        Some(others + if self_loop { 2 } else { 0 })
    }

    /// `(title, degree)` for every node in insertion order.
    pub fn degrees(&self) -> Vec<(&str, usize)> {
        let degrees = self.degree_vector();
        self.nodes()
            .map(|(idx, node)| (node.title.as_str(), degrees[idx.index()]))
            .collect()
    }

    /// Fraction of possible edges present: 2m / (n(n-1)).
    pub fn density(&self) -> f64 {
        let n = self.graph.node_count();
        if n <= 1 {
            return 0.0;
        }
        let m = self.graph.edge_count() as f64;
        2.0 * m / (n as f64 * (n as f64 - 1.0))
    }

    pub fn connected_components(&self) -> usize {
        petgraph::algo::connected_components(&self.graph)
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            density: self.density(),
            components: self.connected_components(),
        }
    }
}
