//! Dependency accumulator backed by petgraph::DiGraph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::config::{Dependency, Reference};

/// One edge per ordered `(source, target)` pair, each carrying its
/// references in discovery order. Edge indices follow first discovery.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<String, Vec<Reference>>,
    /// O(1) resource id → NodeIndex lookup.
    id_index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for a resource id.
    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.id_index.get(id) {
            idx
        } else {
            let idx = self.graph.add_node(id.to_string());
            self.id_index.insert(id.to_string(), idx);
            idx
        }
    }

    /// Append a reference to the `source → target` edge, creating the edge
    /// on first discovery.
    pub fn add_reference(&mut self, source: &str, target: &str, reference: Reference) {
        let from = self.ensure_node(source);
        let to = self.ensure_node(target);
        match self.graph.find_edge(from, to) {
            Some(edge) => self.graph[edge].push(reference),
            None => {
                self.graph.add_edge(from, to, vec![reference]);
            }
        }
    }

    /// Emit the edges in first-discovery order.
    pub fn dependencies(&self) -> Vec<Dependency> {
        self.graph
            .edge_references()
            .map(|edge| Dependency {
                source: self.graph[edge.source()].clone(),
                target: self.graph[edge.target()].clone(),
                references: edge.weight().clone(),
            })
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn reference_count(&self) -> usize {
        self.graph.edge_weights().map(Vec::len).sum()
    }

    /// Resources that directly reference `id`.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        self.neighbours(id, Direction::Incoming)
    }

    /// Resources that `id` directly references.
    pub fn dependencies_of(&self, id: &str) -> Vec<&str> {
        self.neighbours(id, Direction::Outgoing)
    }

    fn neighbours(&self, id: &str, direction: Direction) -> Vec<&str> {
        let Some(&idx) = self.id_index.get(id) else {
            return Vec::new();
        };
        let mut result: Vec<&str> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Incoming => edge.source(),
                    Direction::Outgoing => edge.target(),
                };
                self.graph[other].as_str()
            })
            .collect();
        result.sort_unstable();
        result
    }

    /// Rebuild the accumulator from an already assembled dependency list.
    pub fn from_dependencies(dependencies: &[Dependency]) -> Self {
        let mut graph = Self::new();
        for dep in dependencies {
            for reference in &dep.references {
                graph.add_reference(&dep.source, &dep.target, reference.clone());
            }
        }
        graph
    }
}
