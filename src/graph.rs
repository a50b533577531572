use std::collections::BTreeMap;

use crate::{
    edge::Weight,
    error::EdgeError,
    vertex::Vertex,
};

/// A directed graph whose vertices are identified by string labels and whose
/// edges carry non-negative integer weights.
///
/// Vertices are created on demand by [`Graph::add_edge`] and are never
/// removed.  Both the vertices and each vertex's outgoing edges are kept in
/// ascending label order, which makes every traversal deterministic: wherever
/// a traversal has a choice, it takes the smallest label first.
///
/// Traversals record their progress in the vertices themselves (visited flags
/// and neighbor cursors), which is why they take `&mut self`.  The flags are
/// reset at the start of every traversal and left as they were at its end.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: BTreeMap<String, Vertex>,
    num_edges: usize,
}

impl Graph {
    /// Creates a new, empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_vertex(&self, label: &str) -> bool {
        self.vertices.contains_key(label)
    }

    /// Gets the vertex with the given label.
    pub fn vertex(&self, label: &str) -> Option<&Vertex> {
        self.vertices.get(label)
    }

    /// Iterates over the vertices in ascending label order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> + '_ {
        self.vertices.values()
    }

    /// Iterates over the vertex labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.vertices.keys().map(String::as_str)
    }

    /// Adds an edge from `start` to `end`, creating either vertex if it does
    /// not exist yet.
    ///
    /// Self-loops and negative weights are refused before any vertex is
    /// created.  An edge between the same ordered pair can only be added once;
    /// a second attempt fails and keeps the original weight.
    pub fn add_edge(&mut self, start: &str, end: &str, weight: Weight) -> Result<(), EdgeError> {
        if weight < 0 {
            return Err(EdgeError::NegativeWeight {
                start: start.to_string(),
                end: end.to_string(),
                weight,
            });
        }
        if start == end {
            return Err(EdgeError::SelfLoop(start.to_string()));
        }

        self.find_or_create_vertex(end);
        if !self.find_or_create_vertex(start).connect(end, weight) {
            return Err(EdgeError::DuplicateEdge {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        self.num_edges += 1;
        Ok(())
    }

    /// Gets the weight of the edge from `start` to `end`.  Returns `None` if
    /// either vertex is missing or they are not directly connected.
    pub fn edge_weight(&self, start: &str, end: &str) -> Option<Weight> {
        if !self.vertices.contains_key(end) {
            return None;
        }
        self.vertices.get(start)?.edge_weight(end)
    }

    pub(crate) fn vertex_mut(&mut self, label: &str) -> Option<&mut Vertex> {
        self.vertices.get_mut(label)
    }

    /// Marks every vertex as not visited.
    pub(crate) fn unvisit_vertices(&mut self) {
        for vertex in self.vertices.values_mut() {
            vertex.unvisit();
        }
    }

    /// Returns whether the vertex with the given label exists and is visited.
    pub(crate) fn is_visited(&self, label: &str) -> bool {
        self.vertices.get(label).is_some_and(Vertex::is_visited)
    }

    fn find_or_create_vertex(&mut self, label: &str) -> &mut Vertex {
        self.vertices
            .entry(label.to_string())
            .or_insert_with(|| Vertex::new(label))
    }
}
