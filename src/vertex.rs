use std::{
    collections::BTreeMap,
    ops::Bound::{Excluded, Unbounded},
};

use derivative::Derivative;

use crate::edge::{Edge, Weight};

/// Position of a vertex's neighbor cursor within its adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// Before the first (label-smallest) neighbor.
    Start,
    /// Just past the neighbor with this label.
    After(String),
    /// No neighbors left.
    Exhausted,
}

/// A vertex of a [`Graph`](crate::Graph): a unique label, the outgoing edges
/// keyed and ordered by destination label, and the per-vertex state used by
/// traversals (a visited flag and a neighbor cursor).
///
/// Vertices compare, order and hash by label only.
#[derive(Derivative)]
#[derivative(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex {
    label: String,
    #[derivative(
        PartialEq = "ignore",
        PartialOrd = "ignore",
        Ord = "ignore",
        Hash = "ignore"
    )]
    visited: bool,
    #[derivative(
        PartialEq = "ignore",
        PartialOrd = "ignore",
        Ord = "ignore",
        Hash = "ignore"
    )]
    adjacency: BTreeMap<String, Edge>,
    #[derivative(
        Debug = "ignore",
        PartialEq = "ignore",
        PartialOrd = "ignore",
        Ord = "ignore",
        Hash = "ignore"
    )]
    cursor: Cursor,
}

impl Vertex {
    /// Creates an unvisited vertex with no neighbors.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            visited: false,
            adjacency: BTreeMap::new(),
            cursor: Cursor::Start,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn visit(&mut self) {
        self.visited = true;
    }

    pub fn unvisit(&mut self) {
        self.visited = false;
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// Adds an edge from this vertex to `destination`.  Returns false, leaving
    /// the vertex unchanged, if `destination` is this vertex or an edge to it
    /// already exists.
    pub fn connect(&mut self, destination: &str, weight: Weight) -> bool {
        if destination == self.label || self.adjacency.contains_key(destination) {
            return false;
        }
        self.adjacency
            .insert(destination.to_string(), Edge::new(destination, weight));
        true
    }

    /// Removes the edge to `destination`, returning whether one existed.
    pub fn disconnect(&mut self, destination: &str) -> bool {
        self.adjacency.remove(destination).is_some()
    }

    /// Gets the weight of the edge to `destination`, if there is one.
    pub fn edge_weight(&self, destination: &str) -> Option<Weight> {
        self.adjacency.get(destination).map(Edge::weight)
    }

    pub fn num_neighbors(&self) -> usize {
        self.adjacency.len()
    }

    /// Iterates over the outgoing edges in ascending destination order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency.values()
    }

    /// Moves the neighbor cursor back to the first neighbor.
    pub fn reset_neighbor(&mut self) {
        self.cursor = Cursor::Start;
    }

    /// Returns the label of the neighbor under the cursor and advances it, or
    /// `None` once every neighbor has been returned.  Neighbors come out in
    /// ascending label order.
    pub fn next_neighbor(&mut self) -> Option<String> {
        let next = match &self.cursor {
            Cursor::Start => self.adjacency.keys().next(),
            Cursor::After(previous) => self
                .adjacency
                .range::<str, _>((Excluded(previous.as_str()), Unbounded))
                .next()
                .map(|(label, _)| label),
            Cursor::Exhausted => None,
        }
        .cloned();
        self.cursor = match &next {
            Some(label) => Cursor::After(label.clone()),
            None => Cursor::Exhausted,
        };
        next
    }
}
