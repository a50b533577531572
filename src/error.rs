use std::io;

use crate::edge::Weight;

/// Reasons [`Graph::add_edge`](crate::Graph::add_edge) refuses an edge.  The
/// graph is left unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EdgeError {
    /// The edge would start and end at the same vertex.
    #[error("self-loop on vertex {0:?}")]
    SelfLoop(String),
    /// The weight is below zero.
    #[error("negative weight {weight} on edge {start:?} -> {end:?}")]
    NegativeWeight {
        start: String,
        end: String,
        weight: Weight,
    },
    /// An edge between the same ordered pair already exists; the first one is
    /// kept.
    #[error("edge {start:?} -> {end:?} already exists")]
    DuplicateEdge { start: String, end: String },
}

/// Errors that can occur while reading an edge list.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The underlying reader failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The input did not start with an edge count.
    #[error("missing edge count")]
    MissingEdgeCount,
    /// The leading token is not a non-negative integer.
    #[error("invalid edge count {0:?}")]
    InvalidEdgeCount(String),
    /// An edge line's weight is not an integer.
    #[error("line {line}: invalid weight {token:?}")]
    InvalidWeight { line: usize, token: String },
    /// The input ended in the middle of an edge.
    #[error("line {line}: incomplete edge, expected \"start end weight\"")]
    IncompleteEdge { line: usize },
}
