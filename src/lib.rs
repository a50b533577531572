//! An in-memory directed graph with string-labelled vertices and
//! non-negative integer edge weights, supporting label-ordered depth-first and
//! breadth-first traversal and single-source shortest paths.
//!
//! ```
//! use weighted_digraph::Graph;
//!
//! let mut graph = Graph::from_edge_list_str("3\nA B 1\nB C 3\nA C 10\n").unwrap();
//! assert_eq!(graph.dfs("A"), ["A", "B", "C"]);
//! assert_eq!(graph.bfs("A"), ["A", "B", "C"]);
//! assert_eq!(graph.shortest_paths("A").to_string(), "B(1) C(4) via [B]");
//! ```

pub mod edge;
pub mod error;
pub mod graph;
pub mod loader;
pub mod path;
pub mod search;
pub mod tracing_support;
pub mod vertex;

mod generate_large_graph;
mod graph_test_support;

pub use crate::edge::{Edge, Weight};
pub use crate::error::{EdgeError, LoadError};
pub use crate::graph::Graph;
pub use crate::path::{ShortestPathStrategy, ShortestPaths};
pub use crate::vertex::Vertex;
