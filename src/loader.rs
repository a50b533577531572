//! Reading graphs from edge-list text.
//!
//! The format is a leading edge count followed by `start end weight` triples,
//! all separated by whitespace:
//!
//! ```text
//! 3
//! A B 1
//! B C 3
//! A C 10
//! ```
//!
//! The count is informational only.  Edges the graph refuses (self-loops,
//! negative weights, repeated pairs) are skipped.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    Graph,
    edge::Weight,
    error::LoadError,
    tracing_support::{debug, info_span},
};

impl Graph {
    /// Builds a graph from edge-list text read from `reader`.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let _span = info_span!("read_edge_list").entered();
        let mut tokens = Tokens::new(reader);

        let (_, count) = tokens.next_token()?.ok_or(LoadError::MissingEdgeCount)?;
        let declared: usize = count
            .parse()
            .map_err(|_| LoadError::InvalidEdgeCount(count.clone()))?;

        let mut graph = Graph::new();
        let mut found = 0;
        while let Some((line, start)) = tokens.next_token()? {
            let (_, end) = tokens
                .next_token()?
                .ok_or(LoadError::IncompleteEdge { line })?;
            let (weight_line, weight) = tokens
                .next_token()?
                .ok_or(LoadError::IncompleteEdge { line })?;
            let weight: Weight = weight.parse().map_err(|_| LoadError::InvalidWeight {
                line: weight_line,
                token: weight.clone(),
            })?;
            found += 1;
            if let Err(err) = graph.add_edge(&start, &end, weight) {
                debug!(line, %err, "skipping edge");
            }
        }
        if found != declared {
            debug!(declared, found, "edge count does not match number of edges");
        }
        Ok(graph)
    }

    /// Builds a graph from edge-list text.
    pub fn from_edge_list_str(data: &str) -> Result<Self, LoadError> {
        Self::read_edge_list(data.as_bytes())
    }

    /// Builds a graph from an edge-list file.
    pub fn from_edge_list_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::read_edge_list(BufReader::new(file))
    }
}

/// Splits a reader into whitespace-separated tokens, remembering the
/// (one-based) line each token came from.
struct Tokens<R> {
    reader: R,
    line: usize,
    pending: std::vec::IntoIter<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            pending: Vec::new().into_iter(),
        }
    }

    fn next_token(&mut self) -> Result<Option<(usize, String)>, LoadError> {
        loop {
            if let Some(token) = self.pending.next() {
                return Ok(Some((self.line, token)));
            }
            let mut buf = String::new();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            self.pending = buf
                .split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
                .into_iter();
        }
    }
}
