#![cfg(test)]

use quickcheck::{Arbitrary, Gen};

use crate::{Graph, edge::Weight};

const LABELS: &[&str] = &["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

/// A random list of `(start, end, weight)` edge requests over a small label
/// alphabet.  Some requests are deliberately invalid: self-loops, negative
/// weights and repeated pairs all show up regularly.
#[derive(Debug, Clone)]
pub struct ArbEdgeList(pub Vec<(String, String, Weight)>);

impl Arbitrary for ArbEdgeList {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_labels = 1 + usize::arbitrary(g) % LABELS.len();
        let num_edges = usize::arbitrary(g) % 40;
        let edges = (0..num_edges)
            .map(|_| {
                let start = LABELS[usize::arbitrary(g) % num_labels].to_string();
                let end = LABELS[usize::arbitrary(g) % num_labels].to_string();
                // Roughly one in ten weights is negative.
                let weight = (u8::arbitrary(g) % 22) as Weight - 2;
                (start, end, weight)
            })
            .collect();
        ArbEdgeList(edges)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.0.shrink().map(ArbEdgeList))
    }
}

/// A random graph built from an [`ArbEdgeList`], with the label of one of its
/// vertices (or an unknown label, for empty graphs) to start traversals from.
#[derive(Debug, Clone)]
pub struct ArbGraph {
    pub edges: Vec<(String, String, Weight)>,
    pub start: String,
}

impl ArbGraph {
    pub fn build(&self) -> Graph {
        let mut graph = Graph::new();
        for (start, end, weight) in &self.edges {
            let _ = graph.add_edge(start, end, *weight);
        }
        graph
    }
}

impl Arbitrary for ArbGraph {
    fn arbitrary(g: &mut Gen) -> Self {
        let ArbEdgeList(edges) = ArbEdgeList::arbitrary(g);
        let start = g
            .choose(&edges)
            .map(|(start, _, _)| start.clone())
            .unwrap_or_else(|| "A".to_string());
        ArbGraph { edges, start }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let start = self.start.clone();
        Box::new(self.edges.shrink().map(move |edges| ArbGraph {
            edges,
            start: start.clone(),
        }))
    }
}

/// Checks the structural invariants of a graph.
pub fn check_graph_consistency(graph: &Graph) {
    assert_eq!(graph.labels().count(), graph.num_vertices());
    let mut edge_count = 0;
    for vertex in graph.vertices() {
        for edge in vertex.edges() {
            edge_count += 1;
            assert_ne!(edge.destination(), vertex.label(), "self-loop stored");
            assert!(edge.weight() >= 0, "negative weight stored");
            assert!(
                graph.contains_vertex(edge.destination()),
                "edge to missing vertex {:?}",
                edge.destination()
            );
            assert_eq!(
                graph.edge_weight(vertex.label(), edge.destination()),
                Some(edge.weight())
            );
        }
    }
    assert_eq!(edge_count, graph.num_edges());
    let labels: Vec<_> = graph.labels().collect();
    assert!(labels.windows(2).all(|pair| pair[0] < pair[1]));
}
