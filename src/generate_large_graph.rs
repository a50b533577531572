#![cfg(test)]

use crate::{Graph, edge::Weight};

fn label(i: usize) -> String {
    format!("n{i:03}")
}

fn weight(k: usize) -> Weight {
    ((k * 7919) % 23) as Weight
}

/// Fills `graph` with an irregular, deterministic structure of 410
/// vertices:
///
/// - Cluster 1: dense (50 vertices, ~60% of forward pairs connected)
/// - Cluster 2: medium (80 vertices, ~30%)
/// - Cluster 3: sparse (150 vertices, ~8%)
/// - 20 hubs with edges to many earlier vertices
/// - 100 scattered vertices with one to three edges each
/// - 10 bridges into all three clusters
/// - long-range edges, reciprocal pairs, plus self-loops and repeated pairs
///   that the graph refuses
///
/// Edge weights cycle through `0..23`.
pub fn generate_large_graph(graph: &mut Graph) {
    let mut k = 0;
    let mut add = |graph: &mut Graph, from: usize, into: usize| {
        k += 1;
        let _ = graph.add_edge(&label(from), &label(into), weight(k));
    };

    let cluster1 = 0..50;
    for i in cluster1.clone() {
        for j in (i + 1)..cluster1.end {
            if (i * 7 + j * 11) % 10 < 6 {
                add(graph, i, j);
            }
        }
    }

    let cluster2 = 50..130;
    for i in cluster2.clone() {
        for j in (i + 1)..cluster2.end {
            if (i * 13 + j * 17) % 10 < 3 {
                add(graph, i, j);
            }
        }
    }

    let cluster3 = 130..280;
    for i in cluster3.clone() {
        for j in (i + 1)..cluster3.end {
            if (i * 19 + j * 23) % 100 < 8 {
                add(graph, i, j);
            }
        }
    }

    let hubs = 280..300;
    for hub in hubs.clone() {
        for i in 0..hub {
            if (hub * 29 + i * 31) % 7 < 4 {
                add(graph, hub, i);
            }
        }
    }

    let scattered = 300..400;
    for node in scattered.clone() {
        let num_connections = (node % 3) + 1;
        for c in 0..num_connections {
            add(graph, node, (node * 41 + c * 43) % node);
        }
    }

    let bridges = 400..410;
    for (i, bridge) in bridges.clone().enumerate() {
        add(graph, bridge, (i * 47) % cluster1.len() + cluster1.start);
        add(graph, bridge, (i * 53) % cluster2.len() + cluster2.start);
        add(graph, bridge, (i * 59) % cluster3.len() + cluster3.start);
    }

    let total = bridges.end;
    for i in 0..200 {
        add(graph, (i * 61) % total, (i * 67 + 100) % total);
    }
    for i in 0..50 {
        let (a, b) = ((i * 73 + 7) % total, (i * 79 + 11) % total);
        add(graph, a, b);
        add(graph, b, a);
        // Repeated pair.
        add(graph, a, b);
    }
    for i in 0..50 {
        let idx = (i * 71) % total;
        add(graph, idx, idx);
    }
}
