use std::{
    cmp::Reverse,
    collections::{BTreeMap, BinaryHeap},
    fmt,
    ops::Add,
};

use pathfinding::{num_traits::Zero, prelude::dijkstra_all};

use crate::{
    Graph,
    edge::{Edge, Weight},
    tracing_support::{debug, info_span},
};

/// How [`Graph::shortest_paths_with`] computes costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShortestPathStrategy {
    /// Dijkstra's algorithm with a single frontier ordered by tentative cost.
    /// Every reported cost is optimal.
    #[default]
    Dijkstra,
    /// Depth-first relaxation that expands each vertex once, taking its edges
    /// lightest first and descending into every edge's target whether or not
    /// the edge improved it.  A cheaper route to a vertex that is found after
    /// the vertex has been expanded is recorded for that vertex but never
    /// propagated to its successors, so costs further along can be too high.
    GreedyRelaxation,
}

/// Costs and predecessors of the vertices reachable from a source vertex.
///
/// Neither map contains the source itself, nor any vertex that cannot be
/// reached from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortestPaths {
    source: String,
    weight: BTreeMap<String, Weight>,
    previous: BTreeMap<String, String>,
}

impl ShortestPaths {
    fn empty(source: &str) -> Self {
        Self {
            source: source.to_string(),
            ..Self::default()
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if no vertex other than the source was reached.
    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }

    /// Gets the cost of the best known route from the source to `label`.
    pub fn cost(&self, label: &str) -> Option<Weight> {
        self.weight.get(label).copied()
    }

    /// Gets the vertex preceding `label` on its best known route.
    pub fn previous(&self, label: &str) -> Option<&str> {
        self.previous.get(label).map(String::as_str)
    }

    /// Costs of every reached vertex, keyed by label.
    pub fn weights(&self) -> &BTreeMap<String, Weight> {
        &self.weight
    }

    /// Predecessors of every reached vertex, keyed by label.
    pub fn previous_map(&self) -> &BTreeMap<String, String> {
        &self.previous
    }

    /// Reconstructs the route from the source to `label` by following
    /// predecessors, returning the labels from the source to `label`
    /// inclusive.  Returns `None` if `label` was not reached.
    pub fn path_to(&self, label: &str) -> Option<Vec<String>> {
        if label == self.source {
            return Some(vec![self.source.clone()]);
        }
        if !self.weight.contains_key(label) {
            return None;
        }
        let mut path = vec![label.to_string()];
        let mut current = label;
        // A well-formed chain visits each reached vertex at most once.
        for _ in 0..=self.previous.len() {
            let previous = self.previous.get(current)?;
            path.push(previous.clone());
            if *previous == self.source {
                path.reverse();
                return Some(path);
            }
            current = previous.as_str();
        }
        None
    }

    /// Splits the result into its cost and predecessor maps.
    pub fn into_parts(self) -> (BTreeMap<String, Weight>, BTreeMap<String, String>) {
        (self.weight, self.previous)
    }
}

/// Lists every reached vertex in label order as `label(cost)`, followed by
/// `via [..]` with the intermediate vertices when the route is not a single
/// edge, e.g. `B(1) C(4) via [B]`.
impl fmt::Display for ShortestPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (label, cost)) in self.weight.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{label}({cost})")?;
            if let Some(path) = self.path_to(label)
                && path.len() > 2
            {
                write!(f, " via [{}]", path[1..path.len() - 1].join(" "))?;
            }
        }
        Ok(())
    }
}

impl Graph {
    /// Finds the cheapest routes from `start` to every vertex reachable from
    /// it using [`ShortestPathStrategy::Dijkstra`].
    pub fn shortest_paths(&mut self, start: &str) -> ShortestPaths {
        self.shortest_paths_with(start, ShortestPathStrategy::default())
    }

    /// Finds routes from `start` to every vertex reachable from it using the
    /// given strategy.  Afterwards exactly the vertices that were reached,
    /// including `start`, are marked visited.  If there is no vertex labelled
    /// `start` the result is empty and the graph is untouched.
    pub fn shortest_paths_with(
        &mut self,
        start: &str,
        strategy: ShortestPathStrategy,
    ) -> ShortestPaths {
        if !self.contains_vertex(start) {
            return ShortestPaths::empty(start);
        }
        let _span = info_span!("shortest_paths", start, ?strategy).entered();
        let paths = match strategy {
            ShortestPathStrategy::Dijkstra => self.dijkstra(start),
            ShortestPathStrategy::GreedyRelaxation => self.greedy_relaxation(start),
        };
        debug!(reached = paths.weight.len(), "shortest paths computed");
        paths
    }

    /// Clears `weight` and `previous` and fills them with the costs and
    /// predecessors of every vertex reachable from `start`, as computed by
    /// [`Self::shortest_paths`].
    pub fn cost_to_all_vertices(
        &mut self,
        start: &str,
        weight: &mut BTreeMap<String, Weight>,
        previous: &mut BTreeMap<String, String>,
    ) {
        let (costs, predecessors) = self.shortest_paths(start).into_parts();
        *weight = costs;
        *previous = predecessors;
    }

    fn dijkstra(&mut self, start: &str) -> ShortestPaths {
        let parents = dijkstra_all(&start.to_string(), |label: &String| {
            self.vertex(label)
                .into_iter()
                .flat_map(|vertex| vertex.edges())
                .map(|edge| (edge.destination().to_string(), Cost(edge.weight())))
                .collect::<Vec<_>>()
        });

        self.unvisit_vertices();
        for label in std::iter::once(start).chain(parents.keys().map(String::as_str)) {
            if let Some(vertex) = self.vertex_mut(label) {
                vertex.visit();
            }
        }

        let mut paths = ShortestPaths::empty(start);
        for (label, (parent, Cost(cost))) in parents {
            paths.weight.insert(label.clone(), cost);
            paths.previous.insert(label, parent);
        }
        paths
    }

    fn greedy_relaxation(&mut self, start: &str) -> ShortestPaths {
        // Best cost and route found so far for every discovered vertex.
        let mut table: BTreeMap<String, (Weight, Vec<String>)> =
            BTreeMap::from([(start.to_string(), (0, vec![start.to_string()]))]);
        self.unvisit_vertices();

        // One frame per vertex being expanded, holding the edges it has not
        // relaxed yet, lightest on top.
        let mut stack: Vec<(String, BinaryHeap<Reverse<Edge>>)> = Vec::new();
        self.enter_relaxation(start, &mut stack);
        while let Some((label, edges)) = stack.last_mut() {
            let Some(Reverse(edge)) = edges.pop() else {
                stack.pop();
                continue;
            };
            let label = label.clone();
            relax(&mut table, &label, &edge);
            self.enter_relaxation(edge.destination(), &mut stack);
        }

        let mut paths = ShortestPaths::empty(start);
        for (label, (cost, route)) in table {
            if label == start {
                continue;
            }
            if let Some(previous) = route.iter().rev().nth(1) {
                paths.previous.insert(label.clone(), previous.clone());
            }
            paths.weight.insert(label, cost);
        }
        paths
    }

    fn enter_relaxation(&mut self, label: &str, stack: &mut Vec<(String, BinaryHeap<Reverse<Edge>>)>) {
        let Some(vertex) = self.vertex_mut(label) else {
            return;
        };
        if vertex.is_visited() {
            return;
        }
        vertex.visit();
        let edges = vertex.edges().cloned().map(Reverse).collect();
        stack.push((label.to_string(), edges));
    }
}

/// Route cost that saturates at `Weight::MAX` instead of overflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Cost(Weight);

impl Add for Cost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Cost(self.0.saturating_add(other.0))
    }
}

impl Zero for Cost {
    fn zero() -> Self {
        Cost(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

/// Records the route through `from` for the edge's target if the target is
/// undiscovered or the route is cheaper than the best one so far.
fn relax(table: &mut BTreeMap<String, (Weight, Vec<String>)>, from: &str, edge: &Edge) {
    let Some((cost, route)) = table.get(from) else {
        return;
    };
    let candidate = cost.saturating_add(edge.weight());
    let improves = table
        .get(edge.destination())
        .is_none_or(|(best, _)| candidate < *best);
    if improves {
        let mut route = route.clone();
        route.push(edge.destination().to_string());
        table.insert(edge.destination().to_string(), (candidate, route));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::graph_test_support::ArbGraph;

    const STRATEGIES: [ShortestPathStrategy; 2] = [
        ShortestPathStrategy::Dijkstra,
        ShortestPathStrategy::GreedyRelaxation,
    ];

    fn graph_from(edges: &[(&str, &str, Weight)]) -> Graph {
        let mut graph = Graph::new();
        for &(start, end, weight) in edges {
            graph.add_edge(start, end, weight).unwrap();
        }
        graph
    }

    fn triangle() -> Graph {
        graph_from(&[("A", "B", 1), ("B", "C", 3), ("A", "C", 10)])
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_triangle_prefers_two_hops() {
        for strategy in STRATEGIES {
            let paths = triangle().shortest_paths_with("A", strategy);
            assert_eq!(
                paths.weights(),
                &BTreeMap::from([("B".to_string(), 1), ("C".to_string(), 4)])
            );
            assert_eq!(
                paths.previous_map(),
                &BTreeMap::from([
                    ("B".to_string(), "A".to_string()),
                    ("C".to_string(), "B".to_string())
                ])
            );
            assert_eq!(paths.to_string(), "B(1) C(4) via [B]");
        }
    }

    #[test]
    fn test_path_to() {
        let paths = triangle().shortest_paths("A");
        assert_eq!(paths.source(), "A");
        assert_eq!(paths.path_to("A"), Some(labels(&["A"])));
        assert_eq!(paths.path_to("B"), Some(labels(&["A", "B"])));
        assert_eq!(paths.path_to("C"), Some(labels(&["A", "B", "C"])));
        assert_eq!(paths.path_to("Z"), None);
    }

    #[test]
    fn test_source_omitted_even_on_cycle() {
        for strategy in STRATEGIES {
            let mut graph = graph_from(&[("A", "B", 0), ("B", "A", 0)]);
            let paths = graph.shortest_paths_with("A", strategy);
            assert_eq!(paths.cost("A"), None);
            assert_eq!(paths.previous("A"), None);
            assert_eq!(paths.cost("B"), Some(0));
        }
    }

    #[test]
    fn test_unreachable_vertex_omitted() {
        for strategy in STRATEGIES {
            let mut graph = graph_from(&[("A", "B", 2), ("C", "A", 1), ("C", "D", 1)]);
            let paths = graph.shortest_paths_with("A", strategy);
            assert_eq!(paths.weights().keys().collect::<Vec<_>>(), vec!["B"]);
            assert_eq!(paths.previous_map().keys().collect::<Vec<_>>(), vec!["B"]);
            assert_eq!(paths.cost("C"), None);
            assert_eq!(paths.cost("D"), None);
        }
    }

    #[test]
    fn test_unknown_source() {
        for strategy in STRATEGIES {
            let mut graph = triangle();
            graph.dfs("A");
            let paths = graph.shortest_paths_with("Z", strategy);
            assert!(paths.is_empty());
            assert_eq!(paths.to_string(), "");
            assert!(graph.vertices().all(|v| v.is_visited()));
        }
    }

    #[test]
    fn test_sink_vertex_has_no_routes() {
        let paths = triangle().shortest_paths("C");
        assert!(paths.is_empty());
    }

    #[test]
    fn test_visited_flags_mark_reached() {
        for strategy in STRATEGIES {
            let mut graph = graph_from(&[("A", "B", 2), ("C", "A", 1)]);
            graph.shortest_paths_with("A", strategy);
            let visited: Vec<_> = graph
                .vertices()
                .filter(|v| v.is_visited())
                .map(|v| v.label())
                .collect();
            assert_eq!(visited, vec!["A", "B"]);
        }
    }

    // A cheaper route to C (via the direct edge) is found only after C has
    // already been expanded through B.
    fn late_improvement() -> Graph {
        graph_from(&[("A", "B", 1), ("A", "C", 2), ("B", "C", 5), ("C", "D", 1)])
    }

    #[test]
    fn test_greedy_relaxation_keeps_stale_successor_costs() {
        let paths = late_improvement().shortest_paths_with("A", ShortestPathStrategy::GreedyRelaxation);
        assert_eq!(paths.cost("C"), Some(2));
        assert_eq!(paths.previous("C"), Some("A"));
        assert_eq!(paths.cost("D"), Some(7));
        assert_eq!(paths.previous("D"), Some("C"));
    }

    #[test]
    fn test_dijkstra_finds_late_improvement() {
        let paths = late_improvement().shortest_paths("A");
        assert_eq!(paths.cost("C"), Some(2));
        assert_eq!(paths.cost("D"), Some(3));
        assert_eq!(paths.path_to("D"), Some(labels(&["A", "C", "D"])));
        assert_eq!(paths.to_string(), "B(1) C(2) D(3) via [C]");
    }

    #[test]
    fn test_costs_saturate_at_max_weight() {
        let mut graph = graph_from(&[("A", "B", Weight::MAX), ("B", "C", 1), ("A", "D", 3)]);
        for strategy in STRATEGIES {
            let paths = graph.shortest_paths_with("A", strategy);
            assert_eq!(paths.cost("B"), Some(Weight::MAX));
            assert_eq!(paths.cost("C"), Some(Weight::MAX));
            assert_eq!(paths.previous("C"), Some("B"));
            assert_eq!(paths.cost("D"), Some(3));
        }
    }

    #[test]
    fn test_cost_to_all_vertices_replaces_sink_contents() {
        let mut graph = triangle();
        let mut weight = BTreeMap::from([("stale".to_string(), 99)]);
        let mut previous = BTreeMap::from([("stale".to_string(), "X".to_string())]);
        graph.cost_to_all_vertices("A", &mut weight, &mut previous);
        assert_eq!(weight, BTreeMap::from([("B".to_string(), 1), ("C".to_string(), 4)]));
        assert_eq!(previous.get("C").map(String::as_str), Some("B"));
        assert!(!previous.contains_key("stale"));

        graph.cost_to_all_vertices("Z", &mut weight, &mut previous);
        assert!(weight.is_empty());
        assert!(previous.is_empty());
    }

    /// Costs by repeated relaxation of every edge until nothing changes.
    fn reference_costs(graph: &Graph, start: &str) -> BTreeMap<String, Weight> {
        let mut costs = BTreeMap::from([(start.to_string(), 0)]);
        let mut changed = true;
        while changed {
            changed = false;
            for vertex in graph.vertices() {
                let Some(&cost) = costs.get(vertex.label()) else {
                    continue;
                };
                for edge in vertex.edges() {
                    let candidate = cost + edge.weight();
                    if costs
                        .get(edge.destination())
                        .is_none_or(|&best| candidate < best)
                    {
                        costs.insert(edge.destination().to_string(), candidate);
                        changed = true;
                    }
                }
            }
        }
        costs.remove(start);
        costs
    }

    fn route_cost(graph: &Graph, route: &[String]) -> Option<Weight> {
        route
            .windows(2)
            .map(|pair| graph.edge_weight(&pair[0], &pair[1]))
            .sum()
    }

    #[quickcheck]
    fn prop_dijkstra_costs_are_optimal(arb: ArbGraph) -> bool {
        let mut graph = arb.build();
        let paths = graph.shortest_paths(&arb.start);
        if !graph.contains_vertex(&arb.start) {
            return paths.is_empty();
        }
        paths.weights() == &reference_costs(&graph, &arb.start)
    }

    #[quickcheck]
    fn prop_dijkstra_costs_match_previous_chain(arb: ArbGraph) -> bool {
        let mut graph = arb.build();
        let paths = graph.shortest_paths(&arb.start);
        paths.weights().iter().all(|(label, &cost)| {
            paths
                .path_to(label)
                .is_some_and(|route| route_cost(&graph, &route) == Some(cost))
        })
    }

    #[quickcheck]
    fn prop_strategies_reach_same_vertices(arb: ArbGraph) -> bool {
        let mut graph = arb.build();
        let dijkstra = graph.shortest_paths_with(&arb.start, ShortestPathStrategy::Dijkstra);
        let greedy = graph.shortest_paths_with(&arb.start, ShortestPathStrategy::GreedyRelaxation);
        let reachable: BTreeSet<_> = graph
            .dfs(&arb.start)
            .into_iter()
            .filter(|label| *label != arb.start)
            .collect();
        dijkstra.weights().keys().cloned().collect::<BTreeSet<_>>() == reachable
            && greedy.weights().keys().cloned().collect::<BTreeSet<_>>() == reachable
            && greedy.previous_map().keys().cloned().collect::<BTreeSet<_>>() == reachable
    }

    #[quickcheck]
    fn prop_greedy_never_beats_dijkstra(arb: ArbGraph) -> bool {
        let mut graph = arb.build();
        let dijkstra = graph.shortest_paths_with(&arb.start, ShortestPathStrategy::Dijkstra);
        let greedy = graph.shortest_paths_with(&arb.start, ShortestPathStrategy::GreedyRelaxation);
        greedy
            .weights()
            .iter()
            .all(|(label, &cost)| dijkstra.cost(label).is_some_and(|best| best <= cost))
    }

    #[quickcheck]
    fn prop_greedy_previous_is_an_edge(arb: ArbGraph) -> bool {
        let mut graph = arb.build();
        let greedy = graph.shortest_paths_with(&arb.start, ShortestPathStrategy::GreedyRelaxation);
        greedy
            .previous_map()
            .iter()
            .all(|(label, previous)| graph.edge_weight(previous, label).is_some())
    }
}
