use std::cmp::Ordering;

/// Edge weights.  Negative values are representable so that callers can pass
/// them through, but the graph never stores one.
pub type Weight = i64;

/// An outgoing edge of a vertex: the label of the vertex it leads to and the
/// cost of travelling along it.
///
/// Edges are ordered by weight so they can be fed to a priority queue; equal
/// weights fall back to the destination label to keep the order total.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    destination: String,
    weight: Weight,
}

impl Edge {
    pub fn new(destination: impl Into<String>, weight: Weight) -> Self {
        Self {
            destination: destination.into(),
            weight,
        }
    }

    /// Returns the label of the vertex this edge leads to.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Returns the cost of travelling along this edge.
    pub fn weight(&self) -> Weight {
        self.weight
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.destination.cmp(&other.destination))
    }
}

#[cfg(test)]
mod tests {
    use std::{cmp::Reverse, collections::BinaryHeap};

    use super::*;

    #[test]
    fn test_accessors() {
        let edge = Edge::new("B", 7);
        assert_eq!(edge.destination(), "B");
        assert_eq!(edge.weight(), 7);
    }

    #[test]
    fn test_ordered_by_weight() {
        assert!(Edge::new("Z", 1) < Edge::new("A", 2));
        assert!(Edge::new("A", 3) > Edge::new("Z", 2));
    }

    #[test]
    fn test_equal_weights_order_by_destination() {
        assert!(Edge::new("A", 4) < Edge::new("B", 4));
        assert_eq!(Edge::new("A", 4).cmp(&Edge::new("A", 4)), Ordering::Equal);
    }

    #[test]
    fn test_min_heap_pops_lightest_first() {
        let mut heap: BinaryHeap<_> = [Edge::new("C", 10), Edge::new("B", 1), Edge::new("D", 3)]
            .into_iter()
            .map(Reverse)
            .collect();
        let order: Vec<_> = std::iter::from_fn(|| heap.pop())
            .map(|Reverse(edge)| edge.destination().to_string())
            .collect();
        assert_eq!(order, vec!["B", "D", "C"]);
    }
}
