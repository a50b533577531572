use std::collections::VecDeque;

use crate::{
    Graph,
    tracing_support::info_span,
    vertex::Vertex,
};

impl Graph {
    /// Visits every vertex reachable from `start` in depth-first pre-order,
    /// calling `visit` once per vertex.  At each vertex the neighbors are
    /// explored in ascending label order.  Does nothing if there is no vertex
    /// labelled `start`.
    pub fn depth_first_traversal<F>(&mut self, start: &str, mut visit: F)
    where
        F: FnMut(&str),
    {
        if !self.contains_vertex(start) {
            return;
        }
        let _span = info_span!("depth_first_traversal", start).entered();
        self.unvisit_vertices();

        // Each stack entry is a vertex whose neighbor cursor is still being
        // walked; the top is the vertex the recursive formulation would be in.
        let mut stack: Vec<String> = Vec::new();
        self.enter_depth_first(start, &mut visit, &mut stack);
        while let Some(current) = stack.last() {
            match self.vertex_mut(current).and_then(Vertex::next_neighbor) {
                Some(neighbor) => {
                    if !self.is_visited(&neighbor) {
                        self.enter_depth_first(&neighbor, &mut visit, &mut stack);
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
    }

    fn enter_depth_first<F>(&mut self, label: &str, visit: &mut F, stack: &mut Vec<String>)
    where
        F: FnMut(&str),
    {
        if let Some(vertex) = self.vertex_mut(label) {
            vertex.visit();
            visit(label);
            vertex.reset_neighbor();
            stack.push(label.to_string());
        }
    }

    /// Visits every vertex reachable from `start` in breadth-first (level)
    /// order, calling `visit` once per vertex.  Vertices on the same level are
    /// discovered in ascending label order of their parents, and of their own
    /// labels for a common parent.  Does nothing if there is no vertex
    /// labelled `start`.
    pub fn breadth_first_traversal<F>(&mut self, start: &str, mut visit: F)
    where
        F: FnMut(&str),
    {
        if !self.contains_vertex(start) {
            return;
        }
        let _span = info_span!("breadth_first_traversal", start).entered();
        self.unvisit_vertices();

        let mut queue = VecDeque::new();
        if let Some(start_vertex) = self.vertex_mut(start) {
            start_vertex.visit();
            queue.push_back(start.to_string());
        }
        while let Some(label) = queue.pop_front() {
            let Some(vertex) = self.vertex_mut(&label) else {
                continue;
            };
            vertex.reset_neighbor();
            visit(&label);
            while let Some(neighbor) = self.vertex_mut(&label).and_then(Vertex::next_neighbor) {
                if let Some(next) = self.vertex_mut(&neighbor)
                    && !next.is_visited()
                {
                    // Marked on enqueue so no vertex is queued twice.
                    next.visit();
                    queue.push_back(neighbor);
                }
            }
        }
    }

    /// Returns the labels visited by [`Self::depth_first_traversal`].
    pub fn dfs(&mut self, start: &str) -> Vec<String> {
        let mut order = Vec::new();
        self.depth_first_traversal(start, |label| order.push(label.to_string()));
        order
    }

    /// Returns the labels visited by [`Self::breadth_first_traversal`].
    pub fn bfs(&mut self, start: &str) -> Vec<String> {
        let mut order = Vec::new();
        self.breadth_first_traversal(start, |label| order.push(label.to_string()));
        order
    }
}
