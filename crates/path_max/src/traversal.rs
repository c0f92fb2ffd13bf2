use std::collections::VecDeque;

use crate::graph::{Graph, Vertex};

impl Graph {
    /// Depth-first discovery order from `start`, over live vertices only.
    ///
    /// Iterative; a vertex is marked when pushed, so each one appears once.
    pub fn dfs(&self, start: Vertex) -> Vec<Vertex> {
        self.assert_live(start);
        let mut visited = vec![false; self.vertex_count()];
        let mut order = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;
        while let Some(u) = stack.pop() {
            order.push(u);
            for edge in self.live_neighbors(u) {
                if visited[edge.to] {
                    continue;
                }
                visited[edge.to] = true;
                stack.push(edge.to);
            }
        }
        order
    }

    /// Breadth-first discovery order from `start`, over live vertices only.
    pub fn bfs(&self, start: Vertex) -> Vec<Vertex> {
        self.assert_live(start);
        let mut visited = vec![false; self.vertex_count()];
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited[start] = true;
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for edge in self.live_neighbors(u) {
                if visited[edge.to] {
                    continue;
                }
                visited[edge.to] = true;
                queue.push_back(edge.to);
            }
        }
        order
    }
}
