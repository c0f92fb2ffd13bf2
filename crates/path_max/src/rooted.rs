use std::collections::VecDeque;

use tracing::debug;

use crate::graph::{Graph, Vertex, Weight};
use crate::lifting::{BinaryLifting, NONE};

const UNREACHED: usize = usize::MAX;

/// Tree rooted at the center of its diameter, plus its lifting tables.
///
/// Only valid for the graph state it was computed from; the graph drops it
/// on every mutation.
#[derive(Clone, Debug)]
pub(crate) struct RootedTree {
    pub(crate) center: Vertex,
    pub(crate) diameter_length: usize,
    pub(crate) parent: Vec<Vertex>,
    pub(crate) parent_weight: Vec<Weight>,
    pub(crate) depth: Vec<usize>,
    pub(crate) lifting: BinaryLifting,
}

impl RootedTree {
    #[inline]
    pub(crate) fn depth_of(&self, v: Vertex) -> Option<usize> {
        let d = self.depth[v];
        (d != UNREACHED).then_some(d)
    }

    #[inline]
    pub(crate) fn parent_of(&self, v: Vertex) -> Option<Vertex> {
        let p = self.parent[v];
        (p != NONE).then_some(p)
    }
}

/// BFS from `start`; returns the farthest vertex (smallest id on ties) and
/// the vertex sequence of the path `start -> farthest`.
fn farthest_with_path(graph: &Graph, start: Vertex) -> (Vertex, Vec<Vertex>) {
    let n = graph.vertex_count();
    let mut dist = vec![UNREACHED; n];
    let mut via = vec![NONE; n];
    let mut queue = VecDeque::new();
    dist[start] = 0;
    queue.push_back(start);
    while let Some(u) = queue.pop_front() {
        for edge in graph.live_neighbors(u) {
            if dist[edge.to] != UNREACHED {
                continue;
            }
            dist[edge.to] = dist[u] + 1;
            via[edge.to] = u;
            queue.push_back(edge.to);
        }
    }

    let mut farthest = start;
    for (v, &d) in dist.iter().enumerate() {
        if d != UNREACHED && d > dist[farthest] {
            farthest = v;
        }
    }

    let mut path = Vec::with_capacity(dist[farthest] + 1);
    let mut cur = farthest;
    while cur != NONE {
        path.push(cur);
        cur = via[cur];
    }
    path.reverse();
    (farthest, path)
}

impl Graph {
    /// Roots the tree at the middle of a diameter and builds the lifting
    /// tables.
    ///
    /// The diameter is found by a double BFS. For an odd length `L` the
    /// second of the two middle vertices (index `(L + 1) / 2` from the first
    /// BFS's farthest vertex) is chosen. Returns the center, or `None` when
    /// the graph has no live vertex.
    ///
    /// The graph is expected to be a tree; on other inputs the call still
    /// completes but the resulting tables describe a BFS/DFS forest only.
    pub fn compute_center_and_parent(&mut self) -> Option<Vertex> {
        assert!(
            !self.is_directed(),
            "compute_center_and_parent requires an undirected graph"
        );
        self.rooted = None;
        self.batch = None;

        let start = self.live_vertices().next()?;
        let (u, _) = farthest_with_path(self, start);
        let (_, diameter) = farthest_with_path(self, u);
        let length = diameter.len() - 1;
        let middle = if length % 2 == 0 {
            length / 2
        } else {
            (length + 1) / 2
        };
        let center = diameter[middle];

        let n = self.vertex_count();
        let mut parent = vec![NONE; n];
        let mut parent_weight = vec![0.0; n];
        let mut depth = vec![UNREACHED; n];
        let mut stack = vec![center];
        depth[center] = 0;
        while let Some(v) = stack.pop() {
            for edge in self.live_neighbors(v) {
                if depth[edge.to] != UNREACHED {
                    continue;
                }
                parent[edge.to] = v;
                parent_weight[edge.to] = edge.weight;
                depth[edge.to] = depth[v] + 1;
                stack.push(edge.to);
            }
        }

        let lifting = BinaryLifting::build(&parent, &parent_weight);
        debug!(
            center,
            diameter_length = length,
            levels = lifting.levels(),
            "rooted tree at center"
        );
        self.rooted = Some(RootedTree {
            center,
            diameter_length: length,
            parent,
            parent_weight,
            depth,
            lifting,
        });
        Some(center)
    }

    #[inline]
    pub fn has_center(&self) -> bool {
        self.rooted.is_some()
    }

    #[inline]
    pub(crate) fn rooted_tree(&self) -> &RootedTree {
        let Some(tree) = self.rooted.as_ref() else {
            panic!("compute_center_and_parent must run after the last mutation");
        };
        tree
    }

    pub fn center(&self) -> Vertex {
        self.rooted_tree().center
    }

    /// Number of edges on the diameter path.
    pub fn diameter_length(&self) -> usize {
        self.rooted_tree().diameter_length
    }

    /// Parent in the tree rooted at the center; `None` for the root and for
    /// vertices outside the root's component.
    pub fn parent(&self, v: Vertex) -> Option<Vertex> {
        assert!(v < self.vertex_count(), "vertex {v} out of range");
        self.rooted_tree().parent_of(v)
    }

    pub fn parent_edge_weight(&self, v: Vertex) -> Option<Weight> {
        assert!(v < self.vertex_count(), "vertex {v} out of range");
        let tree = self.rooted_tree();
        tree.parent_of(v).map(|_| tree.parent_weight[v])
    }

    /// Distance in edges from the center; `None` outside its component.
    pub fn depth(&self, v: Vertex) -> Option<usize> {
        assert!(v < self.vertex_count(), "vertex {v} out of range");
        self.rooted_tree().depth_of(v)
    }

    /// `2^k`-th ancestor of `v`, `None` past the root.
    pub fn ancestor_jump(&self, v: Vertex, k: usize) -> Option<Vertex> {
        assert!(v < self.vertex_count(), "vertex {v} out of range");
        let tree = self.rooted_tree();
        assert!(k < tree.lifting.levels(), "level {k} out of range");
        tree.lifting.ancestor(v, k)
    }

    /// Number of levels in the lifting tables, `ceil(log2(n)) + 1`.
    pub fn lifting_levels(&self) -> usize {
        self.rooted_tree().lifting.levels()
    }
}
