use std::collections::HashSet;

use crate::graph::{Graph, Vertex, Weight};

impl Graph {
    /// v1: heaviest edge on the path `u -> v` by a plain DFS from `u`.
    ///
    /// Needs no preprocessing. `Some(0.0)` when `u == v`, `None` when `v` is
    /// not reachable.
    pub fn path_max_v1(&self, u: Vertex, v: Vertex) -> Option<Weight> {
        self.assert_live(u);
        self.assert_live(v);
        if u == v {
            return Some(0.0);
        }

        let mut visited = vec![false; self.vertex_count()];
        let mut stack = vec![(u, Weight::NEG_INFINITY)];
        visited[u] = true;
        while let Some((x, best)) = stack.pop() {
            for edge in self.live_neighbors(x) {
                if visited[edge.to] {
                    continue;
                }
                let best = best.max(edge.weight);
                if edge.to == v {
                    return Some(best);
                }
                visited[edge.to] = true;
                stack.push((edge.to, best));
            }
        }
        None
    }

    /// Lowest common ancestor by collecting the ancestors of `u` in a set and
    /// walking up from `v` until one is hit.
    ///
    /// `None` if `u` and `v` are not in the same rooted component.
    pub fn lca(&self, u: Vertex, v: Vertex) -> Option<Vertex> {
        self.assert_live(u);
        self.assert_live(v);
        let tree = self.rooted_tree();

        let mut ancestors = HashSet::new();
        let mut cur = Some(u);
        while let Some(w) = cur {
            ancestors.insert(w);
            cur = tree.parent_of(w);
        }

        let mut cur = Some(v);
        while let Some(w) = cur {
            if ancestors.contains(&w) {
                return Some(w);
            }
            cur = tree.parent_of(w);
        }
        None
    }

    /// Heaviest edge between `u` and its ancestor `a`, in `O(log n)`.
    ///
    /// `Some(0.0)` for `u == a`. `None` when `a` is not an ancestor of `u`.
    pub fn max_on_path_to_ancestor(&self, u: Vertex, a: Vertex) -> Option<Weight> {
        self.assert_live(u);
        self.assert_live(a);
        let tree = self.rooted_tree();
        if u == a {
            return Some(0.0);
        }

        let du = tree.depth_of(u)?;
        let da = tree.depth_of(a)?;
        if du <= da {
            return None;
        }
        match tree.lifting.climb(u, du - da) {
            Some((top, best)) if top == a => Some(best),
            _ => None,
        }
    }

    /// v2: LCA, then two lifting climbs.
    ///
    /// Requires `compute_center_and_parent`. `Some(0.0)` when `u == v`,
    /// `None` when the vertices are in different components.
    pub fn path_max_v2(&self, u: Vertex, v: Vertex) -> Option<Weight> {
        let l = self.lca(u, v)?;
        if u == v {
            return Some(0.0);
        }
        self.combine_at(u, v, l)
    }

    /// Heaviest edge on `u -> l -> v` where `l` is their LCA. Endpoints equal
    /// to `l` contribute nothing.
    pub(crate) fn combine_at(&self, u: Vertex, v: Vertex, l: Vertex) -> Option<Weight> {
        let mut best = Weight::NEG_INFINITY;
        for x in [u, v] {
            if x != l {
                best = best.max(self.max_on_path_to_ancestor(x, l)?);
            }
        }
        Some(best)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Graph, Vertex};

    // Rooted at 0 after centering:
    //        0
    //      /   \
    //     1     2
    //    / \     \
    //   3   4     5
    fn sample_tree() -> Graph {
        Graph::from_edges(
            6,
            false,
            &[(0, 1, 3.0), (0, 2, 8.0), (1, 3, 5.0), (1, 4, 1.0), (2, 5, 2.0)],
        )
    }

    fn walk_parents(g: &Graph, u: Vertex, a: Vertex) -> Option<f64> {
        let mut cur = u;
        let mut best = f64::NEG_INFINITY;
        while cur != a {
            best = best.max(g.parent_edge_weight(cur)?);
            cur = g.parent(cur)?;
        }
        Some(best)
    }

    #[test]
    fn v1_on_sample() {
        let g = sample_tree();
        assert_eq!(g.path_max_v1(3, 4), Some(5.0));
        assert_eq!(g.path_max_v1(4, 5), Some(8.0));
        assert_eq!(g.path_max_v1(4, 1), Some(1.0));
        assert_eq!(g.path_max_v1(2, 2), Some(0.0));
    }

    #[test]
    fn v1_disconnected() {
        let g = Graph::from_edges(4, false, &[(0, 1, 1.0), (2, 3, 1.0)]);
        assert_eq!(g.path_max_v1(0, 3), None);
    }

    #[test]
    fn lca_on_sample() {
        let mut g = sample_tree();
        assert_eq!(g.compute_center_and_parent(), Some(0));
        assert_eq!(g.lca(3, 4), Some(1));
        assert_eq!(g.lca(3, 5), Some(0));
        assert_eq!(g.lca(4, 1), Some(1));
        assert_eq!(g.lca(5, 5), Some(5));
    }

    #[test]
    fn ancestor_climb_matches_parent_walk() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        for u in 0..6 {
            for a in 0..6 {
                let expected = if u == a { Some(0.0) } else { walk_parents(&g, u, a) };
                assert_eq!(g.max_on_path_to_ancestor(u, a), expected, "u={u} a={a}");
            }
        }
        assert_eq!(g.max_on_path_to_ancestor(3, 0), Some(5.0));
        assert_eq!(g.max_on_path_to_ancestor(3, 2), None);
        assert_eq!(g.max_on_path_to_ancestor(0, 3), None);
    }

    #[test]
    fn v2_matches_v1_on_sample() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        for u in 0..6 {
            for v in 0..6 {
                assert_eq!(g.path_max_v2(u, v), g.path_max_v1(u, v), "u={u} v={v}");
            }
        }
    }

    #[test]
    fn negative_weights_agree() {
        let mut g = Graph::from_edges(3, false, &[(0, 1, -4.0), (1, 2, -2.0)]);
        g.compute_center_and_parent();
        assert_eq!(g.center(), 1);
        assert_eq!(g.path_max_v1(0, 1), Some(-4.0));
        assert_eq!(g.path_max_v2(0, 1), Some(-4.0));
        assert_eq!(g.path_max_v2(1, 0), Some(-4.0));
        assert_eq!(g.path_max_v2(0, 2), Some(-2.0));
    }

    #[test]
    fn v2_disconnected_is_none() {
        let mut g = Graph::from_edges(4, false, &[(0, 1, 1.0), (2, 3, 1.0)]);
        g.compute_center_and_parent();
        assert_eq!(g.lca(0, 3), None);
        assert_eq!(g.path_max_v2(0, 3), None);
    }

    #[test]
    #[should_panic(expected = "compute_center_and_parent")]
    fn v2_requires_rooting() {
        let g = sample_tree();
        let _ = g.path_max_v2(3, 4);
    }

    #[test]
    #[should_panic(expected = "is dead")]
    fn v1_dead_operand_panics() {
        let mut g = sample_tree();
        g.remove_vertex(5);
        let _ = g.path_max_v1(0, 5);
    }
}
