use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::debug;

use crate::graph::{Graph, Vertex, Weight};
use crate::union_find::DisjointSet;

#[derive(Clone, Copy, Debug)]
struct Candidate {
    weight: Weight,
    from: Vertex,
    to: Vertex,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.from.cmp(&other.from))
            .then(self.to.cmp(&other.to))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl Graph {
    /// Same slot layout as `self` (dead slots stay dead), no edges.
    fn empty_like(&self) -> Graph {
        let mut forest = Graph::with_vertices(self.vertex_count(), false);
        for v in 0..self.vertex_count() {
            if !self.is_alive(v) {
                forest.remove_vertex(v);
            }
        }
        forest
    }

    /// Minimum spanning forest by Kruskal.
    ///
    /// Edges are sorted by weight with a stable sort, so equal weights keep
    /// the order of `edges()`. Disconnected input yields a forest.
    pub fn kruskal(&self) -> Graph {
        assert!(!self.is_directed(), "kruskal requires an undirected graph");
        let mut edges = self.edges();
        edges.sort_by(|a, b| a.2.total_cmp(&b.2));

        let mut dsu = DisjointSet::new(self.vertex_count());
        let mut forest = self.empty_like();
        let mut accepted = 0_usize;
        for (u, v, w) in edges {
            if dsu.union(u, v) {
                forest.add_edge(u, v, w);
                accepted += 1;
            }
        }
        debug!(accepted, vertices = self.live_vertex_count(), "kruskal done");
        forest
    }

    /// Minimum spanning tree of `start`'s component by Prim.
    ///
    /// The heap is lazy: stale candidates stay queued and are dropped when
    /// popped if their target is already in the tree.
    pub fn prim(&self, start: Vertex) -> Graph {
        assert!(!self.is_directed(), "prim requires an undirected graph");
        self.assert_live(start);

        let mut in_tree = vec![false; self.vertex_count()];
        let mut heap = BinaryHeap::new();
        let mut forest = self.empty_like();
        let mut accepted = 0_usize;

        in_tree[start] = true;
        for edge in self.live_neighbors(start) {
            heap.push(Reverse(Candidate {
                weight: edge.weight,
                from: start,
                to: edge.to,
            }));
        }

        while let Some(Reverse(candidate)) = heap.pop() {
            if in_tree[candidate.to] {
                continue;
            }
            in_tree[candidate.to] = true;
            forest.add_edge(candidate.from, candidate.to, candidate.weight);
            accepted += 1;

            for edge in self.live_neighbors(candidate.to) {
                if !in_tree[edge.to] {
                    heap.push(Reverse(Candidate {
                        weight: edge.weight,
                        from: candidate.to,
                        to: edge.to,
                    }));
                }
            }
        }
        debug!(start, accepted, "prim done");
        forest
    }
}

#[cfg(test)]
mod tests {
    use crate::generator::random_connected_graph;
    use crate::graph::Graph;

    fn sample() -> Graph {
        Graph::from_edges(
            5,
            false,
            &[
                (0, 1, 2.0),
                (1, 2, 1.0),
                (2, 3, 4.0),
                (3, 0, 1.0),
                (0, 4, 1.5),
                (4, 2, 2.5),
            ],
        )
    }

    #[test]
    fn sample_mst_weight() {
        let g = sample();
        let k = g.kruskal();
        let p = g.prim(0);
        assert_eq!(k.edge_count(), 4);
        assert_eq!(p.edge_count(), 4);
        assert!((k.total_weight() - 5.5).abs() < 1e-12);
        assert!((p.total_weight() - 5.5).abs() < 1e-12);
        assert_eq!(k.vertex_count(), 5);
    }

    #[test]
    fn prim_edges_on_sample() {
        let p = sample().prim(0);
        let mut edges = p.edges();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        assert_eq!(edges, vec![(0, 1, 2.0), (0, 3, 1.0), (0, 4, 1.5), (1, 2, 1.0)]);
    }

    #[test]
    fn kruskal_and_prim_agree_on_random_graphs() {
        for seed in 0..25_u64 {
            let g = random_connected_graph(60, 150, 0x4D57_0000 + seed);
            let k = g.kruskal();
            let p = g.prim((seed as usize) % 60);
            assert_eq!(k.edge_count(), 59, "seed={seed}");
            assert_eq!(p.edge_count(), 59, "seed={seed}");
            let diff = (k.total_weight() - p.total_weight()).abs();
            assert!(diff < 1e-6, "seed={seed} diff={diff}");
        }
    }

    #[test]
    fn disconnected_input() {
        let g = Graph::from_edges(5, false, &[(0, 1, 1.0), (1, 2, 3.0), (0, 2, 2.0), (3, 4, 7.0)]);
        let k = g.kruskal();
        assert_eq!(k.edge_count(), 3);
        assert!((k.total_weight() - 10.0).abs() < 1e-12);

        let p = g.prim(0);
        assert_eq!(p.edge_count(), 2);
        assert!((p.total_weight() - 3.0).abs() < 1e-12);
        assert_eq!(p.vertex_count(), 5);
    }

    #[test]
    fn dead_vertices_stay_dead() {
        let mut g = sample();
        g.remove_vertex(3);
        let k = g.kruskal();
        let p = g.prim(0);
        for forest in [&k, &p] {
            assert!(!forest.is_alive(3));
            assert_eq!(forest.live_vertex_count(), 4);
            assert_eq!(forest.edge_count(), 3);
            assert!((forest.total_weight() - 4.5).abs() < 1e-12);
        }
    }

    #[test]
    fn kruskal_ties_follow_edge_order() {
        let g = Graph::from_edges(3, false, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.0)]);
        let mut edges = g.kruskal().edges();
        edges.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        assert_eq!(edges, vec![(0, 1, 1.0), (0, 2, 1.0)]);
    }

    #[test]
    #[should_panic(expected = "undirected")]
    fn directed_input_panics() {
        let g = Graph::from_edges(2, true, &[(0, 1, 1.0)]);
        let _ = g.kruskal();
    }

    #[test]
    #[should_panic(expected = "undirected")]
    fn prim_directed_input_panics() {
        let g = Graph::from_edges(2, true, &[(0, 1, 1.0)]);
        let _ = g.prim(0);
    }

    #[test]
    #[should_panic(expected = "is dead")]
    fn prim_dead_start_panics() {
        let mut g = sample();
        g.remove_vertex(2);
        let _ = g.prim(2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn prim_out_of_range_start_panics() {
        let _ = sample().prim(5);
    }
}
