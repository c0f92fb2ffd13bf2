use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::graph::{Graph, Vertex, Weight};

const MAX_WEIGHT: u32 = 1_000_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TreeShape {
    RandomParent,
    Path,
    Star,
    Caterpillar,
    Binary,
}

impl TreeShape {
    pub const ALL: [TreeShape; 5] = [
        Self::RandomParent,
        Self::Path,
        Self::Star,
        Self::Caterpillar,
        Self::Binary,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::RandomParent => "random_parent",
            Self::Path => "path",
            Self::Star => "star",
            Self::Caterpillar => "caterpillar",
            Self::Binary => "binary",
        }
    }
}

fn random_weight<R: Rng + ?Sized>(rng: &mut R) -> Weight {
    rng.random_range(1..=MAX_WEIGHT) as Weight
}

/// Parent of each vertex `1..n` in shape order (vertex 0 is the root).
fn shape_parents<R: Rng + ?Sized>(rng: &mut R, shape: TreeShape, n: usize) -> Vec<usize> {
    let spine = (n / 2).max(1);
    (1..n)
        .map(|i| match shape {
            TreeShape::RandomParent => rng.random_range(0..i),
            TreeShape::Path => i - 1,
            TreeShape::Star => 0,
            TreeShape::Caterpillar if i < spine => i - 1,
            TreeShape::Caterpillar => rng.random_range(0..spine),
            TreeShape::Binary => (i - 1) / 2,
        })
        .collect()
}

fn random_tree_edges<R: Rng + ?Sized>(
    rng: &mut R,
    shape: TreeShape,
    n: usize,
) -> Vec<(Vertex, Vertex, Weight)> {
    let parents = shape_parents(rng, shape, n);
    let mut label = (0..n).collect::<Vec<_>>();
    label.shuffle(rng);

    let mut edges = parents
        .into_iter()
        .enumerate()
        .map(|(i, p)| (label[i + 1], label[p], random_weight(rng)))
        .collect::<Vec<_>>();
    edges.shuffle(rng);
    edges
}

/// Undirected tree on `n` vertices with ids shuffled and integral weights in
/// `[1, 1_000_000]`.
pub fn random_tree(shape: TreeShape, n: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges = random_tree_edges(&mut rng, shape, n);
    Graph::from_edges(n, false, &edges)
}

/// Random tree plus `extra_edges` random non-loop edges; always connected.
pub fn random_connected_graph(n: usize, extra_edges: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = random_tree_edges(&mut rng, TreeShape::RandomParent, n);
    if n >= 2 {
        for _ in 0..extra_edges {
            let u = rng.random_range(0..n);
            let mut v = rng.random_range(0..n - 1);
            if v >= u {
                v += 1;
            }
            edges.push((u, v, random_weight(&mut rng)));
        }
    }
    edges.shuffle(&mut rng);
    Graph::from_edges(n, false, &edges)
}

/// `q` random pairs of live vertices (pairs with equal endpoints included).
pub fn random_queries(graph: &Graph, q: usize, seed: u64) -> Vec<(Vertex, Vertex)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let live = graph.live_vertices().collect::<Vec<_>>();
    if live.is_empty() {
        return Vec::new();
    }
    (0..q)
        .map(|_| {
            (
                live[rng.random_range(0..live.len())],
                live[rng.random_range(0..live.len())],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{TreeShape, random_connected_graph, random_queries, random_tree};

    #[test]
    fn shapes_are_spanning_trees() {
        for (i, shape) in TreeShape::ALL.into_iter().enumerate() {
            for n in [1, 2, 3, 17, 128] {
                let g = random_tree(shape, n, 0x7EE0_0000 + i as u64);
                assert_eq!(g.vertex_count(), n, "shape={}", shape.label());
                assert_eq!(g.edge_count(), n - 1, "shape={}", shape.label());
                assert_eq!(g.bfs(0).len(), n, "shape={}", shape.label());
            }
        }
    }

    #[test]
    fn same_seed_same_tree() {
        let a = random_tree(TreeShape::RandomParent, 64, 42);
        let b = random_tree(TreeShape::RandomParent, 64, 42);
        assert_eq!(a.edges(), b.edges());
    }

    #[test]
    fn connected_graph_has_extra_edges() {
        let g = random_connected_graph(30, 40, 7);
        assert_eq!(g.edge_count(), 29 + 40);
        assert_eq!(g.dfs(0).len(), 30);
        for (u, v, _) in g.edges() {
            assert_ne!(u, v);
        }
    }

    #[test]
    fn queries_use_live_vertices() {
        let mut g = random_tree(TreeShape::Star, 10, 1);
        g.remove_vertex(4);
        let queries = random_queries(&g, 200, 9);
        assert_eq!(queries.len(), 200);
        for (u, v) in queries {
            assert!(g.is_alive(u) && g.is_alive(v));
        }
    }
}
