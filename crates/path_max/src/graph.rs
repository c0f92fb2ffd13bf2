use crate::offline::BatchTable;
use crate::rooted::RootedTree;

pub type Vertex = usize;
pub type Weight = f64;

pub const DEFAULT_WEIGHT: Weight = 1.0;

/// Absolute tolerance used when matching a weight passed to `delete_edge`.
pub const WEIGHT_EPS: Weight = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub to: Vertex,
    pub weight: Weight,
}

/// Adjacency-list graph with tombstoned vertices.
///
/// - Vertex ids are stable slots in `[0, vertex_count())`. Removing a vertex
///   clears its own list and marks it dead; entries pointing at it from other
///   lists are left in place and filtered by liveness at read time.
/// - Dead ids go to a free list and are handed out again (LIFO) by
///   `add_vertex`.
/// - The rooted-tree data (center, parents, lifting tables) and the v3 batch
///   table are caches owned by the graph. Every mutation drops them.
///
/// A `Graph` has no internal synchronization; sharing one across threads
/// while mutating it requires external locking.
#[derive(Clone, Debug)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
    alive: Vec<bool>,
    free: Vec<Vertex>,
    directed: bool,
    pub(crate) rooted: Option<RootedTree>,
    pub(crate) batch: Option<BatchTable>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self {
            adjacency: Vec::new(),
            alive: Vec::new(),
            free: Vec::new(),
            directed,
            rooted: None,
            batch: None,
        }
    }

    pub fn with_vertices(vertex_count: usize, directed: bool) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
            alive: vec![true; vertex_count],
            free: Vec::new(),
            directed,
            rooted: None,
            batch: None,
        }
    }

    pub fn from_edges(vertex_count: usize, directed: bool, edges: &[(Vertex, Vertex, Weight)]) -> Self {
        let mut graph = Self::with_vertices(vertex_count, directed);
        for &(u, v, w) in edges {
            graph.add_edge(u, v, w);
        }
        graph
    }

    #[inline]
    fn invalidate(&mut self) {
        self.rooted = None;
        self.batch = None;
    }

    #[inline]
    pub(crate) fn assert_live(&self, v: Vertex) {
        assert!(v < self.adjacency.len(), "vertex {v} out of range");
        assert!(self.alive[v], "vertex {v} is dead");
    }

    /// Returns a live id with an empty adjacency list.
    ///
    /// A reused id is not scrubbed from other lists: arcs that pointed at the
    /// removed vertex become visible again once the id is live.
    pub fn add_vertex(&mut self) -> Vertex {
        self.invalidate();
        if let Some(v) = self.free.pop() {
            debug_assert!(!self.alive[v]);
            debug_assert!(self.adjacency[v].is_empty());
            self.alive[v] = true;
            return v;
        }
        self.adjacency.push(Vec::new());
        self.alive.push(true);
        self.adjacency.len() - 1
    }

    pub fn remove_vertex(&mut self, v: Vertex) {
        self.assert_live(v);
        self.adjacency[v].clear();
        self.alive[v] = false;
        self.free.push(v);
        self.invalidate();
    }

    pub fn add_edge(&mut self, u: Vertex, v: Vertex, weight: Weight) {
        self.assert_live(u);
        self.assert_live(v);
        self.adjacency[u].push(Edge { to: v, weight });
        if !self.directed {
            self.adjacency[v].push(Edge { to: u, weight });
        }
        self.invalidate();
    }

    pub fn add_unit_edge(&mut self, u: Vertex, v: Vertex) {
        self.add_edge(u, v, DEFAULT_WEIGHT);
    }

    /// Removes arcs `u -> v` (and their mirrors when undirected).
    ///
    /// With `Some(w)` only the first arc whose weight is within `WEIGHT_EPS`
    /// of `w` goes; with `None` every arc `u -> v` goes. Panics if nothing
    /// matched.
    ///
    /// The mirror side may hold fewer arcs than `u`'s side: arcs that survived
    /// a `remove_vertex` and came back through id reuse have no mirror.
    pub fn delete_edge(&mut self, u: Vertex, v: Vertex, weight: Option<Weight>) {
        self.assert_live(u);
        self.assert_live(v);

        let removed = remove_arcs(&mut self.adjacency[u], v, weight);
        assert!(removed > 0, "no edge {u} -> {v} matches");

        // A self-loop keeps both copies in the same list; `None` already
        // removed them above.
        if !self.directed && (u != v || weight.is_some()) {
            remove_arcs(&mut self.adjacency[v], u, weight);
        }
        self.invalidate();
    }

    /// Raw adjacency of `u`. May name dead vertices.
    #[inline]
    pub fn neighbors(&self, u: Vertex) -> &[Edge] {
        assert!(u < self.adjacency.len(), "vertex {u} out of range");
        &self.adjacency[u]
    }

    /// Live neighbors of `u`, dangling entries skipped.
    pub fn live_neighbors(&self, u: Vertex) -> impl Iterator<Item = Edge> + '_ {
        self.neighbors(u)
            .iter()
            .copied()
            .filter(|edge| self.alive[edge.to])
    }

    /// All live edges. Undirected edges are listed once, lower id first.
    pub fn edges(&self) -> Vec<(Vertex, Vertex, Weight)> {
        let mut edges = Vec::new();
        for u in self.live_vertices() {
            // Undirected self-loops are stored twice in the same list.
            let mut self_loop_pending = false;
            for edge in self.live_neighbors(u) {
                if self.directed {
                    edges.push((u, edge.to, edge.weight));
                    continue;
                }
                if edge.to == u {
                    self_loop_pending = !self_loop_pending;
                    if !self_loop_pending {
                        continue;
                    }
                }
                if u <= edge.to {
                    edges.push((u, edge.to, edge.weight));
                }
            }
        }
        edges
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn live_vertex_count(&self) -> usize {
        self.alive.iter().filter(|&&alive| alive).count()
    }

    pub fn edge_count(&self) -> usize {
        let arcs = self
            .live_vertices()
            .map(|u| self.live_neighbors(u).count())
            .sum::<usize>();
        if self.directed { arcs } else { arcs / 2 }
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn is_alive(&self, v: Vertex) -> bool {
        v < self.alive.len() && self.alive[v]
    }

    pub fn live_vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter_map(|(v, &alive)| alive.then_some(v))
    }

    pub fn total_weight(&self) -> Weight {
        self.edges().iter().map(|&(_, _, w)| w).sum()
    }
}

fn remove_arcs(list: &mut Vec<Edge>, to: Vertex, weight: Option<Weight>) -> usize {
    match weight {
        Some(w) => {
            let pos = list
                .iter()
                .position(|edge| edge.to == to && (edge.weight - w).abs() <= WEIGHT_EPS);
            match pos {
                Some(pos) => {
                    list.remove(pos);
                    1
                }
                None => 0,
            }
        }
        None => {
            let before = list.len();
            list.retain(|edge| edge.to != to);
            before - list.len()
        }
    }
}
