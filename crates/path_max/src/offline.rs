use std::collections::HashMap;

use tracing::debug;

use crate::graph::{Graph, Vertex, Weight};
use crate::union_find::DisjointSet;

#[inline]
fn pair_key(u: Vertex, v: Vertex) -> (Vertex, Vertex) {
    if u <= v { (u, v) } else { (v, u) }
}

/// Precomputed v3 answers keyed by unordered vertex pair. `None` values are
/// batch pairs with no connecting path.
#[derive(Clone, Debug, Default)]
pub(crate) struct BatchTable {
    answers: HashMap<(Vertex, Vertex), Option<Weight>>,
}

impl Graph {
    /// Tarjan's offline LCA over the tree rooted by
    /// `compute_center_and_parent`.
    ///
    /// One DFS from the center: each finished vertex is merged into its
    /// parent's set, and the set's representative points at the deepest
    /// unfinished ancestor. A query is answered when its second endpoint
    /// finishes. Answers come back in query order; pairs not both in the
    /// rooted component get `None`.
    pub fn tarjan_lca(&self, queries: &[(Vertex, Vertex)]) -> Vec<Option<Vertex>> {
        let tree = self.rooted_tree();
        let n = self.vertex_count();

        let mut children = vec![Vec::new(); n];
        for v in 0..n {
            if let Some(p) = tree.parent_of(v) {
                children[p].push(v);
            }
        }

        let mut pending = vec![Vec::new(); n];
        for (i, &(u, v)) in queries.iter().enumerate() {
            self.assert_live(u);
            self.assert_live(v);
            pending[u].push((v, i));
            if u != v {
                pending[v].push((u, i));
            }
        }

        let mut answers = vec![None; queries.len()];
        let mut dsu = DisjointSet::new(n);
        let mut ancestor = (0..n).collect::<Vec<_>>();
        let mut finished = vec![false; n];
        let mut stack = vec![(tree.center, 0_usize)];

        while let Some(top) = stack.last_mut() {
            let (v, next) = *top;
            if next < children[v].len() {
                top.1 += 1;
                stack.push((children[v][next], 0));
                continue;
            }

            stack.pop();
            finished[v] = true;
            for &(other, i) in &pending[v] {
                if finished[other] {
                    answers[i] = Some(ancestor[dsu.find(other)]);
                }
            }
            if let Some(&(p, _)) = stack.last() {
                dsu.union(p, v);
                let root = dsu.find(p);
                ancestor[root] = p;
            }
        }

        answers
    }

    /// v3 preprocessing: Tarjan LCA over the whole batch, then one pair of
    /// lifting climbs per query, stored for constant-time lookup.
    ///
    /// Requires `compute_center_and_parent`. Replaces any previous batch.
    pub fn preprocess_v3(&mut self, queries: &[(Vertex, Vertex)]) {
        let lcas = self.tarjan_lca(queries);
        let mut answers = HashMap::with_capacity(queries.len());
        for (&(u, v), l) in queries.iter().zip(lcas) {
            let value = if u == v {
                Some(0.0)
            } else {
                l.and_then(|l| self.combine_at(u, v, l))
            };
            answers.insert(pair_key(u, v), value);
        }
        debug!(queries = queries.len(), distinct = answers.len(), "v3 batch ready");
        self.batch = Some(BatchTable { answers });
    }

    #[inline]
    fn batch_table(&self) -> &BatchTable {
        let Some(batch) = self.batch.as_ref() else {
            panic!("preprocess_v3 must run after the last mutation");
        };
        batch
    }

    /// v3: lookup in the table built by `preprocess_v3`.
    ///
    /// `None` both for pairs without a path and for pairs that were not in
    /// the batch; `in_batch` tells them apart.
    pub fn path_max_v3(&self, u: Vertex, v: Vertex) -> Option<Weight> {
        self.assert_live(u);
        self.assert_live(v);
        self.batch_table()
            .answers
            .get(&pair_key(u, v))
            .copied()
            .flatten()
    }

    pub fn in_batch(&self, u: Vertex, v: Vertex) -> bool {
        self.batch_table().answers.contains_key(&pair_key(u, v))
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::Graph;

    fn sample_tree() -> Graph {
        Graph::from_edges(
            6,
            false,
            &[(0, 1, 3.0), (0, 2, 8.0), (1, 3, 5.0), (1, 4, 1.0), (2, 5, 2.0)],
        )
    }

    #[test]
    fn tarjan_on_sample() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        let queries = [(3, 4), (4, 3), (3, 5), (1, 4), (5, 5), (0, 0), (2, 5)];
        assert_eq!(
            g.tarjan_lca(&queries),
            vec![Some(1), Some(1), Some(0), Some(1), Some(5), Some(0), Some(2)]
        );
    }

    #[test]
    fn tarjan_matches_naive_all_pairs() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        let mut queries = Vec::new();
        for u in 0..6 {
            for v in 0..6 {
                queries.push((u, v));
            }
        }
        let offline = g.tarjan_lca(&queries);
        for (&(u, v), got) in queries.iter().zip(offline) {
            assert_eq!(got, g.lca(u, v), "u={u} v={v}");
        }
    }

    #[test]
    fn tarjan_outside_component() {
        let mut g = Graph::from_edges(4, false, &[(0, 1, 1.0), (2, 3, 1.0)]);
        g.compute_center_and_parent();
        assert_eq!(g.tarjan_lca(&[(0, 1), (0, 3), (2, 3)]), vec![Some(0), None, None]);
    }

    #[test]
    fn v3_lookup_is_unordered() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        g.preprocess_v3(&[(3, 4), (5, 3), (2, 2)]);
        assert_eq!(g.path_max_v3(3, 4), Some(5.0));
        assert_eq!(g.path_max_v3(4, 3), Some(5.0));
        assert_eq!(g.path_max_v3(3, 5), Some(8.0));
        assert_eq!(g.path_max_v3(2, 2), Some(0.0));
        assert!(g.in_batch(5, 3));
    }

    #[test]
    fn v3_outside_batch() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        g.preprocess_v3(&[(3, 4)]);
        assert!(!g.in_batch(0, 5));
        assert_eq!(g.path_max_v3(0, 5), None);
    }

    #[test]
    fn v3_disconnected_pair_in_batch() {
        let mut g = Graph::from_edges(4, false, &[(0, 1, 1.0), (2, 3, 1.0)]);
        g.compute_center_and_parent();
        g.preprocess_v3(&[(0, 3), (0, 1)]);
        assert!(g.in_batch(0, 3));
        assert_eq!(g.path_max_v3(0, 3), None);
        assert_eq!(g.path_max_v3(1, 0), Some(1.0));
    }

    #[test]
    #[should_panic(expected = "preprocess_v3")]
    fn mutation_drops_batch() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        g.preprocess_v3(&[(3, 4)]);
        g.add_edge(3, 4, 0.5);
        let _ = g.path_max_v3(3, 4);
    }

    #[test]
    #[should_panic(expected = "preprocess_v3")]
    fn recentering_drops_batch() {
        let mut g = sample_tree();
        g.compute_center_and_parent();
        g.preprocess_v3(&[(3, 4)]);
        g.compute_center_and_parent();
        let _ = g.in_batch(3, 4);
    }

    #[test]
    #[should_panic(expected = "compute_center_and_parent")]
    fn preprocess_requires_rooting() {
        let mut g = sample_tree();
        g.preprocess_v3(&[(3, 4)]);
    }
}
