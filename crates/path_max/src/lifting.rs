use crate::graph::{Vertex, Weight};

pub(crate) const NONE: usize = usize::MAX;

#[inline(always)]
pub(crate) fn ceil_log2(x: usize) -> u32 {
    if x <= 1 {
        0
    } else {
        usize::BITS - (x - 1).leading_zeros()
    }
}

/// Doubling tables over a rooted forest, stored row-major (`v * levels + k`).
///
/// `jump[v][k]` is the `2^k`-th ancestor of `v` (`NONE` past the root) and
/// `max_weight[v][k]` the heaviest edge on the way there.
#[derive(Clone, Debug)]
pub(crate) struct BinaryLifting {
    levels: usize,
    jump: Vec<Vertex>,
    max_weight: Vec<Weight>,
}

impl BinaryLifting {
    pub(crate) fn build(parent: &[Vertex], parent_weight: &[Weight]) -> Self {
        let n = parent.len();
        debug_assert_eq!(parent_weight.len(), n);
        let levels = ceil_log2(n) as usize + 1;

        let mut jump = vec![NONE; n * levels];
        let mut max_weight = vec![Weight::NEG_INFINITY; n * levels];
        for v in 0..n {
            jump[v * levels] = parent[v];
            if parent[v] != NONE {
                max_weight[v * levels] = parent_weight[v];
            }
        }

        for k in 1..levels {
            for v in 0..n {
                let mid = jump[v * levels + k - 1];
                if mid == NONE {
                    continue;
                }
                let top = jump[mid * levels + k - 1];
                if top == NONE {
                    continue;
                }
                jump[v * levels + k] = top;
                max_weight[v * levels + k] =
                    max_weight[v * levels + k - 1].max(max_weight[mid * levels + k - 1]);
            }
        }

        Self {
            levels,
            jump,
            max_weight,
        }
    }

    #[inline]
    pub(crate) fn levels(&self) -> usize {
        self.levels
    }

    #[inline]
    pub(crate) fn ancestor(&self, v: Vertex, k: usize) -> Option<Vertex> {
        let a = self.jump[v * self.levels + k];
        (a != NONE).then_some(a)
    }

    /// Climbs `steps` edges from `v`; returns where it lands and the heaviest
    /// edge crossed. `None` if the root is passed first.
    pub(crate) fn climb(&self, mut v: Vertex, mut steps: usize) -> Option<(Vertex, Weight)> {
        let mut best = Weight::NEG_INFINITY;
        for k in (0..self.levels).rev() {
            if steps == 0 {
                break;
            }
            if steps >= (1_usize << k) {
                let idx = v * self.levels + k;
                if self.jump[idx] == NONE {
                    return None;
                }
                best = best.max(self.max_weight[idx]);
                v = self.jump[idx];
                steps -= 1_usize << k;
            }
        }
        (steps == 0).then_some((v, best))
    }
}

#[cfg(test)]
mod tests {
    use super::{BinaryLifting, NONE, ceil_log2};

    #[test]
    fn ceil_log2_values() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(1 << 20), 20);
    }

    #[test]
    fn path_tables() {
        // 0 <- 1 <- 2 <- 3 <- 4, weights 5, 1, 7, 2
        let parent = [NONE, 0, 1, 2, 3];
        let weight = [0.0, 5.0, 1.0, 7.0, 2.0];
        let table = BinaryLifting::build(&parent, &weight);
        assert_eq!(table.levels(), 4);
        assert_eq!(table.ancestor(4, 0), Some(3));
        assert_eq!(table.ancestor(4, 1), Some(2));
        assert_eq!(table.ancestor(4, 2), Some(0));
        assert_eq!(table.ancestor(3, 2), None);
        assert_eq!(table.ancestor(0, 0), None);

        assert_eq!(table.climb(4, 4), Some((0, 7.0)));
        assert_eq!(table.climb(4, 1), Some((3, 2.0)));
        assert_eq!(table.climb(2, 1), Some((1, 1.0)));
        assert_eq!(table.climb(3, 3), Some((0, 7.0)));
        assert_eq!(table.climb(2, 3), None);
        assert_eq!(table.climb(2, 0), Some((2, f64::NEG_INFINITY)));
    }

    #[test]
    fn matches_parent_walk() {
        // Random-parent tree rooted at 0.
        let n = 200;
        let mut parent = vec![NONE; n];
        let mut weight = vec![0.0; n];
        let mut state = 0x1234_5678_u64;
        for v in 1..n {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            parent[v] = (state >> 33) as usize % v;
            weight[v] = ((state >> 13) % 1000) as f64;
        }
        let table = BinaryLifting::build(&parent, &weight);
        for v in 0..n {
            let mut cur = v;
            let mut best = f64::NEG_INFINITY;
            let mut steps = 0;
            while parent[cur] != NONE {
                best = best.max(weight[cur]);
                cur = parent[cur];
                steps += 1;
                assert_eq!(table.climb(v, steps), Some((cur, best)));
            }
            assert_eq!(table.climb(v, steps + 1), None);
        }
    }
}
