/// Union-find over `0..n`: union by size, path halving on `find`.
#[derive(Clone, Debug)]
pub(crate) struct DisjointSet {
    link: Vec<usize>,
    size: Vec<u32>,
}

impl DisjointSet {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            link: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub(crate) fn find(&mut self, mut v: usize) -> usize {
        while self.link[v] != v {
            let grand = self.link[self.link[v]];
            self.link[v] = grand;
            v = grand;
        }
        v
    }

    /// Returns false if `a` and `b` were already in one set.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        let (big, small) = if self.size[a] >= self.size[b] { (a, b) } else { (b, a) };
        self.link[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSet;

    #[test]
    fn union_and_find() {
        let mut dsu = DisjointSet::new(6);
        assert!(dsu.union(0, 1));
        assert!(dsu.union(2, 3));
        assert!(!dsu.union(1, 0));
        assert_ne!(dsu.find(0), dsu.find(2));
        assert!(dsu.union(1, 3));
        assert_eq!(dsu.find(0), dsu.find(2));
        assert_eq!(dsu.find(4), 4);
        assert_ne!(dsu.find(5), dsu.find(0));
    }

    #[test]
    fn long_chain_collapses() {
        let n = 100_000;
        let mut dsu = DisjointSet::new(n);
        for v in 1..n {
            assert!(dsu.union(v - 1, v));
        }
        let root = dsu.find(0);
        assert!((0..n).all(|v| dsu.find(v) == root));
    }
}
