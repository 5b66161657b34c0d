/// Union-Find (Disjoint Sets) over contig indices, used to materialize
/// connectivity under a surviving edge subset.
///
/// The forest is a flat parent array; `find` is iterative so deep parent
/// chains on large assemblies cannot overflow the stack.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    /// Create a new UnionFind with n elements
    pub fn new(n: usize) -> Self {
        let parent = (0..n).collect();
        let rank = vec![0; n];
        UnionFind { parent, rank }
    }

    /// Find the root of element x with full path compression: every node
    /// visited on the way up is repointed directly to the root.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }

        root
    }

    /// Union two sets containing x and y
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x != root_y {
            // Union by rank
            if self.rank[root_x] < self.rank[root_y] {
                self.parent[root_x] = root_y;
            } else if self.rank[root_x] > self.rank[root_y] {
                self.parent[root_y] = root_x;
            } else {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
    }

    /// Check if two elements are in the same set
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Number of elements in the forest
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// True when the forest holds no elements
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct components
    pub fn component_count(&mut self) -> usize {
        (0..self.parent.len()).filter(|&i| self.find(i) == i).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_is_idempotent() {
        let mut uf = UnionFind::new(8);
        uf.union(0, 1);
        uf.union(1, 2);
        uf.union(5, 6);
        for x in 0..8 {
            let root = uf.find(x);
            assert_eq!(uf.find(root), root);
        }
    }

    #[test]
    fn union_merges_components() {
        let mut uf = UnionFind::new(4);
        assert!(!uf.connected(0, 3));
        uf.union(0, 1);
        uf.union(2, 3);
        assert!(uf.connected(0, 1));
        assert!(!uf.connected(1, 2));
        uf.union(1, 2);
        assert!(uf.connected(0, 3));
        assert_eq!(uf.component_count(), 1);
    }

    #[test]
    fn union_is_idempotent() {
        let mut uf = UnionFind::new(3);
        uf.union(0, 1);
        uf.union(0, 1);
        uf.union(1, 0);
        assert_eq!(uf.component_count(), 2);
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        // Chains a million elements; find must stay safe at assembly scale.
        let n = 1_000_000;
        let mut uf = UnionFind::new(n);
        for i in 1..n {
            uf.union(i - 1, i);
        }
        assert_eq!(uf.find(0), uf.find(n - 1));
        assert_eq!(uf.component_count(), 1);
    }
}
