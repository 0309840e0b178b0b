#[derive(Debug)]
pub struct UnionFind {
    pub parent: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
        }
    }

    /// Find the representative (root) of the set containing `x`.
    /// Path compression flattens the structure.
    pub fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            let root = self.find(self.parent[x]);
            self.parent[x] = root; // path compression
        }
        self.parent[x]
    }

    /// Union the sets containing `x` and `y`. The smaller root always wins,
    /// so every set is represented by its smallest member.
    pub fn union(&mut self, x: usize, y: usize) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return;
        }

        let (root, other) = if root_x < root_y {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[other] = root;
    }

    /// Members of every set whose representative is below `limit`, grouped by
    /// representative in ascending order. Members are ascending within a group.
    pub fn groups_below(&mut self, limit: usize) -> Vec<Vec<usize>> {
        let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
        for x in 0..limit.min(self.parent.len()) {
            let root = self.find(x);
            match groups.iter_mut().find(|(r, _)| *r == root) {
                Some((_, members)) => members.push(x),
                None => groups.push((root, vec![x])),
            }
        }
        groups.into_iter().map(|(_, members)| members).collect()
    }
}
