/// Union-find over `n` labeled elements with union by size.
///
/// Each slot is either negative — the element is a set root and its set has
/// size `-forest[i]` — or a non-negative parent pointer. Following parent
/// pointers always terminates at a root. Indices are a caller contract;
/// out-of-range access panics.
pub struct DisjointSetForest {
    forest: Vec<isize>,
}

impl DisjointSetForest {
    pub fn new(n: usize) -> Self {
        Self {
            forest: vec![-1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.forest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// The raw forest slot: `-size` at a root, parent index otherwise.
    pub fn get(&self, i: usize) -> isize {
        self.forest[i]
    }

    /// The representative of the set containing `i`.
    pub fn root(&self, mut i: usize) -> usize {
        while self.forest[i] >= 0 {
            i = self.forest[i] as usize;
        }
        i
    }

    pub fn joined(&self, x: usize, y: usize) -> bool {
        self.root(x) == self.root(y)
    }

    /// Merges the sets containing `x` and `y`. No-op if already joined;
    /// otherwise the smaller set's root is attached under the larger.
    pub fn union(&mut self, x: usize, y: usize) {
        let rx = self.root(x);
        let ry = self.root(y);
        if rx == ry {
            return;
        }
        // Roots hold -size, so the more negative slot is the larger set.
        let (keep, fold) = if self.forest[rx] <= self.forest[ry] {
            (rx, ry)
        } else {
            (ry, rx)
        };
        self.forest[keep] += self.forest[fold];
        self.forest[fold] = keep as isize;
    }

    /// Reconstructs every set by scanning the parent array. No member list
    /// is maintained, so this is O(n²). Sets are ordered by their smallest
    /// member; members are ascending.
    pub fn sets(&self) -> Vec<Vec<usize>> {
        let n = self.forest.len();
        let mut sets = Vec::new();
        for r in 0..n {
            if self.forest[r] >= 0 {
                continue;
            }
            let members: Vec<usize> = (0..n).filter(|&i| self.root(i) == r).collect();
            sets.push(members);
        }
        sets.sort_by_key(|s| s[0]);
        sets
    }
}
