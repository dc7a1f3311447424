// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Disjoint-set (union-find) structure over an integer set
//!
//! Supports `find` and `union` with iterative path compression and union by
//! rank. Used by the deterministic equivalence procedure to merge state
//! pairs discovered to be behaviorally indistinguishable. A fresh structure
//! is created per equivalence query and dropped when the query returns.
//!

#[derive(Debug)]
pub struct DisjointSet {
    parent: Box<[u32]>,
    rank: Box<[u8]>,
    num_sets: u32,
}

#[allow(dead_code)]
impl DisjointSet {
    ///
    /// Create n singleton sets, one per element of [0 .. n-1]
    ///
    pub fn new(n: u32) -> Self {
        let size = n as usize;
        let mut parent = vec![0; size].into_boxed_slice();
        for i in 0..size {
            parent[i] = i as u32;
        }
        let rank = vec![0; size].into_boxed_slice();
        DisjointSet {
            parent,
            rank,
            num_sets: n,
        }
    }

    ///
    /// Number of disjoint sets
    ///
    pub fn num_sets(&self) -> u32 {
        self.num_sets
    }

    ///
    /// Representative of the set that contains x
    ///
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        // compress the path from x to root
        let mut i = x;
        while self.parent[i as usize] != root {
            let next = self.parent[i as usize];
            self.parent[i as usize] = root;
            i = next;
        }
        root
    }

    ///
    /// Merge the sets that contain x and y
    /// - return the representative of the merged set
    ///
    pub fn union(&mut self, x: u32, y: u32) -> u32 {
        let mut x_root = self.find(x);
        let mut y_root = self.find(y);

        if x_root == y_root {
            return x_root;
        }

        if self.rank[x_root as usize] < self.rank[y_root as usize] {
            std::mem::swap(&mut x_root, &mut y_root);
        }
        self.parent[y_root as usize] = x_root;
        if self.rank[x_root as usize] == self.rank[y_root as usize] {
            self.rank[x_root as usize] += 1;
        }
        self.num_sets -= 1;
        x_root
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test() {
        let mut sets = DisjointSet::new(10);
        assert_eq!(sets.num_sets(), 10);
        for x in 0..10 {
            assert_eq!(sets.find(x), x);
        }

        sets.union(0, 1);
        sets.union(2, 3);
        assert_eq!(sets.num_sets(), 8);
        assert_eq!(sets.find(0), sets.find(1));
        assert_eq!(sets.find(2), sets.find(3));
        assert_ne!(sets.find(1), sets.find(2));

        sets.union(1, 3);
        assert_eq!(sets.num_sets(), 7);
        assert_eq!(sets.find(0), sets.find(3));

        // union of already-merged elements changes nothing
        let r = sets.find(0);
        assert_eq!(sets.union(0, 2), r);
        assert_eq!(sets.num_sets(), 7);

        // untouched elements stay singletons
        for x in 4..10 {
            assert_eq!(sets.find(x), x);
        }
    }
}
