// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Refinable partitions of an integer set
//!
//! We consider a set of N integers [0 .. N-1]. A partition divides this set
//! into disjoint, non-empty sets. The structure supports marking individual
//! elements and then splitting every set that contains both marked and
//! unmarked elements, which is the refinement primitive used by Valmari's
//! minimization algorithm.
//!

use std::fmt::Display;

// Implementation:
// - elements[0 .. n-1] is a permutation of the n integers
// - elements that belong to the same set are contiguous
// - location[e] is the index of element e in elements
// - set_of[e] is the id of the set that contains e
// - the elements of set s are elements[first[s] .. past[s]]
// - within a set, marked elements come first: the marked elements of set s
//   are elements[first[s] .. first[s] + marked[s]]
// - touched lists the sets that currently have marked elements
//
// Set ids are integers in [0 .. num_sets-1]. There can be at most n sets,
// so first/past/marked are allocated once with capacity n.
//
#[derive(Debug, Clone)]
pub struct Partition {
    num_sets: u32,
    elements: Box<[u32]>,
    location: Box<[u32]>,
    set_of: Box<[u32]>,
    first: Box<[u32]>,
    past: Box<[u32]>,
    marked: Box<[u32]>,
    touched: Vec<u32>,
}

#[allow(dead_code)]
impl Partition {
    ///
    /// Create a partition of [0 .. n-1] with a single set
    /// - if n == 0, the partition has no sets
    ///
    pub fn new(n: u32) -> Self {
        let size = n as usize;
        let mut elements = vec![0; size].into_boxed_slice();
        let mut location = vec![0; size].into_boxed_slice();
        for i in 0..size {
            elements[i] = i as u32;
            location[i] = i as u32;
        }
        let set_of = vec![0; size].into_boxed_slice();
        let mut first = vec![0; size].into_boxed_slice();
        let mut past = vec![0; size].into_boxed_slice();
        let marked = vec![0; size].into_boxed_slice();
        let num_sets = if n == 0 { 0 } else { 1 };
        if n > 0 {
            first[0] = 0;
            past[0] = n;
        }
        Partition {
            num_sets,
            elements,
            location,
            set_of,
            first,
            past,
            marked,
            touched: Vec::new(),
        }
    }

    ///
    /// Create a partition of [0 .. n-1] grouped by a key function
    /// - two elements are in the same initial set iff they have the same key
    ///
    pub fn with_key<K>(n: u32, key: K) -> Self
    where
        K: Fn(u32) -> u32,
    {
        let mut p = Self::new(n);
        if n == 0 {
            return p;
        }
        let size = n as usize;
        let mut elements: Vec<u32> = (0..n).collect();
        elements.sort_unstable_by_key(|&e| key(e));

        let mut num_sets = 0;
        let mut group = key(elements[0]);
        p.first[0] = 0;
        for (i, &e) in elements.iter().enumerate() {
            let k = key(e);
            if k != group {
                group = k;
                p.past[num_sets as usize] = i as u32;
                num_sets += 1;
                p.first[num_sets as usize] = i as u32;
            }
            p.set_of[e as usize] = num_sets;
            p.location[e as usize] = i as u32;
        }
        p.past[num_sets as usize] = n;
        p.num_sets = num_sets + 1;
        p.elements = elements.into_boxed_slice();
        p
    }

    ///
    /// Number of sets in the partition
    ///
    pub fn num_sets(&self) -> u32 {
        self.num_sets
    }

    ///
    /// Number of elements
    ///
    pub fn size(&self) -> u32 {
        self.elements.len() as u32
    }

    ///
    /// Id of the set that contains element e
    ///
    pub fn set_of(&self, e: u32) -> u32 {
        self.set_of[e as usize]
    }

    ///
    /// Index of the first element of set s
    ///
    pub fn first(&self, s: u32) -> u32 {
        self.first[s as usize]
    }

    ///
    /// Index one past the last element of set s
    ///
    pub fn past(&self, s: u32) -> u32 {
        self.past[s as usize]
    }

    ///
    /// Element stored at index i
    ///
    pub fn element(&self, i: u32) -> u32 {
        self.elements[i as usize]
    }

    ///
    /// Size of set s
    ///
    pub fn set_size(&self, s: u32) -> u32 {
        self.past(s) - self.first(s)
    }

    ///
    /// First element of set s (the set's representative)
    ///
    pub fn pick_element(&self, s: u32) -> u32 {
        self.elements[self.first(s) as usize]
    }

    ///
    /// Check whether element e is the representative of its set
    ///
    pub fn is_representative(&self, e: u32) -> bool {
        self.location[e as usize] == self.first(self.set_of(e))
    }

    ///
    /// Iterator over the elements of set s
    ///
    pub fn set_elements(&self, s: u32) -> impl Iterator<Item = u32> + '_ {
        let first = self.first(s) as usize;
        let past = self.past(s) as usize;
        self.elements[first..past].iter().copied()
    }

    ///
    /// Mark element e for splitting
    /// - marking an already-marked element is a no-op
    ///
    pub fn mark(&mut self, e: u32) {
        let s = self.set_of[e as usize];
        let i = self.location[e as usize];
        let unmarked = self.first[s as usize] + self.marked[s as usize];

        if i < unmarked {
            return;
        }

        // swap e with the first unmarked element of its set
        let other = self.elements[unmarked as usize];
        self.elements[i as usize] = other;
        self.location[other as usize] = i;
        self.elements[unmarked as usize] = e;
        self.location[e as usize] = unmarked;

        if self.marked[s as usize] == 0 {
            self.touched.push(s);
        }
        self.marked[s as usize] += 1;
    }

    ///
    /// Split every set that contains marked elements
    ///
    /// A set with both marked and unmarked elements is divided in two;
    /// the smaller half gets the new set id, so that a split never moves
    /// more than half of the set's elements. A set whose elements are all
    /// marked is left unchanged. All marks are cleared.
    ///
    pub fn split(&mut self) {
        while let Some(s) = self.touched.pop() {
            let s = s as usize;
            let unmarked = self.first[s] + self.marked[s];

            if unmarked == self.past[s] {
                self.marked[s] = 0;
                continue;
            }

            let t = self.num_sets as usize;
            if self.marked[s] <= self.past[s] - unmarked {
                self.first[t] = self.first[s];
                self.past[t] = unmarked;
                self.first[s] = unmarked;
            } else {
                self.first[t] = unmarked;
                self.past[t] = self.past[s];
                self.past[s] = unmarked;
            }
            for i in self.first[t]..self.past[t] {
                self.set_of[self.elements[i as usize] as usize] = t as u32;
            }
            self.marked[s] = 0;
            self.marked[t] = 0;
            self.num_sets += 1;
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for s in 0..self.num_sets {
            write!(f, "set[{s}]: ")?;
            for e in self.set_elements(s) {
                write!(f, " {e}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
