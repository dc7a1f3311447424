// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Minimization of partial deterministic finite-state automata
//!

use crate::{automata::Dfa, partitions::Partition};

//
// Valmari's algorithm (Valmari, "Fast brief practical DFA minimization",
// Information Processing Letters 112(6), 2012).
//
// The automaton is given by a set of states S, an alphabet A, a *partial*
// transition function delta: S x A -> S, and a set of final states F.
// Transitions are stored as three parallel arrays tails/labels/heads:
// delta(tails[i], labels[i]) = heads[i].
//
// Two partitions are refined simultaneously:
// - blocks: a partition of the states, initially split by acceptance.
//   Two states end up in the same block iff they are behaviorally
//   indistinguishable.
// - cords: a partition of the transitions, initially grouped by label.
//   Each cord is refined until all its transitions lead into a single
//   block.
//
// Refinement alternates between the two:
// - a cord splits blocks by marking the tails of its transitions
//   (states with a transition in the cord are separated from states
//   without one; this is what keeps partial automata exact: a missing
//   transition distinguishes a state from one that has it),
// - a block splits cords by marking the incoming transitions of its
//   states, found through a counting-sort adjacency index.
//
// Every split strictly increases the number of sets in a partition bounded
// by |S| (resp. the number of transitions), so a fixed point is reached.
// With the smaller-half splitting rule of Partition, the total work is
// O(n + m log n) for n states and m transitions.
//
// The automaton must be trimmed first: states that are unreachable or
// cannot reach a final state distinguish nothing and would otherwise
// pollute the blocks.
//
#[derive(Debug)]
struct Minimizer {
    // parallel transition arrays
    tails: Vec<u32>,
    labels: Vec<u32>,
    heads: Vec<u32>,
    // incoming transitions of state q are adjacent[offset[q] .. offset[q+1]]
    offset: Vec<u32>,
    adjacent: Vec<u32>,
    // state partition
    blocks: Partition,
    // transition partition
    cords: Partition,
}

impl Minimizer {
    fn new(dfa: &Dfa) -> Self {
        let n = dfa.num_states() as usize;
        let m = dfa.num_transitions();

        let mut tails = Vec::with_capacity(m);
        let mut labels = Vec::with_capacity(m);
        let mut heads = Vec::with_capacity(m);
        for (q, a, r) in dfa.transitions() {
            tails.push(q);
            labels.push(a);
            heads.push(r);
        }

        // counting sort of the transitions by head state
        let mut offset = vec![0u32; n + 1];
        for &h in &heads {
            offset[h as usize] += 1;
        }
        for i in 0..n {
            offset[i + 1] += offset[i];
        }
        let mut adjacent = vec![0u32; m];
        for i in (0..m).rev() {
            let h = heads[i] as usize;
            offset[h] -= 1;
            adjacent[offset[h] as usize] = i as u32;
        }

        // initial partitions: states by acceptance, transitions by label
        let mut blocks = Partition::new(n as u32);
        for q in dfa.final_states() {
            blocks.mark(q);
        }
        blocks.split();
        let cords = Partition::with_key(m as u32, |t| labels[t as usize]);

        Minimizer {
            tails,
            labels,
            heads,
            offset,
            adjacent,
            blocks,
            cords,
        }
    }

    //
    // Refine blocks and cords until every cord respects the block
    // partition and every block respects the cords.
    //
    fn refine(&mut self) {
        let mut block = 1;
        let mut cord = 0;
        while cord < self.cords.num_sets() {
            // split blocks by the tails of this cord's transitions
            for i in self.cords.first(cord)..self.cords.past(cord) {
                let t = self.cords.element(i) as usize;
                self.blocks.mark(self.tails[t]);
            }
            self.blocks.split();
            cord += 1;

            // split cords by the incoming transitions of each new block
            while block < self.blocks.num_sets() {
                for i in self.blocks.first(block)..self.blocks.past(block) {
                    let q = self.blocks.element(i) as usize;
                    for j in self.offset[q]..self.offset[q + 1] {
                        self.cords.mark(self.adjacent[j as usize]);
                    }
                }
                self.cords.split();
                block += 1;
            }
        }
    }

    //
    // Build the minimized automaton: one state per block. By the fixed
    // point, all states of a block agree on acceptance and on the target
    // block for every defined symbol, so each block's representative
    // speaks for the whole block.
    //
    fn build(&self, dfa: &Dfa) -> Dfa {
        let num_blocks = self.blocks.num_sets();
        let finals = (0..num_blocks).filter(|&b| dfa.is_final(self.blocks.pick_element(b)));
        let transitions = (0..self.tails.len()).filter_map(|i| {
            let q = self.tails[i];
            if self.blocks.is_representative(q) {
                let block = self.blocks.set_of(q);
                let target = self.blocks.set_of(self.heads[i]);
                Some((block, self.labels[i], target))
            } else {
                None
            }
        });
        Dfa::from_parts(
            num_blocks,
            dfa.alphabet_size(),
            self.blocks.set_of(dfa.initial_state()),
            finals,
            transitions,
        )
    }
}

///
/// Minimize a partial deterministic automaton.
///
pub(crate) fn minimize(dfa: &Dfa) -> Dfa {
    let trimmed = dfa.trim();
    if trimmed.num_final_states() == 0 {
        // empty language: trimming already collapsed everything to the
        // single dead start state
        return trimmed;
    }
    let mut minimizer = Minimizer::new(&trimmed);
    minimizer.refine();
    minimizer.build(&trimmed)
}

#[cfg(test)]
mod test {
    use crate::automata::Dfa;

    // symbols: a = 0, b = 1
    const A: u32 = 0;
    const B: u32 = 1;

    fn check_minimization(dfa: &Dfa, expected: &Dfa) {
        let minimized = dfa.minimize();
        println!("minimized:\n{minimized}");
        assert!(minimized.isomorphic(expected));
        assert!(minimized.equivalent(dfa));
        // idempotence
        assert!(minimized.minimize().isomorphic(&minimized));
    }

    #[test]
    fn test_minimize_1() {
        // state 7 is a non-accepting sink; it disappears and the two
        // accepting branches merge pairwise
        let dfa = Dfa::new(
            8,
            2,
            0,
            &[1, 2, 3, 4, 5, 6],
            &[
                (0, A, 1),
                (0, B, 4),
                (1, A, 2),
                (1, B, 3),
                (2, A, 7),
                (2, B, 7),
                (3, A, 7),
                (3, B, 3),
                (4, A, 5),
                (4, B, 6),
                (5, A, 7),
                (5, B, 7),
                (6, A, 7),
                (6, B, 6),
                (7, A, 7),
                (7, B, 7),
            ],
        )
        .unwrap();

        let expected = Dfa::new(
            4,
            2,
            0,
            &[1, 2, 3],
            &[(0, A, 1), (0, B, 1), (1, A, 2), (1, B, 3), (3, B, 3)],
        )
        .unwrap();

        check_minimization(&dfa, &expected);
        // same language, different structure
        assert!(dfa.equivalent(&expected));
        assert!(!dfa.isomorphic(&expected));
    }

    #[test]
    fn test_minimize_2() {
        let dfa = Dfa::new(
            7,
            2,
            0,
            &[4, 5, 6],
            &[
                (0, A, 4),
                (0, B, 1),
                (1, A, 5),
                (1, B, 2),
                (2, A, 6),
                (2, B, 3),
                (3, A, 3),
                (3, B, 3),
                (4, A, 4),
                (4, B, 4),
                (5, A, 5),
                (5, B, 5),
                (6, A, 6),
                (6, B, 6),
            ],
        )
        .unwrap();

        let expected = Dfa::new(
            4,
            2,
            0,
            &[3],
            &[
                (0, A, 3),
                (0, B, 1),
                (1, A, 3),
                (1, B, 2),
                (2, A, 3),
                (3, A, 3),
                (3, B, 3),
            ],
        )
        .unwrap();

        check_minimization(&dfa, &expected);
    }

    #[test]
    fn test_minimize_3() {
        let dfa = Dfa::new(
            6,
            2,
            0,
            &[5],
            &[
                (0, A, 1),
                (0, B, 3),
                (1, A, 1),
                (1, B, 2),
                (2, A, 2),
                (2, B, 5),
                (3, A, 3),
                (3, B, 4),
                (4, A, 4),
                (4, B, 5),
                (5, A, 5),
                (5, B, 5),
            ],
        )
        .unwrap();

        let expected = Dfa::new(
            4,
            2,
            0,
            &[3],
            &[
                (0, A, 1),
                (0, B, 1),
                (1, A, 1),
                (1, B, 2),
                (2, A, 2),
                (2, B, 3),
                (3, A, 3),
                (3, B, 3),
            ],
        )
        .unwrap();

        check_minimization(&dfa, &expected);
    }

    #[test]
    fn test_minimize_4() {
        let dfa = Dfa::new(
            6,
            2,
            0,
            &[0, 2, 4],
            &[
                (0, A, 1),
                (0, B, 3),
                (1, A, 2),
                (1, B, 3),
                (2, A, 5),
                (2, B, 2),
                (3, A, 4),
                (3, B, 1),
                (4, A, 5),
                (4, B, 4),
                (5, A, 5),
                (5, B, 5),
            ],
        )
        .unwrap();

        let expected = Dfa::new(
            3,
            2,
            0,
            &[0, 2],
            &[(0, A, 1), (0, B, 1), (1, A, 2), (1, B, 1), (2, B, 2)],
        )
        .unwrap();

        check_minimization(&dfa, &expected);
    }

    #[test]
    fn test_minimize_5() {
        let dfa = Dfa::new(
            7,
            2,
            0,
            &[1, 3, 5, 6],
            &[
                (0, A, 1),
                (0, B, 3),
                (1, A, 2),
                (1, B, 4),
                (2, A, 5),
                (2, B, 5),
                (3, A, 4),
                (3, B, 2),
                (4, A, 5),
                (4, B, 5),
                (5, A, 6),
                (5, B, 5),
                (6, A, 6),
                (6, B, 6),
            ],
        )
        .unwrap();

        let expected = Dfa::new(
            4,
            2,
            0,
            &[1, 3],
            &[
                (0, A, 1),
                (0, B, 1),
                (1, A, 2),
                (1, B, 2),
                (2, A, 3),
                (2, B, 3),
                (3, A, 3),
                (3, B, 3),
            ],
        )
        .unwrap();

        check_minimization(&dfa, &expected);
    }

    #[test]
    fn test_minimize_already_minimal() {
        // a(b*): already minimal
        let dfa = Dfa::new(2, 2, 0, &[1], &[(0, A, 1), (1, B, 1)]).unwrap();
        let minimized = dfa.minimize();
        assert_eq!(minimized.num_states(), 2);
        assert!(minimized.isomorphic(&dfa));
    }

    #[test]
    fn test_minimize_empty_language() {
        // no final state is reachable
        let dfa = Dfa::new(
            4,
            2,
            0,
            &[3],
            &[(0, A, 1), (1, A, 0), (1, B, 2), (2, A, 2)],
        )
        .unwrap();
        let minimized = dfa.minimize();
        assert_eq!(minimized.num_states(), 1);
        assert_eq!(minimized.num_final_states(), 0);
        assert_eq!(minimized.num_transitions(), 0);
        assert!(minimized.equivalent(&dfa));
    }

    #[test]
    fn test_minimize_all_accepting() {
        // every state accepts: collapses to one accepting state
        let dfa = Dfa::new(
            3,
            2,
            0,
            &[0, 1, 2],
            &[
                (0, A, 1),
                (0, B, 2),
                (1, A, 2),
                (1, B, 0),
                (2, A, 0),
                (2, B, 1),
            ],
        )
        .unwrap();
        let minimized = dfa.minimize();
        assert_eq!(minimized.num_states(), 1);
        assert_eq!(minimized.num_final_states(), 1);
        assert!(minimized.equivalent(&dfa));
    }
}
