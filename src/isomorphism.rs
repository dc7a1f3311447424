// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Isomorphism testing for deterministic automata
//!
//! Two deterministic automata are isomorphic if some bijection between
//! their state sets maps one onto the other: same start state, same
//! acceptance, and the same transitions under the renaming. Determinism
//! makes the bijection unique if it exists, so a single simultaneous
//! breadth-first traversal from the two start states decides the question
//! in O(n + m) time.
//!
//! The bijection must cover the full declared state sets. A state that the
//! traversal never reaches has no forced partner, so automata with
//! unreachable states are never isomorphic to anything (including, in
//! degenerate cases, themselves). Trim both sides first to compare live
//! parts only.
//!

use std::collections::VecDeque;

use crate::automata::Dfa;

const UNMAPPED: u32 = u32::MAX;

// The traversal state: the partial bijection built so far (map and its
// inverse, with UNMAPPED for states not yet paired) and the queue of
// paired states whose successors are still to be visited.
struct Matching {
    map: Box<[u32]>,
    inverse: Box<[u32]>,
    num_paired: u32,
    queue: VecDeque<(u32, u32)>,
}

impl Matching {
    fn new(n: usize) -> Self {
        Matching {
            map: vec![UNMAPPED; n].into_boxed_slice(),
            inverse: vec![UNMAPPED; n].into_boxed_slice(),
            num_paired: 0,
            queue: VecDeque::new(),
        }
    }

    // Record that state p of a must correspond to state q of b.
    // Fails if either state is already paired with a different partner or
    // if the two states disagree on acceptance.
    fn pair(&mut self, a: &Dfa, b: &Dfa, p: u32, q: u32) -> bool {
        if self.map[p as usize] == UNMAPPED && self.inverse[q as usize] == UNMAPPED {
            if a.is_final(p) != b.is_final(q) {
                return false;
            }
            self.map[p as usize] = q;
            self.inverse[q as usize] = p;
            self.num_paired += 1;
            self.queue.push_back((p, q));
            true
        } else {
            self.map[p as usize] == q
        }
    }
}

///
/// Compute the state bijection from a to b, or None if the automata are
/// not isomorphic.
///
pub(crate) fn isomorphism(a: &Dfa, b: &Dfa) -> Option<Box<[u32]>> {
    // cheap structural rejections before any traversal
    if a.num_states() != b.num_states()
        || a.alphabet_size() != b.alphabet_size()
        || a.num_final_states() != b.num_final_states()
    {
        return None;
    }

    let n = a.num_states() as usize;
    let mut matching = Matching::new(n);
    if !matching.pair(a, b, a.initial_state(), b.initial_state()) {
        return None;
    }

    while let Some((p, q)) = matching.queue.pop_front() {
        // the two states must carry transitions on the same symbols, and
        // corresponding targets must pair up
        let mut p_succ = a.successors(p);
        let mut q_succ = b.successors(q);
        loop {
            match (p_succ.next(), q_succ.next()) {
                (None, None) => break,
                (Some((c, p2)), Some((d, q2))) => {
                    if c != d || !matching.pair(a, b, p2, q2) {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }

    // a complete bijection pairs every declared state
    if matching.num_paired as usize == n {
        Some(matching.map)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use crate::automata::Dfa;

    const A: u32 = 0;
    const B: u32 = 1;

    // ab* with states in their natural order
    fn a_b_star() -> Dfa {
        Dfa::new(2, 2, 0, &[1], &[(0, A, 1), (1, B, 1)]).unwrap()
    }

    #[test]
    fn test_renaming() {
        let dfa = Dfa::new(
            3,
            2,
            0,
            &[2],
            &[(0, A, 1), (1, A, 2), (2, B, 0)],
        )
        .unwrap();
        // same automaton under the renaming 0 -> 2, 1 -> 0, 2 -> 1
        let renamed = Dfa::new(
            3,
            2,
            2,
            &[1],
            &[(2, A, 0), (0, A, 1), (1, B, 2)],
        )
        .unwrap();

        assert!(dfa.isomorphic(&dfa));
        assert!(dfa.isomorphic(&renamed));
        assert!(renamed.isomorphic(&dfa));

        let map = dfa.isomorphism(&renamed).unwrap();
        assert_eq!(&*map, &[2, 0, 1]);

        // the inverse bijection comes out of the symmetric query
        let back = renamed.isomorphism(&dfa).unwrap();
        for q in 0..3u32 {
            assert_eq!(back[map[q as usize] as usize], q);
        }
    }

    #[test]
    fn test_transitivity() {
        let dfa = Dfa::new(3, 2, 0, &[2], &[(0, A, 1), (1, A, 2), (2, B, 0)]).unwrap();
        // under the renaming q -> q+1 mod 3
        let shifted = Dfa::new(3, 2, 1, &[0], &[(1, A, 2), (2, A, 0), (0, B, 1)]).unwrap();
        // under the renaming q -> q+2 mod 3
        let twice_shifted =
            Dfa::new(3, 2, 2, &[1], &[(2, A, 0), (0, A, 1), (1, B, 2)]).unwrap();

        assert!(dfa.isomorphic(&shifted));
        assert!(shifted.isomorphic(&twice_shifted));
        assert!(dfa.isomorphic(&twice_shifted));

        // the witness bijections compose: going through the middle
        // automaton lands on the direct mapping
        let first = dfa.isomorphism(&shifted).unwrap();
        let second = shifted.isomorphism(&twice_shifted).unwrap();
        let direct = dfa.isomorphism(&twice_shifted).unwrap();
        for q in 0..3u32 {
            assert_eq!(second[first[q as usize] as usize], direct[q as usize]);
        }
    }

    #[test]
    fn test_structural_rejections() {
        let dfa = a_b_star();

        // different state count
        let bigger = Dfa::new(3, 2, 0, &[1], &[(0, A, 1), (1, B, 2), (2, B, 1)]).unwrap();
        assert!(!dfa.isomorphic(&bigger));

        // different alphabet size
        let narrow = Dfa::new(2, 1, 0, &[1], &[(0, A, 1)]).unwrap();
        assert!(!dfa.isomorphic(&narrow));

        // different number of accepting states
        let both_final = Dfa::new(2, 2, 0, &[0, 1], &[(0, A, 1), (1, B, 1)]).unwrap();
        assert!(!dfa.isomorphic(&both_final));
    }

    #[test]
    fn test_acceptance_mismatch() {
        // same shape, acceptance moved to the other state
        let dfa = a_b_star();
        let flipped = Dfa::new(2, 2, 0, &[0], &[(0, A, 1), (1, B, 1)]).unwrap();
        assert!(!dfa.isomorphic(&flipped));
    }

    #[test]
    fn test_transition_shape_mismatch() {
        // same state count and acceptance, but state 1 defines b in one
        // automaton and a in the other
        let partial = a_b_star();
        let looped = Dfa::new(2, 2, 0, &[1], &[(0, A, 1), (1, A, 1)]).unwrap();
        assert!(!partial.isomorphic(&looped));
    }

    #[test]
    fn test_unreachable_states_break_isomorphism() {
        // both automata have the same live part; their unreachable second
        // states are never visited, so no bijection is established
        let with_dead = Dfa::new(2, 1, 0, &[0], &[(0, A, 0), (1, A, 1)]).unwrap();
        let with_other_dead = Dfa::new(2, 1, 0, &[0], &[(0, A, 0)]).unwrap();
        assert!(!with_dead.isomorphic(&with_other_dead));

        // trimming both sides recovers the comparison of live parts
        assert!(with_dead.trim().isomorphic(&with_other_dead.trim()));
    }

    #[test]
    fn test_conflicting_pairings() {
        // two states with identical local behavior but distinct roles:
        // 1 and 2 both loop on a, but only paths through 1 accept on b
        let dfa = Dfa::new(
            3,
            2,
            0,
            &[0],
            &[(0, A, 1), (1, A, 1), (1, B, 0), (0, B, 2), (2, A, 2), (2, B, 0)],
        )
        .unwrap();
        // swap the roles of 1 and 2 on one transition only: not a renaming
        let twisted = Dfa::new(
            3,
            2,
            0,
            &[0],
            &[(0, A, 2), (1, A, 1), (1, B, 0), (0, B, 2), (2, A, 2), (2, B, 0)],
        )
        .unwrap();
        assert!(!dfa.isomorphic(&twisted));
    }
}
