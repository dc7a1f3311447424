// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Language-equivalence checking
//!
//! Two procedures, chosen by automaton kind:
//!
//! - For a pair of deterministic automata: Hopcroft and Karp's merge-and-check
//!   procedure over state pairs, backed by a union-find structure. Near-linear
//!   in the number of state pairs actually visited, not in the cross product.
//!   Produces a shortest distinguishing word on failure.
//!
//! - When either side is nondeterministic: bisimulation up to congruence
//!   (Bonchi and Pous, "Checking NFA equivalence with bisimulations up to
//!   congruence", POPL 2013) over sets of states. A candidate pair of
//!   state-sets is discharged without expansion when it lies in the
//!   congruence closure of the pairs already proven or pending, which avoids
//!   materializing the subset construction. Sound and complete, but with no
//!   polynomial worst-case bound.
//!
//! Both automata keep their partial transition functions: an undefined
//! transition behaves exactly like a transition to a virtual non-accepting
//! absorbing state for the duration of one query.
//!

use std::collections::VecDeque;

use bit_set::BitSet;

use crate::{
    automata::{Automaton, Dfa, Nfa},
    disjoint_sets::DisjointSet,
};

///
/// Find a shortest word accepted by exactly one of the two deterministic
/// automata, or None if they are language-equivalent.
///
pub(crate) fn dfa_distinguishing_word(a: &Dfa, b: &Dfa) -> Option<Vec<u32>> {
    // symbols that one side does not declare can only lead into its sink
    let sigma = a.alphabet_size().max(b.alphabet_size());

    // the two state sets are standardized apart:
    // states of a keep their ids, a's virtual sink is n1,
    // states of b are shifted by offset, b's virtual sink is offset + n2
    let n1 = a.num_states();
    let n2 = b.num_states();
    let a_sink = n1;
    let offset = n1 + 1;
    let b_sink = offset + n2;

    let mut merged = DisjointSet::new(b_sink + 1);
    let mut queue: VecDeque<(Vec<u32>, u32, u32)> = VecDeque::new();
    queue.push_back((Vec::new(), a.initial_state(), offset + b.initial_state()));

    while let Some((witness, p, q)) = queue.pop_front() {
        if merged.find(p) == merged.find(q) {
            continue;
        }
        let p_accepts = p != a_sink && a.is_final(p);
        let q_accepts = q != b_sink && b.is_final(q - offset);
        if p_accepts != q_accepts {
            return Some(witness);
        }
        for c in 0..sigma {
            let p2 = if p == a_sink {
                a_sink
            } else {
                a.next(p, c).unwrap_or(a_sink)
            };
            let q2 = if q == b_sink {
                b_sink
            } else {
                b.next(q - offset, c).map_or(b_sink, |r| r + offset)
            };
            let mut word = witness.clone();
            word.push(c);
            queue.push_back((word, p2, q2));
        }
        merged.union(p, q);
    }
    None
}

//
// A uniform set-of-states interface over either automaton kind, used by the
// nondeterministic equivalence path. A deterministic automaton steps to
// singleton (or empty) sets; no determinization ever happens up front.
//
#[derive(Debug, Clone, Copy)]
pub(crate) enum SetView<'a> {
    /// Deterministic side
    Det(&'a Dfa),
    /// Nondeterministic side
    Nondet(&'a Nfa),
}

impl<'a> SetView<'a> {
    pub(crate) fn of(automaton: &'a Automaton) -> Self {
        match automaton {
            Automaton::Dfa(d) => SetView::Det(d),
            Automaton::Nfa(n) => SetView::Nondet(n),
        }
    }

    fn num_states(&self) -> u32 {
        match self {
            SetView::Det(d) => d.num_states(),
            SetView::Nondet(n) => n.num_states(),
        }
    }

    fn alphabet_size(&self) -> u32 {
        match self {
            SetView::Det(d) => d.alphabet_size(),
            SetView::Nondet(n) => n.alphabet_size(),
        }
    }

    fn is_final(&self, q: u32) -> bool {
        match self {
            SetView::Det(d) => d.is_final(q),
            SetView::Nondet(n) => n.is_final(q),
        }
    }

    // The epsilon-closed set of start states, in this automaton's own space.
    fn start_set(&self) -> BitSet {
        match self {
            SetView::Det(d) => {
                let mut set = BitSet::new();
                set.insert(d.initial_state() as usize);
                set
            }
            SetView::Nondet(n) => n.start_set(),
        }
    }

    // Add the raw successors of state q on symbol c to out.
    fn step_state(&self, q: u32, c: u32, out: &mut BitSet) {
        match self {
            SetView::Det(d) => {
                if let Some(r) = d.next(q, c) {
                    out.insert(r as usize);
                }
            }
            SetView::Nondet(n) => {
                for &r in n.next(q, c) {
                    out.insert(r as usize);
                }
            }
        }
    }

    fn close(&self, set: &mut BitSet) {
        if let SetView::Nondet(n) = self {
            n.epsilon_close(set);
        }
    }
}

//
// The disjoint union of the two automata: states of the left side keep
// their ids, states of the right side are shifted by offset. The state-sets
// handled by the congruence search live in this combined space, because the
// congruence step may union sets drawn from both sides.
//
struct DisjointUnion<'a> {
    left: SetView<'a>,
    right: SetView<'a>,
    offset: usize,
}

impl DisjointUnion<'_> {
    fn accepting(&self, set: &BitSet) -> bool {
        set.iter().any(|q| {
            if q < self.offset {
                self.left.is_final(q as u32)
            } else {
                self.right.is_final((q - self.offset) as u32)
            }
        })
    }

    fn step(&self, set: &BitSet, c: u32) -> BitSet {
        let mut l = BitSet::new();
        let mut r = BitSet::new();
        for q in set.iter() {
            if q < self.offset {
                self.left.step_state(q as u32, c, &mut l);
            } else {
                self.right.step_state((q - self.offset) as u32, c, &mut r);
            }
        }
        self.left.close(&mut l);
        self.right.close(&mut r);
        let mut out = l;
        for q in r.iter() {
            out.insert(q + self.offset);
        }
        out
    }

    fn shift_right(&self, set: &BitSet) -> BitSet {
        let mut out = BitSet::new();
        for q in set.iter() {
            out.insert(q + self.offset);
        }
        out
    }
}

//
// Saturate a set against the union-rewriting relation of the given pairs:
// whenever one component of a pair is contained in the set, add the other.
// Two sets are related by the congruence closure of the pairs iff they
// saturate to the same closure.
//
fn saturate(set: &BitSet, proven: &[(BitSet, BitSet)], pending: &VecDeque<(BitSet, BitSet)>) -> BitSet {
    let mut result = set.clone();
    let mut changed = true;
    while changed {
        changed = false;
        for (u, v) in proven.iter().chain(pending.iter()) {
            if u.is_subset(&result) && !v.is_subset(&result) {
                result.union_with(v);
                changed = true;
            } else if v.is_subset(&result) && !u.is_subset(&result) {
                result.union_with(u);
                changed = true;
            }
        }
    }
    result
}

fn congruent(
    s: &BitSet,
    t: &BitSet,
    proven: &[(BitSet, BitSet)],
    pending: &VecDeque<(BitSet, BitSet)>,
) -> bool {
    s == t || saturate(s, proven, pending) == saturate(t, proven, pending)
}

///
/// Language equivalence through the bisimulation-up-to-congruence search.
///
pub(crate) fn set_equivalence(a: SetView<'_>, b: SetView<'_>) -> bool {
    let sigma = a.alphabet_size().max(b.alphabet_size());
    let union = DisjointUnion {
        left: a,
        right: b,
        offset: a.num_states() as usize,
    };

    let mut proven: Vec<(BitSet, BitSet)> = Vec::new();
    let mut todo: VecDeque<(BitSet, BitSet)> = VecDeque::new();
    todo.push_back((a.start_set(), union.shift_right(&b.start_set())));

    while let Some((s, t)) = todo.pop_front() {
        // up-to-congruence step: a pair expressible from pairs already
        // proven or pending needs no expansion
        if congruent(&s, &t, &proven, &todo) {
            continue;
        }
        if union.accepting(&s) != union.accepting(&t) {
            return false;
        }
        for c in 0..sigma {
            todo.push_back((union.step(&s, c), union.step(&t, c)));
        }
        proven.push((s, t));
    }
    true
}
