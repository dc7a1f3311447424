// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Finite-state automata with partial transition functions
//!
//! States are indexed by an integer from 0 to N-1 where N is the number of
//! states. Symbols are indexed the same way, from 0 to M-1 where M is the
//! alphabet size. Collaborators that work with richer state or symbol labels
//! (regex compilers, grammar translators, file loaders) translate to these
//! indices before calling into this module.
//!
//! The transition function of a [Dfa] may be partial: an absent
//! (state, symbol) entry denotes implicit rejection, not an error, and no
//! sink state is materialized. This is the structural reason the minimizer
//! avoids the O(states x symbols) blow-up of sink-completed automata.
//!
//! Automata are value-like: once constructed, the state set, alphabet, and
//! transition relation never change. Every operation ([trim](Dfa::trim),
//! [minimize](Dfa::minimize), [product](Dfa::product), ...) returns a new
//! automaton and leaves its inputs untouched, so callers may hold and
//! compare multiple derived automata safely, including from concurrent
//! threads.
//!

use std::collections::{HashMap, VecDeque};
use std::fmt::Display;

use bit_set::BitSet;

use crate::{
    equivalence,
    errors::{Error, MalformedAutomaton},
    isomorphism, minimizer,
};

///
/// Deterministic finite-state automaton with a partial transition function
///
#[derive(Debug, Clone)]
pub struct Dfa {
    // number of symbols in the alphabet
    alphabet_size: u32,
    // index of the start state
    initial_state: u32,
    // array of states
    states: Box<[State]>,
}

#[derive(Debug, Clone)]
struct State {
    // whether this state is accepting
    is_final: bool,
    // (symbol, target) pairs sorted by symbol; symbols not listed
    // have no transition from this state
    successors: Vec<(u32, u32)>,
}

///
/// Nondeterministic finite-state automaton with optional epsilon moves
///
#[derive(Debug, Clone)]
pub struct Nfa {
    alphabet_size: u32,
    initial_state: u32,
    states: Box<[NState]>,
}

#[derive(Debug, Clone)]
struct NState {
    is_final: bool,
    // (symbol, targets) pairs sorted by symbol; targets sorted, no duplicates
    moves: Vec<(u32, Vec<u32>)>,
    // epsilon successors, sorted, no duplicates
    epsilon: Vec<u32>,
}

///
/// An automaton of either kind
///
/// Deterministic-only operations ([minimize](Self::minimize),
/// [isomorphic](Self::isomorphic)) reject the nondeterministic variant with
/// [Error::UnsupportedAutomatonKind] instead of silently coercing.
///
#[derive(Debug, Clone)]
pub enum Automaton {
    /// Deterministic automaton
    Dfa(Dfa),
    /// Nondeterministic automaton
    Nfa(Nfa),
}

const NO_STATES: &[u32] = &[];

//
// Shared validation for state/symbol references
//
fn check_state(q: u32, num_states: u32) -> Result<(), MalformedAutomaton> {
    if q < num_states {
        Ok(())
    } else {
        Err(MalformedAutomaton::UndeclaredState(q))
    }
}

fn check_symbol(a: u32, alphabet_size: u32) -> Result<(), MalformedAutomaton> {
    if a < alphabet_size {
        Ok(())
    } else {
        Err(MalformedAutomaton::UndeclaredSymbol(a))
    }
}

impl Dfa {
    ///
    /// Construct a deterministic automaton
    ///
    /// - `num_states`: states are 0 .. num_states-1
    /// - `alphabet_size`: symbols are 0 .. alphabet_size-1
    /// - `start`: index of the start state
    /// - `finals`: indices of the accepting states
    /// - `transitions`: triples (source, symbol, target); a (source, symbol)
    ///   pair absent from this list has no transition
    ///
    /// # Errors
    ///
    /// Fails with [Error::MalformedAutomaton] if `start` or a final state is
    /// not a declared state, if a transition references an undeclared state
    /// or symbol, or if two transitions from the same state on the same
    /// symbol have different targets. Exact duplicate transitions are
    /// collapsed.
    ///
    pub fn new(
        num_states: u32,
        alphabet_size: u32,
        start: u32,
        finals: &[u32],
        transitions: &[(u32, u32, u32)],
    ) -> Result<Dfa, Error> {
        if start >= num_states {
            return Err(MalformedAutomaton::UndeclaredStart(start).into());
        }
        let mut states: Vec<State> = (0..num_states)
            .map(|_| State {
                is_final: false,
                successors: Vec::new(),
            })
            .collect();
        for &f in finals {
            if f >= num_states {
                return Err(MalformedAutomaton::UndeclaredFinal(f).into());
            }
            states[f as usize].is_final = true;
        }
        for &(q, a, r) in transitions {
            check_state(q, num_states)?;
            check_state(r, num_states)?;
            check_symbol(a, alphabet_size)?;
            let successors = &mut states[q as usize].successors;
            match successors.iter().find(|&&(b, _)| b == a) {
                Some(&(_, t)) if t != r => {
                    return Err(MalformedAutomaton::ConflictingTransition(q, a).into());
                }
                Some(_) => {} // duplicate
                None => successors.push((a, r)),
            }
        }
        for s in &mut states {
            s.successors.sort_unstable();
        }
        Ok(Dfa {
            alphabet_size,
            initial_state: start,
            states: states.into(),
        })
    }

    // Constructor for algorithm outputs whose parts are valid by
    // construction; skips the validation of `new`.
    pub(crate) fn from_parts(
        num_states: u32,
        alphabet_size: u32,
        start: u32,
        finals: impl IntoIterator<Item = u32>,
        transitions: impl IntoIterator<Item = (u32, u32, u32)>,
    ) -> Dfa {
        let mut states: Vec<State> = (0..num_states)
            .map(|_| State {
                is_final: false,
                successors: Vec::new(),
            })
            .collect();
        for f in finals {
            states[f as usize].is_final = true;
        }
        for (q, a, r) in transitions {
            states[q as usize].successors.push((a, r));
        }
        for s in &mut states {
            s.successors.sort_unstable();
        }
        Dfa {
            alphabet_size,
            initial_state: start,
            states: states.into(),
        }
    }

    /// Number of states
    pub fn num_states(&self) -> u32 {
        self.states.len() as u32
    }

    /// Alphabet size
    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Index of the start state
    pub fn initial_state(&self) -> u32 {
        self.initial_state
    }

    /// Check whether state q is accepting
    /// - panics if q is out of range
    pub fn is_final(&self, q: u32) -> bool {
        self.states[q as usize].is_final
    }

    /// Number of accepting states
    pub fn num_final_states(&self) -> u32 {
        self.states.iter().filter(|s| s.is_final).count() as u32
    }

    /// Iterator over the accepting states
    pub fn final_states(&self) -> impl Iterator<Item = u32> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_final)
            .map(|(q, _)| q as u32)
    }

    ///
    /// Successor of state q on symbol a
    /// - returns None if the transition is undefined
    /// - panics if q is out of range
    ///
    pub fn next(&self, q: u32, a: u32) -> Option<u32> {
        let successors = &self.states[q as usize].successors;
        successors
            .binary_search_by_key(&a, |&(b, _)| b)
            .ok()
            .map(|i| successors[i].1)
    }

    /// Symbols on which state q has a defined transition, in ascending order
    pub fn defined_symbols(&self, q: u32) -> impl Iterator<Item = u32> + '_ {
        self.states[q as usize].successors.iter().map(|&(a, _)| a)
    }

    /// (symbol, target) transitions of state q, in ascending symbol order
    pub fn successors(&self, q: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.states[q as usize].successors.iter().copied()
    }

    /// Iterator over all transitions as (source, symbol, target) triples
    pub fn transitions(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.states.iter().enumerate().flat_map(|(q, s)| {
            s.successors.iter().map(move |&(a, r)| (q as u32, a, r))
        })
    }

    /// Number of defined transitions
    pub fn num_transitions(&self) -> usize {
        self.states.iter().map(|s| s.successors.len()).sum()
    }

    ///
    /// Check whether a word is accepted
    /// - an undefined transition rejects the word
    ///
    pub fn accepts(&self, word: &[u32]) -> bool {
        let mut q = Some(self.initial_state);
        for &a in word {
            q = q.and_then(|s| self.next(s, a));
        }
        match q {
            Some(s) => self.is_final(s),
            None => false,
        }
    }

    ///
    /// Remove unreachable and dead states
    ///
    /// A state survives iff it is reachable from the start state and some
    /// accepting state is reachable from it. Transitions are restricted to
    /// survivor-to-survivor edges. The start state is always kept so that
    /// the result is a well-formed automaton: if no accepting state is
    /// reachable at all, the result is the single-state automaton whose
    /// start state is dead (the automaton of the empty language).
    ///
    /// Trimming preserves the recognized language and is idempotent.
    ///
    pub fn trim(&self) -> Dfa {
        let n = self.num_states() as usize;
        let start = self.initial_state;

        // forward pass: states reachable from the start state
        let mut reachable = vec![false; n];
        let mut queue = VecDeque::new();
        reachable[start as usize] = true;
        queue.push_back(start);
        while let Some(q) = queue.pop_front() {
            for &(_, r) in &self.states[q as usize].successors {
                if !reachable[r as usize] {
                    reachable[r as usize] = true;
                    queue.push_back(r);
                }
            }
        }

        // backward pass over the inverse transition relation:
        // states that can reach an accepting state
        let mut inverse: Vec<Vec<u32>> = vec![Vec::new(); n];
        for (q, _, r) in self.transitions() {
            inverse[r as usize].push(q);
        }
        let mut productive = vec![false; n];
        for f in self.final_states() {
            productive[f as usize] = true;
            queue.push_back(f);
        }
        while let Some(r) = queue.pop_front() {
            for &q in &inverse[r as usize] {
                if !productive[q as usize] {
                    productive[q as usize] = true;
                    queue.push_back(q);
                }
            }
        }

        let mut keep: Vec<bool> = (0..n).map(|q| reachable[q] && productive[q]).collect();
        keep[start as usize] = true;

        // renumber survivors in increasing order of old id
        let mut new_id = vec![u32::MAX; n];
        let mut count = 0;
        for q in 0..n {
            if keep[q] {
                new_id[q] = count;
                count += 1;
            }
        }

        let mut states = Vec::with_capacity(count as usize);
        for q in 0..n {
            if !keep[q] {
                continue;
            }
            let old = &self.states[q];
            let successors = old
                .successors
                .iter()
                .filter(|&&(_, r)| keep[r as usize])
                .map(|&(a, r)| (a, new_id[r as usize]))
                .collect();
            // a kept final state is necessarily a survivor
            states.push(State {
                is_final: old.is_final,
                successors,
            });
        }
        Dfa {
            alphabet_size: self.alphabet_size,
            initial_state: new_id[start as usize],
            states: states.into(),
        }
    }

    ///
    /// Total closure of the automaton
    ///
    /// Adds an explicit non-accepting sink state and directs every
    /// undefined (state, symbol) pair to it. If the transition function is
    /// already total, the automaton is returned unchanged. The result
    /// accepts the same language.
    ///
    pub fn complete(&self) -> Dfa {
        let n = self.num_states();
        let total = self
            .states
            .iter()
            .all(|s| s.successors.len() as u32 == self.alphabet_size);
        if total {
            return self.clone();
        }

        let sink = n;
        let mut states: Vec<State> = self.states.to_vec();
        for s in &mut states {
            let mut successors = Vec::with_capacity(self.alphabet_size as usize);
            let mut defined = s.successors.iter().copied().peekable();
            for a in 0..self.alphabet_size {
                match defined.peek() {
                    Some(&(b, r)) if b == a => {
                        successors.push((a, r));
                        defined.next();
                    }
                    _ => successors.push((a, sink)),
                }
            }
            s.successors = successors;
        }
        states.push(State {
            is_final: false,
            successors: (0..self.alphabet_size).map(|a| (a, sink)).collect(),
        });
        Dfa {
            alphabet_size: self.alphabet_size,
            initial_state: self.initial_state,
            states: states.into(),
        }
    }

    ///
    /// Generalized product of two automata
    ///
    /// The states of the result represent pairs (q, r) of states of `self`
    /// and `other`; a pair state is accepting iff `f(q accepting, r
    /// accepting)` holds. Partial transitions and alphabet-size mismatches
    /// are handled by pairing against a virtual non-accepting sink, so the
    /// combiner sees `false` for a side that has fallen off its defined
    /// transitions.
    ///
    /// Instantiating `f` with and/or/and-not yields the intersection, union,
    /// and difference automata.
    ///
    pub fn product<F>(&self, other: &Dfa, f: F) -> Dfa
    where
        F: Fn(bool, bool) -> bool,
    {
        let sigma = self.alphabet_size.max(other.alphabet_size);

        // product states are pairs of Option<state>; None is the sink side
        let mut ids: HashMap<(Option<u32>, Option<u32>), u32> = HashMap::new();
        let mut pairs = vec![(Some(self.initial_state), Some(other.initial_state))];
        ids.insert(pairs[0], 0);

        let mut transitions = Vec::new();
        let mut index = 0;
        while index < pairs.len() {
            let (p, q) = pairs[index];
            let source = index as u32;
            index += 1;
            for a in 0..sigma {
                let p2 = p.and_then(|s| self.next(s, a));
                let q2 = q.and_then(|s| other.next(s, a));
                let target = match ids.get(&(p2, q2)) {
                    Some(&t) => t,
                    None => {
                        let t = pairs.len() as u32;
                        ids.insert((p2, q2), t);
                        pairs.push((p2, q2));
                        t
                    }
                };
                transitions.push((source, a, target));
            }
        }

        let mut states: Vec<State> = pairs
            .iter()
            .map(|&(p, q)| State {
                is_final: f(
                    p.map_or(false, |s| self.is_final(s)),
                    q.map_or(false, |s| other.is_final(s)),
                ),
                successors: Vec::new(),
            })
            .collect();
        for (q, a, r) in transitions {
            states[q as usize].successors.push((a, r));
        }
        Dfa {
            alphabet_size: sigma,
            initial_state: 0,
            states: states.into(),
        }
    }

    ///
    /// Minimize the automaton
    ///
    /// Returns the unique automaton, up to state renaming, with the fewest
    /// states that recognizes the same language. Uses Valmari's partition
    /// refinement over states and transitions, which works directly on
    /// partial automata and runs in O(n + m log n) time for n states and m
    /// defined transitions. The input is trimmed first; the result contains
    /// only live, reachable states.
    ///
    pub fn minimize(&self) -> Dfa {
        minimizer::minimize(self)
    }

    ///
    /// Check whether two automata are identical up to a renaming of states
    ///
    /// Isomorphism is a structural notion over the full declared state set,
    /// not just the live part: an automaton with unreachable states is not
    /// isomorphic to its trimmed version. Callers who want "isomorphic
    /// after discarding dead states" must [trim](Self::trim) both sides
    /// first.
    ///
    pub fn isomorphic(&self, other: &Dfa) -> bool {
        self.isomorphism(other).is_some()
    }

    ///
    /// Compute a state-renaming bijection witnessing isomorphism
    ///
    /// Returns `map` such that `map[q]` is the state of `other`
    /// corresponding to state q of `self`, or None if the automata are not
    /// isomorphic. See [isomorphic](Self::isomorphic) for the treatment of
    /// unreachable states.
    ///
    pub fn isomorphism(&self, other: &Dfa) -> Option<Box<[u32]>> {
        isomorphism::isomorphism(self, other)
    }

    ///
    /// Check language equivalence with another deterministic automaton
    ///
    /// Equivalence is independent of internal structure and state count.
    /// Partial transitions behave as transitions to a virtual non-accepting
    /// absorbing state, so an automaton is always equivalent to its
    /// [total closure](Self::complete).
    ///
    pub fn equivalent(&self, other: &Dfa) -> bool {
        self.distinguishing_word(other).is_none()
    }

    ///
    /// Find a shortest word accepted by exactly one of the two automata
    ///
    /// Returns None iff the automata are language-equivalent.
    ///
    pub fn distinguishing_word(&self, other: &Dfa) -> Option<Vec<u32>> {
        equivalence::dfa_distinguishing_word(self, other)
    }
}

impl Nfa {
    ///
    /// Construct a nondeterministic automaton
    ///
    /// - `transitions`: triples (source, symbol, target); a (source, symbol)
    ///   pair may appear any number of times with different targets
    /// - `epsilon`: pairs (source, target) of epsilon moves
    ///
    /// # Errors
    ///
    /// Fails with [Error::MalformedAutomaton] under the same conditions as
    /// [Dfa::new], minus the determinism check.
    ///
    pub fn new(
        num_states: u32,
        alphabet_size: u32,
        start: u32,
        finals: &[u32],
        transitions: &[(u32, u32, u32)],
        epsilon: &[(u32, u32)],
    ) -> Result<Nfa, Error> {
        if start >= num_states {
            return Err(MalformedAutomaton::UndeclaredStart(start).into());
        }
        let mut states: Vec<NState> = (0..num_states)
            .map(|_| NState {
                is_final: false,
                moves: Vec::new(),
                epsilon: Vec::new(),
            })
            .collect();
        for &f in finals {
            if f >= num_states {
                return Err(MalformedAutomaton::UndeclaredFinal(f).into());
            }
            states[f as usize].is_final = true;
        }
        for &(q, a, r) in transitions {
            check_state(q, num_states)?;
            check_state(r, num_states)?;
            check_symbol(a, alphabet_size)?;
            let moves = &mut states[q as usize].moves;
            match moves.iter_mut().find(|(b, _)| *b == a) {
                Some((_, targets)) => targets.push(r),
                None => moves.push((a, vec![r])),
            }
        }
        for &(q, r) in epsilon {
            check_state(q, num_states)?;
            check_state(r, num_states)?;
            states[q as usize].epsilon.push(r);
        }
        for s in &mut states {
            s.moves.sort_unstable_by_key(|&(a, _)| a);
            for (_, targets) in &mut s.moves {
                targets.sort_unstable();
                targets.dedup();
            }
            s.epsilon.sort_unstable();
            s.epsilon.dedup();
        }
        Ok(Nfa {
            alphabet_size,
            initial_state: start,
            states: states.into(),
        })
    }

    /// Number of states
    pub fn num_states(&self) -> u32 {
        self.states.len() as u32
    }

    /// Alphabet size
    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Index of the start state
    pub fn initial_state(&self) -> u32 {
        self.initial_state
    }

    /// Check whether state q is accepting
    /// - panics if q is out of range
    pub fn is_final(&self, q: u32) -> bool {
        self.states[q as usize].is_final
    }

    /// Number of accepting states
    pub fn num_final_states(&self) -> u32 {
        self.states.iter().filter(|s| s.is_final).count() as u32
    }

    ///
    /// Successors of state q on symbol a, in ascending order
    /// - returns the empty slice if there is no transition
    /// - panics if q is out of range
    ///
    pub fn next(&self, q: u32, a: u32) -> &[u32] {
        let moves = &self.states[q as usize].moves;
        match moves.binary_search_by_key(&a, |&(b, _)| b) {
            Ok(i) => &moves[i].1,
            Err(_) => NO_STATES,
        }
    }

    /// Epsilon successors of state q, in ascending order
    pub fn epsilon(&self, q: u32) -> &[u32] {
        &self.states[q as usize].epsilon
    }

    ///
    /// Check whether a word is accepted
    ///
    pub fn accepts(&self, word: &[u32]) -> bool {
        let mut current = self.start_set();
        for &a in word {
            current = self.step_set(&current, a);
        }
        self.set_accepting(&current)
    }

    ///
    /// Remove unreachable and dead states
    ///
    /// Same contract as [Dfa::trim]: a state survives iff it is reachable
    /// from the start state and can reach an accepting state, following
    /// both labeled and epsilon moves; the start state is always kept.
    ///
    pub fn trim(&self) -> Nfa {
        let n = self.num_states() as usize;
        let start = self.initial_state;

        let mut reachable = vec![false; n];
        let mut queue = VecDeque::new();
        reachable[start as usize] = true;
        queue.push_back(start);
        while let Some(q) = queue.pop_front() {
            let s = &self.states[q as usize];
            let targets = s
                .moves
                .iter()
                .flat_map(|(_, ts)| ts.iter())
                .chain(s.epsilon.iter());
            for &r in targets {
                if !reachable[r as usize] {
                    reachable[r as usize] = true;
                    queue.push_back(r);
                }
            }
        }

        let mut inverse: Vec<Vec<u32>> = vec![Vec::new(); n];
        for (q, s) in self.states.iter().enumerate() {
            for (_, targets) in &s.moves {
                for &r in targets {
                    inverse[r as usize].push(q as u32);
                }
            }
            for &r in &s.epsilon {
                inverse[r as usize].push(q as u32);
            }
        }
        let mut productive = vec![false; n];
        for (q, s) in self.states.iter().enumerate() {
            if s.is_final {
                productive[q] = true;
                queue.push_back(q as u32);
            }
        }
        while let Some(r) = queue.pop_front() {
            for &q in &inverse[r as usize] {
                if !productive[q as usize] {
                    productive[q as usize] = true;
                    queue.push_back(q);
                }
            }
        }

        let mut keep: Vec<bool> = (0..n).map(|q| reachable[q] && productive[q]).collect();
        keep[start as usize] = true;

        let mut new_id = vec![u32::MAX; n];
        let mut count = 0u32;
        for q in 0..n {
            if keep[q] {
                new_id[q] = count;
                count += 1;
            }
        }

        let mut states = Vec::with_capacity(count as usize);
        for q in 0..n {
            if !keep[q] {
                continue;
            }
            let old = &self.states[q];
            let moves = old
                .moves
                .iter()
                .filter_map(|(a, targets)| {
                    let kept: Vec<u32> = targets
                        .iter()
                        .filter(|&&r| keep[r as usize])
                        .map(|&r| new_id[r as usize])
                        .collect();
                    if kept.is_empty() {
                        None
                    } else {
                        Some((*a, kept))
                    }
                })
                .collect();
            let epsilon = old
                .epsilon
                .iter()
                .filter(|&&r| keep[r as usize])
                .map(|&r| new_id[r as usize])
                .collect();
            states.push(NState {
                is_final: old.is_final,
                moves,
                epsilon,
            });
        }
        Nfa {
            alphabet_size: self.alphabet_size,
            initial_state: new_id[start as usize],
            states: states.into(),
        }
    }

    ///
    /// Check language equivalence with another nondeterministic automaton
    ///
    /// Uses a bisimulation-up-to-congruence search over sets of states;
    /// the full deterministic closure is never built. Sound and complete,
    /// but with no polynomial worst-case bound (the problem is
    /// PSPACE-complete in general).
    ///
    pub fn equivalent(&self, other: &Nfa) -> bool {
        equivalence::set_equivalence(
            equivalence::SetView::Nondet(self),
            equivalence::SetView::Nondet(other),
        )
    }

    // The epsilon-closed set of states the automaton starts in.
    pub(crate) fn start_set(&self) -> BitSet {
        let mut set = BitSet::new();
        set.insert(self.initial_state as usize);
        self.epsilon_close(&mut set);
        set
    }

    // Close a set of states under epsilon moves.
    pub(crate) fn epsilon_close(&self, set: &mut BitSet) {
        let mut stack: Vec<u32> = set.iter().map(|q| q as u32).collect();
        while let Some(q) = stack.pop() {
            for &r in self.epsilon(q) {
                if set.insert(r as usize) {
                    stack.push(r);
                }
            }
        }
    }

    // The epsilon-closed set of successors of a set of states on symbol a.
    pub(crate) fn step_set(&self, set: &BitSet, a: u32) -> BitSet {
        let mut next = BitSet::new();
        for q in set.iter() {
            for &r in self.next(q as u32, a) {
                next.insert(r as usize);
            }
        }
        self.epsilon_close(&mut next);
        next
    }

    // A set of states is accepting iff it contains an accepting state.
    pub(crate) fn set_accepting(&self, set: &BitSet) -> bool {
        set.iter().any(|q| self.states[q].is_final)
    }
}

impl Automaton {
    /// Check whether this is the deterministic variant
    pub fn is_deterministic(&self) -> bool {
        matches!(self, Automaton::Dfa(_))
    }

    /// Number of states
    pub fn num_states(&self) -> u32 {
        match self {
            Automaton::Dfa(d) => d.num_states(),
            Automaton::Nfa(n) => n.num_states(),
        }
    }

    /// Alphabet size
    pub fn alphabet_size(&self) -> u32 {
        match self {
            Automaton::Dfa(d) => d.alphabet_size(),
            Automaton::Nfa(n) => n.alphabet_size(),
        }
    }

    /// Check whether a word is accepted
    pub fn accepts(&self, word: &[u32]) -> bool {
        match self {
            Automaton::Dfa(d) => d.accepts(word),
            Automaton::Nfa(n) => n.accepts(word),
        }
    }

    /// Remove unreachable and dead states (see [Dfa::trim])
    pub fn trim(&self) -> Automaton {
        match self {
            Automaton::Dfa(d) => Automaton::Dfa(d.trim()),
            Automaton::Nfa(n) => Automaton::Nfa(n.trim()),
        }
    }

    ///
    /// Minimize a deterministic automaton (see [Dfa::minimize])
    ///
    /// # Errors
    ///
    /// [Error::UnsupportedAutomatonKind] on the nondeterministic variant.
    ///
    pub fn minimize(&self) -> Result<Automaton, Error> {
        match self {
            Automaton::Dfa(d) => Ok(Automaton::Dfa(d.minimize())),
            Automaton::Nfa(_) => Err(Error::UnsupportedAutomatonKind("minimization")),
        }
    }

    ///
    /// Check whether two deterministic automata are isomorphic
    /// (see [Dfa::isomorphic])
    ///
    /// # Errors
    ///
    /// [Error::UnsupportedAutomatonKind] if either side is
    /// nondeterministic: the simultaneous-traversal construction pairs
    /// unique successors and is only sound for deterministic machines.
    ///
    pub fn isomorphic(&self, other: &Automaton) -> Result<bool, Error> {
        match (self, other) {
            (Automaton::Dfa(a), Automaton::Dfa(b)) => Ok(a.isomorphic(b)),
            _ => Err(Error::UnsupportedAutomatonKind("isomorphism testing")),
        }
    }

    ///
    /// Check language equivalence
    ///
    /// Dispatches on the automaton kinds: the near-linear Hopcroft-Karp
    /// procedure when both sides are deterministic, the
    /// bisimulation-up-to-congruence search over state-sets otherwise.
    ///
    pub fn equivalent(&self, other: &Automaton) -> bool {
        match (self, other) {
            (Automaton::Dfa(a), Automaton::Dfa(b)) => a.equivalent(b),
            _ => equivalence::set_equivalence(
                equivalence::SetView::of(self),
                equivalence::SetView::of(other),
            ),
        }
    }
}

impl Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} states over {} symbols", self.num_states(), self.alphabet_size)?;
        writeln!(f, "initial state: s{}", self.initial_state)?;
        write!(f, "final states:")?;
        for q in self.final_states() {
            write!(f, " s{q}")?;
        }
        writeln!(f)?;
        writeln!(f, "transitions:")?;
        for (q, a, r) in self.transitions() {
            writeln!(f, "  \u{03B4}(s{q}, {a}) = s{r}")?;
        }
        Ok(())
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} states over {} symbols", self.num_states(), self.alphabet_size)?;
        writeln!(f, "initial state: s{}", self.initial_state)?;
        write!(f, "final states:")?;
        for (q, s) in self.states.iter().enumerate() {
            if s.is_final {
                write!(f, " s{q}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "transitions:")?;
        for (q, s) in self.states.iter().enumerate() {
            for (a, targets) in &s.moves {
                for r in targets {
                    writeln!(f, "  \u{03B4}(s{q}, {a}) = s{r}")?;
                }
            }
            for r in &s.epsilon {
                writeln!(f, "  \u{03B4}(s{q}, \u{03B5}) = s{r}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    // a(b*) over {a, b}: accepts "a", "ab", "abb", ...
    fn a_b_star() -> Dfa {
        Dfa::new(2, 2, 0, &[1], &[(0, 0, 1), (1, 1, 1)]).unwrap()
    }

    #[test]
    fn test_constructor_validation() {
        // start state not declared
        let err = Dfa::new(0, 2, 0, &[], &[]).unwrap_err();
        assert_eq!(err, MalformedAutomaton::UndeclaredStart(0).into());

        // final state not declared
        let err = Dfa::new(2, 2, 0, &[5], &[]).unwrap_err();
        assert_eq!(err, MalformedAutomaton::UndeclaredFinal(5).into());

        // dangling transition source
        let err = Dfa::new(2, 2, 0, &[1], &[(7, 0, 1)]).unwrap_err();
        assert_eq!(err, MalformedAutomaton::UndeclaredState(7).into());

        // dangling transition target
        let err = Dfa::new(2, 2, 0, &[1], &[(0, 0, 9)]).unwrap_err();
        assert_eq!(err, MalformedAutomaton::UndeclaredState(9).into());

        // symbol outside the alphabet
        let err = Dfa::new(2, 2, 0, &[1], &[(0, 3, 1)]).unwrap_err();
        assert_eq!(err, MalformedAutomaton::UndeclaredSymbol(3).into());

        // nondeterministic transitions are rejected for DFAs
        let err = Dfa::new(3, 2, 0, &[1], &[(0, 0, 1), (0, 0, 2)]).unwrap_err();
        assert_eq!(err, MalformedAutomaton::ConflictingTransition(0, 0).into());

        // exact duplicates are collapsed
        let dfa = Dfa::new(2, 2, 0, &[1], &[(0, 0, 1), (0, 0, 1)]).unwrap();
        assert_eq!(dfa.num_transitions(), 1);

        // the same checks apply to NFA construction
        let err = Nfa::new(2, 2, 0, &[1], &[], &[(0, 4)]).unwrap_err();
        assert_eq!(err, MalformedAutomaton::UndeclaredState(4).into());

        // but repeated (state, symbol) pairs are fine
        let nfa = Nfa::new(3, 2, 0, &[1], &[(0, 0, 1), (0, 0, 2)], &[]).unwrap();
        assert_eq!(nfa.next(0, 0), &[1, 2]);
    }

    #[test]
    fn test_accepts() {
        let dfa = a_b_star();
        assert!(dfa.accepts(&[0]));
        assert!(dfa.accepts(&[0, 1, 1]));
        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[1]));
        // undefined transition rejects: no a-move from state 1
        assert!(!dfa.accepts(&[0, 0]));
    }

    #[test]
    fn test_trim() {
        // states 3 (unreachable) and 2 (dead) must go
        let dfa = Dfa::new(
            4,
            2,
            0,
            &[1],
            &[(0, 0, 1), (0, 1, 2), (2, 0, 2), (3, 0, 1), (1, 1, 1)],
        )
        .unwrap();
        let trimmed = dfa.trim();
        assert_eq!(trimmed.num_states(), 2);
        assert_eq!(trimmed.num_final_states(), 1);
        // the edge into the dead state is gone
        assert_eq!(trimmed.next(0, 1), None);
        assert_eq!(trimmed.next(0, 0), Some(1));

        // language preserved
        assert!(trimmed.equivalent(&dfa));

        // idempotent
        assert!(trimmed.trim().isomorphic(&trimmed));
    }

    #[test]
    fn test_trim_empty_language() {
        // no accepting state is reachable: everything collapses to the
        // single-state dead automaton
        let dfa = Dfa::new(3, 1, 0, &[2], &[(0, 0, 1), (1, 0, 0)]).unwrap();
        let trimmed = dfa.trim();
        assert_eq!(trimmed.num_states(), 1);
        assert_eq!(trimmed.num_final_states(), 0);
        assert_eq!(trimmed.num_transitions(), 0);
        assert!(trimmed.trim().isomorphic(&trimmed));
    }

    #[test]
    fn test_complete() {
        let dfa = a_b_star();
        let total = dfa.complete();
        assert_eq!(total.num_states(), 3);
        for q in 0..total.num_states() {
            for a in 0..total.alphabet_size() {
                assert!(total.next(q, a).is_some());
            }
        }
        // completing a total automaton changes nothing
        assert_eq!(total.complete().num_states(), 3);
    }

    #[test]
    fn test_product() {
        // L1 = words with at least one 'a' (symbol 0)
        let has_a = Dfa::new(2, 2, 0, &[1], &[(0, 0, 1), (0, 1, 0), (1, 0, 1), (1, 1, 1)])
            .unwrap();
        // L2 = words with at least one 'b' (symbol 1)
        let has_b = Dfa::new(2, 2, 0, &[1], &[(0, 0, 0), (0, 1, 1), (1, 0, 1), (1, 1, 1)])
            .unwrap();

        let both = has_a.product(&has_b, |x, y| x && y);
        assert!(both.accepts(&[0, 1]));
        assert!(both.accepts(&[1, 0]));
        assert!(!both.accepts(&[0, 0]));
        assert!(!both.accepts(&[1]));

        let either = has_a.product(&has_b, |x, y| x || y);
        assert!(either.accepts(&[0]));
        assert!(either.accepts(&[1]));
        assert!(!either.accepts(&[]));

        let only_a = has_a.product(&has_b, |x, y| x && !y);
        assert!(only_a.accepts(&[0, 0]));
        assert!(!only_a.accepts(&[0, 1]));
    }

    #[test]
    fn test_nfa_accepts() {
        // (a|b)*b with an epsilon move into the loop state
        let nfa = Nfa::new(
            3,
            2,
            0,
            &[2],
            &[(1, 0, 1), (1, 1, 1), (1, 1, 2)],
            &[(0, 1)],
        )
        .unwrap();
        assert!(nfa.accepts(&[1]));
        assert!(nfa.accepts(&[0, 0, 1]));
        assert!(!nfa.accepts(&[]));
        assert!(!nfa.accepts(&[1, 0]));
    }

    #[test]
    fn test_nfa_trim() {
        // state 3 is unreachable, state 2 is dead
        let nfa = Nfa::new(
            4,
            1,
            0,
            &[1],
            &[(0, 0, 1), (0, 0, 2), (3, 0, 1)],
            &[(2, 2)],
        )
        .unwrap();
        let trimmed = nfa.trim();
        assert_eq!(trimmed.num_states(), 2);
        assert_eq!(trimmed.next(0, 0), &[1]);
        assert!(trimmed.equivalent(&nfa));
    }

    #[test]
    fn test_automaton_dispatch() {
        let dfa = Automaton::Dfa(a_b_star());
        let nfa = Automaton::Nfa(
            Nfa::new(2, 2, 0, &[1], &[(0, 0, 1), (1, 1, 1)], &[]).unwrap(),
        );

        assert!(dfa.is_deterministic());
        assert!(!nfa.is_deterministic());
        assert!(dfa.accepts(&[0, 1]));
        assert!(nfa.accepts(&[0, 1]));

        // the two recognize the same language, through the set-based path
        assert!(dfa.equivalent(&nfa));

        // trim dispatches on the tag and preserves it
        let untrimmed = Automaton::Dfa(
            Dfa::new(3, 2, 0, &[1], &[(0, 0, 1), (1, 1, 1)]).unwrap(),
        );
        let trimmed = untrimmed.trim();
        assert!(trimmed.is_deterministic());
        assert_eq!(trimmed.num_states(), 2);
        let untrimmed = Automaton::Nfa(
            Nfa::new(3, 2, 0, &[1], &[(0, 0, 1), (1, 1, 1)], &[]).unwrap(),
        );
        let trimmed = untrimmed.trim();
        assert!(!trimmed.is_deterministic());
        assert_eq!(trimmed.num_states(), 2);

        // deterministic-only operations reject the NFA variant
        assert_eq!(
            nfa.minimize().unwrap_err(),
            Error::UnsupportedAutomatonKind("minimization")
        );
        assert_eq!(
            dfa.isomorphic(&nfa).unwrap_err(),
            Error::UnsupportedAutomatonKind("isomorphism testing")
        );
        assert!(dfa.minimize().is_ok());
    }
}
