// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Finite-state automata with partial transition functions
//!
//! # Overview
//!
//! This crate provides canonical, minimal state machines and provable
//! language-equivalence checks for tooling such as lexer generators,
//! symbolic model checkers, and protocol-state verifiers.
//!
//! The [automata](crate::automata) module defines the data model: a
//! deterministic automaton type [Dfa](crate::automata::Dfa) whose transition
//! function may be partial (an undefined transition means implicit rejection;
//! no sink state is ever materialized), a nondeterministic type
//! [Nfa](crate::automata::Nfa) with optional epsilon moves, and the tagged
//! [Automaton](crate::automata::Automaton) variant that dispatches on the
//! automaton kind.
//!
//! Three analyses are supported, all as pure functions over immutable
//! automaton values:
//!
//! - minimization of partial deterministic automata by Valmari's
//!   partition-refinement algorithm (O(n + m log n) for n states and
//!   m transitions),
//! - isomorphism testing (equality up to a state-renaming bijection),
//! - language-equivalence testing: a near-linear Hopcroft-Karp procedure
//!   over state pairs for deterministic automata, generalized to
//!   nondeterministic automata by a bisimulation-up-to-congruence search
//!   over sets of states.
//!
//! Construction of automata from regular expressions or grammars, textual
//! input formats, serialization, and visualization are left to external
//! collaborators; they only need to produce or consume the data model in
//! [automata](crate::automata).
//!

#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod automata;
pub mod errors;

mod disjoint_sets;
mod equivalence;
mod isomorphism;
mod minimizer;
mod partitions;
