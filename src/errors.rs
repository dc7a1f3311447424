// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//!
//! Error codes
//!

use thiserror::Error;

///
/// Errors produced by automaton constructors and analyses
///
/// There is no transient failure mode in this crate: every error is an
/// input or programming error detected eagerly, and no operation ever
/// returns a partial result.
///
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// A structural invariant was violated at construction time.
    ///
    /// The payload names the offending state or symbol.
    #[error("malformed automaton: {0}")]
    MalformedAutomaton(#[from] MalformedAutomaton),

    /// A deterministic-only operation (e.g., minimization) was invoked
    /// on a nondeterministic automaton.
    #[error("unsupported automaton kind: {0} requires a deterministic automaton")]
    UnsupportedAutomatonKind(&'static str),
}

///
/// Structural invariant violations detected by [Dfa::new][crate::automata::Dfa::new]
/// and [Nfa::new][crate::automata::Nfa::new]
///
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MalformedAutomaton {
    /// A transition references a state outside the declared state set.
    #[error("state {0} is not in the declared state set")]
    UndeclaredState(u32),

    /// A transition is labeled with a symbol outside the declared alphabet.
    #[error("symbol {0} is not in the declared alphabet")]
    UndeclaredSymbol(u32),

    /// The start state is not a member of the declared state set.
    #[error("start state {0} is not in the declared state set")]
    UndeclaredStart(u32),

    /// A final state is not a member of the declared state set.
    #[error("final state {0} is not in the declared state set")]
    UndeclaredFinal(u32),

    /// Two transitions from the same state on the same symbol lead to
    /// different targets in a deterministic automaton.
    #[error("conflicting transitions from state {0} on symbol {1}")]
    ConflictingTransition(u32, u32),
}
