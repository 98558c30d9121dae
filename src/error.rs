#![allow(missing_docs)]

use thiserror::Error;

use crate::automaton::{StateIndex, SymbolIndex};

/// Violations of the contract that a [`Dfa`](crate::automaton::Dfa) has to satisfy. These are
/// detected when an automaton is constructed, so that minimization never operates on malformed data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AutomatonError {
    #[error("an automaton needs at least one state")]
    NoStates,
    #[error("the alphabet needs at least one symbol")]
    EmptyAlphabet,
    #[error("number of {what} ({count}) too large, the configured maximum is {limit}")]
    LimitExceeded {
        what: &'static str,
        count: usize,
        limit: usize,
    },
    #[error("symbol {0:?} occurs more than once in the alphabet")]
    DuplicateSymbol(char),
    #[error("symbol {0:?} is not part of the alphabet")]
    UnknownSymbol(char),
    #[error("state {state} has {found} transitions, but the alphabet has {expected} symbols")]
    RowWidth {
        state: StateIndex,
        found: usize,
        expected: usize,
    },
    #[error("transition from state {state} on symbol {symbol} leads to state {target}, which is out of range")]
    TargetOutOfRange {
        state: StateIndex,
        symbol: SymbolIndex,
        target: StateIndex,
    },
    #[error("state ({0}) out of range")]
    StateOutOfRange(StateIndex),
    #[error("state {state} has two different transitions on symbol {symbol:?}")]
    Nondeterministic { state: StateIndex, symbol: char },
    #[error("accept state ({0}) out of range")]
    AcceptOutOfRange(StateIndex),
}

/// Errors that occur while reading an automaton from its textual transition table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("input must begin with no_of_states alphabet_size")]
    MissingHeader,
    #[error("nonsensible number of {what} ({count})")]
    Nonsensible { what: &'static str, count: i64 },
    #[error("bad input while reading alphabet")]
    BadAlphabet,
    #[error("bad input while reading states, expected transition {position} but found {found:?}")]
    BadState {
        position: usize,
        found: Option<String>,
    },
    #[error("accept state {0:?} is not a state number")]
    BadAcceptState(String),
    #[error(transparent)]
    Automaton(#[from] AutomatonError),
}

/// Internal inconsistencies detected while minimizing. These can only be caused by feeding
/// structures into each other that belong to different automata.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MinimizationError {
    #[error("element {element} is out of range for a union-find structure over {len} elements")]
    ElementOutOfRange { element: usize, len: usize },
    #[error("partition covers {partition} states, but the automaton has {automaton}")]
    PartitionMismatch { partition: usize, automaton: usize },
    #[error("state {0} belongs to a class that has not been assigned a compressed state")]
    UnassignedClass(StateIndex),
}
