//! The textual transition table format. An automaton is described by whitespace separated tokens:
//!
//! ```text
//! NSTATES NAB
//! L1 L2 ... Ln
//! S S ... S
//! .
//! S S ... S
//! A1 A2 ... Am
//! ```
//!
//! `NSTATES` and `NAB` are the number of states and alphabet symbols. They are followed by the
//! `NAB` symbols, each a single non-whitespace character. Then come `NSTATES` rows of `NAB` state
//! numbers each, where the entry in row `i` and column `j` is the state to which state `i` moves on
//! the `j`-th symbol; `-1` (or any negative number) stands for a missing transition. All remaining
//! numbers are accepting states. State `0` is the initial state.
mod input;
pub use input::parse_dfa;

mod output;
pub use output::{render, EMPTY_LANGUAGE};
