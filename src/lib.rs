//! Library for minimizing deterministic finite automata (DFA) in Rust.
//!
//! A [`Dfa`](automaton::Dfa) is given as a transition table: states are numbered `0..n`, every state has at most one
//! outgoing transition per symbol of the alphabet, state `0` is the initial state and some states are accepting. Such
//! tables are typically produced (often redundantly) by lexer generators and need to be compacted before use.
//!
//! Minimization works in the classical way of Aho and Ullman. All states are first split into the accepting and the
//! non-accepting ones. Then classes are refined repeatedly: two states stay in the same class only if on every symbol
//! they move into the same class (or both have no transition). The classes are kept in a [`UnionFind`](math::UnionFind)
//! forest with path compression and weighted union, splits are committed as soon as they are discovered. Once no class
//! splits anymore, the automaton is compressed to one state per class and finally the dead states of the result, i.e.
//! those that are not reachable from the initial state or can not reach an accepting state, are marked via a
//! transitive closure of the transition relation.
//!
//! The most important entry points are
//! - [`automaton::DfaBuilder`] and [`text::parse_dfa`] for creating automata,
//! - [`Dfa::minimize`](automaton::Dfa::minimize) and [`minimization::Minimizer`] for minimizing them,
//! - [`text::render`] for displaying the result as a table.
//!
//! Progress of a minimization run can be followed through a [`MinimizationObserver`](observer::MinimizationObserver), the default one emits
//! [`tracing`] events.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use minauto::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{
            find_dead_states, Dfa, DfaBuilder, Reachability, StateAttribute, StateIndex,
            SymbolIndex,
        },
        config::Limits,
        math::UnionFind,
        minimization::{Minimized, Minimizer, Partition},
        observer::{DeadReason, MinimizationObserver, TracingObserver},
        text::{parse_dfa, render},
        AutomatonError, MinimizationError, ParseError, Show,
    };
}

/// Contains the union-find structure on which partitions of states are built, as well as
/// aliases for the collections used throughout the crate.
pub mod math;

/// Defines deterministic finite automata and the analysis of their dead states.
pub mod automaton;

/// Implements partition refinement and the compression of a DFA into its minimal form.
pub mod minimization;

/// Hooks that allow following a minimization run at defined checkpoints.
pub mod observer;

/// Limits that bound the size of automata which are accepted as input.
pub mod config;

/// Reading automata from their textual transition table and rendering them for humans.
pub mod text;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;

mod error;
pub use error::{AutomatonError, MinimizationError, ParseError};

/// Helper trait which can be used to display states, automata and such.
pub trait Show {
    /// Returns a human readable representation of `self`. For a state attribute this is the
    /// single letter prefix with which states are labeled, for an automaton it is its
    /// transition table.
    fn show(&self) -> String;
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for Option<usize> {
    fn show(&self) -> String {
        match self {
            None => "-".to_string(),
            Some(x) => x.show(),
        }
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        format!(
            "[{}]",
            itertools::Itertools::join(&mut self.iter().map(|x| x.show()), ", ")
        )
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}
