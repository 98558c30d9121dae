use itertools::Itertools;

use crate::{config::Limits, math::Set, AutomatonError, Show};

mod reachability;
pub use reachability::{find_dead_states, Reachability};

/// Type that is used to index the states of a [`Dfa`]. States are numbered consecutively from zero.
pub type StateIndex = usize;
/// Type that is used to index the symbols of the alphabet of a [`Dfa`].
pub type SymbolIndex = usize;

/// Attribute that is associated with every state of a [`Dfa`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StateAttribute {
    /// The state is accepting.
    Accept,
    /// The state is unreachable from the initial state or can not reach an accepting state.
    Dead,
    /// Any other state.
    #[default]
    Normal,
}

impl Show for StateAttribute {
    fn show(&self) -> String {
        match self {
            StateAttribute::Accept => "A",
            StateAttribute::Dead => "D",
            StateAttribute::Normal => "s",
        }
        .to_string()
    }
}

/// A deterministic finite automaton that is given by its transition table. The states are `0..size`,
/// state `0` is the initial state and for every state and symbol there is at most one transition.
/// A missing transition means that the automaton gets stuck, i.e. the word is rejected.
///
/// Apart from the information on which states are accepting, every state carries a liveness mark,
/// which is set by [`find_dead_states`]. Marking a state dead does not remove it, the transition
/// table is never modified after construction.
///
/// # Example
/// ```
/// use minauto::prelude::*;
///
/// let dfa = DfaBuilder::new("ab")
///     .with_edges([(0, 'a', 1), (1, 'b', 0)])
///     .with_accepting([1])
///     .into_dfa()
///     .unwrap();
/// assert!(dfa.accepts("aba"));
/// assert!(!dfa.accepts("ab"));
/// assert!(!dfa.accepts("b"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Vec<char>,
    transitions: Vec<Option<StateIndex>>,
    initial: StateIndex,
    accepting: Vec<bool>,
    dead: Vec<bool>,
}

impl Dfa {
    /// Builds a new automaton from the given alphabet, the rows of its transition table (one per state,
    /// with one entry per symbol) and the accepting states. The initial state is state `0`.
    /// Returns an error if the automaton violates any of the constraints or exceeds the `limits`.
    pub fn new<A, F>(
        alphabet: A,
        rows: Vec<Vec<Option<StateIndex>>>,
        accepting: F,
        limits: &Limits,
    ) -> Result<Self, AutomatonError>
    where
        A: IntoIterator<Item = char>,
        F: IntoIterator<Item = StateIndex>,
    {
        let alphabet: Vec<char> = alphabet.into_iter().collect();
        limits.check_alphabet(alphabet.len())?;
        let mut seen = Set::default();
        for &sym in &alphabet {
            if !seen.insert(sym) {
                return Err(AutomatonError::DuplicateSymbol(sym));
            }
        }

        let size = rows.len();
        limits.check_states(size)?;

        let mut transitions = Vec::with_capacity(size * alphabet.len());
        for (state, row) in rows.into_iter().enumerate() {
            if row.len() != alphabet.len() {
                return Err(AutomatonError::RowWidth {
                    state,
                    found: row.len(),
                    expected: alphabet.len(),
                });
            }
            for (symbol, target) in row.into_iter().enumerate() {
                if let Some(target) = target {
                    if target >= size {
                        return Err(AutomatonError::TargetOutOfRange {
                            state,
                            symbol,
                            target,
                        });
                    }
                }
                transitions.push(target);
            }
        }

        let mut accepting_states = vec![false; size];
        for q in accepting {
            if q >= size {
                return Err(AutomatonError::AcceptOutOfRange(q));
            }
            accepting_states[q] = true;
        }

        Ok(Self::from_parts(alphabet, transitions, 0, accepting_states))
    }

    /// Assembles an automaton from parts that are already known to be consistent.
    pub(crate) fn from_parts(
        alphabet: Vec<char>,
        transitions: Vec<Option<StateIndex>>,
        initial: StateIndex,
        accepting: Vec<bool>,
    ) -> Self {
        debug_assert_eq!(transitions.len(), accepting.len() * alphabet.len());
        debug_assert!(initial < accepting.len());
        let dead = vec![false; accepting.len()];
        Self {
            alphabet,
            transitions,
            initial,
            accepting,
            dead,
        }
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.accepting.len()
    }

    /// Returns the symbols of the alphabet, in the order in which they index the columns of the
    /// transition table.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Returns the number of symbols in the alphabet.
    pub fn alphabet_size(&self) -> usize {
        self.alphabet.len()
    }

    /// Returns the index of `symbol` in the alphabet, if it is part of it.
    pub fn symbol_index(&self, symbol: char) -> Option<SymbolIndex> {
        self.alphabet.iter().position(|&s| s == symbol)
    }

    /// Returns the initial state.
    pub fn initial(&self) -> StateIndex {
        self.initial
    }

    /// Returns an iterator over all states.
    pub fn states(&self) -> std::ops::Range<StateIndex> {
        0..self.size()
    }

    /// Returns the state that is reached from `state` on `symbol`, or `None` if there is no such transition.
    ///
    /// # Panics
    /// If `state` or `symbol` are out of range.
    pub fn transition(&self, state: StateIndex, symbol: SymbolIndex) -> Option<StateIndex> {
        assert!(
            symbol < self.alphabet_size(),
            "symbol {symbol} out of range for an alphabet of size {}",
            self.alphabet_size()
        );
        self.row(state)[symbol]
    }

    /// Returns the row of the transition table that belongs to `state`, which contains the
    /// target for every symbol.
    ///
    /// # Panics
    /// If `state` is out of range.
    pub fn row(&self, state: StateIndex) -> &[Option<StateIndex>] {
        assert!(
            state < self.size(),
            "state {state} out of range for an automaton with {} states",
            self.size()
        );
        let width = self.alphabet_size();
        &self.transitions[state * width..(state + 1) * width]
    }

    /// Returns an iterator over the states that are the target of some transition from `state`.
    pub fn successors(&self, state: StateIndex) -> impl Iterator<Item = StateIndex> + '_ {
        self.row(state).iter().filter_map(|t| *t)
    }

    /// Returns `true` if `state` is accepting.
    pub fn is_accepting(&self, state: StateIndex) -> bool {
        self.accepting[state]
    }

    /// Returns the accepting states in ascending order.
    pub fn accepting_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.states().filter(|&q| self.accepting[q])
    }

    /// Returns the attribute of `state`. A dead state is reported as dead even if it is accepting.
    pub fn attribute(&self, state: StateIndex) -> StateAttribute {
        if self.dead[state] {
            StateAttribute::Dead
        } else if self.accepting[state] {
            StateAttribute::Accept
        } else {
            StateAttribute::Normal
        }
    }

    /// Returns `true` if `state` has been marked dead.
    pub fn is_dead(&self, state: StateIndex) -> bool {
        self.dead[state]
    }

    pub(crate) fn mark_dead(&mut self, state: StateIndex) {
        self.dead[state] = true;
    }

    pub(crate) fn clear_dead(&mut self) {
        self.dead.iter_mut().for_each(|d| *d = false);
    }

    /// Returns the states that are not marked dead, in ascending order.
    pub fn live_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.states().filter(|&q| !self.dead[q])
    }

    /// Returns `true` if every state is marked dead. After [`find_dead_states`] has been run, this is the
    /// case precisely if the automaton accepts no word.
    pub fn is_empty_language(&self) -> bool {
        self.dead.iter().all(|d| *d)
    }

    /// Runs the sequence of symbol indices `word` from the initial state and returns the reached state,
    /// or `None` if the run gets stuck on a missing transition.
    pub fn run(&self, word: &[SymbolIndex]) -> Option<StateIndex> {
        word.iter()
            .try_fold(self.initial, |q, &sym| self.transition(q, sym))
    }

    /// Returns `true` if the sequence of symbol indices `word` leads from the initial state into an accepting state.
    pub fn accepts_symbols(&self, word: &[SymbolIndex]) -> bool {
        self.run(word).is_some_and(|q| self.is_accepting(q))
    }

    /// Returns `true` if the automaton accepts `word`. Words containing characters that are not part
    /// of the alphabet are rejected.
    pub fn accepts(&self, word: &str) -> bool {
        match word
            .chars()
            .map(|c| self.symbol_index(c))
            .collect::<Option<Vec<_>>>()
        {
            Some(symbols) => self.accepts_symbols(&symbols),
            None => false,
        }
    }
}

impl Show for Dfa {
    fn show(&self) -> String {
        crate::text::render(self)
    }
}

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.show())
    }
}

/// Helper struct for the construction of a [`Dfa`] from a list of edges.
///
/// # Example
/// ```
/// use minauto::prelude::*;
///
/// let dfa = DfaBuilder::new("01")
///     .with_edges([(0, '0', 0), (0, '1', 1), (1, '0', 1), (1, '1', 0)])
///     .with_accepting([0])
///     .into_dfa()
///     .unwrap();
/// assert_eq!(dfa.size(), 2);
/// assert!(dfa.accepts("1001"));
/// ```
#[derive(Debug, Clone)]
pub struct DfaBuilder {
    alphabet: Vec<char>,
    edges: Vec<(StateIndex, char, StateIndex)>,
    accepting: Vec<StateIndex>,
    size: Option<usize>,
    limits: Limits,
}

impl DfaBuilder {
    /// Starts building an automaton over the characters of `alphabet`.
    pub fn new(alphabet: &str) -> Self {
        Self {
            alphabet: alphabet.chars().collect(),
            edges: vec![],
            accepting: vec![],
            size: None,
            limits: Limits::default(),
        }
    }

    /// Adds the given edges, each consisting of origin, symbol and target.
    pub fn with_edges<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (StateIndex, char, StateIndex)>,
    {
        self.edges.extend(edges);
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I: IntoIterator<Item = StateIndex>>(mut self, accepting: I) -> Self {
        self.accepting.extend(accepting);
        self
    }

    /// Fixes the number of states. If this is not called, the automaton has as many states as are
    /// necessary for the largest state that is mentioned.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Replaces the default [`Limits`] against which the automaton is checked.
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Consumes the builder and creates the automaton, which fails if an edge uses a symbol that is
    /// not in the alphabet, if two edges leave the same state on the same symbol for different targets
    /// or if any of the constraints checked by [`Dfa::new`] is violated.
    pub fn into_dfa(self) -> Result<Dfa, AutomatonError> {
        let size = match self.size {
            Some(size) => size,
            None => self
                .edges
                .iter()
                .flat_map(|(p, _, q)| [*p, *q])
                .chain(self.accepting.iter().copied())
                .max()
                .map_or(1, |q| q + 1),
        };
        self.limits.check_states(size)?;
        self.limits.check_alphabet(self.alphabet.len())?;

        let mut rows = vec![vec![None; self.alphabet.len()]; size];
        for &(origin, sym, target) in self.edges.iter().sorted() {
            if origin >= size {
                return Err(AutomatonError::StateOutOfRange(origin));
            }
            let symbol = self
                .alphabet
                .iter()
                .position(|&s| s == sym)
                .ok_or(AutomatonError::UnknownSymbol(sym))?;
            let slot = &mut rows[origin][symbol];
            match *slot {
                Some(existing) if existing != target => {
                    return Err(AutomatonError::Nondeterministic {
                        state: origin,
                        symbol: sym,
                    })
                }
                _ => *slot = Some(target),
            }
        }

        Dfa::new(self.alphabet, rows, self.accepting, &self.limits)
    }
}
