mod compress;
pub use compress::compress;

mod partition_refinement;
pub use partition_refinement::Partition;

use tracing::debug;

use crate::prelude::*;

/// Sequences the steps of a minimization run: the states are partitioned into accepting and other
/// states, the partition is refined until it is stable, the automaton is compressed to one state
/// per class and finally the dead states of the compressed automaton are marked.
///
/// All working storage is created for a single run and sized to the automaton of that run, so one
/// minimizer may be used for any number of automata. Checkpoints of every run are reported to the
/// observer of type `O`, by default as [`tracing`] events.
///
/// # Example
/// ```
/// use minauto::prelude::*;
///
/// let dfa = DfaBuilder::new("ab")
///     .with_edges([(0, 'a', 1), (0, 'b', 2), (1, 'a', 1), (1, 'b', 2), (2, 'a', 1), (2, 'b', 2)])
///     .with_accepting([1])
///     .into_dfa()
///     .unwrap();
/// let minimized = Minimizer::new().minimize(&dfa).unwrap();
/// assert_eq!(minimized.dfa().size(), 2);
/// assert_eq!(minimized.state_of(2), minimized.state_of(0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Minimizer<O = TracingObserver> {
    observer: O,
}

impl Minimizer {
    /// Creates a minimizer that reports through [`TracingObserver`].
    pub fn new() -> Self {
        Self::default()
    }
}

impl<O: MinimizationObserver> Minimizer<O> {
    /// Creates a minimizer that reports to the given observer.
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Consumes the minimizer and returns its observer.
    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Computes the minimal automaton that accepts the same language as `dfa`. The input is not
    /// modified. The result still contains states for classes that are unreachable or can not reach
    /// an accepting state, but these are marked dead.
    pub fn minimize(&mut self, dfa: &Dfa) -> Result<Minimized, MinimizationError> {
        debug!(
            "minimizing automaton with {} states over {} symbols",
            dfa.size(),
            dfa.alphabet_size()
        );

        let mut partition = Partition::init_partitions(dfa);
        let passes = partition.refine(dfa, &mut self.observer);
        let (mut minimized, mapping) = compress(dfa, &mut partition)?;
        let reachability = find_dead_states(&mut minimized, &mut self.observer);

        debug!(
            "minimized to {} states ({} live) in {passes} passes",
            minimized.size(),
            minimized.live_states().count()
        );
        Ok(Minimized {
            dfa: minimized,
            mapping,
            passes,
            reachability,
        })
    }
}

/// The outcome of a minimization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimized {
    dfa: Dfa,
    mapping: Vec<StateIndex>,
    passes: usize,
    reachability: Reachability,
}

impl Minimized {
    /// Returns the minimized automaton, in which dead states are marked.
    pub fn dfa(&self) -> &Dfa {
        &self.dfa
    }

    /// Consumes `self` and returns the minimized automaton.
    pub fn into_dfa(self) -> Dfa {
        self.dfa
    }

    /// Returns the state of the minimized automaton that `original` (a state of the input) was merged into.
    ///
    /// # Panics
    /// If `original` is not a state of the automaton that was minimized.
    pub fn state_of(&self, original: StateIndex) -> StateIndex {
        self.mapping[original]
    }

    /// Returns the number of refinement passes that were made.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Returns the reachability relation of the minimized automaton, on which the dead states were determined.
    pub fn reachability(&self) -> &Reachability {
        &self.reachability
    }
}

impl Dfa {
    /// Minimizes `self` using partition refinement, see [`Minimizer`].
    pub fn minimize(&self) -> Result<Minimized, MinimizationError> {
        Minimizer::new().minimize(self)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;
    #[cfg(feature = "random")]
    use crate::random::generate_random_dfa_with;

    /// All words over `symbols` symbols of length at most `max_len`.
    fn words(symbols: usize, max_len: usize) -> Vec<Vec<SymbolIndex>> {
        (0..=max_len)
            .flat_map(|len| {
                (0..len)
                    .map(|_| 0..symbols)
                    .multi_cartesian_product()
                    .collect_vec()
            })
            .chain(std::iter::once(vec![]))
            .unique()
            .collect()
    }

    #[cfg(feature = "random")]
    /// Naive table filling: two states are distinguishable if they differ in acceptance or some symbol
    /// leads to distinguishable states. A missing transition is treated as a move into an extra rejecting sink.
    fn distinguishable(dfa: &Dfa) -> Vec<Vec<bool>> {
        let sink = dfa.size();
        let succ = |q: StateIndex, a: SymbolIndex| {
            if q == sink {
                sink
            } else {
                dfa.transition(q, a).unwrap_or(sink)
            }
        };
        let accepting = |q: StateIndex| q != sink && dfa.is_accepting(q);

        let n = dfa.size() + 1;
        let mut table = vec![vec![false; n]; n];
        for p in 0..n {
            for q in 0..n {
                table[p][q] = accepting(p) != accepting(q);
            }
        }
        let mut changed = true;
        while changed {
            changed = false;
            for p in 0..n {
                for q in 0..n {
                    if !table[p][q]
                        && (0..dfa.alphabet_size()).any(|a| table[succ(p, a)][succ(q, a)])
                    {
                        table[p][q] = true;
                        changed = true;
                    }
                }
            }
        }
        table
    }

    #[cfg(feature = "random")]
    /// Number of languages among the states that are reachable and can reach an accepting state.
    fn myhill_nerode_classes(dfa: &Dfa) -> usize {
        let mut analysed = dfa.clone();
        analysed.find_dead_states();
        let table = distinguishable(dfa);
        let mut representatives: Vec<StateIndex> = vec![];
        for q in analysed.live_states() {
            if representatives.iter().all(|&r| table[r][q]) {
                representatives.push(q);
            }
        }
        representatives.len()
    }

    #[test_log::test]
    fn minimizes_example() {
        let dfa = crate::tests::example_dfa();
        let minimized = dfa.minimize().unwrap();
        let min = minimized.dfa();

        assert_eq!(min.size(), 2);
        assert_eq!(min.initial(), 0);
        assert_eq!(minimized.state_of(0), 0);
        assert_eq!(minimized.state_of(2), 0);
        assert_eq!(minimized.state_of(1), 1);
        assert_eq!(min.attribute(0), StateAttribute::Normal);
        assert_eq!(min.attribute(1), StateAttribute::Accept);
        assert_eq!(min.transition(0, 0), Some(1));
        assert_eq!(min.transition(0, 1), Some(0));
        assert_eq!(min.transition(1, 0), Some(1));
        assert_eq!(min.transition(1, 1), Some(0));
        assert_eq!(min.live_states().count(), 2);
        assert_eq!(minimized.passes(), 1);
    }

    #[test]
    fn minimizes_wiki_dfa() {
        let dfa = crate::tests::wiki_dfa();
        let minimized = dfa.minimize().unwrap();
        assert_eq!(minimized.dfa().size(), 3);
        assert_eq!(
            dfa.states().map(|q| minimized.state_of(q)).collect_vec(),
            vec![0, 0, 1, 1, 1, 2]
        );
        // the rejecting sink can not reach an accepting state
        assert_eq!(minimized.dfa().attribute(2), StateAttribute::Dead);
        assert!(!minimized.reachability().reaches(2, 1));
    }

    #[test]
    fn unreachable_state_is_dead() {
        // state 3 mirrors state 1 but is unreachable, states 2 and 4 are unreachable and not equivalent to anything
        let dfa = DfaBuilder::new("ab")
            .with_edges([
                (0, 'a', 1),
                (1, 'b', 0),
                (3, 'b', 0),
                (4, 'a', 4),
                (4, 'b', 1),
            ])
            .with_accepting([1, 3, 4])
            .into_dfa()
            .unwrap();
        let minimized = dfa.minimize().unwrap();
        let min = minimized.dfa();

        assert_eq!(minimized.state_of(3), minimized.state_of(1));
        assert_eq!(min.size(), 4);
        assert_eq!(minimized.state_of(4), 3);
        assert_eq!(min.attribute(minimized.state_of(2)), StateAttribute::Dead);
        assert_eq!(min.attribute(3), StateAttribute::Dead);
        assert_eq!(min.live_states().collect_vec(), vec![0, 1]);
        assert!(!render(min).contains("A3"));
        for word in words(2, 6) {
            assert_eq!(dfa.accepts_symbols(&word), min.accepts_symbols(&word));
        }
    }

    #[test]
    fn empty_language() {
        let dfa = DfaBuilder::new("ab")
            .with_edges([(0, 'a', 1), (1, 'b', 0), (1, 'a', 2)])
            .into_dfa()
            .unwrap();
        let minimized = dfa.minimize().unwrap();
        assert!(minimized.dfa().is_empty_language());
    }

    #[test]
    #[should_panic]
    fn state_of_unknown_state_panics() {
        let minimized = crate::tests::example_dfa().minimize().unwrap();
        minimized.state_of(3);
    }

    #[test]
    fn input_is_not_modified() {
        let dfa = crate::tests::wiki_dfa();
        let copy = dfa.clone();
        let _ = dfa.minimize().unwrap();
        assert_eq!(dfa, copy);
    }

    #[test]
    fn observer_sees_checkpoints() {
        #[derive(Default)]
        struct Counter {
            passes: usize,
            splits: usize,
            finished: Option<(usize, usize)>,
            dead: usize,
        }
        impl MinimizationObserver for Counter {
            fn pass_started(&mut self, _pass: usize, _classes: usize) {
                self.passes += 1;
            }
            fn class_split(&mut self, _class: &[StateIndex], _parts: &[Vec<StateIndex>]) {
                self.splits += 1;
            }
            fn refinement_finished(&mut self, passes: usize, classes: usize) {
                self.finished = Some((passes, classes));
            }
            fn dead_state(&mut self, _state: StateIndex, _reason: DeadReason) {
                self.dead += 1;
            }
        }

        let mut minimizer = Minimizer::with_observer(Counter::default());
        let minimized = minimizer.minimize(&crate::tests::wiki_dfa()).unwrap();
        let counter = minimizer.into_observer();
        assert_eq!(counter.passes, minimized.passes());
        assert_eq!(counter.splits, 1);
        assert_eq!(counter.finished, Some((2, 3)));
        assert_eq!(counter.dead, 1);
    }

    #[cfg(feature = "random")]
    #[test_log::test]
    fn random_language_equivalence() {
        let mut rng = fastrand::Rng::with_seed(1337);
        let words = words(2, 6);
        for round in 0..150 {
            let density = if round % 3 == 0 { 0.6 } else { 1.0 };
            let dfa = generate_random_dfa_with(&mut rng, 2, 1 + round % 10, density);
            let minimized = dfa.minimize().unwrap();
            for word in &words {
                assert_eq!(
                    dfa.accepts_symbols(word),
                    minimized.dfa().accepts_symbols(word),
                    "{dfa:?} on {word:?}"
                );
            }
        }
    }

    #[cfg(feature = "random")]
    #[test]
    fn random_minimality() {
        let mut rng = fastrand::Rng::with_seed(99);
        for round in 0..150 {
            let dfa = generate_random_dfa_with(&mut rng, 1 + round % 3, 1 + round % 12, 1.0);
            let minimized = dfa.minimize().unwrap();
            assert_eq!(
                minimized.dfa().live_states().count(),
                myhill_nerode_classes(&dfa),
                "{dfa:?}"
            );
        }
    }

    #[cfg(feature = "random")]
    #[test]
    fn random_idempotence() {
        let mut rng = fastrand::Rng::with_seed(5);
        for round in 0..150 {
            let density = if round % 2 == 0 { 0.7 } else { 1.0 };
            let dfa = generate_random_dfa_with(&mut rng, 2, 1 + round % 10, density);
            let once = dfa.minimize().unwrap();
            let twice = once.dfa().minimize().unwrap();
            assert_eq!(once.dfa(), twice.dfa());
            assert!(twice.dfa().states().all(|q| twice.state_of(q) == q));
        }
    }
}
