use bit_set::BitSet;
use tracing::debug;

use crate::{
    observer::{DeadReason, MinimizationObserver},
    prelude::*,
};

/// The reflexive and transitive closure of the transition relation of a [`Dfa`]. For every pair of
/// states `p` and `q` it stores whether `q` can be reached from `p` in zero or more steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reachability {
    rows: Vec<BitSet>,
}

impl Reachability {
    /// Computes the closure with Warshall's algorithm, which takes cubic time in the number of states.
    pub fn closure(dfa: &Dfa) -> Self {
        let size = dfa.size();
        let mut rows: Vec<BitSet> = dfa
            .states()
            .map(|q| {
                let mut row = BitSet::with_capacity(size);
                row.insert(q);
                row.extend(dfa.successors(q));
                row
            })
            .collect();

        for via in 0..size {
            let through = rows[via].clone();
            for row in rows.iter_mut() {
                if row.contains(via) {
                    row.union_with(&through);
                }
            }
        }

        Self { rows }
    }

    /// Returns `true` if `to` can be reached from `from`.
    pub fn reaches(&self, from: StateIndex, to: StateIndex) -> bool {
        self.rows[from].contains(to)
    }

    /// Returns all states that can be reached from `from`, in ascending order.
    pub fn reachable_from(&self, from: StateIndex) -> impl Iterator<Item = StateIndex> + '_ {
        self.rows[from].iter()
    }
}

/// Marks every state of `dfa` dead that is unreachable from the initial state or from which no
/// accepting state can be reached. Marks from earlier runs are cleared first. The states themselves
/// are kept, so indices remain stable. Returns the closure on which the decision was based.
pub fn find_dead_states<O: MinimizationObserver>(dfa: &mut Dfa, mut observer: O) -> Reachability {
    let reachability = Reachability::closure(dfa);
    dfa.clear_dead();

    let initial = dfa.initial();
    for q in dfa.states() {
        if !reachability.reaches(initial, q) {
            observer.dead_state(q, DeadReason::Unreachable);
            dfa.mark_dead(q);
        }
    }

    let accepting: Vec<_> = dfa.accepting_states().collect();
    for q in dfa.states() {
        if matches!(dfa.attribute(q), StateAttribute::Dead | StateAttribute::Accept) {
            continue;
        }
        if !accepting.iter().any(|&a| reachability.reaches(q, a)) {
            observer.dead_state(q, DeadReason::Unproductive);
            dfa.mark_dead(q);
        }
    }

    debug!(
        "{} of {} states are dead",
        dfa.states().filter(|&q| dfa.is_dead(q)).count(),
        dfa.size()
    );
    reachability
}

impl Dfa {
    /// Marks the dead states of `self`, see [`find_dead_states`]. Progress is reported as [`tracing`] events.
    pub fn find_dead_states(&mut self) -> Reachability {
        find_dead_states(self, TracingObserver)
    }
}

#[cfg(test)]
mod tests {
    use crate::{observer::DeadReason, prelude::*};

    #[derive(Default)]
    struct Recorder(Vec<(StateIndex, DeadReason)>);

    impl MinimizationObserver for Recorder {
        fn dead_state(&mut self, state: StateIndex, reason: DeadReason) {
            self.0.push((state, reason));
        }
    }

    #[cfg(feature = "random")]
    fn breadth_first(size: usize, start: &[StateIndex], edges: &[(StateIndex, StateIndex)]) -> Vec<bool> {
        let mut seen = vec![false; size];
        let mut queue: std::collections::VecDeque<_> = start.iter().copied().collect();
        for &q in start {
            seen[q] = true;
        }
        while let Some(p) = queue.pop_front() {
            for &(_, q) in edges.iter().filter(|(o, _)| *o == p) {
                if !seen[q] {
                    seen[q] = true;
                    queue.push_back(q);
                }
            }
        }
        seen
    }

    #[test]
    fn closure_is_reflexive_and_transitive() {
        let dfa = DfaBuilder::new("a")
            .with_edges([(0, 'a', 1), (1, 'a', 2), (3, 'a', 3)])
            .into_dfa()
            .unwrap();
        let closure = Reachability::closure(&dfa);
        for q in dfa.states() {
            assert!(closure.reaches(q, q));
        }
        assert!(closure.reaches(0, 2));
        assert!(!closure.reaches(2, 0));
        assert!(!closure.reaches(0, 3));
        assert_eq!(closure.reachable_from(0).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test_log::test]
    fn unreachable_and_unproductive_states() {
        // 3 is unreachable, 2 is a rejecting sink and 4 is an unreachable accepting state
        let mut dfa = DfaBuilder::new("ab")
            .with_edges([
                (0, 'a', 1),
                (0, 'b', 2),
                (1, 'a', 1),
                (2, 'a', 2),
                (2, 'b', 2),
                (3, 'a', 1),
                (4, 'b', 0),
            ])
            .with_accepting([1, 4])
            .into_dfa()
            .unwrap();
        let mut recorder = Recorder::default();
        find_dead_states(&mut dfa, &mut recorder);
        assert_eq!(
            recorder.0,
            vec![
                (3, DeadReason::Unreachable),
                (4, DeadReason::Unreachable),
                (2, DeadReason::Unproductive)
            ]
        );
        assert_eq!(dfa.live_states().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(dfa.attribute(1), StateAttribute::Accept);
        assert_eq!(dfa.attribute(4), StateAttribute::Dead);
        assert!(!dfa.is_empty_language());
    }

    #[test]
    fn empty_language_marks_everything() {
        let mut dfa = DfaBuilder::new("a")
            .with_edges([(0, 'a', 1), (1, 'a', 0)])
            .into_dfa()
            .unwrap();
        dfa.find_dead_states();
        assert!(dfa.is_empty_language());
        assert_eq!(dfa.live_states().count(), 0);
    }

    #[test]
    fn analysis_clears_previous_marks() {
        let mut dfa = crate::tests::example_dfa();
        dfa.mark_dead(0);
        dfa.find_dead_states();
        assert_eq!(dfa.live_states().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[cfg(feature = "random")]
    #[test]
    fn dead_states_match_search() {
        use crate::random::generate_random_dfa_with;

        let mut rng = fastrand::Rng::with_seed(0xdead);
        for _ in 0..200 {
            let mut dfa = generate_random_dfa_with(&mut rng, 2, 7, 0.7);
            let edges: Vec<_> = dfa
                .states()
                .flat_map(|p| dfa.successors(p).map(move |q| (p, q)).collect::<Vec<_>>())
                .collect();
            let reversed: Vec<_> = edges.iter().map(|&(p, q)| (q, p)).collect();
            let accepting: Vec<_> = dfa.accepting_states().collect();

            let reachable = breadth_first(dfa.size(), &[dfa.initial()], &edges);
            let productive = breadth_first(dfa.size(), &accepting, &reversed);

            dfa.find_dead_states();
            for q in dfa.states() {
                assert_eq!(dfa.is_dead(q), !(reachable[q] && productive[q]));
            }
        }
    }
}
