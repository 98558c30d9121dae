use tracing::trace;

use crate::{math::UnionFind, observer::MinimizationObserver, prelude::*};

/// A partition of the states of a [`Dfa`] into classes, backed by a [`UnionFind`] forest over the
/// state indices. Refinement only ever splits classes.
///
/// Two states remain in the same class after a refinement pass precisely if on every symbol, their
/// targets were in the same class at the start of the pass (or both have no transition). Repeating
/// this until nothing changes yields the coarsest partition that is consistent with the transitions,
/// i.e. two states end up in the same class if and only if they can not be distinguished by any word.
#[derive(Debug, Clone)]
pub struct Partition {
    forest: UnionFind,
    passes: usize,
}

impl Partition {
    /// Creates the initial partition which consists of two classes, one containing the accepting and
    /// one containing all other states. A class that would be empty is omitted.
    pub fn init_partitions(dfa: &Dfa) -> Self {
        let mut forest = UnionFind::new(dfa.size());
        let mut accept_rep = None;
        let mut others_rep = None;

        for q in dfa.states() {
            let rep = if dfa.is_accepting(q) {
                &mut accept_rep
            } else {
                &mut others_rep
            };
            if let Some(r) = *rep {
                forest.union(r, q);
            } else {
                *rep = Some(q);
            }
        }

        Self { forest, passes: 0 }
    }

    /// Returns the number of states that are partitioned.
    pub fn len(&self) -> usize {
        self.forest.len()
    }

    /// Returns `true` if no states are partitioned.
    pub fn is_empty(&self) -> bool {
        self.forest.is_empty()
    }

    /// Returns the number of refinement passes that have been made so far, including the last one
    /// which did not change anything.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Returns the representative of the class of `state`.
    pub fn find(&mut self, state: StateIndex) -> StateIndex {
        self.forest.find(state)
    }

    /// Returns the representative of the class of `state`, or an error if `state` is out of range.
    pub fn try_find(&mut self, state: StateIndex) -> Result<StateIndex, MinimizationError> {
        self.forest.try_find(state)
    }

    /// Returns `true` if `state` is the representative of its class.
    pub fn is_representative(&self, state: StateIndex) -> bool {
        self.forest.is_representative(state)
    }

    /// Returns the number of classes.
    pub fn class_count(&self) -> usize {
        self.forest.class_count()
    }

    /// Returns the classes with their members in ascending order, the classes are ordered by their
    /// smallest member.
    pub fn classes(&mut self) -> Vec<Vec<StateIndex>> {
        self.forest.classes()
    }

    /// Returns the representative of every state.
    fn snapshot(&mut self) -> Vec<StateIndex> {
        (0..self.len()).map(|q| self.forest.find(q)).collect()
    }

    /// Performs one refinement pass and returns `true` if any class was split.
    ///
    /// Every class that exists at the start of the pass is examined. Its members are compared by their
    /// transition signatures, which are computed with respect to the partition as it was at the start
    /// of the pass. If the members of a class have different signatures, the class is split right away,
    /// so classes that are examined later in the same pass already see the finer partition.
    /// As signatures always refer to the partition from the start of the pass, this does not change the
    /// outcome of the pass.
    pub fn refine_one_pass<O: MinimizationObserver>(&mut self, dfa: &Dfa, mut observer: O) -> bool {
        let snapshot = self.snapshot();
        let classes = self.classes();
        observer.pass_started(self.passes, classes.len());
        self.passes += 1;

        let mut updated = false;
        for class in classes.iter().filter(|class| class.len() > 1) {
            let parts = split_class(dfa, class, &snapshot);
            if parts.len() > 1 {
                observer.class_split(class, &parts);
                self.commit_split(&parts);
                updated = true;
            }
        }
        updated
    }

    /// Refines until a pass makes no change and returns the number of passes that were necessary.
    pub fn refine<O: MinimizationObserver>(&mut self, dfa: &Dfa, mut observer: O) -> usize {
        let start = self.passes;
        while self.refine_one_pass(dfa, &mut observer) {}
        observer.refinement_finished(self.passes, self.class_count());
        self.passes - start
    }

    /// Replaces a class by the given parts. Only the members of the class are rewritten, every other
    /// class is kept as it is.
    fn commit_split(&mut self, parts: &[Vec<StateIndex>]) {
        self.forest.reassign(parts);
        trace!(
            "committed split into {} parts, now {} classes",
            parts.len(),
            self.forest.class_count()
        );
    }
}

/// Computes the transition signature of `state`: for every symbol the representative (according to
/// `snapshot`) of the target, or `None` if there is no transition.
fn signature(dfa: &Dfa, state: StateIndex, snapshot: &[StateIndex]) -> Vec<Option<StateIndex>> {
    dfa.row(state)
        .iter()
        .map(|target| target.map(|t| snapshot[t]))
        .collect()
}

/// Splits `class` into groups of members with identical signatures. Members are merged in a scratch
/// [`UnionFind`] over the positions within the class. A member that has already been merged with an
/// earlier one is skipped, as all members with the same signature have been merged alongside it.
fn split_class(dfa: &Dfa, class: &[StateIndex], snapshot: &[StateIndex]) -> Vec<Vec<StateIndex>> {
    let signatures: Vec<_> = class.iter().map(|&q| signature(dfa, q, snapshot)).collect();
    let mut scratch = UnionFind::new(class.len());
    let mut unified = vec![false; class.len()];

    for i in 0..class.len() {
        if unified[i] {
            continue;
        }
        unified[i] = true;
        for j in (i + 1)..class.len() {
            if !unified[j] && signatures[i] == signatures[j] {
                scratch.union(i, j);
                unified[j] = true;
            }
        }
    }

    scratch
        .classes()
        .into_iter()
        .map(|positions| positions.into_iter().map(|i| class[i]).collect())
        .collect()
}
