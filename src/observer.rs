use tracing::{debug, trace};

use crate::{automaton::StateIndex, Show};

/// The reason for which a state has been marked dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeadReason {
    /// The state can not be reached from the initial state.
    Unreachable,
    /// No accepting state can be reached from the state.
    Unproductive,
}

/// Receives notifications at the checkpoints of a minimization run. All methods do nothing by
/// default, so an implementation only needs to override the checkpoints it is interested in.
///
/// `()` is the observer that ignores everything, [`TracingObserver`] turns every checkpoint into a
/// [`tracing`] event.
pub trait MinimizationObserver {
    /// Called at the start of the refinement pass with number `pass` (counting from zero),
    /// `classes` is the number of classes the partition has at that point.
    fn pass_started(&mut self, pass: usize, classes: usize) {
        let _ = (pass, classes);
    }

    /// Called when the states of `class` are split into the given `parts`.
    fn class_split(&mut self, class: &[StateIndex], parts: &[Vec<StateIndex>]) {
        let _ = (class, parts);
    }

    /// Called when refinement has reached its fixpoint after `passes` passes with `classes` classes.
    fn refinement_finished(&mut self, passes: usize, classes: usize) {
        let _ = (passes, classes);
    }

    /// Called when `state` is marked dead.
    fn dead_state(&mut self, state: StateIndex, reason: DeadReason) {
        let _ = (state, reason);
    }
}

impl MinimizationObserver for () {}

impl<O: MinimizationObserver + ?Sized> MinimizationObserver for &mut O {
    fn pass_started(&mut self, pass: usize, classes: usize) {
        (**self).pass_started(pass, classes)
    }

    fn class_split(&mut self, class: &[StateIndex], parts: &[Vec<StateIndex>]) {
        (**self).class_split(class, parts)
    }

    fn refinement_finished(&mut self, passes: usize, classes: usize) {
        (**self).refinement_finished(passes, classes)
    }

    fn dead_state(&mut self, state: StateIndex, reason: DeadReason) {
        (**self).dead_state(state, reason)
    }
}

/// Observer that emits a [`tracing`] event for every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl MinimizationObserver for TracingObserver {
    fn pass_started(&mut self, pass: usize, classes: usize) {
        trace!("starting refinement pass {pass} with {classes} classes");
    }

    fn class_split(&mut self, class: &[StateIndex], parts: &[Vec<StateIndex>]) {
        trace!("splitting class {} into {}", class.show(), parts.show());
    }

    fn refinement_finished(&mut self, passes: usize, classes: usize) {
        debug!("partition stable after {passes} passes with {classes} classes");
    }

    fn dead_state(&mut self, state: StateIndex, reason: DeadReason) {
        trace!("marking state {state} dead, it is {reason:?}");
    }
}
