use tracing::trace;

use crate::{minimization::Partition, prelude::*};

/// Builds the automaton that has one state for every class of `partition`, which has to be stable
/// with respect to the transitions of `dfa`. The classes are numbered in the order of their smallest
/// member, so the class of state `0` becomes state `0`. Transitions, acceptance and the initial state
/// are taken from the representatives of the classes.
///
/// Returns the compressed automaton together with the mapping that sends every state of `dfa` to the
/// state of the compressed automaton that its class became. Dead states are not eliminated here.
pub fn compress(
    dfa: &Dfa,
    partition: &mut Partition,
) -> Result<(Dfa, Vec<StateIndex>), MinimizationError> {
    if partition.len() != dfa.size() {
        return Err(MinimizationError::PartitionMismatch {
            partition: partition.len(),
            automaton: dfa.size(),
        });
    }

    let mut compressed: Vec<Option<StateIndex>> = vec![None; dfa.size()];
    let mut representatives = Vec::new();
    for q in dfa.states() {
        let rep = partition.try_find(q)?;
        debug_assert!(partition.is_representative(rep));
        if compressed[rep].is_none() {
            trace!("{} -> {}", rep, representatives.len());
            compressed[rep] = Some(representatives.len());
            representatives.push(rep);
        }
    }

    let mut new_id = |q: StateIndex| -> Result<StateIndex, MinimizationError> {
        let rep = partition.try_find(q)?;
        compressed[rep].ok_or(MinimizationError::UnassignedClass(q))
    };

    let mut transitions = Vec::with_capacity(representatives.len() * dfa.alphabet_size());
    let mut accepting = Vec::with_capacity(representatives.len());
    for &rep in &representatives {
        for target in dfa.row(rep) {
            transitions.push(match target {
                Some(t) => Some(new_id(*t)?),
                None => None,
            });
        }
        accepting.push(dfa.is_accepting(rep));
    }
    let initial = new_id(dfa.initial())?;

    let mapping = dfa.states().map(&mut new_id).collect::<Result<Vec<_>, _>>()?;

    Ok((
        Dfa::from_parts(dfa.alphabet().to_vec(), transitions, initial, accepting),
        mapping,
    ))
}
