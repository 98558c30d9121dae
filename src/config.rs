use crate::AutomatonError;

/// Upper bounds on the size of automata. All working storage of a minimization run is allocated
/// per run and grows with the number of states (quadratically for the reachability analysis), so
/// inputs above these bounds are rejected as a configuration error instead of being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
    /// The largest number of states an automaton may have.
    pub max_states: usize,
    /// The largest number of symbols an alphabet may have.
    pub max_alphabet: usize,
}

impl Limits {
    /// The default maximal number of states.
    pub const DEFAULT_MAX_STATES: usize = 4096;
    /// The default maximal alphabet size, which is the size of the ASCII character set.
    pub const DEFAULT_MAX_ALPHABET: usize = 128;

    /// Creates limits with the given maximal number of states and symbols.
    pub fn new(max_states: usize, max_alphabet: usize) -> Self {
        Self {
            max_states,
            max_alphabet,
        }
    }

    /// Verifies that `count` states are within the limits.
    pub fn check_states(&self, count: usize) -> Result<(), AutomatonError> {
        if count == 0 {
            return Err(AutomatonError::NoStates);
        }
        if count > self.max_states {
            return Err(AutomatonError::LimitExceeded {
                what: "states",
                count,
                limit: self.max_states,
            });
        }
        Ok(())
    }

    /// Verifies that an alphabet of `count` symbols is within the limits.
    pub fn check_alphabet(&self, count: usize) -> Result<(), AutomatonError> {
        if count == 0 {
            return Err(AutomatonError::EmptyAlphabet);
        }
        if count > self.max_alphabet {
            return Err(AutomatonError::LimitExceeded {
                what: "alphabet symbols",
                count,
                limit: self.max_alphabet,
            });
        }
        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_STATES, Self::DEFAULT_MAX_ALPHABET)
    }
}
