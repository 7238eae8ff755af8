use thiserror::Error;

use crate::automaton::State;

/// Errors that are raised when an [`Automaton`](crate::Automaton) is manipulated or run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// The given state is not owned by the automaton, either because it was never added,
    /// because it has been removed or because it belongs to a different automaton.
    #[error("state {0} does not belong to this automaton")]
    NoSuchState(State),
    /// A run could not be continued since no transition is enabled in the current set of states.
    #[error("no transition is enabled after {steps} steps")]
    Stuck {
        /// The number of symbols that were read before getting stuck.
        steps: usize,
    },
}
