use crate::prelude::*;

/// Holds if the automaton accepts no word at all, which is the case iff no terminal state is
/// reachable from an initial state. The automaton without states is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsEmpty;

impl<L: Label> UnaryTest<L> for IsEmpty {
    fn test(&self, a: &Automaton<L>) -> bool {
        !a.accessible_states().iter().any(|q| a.is_terminal(*q))
    }
}

/// Holds if the automaton accepts the empty word.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContainsEpsilon;

impl<L: Label> UnaryTest<L> for ContainsEpsilon {
    fn test(&self, a: &Automaton<L>) -> bool {
        a.accept(std::iter::empty::<L>())
    }
}

/// Holds if the automaton is deterministic, see [`Automaton::is_deterministic`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IsDeterministic;

impl<L: Label> UnaryTest<L> for IsDeterministic {
    fn test(&self, a: &Automaton<L>) -> bool {
        a.is_deterministic()
    }
}

/// Holds if every state has an outgoing transition for every label of the given alphabet.
#[derive(Debug, Clone)]
pub struct IsComplete<L> {
    alphabet: Alphabet<L>,
}

impl<L: Label> IsComplete<L> {
    /// Checks completeness with respect to `alphabet`.
    pub fn new(alphabet: Alphabet<L>) -> Self {
        Self { alphabet }
    }
}

impl<L: Label> UnaryTest<L> for IsComplete<L> {
    fn test(&self, a: &Automaton<L>) -> bool {
        a.state_iter().all(|q| {
            self.alphabet
                .iter()
                .all(|l| a.delta_on(q, Some(l)).next().is_some())
        })
    }
}
