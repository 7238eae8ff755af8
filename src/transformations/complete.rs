use tracing::debug;

use crate::prelude::*;

/// Completes an automaton by adding a sink state. For every state and every label of the
/// alphabet without an outgoing transition, a transition to the sink is added. The sink is
/// neither initial nor terminal and loops on every label of the alphabet. It is only created if
/// some transition is missing.
///
/// The alphabet has to be given explicitly, use [`SinkComplete::over_own_alphabet`] to complete an
/// automaton with respect to the labels it uses itself.
#[derive(Debug, Clone)]
pub struct SinkComplete<L> {
    alphabet: Option<Alphabet<L>>,
}

impl<L: Label> SinkComplete<L> {
    /// Completes over the given alphabet.
    pub fn new(alphabet: Alphabet<L>) -> Self {
        Self {
            alphabet: Some(alphabet),
        }
    }

    /// Completes over the alphabet of the automaton that is transformed.
    pub fn over_own_alphabet() -> Self {
        Self { alphabet: None }
    }
}

impl<L: Label> UnaryTransformation<L> for SinkComplete<L> {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let mut b = a.clone();
        let alphabet = self.alphabet.clone().unwrap_or_else(|| b.alphabet());
        let mut sink = None;
        for q in b.states() {
            for label in &alphabet {
                if b.delta_on(q, Some(label)).next().is_none() {
                    let hole = *sink.get_or_insert_with(|| b.add_state(false, false));
                    b.connect(q, Some(label.clone()), hole);
                }
            }
        }
        if let Some(hole) = sink {
            for label in &alphabet {
                b.connect(hole, Some(label.clone()), hole);
            }
            debug!("completed automaton with sink state {hole}");
        }
        b
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::abd};

    #[test_log::test]
    fn completion_is_total() {
        let a = abd();
        let alphabet = Alphabet::from(['a', 'b', 'c', 'd']);
        let b = SinkComplete::new(alphabet.clone()).transform(&a);
        assert_eq!(b.size(), a.size() + 1);
        for q in b.states() {
            for l in &alphabet {
                assert!(b.delta_on(q, Some(l)).next().is_some(), "{q} lacks {l}");
            }
        }
        assert!(IsComplete::new(alphabet).test(&b));
        for word in ["a", "bdd", "", "ab", "c", "dd"] {
            assert_eq!(a.accept(word.chars()), b.accept(word.chars()));
        }
    }

    #[test_log::test]
    fn complete_automata_get_no_sink() {
        let mut a = Automaton::new();
        let q = a.add_state(true, true);
        a.add_transition(Transition::new(q, 'a', q)).unwrap();
        let b = SinkComplete::over_own_alphabet().transform(&a);
        assert_eq!(b.size(), 1);
        assert_eq!(b.transition_count(), 1);
    }

    #[test_log::test]
    fn empty_automaton_stays_empty() {
        let b = SinkComplete::new(Alphabet::from(['a'])).transform(&Automaton::new());
        assert!(b.is_void());
    }
}
