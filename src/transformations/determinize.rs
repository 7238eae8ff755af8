use crate::{prelude::*, transformations::subset::subset_construction};

/// Determinization through the subset construction.
///
/// The result has a single initial state, no epsilon transitions and at most one transition per
/// state and label. It accepts the same language as the input. States of the result correspond
/// to the reachable epsilon-closed sets of states of the input, so the result may be
/// exponentially larger in the worst case.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToDFA;

impl<L: Label> UnaryTransformation<L> for ToDFA {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        subset_construction(a)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{regex, words_up_to},
    };

    #[test_log::test]
    fn determinization_preserves_language() {
        for expression in ["a(b+c)(ab)*", "(a+b)*c", "(a+ab)*(b+1)", "a*b*a*"] {
            let a = regex(expression);
            let dfa = ToDFA.transform(&a);
            assert!(dfa.is_deterministic(), "{expression} yields {dfa:?}");
            for word in words_up_to(&['a', 'b', 'c'], 5) {
                assert_eq!(
                    a.accept(&word),
                    dfa.accept(&word),
                    "{expression} disagrees on {word:?}"
                );
            }
        }
    }

    #[test_log::test]
    fn subset_construction_merges_nondeterminism() {
        let mut a = Automaton::new();
        let q0 = a.add_state(true, false);
        let q1 = a.add_state(false, true);
        a.add_transition(Transition::new(q0, 'a', q0)).unwrap();
        a.add_transition(Transition::new(q0, 'a', q1)).unwrap();
        a.add_transition(Transition::new(q0, 'b', q1)).unwrap();
        a.add_transition(Transition::new(q1, 'b', q1)).unwrap();
        a.add_transition(Transition::new(q1, 'a', q0)).unwrap();

        let dfa = ToDFA.transform(&a);
        assert_eq!(dfa.size(), 3);
        assert!(dfa.is_deterministic());
        assert_eq!(dfa.initials().len(), 1);
    }

    #[test_log::test]
    fn input_is_left_untouched() {
        let a = regex("(a+b)*c");
        let (size, transitions) = (a.size(), a.transition_count());
        let _ = ToDFA.transform(&a);
        assert_eq!(a.size(), size);
        assert_eq!(a.transition_count(), transitions);
    }

    #[test_log::test]
    fn degenerate_inputs() {
        let dfa = ToDFA.transform(&Automaton::<char>::new());
        assert!(IsEmpty.test(&dfa));
        let dfa = ToDFA.transform(&Automaton::<char>::epsilon());
        assert!(dfa.accept("".chars()));
        assert_eq!(dfa.size(), 1);
    }
}
