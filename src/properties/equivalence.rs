use crate::prelude::*;

/// Holds if both automata accept the same language, decided by checking inclusion in both
/// directions with [`ModelCheck`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SameLanguage;

impl<L: Label> BinaryTest<L> for SameLanguage {
    fn test(&self, left: &Automaton<L>, right: &Automaton<L>) -> bool {
        ModelCheck.test(left, right) && ModelCheck.test(right, left)
    }
}

/// Holds if the automata are related by the equivalence relation `R`, see [`Bisimulation`] and
/// [`WeakBisimulation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct AreEquivalent<R> {
    relation: R,
}

impl<R: Relation> AreEquivalent<R> {
    /// Tests for equivalence with respect to `relation`.
    pub fn new(relation: R) -> Self {
        Self { relation }
    }
}

impl<L: Label, R: Relation> BinaryTest<L> for AreEquivalent<R> {
    fn test(&self, left: &Automaton<L>, right: &Automaton<L>) -> bool {
        self.relation.related(left, right)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{abd, cabd, regex},
    };

    #[test_log::test]
    fn mutual_inclusion() {
        assert!(SameLanguage.test(&abd(), &abd()));
        assert!(!SameLanguage.test(&abd(), &cabd()));
        assert!(!SameLanguage.test(&cabd(), &abd()));

        let mut extended = abd();
        let orphan = extended.add_state(false, false);
        let other = extended.add_state(false, true);
        extended
            .add_transition(Transition::new(orphan, 'z', other))
            .unwrap();
        assert!(SameLanguage.test(&abd(), &extended));

        assert!(SameLanguage.test(&regex("(a+b)*"), &regex("(a*b*)*")));
        assert!(SameLanguage.test(&regex("a(ba)*"), &regex("(ab)*a")));
        assert!(!SameLanguage.test(&regex("a(ba)*"), &regex("(ab)*")));
        assert!(SameLanguage.test(&Automaton::<char>::new(), &Automaton::new()));
    }

    #[test_log::test]
    fn language_equivalence_is_coarser_than_bisimulation() {
        let left = regex("ab+ac");
        let right = regex("a(b+c)");
        assert!(SameLanguage.test(&left, &right));
        let bisimilar = AreEquivalent::new(Bisimulation);
        assert!(bisimilar.test(&abd(), &abd()));
        assert!(!bisimilar.test(
            &Automaton::word("ab".chars()),
            &Automaton::word("ac".chars())
        ));
    }
}
