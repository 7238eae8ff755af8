use tracing::debug;

use crate::{automaton::show_word, prelude::*};

/// The outcome of a [`ModelCheck`].
#[derive(Debug, Clone)]
pub enum Inclusion<L: Label> {
    /// Every word of the left automaton is accepted by the right one.
    Holds,
    /// Some words of the left automaton are rejected by the right one. The trim automaton
    /// accepting exactly these words is retained as a witness.
    Violated(Automaton<L>),
}

impl<L: Label> Inclusion<L> {
    /// Returns true if the inclusion holds.
    pub fn holds(&self) -> bool {
        matches!(self, Inclusion::Holds)
    }

    /// Returns the automaton of counterexamples, if the inclusion is violated.
    pub fn counterexamples(&self) -> Option<&Automaton<L>> {
        match self {
            Inclusion::Holds => None,
            Inclusion::Violated(witness) => Some(witness),
        }
    }

    /// Returns a shortest counterexample, if the inclusion is violated.
    pub fn counterexample(&self) -> Option<Vec<L>> {
        self.counterexamples().and_then(|w| w.accepted_word())
    }
}

/// Decides language inclusion. [`ModelCheck::test`] holds for `left` and `right` iff every word
/// accepted by `left` is also accepted by `right`.
///
/// The right automaton is complemented relative to the union of both alphabets and intersected
/// with the left one. Using the union is essential, the complement relative to a smaller
/// alphabet would not contain the words using the other labels.
///
/// # Example
/// ```
/// use rationals::prelude::*;
///
/// let ab = Automaton::word("ab".chars());
/// let any_b = Star.transform(&Union.transform(
///     &Automaton::letter('a'),
///     &Automaton::letter('b'),
/// ));
/// assert!(ModelCheck.test(&ab, &any_b));
/// let outcome = ModelCheck.check(&any_b, &ab);
/// assert_eq!(outcome.counterexample(), Some(vec![]));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelCheck;

impl ModelCheck {
    /// Checks whether the language of `left` is contained in the language of `right` and
    /// retains the counterexamples otherwise.
    pub fn check<L: Label>(&self, left: &Automaton<L>, right: &Automaton<L>) -> Inclusion<L> {
        let mut alphabet = left.alphabet();
        alphabet.extend(right.alphabet());
        let complement = Complement::new(alphabet).transform(right);
        let witness = Pruner.transform(&Intersection.transform(left, &complement));
        if witness.is_void() {
            debug!("language inclusion holds");
            Inclusion::Holds
        } else {
            debug!(
                "language inclusion is violated, e.g. by {}",
                witness
                    .accepted_word()
                    .map(|w| show_word(&w))
                    .unwrap_or_default()
            );
            Inclusion::Violated(witness)
        }
    }
}

impl<L: Label> BinaryTest<L> for ModelCheck {
    fn test(&self, left: &Automaton<L>, right: &Automaton<L>) -> bool {
        self.check(left, right).holds()
    }
}
