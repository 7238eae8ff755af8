use crate::prelude::*;

/// Computes an automaton accepting exactly the words over a given alphabet that are not accepted
/// by the input.
///
/// The input is determinized, completed with a sink state over the alphabet and then every
/// terminal state becomes non-terminal and vice versa (which makes the sink terminal).
///
/// The alphabet matters: complementing relative to an alphabet that is smaller than the one of
/// the automaton that the result is later compared with silently yields wrong answers. It
/// therefore has to be given explicitly, [`Complement::over_own_alphabet`] is the explicit
/// opt-in to use the labels of the transformed automaton.
#[derive(Debug, Clone)]
pub struct Complement<L> {
    alphabet: Option<Alphabet<L>>,
}

impl<L: Label> Complement<L> {
    /// Complements relative to the given alphabet.
    pub fn new(alphabet: Alphabet<L>) -> Self {
        Self {
            alphabet: Some(alphabet),
        }
    }

    /// Complements relative to the alphabet of the automaton that is transformed.
    pub fn over_own_alphabet() -> Self {
        Self { alphabet: None }
    }
}

impl<L: Label> UnaryTransformation<L> for Complement<L> {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let alphabet = self.alphabet.clone().unwrap_or_else(|| a.alphabet());
        let complete = SinkComplete::new(alphabet).transform(&ToDFA.transform(a));

        let mut result = Automaton::new();
        let map = complete
            .state_iter()
            .map(|q| {
                let flipped = result.add_state(complete.is_initial(q), !complete.is_terminal(q));
                (q, flipped)
            })
            .collect::<math::Map<_, _>>();
        result.import_transitions(&complete, &map);
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{abd, cabd, regex, words_up_to},
    };

    #[test_log::test]
    fn complement_of_cabd() {
        let complement = Complement::over_own_alphabet().transform(&cabd());
        for word in ["d", "abc", "abdc", "abddc"] {
            assert!(complement.accept(word.chars()), "should accept {word}");
        }
        for word in ["a", "b", "ad", "cbdd"] {
            assert!(!complement.accept(word.chars()), "should reject {word}");
        }
    }

    #[test_log::test]
    fn complement_of_abd() {
        let complement = Complement::over_own_alphabet().transform(&abd());
        for word in ["d", "aba", "abda", "abddb", ""] {
            assert!(complement.accept(word.chars()), "should accept {word}");
        }
        for word in ["a", "b", "ad", "bd", "add"] {
            assert!(!complement.accept(word.chars()), "should reject {word}");
        }
    }

    #[test_log::test]
    fn complement_flips_every_word() {
        let alphabet = Alphabet::from(['a', 'b', 'c']);
        for expression in ["a(b+c)(ab)*", "(a+b)*c", "a(bb)*c"] {
            let a = regex(expression);
            let complement = Complement::new(alphabet.clone()).transform(&a);
            for word in words_up_to(&['a', 'b', 'c'], 5) {
                assert_ne!(a.accept(&word), complement.accept(&word));
            }
        }
    }

    #[test_log::test]
    fn complement_of_empty_is_universal() {
        let alphabet = Alphabet::from(['a', 'b']);
        let complement = Complement::new(alphabet).transform(&Automaton::new());
        for word in words_up_to(&['a', 'b'], 3) {
            assert!(complement.accept(&word));
        }
    }

    #[test_log::test]
    fn own_alphabet_is_too_small_for_foreign_words() {
        // `c` is not part of the alphabet of `abd`, so the complement cannot read it
        let complement = Complement::over_own_alphabet().transform(&abd());
        assert!(!complement.accept("c".chars()));
        let wider = Complement::new(Alphabet::from(['a', 'b', 'c', 'd'])).transform(&abd());
        assert!(wider.accept("c".chars()));
    }
}
