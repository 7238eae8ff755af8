use tracing::trace;

use crate::{automaton::show_word, prelude::*};

/// Generates random words by walking through an automaton.
///
/// Starting in the initial states, the walk repeatedly picks one of the transitions that are
/// enabled in the current set of states uniformly at random, appends its label to the word and
/// moves on. Epsilon transitions are followed implicitly and never picked.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    rng: fastrand::Rng,
}

impl Default for RandomWalk {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomWalk {
    /// Creates a walk with a randomly seeded source of randomness.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Creates a walk whose choices are determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Walks through `a` until the word read so far satisfies `condition`, which is checked
    /// after every step, so the result contains at least one label. Fails with
    /// [`AutomatonError::Stuck`] if the walk reaches a set of states without any enabled
    /// transition before that.
    pub fn walk<L, F>(
        &mut self,
        a: &Automaton<L>,
        mut condition: F,
    ) -> Result<Vec<L>, AutomatonError>
    where
        L: Label,
        F: FnMut(&[L]) -> bool,
    {
        let mut current = epsilon_closure(&a.initials(), a);
        let mut word = vec![];
        loop {
            let enabled = a
                .delta_set(&current)
                .filter_map(|t| t.label().cloned())
                .collect::<Vec<_>>();
            if enabled.is_empty() {
                return Err(AutomatonError::Stuck { steps: word.len() });
            }
            let label = enabled[self.rng.usize(..enabled.len())].clone();
            current = a.step(&current, &label);
            word.push(label);
            trace!("random walk read {}", show_word(&word));
            if condition(&word) {
                return Ok(word);
            }
        }
    }

    /// A condition for [`Self::walk`] that holds once the word has `length` labels.
    pub fn has_length<L>(length: usize) -> impl FnMut(&[L]) -> bool {
        move |word| word.len() == length
    }
}

#[cfg(test)]
mod tests {
    use crate::{prelude::*, tests::regex};

    #[test_log::test]
    fn walks_follow_transitions() {
        let a = regex("(ab+c)*");
        let prefixes = PrefixClosure.transform(&a);
        for seed in 0..10 {
            let word = RandomWalk::with_seed(seed)
                .walk(&a, RandomWalk::has_length(6))
                .unwrap();
            assert_eq!(word.len(), 6);
            assert!(prefixes.accept(&word), "{word:?}");
        }
    }

    #[test_log::test]
    fn walks_stop_when_the_condition_holds() {
        let a = regex("a*b");
        let word = RandomWalk::new()
            .walk(&a, |w: &[char]| w.last() == Some(&'b'))
            .unwrap();
        assert!(a.accept(&word));
    }

    #[test_log::test]
    fn stuck_walks_fail() {
        let a = Automaton::word("ab".chars());
        assert_eq!(
            RandomWalk::new().walk(&a, RandomWalk::has_length(3)),
            Err(AutomatonError::Stuck { steps: 2 })
        );
        assert_eq!(
            RandomWalk::new().walk(&Automaton::<char>::new(), |_: &[char]| true),
            Err(AutomatonError::Stuck { steps: 0 })
        );
    }

    #[test_log::test]
    fn seeded_walks_are_reproducible() {
        let a = regex("(a+b+c)*");
        let first = RandomWalk::with_seed(9).walk(&a, RandomWalk::has_length(12));
        let second = RandomWalk::with_seed(9).walk(&a, RandomWalk::has_length(12));
        assert_eq!(first, second);
    }
}
