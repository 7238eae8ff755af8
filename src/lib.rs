//! Library for working with finite automata over arbitrary labels in Rust.
//!
//! An [`Automaton`] is an explicit graph: it owns a collection of states, each of which may be
//! initial and/or terminal, and a collection of labeled transitions between them. Labels can be
//! of any type implementing [`Label`], a transition without a label is an epsilon transition.
//!
//! On top of this data model, the crate provides
//! - transformations (see [`transformations`]) which consume automata and produce new ones without
//!   touching their inputs: epsilon closure and elimination, determinization through the subset
//!   construction, completion with a sink state, complementation, regular operations and the
//!   synchronized product (also known as mix) of automata,
//! - decision procedures (see [`properties`]) for language emptiness, language inclusion through
//!   model checking and equivalence through bisimulation or mutual inclusion,
//! - [`MixPlay`], a randomized backtracking search for a word that drives several automata
//!   running in parallel to a given target label while respecting their synchronization.
//!
//! How the labels of different automata synchronize is decided by a [`Synchronization`] policy.
//! The [`DefaultSynchronization`] synchronizes identical labels only.
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use rationals::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        automaton::{Automaton, State, StateFactory, StateSet, StatesTuple, Transition},
        error::AutomatonError,
        math,
        mixplay::{AutomatonRunner, ListenerId, MixOutcome, MixPlay, RunListener},
        properties::{
            AreEquivalent, BinaryTest, Bisimulation, ContainsEpsilon, Inclusion, IsComplete,
            IsDeterministic, IsEmpty, ModelCheck, Relation, SameLanguage, UnaryTest,
            WeakBisimulation,
        },
        synchronization::{DefaultSynchronization, Synchronization},
        transformations::{
            epsilon_closure, Accessible, BinaryTransformation, Complement, Concatenation,
            EpsilonTransitionRemover, Intersection, PrefixClosure, Product, Pruner, Reducer,
            Reverse, Shuffle, SinkComplete, Star, ToDFA, UnaryTransformation, Union,
        },
        Alphabet, Label,
    };

    #[cfg(feature = "random")]
    pub use super::random::RandomWalk;
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

mod error;
pub use error::AutomatonError;

/// Defines the automaton data model: states, transitions and the automaton that owns them.
pub mod automaton;
pub use automaton::Automaton;

/// Graphviz export of automata.
pub mod dot;

/// Policies deciding how labels of different automata synchronize.
pub mod synchronization;
pub use synchronization::{DefaultSynchronization, Synchronization};

/// Transformations that take automata and produce new automata.
pub mod transformations;

/// Tests and decision procedures on automata.
pub mod properties;

/// Search for synchronizing words over several automata running in parallel.
pub mod mixplay;
pub use mixplay::MixPlay;

/// Random generation of words accepted by an automaton. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

use std::{fmt::Debug, hash::Hash};

/// A label is simply a type that can be used to annotate transitions.
pub trait Label: Clone + Eq + Ord + Hash + Debug {}

impl<T: Clone + Eq + Ord + Hash + Debug> Label for T {}

/// An alphabet is a set of labels. Epsilon is never part of an alphabet.
pub type Alphabet<L> = math::OrderedSet<L>;

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// The automaton accepting `(a + b) d*`, preceded by arbitrarily many `c`.
    pub fn cabd() -> Automaton<char> {
        let mut a = Automaton::new();
        let initial = a.add_state(true, false);
        let terminal = a.add_state(false, true);
        a.add_transition(Transition::new(initial, 'a', terminal))
            .unwrap();
        a.add_transition(Transition::new(initial, 'b', terminal))
            .unwrap();
        a.add_transition(Transition::new(initial, 'c', initial))
            .unwrap();
        a.add_transition(Transition::new(terminal, 'd', terminal))
            .unwrap();
        a
    }

    /// The automaton accepting `(a + b) d*`.
    pub fn abd() -> Automaton<char> {
        let mut b = Automaton::new();
        let initial = b.add_state(true, false);
        let terminal = b.add_state(false, true);
        b.add_transition(Transition::new(initial, 'a', terminal))
            .unwrap();
        b.add_transition(Transition::new(initial, 'b', terminal))
            .unwrap();
        b.add_transition(Transition::new(terminal, 'd', terminal))
            .unwrap();
        b
    }

    /// Builds an automaton for a small regular expression over single characters. The syntax
    /// consists of letters, `+` for union, juxtaposition for concatenation, a postfix `*` and
    /// parentheses. `1` stands for the empty word.
    pub fn regex(expression: &str) -> Automaton<char> {
        let chars = expression.chars().collect::<Vec<_>>();
        let mut position = 0;
        let a = sum(&chars, &mut position);
        assert_eq!(position, chars.len(), "unparsed input in {expression}");
        a
    }

    fn sum(chars: &[char], position: &mut usize) -> Automaton<char> {
        let mut left = product(chars, position);
        while chars.get(*position) == Some(&'+') {
            *position += 1;
            let right = product(chars, position);
            left = Union.transform(&left, &right);
        }
        left
    }

    fn product(chars: &[char], position: &mut usize) -> Automaton<char> {
        let mut left = Automaton::epsilon();
        while let Some(c) = chars.get(*position) {
            if *c == '+' || *c == ')' {
                break;
            }
            let right = starred(chars, position);
            left = Concatenation.transform(&left, &right);
        }
        left
    }

    fn starred(chars: &[char], position: &mut usize) -> Automaton<char> {
        let mut a = atom(chars, position);
        while chars.get(*position) == Some(&'*') {
            *position += 1;
            a = Star.transform(&a);
        }
        a
    }

    fn atom(chars: &[char], position: &mut usize) -> Automaton<char> {
        let c = chars[*position];
        *position += 1;
        match c {
            '(' => {
                let inner = sum(chars, position);
                assert_eq!(chars.get(*position), Some(&')'));
                *position += 1;
                inner
            }
            '1' => Automaton::epsilon(),
            c => Automaton::letter(c),
        }
    }

    /// Enumerates all words over `alphabet` of length at most `max`.
    pub fn words_up_to(alphabet: &[char], max: usize) -> Vec<Vec<char>> {
        use itertools::Itertools;
        std::iter::once(vec![])
            .chain((1..=max).flat_map(|n| {
                std::iter::repeat(alphabet.iter().copied())
                    .take(n)
                    .multi_cartesian_product()
            }))
            .collect()
    }

    #[test]
    fn regex_helper() {
        let a = regex("a(b+c)(ab)*");
        assert!(a.accept("ab".chars()));
        assert!(a.accept("acabab".chars()));
        assert!(!a.accept("abb".chars()));
        let b = regex("(a+b)*c");
        assert!(b.accept("c".chars()));
        assert!(b.accept("abbac".chars()));
        assert!(!b.accept("ca".chars()));
    }
}
