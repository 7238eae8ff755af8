use std::fmt::{Debug, Display};

use itertools::Itertools;

use crate::math::OrderedSet;

/// Identity of a state. A state is only meaningful together with the [`Automaton`](crate::Automaton)
/// that created it: it records which automaton owns it, and an index that is never reused
/// within that automaton, not even after the state has been removed.
///
/// Whether a state is initial or terminal is a property stored in the owning automaton, see
/// [`Automaton::is_initial`](crate::Automaton::is_initial) and
/// [`Automaton::is_terminal`](crate::Automaton::is_terminal).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    pub(crate) owner: u32,
    pub(crate) index: u32,
}

impl State {
    pub(crate) fn new(owner: u32, index: u32) -> Self {
        Self { owner, index }
    }

    /// Returns the position of this state in the owning automaton. Positions are assigned
    /// in the order in which states are created, starting at zero.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.index)
    }
}

impl Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.index)
    }
}

/// A set of states. The ordering makes it usable as a key, which is what the subset
/// construction and the synchronized product rely on.
pub type StateSet = OrderedSet<State>;

/// Formats a set of states as `{q0, q1}`, or `∅` if it is empty.
pub(crate) fn show_states<'a, I: IntoIterator<Item = &'a State>>(states: I) -> String {
    let mut it = states.into_iter().peekable();
    if it.peek().is_none() {
        return "∅".to_string();
    }
    format!("{{{}}}", it.join(", "))
}

/// An ordered collection of state sets, one per component automaton. This is the node type of
/// product-like explorations over several automata: two tuples are equal iff all of their
/// components are equal, so a tuple can be used as a memoization key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct StatesTuple(Vec<StateSet>);

impl StatesTuple {
    /// Creates a tuple from the given component sets.
    pub fn new<I: IntoIterator<Item = StateSet>>(sets: I) -> Self {
        Self(sets.into_iter().collect())
    }

    /// Returns the number of components.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the tuple has no components.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the state set of the component at position `i`.
    pub fn get(&self, i: usize) -> Option<&StateSet> {
        self.0.get(i)
    }

    /// Iterates over the component sets in order.
    pub fn iter(&self) -> std::slice::Iter<'_, StateSet> {
        self.0.iter()
    }
}

impl std::ops::Index<usize> for StatesTuple {
    type Output = StateSet;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<StateSet> for StatesTuple {
    fn from_iter<T: IntoIterator<Item = StateSet>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl Debug for StatesTuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "⟨{}⟩", self.0.iter().map(show_states).join(", "))
    }
}
