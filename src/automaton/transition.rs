use std::fmt::Debug;

use crate::{automaton::State, Label};

/// A labeled edge between two states. A transition whose label is `None` is an epsilon
/// transition, which can be taken without reading a symbol.
///
/// Transitions are immutable values and are compared structurally.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition<L> {
    start: State,
    label: Option<L>,
    end: State,
}

impl<L: Label> Transition<L> {
    /// Creates a transition from `start` to `end` on the given `label`.
    pub fn new(start: State, label: L, end: State) -> Self {
        Self {
            start,
            label: Some(label),
            end,
        }
    }

    /// Creates an epsilon transition from `start` to `end`.
    pub fn epsilon(start: State, end: State) -> Self {
        Self {
            start,
            label: None,
            end,
        }
    }

    /// Creates a transition from an optional label, where `None` stands for epsilon.
    pub fn with_label(start: State, label: Option<L>, end: State) -> Self {
        Self { start, label, end }
    }

    /// The state in which the transition originates.
    pub fn start(&self) -> State {
        self.start
    }

    /// The state that is reached by taking the transition.
    pub fn end(&self) -> State {
        self.end
    }

    /// The label of the transition, `None` for epsilon transitions.
    pub fn label(&self) -> Option<&L> {
        self.label.as_ref()
    }

    /// Returns true if this is an epsilon transition.
    pub fn is_epsilon(&self) -> bool {
        self.label.is_none()
    }
}

impl<L: Debug> Debug for Transition<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.label {
            Some(l) => write!(f, "({}, {:?}, {})", self.start, l, self.end),
            None => write!(f, "({}, ε, {})", self.start, self.end),
        }
    }
}
