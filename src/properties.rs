use crate::{Automaton, Label};

mod emptiness;
pub use emptiness::{ContainsEpsilon, IsComplete, IsDeterministic, IsEmpty};

mod model_check;
pub use model_check::{Inclusion, ModelCheck};

mod equivalence;
pub use equivalence::{AreEquivalent, SameLanguage};

mod bisimulation;
pub use bisimulation::{Bisimulation, Relation, WeakBisimulation};

/// A property of a single automaton.
pub trait UnaryTest<L: Label> {
    /// Returns true if `a` has the property.
    fn test(&self, a: &Automaton<L>) -> bool;
}

/// A relation between two automata.
pub trait BinaryTest<L: Label> {
    /// Returns true if `left` and `right` are related.
    fn test(&self, left: &Automaton<L>, right: &Automaton<L>) -> bool;
}
