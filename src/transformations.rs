use crate::{Automaton, Label};

mod closure;
pub use closure::{contains_terminal, epsilon_closure, map_alphabet};

mod subset;

mod determinize;
pub use determinize::ToDFA;

mod epsilon;
pub use epsilon::EpsilonTransitionRemover;

mod complete;
pub use complete::SinkComplete;

mod complement;
pub use complement::Complement;

mod product;
pub use product::{Intersection, Product, Shuffle};

mod prune;
pub use prune::{Accessible, Pruner};

mod prefix;
pub use prefix::PrefixClosure;

mod regular;
pub use regular::{Concatenation, Star, Union};

mod reverse;
pub use reverse::Reverse;

mod reduce;
pub use reduce::Reducer;

/// A transformation that takes one automaton and produces a new one. The argument is never
/// modified.
pub trait UnaryTransformation<L: Label> {
    /// Applies the transformation to `a`.
    fn transform(&self, a: &Automaton<L>) -> Automaton<L>;
}

/// A transformation that combines two automata into a new one. The arguments are never
/// modified.
pub trait BinaryTransformation<L: Label> {
    /// Applies the transformation to `left` and `right`.
    fn transform(&self, left: &Automaton<L>, right: &Automaton<L>) -> Automaton<L>;
}
