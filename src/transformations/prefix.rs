use crate::prelude::*;

/// Computes an automaton accepting all prefixes of words accepted by the argument. The argument
/// is pruned and every remaining state is made terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixClosure;

impl<L: Label> UnaryTransformation<L> for PrefixClosure {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let mut ret = Pruner.transform(a);
        for q in ret.states() {
            ret.set_terminal(q, true)
                .expect("states are taken from the automaton itself");
        }
        ret
    }
}
