use crate::{math::Map, prelude::*};

/// Reverses an automaton: every transition changes its direction and initial states become
/// terminal and vice versa. The result accepts the mirror images of the accepted words.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reverse;

impl<L: Label> UnaryTransformation<L> for Reverse {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let mut ret = Automaton::new();
        let map = a
            .state_iter()
            .map(|q| (q, ret.add_state(a.is_terminal(q), a.is_initial(q))))
            .collect::<Map<_, _>>();
        for t in a.transitions() {
            ret.connect(map[&t.end()], t.label().cloned(), map[&t.start()]);
        }
        ret
    }
}
