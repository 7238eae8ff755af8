use tracing::debug;

use crate::{math::Map, prelude::*};

/// Copies the states of `a` that are contained in `keep` together with the transitions between
/// them into a fresh automaton.
fn restrict<L: Label>(a: &Automaton<L>, keep: &StateSet) -> (Automaton<L>, Map<State, State>) {
    let mut ret = Automaton::new();
    let map = a
        .state_iter()
        .filter(|q| keep.contains(q))
        .map(|q| (q, ret.add_state(a.is_initial(q), a.is_terminal(q))))
        .collect::<Map<_, _>>();
    for t in a.transitions() {
        if let (Some(start), Some(end)) = (map.get(&t.start()), map.get(&t.end())) {
            ret.connect(*start, t.label().cloned(), *end);
        }
    }
    (ret, map)
}

/// Removes all states that are not both accessible (reachable from an initial state) and
/// co-accessible (some terminal state is reachable from them). The result is trim and accepts
/// the same language. An automaton with empty language is pruned to the automaton without
/// states.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pruner;

impl<L: Label> UnaryTransformation<L> for Pruner {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let accessible = a.accessible_states();
        let useful = a
            .coaccessible_states()
            .intersection(&accessible)
            .copied()
            .collect::<StateSet>();
        let (ret, _) = restrict(a, &useful);
        debug!("pruned {} states down to {}", a.size(), ret.size());
        ret
    }
}

/// Extracts the part of an automaton that is reachable from a given state, which becomes the
/// sole initial state of the result. The result accepts the residual language of that state.
///
/// If the state does not belong to the transformed automaton, the result has no states.
#[derive(Debug, Clone, Copy)]
pub struct Accessible {
    origin: State,
}

impl Accessible {
    /// Extracts the sub-automaton reachable from `origin`.
    pub fn new(origin: State) -> Self {
        Self { origin }
    }
}

impl<L: Label> UnaryTransformation<L> for Accessible {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let reachable = a.reachable_from(&StateSet::from([self.origin]));
        let (mut ret, map) = restrict(a, &reachable);
        for (q, copy) in &map {
            ret.set_initial(*copy, *q == self.origin)
                .expect("copies are owned by the restriction");
        }
        ret
    }
}
