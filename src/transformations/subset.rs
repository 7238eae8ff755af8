use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{
    automaton::show_states,
    math::Map,
    prelude::*,
    transformations::{contains_terminal, map_alphabet},
};

/// Runs the subset construction on `a`. Every state of the result stands for an epsilon-closed
/// set of states of `a`, the initial one for the closure of the initial states. A macro state is
/// terminal iff it contains a terminal state of `a`. Only macro states that are reachable are
/// created, and the empty set only appears if `a` has no initial states.
pub(crate) fn subset_construction<L: Label>(a: &Automaton<L>) -> Automaton<L> {
    let mut ret = Automaton::new();
    let mut macro_states: Map<StateSet, State> = Map::default();
    let mut queue = VecDeque::new();

    let start = epsilon_closure(&a.initials(), a);
    let initial = ret.add_state(true, contains_terminal(&start, a));
    macro_states.insert(start.clone(), initial);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let from = macro_states[&current];
        for (label, arrival) in map_alphabet(a.delta_set(&current)) {
            let arrival = epsilon_closure(&arrival, a);
            let to = match macro_states.get(&arrival) {
                Some(to) => *to,
                None => {
                    let to = ret.add_state(false, contains_terminal(&arrival, a));
                    trace!(
                        "discovered macro state {} as {to}",
                        show_states(&arrival)
                    );
                    macro_states.insert(arrival.clone(), to);
                    queue.push_back(arrival);
                    to
                }
            };
            ret.connect(from, Some(label), to);
        }
    }
    debug!(
        "subset construction turned {} states into {} states",
        a.size(),
        ret.size()
    );
    ret
}
