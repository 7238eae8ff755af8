use tracing::trace;

use crate::{math::OrderedMap, prelude::*};

/// Returns true if some state of `states` is terminal in `a`.
pub fn contains_terminal<L: Label>(states: &StateSet, a: &Automaton<L>) -> bool {
    states.iter().any(|q| a.is_terminal(*q))
}

/// Computes the set of states that are reachable from `states` in `a` using only epsilon
/// transitions. The result always contains `states` itself.
///
/// States are expanded at most once and epsilon self-loops are skipped, so the computation
/// terminates on every finite automaton.
pub fn epsilon_closure<L: Label>(states: &StateSet, a: &Automaton<L>) -> StateSet {
    let mut closure = states.clone();
    let mut frontier: Vec<State> = states.iter().copied().collect();
    while let Some(q) = frontier.pop() {
        for t in a.delta_on(q, None) {
            let p = t.end();
            if p != q && closure.insert(p) {
                trace!("epsilon closure reaches {p} from {q}");
                frontier.push(p);
            }
        }
    }
    closure
}

/// Groups the targets of the given transitions by their label. Epsilon transitions are ignored.
pub fn map_alphabet<'a, L, I>(transitions: I) -> OrderedMap<L, StateSet>
where
    L: Label + 'a,
    I: IntoIterator<Item = &'a Transition<L>>,
{
    let mut map: OrderedMap<L, StateSet> = OrderedMap::new();
    for t in transitions {
        if let Some(l) = t.label() {
            map.entry(l.clone()).or_default().insert(t.end());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    use super::map_alphabet;

    #[test_log::test]
    fn closure_follows_chains_and_ignores_self_loops() {
        let mut a = Automaton::new();
        let q = (0..4).map(|i| a.add_state(i == 0, i == 3)).collect::<Vec<_>>();
        a.add_transition(Transition::epsilon(q[0], q[0])).unwrap();
        a.add_transition(Transition::epsilon(q[0], q[1])).unwrap();
        a.add_transition(Transition::epsilon(q[1], q[2])).unwrap();
        a.add_transition(Transition::epsilon(q[2], q[0])).unwrap();
        a.add_transition(Transition::new(q[2], 'a', q[3])).unwrap();

        let closure = epsilon_closure(&StateSet::from([q[0]]), &a);
        assert_eq!(closure, StateSet::from([q[0], q[1], q[2]]));
        assert_eq!(
            epsilon_closure(&StateSet::from([q[3]]), &a),
            StateSet::from([q[3]])
        );
        assert!(epsilon_closure(&StateSet::new(), &a).is_empty());
    }

    #[test]
    fn targets_are_grouped_by_label() {
        let mut a = Automaton::new();
        let q0 = a.add_state(true, false);
        let q1 = a.add_state(false, false);
        let q2 = a.add_state(false, true);
        a.add_transition(Transition::new(q0, 'a', q1)).unwrap();
        a.add_transition(Transition::new(q0, 'a', q2)).unwrap();
        a.add_transition(Transition::new(q0, 'b', q2)).unwrap();
        a.add_transition(Transition::epsilon(q0, q1)).unwrap();

        let map = map_alphabet(a.delta(q0));
        assert_eq!(map.len(), 2);
        assert_eq!(map[&'a'], StateSet::from([q1, q2]));
        assert_eq!(map[&'b'], StateSet::from([q2]));
    }
}
