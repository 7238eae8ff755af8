use tracing::{debug, trace};

use crate::{
    math::{Map, Set},
    prelude::*,
};

/// A relation between the states of two automata, computed as the greatest fixed point of a
/// matching condition. Two automata are related if every initial state of either automaton is
/// related to some initial state of the other one.
pub trait Relation {
    /// Computes all pairs of related states, the first component is a state of `left`, the
    /// second one a state of `right`.
    fn compute<L: Label>(&self, left: &Automaton<L>, right: &Automaton<L>) -> Set<(State, State)>;

    /// Returns true if the initial states of `left` and `right` are related.
    fn related<L: Label>(&self, left: &Automaton<L>, right: &Automaton<L>) -> bool {
        let relation = self.compute(left, right);
        let (li, ri) = (left.initials(), right.initials());
        li.iter()
            .all(|p| ri.iter().any(|q| relation.contains(&(*p, *q))))
            && ri
                .iter()
                .all(|q| li.iter().any(|p| relation.contains(&(*p, *q))))
    }
}

/// Strong bisimulation. Related states agree on being terminal and every transition of one of
/// them, epsilon transitions included, is matched by an equally labeled transition of the other
/// one into a related state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bisimulation;

impl Relation for Bisimulation {
    fn compute<L: Label>(&self, left: &Automaton<L>, right: &Automaton<L>) -> Set<(State, State)> {
        let moves = |a: &Automaton<L>, q: State| {
            a.delta(q)
                .map(|t| (t.label().cloned(), t.end()))
                .collect::<Vec<_>>()
        };
        refine(left, right, moves, |a: &Automaton<L>, q: State| {
            a.is_terminal(q)
        })
    }
}

/// Weak bisimulation, where epsilon transitions are unobservable. A weak move of a state is a
/// sequence of epsilon transitions followed by one labeled transition, and a state counts as
/// terminal if a terminal state is reachable through epsilon transitions. Related states have
/// to match each other's weak moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeakBisimulation;

impl Relation for WeakBisimulation {
    fn compute<L: Label>(&self, left: &Automaton<L>, right: &Automaton<L>) -> Set<(State, State)> {
        let moves = |a: &Automaton<L>, q: State| {
            let closure = epsilon_closure(&StateSet::from([q]), a);
            a.delta_set(&closure)
                .filter(|t| !t.is_epsilon())
                .map(|t| (t.label().cloned(), t.end()))
                .collect::<Vec<_>>()
        };
        let terminal = |a: &Automaton<L>, q: State| {
            epsilon_closure(&StateSet::from([q]), a)
                .iter()
                .any(|p| a.is_terminal(*p))
        };
        refine(left, right, moves, terminal)
    }
}

/// Starts from all pairs of states that agree on `terminal` and removes pairs whose `moves`
/// cannot be matched in both directions until nothing changes anymore.
fn refine<L, M, T>(
    left: &Automaton<L>,
    right: &Automaton<L>,
    moves: M,
    terminal: T,
) -> Set<(State, State)>
where
    L: Label,
    M: Fn(&Automaton<L>, State) -> Vec<(Option<L>, State)>,
    T: Fn(&Automaton<L>, State) -> bool,
{
    let left_moves = left
        .state_iter()
        .map(|p| (p, moves(left, p)))
        .collect::<Map<_, _>>();
    let right_moves = right
        .state_iter()
        .map(|q| (q, moves(right, q)))
        .collect::<Map<_, _>>();

    let mut relation: Set<(State, State)> = left
        .state_iter()
        .flat_map(|p| right.state_iter().map(move |q| (p, q)))
        .filter(|(p, q)| terminal(left, *p) == terminal(right, *q))
        .collect();

    let mut rounds = 0;
    loop {
        rounds += 1;
        let violating = relation
            .iter()
            .filter(|(p, q)| {
                let forth = left_moves[p].iter().all(|(l, p2)| {
                    right_moves[q]
                        .iter()
                        .any(|(m, q2)| l == m && relation.contains(&(*p2, *q2)))
                });
                let back = right_moves[q].iter().all(|(m, q2)| {
                    left_moves[p]
                        .iter()
                        .any(|(l, p2)| l == m && relation.contains(&(*p2, *q2)))
                });
                !(forth && back)
            })
            .copied()
            .collect::<Vec<_>>();
        if violating.is_empty() {
            break;
        }
        for pair in violating {
            trace!("states {} and {} are distinguished", pair.0, pair.1);
            relation.remove(&pair);
        }
    }
    debug!(
        "bisimulation stabilized after {rounds} rounds with {} pairs",
        relation.len()
    );
    relation
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        tests::{abd, cabd},
    };

    fn automaton(
        size: usize,
        terminals: &[usize],
        edges: &[(usize, Option<&str>, usize)],
    ) -> Automaton<String> {
        let mut a = Automaton::new();
        let states = (0..size)
            .map(|i| a.add_state(i == 0, terminals.contains(&i)))
            .collect::<Vec<_>>();
        for (from, label, to) in edges {
            a.add_transition(Transition::with_label(
                states[*from],
                label.map(|l| l.to_string()),
                states[*to],
            ))
            .unwrap();
        }
        a
    }

    #[test_log::test]
    fn branching_time_matters() {
        let a = automaton(
            4,
            &[],
            &[(0, Some("a"), 1), (1, Some("b"), 2), (1, Some("c"), 3)],
        );
        let b = automaton(
            5,
            &[],
            &[
                (0, Some("a"), 1),
                (0, Some("a"), 2),
                (1, Some("b"), 3),
                (2, Some("c"), 4),
            ],
        );
        assert!(!AreEquivalent::new(Bisimulation).test(&a, &b));
    }

    #[test_log::test]
    fn epsilon_moves_are_unobservable() {
        let a = automaton(
            4,
            &[],
            &[
                (0, Some("a"), 1),
                (1, None, 1),
                (1, Some("b"), 2),
                (1, Some("c"), 3),
            ],
        );
        let b = automaton(
            5,
            &[],
            &[
                (0, Some("a"), 1),
                (1, None, 2),
                (2, Some("b"), 3),
                (1, Some("c"), 4),
            ],
        );
        assert!(AreEquivalent::new(WeakBisimulation).test(&a, &b));
        assert!(!AreEquivalent::new(Bisimulation).test(&a, &b));
    }

    #[test_log::test]
    fn self_loops_break_bisimilarity() {
        assert!(!AreEquivalent::new(Bisimulation).test(&cabd(), &abd()));
    }

    #[test_log::test]
    fn isomorphic_automata_are_bisimilar() {
        let a = automaton(
            5,
            &[1],
            &[
                (0, Some("Q"), 1),
                (0, Some("R1"), 2),
                (2, Some("R2"), 3),
                (3, Some("R3"), 4),
                (3, Some("S"), 1),
                (4, Some("R4"), 1),
            ],
        );
        let b = automaton(
            5,
            &[4],
            &[
                (0, Some("Q"), 4),
                (0, Some("R1"), 1),
                (1, Some("R2"), 2),
                (2, Some("R3"), 3),
                (2, Some("S"), 4),
                (3, Some("R4"), 4),
            ],
        );
        assert!(AreEquivalent::new(Bisimulation).test(&a, &b));
        assert!(AreEquivalent::new(WeakBisimulation).test(&a, &b));
        assert!(SameLanguage.test(&a, &b));
    }
}
