use tracing::{debug, trace};

use crate::{math::Map, prelude::*, transformations::subset::subset_construction};

/// Removes all epsilon transitions from an automaton while preserving its language.
///
/// The epsilon-free automaton is obtained by exploring epsilon-closed sets of states, just as
/// the subset construction does. Since a terminal state of the input may be contained in many
/// of these sets, the result often contains several terminal states that accept the same
/// language. These are merged afterwards by [`Self::reduce_final_states`]. Non-terminal states
/// are never merged, the result is thus not necessarily minimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsilonTransitionRemover;

impl<L: Label> UnaryTransformation<L> for EpsilonTransitionRemover {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let explored = subset_construction(a);
        self.reduce_final_states(&explored)
    }
}

impl EpsilonTransitionRemover {
    /// Merges terminal states of `a` whose residual languages coincide. Two terminal states are
    /// compared by checking the languages accepted from them for mutual inclusion, so this is
    /// quadratic in the number of terminal states. The first terminal state of every class of
    /// equivalent ones represents the class, it inherits the transitions of all members.
    pub fn reduce_final_states<L: Label>(&self, a: &Automaton<L>) -> Automaton<L> {
        let terminals = a.terminals().into_iter().collect::<Vec<_>>();
        let residuals = terminals
            .iter()
            .map(|q| Accessible::new(*q).transform(a))
            .collect::<Vec<_>>();

        let mut representative: Map<State, State> = Map::default();
        for (i, q) in terminals.iter().enumerate() {
            let rep = (0..i)
                .filter(|j| representative[&terminals[*j]] == terminals[*j])
                .find(|j| SameLanguage.test(&residuals[i], &residuals[*j]))
                .map(|j| terminals[j])
                .unwrap_or(*q);
            if rep != *q {
                trace!("terminal state {q} is equivalent to {rep}");
            }
            representative.insert(*q, rep);
        }
        let canonical = |q: State| representative.get(&q).copied().unwrap_or(q);

        let mut reduced = Automaton::new();
        let mut map: Map<State, State> = Map::default();
        for q in a.state_iter().filter(|q| canonical(*q) == *q) {
            map.insert(q, reduced.add_state(a.is_initial(q), a.is_terminal(q)));
        }
        for q in a.initials() {
            reduced
                .set_initial(map[&canonical(q)], true)
                .expect("representatives are owned by the reduced automaton");
        }
        for t in a.transitions() {
            reduced.connect(
                map[&canonical(t.start())],
                t.label().cloned(),
                map[&canonical(t.end())],
            );
        }
        debug!(
            "merged {} terminal states into {}",
            terminals.len(),
            reduced.terminals().len()
        );
        reduced
    }
}
