use tracing::debug;

use crate::{
    math::{Map, Partition},
    prelude::*,
};

/// Computes the minimal deterministic automaton for the language of the argument.
///
/// The argument is determinized and completed over its own alphabet, then the states are grouped
/// by Hopcroft's partition refinement and merged into their classes. Finally the sink (if any)
/// is pruned away, so the result is minimal among the trim deterministic automata.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer;

impl<L: Label> UnaryTransformation<L> for Reducer {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let dfa = SinkComplete::over_own_alphabet().transform(&ToDFA.transform(a));
        let partition = hopcroft(&dfa, &dfa.alphabet());
        debug!(
            "partition refinement merged {} states into {} classes",
            dfa.size(),
            partition.size()
        );
        Pruner.transform(&quotient(&dfa, &partition))
    }
}

/// Hopcroft's algorithm on a complete deterministic automaton. Starting from the split into
/// terminal and non-terminal states, classes are refined by the predecessors of splitter classes
/// until no splitter is left. Of the two halves of a split class, only the smaller one needs to
/// be used as a splitter later unless the class itself was still waiting.
fn hopcroft<L: Label>(dfa: &Automaton<L>, alphabet: &Alphabet<L>) -> Partition<State> {
    let mut predecessors: Map<(&L, State), Vec<State>> = Map::default();
    for t in dfa.transitions() {
        if let Some(l) = t.label() {
            predecessors.entry((l, t.end())).or_default().push(t.start());
        }
    }

    let (terminal, other): (StateSet, StateSet) =
        dfa.state_iter().partition(|q| dfa.is_terminal(*q));
    let mut classes = [terminal, other]
        .into_iter()
        .filter(|class| !class.is_empty())
        .collect::<Vec<_>>();
    let mut waiting = classes.clone();

    while let Some(splitter) = waiting.pop() {
        for l in alphabet {
            let into = splitter
                .iter()
                .filter_map(|q| predecessors.get(&(l, *q)))
                .flatten()
                .copied()
                .collect::<StateSet>();
            if into.is_empty() {
                continue;
            }
            let mut refined = Vec::with_capacity(classes.len());
            for class in classes {
                let (inside, outside): (StateSet, StateSet) =
                    class.iter().partition(|q| into.contains(*q));
                if inside.is_empty() || outside.is_empty() {
                    refined.push(class);
                    continue;
                }
                if let Some(pos) = waiting.iter().position(|w| *w == class) {
                    waiting.swap_remove(pos);
                    waiting.push(inside.clone());
                    waiting.push(outside.clone());
                } else if inside.len() <= outside.len() {
                    waiting.push(inside.clone());
                } else {
                    waiting.push(outside.clone());
                }
                refined.push(inside);
                refined.push(outside);
            }
            classes = refined;
        }
    }
    Partition::from(classes)
}

/// Merges the states of every class of `partition` into one state. The partition has to be a
/// congruence for the result to be deterministic.
fn quotient<L: Label>(dfa: &Automaton<L>, partition: &Partition<State>) -> Automaton<L> {
    let mut ret = Automaton::new();
    let merged = partition
        .iter()
        .map(|class| {
            ret.add_state(
                class.iter().any(|q| dfa.is_initial(*q)),
                class.iter().any(|q| dfa.is_terminal(*q)),
            )
        })
        .collect::<Vec<_>>();
    let class_of = partition
        .iter()
        .enumerate()
        .flat_map(|(i, class)| class.iter().map(move |q| (*q, i)))
        .collect::<Map<_, _>>();
    for t in dfa.transitions() {
        ret.connect(
            merged[class_of[&t.start()]],
            t.label().cloned(),
            merged[class_of[&t.end()]],
        );
    }
    ret
}
