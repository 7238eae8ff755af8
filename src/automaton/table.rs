use std::fmt::Debug;

use itertools::Itertools;
use owo_colors::OwoColorize;

use crate::{automaton::show_states, prelude::*};

impl<L: Label> Automaton<L> {
    /// Returns a string representation of the transition table. Every row corresponds to a
    /// state, every column to a label (with an additional column for epsilon transitions if
    /// there are any). Initial states are marked with `→`, terminal states with `*`.
    ///
    /// If `highlight` is set, terminal states are printed in bold green using ANSI escape codes.
    pub fn build_transition_table(&self, highlight: bool) -> String {
        let alphabet = self.alphabet();
        let has_epsilon = self.transitions().any(|t| t.is_epsilon());

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(alphabet.iter().map(|l| format!("{l:?}")))
                .chain(has_epsilon.then(|| "ε".to_string())),
        );
        for q in self.state_iter() {
            let mut name = format!(
                "{}{}{}",
                if self.is_initial(q) { "→" } else { "" },
                q,
                if self.is_terminal(q) { "*" } else { "" }
            );
            if highlight && self.is_terminal(q) {
                name = name.green().bold().to_string();
            }
            let mut row = vec![name];
            for label in alphabet.iter().map(Some).chain(has_epsilon.then_some(None)) {
                let targets = self.delta_on(q, label).map(|t| t.end()).collect::<StateSet>();
                row.push(if targets.is_empty() {
                    "-".to_string()
                } else {
                    show_states(&targets)
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl<L: Label> Debug for Automaton<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_void() {
            return write!(f, "Automaton ∅");
        }
        write!(
            f,
            "Automaton with initial {} and terminal {}\n{}",
            show_states(&self.initials()),
            show_states(&self.terminals()),
            self.build_transition_table(false)
        )
    }
}

/// Formats a word of labels by joining their debug representations.
pub(crate) fn show_word<L: Debug>(word: &[L]) -> String {
    format!("\"{}\"", word.iter().map(|l| format!("{l:?}")).join(""))
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn transition_table_lists_every_state() {
        let mut a = Automaton::new();
        let q0 = a.add_state(true, false);
        let q1 = a.add_state(false, true);
        a.add_transition(Transition::new(q0, 'a', q1)).unwrap();
        a.add_transition(Transition::epsilon(q1, q0)).unwrap();

        let table = a.build_transition_table(false);
        assert!(table.contains("→q0"));
        assert!(table.contains("q1*"));
        assert!(table.contains("ε"));
        assert!(format!("{a:?}").starts_with("Automaton with initial {q0}"));
        assert_eq!(format!("{:?}", Automaton::<char>::new()), "Automaton ∅");
    }
}
