use std::fmt::Display;

use itertools::Itertools;

use crate::{math::OrderedMap, prelude::*};

/// Attributes of a node in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotStateAttribute {
    /// The label of a node
    Label(String),
    /// The shape of a node
    Shape(String),
}

impl Display for DotStateAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotStateAttribute::Label(s) => write!(f, "label=\"{}\"", escape(s)),
            DotStateAttribute::Shape(s) => write!(f, "shape=\"{s}\""),
        }
    }
}

/// Attributes of an edge in the DOT output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum DotTransitionAttribute {
    /// The label of an edge
    Label(String),
}

impl Display for DotTransitionAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DotTransitionAttribute::Label(lbl) => write!(f, "label=\"{}\"", escape(lbl)),
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl<L: Label> Automaton<L> {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    ///
    /// Terminal states are drawn with a double circle and every initial state receives an
    /// incoming arrow from an invisible node. Parallel transitions are merged into a single edge
    /// whose label lists all of their labels, epsilon is written as `ε`.
    pub fn dot_representation(&self) -> String {
        let header = [
            "digraph A {".to_string(),
            "rankdir=LR".to_string(),
            "fontname=\"Helvetica,Arial,sans-serif\"".to_string(),
        ];

        let states = self.state_iter().map(|q| {
            let shape = if self.is_terminal(q) {
                "doublecircle"
            } else {
                "circle"
            };
            format!(
                "{q} [{}]",
                [
                    DotStateAttribute::Shape(shape.into()),
                    DotStateAttribute::Label(q.to_string()),
                ]
                .iter()
                .join(", ")
            )
        });

        let arrows = self.initials().into_iter().flat_map(|q| {
            [
                format!("init_{q} [label=\"\", shape=none]"),
                format!("init_{q} -> {q}"),
            ]
        });

        let mut edges: OrderedMap<(State, State), Vec<String>> = OrderedMap::new();
        for t in self.transitions() {
            let label = t
                .label()
                .map(|l| format!("{l:?}"))
                .unwrap_or_else(|| "ε".to_string());
            edges.entry((t.start(), t.end())).or_default().push(label);
        }
        let transitions = edges.into_iter().map(|((p, q), labels)| {
            format!(
                "{p} -> {q} [{}]",
                DotTransitionAttribute::Label(labels.join(", "))
            )
        });

        header
            .into_iter()
            .chain(states)
            .chain(arrows)
            .chain(transitions)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }
}
