use crate::prelude::*;

/// The disjoint union of two automata. Both are copied side by side with their flags, so the
/// result accepts a word iff one of the arguments does.
#[derive(Debug, Clone, Copy, Default)]
pub struct Union;

impl<L: Label> BinaryTransformation<L> for Union {
    fn transform(&self, left: &Automaton<L>, right: &Automaton<L>) -> Automaton<L> {
        let mut ret = Automaton::new();
        let map = ret.import_states(left, true);
        ret.import_transitions(left, &map);
        let map = ret.import_states(right, true);
        ret.import_transitions(right, &map);
        ret
    }
}

/// Concatenation of two automata. Terminal states of the left automaton are linked to the initial
/// states of the right one with epsilon transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Concatenation;

impl<L: Label> BinaryTransformation<L> for Concatenation {
    fn transform(&self, left: &Automaton<L>, right: &Automaton<L>) -> Automaton<L> {
        let mut ret = Automaton::new();
        let lmap = ret.import_states(left, false);
        let rmap = ret.import_states(right, false);
        for q in left.initials() {
            ret.set_initial(lmap[&q], true)
                .expect("imported states are owned");
        }
        for q in right.terminals() {
            ret.set_terminal(rmap[&q], true)
                .expect("imported states are owned");
        }
        ret.import_transitions(left, &lmap);
        ret.import_transitions(right, &rmap);
        for end in left.terminals() {
            for start in right.initials() {
                ret.connect(lmap[&end], None, rmap[&start]);
            }
        }
        ret
    }
}

/// Kleene star. A fresh state that is both initial and terminal is added, it has epsilon
/// transitions to the initial states of the argument, and every terminal state of the argument
/// has an epsilon transition back to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct Star;

impl<L: Label> UnaryTransformation<L> for Star {
    fn transform(&self, a: &Automaton<L>) -> Automaton<L> {
        let mut ret = Automaton::new();
        let hub = ret.add_state(true, true);
        let map = ret.import_states(a, false);
        ret.import_transitions(a, &map);
        for q in a.initials() {
            ret.connect(hub, None, map[&q]);
        }
        for q in a.terminals() {
            ret.connect(map[&q], None, hub);
        }
        ret
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn union_accepts_either() {
        let u = Union.transform(&Automaton::word("ab".chars()), &Automaton::letter('c'));
        assert!(u.accept("ab".chars()));
        assert!(u.accept("c".chars()));
        assert!(!u.accept("abc".chars()));
        assert_eq!(u.initials().len(), 2);
    }

    #[test_log::test]
    fn concatenation_links_terminals_to_initials() {
        let c = Concatenation.transform(&Automaton::word("ab".chars()), &Automaton::letter('c'));
        assert!(c.accept("abc".chars()));
        assert!(!c.accept("ab".chars()));
        assert!(!c.accept("c".chars()));
        assert_eq!(c.terminals().len(), 1);

        let with_empty = Concatenation.transform(&Automaton::letter('a'), &Automaton::new());
        assert!(IsEmpty.test(&with_empty));
    }

    #[test_log::test]
    fn star_iterates() {
        let s = Star.transform(&Automaton::word("ab".chars()));
        for word in ["", "ab", "abab", "ababab"] {
            assert!(s.accept(word.chars()), "should accept {word}");
        }
        for word in ["a", "aba", "ba"] {
            assert!(!s.accept(word.chars()), "should reject {word}");
        }
        assert!(Star.transform(&Automaton::<char>::new()).accept("".chars()));
    }
}
