use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{math::Map, prelude::*};

/// Builds the synchronized product of `a` and `b`. States of the result are pairs of states that
/// are reachable from pairs of initial states, a pair is terminal iff both components are.
///
/// Labels in `shared` are rendezvous labels: a transition with such a label only fires together
/// with a transition of the other automaton whose label synchronizes with it under `sync`, and
/// the product transition carries the synchronized label. Every other transition, including
/// epsilon transitions, moves its automaton alone while the other one stays put.
fn mix<L: Label, S: Synchronization<L>>(
    a: &Automaton<L>,
    b: &Automaton<L>,
    sync: &S,
    shared: &Alphabet<L>,
) -> Automaton<L> {
    let mut ret = Automaton::new();
    let mut pairs: Map<(State, State), State> = Map::default();
    let mut queue = VecDeque::new();

    for p in a.initials() {
        for q in b.initials() {
            let state = ret.add_state(true, a.is_terminal(p) && b.is_terminal(q));
            pairs.insert((p, q), state);
            queue.push_back((p, q));
        }
    }

    while let Some((p, q)) = queue.pop_front() {
        let from = pairs[&(p, q)];
        let mut moves = vec![];
        for t in a.delta(p) {
            match t.label() {
                Some(l) if shared.contains(l) => {
                    for u in b.delta(q) {
                        if let Some(merged) = u.label().and_then(|m| sync.synchronize(l, m)) {
                            moves.push((Some(merged), t.end(), u.end()));
                        }
                    }
                }
                label => moves.push((label.cloned(), t.end(), q)),
            }
        }
        for u in b.delta(q) {
            match u.label() {
                Some(m) if shared.contains(m) => {}
                label => moves.push((label.cloned(), p, u.end())),
            }
        }

        for (label, p2, q2) in moves {
            let to = *pairs.entry((p2, q2)).or_insert_with(|| {
                queue.push_back((p2, q2));
                ret.add_state(false, a.is_terminal(p2) && b.is_terminal(q2))
            });
            trace!("({p}, {q}) --{label:?}--> ({p2}, {q2})");
            ret.connect(from, label, to);
        }
    }
    debug!(
        "product of {} and {} states has {} reachable states",
        a.size(),
        b.size(),
        ret.size()
    );
    ret
}

/// The synchronized product, also known as mix, of automata.
///
/// Labels that occur in the synchronizing set of both alphabets (see
/// [`Synchronization::synchronizing`]) force a rendezvous: such a transition can only be taken
/// together with a synchronizing transition of the other automaton, otherwise the step is
/// blocked. All remaining labels interleave freely. With disjoint alphabets the product thus
/// behaves like the [`Shuffle`], with identical alphabets like the [`Intersection`].
///
/// # Example
/// ```
/// use rationals::prelude::*;
///
/// let left = Automaton::word("ab".chars());
/// let right = Automaton::word("cb".chars());
/// let mixed = Product::new().transform(&left, &right);
/// assert!(mixed.accept("acb".chars()));
/// assert!(mixed.accept("cab".chars()));
/// assert!(!mixed.accept("abcb".chars()));
/// ```
#[derive(Debug, Clone)]
pub struct Product<S = DefaultSynchronization> {
    sync: S,
}

impl Product {
    /// Creates a product that synchronizes identical labels.
    pub fn new() -> Self {
        Self {
            sync: DefaultSynchronization,
        }
    }
}

impl Default for Product {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Product<S> {
    /// Creates a product that synchronizes labels according to `sync`.
    pub fn with_synchronization(sync: S) -> Self {
        Self { sync }
    }

    /// Computes the product of all given automata by folding from the left. The product of no
    /// automata is the automaton accepting only the empty word.
    pub fn transform_all<'a, L, I>(&self, automata: I) -> Automaton<L>
    where
        L: Label + 'a,
        S: Synchronization<L>,
        I: IntoIterator<Item = &'a Automaton<L>>,
    {
        let mut it = automata.into_iter();
        let Some(first) = it.next() else {
            return Automaton::epsilon();
        };
        it.fold(first.clone(), |acc, next| self.transform(&acc, next))
    }
}

impl<L: Label, S: Synchronization<L>> BinaryTransformation<L> for Product<S> {
    fn transform(&self, left: &Automaton<L>, right: &Automaton<L>) -> Automaton<L> {
        let shared = self
            .sync
            .synchronizing(&[left.alphabet(), right.alphabet()]);
        mix(left, right, &self.sync, &shared)
    }
}

/// Free interleaving of two automata. No label synchronizes, so the result accepts all
/// interleavings of a word of the left automaton with a word of the right one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shuffle;

impl<L: Label> BinaryTransformation<L> for Shuffle {
    fn transform(&self, left: &Automaton<L>, right: &Automaton<L>) -> Automaton<L> {
        mix(left, right, &DefaultSynchronization, &Alphabet::new())
    }
}

/// The product in which every label is a rendezvous label, so the result accepts exactly the
/// words accepted by both arguments. Unlike [`Product`], a label that only one of the automata
/// knows can never be read, which makes this a language intersection even for automata over
/// different alphabets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intersection;

impl<L: Label> BinaryTransformation<L> for Intersection {
    fn transform(&self, left: &Automaton<L>, right: &Automaton<L>) -> Automaton<L> {
        let mut shared = left.alphabet();
        shared.extend(right.alphabet());
        mix(left, right, &DefaultSynchronization, &shared)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        prelude::*,
        synchronization::tests::Handshake,
        tests::{regex, words_up_to},
    };

    fn strings(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test_log::test]
    fn mix_reduces_to_single_word() {
        let left = regex("ab*cd");
        let right = Pruner.transform(&regex("a*ebc"));
        let mixed = Product::new().transform(&left, &right);
        let accepted = words_up_to(&['a', 'b', 'c', 'd', 'e'], 6)
            .into_iter()
            .filter(|w| mixed.accept(w))
            .collect::<Vec<_>>();
        assert_eq!(accepted, vec![vec!['a', 'e', 'b', 'c', 'd']]);
        assert_eq!(mixed.accepted_word(), Some(vec!['a', 'e', 'b', 'c', 'd']));
    }

    #[test_log::test]
    fn blocked_rendezvous_yields_empty_language() {
        let mixed = Product::new().transform(&regex("abc"), &regex("acb"));
        assert!(IsEmpty.test(&mixed));
    }

    #[test_log::test]
    fn repetitions_synchronize() {
        let mixed = Product::new().transform(&regex("a(bb)*e"), &regex("a(bbb)*e"));
        assert!(mixed.accept("ae".chars()));
        assert!(mixed.accept("abbbbbbe".chars()));
        assert!(mixed.accept("abbbbbbbbbbbbe".chars()));
        assert!(!mixed.accept("abbe".chars()));
        assert!(!mixed.accept("abbbe".chars()));
    }

    #[test_log::test]
    fn product_is_commutative_on_languages() {
        let left = regex("a(b+c)*d");
        let right = regex("(ce)*a(bd+e)");
        let lr = Product::new().transform(&left, &right);
        let rl = Product::new().transform(&right, &left);
        for word in words_up_to(&['a', 'b', 'c', 'd', 'e'], 5) {
            assert_eq!(lr.accept(&word), rl.accept(&word), "{word:?}");
        }
    }

    #[test_log::test]
    fn custom_policy_merges_handshakes() {
        let sender = Automaton::word(strings(&["!m", "x"]));
        let receiver = Automaton::word(strings(&["y", "?m"]));
        let mixed = Product::with_synchronization(Handshake).transform(&sender, &receiver);
        assert!(mixed.accept(strings(&["y", "m", "x"])));
        assert!(!mixed.accept(strings(&["m", "y", "x"])));
        assert!(!mixed.accept(strings(&["y", "!m", "?m", "x"])));
        assert_eq!(
            mixed.alphabet(),
            strings(&["m", "x", "y"])
                .into_iter()
                .collect::<Alphabet<_>>()
        );
    }

    #[test_log::test]
    fn shuffle_interleaves_freely() {
        let s = Shuffle.transform(&Automaton::word("ab".chars()), &Automaton::letter('c'));
        for word in ["abc", "acb", "cab"] {
            assert!(s.accept(word.chars()), "should accept {word}");
        }
        for word in ["ab", "ba", "bca"] {
            assert!(!s.accept(word.chars()), "should reject {word}");
        }
        let twice = Shuffle.transform(&Automaton::letter('a'), &Automaton::letter('a'));
        assert!(twice.accept("aa".chars()));
        assert!(!twice.accept("a".chars()));
    }

    #[test_log::test]
    fn intersection_blocks_unknown_labels() {
        let left = regex("(a+b)*");
        let right = regex("a*c");
        assert!(Product::new().transform(&left, &right).accept("c".chars()));
        assert!(IsEmpty.test(&Intersection.transform(&left, &right)));

        let i = Intersection.transform(&regex("(a+b)*b"), &regex("a*b*"));
        assert!(i.accept("aabb".chars()));
        assert!(!i.accept("ba".chars()));
        assert!(!i.accept("bab".chars()));
    }

    #[test_log::test]
    fn product_of_many() {
        let automata = [regex("ab"), regex("bc"), regex("ac")];
        let mixed = Product::new().transform_all(&automata);
        assert!(mixed.accept("abc".chars()));
        assert!(!mixed.accept("acb".chars()));
        assert!(Product::new()
            .transform_all(std::iter::empty::<&Automaton<char>>())
            .accept("".chars()));
    }
}
