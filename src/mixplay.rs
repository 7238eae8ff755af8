use std::fmt::Debug;

use tracing::{debug, trace};

use crate::{
    automaton::show_word,
    math::{gcd, OrderedSet, Set},
    prelude::*,
};

/// Observes the transitions that are fired while a word found by [`MixPlay`] is replayed.
pub trait RunListener<L> {
    /// Called for every automaton that moves on `label`, with the transitions it fires.
    fn fire(
        &mut self,
        automaton: &Automaton<L>,
        transitions: &OrderedSet<Transition<L>>,
        label: &L,
    );
}

impl<L, F> RunListener<L> for F
where
    F: FnMut(&Automaton<L>, &OrderedSet<Transition<L>>, &L),
{
    fn fire(
        &mut self,
        automaton: &Automaton<L>,
        transitions: &OrderedSet<Transition<L>>,
        label: &L,
    ) {
        self(automaton, transitions, label)
    }
}

/// Identifies a registered [`RunListener`], it is needed to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Something that runs automata and reports the fired transitions to listeners.
pub trait AutomatonRunner<L> {
    /// Registers `listener` and returns an id for removing it later.
    fn add_run_listener(&mut self, listener: Box<dyn RunListener<L>>) -> ListenerId;

    /// Removes the listener with the given id, returns false if there was none.
    fn remove_run_listener(&mut self, id: ListenerId) -> bool;
}

/// The result of a [`MixPlay::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MixOutcome<L> {
    /// A word whose last label is the target. `tuples[i]` is the tuple of state sets in which
    /// `word[i]` was read.
    Found {
        /// The synchronizing word.
        word: Vec<L>,
        /// The tuples visited along the word.
        tuples: Vec<StatesTuple>,
    },
    /// No reachable tuple allows reading the target.
    NotFound,
}

impl<L> MixOutcome<L> {
    /// Returns the found word, if any.
    pub fn word(&self) -> Option<&[L]> {
        match self {
            MixOutcome::Found { word, .. } => Some(word),
            MixOutcome::NotFound => None,
        }
    }

    /// Returns true if a word was found.
    pub fn is_found(&self) -> bool {
        matches!(self, MixOutcome::Found { .. })
    }
}

/// A node of the depth first search. Candidates are visited in the order
/// `offset, offset + stride, offset + 2 * stride, ...` modulo their number, the stride being
/// coprime to it so that every candidate is visited exactly once.
struct Frame<L> {
    tuple: StatesTuple,
    candidates: Vec<L>,
    offset: usize,
    stride: usize,
    tried: usize,
}

impl<L: Clone> Frame<L> {
    fn next_candidate(&mut self) -> Option<L> {
        if self.tried == self.candidates.len() {
            return None;
        }
        let position = (self.offset + self.tried * self.stride) % self.candidates.len();
        self.tried += 1;
        Some(self.candidates[position].clone())
    }
}

/// Searches for a word that drives several automata running in parallel to a target label.
///
/// The automata move in lock step on a shared word. Each automaton is tracked by the
/// epsilon-closed set of states it may be in, the tuple of these sets is the node of the search.
/// A label that is in the synchronizing set of the alphabets (see
/// [`Synchronization::synchronizing`]) can only be read if every automaton that knows a
/// synchronizing label is able to move on it. Automata that cannot move on a label stay where
/// they are.
///
/// The search is a randomized depth first search which never visits a tuple twice, so it
/// terminates on every input. It is exhaustive, if no word is found then no reachable tuple allows
/// reading the target.
///
/// # Example
/// ```
/// use rationals::prelude::*;
///
/// let mut play = MixPlay::new(vec![
///     Automaton::word("ab".chars()),
///     Automaton::word("cb".chars()),
/// ])
/// .with_seed(42);
/// let word = play.play(&'b');
/// assert_eq!(word.len(), 3);
/// assert_eq!(word.last(), Some(&'b'));
/// ```
pub struct MixPlay<L: Label> {
    automata: Vec<Automaton<L>>,
    sync: Box<dyn Synchronization<L>>,
    alphabets: Vec<Alphabet<L>>,
    shared: Alphabet<L>,
    listeners: Vec<(ListenerId, Box<dyn RunListener<L>>)>,
    next_listener: usize,
    rng: fastrand::Rng,
}

impl<L: Label> Default for MixPlay<L> {
    fn default() -> Self {
        Self::new(vec![])
    }
}

impl<L: Label> MixPlay<L> {
    /// Creates a search over the given automata with the [`DefaultSynchronization`] and a
    /// randomly seeded source of randomness.
    pub fn new(automata: Vec<Automaton<L>>) -> Self {
        let mut play = Self {
            automata,
            sync: Box::new(DefaultSynchronization),
            alphabets: vec![],
            shared: Alphabet::new(),
            listeners: vec![],
            next_listener: 0,
            rng: fastrand::Rng::new(),
        };
        play.reset();
        play
    }

    /// Seeds the source of randomness, which makes the search reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = fastrand::Rng::with_seed(seed);
        self
    }

    /// Replaces the synchronization policy.
    pub fn with_synchronization<S: Synchronization<L> + 'static>(mut self, sync: S) -> Self {
        self.sync = Box::new(sync);
        self.reset();
        self
    }

    /// Adds another automaton to run in parallel.
    pub fn add_automaton(&mut self, automaton: Automaton<L>) {
        self.automata.push(automaton);
        self.reset();
    }

    /// Gives access to the automata.
    pub fn automata(&self) -> &[Automaton<L>] {
        &self.automata
    }

    /// Recomputes the alphabets of the automata and their synchronizing set. This happens
    /// automatically whenever an automaton or the policy is changed.
    pub fn reset(&mut self) {
        self.alphabets = self.automata.iter().map(|a| a.alphabet()).collect();
        self.shared = self.sync.synchronizing(&self.alphabets);
        trace!("synchronizing set is {:?}", self.shared);
    }

    /// Returns true if reading `candidate` fires transitions labeled `label`.
    fn moves_on(&self, label: &L, candidate: &L) -> bool {
        label == candidate || self.sync.synchronize(label, candidate).is_some()
    }

    fn initial_tuple(&self) -> StatesTuple {
        self.automata
            .iter()
            .map(|a| epsilon_closure(&a.initials(), a))
            .collect()
    }

    /// Returns true if every automaton that has to take part in reading `label` is able to.
    fn enabled(&self, label: &L, tuple: &StatesTuple) -> bool {
        if !self.shared.contains(label) {
            return true;
        }
        self.automata
            .iter()
            .zip(&self.alphabets)
            .zip(tuple.iter())
            .filter(|((_, alphabet), _)| {
                alphabet.contains(label) || self.sync.synchronize_with(label, alphabet)
            })
            .all(|((a, _), states)| {
                a.delta_set(states)
                    .filter_map(|t| t.label())
                    .any(|m| self.moves_on(m, label))
            })
    }

    fn advance(&self, label: &L, tuple: &StatesTuple) -> StatesTuple {
        self.automata
            .iter()
            .zip(tuple.iter())
            .map(|(a, states)| {
                let arrival: StateSet = a
                    .delta_set(states)
                    .filter(|t| t.label().is_some_and(|m| self.moves_on(m, label)))
                    .map(|t| t.end())
                    .collect();
                if arrival.is_empty() {
                    states.clone()
                } else {
                    epsilon_closure(&arrival, a)
                }
            })
            .collect()
    }

    fn frame(&mut self, tuple: StatesTuple) -> Frame<L> {
        let candidates = self
            .automata
            .iter()
            .zip(tuple.iter())
            .flat_map(|(a, states)| a.delta_set(states).filter_map(|t| t.label().cloned()))
            .collect::<OrderedSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let (offset, stride) = match candidates.len() {
            0 => (0, 1),
            n => {
                let mut stride = self.rng.usize(1..=n);
                while gcd(stride, n) != 1 {
                    stride -= 1;
                }
                (self.rng.usize(0..n), stride)
            }
        };
        Frame {
            tuple,
            candidates,
            offset,
            stride,
            tried: 0,
        }
    }

    /// Searches for a word whose last label is `target`, see the type level documentation. On
    /// success the listeners are notified of the transitions fired along the word.
    ///
    /// The word consists of labels of the component automata and `target` is compared to these.
    /// A label produced by the synchronization policy, such as the merged label of a handshake,
    /// is never found unless some automaton carries it as well.
    pub fn search(&mut self, target: &L) -> MixOutcome<L> {
        let start = self.initial_tuple();
        let mut explored: Set<StatesTuple> = Set::default();
        explored.insert(start.clone());
        let root = self.frame(start);
        let mut stack = vec![root];
        let mut word: Vec<L> = vec![];
        let mut tuples: Vec<StatesTuple> = vec![];

        while let Some(top) = stack.last_mut() {
            let Some(label) = top.next_candidate() else {
                stack.pop();
                word.pop();
                tuples.pop();
                trace!("backtracking to {}", show_word(&word));
                continue;
            };
            let from = top.tuple.clone();
            if !self.enabled(&label, &from) {
                continue;
            }
            let next = self.advance(&label, &from);
            word.push(label);
            tuples.push(from);
            if word.last() == Some(target) {
                debug!(
                    "found {} after exploring {} tuples",
                    show_word(&word),
                    explored.len()
                );
                self.notify(&word, &tuples);
                return MixOutcome::Found { word, tuples };
            }
            if !explored.insert(next.clone()) {
                word.pop();
                tuples.pop();
                continue;
            }
            trace!("trying {} in {:?}", show_word(&word), next);
            let frame = self.frame(next);
            stack.push(frame);
        }
        debug!(
            "no word reaches {target:?}, explored {} tuples",
            explored.len()
        );
        MixOutcome::NotFound
    }

    /// Searches for a word whose last label is `target` and returns it, or an empty word if
    /// there is none.
    pub fn play(&mut self, target: &L) -> Vec<L> {
        match self.search(target) {
            MixOutcome::Found { word, .. } => word,
            MixOutcome::NotFound => vec![],
        }
    }

    fn notify(&mut self, word: &[L], tuples: &[StatesTuple]) {
        if self.listeners.is_empty() {
            return;
        }
        for (label, tuple) in word.iter().zip(tuples) {
            for (a, states) in self.automata.iter().zip(tuple.iter()) {
                let fired = a
                    .delta_set(states)
                    .filter(|t| {
                        t.label()
                            .is_some_and(|m| m == label || self.sync.synchronize(m, label).is_some())
                    })
                    .cloned()
                    .collect::<OrderedSet<_>>();
                if fired.is_empty() {
                    continue;
                }
                for (_, listener) in self.listeners.iter_mut() {
                    listener.fire(a, &fired, label);
                }
            }
        }
    }
}

impl<L: Label> AutomatonRunner<L> for MixPlay<L> {
    fn add_run_listener(&mut self, listener: Box<dyn RunListener<L>>) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    fn remove_run_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }
}

impl<L: Label> Debug for MixPlay<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixPlay")
            .field("automata", &self.automata.len())
            .field("synchronizing", &self.shared)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
