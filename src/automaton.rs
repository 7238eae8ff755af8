use std::{
    borrow::Borrow,
    collections::VecDeque,
    sync::atomic::{AtomicU32, Ordering},
};

use bit_set::BitSet;
use tracing::trace;

use crate::{
    math::{Map, OrderedSet, Set},
    transformations::epsilon_closure,
    Alphabet, AutomatonError, Label,
};

mod state;
pub(crate) use state::show_states;
pub use state::{State, StateSet, StatesTuple};

mod transition;
pub use transition::Transition;

mod table;
pub(crate) use table::show_word;

/// Every automaton draws its states from a factory with a process-wide unique owner id, so
/// states of different automata never compare equal.
static NEXT_OWNER: AtomicU32 = AtomicU32::new(0);

/// Produces fresh [`State`] identities for one automaton.
#[derive(Debug)]
pub struct StateFactory {
    owner: u32,
    next: u32,
}

impl StateFactory {
    fn fresh() -> Self {
        Self {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            next: 0,
        }
    }

    fn create(&mut self) -> State {
        let state = State::new(self.owner, self.next);
        self.next += 1;
        state
    }

    /// Returns true if `state` was created by this factory.
    pub fn created(&self, state: State) -> bool {
        state.owner == self.owner && state.index < self.next
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Flags {
    initial: bool,
    terminal: bool,
}

/// A finite automaton over labels of type `L`, stored as an explicit graph.
///
/// The automaton owns its states and transitions. States are created through [`Self::add_state`],
/// which marks them as initial and/or terminal, and transitions are added with
/// [`Self::add_transition`]. A transition may only connect states that are owned by the
/// automaton it is added to, otherwise [`AutomatonError::NoSuchState`] is returned.
///
/// Cloning an automaton yields a structurally identical automaton whose states are fresh
/// identities, so states of the clone cannot be used with the original and vice versa.
///
/// # Example
/// ```
/// use rationals::prelude::*;
///
/// let mut a = Automaton::new();
/// let q0 = a.add_state(true, false);
/// let q1 = a.add_state(false, true);
/// a.add_transition(Transition::new(q0, 'a', q1)).unwrap();
/// a.add_transition(Transition::new(q1, 'b', q1)).unwrap();
///
/// assert!(a.accept("abb".chars()));
/// assert!(!a.accept("ba".chars()));
/// ```
pub struct Automaton<L> {
    factory: StateFactory,
    states: Vec<Option<Flags>>,
    delta: Vec<OrderedSet<Transition<L>>>,
}

impl<L: Label> Default for Automaton<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Label> Automaton<L> {
    /// Creates an automaton without any states, it accepts the empty language.
    pub fn new() -> Self {
        Self {
            factory: StateFactory::fresh(),
            states: vec![],
            delta: vec![],
        }
    }

    /// Creates an automaton with a single state that is both initial and terminal, it accepts
    /// exactly the empty word.
    pub fn epsilon() -> Self {
        let mut a = Self::new();
        a.add_state(true, true);
        a
    }

    /// Creates an automaton that accepts exactly the one-letter word `label`.
    pub fn letter(label: L) -> Self {
        Self::word([label])
    }

    /// Creates an automaton that accepts exactly the given word.
    pub fn word<I: IntoIterator<Item = L>>(word: I) -> Self {
        let mut a = Self::new();
        let mut current = a.add_state(true, false);
        for label in word {
            let next = a.add_state(false, false);
            a.connect(current, Some(label), next);
            current = next;
        }
        a.flags_mut(current).terminal = true;
        a
    }

    /// Gives access to the factory that creates the states of this automaton.
    pub fn factory(&self) -> &StateFactory {
        &self.factory
    }

    /// Adds a new state with the given flags and returns it.
    pub fn add_state(&mut self, initial: bool, terminal: bool) -> State {
        let state = self.factory.create();
        debug_assert_eq!(state.index(), self.states.len());
        self.states.push(Some(Flags { initial, terminal }));
        self.delta.push(OrderedSet::new());
        state
    }

    /// Returns true if `state` belongs to this automaton.
    pub fn contains(&self, state: State) -> bool {
        self.flags(state).is_some()
    }

    fn flags(&self, state: State) -> Option<Flags> {
        if !self.factory.created(state) {
            return None;
        }
        self.states.get(state.index()).copied().flatten()
    }

    fn flags_mut(&mut self, state: State) -> &mut Flags {
        self.states
            .get_mut(state.index())
            .and_then(|flags| flags.as_mut())
            .expect("state must be owned by the automaton")
    }

    fn check(&self, state: State) -> Result<(), AutomatonError> {
        if self.contains(state) {
            Ok(())
        } else {
            Err(AutomatonError::NoSuchState(state))
        }
    }

    /// Returns true if `state` belongs to this automaton and is initial.
    pub fn is_initial(&self, state: State) -> bool {
        self.flags(state).map(|f| f.initial).unwrap_or(false)
    }

    /// Returns true if `state` belongs to this automaton and is terminal.
    pub fn is_terminal(&self, state: State) -> bool {
        self.flags(state).map(|f| f.terminal).unwrap_or(false)
    }

    /// Changes whether `state` is initial.
    pub fn set_initial(&mut self, state: State, initial: bool) -> Result<(), AutomatonError> {
        self.check(state)?;
        self.flags_mut(state).initial = initial;
        Ok(())
    }

    /// Changes whether `state` is terminal.
    pub fn set_terminal(&mut self, state: State, terminal: bool) -> Result<(), AutomatonError> {
        self.check(state)?;
        self.flags_mut(state).terminal = terminal;
        Ok(())
    }

    /// Removes `state` together with all transitions that leave or reach it.
    pub fn remove_state(&mut self, state: State) -> Result<(), AutomatonError> {
        self.check(state)?;
        self.states[state.index()] = None;
        self.delta[state.index()].clear();
        for outgoing in self.delta.iter_mut() {
            outgoing.retain(|t| t.end() != state);
        }
        trace!("removed state {state}");
        Ok(())
    }

    /// Adds the given transition. Returns `Ok(true)` if the transition was not present before and
    /// fails if either of its endpoints is not owned by `self`.
    pub fn add_transition(&mut self, transition: Transition<L>) -> Result<bool, AutomatonError> {
        self.check(transition.start())?;
        self.check(transition.end())?;
        let start = transition.start().index();
        Ok(self.delta[start].insert(transition))
    }

    /// Removes the given transition, returns true if it was present.
    pub fn remove_transition(&mut self, transition: &Transition<L>) -> bool {
        if !self.contains(transition.start()) {
            return false;
        }
        self.delta[transition.start().index()].remove(transition)
    }

    /// Adds a transition between states which are known to be owned by `self`. This is what
    /// transformations use to assemble their results, a violation means the transformation is
    /// broken and we panic.
    pub(crate) fn connect(&mut self, start: State, label: Option<L>, end: State) {
        if let Err(e) = self.add_transition(Transition::with_label(start, label, end)) {
            panic!("transformation produced an invalid transition: {e}");
        }
    }

    /// Iterates over all states in the order in which they were created.
    pub fn state_iter(&self) -> impl Iterator<Item = State> + '_ {
        self.states
            .iter()
            .enumerate()
            .filter_map(move |(i, flags)| flags.map(|_| State::new(self.factory.owner, i as u32)))
    }

    /// Returns the set of all states.
    pub fn states(&self) -> StateSet {
        self.state_iter().collect()
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if the automaton has no states.
    pub fn is_void(&self) -> bool {
        self.size() == 0
    }

    /// Returns the number of transitions.
    pub fn transition_count(&self) -> usize {
        self.delta.iter().map(|d| d.len()).sum()
    }

    /// Returns the set of initial states.
    pub fn initials(&self) -> StateSet {
        self.state_iter().filter(|q| self.is_initial(*q)).collect()
    }

    /// Returns the set of terminal states.
    pub fn terminals(&self) -> StateSet {
        self.state_iter().filter(|q| self.is_terminal(*q)).collect()
    }

    /// Returns the set of all labels that appear on some transition. Epsilon is never part of
    /// the alphabet.
    pub fn alphabet(&self) -> Alphabet<L> {
        self.transitions().filter_map(|t| t.label().cloned()).collect()
    }

    /// Iterates over all transitions.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition<L>> + '_ {
        self.delta.iter().flatten()
    }

    /// Iterates over the transitions leaving `state`. Yields nothing if the state is not owned.
    pub fn delta(&self, state: State) -> impl Iterator<Item = &Transition<L>> + '_ {
        let outgoing = if self.contains(state) {
            Some(&self.delta[state.index()])
        } else {
            None
        };
        outgoing.into_iter().flatten()
    }

    /// Iterates over the transitions leaving `state` with the given label, where `None` selects
    /// the epsilon transitions.
    pub fn delta_on<'a>(
        &'a self,
        state: State,
        label: Option<&'a L>,
    ) -> impl Iterator<Item = &'a Transition<L>> + 'a {
        self.delta(state).filter(move |t| t.label() == label)
    }

    /// Iterates over the transitions that leave some state in `states`.
    pub fn delta_set<'a>(
        &'a self,
        states: &'a StateSet,
    ) -> impl Iterator<Item = &'a Transition<L>> + 'a {
        states.iter().flat_map(move |q| self.delta(*q))
    }

    /// Computes the states that are reached from `states` by reading `label`, including all
    /// states that are reachable from there through epsilon transitions.
    pub fn step(&self, states: &StateSet, label: &L) -> StateSet {
        let arrival = self
            .delta_set(states)
            .filter(|t| t.label() == Some(label))
            .map(|t| t.end())
            .collect();
        epsilon_closure(&arrival, self)
    }

    /// Computes the states that are reached from the initial states by reading `word`.
    pub fn steps<W>(&self, word: W) -> StateSet
    where
        W: IntoIterator,
        W::Item: Borrow<L>,
    {
        let mut current = epsilon_closure(&self.initials(), self);
        for label in word {
            if current.is_empty() {
                break;
            }
            current = self.step(&current, label.borrow());
        }
        current
    }

    /// Returns true if the automaton accepts `word`, that is if some run on the word ends in a
    /// terminal state.
    pub fn accept<W>(&self, word: W) -> bool
    where
        W: IntoIterator,
        W::Item: Borrow<L>,
    {
        self.steps(word).iter().any(|q| self.is_terminal(*q))
    }

    /// Returns true if no state has an epsilon transition or two transitions on the same label,
    /// and there is at most one initial state.
    pub fn is_deterministic(&self) -> bool {
        if self.initials().len() > 1 {
            return false;
        }
        self.delta.iter().all(|outgoing| {
            let mut seen = Set::default();
            outgoing
                .iter()
                .all(|t| t.label().map(|l| seen.insert(l)).unwrap_or(false))
        })
    }

    /// Computes the set of states that are reachable from `origin`, including `origin` itself.
    pub fn reachable_from(&self, origin: &StateSet) -> StateSet {
        let mut seen = BitSet::with_capacity(self.states.len());
        let mut queue: VecDeque<State> = origin
            .iter()
            .filter(|q| self.contains(**q) && seen.insert(q.index()))
            .copied()
            .collect();
        let mut reached = StateSet::new();
        while let Some(q) = queue.pop_front() {
            reached.insert(q);
            for t in self.delta(q) {
                if seen.insert(t.end().index()) {
                    queue.push_back(t.end());
                }
            }
        }
        reached
    }

    /// Computes the set of states that are reachable from some initial state.
    pub fn accessible_states(&self) -> StateSet {
        self.reachable_from(&self.initials())
    }

    /// Computes the set of states from which some terminal state can be reached.
    pub fn coaccessible_states(&self) -> StateSet {
        let mut predecessors: Map<State, Vec<State>> = Map::default();
        for t in self.transitions() {
            predecessors.entry(t.end()).or_default().push(t.start());
        }
        let mut seen = BitSet::with_capacity(self.states.len());
        let mut queue: VecDeque<State> = self
            .terminals()
            .into_iter()
            .filter(|q| seen.insert(q.index()))
            .collect();
        let mut reached = StateSet::new();
        while let Some(q) = queue.pop_front() {
            reached.insert(q);
            for p in predecessors.get(&q).into_iter().flatten() {
                if seen.insert(p.index()) {
                    queue.push_back(*p);
                }
            }
        }
        reached
    }

    /// Returns a shortest word that is accepted, or `None` if the accepted language is empty.
    /// Epsilon transitions do not contribute to the length of a word.
    pub fn accepted_word(&self) -> Option<Vec<L>> {
        let mut access: Map<State, Vec<L>> = Map::default();
        let mut queue = VecDeque::new();
        for q in self.initials() {
            access.insert(q, vec![]);
            queue.push_back(q);
        }
        let mut done = BitSet::with_capacity(self.states.len());
        while let Some(q) = queue.pop_front() {
            if !done.insert(q.index()) {
                continue;
            }
            let word = access[&q].clone();
            if self.is_terminal(q) {
                return Some(word);
            }
            for t in self.delta(q) {
                let p = t.end();
                if done.contains(p.index()) {
                    continue;
                }
                match t.label() {
                    None => {
                        let shorter = access
                            .get(&p)
                            .map(|w| w.len() > word.len())
                            .unwrap_or(true);
                        if shorter {
                            access.insert(p, word.clone());
                        }
                        queue.push_front(p);
                    }
                    Some(l) => {
                        if !access.contains_key(&p) {
                            let mut next = word.clone();
                            next.push(l.clone());
                            access.insert(p, next);
                        }
                        queue.push_back(p);
                    }
                }
            }
        }
        None
    }

    /// Copies all states of `other` into `self` and returns the mapping from the states of
    /// `other` to the newly created states. If `keep_flags` is false, the copies are neither
    /// initial nor terminal.
    pub(crate) fn import_states(
        &mut self,
        other: &Automaton<L>,
        keep_flags: bool,
    ) -> Map<State, State> {
        other
            .state_iter()
            .map(|q| {
                let copy = if keep_flags {
                    self.add_state(other.is_initial(q), other.is_terminal(q))
                } else {
                    self.add_state(false, false)
                };
                (q, copy)
            })
            .collect()
    }

    /// Copies all transitions of `other` into `self`, translating states with `map`.
    pub(crate) fn import_transitions(&mut self, other: &Automaton<L>, map: &Map<State, State>) {
        for t in other.transitions() {
            self.connect(map[&t.start()], t.label().cloned(), map[&t.end()]);
        }
    }
}

impl<L: Label> Clone for Automaton<L> {
    fn clone(&self) -> Self {
        let mut factory = StateFactory::fresh();
        factory.next = self.factory.next;
        let owner = factory.owner;
        let rename = |q: State| State::new(owner, q.index);
        let delta = self
            .delta
            .iter()
            .map(|outgoing| {
                outgoing
                    .iter()
                    .map(|t| {
                        Transition::with_label(rename(t.start()), t.label().cloned(), rename(t.end()))
                    })
                    .collect()
            })
            .collect();
        Self {
            factory,
            states: self.states.clone(),
            delta,
        }
    }
}
