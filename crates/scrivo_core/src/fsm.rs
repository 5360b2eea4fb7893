//! State machine runtime
//!
//! Flat state machines keyed by `(state, event)`. Native text widget families
//! differ in how they report editing sessions; each family is built as its own
//! machine from the same transition table, differing only in entry actions.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// Action run when a state is entered
pub type EntryAction = Box<dyn FnMut() + Send>;

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: FxHashMap<(StateId, EventId), StateId>,
    entry_actions: FxHashMap<StateId, SmallVec<[EntryAction; 1]>>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: FxHashMap::default(),
            entry_actions: FxHashMap::default(),
        }
    }

    /// Move from `from` to `to` when `event` arrives; a later call for the
    /// same `(from, event)` replaces the earlier target
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.insert((from, event), to);
        self
    }

    /// Run `action` every time `state` is entered through a transition
    pub fn on_enter<F: FnMut() + Send + 'static>(mut self, state: StateId, action: F) -> Self {
        self.entry_actions
            .entry(state)
            .or_default()
            .push(Box::new(action));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
            entry_actions: self.entry_actions,
        }
    }
}

/// A state machine instance
pub struct StateMachine {
    current_state: StateId,
    transitions: FxHashMap<(StateId, EventId), StateId>,
    entry_actions: FxHashMap<StateId, SmallVec<[EntryAction; 1]>>,
}

impl StateMachine {
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn current_state(&self) -> StateId {
        self.current_state
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Send an event, returning the new state if a transition happened
    ///
    /// Events with no transition from the current state are ignored.
    pub fn send(&mut self, event: EventId) -> Option<StateId> {
        let from = self.current_state;
        let to = *self.transitions.get(&(from, event))?;

        self.current_state = to;
        tracing::trace!("fsm: {} --{}--> {}", from, event, to);

        if let Some(actions) = self.entry_actions.get_mut(&to) {
            for action in actions.iter_mut() {
                action();
            }
        }

        Some(to)
    }
}
