//! Builder for constructing machines.

use crate::core::{Edge, State, StateKey, DEFAULT_HISTORY_CAPACITY};
use crate::machine::{MachineError, StateMachine};

/// Builder for constructing machines with a fluent API.
///
/// Registration problems such as duplicate keys surface from
/// [`build`](Self::build) or [`start`](Self::start).
pub struct MachineBuilder<K: StateKey> {
    states: Vec<(K, Box<dyn State<K>>)>,
    edges: Vec<Edge<K>>,
    history_capacity: usize,
}

impl<K: StateKey> MachineBuilder<K> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            edges: Vec::new(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Add a state. The first state added is the one the machine starts in.
    pub fn state<S>(self, key: K, state: S) -> Self
    where
        S: State<K> + 'static,
    {
        self.boxed_state(key, Box::new(state))
    }

    /// Add an already boxed state.
    pub fn boxed_state(mut self, key: K, state: Box<dyn State<K>>) -> Self {
        self.states.push((key, state));
        self
    }

    /// Whitelist the edge `from -> to`.
    pub fn allow(mut self, from: K, to: K) -> Self {
        self.edges.push(Edge::new(from, to));
        self
    }

    /// Whitelist several edges at once.
    pub fn transitions<I>(mut self, edges: I) -> Self
    where
        I: IntoIterator<Item = (K, K)>,
    {
        self.edges
            .extend(edges.into_iter().map(|(from, to)| Edge::new(from, to)));
        self
    }

    /// Number of committed transitions the machine remembers.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Build an unstarted machine.
    pub fn build(self) -> Result<StateMachine<K>, MachineError<K>> {
        let mut machine = StateMachine::with_history_capacity(self.history_capacity);
        for (key, state) in self.states {
            machine.register_boxed(key, state)?;
        }
        for edge in self.edges {
            machine.allow_transition(edge.from, edge.to)?;
        }
        Ok(machine)
    }

    /// Build the machine and start it.
    pub fn start(self) -> Result<StateMachine<K>, MachineError<K>> {
        let mut machine = self.build()?;
        machine.start()?;
        Ok(machine)
    }
}

impl<K: StateKey> Default for MachineBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}
