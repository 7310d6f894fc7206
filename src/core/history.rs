//! Transition history.
//!
//! Every committed transition is recorded with a timestamp. The history is
//! bounded so a machine ticking for hours does not grow without limit.

use super::key::StateKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of transitions a machine remembers.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Record of a single committed transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<K> {
    /// The state that was exited
    pub from: K,
    /// The state that was entered
    pub to: K,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered log of committed transitions.
///
/// When full, the oldest record is discarded. A capacity of zero disables
/// recording entirely. A deserialized history is trimmed to its capacity,
/// keeping the newest records.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_capacity(2);
/// for (from, to) in [(0, 1), (1, 2), (2, 0)] {
///     history.record(StateTransition { from, to, timestamp: Utc::now() });
/// }
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.get_path(), vec![&1, &2, &0]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(
    from = "StoredHistory<K>",
    bound(deserialize = "K: Deserialize<'de>")
)]
pub struct StateHistory<K> {
    capacity: usize,
    transitions: VecDeque<StateTransition<K>>,
}

#[derive(Deserialize)]
struct StoredHistory<K> {
    capacity: usize,
    transitions: VecDeque<StateTransition<K>>,
}

impl<K> From<StoredHistory<K>> for StateHistory<K> {
    fn from(stored: StoredHistory<K>) -> Self {
        let StoredHistory {
            capacity,
            mut transitions,
        } = stored;
        while transitions.len() > capacity {
            transitions.pop_front();
        }
        Self {
            capacity,
            transitions,
        }
    }
}

impl<K: StateKey> Default for StateHistory<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> StateHistory<K> {
    /// Create an empty history holding [`DEFAULT_HISTORY_CAPACITY`] records.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Storage grows on demand up to `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: StateTransition<K>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Path of keys traversed: the `from` of the oldest retained record,
    /// then the `to` of every record.
    pub fn get_path(&self) -> Vec<&K> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        path.extend(self.transitions.iter().map(|t| &t.to));
        path
    }

    /// Time between the oldest and newest retained records.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.front()?, self.transitions.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &StateTransition<K>> + '_ {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<K>> {
        self.transitions.back()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
