//! Authored machine configuration.
//!
//! A configuration lists the state keys a machine has, the kind of state
//! behind each key, and the whitelisted transitions. It can be stored as
//! JSON or as a compact binary blob and is turned into a machine by
//! [`MachineConfig::instantiate`] with a caller-supplied resolver.
//!
//! ```json
//! {
//!   "name": "player",
//!   "states": [
//!     {"key": 0, "kind": "idle"},
//!     {"key": 1, "kind": "moving"}
//!   ],
//!   "transitions": [
//!     {"from": 0, "to": 1},
//!     {"from": 1, "to": 0}
//!   ]
//! }
//! ```
//!
//! Validation uses Stillwater's `Validation` so every problem in a
//! configuration is reported at once.

pub mod error;

pub use error::{ConfigError, ConfigViolation};

use crate::core::{Edge, State, StateKey, DEFAULT_HISTORY_CAPACITY};
use crate::machine::StateMachine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// One authored state: its key and the kind of state to build for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateEntry<K> {
    pub key: K,
    pub kind: String,
}

/// Serializable description of a machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "K: Deserialize<'de>"))]
pub struct MachineConfig<K> {
    /// Optional label used in diagnostics
    #[serde(default)]
    pub name: Option<String>,

    /// States in registration order; the first one is entered on start
    pub states: Vec<StateEntry<K>>,

    /// Whitelisted transitions
    #[serde(default)]
    pub transitions: Vec<Edge<K>>,

    /// Number of committed transitions the machine remembers
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

impl<K: StateKey> Default for MachineConfig<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> MachineConfig<K> {
    pub fn new() -> Self {
        Self {
            name: None,
            states: Vec::new(),
            transitions: Vec::new(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn state(mut self, key: K, kind: impl Into<String>) -> Self {
        self.states.push(StateEntry {
            key,
            kind: kind.into(),
        });
        self
    }

    pub fn allow(mut self, from: K, to: K) -> Self {
        self.transitions.push(Edge::new(from, to));
        self
    }

    /// Validate the configuration, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation<K>>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation<K>>>> = Vec::new();

        checks.push(if self.states.is_empty() {
            Validation::fail(ConfigViolation::NoStates)
        } else {
            Validation::success(())
        });

        let mut declared = HashSet::new();
        for entry in &self.states {
            if !declared.insert(entry.key) {
                checks.push(Validation::fail(ConfigViolation::DuplicateKey {
                    key: entry.key,
                }));
            }
        }

        for edge in &self.transitions {
            let keys = if edge.is_self_loop() {
                vec![edge.from]
            } else {
                vec![edge.from, edge.to]
            };
            for key in keys {
                if !declared.contains(&key) {
                    checks.push(Validation::fail(ConfigViolation::UndeclaredKey {
                        from: edge.from,
                        to: edge.to,
                        key,
                    }));
                }
            }
        }

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> Result<(), ConfigError<K>> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }

    /// Build an unstarted machine from this configuration.
    ///
    /// `resolve` creates the state for each entry. Entries it cannot resolve
    /// are dropped with a warning instead of leaving a hole in the registry;
    /// transitions naming them are kept and are refused at runtime.
    pub fn instantiate<F>(&self, mut resolve: F) -> Result<StateMachine<K>, ConfigError<K>>
    where
        F: FnMut(&StateEntry<K>) -> Option<Box<dyn State<K>>>,
    {
        self.check()?;

        let mut machine = StateMachine::with_history_capacity(self.history_capacity);
        let label = self.name.as_deref().unwrap_or("unnamed");

        for entry in &self.states {
            match resolve(entry) {
                Some(state) => machine.register_boxed(entry.key, state)?,
                None => tracing::warn!(
                    "machine {} ({}) dropping state {:?}: kind '{}' did not resolve",
                    machine.id(),
                    label,
                    entry.key,
                    entry.kind
                ),
            }
        }

        for edge in &self.transitions {
            machine.allow_transition(edge.from, edge.to)?;
        }

        tracing::debug!(
            "machine {} ({}) instantiated with {} of {} states",
            machine.id(),
            label,
            machine.len(),
            self.states.len()
        );
        Ok(machine)
    }
}

impl<K> MachineConfig<K>
where
    K: StateKey + Serialize + DeserializeOwned,
{
    pub fn from_json(json: &str) -> Result<Self, ConfigError<K>> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError<K>> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError<K>> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError<K>> {
        Ok(bincode::serialize(self)?)
    }
}
