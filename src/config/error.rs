//! Configuration errors.

use crate::core::StateKey;
use crate::machine::MachineError;
use thiserror::Error;

/// A single problem found while validating a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation<K: StateKey> {
    #[error("no states declared")]
    NoStates,

    #[error("state key {key:?} is declared more than once")]
    DuplicateKey { key: K },

    #[error("transition {from:?} -> {to:?} names undeclared key {key:?}")]
    UndeclaredKey { from: K, to: K, key: K },
}

/// Errors that can occur while loading or instantiating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError<K: StateKey> {
    #[error("invalid machine configuration: {}", describe(.0))]
    Invalid(Vec<ConfigViolation<K>>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Binary(#[from] bincode::Error),

    #[error(transparent)]
    Machine(#[from] MachineError<K>),
}

fn describe<K: StateKey>(violations: &[ConfigViolation<K>]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
