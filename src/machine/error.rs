//! Machine errors and transition refusals.

use crate::core::StateKey;
use thiserror::Error;

/// Setup and misuse errors.
///
/// These indicate a misconfigured machine and are returned immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MachineError<K: StateKey> {
    #[error("state key {key:?} is already registered")]
    DuplicateKey { key: K },

    #[error("cannot start a machine with no registered states")]
    EmptyRegistry,

    #[error("machine has already been started")]
    AlreadyStarted,

    #[error("machine is not running")]
    NotRunning,

    #[error("state key {key:?} is not registered")]
    UnknownState { key: K },
}

/// Why a transition request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefusalReason {
    /// The machine has not been started or has been stopped
    NotRunning,

    /// No state is registered under the target key
    UnknownTarget,

    /// The (from, to) edge is not in the whitelist
    NotWhitelisted,
}

impl RefusalReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefusalReason::NotRunning => "machine not running",
            RefusalReason::UnknownTarget => "unknown target state",
            RefusalReason::NotWhitelisted => "edge not whitelisted",
        }
    }
}

/// A refused transition request.
///
/// Refusals are expected runtime traffic: the machine state is untouched
/// and the tick loop carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("transition refused from {from:?} to {to:?}: {}", .reason.as_str())]
pub struct TransitionRefused<K: StateKey> {
    /// Current key at the time of the request, if the machine was running
    pub from: Option<K>,
    pub to: K,
    pub reason: RefusalReason,
}
