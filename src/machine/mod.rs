//! The machine that owns states and drives them tick by tick.
//!
//! Setup happens on an unstarted machine; after `start` the host calls the
//! tick entry points and transitions are validated against the whitelist.

mod error;
#[allow(clippy::module_inception)]
mod machine;

pub use error::{MachineError, RefusalReason, TransitionRefused};
pub use machine::{MachineStatus, StateMachine};
