//! Core building blocks of a machine.
//!
//! - State keys and the `State` trait with its lifecycle hooks
//! - Transition edges and the whitelist table
//! - The weak handle states use to request transitions
//! - Bounded transition history

mod handle;
mod history;
mod key;
mod state;
mod transition;

pub(crate) use handle::RequestQueue;

pub use handle::MachineHandle;
pub use history::{StateHistory, StateTransition, DEFAULT_HISTORY_CAPACITY};
pub use key::StateKey;
pub use state::State;
pub use transition::{Edge, TransitionTable};
