//! Tickfsm: a tick-driven finite state machine
//!
//! A machine owns a set of states keyed by a small `Copy` key, a whitelist
//! of permitted transitions, and a pointer to the current state. The host
//! drives it explicitly, once per frame or simulation step, so it runs and
//! tests without any engine behind it.
//!
//! # Core Concepts
//!
//! - **State**: behavior with lifecycle hooks via the `State` trait
//! - **Whitelist**: directed `(from, to)` edges; anything else is refused
//! - **Ticks**: `tick`, `fixed_tick` and `late_tick`, forwarded to the current state
//! - **Handle**: weak back-reference states use to request transitions
//!
//! # Example
//!
//! ```rust
//! use tickfsm::core::{MachineHandle, State};
//! use tickfsm::{state_keys, MachineBuilder};
//!
//! state_keys! {
//!     enum Door {
//!         Closed = 0,
//!         Open = 1,
//!     }
//! }
//!
//! struct Closed {
//!     machine: Option<MachineHandle<Door>>,
//!     pushed: bool,
//! }
//!
//! impl State<Door> for Closed {
//!     fn identifier(&self) -> &str {
//!         "Closed"
//!     }
//!
//!     fn initialize(&mut self, machine: MachineHandle<Door>) {
//!         self.machine = Some(machine);
//!     }
//!
//!     fn check_transitions(&mut self) {
//!         if let (true, Some(machine)) = (self.pushed, &self.machine) {
//!             machine.attempt_transition(Door::Open);
//!         }
//!     }
//! }
//!
//! struct Open;
//!
//! impl State<Door> for Open {
//!     fn identifier(&self) -> &str {
//!         "Open"
//!     }
//! }
//!
//! let mut machine = MachineBuilder::new()
//!     .state(Door::Closed, Closed { machine: None, pushed: true })
//!     .state(Door::Open, Open)
//!     .allow(Door::Closed, Door::Open)
//!     .start()
//!     .unwrap();
//!
//! machine.tick().unwrap();
//! machine.fixed_tick().unwrap();
//! machine.late_tick().unwrap();
//!
//! assert_eq!(machine.current_key(), Some(Door::Open));
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::MachineBuilder;
pub use config::{ConfigError, MachineConfig, StateEntry};
pub use core::{Edge, MachineHandle, State, StateKey};
pub use machine::{MachineError, MachineStatus, RefusalReason, StateMachine, TransitionRefused};
