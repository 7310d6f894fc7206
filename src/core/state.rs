//! Core State trait for tick-driven machines.
//!
//! A state is a unit of behavior owned by a [`StateMachine`](crate::StateMachine).
//! The machine drives its hooks in tick order; the state only ever asks
//! for transitions through the [`MachineHandle`] it receives at initialization.

use super::handle::MachineHandle;
use super::key::StateKey;

/// Trait for machine states.
///
/// Every hook has an empty default, so a state implements only what it
/// needs. Within a single tick cycle the machine calls, on the current state,
/// `on_update`, `on_fixed_update`, `on_late_update` and finally
/// `check_transitions`.
///
/// # Example
///
/// ```rust
/// use tickfsm::core::{MachineHandle, State};
///
/// struct Idle {
///     machine: Option<MachineHandle<i32>>,
///     input: bool,
/// }
///
/// impl State<i32> for Idle {
///     fn identifier(&self) -> &str {
///         "Idle"
///     }
///
///     fn initialize(&mut self, machine: MachineHandle<i32>) {
///         self.machine = Some(machine);
///     }
///
///     fn check_transitions(&mut self) {
///         if self.input {
///             if let Some(machine) = &self.machine {
///                 machine.attempt_transition(1);
///             }
///         }
///     }
/// }
/// ```
pub trait State<K: StateKey> {
    /// Human-readable name used in diagnostics.
    fn identifier(&self) -> &str;

    /// Called exactly once, after every state is registered and before the
    /// machine enters any state.
    ///
    /// The handle may be cached; it holds only a weak reference to the machine.
    fn initialize(&mut self, _machine: MachineHandle<K>) {}

    /// Called each time the machine enters this state, after the previous
    /// state's `on_exit`.
    fn on_enter(&mut self) {}

    /// Called once per regular tick while this state is current.
    fn on_update(&mut self) {}

    /// Called once per fixed tick while this state is current.
    fn on_fixed_update(&mut self) {}

    /// Called once per late tick while this state is current.
    fn on_late_update(&mut self) {}

    /// Called when the machine leaves this state, before the next state's
    /// `on_enter`.
    fn on_exit(&mut self) {}

    /// Called at the end of every late tick, after `on_late_update`.
    ///
    /// Evaluate exit conditions here and request a transition through the
    /// handle. Never mutate machine bookkeeping directly.
    fn check_transitions(&mut self) {}
}
