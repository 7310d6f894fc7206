//! Builder API for ergonomic machine construction.
//!
//! This module provides a fluent builder and the `state_keys!` macro for
//! declaring typed keys with stable integer values.

pub mod machine;
pub mod macros;

pub use machine::MachineBuilder;
