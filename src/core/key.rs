//! State keys.

use std::fmt::Debug;
use std::hash::Hash;

/// Identifier of a state within one machine.
///
/// Any small `Copy` value that can be hashed and compared qualifies: plain
/// integers, or enumerations declared with [`state_keys!`](crate::state_keys).
/// Keys are resolved once at setup; there is no lookup by type name at runtime.
pub trait StateKey: Copy + Eq + Hash + Debug + 'static {}

impl<T> StateKey for T where T: Copy + Eq + Hash + Debug + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_key<K: StateKey>(_: K) {}

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum Stance {
        Standing,
    }

    #[test]
    fn integers_and_enums_are_keys() {
        assert_key(0i32);
        assert_key(7u8);
        assert_key(Stance::Standing);
    }
}
