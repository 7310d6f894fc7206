//! Weak handle that lets states request transitions.

use super::key::StateKey;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use uuid::Uuid;

/// Queue of transition requests shared between a machine and its handles.
pub(crate) type RequestQueue<K> = Rc<RefCell<VecDeque<K>>>;

/// Handle passed to [`State::initialize`](super::State::initialize).
///
/// The handle only holds a weak reference to the machine's request queue,
/// so a state caching it never keeps the machine alive. Requests are resolved
/// by the machine as soon as the hook that issued them returns.
#[derive(Clone, Debug)]
pub struct MachineHandle<K: StateKey> {
    machine_id: Uuid,
    requests: Weak<RefCell<VecDeque<K>>>,
}

impl<K: StateKey> MachineHandle<K> {
    pub(crate) fn new(machine_id: Uuid, requests: &RequestQueue<K>) -> Self {
        Self {
            machine_id,
            requests: Rc::downgrade(requests),
        }
    }

    /// Id of the machine this handle points at.
    pub fn machine_id(&self) -> Uuid {
        self.machine_id
    }

    /// Ask the machine to move to `to`.
    ///
    /// Returns `false` if the machine no longer exists. A `true` return only
    /// means the request was queued; the machine still validates it against
    /// its whitelist and logs a refusal if the edge is not allowed.
    pub fn attempt_transition(&self, to: K) -> bool {
        match self.requests.upgrade() {
            Some(queue) => {
                queue.borrow_mut().push_back(to);
                true
            }
            None => false,
        }
    }

    /// Whether the machine behind this handle is still alive.
    pub fn is_alive(&self) -> bool {
        self.requests.strong_count() > 0
    }
}
