//! Tick-driven state machine.

use crate::core::{
    MachineHandle, RequestQueue, State, StateHistory, StateKey, StateTransition, TransitionTable,
    DEFAULT_HISTORY_CAPACITY,
};
use crate::machine::error::{MachineError, RefusalReason, TransitionRefused};
use chrono::Utc;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;
use uuid::Uuid;

/// Lifecycle of the machine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineStatus {
    /// Accepting states and edges, no hook has run yet
    Unstarted,

    /// Dispatching ticks to the current state
    Running,

    /// The current state has been exited; ticks are rejected
    Stopped,
}

#[derive(Clone, Copy)]
enum Phase {
    Update,
    FixedUpdate,
    LateUpdate,
}

struct Slot<K: StateKey> {
    key: K,
    state: Box<dyn State<K>>,
}

/// State machine owning its states and a whitelist of transitions.
///
/// States and edges are registered during setup. [`start`](Self::start)
/// initializes every state in registration order and enters the first one.
/// After that the host drives [`tick`](Self::tick),
/// [`fixed_tick`](Self::fixed_tick) and [`late_tick`](Self::late_tick), and
/// transitions only happen through [`attempt_transition`](Self::attempt_transition),
/// either called directly or requested by a state through its
/// [`MachineHandle`].
///
/// # Example
///
/// ```rust
/// use tickfsm::core::State;
/// use tickfsm::StateMachine;
///
/// struct Named(&'static str);
///
/// impl State<i32> for Named {
///     fn identifier(&self) -> &str {
///         self.0
///     }
/// }
///
/// let mut machine = StateMachine::new();
/// machine.register_state(0, Named("Idle")).unwrap();
/// machine.register_state(1, Named("Moving")).unwrap();
/// machine.allow_transition(0, 1).unwrap();
/// machine.start().unwrap();
///
/// assert!(machine.attempt_transition(1).is_ok());
/// assert!(machine.attempt_transition(0).is_err());
/// assert_eq!(machine.current_key(), Some(1));
/// ```
pub struct StateMachine<K: StateKey> {
    id: Uuid,
    slots: Vec<Slot<K>>,
    index: HashMap<K, usize>,
    transitions: TransitionTable<K>,
    current: Option<usize>,
    status: MachineStatus,
    requests: RequestQueue<K>,
    history: StateHistory<K>,
}

impl<K: StateKey> StateMachine<K> {
    /// Create an unstarted machine with the default history capacity.
    pub fn new() -> Self {
        Self::with_history_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    pub fn with_history_capacity(capacity: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            slots: Vec::new(),
            index: HashMap::new(),
            transitions: TransitionTable::new(),
            current: None,
            status: MachineStatus::Unstarted,
            requests: Rc::new(RefCell::new(VecDeque::new())),
            history: StateHistory::with_capacity(capacity),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> MachineStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == MachineStatus::Running
    }

    /// Register `state` under `key`.
    ///
    /// Duplicate keys are rejected; the first registration stays in place.
    pub fn register_state<S>(&mut self, key: K, state: S) -> Result<(), MachineError<K>>
    where
        S: State<K> + 'static,
    {
        self.register_boxed(key, Box::new(state))
    }

    /// Register an already boxed state under `key`.
    pub fn register_boxed(
        &mut self,
        key: K,
        state: Box<dyn State<K>>,
    ) -> Result<(), MachineError<K>> {
        self.ensure_unstarted()?;
        if self.index.contains_key(&key) {
            return Err(MachineError::DuplicateKey { key });
        }
        self.index.insert(key, self.slots.len());
        self.slots.push(Slot { key, state });
        Ok(())
    }

    /// Whitelist the edge `from -> to`. Adding an existing edge is a no-op.
    pub fn allow_transition(&mut self, from: K, to: K) -> Result<(), MachineError<K>> {
        self.ensure_unstarted()?;
        self.transitions.allow(from, to);
        Ok(())
    }

    pub fn contains_transition(&self, from: K, to: K) -> bool {
        self.transitions.contains(from, to)
    }

    pub fn transitions(&self) -> &TransitionTable<K> {
        &self.transitions
    }

    /// Registered keys in registration order.
    pub fn state_keys(&self) -> impl Iterator<Item = K> + '_ {
        self.slots.iter().map(|slot| slot.key)
    }

    pub fn state(&self, key: K) -> Option<&dyn State<K>> {
        let index = *self.index.get(&key)?;
        Some(self.slots[index].state.as_ref())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Key of the current state.
    ///
    /// `None` before `start`. After `stop` this is the state that was exited.
    pub fn current_key(&self) -> Option<K> {
        self.current.map(|index| self.slots[index].key)
    }

    pub fn current_state(&self) -> Option<&dyn State<K>> {
        self.current.map(|index| self.slots[index].state.as_ref())
    }

    pub fn history(&self) -> &StateHistory<K> {
        &self.history
    }

    /// Finish setup and enter the first registered state.
    ///
    /// Calls `initialize` on every state in registration order, then
    /// `on_enter` on the first one. Fails without running any hook if the
    /// registry is empty or the machine was already started.
    pub fn start(&mut self) -> Result<(), MachineError<K>> {
        self.ensure_unstarted()?;
        if self.slots.is_empty() {
            return Err(MachineError::EmptyRegistry);
        }

        for slot in &mut self.slots {
            slot.state.initialize(MachineHandle::new(self.id, &self.requests));
        }

        self.current = Some(0);
        self.status = MachineStatus::Running;
        tracing::info!(
            "machine {} started in {:?} ({} states, {} transitions)",
            self.id,
            self.slots[0].key,
            self.slots.len(),
            self.transitions.len()
        );

        self.slots[0].state.on_enter();
        self.resolve_requests();
        Ok(())
    }

    /// Forward a regular tick to the current state.
    pub fn tick(&mut self) -> Result<(), MachineError<K>> {
        self.dispatch(Phase::Update)
    }

    /// Forward a fixed tick to the current state.
    pub fn fixed_tick(&mut self) -> Result<(), MachineError<K>> {
        self.dispatch(Phase::FixedUpdate)
    }

    /// Forward a late tick to the current state, then let it check its
    /// transitions.
    pub fn late_tick(&mut self) -> Result<(), MachineError<K>> {
        self.dispatch(Phase::LateUpdate)
    }

    /// Move to `to` if the edge from the current state is whitelisted and
    /// `to` is registered.
    ///
    /// On success the current state's `on_exit` runs, the current state is
    /// swapped, then the new state's `on_enter` runs. On refusal nothing
    /// changes and the refusal is logged and returned.
    pub fn attempt_transition(&mut self, to: K) -> Result<(), TransitionRefused<K>> {
        let from = match self.running_index() {
            Ok(index) => self.slots[index].key,
            Err(_) => return Err(self.refuse(None, to, RefusalReason::NotRunning)),
        };

        if !self.index.contains_key(&to) {
            return Err(self.refuse(Some(from), to, RefusalReason::UnknownTarget));
        }
        if !self.transitions.contains(from, to) {
            return Err(self.refuse(Some(from), to, RefusalReason::NotWhitelisted));
        }

        self.force_transition(to)
            .expect("target key was validated against the registry");
        Ok(())
    }

    /// Exit the current state and stop dispatching ticks.
    ///
    /// Requests still queued through handles are discarded.
    pub fn stop(&mut self) -> Result<(), MachineError<K>> {
        let index = self.running_index()?;
        self.exit_and_halt(index);
        Ok(())
    }

    fn exit_and_halt(&mut self, index: usize) {
        self.slots[index].state.on_exit();
        self.status = MachineStatus::Stopped;
        self.requests.borrow_mut().clear();
        tracing::info!(
            "machine {} stopped in {:?}",
            self.id,
            self.slots[index].key
        );
    }

    fn force_transition(&mut self, to: K) -> Result<(), MachineError<K>> {
        let next = *self
            .index
            .get(&to)
            .ok_or(MachineError::UnknownState { key: to })?;
        let previous = self.running_index()?;
        let from = self.slots[previous].key;

        self.slots[previous].state.on_exit();
        self.current = Some(next);
        self.slots[next].state.on_enter();

        self.history.record(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
        });
        tracing::debug!(
            "machine {} transitioned {:?} ({}) -> {:?} ({})",
            self.id,
            from,
            self.slots[previous].state.identifier(),
            to,
            self.slots[next].state.identifier()
        );
        Ok(())
    }

    fn dispatch(&mut self, phase: Phase) -> Result<(), MachineError<K>> {
        let index = self.running_index()?;
        let state = &mut self.slots[index].state;
        match phase {
            Phase::Update => state.on_update(),
            Phase::FixedUpdate => state.on_fixed_update(),
            Phase::LateUpdate => {
                state.on_late_update();
                state.check_transitions();
            }
        }
        self.resolve_requests();
        Ok(())
    }

    /// Resolve requests queued through handles so far. Requests queued while
    /// resolving wait for the next dispatch.
    fn resolve_requests(&mut self) {
        let pending: Vec<K> = self.requests.borrow_mut().drain(..).collect();
        for to in pending {
            // refusals are logged in attempt_transition
            let _ = self.attempt_transition(to);
        }
    }

    fn refuse(&self, from: Option<K>, to: K, reason: RefusalReason) -> TransitionRefused<K> {
        let current = self
            .current_state()
            .map(|state| state.identifier())
            .unwrap_or("<none>");
        tracing::debug!(
            "machine {} cannot transition to {:?} from current state {}: {}",
            self.id,
            to,
            current,
            reason.as_str()
        );
        TransitionRefused { from, to, reason }
    }

    fn running_index(&self) -> Result<usize, MachineError<K>> {
        match (self.status, self.current) {
            (MachineStatus::Running, Some(index)) => Ok(index),
            _ => Err(MachineError::NotRunning),
        }
    }

    fn ensure_unstarted(&self) -> Result<(), MachineError<K>> {
        match self.status {
            MachineStatus::Unstarted => Ok(()),
            _ => Err(MachineError::AlreadyStarted),
        }
    }
}

impl<K: StateKey> Default for StateMachine<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> fmt::Debug for StateMachine<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("id", &self.id)
            .field("status", &self.status)
            .field("current", &self.current_key())
            .field("states", &self.state_keys().collect::<Vec<_>>())
            .field("transitions", &self.transitions.edges())
            .finish()
    }
}

impl<K: StateKey> Drop for StateMachine<K> {
    fn drop(&mut self) {
        if let (MachineStatus::Running, Some(index)) = (self.status, self.current) {
            self.exit_and_halt(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    type Log = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        log: Log,
        machine: Option<MachineHandle<i32>>,
        requests: Rc<RefCell<Vec<i32>>>,
        enter_request: Option<i32>,
        exit_request: Option<i32>,
    }

    impl Probe {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: Rc::clone(log),
                machine: None,
                requests: Rc::default(),
                enter_request: None,
                exit_request: None,
            }
        }

        fn requesting_on_enter(mut self, to: i32) -> Self {
            self.enter_request = Some(to);
            self
        }

        fn requesting_on_exit(mut self, to: i32) -> Self {
            self.exit_request = Some(to);
            self
        }

        fn push(&self, hook: &str) {
            self.log.borrow_mut().push(format!("{}:{}", self.name, hook));
        }

        fn request(&self, to: Option<i32>) {
            if let (Some(to), Some(machine)) = (to, &self.machine) {
                machine.attempt_transition(to);
            }
        }
    }

    impl State<i32> for Probe {
        fn identifier(&self) -> &str {
            self.name
        }

        fn initialize(&mut self, machine: MachineHandle<i32>) {
            self.push("init");
            self.machine = Some(machine);
        }

        fn on_enter(&mut self) {
            self.push("enter");
            self.request(self.enter_request);
        }

        fn on_update(&mut self) {
            self.push("update");
        }

        fn on_fixed_update(&mut self) {
            self.push("fixed");
        }

        fn on_late_update(&mut self) {
            self.push("late");
        }

        fn on_exit(&mut self) {
            self.push("exit");
            self.request(self.exit_request);
        }

        fn check_transitions(&mut self) {
            self.push("check");
            let pending: Vec<i32> = self.requests.borrow_mut().drain(..).collect();
            for to in pending {
                self.request(Some(to));
            }
        }
    }

    fn take(log: &Log) -> Vec<String> {
        log.borrow_mut().drain(..).collect()
    }

    fn two_state_machine(log: &Log) -> StateMachine<i32> {
        let mut machine = StateMachine::new();
        machine.register_state(0, Probe::new("A", log)).unwrap();
        machine.register_state(1, Probe::new("B", log)).unwrap();
        machine.allow_transition(0, 1).unwrap();
        machine
    }

    #[test]
    fn start_initializes_all_then_enters_first() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);

        machine.start().unwrap();

        assert_eq!(take(&log), vec!["A:init", "B:init", "A:enter"]);
        assert_eq!(machine.current_key(), Some(0));
        assert_eq!(machine.status(), MachineStatus::Running);
    }

    #[test]
    fn start_on_empty_registry_fails() {
        let mut machine: StateMachine<i32> = StateMachine::new();
        assert_eq!(machine.start(), Err(MachineError::EmptyRegistry));
        assert_eq!(machine.status(), MachineStatus::Unstarted);
    }

    #[test]
    fn start_twice_is_rejected() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        take(&log);

        assert_eq!(machine.start(), Err(MachineError::AlreadyStarted));
        assert!(take(&log).is_empty());
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);

        let result = machine.register_state(1, Probe::new("C", &log));

        assert_eq!(result, Err(MachineError::DuplicateKey { key: 1 }));
        assert_eq!(machine.len(), 2);
        assert_eq!(machine.state(1).map(|s| s.identifier()), Some("B"));
    }

    #[test]
    fn setup_is_closed_after_start() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();

        assert_eq!(
            machine.register_state(2, Probe::new("C", &log)),
            Err(MachineError::AlreadyStarted)
        );
        assert_eq!(
            machine.allow_transition(1, 0),
            Err(MachineError::AlreadyStarted)
        );
    }

    #[test]
    fn ticks_before_start_are_rejected() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);

        assert_eq!(machine.tick(), Err(MachineError::NotRunning));
        assert_eq!(machine.fixed_tick(), Err(MachineError::NotRunning));
        assert_eq!(machine.late_tick(), Err(MachineError::NotRunning));
        assert!(take(&log).is_empty());
    }

    #[test]
    fn tick_cycle_runs_hooks_in_order() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        take(&log);

        machine.tick().unwrap();
        machine.fixed_tick().unwrap();
        machine.late_tick().unwrap();

        assert_eq!(take(&log), vec!["A:update", "A:fixed", "A:late", "A:check"]);
    }

    #[test]
    fn accepted_transition_exits_then_enters() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        take(&log);

        assert!(machine.attempt_transition(1).is_ok());

        assert_eq!(take(&log), vec!["A:exit", "B:enter"]);
        assert_eq!(machine.current_key(), Some(1));
        assert_eq!(machine.history().get_path(), vec![&0, &1]);
    }

    #[test]
    fn unknown_target_is_refused() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        take(&log);

        let refused = machine.attempt_transition(7).unwrap_err();

        assert_eq!(refused.reason, RefusalReason::UnknownTarget);
        assert_eq!(refused.from, Some(0));
        assert_eq!(machine.current_key(), Some(0));
        assert!(take(&log).is_empty());
    }

    #[test]
    fn edge_outside_whitelist_is_refused() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        machine.attempt_transition(1).unwrap();
        take(&log);

        let refused = machine.attempt_transition(0).unwrap_err();

        assert_eq!(refused.reason, RefusalReason::NotWhitelisted);
        assert_eq!(machine.current_key(), Some(1));
        assert!(take(&log).is_empty());
        assert_eq!(machine.history().len(), 1);
    }

    #[test]
    fn attempt_before_start_is_refused() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);

        let refused = machine.attempt_transition(1).unwrap_err();
        assert_eq!(refused.reason, RefusalReason::NotRunning);
        assert_eq!(refused.from, None);
    }

    #[test]
    fn check_transitions_request_is_resolved_in_same_late_tick() {
        let log = Log::default();
        let first = Probe::new("A", &log);
        let requests = Rc::clone(&first.requests);

        let mut machine = StateMachine::new();
        machine.register_state(0, first).unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.allow_transition(0, 1).unwrap();
        machine.start().unwrap();
        take(&log);

        requests.borrow_mut().push(1);
        machine.late_tick().unwrap();

        assert_eq!(take(&log), vec!["A:late", "A:check", "A:exit", "B:enter"]);
        assert_eq!(machine.current_key(), Some(1));
    }

    #[test]
    fn refused_request_from_state_keeps_ticking() {
        let log = Log::default();
        let first = Probe::new("A", &log);
        let requests = Rc::clone(&first.requests);

        let mut machine = StateMachine::new();
        machine.register_state(0, first).unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.start().unwrap();
        take(&log);

        requests.borrow_mut().push(1);
        machine.late_tick().unwrap();
        machine.tick().unwrap();

        assert_eq!(take(&log), vec!["A:late", "A:check", "A:update"]);
        assert_eq!(machine.current_key(), Some(0));
    }

    #[test]
    fn request_from_first_on_enter_is_resolved_during_start() {
        let log = Log::default();
        let mut machine = StateMachine::new();
        machine
            .register_state(0, Probe::new("A", &log).requesting_on_enter(1))
            .unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.allow_transition(0, 1).unwrap();

        machine.start().unwrap();

        assert_eq!(
            take(&log),
            vec!["A:init", "B:init", "A:enter", "A:exit", "B:enter"]
        );
        assert_eq!(machine.current_key(), Some(1));
    }

    #[test]
    fn requests_from_exit_wait_for_next_dispatch() {
        let log = Log::default();
        let mut machine = StateMachine::new();
        machine
            .register_state(
                0,
                Probe::new("A", &log)
                    .requesting_on_enter(1)
                    .requesting_on_exit(0),
            )
            .unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.allow_transition(0, 1).unwrap();
        machine.allow_transition(1, 0).unwrap();

        machine.start().unwrap();
        assert_eq!(
            take(&log),
            vec!["A:init", "B:init", "A:enter", "A:exit", "B:enter"]
        );
        assert_eq!(machine.current_key(), Some(1));
        assert_eq!(machine.requests.borrow().len(), 1);

        machine.tick().unwrap();

        assert_eq!(take(&log), vec!["B:update", "B:exit", "A:enter"]);
        assert_eq!(machine.current_key(), Some(0));
    }

    #[test]
    fn deferred_request_is_judged_against_new_current_state() {
        let log = Log::default();
        let mut machine = StateMachine::new();
        machine
            .register_state(
                0,
                Probe::new("A", &log)
                    .requesting_on_enter(1)
                    .requesting_on_exit(0),
            )
            .unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.allow_transition(0, 1).unwrap();
        machine.start().unwrap();
        take(&log);

        machine.tick().unwrap();

        assert_eq!(take(&log), vec!["B:update"]);
        assert_eq!(machine.current_key(), Some(1));
        assert!(machine.requests.borrow().is_empty());
    }

    #[test]
    fn several_requests_resolve_in_order() {
        let log = Log::default();
        let first = Probe::new("A", &log);
        let requests = Rc::clone(&first.requests);

        let mut machine = StateMachine::new();
        machine.register_state(0, first).unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.register_state(2, Probe::new("C", &log)).unwrap();
        machine.allow_transition(0, 1).unwrap();
        machine.allow_transition(1, 2).unwrap();
        machine.start().unwrap();
        take(&log);

        requests.borrow_mut().extend([1, 2]);
        machine.late_tick().unwrap();

        assert_eq!(
            take(&log),
            vec!["A:late", "A:check", "A:exit", "B:enter", "B:exit", "C:enter"]
        );
        assert_eq!(machine.current_key(), Some(2));
        assert_eq!(machine.history().get_path(), vec![&0, &1, &2]);
    }

    #[test]
    fn out_of_order_requests_are_refused_individually() {
        let log = Log::default();
        let first = Probe::new("A", &log);
        let requests = Rc::clone(&first.requests);

        let mut machine = StateMachine::new();
        machine.register_state(0, first).unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.register_state(2, Probe::new("C", &log)).unwrap();
        machine.allow_transition(0, 1).unwrap();
        machine.allow_transition(1, 2).unwrap();
        machine.start().unwrap();
        take(&log);

        requests.borrow_mut().extend([2, 1]);
        machine.late_tick().unwrap();

        assert_eq!(take(&log), vec!["A:late", "A:check", "A:exit", "B:enter"]);
        assert_eq!(machine.current_key(), Some(1));
    }

    #[test]
    fn stop_discards_pending_requests() {
        let log = Log::default();
        let mut machine = StateMachine::new();
        machine
            .register_state(
                0,
                Probe::new("A", &log)
                    .requesting_on_enter(1)
                    .requesting_on_exit(0),
            )
            .unwrap();
        machine.register_state(1, Probe::new("B", &log)).unwrap();
        machine.allow_transition(0, 1).unwrap();
        machine.allow_transition(1, 0).unwrap();
        machine.start().unwrap();
        assert_eq!(machine.requests.borrow().len(), 1);
        take(&log);

        machine.stop().unwrap();

        assert!(machine.requests.borrow().is_empty());
        assert_eq!(take(&log), vec!["B:exit"]);
        assert_eq!(machine.current_key(), Some(1));
    }

    #[test]
    fn self_loop_reenters_when_authored() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        assert!(machine.attempt_transition(0).is_err());

        let mut machine = StateMachine::new();
        machine.register_state(0, Probe::new("A", &log)).unwrap();
        machine.allow_transition(0, 0).unwrap();
        machine.start().unwrap();
        take(&log);

        assert!(machine.attempt_transition(0).is_ok());
        assert_eq!(take(&log), vec!["A:exit", "A:enter"]);
    }

    #[test]
    fn stop_exits_current_state() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        take(&log);

        machine.stop().unwrap();

        assert_eq!(take(&log), vec!["A:exit"]);
        assert_eq!(machine.status(), MachineStatus::Stopped);
        assert_eq!(machine.current_key(), Some(0));
        assert_eq!(machine.tick(), Err(MachineError::NotRunning));
        assert_eq!(machine.stop(), Err(MachineError::NotRunning));
    }

    #[test]
    fn dropping_running_machine_exits_current_state() {
        let log = Log::default();
        let mut machine = two_state_machine(&log);
        machine.start().unwrap();
        take(&log);

        drop(machine);

        assert_eq!(take(&log), vec!["A:exit"]);
    }

    #[test]
    fn handle_outliving_machine_reports_it_gone() {
        let log = Log::default();
        let mut machine = StateMachine::new();
        machine.register_state(0, Probe::new("A", &log)).unwrap();
        machine.start().unwrap();

        let handle = MachineHandle::new(machine.id(), &machine.requests);
        assert!(handle.is_alive());
        assert_eq!(handle.machine_id(), machine.id());
        drop(machine);

        assert!(!handle.is_alive());
        assert!(!handle.attempt_transition(0));
    }

    #[test]
    fn debug_output_lists_keys() {
        let log = Log::default();
        let machine = two_state_machine(&log);
        let debug = format!("{:?}", machine);

        assert!(debug.contains("states: [0, 1]"));
        assert!(debug.contains("Unstarted"));
    }
}
