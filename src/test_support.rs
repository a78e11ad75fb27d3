//! Operations shared by the unit tests.

use std::{any::Any, borrow::Cow, sync::Arc};

use parking_lot::Mutex;

use crate::{execution_state::ExecutionState, traits::reversible_operation::ReversibleOperation};

pub fn counter(value: i64) -> Arc<Mutex<i64>> {
    Arc::new(Mutex::new(value))
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Adds `amount` to a shared counter. Mergeable instances absorb later mergeable adds.
pub struct AddOperation {
    pub target: Arc<Mutex<i64>>,
    pub amount: i64,
    pub bytes: u64,
    pub mergeable: bool,
    pub state: ExecutionState,
}

impl AddOperation {
    pub fn new(target: &Arc<Mutex<i64>>, amount: i64, bytes: u64) -> Self {
        Self {
            target: Arc::clone(target),
            amount,
            bytes,
            mergeable: false,
            state: ExecutionState::new(),
        }
    }

    pub fn mergeable(target: &Arc<Mutex<i64>>, amount: i64, bytes: u64) -> Self {
        Self {
            mergeable: true,
            ..Self::new(target, amount, bytes)
        }
    }

    /// Applies the effect up front, for tests recording work done elsewhere.
    pub fn applied(target: &Arc<Mutex<i64>>, amount: i64, bytes: u64) -> Self {
        *target.lock() += amount;
        Self {
            state: ExecutionState::executed(),
            ..Self::new(target, amount, bytes)
        }
    }
}

impl ReversibleOperation for AddOperation {
    fn is_executed(&self) -> bool {
        self.state.is_executed()
    }

    fn stored_bytes(&self) -> u64 {
        self.bytes
    }

    fn execute(&mut self) -> bool {
        if !self.state.try_execute("AddOperation") {
            return false;
        }
        *self.target.lock() += self.amount;
        true
    }

    fn rollback(&mut self) -> bool {
        if !self.state.try_rollback("AddOperation") {
            return false;
        }
        *self.target.lock() -= self.amount;
        true
    }

    fn try_merge_with_next(&mut self, next: &dyn ReversibleOperation) -> bool {
        let Some(next) = next.downcast_ref::<AddOperation>() else {
            return false;
        };
        if !self.mergeable || !next.mergeable || !Arc::ptr_eq(&self.target, &next.target) {
            return false;
        }

        self.amount += next.amount;
        self.bytes += next.bytes;
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn description(&self) -> Cow<'_, str> {
        Cow::Owned(format!("Add({})", self.amount))
    }
}

/// Touches nothing; only occupies `bytes` of history.
pub struct MarkerOperation {
    pub bytes: u64,
    pub state: ExecutionState,
}

impl MarkerOperation {
    pub fn new(bytes: u64) -> Self {
        Self {
            bytes,
            state: ExecutionState::new(),
        }
    }
}

impl ReversibleOperation for MarkerOperation {
    fn is_executed(&self) -> bool {
        self.state.is_executed()
    }

    fn stored_bytes(&self) -> u64 {
        self.bytes
    }

    fn execute(&mut self) -> bool {
        self.state.try_execute("MarkerOperation")
    }

    fn rollback(&mut self) -> bool {
        self.state.try_rollback("MarkerOperation")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Reports a different footprint depending on whether it is executed, like an operation that
/// only captures redo data once it has been rolled back.
pub struct ResizingOperation {
    pub executed_bytes: u64,
    pub rolled_back_bytes: u64,
    pub state: ExecutionState,
}

impl ResizingOperation {
    pub fn new(executed_bytes: u64, rolled_back_bytes: u64) -> Self {
        Self {
            executed_bytes,
            rolled_back_bytes,
            state: ExecutionState::new(),
        }
    }
}

impl ReversibleOperation for ResizingOperation {
    fn is_executed(&self) -> bool {
        self.state.is_executed()
    }

    fn stored_bytes(&self) -> u64 {
        if self.state.is_executed() {
            self.executed_bytes
        } else {
            self.rolled_back_bytes
        }
    }

    fn execute(&mut self) -> bool {
        self.state.try_execute("ResizingOperation")
    }

    fn rollback(&mut self) -> bool {
        self.state.try_rollback("ResizingOperation")
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
