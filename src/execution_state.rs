use thiserror::Error;

/// Misuse of an operation's execute/rollback pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OperationStateError {
    #[error("operation is already executed")]
    AlreadyExecuted,
    #[error("operation is not executed, nothing to roll back")]
    NotExecuted,
}

/// Tracks whether an operation's forward effect is currently applied.
///
/// Embed one in every [`ReversibleOperation`](crate::traits::reversible_operation::ReversibleOperation)
/// and gate `execute` / `rollback` through it so that an operation can never be applied twice in a
/// row or rolled back twice in a row.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionState {
    executed: bool,
}

impl ExecutionState {
    #[must_use]
    pub const fn new() -> Self {
        Self { executed: false }
    }

    /// State for an operation whose effect was applied before it was constructed.
    #[must_use]
    pub const fn executed() -> Self {
        Self { executed: true }
    }

    #[must_use]
    pub const fn is_executed(&self) -> bool {
        self.executed
    }

    /// Marks the operation executed.
    ///
    /// # Errors
    ///
    /// Returns [`OperationStateError::AlreadyExecuted`] without changing state if the operation
    /// is already executed.
    pub fn begin_execute(&mut self) -> Result<(), OperationStateError> {
        if self.executed {
            return Err(OperationStateError::AlreadyExecuted);
        }

        self.executed = true;
        Ok(())
    }

    /// Marks the operation rolled back.
    ///
    /// # Errors
    ///
    /// Returns [`OperationStateError::NotExecuted`] without changing state if the operation is
    /// not executed.
    pub fn begin_rollback(&mut self) -> Result<(), OperationStateError> {
        if !self.executed {
            return Err(OperationStateError::NotExecuted);
        }

        self.executed = false;
        Ok(())
    }

    /// Like [`begin_execute`](Self::begin_execute), but logs the failure and reports it as `false`.
    pub fn try_execute(&mut self, operation: &str) -> bool {
        match self.begin_execute() {
            Ok(()) => true,
            Err(err) => {
                log::error!("[history] {operation}: execute refused: {err}");
                false
            }
        }
    }

    /// Like [`begin_rollback`](Self::begin_rollback), but logs the failure and reports it as `false`.
    pub fn try_rollback(&mut self, operation: &str) -> bool {
        match self.begin_rollback() {
            Ok(()) => true,
            Err(err) => {
                log::error!("[history] {operation}: rollback refused: {err}");
                false
            }
        }
    }
}
