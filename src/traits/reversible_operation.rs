use std::{any::Any, borrow::Cow};

/// A unit of work that can be applied, rolled back, and report how much memory it keeps alive.
///
/// Implementations are supplied entirely by calling code; the history never looks past the
/// methods of this trait. Operations carry everything they need to apply and undo themselves,
/// usually a shared handle to the state they edit plus the before/after data.
///
/// # Required Methods
///
/// * `is_executed(&self) -> bool`: Whether the forward effect is currently applied.
/// * `stored_bytes(&self) -> u64`: The footprint this operation occupies in the history.
/// * `execute(&mut self) -> bool`: Applies the forward effect. Fails if already executed.
/// * `rollback(&mut self) -> bool`: Reverses the forward effect. Fails if not executed.
/// * `as_any(&self) -> &dyn Any`: Exposes the concrete type so merges can downcast.
///
/// # Provided Methods
///
/// * `try_merge_with_next(&mut self, next) -> bool`: Folds a newer operation into this one.
///   The default never merges.
/// * `description(&self) -> Cow<str>`: A label used in log output and history listings.
///
/// [`ExecutionState`](crate::execution_state::ExecutionState) implements the executed-flag
/// bookkeeping and is the intended building block for `execute` and `rollback`.
///
/// # Example
///
/// ```
/// use std::{any::Any, sync::Arc};
/// use parking_lot::Mutex;
/// use budgeted_history::prelude::*;
///
/// struct AddOperation {
///     target: Arc<Mutex<i64>>,
///     amount: i64,
///     state: ExecutionState,
/// }
///
/// impl ReversibleOperation for AddOperation {
///     fn is_executed(&self) -> bool {
///         self.state.is_executed()
///     }
///
///     fn stored_bytes(&self) -> u64 {
///         std::mem::size_of::<i64>() as u64
///     }
///
///     fn execute(&mut self) -> bool {
///         if !self.state.try_execute("AddOperation") {
///             return false;
///         }
///         *self.target.lock() += self.amount;
///         true
///     }
///
///     fn rollback(&mut self) -> bool {
///         if !self.state.try_rollback("AddOperation") {
///             return false;
///         }
///         *self.target.lock() -= self.amount;
///         true
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
/// }
///
/// let target = Arc::new(Mutex::new(0));
/// let mut history = CommandHistory::default();
/// history.execute(Box::new(AddOperation {
///     target: Arc::clone(&target),
///     amount: 5,
///     state: ExecutionState::new(),
/// }));
/// assert_eq!(*target.lock(), 5);
///
/// assert!(history.undo());
/// assert_eq!(*target.lock(), 0);
/// ```
pub trait ReversibleOperation: Any + Send {
    fn is_executed(&self) -> bool;

    /// Returns the number of bytes this operation keeps alive.
    ///
    /// Called on every add, undo, redo and eviction, so it should be cheap. Operations with
    /// large payloads should cache the figure rather than recompute it.
    fn stored_bytes(&self) -> u64;

    /// Applies the forward effect.
    ///
    /// Returns `false` and leaves everything untouched if the operation is already executed.
    fn execute(&mut self) -> bool;

    /// Reverses the forward effect.
    ///
    /// Returns `false` and leaves everything untouched if the operation is not executed.
    fn rollback(&mut self) -> bool;

    /// Attempts to absorb `next`, a newer operation that is about to be recorded, into `self`.
    ///
    /// `self` is always the newest entry of the undo log and is already executed; `next` has
    /// been executed too. On `true` the history drops `next` and re-reads `self.stored_bytes()`,
    /// so `self` must now undo the effect of both.
    fn try_merge_with_next(&mut self, _next: &dyn ReversibleOperation) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn description(&self) -> Cow<'_, str> {
        Cow::Borrowed("Unknown operation")
    }
}

impl<'a> dyn ReversibleOperation + 'a {
    /// Returns the operation as `T` if that is its concrete type.
    #[must_use]
    pub fn downcast_ref<T: ReversibleOperation>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    #[must_use]
    pub fn is<T: ReversibleOperation>(&self) -> bool {
        self.as_any().is::<T>()
    }
}
