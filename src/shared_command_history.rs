use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};

use crate::{
    command_history::CommandHistory, config::HistoryConfig,
    traits::reversible_operation::ReversibleOperation,
};

static GLOBAL: Lazy<Arc<SharedCommandHistory>> =
    Lazy::new(|| SharedCommandHistory::new(HistoryConfig::default()));

/// A [`CommandHistory`] behind a single lock, for histories reached from more than one place.
///
/// Every call takes the lock for its whole duration, so an operation's `execute` / `rollback`
/// runs while the history is locked and must not call back into the same history.
///
/// [`global`](Self::global) hands out one lazily created, process-wide instance. Code that wants
/// isolation, tests in particular, should construct its own with [`new`](Self::new).
#[derive(Debug)]
pub struct SharedCommandHistory {
    inner: Mutex<CommandHistory>,
}

impl SharedCommandHistory {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(CommandHistory::new(config)),
        })
    }

    /// The process-wide history, created with [`HistoryConfig::default`] on first use.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Replaces the whole history with a fresh one built from `config`.
    ///
    /// Existing entries are dropped without being rolled back. Meant for session restarts and for
    /// tests that share the [`global`](Self::global) instance.
    pub fn reinitialize(&self, config: HistoryConfig) {
        let previous = std::mem::replace(&mut *self.inner.lock(), CommandHistory::new(config));
        log::debug!("[history] reinitialized, dropped {previous:?}");
    }

    /// Locks the history for a sequence of calls or for inspection.
    #[must_use]
    pub fn lock(&self) -> MutexGuard<'_, CommandHistory> {
        self.inner.lock()
    }

    pub fn add(&self, operation: Box<dyn ReversibleOperation>, already_executed: bool) {
        self.inner.lock().add(operation, already_executed);
    }

    pub fn execute(&self, operation: Box<dyn ReversibleOperation>) {
        self.inner.lock().execute(operation);
    }

    pub fn undo(&self) -> bool {
        self.inner.lock().undo()
    }

    pub fn redo(&self) -> bool {
        self.inner.lock().redo()
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn notify_teardown(&self) -> bool {
        self.inner.lock().notify_teardown()
    }

    pub fn set_reset_on_teardown(&self, reset: bool) {
        self.inner.lock().set_reset_on_teardown(reset);
    }

    pub fn set_stored_bytes_limit(&self, limit: u64) {
        self.inner.lock().set_stored_bytes_limit(limit);
    }

    #[must_use]
    pub fn stored_bytes(&self) -> u64 {
        self.inner.lock().stored_bytes()
    }

    #[must_use]
    pub fn stored_bytes_limit(&self) -> u64 {
        self.inner.lock().stored_bytes_limit()
    }

    #[must_use]
    pub fn is_undoable(&self) -> bool {
        self.inner.lock().is_undoable()
    }

    #[must_use]
    pub fn is_redoable(&self) -> bool {
        self.inner.lock().is_redoable()
    }

    /// Descriptions of the undo entries, newest first.
    #[must_use]
    pub fn undo_descriptions(&self) -> Vec<String> {
        self.inner
            .lock()
            .undo_history()
            .unwrap_or_default()
            .iter()
            .map(|op| op.description().into_owned())
            .collect()
    }

    /// Descriptions of the redo entries, newest first.
    #[must_use]
    pub fn redo_descriptions(&self) -> Vec<String> {
        self.inner
            .lock()
            .redo_history()
            .unwrap_or_default()
            .iter()
            .map(|op| op.description().into_owned())
            .collect()
    }
}

impl Default for SharedCommandHistory {
    fn default() -> Self {
        Self {
            inner: Mutex::new(CommandHistory::default()),
        }
    }
}
