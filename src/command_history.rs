use std::{borrow::Cow, collections::VecDeque, fmt};

use crate::{config::HistoryConfig, traits::reversible_operation::ReversibleOperation};

/// Undo/redo history bounded by the memory its operations report.
///
/// New operations are executed (unless already applied), merged into the newest undo entry when
/// that entry accepts them, and otherwise pushed. Whenever the recorded footprint exceeds
/// the limit, the oldest undo entries are dropped without being rolled back: their effect stays
/// applied, only the ability to undo them is lost.
///
/// Footprints are tracked incrementally. An entry keeps being counted while it sits in the redo
/// log and is subtracted once the redo log is discarded by the next `add`, so right after any
/// `add` the total equals the sum over the undo log. The limit only ever evicts from the undo
/// log; the redo log may overshoot it until the next `add` discards it.
pub struct CommandHistory {
    undo: VecDeque<Box<dyn ReversibleOperation>>,
    redo: Vec<Box<dyn ReversibleOperation>>,
    stored_bytes: u64,
    stored_bytes_limit: u64,
    reset_on_teardown: bool,
}

impl CommandHistory {
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            stored_bytes: 0,
            stored_bytes_limit: config.stored_bytes_limit,
            reset_on_teardown: config.reset_on_teardown,
        }
    }

    #[must_use]
    pub fn with_limit(stored_bytes_limit: u64) -> Self {
        Self::new(HistoryConfig::with_limit(stored_bytes_limit))
    }

    /// Records `operation`, executing it first unless `already_executed` is set.
    ///
    /// The newest undo entry gets a chance to absorb the operation; if it does, the operation is
    /// dropped. Either way the redo log is discarded and the byte limit is enforced.
    pub fn add(&mut self, mut operation: Box<dyn ReversibleOperation>, already_executed: bool) {
        if !already_executed {
            if !operation.execute() {
                log::warn!(
                    "[history] add: '{}' failed to execute, recording it anyway",
                    operation.description()
                );
            }
        } else if !operation.is_executed() {
            log::warn!(
                "[history] add: '{}' was passed as executed but reports otherwise",
                operation.description()
            );
        }

        if let Some(last) = self.undo.back_mut() {
            let before = last.stored_bytes();
            if last.try_merge_with_next(&*operation) {
                let after = last.stored_bytes();
                log::trace!(
                    "[history] merged '{}' into '{}' ({before} -> {after} bytes)",
                    operation.description(),
                    last.description()
                );

                self.stored_bytes = self.stored_bytes.saturating_sub(before).saturating_add(after);
                self.clear_redo();
                self.limit_memory_usage();
                return;
            }
        }

        self.stored_bytes = self.stored_bytes.saturating_add(operation.stored_bytes());
        self.undo.push_back(operation);
        self.clear_redo();
        self.limit_memory_usage();
    }

    /// Executes `operation` and records it. Shorthand for `add(operation, false)`.
    pub fn execute(&mut self, operation: Box<dyn ReversibleOperation>) {
        self.add(operation, false);
    }

    /// Rolls back the newest undo entry and moves it to the redo log.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(mut operation) = self.undo.pop_back() else {
            log::trace!("[history] undo: nothing to undo");
            return false;
        };

        self.stored_bytes = self.stored_bytes.saturating_sub(operation.stored_bytes());
        if !operation.rollback() {
            log::warn!("[history] undo: '{}' failed to roll back", operation.description());
        }
        self.stored_bytes = self.stored_bytes.saturating_add(operation.stored_bytes());

        self.redo.push(operation);
        true
    }

    /// Re-executes the newest redo entry and moves it back to the undo log.
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(mut operation) = self.redo.pop() else {
            log::trace!("[history] redo: nothing to redo");
            return false;
        };

        self.stored_bytes = self.stored_bytes.saturating_sub(operation.stored_bytes());
        if !operation.execute() {
            log::warn!("[history] redo: '{}' failed to execute", operation.description());
        }
        self.stored_bytes = self.stored_bytes.saturating_add(operation.stored_bytes());

        self.undo.push_back(operation);
        true
    }

    /// Drops every entry of both logs without rolling anything back.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
        self.stored_bytes = 0;
    }

    /// Teardown callback for the owning application, called once per teardown event.
    ///
    /// Resets the history when the teardown binding is enabled and reports whether it did.
    pub fn notify_teardown(&mut self) -> bool {
        if !self.reset_on_teardown {
            return false;
        }

        log::debug!(
            "[history] teardown: discarding {} undo and {} redo entries",
            self.undo.len(),
            self.redo.len()
        );
        self.reset();
        true
    }

    pub fn set_reset_on_teardown(&mut self, reset: bool) {
        self.reset_on_teardown = reset;
    }

    #[must_use]
    pub fn is_reset_on_teardown(&self) -> bool {
        self.reset_on_teardown
    }

    /// Changes the byte limit, evicting old undo entries right away if usage is now above it.
    pub fn set_stored_bytes_limit(&mut self, limit: u64) {
        self.stored_bytes_limit = limit;
        self.limit_memory_usage();
    }

    #[must_use]
    pub fn stored_bytes_limit(&self) -> u64 {
        self.stored_bytes_limit
    }

    #[must_use]
    pub fn stored_bytes(&self) -> u64 {
        self.stored_bytes
    }

    #[must_use]
    pub fn is_undoable(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn is_redoable(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Undo entries, newest first.
    #[must_use]
    pub fn undo_history(&self) -> Option<Vec<&dyn ReversibleOperation>> {
        if self.undo.is_empty() {
            None
        } else {
            Some(self.undo.iter().rev().map(|op| &**op).collect())
        }
    }

    /// Redo entries, newest first (the order `redo` would replay them in).
    #[must_use]
    pub fn redo_history(&self) -> Option<Vec<&dyn ReversibleOperation>> {
        if self.redo.is_empty() {
            None
        } else {
            Some(self.redo.iter().rev().map(|op| &**op).collect())
        }
    }

    #[must_use]
    pub fn undo_description(&self) -> Option<Cow<'_, str>> {
        self.undo.back().map(|op| op.description())
    }

    #[must_use]
    pub fn redo_description(&self) -> Option<Cow<'_, str>> {
        self.redo.last().map(|op| op.description())
    }

    fn clear_redo(&mut self) {
        for operation in self.redo.drain(..) {
            self.stored_bytes = self.stored_bytes.saturating_sub(operation.stored_bytes());
        }
    }

    fn limit_memory_usage(&mut self) {
        while self.stored_bytes > self.stored_bytes_limit {
            let Some(oldest) = self.undo.pop_front() else {
                break;
            };

            let bytes = oldest.stored_bytes();
            self.stored_bytes = self.stored_bytes.saturating_sub(bytes);
            log::debug!(
                "[history] evicted '{}' ({bytes} bytes), {} of {} bytes in use",
                oldest.description(),
                self.stored_bytes,
                self.stored_bytes_limit
            );
        }
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl fmt::Debug for CommandHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandHistory")
            .field("undo_len", &self.undo.len())
            .field("redo_len", &self.redo.len())
            .field("stored_bytes", &self.stored_bytes)
            .field("stored_bytes_limit", &self.stored_bytes_limit)
            .field("reset_on_teardown", &self.reset_on_teardown)
            .finish()
    }
}
