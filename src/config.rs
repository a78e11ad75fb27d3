use serde::{Deserialize, Serialize};

/// 128 MiB.
pub const DEFAULT_STORED_BYTES_LIMIT: u64 = 128 * 1024 * 1024;

/// Settings a history is built from.
///
/// Every field is optional when deserialising, so an application can embed this in its own
/// config file and only spell out what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Upper bound on the summed footprint of the undo log, in bytes.
    pub stored_bytes_limit: u64,
    /// Whether [`notify_teardown`](crate::command_history::CommandHistory::notify_teardown)
    /// clears the history.
    pub reset_on_teardown: bool,
}

impl HistoryConfig {
    #[must_use]
    pub const fn with_limit(stored_bytes_limit: u64) -> Self {
        Self {
            stored_bytes_limit,
            reset_on_teardown: false,
        }
    }

    #[must_use]
    pub const fn reset_on_teardown(mut self, reset: bool) -> Self {
        self.reset_on_teardown = reset;
        self
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self::with_limit(DEFAULT_STORED_BYTES_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = HistoryConfig::default();
        assert_eq!(config.stored_bytes_limit, 134_217_728);
        assert!(!config.reset_on_teardown);
    }

    #[test]
    fn test_builder() {
        let config = HistoryConfig::with_limit(100).reset_on_teardown(true);
        assert_eq!(config.stored_bytes_limit, 100);
        assert!(config.reset_on_teardown);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: HistoryConfig = serde_json::from_str(r#"{ "reset_on_teardown": true }"#).unwrap();
        assert_eq!(config.stored_bytes_limit, DEFAULT_STORED_BYTES_LIMIT);
        assert!(config.reset_on_teardown);

        let config: HistoryConfig = serde_json::from_str(r#"{ "stored_bytes_limit": 0 }"#).unwrap();
        assert_eq!(config, HistoryConfig::with_limit(0));
    }

    #[test]
    fn test_deserialize_empty() {
        let config: HistoryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, HistoryConfig::default());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(HistoryConfig::with_limit(64)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "stored_bytes_limit": 64, "reset_on_teardown": false })
        );
    }
}
