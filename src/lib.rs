#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::style)]
#![warn(clippy::correctness)]
#![warn(clippy::complexity)]
#![warn(clippy::suspicious)]
#![warn(clippy::cargo)]

pub mod command_history;
pub mod config;
pub mod execution_state;
pub mod shared_command_history;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub mod prelude {
	pub use crate::command_history::CommandHistory;
	pub use crate::config::{HistoryConfig, DEFAULT_STORED_BYTES_LIMIT};
	pub use crate::execution_state::{ExecutionState, OperationStateError};
	pub use crate::shared_command_history::SharedCommandHistory;
	pub use crate::traits::reversible_operation::ReversibleOperation;
}
