//! # Kanban Operations
//!
//! Commands of the kanban engine are plain structs whose fields are the
//! parameters. Each one names itself with a verb and a noun ("move task",
//! "reorder columns") through [`Operation`] and does its work through
//! [`Execute`].
//!
//! ## Example
//!
//! ```ignore
//! use kanban_operations::*;
//!
//! #[derive(Debug, Deserialize, Serialize)]
//! pub struct ReorderColumns {
//!     pub board_id: BoardId,
//!     pub order: Vec<ColumnId>,
//! }
//!
//! operation!(ReorderColumns, verb = "reorder", noun = "columns",
//!     description = "Rewrite column positions in the given order");
//!
//! #[async_trait]
//! impl Execute<KanbanContext, KanbanError> for ReorderColumns {
//!     async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
//!         // returns ExecutionResult::Logged for mutations, Unlogged for reads
//!     }
//! }
//! ```

mod execution_result;
mod log;
mod operation;
mod processor;

pub use execution_result::ExecutionResult;
pub use log::LogEntry;
pub use operation::{Execute, Operation};
pub use processor::OperationProcessor;

// Re-export for use in implementations
pub use async_trait::async_trait;
pub use serde_json::Value;
