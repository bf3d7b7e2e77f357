//! Multi-user kanban board engine over SQLite
//!
//! Boards hold columns, columns hold tasks, tasks hold subtasks. Each of the
//! three levels is an ordered sibling set whose positions stay dense
//! (`1..N`) through every reorder and move, under concurrent writers.
//!
//! ## Overview
//!
//! - **One ordering core** - [`ordering::OrderedCollection`] and
//!   [`ordering::MoveCoordinator`] are generic over [`ordering::SiblingKind`];
//!   columns, tasks and subtasks are three instances of it
//! - **Transactions, not locks** - every command runs in one SQLite
//!   transaction; writes take the write lock up front
//! - **Board-scoped access** - an [`auth::AuthorizationGate`] supplies the
//!   caller's role, checked inside the same transaction as the write
//! - **Auditable** - mutations return a [`kanban_operations::LogEntry`] that
//!   [`KanbanOperationProcessor`] appends to the activity table
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use kanban_board::{board::CreateBoard, task::{AddTask, MoveTask}, user::AddUser};
//! use kanban_board::{Execute, KanbanConfig, KanbanContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = KanbanContext::open(KanbanConfig::load()?).await?;
//!
//! let user = AddUser::new("ada@example.com").execute(&ctx).await.into_result()?;
//! let ctx = ctx.as_user(user["id"].as_i64().unwrap_or_default().into());
//!
//! let board = CreateBoard::new("Roadmap").execute(&ctx).await.into_result()?;
//! let todo = board["columns"][0]["id"].as_i64().unwrap_or_default();
//! let done = board["columns"][2]["id"].as_i64().unwrap_or_default();
//!
//! let task = AddTask::new(todo, "Ship it").execute(&ctx).await.into_result()?;
//! let task = task["id"].as_i64().unwrap_or_default();
//! MoveTask::new(task, done, 0).execute(&ctx).await.into_result()?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod config;
mod context;
pub mod dispatch;
mod error;
pub mod ordering;
mod outcome;
mod processor;
pub mod schema;
pub mod types;

// Command modules
pub mod activity;
pub mod board;
pub mod column;
pub mod subtask;
pub mod tag;
pub mod task;
pub mod user;

#[cfg(test)]
mod test_support;

// Re-export Execute trait and types from operations crate
pub use kanban_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, Operation, OperationProcessor,
};

pub use auth::{AuthorizationGate, MembershipGate};
pub use config::KanbanConfig;
pub use context::KanbanContext;
pub use dispatch::{dispatch, SUPPORTED_OPERATIONS};
pub use error::{ErrorCategory, KanbanError, Result};
pub use processor::KanbanOperationProcessor;

// Re-export commonly used types
pub use types::{
    Board, BoardId, Capability, Column, ColumnId, Role, Subtask, SubtaskId, Tag, TagId, Task,
    TaskId, User, UserId,
};
