//! Core types for the kanban engine

mod board;
mod column;
mod ids;
mod role;
mod task;

// Re-export all types
pub use board::{Board, BoardDetail, BoardSummary, Invite, Member, User};
pub use column::{Column, ColumnDetail, ColumnSummary};
pub use ids::{BoardId, ColumnId, InviteId, SubtaskId, TagId, TaskId, UserId};
pub use role::{Capability, Role};
pub use task::{Subtask, Tag, Task, TaskDetail};
