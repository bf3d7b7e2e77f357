//! Dispatch `"verb noun"` operation strings with JSON parameters
//!
//! This is the entry point for outer surfaces (the CLI, an HTTP adapter):
//! they hand over an op string and a JSON object, and get back the
//! command's JSON result. Parameter keys may be camelCase (`toColumnId`,
//! `newIndex`); they are normalized to the snake_case field names before
//! the command is deserialized.

use crate::activity::ListActivity;
use crate::board::{
    AcceptInvite, CreateBoard, CreateInvite, DeleteBoard, GetBoard, LeaveBoard, ListBoards,
    ListMembers, RemoveMember, RenameBoard, TransferOwnership, UpdateMemberRole,
};
use crate::column::{AddColumn, DeleteColumn, ListColumns, MoveColumn, RenameColumn, ReorderColumns};
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::processor::KanbanOperationProcessor;
use crate::subtask::{AddSubtask, DeleteSubtask, ListSubtasks, MoveSubtask, ReorderSubtasks, UpdateSubtask};
use crate::tag::{AddTag, DeleteTag, ListTags, UpdateTag};
use crate::task::{
    AddTask, AssignTask, DeleteTask, GetTask, ListAssignees, ListTasks, MoveTask, ReorderTasks,
    TagTask, UnassignTask, UntagTask, UpdateTask,
};
use crate::user::{AddUser, GetUser};
use kanban_operations::OperationProcessor;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

macro_rules! dispatch_table {
    ($($op:literal => $ty:ty),* $(,)?) => {
        /// Every op string [`dispatch`] accepts
        pub const SUPPORTED_OPERATIONS: &[&str] = &[$($op),*];

        async fn run(
            op: &str,
            params: Value,
            ctx: &KanbanContext,
            processor: &KanbanOperationProcessor,
        ) -> Result<Value> {
            match op {
                $($op => {
                    let command: $ty = parse_params(params)?;
                    processor.process(&command, ctx).await
                })*
                other => Err(KanbanError::UnknownOperation { op: other.to_string() }),
            }
        }
    };
}

dispatch_table! {
    "add user" => AddUser,
    "get user" => GetUser,

    "create board" => CreateBoard,
    "get board" => GetBoard,
    "list boards" => ListBoards,
    "rename board" => RenameBoard,
    "delete board" => DeleteBoard,
    "transfer board" => TransferOwnership,
    "leave board" => LeaveBoard,
    "list members" => ListMembers,
    "update member" => UpdateMemberRole,
    "remove member" => RemoveMember,
    "create invite" => CreateInvite,
    "accept invite" => AcceptInvite,

    "add column" => AddColumn,
    "list columns" => ListColumns,
    "rename column" => RenameColumn,
    "delete column" => DeleteColumn,
    "reorder columns" => ReorderColumns,
    "move column" => MoveColumn,

    "add task" => AddTask,
    "get task" => GetTask,
    "list tasks" => ListTasks,
    "update task" => UpdateTask,
    "delete task" => DeleteTask,
    "move task" => MoveTask,
    "reorder tasks" => ReorderTasks,
    "assign task" => AssignTask,
    "unassign task" => UnassignTask,
    "list assignees" => ListAssignees,
    "tag task" => TagTask,
    "untag task" => UntagTask,

    "add subtask" => AddSubtask,
    "list subtasks" => ListSubtasks,
    "update subtask" => UpdateSubtask,
    "delete subtask" => DeleteSubtask,
    "reorder subtasks" => ReorderSubtasks,
    "move subtask" => MoveSubtask,

    "add tag" => AddTag,
    "list tags" => ListTags,
    "update tag" => UpdateTag,
    "delete tag" => DeleteTag,

    "list activity" => ListActivity,
}

/// Run the operation named by `op` with `params` through `processor`
pub async fn dispatch(
    op: &str,
    params: Value,
    ctx: &KanbanContext,
    processor: &KanbanOperationProcessor,
) -> Result<Value> {
    let op = normalize_op(op);
    debug!(%op, "dispatching");
    run(&op, normalize_params(params)?, ctx, processor).await
}

/// Lowercase and collapse whitespace: `" Move   Task"` -> `"move task"`
pub fn normalize_op(op: &str) -> String {
    op.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Turn `null` into `{}` and camelCase keys into snake_case.
///
/// A snake_case key already present wins over its camelCase spelling.
pub fn normalize_params(params: Value) -> Result<Value> {
    let object = match params {
        Value::Null => Map::new(),
        Value::Object(object) => object,
        other => {
            return Err(KanbanError::validation(
                "params",
                format!("expected a JSON object, got {other}"),
            ))
        }
    };

    let mut normalized = Map::with_capacity(object.len());
    let mut renamed = Vec::new();
    for (key, value) in object {
        let snake = to_snake_case(&key);
        if snake == key {
            normalized.insert(key, value);
        } else {
            renamed.push((snake, value));
        }
    }
    for (key, value) in renamed {
        normalized.entry(key).or_insert(value);
    }
    Ok(Value::Object(normalized))
}

fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '-' {
            out.push('_');
        } else {
            out.push(ch);
        }
    }
    out
}

fn parse_params<T: DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| KanbanError::validation("params", e.to_string()))
}
