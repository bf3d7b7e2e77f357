//! UpdateTask command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{Capability, TaskId};
use chrono::{DateTime, Utc};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Update a task's fields. Omitted fields are left alone; an explicit
/// `null` clears an optional field. Position is never touched here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateTask {
    pub id: TaskId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub priority: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Distinguish a field given as `null` from one left out
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

operation!(UpdateTask, verb = "update", noun = "task", description = "Update a task's fields");

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            priority: None,
            status: None,
            due_date: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_priority(mut self, priority: Option<String>) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(Some(status.into()));
        self
    }

    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let title = match cmd.title.as_deref().map(str::trim) {
                Some("") => return Err(KanbanError::validation("title", "title must not be blank")),
                other => other.map(String::from),
            };
            let gate = ctx.gate();

            let task = ctx
                .write(move |tx| {
                    let board = super::board_of_task(tx, cmd.id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "update task")?;
                    let mut task = super::read_task(tx, cmd.id)?;

                    if let Some(title) = title {
                        task.title = title;
                    }
                    if let Some(description) = cmd.description {
                        task.description = super::clean(description.as_deref());
                    }
                    if let Some(priority) = cmd.priority {
                        task.priority = super::clean(priority.as_deref());
                    }
                    if let Some(status) = cmd.status {
                        task.status = super::clean(status.as_deref());
                    }
                    if let Some(due_date) = cmd.due_date {
                        task.due_date = due_date;
                    }

                    tx.execute(
                        "UPDATE tasks SET title = ?1, description = ?2, priority = ?3, status = ?4,
                                due_date = ?5, updated_at = ?6
                         WHERE id = ?7",
                        params![
                            task.title,
                            task.description,
                            task.priority,
                            task.status,
                            task.due_date,
                            Utc::now(),
                            cmd.id
                        ],
                    )?;
                    touch_board(tx, board)?;
                    super::read_task(tx, cmd.id)
                })
                .await?;
            Ok(serde_json::to_value(task)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}
