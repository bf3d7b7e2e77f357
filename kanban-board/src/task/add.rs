//! AddTask command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::column::read_column;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{NewTask, OrderedCollection, TaskKind};
use crate::outcome::logged;
use crate::types::{Capability, ColumnId};
use chrono::{DateTime, Utc};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append a task to a column
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddTask {
    pub column_id: ColumnId,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
}

operation!(AddTask, verb = "add", noun = "task", description = "Append a task to a column");

impl AddTask {
    pub fn new(column_id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let title = self.title.trim().to_string();
            if title.is_empty() {
                return Err(KanbanError::validation("title", "title is required"));
            }
            let payload = NewTask {
                title,
                description: self.description.clone(),
                priority: super::clean(self.priority.as_deref()),
                status: None,
                due_date: self.due_date,
                created_by: Some(user),
            };
            let column = self.column_id;
            let gate = ctx.gate();

            let task = ctx
                .write(move |tx| {
                    let board = read_column(tx, column)?.board_id;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "add task")?;
                    let id = OrderedCollection::<TaskKind>::new(tx).append(column, &payload)?;
                    touch_board(tx, board)?;
                    super::read_task(tx, id)
                })
                .await?;
            Ok(serde_json::to_value(task)?)
        }
        .await;

        logged(self, ctx, start, result)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["id"].as_i64().map(|id| vec![id.to_string()]).unwrap_or_default()
    }
}
