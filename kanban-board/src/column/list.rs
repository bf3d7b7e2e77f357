//! ListColumns command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{BoardId, Capability, Column, ColumnSummary};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a board's columns in order, with task counts
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListColumns {
    pub board_id: BoardId,
}

operation!(ListColumns, verb = "list", noun = "columns", description = "List columns in order");

impl ListColumns {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let board = self.board_id;
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let columns = ctx
                .read(move |tx| {
                    authorize(gate.as_ref(), tx, user, board, Capability::View, "list columns")?;
                    let mut stmt = tx.prepare(
                        "SELECT c.id, c.board_id, c.name, c.position,
                                (SELECT COUNT(*) FROM tasks t WHERE t.column_id = c.id) AS task_count
                         FROM board_columns c
                         WHERE c.board_id = ?1
                         ORDER BY c.position, c.id",
                    )?;
                    let columns = stmt
                        .query_map([board], |row| {
                            Ok(ColumnSummary {
                                column: Column::from_row(row)?,
                                task_count: row.get("task_count")?,
                            })
                        })?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    Ok(columns)
                })
                .await?;
            Ok(json!({ "columns": columns, "count": columns.len() }))
        }
        .await;

        unlogged(result)
    }
}
