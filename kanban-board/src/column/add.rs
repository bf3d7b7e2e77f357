//! AddColumn command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{ColumnKind, NewColumn, OrderedCollection};
use crate::outcome::logged;
use crate::types::{BoardId, Capability};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append a column to a board (owner or admin)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddColumn {
    pub board_id: BoardId,
    pub name: String,
}

operation!(AddColumn, verb = "add", noun = "column", description = "Append a column to a board");

impl AddColumn {
    pub fn new(board_id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            name: name.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let name = self.name.trim().to_string();
            if name.is_empty() {
                return Err(KanbanError::validation("name", "name is required"));
            }
            let board = self.board_id;
            let gate = ctx.gate();

            let column = ctx
                .write(move |tx| {
                    authorize(gate.as_ref(), tx, user, board, Capability::ManageStructure, "add column")?;
                    let id = OrderedCollection::<ColumnKind>::new(tx).append(board, &NewColumn { name })?;
                    touch_board(tx, board)?;
                    super::read_column(tx, id)
                })
                .await?;
            Ok(serde_json::to_value(column)?)
        }
        .await;

        logged(self, ctx, start, result)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["id"].as_i64().map(|id| vec![id.to_string()]).unwrap_or_default()
    }
}
