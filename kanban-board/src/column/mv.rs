//! MoveColumn command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{ColumnKind, MoveCoordinator};
use crate::outcome::logged;
use crate::types::{BoardId, Capability, ColumnId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Move a column to a 0-based index within its board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveColumn {
    pub id: ColumnId,
    /// Destination board, the column's own board when omitted. Columns
    /// never leave their board.
    pub board_id: Option<BoardId>,
    /// Clamped to the column count; the end when omitted
    pub index: Option<i64>,
}

operation!(MoveColumn, verb = "move", noun = "column", description = "Move a column to an index");

impl MoveColumn {
    pub fn new(id: impl Into<ColumnId>, index: i64) -> Self {
        Self {
            id: id.into(),
            board_id: None,
            index: Some(index),
        }
    }

    pub fn to_board(mut self, board_id: impl Into<BoardId>) -> Self {
        self.board_id = Some(board_id.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();

            let outcome = ctx
                .write(move |tx| {
                    let column = super::read_column(tx, cmd.id)?;
                    let destination = cmd.board_id.unwrap_or(column.board_id);
                    let outcome = MoveCoordinator::<ColumnKind>::new(tx).move_record(
                        cmd.id,
                        destination,
                        cmd.index,
                        |board| {
                            authorize(gate.as_ref(), tx, user, board, Capability::ManageStructure, "move column")
                                .map(|_| ())
                        },
                    )?;
                    touch_board(tx, destination)?;
                    Ok(outcome)
                })
                .await?;
            Ok(serde_json::to_value(outcome)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}
