//! LeaveBoard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::BoardId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Leave a board. The owner has to transfer ownership first.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeaveBoard {
    pub board_id: BoardId,
}

operation!(LeaveBoard, verb = "leave", noun = "board", description = "Leave a board");

impl LeaveBoard {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for LeaveBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let board_id = self.board_id;

        let result: Result<Value> = async {
            let user = ctx.user()?;
            ctx.write(move |tx| {
                let board = super::read_board(tx, board_id)?;
                if board.owner_id == user {
                    return Err(KanbanError::validation(
                        "board_id",
                        "the owner cannot leave; transfer ownership first",
                    ));
                }
                let removed = tx.execute(
                    "DELETE FROM board_members WHERE board_id = ?1 AND user_id = ?2",
                    params![board_id, user],
                )?;
                if removed == 0 {
                    return Err(KanbanError::not_found("member", user));
                }
                Ok(())
            })
            .await?;

            Ok(json!({ "left": true, "board_id": board_id }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}
