//! TransferOwnership command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{BoardId, Capability, Role, UserId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Hand a board to another member. The previous owner stays on as ADMIN.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransferOwnership {
    pub board_id: BoardId,
    pub user_id: UserId,
}

operation!(
    TransferOwnership,
    verb = "transfer",
    noun = "board",
    description = "Transfer board ownership to a member"
);

impl TransferOwnership {
    pub fn new(board_id: impl Into<BoardId>, user_id: impl Into<UserId>) -> Self {
        Self {
            board_id: board_id.into(),
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for TransferOwnership {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let actor = ctx.user()?;
            if actor == cmd.user_id {
                return Err(KanbanError::validation("user_id", "cannot transfer to yourself"));
            }
            let gate = ctx.gate();

            let board = ctx
                .write(move |tx| {
                    authorize(gate.as_ref(), tx, actor, cmd.board_id, Capability::Own, "transfer ownership")?;
                    if super::member_role(tx, cmd.board_id, cmd.user_id)?.is_none() {
                        return Err(KanbanError::not_found("member", cmd.user_id));
                    }

                    tx.execute(
                        "UPDATE boards SET owner_id = ?1 WHERE id = ?2",
                        params![cmd.user_id, cmd.board_id],
                    )?;
                    tx.execute(
                        "UPDATE board_members SET role = ?1 WHERE board_id = ?2 AND user_id = ?3",
                        params![Role::Owner, cmd.board_id, cmd.user_id],
                    )?;
                    let demoted = tx.execute(
                        "UPDATE board_members SET role = ?1 WHERE board_id = ?2 AND user_id = ?3",
                        params![Role::Admin, cmd.board_id, actor],
                    )?;
                    if demoted == 0 {
                        super::add_member(tx, cmd.board_id, actor, Role::Admin)?;
                    }
                    super::touch_board(tx, cmd.board_id)?;
                    super::read_board(tx, cmd.board_id)
                })
                .await?;

            info!(board = %cmd.board_id, from = %actor, to = %cmd.user_id, "ownership transferred");
            Ok(serde_json::to_value(board)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}
