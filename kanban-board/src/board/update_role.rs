//! UpdateMemberRole command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{BoardId, Capability, Role, UserId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Change a member's role to ADMIN or MEMBER (owner only)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateMemberRole {
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: Role,
}

operation!(
    UpdateMemberRole,
    verb = "update",
    noun = "member",
    description = "Change a member's role"
);

impl UpdateMemberRole {
    pub fn new(board_id: impl Into<BoardId>, user_id: impl Into<UserId>, role: Role) -> Self {
        Self {
            board_id: board_id.into(),
            user_id: user_id.into(),
            role,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateMemberRole {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let actor = ctx.user()?;
            if cmd.role == Role::Owner {
                return Err(KanbanError::validation(
                    "role",
                    "use transfer ownership to make someone the owner",
                ));
            }
            let gate = ctx.gate();

            ctx.write(move |tx| {
                authorize(gate.as_ref(), tx, actor, cmd.board_id, Capability::Own, "change member role")?;
                let board = super::read_board(tx, cmd.board_id)?;
                if board.owner_id == cmd.user_id {
                    return Err(KanbanError::validation("user_id", "cannot change the owner's role"));
                }
                if super::member_role(tx, cmd.board_id, cmd.user_id)?.is_none() {
                    return Err(KanbanError::not_found("member", cmd.user_id));
                }
                tx.execute(
                    "UPDATE board_members SET role = ?1 WHERE board_id = ?2 AND user_id = ?3",
                    params![cmd.role, cmd.board_id, cmd.user_id],
                )?;
                super::touch_board(tx, cmd.board_id)
            })
            .await?;

            info!(board = %cmd.board_id, user = %cmd.user_id, role = %cmd.role, "member role changed");
            Ok(json!({ "board_id": cmd.board_id, "user_id": cmd.user_id, "role": cmd.role }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}
