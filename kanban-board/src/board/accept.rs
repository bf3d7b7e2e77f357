//! AcceptInvite command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{BoardId, Invite, Role};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Redeem an invite token as the caller
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AcceptInvite {
    pub token: String,
}

operation!(AcceptInvite, verb = "accept", noun = "invite", description = "Join a board with an invite token");

impl AcceptInvite {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

enum Redeemed {
    Joined { board: BoardId, role: Role, already_member: bool },
    Expired,
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AcceptInvite {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let token = self.token.trim().to_string();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            if token.is_empty() {
                return Err(KanbanError::validation("token", "token is required"));
            }

            // An expired invite is deleted and the deletion committed before
            // the error is reported.
            let redeemed = ctx
                .write(move |tx| {
                    let invite = tx
                        .query_row(
                            "SELECT id, board_id, email, token, role, expires_at, accepted_by
                             FROM invites WHERE token = ?1",
                            [&token],
                            Invite::from_row,
                        )
                        .optional()?
                        .ok_or_else(|| KanbanError::not_found("invite", "token"))?;

                    if invite.is_expired(Utc::now()) {
                        tx.execute("DELETE FROM invites WHERE id = ?1", [invite.id])?;
                        return Ok(Redeemed::Expired);
                    }

                    let already_member = super::member_role(tx, invite.board_id, user)?.is_some()
                        || super::read_board(tx, invite.board_id)?.owner_id == user;
                    if !already_member {
                        super::add_member(tx, invite.board_id, user, invite.role)?;
                        super::touch_board(tx, invite.board_id)?;
                    }
                    tx.execute(
                        "UPDATE invites SET accepted_by = ?1 WHERE id = ?2",
                        params![user, invite.id],
                    )?;

                    Ok(Redeemed::Joined {
                        board: invite.board_id,
                        role: invite.role,
                        already_member,
                    })
                })
                .await?;

            match redeemed {
                Redeemed::Expired => Err(KanbanError::validation("token", "invite expired")),
                Redeemed::Joined {
                    board,
                    role,
                    already_member,
                } => {
                    info!(board = %board, user = %user, already_member, "invite accepted");
                    Ok(json!({ "board_id": board, "role": role, "already_member": already_member }))
                }
            }
        }
        .await;

        logged(self, ctx, start, result)
    }
}
