//! CreateInvite command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{BoardId, Capability, Invite, Role};
use chrono::{Duration, Utc};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rand::Rng;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Bytes of randomness in an invite token (hex encoded, so twice as many chars)
const TOKEN_BYTES: usize = 24;

/// Issue an invite token for a board (owner or admin).
///
/// Delivering the token is the caller's business; nothing is sent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateInvite {
    pub board_id: BoardId,
    pub email: String,
    /// Role granted on acceptance, MEMBER when omitted
    pub role: Option<Role>,
    /// Lifetime, the configured default when omitted
    pub expires_in_hours: Option<i64>,
}

operation!(
    CreateInvite,
    verb = "create",
    noun = "invite",
    description = "Issue an invite token for a board"
);

impl CreateInvite {
    pub fn new(board_id: impl Into<BoardId>, email: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            email: email.into(),
            role: None,
            expires_in_hours: None,
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn expires_in_hours(mut self, hours: i64) -> Self {
        self.expires_in_hours = Some(hours);
        self
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for CreateInvite {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let actor = ctx.user()?;
            let email = self.email.trim().to_lowercase();
            if email.is_empty() {
                return Err(KanbanError::validation("email", "email is required"));
            }
            let role = self.role.unwrap_or(Role::Member);
            if role == Role::Owner {
                return Err(KanbanError::validation("role", "invites grant ADMIN or MEMBER"));
            }
            let hours = self.expires_in_hours.unwrap_or(ctx.config().invite_ttl_hours);
            if hours <= 0 {
                return Err(KanbanError::validation("expires_in_hours", "must be positive"));
            }
            let board_id = self.board_id;
            let gate = ctx.gate();

            let invite = ctx
                .write(move |tx| {
                    authorize(gate.as_ref(), tx, actor, board_id, Capability::ManageStructure, "invite to board")?;
                    let now = Utc::now();
                    tx.execute(
                        "INSERT INTO invites (board_id, email, token, role, expires_at, created_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![board_id, email, generate_token(), role, now + Duration::hours(hours), now],
                    )?;
                    let id = tx.last_insert_rowid();
                    Ok(tx.query_row(
                        "SELECT id, board_id, email, token, role, expires_at, accepted_by
                         FROM invites WHERE id = ?1",
                        [id],
                        Invite::from_row,
                    )?)
                })
                .await?;

            info!(board = %invite.board_id, invite = %invite.id, role = %invite.role, "invite created");
            Ok(serde_json::to_value(invite)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}
