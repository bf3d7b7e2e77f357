//! RemoveMember command

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

/// Remove someone from a board.
///
/// The owner may remove anyone but themselves; an admin may remove members
/// only.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoveMember {
    pub board_id: BoardId,
    pub user_id: UserId,
}

operation!(
    RemoveMember,
    verb = "remove",
    noun = "member",
    description = "Remove a member from a board"
);

impl RemoveMember {
    pub fn new(board_id: impl Into<BoardId>, user_id: impl Into<UserId>) -> Self {
        Self {
            board_id: board_id.into(),
            user_id: user_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RemoveMember {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let actor = ctx.user()?;
            let gate = ctx.gate();

            ctx.write(move |tx| {
                let actor_role = authorize(
                    gate.as_ref(),
                    tx,
                    actor,
                    cmd.board_id,
                    Capability::ManageStructure,
                    "remove member",
                )?;
                let target_role = super::member_role(tx, cmd.board_id, cmd.user_id)?
                    .ok_or_else(|| KanbanError::not_found("member", cmd.user_id))?;

                match actor_role {
                    Role::Owner if cmd.user_id == actor => {
                        return Err(KanbanError::validation("user_id", "the owner cannot remove themselves"));
                    }
                    Role::Owner => {}
                    _ if target_role != Role::Member => {
                        return Err(KanbanError::permission("remove a non-member role"));
                    }
                    _ => {}
                }

                tx.execute(
                    "DELETE FROM board_members WHERE board_id = ?1 AND user_id = ?2",
                    params![cmd.board_id, cmd.user_id],
                )?;
                tx.execute(
                    "DELETE FROM task_assignees WHERE user_id = ?1 AND task_id IN (
                         SELECT t.id FROM tasks t JOIN board_columns c ON c.id = t.column_id
                         WHERE c.board_id = ?2)",
                    params![cmd.user_id, cmd.board_id],
                )?;
                super::touch_board(tx, cmd.board_id)
            })
            .await?;

            info!(board = %cmd.board_id, user = %cmd.user_id, "member removed");
            Ok(json!({ "removed": true, "board_id": cmd.board_id, "user_id": cmd.user_id }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ListMembers;
    use crate::test_support::{add_user, fixture, join};

    #[tokio::test]
    async fn test_owner_removes_admin() {
        let fx = fixture().await;
        let admin = add_user(&fx.ctx, "a@example.com").await;
        join(&fx.ctx, fx.board, admin, Role::Admin).await;

        RemoveMember::new(fx.board, admin).execute(&fx.owner).await.into_result().unwrap();

        let members = ListMembers::new(fx.board).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(members["count"], 1);
    }

    #[tokio::test]
    async fn test_admin_removes_only_members() {
        let fx = fixture().await;
        let admin = add_user(&fx.ctx, "a@example.com").await;
        let other_admin = add_user(&fx.ctx, "b@example.com").await;
        let member = add_user(&fx.ctx, "m@example.com").await;
        join(&fx.ctx, fx.board, admin, Role::Admin).await;
        join(&fx.ctx, fx.board, other_admin, Role::Admin).await;
        join(&fx.ctx, fx.board, member, Role::Member).await;
        let admin_ctx = fx.ctx.as_user(admin);

        let err = RemoveMember::new(fx.board, other_admin)
            .execute(&admin_ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::Permission { .. }));

        RemoveMember::new(fx.board, member).execute(&admin_ctx).await.into_result().unwrap();
    }

    #[tokio::test]
    async fn test_owner_cannot_remove_self_and_member_cannot_remove() {
        let fx = fixture().await;
        let member = add_user(&fx.ctx, "m@example.com").await;
        join(&fx.ctx, fx.board, member, Role::Member).await;

        let own = RemoveMember::new(fx.board, fx.owner_id)
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(own, KanbanError::Validation { .. }));

        let by_member = RemoveMember::new(fx.board, fx.owner_id)
            .execute(&fx.ctx.as_user(member))
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(by_member, KanbanError::Permission { .. }));
    }
}
