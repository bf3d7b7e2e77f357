//! DeleteBoard command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{BoardId, Capability};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Delete a board and everything on it (owner only)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteBoard {
    pub id: BoardId,
}

operation!(DeleteBoard, verb = "delete", noun = "board", description = "Delete a board and its contents");

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let id = self.id;

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            ctx.write(move |tx| {
                authorize(gate.as_ref(), tx, user, id, Capability::Own, "delete board")?;
                tx.execute("DELETE FROM boards WHERE id = ?1", [id])?;
                Ok(())
            })
            .await?;

            info!(board = %id, "board deleted");
            Ok(json!({ "deleted": true, "id": id }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GetBoard;
    use crate::test_support::{add_task, add_user, fixture, join};
    use crate::types::Role;

    #[tokio::test]
    async fn test_delete_board_cascades() {
        let fx = fixture().await;
        add_task(&fx.owner, fx.columns[0], "task").await;

        DeleteBoard::new(fx.board).execute(&fx.owner).await.into_result().unwrap();

        let err = GetBoard::new(fx.board).execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(err, KanbanError::NotFound { .. }));

        let remaining: i64 = fx
            .ctx
            .read(|tx| {
                Ok(tx.query_row(
                    "SELECT (SELECT COUNT(*) FROM tasks) + (SELECT COUNT(*) FROM board_columns)
                          + (SELECT COUNT(*) FROM board_members)",
                    [],
                    |row| row.get(0),
                )?)
            })
            .await
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_board() {
        let fx = fixture().await;
        let admin = add_user(&fx.ctx, "admin@example.com").await;
        join(&fx.ctx, fx.board, admin, Role::Admin).await;

        let err = DeleteBoard::new(fx.board)
            .execute(&fx.ctx.as_user(admin))
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::Permission { .. }));
    }
}
