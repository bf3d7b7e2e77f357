//! RenameBoard command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{BoardId, Capability};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rename a board (owner or admin)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenameBoard {
    pub id: BoardId,
    pub name: String,
}

operation!(RenameBoard, verb = "rename", noun = "board", description = "Rename a board");

impl RenameBoard {
    pub fn new(id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RenameBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let name = cmd.name.trim().to_string();
            if name.is_empty() {
                return Err(KanbanError::validation("name", "name is required"));
            }
            let gate = ctx.gate();

            let board = ctx
                .write(move |tx| {
                    authorize(gate.as_ref(), tx, user, cmd.id, Capability::ManageStructure, "rename board")?;
                    tx.execute(
                        "UPDATE boards SET name = ?1, updated_at = ?2 WHERE id = ?3",
                        params![name, Utc::now(), cmd.id],
                    )?;
                    super::read_board(tx, cmd.id)
                })
                .await?;
            Ok(serde_json::to_value(board)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{add_user, fixture, join};
    use crate::types::Role;

    #[tokio::test]
    async fn test_rename_board() {
        let fx = fixture().await;
        let result = RenameBoard::new(fx.board, " Roadmap ")
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["name"], "Roadmap");
    }

    #[tokio::test]
    async fn test_member_cannot_rename() {
        let fx = fixture().await;
        let member = add_user(&fx.ctx, "m@example.com").await;
        join(&fx.ctx, fx.board, member, Role::Member).await;

        let err = RenameBoard::new(fx.board, "Nope")
            .execute(&fx.ctx.as_user(member))
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::Permission { .. }));
    }
}
