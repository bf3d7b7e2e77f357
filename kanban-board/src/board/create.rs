//! CreateBoard command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{ColumnKind, NewColumn, OrderedCollection};
use crate::outcome::logged;
use crate::types::{BoardId, Role};
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Create a board owned by the caller, seeded with the default columns
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateBoard {
    pub name: String,
}

operation!(
    CreateBoard,
    verb = "create",
    noun = "board",
    description = "Create a board owned by the caller"
);

impl CreateBoard {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for CreateBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let owner = ctx.user()?;
            let name = self.name.trim().to_string();
            if name.is_empty() {
                return Err(KanbanError::validation("name", "name is required"));
            }
            let default_columns = ctx.config().default_columns.clone();

            let detail = ctx
                .write(move |tx| {
                    crate::user::read_user(tx, owner)?;
                    let now = Utc::now();
                    tx.execute(
                        "INSERT INTO boards (name, owner_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
                        params![name, owner, now],
                    )?;
                    let board = BoardId(tx.last_insert_rowid());
                    super::add_member(tx, board, owner, Role::Owner)?;

                    let columns = OrderedCollection::<ColumnKind>::new(tx);
                    for column in default_columns {
                        columns.append(board, &NewColumn { name: column })?;
                    }
                    super::board_detail(tx, board)
                })
                .await?;

            info!(board = %detail.board.id, owner = %owner, "board created");
            Ok(serde_json::to_value(detail)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{add_user, setup};

    #[tokio::test]
    async fn test_create_board_with_default_columns() {
        let (_temp, ctx) = setup().await;
        let owner = add_user(&ctx, "owner@example.com").await;

        let result = CreateBoard::new("  Launch ")
            .execute(&ctx.as_user(owner))
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Launch");
        assert_eq!(result["owner_id"], owner.get());
        let columns = result["columns"].as_array().unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["To Do", "In Progress", "Done"]);
        let positions: Vec<i64> = columns.iter().map(|c| c["position"].as_i64().unwrap()).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(result["members"][0]["role"], "OWNER");
    }

    #[tokio::test]
    async fn test_create_board_requires_user_and_name() {
        let (_temp, ctx) = setup().await;
        let owner = add_user(&ctx, "owner@example.com").await;

        let anonymous = CreateBoard::new("B").execute(&ctx).await.into_result().unwrap_err();
        assert!(matches!(anonymous, KanbanError::Unauthenticated));

        let blank = CreateBoard::new("   ")
            .execute(&ctx.as_user(owner))
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(blank, KanbanError::Validation { .. }));
    }
}
