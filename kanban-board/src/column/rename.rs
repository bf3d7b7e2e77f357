//! RenameColumn command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{Capability, ColumnId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rename a column; its position is untouched
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenameColumn {
    pub id: ColumnId,
    pub name: String,
}

operation!(RenameColumn, verb = "rename", noun = "column", description = "Rename a column");

impl RenameColumn {
    pub fn new(id: impl Into<ColumnId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for RenameColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let name = self.name.trim().to_string();
            if name.is_empty() {
                return Err(KanbanError::validation("name", "name is required"));
            }
            let id = self.id;
            let gate = ctx.gate();

            let column = ctx
                .write(move |tx| {
                    let column = super::read_column(tx, id)?;
                    authorize(gate.as_ref(), tx, user, column.board_id, Capability::ManageStructure, "rename column")?;
                    tx.execute("UPDATE board_columns SET name = ?1 WHERE id = ?2", params![name, id])?;
                    touch_board(tx, column.board_id)?;
                    super::read_column(tx, id)
                })
                .await?;
            Ok(serde_json::to_value(column)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture;

    #[tokio::test]
    async fn test_rename_column_keeps_position() {
        let fx = fixture().await;
        let column = RenameColumn::new(fx.columns[1], "Doing")
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap();
        assert_eq!(column["name"], "Doing");
        assert_eq!(column["position"], 2);

        let missing = RenameColumn::new(999, "x").execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(missing, KanbanError::NotFound { .. }));
    }
}
