//! ReorderColumns command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{ColumnKind, OrderedCollection};
use crate::outcome::logged;
use crate::types::{BoardId, Capability, ColumnId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Rewrite column positions to follow `order`, which must list every
/// column of the board exactly once
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderColumns {
    pub board_id: BoardId,
    pub order: Vec<ColumnId>,
}

operation!(
    ReorderColumns,
    verb = "reorder",
    noun = "columns",
    description = "Reorder all columns of a board"
);

impl ReorderColumns {
    pub fn new(board_id: impl Into<BoardId>, order: impl IntoIterator<Item = ColumnId>) -> Self {
        Self {
            board_id: board_id.into(),
            order: order.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ReorderColumns {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            if cmd.order.is_empty() {
                return Err(KanbanError::validation("order", "must not be empty"));
            }
            let gate = ctx.gate();

            ctx.write(move |tx| {
                authorize(gate.as_ref(), tx, user, cmd.board_id, Capability::ManageStructure, "reorder columns")?;
                OrderedCollection::<ColumnKind>::new(tx).reorder(cmd.board_id, &cmd.order)?;
                touch_board(tx, cmd.board_id)
            })
            .await?;
            Ok(json!({ "board_id": self.board_id, "order": self.order }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ListColumns;
    use crate::test_support::fixture;

    #[tokio::test]
    async fn test_reorder_columns() {
        let fx = fixture().await;
        let [a, b, c] = [fx.columns[0], fx.columns[1], fx.columns[2]];

        ReorderColumns::new(fx.board, [c, a, b]).execute(&fx.owner).await.into_result().unwrap();

        let listed = ListColumns::new(fx.board).execute(&fx.owner).await.into_result().unwrap();
        let ids: Vec<i64> = listed["columns"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![c.get(), a.get(), b.get()]);
    }

    #[tokio::test]
    async fn test_reorder_columns_stale_view() {
        let fx = fixture().await;
        let err = ReorderColumns::new(fx.board, [fx.columns[1], fx.columns[0]])
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::InvalidMembership { .. }));
        assert!(err.is_retryable());
    }
}
