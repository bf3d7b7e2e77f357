//! DeleteColumn command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{ColumnKind, OrderedCollection};
use crate::outcome::logged;
use crate::types::{Capability, ColumnId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a column and its tasks. Remaining columns keep their positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteColumn {
    pub id: ColumnId,
}

operation!(DeleteColumn, verb = "delete", noun = "column", description = "Delete a column and its tasks");

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let id = self.id;

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            ctx.write(move |tx| {
                let column = super::read_column(tx, id)?;
                authorize(gate.as_ref(), tx, user, column.board_id, Capability::ManageStructure, "delete column")?;
                OrderedCollection::<ColumnKind>::new(tx).remove(id)?;
                touch_board(tx, column.board_id)
            })
            .await?;
            Ok(json!({ "deleted": true, "id": id }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}
