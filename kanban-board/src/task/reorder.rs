//! ReorderTasks command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::column::read_column;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{OrderedCollection, TaskKind};
use crate::outcome::logged;
use crate::types::{Capability, ColumnId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Rewrite task positions in a column. `order` must list every task of
/// the column exactly once; a stale list is rejected as retryable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReorderTasks {
    pub column_id: ColumnId,
    pub order: Vec<TaskId>,
}

operation!(ReorderTasks, verb = "reorder", noun = "tasks", description = "Reorder all tasks of a column");

impl ReorderTasks {
    pub fn new(column_id: impl Into<ColumnId>, order: impl IntoIterator<Item = TaskId>) -> Self {
        Self {
            column_id: column_id.into(),
            order: order.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ReorderTasks {
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
                let board = read_column(tx, cmd.column_id)?.board_id;
                authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "reorder tasks")?;
                OrderedCollection::<TaskKind>::new(tx).reorder(cmd.column_id, &cmd.order)?;
                touch_board(tx, board)
            })
            .await?;
            Ok(json!({ "column_id": self.column_id, "order": self.order }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}
