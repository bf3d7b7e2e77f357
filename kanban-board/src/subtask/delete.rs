//! DeleteSubtask command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{OrderedCollection, SubtaskKind};
use crate::outcome::logged;
use crate::task::touch_task;
use crate::types::{Capability, SubtaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Delete a subtask
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteSubtask {
    pub id: SubtaskId,
}

operation!(DeleteSubtask, verb = "delete", noun = "subtask", description = "Delete a subtask");

impl DeleteSubtask {
    pub fn new(id: impl Into<SubtaskId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteSubtask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let id = self.id;

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let task = ctx
                .write(move |tx| {
                    let board = super::board_of_subtask(tx, id)?;
                    authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "delete subtask")?;
                    let task = OrderedCollection::<SubtaskKind>::new(tx).remove(id)?;
                    touch_task(tx, task)?;
                    Ok(task)
                })
                .await?;
            Ok(json!({ "deleted": true, "id": id, "task_id": task }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}
