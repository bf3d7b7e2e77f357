//! GetBoard command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{BoardId, Capability};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Get a board with its columns, tasks, subtasks, tags and members
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetBoard {
    pub id: BoardId,
}

operation!(GetBoard, verb = "get", noun = "board", description = "Get the full board tree");

impl GetBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetBoard {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let id = self.id;
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let detail = ctx
                .read(move |tx| {
                    authorize(gate.as_ref(), tx, user, id, Capability::View, "view board")?;
                    super::board_detail(tx, id)
                })
                .await?;
            Ok(serde_json::to_value(detail)?)
        }
        .await;

        unlogged(result)
    }
}
