//! ListTags command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{BoardId, Capability};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a board's tags by name
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListTags {
    pub board_id: BoardId,
}

operation!(ListTags, verb = "list", noun = "tags", description = "List a board's tags");

impl ListTags {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self { board_id: board_id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListTags {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let board = self.board_id;
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let tags = ctx
                .read(move |tx| {
                    authorize(gate.as_ref(), tx, user, board, Capability::View, "list tags")?;
                    super::tags_of_board(tx, board)
                })
                .await?;
            let count = tags.len();
            Ok(json!({ "tags": tags, "count": count }))
        }
        .await;

        unlogged(result)
    }
}
