//! ListMembers command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{BoardId, Capability};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List a board's members in joining order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListMembers {
    pub board_id: BoardId,
}

operation!(ListMembers, verb = "list", noun = "members", description = "List board members");

impl ListMembers {
    pub fn new(board_id: impl Into<BoardId>) -> Self {
        Self {
            board_id: board_id.into(),
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListMembers {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let board = self.board_id;
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let members = ctx
                .read(move |tx| {
                    authorize(gate.as_ref(), tx, user, board, Capability::View, "list members")?;
                    super::read_members(tx, board)
                })
                .await?;
            Ok(json!({ "members": members, "count": members.len() }))
        }
        .await;

        unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{add_user, fixture, join};
    use crate::types::Role;

    #[tokio::test]
    async fn test_list_members() {
        let fx = fixture().await;
        let member = add_user(&fx.ctx, "m@example.com").await;
        join(&fx.ctx, fx.board, member, Role::Member).await;

        let result = ListMembers::new(fx.board)
            .execute(&fx.ctx.as_user(member))
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["count"], 2);
        assert_eq!(result["members"][0]["role"], "OWNER");
        assert_eq!(result["members"][1]["user"]["email"], "m@example.com");
    }
}
