//! GetUser command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::UserId;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Look up a user by id
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GetUser {
    pub id: UserId,
}

operation!(GetUser, verb = "get", noun = "user", description = "Get a user by id");

impl GetUser {
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for GetUser {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let id = self.id;
        let result: Result<Value> = async {
            let user = ctx.read(move |tx| super::read_user(tx, id)).await?;
            Ok(serde_json::to_value(user)?)
        }
        .await;

        unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::AddUser;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_user() {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("kanban.db"));
        ctx.init().await.unwrap();

        let added = AddUser::new("a@example.com").execute(&ctx).await.into_result().unwrap();
        let id = added["id"].as_i64().unwrap();

        let user = GetUser::new(id).execute(&ctx).await.into_result().unwrap();
        assert_eq!(user["email"], "a@example.com");

        let missing = GetUser::new(999).execute(&ctx).await.into_result().unwrap_err();
        assert!(matches!(missing, KanbanError::NotFound { .. }));
    }
}
