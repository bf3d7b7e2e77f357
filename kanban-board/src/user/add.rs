//! AddUser command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::UserId;
use chrono::Utc;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::{params, OptionalExtension};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Register an identity
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddUser {
    pub email: String,
    pub name: Option<String>,
}

operation!(AddUser, verb = "add", noun = "user", description = "Register a user identity");

impl AddUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddUser {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let email = self.email.trim().to_lowercase();
            if email.is_empty() || !email.contains('@') {
                return Err(KanbanError::validation("email", "a valid email is required"));
            }
            let name = self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(String::from);

            let id = ctx
                .write(move |tx| -> Result<UserId> {
                    let taken: Option<i64> = tx
                        .query_row("SELECT id FROM users WHERE email = ?1", [&email], |row| row.get(0))
                        .optional()?;
                    if taken.is_some() {
                        return Err(KanbanError::conflict("user", format!("{email} is already registered")));
                    }
                    tx.execute(
                        "INSERT INTO users (email, name, created_at) VALUES (?1, ?2, ?3)",
                        params![email, name, Utc::now()],
                    )?;
                    Ok(UserId(tx.last_insert_rowid()))
                })
                .await?;

            info!(user = %id, "user registered");
            let user = ctx.read(move |tx| super::read_user(tx, id)).await?;
            Ok(serde_json::to_value(user)?)
        }
        .await;

        logged(self, ctx, start, result)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["id"].as_i64().map(|id| vec![id.to_string()]).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup() -> (TempDir, KanbanContext) {
        let temp = TempDir::new().unwrap();
        let ctx = KanbanContext::new(temp.path().join("kanban.db"));
        ctx.init().await.unwrap();
        (temp, ctx)
    }

    #[tokio::test]
    async fn test_add_user() {
        let (_temp, ctx) = setup().await;

        let result = AddUser::new(" Ada@Example.com ")
            .with_name("Ada")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["email"], "ada@example.com");
        assert_eq!(result["name"], "Ada");
        assert!(result["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let (_temp, ctx) = setup().await;

        AddUser::new("a@example.com").execute(&ctx).await.into_result().unwrap();
        let err = AddUser::new("A@example.com")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let (_temp, ctx) = setup().await;
        let err = AddUser::new("nobody").execute(&ctx).await.into_result().unwrap_err();
        assert!(matches!(err, KanbanError::Validation { .. }));
    }
}
