//! ListActivity command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Recent activity entries, newest first
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListActivity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

operation!(ListActivity, verb = "list", noun = "activity", description = "List recent activity");

impl ListActivity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListActivity {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            ctx.user()?;
            let entries = ctx.read_activity(self.limit).await?;
            let count = entries.len();
            Ok(json!({ "entries": entries, "count": count }))
        }
        .await;

        unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RenameBoard;
    use crate::processor::KanbanOperationProcessor;
    use crate::test_support::fixture;
    use kanban_operations::OperationProcessor;

    #[tokio::test]
    async fn test_list_activity_newest_first() {
        let fx = fixture().await;
        let processor = KanbanOperationProcessor::new();
        processor.process(&RenameBoard::new(fx.board, "One"), &fx.owner).await.unwrap();
        processor.process(&RenameBoard::new(fx.board, "Two"), &fx.owner).await.unwrap();

        let all = ListActivity::new().execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(all["count"], 2);
        assert_eq!(all["entries"][0]["input"]["name"], "Two");

        let limited = ListActivity::new().with_limit(1).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(limited["count"], 1);

        let anonymous = ListActivity::new().execute(&fx.ctx).await.into_result().unwrap_err();
        assert!(matches!(anonymous, KanbanError::Unauthenticated));
    }
}
