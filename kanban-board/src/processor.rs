//! Operation processor that records activity in the store

use crate::context::KanbanContext;
use crate::error::KanbanError;
use kanban_operations::{async_trait, Execute, OperationProcessor};
use serde_json::Value;
use tracing::{debug, warn};

/// Runs commands and appends their log entries to the `activity` table.
///
/// The entry's actor is the caller set on the context unless the processor
/// was built with an explicit label.
#[derive(Debug, Default, Clone)]
pub struct KanbanOperationProcessor {
    actor: Option<String>,
}

impl KanbanOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp every entry with `actor` (e.g. a client or session label)
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }
}

#[async_trait]
impl OperationProcessor<KanbanContext, KanbanError> for KanbanOperationProcessor {
    async fn process<O>(&self, operation: &O, ctx: &KanbanContext) -> Result<Value, KanbanError>
    where
        O: Execute<KanbanContext, KanbanError> + 'static,
    {
        let (result, entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = entry {
            if let Some(actor) = &self.actor {
                entry.actor = Some(actor.clone());
            }
            let op = entry.op.clone();
            // The command has already committed; a lost audit row is not its failure
            match ctx.append_activity(entry).await {
                Ok(()) => debug!(%op, "activity recorded"),
                Err(error) => warn!(%op, %error, "failed to record activity"),
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{GetBoard, RenameBoard};
    use crate::test_support::fixture;

    #[tokio::test]
    async fn test_process_records_mutations_only() {
        let fx = fixture().await;
        let processor = KanbanOperationProcessor::new();

        processor.process(&RenameBoard::new(fx.board, "Renamed"), &fx.owner).await.unwrap();
        processor.process(&GetBoard::new(fx.board), &fx.owner).await.unwrap();

        let entries = fx.ctx.read_activity(None).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].op, "rename board");
        assert_eq!(entries[0].actor, Some(fx.owner_id.to_string()));
    }

    #[tokio::test]
    async fn test_failed_mutation_is_recorded_with_label() {
        let fx = fixture().await;
        let processor = KanbanOperationProcessor::with_actor("cli");

        let err = processor.process(&RenameBoard::new(fx.board, " "), &fx.owner).await.unwrap_err();
        assert!(matches!(err, KanbanError::Validation { .. }));

        let entries = fx.ctx.read_activity(Some(10)).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].actor.as_deref(), Some("cli"));
        assert!(entries[0].output["error"].is_string());
    }
}
