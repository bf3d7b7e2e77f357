//! DeleteTag command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{Capability, TagId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

/// Delete a tag and detach it from every task
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteTag {
    pub id: TagId,
}

operation!(DeleteTag, verb = "delete", noun = "tag", description = "Delete a tag");

impl DeleteTag {
    pub fn new(id: impl Into<TagId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for DeleteTag {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let id = self.id;

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();
            let detached = ctx
                .write(move |tx| {
                    let tag = super::read_tag(tx, id)?;
                    authorize(gate.as_ref(), tx, user, tag.board_id, Capability::ManageStructure, "delete tag")?;
                    let detached: i64 = tx.query_row("SELECT COUNT(*) FROM task_tags WHERE tag_id = ?1", [id], |row| row.get(0))?;
                    tx.execute("DELETE FROM tags WHERE id = ?1", [id])?;
                    Ok(detached)
                })
                .await?;
            info!(tag = %id, detached, "tag deleted");
            Ok(json!({ "deleted": true, "id": id, "detached": detached }))
        }
        .await;

        logged(self, ctx, start, result)
    }
}
