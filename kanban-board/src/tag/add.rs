//! AddTag command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{BoardId, Capability, TagId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Create a tag on a board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AddTag {
    pub board_id: BoardId,
    pub name: String,
    /// `#rrggbb`; picked from the palette when omitted
    pub color: Option<String>,
}

operation!(AddTag, verb = "add", noun = "tag", description = "Create a tag on a board");

impl AddTag {
    pub fn new(board_id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            name: name.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for AddTag {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let name = self.name.trim().to_string();
            if name.is_empty() {
                return Err(KanbanError::validation("name", "tag name is required"));
            }
            let color = match self.color.as_deref() {
                Some(color) => super::normalize_color(color)?,
                None => super::palette_color(&name).to_string(),
            };
            let board = self.board_id;
            let gate = ctx.gate();

            let tag = ctx
                .write(move |tx| {
                    authorize(gate.as_ref(), tx, user, board, Capability::ManageStructure, "add tag")?;
                    super::ensure_unique_name(tx, board, &name, None)?;
                    tx.execute(
                        "INSERT INTO tags (board_id, name, color) VALUES (?1, ?2, ?3)",
                        params![board, name, color],
                    )?;
                    super::read_tag(tx, TagId(tx.last_insert_rowid()))
                })
                .await?;
            Ok(serde_json::to_value(tag)?)
        }
        .await;

        logged(self, ctx, start, result)
    }

    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result["id"].as_i64().map(|id| vec![id.to_string()]).unwrap_or_default()
    }
}
