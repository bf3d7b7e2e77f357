//! UpdateTag command

use crate::auth::authorize;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::logged;
use crate::types::{Capability, TagId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rename or recolor a tag
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateTag {
    pub id: TagId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

operation!(UpdateTag, verb = "update", noun = "tag", description = "Rename or recolor a tag");

impl UpdateTag {
    pub fn new(id: impl Into<TagId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            color: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for UpdateTag {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let name = match self.name.as_deref().map(str::trim) {
                Some("") => return Err(KanbanError::validation("name", "tag name must not be blank")),
                other => other.map(String::from),
            };
            let color = self.color.as_deref().map(super::normalize_color).transpose()?;
            let id = self.id;
            let gate = ctx.gate();

            let tag = ctx
                .write(move |tx| {
                    let mut tag = super::read_tag(tx, id)?;
                    authorize(gate.as_ref(), tx, user, tag.board_id, Capability::ManageStructure, "update tag")?;
                    if let Some(name) = name {
                        super::ensure_unique_name(tx, tag.board_id, &name, Some(id))?;
                        tag.name = name;
                    }
                    if color.is_some() {
                        tag.color = color;
                    }
                    tx.execute(
                        "UPDATE tags SET name = ?1, color = ?2 WHERE id = ?3",
                        params![tag.name, tag.color, id],
                    )?;
                    Ok(tag)
                })
                .await?;
            Ok(serde_json::to_value(tag)?)
        }
        .await;

        logged(self, ctx, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::AddTag;
    use crate::test_support::fixture;

    #[tokio::test]
    async fn test_update_tag() {
        let fx = fixture().await;
        let bug = AddTag::new(fx.board, "bug").execute(&fx.owner).await.into_result().unwrap();
        AddTag::new(fx.board, "ux").execute(&fx.owner).await.into_result().unwrap();
        let id = bug["id"].as_i64().unwrap();

        let updated = UpdateTag::new(id)
            .with_name("defect")
            .with_color("00ff00")
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap();
        assert_eq!(updated["name"], "defect");
        assert_eq!(updated["color"], "#00ff00");

        let same = UpdateTag::new(id).with_name("defect").execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(same["name"], "defect");

        let taken = UpdateTag::new(id).with_name("ux").execute(&fx.owner).await.into_result().unwrap_err();
        assert!(matches!(taken, KanbanError::Conflict { .. }));
    }
}
