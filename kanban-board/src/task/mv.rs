//! MoveTask command

use crate::auth::authorize;
use crate::board::touch_board;
use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::ordering::{MoveCoordinator, TaskKind};
use crate::outcome::logged;
use crate::types::{Capability, ColumnId, TaskId};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Move a task to a column of the same board at a 0-based index.
///
/// The destination is renumbered densely; the source column keeps its
/// remaining positions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveTask {
    pub id: TaskId,
    pub to_column_id: ColumnId,
    /// Clamped to the destination size; the end when omitted
    pub new_index: Option<i64>,
}

operation!(MoveTask, verb = "move", noun = "task", description = "Move a task to a column at an index");

impl MoveTask {
    pub fn new(id: impl Into<TaskId>, to_column_id: impl Into<ColumnId>, new_index: i64) -> Self {
        Self {
            id: id.into(),
            to_column_id: to_column_id.into(),
            new_index: Some(new_index),
        }
    }

    /// Move to the end of a column
    pub fn to_column(id: impl Into<TaskId>, to_column_id: impl Into<ColumnId>) -> Self {
        Self {
            id: id.into(),
            to_column_id: to_column_id.into(),
            new_index: None,
        }
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for MoveTask {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let cmd = self.clone();

        let result: Result<Value> = async {
            let user = ctx.user()?;
            let gate = ctx.gate();

            let outcome = ctx
                .write(move |tx| {
                    let mut board_id = None;
                    let outcome = MoveCoordinator::<TaskKind>::new(tx).move_record(
                        cmd.id,
                        cmd.to_column_id,
                        cmd.new_index,
                        |board| {
                            authorize(gate.as_ref(), tx, user, board, Capability::EditWork, "move task")?;
                            board_id = Some(board);
                            Ok(())
                        },
                    )?;
                    super::touch_task(tx, cmd.id)?;
                    if let Some(board) = board_id {
                        touch_board(tx, board)?;
                    }
                    Ok(outcome)
                })
                .await?;
            Ok(serde_json::to_value(outcome)?)
        }
        .await;

        logged(self, ctx, start, result)
    }

    fn affected_resource_ids(&self, _result: &Value) -> Vec<String> {
        vec![self.id.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::test_support::{add_task, add_user, fixture, task_positions};

    #[tokio::test]
    async fn test_move_task_within_column() {
        let fx = fixture().await;
        let a = fx.columns[0];
        let t1 = add_task(&fx.owner, a, "T1").await;
        let t2 = add_task(&fx.owner, a, "T2").await;
        let t3 = add_task(&fx.owner, a, "T3").await;

        MoveTask::new(t2, a, 0).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(task_positions(&fx.ctx, a).await, vec![(t2, 1), (t1, 2), (t3, 3)]);
    }

    #[tokio::test]
    async fn test_move_task_to_other_column() {
        let fx = fixture().await;
        let [a, b] = [fx.columns[0], fx.columns[1]];
        let t1 = add_task(&fx.owner, a, "T1").await;
        let t2 = add_task(&fx.owner, a, "T2").await;
        let t3 = add_task(&fx.owner, a, "T3").await;

        let outcome = MoveTask::new(t3, b, 0).execute(&fx.owner).await.into_result().unwrap();
        assert_eq!(outcome["to"], b.get());
        assert_eq!(outcome["from"], a.get());

        assert_eq!(task_positions(&fx.ctx, b).await, vec![(t3, 1)]);
        assert_eq!(task_positions(&fx.ctx, a).await, vec![(t1, 1), (t2, 2)]);
    }

    #[tokio::test]
    async fn test_move_task_append_and_clamp() {
        let fx = fixture().await;
        let [a, b] = [fx.columns[0], fx.columns[1]];
        let t1 = add_task(&fx.owner, a, "T1").await;
        let b1 = add_task(&fx.owner, b, "B1").await;
        let t2 = add_task(&fx.owner, a, "T2").await;

        MoveTask::to_column(t1, b).execute(&fx.owner).await.into_result().unwrap();
        MoveTask::new(t2, b, -3).execute(&fx.owner).await.into_result().unwrap();

        assert_eq!(task_positions(&fx.ctx, b).await, vec![(t2, 1), (b1, 2), (t1, 3)]);
    }

    #[tokio::test]
    async fn test_move_task_across_boards_rejected() {
        let fx = fixture().await;
        let t1 = add_task(&fx.owner, fx.columns[0], "T1").await;
        let other = CreateBoard::new("Other").execute(&fx.owner).await.into_result().unwrap();
        let foreign_column = other["columns"][0]["id"].as_i64().unwrap();

        let err = MoveTask::new(t1, foreign_column, 0)
            .execute(&fx.owner)
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::CrossScope { .. }));
        assert_eq!(task_positions(&fx.ctx, fx.columns[0]).await, vec![(t1, 1)]);
    }

    #[tokio::test]
    async fn test_move_task_requires_membership() {
        let fx = fixture().await;
        let t1 = add_task(&fx.owner, fx.columns[0], "T1").await;
        let stranger = add_user(&fx.ctx, "s@example.com").await;

        let err = MoveTask::new(t1, fx.columns[1], 0)
            .execute(&fx.ctx.as_user(stranger))
            .await
            .into_result()
            .unwrap_err();
        assert!(matches!(err, KanbanError::Permission { .. }));
    }
}
