//! Shared fixtures for command tests

use crate::board::CreateBoard;
use crate::context::KanbanContext;
use crate::task::AddTask;
use crate::types::{BoardId, ColumnId, Role, TaskId, UserId};
use crate::user::AddUser;
use chrono::Utc;
use kanban_operations::Execute;
use rusqlite::params;
use tempfile::TempDir;

/// A fresh, initialized store with no caller set
pub async fn setup() -> (TempDir, KanbanContext) {
    let temp = TempDir::new().unwrap();
    let ctx = KanbanContext::new(temp.path().join("kanban.db"));
    ctx.init().await.unwrap();
    (temp, ctx)
}

pub async fn add_user(ctx: &KanbanContext, email: &str) -> UserId {
    let user = AddUser::new(email).execute(ctx).await.into_result().unwrap();
    UserId(user["id"].as_i64().unwrap())
}

/// Insert a membership row directly
pub async fn join(ctx: &KanbanContext, board: BoardId, user: UserId, role: Role) {
    ctx.write(move |tx| {
        tx.execute(
            "INSERT INTO board_members (board_id, user_id, role, added_at) VALUES (?1, ?2, ?3, ?4)",
            params![board, user, role, Utc::now()],
        )?;
        Ok(())
    })
    .await
    .unwrap();
}

pub async fn add_task(ctx: &KanbanContext, column: ColumnId, title: &str) -> TaskId {
    let task = AddTask::new(column, title).execute(ctx).await.into_result().unwrap();
    TaskId(task["id"].as_i64().unwrap())
}

/// `(id, position)` pairs of a column, in display order
pub async fn task_positions(ctx: &KanbanContext, column: ColumnId) -> Vec<(TaskId, i64)> {
    ctx.read(move |tx| {
        let mut stmt = tx.prepare("SELECT id, position FROM tasks WHERE column_id = ?1 ORDER BY position, id")?;
        let rows = stmt
            .query_map([column], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    })
    .await
    .unwrap()
}

/// One board with its default columns, owned by `owner@example.com`
pub struct Fixture {
    pub _temp: TempDir,
    /// No caller set
    pub ctx: KanbanContext,
    /// Acting as the owner
    pub owner: KanbanContext,
    pub owner_id: UserId,
    pub board: BoardId,
    pub columns: Vec<ColumnId>,
}

pub async fn fixture() -> Fixture {
    let (temp, ctx) = setup().await;
    let owner_id = add_user(&ctx, "owner@example.com").await;
    let owner = ctx.as_user(owner_id);

    let board = CreateBoard::new("Roadmap").execute(&owner).await.into_result().unwrap();
    let columns = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|column| ColumnId(column["id"].as_i64().unwrap()))
        .collect();

    Fixture {
        _temp: temp,
        ctx,
        owner,
        owner_id,
        board: BoardId(board["id"].as_i64().unwrap()),
        columns,
    }
}
