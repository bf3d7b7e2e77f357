//! Helpers shared by the integration tests

#![allow(dead_code)]

use kanban_board::board::CreateBoard;
use kanban_board::task::AddTask;
use kanban_board::user::AddUser;
use kanban_board::{BoardId, ColumnId, Execute, KanbanContext, TaskId, UserId};
use tempfile::TempDir;

pub struct Board {
    pub _temp: TempDir,
    pub ctx: KanbanContext,
    pub owner: UserId,
    pub board: BoardId,
    pub columns: Vec<ColumnId>,
}

/// A fresh store with one board and its default columns, acting as the owner
pub async fn board() -> Board {
    let temp = TempDir::new().unwrap();
    let ctx = KanbanContext::new(temp.path().join("kanban.db"));
    ctx.init().await.unwrap();

    let user = AddUser::new("owner@example.com").execute(&ctx).await.into_result().unwrap();
    let owner = UserId(user["id"].as_i64().unwrap());
    let ctx = ctx.as_user(owner);

    let board = CreateBoard::new("Board").execute(&ctx).await.into_result().unwrap();
    let columns = board["columns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| ColumnId(c["id"].as_i64().unwrap()))
        .collect();

    Board {
        _temp: temp,
        ctx,
        owner,
        board: BoardId(board["id"].as_i64().unwrap()),
        columns,
    }
}

pub async fn add_task(ctx: &KanbanContext, column: ColumnId, title: &str) -> TaskId {
    let task = AddTask::new(column, title).execute(ctx).await.into_result().unwrap();
    TaskId(task["id"].as_i64().unwrap())
}

/// `(id, position)` of every task in a column, in display order
pub async fn positions(ctx: &KanbanContext, column: ColumnId) -> Vec<(TaskId, i64)> {
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

pub fn ids(positions: &[(TaskId, i64)]) -> Vec<TaskId> {
    positions.iter().map(|(id, _)| *id).collect()
}

pub fn is_dense(positions: &[(TaskId, i64)]) -> bool {
    positions.iter().enumerate().all(|(i, (_, p))| *p == i as i64 + 1)
}
