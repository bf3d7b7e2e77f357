//! ListBoards command

use crate::context::KanbanContext;
use crate::error::{KanbanError, Result};
use crate::outcome::unlogged;
use crate::types::{Board, BoardSummary, Role, User};
use kanban_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// List boards the caller owns or belongs to, most recently updated first
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ListBoards {}

operation!(
    ListBoards,
    verb = "list",
    noun = "boards",
    description = "List the caller's boards with counts"
);

impl ListBoards {
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListBoards {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let result: Result<Value> = async {
            let user = ctx.user()?;
            let boards = ctx
                .read(move |tx| {
                    let mut stmt = tx.prepare(
                        "SELECT b.id, b.name, b.owner_id, b.created_at, b.updated_at,
                                u.email AS owner_email, u.name AS owner_name,
                                CASE WHEN b.owner_id = ?1 THEN 'OWNER' ELSE m.role END AS role,
                                (SELECT COUNT(*) FROM board_members WHERE board_id = b.id) AS member_count,
                                (SELECT COUNT(*) FROM board_columns WHERE board_id = b.id) AS column_count,
                                (SELECT COUNT(*) FROM tasks t JOIN board_columns c ON c.id = t.column_id
                                  WHERE c.board_id = b.id) AS task_count
                         FROM boards b
                         JOIN users u ON u.id = b.owner_id
                         LEFT JOIN board_members m ON m.board_id = b.id AND m.user_id = ?1
                         WHERE b.owner_id = ?1 OR m.user_id IS NOT NULL
                         ORDER BY b.updated_at DESC, b.id DESC",
                    )?;
                    let boards = stmt
                        .query_map([user], |row| {
                            let board = Board::from_row(row)?;
                            Ok(BoardSummary {
                                owner: User {
                                    id: board.owner_id,
                                    email: row.get("owner_email")?,
                                    name: row.get("owner_name")?,
                                },
                                role: row.get::<_, Role>("role")?,
                                member_count: row.get("member_count")?,
                                column_count: row.get("column_count")?,
                                task_count: row.get("task_count")?,
                                board,
                            })
                        })?
                        .collect::<rusqlite::Result<Vec<_>>>()?;
                    Ok(boards)
                })
                .await?;

            Ok(json!({ "boards": boards, "count": boards.len() }))
        }
        .await;

        unlogged(result)
    }
}
