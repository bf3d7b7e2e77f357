//! Board commands: boards, membership and invites

mod accept;
mod create;
mod delete;
mod get;
mod invite;
mod leave;
mod list;
mod members;
mod remove_member;
mod rename;
mod transfer;
mod update_role;

pub use accept::AcceptInvite;
pub use create::CreateBoard;
pub use delete::DeleteBoard;
pub use get::GetBoard;
pub use invite::CreateInvite;
pub use leave::LeaveBoard;
pub use list::ListBoards;
pub use members::ListMembers;
pub use remove_member::RemoveMember;
pub use rename::RenameBoard;
pub use transfer::TransferOwnership;
pub use update_role::UpdateMemberRole;

use crate::column::column_details;
use crate::error::{KanbanError, Result};
use crate::tag::tags_of_board;
use crate::types::{Board, BoardDetail, BoardId, Member, Role, UserId};
use crate::user::read_user;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

pub(crate) fn read_board(conn: &Connection, id: BoardId) -> Result<Board> {
    conn.query_row(
        "SELECT id, name, owner_id, created_at, updated_at FROM boards WHERE id = ?1",
        [id],
        Board::from_row,
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("board", id))
}

/// Bump `updated_at` so the board sorts first in listings
pub(crate) fn touch_board(conn: &Connection, id: BoardId) -> Result<()> {
    conn.execute(
        "UPDATE boards SET updated_at = ?1 WHERE id = ?2",
        params![Utc::now(), id],
    )?;
    Ok(())
}

/// Members in the order they joined
pub(crate) fn read_members(conn: &Connection, board: BoardId) -> Result<Vec<Member>> {
    let mut stmt = conn.prepare_cached(
        "SELECT m.board_id, m.user_id, u.email, u.name, m.role, m.added_at
         FROM board_members m JOIN users u ON u.id = m.user_id
         WHERE m.board_id = ?1
         ORDER BY m.added_at, m.user_id",
    )?;
    let members = stmt
        .query_map([board], Member::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(members)
}

/// A membership row's role, if the user has one
pub(crate) fn member_role(conn: &Connection, board: BoardId, user: UserId) -> Result<Option<Role>> {
    Ok(conn
        .query_row(
            "SELECT role FROM board_members WHERE board_id = ?1 AND user_id = ?2",
            params![board, user],
            |row| row.get(0),
        )
        .optional()?)
}

pub(crate) fn add_member(conn: &Connection, board: BoardId, user: UserId, role: Role) -> Result<()> {
    conn.execute(
        "INSERT INTO board_members (board_id, user_id, role, added_at) VALUES (?1, ?2, ?3, ?4)",
        params![board, user, role, Utc::now()],
    )?;
    Ok(())
}

/// The whole board tree, every level ordered by position
pub(crate) fn board_detail(conn: &Connection, id: BoardId) -> Result<BoardDetail> {
    let board = read_board(conn, id)?;
    let owner = read_user(conn, board.owner_id)?;
    Ok(BoardDetail {
        owner,
        members: read_members(conn, id)?,
        columns: column_details(conn, id)?,
        tags: tags_of_board(conn, id)?,
        board,
    })
}
