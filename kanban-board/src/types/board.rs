//! Board-level types: User, Board, Member, Invite

use super::column::ColumnDetail;
use super::ids::{BoardId, InviteId, UserId};
use super::role::Role;
use super::task::Tag;
use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// An identity record. Authentication happens elsewhere; the engine only
/// needs an id to attach roles to and an email to match invites against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl User {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            name: row.get("name")?,
        })
    }
}

/// The kanban board - the root container every permission check runs against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            owner_id: row.get("owner_id")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }
}

/// A board as listed for a user, with owner and counts
#[derive(Debug, Clone, Serialize)]
pub struct BoardSummary {
    #[serde(flatten)]
    pub board: Board,
    pub owner: User,
    pub role: Role,
    pub member_count: i64,
    pub column_count: i64,
    pub task_count: i64,
}

/// A user's membership on a board
#[derive(Debug, Clone, Serialize)]
pub struct Member {
    pub board_id: BoardId,
    pub user: User,
    pub role: Role,
    pub added_at: DateTime<Utc>,
}

impl Member {
    /// Map a row from `board_members JOIN users`
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            board_id: row.get("board_id")?,
            user: User {
                id: row.get("user_id")?,
                email: row.get("email")?,
                name: row.get("name")?,
            },
            role: row.get("role")?,
            added_at: row.get("added_at")?,
        })
    }
}

/// An invitation to join a board, redeemed by token
#[derive(Debug, Clone, Serialize)]
pub struct Invite {
    pub id: InviteId,
    pub board_id: BoardId,
    pub email: String,
    pub token: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted_by: Option<UserId>,
}

impl Invite {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            board_id: row.get("board_id")?,
            email: row.get("email")?,
            token: row.get("token")?,
            role: row.get("role")?,
            expires_at: row.get("expires_at")?,
            accepted_by: row.get("accepted_by")?,
        })
    }

    /// Has the invite passed its expiry?
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at < now)
    }
}

/// Everything on a board, nested and ordered by position
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    pub owner: User,
    pub members: Vec<Member>,
    pub columns: Vec<ColumnDetail>,
    pub tags: Vec<Tag>,
}
