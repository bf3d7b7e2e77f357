//! User commands
//!
//! Users are identity records issued by the outer identity provider. The
//! engine stores just enough to attach memberships and match invites.

mod add;
mod get;

pub use add::AddUser;
pub use get::GetUser;

use crate::error::{KanbanError, Result};
use crate::types::{User, UserId};
use rusqlite::{Connection, OptionalExtension};

/// Load a user or fail with NotFound
pub(crate) fn read_user(conn: &Connection, id: UserId) -> Result<User> {
    conn.query_row(
        "SELECT id, email, name FROM users WHERE id = ?1",
        [id],
        User::from_row,
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("user", id))
}
