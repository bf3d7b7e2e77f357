//! Authorization gate: who may do what on a board
//!
//! The engine treats role lookup as an external predicate. [`MembershipGate`]
//! answers from the `boards.owner_id` and `board_members` rows inside the
//! command's own transaction, so the role it sees is the role at commit time.
//! Other gates (an SSO directory, a fixed test map) plug in through
//! [`AuthorizationGate`].

use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Capability, Role, UserId};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

/// Supplies a user's role on a board
pub trait AuthorizationGate: Send + Sync {
    /// The caller's role on `board`, or `None` when they have no access
    fn role_of(&self, conn: &Connection, user: UserId, board: BoardId) -> Result<Option<Role>>;
}

/// Role lookup from the board owner and membership tables
#[derive(Debug, Default, Clone, Copy)]
pub struct MembershipGate;

impl AuthorizationGate for MembershipGate {
    fn role_of(&self, conn: &Connection, user: UserId, board: BoardId) -> Result<Option<Role>> {
        let owner: Option<UserId> = conn
            .query_row(
                "SELECT owner_id FROM boards WHERE id = ?1",
                [board],
                |row| row.get(0),
            )
            .optional()?;

        match owner {
            None => Ok(None),
            Some(owner) if owner == user => Ok(Some(Role::Owner)),
            Some(_) => Ok(conn
                .query_row(
                    "SELECT role FROM board_members WHERE board_id = ?1 AND user_id = ?2",
                    [board.get(), user.get()],
                    |row| row.get(0),
                )
                .optional()?),
        }
    }
}

/// Require `capability` on `board` for `user`, returning the role held.
///
/// A missing board is `NotFound`; no role or an insufficient one is
/// `Permission`, naming `action`.
pub fn authorize(
    gate: &dyn AuthorizationGate,
    conn: &Connection,
    user: UserId,
    board: BoardId,
    capability: Capability,
    action: &str,
) -> Result<Role> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM boards WHERE id = ?1)",
        [board],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(KanbanError::not_found("board", board));
    }

    match gate.role_of(conn, user, board)? {
        Some(role) if role.allows(capability) => Ok(role),
        Some(role) => {
            debug!(%user, %board, %role, action, "role insufficient");
            Err(KanbanError::permission(action))
        }
        None => {
            debug!(%user, %board, action, "not a board member");
            Err(KanbanError::permission(action))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::create_schema;

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO users (email, created_at) VALUES ('owner@example.com', '2024-01-01T00:00:00Z');
             INSERT INTO users (email, created_at) VALUES ('admin@example.com', '2024-01-01T00:00:00Z');
             INSERT INTO users (email, created_at) VALUES ('member@example.com', '2024-01-01T00:00:00Z');
             INSERT INTO users (email, created_at) VALUES ('stranger@example.com', '2024-01-01T00:00:00Z');
             INSERT INTO boards (name, owner_id, created_at, updated_at)
                VALUES ('B', 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z');
             INSERT INTO board_members VALUES (1, 1, 'OWNER', '2024-01-01T00:00:00Z');
             INSERT INTO board_members VALUES (1, 2, 'ADMIN', '2024-01-01T00:00:00Z');
             INSERT INTO board_members VALUES (1, 3, 'MEMBER', '2024-01-01T00:00:00Z');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_membership_roles() {
        let conn = seeded();
        let gate = MembershipGate;
        assert_eq!(gate.role_of(&conn, UserId(1), BoardId(1)).unwrap(), Some(Role::Owner));
        assert_eq!(gate.role_of(&conn, UserId(2), BoardId(1)).unwrap(), Some(Role::Admin));
        assert_eq!(gate.role_of(&conn, UserId(3), BoardId(1)).unwrap(), Some(Role::Member));
        assert_eq!(gate.role_of(&conn, UserId(4), BoardId(1)).unwrap(), None);
        assert_eq!(gate.role_of(&conn, UserId(1), BoardId(9)).unwrap(), None);
    }

    #[test]
    fn test_authorize() {
        let conn = seeded();
        let gate = MembershipGate;

        let role = authorize(&gate, &conn, UserId(2), BoardId(1), Capability::ManageStructure, "add column").unwrap();
        assert_eq!(role, Role::Admin);

        let denied = authorize(&gate, &conn, UserId(3), BoardId(1), Capability::ManageStructure, "add column");
        assert!(matches!(denied, Err(KanbanError::Permission { .. })));

        let stranger = authorize(&gate, &conn, UserId(4), BoardId(1), Capability::View, "get board");
        assert!(matches!(stranger, Err(KanbanError::Permission { .. })));

        let missing = authorize(&gate, &conn, UserId(1), BoardId(9), Capability::View, "get board");
        assert!(matches!(missing, Err(KanbanError::NotFound { .. })));
    }
}
