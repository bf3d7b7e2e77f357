//! Tag commands. Tags belong to one board; names are unique within it.

mod add;
mod color;
mod delete;
mod list;
mod update;

pub use add::AddTag;
pub use color::{normalize_color, palette_color};
pub use delete::DeleteTag;
pub use list::ListTags;
pub use update::UpdateTag;

use crate::error::{KanbanError, Result};
use crate::types::{BoardId, Tag, TagId};
use rusqlite::{params, Connection, OptionalExtension};

pub(crate) fn read_tag(conn: &Connection, id: TagId) -> Result<Tag> {
    conn.query_row(
        "SELECT id, board_id, name, color FROM tags WHERE id = ?1",
        [id],
        Tag::from_row,
    )
    .optional()?
    .ok_or_else(|| KanbanError::not_found("tag", id))
}

/// A board's tags by name
pub(crate) fn tags_of_board(conn: &Connection, board: BoardId) -> Result<Vec<Tag>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, board_id, name, color FROM tags WHERE board_id = ?1 ORDER BY name, id",
    )?;
    let tags = stmt
        .query_map([board], Tag::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(tags)
}

/// Reject a name already used by another tag on the board
fn ensure_unique_name(conn: &Connection, board: BoardId, name: &str, except: Option<TagId>) -> Result<()> {
    let taken: Option<TagId> = conn
        .query_row(
            "SELECT id FROM tags WHERE board_id = ?1 AND name = ?2",
            params![board, name],
            |row| row.get(0),
        )
        .optional()?;
    match taken {
        Some(id) if Some(id) != except => Err(KanbanError::conflict(
            "tag",
            format!("a tag named '{name}' already exists on this board"),
        )),
        _ => Ok(()),
    }
}
