//! Ordered sibling sets and the move/reorder protocol
//!
//! Columns within a board, tasks within a column and subtasks within a task
//! all keep an integer `position` that must read as a dense `1..N` under each
//! parent after every reorder or move. One generic implementation serves all
//! three through [`SiblingKind`]:
//!
//! - [`sequence`] turns an ordered id list into `1..N` positions
//! - [`OrderedCollection`] validates a full reorder against the stored
//!   siblings and writes it, or appends a record at `max + 1`
//! - [`MoveCoordinator`] relocates one record within its parent or into
//!   another parent of the same board
//!
//! Both types borrow an open [`rusqlite::Transaction`]. Deleting a record
//! does not renumber its former siblings; the gap closes on the next reorder
//! or move into that parent.

mod collection;
mod kinds;
mod mover;
mod sequencer;

pub use collection::OrderedCollection;
pub use kinds::{ColumnKind, NewColumn, NewSubtask, NewTask, SubtaskKind, TaskKind};
pub use mover::{MoveCoordinator, MoveOutcome};
pub use sequencer::{sequence, splice};

use crate::error::Result;
use rusqlite::types::{FromSql, ToSql};
use rusqlite::Connection;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A kind of record kept in position order under a parent
pub trait SiblingKind: Send + Sync + 'static {
    /// Record id
    type Id: Copy + Eq + Hash + Debug + Display + ToSql + FromSql + Serialize + Send + Sync;
    /// Parent id
    type Parent: Copy + Eq + Debug + Display + ToSql + FromSql + Serialize + Send + Sync;
    /// Fields needed to create a record
    type Payload: Send + Sync;

    /// Name used in errors and logs ("task")
    const RESOURCE: &'static str;
    /// Name of the parent in errors ("column")
    const PARENT_RESOURCE: &'static str;
    /// Table holding the records
    const TABLE: &'static str;
    /// Foreign key column pointing at the parent
    const PARENT_COLUMN: &'static str;
    /// Query returning the owning board id for parent `?1`, no rows if the
    /// parent is missing
    const ROOT_QUERY: &'static str;

    /// Insert one record at `position`
    fn insert(conn: &Connection, parent: Self::Parent, position: i64, payload: &Self::Payload) -> Result<Self::Id>;
}
