//! Integer identifiers for every stored entity.
//!
//! Each id is a newtype over the SQLite rowid so a `TaskId` can never be
//! passed where a `ColumnId` is expected. They serialize as bare integers.

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// The raw rowid
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.0))
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

define_id!(
    /// Identity issued by the external identity provider
    UserId
);
define_id!(
    /// A board: the root container for authorization
    BoardId
);
define_id!(
    /// A column, ordered within its board
    ColumnId
);
define_id!(
    /// A task, ordered within its column
    TaskId
);
define_id!(
    /// A subtask, ordered within its task
    SubtaskId
);
define_id!(
    /// A board-scoped tag
    TagId
);
define_id!(
    /// A pending or accepted board invite
    InviteId
);
