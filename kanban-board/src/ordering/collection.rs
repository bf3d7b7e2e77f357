//! OrderedCollection: one parent's siblings, rewritten atomically

use super::sequencer::sequence;
use super::SiblingKind;
use crate::error::{KanbanError, Result};
use crate::types::BoardId;
use rusqlite::{Connection, OptionalExtension, Transaction};
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::debug;

/// Sibling records of kind `K`, accessed through an open transaction.
///
/// Construction takes a [`Transaction`] so every read-modify-write here
/// happens inside one; commit or rollback belongs to the caller.
pub struct OrderedCollection<'a, K: SiblingKind> {
    conn: &'a Connection,
    _kind: PhantomData<K>,
}

impl<'a, K: SiblingKind> OrderedCollection<'a, K> {
    pub fn new(tx: &'a Transaction<'_>) -> Self {
        Self {
            conn: tx,
            _kind: PhantomData,
        }
    }

    /// The board a parent ultimately belongs to
    pub fn root_of(&self, parent: K::Parent) -> Result<BoardId> {
        self.conn
            .query_row(K::ROOT_QUERY, [parent], |row| row.get(0))
            .optional()?
            .ok_or_else(|| KanbanError::not_found(K::PARENT_RESOURCE, parent))
    }

    /// Parent of a record
    pub fn parent_of(&self, id: K::Id) -> Result<K::Parent> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?1", K::PARENT_COLUMN, K::TABLE);
        self.conn
            .query_row(&sql, [id], |row| row.get(0))
            .optional()?
            .ok_or_else(|| KanbanError::not_found(K::RESOURCE, id))
    }

    /// Current sibling ids in display order
    pub fn ids(&self, parent: K::Parent) -> Result<Vec<K::Id>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = ?1 ORDER BY position, id",
            K::TABLE,
            K::PARENT_COLUMN
        );
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let ids = stmt
            .query_map([parent], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<K::Id>>>()?;
        Ok(ids)
    }

    /// `max(position) + 1`, or 1 for an empty parent
    pub fn next_position(&self, parent: K::Parent) -> Result<i64> {
        let sql = format!(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM {} WHERE {} = ?1",
            K::TABLE,
            K::PARENT_COLUMN
        );
        Ok(self.conn.query_row(&sql, [parent], |row| row.get(0))?)
    }

    /// Insert a new record after the current last sibling
    pub fn append(&self, parent: K::Parent, payload: &K::Payload) -> Result<K::Id> {
        self.root_of(parent)?;
        let position = self.next_position(parent)?;
        let id = K::insert(self.conn, parent, position, payload)?;
        debug!(resource = K::RESOURCE, %id, %parent, position, "appended");
        Ok(id)
    }

    /// Rewrite positions of every sibling of `parent` to follow `ordered`.
    ///
    /// `ordered` must be exactly the current sibling set; anything else is
    /// treated as a stale view and rejected without writing.
    pub fn reorder(&self, parent: K::Parent, ordered: &[K::Id]) -> Result<()> {
        if ordered.is_empty() {
            return Err(KanbanError::validation("order", "must not be empty"));
        }
        self.root_of(parent)?;

        let assignments = sequence(ordered)?;
        let current = self.ids(parent)?;
        let current_set: HashSet<K::Id> = current.iter().copied().collect();

        if current.len() != ordered.len() || !ordered.iter().all(|id| current_set.contains(id)) {
            return Err(KanbanError::InvalidMembership {
                resource: K::RESOURCE.to_string(),
                parent: format!("{} {parent}", K::PARENT_RESOURCE),
                expected: current.len(),
                supplied: ordered.len(),
            });
        }

        self.apply(parent, &assignments)
    }

    /// Delete one record. Remaining siblings keep their positions.
    pub fn remove(&self, id: K::Id) -> Result<K::Parent> {
        let parent = self.parent_of(id)?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", K::TABLE);
        self.conn.execute(&sql, [id])?;
        debug!(resource = K::RESOURCE, %id, %parent, "removed");
        Ok(parent)
    }

    /// Write a full position assignment for `parent`.
    ///
    /// Positions are first negated so no intermediate row collides with the
    /// unique `(parent, position)` index while the final values land.
    pub(crate) fn apply(&self, parent: K::Parent, assignments: &[(K::Id, i64)]) -> Result<()> {
        let negate = format!(
            "UPDATE {} SET position = -position WHERE {} = ?1",
            K::TABLE,
            K::PARENT_COLUMN
        );
        self.conn.execute(&negate, [parent])?;

        let assign = format!(
            "UPDATE {} SET position = ?1 WHERE id = ?2 AND {} = ?3",
            K::TABLE,
            K::PARENT_COLUMN
        );
        let mut stmt = self.conn.prepare_cached(&assign)?;
        for (id, position) in assignments {
            stmt.execute(rusqlite::params![position, id, parent])?;
        }

        debug!(resource = K::RESOURCE, %parent, count = assignments.len(), "positions rewritten");
        Ok(())
    }

    /// Move `id` under `parent` with a placeholder position of 0, which is
    /// never taken by a committed sibling.
    pub(crate) fn reparent(&self, id: K::Id, parent: K::Parent) -> Result<()> {
        let sql = format!(
            "UPDATE {} SET {} = ?1, position = 0 WHERE id = ?2",
            K::TABLE,
            K::PARENT_COLUMN
        );
        self.conn.execute(&sql, rusqlite::params![parent, id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::{ColumnKind, NewColumn, NewTask, TaskKind};
    use crate::schema::create_schema;
    use crate::types::{ColumnId, TaskId};

    fn store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", "ON").unwrap();
        create_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO users (email, created_at) VALUES ('a@example.com', '2024-01-01T00:00:00Z');
             INSERT INTO boards (name, owner_id, created_at, updated_at)
                VALUES ('B', 1, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z');",
        )
        .unwrap();
        conn
    }

    fn positions(tx: &Transaction<'_>, column: ColumnId) -> Vec<(TaskId, i64)> {
        let mut stmt = tx
            .prepare("SELECT id, position FROM tasks WHERE column_id = ?1 ORDER BY position")
            .unwrap();
        stmt.query_map([column], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<rusqlite::Result<Vec<_>>>()
            .unwrap()
    }

    fn task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            ..NewTask::default()
        }
    }

    #[test]
    fn test_append_assigns_next_position() {
        let mut conn = store();
        let tx = conn.transaction().unwrap();
        let columns = OrderedCollection::<ColumnKind>::new(&tx);

        let a = columns.append(BoardId(1), &NewColumn { name: "A".into() }).unwrap();
        let b = columns.append(BoardId(1), &NewColumn { name: "B".into() }).unwrap();

        assert_eq!(columns.ids(BoardId(1)).unwrap(), vec![a, b]);
        assert_eq!(columns.next_position(BoardId(1)).unwrap(), 3);
    }

    #[test]
    fn test_append_to_missing_parent() {
        let mut conn = store();
        let tx = conn.transaction().unwrap();
        let tasks = OrderedCollection::<TaskKind>::new(&tx);

        let err = tasks.append(ColumnId(42), &task("x")).unwrap_err();
        assert!(matches!(err, KanbanError::NotFound { .. }));
    }

    #[test]
    fn test_reorder_rewrites_positions() {
        let mut conn = store();
        let tx = conn.transaction().unwrap();
        let columns = OrderedCollection::<ColumnKind>::new(&tx);
        let column = columns.append(BoardId(1), &NewColumn { name: "A".into() }).unwrap();

        let tasks = OrderedCollection::<TaskKind>::new(&tx);
        let t1 = tasks.append(column, &task("1")).unwrap();
        let t2 = tasks.append(column, &task("2")).unwrap();
        let t3 = tasks.append(column, &task("3")).unwrap();

        tasks.reorder(column, &[t3, t1, t2]).unwrap();
        assert_eq!(positions(&tx, column), vec![(t3, 1), (t1, 2), (t2, 3)]);
    }

    #[test]
    fn test_reorder_membership_mismatch() {
        let mut conn = store();
        let tx = conn.transaction().unwrap();
        let columns = OrderedCollection::<ColumnKind>::new(&tx);
        let column = columns.append(BoardId(1), &NewColumn { name: "A".into() }).unwrap();

        let tasks = OrderedCollection::<TaskKind>::new(&tx);
        let t1 = tasks.append(column, &task("1")).unwrap();
        let t2 = tasks.append(column, &task("2")).unwrap();

        let missing = tasks.reorder(column, &[t2]).unwrap_err();
        assert!(matches!(missing, KanbanError::InvalidMembership { .. }));

        let foreign = tasks.reorder(column, &[t2, TaskId(999)]).unwrap_err();
        assert!(matches!(foreign, KanbanError::InvalidMembership { .. }));

        let duplicate = tasks.reorder(column, &[t1, t1]).unwrap_err();
        assert!(matches!(duplicate, KanbanError::Validation { .. }));

        let empty = tasks.reorder(column, &[]).unwrap_err();
        assert!(matches!(empty, KanbanError::Validation { .. }));

        assert_eq!(positions(&tx, column), vec![(t1, 1), (t2, 2)]);
    }

    #[test]
    fn test_remove_leaves_gap_and_append_continues() {
        let mut conn = store();
        let tx = conn.transaction().unwrap();
        let columns = OrderedCollection::<ColumnKind>::new(&tx);
        let column = columns.append(BoardId(1), &NewColumn { name: "A".into() }).unwrap();

        let tasks = OrderedCollection::<TaskKind>::new(&tx);
        let t1 = tasks.append(column, &task("1")).unwrap();
        let t2 = tasks.append(column, &task("2")).unwrap();
        let t3 = tasks.append(column, &task("3")).unwrap();

        assert_eq!(tasks.remove(t2).unwrap(), column);
        assert_eq!(positions(&tx, column), vec![(t1, 1), (t3, 3)]);

        let t4 = tasks.append(column, &task("4")).unwrap();
        assert_eq!(positions(&tx, column), vec![(t1, 1), (t3, 3), (t4, 4)]);

        tasks.reorder(column, &[t1, t3, t4]).unwrap();
        assert_eq!(positions(&tx, column), vec![(t1, 1), (t3, 2), (t4, 3)]);

        assert!(matches!(tasks.remove(t2), Err(KanbanError::NotFound { .. })));
    }

    proptest::proptest! {
        #[test]
        fn prop_reorder_is_dense_permutation(seed in proptest::collection::vec(0usize..100, 1..12)) {
            let mut conn = store();
            let tx = conn.transaction().unwrap();
            let column = OrderedCollection::<ColumnKind>::new(&tx)
                .append(BoardId(1), &NewColumn { name: "A".into() })
                .unwrap();
            let tasks = OrderedCollection::<TaskKind>::new(&tx);
            let mut ids: Vec<TaskId> = (0..seed.len())
                .map(|i| tasks.append(column, &task(&i.to_string())).unwrap())
                .collect();

            // shuffle deterministically from the generated keys
            let mut keyed: Vec<(usize, TaskId)> = seed.iter().copied().zip(ids.iter().copied()).collect();
            keyed.sort_by_key(|(key, id)| (*key, *id));
            ids = keyed.into_iter().map(|(_, id)| id).collect();

            tasks.reorder(column, &ids).unwrap();

            let expected: Vec<(TaskId, i64)> = ids.iter().copied().zip(1..).collect();
            proptest::prop_assert_eq!(positions(&tx, column), expected);
        }
    }
}
