//! MoveCoordinator: relocate one record within or across parents

use super::collection::OrderedCollection;
use super::sequencer::{sequence, splice};
use super::SiblingKind;
use crate::error::{KanbanError, Result};
use crate::types::BoardId;
use rusqlite::Transaction;
use serde::Serialize;
use tracing::info;

/// Where a moved record ended up
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "")]
pub struct MoveOutcome<K: SiblingKind> {
    pub id: K::Id,
    pub from: K::Parent,
    pub to: K::Parent,
    /// 0-based index in the destination after the move
    pub index: usize,
    /// Destination siblings in their new order
    pub order: Vec<K::Id>,
}

pub struct MoveCoordinator<'a, K: SiblingKind> {
    collection: OrderedCollection<'a, K>,
}

impl<'a, K: SiblingKind> MoveCoordinator<'a, K> {
    pub fn new(tx: &'a Transaction<'_>) -> Self {
        Self {
            collection: OrderedCollection::new(tx),
        }
    }

    /// Move `id` under `destination` at `index` (clamped; `None` is the end).
    ///
    /// `authorize` receives the board both parents belong to and runs after
    /// the scope check, before anything is written.
    pub fn move_record<A>(
        &self,
        id: K::Id,
        destination: K::Parent,
        index: Option<i64>,
        authorize: A,
    ) -> Result<MoveOutcome<K>>
    where
        A: FnOnce(BoardId) -> Result<()>,
    {
        let source = self.collection.parent_of(id)?;
        let destination_root = self.collection.root_of(destination)?;
        let source_root = self.collection.root_of(source)?;

        if source_root != destination_root {
            return Err(KanbanError::CrossScope {
                from: format!("board {source_root}"),
                to: format!("board {destination_root}"),
            });
        }
        authorize(source_root)?;

        let mut order = self.collection.ids(destination)?;
        order.retain(|sibling| *sibling != id);
        let at = splice(&mut order, id, index);

        if source == destination {
            self.collection.reorder(destination, &order)?;
        } else {
            let assignments = sequence(&order)?;
            self.collection.reparent(id, destination)?;
            self.collection.apply(destination, &assignments)?;
        }

        info!(
            resource = K::RESOURCE,
            %id,
            from = %source,
            to = %destination,
            index = at,
            "moved"
        );

        Ok(MoveOutcome {
            id,
            from: source,
            to: destination,
            index: at,
            order,
        })
    }
}
