//! Dense position assignment

use crate::error::{KanbanError, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

/// Assign `position = index + 1` to each id in order.
///
/// Fails with a validation error if an id appears twice.
pub fn sequence<I>(ordered: &[I]) -> Result<Vec<(I, i64)>>
where
    I: Copy + Eq + Hash + Display,
{
    let mut seen = HashSet::with_capacity(ordered.len());
    let mut assignments = Vec::with_capacity(ordered.len());

    for (index, id) in ordered.iter().enumerate() {
        if !seen.insert(*id) {
            return Err(KanbanError::validation(
                "order",
                format!("id {id} appears more than once"),
            ));
        }
        assignments.push((*id, index as i64 + 1));
    }

    Ok(assignments)
}

/// Splice `id` into `order` at `index`, clamped to `[0, order.len()]`.
///
/// `None` appends at the end.
pub fn splice<I: Copy>(order: &mut Vec<I>, id: I, index: Option<i64>) -> usize {
    let len = order.len();
    let at = match index {
        None => len,
        Some(i) if i <= 0 => 0,
        Some(i) => usize::try_from(i).map_or(len, |i| i.min(len)),
    };
    order.insert(at, id);
    at
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sequence_is_one_based() {
        let out = sequence(&[30, 10, 20]).unwrap();
        assert_eq!(out, vec![(30, 1), (10, 2), (20, 3)]);
    }

    #[test]
    fn test_sequence_empty() {
        assert!(sequence::<i64>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_sequence_rejects_duplicates() {
        let err = sequence(&[1, 2, 1]).unwrap_err();
        assert!(matches!(err, KanbanError::Validation { .. }));
    }

    #[test]
    fn test_splice_clamps() {
        let mut order = vec![1, 2, 3];
        assert_eq!(splice(&mut order, 9, Some(-4)), 0);
        assert_eq!(order, vec![9, 1, 2, 3]);

        let mut order = vec![1, 2, 3];
        assert_eq!(splice(&mut order, 9, Some(99)), 3);
        assert_eq!(order, vec![1, 2, 3, 9]);

        let mut order = vec![1, 2];
        assert_eq!(splice(&mut order, 9, None), 2);

        let mut order = vec![1, 2];
        assert_eq!(splice(&mut order, 9, Some(1)), 1);
        assert_eq!(order, vec![1, 9, 2]);
    }

    proptest! {
        #[test]
        fn prop_sequence_is_dense(ids in prop::collection::hash_set(any::<i64>(), 0..64)) {
            let ids: Vec<i64> = ids.into_iter().collect();
            let out = sequence(&ids).unwrap();

            let mut positions: Vec<i64> = out.iter().map(|(_, p)| *p).collect();
            positions.sort_unstable();
            let expected: Vec<i64> = (1..=ids.len() as i64).collect();
            prop_assert_eq!(positions, expected);

            for ((id, _), original) in out.iter().zip(ids.iter()) {
                prop_assert_eq!(id, original);
            }
        }

        #[test]
        fn prop_sequence_is_stable(ids in prop::collection::hash_set(any::<i64>(), 0..32)) {
            let ids: Vec<i64> = ids.into_iter().collect();
            prop_assert_eq!(sequence(&ids).unwrap(), sequence(&ids).unwrap());
        }
    }
}
