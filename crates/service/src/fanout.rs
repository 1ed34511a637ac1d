//! Re-association of batched junction lookups.
//!
//! Nested collections are loaded in three queries regardless of how many
//! owners there are: the owners, every junction row pointing at them, and
//! every distinct referenced entity. [`group_by_owner`] then rebuilds one
//! collection per owner.

use std::collections::{HashMap, HashSet};

use comicat_core::types::DbId;

/// Referenced ids in first-seen order, without duplicates.
pub fn distinct_ids(pairs: &[(DbId, DbId)]) -> Vec<DbId> {
    let mut seen = HashSet::new();
    pairs
        .iter()
        .map(|(_, target)| *target)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// One collection per entry of `owner_ids`, in that order.
///
/// Each collection holds the targets of the owner's `(owner, target)` pairs
/// in pair order. Owners without pairs get an empty collection; pairs whose
/// target was not loaded are skipped.
pub fn group_by_owner<T: Clone>(
    owner_ids: &[DbId],
    pairs: &[(DbId, DbId)],
    targets: &[T],
    target_id: impl Fn(&T) -> DbId,
) -> Vec<Vec<T>> {
    let by_id: HashMap<DbId, &T> = targets.iter().map(|t| (target_id(t), t)).collect();

    let mut grouped: HashMap<DbId, Vec<T>> = HashMap::new();
    for (owner, target) in pairs {
        if let Some(item) = by_id.get(target) {
            grouped.entry(*owner).or_default().push((*item).clone());
        }
    }

    owner_ids
        .iter()
        .map(|owner| grouped.remove(owner).unwrap_or_default())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owners_keep_order_and_empty_collections() {
        let owners = [10, 20, 30];
        let pairs = [(30, 3), (10, 1), (10, 2)];
        let targets = ["one", "two", "three"];
        let id = |t: &&str| match *t {
            "one" => 1,
            "two" => 2,
            _ => 3,
        };

        let grouped = group_by_owner(&owners, &pairs, &targets, id);
        let lengths: Vec<usize> = grouped.iter().map(Vec::len).collect();
        assert_eq!(lengths, [2, 0, 1]);
        assert_eq!(grouped[0], ["one", "two"]);
        assert_eq!(grouped[2], ["three"]);
    }

    #[test]
    fn shared_targets_are_cloned_per_owner() {
        let grouped = group_by_owner(&[1, 2], &[(1, 7), (2, 7)], &[7_i64], |t| *t);
        assert_eq!(grouped, [vec![7], vec![7]]);
    }

    #[test]
    fn no_owners_no_groups() {
        let grouped = group_by_owner::<i64>(&[], &[], &[], |t| *t);
        assert!(grouped.is_empty());
    }

    #[test]
    fn distinct_ids_keep_first_seen_order() {
        assert_eq!(distinct_ids(&[(1, 5), (2, 3), (3, 5), (1, 4)]), [5, 3, 4]);
    }
}
