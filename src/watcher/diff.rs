//! Snapshot comparison.

use crate::types::FollowerSnapshot;

/// Followers lost and gained between two snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// In the previous snapshot but not the current one, in previous order.
    pub lost: Vec<u64>,
    /// In the current snapshot but not the previous one, in current order.
    pub gained: Vec<u64>,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.lost.is_empty() && self.gained.is_empty()
    }
}

/// Compare two snapshots.
///
/// An id that left and came back between the two snapshots does not show up
/// in either list.
pub fn diff_snapshots(previous: &FollowerSnapshot, current: &FollowerSnapshot) -> SnapshotDiff {
    SnapshotDiff {
        lost: missing_from(previous, current),
        gained: missing_from(current, previous),
    }
}

/// Ids of `from` absent in `other`, first occurrence order, without repeats.
fn missing_from(from: &FollowerSnapshot, other: &FollowerSnapshot) -> Vec<u64> {
    let mut out: Vec<u64> = Vec::new();
    for &id in &from.ids {
        if !other.contains(id) && !out.contains(&id) {
            out.push(id);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn snap(ids: &[u64]) -> FollowerSnapshot {
        FollowerSnapshot::new(ids.to_vec())
    }

    fn as_set(ids: &[u64]) -> HashSet<u64> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_one_lost_one_gained() {
        let diff = diff_snapshots(&snap(&[1, 2, 3]), &snap(&[2, 3, 4]));
        assert_eq!(diff.lost, vec![1]);
        assert_eq!(diff.gained, vec![4]);
    }

    #[test]
    fn test_identical_snapshots() {
        let s = snap(&[1, 2]);
        let diff = diff_snapshots(&s, &s);
        assert!(diff.is_empty());
    }

    #[test]
    fn test_reordering_is_not_a_change() {
        let diff = diff_snapshots(&snap(&[1, 2, 3]), &snap(&[3, 1, 2]));
        assert!(diff.is_empty());
    }

    #[test]
    fn test_order_follows_snapshot_order() {
        let diff = diff_snapshots(&snap(&[9, 1, 5, 2]), &snap(&[2, 8, 3, 7]));
        assert_eq!(diff.lost, vec![9, 1, 5]);
        assert_eq!(diff.gained, vec![8, 3, 7]);
    }

    #[test]
    fn test_duplicates_reported_once() {
        let diff = diff_snapshots(&snap(&[1, 1, 2]), &snap(&[2, 3, 3]));
        assert_eq!(diff.lost, vec![1]);
        assert_eq!(diff.gained, vec![3]);
    }

    #[test]
    fn test_empty_snapshots() {
        let diff = diff_snapshots(&snap(&[]), &snap(&[4, 5]));
        assert!(diff.lost.is_empty());
        assert_eq!(diff.gained, vec![4, 5]);

        let diff = diff_snapshots(&snap(&[4, 5]), &snap(&[]));
        assert_eq!(diff.lost, vec![4, 5]);
        assert!(diff.gained.is_empty());
    }

    #[test]
    fn test_matches_set_difference() {
        let cases: &[(&[u64], &[u64])] = &[
            (&[1, 2, 3], &[2, 3, 4]),
            (&[10, 20, 30, 40], &[40, 50]),
            (&[7, 7, 8], &[8, 9, 9, 7]),
            (&[], &[]),
            (&[100], &[200]),
        ];

        for (prev, curr) in cases {
            let diff = diff_snapshots(&snap(prev), &snap(curr));
            let expected_lost: HashSet<u64> = as_set(prev).difference(&as_set(curr)).copied().collect();
            let expected_gained: HashSet<u64> = as_set(curr).difference(&as_set(prev)).copied().collect();

            assert_eq!(as_set(&diff.lost), expected_lost);
            assert_eq!(as_set(&diff.gained), expected_gained);
            assert_eq!(diff.lost.len(), expected_lost.len());
            assert_eq!(diff.gained.len(), expected_gained.len());

            assert!(diff_snapshots(&snap(prev), &snap(prev)).is_empty());
        }
    }
}
