//! Per-axis occupancy multisets.
//!
//! An [`AxisOccupancy`] maps a coordinate value to the number of mines that
//! currently share it. Keys are kept in ascending order so the occupied extent
//! of an axis is always the first and last key. A key whose count drops to zero
//! is removed outright; a present key always has a positive count.

use std::collections::BTreeMap;

/// Ordered multiset of coordinate values on one axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AxisOccupancy {
    counts: BTreeMap<i32, u32>,
    total: usize,
}

impl AxisOccupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more mine at `value`.
    pub fn increment(&mut self, value: i32) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    /// Record one fewer mine at `value`, pruning the key when it empties.
    ///
    /// Returns `false` if `value` was not occupied.
    pub fn decrement(&mut self, value: i32) -> bool {
        let Some(count) = self.counts.get_mut(&value) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&value);
        }
        self.total -= 1;
        true
    }

    /// Number of mines at `value` (0 if unoccupied).
    pub fn count_at(&self, value: i32) -> u32 {
        self.counts.get(&value).copied().unwrap_or(0)
    }

    pub fn min(&self) -> Option<i32> {
        self.counts.first_key_value().map(|(&k, _)| k)
    }

    pub fn max(&self) -> Option<i32> {
        self.counts.last_key_value().map(|(&k, _)| k)
    }

    /// `(min, max)` of the occupied values, or `None` when nothing is occupied.
    pub fn extent(&self) -> Option<(i32, i32)> {
        Some((self.min()?, self.max()?))
    }

    /// Distance from `value` to the farther of the two occupied extremes.
    ///
    /// An empty axis is at distance 0 from everything.
    pub fn farthest_from(&self, value: i32) -> u32 {
        match self.extent() {
            Some((min, max)) => value.abs_diff(min).max(value.abs_diff(max)),
            None => 0,
        }
    }

    /// Sum of all per-value counts.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occupied values with their counts, ascending.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increments_accumulate_per_value() {
        let mut axis = AxisOccupancy::new();
        axis.increment(3);
        axis.increment(3);
        axis.increment(-1);
        assert_eq!(axis.count_at(3), 2);
        assert_eq!(axis.count_at(-1), 1);
        assert_eq!(axis.count_at(0), 0);
        assert_eq!(axis.total(), 3);
        assert_eq!(axis.iter().count(), 2);
    }

    #[test]
    fn zero_counts_are_pruned() {
        let mut axis = AxisOccupancy::new();
        axis.increment(5);
        axis.increment(9);
        assert!(axis.decrement(9));
        assert_eq!(axis.iter().collect::<Vec<_>>(), vec![(5, 1)]);
        assert_eq!(axis.max(), Some(5));
    }

    #[test]
    fn decrement_of_unoccupied_value_is_a_noop() {
        let mut axis = AxisOccupancy::new();
        axis.increment(1);
        assert!(!axis.decrement(2));
        assert_eq!(axis.total(), 1);
    }

    #[test]
    fn farthest_from_picks_the_larger_side() {
        let mut axis = AxisOccupancy::new();
        axis.increment(5);
        assert_eq!(axis.farthest_from(5), 0);
        assert_eq!(axis.farthest_from(10), 5);

        axis.increment(8);
        assert_eq!(axis.extent(), Some((5, 8)));
        assert_eq!(axis.farthest_from(6), 2);
        assert_eq!(axis.farthest_from(-2), 10);
    }

    #[test]
    fn empty_axis_has_no_extent() {
        let axis = AxisOccupancy::new();
        assert_eq!(axis.extent(), None);
        assert_eq!(axis.farthest_from(i32::MIN), 0);
        assert!(axis.is_empty());
    }
}
