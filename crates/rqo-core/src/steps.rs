//! Duration step table used by the task-duration strategy.
//!
//! Thresholds split elapsed time into intervals `[0, t1) -> 0`, `[t1, t2) -> o1`, `[t2, t3) -> o2`, ...
//! The table is frozen on construction; a configuration reload builds a new one.
use std::collections::BTreeMap;

use rqo_model::OffsetSecs;

/// Immutable `(threshold, offset)` pairs sorted by threshold in descending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DurationSteps {
    steps: Vec<(u64, OffsetSecs)>,
}

impl DurationSteps {
    /// Build a table from a threshold (seconds) to offset (seconds) map.
    pub fn new(map: &BTreeMap<u64, OffsetSecs>) -> Self {
        // BTreeMap iterates ascending; reversing yields the descending order directly.
        Self {
            steps: map.iter().rev().map(|(t, o)| (*t, *o)).collect(),
        }
    }

    /// Offset of the greatest threshold that is `<= elapsed_secs`, or `0` if none qualifies.
    pub fn lookup(&self, elapsed_secs: i64) -> OffsetSecs {
        if elapsed_secs < 0 {
            return 0;
        }
        let elapsed = elapsed_secs as u64;
        let idx = self.steps.partition_point(|(t, _)| *t > elapsed);
        self.steps.get(idx).map(|(_, o)| *o).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Iterate `(threshold, offset)` pairs, greatest threshold first.
    pub fn iter(&self) -> impl Iterator<Item = (u64, OffsetSecs)> + '_ {
        self.steps.iter().copied()
    }
}

impl FromIterator<(u64, OffsetSecs)> for DurationSteps {
    /// Collect pairs in any order. On duplicate thresholds the first pair wins.
    fn from_iter<I: IntoIterator<Item = (u64, OffsetSecs)>>(iter: I) -> Self {
        let mut map = BTreeMap::new();
        for (threshold, offset) in iter {
            map.entry(threshold).or_insert(offset);
        }
        Self::new(&map)
    }
}
