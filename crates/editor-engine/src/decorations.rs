//! Indicator channels.
//!
//! Each of the 32 indicators is a run-length map from positions to integer values. Storage is
//! proportional to the number of runs, not the document length, and channels are allocated
//! lazily on first fill.

use std::collections::BTreeMap;

/// Highest indicator index.
pub const INDIC_MAX: usize = 31;
/// First indicator reserved for containers.
pub const INDIC_CONTAINER: usize = 8;

/// Run-length encoded value map over `[0, len)`.
///
/// Keys are run starts. Key `0` is always present and adjacent runs never share a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPartition {
    runs: BTreeMap<usize, i32>,
    len: usize,
}

impl RunPartition {
    /// All-zero partition of `len` positions.
    pub fn new(len: usize) -> Self {
        let mut runs = BTreeMap::new();
        runs.insert(0, 0);
        Self { runs, len }
    }

    /// Covered length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when no positions are covered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Returns `true` when every position holds zero.
    pub fn all_zero(&self) -> bool {
        self.runs.len() == 1 && self.runs.get(&0) == Some(&0)
    }

    fn run_at(&self, position: usize) -> (usize, i32) {
        self.runs
            .range(..=position)
            .next_back()
            .map(|(start, value)| (*start, *value))
            .unwrap_or((0, 0))
    }

    /// Value at `position`; zero at or past the end.
    pub fn value_at(&self, position: usize) -> i32 {
        if position >= self.len {
            return 0;
        }
        self.run_at(position).1
    }

    /// Start of the run containing `position`.
    pub fn start_run(&self, position: usize) -> usize {
        self.run_at(position.min(self.len.saturating_sub(1))).0
    }

    /// Exclusive end of the run containing `position`.
    pub fn end_run(&self, position: usize) -> usize {
        if position >= self.len {
            return self.len;
        }
        self.runs
            .range(position + 1..)
            .next()
            .map(|(start, _)| *start)
            .unwrap_or(self.len)
    }

    /// Set `[start, start + length)` to `value`.
    ///
    /// Returns the subrange whose values actually changed, or `None` when nothing did.
    pub fn fill(&mut self, start: usize, length: usize, value: i32) -> Option<(usize, usize)> {
        let end = start.saturating_add(length).min(self.len);
        if start >= end {
            return None;
        }

        let mut changed: Option<(usize, usize)> = None;
        let mut cursor = start;
        while cursor < end {
            let run_end = self.end_run(cursor).min(end);
            if self.value_at(cursor) != value {
                changed = Some(match changed {
                    Some((first, _)) => (first, run_end),
                    None => (cursor, run_end),
                });
            }
            cursor = run_end;
        }
        let (first, last) = changed?;

        let tail = self.value_at(last);
        let interior: Vec<usize> = self.runs.range(first..=last).map(|(k, _)| *k).collect();
        for key in interior {
            self.runs.remove(&key);
        }
        self.runs.insert(first, value);
        if last < self.len {
            self.runs.insert(last, tail);
        }
        self.merge_at(last);
        self.merge_at(first);
        Some((first, last - first))
    }

    /// Drop the run starting at `position` if it repeats its predecessor's value.
    fn merge_at(&mut self, position: usize) {
        if position == 0 {
            return;
        }
        let Some(value) = self.runs.get(&position).copied() else {
            return;
        };
        if self.run_at(position - 1).1 == value {
            self.runs.remove(&position);
        }
    }

    /// Open `length` positions at `position`.
    ///
    /// Inside a run the new positions take the run's value. At a run boundary they extend
    /// the preceding run only if the following run is nonzero.
    pub fn insert_space(&mut self, position: usize, length: usize) {
        if length == 0 {
            return;
        }
        let position = position.min(self.len);
        let (run_start, run_value) = self.run_at(position);
        let inserted = if run_start == position && position < self.len {
            if run_value != 0 && position > 0 {
                self.run_at(position - 1).1
            } else {
                0
            }
        } else {
            run_value
        };

        let shifted: Vec<(usize, i32)> = self
            .runs
            .range(position..)
            .map(|(k, v)| (*k, *v))
            .collect();
        for (key, _) in &shifted {
            self.runs.remove(key);
        }
        for (key, value) in shifted {
            self.runs.insert(key + length, value);
        }
        self.len += length;
        self.runs.insert(position, inserted);
        self.merge_at(position + length);
        self.merge_at(position);
    }

    /// Remove `[position, position + length)`.
    pub fn delete_range(&mut self, position: usize, length: usize) {
        let end = position.saturating_add(length).min(self.len);
        if position >= end {
            return;
        }
        let removed = end - position;
        let tail = self.value_at(end);
        let affected: Vec<(usize, i32)> = self
            .runs
            .range(position..)
            .map(|(k, v)| (*k, *v))
            .collect();
        for (key, _) in &affected {
            self.runs.remove(key);
        }
        for (key, value) in affected {
            if key >= end {
                self.runs.insert(key - removed, value);
            }
        }
        self.len -= removed;
        if position < self.len {
            self.runs.entry(position).or_insert(tail);
        }
        self.runs.entry(0).or_insert(0);
        self.merge_at(position);
    }

    /// Runs as `(start, end, value)` triples.
    pub fn runs(&self) -> Vec<(usize, usize, i32)> {
        let starts: Vec<(usize, i32)> = self.runs.iter().map(|(k, v)| (*k, *v)).collect();
        starts
            .iter()
            .enumerate()
            .map(|(index, (start, value))| {
                let end = starts.get(index + 1).map(|(s, _)| *s).unwrap_or(self.len);
                (*start, end, *value)
            })
            .collect()
    }
}

/// The 32 indicator channels of a document.
#[derive(Debug, Clone)]
pub struct Decorations {
    channels: Vec<Option<RunPartition>>,
    len: usize,
    /// Indicator targeted by fill and clear.
    pub current: usize,
    /// Value written by fill.
    pub current_value: i32,
}

impl Decorations {
    /// Empty channels over a document of `len` characters.
    pub fn new(len: usize) -> Self {
        Self {
            channels: vec![None; INDIC_MAX + 1],
            len,
            current: 0,
            current_value: 1,
        }
    }

    /// Channel `indicator` if it holds any nonzero run.
    pub fn channel(&self, indicator: usize) -> Option<&RunPartition> {
        self.channels.get(indicator).and_then(|c| c.as_ref())
    }

    /// Fill `[start, start + length)` of the current indicator with `value`.
    ///
    /// Returns the changed range. Channels that become all-zero are released.
    pub fn fill_range(&mut self, start: usize, length: usize, value: i32) -> Option<(usize, usize)> {
        let len = self.len;
        let slot = self.channels.get_mut(self.current)?;
        if slot.is_none() {
            if value == 0 {
                return None;
            }
            *slot = Some(RunPartition::new(len));
        }
        let channel = slot.as_mut()?;
        let changed = channel.fill(start, length, value);
        if channel.all_zero() {
            *slot = None;
        }
        changed
    }

    /// Bitmask of indicators with a nonzero value at `position`.
    pub fn all_on_for(&self, position: usize) -> u32 {
        self.channels
            .iter()
            .enumerate()
            .filter_map(|(index, c)| c.as_ref().map(|c| (index, c)))
            .filter(|(_, c)| c.value_at(position) != 0)
            .fold(0u32, |mask, (index, _)| mask | (1u32 << index))
    }

    /// Value of `indicator` at `position`.
    pub fn value_at(&self, indicator: usize, position: usize) -> i32 {
        self.channel(indicator)
            .map(|c| c.value_at(position))
            .unwrap_or(0)
    }

    /// Start of the run of `indicator` containing `position`. An unused channel is one run.
    pub fn start(&self, indicator: usize, position: usize) -> usize {
        self.channel(indicator)
            .map(|c| c.start_run(position))
            .unwrap_or(0)
    }

    /// End of the run of `indicator` containing `position`. An unused channel is one run.
    pub fn end(&self, indicator: usize, position: usize) -> usize {
        self.channel(indicator)
            .map(|c| c.end_run(position))
            .unwrap_or(self.len)
    }

    /// Follow a text insertion.
    pub fn insert_space(&mut self, position: usize, length: usize) {
        self.len += length;
        for channel in self.channels.iter_mut().flatten() {
            channel.insert_space(position, length);
        }
    }

    /// Follow a text deletion.
    pub fn delete_range(&mut self, position: usize, length: usize) {
        let removed = length.min(self.len.saturating_sub(position));
        self.len -= removed;
        for slot in self.channels.iter_mut() {
            if let Some(channel) = slot {
                channel.delete_range(position, length);
                if channel.all_zero() {
                    *slot = None;
                }
            }
        }
    }

    /// Length the channels cover.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the document is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_splits_and_merges() {
        let mut runs = RunPartition::new(20);
        assert_eq!(runs.fill(5, 5, 1), Some((5, 5)));
        assert_eq!(runs.runs(), vec![(0, 5, 0), (5, 10, 1), (10, 20, 0)]);
        assert_eq!(runs.fill(10, 5, 1), Some((10, 5)));
        assert_eq!(runs.runs(), vec![(0, 5, 0), (5, 15, 1), (15, 20, 0)]);
        assert_eq!(runs.fill(6, 3, 1), None);
        assert_eq!(runs.fill(0, 20, 0), Some((5, 10)));
        assert!(runs.all_zero());
    }

    #[test]
    fn test_fill_reports_trimmed_range() {
        let mut runs = RunPartition::new(10);
        runs.fill(0, 4, 2);
        assert_eq!(runs.fill(0, 8, 2), Some((4, 4)));
        assert_eq!(runs.runs(), vec![(0, 8, 2), (8, 10, 0)]);
    }

    #[test]
    fn test_run_bounds() {
        let mut runs = RunPartition::new(10);
        runs.fill(3, 4, 7);
        assert_eq!(runs.start_run(5), 3);
        assert_eq!(runs.end_run(5), 7);
        assert_eq!(runs.end_run(8), 10);
        assert_eq!(runs.value_at(6), 7);
        assert_eq!(runs.value_at(7), 0);
        assert_eq!(runs.value_at(10), 0);
    }

    #[test]
    fn test_insert_inside_run_extends_it() {
        let mut runs = RunPartition::new(10);
        runs.fill(2, 4, 1);
        runs.insert_space(4, 3);
        assert_eq!(runs.runs(), vec![(0, 2, 0), (2, 9, 1), (9, 13, 0)]);
    }

    #[test]
    fn test_insert_at_run_start_does_not_extend() {
        let mut runs = RunPartition::new(10);
        runs.fill(2, 4, 1);
        runs.insert_space(2, 2);
        assert_eq!(runs.runs(), vec![(0, 4, 0), (4, 8, 1), (8, 12, 0)]);
        runs.insert_space(8, 1);
        assert_eq!(runs.runs(), vec![(0, 4, 0), (4, 8, 1), (8, 13, 0)]);
    }

    #[test]
    fn test_insert_at_zero_before_nonzero_run() {
        let mut runs = RunPartition::new(5);
        runs.fill(0, 5, 3);
        runs.insert_space(0, 2);
        assert_eq!(runs.runs(), vec![(0, 2, 0), (2, 7, 3)]);
    }

    #[test]
    fn test_delete_joins_runs() {
        let mut runs = RunPartition::new(12);
        runs.fill(2, 3, 1);
        runs.fill(8, 2, 1);
        runs.delete_range(4, 5);
        assert_eq!(runs.runs(), vec![(0, 2, 0), (2, 5, 1), (5, 7, 0)]);
        runs.delete_range(0, 7);
        assert_eq!(runs.runs(), vec![(0, 0, 0)]);
        assert!(runs.all_zero());
    }

    #[test]
    fn test_decorations_mask_and_release() {
        let mut decorations = Decorations::new(10);
        decorations.current = 2;
        decorations.current_value = 5;
        decorations.fill_range(1, 3, 5);
        decorations.current = 4;
        decorations.fill_range(2, 1, 1);
        assert_eq!(decorations.all_on_for(2), (1 << 2) | (1 << 4));
        assert_eq!(decorations.value_at(2, 3), 5);
        decorations.fill_range(0, 10, 0);
        assert!(decorations.channel(4).is_none());
        assert_eq!(decorations.start(4, 3), 0);
        assert_eq!(decorations.end(4, 3), 10);
    }

    #[test]
    fn test_decorations_follow_edits() {
        let mut decorations = Decorations::new(6);
        decorations.current = 0;
        decorations.fill_range(2, 2, 1);
        decorations.insert_space(0, 3);
        assert_eq!(decorations.start(0, 6), 5);
        decorations.delete_range(4, 4);
        assert!(decorations.channel(0).is_none());
        assert_eq!(decorations.len(), 5);
    }
}
