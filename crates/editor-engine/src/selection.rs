//! Selection model.
//!
//! A selection is a non-empty list of caret/anchor ranges with one main range. Positions may
//! carry virtual space: columns past the end of their line, materialized as spaces when text
//! is inserted there.
//!
//! In stream and lines mode the ranges are the state. In rectangular and thin mode a single
//! logical range is stored and the per-line ranges are derived from its columns.

use crate::buffer::TextBuffer;
use crate::delta::Modification;

/// `SC_SEL_STREAM`
pub const SC_SEL_STREAM: isize = 0;
/// `SC_SEL_RECTANGLE`
pub const SC_SEL_RECTANGLE: isize = 1;
/// `SC_SEL_LINES`
pub const SC_SEL_LINES: isize = 2;
/// `SC_SEL_THIN`
pub const SC_SEL_THIN: isize = 3;

/// No virtual space.
pub const SCVS_NONE: isize = 0;
/// Rectangular selections keep virtual space.
pub const SCVS_RECTANGULARSELECTION: isize = 1;
/// Carets may move into virtual space.
pub const SCVS_USERACCESSIBLE: isize = 2;
/// Left arrow at line start does not wrap to the previous line.
pub const SCVS_NOWRAPLINESTART: isize = 4;

/// How ranges are shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Ordinary ranges.
    #[default]
    Stream,
    /// Column block derived from one logical range.
    Rectangle,
    /// Whole lines.
    Lines,
    /// Zero-width column block.
    Thin,
}

impl SelectionMode {
    /// Decode `SC_SEL_*`; unknown values are stream.
    pub fn from_code(code: isize) -> Self {
        match code {
            SC_SEL_RECTANGLE => Self::Rectangle,
            SC_SEL_LINES => Self::Lines,
            SC_SEL_THIN => Self::Thin,
            _ => Self::Stream,
        }
    }

    /// `SC_SEL_*` value.
    pub fn code(self) -> isize {
        match self {
            Self::Stream => SC_SEL_STREAM,
            Self::Rectangle => SC_SEL_RECTANGLE,
            Self::Lines => SC_SEL_LINES,
            Self::Thin => SC_SEL_THIN,
        }
    }

    /// Rectangle or thin.
    pub fn is_rectangular(self) -> bool {
        matches!(self, Self::Rectangle | Self::Thin)
    }
}

/// A position plus pending virtual-space columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SelectionPosition {
    /// Real position.
    pub position: usize,
    /// Columns past the line end.
    pub virtual_space: usize,
}

impl SelectionPosition {
    /// A position without virtual space.
    pub fn new(position: usize) -> Self {
        Self {
            position,
            virtual_space: 0,
        }
    }

    /// A position with virtual space.
    pub fn with_virtual(position: usize, virtual_space: usize) -> Self {
        Self {
            position,
            virtual_space,
        }
    }

    /// Move the position to `position`, dropping virtual space.
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
        self.virtual_space = 0;
    }

    /// Follow an insertion or deletion.
    ///
    /// Inserting at the position consumes pending virtual space first and then shifts.
    /// Positions inside a deleted range collapse to its start.
    pub fn translate(&mut self, change: &Modification) {
        let start = change.position;
        let length = change.length;
        if change.is_insert() {
            if self.position == start {
                let consumed = length.min(self.virtual_space);
                self.virtual_space -= consumed;
                self.position += length;
            } else if self.position > start {
                self.position += length;
            }
        } else if change.is_delete() {
            if self.position == start {
                self.virtual_space = 0;
            }
            if self.position > start {
                if self.position >= start + length {
                    self.position -= length;
                } else {
                    self.position = start;
                    self.virtual_space = 0;
                }
            }
        }
    }

    /// Clamp into `[0, len]`.
    pub fn clamp_to_len(&mut self, len: usize) {
        if self.position > len {
            self.position = len;
        }
    }
}

/// A caret/anchor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRange {
    /// Moving end.
    pub caret: SelectionPosition,
    /// Fixed end.
    pub anchor: SelectionPosition,
}

impl SelectionRange {
    /// An empty range at `position`.
    pub fn caret_at(position: usize) -> Self {
        let p = SelectionPosition::new(position);
        Self {
            caret: p,
            anchor: p,
        }
    }

    /// A range from plain positions.
    pub fn new(caret: usize, anchor: usize) -> Self {
        Self {
            caret: SelectionPosition::new(caret),
            anchor: SelectionPosition::new(anchor),
        }
    }

    /// A range from full positions.
    pub fn from_positions(caret: SelectionPosition, anchor: SelectionPosition) -> Self {
        Self { caret, anchor }
    }

    /// Lower end.
    pub fn start(&self) -> SelectionPosition {
        self.caret.min(self.anchor)
    }

    /// Upper end.
    pub fn end(&self) -> SelectionPosition {
        self.caret.max(self.anchor)
    }

    /// Returns `true` when caret and anchor coincide.
    pub fn is_empty(&self) -> bool {
        self.caret == self.anchor
    }

    /// Number of real characters covered.
    pub fn len(&self) -> usize {
        self.end().position - self.start().position
    }

    /// Intersection with `[start, end]` in real positions.
    pub fn intersect(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let from = self.start().position.max(start);
        let to = self.end().position.min(end);
        if from < to || (from == to && self.start().position <= from && from <= self.end().position)
        {
            Some((from, to))
        } else {
            None
        }
    }

    /// Drop virtual space from both ends.
    pub fn clear_virtual_space(&mut self) {
        self.caret.virtual_space = 0;
        self.anchor.virtual_space = 0;
    }

    fn overlaps(&self, other: &SelectionRange) -> bool {
        let (a_start, a_end) = (self.start(), self.end());
        let (b_start, b_end) = (other.start(), other.end());
        if a_start == b_start && a_end == b_end {
            return true;
        }
        if self.is_empty() {
            return b_start < a_start && a_start < b_end;
        }
        if other.is_empty() {
            return a_start < b_start && b_start < a_end;
        }
        a_start < b_end && b_start < a_end
    }

    fn union(&self, other: &SelectionRange) -> SelectionRange {
        let start = self.start().min(other.start());
        let end = self.end().max(other.end());
        if self.caret >= self.anchor {
            SelectionRange::from_positions(end, start)
        } else {
            SelectionRange::from_positions(start, end)
        }
    }
}

/// Sort and merge overlapping ranges, keeping track of the main range.
///
/// Returns the normalized list and the new index of the main range.
pub fn normalize_ranges(ranges: Vec<SelectionRange>, main: usize) -> (Vec<SelectionRange>, usize) {
    if ranges.is_empty() {
        return (vec![SelectionRange::default()], 0);
    }
    let main_range = ranges.get(main).copied().unwrap_or(ranges[0]);
    let main_caret = main_range.caret;

    let mut sorted = ranges;
    sorted.sort_by(|a, b| a.start().cmp(&b.start()).then_with(|| a.end().cmp(&b.end())));

    let mut merged: Vec<SelectionRange> = Vec::with_capacity(sorted.len());
    for range in sorted {
        match merged.last_mut() {
            Some(last) if last.overlaps(&range) => {
                let (keep, other) = if range == main_range {
                    (range, *last)
                } else {
                    (*last, range)
                };
                *last = keep.union(&other);
            }
            _ => merged.push(range),
        }
    }

    let main = merged
        .iter()
        .position(|r| *r == main_range)
        .or_else(|| {
            merged
                .iter()
                .position(|r| r.start() <= main_caret && main_caret <= r.end())
        })
        .unwrap_or(merged.len() - 1);
    (merged, main)
}

/// The selection of one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<SelectionRange>,
    main: usize,
    rectangular: SelectionRange,
    mode: SelectionMode,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// A single caret at 0.
    pub fn new() -> Self {
        Self {
            ranges: vec![SelectionRange::default()],
            main: 0,
            rectangular: SelectionRange::default(),
            mode: SelectionMode::Stream,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Set the mode without reshaping; callers reshape through the engine.
    pub fn set_mode_raw(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Rectangle or thin.
    pub fn is_rectangular(&self) -> bool {
        self.mode.is_rectangular()
    }

    /// Number of ranges.
    pub fn count(&self) -> usize {
        self.ranges.len()
    }

    /// All ranges in order.
    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    /// Range `index`.
    pub fn range(&self, index: usize) -> Option<&SelectionRange> {
        self.ranges.get(index)
    }

    /// Mutable range `index`.
    pub fn range_mut(&mut self, index: usize) -> Option<&mut SelectionRange> {
        self.ranges.get_mut(index)
    }

    /// Index of the main range.
    pub fn main(&self) -> usize {
        self.main
    }

    /// Make range `index` the main range; out-of-range indices are ignored.
    pub fn set_main(&mut self, index: usize) {
        if index < self.ranges.len() {
            self.main = index;
        }
    }

    /// The main range.
    pub fn main_range(&self) -> SelectionRange {
        self.ranges[self.main]
    }

    /// Replace the main range.
    pub fn set_main_range(&mut self, range: SelectionRange) {
        self.ranges[self.main] = range;
    }

    /// Caret of the main range.
    pub fn main_caret(&self) -> usize {
        self.ranges[self.main].caret.position
    }

    /// Anchor of the main range.
    pub fn main_anchor(&self) -> usize {
        self.ranges[self.main].anchor.position
    }

    /// Logical range of a rectangular selection.
    pub fn rectangular(&self) -> SelectionRange {
        self.rectangular
    }

    /// Mutable logical range of a rectangular selection.
    pub fn rectangular_mut(&mut self) -> &mut SelectionRange {
        &mut self.rectangular
    }

    /// Outer limits: the rectangle in rectangular mode, else the main range.
    pub fn limits(&self) -> SelectionRange {
        if self.is_rectangular() {
            self.rectangular
        } else {
            self.main_range()
        }
    }

    /// Returns `true` when every range is empty.
    pub fn is_empty(&self) -> bool {
        self.ranges.iter().all(SelectionRange::is_empty)
    }

    /// Reset to a single caret at 0 in stream mode.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Replace everything with one range, keeping the mode.
    pub fn set_single(&mut self, range: SelectionRange) {
        self.ranges = vec![range];
        self.main = 0;
    }

    /// Add a range and make it main. Overlapping ranges merge into it.
    pub fn add(&mut self, range: SelectionRange) {
        let mut ranges = std::mem::take(&mut self.ranges);
        ranges.push(range);
        let main = ranges.len() - 1;
        let (ranges, main) = normalize_ranges(ranges, main);
        self.ranges = ranges;
        self.main = main;
    }

    /// Add a range without merging; used when deriving rectangles.
    pub fn push_unmerged(&mut self, range: SelectionRange) {
        self.ranges.push(range);
        self.main = self.ranges.len() - 1;
    }

    /// Make the next range main.
    pub fn rotate_main(&mut self) {
        self.main = (self.main + 1) % self.ranges.len();
    }

    /// Swap caret and anchor of the main range.
    pub fn swap_main_anchor_caret(&mut self) {
        let range = &mut self.ranges[self.main];
        std::mem::swap(&mut range.caret, &mut range.anchor);
        if self.is_rectangular() {
            let rect = &mut self.rectangular;
            std::mem::swap(&mut rect.caret, &mut rect.anchor);
        }
    }

    /// Leave rectangular mode, keeping the derived ranges as ordinary ranges.
    pub fn materialize(&mut self) {
        if self.is_rectangular() {
            self.mode = SelectionMode::Stream;
        }
    }

    /// Follow a document change.
    pub fn translate(&mut self, change: &Modification) {
        for range in &mut self.ranges {
            range.caret.translate(change);
            range.anchor.translate(change);
        }
        self.rectangular.caret.translate(change);
        self.rectangular.anchor.translate(change);
        if change.is_delete() && self.ranges.len() > 1 && !self.is_rectangular() {
            let ranges = std::mem::take(&mut self.ranges);
            let (ranges, main) = normalize_ranges(ranges, self.main);
            self.ranges = ranges;
            self.main = main;
        }
    }

    /// Clamp every position into `[0, len]`.
    pub fn clamp_to_len(&mut self, len: usize) {
        for range in &mut self.ranges {
            range.caret.clamp_to_len(len);
            range.anchor.clamp_to_len(len);
        }
        self.rectangular.caret.clamp_to_len(len);
        self.rectangular.anchor.clamp_to_len(len);
        if self.main >= self.ranges.len() {
            self.main = 0;
        }
    }

    /// Rebuild per-line ranges from the logical rectangle.
    ///
    /// The main range is the one on the caret's line. Without `keep_virtual` every derived
    /// position stops at its line end.
    pub fn derive_rectangular(&mut self, buffer: &TextBuffer, tab_width: usize, keep_virtual: bool) {
        if !self.is_rectangular() {
            return;
        }
        let rect = self.rectangular;
        let column = |p: SelectionPosition| buffer.column_of(p.position, tab_width) + p.virtual_space;
        let anchor_column = column(rect.anchor);
        let caret_column = if self.mode == SelectionMode::Thin {
            anchor_column
        } else {
            column(rect.caret)
        };
        let anchor_line = buffer.line_of(rect.anchor.position);
        let caret_line = buffer.line_of(rect.caret.position);
        let lines: Vec<usize> = if caret_line >= anchor_line {
            (anchor_line..=caret_line).collect()
        } else {
            (caret_line..=anchor_line).rev().collect()
        };

        self.ranges.clear();
        for line in lines {
            let place = |col: usize| {
                let placed = buffer.position_at_column(line, col, tab_width);
                SelectionPosition::with_virtual(
                    placed.position,
                    if keep_virtual { placed.virtual_space } else { 0 },
                )
            };
            self.ranges.push(SelectionRange::from_positions(
                place(caret_column),
                place(anchor_column),
            ));
        }
        self.main = self.ranges.len() - 1;
    }

    /// Snap `caret`/`anchor` to whole lines for lines mode.
    pub fn snap_lines(
        buffer: &TextBuffer,
        caret: SelectionPosition,
        anchor: SelectionPosition,
    ) -> (SelectionPosition, SelectionPosition) {
        if caret > anchor {
            (
                SelectionPosition::new(buffer.line_end(buffer.line_of(caret.position))),
                SelectionPosition::new(buffer.line_start(buffer.line_of(anchor.position))),
            )
        } else {
            (
                SelectionPosition::new(buffer.line_start(buffer.line_of(caret.position))),
                SelectionPosition::new(buffer.line_end(buffer.line_of(anchor.position))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(position: usize, text: &str) -> Modification {
        Modification::insert(position, text, 0, 0)
    }

    fn delete(position: usize, text: &str) -> Modification {
        Modification::delete(position, text, 0, 0)
    }

    #[test]
    fn test_insert_shifts_at_and_after() {
        let mut p = SelectionPosition::new(2);
        p.translate(&insert(1, "X"));
        assert_eq!(p.position, 3);
        let mut q = SelectionPosition::new(1);
        q.translate(&insert(1, "XY"));
        assert_eq!(q.position, 3);
        let mut r = SelectionPosition::new(0);
        r.translate(&insert(1, "X"));
        assert_eq!(r.position, 0);
    }

    #[test]
    fn test_insert_consumes_virtual_space() {
        let mut p = SelectionPosition::with_virtual(4, 3);
        p.translate(&insert(4, "  "));
        assert_eq!(p, SelectionPosition::with_virtual(6, 1));
    }

    #[test]
    fn test_delete_collapses_inside() {
        let mut inside = SelectionPosition::new(5);
        inside.translate(&delete(3, "abcd"));
        assert_eq!(inside.position, 3);
        let mut after = SelectionPosition::new(9);
        after.translate(&delete(3, "abcd"));
        assert_eq!(after.position, 5);
        let mut at_end = SelectionPosition::new(7);
        at_end.translate(&delete(3, "abcd"));
        assert_eq!(at_end.position, 3);
    }

    #[test]
    fn test_add_merges_overlapping() {
        let mut selection = Selection::new();
        selection.set_single(SelectionRange::new(5, 2));
        selection.add(SelectionRange::new(10, 8));
        assert_eq!(selection.count(), 2);
        assert_eq!(selection.main(), 1);
        selection.add(SelectionRange::new(9, 4));
        assert_eq!(selection.count(), 1);
        let range = selection.main_range();
        assert_eq!(range.start().position, 2);
        assert_eq!(range.end().position, 10);
    }

    #[test]
    fn test_ranges_stay_sorted() {
        let mut selection = Selection::new();
        selection.set_single(SelectionRange::caret_at(20));
        selection.add(SelectionRange::caret_at(5));
        selection.add(SelectionRange::caret_at(12));
        let carets: Vec<usize> = selection.ranges().iter().map(|r| r.caret.position).collect();
        assert_eq!(carets, vec![5, 12, 20]);
        assert_eq!(selection.main_caret(), 12);
        selection.rotate_main();
        assert_eq!(selection.main_caret(), 20);
        selection.add(SelectionRange::caret_at(12));
        assert_eq!(selection.count(), 3);
    }

    #[test]
    fn test_delete_merges_collapsed_ranges() {
        let mut selection = Selection::new();
        selection.set_single(SelectionRange::caret_at(3));
        selection.add(SelectionRange::caret_at(6));
        selection.translate(&delete(2, "abcdef"));
        assert_eq!(selection.count(), 1);
        assert_eq!(selection.main_caret(), 2);
    }

    #[test]
    fn test_derive_rectangle_with_virtual_space() {
        let buffer = TextBuffer::from_text("abcdef\nab\nabcdef");
        let mut selection = Selection::new();
        selection.set_mode_raw(SelectionMode::Rectangle);
        *selection.rectangular_mut() = SelectionRange::new(15, 2);
        selection.derive_rectangular(&buffer, 8, true);
        assert_eq!(selection.count(), 3);
        let middle = selection.ranges()[1];
        assert_eq!(middle.anchor, SelectionPosition::new(9));
        assert_eq!(middle.caret, SelectionPosition::with_virtual(9, 3));
        assert_eq!(selection.main(), 2);
        selection.derive_rectangular(&buffer, 8, false);
        assert_eq!(selection.ranges()[1].caret, SelectionPosition::new(9));
    }

    #[test]
    fn test_thin_uses_anchor_column() {
        let buffer = TextBuffer::from_text("abcdef\nabcdef");
        let mut selection = Selection::new();
        selection.set_mode_raw(SelectionMode::Thin);
        *selection.rectangular_mut() = SelectionRange::new(11, 1);
        selection.derive_rectangular(&buffer, 8, false);
        assert!(selection.is_empty());
        assert_eq!(selection.ranges()[1].caret.position, 8);
    }

    #[test]
    fn test_clamp_to_len_pulls_back_every_range() {
        let mut selection = Selection::new();
        selection.set_single(SelectionRange::new(12, 3));
        selection.add(SelectionRange::caret_at(30));
        *selection.rectangular_mut() = SelectionRange::new(40, 1);
        selection.clamp_to_len(8);
        assert_eq!(selection.main_caret(), 8);
        assert!(selection.ranges().iter().all(|r| r.end().position <= 8));
        assert_eq!(selection.rectangular().caret.position, 8);
        assert_eq!(selection.rectangular().anchor.position, 1);
    }

    #[test]
    fn test_snap_lines() {
        let buffer = TextBuffer::from_text("one\ntwo\nthree");
        let (caret, anchor) =
            Selection::snap_lines(&buffer, SelectionPosition::new(9), SelectionPosition::new(1));
        assert_eq!(caret.position, 13);
        assert_eq!(anchor.position, 0);
    }
}
