//! Contraction state: which document lines are shown and which fold headers are expanded.
//!
//! Contraction is per engine; two views of one document fold independently. While nothing is
//! hidden the doc↔display mapping is the identity and the chunk tables are not consulted.

use crate::fold_levels::{FoldLevels, SC_FOLDLEVELBASE, is_header, is_white, level_number};

/// `SC_FOLDACTION_CONTRACT`
pub const SC_FOLDACTION_CONTRACT: isize = 0;
/// `SC_FOLDACTION_EXPAND`
pub const SC_FOLDACTION_EXPAND: isize = 1;
/// `SC_FOLDACTION_TOGGLE`
pub const SC_FOLDACTION_TOGGLE: isize = 2;
/// Combined with contract in fold-all: collapse headers at every depth.
pub const SC_FOLDACTION_CONTRACT_EVERY_LEVEL: isize = 4;

/// What to do with a fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldAction {
    /// Collapse.
    Contract,
    /// Expand.
    Expand,
    /// Flip the current state.
    Toggle,
}

impl FoldAction {
    /// Decode `SC_FOLDACTION_*`, ignoring modifier bits.
    pub fn from_code(code: isize) -> Option<Self> {
        match code & 3 {
            SC_FOLDACTION_CONTRACT => Some(Self::Contract),
            SC_FOLDACTION_EXPAND => Some(Self::Expand),
            SC_FOLDACTION_TOGGLE => Some(Self::Toggle),
            _ => None,
        }
    }
}

/// Lines per chunk once a chunk is split.
const CHUNK_LINES: usize = 256;

/// A run of consecutive document lines.
#[derive(Debug, Clone, Default)]
struct Chunk {
    visible: Vec<bool>,
    expanded: Vec<bool>,
    shown: usize,
}

impl Chunk {
    fn filled(lines: usize) -> Self {
        Self {
            visible: vec![true; lines],
            expanded: vec![true; lines],
            shown: lines,
        }
    }

    fn len(&self) -> usize {
        self.visible.len()
    }

    fn split_off(&mut self, at: usize) -> Chunk {
        let visible = self.visible.split_off(at);
        let expanded = self.expanded.split_off(at);
        let shown = visible.iter().filter(|v| **v).count();
        self.shown -= shown;
        Chunk {
            visible,
            expanded,
            shown,
        }
    }

    fn append(&mut self, mut other: Chunk) {
        self.visible.append(&mut other.visible);
        self.expanded.append(&mut other.expanded);
        self.shown += other.shown;
    }
}

/// Visibility and expansion per document line.
///
/// Lines live in chunks of a few hundred. Each chunk counts its visible lines, and two small
/// per-chunk tables hold the first line and the display lines before each chunk. Inserting or
/// removing lines splices one chunk and refreshes the tables from there on.
#[derive(Debug, Clone)]
pub struct Contraction {
    chunks: Vec<Chunk>,
    starts: Vec<usize>,
    shown_before: Vec<usize>,
    lines: usize,
    hidden: usize,
}

impl Contraction {
    /// `lines` visible, expanded lines.
    pub fn new(lines: usize) -> Self {
        let lines = lines.max(1);
        let mut chunks = Vec::with_capacity(lines.div_ceil(CHUNK_LINES));
        let mut remaining = lines;
        while remaining > 0 {
            let take = remaining.min(CHUNK_LINES);
            chunks.push(Chunk::filled(take));
            remaining -= take;
        }
        let mut contraction = Self {
            chunks,
            starts: Vec::new(),
            shown_before: Vec::new(),
            lines,
            hidden: 0,
        };
        contraction.refresh_from(0);
        contraction
    }

    /// Recompute the per-chunk tables for chunks `first..`.
    fn refresh_from(&mut self, first: usize) {
        self.starts.truncate(first);
        self.shown_before.truncate(first);
        let (mut start, mut shown) = match first.checked_sub(1) {
            Some(previous) => (
                self.starts[previous] + self.chunks[previous].len(),
                self.shown_before[previous] + self.chunks[previous].shown,
            ),
            None => (0, 0),
        };
        for chunk in &self.chunks[first..] {
            self.starts.push(start);
            self.shown_before.push(shown);
            start += chunk.len();
            shown += chunk.shown;
        }
    }

    /// Chunk holding `line` and the offset inside it; `line` must be in the document.
    fn locate(&self, line: usize) -> (usize, usize) {
        let chunk = self.starts.partition_point(|start| *start <= line) - 1;
        (chunk, line - self.starts[chunk])
    }

    /// Number of document lines tracked.
    pub fn lines_in_doc(&self) -> usize {
        self.lines
    }

    /// Number of display lines.
    pub fn lines_displayed(&self) -> usize {
        self.lines - self.hidden
    }

    /// Returns `true` when any line is hidden.
    pub fn hidden_lines(&self) -> bool {
        self.hidden > 0
    }

    /// Display line of `line`: the number of visible lines before it.
    pub fn display_from_doc(&self, line: usize) -> usize {
        if self.hidden == 0 {
            return line.min(self.lines);
        }
        if line >= self.lines {
            return self.lines_displayed();
        }
        let (chunk, offset) = self.locate(line);
        let inside = self.chunks[chunk].visible[..offset]
            .iter()
            .filter(|v| **v)
            .count();
        self.shown_before[chunk] + inside
    }

    /// Document line shown at `display`; past the end maps to the last line.
    pub fn doc_from_display(&self, display: usize) -> usize {
        let last = self.lines - 1;
        if self.hidden == 0 {
            return display.min(last);
        }
        if display >= self.lines_displayed() {
            return last;
        }
        let chunk = self.shown_before.partition_point(|before| *before <= display) - 1;
        let wanted = display - self.shown_before[chunk];
        self.chunks[chunk]
            .visible
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .nth(wanted)
            .map(|(offset, _)| self.starts[chunk] + offset)
            .unwrap_or(last)
    }

    /// Visibility of `line`; lines outside the document count as visible.
    pub fn visible(&self, line: usize) -> bool {
        if line >= self.lines {
            return true;
        }
        let (chunk, offset) = self.locate(line);
        self.chunks[chunk].visible[offset]
    }

    /// Show or hide `start..=end` (clamped). Returns `true` if anything changed.
    pub fn set_visible(&mut self, start: usize, end: usize, visible: bool) -> bool {
        let end = end.min(self.lines - 1);
        if start > end {
            return false;
        }
        let (first, mut offset) = self.locate(start);
        let mut chunk = first;
        let mut changed = false;
        for _ in start..=end {
            if offset == self.chunks[chunk].len() {
                chunk += 1;
                offset = 0;
            }
            let target = &mut self.chunks[chunk];
            if target.visible[offset] != visible {
                target.visible[offset] = visible;
                if visible {
                    target.shown += 1;
                    self.hidden -= 1;
                } else {
                    target.shown -= 1;
                    self.hidden += 1;
                }
                changed = true;
            }
            offset += 1;
        }
        if changed {
            self.refresh_from(first);
        }
        changed
    }

    /// Expansion of `line`; lines outside the document count as expanded.
    pub fn expanded(&self, line: usize) -> bool {
        if line >= self.lines {
            return true;
        }
        let (chunk, offset) = self.locate(line);
        self.chunks[chunk].expanded[offset]
    }

    /// Set the expansion flag only. Returns `true` if it changed.
    pub fn set_expanded(&mut self, line: usize, expanded: bool) -> bool {
        if line >= self.lines {
            return false;
        }
        let (chunk, offset) = self.locate(line);
        let flag = &mut self.chunks[chunk].expanded[offset];
        if *flag == expanded {
            return false;
        }
        *flag = expanded;
        true
    }

    /// First contracted line at or after `start`.
    pub fn contracted_next(&self, start: usize) -> Option<usize> {
        if start >= self.lines {
            return None;
        }
        let (first, offset) = self.locate(start);
        self.chunks[first..]
            .iter()
            .zip(&self.starts[first..])
            .enumerate()
            .find_map(|(index, (chunk, chunk_start))| {
                let skip = if index == 0 { offset } else { 0 };
                chunk.expanded[skip..]
                    .iter()
                    .position(|e| !*e)
                    .map(|found| chunk_start + skip + found)
            })
    }

    /// Open `count` lines after `line`; they inherit its visibility and are expanded.
    pub fn insert_lines(&mut self, line: usize, count: usize) {
        if count == 0 {
            return;
        }
        let line = line.min(self.lines - 1);
        let visible = self.visible(line);
        let (chunk, offset) = self.locate(line);
        let at = offset + 1;
        {
            let target = &mut self.chunks[chunk];
            target.visible.splice(at..at, std::iter::repeat_n(visible, count));
            target.expanded.splice(at..at, std::iter::repeat_n(true, count));
            if visible {
                target.shown += count;
            }
        }
        if !visible {
            self.hidden += count;
        }
        self.lines += count;

        if self.chunks[chunk].len() > 2 * CHUNK_LINES {
            let mut pieces = Vec::new();
            let target = &mut self.chunks[chunk];
            while target.len() > CHUNK_LINES {
                let tail_start = target.len() - CHUNK_LINES;
                pieces.push(target.split_off(tail_start));
            }
            pieces.reverse();
            self.chunks.splice(chunk + 1..chunk + 1, pieces);
        }
        self.refresh_from(chunk);
    }

    /// Remove `count` lines after `line`.
    pub fn delete_lines(&mut self, line: usize, count: usize) {
        let at = (line + 1).min(self.lines);
        let end = (at + count).min(self.lines);
        if at == end {
            return;
        }
        let (first, mut offset) = self.locate(at - 1);
        offset += 1;
        let mut chunk = first;
        let mut remaining = end - at;
        while remaining > 0 {
            if offset == self.chunks[chunk].len() {
                chunk += 1;
                offset = 0;
                continue;
            }
            let target = &mut self.chunks[chunk];
            let take = remaining.min(target.len() - offset);
            let shown = target.visible.drain(offset..offset + take).filter(|v| *v).count();
            target.expanded.drain(offset..offset + take);
            target.shown -= shown;
            self.hidden -= take - shown;
            remaining -= take;
            if target.visible.is_empty() {
                self.chunks.remove(chunk);
                offset = 0;
            }
        }
        self.lines -= end - at;

        if first + 1 < self.chunks.len()
            && self.chunks[first].len() + self.chunks[first + 1].len() <= CHUNK_LINES
        {
            let next = self.chunks.remove(first + 1);
            self.chunks[first].append(next);
        }
        self.refresh_from(first);
    }

    /// Forget all contraction for a document of `lines` lines.
    pub fn reset(&mut self, lines: usize) {
        *self = Self::new(lines);
    }

    /// Collapse, expand or toggle the fold at `line`.
    ///
    /// Toggling a line that is not a header acts on its fold parent. Returns `true` if
    /// visibility changed.
    pub fn fold_line(&mut self, levels: &FoldLevels, line: usize, action: FoldAction) -> bool {
        let mut line = line;
        let action = match action {
            FoldAction::Toggle => {
                if !is_header(levels.level(line)) {
                    match levels.fold_parent(line) {
                        Some(parent) => line = parent,
                        None => return false,
                    }
                }
                if self.expanded(line) {
                    FoldAction::Contract
                } else {
                    FoldAction::Expand
                }
            }
            other => other,
        };

        if action == FoldAction::Contract {
            let last = levels.last_child(line, None, None);
            if last > line {
                self.set_expanded(line, false);
                return self.set_visible(line + 1, last, false);
            }
            return false;
        }

        let mut changed = false;
        if !self.visible(line) {
            changed |= self.ensure_line_visible(levels, line);
        }
        self.set_expanded(line, true);
        changed |= self.expand_line(levels, line).1;
        changed
    }

    /// Show the children of `line`, keeping collapsed descendants collapsed.
    ///
    /// Returns the last child and whether visibility changed.
    pub fn expand_line(&mut self, levels: &FoldLevels, line: usize) -> (usize, bool) {
        let last = levels.last_child(line, None, None);
        let mut changed = false;
        let mut current = line + 1;
        let mut run_start = current;
        while current <= last {
            if is_header(levels.level(current)) {
                changed |= self.set_visible(run_start, current, true);
                if self.expanded(current) {
                    let (child_last, child_changed) = self.expand_line(levels, current);
                    changed |= child_changed;
                    current = child_last;
                } else {
                    current = levels.last_child(current, None, None);
                }
                run_start = current + 1;
            }
            current += 1;
        }
        if run_start <= last {
            changed |= self.set_visible(run_start, last, true);
        }
        (last, changed)
    }

    /// Set `line` and every header below it to the same state, showing or hiding all
    /// children. `level` is the depth the children are measured against.
    pub fn fold_expand(
        &mut self,
        levels: &FoldLevels,
        line: usize,
        action: FoldAction,
        level: i32,
    ) -> bool {
        let expanding = match action {
            FoldAction::Expand => true,
            FoldAction::Contract => false,
            FoldAction::Toggle => !self.expanded(line),
        };
        self.set_expanded(line, expanding);
        if expanding && !self.hidden_lines() {
            return false;
        }
        let last = levels.last_child(line, Some(level_number(level)), None);
        let changed = self.set_visible(line + 1, last, expanding);
        for child in line + 1..=last {
            if is_header(levels.level(child)) {
                self.set_expanded(child, expanding);
            }
        }
        changed
    }

    /// Apply `action` to every fold. `contract_every_level` collapses nested headers too.
    pub fn fold_all(
        &mut self,
        levels: &FoldLevels,
        action: FoldAction,
        contract_every_level: bool,
    ) -> bool {
        let lines = levels.len().min(self.lines);
        let expanding = match action {
            FoldAction::Expand => true,
            FoldAction::Contract => false,
            FoldAction::Toggle => (0..lines)
                .find(|l| is_header(levels.level(*l)))
                .map(|l| !self.expanded(l))
                .unwrap_or(false),
        };
        let mut changed = false;
        if expanding {
            changed |= self.set_visible(0, lines.saturating_sub(1), true);
            for line in 0..lines {
                if is_header(levels.level(line)) {
                    self.set_expanded(line, true);
                }
            }
        } else {
            for line in 0..lines {
                let level = levels.level(line);
                if is_header(level)
                    && (contract_every_level || level_number(level) == SC_FOLDLEVELBASE)
                {
                    self.set_expanded(line, false);
                    let last = levels.last_child(line, None, None);
                    if last > line {
                        changed |= self.set_visible(line + 1, last, false);
                    }
                }
            }
        }
        changed
    }

    /// Make `line` visible by expanding every collapsed fold around it.
    pub fn ensure_line_visible(&mut self, levels: &FoldLevels, line: usize) -> bool {
        if self.visible(line) {
            return false;
        }
        let mut look = line;
        while look > 0 && is_white(levels.level(look)) {
            look -= 1;
        }
        let parent = levels
            .fold_parent(look)
            .or_else(|| levels.fold_parent(line));
        let mut changed = false;
        if let Some(parent) = parent {
            if parent != line {
                changed |= self.ensure_line_visible(levels, parent);
            }
            if !self.expanded(parent) {
                self.set_expanded(parent, true);
                changed |= self.expand_line(levels, parent).1;
            }
        }
        changed
    }

    /// React to a fold level change so no line is left unreachable.
    pub fn fold_changed(&mut self, levels: &FoldLevels, line: usize, now: i32, prev: i32) -> bool {
        let mut changed = false;
        if is_header(now) {
            if !is_header(prev) {
                self.set_expanded(line, true);
                changed |= self.fold_expand(levels, line, FoldAction::Expand, prev);
            }
        } else if is_header(prev) {
            if let Some(prev_line) = line.checked_sub(1) {
                let prev_level = levels.level(prev_line);
                if level_number(prev_level) == level_number(now)
                    && !self.visible(prev_line)
                    && let Some(parent) = levels.fold_parent(prev_line)
                {
                    changed |= self.fold_line(levels, parent, FoldAction::Expand);
                }
            }
            if !self.expanded(line) {
                self.set_expanded(line, true);
                changed |= self.fold_expand(levels, line, FoldAction::Expand, prev);
            }
        }
        if !is_white(now) && level_number(prev) > level_number(now) && self.hidden_lines() {
            let reveal = match levels.fold_parent(line) {
                None => true,
                Some(parent) => self.expanded(parent) && self.visible(parent),
            };
            if reveal {
                changed |= self.set_visible(line, line, true);
            }
        }
        if !is_white(now)
            && level_number(prev) < level_number(now)
            && self.hidden_lines()
            && let Some(parent) = levels.fold_parent(line)
            && !self.expanded(parent)
            && self.visible(line)
        {
            changed |= self.fold_line(levels, parent, FoldAction::Expand);
        }
        changed
    }
}
