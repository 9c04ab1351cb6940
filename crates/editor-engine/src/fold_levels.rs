//! Fold levels.
//!
//! One level per document line: the low 12 bits are the depth, plus optional flags for
//! blank lines and fold headers. Stored levels are what callers set; the effective level
//! also carries a derived header flag when the next line is deeper.

/// Depth of top-level lines.
pub const SC_FOLDLEVELBASE: i32 = 0x400;
/// The line is blank and belongs to whatever surrounds it.
pub const SC_FOLDLEVELWHITEFLAG: i32 = 0x1000;
/// The line starts a fold.
pub const SC_FOLDLEVELHEADERFLAG: i32 = 0x2000;
/// Mask of the depth bits.
pub const SC_FOLDLEVELNUMBERMASK: i32 = 0x0FFF;

/// Depth bits of a level.
pub fn level_number(level: i32) -> i32 {
    level & SC_FOLDLEVELNUMBERMASK
}

/// Returns `true` if `level` is a fold header.
pub fn is_header(level: i32) -> bool {
    level & SC_FOLDLEVELHEADERFLAG != 0
}

/// Returns `true` if `level` marks a blank line.
pub fn is_white(level: i32) -> bool {
    level & SC_FOLDLEVELWHITEFLAG != 0
}

fn is_subordinate(level_start: i32, level_try: i32) -> bool {
    if is_white(level_try) {
        true
    } else {
        level_start < level_number(level_try)
    }
}

/// A change of effective level on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelChange {
    /// Line whose level changed.
    pub line: usize,
    /// Level before.
    pub prev: i32,
    /// Level after.
    pub now: i32,
}

/// Per-line fold levels.
#[derive(Debug, Clone)]
pub struct FoldLevels {
    levels: Vec<i32>,
}

impl FoldLevels {
    /// `lines` lines at the base level.
    pub fn new(lines: usize) -> Self {
        Self {
            levels: vec![SC_FOLDLEVELBASE; lines.max(1)],
        }
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always `false`; a document has at least one line.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Level as set, without derived flags.
    pub fn raw(&self, line: usize) -> i32 {
        self.levels.get(line).copied().unwrap_or(SC_FOLDLEVELBASE)
    }

    /// Effective level of `line`; lines outside the document are at the base level.
    pub fn level(&self, line: usize) -> i32 {
        let Some(raw) = self.levels.get(line).copied() else {
            return SC_FOLDLEVELBASE;
        };
        match self.levels.get(line + 1) {
            Some(next) if !is_white(*next) && level_number(*next) > level_number(raw) => {
                raw | SC_FOLDLEVELHEADERFLAG
            }
            _ => raw,
        }
    }

    /// Set the level of `line` and report every effective change it caused.
    pub fn set(&mut self, line: usize, level: i32) -> Vec<LevelChange> {
        if line >= self.levels.len() {
            return Vec::new();
        }
        let above = line.checked_sub(1);
        let before_line = self.level(line);
        let before_above = above.map(|l| self.level(l));
        self.levels[line] = level;

        let mut changes = Vec::new();
        if let (Some(above), Some(prev)) = (above, before_above) {
            let now = self.level(above);
            if now != prev {
                changes.push(LevelChange {
                    line: above,
                    prev,
                    now,
                });
            }
        }
        let now = self.level(line);
        if now != before_line {
            changes.push(LevelChange {
                line,
                prev: before_line,
                now,
            });
        }
        changes
    }

    /// Open `count` lines after `line`.
    ///
    /// New lines take the level of the line that followed `line` (or `line` itself at the end
    /// of the document) minus the header flag, so the fold `line` belongs to stays intact.
    pub fn insert_lines(&mut self, line: usize, count: usize) {
        let at = (line + 1).min(self.levels.len());
        let source = if at < self.levels.len() { at } else { line };
        let level = self.raw(source) & !SC_FOLDLEVELHEADERFLAG;
        self.levels.splice(at..at, std::iter::repeat_n(level, count));
    }

    /// Remove `count` lines after `line`.
    pub fn remove_lines(&mut self, line: usize, count: usize) {
        let at = (line + 1).min(self.levels.len());
        let end = (at + count).min(self.levels.len());
        self.levels.drain(at..end);
    }

    /// Reset every line to the base level.
    pub fn clear(&mut self, lines: usize) {
        self.levels = vec![SC_FOLDLEVELBASE; lines.max(1)];
    }

    /// Last line belonging to the fold that starts at `parent`.
    ///
    /// `level` overrides the depth compared against (`None` uses the parent's own depth).
    /// With `last_line`, the scan stops once it passes that line on a non-blank line.
    pub fn last_child(&self, parent: usize, level: Option<i32>, last_line: Option<usize>) -> usize {
        let level = level
            .map(level_number)
            .unwrap_or_else(|| level_number(self.level(parent)));
        let max_line = self.levels.len();
        let look_last = last_line.map(|l| l.min(max_line.saturating_sub(1)));
        let mut max_subord = parent;
        while max_subord + 1 < max_line {
            if !is_subordinate(level, self.level(max_subord + 1)) {
                break;
            }
            if let Some(look_last) = look_last
                && max_subord >= look_last
                && !is_white(self.level(max_subord))
            {
                break;
            }
            max_subord += 1;
        }
        if max_subord > parent
            && level > level_number(self.level(max_subord + 1))
            && is_white(self.level(max_subord))
        {
            max_subord -= 1;
        }
        max_subord
    }

    /// Closest header above `line` with a smaller depth.
    pub fn fold_parent(&self, line: usize) -> Option<usize> {
        if line == 0 || line >= self.levels.len() {
            return None;
        }
        let level = level_number(self.level(line));
        let mut look = line - 1;
        while look > 0
            && (!is_header(self.level(look)) || level_number(self.level(look)) >= level)
        {
            look -= 1;
        }
        let found = self.level(look);
        if is_header(found) && level_number(found) < level {
            Some(look)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> FoldLevels {
        // 0 header
        //   1
        //   2 header
        //     3
        //   4
        // 5
        let mut levels = FoldLevels::new(6);
        levels.set(0, SC_FOLDLEVELBASE);
        levels.set(1, SC_FOLDLEVELBASE + 1);
        levels.set(2, SC_FOLDLEVELBASE + 1);
        levels.set(3, SC_FOLDLEVELBASE + 2);
        levels.set(4, SC_FOLDLEVELBASE + 1);
        levels.set(5, SC_FOLDLEVELBASE);
        levels
    }

    #[test]
    fn test_header_is_derived() {
        let levels = tree();
        assert!(is_header(levels.level(0)));
        assert!(!is_header(levels.level(1)));
        assert!(is_header(levels.level(2)));
        assert!(!is_header(levels.raw(0)));
    }

    #[test]
    fn test_set_reports_derived_change_above() {
        let mut levels = FoldLevels::new(3);
        let changes = levels.set(1, SC_FOLDLEVELBASE + 1);
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].line, 0);
        assert_eq!(changes[0].now, SC_FOLDLEVELBASE | SC_FOLDLEVELHEADERFLAG);
        assert_eq!(changes[1].prev, SC_FOLDLEVELBASE);
    }

    #[test]
    fn test_last_child_and_parent() {
        let levels = tree();
        assert_eq!(levels.last_child(0, None, None), 4);
        assert_eq!(levels.last_child(2, None, None), 3);
        assert_eq!(levels.last_child(5, None, None), 5);
        assert_eq!(levels.fold_parent(3), Some(2));
        assert_eq!(levels.fold_parent(4), Some(0));
        assert_eq!(levels.fold_parent(5), None);
        assert_eq!(levels.fold_parent(0), None);
    }

    #[test]
    fn test_trailing_white_lines_go_to_parent() {
        let mut levels = FoldLevels::new(5);
        levels.set(1, SC_FOLDLEVELBASE + 1);
        levels.set(2, SC_FOLDLEVELBASE + 2);
        levels.set(3, (SC_FOLDLEVELBASE + 2) | SC_FOLDLEVELWHITEFLAG);
        assert_eq!(levels.last_child(1, None, None), 2);
        assert_eq!(levels.last_child(0, None, None), 3);
    }

    #[test]
    fn test_insert_and_remove_lines() {
        let mut levels = tree();
        levels.insert_lines(0, 2);
        assert_eq!(levels.len(), 8);
        assert_eq!(levels.raw(1), SC_FOLDLEVELBASE + 1);
        assert!(is_header(levels.level(0)));
        levels.insert_lines(7, 1);
        assert_eq!(levels.raw(8), SC_FOLDLEVELBASE);
        levels.remove_lines(7, 1);
        levels.remove_lines(0, 2);
        assert_eq!(levels.len(), 6);
        assert_eq!(levels.raw(1), SC_FOLDLEVELBASE + 1);
    }
}
