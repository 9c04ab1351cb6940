//! Text Buffer
//!
//! Character store backed by a [`ropey::Rope`]. All positions are character offsets in
//! `[0, len]`. Line breaks are `\n`, `\r` and `\r\n`, matching the line model the rest of the
//! engine renumbers against.

use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Result of placing a display column on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPosition {
    /// Real position on the line (never past the line end).
    pub position: usize,
    /// Columns still missing past the line end.
    pub virtual_space: usize,
}

/// Authoritative character store with O(log N) line access.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a buffer from text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns `true` when the buffer holds no characters.
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Number of lines; an empty buffer has one line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Clamp a signed position into `[0, len]`.
    pub fn clamp(&self, position: isize) -> usize {
        if position <= 0 {
            0
        } else {
            (position as usize).min(self.len())
        }
    }

    /// Clamp a signed line index into `[0, line_count - 1]`.
    pub fn clamp_line(&self, line: isize) -> usize {
        if line <= 0 {
            0
        } else {
            (line as usize).min(self.line_count() - 1)
        }
    }

    /// Full text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text of `[start, end)`, clamped and ordered.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.len();
        let (start, end) = (start.min(end).min(len), start.max(end).min(len));
        self.rope.slice(start..end).to_string()
    }

    /// Character at `position`, `None` at or past the end.
    pub fn char_at(&self, position: usize) -> Option<char> {
        if position < self.len() {
            Some(self.rope.char(position))
        } else {
            None
        }
    }

    /// Line containing `position` (clamped).
    pub fn line_of(&self, position: usize) -> usize {
        self.rope.char_to_line(position.min(self.len()))
    }

    /// First position of `line`; lines past the end map to `len`.
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.line_count() {
            self.len()
        } else {
            self.rope.line_to_char(line)
        }
    }

    /// Position just before the line terminator of `line`.
    pub fn line_end(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return self.len();
        }
        let start = self.line_start(line);
        let mut end = self.line_start(line + 1);
        if end > start && self.char_at(end - 1) == Some('\n') {
            end -= 1;
            if end > start && self.char_at(end - 1) == Some('\r') {
                end -= 1;
            }
        } else if end > start && self.char_at(end - 1) == Some('\r') {
            end -= 1;
        }
        end
    }

    /// Text of `line` including its terminator.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        self.rope.line(line).to_string()
    }

    /// Insert `text` at `position` (clamped). Returns the signed change in line count.
    pub fn insert(&mut self, position: usize, text: &str) -> isize {
        let before = self.line_count() as isize;
        let position = position.min(self.len());
        self.rope.insert(position, text);
        self.line_count() as isize - before
    }

    /// Remove `[start, end)` and return the removed text with the signed change in line count.
    pub fn delete(&mut self, start: usize, end: usize) -> (String, isize) {
        let len = self.len();
        let (start, end) = (start.min(end).min(len), start.max(end).min(len));
        if start == end {
            return (String::new(), 0);
        }
        let before = self.line_count() as isize;
        let removed = self.rope.slice(start..end).to_string();
        self.rope.remove(start..end);
        (removed, self.line_count() as isize - before)
    }

    /// Display column of `position`, expanding tabs and counting wide characters as two.
    pub fn column_of(&self, position: usize, tab_width: usize) -> usize {
        let position = position.min(self.len());
        let line_start = self.line_start(self.line_of(position));
        let mut column = 0;
        for ch in self.rope.slice(line_start..position).chars() {
            column = advance_column(column, ch, tab_width);
        }
        column
    }

    /// Position at display `column` on `line`, reporting any columns past the line end.
    pub fn position_at_column(&self, line: usize, column: usize, tab_width: usize) -> ColumnPosition {
        let start = self.line_start(line);
        let end = self.line_end(line);
        let mut current = 0;
        let mut position = start;
        for ch in self.rope.slice(start..end).chars() {
            let next = advance_column(current, ch, tab_width);
            if next > column {
                return ColumnPosition {
                    position,
                    virtual_space: 0,
                };
            }
            current = next;
            position += 1;
        }
        ColumnPosition {
            position,
            virtual_space: column.saturating_sub(current),
        }
    }

    /// Start of the grapheme cluster before `position`.
    pub fn grapheme_before(&self, position: usize) -> usize {
        let position = position.min(self.len());
        if position == 0 {
            return 0;
        }
        let line_start = self.line_start(self.line_of(position - 1));
        let prefix = self.slice(line_start, position);
        let last = prefix
            .graphemes(true)
            .next_back()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        position - last
    }

    /// End of the grapheme cluster starting at `position`.
    pub fn grapheme_after(&self, position: usize) -> usize {
        let position = position.min(self.len());
        if position >= self.len() {
            return self.len();
        }
        let line = self.line_of(position);
        let end = self.line_start(line + 1).max(position + 1);
        let rest = self.slice(position, end);
        let first = rest
            .graphemes(true)
            .next()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        position + first
    }
}

fn advance_column(column: usize, ch: char, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab = tab_width.max(1);
        (column / tab + 1) * tab
    } else {
        column + ch.width().unwrap_or(0).max(1)
    }
}

/// Number of line breaks in `text`, counting `\r\n` once.
pub fn count_line_breaks(text: &str) -> usize {
    let mut count = 0;
    let mut prev_cr = false;
    for ch in text.chars() {
        match ch {
            '\n' if prev_cr => {}
            '\n' | '\r' => count += 1,
            _ => {}
        }
        prev_cr = ch == '\r';
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_queries() {
        let buffer = TextBuffer::from_text("ab\ncd\r\nef\rg");
        assert_eq!(buffer.line_count(), 4);
        assert_eq!(buffer.line_start(1), 3);
        assert_eq!(buffer.line_end(0), 2);
        assert_eq!(buffer.line_end(1), 5);
        assert_eq!(buffer.line_end(2), 9);
        assert_eq!(buffer.line_end(3), 11);
        assert_eq!(buffer.line_of(6), 1);
        assert_eq!(buffer.line_start(10), buffer.len());
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let buffer = TextBuffer::from_text("hello\n");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line_start(1), 6);
        assert_eq!(buffer.line_end(1), 6);
        assert_eq!(buffer.line_end(0), 5);
    }

    #[test]
    fn test_insert_delete_report_line_delta() {
        let mut buffer = TextBuffer::from_text("abc");
        assert_eq!(buffer.insert(1, "X\nY\n"), 2);
        assert_eq!(buffer.text(), "aX\nY\nbc");
        let (removed, delta) = buffer.delete(1, 5);
        assert_eq!(removed, "X\nY\n");
        assert_eq!(delta, -2);
        assert_eq!(buffer.text(), "abc");
    }

    #[test]
    fn test_cr_lf_join_changes_no_lines() {
        let mut buffer = TextBuffer::from_text("a\rb");
        assert_eq!(buffer.insert(2, "\n"), 0);
        assert_eq!(buffer.line_count(), 2);
    }

    #[test]
    fn test_columns_with_tabs_and_wide_chars() {
        let buffer = TextBuffer::from_text("\tab\n中x");
        assert_eq!(buffer.column_of(1, 4), 4);
        assert_eq!(buffer.column_of(3, 4), 6);
        assert_eq!(buffer.column_of(5, 4), 2);
        let placed = buffer.position_at_column(1, 6, 4);
        assert_eq!(placed.position, 6);
        assert_eq!(placed.virtual_space, 3);
    }

    #[test]
    fn test_grapheme_steps() {
        let buffer = TextBuffer::from_text("e\u{301}x");
        assert_eq!(buffer.grapheme_after(0), 2);
        assert_eq!(buffer.grapheme_before(2), 0);
        assert_eq!(buffer.grapheme_before(3), 2);
    }

    #[test]
    fn test_count_line_breaks() {
        assert_eq!(count_line_breaks("a\r\nb\nc\rd"), 3);
        assert_eq!(count_line_breaks("none"), 0);
    }
}
