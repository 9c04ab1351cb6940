//! Text and undo messages.
//!
//! Every edit goes through the document and is followed by a journal drain, so the selection
//! seen by the next step is already translated. Compound edits are bracketed by an undo group;
//! single insertions are not, which lets consecutive typed characters coalesce.

use crate::engine::Engine;
use crate::line_ending::EolMode;
use crate::messages::{INVALID_POSITION, Message};
use crate::notify::{Notification, NotificationKind};
use crate::param::{Param, Reply};
use crate::selection::{SelectionPosition, SelectionRange};

impl Engine {
    pub(crate) fn text_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let reply = match message {
            Message::GetText => {
                let document = self.doc();
                let limit = a.as_int();
                if limit > 0 {
                    document.buffer().slice(0, limit as usize).into()
                } else {
                    document.text().into()
                }
            }
            Message::SetText => {
                self.set_text(&b.as_text());
                Reply::Int(0)
            }
            Message::GetTextLength | Message::GetLength => self.doc_len().into(),
            Message::GetLineCount => self.doc().line_count().into(),
            Message::GetLine => match self.valid_line(a) {
                Some(line) => self.doc().buffer().line_text(line).into(),
                None => Reply::Text(String::new()),
            },
            Message::GetCurLine => {
                let document = self.doc();
                let buffer = document.buffer();
                buffer
                    .line_text(buffer.line_of(self.selection.main_caret()))
                    .into()
            }
            Message::LineFromPosition => {
                let position = self.position(a);
                self.doc().buffer().line_of(position).into()
            }
            Message::PositionFromLine => {
                let document = self.doc();
                let buffer = document.buffer();
                let line = a.as_int();
                if line < 0 {
                    buffer
                        .line_start(buffer.line_of(self.selection.main_caret()))
                        .into()
                } else if line as usize > buffer.line_count() {
                    Reply::Int(INVALID_POSITION)
                } else {
                    buffer.line_start(line as usize).into()
                }
            }
            Message::LineLength => match self.valid_line(a) {
                Some(line) => self.doc().buffer().line_text(line).chars().count().into(),
                None => Reply::Int(0),
            },
            Message::GetLineEndPosition => {
                let line = self.line(a);
                self.doc().buffer().line_end(line).into()
            }
            Message::ReplaceSel => {
                self.replace_selection(&b.as_text());
                Reply::Int(0)
            }
            Message::InsertText => {
                let position = if a.as_int() < 0 {
                    self.selection.main_caret()
                } else {
                    self.position(a)
                };
                let text = b.as_text();
                self.note_before();
                self.insert_text(position, &text);
                self.note_after();
                Reply::Int(0)
            }
            Message::AppendText => {
                let text = leading_chars(&b.as_text(), a.as_int());
                let end = self.doc_len();
                self.note_before();
                self.insert_text(end, &text);
                self.note_after();
                Reply::Int(0)
            }
            Message::AddText => {
                let text = leading_chars(&b.as_text(), a.as_int());
                let caret = self.selection.main_caret();
                self.note_before();
                if self.insert_text(caret, &text) {
                    self.set_empty_selection(caret + text.chars().count());
                }
                self.note_after();
                Reply::Int(0)
            }
            Message::AddStyledText => {
                let mut cells = b.as_bytes();
                if a.as_int() > 0 {
                    cells.truncate(a.as_int() as usize);
                }
                let (text, styles) = decode_styled(&cells);
                let caret = self.selection.main_caret();
                self.note_before();
                let inserted = self.doc_mut().insert_styled(caret, &text, &styles);
                self.sync();
                if inserted {
                    self.set_empty_selection(caret + text.chars().count());
                }
                self.note_after();
                Reply::Int(0)
            }
            Message::GetStyledText => {
                let (start, end) = self.ordered_range(a, b);
                let document = self.doc();
                let text = document.buffer().slice(start, end);
                encode_styled(&text, document.styles(start, end)).into()
            }
            Message::ClearAll => {
                self.begin_edit();
                let len = self.doc_len();
                self.delete_text(0, len);
                self.set_empty_selection(0);
                self.end_edit();
                Reply::Int(0)
            }
            Message::DeleteRange => {
                let start = self.position(a);
                let length = b.as_int();
                if length > 0 {
                    self.note_before();
                    self.delete_text(start, length as usize);
                    self.note_after();
                }
                Reply::Int(0)
            }
            Message::ClearDocumentStyle => {
                self.doc_mut().clear_document_style();
                self.reset_idle_stall();
                self.damage_all();
                Reply::Int(0)
            }
            Message::GetCharAt => {
                let position = a.as_int();
                if position < 0 {
                    return Some(Reply::Int(0));
                }
                self.doc()
                    .buffer()
                    .char_at(position as usize)
                    .map(|ch| ch as u32)
                    .unwrap_or(0)
                    .into()
            }
            Message::GetTextRange => {
                let (start, end) = self.ordered_range(a, b);
                self.doc().buffer().slice(start, end).into()
            }
            Message::GetSelText => self.selected_text().into(),
            Message::PositionBefore => {
                let position = self.position(a);
                self.doc().buffer().grapheme_before(position).into()
            }
            Message::PositionAfter => {
                let position = self.position(a);
                self.doc().buffer().grapheme_after(position).into()
            }
            Message::CountCharacters => {
                let (start, end) = (self.position(a), self.position(b));
                end.saturating_sub(start).into()
            }
            Message::GetColumn => {
                let position = self.position(a);
                let document = self.doc();
                document
                    .buffer()
                    .column_of(position, document.tab_width())
                    .into()
            }
            Message::FindColumn => {
                let line = self.line(a);
                let column = b.as_int().max(0) as usize;
                let document = self.doc();
                document
                    .buffer()
                    .position_at_column(line, column, document.tab_width())
                    .position
                    .into()
            }
            Message::WordStartPosition => {
                let position = self.position(a);
                self.doc()
                    .word_start_position(position, b.as_int() != 0)
                    .into()
            }
            Message::WordEndPosition => {
                let position = self.position(a);
                self.doc().word_end_position(position, b.as_int() != 0).into()
            }
            Message::ConvertEols => {
                if let Some(mode) = EolMode::from_code(a.as_int()) {
                    self.begin_edit();
                    self.doc_mut().convert_eols(mode);
                    self.sync();
                    self.end_edit();
                }
                Reply::Int(0)
            }
            Message::GetEolMode => self.doc().eol_mode().code().into(),
            Message::SetEolMode => {
                if let Some(mode) = EolMode::from_code(a.as_int()) {
                    self.doc_mut().set_eol_mode(mode);
                }
                Reply::Int(0)
            }
            Message::GetTabWidth => self.doc().tab_width().into(),
            Message::SetTabWidth => {
                let width = a.as_int();
                if width > 0 && self.doc_mut().set_tab_width(width as usize) {
                    if self.selection.is_rectangular() {
                        self.derive_rectangular();
                    }
                    self.damage_all();
                }
                Reply::Int(0)
            }
            Message::NewLine => {
                let eol = self.doc().eol_mode().as_str();
                self.type_text(eol);
                Reply::Int(0)
            }
            Message::DeleteBack => {
                self.delete_back();
                Reply::Int(0)
            }
            Message::Clear => {
                self.delete_forward();
                Reply::Int(0)
            }
            _ => return self.undo_message(message, a, b),
        };
        Some(reply)
    }

    fn undo_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let reply = match message {
            Message::Undo => self.undo().into(),
            Message::Redo => self.redo().into(),
            Message::CanUndo => self.doc().can_undo().into(),
            Message::CanRedo => self.doc().can_redo().into(),
            Message::EmptyUndoBuffer => {
                self.doc_mut().empty_undo_buffer();
                Reply::Int(0)
            }
            Message::SetUndoCollection => {
                self.doc_mut().set_undo_collection(a.as_int() != 0);
                Reply::Int(0)
            }
            Message::GetUndoCollection => self.doc().history().is_collecting().into(),
            Message::BeginUndoAction => {
                self.begin_edit();
                Reply::Int(0)
            }
            Message::EndUndoAction => {
                self.end_edit();
                Reply::Int(0)
            }
            Message::AddUndoAction => {
                self.doc_mut().add_undo_action(a.as_int(), b.as_int());
                Reply::Int(0)
            }
            Message::SetSavePoint => {
                self.doc_mut().set_save_point();
                Reply::Int(0)
            }
            Message::GetModify => self.doc().is_modified().into(),
            Message::SetReadOnly => {
                self.doc_mut().set_read_only(a.as_int() != 0);
                Reply::Int(0)
            }
            Message::GetReadOnly => self.doc().is_read_only().into(),
            _ => return None,
        };
        Some(reply)
    }

    // ---------------------------------------------------------------------------------------
    // Edit primitives
    // ---------------------------------------------------------------------------------------

    /// Insert and bring the view up to date.
    pub(crate) fn insert_text(&mut self, position: usize, text: &str) -> bool {
        let inserted = self.doc_mut().insert(position, text);
        self.sync();
        inserted
    }

    /// Delete and bring the view up to date.
    pub(crate) fn delete_text(&mut self, position: usize, length: usize) -> bool {
        let deleted = self.doc_mut().delete(position, length);
        self.sync();
        deleted
    }

    fn note_before(&mut self) {
        let selection = self.selection.clone();
        self.doc_mut().note_selection(self.view, &selection);
    }

    fn note_after(&mut self) {
        self.sync();
        let selection = self.selection.clone();
        self.doc_mut().note_selection_after(self.view, &selection);
    }

    /// Open an undo group, remembering the selection it started from.
    pub(crate) fn begin_edit(&mut self) {
        self.note_before();
        self.doc_mut().begin_undo_group();
    }

    /// Close an undo group, remembering the selection it ended with.
    pub(crate) fn end_edit(&mut self) {
        self.doc_mut().end_undo_group();
        self.note_after();
    }

    fn ordered_range(&self, a: &Param, b: &Param) -> (usize, usize) {
        let start = self.position(a);
        let end = if b.as_int() < 0 {
            self.doc_len()
        } else {
            self.position(b)
        };
        (start.min(end), start.max(end))
    }

    fn set_text(&mut self, text: &str) {
        self.begin_edit();
        let len = self.doc_len();
        self.delete_text(0, len);
        self.insert_text(0, text);
        self.set_empty_selection(0);
        self.end_edit();
    }

    /// Text of every selection range; rectangular pieces each end with a line break.
    pub(crate) fn selected_text(&self) -> String {
        let document = self.doc();
        let buffer = document.buffer();
        let rectangular = self.selection.is_rectangular() && self.selection.count() > 1;
        let eol = document.eol_mode().as_str();
        let mut text = String::new();
        for range in self.selection.ranges() {
            text.push_str(&buffer.slice(range.start().position, range.end().position));
            if rectangular {
                text.push_str(eol);
            }
        }
        text
    }

    /// Delete the real text of every non-empty range, collapsing each to its start.
    fn clear_selection_text(&mut self) {
        for index in (0..self.selection.count()).rev() {
            let Some(range) = self.selection.range(index).copied() else {
                continue;
            };
            let (start, end) = (range.start(), range.end());
            if end.position > start.position {
                self.delete_text(start.position, end.position - start.position);
            }
            if let Some(range) = self.selection.range_mut(index) {
                *range = SelectionRange::from_positions(start, start);
            }
        }
        if self.selection.is_rectangular() {
            let ranges = self.selection.ranges();
            let caret = ranges[ranges.len() - 1].caret;
            let anchor = ranges[0].anchor;
            *self.selection.rectangular_mut() = SelectionRange::from_positions(caret, anchor);
        }
    }

    fn replace_selection(&mut self, text: &str) {
        self.begin_edit();
        self.clear_selection_text();
        let caret = self.selection.main_range().caret;
        let padded = materialize(caret, text);
        self.insert_text(caret.position, &padded);
        self.set_empty_selection(caret.position + padded.chars().count());
        self.end_edit();
    }

    /// Type `text` at the main caret, or at every caret when typing goes to all selections.
    ///
    /// Selected text is replaced and pending virtual space becomes spaces. Returns `true` when
    /// anything was inserted.
    pub(crate) fn type_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let all = self.additional_selection_typing || self.selection.is_rectangular();
        let indices: Vec<usize> = if all {
            (0..self.selection.count()).collect()
        } else {
            vec![self.selection.main()]
        };
        let grouped = indices.len() > 1
            || !self.selection.is_empty()
            || self
                .selection
                .ranges()
                .iter()
                .any(|r| r.caret.virtual_space > 0 || r.anchor.virtual_space > 0);

        if grouped {
            self.begin_edit();
        } else {
            self.note_before();
        }
        let mut inserted = false;
        for index in indices.into_iter().rev() {
            let Some(range) = self.selection.range(index).copied() else {
                continue;
            };
            let (start, end) = (range.start(), range.end());
            if end.position > start.position {
                self.delete_text(start.position, end.position - start.position);
            }
            let padded = materialize(start, text);
            if self.insert_text(start.position, &padded) {
                inserted = true;
                if let Some(range) = self.selection.range_mut(index) {
                    *range = SelectionRange::caret_at(start.position + padded.chars().count());
                }
            }
        }
        if self.selection.is_rectangular() && inserted {
            let ranges = self.selection.ranges();
            let caret = ranges[ranges.len() - 1].caret;
            let anchor = ranges[0].caret;
            *self.selection.rectangular_mut() = SelectionRange::from_positions(caret, anchor);
        }
        if grouped {
            self.end_edit();
        } else {
            self.note_after();
        }
        self.damage_selection();
        inserted
    }

    /// Type one character as the keyboard would, reporting `CharAdded`.
    pub(crate) fn add_char(&mut self, ch: char) {
        let mut buffer = [0u8; 4];
        if self.type_text(ch.encode_utf8(&mut buffer)) {
            self.queue(Notification::new(NotificationKind::CharAdded).with_char(ch));
        }
    }

    /// Type `ch` at the caret, the way a key press would.
    pub fn type_char(&mut self, ch: char) {
        self.sync();
        let before = self.selection.clone();
        self.add_char(ch);
        self.finish(&before);
    }

    fn delete_back(&mut self) {
        self.begin_edit();
        if !self.selection.is_empty() {
            self.clear_selection_text();
        } else {
            for index in (0..self.selection.count()).rev() {
                let Some(range) = self.selection.range(index).copied() else {
                    continue;
                };
                let caret = range.caret;
                if caret.virtual_space > 0 {
                    let moved = SelectionPosition::with_virtual(caret.position, caret.virtual_space - 1);
                    if let Some(range) = self.selection.range_mut(index) {
                        *range = SelectionRange::from_positions(moved, moved);
                    }
                } else if caret.position > 0 {
                    let before = self.doc().buffer().grapheme_before(caret.position);
                    self.delete_text(before, caret.position - before);
                    if let Some(range) = self.selection.range_mut(index) {
                        *range = SelectionRange::caret_at(before);
                    }
                }
            }
        }
        self.end_edit();
        self.damage_selection();
    }

    fn delete_forward(&mut self) {
        self.begin_edit();
        if !self.selection.is_empty() {
            self.clear_selection_text();
        } else {
            for index in (0..self.selection.count()).rev() {
                let Some(range) = self.selection.range(index).copied() else {
                    continue;
                };
                let caret = range.caret;
                if caret.virtual_space > 0 {
                    let moved = SelectionPosition::with_virtual(caret.position, caret.virtual_space - 1);
                    if let Some(range) = self.selection.range_mut(index) {
                        *range = SelectionRange::from_positions(moved, moved);
                    }
                } else {
                    let after = self.doc().buffer().grapheme_after(caret.position);
                    if after > caret.position {
                        self.delete_text(caret.position, after - caret.position);
                    }
                }
            }
        }
        self.end_edit();
        self.damage_selection();
    }

    // ---------------------------------------------------------------------------------------
    // Undo
    // ---------------------------------------------------------------------------------------

    fn undo(&mut self) -> bool {
        let Some(outcome) = self.doc_mut().undo() else {
            return false;
        };
        self.sync();
        match outcome.selection {
            Some(group) if group.view == self.view => self.selection = group.before,
            _ => self.set_empty_selection(outcome.position),
        }
        self.restore_selection_bounds();
        true
    }

    fn redo(&mut self) -> bool {
        let Some(outcome) = self.doc_mut().redo() else {
            return false;
        };
        self.sync();
        match outcome.selection.and_then(|group| {
            (group.view == self.view).then_some(group.after).flatten()
        }) {
            Some(after) => self.selection = after,
            None => self.set_empty_selection(outcome.position),
        }
        self.restore_selection_bounds();
        true
    }

    fn restore_selection_bounds(&mut self) {
        let len = self.doc_len();
        self.selection.clamp_to_len(len);
        self.damage_all();
    }
}

/// First `count` characters of `text`, or all of it when `count` is not positive.
pub(crate) fn leading_chars(text: &str, count: isize) -> String {
    if count > 0 {
        text.chars().take(count as usize).collect()
    } else {
        text.to_string()
    }
}

/// `text` preceded by the spaces that fill the virtual space of `position`.
fn materialize(position: SelectionPosition, text: &str) -> String {
    if position.virtual_space == 0 {
        text.to_string()
    } else {
        let mut padded = " ".repeat(position.virtual_space);
        padded.push_str(text);
        padded
    }
}

/// Split styled cells (`byte, style` pairs) into text and per-character styles.
///
/// A multi-byte character takes the style of its first byte.
pub(crate) fn decode_styled(cells: &[u8]) -> (String, Vec<u8>) {
    let bytes: Vec<u8> = cells.iter().step_by(2).copied().collect();
    let byte_styles: Vec<u8> = cells.iter().skip(1).step_by(2).copied().collect();
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let styles = match std::str::from_utf8(&bytes) {
        Ok(valid) => valid
            .char_indices()
            .map(|(offset, _)| byte_styles.get(offset).copied().unwrap_or(0))
            .collect(),
        Err(_) => vec![0; text.chars().count()],
    };
    (text, styles)
}

/// Interleave the UTF-8 bytes of `text` with the style of the character they belong to.
pub(crate) fn encode_styled(text: &str, styles: &[u8]) -> Vec<u8> {
    let mut cells = Vec::with_capacity(text.len() * 2);
    let mut buffer = [0u8; 4];
    for (index, ch) in text.chars().enumerate() {
        let style = styles.get(index).copied().unwrap_or(0);
        for byte in ch.encode_utf8(&mut buffer).bytes() {
            cells.push(byte);
            cells.push(style);
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::*;

    fn engine_with(text: &str) -> Engine {
        let mut engine = Engine::new();
        engine.dispatch(SCI_SETTEXT, 0, text);
        engine
    }

    #[test]
    fn test_styled_cells_round_trip() {
        let cells = encode_styled("aé", &[3, 4]);
        assert_eq!(cells, vec![b'a', 3, 0xC3, 4, 0xA9, 4]);
        assert_eq!(decode_styled(&cells), ("aé".to_string(), vec![3, 4]));
    }

    #[test]
    fn test_position_from_line_edges() {
        let mut engine = engine_with("ab\ncd");
        assert_eq!(engine.dispatch(SCI_POSITIONFROMLINE, 1, 0).as_int(), 3);
        assert_eq!(engine.dispatch(SCI_POSITIONFROMLINE, 2, 0).as_int(), 5);
        assert_eq!(engine.dispatch(SCI_POSITIONFROMLINE, 3, 0).as_int(), -1);
        engine.dispatch(SCI_GOTOPOS, 4, 0);
        assert_eq!(engine.dispatch(SCI_POSITIONFROMLINE, -1, 0).as_int(), 3);
    }

    #[test]
    fn test_replace_sel_replaces_and_moves_caret() {
        let mut engine = engine_with("hello world");
        engine.dispatch(SCI_SETSEL, 0, 5);
        engine.dispatch(SCI_REPLACESEL, 0, "goodbye");
        assert_eq!(engine.text(), "goodbye world");
        assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 7);
        engine.dispatch(SCI_UNDO, 0, 0);
        assert_eq!(engine.text(), "hello world");
    }

    #[test]
    fn test_delete_back_removes_grapheme() {
        let mut engine = engine_with("ae\u{301}");
        engine.dispatch(SCI_GOTOPOS, 3, 0);
        engine.dispatch(SCI_DELETEBACK, 0, 0);
        assert_eq!(engine.text(), "a");
        assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 1);
    }

    #[test]
    fn test_typing_coalesces_into_one_undo() {
        let mut engine = Engine::new();
        for ch in "abc".chars() {
            engine.type_char(ch);
        }
        assert_eq!(engine.text(), "abc");
        engine.dispatch(SCI_UNDO, 0, 0);
        assert_eq!(engine.text(), "");
        assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 0);
        engine.dispatch(SCI_REDO, 0, 0);
        assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 3);
    }

    #[test]
    fn test_read_only_blocks_edits() {
        let mut engine = engine_with("abc");
        engine.dispatch(SCI_SETREADONLY, 1, 0);
        engine.dispatch(SCI_INSERTTEXT, 0, "x");
        assert_eq!(engine.text(), "abc");
        assert_eq!(engine.dispatch(SCI_CANUNDO, 0, 0).as_int(), 0);
        assert_eq!(engine.dispatch(SCI_UNDO, 0, 0).as_int(), 0);
    }
}
