//! Caret and selection messages.

use crate::engine::Engine;
use crate::messages::{INVALID_POSITION, Message};
use crate::param::{Param, Reply};
use crate::selection::{SelectionMode, SelectionPosition, SelectionRange};

/// Which end of a range a message addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Caret,
    Anchor,
}

impl Engine {
    pub(crate) fn selection_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let reply = match message {
            Message::SetSel => {
                let caret = if b.as_int() < 0 {
                    self.doc_len()
                } else {
                    self.position(b)
                };
                let anchor = if a.as_int() < 0 { caret } else { self.position(a) };
                self.set_selection(SelectionPosition::new(caret), SelectionPosition::new(anchor));
                Reply::Int(0)
            }
            Message::SetCurrentPos => {
                let caret = self.position(a);
                let anchor = self.selection.main_range().anchor;
                self.set_selection(SelectionPosition::new(caret), anchor);
                Reply::Int(0)
            }
            Message::GetCurrentPos => self.selection.main_caret().into(),
            Message::SetAnchor => {
                let anchor = self.position(a);
                let caret = self.selection.main_range().caret;
                self.set_selection(caret, SelectionPosition::new(anchor));
                Reply::Int(0)
            }
            Message::GetAnchor => self.selection.main_anchor().into(),
            Message::SetSelectionStart => {
                let position = self.position(a);
                let caret = self.selection.main_caret().max(position);
                self.set_selection(SelectionPosition::new(caret), SelectionPosition::new(position));
                Reply::Int(0)
            }
            Message::SetSelectionEnd => {
                let position = self.position(a);
                let anchor = self.selection.main_anchor().min(position);
                self.set_selection(SelectionPosition::new(position), SelectionPosition::new(anchor));
                Reply::Int(0)
            }
            Message::GetSelectionStart => self.selection.limits().start().position.into(),
            Message::GetSelectionEnd => self.selection.limits().end().position.into(),
            Message::SetEmptySelection | Message::GotoPos => {
                let position = self.position(a);
                self.set_empty_selection(position);
                Reply::Int(0)
            }
            Message::GotoLine => {
                let line = self.line(a);
                let position = self.doc().buffer().line_start(line);
                self.set_empty_selection(position);
                Reply::Int(0)
            }
            Message::SelectAll => {
                let len = self.doc_len();
                self.selection.clear();
                self.selection.set_single(SelectionRange::new(0, len));
                self.damage_all();
                Reply::Int(0)
            }
            Message::GetSelections => self.selection.count().into(),
            Message::GetSelectionEmpty => self.selection.is_empty().into(),
            Message::ClearSelections => {
                self.damage_selection();
                self.selection.clear();
                Reply::Int(0)
            }
            Message::SetSelection => {
                let (caret, anchor) = (self.position(a), self.position(b));
                let range = SelectionRange::new(caret, anchor);
                self.damage_selection();
                self.selection.set_single(range);
                if self.selection.is_rectangular() {
                    *self.selection.rectangular_mut() = range;
                }
                self.damage_selection();
                Reply::Int(0)
            }
            Message::AddSelection => {
                let (caret, anchor) = (self.position(a), self.position(b));
                self.selection.materialize();
                self.selection.add(SelectionRange::new(caret, anchor));
                self.damage_selection();
                Reply::Int(0)
            }
            Message::SetMainSelection => {
                if let Ok(index) = usize::try_from(a.as_int()) {
                    self.selection.set_main(index);
                }
                Reply::Int(0)
            }
            Message::GetMainSelection => self.selection.main().into(),
            Message::SetSelectionNCaret => {
                self.set_nth(a, b, End::Caret);
                Reply::Int(0)
            }
            Message::SetSelectionNAnchor | Message::SetSelectionNStart => {
                self.set_nth(a, b, End::Anchor);
                Reply::Int(0)
            }
            Message::SetSelectionNEnd => {
                self.set_nth(a, b, End::Caret);
                Reply::Int(0)
            }
            Message::SetSelectionNCaretVirtualSpace => {
                self.set_nth_virtual(a, b, End::Caret);
                Reply::Int(0)
            }
            Message::SetSelectionNAnchorVirtualSpace => {
                self.set_nth_virtual(a, b, End::Anchor);
                Reply::Int(0)
            }
            Message::GetSelectionNCaret => self.nth(a, |r| r.caret.position),
            Message::GetSelectionNAnchor => self.nth(a, |r| r.anchor.position),
            Message::GetSelectionNCaretVirtualSpace => self.nth(a, |r| r.caret.virtual_space),
            Message::GetSelectionNAnchorVirtualSpace => self.nth(a, |r| r.anchor.virtual_space),
            Message::GetSelectionNStart => self.nth(a, |r| r.start().position),
            Message::GetSelectionNEnd => self.nth(a, |r| r.end().position),
            Message::SetRectangularSelectionCaret => {
                let position = self.position(a);
                self.set_rectangular_end(End::Caret, |p| p.set_position(position));
                Reply::Int(0)
            }
            Message::SetRectangularSelectionAnchor => {
                let position = self.position(a);
                self.set_rectangular_end(End::Anchor, |p| p.set_position(position));
                Reply::Int(0)
            }
            Message::SetRectangularSelectionCaretVirtualSpace => {
                let space = a.as_int().max(0) as usize;
                self.set_rectangular_end(End::Caret, |p| p.virtual_space = space);
                Reply::Int(0)
            }
            Message::SetRectangularSelectionAnchorVirtualSpace => {
                let space = a.as_int().max(0) as usize;
                self.set_rectangular_end(End::Anchor, |p| p.virtual_space = space);
                Reply::Int(0)
            }
            Message::GetRectangularSelectionCaret => self.selection.rectangular().caret.position.into(),
            Message::GetRectangularSelectionAnchor => {
                self.selection.rectangular().anchor.position.into()
            }
            Message::GetRectangularSelectionCaretVirtualSpace => {
                self.selection.rectangular().caret.virtual_space.into()
            }
            Message::GetRectangularSelectionAnchorVirtualSpace => {
                self.selection.rectangular().anchor.virtual_space.into()
            }
            Message::SetSelectionMode => {
                self.set_selection_mode(SelectionMode::from_code(a.as_int()));
                Reply::Int(0)
            }
            Message::GetSelectionMode => self.selection.mode().code().into(),
            Message::SelectionIsRectangle => self.selection.is_rectangular().into(),
            Message::GetLineSelStartPosition => self.line_selection(a, |(start, _)| start),
            Message::GetLineSelEndPosition => self.line_selection(a, |(_, end)| end),
            Message::RotateSelection => {
                self.selection.rotate_main();
                self.damage_selection();
                Reply::Int(0)
            }
            Message::SwapMainAnchorCaret => {
                self.selection.swap_main_anchor_caret();
                if self.selection.is_rectangular() {
                    self.derive_rectangular();
                }
                self.damage_selection();
                Reply::Int(0)
            }
            Message::SetVirtualSpaceOptions => {
                self.virtual_space_options = a.as_int();
                Reply::Int(0)
            }
            Message::GetVirtualSpaceOptions => self.virtual_space_options.into(),
            Message::SetMultipleSelection => {
                self.multiple_selection = a.as_int() != 0;
                Reply::Int(0)
            }
            Message::GetMultipleSelection => self.multiple_selection.into(),
            Message::SetAdditionalSelectionTyping => {
                self.additional_selection_typing = a.as_int() != 0;
                Reply::Int(0)
            }
            Message::GetAdditionalSelectionTyping => self.additional_selection_typing.into(),
            _ => return None,
        };
        Some(reply)
    }

    fn nth(&self, index: &Param, get: impl Fn(&SelectionRange) -> usize) -> Reply {
        usize::try_from(index.as_int())
            .ok()
            .and_then(|index| self.selection.range(index))
            .map(get)
            .unwrap_or(0)
            .into()
    }

    fn set_nth(&mut self, index: &Param, position: &Param, end: End) {
        let position = self.position(position);
        let Ok(index) = usize::try_from(index.as_int()) else {
            return;
        };
        if let Some(range) = self.selection.range_mut(index) {
            match end {
                End::Caret => range.caret.set_position(position),
                End::Anchor => range.anchor.set_position(position),
            }
            self.damage_selection();
        }
    }

    fn set_nth_virtual(&mut self, index: &Param, space: &Param, end: End) {
        let space = space.as_int().max(0) as usize;
        let Ok(index) = usize::try_from(index.as_int()) else {
            return;
        };
        if let Some(range) = self.selection.range_mut(index) {
            match end {
                End::Caret => range.caret.virtual_space = space,
                End::Anchor => range.anchor.virtual_space = space,
            }
        }
    }

    /// Update one end of the rectangle, entering rectangle mode from a cleared selection.
    fn set_rectangular_end(&mut self, end: End, update: impl FnOnce(&mut SelectionPosition)) {
        self.damage_selection();
        if !self.selection.is_rectangular() {
            self.selection.clear();
            self.selection.set_mode_raw(SelectionMode::Rectangle);
        }
        let rect = self.selection.rectangular_mut();
        match end {
            End::Caret => update(&mut rect.caret),
            End::Anchor => update(&mut rect.anchor),
        }
        self.derive_rectangular();
        self.damage_selection();
    }

    fn set_selection_mode(&mut self, mode: SelectionMode) {
        let main = self.selection.main_range();
        self.damage_selection();
        match mode {
            SelectionMode::Rectangle | SelectionMode::Thin => {
                if !self.selection.is_rectangular() {
                    *self.selection.rectangular_mut() = main;
                }
                self.selection.set_mode_raw(mode);
                self.derive_rectangular();
            }
            SelectionMode::Lines => {
                self.selection.set_mode_raw(mode);
                self.set_selection(main.caret, main.anchor);
            }
            SelectionMode::Stream => self.selection.set_mode_raw(mode),
        }
        self.damage_selection();
    }

    /// Part of `line` covered by the first range touching it.
    fn line_selection(&self, line: &Param, pick: impl Fn((usize, usize)) -> usize) -> Reply {
        let Some(line) = self.valid_line(line) else {
            return Reply::Int(INVALID_POSITION);
        };
        let document = self.doc();
        let buffer = document.buffer();
        let (start, end) = (buffer.line_start(line), buffer.line_end(line));
        self.selection
            .ranges()
            .iter()
            .find_map(|range| range.intersect(start, end))
            .map(|portion| Reply::from(pick(portion)))
            .unwrap_or(Reply::Int(INVALID_POSITION))
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;
    use crate::messages::*;
    use crate::selection::{SC_SEL_LINES, SC_SEL_RECTANGLE};

    fn engine_with(text: &str) -> Engine {
        let mut engine = Engine::new();
        engine.dispatch(SCI_SETTEXT, 0, text);
        engine
    }

    #[test]
    fn test_set_sel_negative_arguments() {
        let mut engine = engine_with("hello");
        engine.dispatch(SCI_SETSEL, 1, -1);
        assert_eq!(engine.dispatch(SCI_GETANCHOR, 0, 0).as_int(), 1);
        assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 5);
        engine.dispatch(SCI_SETSEL, -1, 2);
        assert_eq!(engine.dispatch(SCI_GETANCHOR, 0, 0).as_int(), 2);
    }

    #[test]
    fn test_select_all_puts_caret_at_start() {
        let mut engine = engine_with("hello");
        engine.dispatch(SCI_SELECTALL, 0, 0);
        assert_eq!(engine.dispatch(SCI_GETCURRENTPOS, 0, 0).as_int(), 0);
        assert_eq!(engine.dispatch(SCI_GETANCHOR, 0, 0).as_int(), 5);
        assert_eq!(engine.dispatch(SCI_GETSELTEXT, 0, 0).into_text(), "hello");
    }

    #[test]
    fn test_invalid_selection_index_reads_zero() {
        let mut engine = engine_with("hello");
        engine.dispatch(SCI_SETSELECTION, 3, 1);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONNCARET, 5, 0).as_int(), 0);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONNEND, 0, 0).as_int(), 3);
        engine.dispatch(SCI_SETSELECTIONNCARET, 5, 4);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 1);
    }

    #[test]
    fn test_lines_mode_snaps_to_whole_lines() {
        let mut engine = engine_with("one\ntwo\nthree");
        engine.dispatch(SCI_SETSEL, 1, 5);
        engine.dispatch(SCI_SETSELECTIONMODE, SC_SEL_LINES, 0);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONSTART, 0, 0).as_int(), 0);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONEND, 0, 0).as_int(), 7);
    }

    #[test]
    fn test_line_selection_positions() {
        let mut engine = engine_with("abcd\nefgh\nijkl");
        engine.dispatch(SCI_SETSELECTIONMODE, SC_SEL_RECTANGLE, 0);
        engine.dispatch(SCI_SETRECTANGULARSELECTIONANCHOR, 1, 0);
        engine.dispatch(SCI_SETRECTANGULARSELECTIONCARET, 13, 0);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONS, 0, 0).as_int(), 3);
        assert_eq!(engine.dispatch(SCI_GETLINESELSTARTPOSITION, 1, 0).as_int(), 6);
        assert_eq!(engine.dispatch(SCI_GETLINESELENDPOSITION, 1, 0).as_int(), 8);
        assert_eq!(engine.dispatch(SCI_GETLINESELSTARTPOSITION, 7, 0).as_int(), -1);
    }
}
