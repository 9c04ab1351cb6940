//! Target and search messages.
//!
//! The target is a character range that search narrows and replacement rewrites. Searches
//! running backwards swap the range ends: a target whose start is past its end searches
//! `[end, start)` and finds the last match.

use crate::edit::leading_chars;
use crate::engine::Engine;
use crate::messages::{INVALID_POSITION, Message, SC_STATUS_WARN_REGEX};
use crate::param::{Param, Reply};
use crate::search::{SearchMatch, SearchOptions, expand_replacement, find_in_range};
use crate::selection::SelectionPosition;

impl Engine {
    pub(crate) fn target_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let reply = match message {
            Message::SetTargetStart => {
                self.target_start = self.position(a);
                Reply::Int(0)
            }
            Message::GetTargetStart => self.target_start.into(),
            Message::SetTargetEnd => {
                self.target_end = self.position(a);
                Reply::Int(0)
            }
            Message::GetTargetEnd => self.target_end.into(),
            Message::SetTargetRange => {
                self.target_start = self.position(a);
                self.target_end = self.position(b);
                Reply::Int(0)
            }
            Message::TargetFromSelection => {
                let range = self.selection.main_range();
                self.target_start = range.start().position;
                self.target_end = range.end().position;
                Reply::Int(0)
            }
            Message::TargetWholeDocument => {
                self.target_start = 0;
                self.target_end = self.doc_len();
                Reply::Int(0)
            }
            Message::GetTargetText => {
                let start = self.target_start.min(self.target_end);
                let end = self.target_start.max(self.target_end);
                self.doc().buffer().slice(start, end).into()
            }
            Message::SetSearchFlags => {
                self.search_flags = a.as_int();
                Reply::Int(0)
            }
            Message::GetSearchFlags => self.search_flags.into(),
            Message::SearchInTarget => {
                let query = leading_chars(&b.as_text(), a.as_int());
                let found = self.search(&query, self.search_flags, self.target_start, self.target_end);
                match found {
                    Some(found) => {
                        self.target_start = found.start;
                        self.target_end = found.end;
                        self.last_groups = found.groups;
                        found.start.into()
                    }
                    None => Reply::Int(INVALID_POSITION),
                }
            }
            Message::ReplaceTarget => {
                let text = leading_chars(&b.as_text(), a.as_int());
                self.replace_target(&text).into()
            }
            Message::ReplaceTargetRe => {
                let template = leading_chars(&b.as_text(), a.as_int());
                let text = expand_replacement(&template, &self.last_groups);
                self.replace_target(&text).into()
            }
            Message::SearchAnchor => {
                self.search_anchor = self.selection.main_range().start().position;
                Reply::Int(0)
            }
            Message::SearchNext | Message::SearchPrev => {
                let query = b.as_text();
                let end = if message == Message::SearchNext {
                    self.doc_len()
                } else {
                    0
                };
                match self.search(&query, a.as_int(), self.search_anchor, end) {
                    Some(found) => {
                        self.set_selection(
                            SelectionPosition::new(found.start),
                            SelectionPosition::new(found.end),
                        );
                        let line = self.doc().buffer().line_of(found.start);
                        self.ensure_visible(line);
                        found.start.into()
                    }
                    None => Reply::Int(INVALID_POSITION),
                }
            }
            _ => return None,
        };
        Some(reply)
    }

    /// Run one search; an invalid pattern sets the regex warning status.
    ///
    /// Only the searched range is copied out of the rope, widened to the start of its first
    /// line for anchors and by one character at the end for word checks.
    fn search(&mut self, query: &str, flags: isize, start: usize, end: usize) -> Option<SearchMatch> {
        let (result, base) = {
            let document = self.doc();
            let buffer = document.buffer();
            let len = buffer.len();
            let lo = start.min(end).min(len);
            let hi = start.max(end).min(len);
            let base = buffer.line_start(buffer.line_of(lo));
            let window = buffer.slice(base, (hi + 1).min(len));
            let (from, to) = if start <= end {
                (lo - base, hi - base)
            } else {
                (hi - base, lo - base)
            };
            let result = find_in_range(
                &window,
                query,
                SearchOptions::from_flags(flags),
                document.classifier(),
                from,
                to,
            );
            (result, base)
        };
        match result {
            Ok(found) => found.map(|mut found| {
                found.start += base;
                found.end += base;
                found
            }),
            Err(err) => {
                tracing::warn!(target: "engine.search", %err, "search failed");
                self.status = SC_STATUS_WARN_REGEX;
                None
            }
        }
    }

    /// Replace the target with `text` as one undo step; the target then covers the new text.
    fn replace_target(&mut self, text: &str) -> usize {
        let start = self.target_start.min(self.target_end);
        let end = self.target_start.max(self.target_end);
        let length = text.chars().count();
        self.begin_edit();
        if end > start {
            self.delete_text(start, end - start);
        }
        let inserted = self.insert_text(start, text);
        self.end_edit();
        tracing::debug!(target: "engine.search", start, end, length, "target replaced");
        self.target_start = start;
        self.target_end = if inserted { start + length } else { start };
        length
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Engine;
    use crate::messages::*;
    use crate::param::Reply;
    use crate::search::{SCFIND_MATCHCASE, SCFIND_REGEXP, SCFIND_WHOLEWORD};

    fn engine_with(text: &str) -> Engine {
        let mut engine = Engine::new();
        engine.dispatch(SCI_SETTEXT, 0, text);
        engine
    }

    #[test]
    fn test_search_in_target_narrows_target() {
        let mut engine = engine_with("hello world");
        engine.dispatch(SCI_SETTARGETRANGE, 0, 5);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "world").as_int(), -1);
        engine.dispatch(SCI_TARGETWHOLEDOCUMENT, 0, 0);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "world").as_int(), 6);
        assert_eq!(engine.target(), (6, 11));
    }

    #[test]
    fn test_replace_target_with_groups() {
        let mut engine = engine_with("key = value");
        engine.dispatch(SCI_SETSEARCHFLAGS, SCFIND_REGEXP | SCFIND_MATCHCASE, 0);
        engine.dispatch(SCI_TARGETWHOLEDOCUMENT, 0, 0);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, r"(\w+) = (\w+)").as_int(), 0);
        assert_eq!(engine.dispatch(SCI_REPLACETARGETRE, -1, r"\2 = \1").as_int(), 11);
        assert_eq!(engine.text(), "value = key");
        assert_eq!(engine.target(), (0, 11));
        engine.dispatch(SCI_UNDO, 0, 0);
        assert_eq!(engine.text(), "key = value");
    }

    #[test]
    fn test_search_inside_a_line_sees_its_neighbours() {
        let mut engine = engine_with("foo foobar\nbar foo");
        engine.dispatch(SCI_SETSEARCHFLAGS, SCFIND_WHOLEWORD, 0);
        engine.dispatch(SCI_SETTARGETRANGE, 4, 7);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "foo").as_int(), -1);
        engine.dispatch(SCI_SETTARGETRANGE, 12, 18);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "foo").as_int(), 15);
        assert_eq!(engine.target(), (15, 18));

        engine.dispatch(SCI_SETSEARCHFLAGS, SCFIND_REGEXP, 0);
        engine.dispatch(SCI_SETTARGETRANGE, 4, 10);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "^foo").as_int(), -1);
        engine.dispatch(SCI_SETTARGETRANGE, 18, 11);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "^bar").as_int(), 11);
    }

    #[test]
    fn test_invalid_regex_sets_status() {
        let mut engine = engine_with("abc");
        engine.dispatch(SCI_SETSEARCHFLAGS, SCFIND_REGEXP, 0);
        engine.dispatch(SCI_TARGETWHOLEDOCUMENT, 0, 0);
        assert_eq!(engine.dispatch(SCI_SEARCHINTARGET, 0, "(").as_int(), -1);
        assert_eq!(engine.status(), SC_STATUS_WARN_REGEX);
    }

    #[test]
    fn test_search_next_and_prev_select_match() {
        let mut engine = engine_with("one two one two");
        engine.dispatch(SCI_GOTOPOS, 5, 0);
        engine.dispatch(SCI_SEARCHANCHOR, 0, 0);
        assert_eq!(engine.dispatch(SCI_SEARCHNEXT, 0, "one").as_int(), 8);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONSTART, 0, 0).as_int(), 8);
        assert_eq!(engine.dispatch(SCI_GETSELECTIONEND, 0, 0).as_int(), 11);
        assert_eq!(engine.dispatch(SCI_SEARCHPREV, 0, "one").as_int(), 0);
        assert_eq!(
            engine.dispatch(SCI_GETSELTEXT, 0, 0),
            Reply::Text("one".to_string())
        );
    }
}
