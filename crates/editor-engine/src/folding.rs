//! Fold level and contraction messages.
//!
//! Fold levels live in the document; visibility and expansion live in each engine's
//! [`Contraction`](crate::contraction::Contraction). Every change to visibility repaints the
//! whole view since display line numbers shift.

use crate::contraction::{FoldAction, SC_FOLDACTION_CONTRACT_EVERY_LEVEL};
use crate::engine::Engine;
use crate::fold_levels::is_header;
use crate::messages::{INVALID_POSITION, Message};
use crate::notify::{SCMOD_CTRL, SCMOD_SHIFT};
use crate::param::{Param, Reply};

impl Engine {
    pub(crate) fn fold_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let reply = match message {
            Message::VisibleFromDocLine => {
                let line = a.as_int();
                if line < 0 {
                    Reply::Int(0)
                } else if line as usize >= self.contraction.lines_in_doc() {
                    self.contraction.lines_displayed().into()
                } else {
                    self.contraction.display_from_doc(line as usize).into()
                }
            }
            Message::DocLineFromVisible => self
                .contraction
                .doc_from_display(a.as_int().max(0) as usize)
                .into(),
            Message::SetFoldLevel => match self.valid_line(a) {
                Some(line) => {
                    let level = b.as_int() as i32;
                    let previous = self.doc_mut().set_fold_level(line, level);
                    previous.into()
                }
                None => Reply::Int(0),
            },
            Message::GetFoldLevel => match self.valid_line(a) {
                Some(line) => self.doc().levels().level(line).into(),
                None => Reply::Int(0),
            },
            Message::GetLastChild => {
                let line = self.line(a);
                let level = b.as_int();
                let level = (level >= 0).then_some(level as i32);
                self.doc().levels().last_child(line, level, None).into()
            }
            Message::GetFoldParent => {
                let line = self.line(a);
                match self.doc().levels().fold_parent(line) {
                    Some(parent) => parent.into(),
                    None => Reply::Int(INVALID_POSITION),
                }
            }
            Message::ShowLines => {
                let (start, end) = (self.line(a), self.line(b));
                let changed = self.contraction.set_visible(start, end, true);
                self.visibility_changed(changed);
                Reply::Int(0)
            }
            Message::HideLines => {
                let (start, end) = (self.line(a), self.line(b));
                if start > 0 {
                    let changed = self.contraction.set_visible(start, end, false);
                    self.visibility_changed(changed);
                }
                Reply::Int(0)
            }
            Message::GetLineVisible => match self.valid_line(a) {
                Some(line) => self.contraction.visible(line).into(),
                None => Reply::Int(1),
            },
            Message::GetAllLinesVisible => (!self.contraction.hidden_lines()).into(),
            Message::SetFoldExpanded => {
                if let Some(line) = self.valid_line(a)
                    && self.contraction.set_expanded(line, b.as_int() != 0)
                {
                    self.damage_all();
                }
                Reply::Int(0)
            }
            Message::GetFoldExpanded => match self.valid_line(a) {
                Some(line) => self.contraction.expanded(line).into(),
                None => Reply::Int(0),
            },
            Message::ToggleFold => {
                if let Some(line) = self.valid_line(a) {
                    self.fold_line(line, FoldAction::Toggle);
                }
                Reply::Int(0)
            }
            Message::FoldLine => {
                if let (Some(line), Some(action)) =
                    (self.valid_line(a), FoldAction::from_code(b.as_int()))
                {
                    self.fold_line(line, action);
                }
                Reply::Int(0)
            }
            Message::FoldChildren => {
                if let (Some(line), Some(action)) =
                    (self.valid_line(a), FoldAction::from_code(b.as_int()))
                {
                    let level = self.doc().levels().level(line);
                    self.fold_expand(line, action, level);
                }
                Reply::Int(0)
            }
            Message::ExpandChildren => {
                if let Some(line) = self.valid_line(a) {
                    self.fold_expand(line, FoldAction::Expand, b.as_int() as i32);
                }
                Reply::Int(0)
            }
            Message::FoldAll => {
                let code = a.as_int();
                if let Some(action) = FoldAction::from_code(code) {
                    let every_level = code & SC_FOLDACTION_CONTRACT_EVERY_LEVEL != 0;
                    self.fold_all(action, every_level);
                }
                Reply::Int(0)
            }
            Message::ContractedFoldNext => {
                let start = a.as_int();
                if start < 0 {
                    return Some(Reply::Int(INVALID_POSITION));
                }
                match self.contraction.contracted_next(start as usize) {
                    Some(line) => line.into(),
                    None => Reply::Int(INVALID_POSITION),
                }
            }
            Message::EnsureVisible | Message::EnsureVisibleEnforcePolicy => {
                if let Some(line) = self.valid_line(a) {
                    self.ensure_visible(line);
                }
                Reply::Int(0)
            }
            Message::SetAutomaticFold => {
                self.automatic_fold = a.as_int();
                Reply::Int(0)
            }
            Message::GetAutomaticFold => self.automatic_fold.into(),
            Message::SetFoldFlags => {
                self.fold_flags = a.as_int();
                self.damage_all();
                Reply::Int(0)
            }
            Message::WrapCount => match self.valid_line(a) {
                Some(line) if self.contraction.visible(line) => {
                    self.surface().wrap_count(line).into()
                }
                _ => Reply::Int(0),
            },
            _ => return None,
        };
        Some(reply)
    }

    fn visibility_changed(&mut self, changed: bool) {
        if changed {
            tracing::debug!(
                target: "engine.fold",
                displayed = self.contraction.lines_displayed(),
                "visibility changed"
            );
            self.damage_all();
        }
    }

    pub(crate) fn fold_line(&mut self, line: usize, action: FoldAction) {
        let changed = {
            let document = self.document.borrow();
            self.contraction.fold_line(document.levels(), line, action)
        };
        self.visibility_changed(changed);
        // Expansion flags can change without visibility.
        self.damage_all();
    }

    fn fold_expand(&mut self, line: usize, action: FoldAction, level: i32) {
        let changed = {
            let document = self.document.borrow();
            self.contraction
                .fold_expand(document.levels(), line, action, level)
        };
        self.visibility_changed(changed);
        self.damage_all();
    }

    fn fold_all(&mut self, action: FoldAction, every_level: bool) {
        let changed = {
            let document = self.document.borrow();
            self.contraction
                .fold_all(document.levels(), action, every_level)
        };
        self.visibility_changed(changed);
        self.damage_all();
    }

    pub(crate) fn ensure_visible(&mut self, line: usize) {
        let changed = {
            let document = self.document.borrow();
            self.contraction.ensure_line_visible(document.levels(), line)
        };
        self.visibility_changed(changed);
    }

    /// Fold action for a click on a fold margin line.
    ///
    /// Shift with control toggles every fold; on a header, shift expands the whole subtree,
    /// control toggles the subtree and a plain click toggles the header.
    pub(crate) fn fold_margin_click(&mut self, line: usize, modifiers: i32) {
        let shift = modifiers & SCMOD_SHIFT != 0;
        let ctrl = modifiers & SCMOD_CTRL != 0;
        if shift && ctrl {
            self.fold_all(FoldAction::Toggle, false);
            return;
        }
        let level = self.doc().levels().level(line);
        if !is_header(level) {
            return;
        }
        if shift {
            self.fold_expand(line, FoldAction::Expand, level);
        } else if ctrl {
            self.fold_expand(line, FoldAction::Toggle, level);
        } else {
            self.fold_line(line, FoldAction::Toggle);
        }
    }
}
