//! Undo history.
//!
//! History is a linear stack of steps tagged with group ids. Undo and redo always move whole
//! groups. Groups form three ways:
//!
//! - explicitly, between a matching pair of `begin_group` / `end_group` calls (ref-counted)
//! - by coalescing adjacent single-character insertions that allow it
//! - by coalescible container actions joining the open typing group
//!
//! The save point is an index into the stack, so it survives undo/redo and becomes
//! unreachable when the redo branch it lives on is discarded.

use crate::document::ViewId;
use crate::selection::Selection;

/// Container actions with this flag may join the surrounding typing group.
pub const UNDO_MAY_COALESCE: isize = 1;

/// Kind of an undoable action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// Text was inserted.
    Insert,
    /// Text was removed.
    Delete,
    /// Opaque host action identified by a token.
    Container,
}

/// One recorded change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoAction {
    /// What happened.
    pub kind: ActionKind,
    /// Position of the change.
    pub position: usize,
    /// Inserted or removed text.
    pub text: String,
    /// Styles of the text this action puts back: removed text for deletions, and for
    /// insertions the styles the text had when it was last undone.
    pub styles: Vec<u8>,
    /// Host token for container actions.
    pub token: isize,
    /// May merge with neighbouring actions.
    pub may_coalesce: bool,
}

impl UndoAction {
    /// An insertion of `text` at `position`.
    pub fn insert(position: usize, text: &str, may_coalesce: bool) -> Self {
        Self {
            kind: ActionKind::Insert,
            position,
            text: text.to_string(),
            styles: Vec::new(),
            token: 0,
            may_coalesce,
        }
    }

    /// A removal of `text` (styled `styles`) at `position`.
    pub fn delete(position: usize, text: String, styles: Vec<u8>) -> Self {
        Self {
            kind: ActionKind::Delete,
            position,
            text,
            styles,
            token: 0,
            may_coalesce: false,
        }
    }

    /// A host action.
    pub fn container(token: isize, may_coalesce: bool) -> Self {
        Self {
            kind: ActionKind::Container,
            position: 0,
            text: String::new(),
            styles: Vec::new(),
            token,
            may_coalesce,
        }
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Returns `true` for actions without text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn is_typing(&self) -> bool {
        self.kind == ActionKind::Insert
            && self.may_coalesce
            && self.len() == 1
            && !self.text.contains(['\n', '\r'])
    }

    fn is_typing_run(&self) -> bool {
        self.kind == ActionKind::Insert && self.may_coalesce && !self.text.contains(['\n', '\r'])
    }

    fn chains(&self) -> bool {
        self.is_typing() || (self.kind == ActionKind::Container && self.may_coalesce)
    }
}

/// Selection captured around a group, tagged with the engine that made the edit.
#[derive(Debug, Clone)]
pub struct GroupSelection {
    /// Engine that opened the group.
    pub view: ViewId,
    /// Selection before the first action.
    pub before: Selection,
    /// Selection after the last action.
    pub after: Option<Selection>,
}

#[derive(Debug, Clone)]
struct UndoStep {
    group_id: usize,
    action: UndoAction,
    selection: Option<GroupSelection>,
}

/// A group popped by undo or redo, in the order its actions must be replayed.
#[derive(Debug, Clone)]
pub struct ReplayGroup {
    /// Actions to replay.
    pub actions: Vec<UndoAction>,
    /// Selection recorded for the group.
    pub selection: Option<GroupSelection>,
}

/// Linear undo/redo history with ref-counted grouping.
#[derive(Debug)]
pub struct UndoHistory {
    undo_stack: Vec<UndoStep>,
    redo_stack: Vec<UndoStep>,
    undo_groups: usize,
    max_undo: usize,
    save_index: Option<usize>,
    next_group_id: usize,
    open_group_id: Option<usize>,
    depth: usize,
    collecting: bool,
    pending_selection: Option<(ViewId, Selection)>,
}

impl UndoHistory {
    /// Empty history keeping at most `max_undo` groups' worth of steps.
    pub fn new(max_undo: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            undo_groups: 0,
            max_undo: max_undo.max(1),
            save_index: Some(0),
            next_group_id: 0,
            open_group_id: None,
            depth: 0,
            collecting: true,
            pending_selection: None,
        }
    }

    /// Whether new actions are recorded.
    pub fn is_collecting(&self) -> bool {
        self.collecting
    }

    /// Turn recording on or off.
    pub fn set_collecting(&mut self, collecting: bool) {
        self.collecting = collecting;
        if !collecting {
            self.open_group_id = None;
        }
    }

    /// Returns `true` if there is a group to undo.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns `true` if there is a group to redo.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Steps available to undo.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Steps available to redo.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Current nesting of explicit groups.
    pub fn group_depth(&self) -> usize {
        self.depth
    }

    /// Returns `true` at the save point.
    pub fn is_save_point(&self) -> bool {
        self.save_index == Some(self.undo_stack.len())
    }

    /// Mark the current state as saved. Seals the open typing group.
    pub fn set_save_point(&mut self) {
        self.save_index = Some(self.undo_stack.len());
        if self.depth == 0 {
            self.open_group_id = None;
        }
    }

    /// Open an explicit group. Nested calls only bump the count.
    pub fn begin_group(&mut self) {
        if self.depth == 0 {
            self.open_group_id = None;
        }
        self.depth += 1;
    }

    /// Close an explicit group. The outermost close seals it.
    pub fn end_group(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.depth == 0 {
            self.open_group_id = None;
        }
    }

    /// Forget every step. The current state becomes the save point.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.undo_groups = 0;
        self.save_index = Some(0);
        self.open_group_id = None;
        self.pending_selection = None;
    }

    /// Remember the selection to attach to the next group that starts.
    pub fn note_selection(&mut self, view: ViewId, selection: Selection) {
        self.pending_selection = Some((view, selection));
    }

    /// Attach the selection after the most recent group, if `view` opened it.
    pub fn note_selection_after(&mut self, view: ViewId, selection: Selection) {
        let Some(last_group) = self.undo_stack.last().map(|s| s.group_id) else {
            return;
        };
        let first = self
            .undo_stack
            .iter()
            .rposition(|s| s.group_id != last_group)
            .map(|i| i + 1)
            .unwrap_or(0);
        if let Some(group) = self.undo_stack[first].selection.as_mut()
            && group.view == view
        {
            group.after = Some(selection);
        }
    }

    fn clear_redo(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }
        if let Some(save_index) = self.save_index
            && save_index > self.undo_stack.len()
        {
            self.save_index = None;
        }
        self.redo_stack.clear();
    }

    fn trim_oldest_group(&mut self) {
        let Some(first_group) = self.undo_stack.first().map(|s| s.group_id) else {
            return;
        };
        let removed = self
            .undo_stack
            .iter()
            .take_while(|s| s.group_id == first_group)
            .count();
        self.undo_stack.drain(..removed);
        self.undo_groups -= 1;
        self.save_index = match self.save_index {
            Some(index) if index >= removed => Some(index - removed),
            _ => None,
        };
    }

    /// Record an action. Returns `true` when it starts a new group.
    pub fn record(&mut self, action: UndoAction) -> bool {
        if !self.collecting {
            return false;
        }
        self.clear_redo();

        let open = self.open_group_id;
        let chaining = open.is_some() && self.depth == 0 && !self.is_save_point();
        if chaining
            && action.is_typing()
            && let Some(last) = self.undo_stack.last_mut()
            && Some(last.group_id) == open
            && last.action.is_typing_run()
            && last.action.position + last.action.len() == action.position
        {
            last.action.text.push_str(&action.text);
            return false;
        }

        let joins = match open {
            Some(_) if self.depth > 0 => true,
            Some(_) => chaining && action.chains() && self.continues_chain(&action),
            None => false,
        };
        let (group_id, starts) = match open {
            Some(group_id) if joins => (group_id, false),
            _ => {
                let group_id = self.next_group_id;
                self.next_group_id = self.next_group_id.wrapping_add(1);
                (group_id, true)
            }
        };

        if starts {
            while self.undo_groups >= self.max_undo && !self.undo_stack.is_empty() {
                self.trim_oldest_group();
            }
            self.undo_groups += 1;
        }

        self.open_group_id = if self.depth > 0 || action.chains() {
            Some(group_id)
        } else {
            None
        };

        let selection = if starts {
            self.pending_selection
                .take()
                .map(|(view, before)| GroupSelection {
                    view,
                    before,
                    after: None,
                })
        } else {
            None
        };

        self.undo_stack.push(UndoStep {
            group_id,
            action,
            selection,
        });
        starts
    }

    /// A typed insertion only continues the chain right after a container action; adjacent
    /// typing was merged already.
    fn continues_chain(&self, action: &UndoAction) -> bool {
        match action.kind {
            ActionKind::Container => true,
            _ => self
                .undo_stack
                .last()
                .is_some_and(|last| last.action.kind == ActionKind::Container),
        }
    }

    fn pop_group(stack: &mut Vec<UndoStep>) -> Option<Vec<UndoStep>> {
        let last_group_id = stack.last().map(|s| s.group_id)?;
        let mut steps = Vec::new();
        while stack.last().is_some_and(|s| s.group_id == last_group_id) {
            if let Some(step) = stack.pop() {
                steps.push(step);
            }
        }
        Some(steps)
    }

    /// Pop the latest group for undo. Actions come newest first.
    pub fn undo(&mut self) -> Option<ReplayGroup> {
        self.open_group_id = None;
        let steps = Self::pop_group(&mut self.undo_stack)?;
        self.undo_groups -= 1;
        let selection = steps.last().and_then(|s| s.selection.clone());
        let actions = steps.iter().map(|s| s.action.clone()).collect();
        // Redo stack keeps oldest-first order within a group.
        self.redo_stack.extend(steps.into_iter().rev());
        Some(ReplayGroup { actions, selection })
    }

    /// Store the styles that insertions of the group just undone carried, so redo restores
    /// them. `styles` follows the replay order of [`UndoHistory::undo`], newest first.
    pub fn keep_undone_styles(&mut self, styles: Vec<Option<Vec<u8>>>) {
        let Some(start) = self.redo_stack.len().checked_sub(styles.len()) else {
            return;
        };
        let group = &mut self.redo_stack[start..];
        for (step, captured) in group.iter_mut().rev().zip(styles) {
            if let Some(captured) = captured
                && step.action.kind == ActionKind::Insert
            {
                step.action.styles = captured;
            }
        }
    }

    /// Pop the latest undone group for redo. Actions come oldest first.
    pub fn redo(&mut self) -> Option<ReplayGroup> {
        self.open_group_id = None;
        let mut steps = Self::pop_group(&mut self.redo_stack)?;
        self.undo_groups += 1;
        steps.reverse();
        let selection = steps.first().and_then(|s| s.selection.clone());
        let actions = steps.iter().map(|s| s.action.clone()).collect();
        self.undo_stack.extend(steps);
        Some(ReplayGroup { actions, selection })
    }
}
