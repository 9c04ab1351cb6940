//! Shared documents.
//!
//! A [`Document`] owns everything that belongs to the text rather than to a view: characters,
//! per-position styles, indicators, fold levels, line states, margin and annotation text,
//! character classes and undo history. Engines attach to a document through a
//! [`DocumentHandle`] and each gets a journal slot; every mutation appends a
//! [`DocumentEvent`] to every slot, and an engine drains its slot to bring its own view state
//! (selection, target, contraction) back in sync.
//!
//! Mutation methods never call out to host code, so no borrow of the document is ever held
//! across a notification.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::annotations::LineAnnotations;
use crate::buffer::{TextBuffer, count_line_breaks};
use crate::char_class::{CharClass, CharClassifier};
use crate::decorations::{Decorations, INDIC_MAX};
use crate::delta::{
    DocumentEvent, Modification, SC_LASTSTEPINUNDOREDO, SC_MOD_CHANGEANNOTATION,
    SC_MOD_CHANGEFOLD, SC_MOD_CHANGEINDICATOR, SC_MOD_CHANGELINESTATE, SC_MOD_CHANGEMARGIN,
    SC_MOD_CHANGESTYLE, SC_MOD_CONTAINER, SC_MULTILINEUNDOREDO, SC_MULTISTEPUNDOREDO,
    SC_PERFORMED_REDO, SC_PERFORMED_UNDO, SC_PERFORMED_USER, SC_STARTACTION,
};
use crate::fold_levels::{FoldLevels, LevelChange};
use crate::line_ending::EolMode;
use crate::selection::Selection;
use crate::undo::{ActionKind, GroupSelection, UNDO_MAY_COALESCE, UndoAction, UndoHistory};

static NEXT_VIEW_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of an engine, used to tag journal slots and undo selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u64);

impl ViewId {
    /// A fresh, process-unique id.
    pub fn next() -> Self {
        Self(NEXT_VIEW_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Result of an undo or redo step.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Selection recorded with the group.
    pub selection: Option<GroupSelection>,
    /// Caret for views without a recorded selection: the last change position, after the
    /// text when text was put back.
    pub position: usize,
}

/// Text plus every piece of state shared by the views of that text.
#[derive(Debug)]
pub struct Document {
    buffer: TextBuffer,
    styles: Vec<u8>,
    end_styled: usize,
    styling_position: usize,
    styling_mask: u8,
    decorations: Decorations,
    levels: FoldLevels,
    line_states: Vec<i32>,
    margins: LineAnnotations,
    annotations: LineAnnotations,
    classifier: CharClassifier,
    undo: UndoHistory,
    read_only: bool,
    tab_width: usize,
    eol_mode: EolMode,
    ref_count: usize,
    journals: BTreeMap<ViewId, Vec<DocumentEvent>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new(8, EolMode::default(), 1000)
    }
}

impl Document {
    /// An empty document.
    pub fn new(tab_width: usize, eol_mode: EolMode, undo_limit: usize) -> Self {
        Self {
            buffer: TextBuffer::new(),
            styles: Vec::new(),
            end_styled: 0,
            styling_position: 0,
            styling_mask: 0xFF,
            decorations: Decorations::new(0),
            levels: FoldLevels::new(1),
            line_states: Vec::new(),
            margins: LineAnnotations::new(),
            annotations: LineAnnotations::new(),
            classifier: CharClassifier::new(),
            undo: UndoHistory::new(undo_limit),
            read_only: false,
            tab_width: tab_width.max(1),
            eol_mode,
            ref_count: 0,
            journals: BTreeMap::new(),
        }
    }

    // ---------------------------------------------------------------------------------------
    // Attachment and reference counting
    // ---------------------------------------------------------------------------------------

    /// Register a journal slot for `view` and take a reference.
    pub fn attach(&mut self, view: ViewId) {
        self.journals.entry(view).or_default();
        self.ref_count += 1;
        tracing::debug!(target: "engine.document", view = view.get(), refs = self.ref_count, "view attached");
    }

    /// Drop the journal slot of `view` and its reference.
    pub fn detach(&mut self, view: ViewId) {
        if self.journals.remove(&view).is_some() {
            self.ref_count = self.ref_count.saturating_sub(1);
        }
        tracing::debug!(target: "engine.document", view = view.get(), refs = self.ref_count, "view detached");
    }

    /// Number of attached views.
    pub fn view_count(&self) -> usize {
        self.journals.len()
    }

    /// Take a host reference. Returns the new count.
    pub fn add_ref(&mut self) -> usize {
        self.ref_count += 1;
        tracing::debug!(target: "engine.document", refs = self.ref_count, "reference added");
        self.ref_count
    }

    /// Release a host reference. Returns the remaining count.
    pub fn release(&mut self) -> usize {
        self.ref_count = self.ref_count.saturating_sub(1);
        tracing::debug!(target: "engine.document", refs = self.ref_count, "reference released");
        self.ref_count
    }

    /// Current reference count.
    pub fn ref_count(&self) -> usize {
        self.ref_count
    }

    /// Drain the events queued for `view`.
    pub fn take_events(&mut self, view: ViewId) -> Vec<DocumentEvent> {
        self.journals
            .get_mut(&view)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    fn broadcast(&mut self, event: DocumentEvent) {
        let mut slots = self.journals.values_mut().peekable();
        while let Some(slot) = slots.next() {
            if slots.peek().is_some() {
                slot.push(event.clone());
            } else {
                slot.push(event);
                break;
            }
        }
    }

    fn notify_save_point(&mut self, was_save_point: bool) {
        let now = self.undo.is_save_point();
        if now != was_save_point {
            self.broadcast(DocumentEvent::SavePoint(now));
        }
    }

    // ---------------------------------------------------------------------------------------
    // Text
    // ---------------------------------------------------------------------------------------

    /// The character store.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns `true` for an empty document.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Full text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Whether edits are refused.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Refuse or allow edits.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Tab width in columns.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Set the tab width; zero is ignored.
    pub fn set_tab_width(&mut self, tab_width: usize) -> bool {
        if tab_width == 0 || tab_width == self.tab_width {
            return false;
        }
        self.tab_width = tab_width;
        true
    }

    /// Line ending used for new lines.
    pub fn eol_mode(&self) -> EolMode {
        self.eol_mode
    }

    /// Change the line ending used for new lines.
    pub fn set_eol_mode(&mut self, mode: EolMode) {
        self.eol_mode = mode;
    }

    /// Insert `text` at `position`. Returns `false` when nothing was inserted.
    pub fn insert(&mut self, position: usize, text: &str) -> bool {
        self.insert_styled(position, text, &[])
    }

    /// Insert `text` with per-character `styles` (missing styles are 0).
    pub fn insert_styled(&mut self, position: usize, text: &str, styles: &[u8]) -> bool {
        if self.read_only {
            self.broadcast(DocumentEvent::ModifyAttempt);
            return false;
        }
        if text.is_empty() {
            return false;
        }
        let was_save_point = self.undo.is_save_point();
        self.apply_insert(position, text, styles, SC_PERFORMED_USER, true);
        self.notify_save_point(was_save_point);
        true
    }

    /// Delete `length` characters at `position`. Returns `false` when nothing was deleted.
    pub fn delete(&mut self, position: usize, length: usize) -> bool {
        if self.read_only {
            self.broadcast(DocumentEvent::ModifyAttempt);
            return false;
        }
        let was_save_point = self.undo.is_save_point();
        let deleted = self.apply_delete(position, length, SC_PERFORMED_USER, true);
        self.notify_save_point(was_save_point);
        deleted
    }

    fn apply_insert(&mut self, position: usize, text: &str, styles: &[u8], performed: u32, record: bool) {
        let position = position.min(self.len());
        let line = self.buffer.line_of(position);
        let level_before = self.levels.level(line);
        let count = text.chars().count();

        let lines_added = self.buffer.insert(position, text);
        let inserted_styles = (0..count).map(|i| styles.get(i).copied().unwrap_or(0));
        self.styles.splice(position..position, inserted_styles);
        self.decorations.insert_space(position, count);
        if lines_added > 0 {
            self.insert_line_data(line, lines_added as usize);
        } else if lines_added < 0 {
            self.remove_line_data(line, lines_added.unsigned_abs());
        }
        self.end_styled = self.end_styled.min(position);

        let mut flags = performed;
        if record && self.undo.record(UndoAction::insert(position, text, true)) {
            flags |= SC_STARTACTION;
        }
        let mut modification = Modification::insert(position, text, lines_added, flags);
        modification.line = line;
        self.broadcast(DocumentEvent::Modified(modification));
        self.journal_level_change(line, level_before);
        debug_assert_eq!(self.styles.len(), self.len());
    }

    fn apply_delete(&mut self, position: usize, length: usize, performed: u32, record: bool) -> bool {
        let len = self.len();
        let end = position.saturating_add(length).min(len);
        if position >= end {
            return false;
        }
        let line = self.buffer.line_of(position);
        let level_before = self.levels.level(line);
        let removed_styles: Vec<u8> = self.styles.drain(position..end).collect();
        let (text, lines_added) = self.buffer.delete(position, end);
        self.decorations.delete_range(position, end - position);
        if lines_added < 0 {
            self.remove_line_data(line, lines_added.unsigned_abs());
        } else if lines_added > 0 {
            self.insert_line_data(line, lines_added as usize);
        }
        self.end_styled = self.end_styled.min(position);

        let mut flags = performed;
        if record && self.undo.record(UndoAction::delete(position, text.clone(), removed_styles)) {
            flags |= SC_STARTACTION;
        }
        let mut modification = Modification::delete(position, &text, lines_added, flags);
        modification.line = line;
        self.broadcast(DocumentEvent::Modified(modification));
        self.journal_level_change(line, level_before);
        debug_assert_eq!(self.styles.len(), self.len());
        true
    }

    fn insert_line_data(&mut self, line: usize, count: usize) {
        self.levels.insert_lines(line, count);
        let at = line + 1;
        if at < self.line_states.len() {
            self.line_states
                .splice(at..at, std::iter::repeat_n(0, count));
        }
        self.margins.insert_lines(line, count);
        self.annotations.insert_lines(line, count);
    }

    fn remove_line_data(&mut self, line: usize, count: usize) {
        self.levels.remove_lines(line, count);
        let at = line + 1;
        if at < self.line_states.len() {
            let end = (at + count).min(self.line_states.len());
            self.line_states.drain(at..end);
        }
        self.margins.remove_lines(line, count);
        self.annotations.remove_lines(line, count);
    }

    fn journal_level_change(&mut self, line: usize, before: i32) {
        if line >= self.levels.len() {
            return;
        }
        let now = self.levels.level(line);
        if now != before {
            self.journal_fold(LevelChange {
                line,
                prev: before,
                now,
            });
        }
    }

    fn journal_fold(&mut self, change: LevelChange) {
        let mut modification = Modification::line(SC_MOD_CHANGEFOLD, change.line);
        modification.position = self.buffer.line_start(change.line);
        modification.fold_level_now = change.now;
        modification.fold_level_prev = change.prev;
        self.broadcast(DocumentEvent::Modified(modification));
    }

    /// Rewrite every line break to `mode` as one undo group.
    pub fn convert_eols(&mut self, mode: EolMode) {
        if self.read_only {
            self.broadcast(DocumentEvent::ModifyAttempt);
            return;
        }
        let target = mode.as_str();
        let target_len = target.chars().count();
        self.begin_undo_group();
        let mut position = 0;
        while position < self.len() {
            let break_len = match self.buffer.char_at(position) {
                Some('\r') if self.buffer.char_at(position + 1) == Some('\n') => 2,
                Some('\r') | Some('\n') => 1,
                _ => {
                    position += 1;
                    continue;
                }
            };
            if self.buffer.slice(position, position + break_len) == target {
                position += break_len;
            } else {
                self.delete(position, break_len);
                self.insert(position, target);
                position += target_len;
            }
        }
        self.end_undo_group();
    }

    /// Start of the word around `position`; with `only_word_chars` a run of word characters.
    pub fn word_start_position(&self, position: usize, only_word_chars: bool) -> usize {
        let class_before = |p: usize| match p.checked_sub(1).and_then(|p| self.buffer.char_at(p)) {
            Some(ch) => self.classifier.classify(ch),
            None => CharClass::Space,
        };
        let mut position = position.min(self.len());
        let start_class = if only_word_chars {
            CharClass::Word
        } else {
            class_before(position)
        };
        while position > 0 && class_before(position) == start_class {
            position -= 1;
        }
        position
    }

    /// End of the word around `position`; with `only_word_chars` a run of word characters.
    pub fn word_end_position(&self, position: usize, only_word_chars: bool) -> usize {
        let class_at = |p: usize| {
            self.buffer
                .char_at(p)
                .map(|ch| self.classifier.classify(ch))
        };
        let len = self.len();
        let mut position = position.min(len);
        let start_class = if only_word_chars || position >= len {
            Some(CharClass::Word)
        } else {
            class_at(position)
        };
        while position < len && class_at(position) == start_class {
            position += 1;
        }
        position
    }

    /// Character classes.
    pub fn classifier(&self) -> &CharClassifier {
        &self.classifier
    }

    /// Mutable character classes.
    pub fn classifier_mut(&mut self) -> &mut CharClassifier {
        &mut self.classifier
    }

    // ---------------------------------------------------------------------------------------
    // Styling
    // ---------------------------------------------------------------------------------------

    /// Style at `position`; 0 at or past the end.
    pub fn style_at(&self, position: usize) -> u8 {
        self.styles.get(position).copied().unwrap_or(0)
    }

    /// Styles of `[start, end)`, clamped.
    pub fn styles(&self, start: usize, end: usize) -> &[u8] {
        let len = self.styles.len();
        let (start, end) = (start.min(len), end.min(len));
        &self.styles[start.min(end)..end]
    }

    /// Position up to which styling is known to be current.
    pub fn end_styled(&self) -> usize {
        self.end_styled
    }

    /// Begin styling at `position`; later calls only touch the bits in `mask`.
    pub fn start_styling(&mut self, position: usize, mask: u8) {
        self.styling_position = position.min(self.len());
        self.styling_mask = mask;
    }

    /// Style the next `length` positions with `style`.
    pub fn set_styling(&mut self, length: usize, style: u8) {
        let start = self.styling_position;
        let end = start.saturating_add(length).min(self.len());
        self.restyle(start, end, |_| style);
    }

    /// Style the next positions from `styles`, one per position.
    pub fn set_styling_ex(&mut self, styles: &[u8]) {
        let start = self.styling_position;
        let end = start.saturating_add(styles.len()).min(self.len());
        self.restyle(start, end, |i| styles[i - start]);
    }

    fn restyle(&mut self, start: usize, end: usize, style_for: impl Fn(usize) -> u8) {
        let mask = self.styling_mask;
        let mut changed: Option<(usize, usize)> = None;
        for position in start..end {
            let old = self.styles[position];
            let new = (old & !mask) | (style_for(position) & mask);
            if new != old {
                self.styles[position] = new;
                changed = Some(match changed {
                    Some((first, _)) => (first, position),
                    None => (position, position),
                });
            }
        }
        self.styling_position = end;
        self.end_styled = end;
        if let Some((first, last)) = changed {
            self.broadcast(DocumentEvent::Modified(Modification::range(
                SC_MOD_CHANGESTYLE | SC_PERFORMED_USER,
                first,
                last + 1 - first,
            )));
        }
    }

    /// Reset every style to 0 and every fold level to the base level.
    pub fn clear_document_style(&mut self) {
        let len = self.len();
        self.styles.iter_mut().for_each(|s| *s = 0);
        self.end_styled = 0;
        self.styling_position = 0;
        self.broadcast(DocumentEvent::Modified(Modification::range(
            SC_MOD_CHANGESTYLE | SC_PERFORMED_USER,
            0,
            len,
        )));
        let before: Vec<i32> = (0..self.levels.len()).map(|l| self.levels.level(l)).collect();
        self.levels.clear(self.line_count());
        for (line, prev) in before.into_iter().enumerate() {
            let now = self.levels.level(line);
            if now != prev {
                self.journal_fold(LevelChange { line, prev, now });
            }
        }
    }

    // ---------------------------------------------------------------------------------------
    // Indicators
    // ---------------------------------------------------------------------------------------

    /// Indicator channels.
    pub fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    /// Select the indicator fill and clear act on. Indices past the last channel are ignored.
    pub fn set_indicator_current(&mut self, indicator: usize) {
        if indicator <= INDIC_MAX {
            self.decorations.current = indicator;
        }
    }

    /// Set the value fill writes.
    pub fn set_indicator_value(&mut self, value: i32) {
        self.decorations.current_value = value;
    }

    /// Fill `[start, start + length)` of the current indicator with the current value.
    pub fn indicator_fill(&mut self, start: usize, length: usize) {
        let value = self.decorations.current_value;
        self.indicator_write(start, length, value);
    }

    /// Clear `[start, start + length)` of the current indicator.
    pub fn indicator_clear(&mut self, start: usize, length: usize) {
        self.indicator_write(start, length, 0);
    }

    fn indicator_write(&mut self, start: usize, length: usize, value: i32) {
        let start = start.min(self.len());
        let length = length.min(self.len() - start);
        if let Some((from, changed)) = self.decorations.fill_range(start, length, value) {
            self.broadcast(DocumentEvent::Modified(Modification::range(
                SC_MOD_CHANGEINDICATOR | SC_PERFORMED_USER,
                from,
                changed,
            )));
        }
    }

    // ---------------------------------------------------------------------------------------
    // Per-line data
    // ---------------------------------------------------------------------------------------

    /// Fold levels.
    pub fn levels(&self) -> &FoldLevels {
        &self.levels
    }

    /// Set the fold level of `line`; returns the previous stored level.
    pub fn set_fold_level(&mut self, line: usize, level: i32) -> i32 {
        if line >= self.levels.len() {
            return 0;
        }
        let prev = self.levels.raw(line);
        for change in self.levels.set(line, level) {
            self.journal_fold(change);
        }
        prev
    }

    /// State integer of `line`.
    pub fn line_state(&self, line: usize) -> i32 {
        self.line_states.get(line).copied().unwrap_or(0)
    }

    /// Set the state of `line`; returns the previous value.
    pub fn set_line_state(&mut self, line: usize, state: i32) -> i32 {
        if line >= self.line_count() {
            return 0;
        }
        if line >= self.line_states.len() {
            self.line_states.resize(line + 1, 0);
        }
        let prev = std::mem::replace(&mut self.line_states[line], state);
        if prev != state {
            let mut modification = Modification::line(SC_MOD_CHANGELINESTATE, line);
            modification.position = self.buffer.line_start(line);
            self.broadcast(DocumentEvent::Modified(modification));
        }
        prev
    }

    /// Number of lines that have state storage.
    pub fn max_line_state(&self) -> usize {
        self.line_states.len()
    }

    /// Margin text store.
    pub fn margins(&self) -> &LineAnnotations {
        &self.margins
    }

    /// Annotation store.
    pub fn annotations(&self) -> &LineAnnotations {
        &self.annotations
    }

    fn journal_margin(&mut self, line: usize) {
        let mut modification = Modification::line(SC_MOD_CHANGEMARGIN, line);
        modification.position = self.buffer.line_start(line);
        self.broadcast(DocumentEvent::Modified(modification));
    }

    fn journal_annotation(&mut self, line: usize, lines_before: usize) {
        let mut modification = Modification::line(SC_MOD_CHANGEANNOTATION, line);
        modification.position = self.buffer.line_start(line);
        modification.annotation_lines_added =
            self.annotations.line_count(line) as isize - lines_before as isize;
        self.broadcast(DocumentEvent::Modified(modification));
    }

    /// Set or clear the margin text of `line`.
    pub fn set_margin_text(&mut self, line: usize, text: Option<&str>) {
        if line < self.line_count() {
            self.margins.set_text(line, text);
            self.journal_margin(line);
        }
    }

    /// Set the single margin style of `line`.
    pub fn set_margin_style(&mut self, line: usize, style: u8) {
        if line < self.line_count() {
            self.margins.set_style(line, style);
            self.journal_margin(line);
        }
    }

    /// Set per-character margin styles of `line`.
    pub fn set_margin_styles(&mut self, line: usize, styles: &[u8]) {
        if line < self.line_count() {
            self.margins.set_styles(line, styles);
            self.journal_margin(line);
        }
    }

    /// Remove all margin text.
    pub fn clear_margin_text(&mut self) {
        if self.margins.has_any() {
            self.margins.clear_all();
            self.journal_margin(0);
        }
    }

    /// Set or clear the annotation of `line`.
    pub fn set_annotation_text(&mut self, line: usize, text: Option<&str>) {
        if line < self.line_count() {
            let before = self.annotations.line_count(line);
            self.annotations.set_text(line, text);
            self.journal_annotation(line, before);
        }
    }

    /// Set the single annotation style of `line`.
    pub fn set_annotation_style(&mut self, line: usize, style: u8) {
        if line < self.line_count() {
            let before = self.annotations.line_count(line);
            self.annotations.set_style(line, style);
            self.journal_annotation(line, before);
        }
    }

    /// Set per-character annotation styles of `line`.
    pub fn set_annotation_styles(&mut self, line: usize, styles: &[u8]) {
        if line < self.line_count() {
            let before = self.annotations.line_count(line);
            self.annotations.set_styles(line, styles);
            self.journal_annotation(line, before);
        }
    }

    /// Remove every annotation.
    pub fn clear_annotations(&mut self) {
        let lines: Vec<usize> = (0..self.line_count())
            .filter(|l| self.annotations.get(*l).is_some())
            .collect();
        for line in lines {
            self.set_annotation_text(line, None);
        }
        self.annotations.clear_all();
    }

    // ---------------------------------------------------------------------------------------
    // Undo
    // ---------------------------------------------------------------------------------------

    /// Undo history.
    pub fn history(&self) -> &UndoHistory {
        &self.undo
    }

    /// Returns `true` when an undo is possible.
    pub fn can_undo(&self) -> bool {
        !self.read_only && self.undo.can_undo()
    }

    /// Returns `true` when a redo is possible.
    pub fn can_redo(&self) -> bool {
        !self.read_only && self.undo.can_redo()
    }

    /// Open an undo group.
    pub fn begin_undo_group(&mut self) {
        self.undo.begin_group();
        tracing::trace!(target: "engine.undo", depth = self.undo.group_depth(), "begin group");
    }

    /// Close an undo group.
    pub fn end_undo_group(&mut self) {
        self.undo.end_group();
        tracing::trace!(target: "engine.undo", depth = self.undo.group_depth(), "end group");
    }

    /// Turn undo collection on or off.
    pub fn set_undo_collection(&mut self, collect: bool) {
        self.undo.set_collecting(collect);
    }

    /// Record a host action identified by `token`. `flags` may carry `UNDO_MAY_COALESCE`.
    pub fn add_undo_action(&mut self, token: isize, flags: isize) {
        let was_save_point = self.undo.is_save_point();
        self.undo
            .record(UndoAction::container(token, flags & UNDO_MAY_COALESCE != 0));
        self.notify_save_point(was_save_point);
    }

    /// Remember the selection of `view` before an edit.
    pub fn note_selection(&mut self, view: ViewId, selection: &Selection) {
        self.undo.note_selection(view, selection.clone());
    }

    /// Remember the selection of `view` after an edit.
    pub fn note_selection_after(&mut self, view: ViewId, selection: &Selection) {
        self.undo.note_selection_after(view, selection.clone());
    }

    /// Mark the current state as saved.
    pub fn set_save_point(&mut self) {
        self.undo.set_save_point();
        self.broadcast(DocumentEvent::SavePoint(true));
    }

    /// Returns `true` when the document differs from its save point.
    pub fn is_modified(&self) -> bool {
        !self.undo.is_save_point()
    }

    /// Forget the history; the current state becomes the save point.
    pub fn empty_undo_buffer(&mut self) {
        let was_save_point = self.undo.is_save_point();
        self.undo.clear();
        self.notify_save_point(was_save_point);
    }

    /// Undo the latest group.
    pub fn undo(&mut self) -> Option<ReplayOutcome> {
        if !self.can_undo() {
            return None;
        }
        let was_save_point = self.undo.is_save_point();
        let group = self.undo.undo()?;
        tracing::debug!(target: "engine.undo", steps = group.actions.len(), "undo");
        let (position, styles) = self.replay(&group.actions, SC_PERFORMED_UNDO);
        self.undo.keep_undone_styles(styles);
        self.notify_save_point(was_save_point);
        Some(ReplayOutcome {
            selection: group.selection,
            position,
        })
    }

    /// Redo the latest undone group.
    pub fn redo(&mut self) -> Option<ReplayOutcome> {
        if !self.can_redo() {
            return None;
        }
        let was_save_point = self.undo.is_save_point();
        let group = self.undo.redo()?;
        tracing::debug!(target: "engine.undo", steps = group.actions.len(), "redo");
        let (position, _) = self.replay(&group.actions, SC_PERFORMED_REDO);
        self.notify_save_point(was_save_point);
        Some(ReplayOutcome {
            selection: group.selection,
            position,
        })
    }

    /// Replay `actions`. Also returns, per action, the styles of text that replay removed.
    fn replay(&mut self, actions: &[UndoAction], performed: u32) -> (usize, Vec<Option<Vec<u8>>>) {
        let undoing = performed == SC_PERFORMED_UNDO;
        let mut removed_styles = Vec::with_capacity(actions.len());
        let steps = actions.len();
        let multi_line = actions.iter().any(|a| count_line_breaks(&a.text) > 0);
        let mut position = 0;
        for (index, action) in actions.iter().enumerate() {
            let mut flags = performed;
            if steps > 1 {
                flags |= SC_MULTISTEPUNDOREDO;
            }
            if index + 1 == steps {
                flags |= SC_LASTSTEPINUNDOREDO;
                if multi_line {
                    flags |= SC_MULTILINEUNDOREDO;
                }
            }
            let puts_text_back = match action.kind {
                ActionKind::Insert => !undoing,
                ActionKind::Delete => undoing,
                ActionKind::Container => {
                    let mut modification = Modification::range(SC_MOD_CONTAINER | flags, 0, 0);
                    modification.token = action.token;
                    self.broadcast(DocumentEvent::Modified(modification));
                    removed_styles.push(None);
                    continue;
                }
            };
            if puts_text_back {
                self.apply_insert(action.position, &action.text, &action.styles, flags, false);
                position = action.position + action.len();
                removed_styles.push(None);
            } else {
                let start = action.position.min(self.len());
                let end = (action.position + action.len()).min(self.len());
                removed_styles.push(Some(self.styles[start..end].to_vec()));
                self.apply_delete(action.position, action.len(), flags, false);
                position = action.position;
            }
        }
        (position, removed_styles)
    }
}

/// Shared, reference-counted handle to a [`Document`].
///
/// Equality is identity: two handles are equal when they point at the same document.
#[derive(Clone)]
pub struct DocumentHandle(Rc<RefCell<Document>>);

impl DocumentHandle {
    /// Wrap a document.
    pub fn new(document: Document) -> Self {
        Self(Rc::new(RefCell::new(document)))
    }

    /// Shared borrow.
    pub fn borrow(&self) -> Ref<'_, Document> {
        self.0.borrow()
    }

    /// Exclusive borrow.
    pub fn borrow_mut(&self) -> RefMut<'_, Document> {
        self.0.borrow_mut()
    }

    /// Returns `true` if both handles point at the same document.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Stable identity of the document while it is alive.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }
}

impl PartialEq for DocumentHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for DocumentHandle {}

impl fmt::Debug for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentHandle({:#x})", self.id())
    }
}
