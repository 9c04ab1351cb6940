//! The message-driven engine.
//!
//! An [`Engine`] is one view onto a shared [`Document`]: it owns the selection, the target,
//! contraction, the style table and the host collaborators, and it answers every message sent
//! through [`Engine::dispatch`].
//!
//! # Synchronization
//!
//! Documents never call into engines. Every mutation is appended to the journal slot of each
//! attached engine, and an engine drains its slot before handling a message and again after
//! its own edits. Draining translates the selection and target, renumbers contraction, and
//! queues `Modified` and save point notifications. Queued notifications and repaint requests
//! are delivered once no document borrow is held, so host callbacks are free to touch the
//! document through their own handle.

use std::cell::{Ref, RefMut};

use crate::annotations::{ANNOTATION_HIDDEN, MarginDef, SC_MAX_MARGIN};
use crate::config::{EngineConfig, EngineError};
use crate::contraction::Contraction;
use crate::decorations::INDIC_MAX;
use crate::delta::{
    DocumentEvent, Modification, SC_MOD_CHANGEANNOTATION, SC_MOD_CHANGEFOLD,
    SC_MOD_CHANGEINDICATOR, SC_MOD_CHANGEMARGIN, SC_MOD_CHANGESTYLE,
};
use crate::document::{Document, DocumentHandle, ViewId};
use crate::host::{DefaultHandler, Lexer, NullSurface, Styler, Surface, ZeroHandler};
use crate::idle::{IdleStyler, IdleStyling, TICK_MS, Timers};
use crate::messages::{
    Message, SC_AUTOMATICFOLD_CHANGE, SC_AUTOMATICFOLD_SHOW, SC_STATUS_OK,
};
use crate::notify::{
    Notification, NotificationCallback, NotificationKind, SC_UPDATE_CONTENT, SC_UPDATE_SELECTION,
};
use crate::param::{Param, Reply};
use crate::selection::{SCVS_RECTANGULARSELECTION, Selection, SelectionPosition, SelectionRange};
use crate::styles::{IndicatorStyle, StyleTable};

/// Lowest zoom level.
const ZOOM_MIN: isize = -10;
/// Highest zoom level.
const ZOOM_MAX: isize = 20;

/// Repaint requests collected while a message runs.
#[derive(Debug, Default, Clone, Copy)]
struct Damage {
    lines: Option<(usize, usize)>,
    all: bool,
    style_metrics: bool,
}

impl Damage {
    fn lines(&mut self, first: usize, last: usize) {
        let (first, last) = (first.min(last), first.max(last));
        self.lines = Some(match self.lines {
            Some((a, b)) => (a.min(first), b.max(last)),
            None => (first, last),
        });
    }
}

/// A view onto a document, driven by `(code, param, param)` messages.
///
/// # Example
///
/// ```rust
/// use editor_engine::Engine;
/// use editor_engine::messages::{SCI_GETTEXT, SCI_INSERTTEXT, SCI_SETTEXT, SCI_UNDO};
///
/// let mut engine = Engine::new();
/// engine.dispatch(SCI_SETTEXT, 0, "abc");
/// engine.dispatch(SCI_INSERTTEXT, 1, "X");
/// assert_eq!(engine.dispatch(SCI_GETTEXT, 0, 0).into_text(), "aXbc");
///
/// engine.dispatch(SCI_UNDO, 0, 0);
/// assert_eq!(engine.text(), "abc");
/// ```
pub struct Engine {
    pub(crate) config: EngineConfig,
    pub(crate) view: ViewId,
    pub(crate) document: DocumentHandle,
    pub(crate) selection: Selection,
    pub(crate) contraction: Contraction,
    pub(crate) target_start: usize,
    pub(crate) target_end: usize,
    pub(crate) search_flags: isize,
    pub(crate) search_anchor: usize,
    pub(crate) last_groups: Vec<Option<String>>,
    pub(crate) styles: StyleTable,
    pub(crate) indicators: Vec<IndicatorStyle>,
    pub(crate) margins: [MarginDef; SC_MAX_MARGIN + 1],
    pub(crate) margin_style_offset: isize,
    pub(crate) annotation_style_offset: isize,
    pub(crate) annotation_visible: isize,
    pub(crate) fold_flags: isize,
    pub(crate) virtual_space_options: isize,
    pub(crate) multiple_selection: bool,
    pub(crate) additional_selection_typing: bool,
    pub(crate) automatic_fold: isize,
    pub(crate) mod_event_mask: u32,
    pub(crate) status: isize,
    pub(crate) recording: bool,
    pub(crate) zoom: isize,
    pub(crate) focus: bool,
    pub(crate) timers: Timers,
    pub(crate) idle_styler: IdleStyler,
    idle_stalled_at: Option<usize>,
    ticking: bool,
    surface: Box<dyn Surface>,
    lexer: Option<Box<dyn Lexer>>,
    default_handler: Box<dyn DefaultHandler>,
    callbacks: Vec<NotificationCallback>,
    pending: Vec<Notification>,
    damage: Damage,
    updated: i32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// An engine over a fresh empty document with default settings.
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// An engine over a fresh empty document with `config`.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// An engine attached to an existing document.
    pub fn with_document(document: DocumentHandle) -> Self {
        let mut engine = Self::new();
        engine.set_document(Some(document));
        engine
    }

    fn build(config: EngineConfig) -> Self {
        let document = DocumentHandle::new(Self::fresh_document(&config));
        let view = ViewId::next();
        document.borrow_mut().attach(view);
        let lines = document.borrow().line_count();
        Self {
            view,
            document,
            selection: Selection::new(),
            contraction: Contraction::new(lines),
            target_start: 0,
            target_end: 0,
            search_flags: config.search_flags,
            search_anchor: 0,
            last_groups: Vec::new(),
            styles: StyleTable::new(),
            indicators: (0..=INDIC_MAX).map(IndicatorStyle::for_index).collect(),
            margins: MarginDef::defaults(),
            margin_style_offset: 0,
            annotation_style_offset: 0,
            annotation_visible: ANNOTATION_HIDDEN as isize,
            fold_flags: 0,
            virtual_space_options: config.virtual_space_options,
            multiple_selection: config.multiple_selection,
            additional_selection_typing: config.additional_selection_typing,
            automatic_fold: config.automatic_fold,
            mod_event_mask: config.mod_event_mask,
            status: SC_STATUS_OK,
            recording: false,
            zoom: 0,
            focus: false,
            timers: Timers::new(config.caret_period, config.dwell_time),
            idle_styler: IdleStyler::new(IdleStyling::from_code(config.idle_styling)),
            idle_stalled_at: None,
            ticking: false,
            surface: Box::new(NullSurface),
            lexer: None,
            default_handler: Box::new(ZeroHandler),
            callbacks: Vec::new(),
            pending: Vec::new(),
            damage: Damage::default(),
            updated: 0,
            config,
        }
    }

    pub(crate) fn fresh_document(config: &EngineConfig) -> Document {
        let mut document = Document::new(config.tab_width, config.eol_mode, config.undo_limit);
        document.set_undo_collection(config.undo_collection);
        document
    }

    // ---------------------------------------------------------------------------------------
    // Host wiring
    // ---------------------------------------------------------------------------------------

    /// Register a notification receiver.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&Notification) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Replace the rendering collaborator.
    pub fn set_surface<S: Surface + 'static>(&mut self, surface: S) {
        self.surface = Box::new(surface);
        self.ticking = false;
        self.idle_styler.set_armed(false);
        self.damage.all = true;
        self.flush();
    }

    /// Install a lexer; styling requests go to it instead of the host.
    pub fn set_lexer<L: Lexer + 'static>(&mut self, lexer: L) {
        self.lexer = Some(Box::new(lexer));
        self.idle_stalled_at = None;
    }

    /// Remove the lexer; styling requests become `StyleNeeded` notifications.
    pub fn clear_lexer(&mut self) {
        self.lexer = None;
    }

    /// Replace the handler for unknown message codes.
    pub fn set_default_handler<H: DefaultHandler + 'static>(&mut self, handler: H) {
        self.default_handler = Box::new(handler);
    }

    // ---------------------------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------------------------

    /// Identity of this engine in document journals.
    pub fn view_id(&self) -> ViewId {
        self.view
    }

    /// The attached document.
    pub fn document(&self) -> &DocumentHandle {
        &self.document
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current contraction state.
    pub fn contraction(&self) -> &Contraction {
        &self.contraction
    }

    /// Style table of this view.
    pub fn style_table(&self) -> &StyleTable {
        &self.styles
    }

    /// Full document text.
    pub fn text(&self) -> String {
        self.doc().text()
    }

    /// Target range as `(start, end)`.
    pub fn target(&self) -> (usize, usize) {
        (self.target_start, self.target_end)
    }

    /// Error status set by the last failing operation.
    pub fn status(&self) -> isize {
        self.status
    }

    pub(crate) fn doc(&self) -> Ref<'_, Document> {
        self.document.borrow()
    }

    pub(crate) fn doc_mut(&self) -> RefMut<'_, Document> {
        self.document.borrow_mut()
    }

    pub(crate) fn doc_len(&self) -> usize {
        self.doc().len()
    }

    /// Clamp a position argument into `[0, len]`.
    pub(crate) fn position(&self, param: &Param) -> usize {
        self.doc().buffer().clamp(param.as_int())
    }

    /// Clamp a line argument into `[0, line_count - 1]`.
    pub(crate) fn line(&self, param: &Param) -> usize {
        self.doc().buffer().clamp_line(param.as_int())
    }

    /// A line argument if it names an existing line.
    pub(crate) fn valid_line(&self, param: &Param) -> Option<usize> {
        let line = param.as_int();
        (line >= 0 && (line as usize) < self.doc().line_count()).then_some(line as usize)
    }

    // ---------------------------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------------------------

    /// Handle one message and return its result.
    ///
    /// Known codes are decoded into a [`Message`]; unknown codes go to the default handler.
    /// Arguments out of range are clamped or ignored, so this never fails.
    pub fn dispatch(&mut self, code: u32, a: impl Into<Param>, b: impl Into<Param>) -> Reply {
        let (a, b) = (a.into(), b.into());
        self.sync();
        let message = Message::from_code(code);
        tracing::trace!(
            target: "engine.dispatch",
            code,
            name = message.map(Message::name).unwrap_or("unknown"),
            "dispatch"
        );
        if self.recording && !matches!(message, Some(Message::StartRecord | Message::StopRecord)) {
            tracing::debug!(target: "engine.dispatch", code, "macro record");
            self.pending
                .push(Notification::macro_record(code, a.clone(), b.clone()));
            self.flush();
        }

        let selection_before = self.selection.clone();
        let reply = match message {
            Some(message) => self.handle(message, &a, &b),
            None => self.default_handler.handle(code, &a, &b),
        };
        self.finish(&selection_before);
        reply
    }

    fn handle(&mut self, message: Message, a: &Param, b: &Param) -> Reply {
        self.text_message(message, a, b)
            .or_else(|| self.selection_message(message, a, b))
            .or_else(|| self.fold_message(message, a, b))
            .or_else(|| self.style_message(message, a, b))
            .or_else(|| self.target_message(message, a, b))
            .or_else(|| self.engine_message(message, a, b))
            .unwrap_or_default()
    }

    /// Bring view state up to date and deliver everything queued.
    pub(crate) fn finish(&mut self, selection_before: &Selection) {
        self.sync();
        if self.selection != *selection_before {
            self.updated |= SC_UPDATE_SELECTION;
            self.timers.reset_caret();
        }
        if self.updated != 0 {
            let updated = std::mem::take(&mut self.updated);
            self.pending
                .push(Notification::new(NotificationKind::UpdateUi).with_updated(updated));
        }
        self.flush();
    }

    /// Messages owned by the engine itself: documents, recording, status, timers.
    fn engine_message(&mut self, message: Message, a: &Param, b: &Param) -> Option<Reply> {
        let reply = match message {
            Message::GetDocPointer => Reply::Document(Some(self.document.clone())),
            Message::SetDocPointer => {
                self.set_document(b.as_document());
                Reply::Int(0)
            }
            Message::CreateDocument => {
                let document = DocumentHandle::new(Self::fresh_document(&self.config));
                document.borrow_mut().add_ref();
                Reply::Document(Some(document))
            }
            Message::AddRefDocument => {
                if let Some(document) = b.as_document() {
                    document.borrow_mut().add_ref();
                }
                Reply::Int(0)
            }
            Message::ReleaseDocument => {
                if let Some(document) = b.as_document() {
                    document.borrow_mut().release();
                }
                Reply::Int(0)
            }
            Message::StartRecord => {
                self.recording = true;
                Reply::Int(0)
            }
            Message::StopRecord => {
                self.recording = false;
                Reply::Int(0)
            }
            Message::SetStatus => {
                self.status = a.as_int();
                Reply::Int(0)
            }
            Message::GetStatus => self.status.into(),
            Message::SetModEventMask => {
                self.mod_event_mask = a.as_int() as u32;
                Reply::Int(0)
            }
            Message::GetModEventMask => self.mod_event_mask.into(),
            Message::SetCaretPeriod => {
                self.timers.set_caret_period(a.as_int().max(0) as u32);
                Reply::Int(0)
            }
            Message::GetCaretPeriod => self.timers.caret_period().into(),
            Message::SetMouseDwellTime => {
                self.timers.set_dwell_time(a.as_int().max(0) as u32);
                Reply::Int(0)
            }
            Message::GetMouseDwellTime => self.timers.dwell_time().into(),
            Message::SetZoom => {
                let zoom = a.as_int().clamp(ZOOM_MIN, ZOOM_MAX);
                if zoom != self.zoom {
                    self.zoom = zoom;
                    self.damage.style_metrics = true;
                    self.damage.all = true;
                    self.pending.push(Notification::new(NotificationKind::Zoom));
                }
                Reply::Int(0)
            }
            Message::GetZoom => self.zoom.into(),
            Message::SetFocus => {
                self.set_focus(a.as_int() != 0);
                Reply::Int(0)
            }
            Message::GetFocus => self.focus.into(),
            _ => return None,
        };
        Some(reply)
    }

    pub(crate) fn set_focus(&mut self, focus: bool) {
        if focus == self.focus {
            return;
        }
        self.focus = focus;
        self.timers.reset_caret();
        self.pending.push(Notification::new(if focus {
            NotificationKind::FocusIn
        } else {
            NotificationKind::FocusOut
        }));
        self.damage_selection();
    }

    /// Switch to `document`, or to a fresh document when `None`.
    ///
    /// The engine leaves the journal of its old document and resets its view state.
    pub fn set_document(&mut self, document: Option<DocumentHandle>) {
        let document = match document {
            Some(document) if document.ptr_eq(&self.document) => return,
            Some(document) => document,
            None => DocumentHandle::new(Self::fresh_document(&self.config)),
        };
        self.sync();
        self.document.borrow_mut().detach(self.view);
        document.borrow_mut().attach(self.view);
        self.document = document;
        let lines = self.doc().line_count();
        self.selection = Selection::new();
        self.contraction.reset(lines);
        self.target_start = 0;
        self.target_end = 0;
        self.search_anchor = 0;
        self.idle_stalled_at = None;
        self.damage.all = true;
        self.flush();
    }

    // ---------------------------------------------------------------------------------------
    // Journal
    // ---------------------------------------------------------------------------------------

    /// Apply every event the document queued for this engine.
    pub(crate) fn sync(&mut self) {
        let events = self.doc_mut().take_events(self.view);
        if events.is_empty() {
            return;
        }
        for event in events {
            match event {
                DocumentEvent::Modified(modification) => self.apply_modification(modification),
                DocumentEvent::SavePoint(reached) => {
                    self.pending.push(Notification::new(if reached {
                        NotificationKind::SavePointReached
                    } else {
                        NotificationKind::SavePointLeft
                    }));
                }
                DocumentEvent::ModifyAttempt => {
                    self.pending
                        .push(Notification::new(NotificationKind::ModifyAttemptReadOnly));
                }
            }
        }
        let len = self.doc_len();
        self.selection.clamp_to_len(len);
        self.target_start = self.target_start.min(len);
        self.target_end = self.target_end.min(len);
        self.search_anchor = self.search_anchor.min(len);
        debug_assert_eq!(self.contraction.lines_in_doc(), self.doc().line_count());
    }

    fn apply_modification(&mut self, modification: Modification) {
        if modification.is_insert() || modification.is_delete() {
            self.selection.translate(&modification);
            self.target_start = move_for_edit(self.target_start, &modification, true);
            self.target_end = move_for_edit(self.target_end, &modification, true);
            self.search_anchor = move_for_edit(self.search_anchor, &modification, false);

            let line = modification.line;
            if modification.lines_added > 0 {
                let added = modification.lines_added as usize;
                self.contraction.insert_lines(line, added);
                if !self.contraction.expanded(line) {
                    self.fold_opened_lines(line, added, &modification);
                }
            } else if modification.lines_added < 0 {
                self.contraction
                    .delete_lines(line, modification.lines_added.unsigned_abs());
            }
            if !self.contraction.visible(line) {
                self.need_shown(modification.position, modification.length);
            }
            if modification.lines_added != 0 {
                self.damage.all = true;
            } else {
                self.damage.lines(line, line);
            }
            self.updated |= SC_UPDATE_CONTENT;
        }

        if modification.flags & SC_MOD_CHANGEFOLD != 0 {
            if self.automatic_fold & SC_AUTOMATICFOLD_CHANGE != 0 {
                let document = self.document.borrow();
                if self.contraction.fold_changed(
                    document.levels(),
                    modification.line,
                    modification.fold_level_now,
                    modification.fold_level_prev,
                ) {
                    self.damage.all = true;
                }
            }
            self.damage.lines(modification.line, modification.line);
        }

        if modification.flags & (SC_MOD_CHANGESTYLE | SC_MOD_CHANGEINDICATOR) != 0 {
            let (first, last) = {
                let document = self.doc();
                let buffer = document.buffer();
                (buffer.line_of(modification.position), buffer.line_of(modification.end()))
            };
            self.damage.lines(first, last);
            self.updated |= SC_UPDATE_CONTENT;
        }

        if modification.flags & (SC_MOD_CHANGEMARGIN | SC_MOD_CHANGEANNOTATION) != 0 {
            self.damage.all = true;
        }

        if modification.flags & self.mod_event_mask != 0 {
            self.pending.push(Notification::modified(&modification));
        }
    }

    /// An edit touched hidden lines: reveal them or ask the host to.
    /// Lines opened under a collapsed header join its fold, so they start hidden. The edit
    /// then counts as an edit in hidden text.
    fn fold_opened_lines(&mut self, header: usize, added: usize, modification: &Modification) {
        let last = {
            let document = self.document.borrow();
            document.levels().last_child(header, None, None)
        };
        let last = last.min(header + added);
        if last > header && self.contraction.set_visible(header + 1, last, false) {
            self.damage.all = true;
            self.need_shown(modification.position, modification.length);
        }
    }

    fn need_shown(&mut self, position: usize, length: usize) {
        if self.automatic_fold & SC_AUTOMATICFOLD_SHOW != 0 {
            let document = self.document.borrow();
            let buffer = document.buffer();
            let first = buffer.line_of(position);
            let last = buffer.line_of(position + length);
            for line in first..=last {
                self.contraction.ensure_line_visible(document.levels(), line);
            }
            tracing::debug!(target: "engine.fold", first, last, "edit revealed hidden lines");
            self.damage.all = true;
        } else {
            self.pending.push(
                Notification::new(NotificationKind::NeedShown)
                    .with_position(position)
                    .with_length(length),
            );
        }
    }

    /// Deliver repaint requests, timer changes and notifications.
    pub(crate) fn flush(&mut self) {
        let damage = std::mem::take(&mut self.damage);
        if damage.style_metrics {
            self.surface.invalidate_style_metrics();
        }
        if damage.all {
            self.surface.invalidate_all();
        } else if let Some((first, last)) = damage.lines {
            self.surface.invalidate_lines(first, last);
        }
        self.arm_timers();

        let pending = std::mem::take(&mut self.pending);
        for notification in &pending {
            for callback in &mut self.callbacks {
                callback(notification);
            }
        }
    }

    fn arm_timers(&mut self) {
        let wants_idle = {
            let document = self.doc();
            self.idle_styler
                .has_work(document.end_styled(), document.len())
                && self.idle_stalled_at != Some(document.end_styled())
        };
        if self.idle_styler.set_armed(wants_idle) {
            tracing::trace!(target: "engine.idle", armed = wants_idle, "idle styling");
            self.surface.set_idle(wants_idle);
        }
        let wants_ticks = self.timers.wants_ticks();
        if wants_ticks != self.ticking {
            self.ticking = wants_ticks;
            self.surface.set_ticking(wants_ticks, TICK_MS);
        }
    }

    pub(crate) fn damage_all(&mut self) {
        self.damage.all = true;
    }

    pub(crate) fn damage_style_metrics(&mut self) {
        self.damage.style_metrics = true;
        self.damage.all = true;
    }

    pub(crate) fn damage_selection(&mut self) {
        let (first, last) = {
            let document = self.doc();
            let buffer = document.buffer();
            let lines = self
                .selection
                .ranges()
                .iter()
                .flat_map(|r| [r.start().position, r.end().position])
                .map(|p| buffer.line_of(p));
            lines.fold((usize::MAX, 0), |(lo, hi), l| (lo.min(l), hi.max(l)))
        };
        if first <= last {
            self.damage.lines(first, last);
        }
    }

    pub(crate) fn queue(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    // ---------------------------------------------------------------------------------------
    // Selection helpers shared by the message groups
    // ---------------------------------------------------------------------------------------

    /// Rebuild the per-line ranges of a rectangular selection.
    pub(crate) fn derive_rectangular(&mut self) {
        let keep_virtual = self.virtual_space_options & SCVS_RECTANGULARSELECTION != 0;
        let document = self.document.borrow();
        self.selection
            .derive_rectangular(document.buffer(), document.tab_width(), keep_virtual);
    }

    /// Make `caret`/`anchor` the only selection, shaped by the current mode.
    pub(crate) fn set_selection(&mut self, caret: SelectionPosition, anchor: SelectionPosition) {
        use crate::selection::SelectionMode;
        match self.selection.mode() {
            SelectionMode::Rectangle | SelectionMode::Thin => {
                *self.selection.rectangular_mut() = SelectionRange::from_positions(caret, anchor);
                self.derive_rectangular();
            }
            SelectionMode::Lines => {
                let (caret, anchor) = {
                    let document = self.doc();
                    Selection::snap_lines(document.buffer(), caret, anchor)
                };
                self.selection
                    .set_single(SelectionRange::from_positions(caret, anchor));
            }
            SelectionMode::Stream => {
                self.selection
                    .set_single(SelectionRange::from_positions(caret, anchor));
            }
        }
        self.damage_selection();
    }

    /// Collapse to a single stream caret at `position`.
    pub(crate) fn set_empty_selection(&mut self, position: usize) {
        self.damage_selection();
        self.selection.clear();
        self.selection.set_single(SelectionRange::caret_at(position));
        self.damage_selection();
    }

    // ---------------------------------------------------------------------------------------
    // Styling and timers
    // ---------------------------------------------------------------------------------------

    /// Style `[start, end)`: through the lexer when there is one, else by asking the host.
    pub(crate) fn colourise_range(&mut self, start: usize, end: usize) {
        let (start, end) = {
            let document = self.doc();
            let buffer = document.buffer();
            let end = end.min(document.len());
            (buffer.line_start(buffer.line_of(start.min(end))), end)
        };
        match self.lexer.as_mut() {
            Some(lexer) => {
                let mut document = self.document.borrow_mut();
                let mut styler = Styler::new(&mut document);
                lexer.colourise(&mut styler, start, end);
            }
            None => {
                self.pending.push(
                    Notification::new(NotificationKind::StyleNeeded).with_position(end),
                );
                self.flush();
            }
        }
        self.sync();
    }

    /// Advance caret blink and dwell timing by one tick.
    pub fn tick(&mut self) {
        self.sync();
        let outcome = self.timers.tick();
        if outcome.caret_toggled {
            self.damage_selection();
        }
        if let Some((x, y, position)) = outcome.dwell_start {
            self.pending.push(
                Notification::new(NotificationKind::DwellStart)
                    .with_position(position)
                    .with_point(x, y),
            );
        }
        self.flush();
    }

    /// Style up to `budget` characters in the background. Returns `true` while work remains.
    pub fn idle(&mut self, budget: usize) -> bool {
        self.sync();
        let (end_styled, len) = {
            let document = self.doc();
            (document.end_styled(), document.len())
        };
        if let Some((start, end)) = self.idle_styler.next_chunk(end_styled, len, budget) {
            tracing::trace!(target: "engine.idle", start, end, "idle styling chunk");
            self.colourise_range(start, end);
            let advanced = self.doc().end_styled();
            if advanced <= end_styled {
                tracing::debug!(target: "engine.idle", end_styled, "idle styling made no progress");
                self.idle_stalled_at = Some(advanced);
            }
        }
        let more = {
            let document = self.doc();
            self.idle_styler
                .has_work(document.end_styled(), document.len())
                && self.idle_stalled_at != Some(document.end_styled())
        };
        self.flush();
        more
    }

    /// Make sure everything up to `position` is styled before it is shown.
    pub(crate) fn ensure_styled_to(&mut self, position: usize) {
        let end_styled = self.doc().end_styled();
        if end_styled < position {
            self.colourise_range(end_styled, position);
        }
    }

    pub(crate) fn set_idle_styling(&mut self, mode: IdleStyling) {
        self.idle_styler.set_mode(mode);
        self.idle_stalled_at = None;
    }

    pub(crate) fn reset_idle_stall(&mut self) {
        self.idle_stalled_at = None;
    }

    pub(crate) fn surface(&self) -> &dyn Surface {
        self.surface.as_ref()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.document.borrow_mut().detach(self.view);
    }
}

/// Move `position` across an insertion or deletion.
///
/// With `move_for_equal` a position sitting exactly at an insertion point moves past the
/// inserted text; otherwise it stays before it. Positions inside a deletion collapse to its
/// start.
pub(crate) fn move_for_edit(position: usize, change: &Modification, move_for_equal: bool) -> usize {
    if change.is_insert() {
        if position > change.position || (move_for_equal && position == change.position) {
            position + change.length
        } else {
            position
        }
    } else if change.is_delete() && position > change.position {
        if position > change.end() {
            position - change.length
        } else {
            change.position
        }
    } else {
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{SCI_GETLENGTH, SCI_GETSTATUS, SCI_SETSTATUS};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_move_for_edit() {
        let insert = Modification::insert(5, "abc", 0, 0);
        assert_eq!(move_for_edit(5, &insert, false), 5);
        assert_eq!(move_for_edit(5, &insert, true), 8);
        assert_eq!(move_for_edit(6, &insert, false), 9);
        let delete = Modification::delete(5, "abc", 0, 0);
        assert_eq!(move_for_edit(7, &delete, false), 5);
        assert_eq!(move_for_edit(8, &delete, false), 5);
        assert_eq!(move_for_edit(9, &delete, false), 6);
        assert_eq!(move_for_edit(4, &delete, false), 4);
    }

    #[test]
    fn test_unknown_code_goes_to_default_handler() {
        struct Echo;
        impl DefaultHandler for Echo {
            fn handle(&mut self, code: u32, a: &Param, _b: &Param) -> Reply {
                Reply::Int(code as isize + a.as_int())
            }
        }
        let mut engine = Engine::new();
        assert_eq!(engine.dispatch(9999, 1, 0), Reply::Int(0));
        engine.set_default_handler(Echo);
        assert_eq!(engine.dispatch(9999, 1, 0), Reply::Int(10000));
        assert_eq!(engine.dispatch(SCI_GETLENGTH, 0, 0), Reply::Int(0));
    }

    #[test]
    fn test_status_round_trip() {
        let mut engine = Engine::new();
        engine.dispatch(SCI_SETSTATUS, 7, 0);
        assert_eq!(engine.dispatch(SCI_GETSTATUS, 0, 0).as_int(), 7);
    }

    #[test]
    fn test_surface_receives_ticking_request() {
        #[derive(Clone, Default)]
        struct Recorder(Rc<RefCell<Vec<(bool, u32)>>>);
        impl Surface for Recorder {
            fn set_ticking(&mut self, on: bool, period_ms: u32) {
                self.0.borrow_mut().push((on, period_ms));
            }
        }
        let recorder = Recorder::default();
        let mut engine = Engine::new();
        engine.set_surface(recorder.clone());
        assert_eq!(recorder.0.borrow().as_slice(), &[(true, TICK_MS)]);
    }

    #[test]
    fn test_config_is_validated() {
        let config = EngineConfig {
            tab_width: 0,
            ..EngineConfig::default()
        };
        assert!(Engine::with_config(config).is_err());
    }
}
