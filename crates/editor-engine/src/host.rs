//! Collaborators supplied by the host.
//!
//! The engine never draws, measures or tokenizes. It asks a [`Surface`] to repaint and to arm
//! timers, asks a [`Lexer`] to style text, and hands unknown messages to a
//! [`DefaultHandler`]. Every method has a do-nothing default so hosts implement only what they
//! use.

use crate::document::Document;
use crate::param::{Param, Reply};

/// Rendering side of the host.
pub trait Surface {
    /// Document lines `first..=last` need repainting.
    fn invalidate_lines(&mut self, first: usize, last: usize) {
        let _ = (first, last);
    }

    /// Everything needs repainting.
    fn invalidate_all(&mut self) {}

    /// Style attributes changed; cached metrics are stale.
    fn invalidate_style_metrics(&mut self) {}

    /// Start or stop calling [`crate::Engine::tick`] every `period_ms`.
    fn set_ticking(&mut self, on: bool, period_ms: u32) {
        let _ = (on, period_ms);
    }

    /// Start or stop calling [`crate::Engine::idle`] when the host is idle.
    fn set_idle(&mut self, on: bool) {
        let _ = on;
    }

    /// Display lines `line` wraps onto.
    fn wrap_count(&self, line: usize) -> usize {
        let _ = line;
        1
    }
}

/// A surface that ignores every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {}

/// Restyles text on request.
pub trait Lexer {
    /// Style `[start, end)` through `styler`.
    fn colourise(&mut self, styler: &mut Styler<'_>, start: usize, end: usize);
}

/// Styling access handed to a [`Lexer`].
pub struct Styler<'a> {
    document: &'a mut Document,
}

impl<'a> Styler<'a> {
    pub(crate) fn new(document: &'a mut Document) -> Self {
        Self { document }
    }

    /// Text of `[start, end)`.
    pub fn text(&self, start: usize, end: usize) -> String {
        self.document.buffer().slice(start, end)
    }

    /// Character at `position`.
    pub fn char_at(&self, position: usize) -> Option<char> {
        self.document.buffer().char_at(position)
    }

    /// Document length.
    pub fn len(&self) -> usize {
        self.document.len()
    }

    /// Returns `true` for an empty document.
    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Line containing `position`.
    pub fn line_of(&self, position: usize) -> usize {
        self.document.buffer().line_of(position)
    }

    /// First position of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        self.document.buffer().line_start(line)
    }

    /// Begin styling at `position`.
    pub fn start(&mut self, position: usize) {
        self.document.start_styling(position, 0xFF);
    }

    /// Style the next `length` characters.
    pub fn set(&mut self, length: usize, style: u8) {
        self.document.set_styling(length, style);
    }

    /// Set the fold level of `line`.
    pub fn set_fold_level(&mut self, line: usize, level: i32) {
        self.document.set_fold_level(line, level);
    }

    /// Stored fold level of `line`.
    pub fn fold_level(&self, line: usize) -> i32 {
        self.document.levels().raw(line)
    }

    /// Set the state of `line`.
    pub fn set_line_state(&mut self, line: usize, state: i32) {
        self.document.set_line_state(line, state);
    }

    /// State of `line`.
    pub fn line_state(&self, line: usize) -> i32 {
        self.document.line_state(line)
    }
}

/// Receives messages the engine does not know.
pub trait DefaultHandler {
    /// Handle `code`; the result is returned to the caller.
    fn handle(&mut self, code: u32, a: &Param, b: &Param) -> Reply {
        let _ = (code, a, b);
        Reply::Int(0)
    }
}

/// Handler answering `0` to everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZeroHandler;

impl DefaultHandler for ZeroHandler {}
