#![warn(missing_docs)]
//! Editor Engine - Headless Message-Driven Text Editing Engine
//!
//! # Overview
//!
//! `editor-engine` keeps the complete editing state of a text view and answers numbered
//! messages through a single entry point, [`Engine::dispatch`]. It never draws and never reads
//! input devices: hosts render through a [`Surface`], style through a [`Lexer`] and report
//! input as [`HostEvent`] values. Everything the engine wants the host to know arrives as a
//! [`Notification`].
//!
//! # Core Features
//!
//! - **Text Storage**: rope-backed buffer with character positions and line lookup
//! - **Selections**: stream, rectangular, line and thin modes, multiple carets, virtual space
//! - **Folding**: fold levels per line and per-view contraction
//! - **Styling**: style bytes, 32 indicator channels, margin text and annotations
//! - **Undo**: grouped, coalescing history with a save point and container actions
//! - **Search**: literal and regex target search with group replacement
//! - **Shared Documents**: several engines on one reference-counted document
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Dispatch (messages, notifications, events) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  View state (selection, contraction, target)│  ← Per engine
//! ├─────────────────────────────────────────────┤
//! │  Document (styles, levels, undo, journal)   │  ← Shared
//! ├─────────────────────────────────────────────┤
//! │  Text buffer (rope)                         │  ← Storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use editor_engine::{Engine, NotificationKind};
//! use editor_engine::messages::*;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let mut engine = Engine::new();
//! let changes = Rc::new(RefCell::new(0));
//! let counter = Rc::clone(&changes);
//! engine.subscribe(move |n| {
//!     if n.kind == NotificationKind::Modified {
//!         *counter.borrow_mut() += 1;
//!     }
//! });
//!
//! engine.dispatch(SCI_SETTEXT, 0, "fn main() {}\n");
//! engine.dispatch(SCI_SETSEL, 3, 7);
//! engine.dispatch(SCI_REPLACESEL, 0, "start");
//!
//! assert_eq!(engine.text(), "fn start() {}\n");
//! assert_eq!(engine.dispatch(SCI_GETLINECOUNT, 0, 0).as_int(), 2);
//! assert!(*changes.borrow() > 0);
//! ```
//!
//! # Module Description
//!
//! - [`buffer`] - Rope based text buffer
//! - [`document`] - Shared document and its modification journal
//! - [`engine`] - The view and its message dispatcher
//! - [`selection`] - Selection model
//! - [`contraction`] - Visible and expanded lines
//! - [`search`] - Target search
//! - [`messages`] - Message codes

pub mod annotations;
pub mod buffer;
pub mod char_class;
pub mod config;
pub mod contraction;
pub mod decorations;
pub mod delta;
pub mod document;
pub mod engine;
pub mod events;
pub mod fold_levels;
pub mod host;
pub mod idle;
pub mod line_ending;
pub mod messages;
pub mod notify;
pub mod param;
pub mod search;
pub mod selection;
pub mod styles;
pub mod undo;

mod edit;
mod folding;
mod select;
mod styling;
mod target;

pub use buffer::TextBuffer;
pub use config::{EngineConfig, EngineError};
pub use contraction::{Contraction, FoldAction};
pub use delta::{DocumentEvent, Modification};
pub use document::{Document, DocumentHandle, ViewId};
pub use engine::Engine;
pub use events::HostEvent;
pub use host::{DefaultHandler, Lexer, NullSurface, Styler, Surface};
pub use idle::IdleStyling;
pub use line_ending::EolMode;
pub use messages::Message;
pub use notify::{Notification, NotificationKind};
pub use param::{Param, Reply};
pub use selection::{Selection, SelectionMode, SelectionPosition, SelectionRange};
