//! Host input events.
//!
//! Hosts translate their own input into [`HostEvent`] values and pass them to
//! [`Engine::handle_event`]. Positions are document character offsets; the host has already
//! hit-tested the pointer.

use crate::annotations::{SC_MASK_FOLDERS, SC_MAX_MARGIN};
use crate::engine::Engine;
use crate::messages::SC_AUTOMATICFOLD_CLICK;
use crate::notify::{Notification, NotificationKind, SCMOD_CTRL, SCMOD_SHIFT};
use crate::selection::{SelectionPosition, SelectionRange};

/// Input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// A character was typed.
    Char(char),
    /// Mouse press in the text.
    Click {
        /// Document position under the pointer.
        position: usize,
        /// `SCMOD_*` flags.
        modifiers: i32,
    },
    /// Mouse release in the text.
    Release {
        /// Document position under the pointer.
        position: usize,
        /// `SCMOD_*` flags.
        modifiers: i32,
    },
    /// Double click in the text.
    DoubleClick {
        /// Document position under the pointer.
        position: usize,
        /// `SCMOD_*` flags.
        modifiers: i32,
    },
    /// Press in a margin.
    MarginClick {
        /// Margin index.
        margin: usize,
        /// A position on the clicked line.
        position: usize,
        /// `SCMOD_*` flags.
        modifiers: i32,
    },
    /// The pointer moved over the text.
    PointerMoved {
        /// Pointer x.
        x: i32,
        /// Pointer y.
        y: i32,
        /// Document position under the pointer.
        position: usize,
    },
    /// The pointer left the view.
    PointerLeft,
    /// The host painted lines `first_line..=last_line`.
    Paint {
        /// First painted document line.
        first_line: usize,
        /// Last painted document line.
        last_line: usize,
    },
    /// Keyboard focus changed.
    Focus(bool),
}

impl Engine {
    /// Handle one input event, delivering the notifications it causes.
    pub fn handle_event(&mut self, event: HostEvent) {
        self.sync();
        let before = self.selection.clone();
        tracing::trace!(target: "engine.dispatch", ?event, "host event");
        match event {
            HostEvent::Char(ch) => self.add_char(ch),
            HostEvent::Click {
                position,
                modifiers,
            } => self.click(position, modifiers),
            HostEvent::Release {
                position,
                modifiers,
            } => self.release(position, modifiers),
            HostEvent::DoubleClick {
                position,
                modifiers,
            } => self.double_click(position, modifiers),
            HostEvent::MarginClick {
                margin,
                position,
                modifiers,
            } => self.margin_click(margin, position, modifiers),
            HostEvent::PointerMoved { x, y, position } => {
                let position = position.min(self.doc_len());
                if self.timers.pointer_moved(x, y, position) {
                    self.queue(
                        Notification::new(NotificationKind::DwellEnd)
                            .with_position(position)
                            .with_point(x, y),
                    );
                }
            }
            HostEvent::PointerLeft => {
                if self.timers.pointer_left() {
                    self.queue(Notification::new(NotificationKind::DwellEnd));
                }
            }
            HostEvent::Paint {
                first_line,
                last_line,
            } => {
                let end = {
                    let document = self.doc();
                    let buffer = document.buffer();
                    let last = last_line.max(first_line).min(buffer.line_count() - 1);
                    buffer.line_start(last + 1)
                };
                self.ensure_styled_to(end);
                self.queue(Notification::new(NotificationKind::Painted));
            }
            HostEvent::Focus(focus) => self.set_focus(focus),
        }
        self.finish(&before);
    }

    fn click(&mut self, position: usize, modifiers: i32) {
        let position = position.min(self.doc_len());
        let (indicators, style) = {
            let document = self.doc();
            (
                document.decorations().all_on_for(position),
                document.style_at(position),
            )
        };
        if indicators != 0 {
            self.queue(
                Notification::new(NotificationKind::IndicatorClick)
                    .with_position(position)
                    .with_modifiers(modifiers),
            );
        }
        if self.is_hotspot_style(style) {
            self.queue(
                Notification::new(NotificationKind::HotspotClick)
                    .with_position(position)
                    .with_modifiers(modifiers),
            );
        }

        if modifiers & SCMOD_SHIFT != 0 {
            let anchor = self.selection.main_range().anchor;
            self.set_selection(SelectionPosition::new(position), anchor);
        } else if modifiers & SCMOD_CTRL != 0 && self.multiple_selection {
            self.selection.materialize();
            self.selection.add(SelectionRange::caret_at(position));
            self.damage_selection();
        } else {
            self.set_empty_selection(position);
        }
    }

    fn release(&mut self, position: usize, modifiers: i32) {
        let position = position.min(self.doc_len());
        let (indicators, style) = {
            let document = self.doc();
            (
                document.decorations().all_on_for(position),
                document.style_at(position),
            )
        };
        if indicators != 0 {
            self.queue(
                Notification::new(NotificationKind::IndicatorRelease)
                    .with_position(position)
                    .with_modifiers(modifiers),
            );
        }
        if self.is_hotspot_style(style) {
            self.queue(
                Notification::new(NotificationKind::HotspotReleaseClick)
                    .with_position(position)
                    .with_modifiers(modifiers),
            );
        }
    }

    /// Select the word under the pointer.
    fn double_click(&mut self, position: usize, modifiers: i32) {
        let position = position.min(self.doc_len());
        let (start, end, line, style) = {
            let document = self.doc();
            (
                document.word_start_position(position, true),
                document.word_end_position(position, true),
                document.buffer().line_of(position),
                document.style_at(position),
            )
        };
        self.set_selection(SelectionPosition::new(end), SelectionPosition::new(start));
        self.queue(
            Notification::new(NotificationKind::DoubleClick)
                .with_position(position)
                .with_line(line)
                .with_modifiers(modifiers),
        );
        if self.is_hotspot_style(style) {
            self.queue(
                Notification::new(NotificationKind::HotspotDoubleClick)
                    .with_position(position)
                    .with_modifiers(modifiers),
            );
        }
    }

    fn margin_click(&mut self, margin: usize, position: usize, modifiers: i32) {
        if margin > SC_MAX_MARGIN {
            return;
        }
        let (line, line_start) = {
            let document = self.doc();
            let buffer = document.buffer();
            let line = buffer.line_of(position.min(buffer.len()));
            (line, buffer.line_start(line))
        };
        let def = self.margins[margin];
        if self.automatic_fold & SC_AUTOMATICFOLD_CLICK != 0 && def.mask & SC_MASK_FOLDERS != 0 {
            tracing::debug!(target: "engine.fold", line, modifiers, "fold margin click");
            self.fold_margin_click(line, modifiers);
        } else if def.sensitive {
            self.queue(
                Notification::new(NotificationKind::MarginClick)
                    .with_position(line_start)
                    .with_margin(margin)
                    .with_modifiers(modifiers),
            );
        }
    }
}
