//! Notifications sent to the host.
//!
//! The engine reports events through a single callback receiving a [`Notification`]. A
//! notification is a flat record: the `kind` decides which of the other fields carry meaning,
//! the rest stay at their defaults.

use crate::delta::Modification;
use crate::param::Param;

/// Shift was held.
pub const SCMOD_SHIFT: i32 = 1;
/// Control was held.
pub const SCMOD_CTRL: i32 = 2;
/// Alt was held.
pub const SCMOD_ALT: i32 = 4;

/// Content or styling changed.
pub const SC_UPDATE_CONTENT: i32 = 0x1;
/// The selection changed.
pub const SC_UPDATE_SELECTION: i32 = 0x2;

/// What a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    /// Text up to `position` needs styling.
    StyleNeeded,
    /// A character was typed.
    CharAdded,
    /// The document returned to its save point.
    SavePointReached,
    /// The document left its save point.
    SavePointLeft,
    /// An edit was refused because the document is read-only.
    ModifyAttemptReadOnly,
    /// Double click in the text.
    DoubleClick,
    /// Content or selection changed since the last update.
    #[default]
    UpdateUi,
    /// The document changed.
    Modified,
    /// A message was dispatched while recording.
    MacroRecord,
    /// Click in a sensitive margin.
    MarginClick,
    /// A range inside hidden lines was edited and should be shown.
    NeedShown,
    /// Painting finished.
    Painted,
    /// The pointer rested.
    DwellStart,
    /// The pointer moved after resting.
    DwellEnd,
    /// Zoom changed.
    Zoom,
    /// Click on hotspot text.
    HotspotClick,
    /// Double click on hotspot text.
    HotspotDoubleClick,
    /// Press on an indicator.
    IndicatorClick,
    /// Release on an indicator.
    IndicatorRelease,
    /// Release after a hotspot click.
    HotspotReleaseClick,
    /// The engine gained focus.
    FocusIn,
    /// The engine lost focus.
    FocusOut,
}

impl NotificationKind {
    /// `SCN_*` code.
    pub fn code(self) -> u32 {
        match self {
            Self::StyleNeeded => 2000,
            Self::CharAdded => 2001,
            Self::SavePointReached => 2002,
            Self::SavePointLeft => 2003,
            Self::ModifyAttemptReadOnly => 2004,
            Self::DoubleClick => 2006,
            Self::UpdateUi => 2007,
            Self::Modified => 2008,
            Self::MacroRecord => 2009,
            Self::MarginClick => 2010,
            Self::NeedShown => 2011,
            Self::Painted => 2013,
            Self::DwellStart => 2016,
            Self::DwellEnd => 2017,
            Self::Zoom => 2018,
            Self::HotspotClick => 2019,
            Self::HotspotDoubleClick => 2020,
            Self::IndicatorClick => 2023,
            Self::IndicatorRelease => 2024,
            Self::HotspotReleaseClick => 2027,
            Self::FocusIn => 2028,
            Self::FocusOut => 2029,
        }
    }
}

/// One event reported to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    /// What happened.
    pub kind: NotificationKind,
    /// Position of the event.
    pub position: usize,
    /// Typed character.
    pub ch: Option<char>,
    /// `SCMOD_*` modifiers held.
    pub modifiers: i32,
    /// `SC_MOD_*` flags of a modification.
    pub modification_type: u32,
    /// Inserted or deleted text.
    pub text: Option<String>,
    /// Length of the affected range.
    pub length: usize,
    /// Lines added (negative when removed).
    pub lines_added: isize,
    /// Recorded message code.
    pub message: u32,
    /// First recorded argument.
    pub w_param: Param,
    /// Second recorded argument.
    pub l_param: Param,
    /// Affected line.
    pub line: usize,
    /// New fold level.
    pub fold_level_now: i32,
    /// Previous fold level.
    pub fold_level_prev: i32,
    /// Margin clicked.
    pub margin: usize,
    /// Pointer x.
    pub x: i32,
    /// Pointer y.
    pub y: i32,
    /// Token of a container undo action.
    pub token: isize,
    /// Change in annotation line count.
    pub annotation_lines_added: isize,
    /// `SC_UPDATE_*` flags.
    pub updated: i32,
}

impl Notification {
    /// A notification of `kind` with every field at its default.
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// A `Modified` notification describing `modification`.
    pub fn modified(modification: &Modification) -> Self {
        Self {
            kind: NotificationKind::Modified,
            position: modification.position,
            modification_type: modification.flags,
            text: modification.text.clone(),
            length: modification.length,
            lines_added: modification.lines_added,
            line: modification.line,
            fold_level_now: modification.fold_level_now,
            fold_level_prev: modification.fold_level_prev,
            token: modification.token,
            annotation_lines_added: modification.annotation_lines_added,
            ..Self::default()
        }
    }

    /// A `MacroRecord` notification for one dispatched message.
    pub fn macro_record(message: u32, w_param: Param, l_param: Param) -> Self {
        Self {
            kind: NotificationKind::MacroRecord,
            message,
            w_param,
            l_param,
            ..Self::default()
        }
    }

    /// Set the position.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Set the length.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Set the line.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: i32) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: usize) -> Self {
        self.margin = margin;
        self
    }

    /// Set pointer coordinates.
    pub fn with_point(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the typed character.
    pub fn with_char(mut self, ch: char) -> Self {
        self.ch = Some(ch);
        self
    }

    /// Set update flags.
    pub fn with_updated(mut self, updated: i32) -> Self {
        self.updated = updated;
        self
    }
}

/// Receiver of notifications.
pub type NotificationCallback = Box<dyn FnMut(&Notification)>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::{SC_MOD_INSERTTEXT, SC_PERFORMED_USER};

    #[test]
    fn test_modified_copies_fields() {
        let modification = Modification::insert(4, "ab\n", 1, SC_PERFORMED_USER);
        let notification = Notification::modified(&modification);
        assert_eq!(notification.kind.code(), 2008);
        assert_eq!(notification.modification_type, SC_MOD_INSERTTEXT | SC_PERFORMED_USER);
        assert_eq!(notification.length, 3);
        assert_eq!(notification.lines_added, 1);
        assert_eq!(notification.text.as_deref(), Some("ab\n"));
    }

    #[test]
    fn test_builder() {
        let notification = Notification::new(NotificationKind::MarginClick)
            .with_position(10)
            .with_margin(2)
            .with_modifiers(SCMOD_SHIFT | SCMOD_CTRL);
        assert_eq!(notification.kind.code(), 2010);
        assert_eq!(notification.margin, 2);
        assert_eq!(notification.modifiers, 3);
    }
}
