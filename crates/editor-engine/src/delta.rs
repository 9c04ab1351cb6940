//! Structured document modifications.
//!
//! Every mutation of a [`crate::Document`] is described by a [`Modification`] expressed in
//! **character offsets**. Attached engines consume these records to translate their own
//! position-bearing state and to report `Modified` notifications to the host.

/// Text was inserted.
pub const SC_MOD_INSERTTEXT: u32 = 0x1;
/// Text was deleted.
pub const SC_MOD_DELETETEXT: u32 = 0x2;
/// Styling changed.
pub const SC_MOD_CHANGESTYLE: u32 = 0x4;
/// A fold level changed.
pub const SC_MOD_CHANGEFOLD: u32 = 0x8;
/// Change performed directly by a caller.
pub const SC_PERFORMED_USER: u32 = 0x10;
/// Change performed by undo.
pub const SC_PERFORMED_UNDO: u32 = 0x20;
/// Change performed by redo.
pub const SC_PERFORMED_REDO: u32 = 0x40;
/// Part of a multi-step undo or redo.
pub const SC_MULTISTEPUNDOREDO: u32 = 0x80;
/// Final step of an undo or redo.
pub const SC_LASTSTEPINUNDOREDO: u32 = 0x100;
/// Multi-line change made by undo or redo.
pub const SC_MULTILINEUNDOREDO: u32 = 0x1000;
/// First action of an undo group.
pub const SC_STARTACTION: u32 = 0x2000;
/// Indicator values changed.
pub const SC_MOD_CHANGEINDICATOR: u32 = 0x4000;
/// Per-line state changed.
pub const SC_MOD_CHANGELINESTATE: u32 = 0x8000;
/// Margin text changed.
pub const SC_MOD_CHANGEMARGIN: u32 = 0x10000;
/// Annotation text changed.
pub const SC_MOD_CHANGEANNOTATION: u32 = 0x20000;
/// A container undo action was undone or redone.
pub const SC_MOD_CONTAINER: u32 = 0x40000;
/// Every modification flag.
pub const SC_MODEVENTMASKALL: u32 = 0xFFFFF;

/// One change to a shared document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modification {
    /// `SC_MOD_*` / `SC_PERFORMED_*` flags.
    pub flags: u32,
    /// Start position of the change.
    pub position: usize,
    /// Length in characters of the inserted, deleted or restyled range.
    pub length: usize,
    /// Signed change in line count.
    pub lines_added: isize,
    /// Inserted or deleted text.
    pub text: Option<String>,
    /// Line for line-scoped changes (fold, line state, margin, annotation).
    pub line: usize,
    /// New fold level for fold changes.
    pub fold_level_now: i32,
    /// Previous fold level for fold changes.
    pub fold_level_prev: i32,
    /// Token of a container undo action.
    pub token: isize,
    /// Change in annotation line count.
    pub annotation_lines_added: isize,
}

impl Modification {
    /// Text insertion record.
    pub fn insert(position: usize, text: &str, lines_added: isize, performed: u32) -> Self {
        Self {
            flags: SC_MOD_INSERTTEXT | performed,
            position,
            length: text.chars().count(),
            lines_added,
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Text deletion record.
    pub fn delete(position: usize, text: &str, lines_added: isize, performed: u32) -> Self {
        Self {
            flags: SC_MOD_DELETETEXT | performed,
            position,
            length: text.chars().count(),
            lines_added,
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    /// Range-scoped change without text (style, indicator).
    pub fn range(flags: u32, position: usize, length: usize) -> Self {
        Self {
            flags,
            position,
            length,
            ..Self::default()
        }
    }

    /// Line-scoped change (line state, margin, annotation).
    pub fn line(flags: u32, line: usize) -> Self {
        Self {
            flags,
            line,
            ..Self::default()
        }
    }

    /// Returns `true` for insertions.
    pub fn is_insert(&self) -> bool {
        self.flags & SC_MOD_INSERTTEXT != 0
    }

    /// Returns `true` for deletions.
    pub fn is_delete(&self) -> bool {
        self.flags & SC_MOD_DELETETEXT != 0
    }

    /// Exclusive end of the touched range.
    pub fn end(&self) -> usize {
        self.position.saturating_add(self.length)
    }
}

/// An event delivered through a document's per-engine journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    /// Content or attribute change.
    Modified(Modification),
    /// The save point was reached (`true`) or left (`false`).
    SavePoint(bool),
    /// A modification was refused because the document is read-only.
    ModifyAttempt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_record_measures_chars() {
        let m = Modification::insert(3, "héllo", 0, SC_PERFORMED_USER);
        assert!(m.is_insert());
        assert!(!m.is_delete());
        assert_eq!(m.length, 5);
        assert_eq!(m.end(), 8);
        assert_eq!(m.flags, SC_MOD_INSERTTEXT | SC_PERFORMED_USER);
    }
}
