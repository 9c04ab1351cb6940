//! Per-line margin text, annotations and margin definitions.

/// Symbol margin.
pub const SC_MARGIN_SYMBOL: i32 = 0;
/// Line number margin.
pub const SC_MARGIN_NUMBER: i32 = 1;
/// Text margin.
pub const SC_MARGIN_TEXT: i32 = 4;
/// Highest margin index.
pub const SC_MAX_MARGIN: usize = 4;
/// Marker mask bits used by fold markers.
pub const SC_MASK_FOLDERS: u32 = 0xFE00_0000;

/// Annotations are hidden.
pub const ANNOTATION_HIDDEN: i32 = 0;
/// Annotations are drawn unboxed.
pub const ANNOTATION_STANDARD: i32 = 1;
/// Annotations are drawn in a box.
pub const ANNOTATION_BOXED: i32 = 2;

/// Text attached to a line, with a single style or one style per character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    /// The text itself.
    pub text: String,
    /// Style used when `styles` is absent.
    pub style: u8,
    /// Per-character styles.
    pub styles: Option<Vec<u8>>,
}

impl StyledText {
    /// Number of display lines the text occupies.
    pub fn line_count(&self) -> usize {
        self.text.chars().filter(|c| *c == '\n').count() + 1
    }
}

/// Optional styled text per document line, renumbered with the line index.
#[derive(Debug, Clone, Default)]
pub struct LineAnnotations {
    lines: Vec<Option<StyledText>>,
}

impl LineAnnotations {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `line`.
    pub fn get(&self, line: usize) -> Option<&StyledText> {
        self.lines.get(line).and_then(|l| l.as_ref())
    }

    fn slot(&mut self, line: usize) -> &mut Option<StyledText> {
        if line >= self.lines.len() {
            self.lines.resize(line + 1, None);
        }
        &mut self.lines[line]
    }

    /// Set or clear the text of `line`. Setting the text resets the per-character styles.
    pub fn set_text(&mut self, line: usize, text: Option<&str>) {
        match text {
            Some(text) => {
                let style = self.get(line).map(|t| t.style).unwrap_or(0);
                *self.slot(line) = Some(StyledText {
                    text: text.to_string(),
                    style,
                    styles: None,
                });
            }
            None => {
                if line < self.lines.len() {
                    self.lines[line] = None;
                }
            }
        }
    }

    /// Text of `line`, empty if none.
    pub fn text(&self, line: usize) -> String {
        self.get(line).map(|t| t.text.clone()).unwrap_or_default()
    }

    /// Set the single style of `line`.
    pub fn set_style(&mut self, line: usize, style: u8) {
        let entry = self.slot(line).get_or_insert_with(StyledText::default);
        entry.style = style;
        entry.styles = None;
    }

    /// Single style of `line`.
    pub fn style(&self, line: usize) -> u8 {
        self.get(line).map(|t| t.style).unwrap_or(0)
    }

    /// Set per-character styles of `line`, truncated or zero-padded to the text length.
    pub fn set_styles(&mut self, line: usize, styles: &[u8]) {
        let entry = self.slot(line).get_or_insert_with(StyledText::default);
        let len = entry.text.chars().count();
        let mut styles = styles.to_vec();
        styles.resize(len, 0);
        entry.styles = Some(styles);
    }

    /// Per-character styles of `line`; expands the single style when none were set.
    pub fn styles(&self, line: usize) -> Vec<u8> {
        match self.get(line) {
            Some(StyledText {
                styles: Some(styles),
                ..
            }) => styles.clone(),
            Some(entry) => vec![entry.style; entry.text.chars().count()],
            None => Vec::new(),
        }
    }

    /// Display lines of the annotation on `line`; zero without text.
    pub fn line_count(&self, line: usize) -> usize {
        self.get(line)
            .filter(|t| !t.text.is_empty())
            .map(StyledText::line_count)
            .unwrap_or(0)
    }

    /// Drop every entry.
    pub fn clear_all(&mut self) {
        self.lines.clear();
    }

    /// Returns `true` when any line carries text.
    pub fn has_any(&self) -> bool {
        self.lines.iter().any(|l| l.is_some())
    }

    /// Open `count` empty entries after `line`.
    pub fn insert_lines(&mut self, line: usize, count: usize) {
        let at = line + 1;
        if at < self.lines.len() {
            self.lines
                .splice(at..at, std::iter::repeat_n(None, count));
        }
    }

    /// Remove `count` entries after `line`.
    pub fn remove_lines(&mut self, line: usize, count: usize) {
        let at = line + 1;
        if at < self.lines.len() {
            let end = (at + count).min(self.lines.len());
            self.lines.drain(at..end);
        }
    }
}

/// Definition of one margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarginDef {
    /// `SC_MARGIN_*` type.
    pub kind: i32,
    /// Width in pixels.
    pub width: i32,
    /// Marker mask.
    pub mask: u32,
    /// Clicks are reported to the host.
    pub sensitive: bool,
}

impl MarginDef {
    /// Default definitions for every margin: line numbers, symbols, and a fold margin
    /// without width.
    pub fn defaults() -> [MarginDef; SC_MAX_MARGIN + 1] {
        let mut margins = [MarginDef {
            kind: SC_MARGIN_SYMBOL,
            width: 0,
            mask: 0,
            sensitive: false,
        }; SC_MAX_MARGIN + 1];
        margins[0].kind = SC_MARGIN_NUMBER;
        margins[1].width = 16;
        margins[1].mask = !SC_MASK_FOLDERS;
        margins[2].mask = SC_MASK_FOLDERS;
        margins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_styles() {
        let mut store = LineAnnotations::new();
        store.set_text(2, Some("ab\ncd"));
        assert_eq!(store.text(2), "ab\ncd");
        assert_eq!(store.line_count(2), 2);
        assert_eq!(store.styles(2), vec![0; 5]);
        store.set_styles(2, &[1, 2]);
        assert_eq!(store.styles(2), vec![1, 2, 0, 0, 0]);
        store.set_style(2, 7);
        assert_eq!(store.styles(2), vec![7; 5]);
        store.set_text(2, None);
        assert_eq!(store.line_count(2), 0);
        assert!(!store.has_any());
    }

    #[test]
    fn test_renumbering() {
        let mut store = LineAnnotations::new();
        store.set_text(1, Some("one"));
        store.set_text(3, Some("three"));
        store.insert_lines(0, 2);
        assert_eq!(store.text(3), "one");
        assert_eq!(store.text(5), "three");
        store.remove_lines(3, 2);
        assert_eq!(store.text(3), "one");
        assert_eq!(store.text(4), "");
    }

    #[test]
    fn test_margin_defaults() {
        let margins = MarginDef::defaults();
        assert_eq!(margins[0].kind, SC_MARGIN_NUMBER);
        assert_eq!(margins[2].mask, SC_MASK_FOLDERS);
        assert!(!margins[4].sensitive);
    }
}
