//! Target search.
//!
//! Searches run over a half-open character range of the document text. All inputs and outputs
//! are **character offsets**; the regex engine's byte offsets never escape this module.
//!
//! - literal search (escaped and compiled into a regex)
//! - regex search, remembering capture groups for `\1`..`\9` replacement
//! - whole-word and word-start filters driven by a [`CharClassifier`]

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::char_class::{CharClass, CharClassifier};

/// `SCFIND_WHOLEWORD`
pub const SCFIND_WHOLEWORD: isize = 0x2;
/// `SCFIND_MATCHCASE`
pub const SCFIND_MATCHCASE: isize = 0x4;
/// `SCFIND_WORDSTART`
pub const SCFIND_WORDSTART: isize = 0x0010_0000;
/// `SCFIND_REGEXP`
pub const SCFIND_REGEXP: isize = 0x0020_0000;
/// `SCFIND_POSIX`; accepted for compatibility, the pattern syntax is always the same.
pub const SCFIND_POSIX: isize = 0x0040_0000;

/// Options that control how search is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchOptions {
    /// Case-sensitive comparison.
    pub match_case: bool,
    /// Match only complete words.
    pub whole_word: bool,
    /// Match only at the start of a word.
    pub word_start: bool,
    /// Treat the query as a regex pattern.
    pub regex: bool,
}

impl SearchOptions {
    /// Decode `SCFIND_*` flags.
    pub fn from_flags(flags: isize) -> Self {
        Self {
            match_case: flags & SCFIND_MATCHCASE != 0,
            whole_word: flags & SCFIND_WHOLEWORD != 0,
            word_start: flags & SCFIND_WORDSTART != 0,
            regex: flags & SCFIND_REGEXP != 0,
        }
    }
}

/// A match, expressed as a half-open character range plus captured groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
    /// Group texts; index 0 is the whole match. Literal searches only carry group 0.
    pub groups: Vec<Option<String>>,
}

impl SearchMatch {
    /// Returns the length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The provided regex pattern failed to compile.
    #[error("invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
}

#[derive(Debug)]
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn char_count(&self) -> usize {
        self.char_to_byte.len().saturating_sub(1)
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        let clamped = char_offset.min(self.char_count());
        self.char_to_byte
            .get(clamped)
            .copied()
            .unwrap_or(self.text_len)
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

fn compile(query: &str, options: SearchOptions) -> Result<Regex, SearchError> {
    let pattern = if options.regex {
        query.to_string()
    } else {
        regex::escape(query)
    };
    Ok(RegexBuilder::new(&pattern)
        .case_insensitive(!options.match_case)
        .multi_line(true)
        .build()?)
}

/// Returns `true` if a word starts at `position`.
pub fn is_word_start_at(chars: &[char], classifier: &CharClassifier, position: usize) -> bool {
    let Some(ch) = chars.get(position) else {
        return false;
    };
    let class = classifier.classify(*ch);
    if matches!(class, CharClass::Space | CharClass::LineEnd) {
        return false;
    }
    match position.checked_sub(1).and_then(|p| chars.get(p)) {
        Some(prev) => classifier.classify(*prev) != class,
        None => true,
    }
}

/// Returns `true` if a word ends at `position`.
pub fn is_word_end_at(chars: &[char], classifier: &CharClassifier, position: usize) -> bool {
    let Some(prev) = position.checked_sub(1).and_then(|p| chars.get(p)) else {
        return false;
    };
    let class = classifier.classify(*prev);
    if matches!(class, CharClass::Space | CharClass::LineEnd) {
        return false;
    }
    match chars.get(position) {
        Some(next) => classifier.classify(*next) != class,
        None => true,
    }
}

/// Search `text` for `query` between `start` and `end`.
///
/// Searches forward and returns the first match when `start <= end`. Otherwise it searches
/// `[end, start)` and returns the last match. Matches never extend outside the range. An
/// empty literal query finds nothing.
pub fn find_in_range(
    text: &str,
    query: &str,
    options: SearchOptions,
    classifier: &CharClassifier,
    start: usize,
    end: usize,
) -> Result<Option<SearchMatch>, SearchError> {
    if query.is_empty() && !options.regex {
        return Ok(None);
    }
    let re = compile(query, options)?;
    let index = CharIndex::new(text);
    let chars: Vec<char> = if options.whole_word || options.word_start {
        text.chars().collect()
    } else {
        Vec::new()
    };

    let forward = start <= end;
    let lo = start.min(end).min(index.char_count());
    let hi = start.max(end).min(index.char_count());
    let haystack = &text[..index.char_to_byte(hi)];

    let accept = |m: &SearchMatch| {
        if options.whole_word {
            is_word_start_at(&chars, classifier, m.start) && is_word_end_at(&chars, classifier, m.end)
        } else if options.word_start {
            is_word_start_at(&chars, classifier, m.start)
        } else {
            true
        }
    };

    let mut found = None;
    let mut from = lo;
    while from <= hi {
        let Some(caps) = re.captures_at(haystack, index.char_to_byte(from)) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        let candidate = SearchMatch {
            start: index.byte_to_char(whole.start()),
            end: index.byte_to_char(whole.end()),
            groups: caps
                .iter()
                .map(|g| g.map(|g| g.as_str().to_string()))
                .collect(),
        };
        // Rejected or accepted, the next attempt starts one character later.
        from = candidate.start + 1;
        if accept(&candidate) {
            found = Some(candidate);
            if forward {
                break;
            }
        }
    }

    if let Some(found) = &found {
        tracing::trace!(
            target: "engine.search",
            start = found.start,
            end = found.end,
            forward,
            "target search matched"
        );
    }
    Ok(found)
}

/// Expand a regex replacement template.
///
/// `\0`..`\9` insert capture groups (missing groups are empty), `\\` is a backslash, and the
/// C escapes `\n \r \t \a \b \f \v` become control characters. Any other escape is kept
/// literally.
pub fn expand_replacement(template: &str, groups: &[Option<String>]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some(digit @ '0'..='9') => {
                let group = digit as usize - '0' as usize;
                if let Some(Some(text)) = groups.get(group) {
                    out.push_str(text);
                }
            }
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('a') => out.push('\x07'),
            Some('b') => out.push('\x08'),
            Some('f') => out.push('\x0C'),
            Some('v') => out.push('\x0B'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(text: &str, query: &str, flags: isize, start: usize, end: usize) -> Option<(usize, usize)> {
        let classifier = CharClassifier::new();
        find_in_range(text, query, SearchOptions::from_flags(flags), &classifier, start, end)
            .ok()
            .flatten()
            .map(|m| (m.start, m.end))
    }

    #[test]
    fn test_match_must_fit_in_range() {
        assert_eq!(find("hello world", "world", SCFIND_MATCHCASE, 0, 10), None);
        assert_eq!(find("hello world", "world", SCFIND_MATCHCASE, 0, 11), Some((6, 11)));
    }

    #[test]
    fn test_backward_finds_last() {
        assert_eq!(find("ab ab ab", "ab", 0, 8, 0), Some((6, 8)));
        assert_eq!(find("ab ab ab", "ab", 0, 7, 0), Some((3, 5)));
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(find("Hello", "hello", 0, 0, 5), Some((0, 5)));
        assert_eq!(find("Hello", "hello", SCFIND_MATCHCASE, 0, 5), None);
    }

    #[test]
    fn test_whole_word_and_word_start() {
        let text = "cat concat cats";
        assert_eq!(find(text, "cat", SCFIND_WHOLEWORD, 1, 15), None);
        assert_eq!(find(text, "cat", SCFIND_WORDSTART, 1, 15), Some((11, 14)));
        assert_eq!(find(text, "cat", 0, 1, 15), Some((7, 10)));
    }

    #[test]
    fn test_char_offsets_with_multibyte_text() {
        assert_eq!(find("héllo wörld", "wörld", 0, 0, 11), Some((6, 11)));
    }

    #[test]
    fn test_regex_groups_and_replacement() {
        let classifier = CharClassifier::new();
        let found = find_in_range(
            "key=value",
            r"(\w+)=(\w+)",
            SearchOptions::from_flags(SCFIND_REGEXP),
            &classifier,
            0,
            9,
        )
        .unwrap()
        .unwrap();
        assert_eq!(expand_replacement(r"\2:\1\t\\", &found.groups), "value:key\t\\");
        assert_eq!(expand_replacement(r"\9\q", &found.groups), r"\q");
    }

    #[test]
    fn test_invalid_regex() {
        let classifier = CharClassifier::new();
        let err = find_in_range("abc", "(", SearchOptions::from_flags(SCFIND_REGEXP), &classifier, 0, 3);
        assert!(matches!(err, Err(SearchError::InvalidRegex(_))));
    }

    #[test]
    fn test_empty_literal_finds_nothing() {
        assert_eq!(find("abc", "", 0, 0, 3), None);
    }
}
