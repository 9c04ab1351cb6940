//! Character classification.
//!
//! Word, whitespace and punctuation classes drive word movement and whole-word search. The
//! table is reconfigurable per document, so word boundaries are never hardcoded.

use std::collections::BTreeMap;

/// Classification of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Whitespace and control characters.
    Space,
    /// `\r` and `\n`.
    LineEnd,
    /// Identifier characters.
    Word,
    /// Anything else.
    Punctuation,
}

/// Reconfigurable character class table.
///
/// Latin-1 characters live in a fixed table. Characters above U+00FF fall back to
/// Unicode properties unless explicitly reclassified.
#[derive(Debug, Clone)]
pub struct CharClassifier {
    table: [CharClass; 256],
    extended: BTreeMap<char, CharClass>,
    unicode_words: bool,
}

impl Default for CharClassifier {
    fn default() -> Self {
        let mut classifier = Self {
            table: [CharClass::Punctuation; 256],
            extended: BTreeMap::new(),
            unicode_words: true,
        };
        classifier.set_defaults(true);
        classifier
    }
}

impl CharClassifier {
    /// Create the default classification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the table. When `include_word_class` is `false` every former word character
    /// becomes punctuation.
    pub fn set_defaults(&mut self, include_word_class: bool) {
        for (index, slot) in self.table.iter_mut().enumerate() {
            let ch = index as u8 as char;
            *slot = if ch == '\r' || ch == '\n' {
                CharClass::LineEnd
            } else if index < 0x20 || ch == ' ' {
                CharClass::Space
            } else if include_word_class && (index >= 0x80 || ch.is_ascii_alphanumeric() || ch == '_')
            {
                CharClass::Word
            } else {
                CharClass::Punctuation
            };
        }
        self.extended.clear();
        self.unicode_words = include_word_class;
    }

    /// Assign `class` to every character of `chars`.
    pub fn set_chars(&mut self, chars: &str, class: CharClass) {
        for ch in chars.chars() {
            let code = ch as u32;
            if code < 256 {
                self.table[code as usize] = class;
            } else {
                self.extended.insert(ch, class);
            }
        }
    }

    /// Class of `ch`.
    pub fn classify(&self, ch: char) -> CharClass {
        let code = ch as u32;
        if code < 256 {
            return self.table[code as usize];
        }
        if let Some(class) = self.extended.get(&ch) {
            return *class;
        }
        if ch.is_whitespace() {
            CharClass::Space
        } else if self.unicode_words && ch.is_alphanumeric() {
            CharClass::Word
        } else {
            CharClass::Punctuation
        }
    }

    /// Returns `true` if `ch` is a word character.
    pub fn is_word(&self, ch: char) -> bool {
        self.classify(ch) == CharClass::Word
    }

    /// Printable Latin-1 characters of `class` plus explicit extended entries, in code order.
    pub fn chars_of(&self, class: CharClass) -> String {
        let mut out: String = self
            .table
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == class)
            .map(|(index, _)| index as u8 as char)
            .filter(|ch| !ch.is_control() || class == CharClass::Space || class == CharClass::LineEnd)
            .collect();
        out.extend(
            self.extended
                .iter()
                .filter(|(_, c)| **c == class)
                .map(|(ch, _)| *ch),
        );
        out
    }
}
