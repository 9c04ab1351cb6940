//! Line ending modes.
//!
//! The buffer accepts any mix of `\r\n`, `\r` and `\n`. The document's [`EolMode`] is the
//! sequence inserted for new lines and the target of an explicit conversion.

use serde::{Deserialize, Serialize};

/// Newline sequence used by new-line commands and EOL conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EolMode {
    /// Windows-style CRLF (`"\r\n"`).
    CrLf,
    /// Classic Mac CR (`'\r'`).
    Cr,
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
}

impl EolMode {
    /// Decode a protocol value (`0` CRLF, `1` CR, `2` LF).
    pub fn from_code(code: isize) -> Option<Self> {
        match code {
            0 => Some(Self::CrLf),
            1 => Some(Self::Cr),
            2 => Some(Self::Lf),
            _ => None,
        }
    }

    /// Protocol value of this mode.
    pub fn code(self) -> isize {
        match self {
            Self::CrLf => 0,
            Self::Cr => 1,
            Self::Lf => 2,
        }
    }

    /// The newline sequence.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
            Self::Lf => "\n",
        }
    }

    /// Detect the dominant line ending of a text; LF when there are no breaks.
    pub fn detect_in_text(text: &str) -> Self {
        let (mut crlf, mut cr, mut lf) = (0usize, 0usize, 0usize);
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' if chars.peek() == Some(&'\n') => {
                    chars.next();
                    crlf += 1;
                }
                '\r' => cr += 1,
                '\n' => lf += 1,
                _ => {}
            }
        }
        if crlf > cr && crlf > lf {
            Self::CrLf
        } else if cr > lf {
            Self::Cr
        } else {
            Self::Lf
        }
    }

    /// Rewrite every line break in `text` to this mode.
    pub fn apply_to_text(self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    out.push_str(self.as_str());
                }
                '\n' => out.push_str(self.as_str()),
                other => out.push(other),
            }
        }
        out
    }
}
