//! Message parameters and results.
//!
//! Every message takes two [`Param`] values and yields one [`Reply`]. Integers cover
//! positions, lines, flags and booleans; text crosses the boundary as owned strings; byte
//! arrays carry style runs; documents travel as handles.

use crate::document::DocumentHandle;

/// A message argument.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Param {
    /// Absent argument, read as `0`.
    #[default]
    None,
    /// Integer argument.
    Int(isize),
    /// Text argument.
    Text(String),
    /// Byte array argument (styles, styled text).
    Bytes(Vec<u8>),
    /// Document argument.
    Document(DocumentHandle),
}

impl Param {
    /// Integer value; text and bytes read as their length, absent values as `0`.
    pub fn as_int(&self) -> isize {
        match self {
            Self::None | Self::Document(_) => 0,
            Self::Int(value) => *value,
            Self::Text(text) => text.chars().count() as isize,
            Self::Bytes(bytes) => bytes.len() as isize,
        }
    }

    /// Text value; bytes are decoded lossily and other kinds are empty.
    pub fn as_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        }
    }

    /// Byte value; text contributes its UTF-8 bytes.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes.clone(),
            Self::Text(text) => text.as_bytes().to_vec(),
            _ => Vec::new(),
        }
    }

    /// Document value.
    pub fn as_document(&self) -> Option<DocumentHandle> {
        match self {
            Self::Document(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Returns `true` for an absent argument.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<isize> for Param {
    fn from(value: isize) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Self::Int(value as isize)
    }
}

impl From<usize> for Param {
    fn from(value: usize) -> Self {
        Self::Int(value as isize)
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Self::Int(value as isize)
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Int(value as isize)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Param {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Param {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<DocumentHandle> for Param {
    fn from(value: DocumentHandle) -> Self {
        Self::Document(value)
    }
}

impl From<Option<DocumentHandle>> for Param {
    fn from(value: Option<DocumentHandle>) -> Self {
        value.map(Self::Document).unwrap_or_default()
    }
}

impl From<()> for Param {
    fn from(_: ()) -> Self {
        Self::None
    }
}

/// A message result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Integer result.
    Int(isize),
    /// Text result.
    Text(String),
    /// Byte result (styled text, style arrays).
    Bytes(Vec<u8>),
    /// Document result; `None` is a null document.
    Document(Option<DocumentHandle>),
}

impl Default for Reply {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl Reply {
    /// Integer value; text and bytes report their length.
    pub fn as_int(&self) -> isize {
        match self {
            Self::Int(value) => *value,
            Self::Text(text) => text.chars().count() as isize,
            Self::Bytes(bytes) => bytes.len() as isize,
            Self::Document(handle) => handle.as_ref().map(|h| h.id() as isize).unwrap_or(0),
        }
    }

    /// Text value, empty for other kinds.
    pub fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            _ => String::new(),
        }
    }

    /// Byte value, empty for integers and documents.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.into_bytes(),
            _ => Vec::new(),
        }
    }

    /// Document value.
    pub fn into_document(self) -> Option<DocumentHandle> {
        match self {
            Self::Document(handle) => handle,
            _ => None,
        }
    }
}

impl From<isize> for Reply {
    fn from(value: isize) -> Self {
        Self::Int(value)
    }
}

impl From<usize> for Reply {
    fn from(value: usize) -> Self {
        Self::Int(value as isize)
    }
}

impl From<i32> for Reply {
    fn from(value: i32) -> Self {
        Self::Int(value as isize)
    }
}

impl From<u32> for Reply {
    fn from(value: u32) -> Self {
        Self::Int(value as isize)
    }
}

impl From<u8> for Reply {
    fn from(value: u8) -> Self {
        Self::Int(value as isize)
    }
}

impl From<bool> for Reply {
    fn from(value: bool) -> Self {
        Self::Int(value as isize)
    }
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Reply {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_conversions() {
        assert_eq!(Param::from(5usize).as_int(), 5);
        assert_eq!(Param::from(true).as_int(), 1);
        assert_eq!(Param::from("héllo").as_int(), 5);
        assert_eq!(Param::from(()).as_int(), 0);
        assert_eq!(Param::from(vec![104u8, 105]).as_text(), "hi");
    }

    #[test]
    fn test_reply_text_length() {
        let reply = Reply::from("abc".to_string());
        assert_eq!(reply.as_int(), 3);
        assert_eq!(reply.into_text(), "abc");
        assert_eq!(Reply::default().as_int(), 0);
    }
}
