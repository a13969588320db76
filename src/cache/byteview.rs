//! Byte View Module
//!
//! Immutable byte snapshot used as the cached value type for loaded data.

use std::fmt;
use std::sync::Arc;

use crate::cache::Sizeable;

// == Byte View ==
/// Read-only view over a fixed sequence of bytes.
///
/// Construction copies the input and every accessor hands out a copy, so no
/// caller can ever observe or cause a change to the cached bytes. Clones
/// share the same immutable buffer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteView {
    bytes: Arc<[u8]>,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view holding a private copy of `bytes`.
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }

    /// Returns the number of bytes in the view.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    // == Bytes ==
    /// Returns a fresh copy of the underlying bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    // == Text ==
    /// Renders the bytes as a string, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Sizeable for ByteView {
    fn size(&self) -> usize {
        self.len()
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<&str> for ByteView {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("len", &self.bytes.len())
            .field("text", &String::from_utf8_lossy(&self.bytes))
            .finish()
    }
}
