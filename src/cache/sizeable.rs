//! Sizeable Module
//!
//! Byte accounting contract for values admitted into the cache.

// == Sizeable ==
/// A value that can report how many bytes it occupies.
///
/// The LRU engine charges `key.len() + value.size()` against its byte budget
/// for every resident entry.
pub trait Sizeable {
    /// Returns the number of bytes this value accounts for.
    fn size(&self) -> usize;
}

impl Sizeable for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Sizeable for &str {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Sizeable for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}
