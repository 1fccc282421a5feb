//! Content buffer for editing sessions
//!
//! Append-only byte store with a fixed capacity, carved from the arena when
//! the buffer is created. The content is always NUL-terminated, so at most
//! `capacity - 1` bytes of text fit.

use armos_apps::until_nul;
use armos_mem::{AllocResult, Arena, Blob};

use crate::error::{EditorError, EditorResult};

/// Default content capacity
pub const DEFAULT_CONTENT_CAPACITY: usize = 4096;

/// What to do with an append that does not fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// Drop the whole text and report `AppendStatus::Dropped`
    #[default]
    RejectWhole,
    /// Fail with `EditorError::ContentOverflow`
    Error,
}

/// Outcome of a successful append call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendStatus {
    /// Text copied in full
    Appended { bytes: usize },
    /// Text discarded in full; the buffer is unchanged
    Dropped { needed: usize, capacity: usize },
}

impl AppendStatus {
    pub fn is_appended(&self) -> bool {
        matches!(self, AppendStatus::Appended { .. })
    }
}

/// Bounded, append-only text store
#[derive(Debug)]
pub struct ContentBuffer {
    /// Backing range; its length is the capacity
    store: Blob,
    /// Bytes of content, terminator excluded (0 <= len < capacity once written)
    len: usize,
    overflow: OverflowPolicy,
}

impl ContentBuffer {
    /// Allocate a buffer of `capacity` bytes from the arena
    pub fn new(arena: &mut Arena, capacity: usize, overflow: OverflowPolicy) -> AllocResult<Self> {
        let mut store = arena.allocate(capacity)?;
        if let Some(first) = arena.bytes_mut(&mut store).first_mut() {
            *first = 0;
        }
        Ok(ContentBuffer { store, len: 0, overflow })
    }

    /// Fixed capacity, terminator included
    pub fn capacity(&self) -> usize {
        self.store.len()
    }

    /// Content length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer holds no text
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Arena range backing the buffer
    pub fn blob(&self) -> &Blob {
        &self.store
    }

    /// Append text
    ///
    /// `text` is read up to its first NUL. When `len + text.len()` reaches the
    /// capacity the text is refused as a whole, nothing is partially copied.
    pub fn append(&mut self, arena: &mut Arena, text: &[u8]) -> EditorResult<AppendStatus> {
        let text = until_nul(text);
        let capacity = self.capacity();
        let needed = self.len.saturating_add(text.len());

        if needed >= capacity {
            return match self.overflow {
                OverflowPolicy::RejectWhole => {
                    log::debug!(
                        "editor: dropped {} bytes ({} needed, capacity {})",
                        text.len(), needed, capacity
                    );
                    Ok(AppendStatus::Dropped { needed, capacity })
                }
                OverflowPolicy::Error => Err(EditorError::ContentOverflow { needed, capacity }),
            };
        }

        let bytes = arena.try_bytes_mut(&mut self.store).map_err(EditorError::Storage)?;
        bytes[self.len..needed].copy_from_slice(text);
        bytes[needed] = 0;
        self.len = needed;

        Ok(AppendStatus::Appended { bytes: text.len() })
    }

    /// Current content, terminator excluded
    ///
    /// # Panics
    ///
    /// Panics if `arena` is not the arena the buffer was carved from.
    pub fn content<'a>(&self, arena: &'a Arena) -> &'a [u8] {
        &arena.bytes(&self.store)[..self.len]
    }

    /// Current content including the terminator
    ///
    /// Empty for a zero-capacity buffer, which has no room for one.
    pub fn content_with_terminator<'a>(&self, arena: &'a Arena) -> &'a [u8] {
        let bytes = arena.bytes(&self.store);
        &bytes[..(self.len + 1).min(bytes.len())]
    }

    /// Forget the content; the storage is kept, not reclaimed
    pub fn clear(&mut self, arena: &mut Arena) {
        self.len = 0;
        if let Some(first) = arena.try_bytes_mut(&mut self.store).ok().and_then(|b| b.first_mut()) {
            *first = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use armos_mem::AllocError;

    #[test]
    fn test_append() {
        let mut arena = Arena::new(64);
        let mut buf = ContentBuffer::new(&mut arena, 32, OverflowPolicy::default()).unwrap();
        assert_eq!(buf.append(&mut arena, b"hello").unwrap(), AppendStatus::Appended { bytes: 5 });
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.content(&arena), b"hello");
        assert_eq!(buf.content_with_terminator(&arena), b"hello\0");
    }

    #[test]
    fn test_fill_to_capacity_minus_one() {
        let mut arena = Arena::new(64);
        let mut buf = ContentBuffer::new(&mut arena, 16, OverflowPolicy::default()).unwrap();
        let text = vec![b'a'; 15];
        assert!(buf.append(&mut arena, &text).unwrap().is_appended());
        assert_eq!(buf.len(), 15);
        assert_eq!(buf.content_with_terminator(&arena)[15], 0);
    }

    #[test]
    fn test_exact_capacity_rejected_whole() {
        let mut arena = Arena::new(64);
        let mut buf = ContentBuffer::new(&mut arena, 16, OverflowPolicy::default()).unwrap();
        buf.append(&mut arena, b"12345").unwrap();

        let text = vec![b'b'; 11];
        let status = buf.append(&mut arena, &text).unwrap();
        assert_eq!(status, AppendStatus::Dropped { needed: 16, capacity: 16 });
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.content(&arena), b"12345");

        // One byte less fits
        assert!(buf.append(&mut arena, &text[..10]).unwrap().is_appended());
        assert_eq!(buf.len(), 15);
    }

    #[test]
    fn test_strict_overflow() {
        let mut arena = Arena::new(64);
        let mut buf = ContentBuffer::new(&mut arena, 8, OverflowPolicy::Error).unwrap();
        let err = buf.append(&mut arena, b"12345678").unwrap_err();
        assert_eq!(err, EditorError::ContentOverflow { needed: 8, capacity: 8 });
        assert!(buf.is_empty());
    }

    #[test]
    fn test_append_stops_at_nul() {
        let mut arena = Arena::new(64);
        let mut buf = ContentBuffer::new(&mut arena, 32, OverflowPolicy::default()).unwrap();
        buf.append(&mut arena, b"ab\0cd").unwrap();
        assert_eq!(buf.content(&arena), b"ab");
    }

    #[test]
    fn test_out_of_memory() {
        let mut arena = Arena::new(100);
        let err = ContentBuffer::new(&mut arena, 4096, OverflowPolicy::default()).unwrap_err();
        assert_eq!(err, AllocError::OutOfMemory { requested: 4096, available: 100 });
        assert_eq!(arena.watermark(), 0);
    }

    #[test]
    fn test_zero_capacity_drops_everything() {
        let mut arena = Arena::new(8);
        let mut buf = ContentBuffer::new(&mut arena, 0, OverflowPolicy::default()).unwrap();
        assert!(!buf.append(&mut arena, b"").unwrap().is_appended());
        assert_eq!(buf.content_with_terminator(&arena), b"");
    }

    #[test]
    fn test_append_into_wrong_arena() {
        let mut arena = Arena::new(64);
        let mut other = Arena::new(64);
        let mut buf = ContentBuffer::new(&mut arena, 32, OverflowPolicy::default()).unwrap();
        buf.append(&mut arena, b"keep").unwrap();

        let err = buf.append(&mut other, b"lost").unwrap_err();
        assert!(matches!(err, EditorError::Storage(AllocError::ForeignBlob { .. })));
        assert_eq!(buf.content(&arena), b"keep");
        let untouched = other.allocate(4).unwrap();
        assert_eq!(other.bytes(&untouched), &[0u8; 4]);
    }

    #[test]
    fn test_clear_keeps_storage() {
        let mut arena = Arena::new(64);
        let mut buf = ContentBuffer::new(&mut arena, 32, OverflowPolicy::default()).unwrap();
        buf.append(&mut arena, b"text").unwrap();
        let watermark = arena.watermark();

        buf.clear(&mut arena);
        assert!(buf.is_empty());
        assert_eq!(buf.content_with_terminator(&arena), b"\0");
        assert_eq!(arena.watermark(), watermark);

        buf.append(&mut arena, b"new").unwrap();
        assert_eq!(buf.content(&arena), b"new");
    }
}
