//! Monotonic Arena
//!
//! A single flat region handed out by bumping a watermark. There is no
//! alignment, no free list and no coalescing: every successful allocation
//! returns `[watermark, watermark + size)` and moves the watermark to its end.
//!
//! Ranges are never reclaimed. [`Arena::release`] accepts a range back so
//! callers can express the hand-off, but the watermark stays where it is and
//! the bytes are never handed out again.

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::{AllocError, AllocResult};

/// Source of arena identities
static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

/// Identity of an arena, stamped into every blob it hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaId(u32);

impl ArenaId {
    fn next() -> Self {
        ArenaId(NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// An exclusively owned byte range inside an [`Arena`]
///
/// Blobs are arena-relative (start + length), never raw addresses. A blob
/// is not `Clone`: whoever holds it is the only one that can reach its bytes
/// through [`Arena::bytes_mut`].
#[derive(Debug, PartialEq, Eq)]
pub struct Blob {
    arena: ArenaId,
    start: usize,
    len: usize,
}

impl Blob {
    /// Offset of the first byte within the arena
    pub fn start(&self) -> usize {
        self.start
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the blob covers zero bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Arena-relative byte range covered by this blob
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }

    /// Arena this blob was carved from
    pub fn arena(&self) -> ArenaId {
        self.arena
    }
}

/// Arena usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaStats {
    /// Total arena size
    pub capacity: usize,
    /// Bytes below the watermark
    pub used: usize,
    /// Bytes above the watermark
    pub remaining: usize,
    /// Successful allocations so far
    pub allocations: usize,
}

impl ArenaStats {
    /// Get usage percentage (0-100)
    pub fn usage_percent(&self) -> u8 {
        if self.capacity == 0 {
            return 0;
        }
        ((self.used * 100) / self.capacity) as u8
    }
}

/// Fixed-capacity bump allocator
pub struct Arena {
    id: ArenaId,
    storage: Box<[u8]>,
    /// Watermark: 0 <= offset <= storage.len()
    offset: usize,
    allocations: usize,
}

impl Arena {
    /// Create an arena with `capacity` zeroed bytes
    ///
    /// Aborts through the global allocator if the backing region cannot be
    /// obtained. Kernel code should prefer [`Arena::try_new`].
    pub fn new(capacity: usize) -> Self {
        Self::from_storage(vec![0u8; capacity].into_boxed_slice())
    }

    /// Create an arena, reporting a heap too small for the region
    ///
    /// With the kernel heap registered as the global allocator, its free
    /// space is checked before anything is reserved.
    pub fn try_new(capacity: usize) -> AllocResult<Self> {
        #[cfg(feature = "global-allocator")]
        crate::heap::ensure_room(capacity)?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| AllocError::OutOfMemory { requested: capacity, available: 0 })?;
        storage.resize(capacity, 0);
        Ok(Self::from_storage(storage.into_boxed_slice()))
    }

    fn from_storage(storage: Box<[u8]>) -> Self {
        let arena = Arena {
            id: ArenaId::next(),
            storage,
            offset: 0,
            allocations: 0,
        };
        log::debug!("arena {:?}: {} bytes", arena.id, arena.capacity());
        arena
    }

    /// Identity stamped into this arena's blobs
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Total size of the region
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Current allocation offset
    pub fn watermark(&self) -> usize {
        self.offset
    }

    /// Bytes still available above the watermark
    pub fn remaining(&self) -> usize {
        self.capacity() - self.offset
    }

    /// Get usage statistics
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            capacity: self.capacity(),
            used: self.offset,
            remaining: self.remaining(),
            allocations: self.allocations,
        }
    }

    /// Allocate exactly `size` bytes
    ///
    /// Fails with `OutOfMemory` when `watermark + size > capacity`. A failed
    /// call leaves the arena untouched; there is no partial allocation.
    pub fn allocate(&mut self, size: usize) -> AllocResult<Blob> {
        let available = self.remaining();
        if size > available {
            log::warn!(
                "arena {:?}: out of memory ({} requested, {} available)",
                self.id, size, available
            );
            return Err(AllocError::OutOfMemory { requested: size, available });
        }

        let start = self.offset;
        self.offset += size;
        self.allocations += 1;
        log::trace!(
            "arena {:?}: {} bytes at {:#x}, watermark {:#x}",
            self.id, size, start, self.offset
        );

        Ok(Blob { arena: self.id, start, len: size })
    }

    /// Give a blob back
    ///
    /// No reclamation: the range stays below the watermark for the lifetime
    /// of the arena. A blob from another arena is ignored.
    pub fn release(&mut self, blob: Blob) {
        if !self.owns(&blob) {
            log::warn!("arena {:?}: release of foreign blob from {:?}", self.id, blob.arena);
            return;
        }
        log::trace!("arena {:?}: release of {:#x} ignored", self.id, blob.start);
    }

    /// Check that `blob` was carved from this arena
    pub fn owns(&self, blob: &Blob) -> bool {
        blob.arena == self.id
    }

    /// Check that `blob` belongs here and covers at least `len` bytes
    pub fn check_range(&self, blob: &Blob, len: usize) -> AllocResult<()> {
        if !self.owns(blob) {
            return Err(AllocError::ForeignBlob { owner: blob.arena, arena: self.id });
        }
        if len > blob.len {
            return Err(AllocError::OutOfBounds { len, blob_len: blob.len });
        }
        Ok(())
    }

    /// Read the bytes of a blob
    pub fn try_bytes(&self, blob: &Blob) -> AllocResult<&[u8]> {
        self.check_range(blob, 0)?;
        Ok(&self.storage[blob.range()])
    }

    /// Write access to the bytes of a blob
    pub fn try_bytes_mut(&mut self, blob: &mut Blob) -> AllocResult<&mut [u8]> {
        self.check_range(blob, 0)?;
        Ok(&mut self.storage[blob.range()])
    }

    /// Read the bytes of a blob held by this arena's owner
    ///
    /// # Panics
    ///
    /// Panics if `blob` was carved from another arena.
    pub fn bytes(&self, blob: &Blob) -> &[u8] {
        match self.try_bytes(blob) {
            Ok(bytes) => bytes,
            Err(e) => panic!("arena {:?}: {}", self.id, e),
        }
    }

    /// Write access to the bytes of a blob held by this arena's owner
    ///
    /// # Panics
    ///
    /// Panics if `blob` was carved from another arena.
    pub fn bytes_mut(&mut self, blob: &mut Blob) -> &mut [u8] {
        let id = self.id;
        match self.try_bytes_mut(blob) {
            Ok(bytes) => bytes,
            Err(e) => panic!("arena {:?}: {}", id, e),
        }
    }

    /// Copy the first `len` bytes of `src` to the start of `dst`
    ///
    /// Nothing is copied unless both blobs belong here and cover `len` bytes.
    pub fn copy_between(&mut self, src: &Blob, dst: &mut Blob, len: usize) -> AllocResult<()> {
        self.check_range(src, len)?;
        self.check_range(dst, len)?;
        self.storage.copy_within(src.start..src.start + len, dst.start);
        Ok(())
    }
}
