//! Kernel heap
//!
//! The arena region is the largest single allocation the kernel makes, so
//! `Arena::try_new` asks the heap for room before reserving it. With the
//! `global-allocator` feature the `LockedHeap` below serves every `alloc`
//! request; host builds and tests keep the system allocator and only use it
//! through explicit `init` on a static region.

use linked_list_allocator::LockedHeap;

use crate::config::{DEFAULT_HEAP_SIZE, DEFAULT_HEAP_START, MAX_HEAP_SIZE};
use crate::error::{AllocError, AllocResult};

#[cfg_attr(feature = "global-allocator", global_allocator)]
pub static ALLOCATOR: LockedHeap = LockedHeap::empty();

/// Hand `[heap_start, heap_start + heap_size)` to the heap
///
/// Returns the size actually managed, clamped to `MAX_HEAP_SIZE`.
///
/// # Safety
///
/// Call once, before the first allocation. The region must be valid,
/// writable and used by nothing else.
pub unsafe fn init(heap_start: usize, heap_size: usize) -> usize {
    let heap_size = heap_size.min(MAX_HEAP_SIZE);
    ALLOCATOR.lock().init(heap_start as *mut u8, heap_size);
    log::info!("heap: {:#x} + {} KiB", heap_start, heap_size / 1024);
    heap_size
}

/// `init` over the region in `config`
///
/// # Safety
///
/// Same as [`init`].
pub unsafe fn init_default() -> usize {
    init(DEFAULT_HEAP_START, DEFAULT_HEAP_SIZE)
}

pub fn stats() -> HeapStats {
    let heap = ALLOCATOR.lock();
    HeapStats {
        used: heap.used(),
        free: heap.free(),
        total: heap.size(),
    }
}

/// Fail with `OutOfMemory` unless the heap has `size` free bytes
pub fn ensure_room(size: usize) -> AllocResult<()> {
    stats().ensure_room(size)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    pub used: usize,
    pub free: usize,
    pub total: usize,
}

impl HeapStats {
    /// Used share of the heap, 0-100
    pub fn usage_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.used * 100) / self.total) as u8
    }

    /// Free bytes are a ceiling: fragmentation may still refuse `size`
    pub fn ensure_room(&self, size: usize) -> AllocResult<()> {
        if size > self.free {
            log::warn!("heap: {} bytes requested, {} free", size, self.free);
            return Err(AllocError::OutOfMemory { requested: size, available: self.free });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::alloc::Layout;
    use core::ptr::addr_of_mut;

    const REGION_SIZE: usize = 8192;

    #[repr(align(16))]
    struct Region([u8; REGION_SIZE]);

    static mut REGION: Region = Region([0; REGION_SIZE]);

    // Only test touching ALLOCATOR
    #[test]
    fn test_init_and_room() {
        let managed = unsafe { init(addr_of_mut!(REGION) as usize, REGION_SIZE) };
        assert_eq!(managed, REGION_SIZE);

        let before = stats();
        assert_eq!(before.total, REGION_SIZE);
        assert_eq!(before.used, 0);
        assert!(ensure_room(4096).is_ok());
        assert_eq!(
            ensure_room(REGION_SIZE + 1),
            Err(AllocError::OutOfMemory { requested: REGION_SIZE + 1, available: REGION_SIZE })
        );

        let layout = Layout::from_size_align(1024, 8).unwrap();
        let ptr = ALLOCATOR.lock().allocate_first_fit(layout).unwrap();
        let after = stats();
        assert!(after.used >= 1024);
        assert!(ensure_room(before.free).is_err());

        unsafe {
            ALLOCATOR.lock().deallocate(ptr, layout);
        }
        assert_eq!(stats().used, 0);
    }

    #[test]
    fn test_usage_percent() {
        let stats = HeapStats { used: 512, free: 1536, total: 2048 };
        assert_eq!(stats.usage_percent(), 25);
        assert_eq!(HeapStats { used: 0, free: 0, total: 0 }.usage_percent(), 0);
    }

    #[test]
    fn test_uninitialized_heap_has_no_room() {
        let empty = HeapStats { used: 0, free: 0, total: 0 };
        assert!(empty.ensure_room(0).is_ok());
        assert!(empty.ensure_room(1).is_err());
    }
}
