//! ARMOS memory sizing
//!
//! Every size the memory crates hand out is defined here.
//!
//! # Physical layout (QEMU `virt`, ARM64)
//!
//! ```text
//! 0x0900_0000            PL011 UART (console collaborator)
//! 0x4000_0000            RAM base
//! 0x4008_0000            Kernel image
//! 0x4100_0000 - +4 MiB   Kernel heap (linked_list_allocator)
//!                        └── arena region (1 MiB) carved from the heap
//! ```

// =============================================================================
// Arena
// =============================================================================

/// Default arena capacity (1 MiB)
pub const DEFAULT_ARENA_SIZE: usize = 1024 * 1024;

/// Largest arena the kernel will agree to build (64 MiB)
pub const MAX_ARENA_SIZE: usize = 64 * 1024 * 1024;

// =============================================================================
// Kernel heap
// =============================================================================

/// Default heap start address
pub const DEFAULT_HEAP_START: usize = 0x4100_0000;

/// Default heap size (4 MiB), room for the arena plus registry tables
pub const DEFAULT_HEAP_SIZE: usize = 4 * 1024 * 1024;

/// Maximum heap size (256 MiB)
pub const MAX_HEAP_SIZE: usize = 256 * 1024 * 1024;
