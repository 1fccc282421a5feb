//! ARMOS Memory Management
//!
//! Memory for the ARMOS resource core:
//! - `config` - Default arena and heap sizes (NO magic numbers elsewhere)
//! - `arena` - Monotonic byte arena backing application code and editor buffers
//! - `heap` - Kernel heap the arena region is carved from
//!
//! # Architecture
//!
//! ```text
//! heap.rs  ─── linked_list_allocator over the kernel heap region
//!    │
//!    └── arena.rs ─── one fixed region, watermark allocation, no reclamation
//!           │
//!           ├── armos-apps    (application code blobs)
//!           └── armos-editor  (content buffers)
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use armos_mem::{config, Arena};
//!
//! let mut arena = Arena::try_new(config::DEFAULT_ARENA_SIZE)?;
//! let mut blob = arena.allocate(6)?;
//! arena.bytes_mut(&mut blob).copy_from_slice(b"hello\0");
//! ```

#![no_std]

extern crate alloc;

pub mod arena;
pub mod config;
pub mod error;
pub mod heap;

// Re-export commonly used items
pub use arena::{Arena, ArenaId, ArenaStats, Blob};
pub use config::DEFAULT_ARENA_SIZE;
pub use error::{AllocError, AllocResult};
pub use heap::{init as init_heap, HeapStats, ALLOCATOR};
