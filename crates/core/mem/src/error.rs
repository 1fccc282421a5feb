//! Allocation error types

use core::fmt;

use crate::arena::ArenaId;

/// Memory result type
pub type AllocResult<T> = Result<T, AllocError>;

/// Errors returned by the arena and the kernel heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Not enough room left below the arena capacity
    OutOfMemory {
        /// Bytes asked for
        requested: usize,
        /// Bytes still free when the request was made
        available: usize,
    },
    /// Blob handed to an arena that did not carve it
    ForeignBlob { owner: ArenaId, arena: ArenaId },
    /// Access past the end of a blob
    OutOfBounds { len: usize, blob_len: usize },
}

impl AllocError {
    /// Convert to errno-style error code
    pub fn to_errno(&self) -> i32 {
        match self {
            AllocError::OutOfMemory { .. } => -12, // ENOMEM
            AllocError::ForeignBlob { .. } => -14, // EFAULT
            AllocError::OutOfBounds { .. } => -34, // ERANGE
        }
    }
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested, available } => write!(
                f,
                "out of memory: requested {} bytes, {} available",
                requested, available
            ),
            Self::ForeignBlob { owner, arena } => {
                write!(f, "blob belongs to arena {:?}, not {:?}", owner, arena)
            }
            Self::OutOfBounds { len, blob_len } => {
                write!(f, "{} bytes out of bounds of a {} byte blob", len, blob_len)
            }
        }
    }
}
