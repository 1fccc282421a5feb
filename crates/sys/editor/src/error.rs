//! Editor error types

use core::fmt;

use armos_apps::NameError;
use armos_mem::AllocError;

/// Editor result type
pub type EditorResult<T> = Result<T, EditorError>;

/// Editor error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// Content store could not be allocated
    OutOfMemory(AllocError),
    /// Title refused by the truncation policy
    Title(NameError),
    /// Append would not leave room for the terminator (strict policy only)
    ContentOverflow { needed: usize, capacity: usize },
    /// Content store used with an arena that does not own it
    Storage(AllocError),
}

impl EditorError {
    /// Convert to errno-style error code
    pub fn to_errno(&self) -> i32 {
        match self {
            EditorError::OutOfMemory(e) | EditorError::Storage(e) => e.to_errno(),
            EditorError::Title(_) => -36,               // ENAMETOOLONG
            EditorError::ContentOverflow { .. } => -27, // EFBIG
        }
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory(e) => write!(f, "{}", e),
            Self::Storage(e) => write!(f, "content store: {}", e),
            Self::Title(e) => write!(f, "title: {}", e),
            Self::ContentOverflow { needed, capacity } => {
                write!(f, "content overflow: {} bytes needed, capacity {}", needed, capacity)
            }
        }
    }
}

impl From<AllocError> for EditorError {
    fn from(e: AllocError) -> Self {
        EditorError::OutOfMemory(e)
    }
}

impl From<NameError> for EditorError {
    fn from(e: NameError) -> Self {
        EditorError::Title(e)
    }
}
