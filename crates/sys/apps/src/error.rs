//! Registry error types

use core::fmt;

use armos_mem::AllocError;

/// Registry result type
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Name validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    /// Name longer than the slot allows (strict policy only)
    TooLong { len: usize, max: usize },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { len, max } => write!(f, "name too long: {} bytes (max {})", len, max),
        }
    }
}

/// Application registry errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// Table already holds its maximum number of records
    Full { capacity: usize },
    /// Name refused by the truncation policy
    Name(NameError),
    /// Code blob could not be allocated
    OutOfMemory(AllocError),
    /// Source blob for a copy is foreign or too short
    Source(AllocError),
}

impl RegistryError {
    /// Convert to errno-style error code
    pub fn to_errno(&self) -> i32 {
        match self {
            RegistryError::Full { .. } => -28,  // ENOSPC
            RegistryError::Name(_) => -36,      // ENAMETOOLONG
            RegistryError::OutOfMemory(e) | RegistryError::Source(e) => e.to_errno(),
        }
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { capacity } => write!(f, "registry full ({} apps)", capacity),
            Self::Name(e) => write!(f, "{}", e),
            Self::OutOfMemory(e) => write!(f, "{}", e),
            Self::Source(e) => write!(f, "source: {}", e),
        }
    }
}

impl From<AllocError> for RegistryError {
    fn from(e: AllocError) -> Self {
        RegistryError::OutOfMemory(e)
    }
}

impl From<NameError> for RegistryError {
    fn from(e: NameError) -> Self {
        RegistryError::Name(e)
    }
}
