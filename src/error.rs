//! Kernel error types

use core::fmt;

use armos_apps::RegistryError;
use armos_editor::EditorError;
use armos_mem::AllocError;

/// Kernel result type
pub type KernelResult<T> = Result<T, KernelError>;

/// Errors surfaced by the kernel facade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// Configuration refused by `KernelConfig::validate`
    InvalidConfig(&'static str),
    /// Global kernel already installed
    AlreadyInitialized,
    Alloc(AllocError),
    Registry(RegistryError),
    Editor(EditorError),
}

impl KernelError {
    /// Convert to errno-style error code
    pub fn to_errno(&self) -> i32 {
        match self {
            KernelError::InvalidConfig(_) => -22,   // EINVAL
            KernelError::AlreadyInitialized => -16, // EBUSY
            KernelError::Alloc(e) => e.to_errno(),
            KernelError::Registry(e) => e.to_errno(),
            KernelError::Editor(e) => e.to_errno(),
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
            Self::AlreadyInitialized => write!(f, "kernel already initialized"),
            Self::Alloc(e) => write!(f, "{}", e),
            Self::Registry(e) => write!(f, "{}", e),
            Self::Editor(e) => write!(f, "{}", e),
        }
    }
}

impl From<AllocError> for KernelError {
    fn from(e: AllocError) -> Self {
        KernelError::Alloc(e)
    }
}

impl From<RegistryError> for KernelError {
    fn from(e: RegistryError) -> Self {
        KernelError::Registry(e)
    }
}

impl From<EditorError> for KernelError {
    fn from(e: EditorError) -> Self {
        KernelError::Editor(e)
    }
}
