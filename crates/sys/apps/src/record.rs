//! Application records

use core::fmt;

use armos_mem::Blob;
use bitflags::bitflags;

use crate::name::BoundedName;

bitflags! {
    /// Record state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct AppFlags: u8 {
        const ACTIVE = 0b0000_0001;
    }
}

/// Stable handle of a record: its 0-based insertion index
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AppId(pub(crate) usize);

impl AppId {
    /// Insertion index
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An installed application
///
/// The code blob holds `code_len + 1` bytes: the code followed by a NUL.
/// Records are never mutated after creation.
#[derive(Debug)]
pub struct AppRecord {
    name: BoundedName,
    code: Blob,
    code_len: usize,
    flags: AppFlags,
}

impl AppRecord {
    pub(crate) fn new(name: BoundedName, code: Blob, code_len: usize) -> Self {
        debug_assert_eq!(code.len(), code_len + 1);
        AppRecord {
            name,
            code,
            code_len,
            flags: AppFlags::ACTIVE,
        }
    }

    /// Application name
    pub fn name(&self) -> &BoundedName {
        &self.name
    }

    /// Logical code length, terminator excluded
    pub fn code_len(&self) -> usize {
        self.code_len
    }

    /// Arena range holding the code and its terminator
    pub fn blob(&self) -> &Blob {
        &self.code
    }

    pub fn flags(&self) -> AppFlags {
        self.flags
    }

    pub fn is_active(&self) -> bool {
        self.flags.contains(AppFlags::ACTIVE)
    }
}
