//! Application registry
//!
//! Bounded, insertion-ordered table of installed applications. Records are
//! appended and never reordered, overwritten or removed, so an [`AppId`] stays
//! valid for the lifetime of the registry.

use alloc::vec::Vec;
use core::fmt;
use core::iter::Enumerate;
use core::slice;

use armos_mem::{AllocError, AllocResult, Arena, Blob};

use crate::error::{RegistryError, RegistryResult};
use crate::name::{until_nul, BoundedName, TruncatePolicy};
use crate::record::{AppId, AppRecord};

/// Maximum number of installed applications
pub const MAX_APPS: usize = 100;

/// Registry configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Table capacity
    pub max_apps: usize,
    /// Handling of names longer than 63 bytes
    pub name_policy: TruncatePolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            max_apps: MAX_APPS,
            name_policy: TruncatePolicy::Silent,
        }
    }
}

/// Table of installed applications
pub struct AppRegistry {
    records: Vec<AppRecord>,
    config: RegistryConfig,
}

impl AppRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry
    pub fn with_config(config: RegistryConfig) -> Self {
        AppRegistry {
            records: Vec::with_capacity(config.max_apps.min(MAX_APPS)),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Number of installed applications
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no application is installed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Maximum number of applications
    pub fn capacity(&self) -> usize {
        self.config.max_apps
    }

    /// Check if another create would fail with `Full`
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.config.max_apps
    }

    /// Install an application
    ///
    /// `code` is read up to its first NUL byte. The stored blob is the code
    /// plus a fresh terminator. On any error the table and its count are
    /// unchanged.
    pub fn create(&mut self, arena: &mut Arena, name: &[u8], code: &[u8]) -> RegistryResult<AppId> {
        let code = until_nul(code);
        self.insert_with(arena, name, code.len(), |arena, blob| {
            arena.try_bytes_mut(blob)?[..code.len()].copy_from_slice(code);
            Ok(())
        })
    }

    /// Install an application whose code already lives in the arena
    ///
    /// Copies the first `len` bytes of `source` into a new blob owned by the
    /// record; `source` itself is left untouched. A source from another
    /// arena or shorter than `len` is refused before anything is allocated.
    pub fn create_from_blob(
        &mut self,
        arena: &mut Arena,
        name: &[u8],
        source: &Blob,
        len: usize,
    ) -> RegistryResult<AppId> {
        arena.check_range(source, len).map_err(RegistryError::Source)?;
        self.insert_with(arena, name, len, |arena, blob| arena.copy_between(source, blob, len))
    }

    fn insert_with<F>(
        &mut self,
        arena: &mut Arena,
        name: &[u8],
        code_len: usize,
        fill: F,
    ) -> RegistryResult<AppId>
    where
        F: FnOnce(&mut Arena, &mut Blob) -> AllocResult<()>,
    {
        if self.is_full() {
            log::warn!("apps: registry full ({} apps)", self.config.max_apps);
            return Err(RegistryError::Full { capacity: self.config.max_apps });
        }

        let name = BoundedName::new(name, self.config.name_policy)?;

        let size = code_len.checked_add(1).ok_or_else(|| AllocError::OutOfMemory {
            requested: usize::MAX,
            available: arena.remaining(),
        })?;
        let mut blob = arena.allocate(size)?;
        fill(arena, &mut blob)?;
        arena.try_bytes_mut(&mut blob)?[code_len] = 0;

        let id = AppId(self.records.len());
        log::debug!("apps: installed {} as #{} ({} bytes)", name, id, code_len);
        self.records.push(AppRecord::new(name, blob, code_len));
        Ok(id)
    }

    /// Get a record by id
    pub fn get(&self, id: AppId) -> Option<&AppRecord> {
        self.records.get(id.0)
    }

    /// Find the first application with the given name
    pub fn find(&self, name: &[u8]) -> Option<AppId> {
        self.records
            .iter()
            .position(|r| r.is_active() && r.name().matches(name))
            .map(AppId)
    }

    /// Code of an application, terminator excluded
    pub fn code<'a>(&self, arena: &'a Arena, id: AppId) -> Option<&'a [u8]> {
        let record = self.get(id)?;
        arena.try_bytes(record.blob()).ok().map(|code| &code[..record.code_len()])
    }

    /// Code of an application as stored, terminator included
    pub fn code_with_terminator<'a>(&self, arena: &'a Arena, id: AppId) -> Option<&'a [u8]> {
        self.get(id).and_then(|r| arena.try_bytes(r.blob()).ok())
    }

    /// List installed applications in insertion order
    ///
    /// The iterator is lazy and read-only; call again to restart.
    pub fn list(&self) -> Apps<'_> {
        Apps {
            inner: self.records.iter().enumerate(),
        }
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of an application listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSummary<'a> {
    pub id: AppId,
    pub name: &'a BoundedName,
    pub code_len: usize,
}

impl fmt::Display for AppSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "App {} - Code size: {} bytes", self.name, self.code_len)
    }
}

/// Iterator over installed applications
#[derive(Clone)]
pub struct Apps<'a> {
    inner: Enumerate<slice::Iter<'a, AppRecord>>,
}

impl<'a> Iterator for Apps<'a> {
    type Item = AppSummary<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(i, r)| AppSummary {
            id: AppId(i),
            name: r.name(),
            code_len: r.code_len(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Apps<'_> {}
