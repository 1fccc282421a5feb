//! Kernel configuration
//!
//! One struct gathering the settings of every subsystem. Defaults come from
//! the constants in each crate; `debug-*` features raise the log level.

use armos_apps::{RegistryConfig, TruncatePolicy};
use armos_editor::{EditorConfig, OverflowPolicy};
use armos_mem::config::{DEFAULT_ARENA_SIZE, MAX_ARENA_SIZE};
use log::LevelFilter;

use crate::error::{KernelError, KernelResult};

/// Log level used when no `debug-*` feature is enabled
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Level filter selected by the enabled `debug-*` features
pub const fn default_log_level() -> LevelFilter {
    if cfg!(feature = "debug-mem") {
        LevelFilter::Trace
    } else if cfg!(any(feature = "debug-kernel", feature = "debug-apps")) {
        LevelFilter::Debug
    } else {
        DEFAULT_LOG_LEVEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    /// Arena size in bytes, shared by code blobs and editor buffers
    pub arena_capacity: usize,
    pub registry: RegistryConfig,
    pub editor: EditorConfig,
    pub log_level: LevelFilter,
    /// Install `HelloApp` at boot
    pub seed_default_apps: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        KernelConfig {
            arena_capacity: DEFAULT_ARENA_SIZE,
            registry: RegistryConfig::default(),
            editor: EditorConfig::default(),
            log_level: default_log_level(),
            seed_default_apps: true,
        }
    }
}

impl KernelConfig {
    pub fn with_arena_capacity(mut self, bytes: usize) -> Self {
        self.arena_capacity = bytes;
        self
    }

    pub fn with_max_apps(mut self, max_apps: usize) -> Self {
        self.registry.max_apps = max_apps;
        self
    }

    /// Policy for over-long app names and editor titles
    pub fn with_name_policy(mut self, policy: TruncatePolicy) -> Self {
        self.registry.name_policy = policy;
        self.editor.title_policy = policy;
        self
    }

    pub fn with_content_capacity(mut self, bytes: usize) -> Self {
        self.editor.content_capacity = bytes;
        self
    }

    pub fn with_overflow_policy(mut self, overflow: OverflowPolicy) -> Self {
        self.editor.overflow = overflow;
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    /// Boot with an empty registry
    pub fn without_default_apps(mut self) -> Self {
        self.seed_default_apps = false;
        self
    }

    /// Check the configuration before anything is allocated
    pub fn validate(&self) -> KernelResult<()> {
        if self.registry.max_apps == 0 {
            return Err(KernelError::InvalidConfig("registry capacity must be non-zero"));
        }
        if self.arena_capacity > MAX_ARENA_SIZE {
            return Err(KernelError::InvalidConfig("arena larger than MAX_ARENA_SIZE"));
        }
        Ok(())
    }
}
