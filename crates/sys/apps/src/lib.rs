//! Application Registry for ARMOS
//!
//! Keeps the table of installed applications. Each record has a bounded name
//! and owns a code blob carved from the kernel arena. The table is bounded
//! (`MAX_APPS` by default), insertion-ordered and append-only.
//!
//! # Example
//!
//! ```rust,ignore
//! use armos_apps::AppRegistry;
//! use armos_mem::Arena;
//!
//! let mut arena = Arena::new(1024);
//! let mut apps = AppRegistry::new();
//! let id = apps.create(&mut arena, b"HelloApp", b"print('hi')")?;
//!
//! for app in apps.list() {
//!     // "App HelloApp - Code size: 11 bytes"
//!     console_println!("{}", app);
//! }
//! ```

#![no_std]

extern crate alloc;

mod error;
mod name;
mod record;
mod registry;

pub use error::{NameError, RegistryError, RegistryResult};
pub use name::{until_nul, BoundedName, TruncatePolicy, MAX_NAME_LEN, NAME_CAPACITY};
pub use record::{AppFlags, AppId, AppRecord};
pub use registry::{AppRegistry, AppSummary, Apps, RegistryConfig, MAX_APPS};
