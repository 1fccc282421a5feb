//! ARMOS resource core
//!
//! Memory and application bookkeeping behind the ARMOS console and IDE:
//! - `armos_mem` - monotonic arena every application and editor buffer lives in
//! - `armos_apps` - bounded table of installed applications
//! - `armos_editor` - append-only buffers for "create app" sessions
//! - `armos_klog` - `log` backend drained by the console
//!
//! `Kernel` ties them together; `globals` holds the boot instance.
//!
//! # Boot
//!
//! ```rust,ignore
//! armos::globals::init(KernelConfig::default())?;
//!
//! armos::globals::with_kernel(|k| {
//!     for app in k.apps() {
//!         console_println!("{}", app);
//!     }
//! });
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod globals;
pub mod kernel;


pub use config::KernelConfig;
pub use error::{KernelError, KernelResult};
pub use kernel::{Kernel, HELLO_APP_CODE, HELLO_APP_NAME, NEW_APP_TEMPLATE, NEW_APP_TITLE};

pub use armos_apps as apps;
pub use armos_editor as editor;
pub use armos_klog as klog;
pub use armos_mem as mem;
