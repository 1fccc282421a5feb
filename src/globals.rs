//! Global kernel instance
//!
//! Interrupt handlers and the console call into the core without a handle,
//! so one `Kernel` lives behind a spin lock. Access is serialized; the core
//! itself is never entered concurrently.

use spin::Mutex;

use crate::config::KernelConfig;
use crate::error::{KernelError, KernelResult};
use crate::kernel::Kernel;

static KERNEL: Mutex<Option<Kernel>> = Mutex::new(None);

/// Install the kernel logger and boot the global kernel
///
/// A logger installed earlier by someone else is kept.
pub fn init(config: KernelConfig) -> KernelResult<()> {
    let mut slot = KERNEL.lock();
    if slot.is_some() {
        return Err(KernelError::AlreadyInitialized);
    }

    if armos_klog::init(config.log_level).is_err() {
        armos_klog::set_level(config.log_level);
    }

    *slot = Some(Kernel::boot(config)?);
    Ok(())
}

pub fn is_initialized() -> bool {
    KERNEL.lock().is_some()
}

/// Run `f` with the global kernel
///
/// Returns `None` before `init`. `f` must not call back into this module.
pub fn with_kernel<R, F: FnOnce(&mut Kernel) -> R>(f: F) -> Option<R> {
    KERNEL.lock().as_mut().map(f)
}
