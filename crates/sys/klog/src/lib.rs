//! ARMOS Kernel Log
//!
//! Backend for the `log` facade. The core performs no I/O, so records are
//! formatted into a fixed ring and the console collaborator drains them when
//! it is ready to print.
//!
//! # Usage
//!
//! ```rust,ignore
//! armos_klog::init(log::LevelFilter::Info).ok();
//! log::info!("kernel loaded");
//!
//! armos_klog::drain(|entry| console_println!("{}", entry));
//! ```

#![no_std]

extern crate alloc;

mod ring;

pub use ring::{LogEntry, LogRing, LOG_ENTRY_CONTENT_SIZE, LOG_RING_SLOTS, MAX_TARGET_LEN};

use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Mutex;

/// Stack buffer for formatting a record before it enters the ring
struct MessageBuffer {
    data: [u8; LOG_ENTRY_CONTENT_SIZE],
    len: usize,
}

impl MessageBuffer {
    const fn new() -> Self {
        MessageBuffer {
            data: [0u8; LOG_ENTRY_CONTENT_SIZE],
            len: 0,
        }
    }

    fn as_str(&self) -> &str {
        match core::str::from_utf8(&self.data[..self.len]) {
            Ok(s) => s,
            // A cut multi-byte character at the end
            Err(e) => core::str::from_utf8(&self.data[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl Write for MessageBuffer {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let remaining = LOG_ENTRY_CONTENT_SIZE - self.len;
        let to_copy = bytes.len().min(remaining);
        self.data[self.len..self.len + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}

/// Kernel logger implementation
pub struct KernelLogger {
    ring: Mutex<LogRing>,
}

impl KernelLogger {
    const fn new() -> Self {
        KernelLogger {
            ring: Mutex::new(LogRing::new()),
        }
    }
}

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Format outside the lock
        let mut msg = MessageBuffer::new();
        let _ = write!(msg, "{}", record.args());

        self.ring.lock().push(record.level(), record.target(), msg.as_str());
    }

    fn flush(&self) {}
}

/// Global logger instance
static LOGGER: KernelLogger = KernelLogger::new();

/// Install the kernel logger
///
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

/// Change the level filter after `init`
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}

/// Hand every buffered entry to `f`, oldest first
///
/// The ring lock is released before each call, so `f` may itself log.
/// Returns the number of entries drained.
pub fn drain<F: FnMut(&LogEntry)>(mut f: F) -> usize {
    let mut count = 0;
    loop {
        let entry = LOGGER.ring.lock().pop();
        match entry {
            Some(entry) => {
                f(&entry);
                count += 1;
            }
            None => return count,
        }
    }
}

/// Number of entries waiting to be drained
pub fn pending() -> usize {
    LOGGER.ring.lock().len()
}

/// Entries lost because the ring was full
pub fn overwritten() -> u64 {
    LOGGER.ring.lock().overwritten()
}
