//! Log ring buffer
//!
//! Fixed number of fixed-size slots. When full, the oldest entry is
//! overwritten and counted in `overwritten()`.

use core::fmt;

use log::Level;

/// Maximum size of a single entry's content (target + message)
pub const LOG_ENTRY_CONTENT_SIZE: usize = 160;

/// Longest target kept in an entry
pub const MAX_TARGET_LEN: usize = 32;

/// Number of slots in the ring
pub const LOG_RING_SLOTS: usize = 64;

/// A single log entry with fixed-size storage
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Sequence number, increasing from 0 in push order
    pub seq: u64,
    level: Level,
    target_len: u8,
    message_len: u8,
    /// Layout: [target bytes][message bytes]
    content: [u8; LOG_ENTRY_CONTENT_SIZE],
}

impl LogEntry {
    const EMPTY: LogEntry = LogEntry {
        seq: 0,
        level: Level::Trace,
        target_len: 0,
        message_len: 0,
        content: [0; LOG_ENTRY_CONTENT_SIZE],
    };

    /// Create an entry, truncating target and message on char boundaries
    pub fn new(seq: u64, level: Level, target: &str, message: &str) -> Self {
        let mut entry = LogEntry { seq, level, ..Self::EMPTY };

        let target_len = floor_boundary(target, MAX_TARGET_LEN);
        entry.content[..target_len].copy_from_slice(&target.as_bytes()[..target_len]);
        entry.target_len = target_len as u8;

        let message_len = floor_boundary(message, LOG_ENTRY_CONTENT_SIZE - target_len);
        entry.content[target_len..target_len + message_len]
            .copy_from_slice(&message.as_bytes()[..message_len]);
        entry.message_len = message_len as u8;

        entry
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Get the target string
    pub fn target(&self) -> &str {
        let len = self.target_len as usize;
        core::str::from_utf8(&self.content[..len]).unwrap_or("<invalid>")
    }

    /// Get the message string
    pub fn message(&self) -> &str {
        let start = self.target_len as usize;
        let end = start + self.message_len as usize;
        core::str::from_utf8(&self.content[start..end]).unwrap_or("<invalid>")
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            Level::Error => "[ERROR]",
            Level::Warn => "[WARN ]",
            Level::Info => "[INFO ]",
            Level::Debug => "[DEBUG]",
            Level::Trace => "[TRACE]",
        };
        write!(f, "{} {}: {}", level, self.target(), self.message())
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("seq", &self.seq)
            .field("level", &self.level)
            .field("target", &self.target())
            .field("message", &self.message())
            .finish()
    }
}

/// Largest `n <= max` that falls on a char boundary of `s`
fn floor_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut n = max.min(u8::MAX as usize);
    while !s.is_char_boundary(n) {
        n -= 1;
    }
    n
}

/// Ring of log entries, oldest first
pub struct LogRing {
    slots: [LogEntry; LOG_RING_SLOTS],
    /// Index of the oldest entry
    head: usize,
    len: usize,
    next_seq: u64,
    overwritten: u64,
}

impl LogRing {
    pub const fn new() -> Self {
        LogRing {
            slots: [LogEntry::EMPTY; LOG_RING_SLOTS],
            head: 0,
            len: 0,
            next_seq: 0,
            overwritten: 0,
        }
    }

    /// Record a message, overwriting the oldest entry when full
    pub fn push(&mut self, level: Level, target: &str, message: &str) {
        let entry = LogEntry::new(self.next_seq, level, target, message);
        self.next_seq += 1;

        if self.len == LOG_RING_SLOTS {
            self.slots[self.head] = entry;
            self.head = (self.head + 1) % LOG_RING_SLOTS;
            self.overwritten += 1;
        } else {
            self.slots[(self.head + self.len) % LOG_RING_SLOTS] = entry;
            self.len += 1;
        }
    }

    /// Take the oldest entry
    pub fn pop(&mut self) -> Option<LogEntry> {
        if self.len == 0 {
            return None;
        }
        let entry = self.slots[self.head];
        self.head = (self.head + 1) % LOG_RING_SLOTS;
        self.len -= 1;
        Some(entry)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries lost to overwriting since creation
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }
}

impl Default for LogRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_push_pop_order() {
        let mut ring = LogRing::new();
        ring.push(Level::Info, "apps", "first");
        ring.push(Level::Warn, "mem", "second");
        assert_eq!(ring.len(), 2);

        let a = ring.pop().unwrap();
        assert_eq!(a.seq, 0);
        assert_eq!(a.level(), Level::Info);
        assert_eq!(a.target(), "apps");
        assert_eq!(a.message(), "first");

        let b = ring.pop().unwrap();
        assert_eq!(b.seq, 1);
        assert_eq!(b.message(), "second");
        assert!(ring.pop().is_none());
    }

    #[test]
    fn test_overwrites_oldest() {
        let mut ring = LogRing::new();
        for i in 0..LOG_RING_SLOTS + 3 {
            ring.push(Level::Debug, "t", &format!("m{}", i));
        }
        assert_eq!(ring.len(), LOG_RING_SLOTS);
        assert_eq!(ring.overwritten(), 3);

        let oldest = ring.pop().unwrap();
        assert_eq!(oldest.seq, 3);
        assert_eq!(oldest.message(), "m3");
    }

    #[test]
    fn test_long_message_truncated_on_boundary() {
        let message = "é".repeat(200);
        let entry = LogEntry::new(0, Level::Info, "target", &message);
        assert!(entry.message().len() <= LOG_ENTRY_CONTENT_SIZE - 6);
        assert!(entry.message().chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_display() {
        let entry = LogEntry::new(7, Level::Warn, "armos_apps", "registry full");
        assert_eq!(format!("{}", entry), "[WARN ] armos_apps: registry full");
    }
}
