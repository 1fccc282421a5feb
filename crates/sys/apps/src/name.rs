//! Bounded names
//!
//! Application names and editor titles live in a fixed 64-byte slot: up to
//! 63 bytes of content followed by a NUL terminator.

use core::fmt;

use crate::error::NameError;

/// Size of a name slot, terminator included
pub const NAME_CAPACITY: usize = 64;

/// Longest name that fits in a slot
pub const MAX_NAME_LEN: usize = NAME_CAPACITY - 1;

/// What to do with a name longer than `MAX_NAME_LEN`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TruncatePolicy {
    /// Keep the first 63 bytes and carry on
    #[default]
    Silent,
    /// Refuse the name with `NameError::TooLong`
    Reject,
}

/// Logical content of a NUL-terminated byte string
///
/// Everything up to the first NUL, or the whole slice if it has none.
pub fn until_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

/// Fixed-capacity, NUL-terminated name
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoundedName {
    bytes: [u8; NAME_CAPACITY],
    len: usize,
}

impl BoundedName {
    /// The empty name
    pub const fn empty() -> Self {
        BoundedName {
            bytes: [0; NAME_CAPACITY],
            len: 0,
        }
    }

    /// Build a name from raw bytes under the given policy
    ///
    /// Input stops at its first NUL byte. Truncation works on bytes, so a
    /// multi-byte UTF-8 sequence may be cut; [`BoundedName::as_str`] then
    /// drops the partial character.
    pub fn new(name: &[u8], policy: TruncatePolicy) -> Result<Self, NameError> {
        let name = until_nul(name);
        if name.len() > MAX_NAME_LEN {
            match policy {
                TruncatePolicy::Reject => {
                    return Err(NameError::TooLong { len: name.len(), max: MAX_NAME_LEN });
                }
                TruncatePolicy::Silent => {
                    log::debug!("name truncated from {} to {} bytes", name.len(), MAX_NAME_LEN);
                }
            }
        }
        Ok(Self::truncated(name))
    }

    /// Build a name, silently keeping at most `MAX_NAME_LEN` bytes
    pub fn truncated(name: &[u8]) -> Self {
        let name = until_nul(name);
        let len = core::cmp::min(name.len(), MAX_NAME_LEN);
        let mut out = Self::empty();
        out.bytes[..len].copy_from_slice(&name[..len]);
        out.len = len;
        out
    }

    /// Name content without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Name content including the terminator
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes[..=self.len]
    }

    /// Longest valid UTF-8 prefix of the name
    pub fn as_str(&self) -> &str {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(s) => s,
            Err(e) => {
                // valid_up_to() marks a char boundary, so this cannot fail
                core::str::from_utf8(&self.bytes[..e.valid_up_to()]).unwrap_or("")
            }
        }
    }

    /// Length in bytes, terminator excluded
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the name is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Compare against a raw (possibly NUL-terminated) byte string
    pub fn matches(&self, other: &[u8]) -> bool {
        self.as_bytes() == until_nul(other)
    }
}

impl Default for BoundedName {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for BoundedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for BoundedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_kept() {
        let name = BoundedName::new(b"HelloApp", TruncatePolicy::Silent).unwrap();
        assert_eq!(name.as_bytes(), b"HelloApp");
        assert_eq!(name.as_bytes_with_nul(), b"HelloApp\0");
        assert_eq!(name.as_str(), "HelloApp");
    }

    #[test]
    fn test_long_name_truncated_to_63() {
        let long = [b'A'; 100];
        let name = BoundedName::new(&long, TruncatePolicy::Silent).unwrap();
        assert_eq!(name.len(), 63);
        assert_eq!(name.as_bytes(), &long[..63]);
    }

    #[test]
    fn test_exactly_63_is_not_truncation() {
        let exact = [b'B'; 63];
        let name = BoundedName::new(&exact, TruncatePolicy::Reject).unwrap();
        assert_eq!(name.len(), 63);
    }

    #[test]
    fn test_reject_policy() {
        let long = [b'A'; 64];
        let err = BoundedName::new(&long, TruncatePolicy::Reject).unwrap_err();
        assert_eq!(err, NameError::TooLong { len: 64, max: 63 });
    }

    #[test]
    fn test_stops_at_nul() {
        let name = BoundedName::new(b"app\0ignored", TruncatePolicy::Silent).unwrap();
        assert_eq!(name.as_bytes(), b"app");
        assert!(name.matches(b"app"));
        assert!(name.matches(b"app\0"));
        assert!(!name.matches(b"apps"));
    }

    #[test]
    fn test_split_utf8_is_trimmed_for_display() {
        // 62 ASCII bytes then a 2-byte character straddling the limit
        let mut raw = [b'x'; 64];
        raw[62] = 0xC3;
        raw[63] = 0xA9;
        let name = BoundedName::truncated(&raw);
        assert_eq!(name.len(), 63);
        assert_eq!(name.as_str().len(), 62);
    }

    #[test]
    fn test_until_nul() {
        assert_eq!(until_nul(b"abc"), b"abc");
        assert_eq!(until_nul(b"ab\0c"), b"ab");
        assert_eq!(until_nul(b"\0"), b"");
    }
}
