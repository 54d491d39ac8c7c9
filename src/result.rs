// Copyright 2026 The dvdid Project Developers. Licensed under MIT or Apache-2.0.

use std::fmt;

/// The finished 64-bit checksum of a disc identification run.
///
/// Displays as 16 lowercase hex digits; [`high_bytes`](Self::high_bytes) and
/// [`low_bytes`](Self::low_bytes) expose the two 32-bit halves the way disc
/// metadata services key their lookups. Equality compares the underlying
/// value only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Crc64Result(u64);

impl Crc64Result {
    /// Returns the topmost 4 bytes of the checksum formatted as a lowercase
    /// hex string.
    pub fn high_bytes(&self) -> String {
        format!("{:08x}", self.0 >> 32)
    }

    /// Returns the bottommost 4 bytes of the checksum formatted as a
    /// lowercase hex string.
    pub fn low_bytes(&self) -> String {
        format!("{:08x}", self.0 & 0xffff_ffff)
    }

    /// Returns the raw 64-bit value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Crc64Result {
    fn from(crc: u64) -> Self {
        Self(crc)
    }
}

impl fmt::Display for Crc64Result {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
