// Copyright 2026 The dvdid Project Developers. Licensed under MIT or Apache-2.0.

//! `dvdid`
//! =======
//!
//! Windows Media Center compatible DVD identification: computes the
//! "practically unique" 64-bit checksum the Windows API exposes as
//! `IDvdInfo2::GetDiscID`.
//!
//! The identifier is a table-driven CRC-64 folded over the metadata
//! (creation time, size, name) of every file in the disc's `VIDEO_TS`
//! directory, followed by the first 64 KiB of the `VIDEO_TS.IFO` and
//! `VTS_01_0.IFO` descriptor files.
//!
//! ## Usage
//!
//! ```no_run
//! let id = dvdid::compute("/mnt/dvd").unwrap();
//! println!("{id}");
//! ```
//!
//! The digest itself is public, for callers that assemble the canonical
//! byte stream from something other than a mounted filesystem:
//!
//! ```
//! use dvdid::Digest;
//!
//! let mut c = Digest::new();
//! c.write(b"hello ");
//! c.write(b"world!");
//! let checksum = c.sum64();
//! assert_eq!(checksum, 0xa42b1a64c09b2131);
//! ```

mod compute;
mod error;
mod result;

pub use compute::{compute, fingerprint, TitleFile};
pub use error::DvdidError;
pub use result::Crc64Result;

/// Generator polynomial of the disc identifier CRC, reflected form.
///
/// x^63 + x^60 + x^57 + x^55 + x^54 + x^50 + x^49 + x^46 + x^41 + x^38 +
/// x^37 + x^34 + x^32 + x^31 + x^30 + x^28 + x^25 + x^24 + x^21 + x^16 +
/// x^13 + x^12 + x^11 + x^8 + x^7 + x^5 + x^2
pub const POLYNOMIAL: u64 = 0x92c6_4265_d321_39a4;

/// Represents an in-progress CRC-64 computation.
#[derive(Clone)]
pub struct Digest {
    table: [u64; 256],
    state: u64,
}

impl Digest {
    /// Creates a new `Digest` seeded with [`POLYNOMIAL`].
    pub fn new() -> Self {
        Self::with_polynomial(POLYNOMIAL)
    }

    /// Creates a new `Digest` for an arbitrary reflected polynomial.
    ///
    /// The accumulator starts at all ones.
    pub fn with_polynomial(polynomial: u64) -> Self {
        let mut table = [0u64; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut value = i as u64;
            for _ in 0..8 {
                value = if value & 1 == 1 {
                    (value >> 1) ^ polynomial
                } else {
                    value >> 1
                };
            }
            *entry = value;
        }
        Self { table, state: !0 }
    }

    /// Writes some data into the digest.
    pub fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state = (self.state >> 8)
                ^ self.table[((self.state ^ u64::from(byte)) & 0xff) as usize];
        }
    }

    /// Computes the current CRC-64 value.
    ///
    /// The disc identifier convention reads the accumulator directly; there
    /// is no output XOR. Reading does not reset the digest, further writes
    /// continue from the current state.
    pub fn sum64(&self) -> u64 {
        self.state
    }

    /// Snapshots the current value as a [`Crc64Result`].
    pub fn result(&self) -> Crc64Result {
        Crc64Result::from(self.state)
    }
}

impl Default for Digest {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::size_range;
    use proptest::prelude::*;

    #[test]
    fn test_standard_vectors() {
        static CASES: &[(&[u8], u64)] = &[
            (b"", 0xffffffffffffffff),
            (b"@", 0x4e647953641cac75),
            (b"123456789", 0x75d4b74f024eceea),
            (b"hello world!", 0xa42b1a64c09b2131),
            (&[0; 32], 0xd3974a8ca3eaf8bb),
            (&[255; 32], 0xccef4da66e686b50),
        ];

        for (input, result) in CASES {
            let mut hasher = Digest::new();
            hasher.write(input);
            assert_eq!(hasher.sum64(), *result, "test case {:x?}", input);
        }
    }

    #[test]
    fn test_fresh_digest_is_all_ones() {
        let hasher = Digest::new();
        assert_eq!(hasher.sum64(), 0xffffffffffffffff);
        assert_eq!(hasher.result().to_string(), "ffffffffffffffff");
    }

    #[test]
    fn test_incremental_update() {
        let mut hasher = Digest::new();
        for byte in b"hello world!" {
            hasher.write(std::slice::from_ref(byte));
        }
        assert_eq!(hasher.sum64(), 0xa42b1a64c09b2131);
    }

    #[test]
    fn test_results_compare_by_value_across_polynomials() {
        // fresh accumulators are all ones no matter the polynomial
        let ours = Digest::new();
        let ecma = Digest::with_polynomial(0xc96c5795d7870f42);
        assert_eq!(ours.result(), ecma.result());
    }

    #[test]
    fn test_read_does_not_reset() {
        let mut hasher_1 = Digest::new();
        hasher_1.write(b"VIDEO_TS");
        let _ = hasher_1.result();
        hasher_1.write(b".IFO");

        let mut hasher_2 = Digest::new();
        hasher_2.write(b"VIDEO_TS.IFO");
        assert_eq!(hasher_1.sum64(), hasher_2.sum64());
    }

    fn any_buffer() -> <Box<[u8]> as Arbitrary>::Strategy {
        any_with::<Box<[u8]>>(size_range(..65536).lift())
    }

    prop_compose! {
        fn bytes_and_split_index()
            (bytes in any_buffer())
            (index in 0..=bytes.len(), bytes in Just(bytes)) -> (Box<[u8]>, usize)
        {
            (bytes, index)
        }
    }

    proptest! {
        #[test]
        fn equivalent_to_crc(bytes in any_buffer()) {
            let mut hasher = Digest::new();
            hasher.write(&bytes);

            // CRC-64/MS is the catalogued name of the disc identifier
            // algorithm: poly 0x259c84cba6426349 in normal form, init all
            // ones, reflected, no output XOR.
            let crc = crc::Crc::<u64>::new(&crc::CRC_64_MS);
            let mut digest = crc.digest();
            digest.update(&bytes);

            prop_assert_eq!(hasher.sum64(), digest.finalize());
        }

        #[test]
        fn concatenation((bytes, split_index) in bytes_and_split_index()) {
            let mut hasher_1 = Digest::new();
            hasher_1.write(&bytes);
            let mut hasher_2 = Digest::new();
            let (left, right) = bytes.split_at(split_index);
            hasher_2.write(left);
            hasher_2.write(right);
            prop_assert_eq!(hasher_1.sum64(), hasher_2.sum64());
        }

        #[test]
        fn state_cloning(left in any_buffer(), right in any_buffer()) {
            let mut hasher_1 = Digest::new();
            hasher_1.write(&left);
            let mut hasher_2 = hasher_1.clone();
            hasher_1.write(&right);
            hasher_2.write(&right);
            prop_assert_eq!(hasher_1.sum64(), hasher_2.sum64());
        }
    }
}
