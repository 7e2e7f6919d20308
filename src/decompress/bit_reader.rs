//! Bit reader for compressed data streams.
//!
//! Reads bits from a byte stream, LSB first (BMOF convention): the stream is
//! one continuous little-endian bit sequence, so bits from earlier bytes end
//! up in the low-order positions of multi-bit reads.

use super::{DecompressError, Result};

/// Bit reader that reads from a byte slice.
///
/// Carries up to 7 residual bits of a partially consumed byte across calls;
/// the byte cursor only advances when the residual is exhausted. Running out
/// of input mid-request is a hard error, never a zero-filled read.
pub struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
    /// Residual bits not yet returned to the caller (low-order aligned)
    pending: u32,
    /// Number of valid bits in `pending`
    pending_count: u32,
}

impl<'a> BitReader<'a> {
    /// Create a new bit reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            pending: 0,
            pending_count: 0,
        }
    }

    /// Fetch the next unconsumed byte, failing fast when the budget is gone.
    #[inline]
    fn fetch_byte(&mut self) -> Result<u8> {
        if self.pos >= self.data.len() {
            return Err(DecompressError::UnexpectedEof);
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Read n bits (1 ≤ n ≤ 32) and advance the position.
    ///
    /// Earlier stream bits occupy the low-order positions of the result.
    #[inline]
    pub fn read_bits(&mut self, n: u32) -> Result<u32> {
        debug_assert!((1..=32).contains(&n));

        if n <= self.pending_count {
            // Invariant: pending_count ≤ 7 between calls, so n < 32 here
            let value = self.pending & ((1 << n) - 1);
            self.pending >>= n;
            self.pending_count -= n;
            return Ok(value);
        }

        // Accumulate whole bytes until the request is covered. A 64-bit
        // accumulator keeps the last byte's leftover bits addressable even
        // for n = 32.
        let mut acc = u64::from(self.pending);
        let mut have = self.pending_count;
        while have < n {
            acc |= u64::from(self.fetch_byte()?) << have;
            have += 8;
        }

        self.pending = (acc >> n) as u32;
        self.pending_count = have - n;
        Ok((acc & ((1u64 << n) - 1)) as u32)
    }

    /// Read a single bit.
    ///
    /// Equivalent to `read_bits(1)`, specialized for the hot unary-prefix
    /// and selector-flag paths.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.pending_count > 0 {
            let bit = self.pending & 1;
            self.pending >>= 1;
            self.pending_count -= 1;
            Ok(bit != 0)
        } else {
            let byte = self.fetch_byte()?;
            self.pending = u32::from(byte) >> 1;
            self.pending_count = 7;
            Ok(byte & 1 != 0)
        }
    }

    /// Get the current byte position (bytes consumed from stream).
    pub fn byte_position(&self) -> usize {
        self.pos
    }

    /// Remaining bits available.
    pub fn remaining_bits(&self) -> u64 {
        u64::from(self.pending_count) + ((self.data.len() - self.pos) as u64 * 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_bits_lsb_first() {
        let data = [0b1011_0100, 0b1100_1010];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(4).unwrap(), 0b0100);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
        assert_eq!(reader.read_bits(8).unwrap(), 0b1100_1010);
    }

    #[test]
    fn test_read_spans_byte_boundary() {
        // 12-bit read: low 8 bits from byte 0, high 4 from byte 1's low bits
        let data = [0xAB, 0xCD];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(12).unwrap(), 0xDAB);
        assert_eq!(reader.read_bits(4).unwrap(), 0xC);
    }

    #[test]
    fn test_read_32_bits() {
        let data = [0x78, 0x56, 0x34, 0x12, 0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(32).unwrap(), 0x12345678);
        assert_eq!(reader.read_bits(8).unwrap(), 0xFF);
    }

    #[test]
    fn test_read_bit_matches_read_bits_one() {
        let data = [0b0110_1001, 0b1111_0000];
        let mut bitwise = BitReader::new(&data);
        let mut grouped = BitReader::new(&data);

        for _ in 0..16 {
            let a = bitwise.read_bit().unwrap();
            let b = grouped.read_bits(1).unwrap();
            assert_eq!(u32::from(a), b);
        }
    }

    #[test]
    fn test_split_reads_compose() {
        // read_bits(a) then read_bits(n-a) must concatenate (low bits first)
        // to the same value as a single read_bits(n), for every split point.
        let data = [0xDE, 0xAD, 0xBE, 0xEF];
        let n = 24;
        let whole = BitReader::new(&data).read_bits(n).unwrap();

        for a in 1..n {
            let mut reader = BitReader::new(&data);
            let low = reader.read_bits(a).unwrap();
            let high = reader.read_bits(n - a).unwrap();
            assert_eq!(low | (high << a), whole, "split at {}", a);
        }
    }

    #[test]
    fn test_residual_carries_across_calls() {
        let data = [0b1101_0110];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(3).unwrap(), 0b110);
        assert_eq!(reader.byte_position(), 1);
        assert_eq!(reader.remaining_bits(), 5);
        assert_eq!(reader.read_bits(5).unwrap(), 0b11010);
        assert_eq!(reader.remaining_bits(), 0);
    }

    #[test]
    fn test_exhaustion_is_an_error() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(6).unwrap(), 0b11_1111);
        // 2 residual bits left, asking for 3 must fail rather than zero-fill
        assert!(matches!(
            reader.read_bits(3),
            Err(DecompressError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_empty_input() {
        let mut reader = BitReader::new(&[]);
        assert!(matches!(
            reader.read_bit(),
            Err(DecompressError::UnexpectedEof)
        ));
        assert!(matches!(
            reader.read_bits(8),
            Err(DecompressError::UnexpectedEof)
        ));
    }
}
