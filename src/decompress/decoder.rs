//! BMOF token decoder and copy engine.
//!
//! Pulls tokens from the bit stream and expands them into the output
//! buffer: 7-bit literals (selectors 1 and 2) and length/distance
//! back-references (selectors 0 and 3), terminated by the reserved
//! distance sentinel once the declared output size has been produced.

use super::{bit_reader::BitReader, DecompressError, Result};

/// First two bytes of the compressed payload. The two bytes after them are
/// consumed but carry no known meaning.
pub const PAYLOAD_SIGNATURE: [u8; 2] = [b'D', b'S'];

/// Reserved distance value signaling end of stream.
pub const END_OF_STREAM: u32 = 4415;

/// Distance bias for selector 3 with an 8-bit extra field.
const DIST_BASE_MID: u32 = 64;

/// Distance bias for selector 3 with a 12-bit extra field.
const DIST_BASE_FAR: u32 = 320;

/// BMOF payload decoder.
///
/// Stateless between calls: every invocation owns its bit reader and output
/// position, so independent decompressions can run concurrently.
pub struct MofDecoder;

impl MofDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self
    }

    /// Decompress a payload (the bytes following the 16-byte container
    /// header) into exactly `unpacked_size` bytes.
    ///
    /// The payload must start with the `b"DS"` sub-signature. Decoding
    /// terminates only via the end-of-stream sentinel; exhausting the input
    /// first is an error.
    pub fn decompress(&self, payload: &[u8], unpacked_size: usize) -> Result<Vec<u8>> {
        if payload.len() < 4 {
            return Err(DecompressError::UnexpectedEof);
        }
        if payload[..2] != PAYLOAD_SIGNATURE {
            return Err(DecompressError::MissingSignature);
        }

        let mut reader = BitReader::new(&payload[4..]);
        let mut output = Vec::with_capacity(unpacked_size);

        loop {
            match reader.read_bits(2)? {
                1 => {
                    let byte = 0x80 | reader.read_bits(7)? as u8;
                    Self::push_literal(&mut output, unpacked_size, byte)?;
                }
                2 => {
                    let byte = reader.read_bits(7)? as u8;
                    Self::push_literal(&mut output, unpacked_size, byte)?;
                }
                selector => {
                    let code = if selector == 0 {
                        reader.read_bits(6)?
                    } else if reader.read_bit()? {
                        reader.read_bits(12)? + DIST_BASE_FAR
                    } else {
                        reader.read_bits(8)? + DIST_BASE_MID
                    };

                    if code == END_OF_STREAM {
                        if output.len() >= unpacked_size {
                            return Ok(output);
                        }
                        // Sentinel before the declared size is reached: the
                        // reference tool treats it as a no-op and keeps
                        // decoding, so we do too.
                        continue;
                    }

                    let length = Self::read_match_length(&mut reader)?;
                    Self::copy_match(&mut output, unpacked_size, code, length)?;
                }
            }
        }
    }

    /// Decode a match length: a unary prefix (`k` zero bits before the
    /// first one bit) followed by `k` extra bits.
    ///
    /// `k == 0` encodes length 2; otherwise `length = extra + 2^k + 1`.
    fn read_match_length(reader: &mut BitReader<'_>) -> Result<usize> {
        let mut k = 0u32;
        while !reader.read_bit()? {
            k += 1;
        }
        if k == 0 {
            return Ok(2);
        }
        // A prefix of 32+ zero bits would encode a length past u32 range;
        // no output declared in a 32-bit header can hold it.
        if k > 31 {
            return Err(DecompressError::InvalidLengthPrefix(k));
        }
        Ok(reader.read_bits(k)? as usize + (1usize << k) + 1)
    }

    /// Append one literal byte, refusing to grow past the declared size.
    #[inline]
    fn push_literal(output: &mut Vec<u8>, limit: usize, byte: u8) -> Result<()> {
        if output.len() >= limit {
            return Err(DecompressError::BufferOverflow { limit });
        }
        output.push(byte);
        Ok(())
    }

    /// Copy `length` bytes from `distance` bytes back in the output.
    ///
    /// Performed one byte at a time in increasing address order so that a
    /// copy with `distance < length` reads bytes written earlier in the
    /// same copy (overlapping run expansion).
    fn copy_match(
        output: &mut Vec<u8>,
        limit: usize,
        distance: u32,
        length: usize,
    ) -> Result<()> {
        let dist = distance as usize;
        if dist == 0 || dist > output.len() {
            return Err(DecompressError::InvalidBackReference {
                distance,
                position: output.len() as u32,
            });
        }
        if length > limit - output.len() {
            return Err(DecompressError::BufferOverflow { limit });
        }

        let mut src = output.len() - dist;
        for _ in 0..length {
            let byte = output[src];
            output.push(byte);
            src += 1;
        }
        Ok(())
    }
}

impl Default for MofDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_signature() {
        let decoder = MofDecoder::new();
        assert!(matches!(
            decoder.decompress(b"XX\x00\x00", 0),
            Err(DecompressError::MissingSignature)
        ));
    }

    #[test]
    fn test_payload_shorter_than_signature() {
        let decoder = MofDecoder::new();
        assert!(matches!(
            decoder.decompress(b"DS\x00", 0),
            Err(DecompressError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_copy_match_overlap_expands_run() {
        let mut output = vec![b'x'];
        MofDecoder::copy_match(&mut output, 16, 1, 5).unwrap();
        assert_eq!(output, b"xxxxxx");
    }

    #[test]
    fn test_copy_match_period_two() {
        let mut output = vec![b'a', b'b'];
        MofDecoder::copy_match(&mut output, 16, 2, 5).unwrap();
        assert_eq!(output, b"abababa");
    }

    #[test]
    fn test_copy_match_rejects_distance_past_start() {
        let mut output = vec![b'a'];
        assert!(matches!(
            MofDecoder::copy_match(&mut output, 16, 2, 2),
            Err(DecompressError::InvalidBackReference {
                distance: 2,
                position: 1
            })
        ));
    }

    #[test]
    fn test_copy_match_rejects_distance_zero() {
        let mut output = vec![b'a'];
        assert!(matches!(
            MofDecoder::copy_match(&mut output, 16, 0, 2),
            Err(DecompressError::InvalidBackReference { .. })
        ));
    }

    #[test]
    fn test_copy_match_respects_output_limit() {
        let mut output = vec![b'a'];
        assert!(matches!(
            MofDecoder::copy_match(&mut output, 4, 1, 4),
            Err(DecompressError::BufferOverflow { limit: 4 })
        ));
    }
}
