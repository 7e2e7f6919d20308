//! Container header parser - BMOF signature and sizes.
//!
//! The container header is the first 16 bytes of a BMOF file:
//! four little-endian u32 fields {magic, version, compressed_size,
//! decompressed_size}. `compressed_size` counts the whole file including
//! this header.

use crate::error::{BmofError, Result};

/// BMOF magic signature, `0x424D4F46` little-endian ("FOMB" in file order).
pub const BMOF_SIGNATURE: [u8; 4] = *b"FOMB";

/// The only known container version.
pub const BMOF_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Total length of the container in bytes, header included.
    pub compressed_size: u32,
    /// Exact length of the decompressed output in bytes.
    pub decompressed_size: u32,
}

impl ContainerHeader {
    /// Length of the compressed payload following the header.
    pub fn payload_size(&self) -> u32 {
        self.compressed_size
            .saturating_sub(ContainerHeaderParser::HEADER_SIZE as u32)
    }
}

pub struct ContainerHeaderParser;

impl ContainerHeaderParser {
    pub const HEADER_SIZE: usize = 16;

    /// Parse the container header from the start of `buffer`.
    ///
    /// Pure function of the first 16 bytes: validates magic, version and the
    /// declared compressed size, and reads nothing past the header. The
    /// magic check happens before any other field is touched.
    pub fn parse(buffer: &[u8]) -> Result<ContainerHeader> {
        if buffer.len() < Self::HEADER_SIZE {
            return Err(BmofError::BufferTooSmall {
                needed: Self::HEADER_SIZE,
                have: buffer.len(),
            });
        }

        if buffer[..4] != BMOF_SIGNATURE {
            return Err(BmofError::InvalidSignature);
        }

        let version = u32::from_le_bytes([buffer[4], buffer[5], buffer[6], buffer[7]]);
        if version != BMOF_VERSION {
            return Err(BmofError::UnsupportedVersion(version));
        }

        let compressed_size = u32::from_le_bytes([buffer[8], buffer[9], buffer[10], buffer[11]]);
        let decompressed_size =
            u32::from_le_bytes([buffer[12], buffer[13], buffer[14], buffer[15]]);

        // Must hold at least the 4-byte payload sub-signature.
        if compressed_size <= 4 {
            return Err(BmofError::CompressedSizeTooSmall(compressed_size));
        }

        Ok(ContainerHeader {
            compressed_size,
            decompressed_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(magic: &[u8; 4], version: u32, csize: u32, dsize: u32) -> [u8; 16] {
        let mut buf = [0u8; 16];
        buf[..4].copy_from_slice(magic);
        buf[4..8].copy_from_slice(&version.to_le_bytes());
        buf[8..12].copy_from_slice(&csize.to_le_bytes());
        buf[12..16].copy_from_slice(&dsize.to_le_bytes());
        buf
    }

    #[test]
    fn test_parse_valid_header() {
        let buf = header_bytes(b"FOMB", 1, 1024, 4096);
        let header = ContainerHeaderParser::parse(&buf).unwrap();
        assert_eq!(header.compressed_size, 1024);
        assert_eq!(header.decompressed_size, 4096);
        assert_eq!(header.payload_size(), 1008);
    }

    #[test]
    fn test_magic_is_the_documented_constant() {
        assert_eq!(u32::from_le_bytes(BMOF_SIGNATURE), 1112362822);
    }

    #[test]
    fn test_invalid_signature() {
        let buf = header_bytes(b"BMOF", 1, 1024, 4096);
        assert!(matches!(
            ContainerHeaderParser::parse(&buf),
            Err(BmofError::InvalidSignature)
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let buf = header_bytes(b"FOMB", 2, 1024, 4096);
        assert!(matches!(
            ContainerHeaderParser::parse(&buf),
            Err(BmofError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn test_compressed_size_too_small() {
        let buf = header_bytes(b"FOMB", 1, 4, 4096);
        assert!(matches!(
            ContainerHeaderParser::parse(&buf),
            Err(BmofError::CompressedSizeTooSmall(4))
        ));
    }

    #[test]
    fn test_buffer_too_small() {
        let buf = [0x46, 0x4F, 0x4D];
        assert!(matches!(
            ContainerHeaderParser::parse(&buf),
            Err(BmofError::BufferTooSmall { needed: 16, have: 3 })
        ));
    }

    #[test]
    fn test_bad_magic_rejected_before_sizes() {
        // Garbage sizes must not matter when the magic is wrong
        let buf = header_bytes(b"\x00\x00\x00\x00", 0xFFFF_FFFF, 0, 0);
        assert!(matches!(
            ContainerHeaderParser::parse(&buf),
            Err(BmofError::InvalidSignature)
        ));
    }
}
