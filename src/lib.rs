//! Binary MOF (BMOF) container parsing and decompression.
//!
//! Rust implementation of the proprietary "Binary MOF" container format
//! found in ACPI-WMI firmware blobs: a 16-byte little-endian header followed
//! by a bit-packed LZ-style compressed payload.
//!
//! ## Container Layout
//!
//! | Offset | Field | Value |
//! |--------|-------|-------|
//! | 0 | magic | `b"FOMB"` (1112362822 LE) |
//! | 4 | version | 1 |
//! | 8 | compressed_size | whole file length, header included |
//! | 12 | decompressed_size | exact output length |
//! | 16 | payload | `b"DS"` + 2 reserved bytes + token stream |
//!
//! ## Example
//!
//! ```rust,no_run
//! let data = std::fs::read("binary.bmof")?;
//! let mof = bmof_stream::decompress(&data)?;
//! assert!(!mof.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The engine is a pure synchronous function of its input buffer; calls on
//! independent buffers can run concurrently with no coordination.

pub mod decompress;
pub mod error;
pub mod parsing;

pub use error::BmofError;
pub use parsing::container_header::{ContainerHeader, BMOF_SIGNATURE, BMOF_VERSION};
pub use parsing::ContainerHeaderParser;

// Re-export decompression types
pub use decompress::{BitReader, DecompressError, MofDecoder};

/// Decompress a complete BMOF container.
///
/// `data` must be the whole file: the 16-byte header plus exactly
/// `compressed_size - 16` payload bytes. Returns exactly
/// `decompressed_size` bytes on success.
pub fn decompress(data: &[u8]) -> error::Result<Vec<u8>> {
    let header = ContainerHeaderParser::parse(data)?;

    if data.len() as u64 != u64::from(header.compressed_size) {
        return Err(BmofError::SizeMismatch {
            declared: u64::from(header.compressed_size),
            actual: data.len() as u64,
        });
    }

    let payload = &data[ContainerHeaderParser::HEADER_SIZE..];
    let decoder = MofDecoder::new();
    let output = decoder.decompress(payload, header.decompressed_size as usize)?;
    Ok(output)
}
