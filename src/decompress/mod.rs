//! BMOF payload decompression.
//!
//! Implements the bit-packed LZ-style scheme used inside Binary MOF
//! containers: a 2-bit token selector chooses between 7-bit literals and
//! length/distance back-references, terminated by a reserved distance
//! sentinel.
//!
//! ## Architecture
//!
//! The decompression pipeline:
//!
//! ```text
//! Compressed Payload ("DS" + token stream)
//!       ↓
//! ┌─────────────┐
//! │ BitReader   │ ← LSB-first bit-level access to the stream
//! └─────────────┘
//!       ↓
//! ┌─────────────┐
//! │ MofDecoder  │ ← Expand literals and back-references
//! └─────────────┘
//!       ↓
//! Decompressed Data (exactly `decompressed_size` bytes)
//! ```
//!
//! ## Token Layout
//!
//! | Selector (2 bits) | Payload | Meaning |
//! |-------------------|---------|---------|
//! | `1` | 7 bits | Literal byte with top bit set (`0x80 \| bits`) |
//! | `2` | 7 bits | Literal byte with top bit clear |
//! | `0` | 6 bits | Back-reference distance 0-63 |
//! | `3` | flag + 8 or 12 bits | Distance `+64` (flag 0) or `+320` (flag 1) |
//!
//! Distance 4415 is the end-of-stream sentinel. Copy lengths follow each
//! distance as a unary 0-bit prefix plus `k` extra bits.
//!
//! ## Example
//!
//! ```rust
//! use bmof_stream::MofDecoder;
//!
//! let decoder = MofDecoder::new();
//! // Decompress a payload (everything after the 16-byte container header)
//! // let decompressed = decoder.decompress(&payload, expected_size)?;
//! ```

mod bit_reader;
mod decoder;


pub use bit_reader::BitReader;
pub use decoder::{MofDecoder, END_OF_STREAM, PAYLOAD_SIGNATURE};

use std::fmt;

/// Decompression errors.
#[derive(Debug)]
pub enum DecompressError {
    /// The compressed stream ran out of bytes before the sentinel fired.
    UnexpectedEof,
    /// The payload does not start with the `b"DS"` sub-signature.
    MissingSignature,
    /// A back-reference points before the start of the output.
    InvalidBackReference { distance: u32, position: u32 },
    /// A match-length unary prefix too long to encode a representable length.
    InvalidLengthPrefix(u32),
    /// A write would exceed the declared decompressed size.
    BufferOverflow { limit: usize },
}

impl fmt::Display for DecompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "Unexpected end of compressed data"),
            Self::MissingSignature => write!(f, "Payload does not start with DS signature"),
            Self::InvalidBackReference { distance, position } => {
                write!(
                    f,
                    "Invalid back reference: distance {} exceeds output position {}",
                    distance, position
                )
            }
            Self::InvalidLengthPrefix(k) => {
                write!(f, "Invalid match length prefix: {} leading zero bits", k)
            }
            Self::BufferOverflow { limit } => {
                write!(f, "Output would exceed declared size of {} bytes", limit)
            }
        }
    }
}

impl std::error::Error for DecompressError {}

pub type Result<T> = std::result::Result<T, DecompressError>;
