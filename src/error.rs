//! Error types for BMOF container parsing and decompression.
//!
//! This module provides the [`BmofError`] type which covers all possible
//! errors that can occur when parsing or decompressing a Binary MOF
//! container.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Format | [`InvalidSignature`], [`UnsupportedVersion`], [`CompressedSizeTooSmall`] | Input is not a valid BMOF container |
//! | Sizing | [`SizeMismatch`], [`BufferTooSmall`] | Declared sizes disagree with the supplied bytes |
//! | Decompression | [`Decompress`] | The token stream itself is corrupt or truncated |
//! | I/O | [`Io`] | Read/write errors in the harness |
//!
//! [`InvalidSignature`]: BmofError::InvalidSignature
//! [`UnsupportedVersion`]: BmofError::UnsupportedVersion
//! [`CompressedSizeTooSmall`]: BmofError::CompressedSizeTooSmall
//! [`SizeMismatch`]: BmofError::SizeMismatch
//! [`BufferTooSmall`]: BmofError::BufferTooSmall
//! [`Decompress`]: BmofError::Decompress
//! [`Io`]: BmofError::Io

use crate::decompress::DecompressError;
use std::fmt;
use std::io;

/// Error type for BMOF operations.
///
/// Covers header validation, size bookkeeping, and (via [`Decompress`])
/// failures inside the token decoder. Implements [`std::error::Error`] for
/// integration with the Rust error handling ecosystem.
///
/// [`Decompress`]: BmofError::Decompress
#[derive(Debug)]
pub enum BmofError {
    /// The file does not start with the BMOF magic bytes `b"FOMB"`
    /// (the little-endian u32 constant 1112362822).
    InvalidSignature,

    /// The header version field is not 1.
    ///
    /// The `u32` value is the version that was found. Only version 1
    /// containers are known to exist.
    UnsupportedVersion(u32),

    /// The declared compressed size is too small to contain even the
    /// 4-byte payload sub-signature.
    CompressedSizeTooSmall(u32),

    /// The provided buffer is too small.
    ///
    /// This occurs when fewer bytes are supplied than a parser needs.
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        have: usize,
    },

    /// The declared compressed size disagrees with the bytes supplied.
    ///
    /// The caller must hand the engine exactly `compressed_size` bytes
    /// (header included); anything else indicates truncation or trailing
    /// garbage.
    SizeMismatch {
        /// Size declared in the container header.
        declared: u64,
        /// Size of the buffer actually supplied.
        actual: u64,
    },

    /// The compressed token stream is corrupt or truncated.
    Decompress(DecompressError),

    /// An I/O error occurred.
    ///
    /// Wraps [`std::io::Error`] for file system operations in the harness.
    Io(io::Error),
}

impl fmt::Display for BmofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSignature => write!(f, "Invalid BMOF signature"),
            Self::UnsupportedVersion(v) => write!(f, "Unsupported BMOF version: {}", v),
            Self::CompressedSizeTooSmall(n) => {
                write!(f, "Declared compressed size {} is too small", n)
            }
            Self::BufferTooSmall { needed, have } => {
                write!(f, "Buffer too small: need {} bytes, have {}", needed, have)
            }
            Self::SizeMismatch { declared, actual } => {
                write!(
                    f,
                    "Compressed size mismatch: header declares {} bytes, got {}",
                    declared, actual
                )
            }
            Self::Decompress(e) => write!(f, "Decompression failed: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for BmofError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decompress(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for BmofError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<DecompressError> for BmofError {
    fn from(e: DecompressError) -> Self {
        Self::Decompress(e)
    }
}

pub type Result<T> = std::result::Result<T, BmofError>;
