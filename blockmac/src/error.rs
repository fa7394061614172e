//! Error type.

use core::fmt;

/// Errors produced by the MAC engines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The cipher's block size has no supported GF(2^n) reduction polynomial.
    UnsupportedBlockSize(usize),

    /// Requested tag size is zero or larger than the cipher's block size.
    InvalidTagSize {
        /// Requested tag size in bytes.
        tag_size: usize,
        /// Block size of the underlying cipher in bytes.
        block_size: usize,
    },

    /// The MAC was finished and must be reset before it is used again.
    Finished,

    /// Tag verification failed.
    TagMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedBlockSize(size) => {
                write!(f, "unsupported cipher block size: {size} bytes")
            }
            Error::InvalidTagSize {
                tag_size,
                block_size,
            } => write!(
                f,
                "invalid tag size {tag_size}: must be between 1 and {block_size} bytes"
            ),
            Error::Finished => f.write_str("MAC already finished"),
            Error::TagMismatch => f.write_str("MAC tag mismatch"),
        }
    }
}

impl core::error::Error for Error {}
