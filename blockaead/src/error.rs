//! Error type.

use core::fmt;

/// Errors produced by the AEAD modes.
///
/// [`Error::Authentication`] is the only variant caused by the data itself;
/// every other variant reports misuse by the caller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The underlying MAC could not be constructed or used.
    Mac(blockmac::Error),

    /// The mode requires a cipher with 16-byte blocks.
    UnsupportedBlockSize(usize),

    /// Requested tag size is zero or larger than a block.
    InvalidTagSize {
        /// Requested tag size in bytes.
        tag_size: usize,
        /// Largest allowed tag size in bytes.
        max: usize,
    },

    /// Key length does not fit the cipher.
    InvalidKeySize,

    /// Nonce length differs from the configured nonce size.
    InvalidNonceSize {
        /// Configured nonce size in bytes.
        expected: usize,
        /// Length of the nonce that was passed.
        actual: usize,
    },

    /// MGM nonce with its most significant bit set.
    InvalidNonce,

    /// Neither text nor associated data was supplied to MGM.
    EmptyInput,

    /// Text or associated data exceeds the mode's length limit.
    InputTooLong,

    /// More associated data components than S2V can absorb.
    TooManyComponents,

    /// Ciphertext or tag failed verification.
    Authentication,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Mac(err) => write!(f, "MAC error: {err}"),
            Error::UnsupportedBlockSize(size) => {
                write!(f, "unsupported cipher block size: {size} bytes (expected 16)")
            }
            Error::InvalidTagSize { tag_size, max } => {
                write!(f, "invalid tag size {tag_size}: must be between 1 and {max} bytes")
            }
            Error::InvalidKeySize => f.write_str("invalid key size"),
            Error::InvalidNonceSize { expected, actual } => {
                write!(f, "invalid nonce size {actual}: expected {expected} bytes")
            }
            Error::InvalidNonce => f.write_str("nonce must not have its most significant bit set"),
            Error::EmptyInput => f.write_str("either text or associated data must be provided"),
            Error::InputTooLong => f.write_str("input too long"),
            Error::TooManyComponents => f.write_str("too many associated data components"),
            Error::Authentication => f.write_str("message authentication failed"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Mac(err) => Some(err),
            _ => None,
        }
    }
}

impl From<blockmac::Error> for Error {
    fn from(err: blockmac::Error) -> Self {
        Error::Mac(err)
    }
}
