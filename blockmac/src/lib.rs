#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

extern crate alloc;

#[cfg(feature = "hazmat")]
pub mod hazmat;

mod block;
mod block_cipher;
mod cmac;
mod error;
mod gf;
mod pmac;

pub use cipher;

pub use crate::{
    block::{Block, MAX_BLOCK_SIZE},
    block_cipher::BlockCipher,
    cmac::Cmac,
    error::Error,
    pmac::Pmac,
};

use alloc::vec::Vec;
use subtle::ConstantTimeEq;

/// MAC tags: a prefix of the final block, `1..=block_size` bytes long.
pub type Tag = Block;

/// Incremental message authentication code.
///
/// Input is absorbed with [`Mac::write`]. [`Mac::sum`] computes the tag of
/// everything written so far without disturbing the running state, so a
/// caller can keep writing after peeking at an intermediate tag.
/// [`Mac::finish`] is the consuming variant: afterwards the instance refuses
/// further use until [`Mac::reset`] is called.
///
/// Instances hold mutable state and are not meant to be shared between
/// threads without external synchronization.
pub trait Mac {
    /// Block size of the underlying cipher in bytes.
    fn block_size(&self) -> usize;

    /// Tag size in bytes.
    fn size(&self) -> usize;

    /// Absorb `data`, returning the number of bytes consumed (always all of them).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Finished`] if the MAC was finished and not reset.
    fn write(&mut self, data: &[u8]) -> Result<usize, Error>;

    /// Tag of the data written so far. The running state is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Finished`] if the MAC was finished and not reset.
    fn sum(&self) -> Result<Tag, Error>;

    /// Compute the tag and mark this instance as finished.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Finished`] if the MAC was already finished.
    fn finish(&mut self) -> Result<Tag, Error>;

    /// Discard all written data and clear the finished flag.
    fn reset(&mut self);

    /// Append the tag of the data written so far to `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Finished`] if the MAC was finished and not reset.
    fn sum_append(&self, dst: &mut Vec<u8>) -> Result<(), Error> {
        let tag = self.sum()?;
        dst.extend_from_slice(tag.as_slice());
        Ok(())
    }

    /// Check `tag` against the tag of the data written so far in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TagMismatch`] if the tags differ (including in
    /// length) or [`Error::Finished`] if the MAC was finished and not reset.
    fn verify(&self, tag: &[u8]) -> Result<(), Error> {
        let expected = self.sum()?;
        if expected.as_slice().ct_eq(tag).into() {
            Ok(())
        } else {
            Err(Error::TagMismatch)
        }
    }
}
