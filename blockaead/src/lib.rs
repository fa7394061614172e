#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

extern crate alloc;

mod error;
mod mgm;
mod siv;

pub use blockmac;

pub use crate::{
    error::Error,
    mgm::Mgm,
    siv::{CmacSiv, MAX_COMPONENTS, PmacSiv, Siv},
};

use alloc::vec::Vec;

/// Size of the cipher block required by every mode in this crate.
pub const BLOCK_SIZE: usize = 16;

/// Authenticated encryption with associated data.
///
/// Ciphertexts are positional byte strings without length prefixes; the tag
/// layout is fixed per mode (see [`Aead::overhead`]).
pub trait Aead {
    /// Exact nonce length accepted by [`Aead::seal`] and [`Aead::open`].
    fn nonce_size(&self) -> usize;

    /// Difference in length between a ciphertext and its plaintext.
    fn overhead(&self) -> usize;

    /// Encrypt and authenticate `plaintext`, appending the result to `dst`.
    ///
    /// # Errors
    ///
    /// Returns an error if the nonce or input violates the mode's
    /// preconditions. `dst` is left unchanged in that case.
    fn seal_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), Error>;

    /// Verify and decrypt `ciphertext`, appending the plaintext to `dst`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the ciphertext, tag or associated
    /// data were tampered with, or another error if the nonce or input
    /// violates the mode's preconditions. `dst` is left unchanged on error.
    fn open_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), Error>;

    /// Encrypt and authenticate `plaintext` into a new buffer.
    ///
    /// # Errors
    ///
    /// See [`Aead::seal_append`].
    fn seal(
        &self,
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(plaintext.len() + self.overhead());
        self.seal_append(&mut out, nonce, plaintext, associated_data)?;
        Ok(out)
    }

    /// Verify and decrypt `ciphertext` into a new buffer.
    ///
    /// # Errors
    ///
    /// See [`Aead::open_append`].
    fn open(
        &self,
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(ciphertext.len().saturating_sub(self.overhead()));
        self.open_append(&mut out, nonce, ciphertext, associated_data)?;
        Ok(out)
    }
}
