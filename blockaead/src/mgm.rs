//! **MGM**: Multilinear Galois Mode (GOST R 34.13-2015, RFC 9058).
//!
//! One 16-byte nonce drives two passes:
//!
//! - encryption: counter mode starting at `E(0 || ICN)`, incrementing the
//!   right half of the counter block;
//! - authentication: a multilinear hash over GF(2^128) whose keys are
//!   `E(Z_i)` for `Z_1 = E(1 || ICN)`, incrementing the left half.
//!
//! Keeping the counters in disjoint halves is what lets both passes share the
//! nonce.

use crate::{Aead, BLOCK_SIZE, Error};
use alloc::vec::Vec;
use blockmac::{
    BlockCipher,
    hazmat::{mul128, xor_in_place},
};
use core::fmt::{self, Debug};
use subtle::ConstantTimeEq;

const MSB: u128 = 1 << 127;
const LOW_HALF: u128 = 0xffff_ffff_ffff_ffff;

/// **MGM** authenticated encryption over a 128-bit block cipher.
///
/// Output layout is `ciphertext || tag`, the tag being the first `tag_size`
/// bytes of the final block.
#[derive(Clone)]
pub struct Mgm<C> {
    cipher: C,
    tag_size: usize,
}

impl<C: BlockCipher> Mgm<C> {
    /// Initialize MGM with a full 16-byte tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockSize`] unless the cipher has 16-byte
    /// blocks.
    pub fn new(cipher: C) -> Result<Self, Error> {
        Self::with_tag_size(cipher, BLOCK_SIZE)
    }

    /// Initialize MGM producing `tag_size`-byte tags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockSize`] unless the cipher has 16-byte
    /// blocks, or [`Error::InvalidTagSize`] unless `1 <= tag_size <= 16`.
    pub fn with_tag_size(cipher: C, tag_size: usize) -> Result<Self, Error> {
        let block_size = cipher.block_size();
        if block_size != BLOCK_SIZE {
            return Err(Error::UnsupportedBlockSize(block_size));
        }

        if tag_size == 0 || tag_size > BLOCK_SIZE {
            return Err(Error::InvalidTagSize {
                tag_size,
                max: BLOCK_SIZE,
            });
        }

        Ok(Self { cipher, tag_size })
    }

    /// Tag size in bytes.
    #[must_use]
    pub fn tag_size(&self) -> usize {
        self.tag_size
    }

    fn encrypt(&self, block: u128) -> u128 {
        let mut bytes = block.to_be_bytes();
        self.cipher.encrypt_in_place(&mut bytes);
        u128::from_be_bytes(bytes)
    }

    /// Counter-mode pass, in place.
    fn crypt(&self, icn: u128, data: &mut [u8]) {
        let mut y = self.encrypt(icn & !MSB);

        for chunk in data.chunks_mut(BLOCK_SIZE) {
            xor_in_place(chunk, &self.encrypt(y).to_be_bytes());
            y = incr_r(y);
        }
    }

    /// Authentication pass over the associated data and ciphertext.
    fn auth(
        &self,
        icn: u128,
        associated_data: &[u8],
        ciphertext: &[u8],
        lengths: u128,
    ) -> [u8; BLOCK_SIZE] {
        let mut z = self.encrypt(icn | MSB);
        let mut sum = 0u128;

        for chunk in associated_data
            .chunks(BLOCK_SIZE)
            .chain(ciphertext.chunks(BLOCK_SIZE))
        {
            sum ^= mul128(self.encrypt(z), padded(chunk));
            z = incr_l(z);
        }

        sum ^= mul128(self.encrypt(z), lengths);
        self.encrypt(sum).to_be_bytes()
    }
}

impl<C: BlockCipher> Aead for Mgm<C> {
    fn nonce_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn overhead(&self) -> usize {
        self.tag_size
    }

    fn seal_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), Error> {
        let icn = check_nonce(nonce)?;
        let lengths = encode_lengths(associated_data.len(), plaintext.len())?;

        let start = dst.len();
        dst.extend_from_slice(plaintext);
        self.crypt(icn, &mut dst[start..]);

        let tag = self.auth(icn, associated_data, &dst[start..], lengths);
        dst.extend_from_slice(&tag[..self.tag_size]);
        Ok(())
    }

    fn open_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), Error> {
        let icn = check_nonce(nonce)?;
        let text_len = ciphertext
            .len()
            .checked_sub(self.tag_size)
            .ok_or(Error::Authentication)?;
        let (ciphertext, tag) = ciphertext.split_at(text_len);
        let lengths = encode_lengths(associated_data.len(), ciphertext.len())?;

        let expected = self.auth(icn, associated_data, ciphertext, lengths);
        if !bool::from(expected[..self.tag_size].ct_eq(tag)) {
            return Err(Error::Authentication);
        }

        let start = dst.len();
        dst.extend_from_slice(ciphertext);
        self.crypt(icn, &mut dst[start..]);
        Ok(())
    }
}

impl<C> Debug for Mgm<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Mgm")
            .field("tag_size", &self.tag_size)
            .finish_non_exhaustive()
    }
}

/// Parse the initial counter nonce, which must leave its top bit free for
/// the pass tag.
fn check_nonce(nonce: &[u8]) -> Result<u128, Error> {
    let icn = <[u8; BLOCK_SIZE]>::try_from(nonce).map_err(|_| Error::InvalidNonceSize {
        expected: BLOCK_SIZE,
        actual: nonce.len(),
    })?;

    if icn[0] & 0x80 != 0 {
        return Err(Error::InvalidNonce);
    }

    Ok(u128::from_be_bytes(icn))
}

/// `bitlen(A) || bitlen(C)` as two big-endian 64-bit halves.
fn encode_lengths(associated_data_len: usize, text_len: usize) -> Result<u128, Error> {
    if associated_data_len == 0 && text_len == 0 {
        return Err(Error::EmptyInput);
    }

    let ad_bits = bit_length(associated_data_len)?;
    let text_bits = bit_length(text_len)?;
    Ok((u128::from(ad_bits) << 64) | u128::from(text_bits))
}

fn bit_length(len: usize) -> Result<u64, Error> {
    u64::try_from(len)
        .ok()
        .and_then(|len| len.checked_mul(8))
        .ok_or(Error::InputTooLong)
}

/// Zero-pad a trailing partial chunk to a full block.
fn padded(chunk: &[u8]) -> u128 {
    let mut block = [0u8; BLOCK_SIZE];
    block[..chunk.len()].copy_from_slice(chunk);
    u128::from_be_bytes(block)
}

/// Increment the left (most significant) 64 bits modulo 2^64.
#[allow(clippy::cast_possible_truncation)]
fn incr_l(block: u128) -> u128 {
    let left = ((block >> 64) as u64).wrapping_add(1);
    (u128::from(left) << 64) | (block & LOW_HALF)
}

/// Increment the right (least significant) 64 bits modulo 2^64.
#[allow(clippy::cast_possible_truncation)]
fn incr_r(block: u128) -> u128 {
    let right = (block as u64).wrapping_add(1);
    (block & !LOW_HALF) | u128::from(right)
}
