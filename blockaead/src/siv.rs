//! **SIV**: Synthetic Initialization Vector mode (RFC 5297).
//!
//! The tag is derived by S2V over the associated data components and the
//! plaintext, then reused as the initial counter of a CTR keystream. Output
//! layout is `V || ciphertext`.
//!
//! S2V can run over either [`Cmac`] (AES-SIV as standardized) or [`Pmac`]
//! (PMAC-SIV).

use crate::{Aead, BLOCK_SIZE, Error};
use alloc::vec::Vec;
use blockmac::{
    BlockCipher, Cmac, Mac, Pmac,
    cipher::KeyInit,
    hazmat::{Field, xor_in_place},
};
use core::fmt::{self, Debug};
use subtle::ConstantTimeEq;

/// Most associated data components S2V accepts alongside the plaintext.
pub const MAX_COMPONENTS: usize = 126;

/// Clears the top bit of bytes 8 and 12 of the synthetic IV.
const CTR_MASK: u128 = !((1 << 63) | (1 << 31));

/// SIV over CMAC, i.e. AES-SIV when instantiated with AES.
pub type CmacSiv<C> = Siv<Cmac<C>, C>;

/// SIV over PMAC.
pub type PmacSiv<C> = Siv<Pmac<C>, C>;

/// **SIV** authenticated encryption: a 16-byte MAC for S2V plus a 128-bit
/// block cipher for the CTR keystream.
#[derive(Clone)]
pub struct Siv<M, C> {
    mac: M,
    cipher: C,
    nonce_size: usize,
}

impl<M: Mac + Clone, C: BlockCipher> Siv<M, C> {
    /// Combine a MAC and a CTR cipher.
    ///
    /// Every [`Aead::seal`] and [`Aead::open`] call must then pass a nonce of
    /// exactly `nonce_size` bytes. A zero `nonce_size` makes SIV fully
    /// deterministic.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockSize`] unless both the MAC and the
    /// cipher work on 16-byte blocks, or [`Error::InvalidTagSize`] if the MAC
    /// is truncated.
    pub fn new(mac: M, cipher: C, nonce_size: usize) -> Result<Self, Error> {
        for block_size in [mac.block_size(), cipher.block_size()] {
            if block_size != BLOCK_SIZE {
                return Err(Error::UnsupportedBlockSize(block_size));
            }
        }

        if mac.size() != BLOCK_SIZE {
            return Err(Error::InvalidTagSize {
                tag_size: mac.size(),
                max: BLOCK_SIZE,
            });
        }

        Ok(Self {
            mac,
            cipher,
            nonce_size,
        })
    }

    /// Encrypt `plaintext` authenticating the ordered `components`, returning
    /// `V || ciphertext`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyComponents`] if more than [`MAX_COMPONENTS`]
    /// are given.
    pub fn seal_components(
        &self,
        plaintext: &[u8],
        components: &[&[u8]],
    ) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(BLOCK_SIZE + plaintext.len());
        self.seal_components_append(&mut out, plaintext, components)?;
        Ok(out)
    }

    /// Like [`Siv::seal_components`], appending to `dst`.
    ///
    /// # Errors
    ///
    /// See [`Siv::seal_components`]. `dst` is unchanged on error.
    pub fn seal_components_append(
        &self,
        dst: &mut Vec<u8>,
        plaintext: &[u8],
        components: &[&[u8]],
    ) -> Result<(), Error> {
        let v = self.s2v(components, plaintext)?;
        dst.extend_from_slice(&v);

        let start = dst.len();
        dst.extend_from_slice(plaintext);
        self.ctr(&v, &mut dst[start..]);
        Ok(())
    }

    /// Decrypt and verify `V || ciphertext` against the ordered `components`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] on any mismatch, or
    /// [`Error::TooManyComponents`] if more than [`MAX_COMPONENTS`] are given.
    pub fn open_components(
        &self,
        ciphertext: &[u8],
        components: &[&[u8]],
    ) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(ciphertext.len().saturating_sub(BLOCK_SIZE));
        self.open_components_append(&mut out, ciphertext, components)?;
        Ok(out)
    }

    /// Like [`Siv::open_components`], appending to `dst`.
    ///
    /// # Errors
    ///
    /// See [`Siv::open_components`]. The candidate plaintext is wiped and
    /// `dst` restored to its original length on error.
    pub fn open_components_append(
        &self,
        dst: &mut Vec<u8>,
        ciphertext: &[u8],
        components: &[&[u8]],
    ) -> Result<(), Error> {
        let Some((v, ciphertext)) = ciphertext.split_first_chunk::<BLOCK_SIZE>() else {
            return Err(Error::Authentication);
        };

        let start = dst.len();
        dst.extend_from_slice(ciphertext);
        self.ctr(v, &mut dst[start..]);

        let verified = self.s2v(components, &dst[start..]).and_then(|expected| {
            if expected[..].ct_eq(&v[..]).into() {
                Ok(())
            } else {
                Err(Error::Authentication)
            }
        });

        if verified.is_err() {
            wipe(&mut dst[start..]);
            dst.truncate(start);
        }

        verified
    }

    /// S2V with the plaintext as the final string.
    fn s2v(&self, components: &[&[u8]], plaintext: &[u8]) -> Result<[u8; BLOCK_SIZE], Error> {
        if components.len() > MAX_COMPONENTS {
            return Err(Error::TooManyComponents);
        }

        let field = Field::GF128;
        let mut mac = self.mac.clone();
        mac.reset();

        let mut d = [0u8; BLOCK_SIZE];
        let tag = mac_once(&mut mac, &d)?;
        d.copy_from_slice(tag.as_slice());

        for component in components {
            let tag = mac_once(&mut mac, component)?;
            field.double(&mut d);
            xor_in_place(&mut d, tag.as_slice());
        }

        if let Some(head_len) = plaintext.len().checked_sub(BLOCK_SIZE) {
            let (head, tail) = plaintext.split_at(head_len);
            xor_in_place(&mut d, tail);
            mac.write(head)?;
        } else {
            field.double(&mut d);
            xor_in_place(&mut d, plaintext);
            d[plaintext.len()] ^= 0x80;
        }

        mac.write(&d)?;
        let tag = mac.finish()?;

        let mut v = [0u8; BLOCK_SIZE];
        v.copy_from_slice(tag.as_slice());
        Ok(v)
    }

    /// CTR keystream seeded from `v` with bits 63 and 31 cleared.
    fn ctr(&self, v: &[u8; BLOCK_SIZE], data: &mut [u8]) {
        let mut counter = u128::from_be_bytes(*v) & CTR_MASK;

        for chunk in data.chunks_mut(BLOCK_SIZE) {
            let mut keystream = counter.to_be_bytes();
            self.cipher.encrypt_in_place(&mut keystream);
            xor_in_place(chunk, &keystream);
            counter = counter.wrapping_add(1);
        }
    }

    fn check_nonce(&self, nonce: &[u8]) -> Result<(), Error> {
        if nonce.len() == self.nonce_size {
            Ok(())
        } else {
            Err(Error::InvalidNonceSize {
                expected: self.nonce_size,
                actual: nonce.len(),
            })
        }
    }
}

impl<C: BlockCipher + Clone> CmacSiv<C> {
    /// CMAC-SIV from a MAC-half cipher and a CTR-half cipher.
    ///
    /// # Errors
    ///
    /// Returns an error unless both ciphers have 16-byte blocks.
    pub fn from_ciphers(mac_cipher: C, ctr_cipher: C, nonce_size: usize) -> Result<Self, Error> {
        Self::new(Cmac::new(mac_cipher)?, ctr_cipher, nonce_size)
    }
}

impl<C: BlockCipher + KeyInit + Clone> CmacSiv<C> {
    /// CMAC-SIV keyed with `key = K1 || K2`: the first half keys CMAC and
    /// the second half keys CTR.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeySize`] unless `key` is two valid keys of
    /// `C` concatenated.
    pub fn new_from_slice(key: &[u8], nonce_size: usize) -> Result<Self, Error> {
        let (mac_key, ctr_key) = split_key(key)?;
        Self::from_ciphers(init_cipher(mac_key)?, init_cipher(ctr_key)?, nonce_size)
    }
}

impl<C: BlockCipher + Clone> PmacSiv<C> {
    /// PMAC-SIV from a MAC-half cipher and a CTR-half cipher.
    ///
    /// # Errors
    ///
    /// Returns an error unless both ciphers have 16-byte blocks.
    pub fn from_ciphers(mac_cipher: C, ctr_cipher: C, nonce_size: usize) -> Result<Self, Error> {
        Self::new(Pmac::new(mac_cipher)?, ctr_cipher, nonce_size)
    }
}

impl<C: BlockCipher + KeyInit + Clone> PmacSiv<C> {
    /// PMAC-SIV keyed with `key = K1 || K2`: the first half keys PMAC and
    /// the second half keys CTR.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeySize`] unless `key` is two valid keys of
    /// `C` concatenated.
    pub fn new_from_slice(key: &[u8], nonce_size: usize) -> Result<Self, Error> {
        let (mac_key, ctr_key) = split_key(key)?;
        Self::from_ciphers(init_cipher(mac_key)?, init_cipher(ctr_key)?, nonce_size)
    }
}

impl<M: Mac + Clone, C: BlockCipher> Aead for Siv<M, C> {
    fn nonce_size(&self) -> usize {
        self.nonce_size
    }

    fn overhead(&self) -> usize {
        BLOCK_SIZE
    }

    fn seal_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), Error> {
        self.check_nonce(nonce)?;
        let components = [associated_data, nonce];
        self.seal_components_append(dst, plaintext, aead_components(&components))
    }

    fn open_append(
        &self,
        dst: &mut Vec<u8>,
        nonce: &[u8],
        ciphertext: &[u8],
        associated_data: &[u8],
    ) -> Result<(), Error> {
        self.check_nonce(nonce)?;
        let components = [associated_data, nonce];
        self.open_components_append(dst, ciphertext, aead_components(&components))
    }
}

impl<M, C> Debug for Siv<M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Siv")
            .field("nonce_size", &self.nonce_size)
            .finish_non_exhaustive()
    }
}

/// Tag of `data` alone; leaves `mac` reset.
fn mac_once<M: Mac>(mac: &mut M, data: &[u8]) -> Result<blockmac::Tag, Error> {
    mac.write(data)?;
    let tag = mac.finish()?;
    mac.reset();
    Ok(tag)
}

/// `[associated_data, nonce]`, without the nonce when it is empty.
fn aead_components<'a>(components: &'a [&'a [u8]; 2]) -> &'a [&'a [u8]] {
    if components[1].is_empty() {
        &components[..1]
    } else {
        components
    }
}

#[cfg(feature = "zeroize")]
fn wipe(buf: &mut [u8]) {
    zeroize::Zeroize::zeroize(buf);
}

#[cfg(not(feature = "zeroize"))]
fn wipe(buf: &mut [u8]) {
    buf.fill(0);
}

fn split_key(key: &[u8]) -> Result<(&[u8], &[u8]), Error> {
    if key.is_empty() || key.len() % 2 != 0 {
        return Err(Error::InvalidKeySize);
    }

    Ok(key.split_at(key.len() / 2))
}

fn init_cipher<C: KeyInit>(key: &[u8]) -> Result<C, Error> {
    C::new_from_slice(key).map_err(|_| Error::InvalidKeySize)
}
