//! Runtime-sized cipher blocks.

use core::fmt::{self, Debug};
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Largest cipher block size supported by the MAC engines, in bytes.
pub const MAX_BLOCK_SIZE: usize = 128;

/// A cipher block whose length is only known at runtime.
///
/// Used for subkeys, chaining values and tags. The contents live inline in a
/// fixed [`MAX_BLOCK_SIZE`]-byte array, so copying a `Block` never allocates.
///
/// Equality is evaluated in constant time.
#[derive(Clone, Copy)]
pub struct Block {
    bytes: [u8; MAX_BLOCK_SIZE],
    len: usize,
}

impl Block {
    /// All-zero block of `len` bytes.
    pub(crate) fn zeroed(len: usize) -> Self {
        debug_assert!(len <= MAX_BLOCK_SIZE);
        Self {
            bytes: [0; MAX_BLOCK_SIZE],
            len: len.min(MAX_BLOCK_SIZE),
        }
    }

    /// Copy `bytes` into a new block.
    ///
    /// Returns `None` if `bytes` is longer than [`MAX_BLOCK_SIZE`].
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        if bytes.len() > MAX_BLOCK_SIZE {
            return None;
        }

        let mut block = Self::zeroed(bytes.len());
        block.as_mut_slice().copy_from_slice(bytes);
        Some(block)
    }

    /// Length of this block in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Is this block zero-length?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow the contents of this block.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Mutably borrow the contents of this block.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes[..self.len]
    }

    /// Shorten the block to its first `len` bytes.
    pub(crate) fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.bytes[len..self.len].fill(0);
            self.len = len;
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::zeroed(0)
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl AsMut<[u8]> for Block {
    fn as_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl ConstantTimeEq for Block {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.as_slice().ct_eq(other.as_slice())
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Block {}

impl Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Block(")?;
        for byte in self.as_slice() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for Block {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

/// `dst ^= src` over the common prefix of the two slices.
#[cfg_attr(not(feature = "hazmat"), allow(unreachable_pub))]
#[inline]
pub fn xor_in_place(dst: &mut [u8], src: &[u8]) {
    for (a, b) in dst.iter_mut().zip(src) {
        *a ^= *b;
    }
}

/// Holds back at most one block of input.
///
/// A full block is only handed to the caller once more input arrives, since
/// both CMAC and PMAC treat the final block of a message differently from the
/// ones before it.
#[derive(Clone, Copy)]
pub(crate) struct BlockBuffer {
    block: Block,
    pos: usize,
}

impl BlockBuffer {
    pub(crate) fn new(block_size: usize) -> Self {
        Self {
            block: Block::zeroed(block_size),
            pos: 0,
        }
    }

    /// Absorb `data`, passing every full block known not to be the final one
    /// to `process`.
    pub(crate) fn feed(&mut self, mut data: &[u8], mut process: impl FnMut(&mut [u8])) {
        let block_size = self.block.len();

        while !data.is_empty() {
            if self.pos == block_size {
                process(self.block.as_mut_slice());
                self.pos = 0;
            }

            let n = (block_size - self.pos).min(data.len());
            self.block.as_mut_slice()[self.pos..self.pos + n].copy_from_slice(&data[..n]);
            self.pos += n;
            data = &data[n..];
        }
    }

    /// Bytes currently held back.
    pub(crate) fn pending(&self) -> &[u8] {
        &self.block.as_slice()[..self.pos]
    }

    /// Is the held-back data exactly one full block?
    pub(crate) fn is_full(&self) -> bool {
        self.pos == self.block.len()
    }

    pub(crate) fn block_size(&self) -> usize {
        self.block.len()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for BlockBuffer {
    fn zeroize(&mut self) {
        self.block.zeroize();
        self.pos.zeroize();
    }
}
