//! **PMAC**: parallelizable MAC built from a doubling sequence of block masks.
//!
//! Follows Rogaway's PMAC1 with the `L(-1) = L · x^-1` final-block mask, as
//! used by PMAC-SIV.

use crate::{
    Block, BlockCipher, Error, Mac, Tag,
    block::{BlockBuffer, xor_in_place},
    gf::Field,
};
use alloc::vec::Vec;
use core::fmt::{self, Debug};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// **PMAC** over any block cipher with an 8, 16, 32, 64 or 128-byte block.
#[derive(Clone)]
pub struct Pmac<C> {
    key: Key<C>,
    tag_size: usize,
    state: State,
}

/// Cipher plus the masks derived from it at construction.
#[derive(Clone)]
struct Key<C> {
    cipher: C,
    field: Field,

    /// `L[i] = E(0) · x^i` for `i < 2 * block_size - 1`.
    l: Vec<Block>,

    /// `E(0) · x^-1`
    l_inv: Block,
}

impl<C: BlockCipher> Key<C> {
    fn new(cipher: C, field: Field) -> Self {
        let block_size = field.block_size();
        let table_len = 2 * block_size - 1;
        let mut l = Vec::with_capacity(table_len);

        let mut value = Block::zeroed(block_size);
        cipher.encrypt_in_place(value.as_mut_slice());
        let mut l_inv = value;
        field.double_inverse(l_inv.as_mut_slice());

        for _ in 0..table_len {
            l.push(value);
            field.double(value.as_mut_slice());
        }

        Self {
            cipher,
            field,
            l,
            l_inv,
        }
    }

    /// `L[index]`, doubling past the end of the table when needed.
    fn l(&self, index: usize) -> Block {
        if let Some(value) = self.l.get(index) {
            return *value;
        }

        let last = self.l.len() - 1;
        let mut value = self.l[last];
        for _ in last..index {
            self.field.double(value.as_mut_slice());
        }
        value
    }
}

/// Running PMAC state. Copied by [`Mac::sum`].
#[derive(Clone, Copy)]
struct State {
    digest: Block,
    offset: Block,
    buffer: BlockBuffer,

    /// Number of blocks absorbed so far, excluding the held-back one.
    counter: u64,
    finished: bool,
}

impl State {
    fn new(block_size: usize) -> Self {
        Self {
            digest: Block::zeroed(block_size),
            offset: Block::zeroed(block_size),
            buffer: BlockBuffer::new(block_size),
            counter: 0,
            finished: false,
        }
    }

    fn update<C: BlockCipher>(&mut self, key: &Key<C>, data: &[u8]) {
        let Self {
            digest,
            offset,
            buffer,
            counter,
            ..
        } = self;

        buffer.feed(data, |block| {
            *counter += 1;
            let l = key.l(counter.trailing_zeros() as usize);
            xor_in_place(offset.as_mut_slice(), l.as_slice());
            xor_in_place(block, offset.as_slice());
            key.cipher.encrypt_in_place(block);
            xor_in_place(digest.as_mut_slice(), block);
        });
    }
}

impl<C: BlockCipher> Pmac<C> {
    /// Initialize PMAC with a full-block tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockSize`] if the cipher's block size is
    /// not supported.
    pub fn new(cipher: C) -> Result<Self, Error> {
        let tag_size = cipher.block_size();
        Self::with_tag_size(cipher, tag_size)
    }

    /// Initialize PMAC producing tags truncated to `tag_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockSize`] if the cipher's block size is
    /// not supported, or [`Error::InvalidTagSize`] unless
    /// `1 <= tag_size <= block_size`.
    pub fn with_tag_size(cipher: C, tag_size: usize) -> Result<Self, Error> {
        let block_size = cipher.block_size();
        let field = Field::for_block_size(block_size)?;

        if tag_size == 0 || tag_size > block_size {
            return Err(Error::InvalidTagSize {
                tag_size,
                block_size,
            });
        }

        Ok(Self {
            key: Key::new(cipher, field),
            tag_size,
            state: State::new(block_size),
        })
    }

    /// Borrow the underlying block cipher.
    #[must_use]
    pub fn cipher(&self) -> &C {
        &self.key.cipher
    }

    fn finalize(&self, mut state: State) -> Tag {
        let digest = state.digest.as_mut_slice();
        let pending = state.buffer.pending();

        if state.buffer.is_full() {
            xor_in_place(digest, pending);
            xor_in_place(digest, self.key.l_inv.as_slice());
        } else {
            xor_in_place(digest, pending);
            digest[pending.len()] ^= 0x80;
        }

        self.key.cipher.encrypt_in_place(digest);
        state.digest.truncate(self.tag_size);
        state.digest
    }
}

impl<C: BlockCipher> Mac for Pmac<C> {
    fn block_size(&self) -> usize {
        self.key.field.block_size()
    }

    fn size(&self) -> usize {
        self.tag_size
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        if self.state.finished {
            return Err(Error::Finished);
        }

        self.state.update(&self.key, data);
        Ok(data.len())
    }

    fn sum(&self) -> Result<Tag, Error> {
        if self.state.finished {
            return Err(Error::Finished);
        }

        Ok(self.finalize(self.state))
    }

    fn finish(&mut self) -> Result<Tag, Error> {
        let tag = self.sum()?;
        self.reset();
        self.state.finished = true;
        Ok(tag)
    }

    fn reset(&mut self) {
        #[cfg(feature = "zeroize")]
        self.state.zeroize();

        self.state = State::new(self.block_size());
    }
}

impl<C> Debug for Pmac<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Pmac")
            .field("tag_size", &self.tag_size)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for State {
    fn zeroize(&mut self) {
        self.digest.zeroize();
        self.offset.zeroize();
        self.buffer.zeroize();
        self.counter.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl<C> Drop for Pmac<C> {
    fn drop(&mut self) {
        self.key.l.iter_mut().for_each(Zeroize::zeroize);
        self.key.l_inv.zeroize();
        self.state.zeroize();
    }
}
