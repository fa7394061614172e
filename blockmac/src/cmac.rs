//! **CMAC**: CBC-MAC with subkey-masked final block (NIST SP 800-38B, RFC 4493).

use crate::{
    Block, BlockCipher, Error, Mac, Tag,
    block::{BlockBuffer, xor_in_place},
    gf::Field,
};
use core::fmt::{self, Debug};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// **CMAC** over any block cipher with an 8, 16, 32, 64 or 128-byte block.
#[derive(Clone)]
pub struct Cmac<C> {
    cipher: C,

    /// `dbl(E(0))`, masks a complete final block.
    k0: Block,

    /// `dbl(dbl(E(0)))`, masks a padded final block.
    k1: Block,

    tag_size: usize,
    state: State,
}

/// Running CBC-MAC state. Copied by [`Mac::sum`].
#[derive(Clone, Copy)]
struct State {
    digest: Block,
    buffer: BlockBuffer,
    finished: bool,
}

impl State {
    fn new(block_size: usize) -> Self {
        Self {
            digest: Block::zeroed(block_size),
            buffer: BlockBuffer::new(block_size),
            finished: false,
        }
    }

    fn update<C: BlockCipher>(&mut self, cipher: &C, data: &[u8]) {
        let digest = &mut self.digest;
        self.buffer.feed(data, |block| {
            xor_in_place(digest.as_mut_slice(), block);
            cipher.encrypt_in_place(digest.as_mut_slice());
        });
    }
}

impl<C: BlockCipher> Cmac<C> {
    /// Initialize CMAC with a full-block tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockSize`] if the cipher's block size is
    /// not supported.
    pub fn new(cipher: C) -> Result<Self, Error> {
        let tag_size = cipher.block_size();
        Self::with_tag_size(cipher, tag_size)
    }

    /// Initialize CMAC producing tags truncated to `tag_size` bytes.
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

        let mut k0 = Block::zeroed(block_size);
        cipher.encrypt_in_place(k0.as_mut_slice());
        field.double(k0.as_mut_slice());

        let mut k1 = k0;
        field.double(k1.as_mut_slice());

        Ok(Self {
            cipher,
            k0,
            k1,
            tag_size,
            state: State::new(block_size),
        })
    }

    /// Borrow the underlying block cipher.
    #[must_use]
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    fn finalize(&self, mut state: State) -> Tag {
        let digest = state.digest.as_mut_slice();
        let pending = state.buffer.pending();

        if state.buffer.is_full() {
            xor_in_place(digest, pending);
            xor_in_place(digest, self.k0.as_slice());
        } else {
            xor_in_place(digest, pending);
            digest[pending.len()] ^= 0x80;
            xor_in_place(digest, self.k1.as_slice());
        }

        self.cipher.encrypt_in_place(digest);
        state.digest.truncate(self.tag_size);
        state.digest
    }
}

impl<C: BlockCipher> Mac for Cmac<C> {
    fn block_size(&self) -> usize {
        self.state.buffer.block_size()
    }

    fn size(&self) -> usize {
        self.tag_size
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        if self.state.finished {
            return Err(Error::Finished);
        }

        self.state.update(&self.cipher, data);
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

impl<C> Debug for Cmac<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Cmac")
            .field("tag_size", &self.tag_size)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for State {
    fn zeroize(&mut self) {
        self.digest.zeroize();
        self.buffer.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl<C> Drop for Cmac<C> {
    fn drop(&mut self) {
        self.k0.zeroize();
        self.k1.zeroize();
        self.state.zeroize();
    }
}
