//! Block cipher capability consumed by the MAC and AEAD engines.

use crate::Block;
use cipher::{BlockEncrypt, generic_array::GenericArray, typenum::Unsigned};

/// Forward direction of a keyed block cipher.
///
/// Implementations must be deterministic and free of side effects. Buffers
/// passed to [`BlockCipher::encrypt`] are always exactly
/// [`BlockCipher::block_size`] bytes long; implementations may panic on any
/// other length.
///
/// Every [`cipher::BlockEncrypt`] type implements this trait, so ciphers from
/// the RustCrypto `block-ciphers` project can be used directly.
pub trait BlockCipher {
    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Encrypt the block `src` into `dst`.
    fn encrypt(&self, dst: &mut [u8], src: &[u8]);

    /// Encrypt `block` in place.
    fn encrypt_in_place(&self, block: &mut [u8]) {
        let mut src = Block::zeroed(block.len());
        src.as_mut_slice().copy_from_slice(block);
        self.encrypt(block, src.as_slice());
    }
}

impl<C: BlockEncrypt> BlockCipher for C {
    fn block_size(&self) -> usize {
        C::BlockSize::USIZE
    }

    fn encrypt(&self, dst: &mut [u8], src: &[u8]) {
        self.encrypt_block_b2b(
            GenericArray::from_slice(src),
            GenericArray::from_mut_slice(dst),
        );
    }

    fn encrypt_in_place(&self, block: &mut [u8]) {
        self.encrypt_block(GenericArray::from_mut_slice(block));
    }
}
