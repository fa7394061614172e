//! Keyed byte-mixing function with a configurable block size.
//!
//! Not a cipher in any meaningful sense; it only gives the wide-block code
//! paths something deterministic to run against.

use blockmac::BlockCipher;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ToyCipher {
    pub(crate) block_size: usize,
    pub(crate) key: u8,
}

impl ToyCipher {
    pub(crate) fn new(block_size: usize) -> Self {
        Self {
            block_size,
            key: 0x5a,
        }
    }
}

impl BlockCipher for ToyCipher {
    fn block_size(&self) -> usize {
        self.block_size
    }

    fn encrypt(&self, dst: &mut [u8], src: &[u8]) {
        assert_eq!(src.len(), self.block_size);
        assert_eq!(dst.len(), self.block_size);

        let n = src.len();
        for i in 0..n {
            let x = src[(i + 1) % n] ^ self.key;
            dst[i] = x.rotate_left(3).wrapping_add(src[i]) ^ (i as u8);
        }
    }
}

/// Message of `len` bytes counting up from zero.
pub(crate) fn counting(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}
