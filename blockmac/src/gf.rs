//! Arithmetic in GF(2^n) for the block sizes used by CMAC, PMAC, MGM and SIV.
//!
//! Blocks are interpreted as big-endian polynomials over GF(2): the most
//! significant bit of byte 0 is the coefficient of `x^(n-1)` and the least
//! significant bit of the last byte is the constant term.
//!
//! All operations run in time independent of the bits of their operands. The
//! conditional reduction step is applied through an all-zeroes/all-ones mask
//! rather than a branch.

use crate::Error;

/// Reduction constant of GF(2^64): `x^64 + x^4 + x^3 + x + 1`.
pub const R64: u32 = 0x1b;

/// Reduction constant of GF(2^128): `x^128 + x^7 + x^2 + x + 1`.
pub const R128: u32 = 0x87;

/// Reduction constant of GF(2^256): `x^256 + x^10 + x^5 + x^2 + 1`.
pub const R256: u32 = 0x425;

/// Reduction constant of GF(2^512): `x^512 + x^8 + x^5 + x^2 + 1`.
pub const R512: u32 = 0x125;

/// Reduction constant of GF(2^1024): `x^1024 + x^19 + x^6 + x + 1`.
pub const R1024: u32 = 0x80043;

/// Binary field whose elements are cipher blocks of a given size.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Field {
    block_size: usize,
    r: u32,
}

impl Field {
    /// GF(2^128), the field of 16-byte block ciphers.
    pub const GF128: Self = Self {
        block_size: 16,
        r: R128,
    };

    /// Field for a block cipher with `block_size`-byte blocks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBlockSize`] unless `block_size` is one of
    /// 8, 16, 32, 64 or 128.
    pub fn for_block_size(block_size: usize) -> Result<Self, Error> {
        let r = match block_size {
            8 => R64,
            16 => R128,
            32 => R256,
            64 => R512,
            128 => R1024,
            _ => return Err(Error::UnsupportedBlockSize(block_size)),
        };

        Ok(Self { block_size, r })
    }

    /// Size of a field element in bytes.
    #[must_use]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Low-order terms of the irreducible polynomial (the `x^n` term is implicit).
    #[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
    #[must_use]
    pub fn reduction_constant(&self) -> u32 {
        self.r
    }

    /// Multiply `block` by `x` in place.
    pub fn double(&self, block: &mut [u8]) {
        debug_assert_eq!(block.len(), self.block_size);
        let Some(&msb) = block.first() else {
            return;
        };

        let mask = 0u32.wrapping_sub(u32::from(msb >> 7));
        shift_left(block);
        xor_low_bytes(block, self.r & mask);
    }

    /// Multiply `block` by `x^-1` in place.
    pub fn double_inverse(&self, block: &mut [u8]) {
        debug_assert_eq!(block.len(), self.block_size);
        let Some(&lsb) = block.last() else {
            return;
        };

        let mask = 0u32.wrapping_sub(u32::from(lsb & 1));
        shift_right(block);
        block[0] ^= 0x80 & 0u8.wrapping_sub(lsb & 1);
        xor_low_bytes(block, (self.r >> 1) & mask);
    }
}

/// Carryless multiplication in GF(2^128) modulo `x^128 + x^7 + x^2 + x + 1`.
///
/// Operands are blocks read as big-endian integers. Bits of `y` are consumed
/// from the least significant end while `x` is repeatedly doubled.
#[cfg_attr(not(feature = "hazmat"), allow(dead_code))]
#[must_use]
pub fn mul128(x: u128, y: u128) -> u128 {
    let mut x = x;
    let mut y = y;
    let mut z = 0u128;

    for _ in 0..128 {
        z ^= x & 0u128.wrapping_sub(y & 1);
        let carry = x >> 127;
        x = (x << 1) ^ (u128::from(R128) & 0u128.wrapping_sub(carry));
        y >>= 1;
    }

    z
}

fn shift_left(block: &mut [u8]) {
    let mut carry = 0;
    for byte in block.iter_mut().rev() {
        let next = *byte >> 7;
        *byte = (*byte << 1) | carry;
        carry = next;
    }
}

fn shift_right(block: &mut [u8]) {
    let mut carry = 0;
    for byte in block.iter_mut() {
        let next = *byte << 7;
        *byte = (*byte >> 1) | carry;
        carry = next;
    }
}

fn xor_low_bytes(block: &mut [u8], value: u32) {
    for (byte, r) in block.iter_mut().rev().zip(value.to_le_bytes()) {
        *byte ^= r;
    }
}
