//! Block representation helpers.

/// Cipher block of 8 bytes (64 bits).
pub type Block = [u8; BLOCK_LEN];

/// Block length in bytes.
pub const BLOCK_LEN: usize = 8;

/// Master key length in bytes.
pub const KEY_LEN: usize = 16;

/// XORs two blocks, writing the result into `dst`.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
