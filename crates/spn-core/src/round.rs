//! Round-layer transformations shared by encryption and decryption.

use crate::block::{xor_in_place, Block};

/// Applies the substitution layer in place.
///
/// Each byte is replaced by its bitwise complement. Self-inverse, so the
/// decryption path reuses it unchanged. A stand-in for a real S-box; an MDS
/// construction over GF(2^8) would be the upgrade path.
#[inline]
pub fn substitute(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = !*byte;
    }
}

/// Mixes a round subkey into the state by XOR.
#[inline]
pub fn key_mix(state: &mut Block, subkey: &Block) {
    xor_in_place(state, subkey);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn substitution_is_an_involution() {
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        for _ in 0..64 {
            let mut block = [0u8; 8];
            rng.fill_bytes(&mut block);
            let original = block;
            substitute(&mut block);
            substitute(&mut block);
            assert_eq!(block, original);
        }
    }

    #[test]
    fn substitution_complements_each_byte() {
        let mut block = [0x00, 0x01, 0x0f, 0x80, 0xaa, 0x55, 0xfe, 0xff];
        substitute(&mut block);
        assert_eq!(block, [0xff, 0xfe, 0xf0, 0x7f, 0x55, 0xaa, 0x01, 0x00]);
    }

    #[test]
    fn key_mix_is_self_inverse() {
        let mut block = [0x13, 0x37, 0x00, 0xff, 0x42, 0x24, 0x99, 0x66];
        let original = block;
        let subkey = [0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04];
        key_mix(&mut block, &subkey);
        assert_ne!(block, original);
        key_mix(&mut block, &subkey);
        assert_eq!(block, original);
    }
}
