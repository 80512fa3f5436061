//! Key types and the subkey schedule.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::block::{Block, BLOCK_LEN, KEY_LEN};

/// 128-bit master key wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterKey(pub [u8; KEY_LEN]);

impl MasterKey {
    /// Draws a fresh random key from the supplied generator.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }
}

impl From<[u8; KEY_LEN]> for MasterKey {
    fn from(value: [u8; KEY_LEN]) -> Self {
        Self(value)
    }
}

/// Ordered subkeys derived from a master key.
///
/// Holds `rounds + 1` block-sized subkeys: one per round plus a final
/// whitening subkey at index `rounds`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubkeySet(Vec<Block>);

impl SubkeySet {
    /// Derives the subkey set for `rounds` rounds.
    ///
    /// Subkey `r` is a cyclic copy of the master key starting at byte
    /// `3r + 1`. Deliberately weak: the schedule exists to demonstrate
    /// linear cryptanalysis, not to resist it.
    pub fn derive(key: &MasterKey, rounds: usize) -> Self {
        let mut subkeys = Vec::with_capacity(rounds + 1);
        for r in 0..=rounds {
            let mut subkey = [0u8; BLOCK_LEN];
            for (j, byte) in subkey.iter_mut().enumerate() {
                *byte = key.0[(j + 3 * r + 1) % KEY_LEN];
            }
            subkeys.push(subkey);
        }
        Self(subkeys)
    }

    /// Returns the subkey for the requested round (0..=rounds).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.0[round]
    }

    /// Number of subkeys held (`rounds + 1`).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set holds no subkeys. Never the case for a derived set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const SEQ_KEY: [u8; 16] = [
        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
        0x0f,
    ];

    #[test]
    fn schedule_matches_cyclic_offset_formula() {
        let key = MasterKey::from(SEQ_KEY);
        let subkeys = SubkeySet::derive(&key, 4);
        assert_eq!(subkeys.len(), 5);
        assert_eq!(subkeys.get(0), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(subkeys.get(1), &[4, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(subkeys.get(2), &[7, 8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(subkeys.get(3), &[10, 11, 12, 13, 14, 15, 0, 1]);
        // whitening subkey wraps around the key tail
        assert_eq!(subkeys.get(4), &[13, 14, 15, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn schedule_is_deterministic() {
        let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
        for _ in 0..16 {
            let key = MasterKey::random(&mut rng);
            assert_eq!(SubkeySet::derive(&key, 6), SubkeySet::derive(&key, 6));
        }
    }

    #[test]
    fn schedule_yields_rounds_plus_one_subkeys() {
        let key = MasterKey::from(SEQ_KEY);
        for rounds in [4usize, 5, 8, 12] {
            assert_eq!(SubkeySet::derive(&key, rounds).len(), rounds + 1);
        }
    }
}
