//! Serializable cipher-instance snapshot.
//!
//! The engine itself has no wire format; this snapshot exists so a CLI (or a
//! test harness) can generate an instance once and hand the same key and
//! permutation to a later process. Subkeys are not stored — they are a pure
//! function of the key and round count and are re-derived on load.

use serde::{Deserialize, Serialize};

use crate::cipher::SpnCipher;
use crate::key::MasterKey;
use crate::permutation::Permutation;

/// Snapshot of everything needed to rebuild a [`SpnCipher`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpnInstance {
    /// Effective round count (already clamped).
    pub rounds: usize,
    /// Master key the subkeys derive from.
    pub key: MasterKey,
    /// Permutation pair for the diffusion layer.
    pub permutation: Permutation,
}

impl SpnInstance {
    /// Serializes the snapshot with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Deserializes a snapshot produced by [`SpnInstance::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }

    /// Rebuilds the cipher this snapshot was taken from.
    pub fn into_cipher(self) -> SpnCipher {
        SpnCipher::from_parts(self.key, self.permutation, self.rounds)
    }
}

impl SpnCipher {
    /// Takes a serializable snapshot of this instance.
    pub fn instance(&self) -> SpnInstance {
        SpnInstance {
            rounds: self.rounds(),
            key: *self.key(),
            permutation: *self.permutation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn snapshot_round_trips_through_bytes() {
        let mut rng = ChaCha20Rng::from_seed([41u8; 32]);
        let cipher = SpnCipher::generate(6, &mut rng);

        let bytes = cipher.instance().to_bytes().unwrap();
        let restored = SpnInstance::from_bytes(&bytes).unwrap().into_cipher();

        assert_eq!(restored, cipher);
        let plaintext = b"snapshot equivalence";
        assert_eq!(restored.encrypt(plaintext), cipher.encrypt(plaintext));
    }

    #[test]
    fn truncated_bytes_fail_to_deserialize() {
        let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
        let bytes = SpnCipher::generate(4, &mut rng).instance().to_bytes().unwrap();
        assert!(SpnInstance::from_bytes(&bytes[..bytes.len() / 2]).is_err());
    }
}
