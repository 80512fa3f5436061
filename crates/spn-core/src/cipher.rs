//! Single-block encryption and decryption over the round structure.

use log::{debug, warn};
use rand::RngCore;

use crate::block::Block;
use crate::key::{MasterKey, SubkeySet};
use crate::permutation::Permutation;
use crate::round::{key_mix, substitute};
use crate::trace::{NullTrace, RoundTrace, Stage};

/// Fewer rounds than this are silently raised to the floor.
pub const MIN_ROUNDS: usize = 4;

/// A fixed instance of the toy SPN cipher.
///
/// All state (master key, derived subkeys, permutation pair) is written once
/// at construction and only read afterwards, so an instance can be shared
/// freely across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpnCipher {
    rounds: usize,
    key: MasterKey,
    subkeys: SubkeySet,
    permutation: Permutation,
}

impl SpnCipher {
    /// Creates a cipher with a random key and permutation from `thread_rng`.
    pub fn new(rounds: usize) -> Self {
        Self::generate(rounds, &mut rand::thread_rng())
    }

    /// Creates a cipher drawing key and permutation from the supplied
    /// generator. Tests and the CLI pass a seeded generator here for
    /// reproducible instances.
    pub fn generate<R: RngCore>(rounds: usize, rng: &mut R) -> Self {
        let key = MasterKey::random(rng);
        let permutation = Permutation::random(rng);
        Self::from_parts(key, permutation, rounds)
    }

    /// Assembles a cipher from explicit parts, deriving the subkeys.
    ///
    /// `rounds` below [`MIN_ROUNDS`] is clamped, not rejected; construction
    /// never fails.
    pub fn from_parts(key: MasterKey, permutation: Permutation, rounds: usize) -> Self {
        let rounds = if rounds < MIN_ROUNDS {
            warn!("round count {rounds} below minimum, clamping to {MIN_ROUNDS}");
            MIN_ROUNDS
        } else {
            rounds
        };
        let subkeys = SubkeySet::derive(&key, rounds);
        debug!("cipher instance ready: {rounds} rounds, {} subkeys", subkeys.len());
        Self {
            rounds,
            key,
            subkeys,
            permutation,
        }
    }

    /// Effective (post-clamp) round count.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The master key this instance was built from.
    pub fn key(&self) -> &MasterKey {
        &self.key
    }

    /// The permutation pair used by the diffusion layer.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Encrypts a single block.
    pub fn encrypt_block(&self, block: &Block) -> Block {
        self.encrypt_block_traced(block, &mut NullTrace)
    }

    /// Encrypts a single block, reporting every stage result to `trace`.
    ///
    /// Rounds `0..rounds-1` run the full XOR/substitute/permute sequence.
    /// The last round skips the permutation (it would add no strength after
    /// the final substitution), and the extra subkey is XORed on top as
    /// output whitening.
    pub fn encrypt_block_traced(&self, block: &Block, trace: &mut dyn RoundTrace) -> Block {
        let mut state = *block;

        for r in 0..self.rounds - 1 {
            key_mix(&mut state, self.subkeys.get(r));
            trace.stage(r, Stage::KeyMix, &state);
            substitute(&mut state);
            trace.stage(r, Stage::Substitute, &state);
            state = self.permutation.apply(&state);
            trace.stage(r, Stage::Permute, &state);
        }

        let last = self.rounds - 1;
        key_mix(&mut state, self.subkeys.get(last));
        trace.stage(last, Stage::KeyMix, &state);
        substitute(&mut state);
        trace.stage(last, Stage::Substitute, &state);

        key_mix(&mut state, self.subkeys.get(self.rounds));
        trace.stage(self.rounds, Stage::Whiten, &state);

        state
    }

    /// Decrypts a single block.
    pub fn decrypt_block(&self, block: &Block) -> Block {
        self.decrypt_block_traced(block, &mut NullTrace)
    }

    /// Decrypts a single block, reporting every stage result to `trace`.
    ///
    /// Runs the algebraic inverse of [`SpnCipher::encrypt_block`] in reverse
    /// order: de-whiten, undo the partial last round, then unwind the full
    /// rounds from `rounds-2` down to `0`.
    pub fn decrypt_block_traced(&self, block: &Block, trace: &mut dyn RoundTrace) -> Block {
        let mut state = *block;

        key_mix(&mut state, self.subkeys.get(self.rounds));
        trace.stage(self.rounds, Stage::Whiten, &state);

        let last = self.rounds - 1;
        substitute(&mut state);
        trace.stage(last, Stage::Substitute, &state);
        key_mix(&mut state, self.subkeys.get(last));
        trace.stage(last, Stage::KeyMix, &state);

        for r in (0..self.rounds - 1).rev() {
            state = self.permutation.apply_inverse(&state);
            trace.stage(r, Stage::Permute, &state);
            substitute(&mut state);
            trace.stage(r, Stage::Substitute, &state);
            key_mix(&mut state, self.subkeys.get(r));
            trace.stage(r, Stage::KeyMix, &state);
        }

        state
    }
}
