//! ECB mode driver: maps byte streams onto independent block operations.

use crate::block::{Block, BLOCK_LEN};
use crate::cipher::SpnCipher;
use crate::error::Error;
use crate::trace::{NullTrace, RoundTrace};

impl SpnCipher {
    /// Encrypts a byte stream in ECB mode.
    ///
    /// The stream is split into blocks, the final partial block zero-padded,
    /// and every block encrypted independently, so the output length is
    /// always the padded length. Identical plaintext blocks produce
    /// identical ciphertext blocks under one instance; that leak is the
    /// lesson, not a bug.
    pub fn encrypt(&self, plaintext: &[u8]) -> Vec<u8> {
        self.encrypt_traced(plaintext, &mut NullTrace)
    }

    /// ECB encryption reporting per-block and per-stage state to `trace`.
    pub fn encrypt_traced(&self, plaintext: &[u8], trace: &mut dyn RoundTrace) -> Vec<u8> {
        let padded_len = plaintext.len().div_ceil(BLOCK_LEN) * BLOCK_LEN;
        let mut ciphertext = Vec::with_capacity(padded_len);
        for (index, chunk) in plaintext.chunks(BLOCK_LEN).enumerate() {
            trace.block_start(index);
            let mut block: Block = [0u8; BLOCK_LEN];
            block[..chunk.len()].copy_from_slice(chunk);
            ciphertext.extend_from_slice(&self.encrypt_block_traced(&block, trace));
        }
        ciphertext
    }

    /// Decrypts a byte stream in ECB mode.
    ///
    /// Fails with [`Error::InvalidLength`] unless the input is a whole
    /// number of blocks. Zero padding added at encryption time is not
    /// stripped; callers receive the padded length back.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>, Error> {
        self.decrypt_traced(ciphertext, &mut NullTrace)
    }

    /// ECB decryption reporting per-block and per-stage state to `trace`.
    pub fn decrypt_traced(
        &self,
        ciphertext: &[u8],
        trace: &mut dyn RoundTrace,
    ) -> Result<Vec<u8>, Error> {
        if ciphertext.len() % BLOCK_LEN != 0 {
            return Err(Error::InvalidLength(ciphertext.len()));
        }
        let mut plaintext = Vec::with_capacity(ciphertext.len());
        for (index, chunk) in ciphertext.chunks_exact(BLOCK_LEN).enumerate() {
            trace.block_start(index);
            let mut block: Block = [0u8; BLOCK_LEN];
            block.copy_from_slice(chunk);
            plaintext.extend_from_slice(&self.decrypt_block_traced(&block, trace));
        }
        Ok(plaintext)
    }
}
