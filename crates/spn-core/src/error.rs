//! Engine error type.

use crate::block::BLOCK_LEN;

/// Errors surfaced by the cipher engine.
///
/// Decryption of arbitrary well-sized bytes always succeeds and produces
/// *some* plaintext; there is no integrity check in this construction.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Ciphertext length is not a whole number of blocks.
    #[error("ciphertext length {0} is not a multiple of the {BLOCK_LEN}-byte block length")]
    InvalidLength(usize),
}
