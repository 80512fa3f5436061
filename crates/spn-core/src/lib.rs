//! Didactic substitution-permutation network (SPN) block cipher.
//!
//! This crate implements a deliberately weak SPN over 8-byte blocks and a
//! 16-byte master key: a cyclic-copy key schedule, a bit-complement
//! substitution layer, a random permutation matrix with its transpose as the
//! exact inverse, and an ECB driver for variable-length byte streams. It
//! exists to teach SPN structure and to motivate linear-cryptanalysis
//! exercises.
//!
//! It provides no security whatsoever and must never be used to protect
//! real data.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod ecb;
mod error;
mod instance;
mod key;
mod permutation;
mod round;
mod trace;

pub use crate::block::{xor_in_place, Block, BLOCK_LEN, KEY_LEN};
pub use crate::cipher::{SpnCipher, MIN_ROUNDS};
pub use crate::error::Error;
pub use crate::instance::SpnInstance;
pub use crate::key::{MasterKey, SubkeySet};
pub use crate::permutation::Permutation;
pub use crate::round::{key_mix, substitute};
pub use crate::trace::{HexTrace, NullTrace, RoundTrace, Stage};
