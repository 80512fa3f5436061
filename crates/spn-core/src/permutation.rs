//! Permutation matrix generation and the diffusion-layer multiply.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::block::{Block, BLOCK_LEN};

/// A BLOCK_LEN×BLOCK_LEN permutation matrix paired with its inverse.
///
/// Both matrices are 0/1 with exactly one 1 per row and per column. The
/// inverse is the transpose, which for permutation matrices equals the
/// actual matrix inverse, so applying one then the other is the identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permutation {
    matrix: [[u8; BLOCK_LEN]; BLOCK_LEN],
    inverse: [[u8; BLOCK_LEN]; BLOCK_LEN],
}

impl Permutation {
    /// Returns the identity permutation.
    pub fn identity() -> Self {
        let mut matrix = [[0u8; BLOCK_LEN]; BLOCK_LEN];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1;
        }
        Self {
            matrix,
            inverse: matrix,
        }
    }

    /// Generates a uniformly random permutation by rejection sampling.
    ///
    /// For each column a destination row is drawn until an unoccupied one
    /// comes up; the transpose entry is mirrored into the inverse as it goes.
    /// Fixed points are allowed.
    pub fn random<R: RngCore>(rng: &mut R) -> Self {
        let mut matrix = [[0u8; BLOCK_LEN]; BLOCK_LEN];
        let mut inverse = [[0u8; BLOCK_LEN]; BLOCK_LEN];
        let mut taken = [false; BLOCK_LEN];

        for col in 0..BLOCK_LEN {
            let mut row = rng.next_u32() as usize % BLOCK_LEN;
            while taken[row] {
                row = rng.next_u32() as usize % BLOCK_LEN;
            }
            taken[row] = true;
            matrix[row][col] = 1;
            inverse[col][row] = 1;
        }

        Self { matrix, inverse }
    }

    /// Builds the permutation sending input position `j` to output position
    /// `mapping[j]`.
    ///
    /// Returns `None` unless `mapping` is a bijection on `0..BLOCK_LEN`.
    pub fn from_mapping(mapping: &[usize; BLOCK_LEN]) -> Option<Self> {
        let mut matrix = [[0u8; BLOCK_LEN]; BLOCK_LEN];
        let mut inverse = [[0u8; BLOCK_LEN]; BLOCK_LEN];
        let mut taken = [false; BLOCK_LEN];

        for (col, &row) in mapping.iter().enumerate() {
            if row >= BLOCK_LEN || taken[row] {
                return None;
            }
            taken[row] = true;
            matrix[row][col] = 1;
            inverse[col][row] = 1;
        }

        Some(Self { matrix, inverse })
    }

    /// Applies the permutation to a block as a matrix-vector multiply.
    ///
    /// Entries are summed as integers and truncated mod 256, matching the
    /// classical textbook formulation rather than a plain index shuffle.
    #[inline]
    pub fn apply(&self, input: &Block) -> Block {
        multiply(&self.matrix, input)
    }

    /// Applies the inverse permutation, undoing [`Permutation::apply`].
    #[inline]
    pub fn apply_inverse(&self, input: &Block) -> Block {
        multiply(&self.inverse, input)
    }

    /// Exposes the forward matrix rows.
    pub fn matrix(&self) -> &[[u8; BLOCK_LEN]; BLOCK_LEN] {
        &self.matrix
    }

    /// Exposes the inverse matrix rows.
    pub fn inverse(&self) -> &[[u8; BLOCK_LEN]; BLOCK_LEN] {
        &self.inverse
    }
}

fn multiply(matrix: &[[u8; BLOCK_LEN]; BLOCK_LEN], input: &Block) -> Block {
    let mut out = [0u8; BLOCK_LEN];
    for (slot, row) in out.iter_mut().zip(matrix.iter()) {
        let mut sum = 0u32;
        for (&value, &entry) in input.iter().zip(row.iter()) {
            sum += u32::from(value) * u32::from(entry);
        }
        *slot = sum as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn assert_is_permutation(p: &Permutation) {
        for i in 0..BLOCK_LEN {
            let row_ones: u8 = p.matrix()[i].iter().sum();
            let col_ones: u8 = p.matrix().iter().map(|row| row[i]).sum();
            assert_eq!(row_ones, 1, "row {i} must hold exactly one 1");
            assert_eq!(col_ones, 1, "column {i} must hold exactly one 1");
        }
    }

    #[test]
    fn random_matrices_are_permutations() {
        let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
        for _ in 0..64 {
            assert_is_permutation(&Permutation::random(&mut rng));
        }
    }

    #[test]
    fn inverse_is_transpose() {
        let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
        for _ in 0..64 {
            let p = Permutation::random(&mut rng);
            for i in 0..BLOCK_LEN {
                for j in 0..BLOCK_LEN {
                    assert_eq!(p.inverse()[i][j], p.matrix()[j][i]);
                }
            }
        }
    }

    #[test]
    fn apply_inverse_recovers_input() {
        let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
        for _ in 0..64 {
            let p = Permutation::random(&mut rng);
            let mut block = [0u8; BLOCK_LEN];
            rng.fill_bytes(&mut block);
            assert_eq!(p.apply_inverse(&p.apply(&block)), block);
        }
    }

    #[test]
    fn identity_leaves_blocks_unchanged() {
        let p = Permutation::identity();
        let block = [0x10, 0x32, 0x54, 0x76, 0x98, 0xba, 0xdc, 0xfe];
        assert_eq!(p.apply(&block), block);
        assert_eq!(p.apply_inverse(&block), block);
    }

    #[test]
    fn mapping_shift_rotates_block() {
        let shift = Permutation::from_mapping(&[1, 2, 3, 4, 5, 6, 7, 0]).unwrap();
        assert_is_permutation(&shift);
        let block = [1, 2, 3, 4, 5, 6, 7, 8];
        assert_eq!(shift.apply(&block), [8, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(shift.apply_inverse(&[8, 1, 2, 3, 4, 5, 6, 7]), block);
    }

    #[test]
    fn mapping_rejects_non_bijections() {
        assert!(Permutation::from_mapping(&[0, 0, 1, 2, 3, 4, 5, 6]).is_none());
        assert!(Permutation::from_mapping(&[0, 1, 2, 3, 4, 5, 6, 8]).is_none());
    }
}
