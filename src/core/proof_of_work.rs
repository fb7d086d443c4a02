use crate::core::{Block, HashAlgorithm};
use crate::error::Result;
use log::info;

/// Proof-of-work search over the nonce space of a candidate block.
///
/// The search owns its copy of the candidate, so the chain and the caller's
/// candidate stay untouched while it runs. It is an unbounded linear search:
/// expected iterations grow as 16^difficulty, so callers keep the difficulty
/// small.
pub struct ProofOfWork {
    block: Block,
    difficulty: usize,
    algorithm: HashAlgorithm,
}

impl ProofOfWork {
    pub fn new(block: Block, difficulty: usize, algorithm: HashAlgorithm) -> ProofOfWork {
        ProofOfWork {
            block,
            difficulty,
            algorithm,
        }
    }

    /// Checks the difficulty target: the first `difficulty` characters of
    /// the hex hash must all be `'0'`.
    pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
        hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
    }

    /// Runs the search, returning the qualifying nonce and hash.
    ///
    /// The nonce is reset to 0 before the search and incremented by 1 per
    /// attempt, mirroring the sealing precondition.
    pub fn run(mut self) -> Result<(u64, String)> {
        info!(
            "Mining block {} with {} at difficulty {}",
            self.block.index(),
            self.algorithm,
            self.difficulty
        );

        self.block.set_nonce(0);
        let mut hash = self.block.compute_hash(self.algorithm)?;
        while !Self::meets_difficulty(&hash, self.difficulty) {
            self.block.set_nonce(self.block.nonce() + 1);
            hash = self.block.compute_hash(self.algorithm)?;
        }

        info!(
            "Proof-of-work for block {} found after {} attempts: {hash}",
            self.block.index(),
            self.block.nonce() + 1
        );
        Ok((self.block.nonce(), hash))
    }
}
