// This is the core chain implementation the benchmark drives.
// The chain is exclusively owned and single-writer: blocks live in a Vec,
// there is no storage engine and no fork resolution, and the whole thing
// exists for the duration of one benchmark run.

use crate::core::{Block, HashAlgorithm, ProofOfWork, SealedBlock};
use crate::error::{BlockchainError, Result};
use crate::utils::current_timestamp;
use log::{info, warn};

/// `previous_hash` of the genesis block, and of nothing else.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// An append-only chain of sealed blocks plus the pending-transaction
/// buffer, owning the proof-of-work and validation logic.
///
/// The hash algorithm is fixed at construction. Benchmarking another
/// algorithm means a fresh chain; every sealed block additionally records
/// the variant that sealed it, so exported chains stay self-describing.
pub struct Blockchain {
    blocks: Vec<SealedBlock>,
    pending: Vec<String>,
    difficulty: usize,
    algorithm: HashAlgorithm,
}

impl Blockchain {
    /// Creates a chain with a freshly sealed genesis block.
    ///
    /// `difficulty` is the number of leading `'0'` hex characters a mined
    /// block's hash must carry; it must be at least 1.
    pub fn new(difficulty: usize, algorithm: HashAlgorithm) -> Result<Blockchain> {
        if difficulty == 0 {
            return Err(BlockchainError::Config(
                "Difficulty must be at least 1".to_string(),
            ));
        }

        let mut blockchain = Blockchain {
            blocks: Vec::new(),
            pending: Vec::new(),
            difficulty,
            algorithm,
        };
        blockchain.create_genesis_block()?;
        Ok(blockchain)
    }

    // The genesis block is sealed with a single compute_hash and is exempt
    // from the difficulty target. Called exactly once, at construction.
    fn create_genesis_block(&mut self) -> Result<()> {
        let genesis = Block::new(
            0,
            Vec::new(),
            current_timestamp()?,
            GENESIS_PREVIOUS_HASH.to_string(),
            0,
        );
        let hash = genesis.compute_hash(self.algorithm)?;
        info!("Created genesis block with {}: {hash}", self.algorithm);
        self.blocks.push(genesis.seal(self.algorithm, hash));
        Ok(())
    }

    /// The tail of the chain. The chain always holds at least genesis.
    pub fn last_block(&self) -> &SealedBlock {
        self.blocks
            .last()
            .expect("chain always contains at least the genesis block")
    }

    /// Buffers a payload for the next mined block. Payload content is
    /// opaque; this never fails.
    pub fn add_new_transaction(&mut self, payload: impl Into<String>) {
        self.pending.push(payload.into());
    }

    /// Runs the proof-of-work search for a candidate, returning the
    /// qualifying nonce and hash. Chain state is not touched.
    pub fn proof_of_work(&self, block: &Block) -> Result<(u64, String)> {
        ProofOfWork::new(block.clone(), self.difficulty, self.algorithm).run()
    }

    /// True when `hash` meets the difficulty target AND equals the
    /// recomputed hash of `block`. Pure and idempotent.
    pub fn is_valid_proof(&self, block: &Block, hash: &str) -> bool {
        ProofOfWork::meets_difficulty(hash, self.difficulty)
            && block
                .compute_hash(self.algorithm)
                .map(|computed| computed == hash)
                .unwrap_or(false)
    }

    /// Seals `block` with `proof` and appends it.
    ///
    /// Returns false without mutating anything when the block does not link
    /// to the current tail or the proof fails validation.
    pub fn add_block(&mut self, block: Block, proof: &str) -> bool {
        if block.previous_hash() != self.last_block().hash() {
            warn!(
                "Rejected block {}: previous_hash does not match the chain tail",
                block.index()
            );
            return false;
        }
        if !self.is_valid_proof(&block, proof) {
            warn!("Rejected block {}: invalid proof {proof}", block.index());
            return false;
        }

        self.blocks.push(block.seal(self.algorithm, proof.to_string()));
        true
    }

    /// Mines the entire pending buffer into the next block.
    ///
    /// Fails with `EmptyPendingQueue` (no state change) when nothing is
    /// buffered. On success the buffer is cleared and the new block's index
    /// returned. If the mined block is somehow rejected, the pending
    /// transactions are RETAINED so the caller can mine them again.
    pub fn mine(&mut self) -> Result<u64> {
        if self.pending.is_empty() {
            return Err(BlockchainError::EmptyPendingQueue);
        }

        let last_block = self.last_block();
        let candidate = Block::new(
            last_block.index() + 1,
            self.pending.clone(),
            current_timestamp()?,
            last_block.hash().to_string(),
            0,
        );

        let (nonce, proof) = self.proof_of_work(&candidate)?;
        let worked = candidate.with_nonce(nonce);
        let index = worked.index();

        if !self.add_block(worked, &proof) {
            return Err(BlockchainError::Mining(format!(
                "Mined block {index} was rejected; pending transactions kept"
            )));
        }

        self.pending.clear();
        info!(
            "Mined block {index} with {} pending transaction(s) cleared",
            self.last_block().transactions().len()
        );
        Ok(index)
    }

    /// Exports every sealed block as one JSON array, fields in the order
    /// index, transactions, timestamp, previous_hash, nonce, hash,
    /// algorithm.
    pub fn get_chain(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.blocks)?)
    }

    /// Re-validates the whole chain: every block recomputes to its stored
    /// hash, every non-genesis block links to its predecessor and meets the
    /// difficulty target. Genesis is exempt from the target by design.
    pub fn validate_chain(&self) -> bool {
        for (i, block) in self.blocks.iter().enumerate() {
            match block.recompute_hash() {
                Ok(recomputed) if recomputed == block.hash() => {}
                _ => return false,
            }
            if i == 0 {
                if block.previous_hash() != GENESIS_PREVIOUS_HASH {
                    return false;
                }
                continue;
            }
            if block.previous_hash() != self.blocks[i - 1].hash() {
                return false;
            }
            if !ProofOfWork::meets_difficulty(block.hash(), self.difficulty) {
                return false;
            }
        }
        true
    }

    pub fn blocks(&self) -> &[SealedBlock] {
        self.blocks.as_slice()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Blockchain {
        Blockchain::new(1, HashAlgorithm::Sha256).unwrap()
    }

    #[test]
    fn test_zero_difficulty_is_rejected() {
        assert!(matches!(
            Blockchain::new(0, HashAlgorithm::Sha256),
            Err(BlockchainError::Config(_))
        ));
    }

    #[test]
    fn test_genesis_block() {
        let chain = chain();
        assert_eq!(chain.len(), 1);

        let genesis = chain.last_block();
        assert_eq!(genesis.index(), 0);
        assert!(genesis.transactions().is_empty());
        assert_eq!(genesis.previous_hash(), GENESIS_PREVIOUS_HASH);
        assert_eq!(genesis.recompute_hash().unwrap(), genesis.hash());
        // No difficulty target on genesis, but the chain still validates
        assert!(chain.validate_chain());
    }

    #[test]
    fn test_mine_single_transaction() {
        let mut chain = chain();
        let genesis_hash = chain.last_block().hash().to_string();
        chain.add_new_transaction("a");

        let index = chain.mine().unwrap();

        assert_eq!(index, 1);
        let block = chain.last_block();
        assert!(block.hash().starts_with('0'));
        assert_eq!(block.previous_hash(), genesis_hash);
        assert_eq!(block.transactions(), ["a".to_string()]);
        assert_eq!(chain.pending_count(), 0);
    }

    #[test]
    fn test_mine_without_pending_transactions() {
        let mut chain = chain();
        let result = chain.mine();

        assert!(matches!(result, Err(BlockchainError::EmptyPendingQueue)));
        assert_eq!(chain.len(), 1);
        assert_eq!(chain.pending_count(), 0);
    }

    #[test]
    fn test_mine_batches_entire_pending_buffer() {
        let mut chain = chain();
        chain.add_new_transaction("first");
        chain.add_new_transaction("second");
        chain.add_new_transaction("third");

        chain.mine().unwrap();

        assert_eq!(chain.last_block().transactions().len(), 3);
        assert_eq!(chain.pending_count(), 0);
    }

    #[test]
    fn test_chain_linkage_invariant() {
        let mut chain = chain();
        for i in 0..3 {
            chain.add_new_transaction(format!("tx {i}"));
            chain.mine().unwrap();
        }

        assert_eq!(chain.len(), 4);
        for i in 1..chain.len() {
            assert_eq!(
                chain.blocks()[i].previous_hash(),
                chain.blocks()[i - 1].hash()
            );
            assert_eq!(
                chain.blocks()[i].recompute_hash().unwrap(),
                chain.blocks()[i].hash()
            );
        }
        assert!(chain.validate_chain());
    }

    #[test]
    fn test_add_block_rejects_linkage_mismatch() {
        let mut chain = chain();
        let candidate = Block::new(
            1,
            vec!["orphan".to_string()],
            current_timestamp().unwrap(),
            "not-the-tail-hash".to_string(),
            0,
        );
        let (nonce, proof) = chain.proof_of_work(&candidate).unwrap();

        assert!(!chain.add_block(candidate.with_nonce(nonce), &proof));
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_add_block_rejects_invalid_proof() {
        let mut chain = chain();
        let candidate = Block::new(
            1,
            vec!["tx".to_string()],
            current_timestamp().unwrap(),
            chain.last_block().hash().to_string(),
            0,
        );

        // Right prefix, wrong recomputation
        assert!(!chain.add_block(candidate.clone(), "00000000"));
        // Right recomputation, wrong prefix (nonce 0 almost never qualifies,
        // so use the real hash with a difficulty the chain did not mine at)
        let honest_hash = candidate.compute_hash(chain.algorithm()).unwrap();
        if !honest_hash.starts_with('0') {
            assert!(!chain.add_block(candidate, &honest_hash));
        }
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_is_valid_proof_is_idempotent() {
        let mut chain = chain();
        let candidate = Block::new(
            1,
            vec!["tx".to_string()],
            current_timestamp().unwrap(),
            chain.last_block().hash().to_string(),
            0,
        );
        let (nonce, proof) = chain.proof_of_work(&candidate).unwrap();
        let worked = candidate.with_nonce(nonce);

        for _ in 0..3 {
            assert!(chain.is_valid_proof(&worked, &proof));
        }
        // Still addable afterwards: validation had no side effects
        assert!(chain.add_block(worked, &proof));
    }

    #[test]
    fn test_get_chain_round_trip() {
        let mut chain = chain();
        chain.add_new_transaction("exported");
        chain.mine().unwrap();

        let exported = chain.get_chain().unwrap();
        let parsed: Vec<SealedBlock> = serde_json::from_str(&exported).unwrap();

        assert_eq!(parsed.len(), chain.len());
        for (parsed_block, block) in parsed.iter().zip(chain.blocks()) {
            assert_eq!(parsed_block.hash(), block.hash());
            assert_eq!(parsed_block.recompute_hash().unwrap(), block.hash());
            assert_eq!(parsed_block.algorithm(), HashAlgorithm::Sha256);
        }
    }

    #[test]
    fn test_tampering_is_detected() {
        let mut chain = chain();
        chain.add_new_transaction("pay alice 10");
        chain.mine().unwrap();

        // Sealed blocks are structurally immutable, so tamper with the
        // exported form and re-parse it
        let mut parsed: Vec<serde_json::Value> =
            serde_json::from_str(&chain.get_chain().unwrap()).unwrap();
        parsed[1]["transactions"][0] = serde_json::Value::String("pay mallory 10".to_string());
        let tampered: SealedBlock = serde_json::from_value(parsed[1].clone()).unwrap();

        assert_ne!(tampered.recompute_hash().unwrap(), tampered.hash());
    }

    #[test]
    fn test_proof_meets_difficulty_across_algorithms() {
        for algorithm in HashAlgorithm::ALL {
            let mut chain = Blockchain::new(1, algorithm).unwrap();
            chain.add_new_transaction("x");
            chain.mine().unwrap();
            assert!(
                chain.last_block().hash().starts_with('0'),
                "{algorithm} proof misses target"
            );
            assert!(chain.validate_chain(), "{algorithm} chain fails validation");
        }
    }
}
