use crate::core::HashAlgorithm;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// An unsealed candidate block.
///
/// The candidate is a pure value type: `compute_hash` never mutates it, and
/// the nonce only changes inside the chain's proof-of-work search. Sealing
/// consumes the candidate, so a sealed block can never be re-mined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    index: u64,
    transactions: Vec<String>,
    timestamp: i64,
    previous_hash: String,
    nonce: u64,
}

impl Block {
    pub fn new(
        index: u64,
        transactions: Vec<String>,
        timestamp: i64,
        previous_hash: String,
        nonce: u64,
    ) -> Block {
        Block {
            index,
            transactions,
            timestamp,
            previous_hash,
            nonce,
        }
    }

    /// Computes the digest of the canonical encoding of this block.
    ///
    /// The encoding is the serde_json form of the struct, which carries the
    /// fields in declaration order (index, transactions, timestamp,
    /// previous_hash, nonce) and structurally excludes the hash, so
    /// re-hashing is reproducible. Pure; callable repeatedly with different
    /// nonces during mining.
    pub fn compute_hash(&self, algorithm: HashAlgorithm) -> Result<String> {
        let encoded = serde_json::to_vec(self)?;
        Ok(algorithm.digest(encoded.as_slice()))
    }

    /// Seals the candidate with the hash found for it, consuming it.
    pub fn seal(self, algorithm: HashAlgorithm, hash: String) -> SealedBlock {
        SealedBlock {
            index: self.index,
            transactions: self.transactions,
            timestamp: self.timestamp,
            previous_hash: self.previous_hash,
            nonce: self.nonce,
            hash,
            algorithm,
        }
    }

    pub fn with_nonce(mut self, nonce: u64) -> Block {
        self.nonce = nonce;
        self
    }

    pub(crate) fn set_nonce(&mut self, nonce: u64) {
        self.nonce = nonce;
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn transactions(&self) -> &[String] {
        self.transactions.as_slice()
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

/// A sealed block: the candidate fields frozen together with the hash that
/// sealed them and the algorithm that produced it.
///
/// There are no mutating accessors; the only way back to a hashable form is
/// `recompute_hash`, which rebuilds the unsealed view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedBlock {
    index: u64,
    transactions: Vec<String>,
    timestamp: i64,
    previous_hash: String,
    nonce: u64,
    hash: String,
    algorithm: HashAlgorithm,
}

impl SealedBlock {
    /// Re-derives the hash from the sealed fields under the recorded
    /// algorithm. A tampered block recomputes to something other than its
    /// stored hash.
    pub fn recompute_hash(&self) -> Result<String> {
        let view = Block::new(
            self.index,
            self.transactions.clone(),
            self.timestamp,
            self.previous_hash.clone(),
            self.nonce,
        );
        view.compute_hash(self.algorithm)
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn transactions(&self) -> &[String] {
        self.transactions.as_slice()
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn previous_hash(&self) -> &str {
        self.previous_hash.as_str()
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn hash(&self) -> &str {
        self.hash.as_str()
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Block {
        Block::new(
            1,
            vec!["payment a".to_string(), "payment b".to_string()],
            1_700_000_000_000,
            "00abcdef".to_string(),
            0,
        )
    }

    #[test]
    fn test_compute_hash_is_pure_and_deterministic() {
        let block = candidate();
        let first = block.compute_hash(HashAlgorithm::Sha256).unwrap();
        let second = block.compute_hash(HashAlgorithm::Sha256).unwrap();
        assert_eq!(first, second);
        assert_eq!(block, candidate());
    }

    #[test]
    fn test_nonce_changes_hash() {
        let block = candidate();
        let base = block.compute_hash(HashAlgorithm::Sha256).unwrap();
        let bumped = block
            .with_nonce(1)
            .compute_hash(HashAlgorithm::Sha256)
            .unwrap();
        assert_ne!(base, bumped);
    }

    #[test]
    fn test_canonical_encoding_field_order() {
        let encoded = serde_json::to_string(&candidate()).unwrap();
        let index_pos = encoded.find("\"index\"").unwrap();
        let transactions_pos = encoded.find("\"transactions\"").unwrap();
        let timestamp_pos = encoded.find("\"timestamp\"").unwrap();
        let previous_pos = encoded.find("\"previous_hash\"").unwrap();
        let nonce_pos = encoded.find("\"nonce\"").unwrap();
        assert!(index_pos < transactions_pos);
        assert!(transactions_pos < timestamp_pos);
        assert!(timestamp_pos < previous_pos);
        assert!(previous_pos < nonce_pos);
        assert!(!encoded.contains("\"hash\""));
    }

    #[test]
    fn test_seal_preserves_fields_and_recomputes() {
        let block = candidate().with_nonce(42);
        let hash = block.compute_hash(HashAlgorithm::Blake2s).unwrap();
        let sealed = block.clone().seal(HashAlgorithm::Blake2s, hash.clone());

        assert_eq!(sealed.index(), block.index());
        assert_eq!(sealed.transactions(), block.transactions());
        assert_eq!(sealed.timestamp(), block.timestamp());
        assert_eq!(sealed.previous_hash(), block.previous_hash());
        assert_eq!(sealed.nonce(), 42);
        assert_eq!(sealed.hash(), hash);
        assert_eq!(sealed.algorithm(), HashAlgorithm::Blake2s);
        assert_eq!(sealed.recompute_hash().unwrap(), hash);
    }
}
