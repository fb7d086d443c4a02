//! Error handling for the blockchain
//!
//! This module provides the error types for all chain and benchmark
//! operations. Linkage and proof failures are deliberately NOT errors:
//! `add_block` and `is_valid_proof` report them as booleans so the
//! benchmark loop can keep iterating after a rejected block.

use std::fmt;

/// Result type alias for blockchain operations
pub type Result<T> = std::result::Result<T, BlockchainError>;

/// Error types for blockchain operations
#[derive(Debug, Clone)]
pub enum BlockchainError {
    /// Configuration errors (bad difficulty, unknown algorithm name)
    Config(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// System clock errors
    Time(String),
    /// `mine` was called with no buffered transactions
    EmptyPendingQueue,
    /// A mined block was rejected during sealing
    Mining(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for BlockchainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockchainError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BlockchainError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            BlockchainError::Time(msg) => write!(f, "Time error: {msg}"),
            BlockchainError::EmptyPendingQueue => write!(f, "No pending transactions to mine"),
            BlockchainError::Mining(msg) => write!(f, "Mining error: {msg}"),
            BlockchainError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for BlockchainError {}

impl From<std::io::Error> for BlockchainError {
    fn from(err: std::io::Error) -> Self {
        BlockchainError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BlockchainError {
    fn from(err: serde_json::Error) -> Self {
        BlockchainError::Serialization(err.to_string())
    }
}
