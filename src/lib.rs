//! # Chainmark - A Proof-of-Work Hash Benchmark Chain
//!
//! This is my minimal educational blockchain for benchmarking cryptographic
//! hash functions by computation time. When I come back to this code, here's
//! what I need to remember:
//!
//! ## What I Built
//! - **Core chain**: append-only sealed blocks, a pending-transaction
//!   buffer, proof-of-work mining and full chain re-validation
//! - **Hash registry**: a closed enum over MD5, SHA-2, SHA-3 and BLAKE2
//!   variants, swappable by value so the benchmark can iterate them
//! - **Benchmark driver**: one fresh chain per algorithm, every `mine` call
//!   timed, results aggregated into per-algorithm statistics
//! - **Interactive demo**: the original experiment's stdin loop
//!
//! ## How I Organized My Code
//! - `core/`: blocks, the chain, the hash registry, proof-of-work
//! - `bench/`: the timing harness and random payload generation
//! - `cli/`: clap command definitions for the binary
//! - `error/`: error types and the crate-wide `Result` alias
//! - `utils/`: timestamp helper
//!
//! ## Key Design Decisions I Made
//! - Sealed and unsealed blocks are distinct types; sealing consumes the
//!   candidate, so validated blocks are structurally immutable
//! - The hash algorithm is fixed per chain and recorded on every sealed
//!   block; benchmarking another algorithm means a fresh chain
//! - Linkage and proof failures are booleans, not errors, so the benchmark
//!   loop keeps iterating; a failed mine keeps its pending transactions
//! - The genesis block is sealed with a single hash and is exempt from the
//!   difficulty target
//!
//! Remember: the mining loop is intentionally unbounded. Keep the
//! difficulty small (1-5) or a run will not finish.

pub mod bench;
pub mod cli;
pub mod core;
pub mod error;
pub mod utils;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use core::{Block, Blockchain, HashAlgorithm, ProofOfWork, SealedBlock, GENESIS_PREVIOUS_HASH};
pub use error::{BlockchainError, Result};
pub use utils::current_timestamp;
