//! Core blockchain functionality
//!
//! This module contains the block and chain data model, the hash-algorithm
//! registry, and the proof-of-work consensus logic the benchmark measures.

pub mod block;
pub mod blockchain;
pub mod hasher;
pub mod proof_of_work;

pub use block::{Block, SealedBlock};
pub use blockchain::{Blockchain, GENESIS_PREVIOUS_HASH};
pub use hasher::HashAlgorithm;
pub use proof_of_work::ProofOfWork;
