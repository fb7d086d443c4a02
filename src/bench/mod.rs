//! Benchmark driver
//!
//! Iterates hash algorithms, drives mining on a fresh chain per algorithm,
//! and aggregates wall-clock timing statistics. This is a thin shell around
//! the core: all the algorithmic content lives in `core`.

use crate::core::{Blockchain, HashAlgorithm};
use crate::error::{BlockchainError, Result};
use log::info;
use rand::{distributions::Alphanumeric, Rng};
use std::time::{Duration, Instant};

/// Parameters for one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub difficulty: usize,
    pub blocks: usize,
    pub transactions_per_block: usize,
    pub payload_len: usize,
    pub algorithms: Vec<HashAlgorithm>,
}

/// Timing results for a single algorithm.
#[derive(Debug, Clone)]
pub struct AlgorithmReport {
    pub algorithm: HashAlgorithm,
    pub block_times: Vec<Duration>,
    pub total_nonces: u64,
}

impl AlgorithmReport {
    pub fn total(&self) -> Duration {
        self.block_times.iter().sum()
    }

    pub fn mean(&self) -> Duration {
        if self.block_times.is_empty() {
            return Duration::ZERO;
        }
        self.total() / self.block_times.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.block_times.iter().min().copied().unwrap_or_default()
    }

    pub fn max(&self) -> Duration {
        self.block_times.iter().max().copied().unwrap_or_default()
    }
}

/// Generates one random alphanumeric transaction payload.
pub fn random_payload(rng: &mut impl Rng, len: usize) -> String {
    (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// Runs the benchmark: one fresh chain per algorithm, `blocks` mined blocks
/// each, every `mine` call timed individually. The chain is re-validated
/// after each run so a timing result is never reported for a broken chain.
pub fn run(config: &BenchConfig) -> Result<Vec<AlgorithmReport>> {
    let mut rng = rand::thread_rng();
    let mut reports = Vec::with_capacity(config.algorithms.len());

    for &algorithm in &config.algorithms {
        info!(
            "Benchmarking {algorithm}: {} block(s) at difficulty {}",
            config.blocks, config.difficulty
        );

        let mut chain = Blockchain::new(config.difficulty, algorithm)?;
        let mut block_times = Vec::with_capacity(config.blocks);
        let mut total_nonces = 0;

        for _ in 0..config.blocks {
            for _ in 0..config.transactions_per_block {
                chain.add_new_transaction(random_payload(&mut rng, config.payload_len));
            }

            let start = Instant::now();
            chain.mine()?;
            block_times.push(start.elapsed());
            total_nonces += chain.last_block().nonce();
        }

        if !chain.validate_chain() {
            return Err(BlockchainError::Mining(format!(
                "Chain failed validation after benchmarking {algorithm}"
            )));
        }

        reports.push(AlgorithmReport {
            algorithm,
            block_times,
            total_nonces,
        });
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_payload_shape() {
        let mut rng = rand::thread_rng();
        let payload = random_payload(&mut rng, 32);
        assert_eq!(payload.len(), 32);
        assert!(payload.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(random_payload(&mut rng, 0).is_empty());
    }

    #[test]
    fn test_run_produces_one_report_per_algorithm() {
        let config = BenchConfig {
            difficulty: 1,
            blocks: 2,
            transactions_per_block: 1,
            payload_len: 8,
            algorithms: vec![HashAlgorithm::Sha256, HashAlgorithm::Md5],
        };

        let reports = run(&config).unwrap();

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].algorithm, HashAlgorithm::Sha256);
        assert_eq!(reports[1].algorithm, HashAlgorithm::Md5);
        for report in &reports {
            assert_eq!(report.block_times.len(), 2);
            assert!(report.min() <= report.mean());
            assert!(report.mean() <= report.max());
            assert_eq!(report.total(), report.block_times.iter().sum::<Duration>());
        }
    }

    #[test]
    fn test_report_statistics_on_empty_run() {
        let report = AlgorithmReport {
            algorithm: HashAlgorithm::Sha512,
            block_times: Vec::new(),
            total_nonces: 0,
        };
        assert_eq!(report.mean(), Duration::ZERO);
        assert_eq!(report.min(), Duration::ZERO);
        assert_eq!(report.max(), Duration::ZERO);
    }
}
