use crate::core::HashAlgorithm;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chainmark")]
pub struct Opt {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        name = "demo",
        about = "Interactively buffer transactions and mine them"
    )]
    Demo {
        #[arg(long, default_value_t = 2, help = "Leading zero hex characters required")]
        difficulty: usize,
        #[arg(long, default_value = "SHA-256", help = "Hash algorithm to seal blocks with")]
        algorithm: HashAlgorithm,
    },
    #[command(
        name = "benchmark",
        about = "Time proof-of-work mining across hash algorithms"
    )]
    Benchmark {
        #[arg(long, default_value_t = 2, help = "Leading zero hex characters required")]
        difficulty: usize,
        #[arg(long, default_value_t = 5, help = "Blocks to mine per algorithm")]
        blocks: usize,
        #[arg(long, default_value_t = 10, help = "Random transactions per block")]
        transactions: usize,
        #[arg(long, default_value_t = 32, help = "Length of each random payload")]
        payload_len: usize,
        #[arg(
            long = "algorithm",
            help = "Algorithm to benchmark (repeatable; default: all)"
        )]
        algorithms: Vec<HashAlgorithm>,
    },
    #[command(name = "listalgorithms", about = "Print the hash-algorithm registry")]
    ListAlgorithms,
}
