// This is the main entry point for the hash-benchmark CLI.
// It is a thin driver: all the chain logic lives in the library.
use chainmark::bench::{self, AlgorithmReport, BenchConfig};
use chainmark::{Blockchain, BlockchainError, Command, HashAlgorithm, Opt};
use clap::Parser;
use log::{error, LevelFilter};
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Duration;

fn main() {
    // Info level shows mining progress without drowning the benchmark table
    env_logger::builder().filter_level(LevelFilter::Info).init();

    let opt = Opt::parse();

    if let Err(e) = run_command(opt.command) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        // The interactive demo from the original experiment: type payloads
        // to buffer them, "mine" to mine, "quit" to dump the chain
        Command::Demo {
            difficulty,
            algorithm,
        } => run_demo(difficulty, algorithm)?,
        Command::Benchmark {
            difficulty,
            blocks,
            transactions,
            payload_len,
            algorithms,
        } => {
            let algorithms = if algorithms.is_empty() {
                HashAlgorithm::ALL.to_vec()
            } else {
                algorithms
            };
            let config = BenchConfig {
                difficulty,
                blocks,
                transactions_per_block: transactions,
                payload_len,
                algorithms,
            };
            let reports = bench::run(&config)?;
            print_reports(&reports);
        }
        Command::ListAlgorithms => {
            for algorithm in HashAlgorithm::ALL {
                println!("{algorithm}");
            }
        }
    }
    Ok(())
}

fn run_demo(difficulty: usize, algorithm: HashAlgorithm) -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new(difficulty, algorithm)?;
    println!("chainmark demo ({algorithm}, difficulty {difficulty})");
    println!("Type a message to buffer it, 'mine' to mine, 'quit' to exit.");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF behaves like quit
        }

        match line.trim() {
            "quit" => break,
            "mine" => match chain.mine() {
                Ok(index) => println!("Mined block {index}: {}", chain.last_block().hash()),
                Err(BlockchainError::EmptyPendingQueue) => println!("Nothing to mine yet"),
                Err(e) => return Err(e.into()),
            },
            "" => {}
            payload => chain.add_new_transaction(payload),
        }
    }

    println!("{}", chain.get_chain()?);
    Ok(())
}

fn print_reports(reports: &[AlgorithmReport]) {
    println!(
        "{:<10} {:>7} {:>12} {:>11} {:>11} {:>11} {:>12}",
        "Algorithm", "Blocks", "Total (ms)", "Mean (ms)", "Min (ms)", "Max (ms)", "Nonces"
    );
    for report in reports {
        println!(
            "{:<10} {:>7} {:>12.3} {:>11.3} {:>11.3} {:>11.3} {:>12}",
            report.algorithm.name(),
            report.block_times.len(),
            millis(report.total()),
            millis(report.mean()),
            millis(report.min()),
            millis(report.max()),
            report.total_nonces,
        );
    }
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}
