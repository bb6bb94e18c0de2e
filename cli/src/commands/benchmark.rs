//! Benchmark command implementation.

use super::{read_file, SourceArgs};
use anyhow::{ensure, Result as AnyhowResult};
use clap::Parser;
use std::time::Instant;

/// Benchmark command arguments.
#[derive(Parser)]
pub struct BenchmarkCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Path to input text file for benchmarking
    #[arg(short, long)]
    pub input: String,

    /// Number of iterations to run
    #[arg(short = 'n', long, default_value_t = 100)]
    pub iterations: usize,
}

pub async fn run(cmd: BenchmarkCommand) -> AnyhowResult<()> {
    ensure!(cmd.iterations > 0, "iterations must be at least 1");

    let tokenizer = cmd.source.load().await?;
    let text = read_file(&cmd.input)?;

    println!("Benchmarking tokenization...");
    println!("  Text length: {} bytes", text.len());
    println!("  Vocabulary: {} entries", tokenizer.vocabulary().len());
    println!("  Merge rules: {}", tokenizer.merges().len());
    println!("  Iterations: {}", cmd.iterations);
    println!();

    // Warmup
    let tokens = tokenizer.count(&text);

    let start = Instant::now();
    for _ in 0..cmd.iterations {
        std::hint::black_box(tokenizer.tokenize(&text));
    }
    let elapsed = start.elapsed();

    let avg_time_ms = elapsed.as_secs_f64() * 1000.0 / cmd.iterations as f64;

    println!("Results:");
    println!("  Tokens per run: {}", tokens);
    println!("  Total time: {:.2}s", elapsed.as_secs_f64());
    println!("  Average time: {:.3}ms", avg_time_ms);
    if avg_time_ms > 0.0 {
        println!("  Throughput: {:.0} tokens/s", tokens as f64 / avg_time_ms * 1000.0);
    }

    Ok(())
}
