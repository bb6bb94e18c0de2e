//! Chatbpe CLI - Command-line token counter.
//!
//! This is the main entry point for the `chatbpe` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BenchmarkCommand, CountCommand, TokenizeCommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chatbpe")]
#[command(about = "Count BPE tokens in chat text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the tokens of a text
    Tokenize(TokenizeCommand),
    /// Count tokens per line of a file
    Count(CountCommand),
    /// Benchmark tokenization performance
    Benchmark(BenchmarkCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Tokenize(cmd) => commands::tokenize::run(cmd).await?,
        Commands::Count(cmd) => commands::count::run(cmd).await?,
        Commands::Benchmark(cmd) => commands::benchmark::run(cmd).await?,
    }

    Ok(())
}
