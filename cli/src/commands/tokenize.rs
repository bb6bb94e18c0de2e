//! Tokenize command implementation.

use super::{read_text, SourceArgs};
use anyhow::Result as AnyhowResult;
use clap::Parser;

/// Tokenize command arguments.
#[derive(Parser)]
pub struct TokenizeCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Text to tokenize ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,
}

pub async fn run(cmd: TokenizeCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.source.load().await?;
    let text = read_text(&cmd.input)?;

    let tokens = tokenizer.tokenize(&text);
    for token in &tokens {
        println!("{}", token);
    }
    println!("{} tokens", tokens.len());

    Ok(())
}
