//! Count command implementation.

use super::{read_file, SourceArgs};
use anyhow::Result as AnyhowResult;
use clap::Parser;

/// Count command arguments.
#[derive(Parser)]
pub struct CountCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// File with one message per line ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Only print the total
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,
}

pub async fn run(cmd: CountCommand) -> AnyhowResult<()> {
    let tokenizer = cmd.source.load().await?;
    let text = read_file(&cmd.input)?;

    let lines: Vec<&str> = text.lines().collect();
    let counts = tokenizer.count_batch(&lines);

    if !cmd.quiet {
        for (line, count) in lines.iter().zip(&counts) {
            println!("{}\t{}", count, line);
        }
    }
    println!("{}", counts.iter().sum::<usize>());

    Ok(())
}
