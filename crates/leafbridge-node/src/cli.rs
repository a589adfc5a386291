pub mod params;

use crate::Result;
use crate::commands::decode_leaves::DecodeLeaves;
use crate::commands::process_blocks::ProcessBlocks;
use crate::commands::tools::Tools;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Convert the blocks of a blk file into framed accumulator leaves.
    ProcessBlocks(ProcessBlocks),

    /// Print the leaves of a framed leaf file.
    DecodeLeaves(DecodeLeaves),

    /// Utility tools.
    #[command(subcommand)]
    Tools(Tools),
}

/// Leafbridge
#[derive(Debug, Parser)]
#[clap(version)]
#[clap(about = "Utreexo bridge leaf management")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

fn init_logger() {
    // `RUST_LOG` takes precedence over the default level.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse and run command line arguments
pub fn run() -> Result<()> {
    let Cli { command } = Cli::parse();

    init_logger();

    match command {
        Command::ProcessBlocks(cmd) => cmd.run(),
        Command::DecodeLeaves(cmd) => cmd.run(),
        Command::Tools(tools) => tools.run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process_blocks() {
        let cli = Cli::try_parse_from([
            "leafbridge",
            "process-blocks",
            "--chain",
            "regtest",
            "--blocks",
            "blk00000.dat",
            "--leaves-out",
            "leaves.dat",
            "--start-height",
            "1",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::ProcessBlocks(_)));
    }
}
