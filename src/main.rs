//! recall-trace - Upstream ingredient sourcing reports for product recalls
//!
//! Traces a product's lots and serials upstream and writes one CSV row per
//! ingredient with its source and the product's final location.

use anyhow::Result;
use clap::{Parser, Subcommand};

use recall_trace::cli::{
    ConfigSubcommand, SourcesArgs, display_version, handle_config_command,
    handle_sources_command, init_logging,
};

/// recall-trace - Upstream ingredient sourcing reports for product recalls
#[derive(Parser, Debug)]
#[command(name = "recall-trace")]
#[command(about = "Upstream ingredient sourcing reports for product recalls", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Build the ingredient sources report for a product
    Sources(SourcesArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_file) = init_logging(args.debug) {
        eprintln!("Debug logging enabled. Logs written to: {}", log_file.display());
    }

    match args.command {
        Command::Sources(sources) => handle_sources_command(sources).await,
        Command::Config { subcommand } => handle_config_command(subcommand),
        Command::Version => {
            display_version();
            Ok(())
        }
    }
}
