//! FinGuard CLI - Main entry point

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use finguard_cli::{commands, AppContext};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finguard")]
#[command(about = "FinGuard - Transfer fraud risk scoring", long_about = None)]
struct Cli {
    /// Risk configuration file (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a proposed transfer
    Evaluate {
        /// Account snapshot file (JSON balance + history)
        #[arg(long)]
        account: PathBuf,
        /// Amount to send
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// Recipient address
        #[arg(long)]
        recipient: String,
        /// Optional memo (logged, not scored)
        #[arg(long)]
        memo: Option<String>,
        /// Evaluation instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Show wallet statistics for an account snapshot
    Stats {
        /// Account snapshot file
        #[arg(long)]
        account: PathBuf,
    },

    /// Print security tips
    Tips,

    /// Print the effective risk configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            account,
            amount,
            recipient,
            memo,
            now,
        } => {
            let ctx = AppContext::new(cli.config.as_deref())?;
            let now = now.unwrap_or_else(Utc::now);
            let output =
                commands::evaluate(&ctx, &account, &amount, &recipient, memo.as_deref(), now)?;
            println!("{output}");
        }

        Commands::Stats { account } => {
            println!("{}", commands::stats(&account)?);
        }

        Commands::Tips => {
            println!("{}", commands::tips());
        }

        Commands::Config => {
            let ctx = AppContext::new(cli.config.as_deref())?;
            println!("{}", commands::config(&ctx)?);
        }
    }

    Ok(())
}
