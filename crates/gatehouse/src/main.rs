//! Gatehouse - admission control for agent tool calls.
//!
//! Main entry point for the gatehouse CLI.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{check, validate};

/// Gatehouse - admission control for agent tool calls
#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide one tool invocation: event JSON on stdin, decision JSON on stdout
    Check(check::CheckArgs),

    /// Load hook configuration and report what was accepted or rejected
    Validate(validate::ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // stdout carries decision documents; logs go to stderr
    let filter = if cli.verbose {
        "gatehouse=debug,gatehouse_dispatch=debug,gatehouse_config=debug,info"
    } else {
        "gatehouse=warn,gatehouse_dispatch=warn,gatehouse_config=warn,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check(args) => check::run(args).await,
        Commands::Validate(args) => validate::run(args).await,
    }
}
