//! `gatehouse validate`: load hook configuration and report problems.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use gatehouse_config::{compile, load_file};
use gatehouse_types::Registry;

#[derive(Args)]
pub struct ValidateArgs {
    /// Hook config file(s) to validate
    #[arg(long = "config", value_name = "PATH", required = true)]
    pub config: Vec<PathBuf>,

    /// Installation root for hook commands
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub hook_root: PathBuf,
}

pub async fn run(args: ValidateArgs) -> Result<ExitCode> {
    let mut registry = Registry::new();
    let mut diagnostics = Vec::new();
    for path in &args.config {
        let config = load_file(path)?;
        compile(&config, &args.hook_root, &mut registry, &mut diagnostics);
    }

    println!("{} registration(s) accepted", registry.len());
    for diagnostic in &diagnostics {
        println!("rejected: {diagnostic}");
    }

    Ok(if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
