//! `gatehouse check`: decide one pending tool invocation.
//!
//! Reads a tool-invocation event as JSON on stdin, consults the configured
//! validators, and writes the aggregated policy decision as JSON on stdout.
//! The exit code mirrors the verdict so shell callers can branch without
//! parsing: 0 allow, 2 deny, 3 ask.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use gatehouse_config::{load_layered, user_hooks_path};
use gatehouse_dispatch::{Dispatcher, DispatcherOptions, DEFAULT_VALIDATOR_TIMEOUT};
use gatehouse_types::{PermissionDecision, ToolInvocationEvent};
use tokio::io::AsyncReadExt;
use tracing::warn;

#[derive(Args)]
pub struct CheckArgs {
    /// Hook config file(s), lowest precedence first. Defaults to the
    /// user-level hooks file when present.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Vec<PathBuf>,

    /// Installation root for hook commands
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub hook_root: PathBuf,

    /// Default per-validator timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Stop at the first deny or validator failure
    #[arg(long)]
    pub fail_fast: bool,
}

pub async fn run(args: CheckArgs) -> Result<ExitCode> {
    let paths = resolve_config_paths(args.config);
    let outcome = load_layered(&paths, &args.hook_root)?;
    for diagnostic in &outcome.diagnostics {
        warn!(%diagnostic, "rejected hook registration");
    }

    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("failed to read event from stdin")?;
    let event: ToolInvocationEvent =
        serde_json::from_str(&input).context("stdin is not a tool-invocation event")?;

    let options = DispatcherOptions {
        default_timeout: args
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_VALIDATOR_TIMEOUT),
        fail_fast: args.fail_fast,
    };
    let dispatcher = Dispatcher::with_options(Arc::new(outcome.registry), options);
    let decision = dispatcher.dispatch(&event).await;

    println!("{}", serde_json::to_string(&decision)?);

    Ok(match decision.decision {
        PermissionDecision::Allow => ExitCode::SUCCESS,
        // deny reuses the validator blocking-exit convention
        PermissionDecision::Deny => ExitCode::from(2),
        PermissionDecision::Ask => ExitCode::from(3),
    })
}

fn resolve_config_paths(explicit: Vec<PathBuf>) -> Vec<PathBuf> {
    if !explicit.is_empty() {
        return explicit;
    }
    user_hooks_path()
        .filter(|path| path.exists())
        .into_iter()
        .collect()
}
