//! Loading and compiling hooks configuration into a registry.

use std::path::{Path, PathBuf};
use std::time::Duration;

use gatehouse_types::{HookEventKind, HookRegistration, MatcherPattern, Registry};
use tracing::warn;

use crate::error::{ConfigError, Result};
use crate::types::{HookActionKind, HooksConfig};

/// A registration that could not be loaded, and why.
///
/// Rejections are scoped to the one registration: every other registration
/// in the file stays in effect.
#[derive(Debug, Clone)]
pub struct RegistrationDiagnostic {
    pub event: HookEventKind,
    pub matcher: Option<String>,
    pub command: Option<String>,
    pub reason: String,
}

impl std::fmt::Display for RegistrationDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.event)?;
        if let Some(ref matcher) = self.matcher {
            write!(f, " [{matcher}]")?;
        }
        if let Some(ref command) = self.command {
            write!(f, " '{command}'")?;
        }
        write!(f, ": {}", self.reason)
    }
}

/// Result of loading one or more config files.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Registry holding every accepted registration.
    pub registry: Registry,
    /// One entry per rejected registration.
    pub diagnostics: Vec<RegistrationDiagnostic>,
}

/// Parse one hooks config file.
pub fn load_file(path: &Path) -> Result<HooksConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load config files in precedence order (user-level first, project-level
/// last) and compile them into one registry.
pub fn load_layered(paths: &[PathBuf], hook_root: &Path) -> Result<LoadOutcome> {
    let mut registry = Registry::new();
    let mut diagnostics = Vec::new();
    for path in paths {
        let config = load_file(path)?;
        compile(&config, hook_root, &mut registry, &mut diagnostics);
    }
    Ok(LoadOutcome {
        registry,
        diagnostics,
    })
}

/// Compile a parsed config document, appending accepted registrations to
/// `registry` and rejected ones to `diagnostics`.
pub fn compile(
    config: &HooksConfig,
    hook_root: &Path,
    registry: &mut Registry,
    diagnostics: &mut Vec<RegistrationDiagnostic>,
) {
    for (&event, groups) in &config.hooks {
        for group in groups {
            let pattern =
                match MatcherPattern::parse(group.matcher.as_deref().unwrap_or("")) {
                    Ok(pattern) => pattern,
                    Err(e) => {
                        warn!(
                            event = %event,
                            matcher = ?group.matcher,
                            error = %e,
                            "rejecting matcher group"
                        );
                        diagnostics.push(RegistrationDiagnostic {
                            event,
                            matcher: group.matcher.clone(),
                            command: None,
                            reason: e.to_string(),
                        });
                        continue;
                    }
                };

            for action in &group.hooks {
                let mut reject = |command: Option<String>, reason: String| {
                    warn!(
                        event = %event,
                        matcher = ?group.matcher,
                        reason = %reason,
                        "rejecting hook action"
                    );
                    diagnostics.push(RegistrationDiagnostic {
                        event,
                        matcher: group.matcher.clone(),
                        command,
                        reason,
                    });
                };

                if action.kind != HookActionKind::Command {
                    reject(
                        action.command.clone(),
                        format!("unsupported hook type {:?}", action.kind),
                    );
                    continue;
                }
                let command = match action.command.as_deref().map(str::trim) {
                    Some(command) if !command.is_empty() => command.to_string(),
                    _ => {
                        reject(None, "command hook missing 'command'".to_string());
                        continue;
                    }
                };
                if action.timeout == Some(0) {
                    reject(Some(command), "timeout must be positive".to_string());
                    continue;
                }

                registry.register(HookRegistration {
                    event,
                    pattern: pattern.clone(),
                    label: command.clone(),
                    command,
                    timeout: action.timeout.map(Duration::from_secs),
                    hook_root: hook_root.to_path_buf(),
                });
            }
        }
    }
}
