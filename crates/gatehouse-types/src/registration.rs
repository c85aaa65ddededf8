//! Hook registrations and the session registry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::{HookEventKind, MatcherPattern};

/// Environment variable pointing validators at their installation root.
///
/// Set for every validator subprocess; the same name is usable as a
/// `${GATEHOUSE_HOOK_ROOT}` placeholder inside configured command lines, so
/// hook packages keep working after being installed to a different path.
pub const GATEHOUSE_HOOK_ROOT_VAR: &str = "GATEHOUSE_HOOK_ROOT";

/// Expand `${GATEHOUSE_HOOK_ROOT}` in a command line to the hook root path.
pub fn expand_hook_root(command: &str, hook_root: &Path) -> String {
    command.replace(
        "${GATEHOUSE_HOOK_ROOT}",
        &hook_root.display().to_string(),
    )
}

/// One validator binding: which event and tools it applies to, and how to
/// run it.
#[derive(Debug, Clone)]
pub struct HookRegistration {
    /// Lifecycle event this validator is consulted for.
    pub event: HookEventKind,
    /// Tool-name pattern, classified at load time.
    pub pattern: MatcherPattern,
    /// Shell command line executed for each matching event.
    pub command: String,
    /// Per-registration deadline override.
    pub timeout: Option<Duration>,
    /// Installation root: working directory for the subprocess and the
    /// value substituted for `${GATEHOUSE_HOOK_ROOT}`.
    pub hook_root: PathBuf,
    /// Short name used in logs and synthesized decision reasons.
    pub label: String,
}

/// Read-only lookup table of hook registrations for a running session.
///
/// Loaded once from host-supplied configuration, then shared (behind an
/// `Arc`) across concurrent dispatches without synchronization. Within an
/// event kind, registrations keep their insertion order; that order fixes
/// the order of contexts in aggregated decisions.
#[derive(Debug, Default)]
pub struct Registry {
    hooks: HashMap<HookEventKind, Vec<Arc<HookRegistration>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a registration. Call order is preserved per event kind.
    pub fn register(&mut self, registration: HookRegistration) {
        self.hooks
            .entry(registration.event)
            .or_default()
            .push(Arc::new(registration));
    }

    /// All registrations for an event kind, in registration order.
    pub fn candidates(&self, event: HookEventKind) -> &[Arc<HookRegistration>] {
        self.hooks.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of registrations.
    pub fn len(&self) -> usize {
        self.hooks.values().map(Vec::len).sum()
    }

    /// Whether no registrations are loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of registrations for a specific event kind.
    pub fn count_for_event(&self, event: HookEventKind) -> usize {
        self.hooks.get(&event).map_or(0, Vec::len)
    }
}
