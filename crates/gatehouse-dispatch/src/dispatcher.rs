//! Per-event orchestration.

use std::sync::Arc;
use std::time::Duration;

use gatehouse_types::{
    FailureKind, HookRegistration, PolicyDecision, Registry, ToolInvocationEvent,
    ValidatorResult,
};
use tracing::{debug, info};

use crate::aggregate::{aggregate, ValidatorReport};
use crate::invoker::invoke;

/// Default per-validator deadline. Validators are expected to be fast; a
/// slow one gets its own `timeout` in the config.
pub const DEFAULT_VALIDATOR_TIMEOUT: Duration = Duration::from_secs(1);

/// Dispatch behavior knobs.
#[derive(Debug, Clone)]
pub struct DispatcherOptions {
    /// Deadline for registrations without their own `timeout`.
    pub default_timeout: Duration,
    /// Stop consulting further validators once a Deny or failure is
    /// observed (in registration order) and abort the outstanding ones.
    /// Trades complete diagnostics for latency; off by default, so every
    /// validator's additional context gets surfaced.
    pub fail_fast: bool,
}

impl Default for DispatcherOptions {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_VALIDATOR_TIMEOUT,
            fail_fast: false,
        }
    }
}

/// Orchestrates the per-event pipeline: select matching registrations, fan
/// out to validator subprocesses, aggregate the results.
///
/// The dispatcher keeps no state between events; any number of `dispatch`
/// calls may run concurrently against one shared registry.
#[derive(Debug)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    options: DispatcherOptions,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self::with_options(registry, DispatcherOptions::default())
    }

    pub fn with_options(registry: Arc<Registry>, options: DispatcherOptions) -> Self {
        Self { registry, options }
    }

    /// Resolve one event to a policy decision.
    ///
    /// Matching validators run concurrently, one subprocess each; with no
    /// matching registration the call is allowed without spawning
    /// anything. Results are joined in registration order, so context
    /// ordering in the decision is deterministic under any completion
    /// timing.
    pub async fn dispatch(&self, event: &ToolInvocationEvent) -> PolicyDecision {
        let matched: Vec<Arc<HookRegistration>> = self
            .registry
            .candidates(event.event_kind)
            .iter()
            .filter(|registration| registration.pattern.matches(&event.tool_name))
            .cloned()
            .collect();

        if matched.is_empty() {
            debug!(tool = %event.tool_name, "no applicable registration, allowing");
            return aggregate(&[]);
        }

        debug!(
            tool = %event.tool_name,
            validators = matched.len(),
            "consulting validators"
        );

        let shared_event = Arc::new(event.clone());
        let mut handles = Vec::with_capacity(matched.len());
        for registration in &matched {
            let registration = Arc::clone(registration);
            let event = Arc::clone(&shared_event);
            let timeout = registration
                .timeout
                .unwrap_or(self.options.default_timeout);
            handles.push(tokio::spawn(async move {
                invoke(&registration, &event, timeout).await
            }));
        }

        let mut reports = Vec::with_capacity(matched.len());
        let mut stopped = false;
        for (registration, handle) in matched.iter().zip(handles) {
            if stopped {
                // fail-fast: outstanding validators die with their tasks
                handle.abort();
                continue;
            }
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => ValidatorResult::failure(FailureKind::Unavailable {
                    detail: format!("validator task failed: {e}"),
                }),
            };
            let terminal = result.is_deny() || result.is_failure();
            reports.push(ValidatorReport::new(registration.label.clone(), result));
            if self.options.fail_fast && terminal {
                debug!(
                    validator = %registration.label,
                    "fail-fast: aborting outstanding validators"
                );
                stopped = true;
            }
        }

        let decision = aggregate(&reports);
        info!(
            tool = %event.tool_name,
            decision = %decision.decision,
            reason = %decision.reason,
            "policy decision"
        );
        decision
    }
}
