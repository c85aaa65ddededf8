//! Permission decisions, per-validator results, and the aggregated verdict.

use serde::{Deserialize, Serialize};

/// The verdict a validator (or the aggregator) returns for a pending tool
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionDecision {
    /// The tool call may proceed.
    Allow,
    /// The host should prompt for confirmation before proceeding.
    Ask,
    /// The tool call is blocked.
    Deny,
}

impl PermissionDecision {
    /// Lowercase wire string (`"allow"`, `"ask"`, `"deny"`).
    pub fn as_str(self) -> &'static str {
        match self {
            PermissionDecision::Allow => "allow",
            PermissionDecision::Ask => "ask",
            PermissionDecision::Deny => "deny",
        }
    }
}

impl std::fmt::Display for PermissionDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An explicit decision produced by a validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorVerdict {
    pub decision: PermissionDecision,
    /// Why the validator decided this. Never empty.
    pub reason: String,
    /// Extra context surfaced to the invoking agent, not the end user.
    pub additional_context: Option<String>,
}

/// Why a validator failed to produce a decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The process did not exit before its deadline and was killed.
    Timeout,
    /// The process exited with a code outside the 0/2 contract. `None`
    /// means it was terminated by a signal.
    UnexpectedExit { code: Option<i32> },
    /// The process exited cleanly but stdout did not deserialize to a
    /// decision document.
    MalformedOutput { detail: String },
    /// The process could not be started, or its I/O failed.
    Unavailable { detail: String },
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Timeout => write!(f, "timed out"),
            FailureKind::UnexpectedExit { code: Some(code) } => {
                write!(f, "exited with unexpected code {code}")
            }
            FailureKind::UnexpectedExit { code: None } => {
                write!(f, "terminated by signal")
            }
            FailureKind::MalformedOutput { detail } => {
                write!(f, "produced malformed output ({detail})")
            }
            FailureKind::Unavailable { detail } => f.write_str(detail),
        }
    }
}

/// Outcome of running one validator: a decision or a failure, never both,
/// never neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatorResult {
    /// The validator produced a valid decision document.
    Verdict(ValidatorVerdict),
    /// The validator could not produce one.
    Failure(FailureKind),
}

impl ValidatorResult {
    /// A verdict with the given decision and reason, and no extra context.
    pub fn verdict(decision: PermissionDecision, reason: impl Into<String>) -> Self {
        ValidatorResult::Verdict(ValidatorVerdict {
            decision,
            reason: reason.into(),
            additional_context: None,
        })
    }

    /// A failed run.
    pub fn failure(kind: FailureKind) -> Self {
        ValidatorResult::Failure(kind)
    }

    /// Attach an additional context string. No-op on failures.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let ValidatorResult::Verdict(ref mut verdict) = self {
            verdict.additional_context = Some(context.into());
        }
        self
    }

    /// Whether this is an explicit Deny verdict.
    pub fn is_deny(&self) -> bool {
        matches!(
            self,
            ValidatorResult::Verdict(ValidatorVerdict {
                decision: PermissionDecision::Deny,
                ..
            })
        )
    }

    /// Whether the validator failed to produce a decision.
    pub fn is_failure(&self) -> bool {
        matches!(self, ValidatorResult::Failure(_))
    }

    /// The non-empty additional context, if any.
    pub fn additional_context(&self) -> Option<&str> {
        match self {
            ValidatorResult::Verdict(verdict) => verdict
                .additional_context
                .as_deref()
                .filter(|context| !context.is_empty()),
            ValidatorResult::Failure(_) => None,
        }
    }
}

/// The dispatcher's single aggregated output for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    /// Final verdict after the deny-dominant fold.
    pub decision: PermissionDecision,
    /// Which validator(s) drove the outcome, and why.
    pub reason: String,
    /// Every non-empty additional context from consulted validators, in
    /// registration order.
    pub contexts: Vec<String>,
}
