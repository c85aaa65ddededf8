//! Folding validator results into one policy decision.

use gatehouse_types::{
    PermissionDecision, PolicyDecision, ValidatorResult, ValidatorVerdict,
};

/// One consulted validator's labelled result.
#[derive(Debug, Clone)]
pub struct ValidatorReport {
    /// Registration label, used to cite the validator in reasons.
    pub label: String,
    pub result: ValidatorResult,
}

impl ValidatorReport {
    pub fn new(label: impl Into<String>, result: ValidatorResult) -> Self {
        Self {
            label: label.into(),
            result,
        }
    }
}

/// Fold the consulted validators' results into the final decision.
///
/// Deny-dominant and fail-closed: an explicit Deny wins; otherwise any
/// validator failure resolves to Deny (a broken validator must not silently
/// grant access); otherwise Ask wins over Allow; the empty set means no
/// policy applies and the call is allowed. Citations go to the first
/// qualifying validator in registration order. Contexts are collected from
/// every result in that same order whatever the outcome, so the host can
/// surface warnings even on Allow.
///
/// Total: every input, including the empty list, maps to a decision.
pub fn aggregate(reports: &[ValidatorReport]) -> PolicyDecision {
    let contexts: Vec<String> = reports
        .iter()
        .filter_map(|report| report.result.additional_context())
        .map(String::from)
        .collect();

    if reports.is_empty() {
        return PolicyDecision {
            decision: PermissionDecision::Allow,
            reason: "no applicable policy".to_string(),
            contexts,
        };
    }

    if let Some((report, verdict)) = first_verdict(reports, PermissionDecision::Deny) {
        return PolicyDecision {
            decision: PermissionDecision::Deny,
            reason: format!("denied by {}: {}", report.label, verdict.reason),
            contexts,
        };
    }

    let first_failure = reports.iter().find_map(|report| match &report.result {
        ValidatorResult::Failure(kind) => Some((report, kind)),
        ValidatorResult::Verdict(_) => None,
    });
    if let Some((report, failure)) = first_failure {
        return PolicyDecision {
            decision: PermissionDecision::Deny,
            reason: format!(
                "validator failure treated as deny ({}: {})",
                report.label, failure
            ),
            contexts,
        };
    }

    if let Some((report, verdict)) = first_verdict(reports, PermissionDecision::Ask) {
        return PolicyDecision {
            decision: PermissionDecision::Ask,
            reason: format!(
                "confirmation requested by {}: {}",
                report.label, verdict.reason
            ),
            contexts,
        };
    }

    let labels: Vec<&str> = reports.iter().map(|r| r.label.as_str()).collect();
    PolicyDecision {
        decision: PermissionDecision::Allow,
        reason: format!("allowed by {}", labels.join(", ")),
        contexts,
    }
}

fn first_verdict(
    reports: &[ValidatorReport],
    decision: PermissionDecision,
) -> Option<(&ValidatorReport, &ValidatorVerdict)> {
    reports.iter().find_map(|report| match &report.result {
        ValidatorResult::Verdict(verdict) if verdict.decision == decision => {
            Some((report, verdict))
        }
        _ => None,
    })
}
