//! Execution of a single validator process.
//!
//! One invocation per (registration, event) pair: serialize the event onto
//! the child's stdin, close it, collect output until exit or deadline, and
//! interpret the exit-code contract. Every fault is absorbed into a
//! [`ValidatorResult`]; this function never surfaces a process-level error
//! to the dispatcher, so the aggregator can apply one uniform fail-closed
//! rule to broken or unavailable validators.

use std::process::Stdio;
use std::time::Duration;

use gatehouse_types::{
    expand_hook_root, FailureKind, HookRegistration, PermissionDecision,
    ToolInvocationEvent, ValidatorOutput, ValidatorResult, ValidatorVerdict,
    GATEHOUSE_HOOK_ROOT_VAR,
};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Run one validator for one event, bounded by `timeout`.
///
/// Exit-code contract: `0` means stdout carries a decision document; `2`
/// is a blocking failure and always resolves to Deny; any other exit is
/// unexpected. On deadline expiry the child is killed, not abandoned.
pub async fn invoke(
    registration: &HookRegistration,
    event: &ToolInvocationEvent,
    timeout: Duration,
) -> ValidatorResult {
    let input = match serde_json::to_string(event) {
        Ok(input) => input,
        Err(e) => {
            return ValidatorResult::failure(FailureKind::Unavailable {
                detail: format!("failed to serialize event: {e}"),
            });
        }
    };

    let command = expand_hook_root(&registration.command, &registration.hook_root);
    let spawned = tokio::process::Command::new("sh")
        .arg("-c")
        .arg(&command)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .current_dir(&registration.hook_root)
        .env(GATEHOUSE_HOOK_ROOT_VAR, &registration.hook_root)
        // the timeout path below relies on this to terminate the child
        .kill_on_drop(true)
        .spawn();

    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            return ValidatorResult::failure(FailureKind::Unavailable {
                detail: format!("failed to spawn: {e}"),
            });
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        // EOF after the event document so validators reading to end of
        // input are not left waiting
        let _ = stdin.write_all(input.as_bytes()).await;
        let _ = stdin.shutdown().await;
    }

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(e)) => {
            return ValidatorResult::failure(FailureKind::Unavailable {
                detail: format!("process error: {e}"),
            });
        }
        Err(_) => {
            debug!(
                validator = %registration.label,
                timeout_ms = timeout.as_millis() as u64,
                "validator timed out"
            );
            return ValidatorResult::failure(FailureKind::Timeout);
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        debug!(validator = %registration.label, stderr = %stderr.trim(), "validator stderr");
    }

    match output.status.code() {
        Some(0) => parse_decision(stdout.trim()),
        Some(2) => blocking_failure(stdout.trim(), stderr.trim()),
        code => ValidatorResult::failure(FailureKind::UnexpectedExit { code }),
    }
}

/// Exit 0: stdout must be a decision document with a non-empty reason.
fn parse_decision(stdout: &str) -> ValidatorResult {
    if stdout.is_empty() {
        return ValidatorResult::failure(FailureKind::MalformedOutput {
            detail: "empty output".to_string(),
        });
    }
    match serde_json::from_str::<ValidatorOutput>(stdout) {
        Ok(output) => {
            let decision = output.hook_specific_output;
            if decision.permission_decision_reason.trim().is_empty() {
                return ValidatorResult::failure(FailureKind::MalformedOutput {
                    detail: "empty permissionDecisionReason".to_string(),
                });
            }
            ValidatorResult::Verdict(ValidatorVerdict {
                decision: decision.permission_decision,
                reason: decision.permission_decision_reason,
                additional_context: decision.additional_context,
            })
        }
        Err(e) => ValidatorResult::failure(FailureKind::MalformedOutput {
            detail: e.to_string(),
        }),
    }
}

/// Exit 2: an authoritative Deny. A parseable body contributes its reason
/// and context; otherwise stderr explains the block.
fn blocking_failure(stdout: &str, stderr: &str) -> ValidatorResult {
    if let Ok(output) = serde_json::from_str::<ValidatorOutput>(stdout) {
        let decision = output.hook_specific_output;
        let reason = if decision.permission_decision_reason.trim().is_empty() {
            "validator signaled blocking failure".to_string()
        } else {
            decision.permission_decision_reason
        };
        return ValidatorResult::Verdict(ValidatorVerdict {
            decision: PermissionDecision::Deny,
            reason,
            additional_context: decision.additional_context,
        });
    }
    let reason = if stderr.is_empty() {
        "validator signaled blocking failure".to_string()
    } else {
        stderr.to_string()
    };
    ValidatorResult::verdict(PermissionDecision::Deny, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_types::{HookEventKind, MatcherPattern};
    use serde_json::json;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_registration(dir: &std::path::Path, command: &str) -> HookRegistration {
        HookRegistration {
            event: HookEventKind::PreToolUse,
            pattern: MatcherPattern::Universal,
            command: command.to_string(),
            timeout: None,
            hook_root: dir.to_path_buf(),
            label: command.to_string(),
        }
    }

    fn make_event() -> ToolInvocationEvent {
        ToolInvocationEvent::pre_tool_use("shell", json!({"command": "ls"}))
    }

    const ALLOW_DOC: &str = r#"{"hookSpecificOutput":{"permissionDecision":"allow","permissionDecisionReason":"ok"}}"#;

    #[tokio::test]
    async fn test_exit_zero_with_decision_document() {
        let tmp = TempDir::new().unwrap();
        let registration =
            make_registration(tmp.path(), &format!("echo '{ALLOW_DOC}'"));
        let result = invoke(&registration, &make_event(), Duration::from_secs(5)).await;
        assert_eq!(
            result,
            ValidatorResult::verdict(PermissionDecision::Allow, "ok")
        );
    }

    #[tokio::test]
    async fn test_exit_zero_without_output_is_malformed() {
        let tmp = TempDir::new().unwrap();
        let registration = make_registration(tmp.path(), "true");
        let result = invoke(&registration, &make_event(), Duration::from_secs(5)).await;
        assert_eq!(
            result,
            ValidatorResult::failure(FailureKind::MalformedOutput {
                detail: "empty output".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_unexpected_exit_code() {
        let tmp = TempDir::new().unwrap();
        let registration = make_registration(tmp.path(), "exit 7");
        let result = invoke(&registration, &make_event(), Duration::from_secs(5)).await;
        assert_eq!(
            result,
            ValidatorResult::failure(FailureKind::UnexpectedExit { code: Some(7) })
        );
    }

    #[tokio::test]
    async fn test_exit_two_without_body_uses_stderr() {
        let tmp = TempDir::new().unwrap();
        let registration =
            make_registration(tmp.path(), "echo 'missing API key' >&2; exit 2");
        let result = invoke(&registration, &make_event(), Duration::from_secs(5)).await;
        assert_eq!(
            result,
            ValidatorResult::verdict(PermissionDecision::Deny, "missing API key")
        );
    }

    #[tokio::test]
    async fn test_timeout_kills_the_validator() {
        let tmp = TempDir::new().unwrap();
        let registration = make_registration(tmp.path(), "sleep 30");
        let result =
            invoke(&registration, &make_event(), Duration::from_millis(100)).await;
        assert_eq!(result, ValidatorResult::failure(FailureKind::Timeout));
    }

    #[tokio::test]
    async fn test_missing_hook_root_is_unavailable() {
        let registration = make_registration(
            &PathBuf::from("/nonexistent/hook/root"),
            "true",
        );
        let result = invoke(&registration, &make_event(), Duration::from_secs(5)).await;
        assert!(result.is_failure());
        assert!(matches!(
            result,
            ValidatorResult::Failure(FailureKind::Unavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_validator_receives_event_on_stdin() {
        let tmp = TempDir::new().unwrap();
        // reflect the incoming tool name back as the decision reason
        let registration = make_registration(
            tmp.path(),
            r#"reason=$(cat); printf '{"hookSpecificOutput":{"permissionDecision":"allow","permissionDecisionReason":"%s"}}' "$(echo "$reason" | tr -d '"{}\\')""#,
        );
        let result = invoke(&registration, &make_event(), Duration::from_secs(5)).await;
        match result {
            ValidatorResult::Verdict(verdict) => {
                assert!(verdict.reason.contains("shell"));
            }
            other => panic!("expected verdict, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_decision_rejects_empty_reason() {
        let doc = r#"{"hookSpecificOutput":{"permissionDecision":"allow","permissionDecisionReason":"  "}}"#;
        assert!(matches!(
            parse_decision(doc),
            ValidatorResult::Failure(FailureKind::MalformedOutput { .. })
        ));
    }

    #[test]
    fn test_blocking_failure_forces_deny_on_parsed_body() {
        let doc = r#"{"hookSpecificOutput":{"permissionDecision":"allow","permissionDecisionReason":"looked fine"}}"#;
        let result = blocking_failure(doc, "");
        assert_eq!(
            result,
            ValidatorResult::verdict(PermissionDecision::Deny, "looked fine")
        );
    }

    #[test]
    fn test_blocking_failure_without_any_explanation() {
        let result = blocking_failure("", "");
        assert_eq!(
            result,
            ValidatorResult::verdict(
                PermissionDecision::Deny,
                "validator signaled blocking failure"
            )
        );
    }
}
