//! CLI integration tests for the gatehouse binary.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gatehouse() -> Command {
    Command::cargo_bin("gatehouse").unwrap()
}

fn create_hook_script(dir: &Path, name: &str, script: &str) {
    let path = dir.join(name);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_displays() {
    gatehouse()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("admission control"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn test_version_displays() {
    gatehouse()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gatehouse"));
}

// ─────────────────────────────────────────────────────────────────────────────
// validate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_validate_accepts_good_config() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("hooks.json");
    fs::write(
        &config,
        r#"{"hooks":{"PreToolUse":[{"matcher":"Bash","hooks":[{"command":"./check.sh"}]}]}}"#,
    )
    .unwrap();

    gatehouse()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 registration(s) accepted"));
}

#[test]
fn test_validate_reports_rejected_registrations() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("hooks.json");
    fs::write(
        &config,
        r#"{"hooks":{"PreToolUse":[
            {"matcher":"Bash*","hooks":[{"command":"./a.sh"}]},
            {"matcher":"Bash","hooks":[{"command":"./b.sh"}]}
        ]}}"#,
    )
    .unwrap();

    gatehouse()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 registration(s) accepted"))
        .stdout(predicate::str::contains("rejected:"))
        .stdout(predicate::str::contains("wildcard"));
}

#[test]
fn test_validate_requires_a_config() {
    gatehouse().arg("validate").assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// check
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_check_without_matching_policy_allows() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("hooks.json");
    fs::write(&config, "{}").unwrap();

    gatehouse()
        .arg("check")
        .arg("--config")
        .arg(&config)
        .write_stdin(r#"{"hook_event_name":"PreToolUse","tool_name":"Read"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"decision\":\"allow\""))
        .stdout(predicate::str::contains("no applicable policy"));
}

#[test]
fn test_check_denying_validator_exits_two() {
    let tmp = TempDir::new().unwrap();
    create_hook_script(
        tmp.path(),
        "deny.sh",
        "#!/bin/sh\ncat > /dev/null\necho 'not on my watch' >&2\nexit 2\n",
    );
    let config = tmp.path().join("hooks.json");
    fs::write(
        &config,
        r#"{"hooks":{"PreToolUse":[{"matcher":"Bash","hooks":[{"command":"${GATEHOUSE_HOOK_ROOT}/deny.sh"}]}]}}"#,
    )
    .unwrap();

    gatehouse()
        .arg("check")
        .arg("--config")
        .arg(&config)
        .arg("--hook-root")
        .arg(tmp.path())
        .write_stdin(
            r#"{"hook_event_name":"PreToolUse","tool_name":"Bash","tool_input":{"command":"rm -rf /"}}"#,
        )
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"decision\":\"deny\""))
        .stdout(predicate::str::contains("not on my watch"));
}

#[test]
fn test_check_surfaces_additional_context() {
    let tmp = TempDir::new().unwrap();
    create_hook_script(
        tmp.path(),
        "warn.sh",
        concat!(
            "#!/bin/sh\n",
            "printf '{\"hookSpecificOutput\":{\"permissionDecision\":\"allow\",",
            "\"permissionDecisionReason\":\"ok\",",
            "\"additionalContext\":\"rate-limit near threshold\"}}'\n",
        ),
    );
    let config = tmp.path().join("hooks.json");
    fs::write(
        &config,
        r#"{"hooks":{"PreToolUse":[{"matcher":"*","hooks":[{"command":"./warn.sh"}]}]}}"#,
    )
    .unwrap();

    gatehouse()
        .arg("check")
        .arg("--config")
        .arg(&config)
        .arg("--hook-root")
        .arg(tmp.path())
        .write_stdin(r#"{"hook_event_name":"PreToolUse","tool_name":"anything"}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("rate-limit near threshold"));
}

#[test]
fn test_check_rejects_malformed_event() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("hooks.json");
    fs::write(&config, "{}").unwrap();

    gatehouse()
        .arg("check")
        .arg("--config")
        .arg(&config)
        .write_stdin("not an event")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tool-invocation event"));
}
