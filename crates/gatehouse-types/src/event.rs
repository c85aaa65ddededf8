//! Tool-invocation events consumed by the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A lifecycle point at which validators are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum HookEventKind {
    /// Before a tool is executed. Validators can block execution.
    PreToolUse,
}

impl std::fmt::Display for HookEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookEventKind::PreToolUse => write!(f, "PreToolUse"),
        }
    }
}

/// One pending tool call, as described by the host.
///
/// Constructed once per pending call, consumed by exactly one dispatch, and
/// discarded after the verdict is returned. The serialized form is exactly
/// the document written to a validator's standard input: `hook_event_name`,
/// `tool_name`, `tool_input`, `session_id`, `transcript_path`, `cwd`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationEvent {
    /// Which lifecycle point this event describes.
    #[serde(rename = "hook_event_name")]
    pub event_kind: HookEventKind,
    /// Tool being invoked. Externally-sourced tools use the namespaced
    /// `provider__tool` form.
    pub tool_name: String,
    /// Tool parameters. Opaque to the dispatcher; passed through to
    /// validators unchanged.
    #[serde(default)]
    pub tool_input: Value,
    /// Host session identifier.
    #[serde(default)]
    pub session_id: String,
    /// Opaque reference to the host's transcript.
    #[serde(default)]
    pub transcript_path: String,
    /// Working directory of the pending tool call.
    #[serde(default)]
    pub cwd: String,
}

impl ToolInvocationEvent {
    /// Create a PreToolUse event for the given tool and input.
    pub fn pre_tool_use(tool_name: impl Into<String>, tool_input: Value) -> Self {
        Self {
            event_kind: HookEventKind::PreToolUse,
            tool_name: tool_name.into(),
            tool_input,
            session_id: String::new(),
            transcript_path: String::new(),
            cwd: String::new(),
        }
    }
}
