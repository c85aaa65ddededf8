//! The hooks configuration document.

use std::collections::HashMap;

use gatehouse_types::HookEventKind;
use serde::{Deserialize, Serialize};

/// Action kind within a matcher group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookActionKind {
    /// Run an external command. The only kind this engine executes.
    #[default]
    Command,
    /// Evaluate with an LLM prompt. Handled by the host, skipped here.
    Prompt,
    /// Run an agentic verifier. Handled by the host, skipped here.
    Agent,
}

/// A single hook action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookAction {
    /// Action kind. Defaults to `command`.
    #[serde(rename = "type", default)]
    pub kind: HookActionKind,
    /// Command line to execute (for command actions). May reference
    /// `${GATEHOUSE_HOOK_ROOT}`.
    #[serde(default)]
    pub command: Option<String>,
    /// Per-action deadline in seconds.
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// A matcher group: one tool-name pattern guarding a list of actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookMatcherGroup {
    /// Tool-name pattern. Omitted or empty means every tool.
    #[serde(default)]
    pub matcher: Option<String>,
    /// The actions to run when the pattern applies.
    pub hooks: Vec<HookAction>,
}

/// The root hooks document, grouped by event kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HooksConfig {
    #[serde(default)]
    pub hooks: HashMap<HookEventKind, Vec<HookMatcherGroup>>,
}

impl HooksConfig {
    /// Whether the document declares any hooks at all.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty() || self.hooks.values().all(Vec::is_empty)
    }
}
