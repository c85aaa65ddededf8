//! The validator stdout wire format.
//!
//! A validator writes one JSON document to standard output:
//!
//! ```json
//! {
//!   "hookSpecificOutput": {
//!     "permissionDecision": "deny",
//!     "permissionDecisionReason": "missing API key",
//!     "additionalContext": "set GRAFANA_TOKEN and retry"
//!   }
//! }
//! ```
//!
//! `permissionDecision` and `permissionDecisionReason` are required;
//! `additionalContext` is optional and unknown fields are ignored. Output
//! that fails to parse into this shape is treated as malformed by the
//! invoker.

use serde::{Deserialize, Serialize};

use crate::PermissionDecision;

/// Top-level validator stdout document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorOutput {
    #[serde(rename = "hookSpecificOutput")]
    pub hook_specific_output: DecisionOutput,
}

/// The nested decision object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutput {
    pub permission_decision: PermissionDecision,
    pub permission_decision_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_context: Option<String>,
}
