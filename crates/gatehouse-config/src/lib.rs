//! Configuration loading for the Gatehouse policy dispatcher.
//!
//! Hook registrations are declared in a JSON settings document:
//!
//! ```json
//! {
//!   "hooks": {
//!     "PreToolUse": [
//!       {
//!         "matcher": "mcp__grafana__*",
//!         "hooks": [
//!           {
//!             "type": "command",
//!             "command": "${GATEHOUSE_HOOK_ROOT}/check_grafana.sh",
//!             "timeout": 5
//!           }
//!         ]
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Several files can be layered in precedence order (user-level first,
//! project-level last); registrations accumulate in that order. A bad
//! registration (malformed matcher, missing command, zero timeout,
//! unsupported action type) is rejected with a diagnostic while the rest of
//! the file keeps working; only an unreadable or unparseable file is a hard
//! error.

pub mod error;
pub mod loader;
pub mod paths;
pub mod types;

pub use error::{ConfigError, Result};
pub use loader::{
    compile, load_file, load_layered, LoadOutcome, RegistrationDiagnostic,
};
pub use paths::{user_config_dir, user_hooks_path};
pub use types::{HookAction, HookActionKind, HookMatcherGroup, HooksConfig};
