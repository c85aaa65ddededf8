//! Shared types for the Gatehouse policy dispatcher.
//!
//! Gatehouse consults external validator processes before a host agent
//! executes a tool call. This crate holds the vocabulary shared by the
//! config loader, the dispatch engine, and embedding hosts: invocation
//! events, hook registrations, per-validator results, aggregated policy
//! decisions, and the validator wire format.

pub mod decision;
pub mod event;
pub mod matcher;
pub mod registration;
pub mod wire;

pub use decision::{
    FailureKind, PermissionDecision, PolicyDecision, ValidatorResult, ValidatorVerdict,
};
pub use event::{HookEventKind, ToolInvocationEvent};
pub use matcher::{MatcherPattern, PatternError};
pub use registration::{
    expand_hook_root, HookRegistration, Registry, GATEHOUSE_HOOK_ROOT_VAR,
};
pub use wire::{DecisionOutput, ValidatorOutput};
