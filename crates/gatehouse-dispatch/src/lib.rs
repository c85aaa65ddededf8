//! Core engine for the Gatehouse policy dispatcher.
//!
//! One [`Dispatcher::dispatch`] call resolves one pending tool invocation:
//! registrations matching the event are selected from the shared
//! [`Registry`](gatehouse_types::Registry), each matching validator runs
//! concurrently as its own bounded subprocess, and the results fold into a
//! single fail-closed [`PolicyDecision`](gatehouse_types::PolicyDecision)
//! for the host to enforce.
//!
//! Validators are external processes, not in-process plugins: the only
//! coupling is the JSON document on stdin, the decision document on stdout,
//! and the exit code.

pub mod aggregate;
pub mod dispatcher;
pub mod invoker;

pub use aggregate::{aggregate, ValidatorReport};
pub use dispatcher::{Dispatcher, DispatcherOptions, DEFAULT_VALIDATOR_TIMEOUT};
pub use invoker::invoke;
