//! Deterministic simulation harness for Signlock lockdown testing.
//!
//! Provides a recording [`SimBackend`] with scripted or seeded lock-task
//! privilege, and a [`SimHost`] that plays the host lifecycle shell: it
//! forwards events to a [`signlock_core::Session`] and snapshots what each
//! event changed.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all event sequences, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the lockdown
//! invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod operation;
pub mod sim_backend;
pub mod sim_host;

pub use invariants::{
    BackAlwaysSuppressed, EscapeKeysSuppressed, FocusImmersion, ImmersiveAfterReassert,
    Invariant, InvariantKind, InvariantRegistry, InvariantResult, LeaveCountermeasure,
    LockMonotonicity, NoRedundantLockRequest, SingleQueryPerReassert, StepSnapshot, Violation,
};
pub use operation::HostOp;
pub use sim_backend::{BackendCall, Privilege, SimBackend};
pub use sim_host::SimHost;
