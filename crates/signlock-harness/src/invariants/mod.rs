//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during a session. Unlike
//! example-based tests that check specific scenarios, invariants verify
//! behavioral properties across all possible event sequences.
//!
//! # Architecture
//!
//! [`crate::SimHost`] records a [`StepSnapshot`] for every delivered event,
//! then registered [`Invariant`] checks run against each step.
//!
//! # Usage
//!
//! ```ignore
//! let registry = InvariantRegistry::standard();
//! let step = host.deliver(HostEvent::ForegroundResumed);
//! registry.check_all(step)?;
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    BackAlwaysSuppressed, EscapeKeysSuppressed, FocusImmersion, ImmersiveAfterReassert,
    LeaveCountermeasure, LockMonotonicity, NoRedundantLockRequest, SingleQueryPerReassert,
};
pub use snapshot::StepSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Identifies which invariant was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvariantKind {
    /// UI is immersive after every start/resume.
    ImmersiveAfterReassert,
    /// Lock state never leaves `Locked`.
    LockMonotonicity,
    /// No lock request once locked.
    NoRedundantLockRequest,
    /// One query and at most one request per start/resume.
    SingleQueryPerReassert,
    /// Back is always suppressed.
    BackAlwaysSuppressed,
    /// Home and AppSwitch are always suppressed.
    EscapeKeysSuppressed,
    /// Focus gain immerses exactly once, focus loss never.
    FocusImmersion,
    /// Leave attempts force foreground exactly once and change no state.
    LeaveCountermeasure,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// The violated invariant.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against one recorded step.
///
/// Invariants are behavioral properties that must always hold.
/// They capture WHAT must be true, not specific test scenarios.
pub trait Invariant: Send + Sync {
    /// Which invariant this is, for error reporting.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against a step.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, step: &StepSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Collects multiple invariants and runs them all against a step.
/// Use [`InvariantRegistry::standard()`] for the lockdown invariants.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard lockdown invariants.
    ///
    /// [`SingleQueryPerReassert`] assumes the default
    /// [`signlock_core::LockRetryPolicy::OnResume`]; add it to a custom
    /// registry for other policies only if focus-triggered queries are
    /// accounted for.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(ImmersiveAfterReassert);
        registry.add(LockMonotonicity);
        registry.add(NoRedundantLockRequest);
        registry.add(SingleQueryPerReassert);
        registry.add(BackAlwaysSuppressed);
        registry.add(EscapeKeysSuppressed);
        registry.add(FocusImmersion);
        registry.add(LeaveCountermeasure);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given step.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, step: &StepSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(step).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check every step in order, stopping at the first step that violates
    /// anything. Returns the step index with its violations.
    pub fn check_steps(&self, steps: &[StepSnapshot]) -> Result<(), (usize, Vec<Violation>)> {
        for (index, step) in steps.iter().enumerate() {
            self.check_all(step).map_err(|violations| (index, violations))?;
        }
        Ok(())
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
