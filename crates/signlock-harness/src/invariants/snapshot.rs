//! Observable state snapshots for invariant checking.
//!
//! A snapshot captures what one host event did: the state on either side of
//! it, the verdict returned to the host, and every backend command issued
//! while handling it. Invariants operate on snapshots rather than live state
//! to ensure consistent, atomic checks.

use signlock_core::{HostEvent, LockState, UiVisibility, Verdict};

use crate::BackendCall;

/// Snapshot of one event-handling turn.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSnapshot {
    /// Event delivered.
    pub event: HostEvent,
    /// Verdict returned to the host.
    pub verdict: Verdict,
    /// Lock state before the event.
    pub lock_before: LockState,
    /// Lock state after the event.
    pub lock_after: LockState,
    /// UI visibility before the event.
    pub ui_before: UiVisibility,
    /// UI visibility after the event.
    pub ui_after: UiVisibility,
    /// Backend calls issued while handling the event, in order.
    pub calls: Vec<BackendCall>,
}

impl StepSnapshot {
    /// Number of calls of one kind issued in this step.
    pub fn count(&self, call: BackendCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    /// Whether the event was a start or resume, which re-assert lockdown.
    pub fn is_reassert(&self) -> bool {
        matches!(self.event, HostEvent::SessionStart | HostEvent::ForegroundResumed)
    }

    /// Whether the event opened a new session.
    pub fn is_session_start(&self) -> bool {
        self.event == HostEvent::SessionStart
    }
}
