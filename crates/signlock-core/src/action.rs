//! Lockdown side-effects.
//!
//! This module defines the [`LockAction`] enum, the commands produced by the
//! [`crate::Controller`] state machine for the backend to execute.

/// Commands produced by the Controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockAction {
    /// Ask the backend whether task-lock is currently active.
    ///
    /// Answered with [`crate::LockEvent::LockQueried`].
    QueryLockState,

    /// Ask the backend to pin the current task.
    ///
    /// Answered with [`crate::LockEvent::LockRequestCompleted`].
    RequestTaskLock,

    /// Hide system navigation and status chrome. Fire-and-forget.
    SetImmersiveUi,

    /// Bring the session back to the front. Fire-and-forget, best-effort.
    ForceForeground,

    /// Keep the display awake while the session window is shown.
    KeepScreenOn,
}

impl LockAction {
    /// Whether the Controller expects a feedback event for this action.
    pub fn expects_feedback(self) -> bool {
        matches!(self, Self::QueryLockState | Self::RequestTaskLock)
    }
}
