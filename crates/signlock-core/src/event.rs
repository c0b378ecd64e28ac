//! Lockdown input events.
//!
//! Events originate from two distinct sources:
//! - The host lifecycle shell ([`HostEvent`]), one event at a time.
//! - Backend answers to commands the [`crate::Controller`] issued
//!   ([`LockEvent::LockQueried`], [`LockEvent::LockRequestCompleted`]).

use crate::{KeyCode, LockUnavailable};

/// Events processed by the Controller state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockEvent {
    /// Process/session created.
    SessionStart,

    /// Session (re)entered the foreground.
    ForegroundResumed,

    /// Session left the foreground.
    ForegroundPaused,

    /// Window focus gained (`true`) or lost (`false`).
    FocusChanged(bool),

    /// The OS revealed system chrome on its own.
    SystemUiRevealed,

    /// The session is about to be displaced by user action.
    UserLeaveAttempt,

    /// Answer to [`crate::LockAction::QueryLockState`].
    LockQueried {
        /// Whether task-lock is currently active.
        locked: bool,
    },

    /// Answer to [`crate::LockAction::RequestTaskLock`].
    LockRequestCompleted(Result<(), LockUnavailable>),
}

/// Everything the host collaborator can deliver to a [`crate::Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// Process/session created.
    SessionStart,

    /// Session (re)entered the foreground.
    ForegroundResumed,

    /// Session left the foreground.
    ForegroundPaused,

    /// Window focus gained or lost.
    FocusChanged(bool),

    /// The OS revealed system chrome.
    SystemUiRevealed,

    /// Raw key input.
    KeyPressed(KeyCode),

    /// Back/cancel navigation requested.
    BackPressed,

    /// The environment signals imminent displacement.
    UserLeaveAttempt,

    /// Embedded content asked to navigate to a URL.
    NavigationRequested(String),
}

impl HostEvent {
    /// The Controller event this host event maps to. `None` for input events,
    /// which are classified by the [`crate::EventGate`] instead.
    pub fn lifecycle(&self) -> Option<LockEvent> {
        let event = match self {
            Self::SessionStart => LockEvent::SessionStart,
            Self::ForegroundResumed => LockEvent::ForegroundResumed,
            Self::ForegroundPaused => LockEvent::ForegroundPaused,
            Self::FocusChanged(has_focus) => LockEvent::FocusChanged(*has_focus),
            Self::SystemUiRevealed => LockEvent::SystemUiRevealed,
            Self::UserLeaveAttempt => LockEvent::UserLeaveAttempt,
            Self::KeyPressed(_) | Self::BackPressed | Self::NavigationRequested(_) => return None,
        };
        Some(event)
    }
}
