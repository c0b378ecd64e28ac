//! Observable lockdown state.
//!
//! These values are what the [`crate::Controller`] drives toward their desired
//! values. They are created at session start and discarded with the session;
//! nothing here survives a restart.

use std::fmt;

/// Task-lock status as last observed or attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LockState {
    /// No query or attempt has completed yet.
    #[default]
    Unknown,
    /// Backend confirmed task-lock is active. Sticky until session end.
    Locked,
    /// Last attempt failed. Re-attempted on the next qualifying event.
    Unavailable,
}

impl LockState {
    /// Whether task-lock is confirmed.
    pub fn is_locked(self) -> bool {
        self == Self::Locked
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unknown => "unknown",
            Self::Locked => "locked",
            Self::Unavailable => "unavailable",
        };
        f.write_str(s)
    }
}

/// System UI visibility.
///
/// The desired value is always [`UiVisibility::Immersive`]; the actual value
/// regresses whenever the OS reveals the system bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UiVisibility {
    /// System chrome visible.
    #[default]
    Normal,
    /// System chrome hidden.
    Immersive,
}

impl fmt::Display for UiVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Immersive => f.write_str("immersive"),
        }
    }
}
