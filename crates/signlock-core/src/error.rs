//! Error types for the lockdown core.
//!
//! Only one failure matters here: the backend could not pin the task. It is an
//! expected environment condition on devices without kiosk provisioning, so
//! the [`crate::Controller`] absorbs it into [`crate::LockState::Unavailable`]
//! instead of propagating it.

use thiserror::Error;

/// Task-lock could not be established.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockUnavailable {
    /// Backend reported that lock-task privilege is absent.
    #[error("lock task denied: device lacks lock-task privilege")]
    Denied,

    /// Backend call faulted.
    #[error("lock task request faulted: {0}")]
    Fault(String),
}

impl LockUnavailable {
    /// Returns true if the failure came from a backend fault rather than a
    /// plain privilege denial.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}
