//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use signlock_core::{HostEvent, KeyCode, LockState, UiVisibility, Verdict};

use super::{Invariant, InvariantKind, InvariantResult, StepSnapshot, Violation};
use crate::BackendCall;

fn violation(kind: InvariantKind, step: &StepSnapshot, detail: String) -> InvariantResult {
    Err(Violation { invariant: kind, message: format!("after {:?}: {detail}", step.event) })
}

/// Every start/resume leaves the UI immersive.
///
/// Re-assertion must be self-healing regardless of lock outcome: a denied
/// lock never prevents immersion.
pub struct ImmersiveAfterReassert;

impl Invariant for ImmersiveAfterReassert {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ImmersiveAfterReassert
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        if !step.is_reassert() {
            return Ok(());
        }
        if step.ui_after != UiVisibility::Immersive {
            return violation(self.kind(), step, format!("ui is {}", step.ui_after));
        }
        if step.count(BackendCall::SetImmersiveUi) == 0 {
            return violation(self.kind(), step, "no SetImmersiveUi issued".to_string());
        }
        Ok(())
    }
}

/// Lock state never leaves `Locked` within a session. A session start is a
/// boundary and may reset it.
pub struct LockMonotonicity;

impl Invariant for LockMonotonicity {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LockMonotonicity
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        if step.is_session_start() {
            return Ok(());
        }
        if step.lock_before == LockState::Locked && step.lock_after != LockState::Locked {
            return violation(
                self.kind(),
                step,
                format!("lock regressed {} → {}", step.lock_before, step.lock_after),
            );
        }
        Ok(())
    }
}

/// Once locked, the core never asks for the lock again in the same session.
pub struct NoRedundantLockRequest;

impl Invariant for NoRedundantLockRequest {
    fn kind(&self) -> InvariantKind {
        InvariantKind::NoRedundantLockRequest
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        let requests = step.count(BackendCall::RequestTaskLock);
        if !step.is_session_start() && step.lock_before == LockState::Locked && requests > 0 {
            return violation(self.kind(), step, format!("{requests} lock requests while locked"));
        }
        Ok(())
    }
}

/// Start/resume issue exactly one query and at most one request; no other
/// event touches the lock.
pub struct SingleQueryPerReassert;

impl Invariant for SingleQueryPerReassert {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SingleQueryPerReassert
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        let queries = step.count(BackendCall::QueryLockState);
        let requests = step.count(BackendCall::RequestTaskLock);

        if step.is_reassert() {
            if queries != 1 || requests > 1 {
                return violation(
                    self.kind(),
                    step,
                    format!("{queries} queries and {requests} requests"),
                );
            }
        } else if queries + requests > 0 {
            return violation(
                self.kind(),
                step,
                format!("lock traffic outside start/resume: {queries} queries, {requests} requests"),
            );
        }
        Ok(())
    }
}

/// Back navigation is always suppressed.
pub struct BackAlwaysSuppressed;

impl Invariant for BackAlwaysSuppressed {
    fn kind(&self) -> InvariantKind {
        InvariantKind::BackAlwaysSuppressed
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        if step.event == HostEvent::BackPressed && step.verdict != Verdict::Suppress {
            return violation(self.kind(), step, format!("verdict {:?}", step.verdict));
        }
        Ok(())
    }
}

/// Home and AppSwitch are always suppressed, and classifying input never
/// issues backend commands.
pub struct EscapeKeysSuppressed;

impl Invariant for EscapeKeysSuppressed {
    fn kind(&self) -> InvariantKind {
        InvariantKind::EscapeKeysSuppressed
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        match &step.event {
            HostEvent::KeyPressed(code) => {
                let escape = *code == KeyCode::HOME || *code == KeyCode::APP_SWITCH;
                if escape && step.verdict != Verdict::Suppress {
                    return violation(self.kind(), step, format!("verdict {:?}", step.verdict));
                }
            },
            HostEvent::BackPressed | HostEvent::NavigationRequested(_) => {},
            _ => return Ok(()),
        }

        if !step.calls.is_empty() {
            return violation(self.kind(), step, format!("input issued calls {:?}", step.calls));
        }
        Ok(())
    }
}

/// Focus gain issues exactly one `SetImmersiveUi`; focus loss issues nothing.
pub struct FocusImmersion;

impl Invariant for FocusImmersion {
    fn kind(&self) -> InvariantKind {
        InvariantKind::FocusImmersion
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        match step.event {
            HostEvent::FocusChanged(true) => {
                let immersions = step.count(BackendCall::SetImmersiveUi);
                if immersions != 1 || step.ui_after != UiVisibility::Immersive {
                    return violation(
                        self.kind(),
                        step,
                        format!("{immersions} immersions, ui {}", step.ui_after),
                    );
                }
            },
            HostEvent::FocusChanged(false) if !step.calls.is_empty() => {
                return violation(self.kind(), step, format!("calls {:?}", step.calls));
            },
            _ => {},
        }
        Ok(())
    }
}

/// A leave attempt issues exactly one `ForceForeground` and nothing else.
pub struct LeaveCountermeasure;

impl Invariant for LeaveCountermeasure {
    fn kind(&self) -> InvariantKind {
        InvariantKind::LeaveCountermeasure
    }

    fn check(&self, step: &StepSnapshot) -> InvariantResult {
        if step.event != HostEvent::UserLeaveAttempt {
            return Ok(());
        }
        if step.calls != [BackendCall::ForceForeground] {
            return violation(self.kind(), step, format!("calls {:?}", step.calls));
        }
        if step.lock_before != step.lock_after || step.ui_before != step.ui_after {
            return violation(self.kind(), step, "state changed".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(event: HostEvent, calls: Vec<BackendCall>) -> StepSnapshot {
        StepSnapshot {
            event,
            verdict: Verdict::PassThrough,
            lock_before: LockState::Unknown,
            lock_after: LockState::Unknown,
            ui_before: UiVisibility::Normal,
            ui_after: UiVisibility::Normal,
            calls,
        }
    }

    #[test]
    fn regression_from_locked_detected() {
        let mut s = step(HostEvent::ForegroundResumed, vec![BackendCall::QueryLockState]);
        s.lock_before = LockState::Locked;
        s.lock_after = LockState::Unavailable;

        assert!(LockMonotonicity.check(&s).is_err());
    }

    #[test]
    fn session_start_is_a_lock_boundary() {
        let mut s = step(HostEvent::SessionStart, vec![
            BackendCall::KeepScreenOn,
            BackendCall::QueryLockState,
            BackendCall::RequestTaskLock,
            BackendCall::SetImmersiveUi,
        ]);
        s.lock_before = LockState::Locked;
        s.lock_after = LockState::Unavailable;

        assert!(LockMonotonicity.check(&s).is_ok());
        assert!(NoRedundantLockRequest.check(&s).is_ok());
    }

    #[test]
    fn redundant_request_detected() {
        let mut s = step(HostEvent::ForegroundResumed, vec![
            BackendCall::QueryLockState,
            BackendCall::RequestTaskLock,
        ]);
        s.lock_before = LockState::Locked;
        s.lock_after = LockState::Locked;

        assert!(NoRedundantLockRequest.check(&s).is_err());
    }

    #[test]
    fn missing_immersion_detected() {
        let s = step(HostEvent::SessionStart, vec![BackendCall::QueryLockState]);
        let err = ImmersiveAfterReassert.check(&s).err();

        assert_eq!(err.map(|v| v.invariant), Some(InvariantKind::ImmersiveAfterReassert));
    }

    #[test]
    fn home_pass_through_detected() {
        let s = step(HostEvent::KeyPressed(KeyCode::HOME), Vec::new());
        assert!(EscapeKeysSuppressed.check(&s).is_err());
    }

    #[test]
    fn back_pass_through_detected() {
        let s = step(HostEvent::BackPressed, Vec::new());
        assert!(BackAlwaysSuppressed.check(&s).is_err());
    }

    #[test]
    fn focus_loss_with_calls_detected() {
        let s = step(HostEvent::FocusChanged(false), vec![BackendCall::SetImmersiveUi]);
        assert!(FocusImmersion.check(&s).is_err());
    }

    #[test]
    fn leave_with_extra_calls_detected() {
        let s = step(HostEvent::UserLeaveAttempt, vec![
            BackendCall::ForceForeground,
            BackendCall::QueryLockState,
        ]);
        assert!(LeaveCountermeasure.check(&s).is_err());
    }
}
