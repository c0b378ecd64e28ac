//! Lockdown state machine.
//!
//! This module defines the [`Controller`], which reconciles the desired
//! lockdown (task pinned, system chrome hidden) against an environment that
//! can eject the session from lock mode, reveal the system bars, or steal
//! focus at any time.
//!
//! This is a pure state machine: it consumes [`crate::LockEvent`] inputs and
//! produces [`crate::LockAction`] commands. Backend answers come back in as
//! events, so the Controller never performs I/O itself.
//!
//! # State Machine
//!
//! ```text
//!              start/resume              start/resume
//! ┌─────────┐  ───────────> ┌─────────────┐ ─────┐
//! │ Unknown │               │ Unavailable │      │ denied
//! └─────────┘               └─────────────┘ <────┘
//!      │                          │
//!      │ granted                  │ granted
//!      ↓                          ↓
//! ┌─────────────────────────────────────┐
//! │ Locked (sticky until session end)   │
//! └─────────────────────────────────────┘
//! ```
//!
//! Immersion and lock are independent: an unavailable lock never prevents
//! `SetImmersiveUi` from being issued on its own triggers.

use crate::{LockAction, LockEvent, LockRetryPolicy, LockState, LockdownConfig, UiVisibility};

/// Counters for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockStats {
    /// Lock attempts started (one `QueryLockState` each).
    pub attempts: u64,
    /// `RequestTaskLock` commands issued.
    pub lock_requests: u64,
    /// Lock requests that came back unavailable.
    pub denials: u64,
    /// `ForceForeground` counter-measures issued.
    pub leave_countermeasures: u64,
}

/// Phase of the lock attempt currently awaiting a backend answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Querying,
    Requesting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Attempt {
    phase: Phase,
    /// Re-apply immersion once the attempt resolves.
    immerse_on_finish: bool,
}

/// Lockdown state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct Controller {
    /// Task-lock status.
    lock_state: LockState,
    /// Last driven system UI visibility.
    ui: UiVisibility,
    /// Session is in the foreground.
    foreground: bool,
    /// Session window holds focus.
    has_focus: bool,
    /// Lock attempt awaiting a backend answer. `None` if idle.
    attempt: Option<Attempt>,
    keep_screen_on: bool,
    retry: LockRetryPolicy,
    stats: LockStats,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&LockdownConfig::default())
    }
}

impl Controller {
    /// Create a Controller for a new session.
    pub fn new(config: &LockdownConfig) -> Self {
        Self {
            lock_state: LockState::Unknown,
            ui: UiVisibility::Normal,
            foreground: false,
            has_focus: false,
            attempt: None,
            keep_screen_on: config.keep_screen_on,
            retry: config.lock_retry,
            stats: LockStats::default(),
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: LockEvent) -> Vec<LockAction> {
        match event {
            LockEvent::SessionStart => {
                self.reset_session();
                let mut actions = Vec::new();
                if self.keep_screen_on {
                    actions.push(LockAction::KeepScreenOn);
                }
                actions.extend(self.begin_attempt(true));
                actions
            },
            LockEvent::ForegroundResumed => {
                self.foreground = true;
                self.begin_attempt(true)
            },
            LockEvent::ForegroundPaused => {
                self.foreground = false;
                vec![]
            },
            LockEvent::FocusChanged(true) => {
                self.has_focus = true;
                let mut actions = self.immerse();
                if self.retry == LockRetryPolicy::OnResumeAndFocus && !self.lock_state.is_locked() {
                    actions.extend(self.begin_attempt(false));
                }
                actions
            },
            LockEvent::FocusChanged(false) => {
                self.has_focus = false;
                vec![]
            },
            LockEvent::SystemUiRevealed => {
                self.ui = UiVisibility::Normal;
                if self.foreground && self.has_focus {
                    self.immerse()
                } else {
                    tracing::debug!("System UI revealed while in background, deferring");
                    vec![]
                }
            },
            LockEvent::UserLeaveAttempt => {
                self.stats.leave_countermeasures += 1;
                tracing::debug!("User leave attempt, forcing foreground");
                vec![LockAction::ForceForeground]
            },
            LockEvent::LockQueried { locked } => self.on_lock_queried(locked),
            LockEvent::LockRequestCompleted(result) => self.on_lock_request_completed(result),
        }
    }

    /// Forget everything learned in the previous session. Stats are kept for
    /// the lifetime of the Controller.
    fn reset_session(&mut self) {
        if self.lock_state != LockState::Unknown || self.attempt.is_some() {
            tracing::debug!("New session replaces previous one (lock was {})", self.lock_state);
        }
        self.lock_state = LockState::Unknown;
        self.ui = UiVisibility::Normal;
        self.foreground = false;
        self.has_focus = false;
        self.attempt = None;
    }

    /// Start a lock attempt by querying the backend. If one is already
    /// awaiting an answer, only the immersion part is applied.
    fn begin_attempt(&mut self, immerse_on_finish: bool) -> Vec<LockAction> {
        if let Some(attempt) = self.attempt.as_mut() {
            tracing::debug!("Lock attempt already in flight ({:?})", attempt.phase);
            attempt.immerse_on_finish |= immerse_on_finish;
            return if immerse_on_finish { self.immerse() } else { vec![] };
        }

        self.stats.attempts += 1;
        self.attempt = Some(Attempt { phase: Phase::Querying, immerse_on_finish });
        vec![LockAction::QueryLockState]
    }

    fn on_lock_queried(&mut self, locked: bool) -> Vec<LockAction> {
        let Some(attempt) = self.attempt else {
            tracing::warn!("Unexpected lock query answer with no attempt in flight");
            return vec![];
        };
        if attempt.phase != Phase::Querying {
            tracing::warn!("Unexpected lock query answer while requesting lock");
            return vec![];
        }

        if locked {
            if !self.lock_state.is_locked() {
                tracing::info!("Task lock already active");
            }
            self.lock_state = LockState::Locked;
            return self.finish_attempt(attempt);
        }

        if self.lock_state.is_locked() {
            // Locked is sticky; never re-request once confirmed.
            tracing::warn!("Backend reports task unlocked after lock was confirmed");
            return self.finish_attempt(attempt);
        }

        self.stats.lock_requests += 1;
        self.attempt = Some(Attempt { phase: Phase::Requesting, ..attempt });
        vec![LockAction::RequestTaskLock]
    }

    fn on_lock_request_completed(
        &mut self,
        result: Result<(), crate::LockUnavailable>,
    ) -> Vec<LockAction> {
        let Some(attempt) = self.attempt else {
            tracing::warn!("Unexpected lock request result with no attempt in flight");
            return vec![];
        };
        if attempt.phase != Phase::Requesting {
            tracing::warn!("Unexpected lock request result while querying lock state");
            return vec![];
        }

        match result {
            Ok(()) => {
                tracing::info!("Task lock established");
                self.lock_state = LockState::Locked;
            },
            Err(e) => {
                tracing::warn!("Task lock unavailable, continuing unlocked: {}", e);
                self.stats.denials += 1;
                self.lock_state = LockState::Unavailable;
            },
        }
        self.finish_attempt(attempt)
    }

    fn finish_attempt(&mut self, attempt: Attempt) -> Vec<LockAction> {
        self.attempt = None;
        if attempt.immerse_on_finish { self.immerse() } else { vec![] }
    }

    fn immerse(&mut self) -> Vec<LockAction> {
        self.ui = UiVisibility::Immersive;
        vec![LockAction::SetImmersiveUi]
    }

    /// Current task-lock status.
    pub fn lock_state(&self) -> LockState {
        self.lock_state
    }

    /// Last driven system UI visibility.
    pub fn ui_visibility(&self) -> UiVisibility {
        self.ui
    }

    /// Whether the session is in the foreground.
    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    /// Whether the session window holds focus.
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Whether a lock attempt is awaiting a backend answer.
    pub fn attempt_in_flight(&self) -> bool {
        self.attempt.is_some()
    }

    /// Diagnostic counters.
    pub fn stats(&self) -> LockStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LockUnavailable;

    fn started(locked: bool) -> Controller {
        let mut controller = Controller::default();
        let _ = controller.handle(LockEvent::SessionStart);
        let _ = controller.handle(LockEvent::LockQueried { locked });
        if !locked {
            let _ = controller.handle(LockEvent::LockRequestCompleted(Err(LockUnavailable::Denied)));
        }
        controller
    }

    #[test]
    fn session_start_keeps_screen_on_then_queries() {
        let mut controller = Controller::default();
        let actions = controller.handle(LockEvent::SessionStart);

        assert_eq!(actions, vec![LockAction::KeepScreenOn, LockAction::QueryLockState]);
        assert!(controller.attempt_in_flight());
        assert_eq!(controller.lock_state(), LockState::Unknown);
    }

    #[test]
    fn keep_screen_on_can_be_disabled() {
        let config = LockdownConfig { keep_screen_on: false, ..LockdownConfig::default() };
        let mut controller = Controller::new(&config);

        assert_eq!(controller.handle(LockEvent::SessionStart), vec![LockAction::QueryLockState]);
    }

    #[test]
    fn already_locked_skips_request() {
        let mut controller = Controller::default();
        let _ = controller.handle(LockEvent::SessionStart);
        let actions = controller.handle(LockEvent::LockQueried { locked: true });

        assert_eq!(actions, vec![LockAction::SetImmersiveUi]);
        assert_eq!(controller.lock_state(), LockState::Locked);
        assert_eq!(controller.ui_visibility(), UiVisibility::Immersive);
        assert_eq!(controller.stats().lock_requests, 0);
    }

    #[test]
    fn unlocked_query_requests_lock() {
        let mut controller = Controller::default();
        let _ = controller.handle(LockEvent::SessionStart);

        let actions = controller.handle(LockEvent::LockQueried { locked: false });
        assert_eq!(actions, vec![LockAction::RequestTaskLock]);

        let actions = controller.handle(LockEvent::LockRequestCompleted(Ok(())));
        assert_eq!(actions, vec![LockAction::SetImmersiveUi]);
        assert_eq!(controller.lock_state(), LockState::Locked);
        assert!(!controller.attempt_in_flight());
    }

    #[test]
    fn denial_degrades_to_unavailable_and_still_immerses() {
        let controller = started(false);

        assert_eq!(controller.lock_state(), LockState::Unavailable);
        assert_eq!(controller.ui_visibility(), UiVisibility::Immersive);
        assert_eq!(controller.stats().denials, 1);
    }

    #[test]
    fn fault_is_absorbed_like_denial() {
        let mut controller = Controller::default();
        let _ = controller.handle(LockEvent::ForegroundResumed);
        let _ = controller.handle(LockEvent::LockQueried { locked: false });
        let actions = controller.handle(LockEvent::LockRequestCompleted(Err(
            LockUnavailable::Fault("service gone".to_string()),
        )));

        assert_eq!(actions, vec![LockAction::SetImmersiveUi]);
        assert_eq!(controller.lock_state(), LockState::Unavailable);
    }

    #[test]
    fn resume_retries_after_denial() {
        let mut controller = started(false);

        assert_eq!(controller.handle(LockEvent::ForegroundResumed), vec![
            LockAction::QueryLockState
        ]);
        assert_eq!(controller.handle(LockEvent::LockQueried { locked: false }), vec![
            LockAction::RequestTaskLock
        ]);
        let _ = controller.handle(LockEvent::LockRequestCompleted(Ok(())));

        assert_eq!(controller.lock_state(), LockState::Locked);
        assert_eq!(controller.stats().attempts, 2);
    }

    #[test]
    fn locked_is_sticky_when_backend_disagrees() {
        let mut controller = started(true);
        let _ = controller.handle(LockEvent::ForegroundResumed);
        let actions = controller.handle(LockEvent::LockQueried { locked: false });

        assert_eq!(actions, vec![LockAction::SetImmersiveUi]);
        assert_eq!(controller.lock_state(), LockState::Locked);
        assert_eq!(controller.stats().lock_requests, 0);
    }

    #[test]
    fn focus_gain_immerses_once_and_loss_does_nothing() {
        let mut controller = started(false);

        assert_eq!(controller.handle(LockEvent::FocusChanged(true)), vec![
            LockAction::SetImmersiveUi
        ]);
        assert!(controller.handle(LockEvent::FocusChanged(false)).is_empty());
        assert_eq!(controller.ui_visibility(), UiVisibility::Immersive);
    }

    #[test]
    fn focus_gain_retries_lock_when_configured() {
        let config = LockdownConfig {
            lock_retry: LockRetryPolicy::OnResumeAndFocus,
            ..LockdownConfig::default()
        };
        let mut controller = Controller::new(&config);
        let _ = controller.handle(LockEvent::SessionStart);
        let _ = controller.handle(LockEvent::LockQueried { locked: false });
        let _ = controller.handle(LockEvent::LockRequestCompleted(Err(LockUnavailable::Denied)));

        let actions = controller.handle(LockEvent::FocusChanged(true));
        assert_eq!(actions, vec![LockAction::SetImmersiveUi, LockAction::QueryLockState]);

        // Focus-triggered attempts do not re-apply immersion on completion
        let actions = controller.handle(LockEvent::LockQueried { locked: true });
        assert!(actions.is_empty());
        assert_eq!(controller.lock_state(), LockState::Locked);
    }

    #[test]
    fn focus_gain_while_locked_skips_retry() {
        let config = LockdownConfig {
            lock_retry: LockRetryPolicy::OnResumeAndFocus,
            ..LockdownConfig::default()
        };
        let mut controller = Controller::new(&config);
        let _ = controller.handle(LockEvent::SessionStart);
        let _ = controller.handle(LockEvent::LockQueried { locked: true });

        assert_eq!(controller.handle(LockEvent::FocusChanged(true)), vec![
            LockAction::SetImmersiveUi
        ]);
        assert!(!controller.attempt_in_flight());
        assert_eq!(controller.stats().attempts, 1);
    }

    #[test]
    fn new_session_forgets_previous_lock() {
        let mut controller = started(true);
        let _ = controller.handle(LockEvent::ForegroundResumed);
        let _ = controller.handle(LockEvent::LockQueried { locked: true });

        let actions = controller.handle(LockEvent::SessionStart);
        assert_eq!(actions, vec![LockAction::KeepScreenOn, LockAction::QueryLockState]);
        assert_eq!(controller.lock_state(), LockState::Unknown);
        assert_eq!(controller.ui_visibility(), UiVisibility::Normal);
        assert!(!controller.is_foreground());

        // Task was ejected between sessions
        assert_eq!(controller.handle(LockEvent::LockQueried { locked: false }), vec![
            LockAction::RequestTaskLock
        ]);
        let _ = controller.handle(LockEvent::LockRequestCompleted(Ok(())));
        assert_eq!(controller.lock_state(), LockState::Locked);
        assert_eq!(controller.stats().attempts, 3);
    }

    #[test]
    fn revealed_ui_reimmerses_only_with_focus_in_foreground() {
        let mut controller = started(true);

        assert!(controller.handle(LockEvent::SystemUiRevealed).is_empty());
        assert_eq!(controller.ui_visibility(), UiVisibility::Normal);

        let _ = controller.handle(LockEvent::ForegroundResumed);
        let _ = controller.handle(LockEvent::LockQueried { locked: true });
        let _ = controller.handle(LockEvent::FocusChanged(true));

        assert_eq!(controller.handle(LockEvent::SystemUiRevealed), vec![
            LockAction::SetImmersiveUi
        ]);
        assert_eq!(controller.ui_visibility(), UiVisibility::Immersive);
    }

    #[test]
    fn leave_attempt_forces_foreground_regardless_of_lock() {
        let mut controller = Controller::default();
        assert_eq!(controller.handle(LockEvent::UserLeaveAttempt), vec![
            LockAction::ForceForeground
        ]);
        assert_eq!(controller.lock_state(), LockState::Unknown);
        assert_eq!(controller.stats().leave_countermeasures, 1);
    }

    #[test]
    fn resume_during_attempt_does_not_double_query() {
        let mut controller = Controller::default();
        let _ = controller.handle(LockEvent::SessionStart);

        assert_eq!(controller.handle(LockEvent::ForegroundResumed), vec![
            LockAction::SetImmersiveUi
        ]);
        assert_eq!(controller.stats().attempts, 1);
    }

    #[test]
    fn stray_feedback_is_ignored() {
        let mut controller = Controller::default();

        assert!(controller.handle(LockEvent::LockQueried { locked: true }).is_empty());
        assert!(controller.handle(LockEvent::LockRequestCompleted(Ok(()))).is_empty());
        assert_eq!(controller.lock_state(), LockState::Unknown);
    }
}
