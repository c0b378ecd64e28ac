//! Property-based tests for the Controller state machine in isolation.
//!
//! Backend answers are drawn by proptest instead of a simulated device, so
//! the Controller sees answers no real backend would give (e.g. a query that
//! says "unlocked" right after a granted request).

use proptest::prelude::*;
use signlock_core::{Controller, LockAction, LockEvent, LockState, LockUnavailable, UiVisibility};

#[derive(Debug, Clone)]
enum Trigger {
    Start,
    Resume,
    Pause,
    Focus(bool),
    Reveal,
    Leave,
}

fn trigger_strategy() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        Just(Trigger::Start),
        Just(Trigger::Resume),
        Just(Trigger::Pause),
        any::<bool>().prop_map(Trigger::Focus),
        Just(Trigger::Reveal),
        Just(Trigger::Leave),
    ]
}

impl Trigger {
    fn event(&self) -> LockEvent {
        match self {
            Self::Start => LockEvent::SessionStart,
            Self::Resume => LockEvent::ForegroundResumed,
            Self::Pause => LockEvent::ForegroundPaused,
            Self::Focus(has_focus) => LockEvent::FocusChanged(*has_focus),
            Self::Reveal => LockEvent::SystemUiRevealed,
            Self::Leave => LockEvent::UserLeaveAttempt,
        }
    }
}

/// Answer every feedback-expecting action from `answers`, cycling.
fn settle(controller: &mut Controller, actions: Vec<LockAction>, answers: &[bool]) -> Vec<LockAction> {
    let mut issued = Vec::new();
    let mut pending = actions;
    let mut cursor = 0usize;

    while let Some(action) = pending.first().copied() {
        pending.remove(0);
        issued.push(action);

        let answer = answers.get(cursor % answers.len().max(1)).copied().unwrap_or(false);
        cursor += 1;

        let feedback = match action {
            LockAction::QueryLockState => Some(LockEvent::LockQueried { locked: answer }),
            LockAction::RequestTaskLock => Some(LockEvent::LockRequestCompleted(if answer {
                Ok(())
            } else {
                Err(LockUnavailable::Denied)
            })),
            LockAction::SetImmersiveUi | LockAction::ForceForeground | LockAction::KeepScreenOn => {
                None
            },
        };
        if let Some(feedback) = feedback {
            pending.extend(controller.handle(feedback));
        }
    }
    issued
}

proptest! {
    #[test]
    fn prop_lock_never_regresses(
        triggers in prop::collection::vec(trigger_strategy(), 1..60),
        answers in prop::collection::vec(any::<bool>(), 1..16),
    ) {
        let mut controller = Controller::default();
        let mut was_locked = false;

        for trigger in triggers {
            let actions = controller.handle(trigger.event());
            let issued = settle(&mut controller, actions, &answers);

            // A start opens a new session
            if matches!(trigger, Trigger::Start) {
                was_locked = false;
            }
            if was_locked {
                prop_assert_eq!(controller.lock_state(), LockState::Locked);
                prop_assert!(!issued.contains(&LockAction::RequestTaskLock));
            }
            was_locked |= controller.lock_state().is_locked();

            prop_assert!(!controller.attempt_in_flight());
            if matches!(trigger, Trigger::Start | Trigger::Resume) {
                prop_assert_eq!(controller.ui_visibility(), UiVisibility::Immersive);
            }
        }
    }

    #[test]
    fn prop_leave_only_forces_foreground(
        triggers in prop::collection::vec(trigger_strategy(), 0..20),
        answers in prop::collection::vec(any::<bool>(), 1..8),
    ) {
        let mut controller = Controller::default();
        for trigger in triggers {
            let actions = controller.handle(trigger.event());
            let _ = settle(&mut controller, actions, &answers);
        }

        let before = (controller.lock_state(), controller.ui_visibility());
        let actions = controller.handle(LockEvent::UserLeaveAttempt);

        prop_assert_eq!(actions, vec![LockAction::ForceForeground]);
        prop_assert_eq!((controller.lock_state(), controller.ui_visibility()), before);
    }
}
