//! Per-session lockdown context.
//!
//! The [`Session`] is the explicit context object a host adapter owns for the
//! lifetime of one foreground session. It coordinates between:
//! - [`Controller`]: lock/immersion state machine
//! - [`EventGate`]: input classification
//! - [`LockdownBackend`]: platform commands

use std::collections::VecDeque;

use crate::{
    Controller, EventGate, HostEvent, LockAction, LockEvent, LockdownBackend, LockdownConfig,
    Verdict,
};

/// Drives the Controller and Gate against a backend.
///
/// Every call to [`Session::handle`] runs to completion: backend answers are
/// fed back into the Controller until it has nothing left to issue, so state
/// is reconciled within the same event-handling turn.
pub struct Session<B: LockdownBackend> {
    controller: Controller,
    gate: EventGate,
    backend: B,
}

impl<B: LockdownBackend> Session<B> {
    /// Create a session with the given backend and configuration.
    pub fn new(backend: B, config: &LockdownConfig) -> Self {
        Self { controller: Controller::new(config), gate: EventGate::new(config), backend }
    }

    /// Process a host event.
    ///
    /// Input events return the gate's verdict. Lifecycle events always return
    /// [`Verdict::PassThrough`]: the host's own lifecycle handling proceeds.
    pub fn handle(&mut self, event: HostEvent) -> Verdict {
        match event {
            HostEvent::KeyPressed(code) => {
                let verdict = self.gate.classify_key(code);
                tracing::debug!("{} -> {:?}", code, verdict);
                verdict
            },
            HostEvent::BackPressed => {
                tracing::debug!("Back pressed - suppressed in kiosk mode");
                self.gate.classify_back()
            },
            HostEvent::NavigationRequested(url) => {
                let verdict = self.gate.classify_navigation(&url);
                if verdict.is_suppress() {
                    tracing::warn!("Blocked navigation: {}", url);
                }
                verdict
            },
            lifecycle => {
                if let Some(event) = lifecycle.lifecycle() {
                    self.drive(event);
                }
                Verdict::PassThrough
            },
        }
    }

    /// Run a Controller event and every follow-up it triggers.
    fn drive(&mut self, event: LockEvent) {
        let mut pending: VecDeque<LockAction> = self.controller.handle(event).into();

        while let Some(action) = pending.pop_front() {
            if let Some(feedback) = self.execute(action) {
                pending.extend(self.controller.handle(feedback));
            }
        }
    }

    /// Execute one action against the backend, returning its answer if the
    /// Controller expects one.
    fn execute(&mut self, action: LockAction) -> Option<LockEvent> {
        tracing::trace!("Executing {:?} (awaits answer: {})", action, action.expects_feedback());
        match action {
            LockAction::QueryLockState => {
                Some(LockEvent::LockQueried { locked: self.backend.query_lock_state() })
            },
            LockAction::RequestTaskLock => {
                Some(LockEvent::LockRequestCompleted(self.backend.request_task_lock()))
            },
            LockAction::SetImmersiveUi => {
                self.backend.set_immersive_ui();
                None
            },
            LockAction::ForceForeground => {
                self.backend.force_foreground();
                None
            },
            LockAction::KeepScreenOn => {
                self.backend.keep_screen_on();
                None
            },
        }
    }

    /// The lockdown state machine.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// The input classifier.
    pub fn gate(&self) -> &EventGate {
        &self.gate
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable access to the backend, e.g. to change simulated privilege.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// End the session, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }
}
