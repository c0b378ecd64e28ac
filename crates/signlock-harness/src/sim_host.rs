//! Simulated host lifecycle shell.
//!
//! `SimHost` owns a [`Session`] over a [`SimBackend`] and plays the role of
//! the activity/window host: it delivers one event at a time and records a
//! [`StepSnapshot`] of what each event changed.

use signlock_core::{HostEvent, LockdownConfig, Session, Verdict};

use crate::{SimBackend, StepSnapshot};

/// Host that forwards events into a session and records every step.
pub struct SimHost {
    session: Session<SimBackend>,
    steps: Vec<StepSnapshot>,
}

impl SimHost {
    /// Create a host with default configuration.
    pub fn new(backend: SimBackend) -> Self {
        Self::with_config(backend, &LockdownConfig::default())
    }

    /// Create a host with the given configuration.
    pub fn with_config(backend: SimBackend, config: &LockdownConfig) -> Self {
        Self { session: Session::new(backend, config), steps: Vec::new() }
    }

    /// Deliver one event and snapshot its effect.
    pub fn deliver(&mut self, event: HostEvent) -> &StepSnapshot {
        let lock_before = self.session.controller().lock_state();
        let ui_before = self.session.controller().ui_visibility();
        let _ = self.session.backend_mut().take_calls();

        let verdict = self.session.handle(event.clone());

        let controller = self.session.controller();
        let step = StepSnapshot {
            event,
            verdict,
            lock_before,
            lock_after: controller.lock_state(),
            ui_before,
            ui_after: controller.ui_visibility(),
            calls: self.session.backend().calls().to_vec(),
        };
        tracing::trace!("{:?}", step);

        self.steps.push(step);
        let last = self.steps.len() - 1;
        &self.steps[last]
    }

    /// Deliver several events, returning their verdicts.
    pub fn deliver_all(&mut self, events: impl IntoIterator<Item = HostEvent>) -> Vec<Verdict> {
        events.into_iter().map(|event| self.deliver(event).verdict).collect()
    }

    /// Steps recorded so far, oldest first.
    pub fn steps(&self) -> &[StepSnapshot] {
        &self.steps
    }

    /// The session under test.
    pub fn session(&self) -> &Session<SimBackend> {
        &self.session
    }

    /// Mutable access to the simulated backend.
    pub fn backend_mut(&mut self) -> &mut SimBackend {
        self.session.backend_mut()
    }
}
