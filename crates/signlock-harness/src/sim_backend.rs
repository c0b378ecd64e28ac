//! Simulated lockdown backend.
//!
//! `SimBackend` implements [`LockdownBackend`] without touching any platform.
//! Every command is recorded so tests can assert exactly what the core issued,
//! and lock-task privilege is scripted (or drawn from a seeded RNG) so runs
//! are reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use signlock_core::{LockUnavailable, LockdownBackend};

/// A command the backend received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendCall {
    /// `query_lock_state`
    QueryLockState,
    /// `request_task_lock`
    RequestTaskLock,
    /// `set_immersive_ui`
    SetImmersiveUi,
    /// `force_foreground`
    ForceForeground,
    /// `keep_screen_on`
    KeepScreenOn,
}

/// How the simulated device answers lock requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Privilege {
    /// Device-owner provisioned: every request succeeds.
    Granted,
    /// Not provisioned: every request is denied.
    Denied,
    /// Every request faults inside the platform call.
    Faulting,
    /// Each request succeeds with the given probability.
    Flaky {
        /// Probability in `[0.0, 1.0]` that a request succeeds.
        grant_probability: f64,
    },
}

/// Recording backend with scripted privilege.
#[derive(Debug, Clone)]
pub struct SimBackend {
    privilege: Privilege,
    locked: bool,
    rng: ChaCha8Rng,
    calls: Vec<BackendCall>,
}

impl SimBackend {
    /// Create a backend with the given privilege and RNG seed.
    pub fn new(privilege: Privilege, seed: u64) -> Self {
        Self { privilege, locked: false, rng: ChaCha8Rng::seed_from_u64(seed), calls: Vec::new() }
    }

    /// Backend on a provisioned device.
    pub fn granted() -> Self {
        Self::new(Privilege::Granted, 0)
    }

    /// Backend on an unprovisioned device.
    pub fn denied() -> Self {
        Self::new(Privilege::Denied, 0)
    }

    /// Backend whose task is already pinned, e.g. by a launcher.
    pub fn pre_locked() -> Self {
        let mut backend = Self::granted();
        backend.locked = true;
        backend
    }

    /// Change privilege mid-session (provisioning change).
    pub fn set_privilege(&mut self, privilege: Privilege) {
        self.privilege = privilege;
    }

    /// Current privilege.
    pub fn privilege(&self) -> Privilege {
        self.privilege
    }

    /// Drop task-lock behind the core's back.
    pub fn eject(&mut self) {
        self.locked = false;
    }

    /// Whether the simulated task is pinned.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Number of recorded calls of one kind.
    pub fn count(&self, call: BackendCall) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }

    /// Take recorded calls, clearing the log.
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }
}

impl Default for SimBackend {
    fn default() -> Self {
        Self::denied()
    }
}

impl LockdownBackend for SimBackend {
    fn query_lock_state(&mut self) -> bool {
        self.calls.push(BackendCall::QueryLockState);
        self.locked
    }

    fn request_task_lock(&mut self) -> Result<(), LockUnavailable> {
        self.calls.push(BackendCall::RequestTaskLock);

        let granted = match self.privilege {
            Privilege::Granted => true,
            Privilege::Denied => false,
            Privilege::Faulting => {
                return Err(LockUnavailable::Fault("simulated lock task fault".to_string()));
            },
            Privilege::Flaky { grant_probability } => {
                // NaN never grants
                let p =
                    if grant_probability.is_nan() { 0.0 } else { grant_probability.clamp(0.0, 1.0) };
                self.rng.gen_bool(p)
            },
        };

        if granted {
            self.locked = true;
            Ok(())
        } else {
            Err(LockUnavailable::Denied)
        }
    }

    fn set_immersive_ui(&mut self) {
        self.calls.push(BackendCall::SetImmersiveUi);
    }

    fn force_foreground(&mut self) {
        self.calls.push(BackendCall::ForceForeground);
    }

    fn keep_screen_on(&mut self) {
        self.calls.push(BackendCall::KeepScreenOn);
    }
}
