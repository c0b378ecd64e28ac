//! Backend trait for abstracting platform lockdown commands.
//!
//! The [`LockdownBackend`] trait decouples the lockdown state machines from
//! the platform that actually pins tasks and hides system chrome. Each host
//! implements it; the [`crate::Session`] handles all orchestration.

use crate::LockUnavailable;

/// Platform commands the lockdown core issues.
///
/// All methods are synchronous and must return promptly: they are invoked on
/// the host's UI thread while a lifecycle callback is being handled.
///
/// # Implementations
///
/// - **Device**: activity manager lock-task calls and window insets control
/// - **Simulation**: recording backend with scripted privilege
pub trait LockdownBackend {
    /// Whether task-lock is currently active. Always answers.
    fn query_lock_state(&mut self) -> bool;

    /// Pin the current task.
    ///
    /// # Errors
    ///
    /// Returns [`LockUnavailable`] if the device lacks lock-task privilege or
    /// the platform call faults.
    fn request_task_lock(&mut self) -> Result<(), LockUnavailable>;

    /// Hide system navigation and status chrome. Idempotent.
    fn set_immersive_ui(&mut self);

    /// Move the session back to the front. Best-effort, idempotent.
    fn force_foreground(&mut self);

    /// Keep the display awake while the session window is shown.
    fn keep_screen_on(&mut self);
}

impl<B: LockdownBackend + ?Sized> LockdownBackend for &mut B {
    fn query_lock_state(&mut self) -> bool {
        (**self).query_lock_state()
    }

    fn request_task_lock(&mut self) -> Result<(), LockUnavailable> {
        (**self).request_task_lock()
    }

    fn set_immersive_ui(&mut self) {
        (**self).set_immersive_ui();
    }

    fn force_foreground(&mut self) {
        (**self).force_foreground();
    }

    fn keep_screen_on(&mut self) {
        (**self).keep_screen_on();
    }
}
