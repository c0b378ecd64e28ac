//! Logging backend decorator.

use signlock_core::{LockUnavailable, LockdownBackend};

/// Wraps a backend and logs every command the core issues.
#[derive(Debug)]
pub struct TracingBackend<B> {
    inner: B,
}

impl<B: LockdownBackend> TracingBackend<B> {
    /// Wrap `inner`.
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Unwrap the backend.
    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl<B: LockdownBackend> LockdownBackend for TracingBackend<B> {
    fn query_lock_state(&mut self) -> bool {
        let locked = self.inner.query_lock_state();
        tracing::info!("QueryLockState -> {}", locked);
        locked
    }

    fn request_task_lock(&mut self) -> Result<(), LockUnavailable> {
        let result = self.inner.request_task_lock();
        match &result {
            Ok(()) => tracing::info!("RequestTaskLock -> granted"),
            Err(e) => tracing::info!("RequestTaskLock -> {}", e),
        }
        result
    }

    fn set_immersive_ui(&mut self) {
        tracing::info!("SetImmersiveUi");
        self.inner.set_immersive_ui();
    }

    fn force_foreground(&mut self) {
        tracing::info!("ForceForeground");
        self.inner.force_foreground();
    }

    fn keep_screen_on(&mut self) {
        tracing::info!("KeepScreenOn");
        self.inner.keep_screen_on();
    }
}
