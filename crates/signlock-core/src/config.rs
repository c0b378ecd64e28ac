//! Lockdown configuration.

use serde::{Deserialize, Serialize};

use crate::KeyCode;

/// Query marker that identifies player URLs by default.
pub const DEFAULT_NAVIGATION_MARKER: &str = "player_id=";

/// When the Controller re-attempts task-lock after a denial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockRetryPolicy {
    /// Re-attempt on every foreground resume.
    #[default]
    OnResume,
    /// Re-attempt on every resume and on every focus gain while not locked.
    ///
    /// Picks up lock-task privilege granted mid-session without waiting for
    /// the session to leave and re-enter the foreground.
    OnResumeAndFocus,
}

/// Lockdown configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockdownConfig {
    /// Key codes suppressed in addition to Home and AppSwitch.
    pub suppressed_keys: Vec<KeyCode>,
    /// URL prefixes embedded content may navigate to.
    pub allowed_navigation_prefixes: Vec<String>,
    /// Substrings that mark a URL as allowed wherever it points.
    pub allowed_navigation_markers: Vec<String>,
    /// Keep the display awake for the whole session.
    pub keep_screen_on: bool,
    /// Lock retry policy.
    pub lock_retry: LockRetryPolicy,
}

impl Default for LockdownConfig {
    fn default() -> Self {
        Self {
            suppressed_keys: Vec::new(),
            allowed_navigation_prefixes: Vec::new(),
            allowed_navigation_markers: vec![DEFAULT_NAVIGATION_MARKER.to_string()],
            keep_screen_on: true,
            lock_retry: LockRetryPolicy::OnResume,
        }
    }
}
