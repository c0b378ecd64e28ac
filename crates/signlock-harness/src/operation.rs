//! Operations for model-based testing.
//!
//! Operations represent everything the host can deliver. They are generated
//! by proptest or the fuzzer and mapped onto [`HostEvent`]s.

use arbitrary::Arbitrary;
use signlock_core::{HostEvent, KeyCode};

/// URLs navigation operations choose from.
const NAVIGATION_TARGETS: [&str; 4] = [
    "https://signage.example/player?player_id=lobby",
    "https://signage.example/player/next?player_id=lobby",
    "https://ads.example/landing",
    "file:///sdcard/Download/exploit.html",
];

/// A host event, in a shape that is cheap to generate.
///
/// Key codes are kept as raw `u8` so generators hit Home (3), Back (4) and
/// the volume keys often; AppSwitch (187) is reachable too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum HostOp {
    /// Session created.
    SessionStart,
    /// Session resumed.
    ForegroundResumed,
    /// Session paused.
    ForegroundPaused,
    /// Focus gained or lost.
    FocusChanged(bool),
    /// OS revealed system chrome.
    SystemUiRevealed,
    /// Key pressed.
    KeyPressed(u8),
    /// Back pressed.
    BackPressed,
    /// User tries to leave.
    UserLeaveAttempt,
    /// Navigation to one of a fixed set of URLs.
    NavigationRequested(u8),
}

impl HostOp {
    /// Map to the host event the core sees.
    pub fn into_event(self) -> HostEvent {
        match self {
            Self::SessionStart => HostEvent::SessionStart,
            Self::ForegroundResumed => HostEvent::ForegroundResumed,
            Self::ForegroundPaused => HostEvent::ForegroundPaused,
            Self::FocusChanged(has_focus) => HostEvent::FocusChanged(has_focus),
            Self::SystemUiRevealed => HostEvent::SystemUiRevealed,
            Self::KeyPressed(code) => HostEvent::KeyPressed(KeyCode(u32::from(code))),
            Self::BackPressed => HostEvent::BackPressed,
            Self::UserLeaveAttempt => HostEvent::UserLeaveAttempt,
            Self::NavigationRequested(index) => {
                let url = NAVIGATION_TARGETS[usize::from(index) % NAVIGATION_TARGETS.len()];
                HostEvent::NavigationRequested(url.to_string())
            },
        }
    }
}
