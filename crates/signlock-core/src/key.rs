//! Host-agnostic key identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw key code as delivered by the host input dispatcher.
///
/// Values follow the Android `KeyEvent` numbering, which most signage hosts
/// reuse. Unknown codes are carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub u32);

impl KeyCode {
    /// Home key.
    pub const HOME: Self = Self(3);
    /// Back key.
    pub const BACK: Self = Self(4);
    /// D-pad up.
    pub const DPAD_UP: Self = Self(19);
    /// D-pad down.
    pub const DPAD_DOWN: Self = Self(20);
    /// D-pad center.
    pub const DPAD_CENTER: Self = Self(23);
    /// Volume up.
    pub const VOLUME_UP: Self = Self(24);
    /// Volume down.
    pub const VOLUME_DOWN: Self = Self(25);
    /// Power key.
    pub const POWER: Self = Self(26);
    /// Enter key.
    pub const ENTER: Self = Self(66);
    /// Menu key.
    pub const MENU: Self = Self(82);
    /// Recents / app switch key.
    pub const APP_SWITCH: Self = Self(187);

    /// Look up a code by its lowercase name, e.g. `"home"` or `"app_switch"`.
    pub fn from_name(name: &str) -> Option<Self> {
        let code = match name {
            "home" => Self::HOME,
            "back" => Self::BACK,
            "dpad_up" => Self::DPAD_UP,
            "dpad_down" => Self::DPAD_DOWN,
            "dpad_center" => Self::DPAD_CENTER,
            "volume_up" => Self::VOLUME_UP,
            "volume_down" => Self::VOLUME_DOWN,
            "power" => Self::POWER,
            "enter" => Self::ENTER,
            "menu" => Self::MENU,
            "app_switch" | "recents" => Self::APP_SWITCH,
            _ => return None,
        };
        Some(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "keycode {}", self.0)
    }
}
