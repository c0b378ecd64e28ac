//! Escape-path input classification.
//!
//! The [`EventGate`] decides, before the host runs its default handling,
//! whether an input must be neutralized. A [`Verdict::Suppress`] result means
//! the host must neither perform the default action nor propagate the input.

use std::collections::BTreeSet;

use crate::{KeyCode, LockdownConfig};

/// Key codes whose default action never runs while locked down.
pub const DEFAULT_SUPPRESSED_KEYS: [KeyCode; 2] = [KeyCode::HOME, KeyCode::APP_SWITCH];

/// Outcome of classifying one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Drop the input: no default action, no propagation.
    Suppress,
    /// Let default handling proceed unmodified.
    PassThrough,
}

impl Verdict {
    /// Whether the input must be dropped.
    pub fn is_suppress(self) -> bool {
        self == Self::Suppress
    }
}

/// Input classifier.
///
/// Holds no session state: classification depends only on configuration, so
/// a denied lock never weakens key suppression. The intent to stay locked
/// down is fixed for the whole process and is not modeled as a value, which
/// is why back suppression is unconditional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGate {
    suppressed: BTreeSet<KeyCode>,
    navigation_prefixes: Vec<String>,
    navigation_markers: Vec<String>,
}

impl Default for EventGate {
    fn default() -> Self {
        Self::new(&LockdownConfig::default())
    }
}

impl EventGate {
    /// Create a gate from configuration. The default suppressed keys are
    /// always included.
    pub fn new(config: &LockdownConfig) -> Self {
        let suppressed = DEFAULT_SUPPRESSED_KEYS
            .iter()
            .chain(config.suppressed_keys.iter())
            .copied()
            .collect();

        Self {
            suppressed,
            navigation_prefixes: config.allowed_navigation_prefixes.clone(),
            navigation_markers: config.allowed_navigation_markers.clone(),
        }
    }

    /// `Suppress` iff `code` is in the suppressed set.
    pub fn classify_key(&self, code: KeyCode) -> Verdict {
        if self.suppressed.contains(&code) { Verdict::Suppress } else { Verdict::PassThrough }
    }

    /// Back/cancel navigation is always neutralized.
    pub fn classify_back(&self) -> Verdict {
        Verdict::Suppress
    }

    /// `PassThrough` iff `url` starts with an allowed prefix or contains an
    /// allowed marker. With nothing configured, every URL passes.
    pub fn classify_navigation(&self, url: &str) -> Verdict {
        if self.navigation_prefixes.is_empty() && self.navigation_markers.is_empty() {
            return Verdict::PassThrough;
        }

        let allowed = self.navigation_prefixes.iter().any(|prefix| url.starts_with(prefix.as_str()))
            || self.navigation_markers.iter().any(|marker| url.contains(marker.as_str()));

        if allowed { Verdict::PassThrough } else { Verdict::Suppress }
    }

    /// Suppressed key codes, in ascending order.
    pub fn suppressed_keys(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.suppressed.iter().copied()
    }
}
