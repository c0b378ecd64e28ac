//! Lockdown core for Signlock
//!
//! Pure state machines that keep a single signage application pinned to the
//! foreground, completely decoupled from the host runtime that delivers
//! lifecycle callbacks and executes platform commands.
//!
//! # Components
//!
//! - [`Controller`]: lock/immersion state machine (events in, actions out)
//! - [`EventGate`]: classifies escape-path input as suppress or pass through
//! - [`LockdownBackend`]: trait for the platform commands the core issues
//! - [`Session`]: per-session context that drives both against a backend

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod backend;
mod config;
mod controller;
mod error;
mod event;
mod gate;
mod key;
mod session;
mod state;

pub use action::LockAction;
pub use backend::LockdownBackend;
pub use config::{DEFAULT_NAVIGATION_MARKER, LockRetryPolicy, LockdownConfig};
pub use controller::{Controller, LockStats};
pub use error::LockUnavailable;
pub use event::{HostEvent, LockEvent};
pub use gate::{DEFAULT_SUPPRESSED_KEYS, EventGate, Verdict};
pub use key::KeyCode;
pub use session::Session;
pub use state::{LockState, UiVisibility};
