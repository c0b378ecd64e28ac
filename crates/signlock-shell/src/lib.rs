//! Host adapter for Signlock
//!
//! A thin shell over [`signlock_core::Session`] that stands in for the
//! activity/window host: it reads lifecycle and input events from a script,
//! forwards each one to the session, and logs every command and verdict.
//!
//! This crate only handles script parsing, configuration loading, and logging.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod backend;
pub mod config;
pub mod error;
pub mod runner;
pub mod script;

pub use backend::TracingBackend;
pub use error::ShellError;
pub use runner::{RunSummary, run_script};
pub use script::parse_event;
