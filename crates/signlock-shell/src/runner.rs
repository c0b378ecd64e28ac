//! Script runner.
//!
//! Plays the host: feeds each script event into the session in order, one at
//! a time, and logs the verdict returned for input events.

use std::io::BufRead;

use signlock_core::{HostEvent, LockState, LockdownBackend, Session, UiVisibility, Verdict};

use crate::{ShellError, script::parse_event};

/// What a script run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Events delivered.
    pub events: usize,
    /// Inputs suppressed by the gate.
    pub suppressed: usize,
    /// Final lock state.
    pub lock_state: LockState,
    /// Final UI visibility.
    pub ui: UiVisibility,
}

/// Run every event in `reader` through `session`.
///
/// Parsing stops at the first malformed line.
pub fn run_script<B, R>(session: &mut Session<B>, reader: R) -> Result<RunSummary, ShellError>
where
    B: LockdownBackend,
    R: BufRead,
{
    let mut summary = RunSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let event = parse_event(&line)
            .map_err(|message| ShellError::Script { line: index + 1, message })?;
        let Some(event) = event else {
            continue;
        };

        let is_input = event.lifecycle().is_none();
        tracing::debug!("Delivering {:?}", event);
        let verdict = session.handle(event.clone());

        summary.events += 1;
        if is_input {
            if verdict == Verdict::Suppress {
                summary.suppressed += 1;
            }
            log_verdict(&event, verdict);
        }
    }

    let controller = session.controller();
    summary.lock_state = controller.lock_state();
    summary.ui = controller.ui_visibility();

    let stats = controller.stats();
    tracing::info!(
        "Session summary: lock={} ui={} attempts={} denials={} countermeasures={}",
        summary.lock_state,
        summary.ui,
        stats.attempts,
        stats.denials,
        stats.leave_countermeasures
    );

    Ok(summary)
}

fn log_verdict(event: &HostEvent, verdict: Verdict) {
    match verdict {
        Verdict::Suppress => tracing::info!("{:?} -> suppressed", event),
        Verdict::PassThrough => tracing::info!("{:?} -> pass through", event),
    }
}

#[cfg(test)]
mod tests {
    use signlock_core::LockdownConfig;
    use signlock_harness::SimBackend;

    use super::*;

    #[test]
    fn summary_counts_suppressed_inputs() -> Result<(), ShellError> {
        let script = "start\nresume\nkey home\nkey volume_up\nback\n";
        let mut session = Session::new(SimBackend::denied(), &LockdownConfig::default());

        let summary = run_script(&mut session, script.as_bytes())?;

        assert_eq!(summary.events, 5);
        assert_eq!(summary.suppressed, 2);
        assert_eq!(summary.lock_state, LockState::Unavailable);
        assert_eq!(summary.ui, UiVisibility::Immersive);
        Ok(())
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let script = "start\n\nfocus maybe\n";
        let mut session = Session::new(SimBackend::denied(), &LockdownConfig::default());

        let err = run_script(&mut session, script.as_bytes()).err();
        assert!(matches!(err, Some(ShellError::Script { line: 3, .. })));
    }
}
