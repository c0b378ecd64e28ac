//! Signlock shell binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay a lifecycle script against an unprovisioned device
//! signlock-shell --script boot.events --privilege denied
//!
//! # Read events from stdin with a config file
//! signlock-shell --config kiosk.json < boot.events
//! ```

use std::{
    fs::File,
    io::{self, BufReader},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use signlock_core::{LockdownConfig, Session};
use signlock_harness::{Privilege, SimBackend};
use signlock_shell::{TracingBackend, config, run_script};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Lock-task privilege of the simulated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PrivilegeArg {
    /// Every lock request succeeds.
    Granted,
    /// Every lock request is denied.
    Denied,
    /// Every lock request faults.
    Faulting,
    /// Lock requests succeed at random (see --grant-probability).
    Flaky,
}

/// Signlock lockdown shell
#[derive(Parser, Debug)]
#[command(name = "signlock-shell")]
#[command(about = "Replay host lifecycle events through the Signlock lockdown core")]
#[command(version)]
struct Args {
    /// Event script to replay (reads stdin if omitted)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// JSON lockdown configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lock-task privilege of the simulated device
    #[arg(short, long, value_enum, default_value_t = PrivilegeArg::Denied)]
    privilege: PrivilegeArg,

    /// Success probability for flaky privilege, in [0.0, 1.0]
    #[arg(long, default_value = "0.5", value_parser = parse_probability)]
    grant_probability: f64,

    /// RNG seed for flaky privilege
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&p) { Ok(p) } else { Err(format!("{s} is not in [0.0, 1.0]")) }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            config::load(path)?
        },
        None => LockdownConfig::default(),
    };

    let privilege = match args.privilege {
        PrivilegeArg::Granted => Privilege::Granted,
        PrivilegeArg::Denied => Privilege::Denied,
        PrivilegeArg::Faulting => Privilege::Faulting,
        PrivilegeArg::Flaky => Privilege::Flaky { grant_probability: args.grant_probability },
    };
    tracing::info!("Simulated device privilege: {:?}", privilege);

    let backend = TracingBackend::new(SimBackend::new(privilege, args.seed));
    let mut session = Session::new(backend, &config);

    let summary = match &args.script {
        Some(path) => run_script(&mut session, BufReader::new(File::open(path)?))?,
        None => run_script(&mut session, io::stdin().lock())?,
    };

    tracing::info!("Replayed {} events, suppressed {} inputs", summary.events, summary.suppressed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_probability_must_be_in_unit_range() {
        let parse = |p: &str| {
            Args::try_parse_from(["signlock-shell", "--privilege", "flaky", "--grant-probability", p])
        };

        assert!(parse("0.25").is_ok_and(|args| (args.grant_probability - 0.25).abs() < f64::EPSILON));
        assert!(parse("NaN").is_err());
        assert!(parse("1.5").is_err());
        assert!(parse("-0.1").is_err());
        assert!(parse("often").is_err());
    }
}
