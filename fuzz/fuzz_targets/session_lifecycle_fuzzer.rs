//! Fuzz target for the lockdown Session
//!
//! Arbitrary host event orderings against arbitrary device privilege,
//! including mid-session provisioning changes and lock ejection.
//!
//! # Invariants
//!
//! - UI immersive after every start/resume
//! - Lock state never leaves Locked
//! - No lock request once locked
//! - Home, AppSwitch and Back always suppressed

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use signlock_harness::{HostOp, InvariantRegistry, Privilege, SimBackend, SimHost};

#[derive(Debug, Clone, Arbitrary)]
enum PrivilegeChoice {
    Granted,
    Denied,
    Faulting,
    Flaky(u8),
}

impl PrivilegeChoice {
    fn privilege(&self) -> Privilege {
        match self {
            Self::Granted => Privilege::Granted,
            Self::Denied => Privilege::Denied,
            Self::Faulting => Privilege::Faulting,
            Self::Flaky(p) => Privilege::Flaky { grant_probability: f64::from(*p) / 255.0 },
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Host(HostOp),
    Reprovision(PrivilegeChoice),
    Eject,
}

#[derive(Debug, Arbitrary)]
struct Input {
    privilege: PrivilegeChoice,
    seed: u64,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let mut host = SimHost::new(SimBackend::new(input.privilege.privilege(), input.seed));
    let invariants = InvariantRegistry::standard();

    for step in input.steps {
        match step {
            Step::Host(op) => {
                let snapshot = host.deliver(op.into_event());
                if let Err(violations) = invariants.check_all(snapshot) {
                    panic!("invariant violated: {:?}", violations);
                }
            }
            Step::Reprovision(choice) => host.backend_mut().set_privilege(choice.privilege()),
            Step::Eject => host.backend_mut().eject(),
        }
    }
});
