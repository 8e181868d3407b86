//! Step gates for the multi-page flows.
//!
//! Each flow is a linear state machine over named steps. A step becomes
//! reachable only when the step before it has been passed, so deep-linking
//! into the middle of a flow bounces back. Progress serializes through
//! [`StepGateSnapshot`] so a host can stash it (session storage, disk) and
//! survive a reload mid-flow.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    Registration,
    ForgotPassword,
    Contact,
}

impl Flow {
    /// Ordered step names for the flow.
    pub fn steps(self) -> &'static [&'static str] {
        match self {
            Flow::Registration => &["credentials", "profile", "verify"],
            Flow::ForgotPassword => &["request", "code", "new-password"],
            Flow::Contact => &["message", "confirm"],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepGate {
    flow: Flow,
    /// Index of the furthest unlocked step. The first step is always open.
    unlocked: usize,
}

/// Serializable progress for persistence across reloads.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct StepGateSnapshot {
    pub flow: Flow,
    pub unlocked: usize,
}

impl StepGate {
    pub fn new(flow: Flow) -> Self {
        Self { flow, unlocked: 0 }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.flow.steps().iter().position(|s| *s == name)
    }

    /// Whether the named step may be entered. Unknown names are simply
    /// inaccessible, never an error.
    pub fn can_access_step(&self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) => index <= self.unlocked,
            None => false,
        }
    }

    /// Unlock a step. Only the step directly after the furthest unlocked one
    /// (or an already-unlocked step) is accepted; skipping ahead is refused.
    /// Returns whether the step is now unlocked.
    pub fn complete_step(&mut self, name: &str) -> bool {
        match self.index_of(name) {
            Some(index) if index <= self.unlocked + 1 => {
                if index > self.unlocked {
                    self.unlocked = index;
                    log::debug!("[wizard] {:?} unlocked step {name}", self.flow);
                }
                true
            }
            _ => false,
        }
    }

    /// The step the user should currently be on.
    pub fn current_step(&self) -> &'static str {
        let steps = self.flow.steps();
        steps[self.unlocked.min(steps.len() - 1)]
    }

    pub fn is_finished(&self) -> bool {
        self.unlocked >= self.flow.steps().len() - 1
    }

    pub fn snapshot(&self) -> StepGateSnapshot {
        StepGateSnapshot {
            flow: self.flow,
            unlocked: self.unlocked,
        }
    }

    /// Rebuild from a persisted snapshot, clamping out-of-range progress.
    pub fn restore(snapshot: StepGateSnapshot) -> Self {
        let max = snapshot.flow.steps().len() - 1;
        Self {
            flow: snapshot.flow,
            unlocked: snapshot.unlocked.min(max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_is_open_and_second_is_not() {
        let gate = StepGate::new(Flow::Registration);
        assert!(gate.can_access_step("credentials"));
        assert!(!gate.can_access_step("profile"));
        assert_eq!(gate.current_step(), "credentials");
    }

    #[test]
    fn completing_the_next_step_unlocks_it() {
        let mut gate = StepGate::new(Flow::Registration);
        assert!(gate.complete_step("profile"));
        assert!(gate.can_access_step("profile"));
        assert_eq!(gate.current_step(), "profile");
    }

    #[test]
    fn unknown_step_is_falsy_not_an_error() {
        let mut gate = StepGate::new(Flow::ForgotPassword);
        assert!(!gate.can_access_step("step-unknown"));
        assert!(!gate.complete_step("step-unknown"));
    }

    #[test]
    fn skipping_ahead_is_refused() {
        let mut gate = StepGate::new(Flow::Registration);
        assert!(!gate.complete_step("verify"));
        assert!(!gate.can_access_step("verify"));
    }

    #[test]
    fn recompleting_an_unlocked_step_is_fine() {
        let mut gate = StepGate::new(Flow::Registration);
        assert!(gate.complete_step("profile"));
        assert!(gate.complete_step("credentials"));
        assert_eq!(gate.current_step(), "profile");
    }

    #[test]
    fn full_walk_finishes_the_flow() {
        let mut gate = StepGate::new(Flow::ForgotPassword);
        assert!(!gate.is_finished());
        assert!(gate.complete_step("code"));
        assert!(gate.complete_step("new-password"));
        assert!(gate.is_finished());
    }

    #[test]
    fn snapshot_survives_a_reload() {
        let mut gate = StepGate::new(Flow::Contact);
        gate.complete_step("confirm");

        let json = serde_json::to_string(&gate.snapshot()).unwrap();
        let snapshot: StepGateSnapshot = serde_json::from_str(&json).unwrap();
        let restored = StepGate::restore(snapshot);
        assert_eq!(restored, gate);
        assert!(restored.can_access_step("confirm"));
    }

    #[test]
    fn restore_clamps_corrupt_progress() {
        let restored = StepGate::restore(StepGateSnapshot {
            flow: Flow::Contact,
            unlocked: 99,
        });
        assert!(restored.is_finished());
        assert_eq!(restored.current_step(), "confirm");
    }
}
