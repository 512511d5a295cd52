//! Session switch state machine
//!
//! ```text
//! Idle
//!   ↓ open files exist          ↘ nothing open
//! ConfirmSwitch                  │
//!   ↓ save first, dirty docs     │
//! ConfirmSave                    │
//!   ↓                            │
//! SavingCurrent ← save first, clean docs
//!   ↓                            │
//! CloseAll  ←── just switch ─────┘
//!   ↓
//! Restoring
//!   ↓
//! Done
//! ```
//!
//! Any state may fall back to `Idle` when the user cancels or the target
//! session turns out to be unreadable.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchState {
    Idle,
    /// Asking whether to save the current files before switching
    ConfirmSwitch,
    /// Asking what to do with modified documents
    ConfirmSave,
    /// Prompting for a name and saving the current files
    SavingCurrent,
    CloseAll,
    Restoring,
    Done,
}

impl SwitchState {
    pub fn can_transition_to(&self, target: SwitchState) -> bool {
        use SwitchState::*;

        match (self, target) {
            (Idle, ConfirmSwitch) | (Idle, CloseAll) => true,
            (ConfirmSwitch, ConfirmSave)
            | (ConfirmSwitch, SavingCurrent)
            | (ConfirmSwitch, CloseAll) => true,
            (ConfirmSave, SavingCurrent) => true,
            (SavingCurrent, CloseAll) => true,
            (CloseAll, Restoring) => true,
            (Restoring, Done) => true,
            // Cancel or abort from anywhere
            (_, Idle) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchState::Idle => "idle",
            SwitchState::ConfirmSwitch => "confirm_switch",
            SwitchState::ConfirmSave => "confirm_save",
            SwitchState::SavingCurrent => "saving_current",
            SwitchState::CloseAll => "close_all",
            SwitchState::Restoring => "restoring",
            SwitchState::Done => "done",
        }
    }
}

impl std::fmt::Display for SwitchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One run of the restore-with-unsaved-work workflow
#[derive(Debug)]
pub struct SwitchFlow {
    target: String,
    state: SwitchState,
}

impl SwitchFlow {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            state: SwitchState::Idle,
        }
    }

    pub fn state(&self) -> SwitchState {
        self.state
    }

    pub fn advance(&mut self, next: SwitchState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(SessionError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        tracing::debug!(
            session = %self.target,
            from = %self.state,
            to = %next,
            "Switch state transition"
        );

        self.state = next;
        Ok(())
    }

    /// Return to `Idle` without side effects
    pub fn cancel(&mut self) {
        tracing::debug!(session = %self.target, from = %self.state, "Switch cancelled");
        self.state = SwitchState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        use SwitchState::*;

        assert!(Idle.can_transition_to(ConfirmSwitch));
        assert!(Idle.can_transition_to(CloseAll));
        assert!(ConfirmSwitch.can_transition_to(ConfirmSave));
        assert!(ConfirmSwitch.can_transition_to(SavingCurrent));
        assert!(ConfirmSwitch.can_transition_to(CloseAll));
        assert!(ConfirmSave.can_transition_to(SavingCurrent));
        assert!(SavingCurrent.can_transition_to(CloseAll));
        assert!(CloseAll.can_transition_to(Restoring));
        assert!(Restoring.can_transition_to(Done));
        assert!(ConfirmSave.can_transition_to(Idle));
    }

    #[test]
    fn test_invalid_transitions() {
        use SwitchState::*;

        // Nothing is opened before everything is closed
        assert!(!Idle.can_transition_to(Restoring));
        assert!(!ConfirmSwitch.can_transition_to(Restoring));
        // The dirty check only follows the switch question
        assert!(!Idle.can_transition_to(ConfirmSave));
        assert!(!Done.can_transition_to(CloseAll));
    }

    #[test]
    fn test_flow_rejects_skipping_close() {
        let mut flow = SwitchFlow::new("alpha");
        flow.advance(SwitchState::ConfirmSwitch).unwrap();

        let err = flow.advance(SwitchState::Restoring).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                from: SwitchState::ConfirmSwitch,
                to: SwitchState::Restoring
            }
        ));

        flow.cancel();
        assert_eq!(flow.state(), SwitchState::Idle);
    }
}
