//! Lifecycle of a simulated run

use std::fmt;

use crate::domain::DomainError;

/// `Idle -> Running -> {Completed, Cancelled}`. Both end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Cancelled)
    }

    /// Move to `next`, rejecting anything the lifecycle does not allow.
    pub fn transition(self, next: RunState) -> Result<RunState, DomainError> {
        match (self, next) {
            (RunState::Idle, RunState::Running)
            | (RunState::Running, RunState::Completed)
            | (RunState::Running, RunState::Cancelled) => Ok(next),
            _ => Err(DomainError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            }),
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// One step of progress: fixed increment plus a message with the cumulative percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub increment: u8,
    pub percent: u8,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_idle_when_started_then_running() {
        assert_eq!(
            RunState::Idle.transition(RunState::Running),
            Ok(RunState::Running)
        );
    }

    #[test]
    fn given_running_then_both_terminal_states_reachable() {
        assert!(RunState::Running
            .transition(RunState::Completed)
            .unwrap()
            .is_terminal());
        assert!(RunState::Running
            .transition(RunState::Cancelled)
            .unwrap()
            .is_terminal());
    }

    #[test]
    fn given_terminal_state_when_restarted_then_rejected() {
        for terminal in [RunState::Completed, RunState::Cancelled] {
            assert!(terminal.transition(RunState::Running).is_err());
            assert!(terminal.transition(RunState::Idle).is_err());
        }
        assert!(RunState::Idle.transition(RunState::Completed).is_err());
    }
}
