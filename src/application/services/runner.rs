//! Simulated long-running task with cooperative cancellation
//!
//! The runner walks a fixed step schedule, suspending between steps.
//! Cancellation is only observed at step boundaries.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::application::ApplicationResult;
use crate::domain::{DomainError, ProgressEvent, RunState};
use crate::infrastructure::traits::{Notifier, ProgressSink};

/// Step layout of a run: `steps` events of `increment` percent each,
/// each followed by `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSchedule {
    pub steps: u8,
    pub increment: u8,
    pub delay: Duration,
}

impl StepSchedule {
    /// Six steps, 0 % through 100 % in 20 % increments.
    pub fn standard(delay: Duration) -> Self {
        Self {
            steps: 6,
            increment: 20,
            delay,
        }
    }
}

impl Default for StepSchedule {
    fn default() -> Self {
        Self::standard(Duration::from_secs(1))
    }
}

/// Outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub id: Uuid,
    pub label: String,
    pub state: RunState,
    pub steps_completed: u8,
}

/// Per-run state machine. A fresh one is created for every `run()`.
struct TaskRun {
    id: Uuid,
    state: RunState,
    steps_completed: u8,
}

impl TaskRun {
    fn start() -> Result<Self, DomainError> {
        Ok(Self {
            id: Uuid::new_v4(),
            state: RunState::default().transition(RunState::Running)?,
            steps_completed: 0,
        })
    }

    fn finish(mut self, label: &str, end: RunState) -> Result<RunReport, DomainError> {
        self.state = self.state.transition(end)?;
        Ok(RunReport {
            id: self.id,
            label: label.to_string(),
            state: self.state,
            steps_completed: self.steps_completed,
        })
    }
}

/// Drives simulated runs.
#[derive(Debug, Clone, Default)]
pub struct TaskRunner {
    schedule: StepSchedule,
}

impl TaskRunner {
    pub fn new(schedule: StepSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> StepSchedule {
        self.schedule
    }

    /// Run the schedule for `label`, reporting to `sink`.
    ///
    /// Checks `token` before every step. A cancelled run stops silently:
    /// no further progress and no completion notification.
    pub async fn run(
        &self,
        label: &str,
        token: &CancellationToken,
        sink: &dyn ProgressSink,
    ) -> ApplicationResult<RunReport> {
        let mut run = TaskRun::start()?;
        let span = info_span!("run", id = %run.id, label = %label);

        async move {
            info!("started");
            for step in 0..self.schedule.steps {
                if token.is_cancelled() {
                    info!("cancelled after {} steps", run.steps_completed);
                    return Ok(run.finish(label, RunState::Cancelled)?);
                }

                let percent = step.saturating_mul(self.schedule.increment);
                let event = ProgressEvent {
                    increment: self.schedule.increment,
                    percent,
                    message: format!("{percent}% complete"),
                };
                debug!("step {step}: {percent}%");
                sink.report(&event);
                run.steps_completed += 1;

                tokio::time::sleep(self.schedule.delay).await;
            }

            sink.completed(label);
            info!("completed");
            Ok(run.finish(label, RunState::Completed)?)
        }
        .instrument(span)
        .await
    }
}

/// Guard for a cancellation callback. Dropping it disarms the callback.
pub struct CancelHook {
    handle: JoinHandle<()>,
}

impl CancelHook {
    /// Whether the callback has already run (or been disarmed).
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CancelHook {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Fire `callback` once, as soon as `token` is cancelled.
///
/// Independent of the runner's polling: fires mid-delay too.
/// Must be called inside a tokio runtime.
pub fn on_cancellation(
    token: &CancellationToken,
    callback: impl FnOnce() + Send + 'static,
) -> CancelHook {
    let token = token.clone();
    let handle = tokio::spawn(async move {
        token.cancelled().await;
        callback();
    });
    CancelHook { handle }
}

/// Warn through `notifier` once `token` is cancelled.
pub fn warn_on_cancellation(
    token: &CancellationToken,
    label: &str,
    notifier: Arc<dyn Notifier>,
) -> CancelHook {
    let message = format!("Experiment '{label}' was cancelled");
    on_cancellation(token, move || notifier.warning(&message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schedule_ends_at_100_percent() {
        let schedule = StepSchedule::default();
        assert_eq!(schedule.steps, 6);
        assert_eq!((schedule.steps - 1) * schedule.increment, 100);
        assert_eq!(schedule.delay, Duration::from_secs(1));
    }

    #[test]
    fn given_run_when_finished_then_state_is_terminal() {
        let run = TaskRun::start().unwrap();
        assert_eq!(run.state, RunState::Running);

        let report = run.finish("exp", RunState::Completed).unwrap();
        assert_eq!(report.state, RunState::Completed);
        assert_eq!(report.steps_completed, 0);
    }

    #[test]
    fn given_finished_run_when_finished_again_then_invalid_transition() {
        let run = TaskRun {
            id: Uuid::new_v4(),
            state: RunState::Completed,
            steps_completed: 6,
        };

        let err = run.finish("exp", RunState::Cancelled).unwrap_err();

        assert_eq!(
            err,
            DomainError::InvalidTransition {
                from: "completed".to_string(),
                to: "cancelled".to_string(),
            }
        );
    }
}
