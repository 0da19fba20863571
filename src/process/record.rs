/*!
 * Process Control Record
 * Identity, lifecycle state, accumulated work and simulated context of one process
 */

use super::context::{ContextLayout, ExecutionContext};
use super::core::types::{ProcessSnapshot, ProcessState, StepOutcome};
use crate::core::errors::{Operation, SchedulerError, SchedulerResult};
use crate::core::types::{Pid, Work};
use serde::{Deserialize, Serialize};

/// Process control record
///
/// Records are moved by value between the caller and the scheduler; they are
/// never cloned, so a pid identifies exactly one live record.
#[derive(Debug)]
pub struct ProcessRecord {
    pid: Pid,
    state: ProcessState,
    work_done: Work,
    work_total: Work,
    context: ExecutionContext,
}

impl ProcessRecord {
    /// Create a record in `New` with the default context layout
    pub fn create(pid: Pid, work_total: Work) -> SchedulerResult<Self> {
        Self::with_layout(pid, work_total, ContextLayout::default())
    }

    pub fn with_layout(pid: Pid, work_total: Work, layout: ContextLayout) -> SchedulerResult<Self> {
        if pid == 0 {
            return Err(SchedulerError::invalid_argument("process id must be positive"));
        }

        Ok(Self {
            pid,
            state: ProcessState::New,
            work_done: 0,
            work_total,
            context: ExecutionContext::new(layout)?,
        })
    }

    /// Advance simulated execution by one unit
    ///
    /// Only a `Running` record may step. Once all work is done the next step
    /// terminates the record instead of doing more work.
    pub fn step(&mut self) -> SchedulerResult<StepOutcome> {
        if self.state != ProcessState::Running {
            return Err(SchedulerError::invalid_transition(
                self.pid,
                self.state,
                Operation::Step,
            ));
        }

        if self.work_done < self.work_total {
            self.work_done += 1;
            self.context.advance(self.pid);
            Ok(StepOutcome::Progressed)
        } else {
            self.state = ProcessState::Terminated;
            Ok(StepOutcome::Terminated)
        }
    }

    /// Read-only view for reporting
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> ProcessSnapshot {
        ProcessSnapshot {
            pid: self.pid,
            state: self.state,
            work_done: self.work_done,
            work_total: self.work_total,
            program_counter: self.context.program_counter(),
        }
    }

    #[inline]
    pub fn id(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    #[inline]
    pub fn work_done(&self) -> Work {
        self.work_done
    }

    #[inline]
    pub fn work_total(&self) -> Work {
        self.work_total
    }

    #[inline]
    pub fn remaining_work(&self) -> Work {
        self.work_total - self.work_done
    }

    #[inline]
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    #[inline]
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }

    #[inline]
    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
    }
}

/// Driver-supplied construction input
///
/// Fields are signed so malformed input can be reported instead of being
/// rejected by the deserializer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSpec {
    pub id: i64,
    pub work_total: i64,
}

impl ProcessSpec {
    #[inline]
    #[must_use]
    pub const fn new(id: i64, work_total: i64) -> Self {
        Self { id, work_total }
    }

    /// Validate and build a `New` record
    pub fn build(&self, layout: ContextLayout) -> SchedulerResult<ProcessRecord> {
        if self.id <= 0 {
            return Err(SchedulerError::invalid_argument(format!(
                "process id must be positive, got {}",
                self.id
            )));
        }
        if self.work_total < 0 {
            return Err(SchedulerError::invalid_argument(format!(
                "work total of process {} must be non-negative, got {}",
                self.id, self.work_total
            )));
        }
        let pid = Pid::try_from(self.id).map_err(|_| {
            SchedulerError::invalid_argument(format!("process id {} out of range", self.id))
        })?;

        ProcessRecord::with_layout(pid, self.work_total as Work, layout)
    }
}

impl From<(i64, i64)> for ProcessSpec {
    fn from((id, work_total): (i64, i64)) -> Self {
        Self::new(id, work_total)
    }
}
