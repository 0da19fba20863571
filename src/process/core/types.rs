/*!
 * Process Types
 * Lifecycle state and read-only views of process records
 */

use crate::core::types::{Pid, Work};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Record created, not yet admitted
    New,
    /// Waiting in the ready queue
    Ready,
    /// Currently dispatched
    Running,
    /// Reserved for blocking operations; nothing enters it
    Waiting,
    /// All work observed complete
    Terminated,
}

impl ProcessState {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Terminated => "TERMINATED",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of advancing a running record by one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// One unit of work was completed
    Progressed,
    /// No work remained; the record is now terminated
    Terminated,
}

/// Immutable view of a record for reporters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub state: ProcessState,
    pub work_done: Work,
    pub work_total: Work,
    pub program_counter: u64,
}

impl ProcessSnapshot {
    #[inline]
    #[must_use]
    pub const fn remaining_work(&self) -> Work {
        self.work_total - self.work_done
    }

    #[inline]
    #[must_use]
    pub const fn is_terminated(&self) -> bool {
        matches!(self.state, ProcessState::Terminated)
    }
}

impl fmt::Display for ProcessSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "process {} [{}] {}/{} units of work done",
            self.pid, self.state, self.work_done, self.work_total
        )
    }
}
