/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::Pid;
use crate::process::core::types::ProcessState;
use crate::process::ProcessRecord;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Scheduler operation result
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Operation a record was subjected to when a transition was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Admit,
    Step,
    Requeue,
    Retire,
}

impl Operation {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admit => "admit",
            Self::Step => "step",
            Self::Requeue => "requeue",
            Self::Retire => "retire",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduler-related errors with serialization support
///
/// Every variant is recoverable: the operation that produced it left all
/// scheduler and record state unchanged.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(scheduler::invalid_argument),
        help("Process ids must be positive and unique per scheduler; work totals must be non-negative.")
    )]
    InvalidArgument(String),

    #[error("Cannot {operation} process {pid} in state {state}")]
    #[diagnostic(
        code(scheduler::invalid_transition),
        help("Admit requires NEW, step requires RUNNING, requeue requires READY or RUNNING, retire requires TERMINATED.")
    )]
    InvalidTransition {
        pid: Pid,
        state: ProcessState,
        operation: Operation,
    },
}

impl SchedulerError {
    #[inline]
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    #[inline]
    pub(crate) fn invalid_transition(pid: Pid, state: ProcessState, operation: Operation) -> Self {
        Self::InvalidTransition {
            pid,
            state,
            operation,
        }
    }
}

/// A refused hand-off: the record comes back to the caller untouched
#[derive(Error, Debug)]
#[error("process {} rejected: {error}", .record.id())]
pub struct Rejected {
    pub record: ProcessRecord,
    pub error: SchedulerError,
}

impl Rejected {
    #[inline]
    pub(crate) fn new(record: ProcessRecord, error: SchedulerError) -> Self {
        Self { record, error }
    }

    /// Underlying error
    #[inline]
    pub fn error(&self) -> &SchedulerError {
        &self.error
    }

    /// Take back ownership of the record
    #[inline]
    pub fn into_record(self) -> ProcessRecord {
        self.record
    }

    #[inline]
    pub fn into_parts(self) -> (ProcessRecord, SchedulerError) {
        (self.record, self.error)
    }
}

impl From<Rejected> for SchedulerError {
    fn from(rejected: Rejected) -> Self {
        rejected.error
    }
}
