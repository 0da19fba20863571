/*!
 * Round-Robin PCB Scheduler
 * Process-control records cycled through a FIFO ready queue with a fixed quantum
 */

pub mod config;
pub mod core;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::config::{ConfigError, SimulationConfig};
pub use crate::core::errors::{Operation, Rejected, SchedulerError, SchedulerResult};
pub use crate::core::types::{Cycles, Pid, Work};
pub use monitoring::{
    init_tracing, LogReporter, NullReporter, RecordingReporter, Reporter, SchedulerEvent,
};
pub use process::{
    ContextLayout, Dispatcher, ExecutionContext, ProcessRecord, ProcessSnapshot, ProcessSpec,
    ProcessState, RunOutcome, RunSummary, Scheduler, SchedulerStats, SchedulingPolicy,
    SharedScheduler, StepOutcome, TimeQuantum,
};
