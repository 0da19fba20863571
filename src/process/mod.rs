/*!
 * Process Module
 * Process records, scheduling, and dispatch
 */

pub mod context;
pub mod core;
pub mod execution;
pub mod record;
pub mod scheduler;

// Re-export for convenience
pub use self::core::{ProcessSnapshot, ProcessState, StepOutcome};
pub use context::{ContextLayout, ExecutionContext};
pub use execution::{Dispatcher, RunOutcome, RunSummary};
pub use record::{ProcessRecord, ProcessSpec};
pub use scheduler::{
    Scheduler, SchedulerStats, SchedulingPolicy, SharedScheduler, TimeQuantum,
};
