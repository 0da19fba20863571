/*!
 * CPU Scheduler
 * Ready queue ownership, admission, dispatch, requeue, and retirement
 */

use crate::core::types::Pid;
use crate::process::record::ProcessRecord;
use ahash::AHashSet;
use log::info;
use std::collections::VecDeque;

mod operations;
mod policy;
mod shared;
mod stats;

pub use policy::{SchedulingPolicy, TimeQuantum};
pub use shared::SharedScheduler;
pub use stats::SchedulerStats;

use stats::Counters;

/// CPU Scheduler
///
/// Owns every record that is queued. A dispatched record is owned by the
/// caller until it is requeued or retired; the scheduler only remembers its
/// pid so ids stay unique while the record is alive, and so only a record it
/// handed out can come back.
#[derive(Debug)]
pub struct Scheduler {
    policy: SchedulingPolicy,

    // FIFO ready queue, only ever holds `Ready` records
    ready_queue: VecDeque<ProcessRecord>,

    // Pids admitted and not yet retired (queued or dispatched)
    live: AHashSet<Pid>,

    // Pids handed out by dispatch_next and not yet returned
    dispatched: AHashSet<Pid>,

    counters: Counters,
}

impl Scheduler {
    /// Create new scheduler with policy
    pub fn new(policy: SchedulingPolicy) -> Self {
        info!("Scheduler initialized: policy={}", policy);

        Self {
            policy,
            ready_queue: VecDeque::new(),
            live: AHashSet::new(),
            dispatched: AHashSet::new(),
            counters: Counters::default(),
        }
    }

    /// Create round-robin scheduler with a custom quantum
    pub fn with_quantum(quantum: TimeQuantum) -> Self {
        Self::new(SchedulingPolicy::round_robin(quantum))
    }

    /// Get current scheduling policy
    #[inline]
    pub fn policy(&self) -> SchedulingPolicy {
        self.policy
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulingPolicy::default())
    }
}
