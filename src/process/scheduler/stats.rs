/*!
 * Scheduler Statistics
 * Track and report scheduler bookkeeping counters
 */

use super::policy::SchedulingPolicy;
use super::Scheduler;
use serde::{Deserialize, Serialize};

/// Point-in-time scheduler counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SchedulerStats {
    pub admitted: u64,
    pub dispatched: u64,
    pub requeued: u64,
    pub retired: u64,
    pub rejected: u64,
    pub queued: usize,
    pub live: usize,
    pub policy: SchedulingPolicy,
}

/// Running counters owned by the scheduler
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct Counters {
    pub admitted: u64,
    pub dispatched: u64,
    pub requeued: u64,
    pub retired: u64,
    pub rejected: u64,
}

impl Scheduler {
    /// Get scheduler statistics
    pub fn stats(&self) -> SchedulerStats {
        SchedulerStats {
            admitted: self.counters.admitted,
            dispatched: self.counters.dispatched,
            requeued: self.counters.requeued,
            retired: self.counters.retired,
            rejected: self.counters.rejected,
            queued: self.ready_queue.len(),
            live: self.live.len(),
            policy: self.policy,
        }
    }
}
