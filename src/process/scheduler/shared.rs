/*!
 * Shared Scheduler
 * Mutex-guarded scheduler handle for multiple concurrent drivers
 */

use super::{Scheduler, SchedulerStats, SchedulingPolicy};
use crate::core::errors::Rejected;
use crate::process::record::ProcessRecord;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one scheduler
///
/// A single mutex guards the ready queue, so admission, dispatch, requeue and
/// retirement are linearizable and the queue stays FIFO under contention.
#[derive(Debug, Clone)]
pub struct SharedScheduler {
    inner: Arc<Mutex<Scheduler>>,
}

impl SharedScheduler {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self::from(Scheduler::new(policy))
    }

    pub fn admit(&self, record: ProcessRecord) -> Result<(), Rejected> {
        self.inner.lock().admit(record)
    }

    pub fn dispatch_next(&self) -> Option<ProcessRecord> {
        self.inner.lock().dispatch_next()
    }

    pub fn requeue(&self, record: ProcessRecord) -> Result<(), Rejected> {
        self.inner.lock().requeue(record)
    }

    pub fn retire(&self, record: ProcessRecord) -> Result<ProcessRecord, Rejected> {
        self.inner.lock().retire(record)
    }

    pub fn is_idle(&self) -> bool {
        self.inner.lock().is_idle()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.inner.lock().policy()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.inner.lock().stats()
    }

    /// Run `f` with exclusive access to the scheduler
    pub fn with<T>(&self, f: impl FnOnce(&mut Scheduler) -> T) -> T {
        f(&mut self.inner.lock())
    }
}

impl From<Scheduler> for SharedScheduler {
    fn from(scheduler: Scheduler) -> Self {
        Self {
            inner: Arc::new(Mutex::new(scheduler)),
        }
    }
}

impl Default for SharedScheduler {
    fn default() -> Self {
        Self::from(Scheduler::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_admission_keeps_every_record() {
        let shared = SharedScheduler::default();

        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..25u32 {
                        let pid = t * 100 + i + 1;
                        shared.admit(ProcessRecord::create(pid, 1).unwrap()).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 100);

        // Each driver's admissions keep their relative order
        let order = shared.with(|s| s.queued_pids());
        for t in 0..4u32 {
            let mine: Vec<u32> = order.iter().copied().filter(|p| p / 100 == t).collect();
            let mut sorted = mine.clone();
            sorted.sort_unstable();
            assert_eq!(mine, sorted);
        }
    }
}
