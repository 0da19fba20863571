/*!
 * Scheduler Core Operations
 * Admit, dispatch, requeue, and retire process records
 */

use super::Scheduler;
use crate::core::errors::{Operation, Rejected, SchedulerError};
use crate::core::types::Pid;
use crate::process::core::types::{ProcessSnapshot, ProcessState};
use crate::process::record::ProcessRecord;
use log::{debug, info, warn};

impl Scheduler {
    /// Admit a `New` record at the tail of the ready queue
    pub fn admit(&mut self, mut record: ProcessRecord) -> Result<(), Rejected> {
        let pid = record.id();

        if record.state() != ProcessState::New {
            let err = SchedulerError::invalid_transition(pid, record.state(), Operation::Admit);
            return Err(self.reject(record, err));
        }
        if self.live.contains(&pid) {
            let err = SchedulerError::invalid_argument(format!(
                "process {} is already managed by this scheduler",
                pid
            ));
            return Err(self.reject(record, err));
        }

        record.set_state(ProcessState::Ready);
        self.live.insert(pid);
        self.ready_queue.push_back(record);
        self.counters.admitted += 1;

        info!("Process {} admitted (queue length: {})", pid, self.ready_queue.len());
        Ok(())
    }

    /// Remove the head of the ready queue and mark it `Running`
    ///
    /// Returns `None` when the queue is empty.
    pub fn dispatch_next(&mut self) -> Option<ProcessRecord> {
        let mut record = self.ready_queue.pop_front()?;
        record.set_state(ProcessState::Running);
        self.dispatched.insert(record.id());
        self.counters.dispatched += 1;

        debug!("Dispatching process {}", record.id());
        Some(record)
    }

    /// Return a preempted record to the tail of the ready queue
    ///
    /// Accepts `Running` or `Ready` records this scheduler dispatched and has
    /// not taken back yet; anything else, terminated records in particular, is
    /// handed back unchanged.
    pub fn requeue(&mut self, mut record: ProcessRecord) -> Result<(), Rejected> {
        let pid = record.id();

        if !matches!(record.state(), ProcessState::Running | ProcessState::Ready) {
            let err = SchedulerError::invalid_transition(pid, record.state(), Operation::Requeue);
            return Err(self.reject(record, err));
        }
        if !self.dispatched.remove(&pid) {
            let err = SchedulerError::invalid_argument(format!(
                "process {} is not dispatched from this scheduler",
                pid
            ));
            return Err(self.reject(record, err));
        }

        record.set_state(ProcessState::Ready);
        self.ready_queue.push_back(record);
        self.counters.requeued += 1;

        debug!("Process {} re-queued (queue length: {})", pid, self.ready_queue.len());
        Ok(())
    }

    /// Release a terminated record from scheduler bookkeeping
    pub fn retire(&mut self, record: ProcessRecord) -> Result<ProcessRecord, Rejected> {
        let pid = record.id();

        if !record.is_terminated() {
            let err = SchedulerError::invalid_transition(pid, record.state(), Operation::Retire);
            return Err(self.reject(record, err));
        }
        if !self.dispatched.remove(&pid) {
            let err = SchedulerError::invalid_argument(format!(
                "process {} is not dispatched from this scheduler",
                pid
            ));
            return Err(self.reject(record, err));
        }
        self.live.remove(&pid);

        self.counters.retired += 1;
        info!(
            "Process {} retired after {} units of work",
            pid,
            record.work_done()
        );
        Ok(record)
    }

    /// True iff the ready queue is empty
    ///
    /// A dispatched record is not counted; callers track it themselves.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.ready_queue.is_empty()
    }

    /// Get number of queued records
    #[inline]
    pub fn len(&self) -> usize {
        self.ready_queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ready_queue.is_empty()
    }

    /// Whether `pid` is queued or dispatched under this scheduler
    #[inline]
    pub fn is_managing(&self, pid: Pid) -> bool {
        self.live.contains(&pid)
    }

    /// Pids in dispatch order
    pub fn queued_pids(&self) -> Vec<Pid> {
        self.ready_queue.iter().map(ProcessRecord::id).collect()
    }

    /// Snapshots of queued records in dispatch order
    pub fn snapshots(&self) -> Vec<ProcessSnapshot> {
        self.ready_queue.iter().map(ProcessRecord::snapshot).collect()
    }

    fn reject(&mut self, record: ProcessRecord, error: SchedulerError) -> Rejected {
        warn!("Rejected operation on process {}: {}", record.id(), error);
        self.counters.rejected += 1;
        Rejected::new(record, error)
    }
}
