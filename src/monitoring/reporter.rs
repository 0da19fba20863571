/*!
 * Reporters
 * Consumers of scheduler events; they observe, never influence, scheduling
 */

use super::events::SchedulerEvent;
use crate::core::types::Pid;
use crate::process::core::types::ProcessSnapshot;
use tracing::{debug, info};

/// Receives lifecycle events from the dispatcher
pub trait Reporter {
    fn report(&mut self, event: &SchedulerEvent);
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _event: &SchedulerEvent) {}
}

/// Emits events as structured tracing records
///
/// Steps are logged at debug level; everything else at info.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for LogReporter {
    fn report(&mut self, event: &SchedulerEvent) {
        match event {
            SchedulerEvent::Admitted { snapshot } => info!(
                pid = snapshot.pid,
                work_total = snapshot.work_total,
                "Process added to ready queue"
            ),
            SchedulerEvent::Dispatched { snapshot } => {
                info!(pid = snapshot.pid, "Dispatching process")
            }
            SchedulerEvent::Stepped { snapshot, cycle } => debug!(
                pid = snapshot.pid,
                state = %snapshot.state,
                work_done = snapshot.work_done,
                work_total = snapshot.work_total,
                pc = snapshot.program_counter,
                cycle = cycle,
                "Executed one unit"
            ),
            SchedulerEvent::Preempted { snapshot } => info!(
                pid = snapshot.pid,
                work_done = snapshot.work_done,
                work_total = snapshot.work_total,
                "Time quantum expired, re-queuing"
            ),
            SchedulerEvent::Retired { snapshot } => info!(
                pid = snapshot.pid,
                work_done = snapshot.work_done,
                work_total = snapshot.work_total,
                "Process has terminated"
            ),
            SchedulerEvent::RunFinished { steps, cutoff } => {
                info!(steps = steps, cutoff = cutoff, "Scheduler simulation complete")
            }
        }
    }
}

/// Keeps every event in memory
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    events: Vec<SchedulerEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SchedulerEvent] {
        &self.events
    }

    /// Pids in the order they were dispatched, one entry per dispatch
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SchedulerEvent::Dispatched { snapshot } => Some(snapshot.pid),
                _ => None,
            })
            .collect()
    }

    /// Pids in the order they terminated
    pub fn termination_order(&self) -> Vec<Pid> {
        self.retired().iter().map(|s| s.pid).collect()
    }

    pub fn retired(&self) -> Vec<ProcessSnapshot> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SchedulerEvent::Retired { snapshot } => Some(*snapshot),
                _ => None,
            })
            .collect()
    }

    /// Every snapshot recorded for one process, oldest first
    pub fn history(&self, pid: Pid) -> Vec<ProcessSnapshot> {
        self.events
            .iter()
            .filter_map(SchedulerEvent::snapshot)
            .filter(|s| s.pid == pid)
            .copied()
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, event: &SchedulerEvent) {
        self.events.push(event.clone());
    }
}
