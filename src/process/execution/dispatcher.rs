/*!
 * Dispatcher
 *
 * Drives the run loop: dispatch the head of the ready queue, step it until it
 * terminates or its time slice expires, then retire or requeue it.
 *
 * # Loop
 *
 * 1. With nothing dispatched, take the queue head. An empty queue ends the run.
 * 2. Step the dispatched record once and count the cycle.
 * 3. A terminated record is reported and retired.
 * 4. A record whose slice is used up goes back to the tail as `Ready`.
 * 5. Otherwise the same record keeps the CPU.
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::types::{Cycles, Pid, Work};
use crate::monitoring::{span_run, Reporter, SchedulerEvent};
use crate::process::context::ContextLayout;
use crate::process::core::types::{ProcessSnapshot, ProcessState, StepOutcome};
use crate::process::record::{ProcessRecord, ProcessSpec};
use crate::process::scheduler::{Scheduler, SchedulerStats};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Queue empty and nothing dispatched
    Completed,
    /// The step budget ran out; unfinished records are back in the queue
    CutoffReached,
}

/// Result of one run of the dispatch loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Every `step()` call, including terminating ones
    pub steps: u64,
    /// Steps that completed a unit of work
    pub work_units: Work,
    pub dispatches: u64,
    pub preemptions: u64,
    /// Final snapshots of retired records, in termination order
    pub retired: Vec<ProcessSnapshot>,
    pub stats: SchedulerStats,
}

impl RunSummary {
    pub fn termination_order(&self) -> Vec<Pid> {
        self.retired.iter().map(|s| s.pid).collect()
    }
}

/// Run-loop driver
#[derive(Debug, Clone, Copy, Default)]
pub struct Dispatcher {
    max_cycles: Option<u64>,
}

#[derive(Debug, Default)]
struct Tally {
    steps: u64,
    work_units: Work,
    dispatches: u64,
    preemptions: u64,
    retired: Vec<ProcessSnapshot>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after this many steps in total, even if work remains
    #[must_use]
    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    #[inline]
    pub fn max_cycles(&self) -> Option<u64> {
        self.max_cycles
    }

    /// Build and admit records in order
    ///
    /// Stops at the first invalid spec or refused admission; records admitted
    /// before it stay queued.
    pub fn admit_all<R: Reporter + ?Sized>(
        &self,
        scheduler: &mut Scheduler,
        specs: &[ProcessSpec],
        layout: ContextLayout,
        reporter: &mut R,
    ) -> SchedulerResult<usize> {
        for spec in specs {
            let record = spec.build(layout)?;
            self.admit(scheduler, record, reporter)?;
        }
        Ok(specs.len())
    }

    /// Admit one record and report it
    pub fn admit<R: Reporter + ?Sized>(
        &self,
        scheduler: &mut Scheduler,
        record: ProcessRecord,
        reporter: &mut R,
    ) -> SchedulerResult<()> {
        let mut snapshot = record.snapshot();
        scheduler.admit(record).map_err(SchedulerError::from)?;

        snapshot.state = ProcessState::Ready;
        reporter.report(&SchedulerEvent::Admitted { snapshot });
        Ok(())
    }

    /// Run until the queue drains or the step budget is spent
    pub fn run<R: Reporter + ?Sized>(
        &self,
        scheduler: &mut Scheduler,
        reporter: &mut R,
    ) -> SchedulerResult<RunSummary> {
        let policy = scheduler.policy();
        let span = span_run(policy, scheduler.len());
        let _entered = span.enter();

        let mut tally = Tally::default();
        let mut current: Option<ProcessRecord> = None;
        let mut cycles: Cycles = 0;
        let mut outcome = RunOutcome::Completed;

        loop {
            if self.budget_spent(tally.steps) && (current.is_some() || !scheduler.is_idle()) {
                if let Some(record) = current.take() {
                    warn!("Cycle budget exhausted while process {} was running", record.id());
                    scheduler.requeue(record).map_err(SchedulerError::from)?;
                }
                outcome = RunOutcome::CutoffReached;
                break;
            }

            let mut record = match current.take() {
                Some(record) => record,
                None => match scheduler.dispatch_next() {
                    Some(record) => {
                        cycles = 0;
                        tally.dispatches += 1;
                        reporter.report(&SchedulerEvent::Dispatched {
                            snapshot: record.snapshot(),
                        });
                        record
                    }
                    None => break,
                },
            };

            let step = record.step()?;
            cycles = next_cycle(cycles);
            tally.steps += 1;
            if step == StepOutcome::Progressed {
                tally.work_units += 1;
            }
            reporter.report(&SchedulerEvent::Stepped {
                snapshot: record.snapshot(),
                cycle: cycles,
            });

            if record.is_terminated() {
                let record = scheduler.retire(record).map_err(SchedulerError::from)?;
                let snapshot = record.snapshot();
                tally.retired.push(snapshot);
                reporter.report(&SchedulerEvent::Retired { snapshot });
            } else if policy.quantum_expired(cycles) {
                record.set_state(ProcessState::Ready);
                let snapshot = record.snapshot();
                scheduler.requeue(record).map_err(SchedulerError::from)?;
                tally.preemptions += 1;
                debug!("Process {} preempted after {} cycles", snapshot.pid, cycles);
                reporter.report(&SchedulerEvent::Preempted { snapshot });
            } else {
                current = Some(record);
            }
        }

        reporter.report(&SchedulerEvent::RunFinished {
            steps: tally.steps,
            cutoff: outcome == RunOutcome::CutoffReached,
        });
        info!(
            "Run finished ({:?}): {} steps, {} dispatches, {} preemptions, {} retired",
            outcome,
            tally.steps,
            tally.dispatches,
            tally.preemptions,
            tally.retired.len()
        );

        Ok(RunSummary {
            outcome,
            steps: tally.steps,
            work_units: tally.work_units,
            dispatches: tally.dispatches,
            preemptions: tally.preemptions,
            retired: tally.retired,
            stats: scheduler.stats(),
        })
    }

    #[inline]
    fn budget_spent(&self, steps: u64) -> bool {
        self.max_cycles.is_some_and(|max| steps >= max)
    }
}

/// Count one more step in the current dispatch
///
/// Saturates: an unpreempted record may outrun the counter's range.
#[inline]
fn next_cycle(cycles: Cycles) -> Cycles {
    cycles.saturating_add(1)
}
