/*!
 * Scheduler Tests
 * Ready queue admission, dispatch, requeue, and retirement
 */

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rr_pcb_scheduler::{
    Operation, ProcessRecord, ProcessState, Scheduler, SchedulerError, SchedulingPolicy,
    SharedScheduler, TimeQuantum,
};
use std::thread;

fn new_record(pid: u32, work: u64) -> ProcessRecord {
    ProcessRecord::create(pid, work).unwrap()
}

#[test]
fn test_fifo_dispatch_order() {
    let mut scheduler = Scheduler::default();
    for pid in [5, 3, 9, 1] {
        scheduler.admit(new_record(pid, 2)).unwrap();
    }

    assert_eq!(scheduler.len(), 4);

    let order: Vec<u32> = std::iter::from_fn(|| scheduler.dispatch_next())
        .map(|r| r.id())
        .collect();
    assert_eq!(order, vec![5, 3, 9, 1]);
    assert!(scheduler.is_idle());
}

#[test]
fn test_admission_sets_ready() {
    let mut scheduler = Scheduler::default();
    scheduler.admit(new_record(1, 3)).unwrap();

    let snapshots = scheduler.snapshots();
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].state, ProcessState::Ready);
    assert_eq!(snapshots[0].work_done, 0);
}

#[test]
fn test_dispatch_sets_running() {
    let mut scheduler = Scheduler::default();
    scheduler.admit(new_record(1, 3)).unwrap();

    let record = scheduler.dispatch_next().unwrap();
    assert_eq!(record.state(), ProcessState::Running);
    assert!(scheduler.is_managing(1));
}

#[test]
fn test_step_before_dispatch_is_rejected() {
    let mut record = new_record(1, 3);

    let err = record.step().unwrap_err();
    assert_eq!(
        err,
        SchedulerError::InvalidTransition {
            pid: 1,
            state: ProcessState::New,
            operation: Operation::Step,
        }
    );
    assert_eq!(record.work_done(), 0);

    // Still admissible afterwards
    let mut scheduler = Scheduler::default();
    scheduler.admit(record).unwrap();
    let snapshot = scheduler.snapshots()[0];
    assert_eq!(snapshot.state, ProcessState::Ready);
    assert_eq!(snapshot.work_done, 0);
}

#[test]
fn test_requeue_terminated_leaves_queue_untouched() {
    let mut scheduler = Scheduler::default();
    scheduler.admit(new_record(1, 0)).unwrap();
    scheduler.admit(new_record(2, 1)).unwrap();
    scheduler.admit(new_record(3, 1)).unwrap();

    let mut zero = scheduler.dispatch_next().unwrap();
    zero.step().unwrap();

    let before = scheduler.queued_pids();
    let rejected = scheduler.requeue(zero).unwrap_err();

    assert_eq!(
        rejected.error(),
        &SchedulerError::InvalidTransition {
            pid: 1,
            state: ProcessState::Terminated,
            operation: Operation::Requeue,
        }
    );
    assert_eq!(scheduler.queued_pids(), before);
    assert!(rejected.record.is_terminated());
}

#[test]
fn test_admit_twice_is_rejected() {
    let mut scheduler = Scheduler::default();
    scheduler.admit(new_record(1, 2)).unwrap();
    let record = scheduler.dispatch_next().unwrap();

    let rejected = scheduler.admit(record).unwrap_err();
    let (record, err) = rejected.into_parts();
    assert!(matches!(
        err,
        SchedulerError::InvalidTransition {
            operation: Operation::Admit,
            state: ProcessState::Running,
            ..
        }
    ));

    // Caller still owns it and can hand it back properly
    scheduler.requeue(record).unwrap();
    assert_eq!(scheduler.queued_pids(), vec![1]);
    assert_eq!(scheduler.stats().rejected, 1);
}

#[test]
fn test_is_idle_independent_of_dispatched() {
    let mut scheduler = Scheduler::with_quantum(TimeQuantum::new(2).unwrap());
    assert!(scheduler.is_idle());

    scheduler.admit(new_record(1, 5)).unwrap();
    assert!(!scheduler.is_idle());

    let current = scheduler.dispatch_next().unwrap();
    assert!(scheduler.is_idle());

    scheduler.requeue(current).unwrap();
    assert!(!scheduler.is_idle());
}

#[test]
fn test_policy_is_configurable() {
    let scheduler = Scheduler::new(SchedulingPolicy::RunToCompletion);
    assert_eq!(scheduler.policy().time_slice(), None);

    let scheduler = Scheduler::with_quantum(TimeQuantum::new(7).unwrap());
    assert_eq!(scheduler.policy().time_slice(), Some(7));
}

#[test]
fn test_shared_scheduler_concurrent_drivers() {
    let shared = SharedScheduler::new(SchedulingPolicy::round_robin(TimeQuantum::new(3).unwrap()));
    let work = [7u64, 1, 12, 0, 5, 9, 4, 3];
    for (i, w) in work.iter().enumerate() {
        shared.admit(new_record(i as u32 + 1, *w)).unwrap();
    }

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut done = Vec::new();
                while let Some(mut record) = shared.dispatch_next() {
                    let mut cycles = 0;
                    loop {
                        record.step().unwrap();
                        cycles += 1;
                        if record.is_terminated() || shared.policy().quantum_expired(cycles) {
                            break;
                        }
                    }
                    if record.is_terminated() {
                        done.push(shared.retire(record).unwrap());
                    } else {
                        shared.requeue(record).unwrap();
                    }
                }
                done
            })
        })
        .collect();

    let mut finished: Vec<ProcessRecord> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    finished.sort_by_key(ProcessRecord::id);

    assert_eq!(finished.len(), work.len());
    for (record, w) in finished.iter().zip(work) {
        assert_eq!(record.work_done(), w);
    }
    assert!(shared.is_empty());
    assert_eq!(shared.stats().live, 0);
}

proptest! {
    #[test]
    fn prop_queue_length_and_order_match_admissions(pids in proptest::collection::hash_set(1u32..10_000, 0..50)) {
        let pids: Vec<u32> = pids.into_iter().collect();
        let mut scheduler = Scheduler::default();
        for pid in &pids {
            scheduler.admit(new_record(*pid, 1)).unwrap();
        }

        prop_assert_eq!(scheduler.len(), pids.len());

        let dequeued: Vec<u32> = std::iter::from_fn(|| scheduler.dispatch_next())
            .map(|r| r.id())
            .collect();
        prop_assert_eq!(dequeued, pids);
    }
}
