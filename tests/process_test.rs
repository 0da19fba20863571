/*!
 * Process Record Tests
 * Creation, stepping, and snapshot behaviour of individual records
 */

use pretty_assertions::assert_eq;
use rr_pcb_scheduler::{
    ContextLayout, ProcessRecord, ProcessSpec, ProcessState, Scheduler, SchedulerError,
    StepOutcome,
};

/// Admit and dispatch a single record so it is `Running`
fn dispatched(pid: u32, work: u64) -> (Scheduler, ProcessRecord) {
    let mut scheduler = Scheduler::default();
    scheduler.admit(ProcessRecord::create(pid, work).unwrap()).unwrap();
    let record = scheduler.dispatch_next().unwrap();
    (scheduler, record)
}

#[test]
fn test_new_record_shape() {
    let record = ProcessRecord::create(101, 11).unwrap();

    assert_eq!(record.state(), ProcessState::New);
    assert_eq!(record.work_done(), 0);
    assert_eq!(record.remaining_work(), 11);
    assert_eq!(record.context().program_counter(), 0);
    assert_eq!(record.context().registers(), &[0i64; 8]);
    assert_eq!(record.context().stack_len(), 1024);
    assert_eq!(record.context().stack_top(), 1023);
}

#[test]
fn test_custom_layout() {
    let record = ProcessRecord::with_layout(3, 1, ContextLayout::new(2, 16)).unwrap();
    assert_eq!(record.context().registers().len(), 2);
    assert_eq!(record.context().stack_len(), 16);

    let err = ProcessRecord::with_layout(3, 1, ContextLayout::new(0, 16)).unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidArgument(_)));
}

#[test]
fn test_invalid_construction_input() {
    let layout = ContextLayout::default();

    for (id, work) in [(0, 4), (-1, 4), (1, -4)] {
        let err = ProcessSpec::new(id, work).build(layout).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidArgument(_)), "{id}:{work}");
    }
}

#[test]
fn test_execution_is_observable() {
    let (_scheduler, mut record) = dispatched(5, 3);

    for _ in 0..3 {
        assert_eq!(record.step().unwrap(), StepOutcome::Progressed);
    }

    assert_eq!(record.work_done(), 3);
    assert_eq!(record.context().program_counter(), 3);
    assert_eq!(record.context().accumulator(), 15);
    assert_eq!(&record.context().stack()[1..4], &[1u8, 2, 3]);
}

#[test]
fn test_termination_needs_one_more_step() {
    let (_scheduler, mut record) = dispatched(1, 1);

    assert_eq!(record.step().unwrap(), StepOutcome::Progressed);
    assert_eq!(record.state(), ProcessState::Running);
    assert_eq!(record.work_done(), record.work_total());

    assert_eq!(record.step().unwrap(), StepOutcome::Terminated);
    assert_eq!(record.state(), ProcessState::Terminated);
    assert_eq!(record.work_done(), 1);
}

#[test]
fn test_step_after_termination_is_rejected() {
    let (_scheduler, mut record) = dispatched(1, 0);
    record.step().unwrap();

    let before = record.snapshot();
    assert!(record.step().is_err());
    assert_eq!(record.snapshot(), before);
}

#[test]
fn test_snapshot_is_idempotent() {
    let (_scheduler, mut record) = dispatched(2, 4);
    record.step().unwrap();

    let first = record.snapshot();
    let second = record.snapshot();
    assert_eq!(first, second);
    assert_eq!(first.state, ProcessState::Running);
    assert_eq!(first.work_done, 1);
    assert_eq!(first.remaining_work(), 3);
}

#[test]
fn test_snapshot_serializes_for_reporters() {
    let record = ProcessRecord::create(9, 2).unwrap();
    let json = serde_json::to_value(record.snapshot()).unwrap();

    assert_eq!(json["pid"], 9);
    assert_eq!(json["state"], "new");
    assert_eq!(json["work_total"], 2);
}
