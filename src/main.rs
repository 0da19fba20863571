/*!
 * Scheduler Simulator - Main Entry Point
 *
 * Usage: scheduler-sim [config.json]
 *
 * Without a config file the reference workload runs with a quantum of 4.
 * SCHED_* environment variables override either source.
 */

use anyhow::Context;
use tracing::info;

use rr_pcb_scheduler::{init_tracing, Dispatcher, LogReporter, Scheduler, SimulationConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => SimulationConfig::load(&path)
            .with_context(|| format!("loading simulation config from {}", path))?,
        None => SimulationConfig::default(),
    }
    .with_env_overrides()?;
    config.validate()?;

    info!(
        policy = %config.policy,
        processes = config.processes.len(),
        total_work = config.total_work(),
        max_cycles = ?config.max_cycles,
        "Starting scheduler simulation"
    );

    let mut scheduler = Scheduler::new(config.policy);
    let dispatcher = Dispatcher::new().with_max_cycles(config.max_cycles);
    let mut reporter = LogReporter::new();

    dispatcher.admit_all(&mut scheduler, &config.processes, config.layout, &mut reporter)?;
    let summary = dispatcher.run(&mut scheduler, &mut reporter)?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
