/*!
 * Simulation Configuration
 *
 * Quantum, context layout, cycle budget and workload for one simulation run.
 * Values come from defaults, an optional JSON file, and environment overrides:
 *
 * - SCHED_POLICY: `round_robin` | `rr` | `run_to_completion` | `fcfs`
 * - SCHED_QUANTUM: positive step count (implies round robin)
 * - SCHED_MAX_CYCLES: total step budget
 * - SCHED_WORKLOAD: `pid:work` pairs, e.g. `1:11,2:16,3:13`
 */

use crate::core::errors::SchedulerError;
use crate::core::limits::REFERENCE_WORKLOAD;
use crate::process::context::ContextLayout;
use crate::process::record::ProcessSpec;
use crate::process::scheduler::{SchedulingPolicy, TimeQuantum};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {var}: '{value}'")]
    InvalidValue { var: &'static str, value: String },

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything a driver needs to run one simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SimulationConfig {
    pub policy: SchedulingPolicy,
    pub layout: ContextLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_cycles: Option<u64>,
    pub processes: Vec<ProcessSpec>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            policy: SchedulingPolicy::default(),
            layout: ContextLayout::default(),
            max_cycles: None,
            processes: REFERENCE_WORKLOAD
                .iter()
                .copied()
                .map(ProcessSpec::from)
                .collect(),
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file; omitted fields keep their defaults
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply SCHED_* environment variables
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        if let Some(value) = lookup("SCHED_POLICY") {
            // Naming the policy does not reset a quantum already configured
            self.policy = match (SchedulingPolicy::from_str(value.trim())?, self.policy) {
                (SchedulingPolicy::RoundRobin { .. }, current @ SchedulingPolicy::RoundRobin { .. }) => {
                    current
                }
                (parsed, _) => parsed,
            };
        }

        if let Some(value) = lookup("SCHED_QUANTUM") {
            let units = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "SCHED_QUANTUM",
                value: value.clone(),
            })?;
            self.policy = SchedulingPolicy::round_robin(TimeQuantum::new(units)?);
        }

        if let Some(value) = lookup("SCHED_MAX_CYCLES") {
            let max = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                var: "SCHED_MAX_CYCLES",
                value: value.clone(),
            })?;
            self.max_cycles = Some(max);
        }

        if let Some(value) = lookup("SCHED_WORKLOAD") {
            self.processes = parse_workload(&value)?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.layout.validate()?;
        if self.max_cycles == Some(0) {
            return Err(ConfigError::InvalidValue {
                var: "max_cycles",
                value: "0".into(),
            });
        }
        Ok(())
    }

    /// Total work the workload asks for (negative entries ignored, saturating)
    pub fn total_work(&self) -> u64 {
        self.processes
            .iter()
            .map(|p| p.work_total.max(0) as u64)
            .fold(0u64, u64::saturating_add)
    }
}

/// Parse `pid:work` pairs separated by commas
pub fn parse_workload(raw: &str) -> ConfigResult<Vec<ProcessSpec>> {
    let invalid = || ConfigError::InvalidValue {
        var: "SCHED_WORKLOAD",
        value: raw.to_string(),
    };

    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, work) = entry.split_once(':').ok_or_else(invalid)?;
            let id = id.trim().parse().map_err(|_| invalid())?;
            let work = work.trim().parse().map_err(|_| invalid())?;
            Ok(ProcessSpec::new(id, work))
        })
        .collect()
}
