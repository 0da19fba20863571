/*!
 * Scheduling Policy
 * Quantum configuration and the preemption rule applied by the run loop
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::DEFAULT_QUANTUM;
use crate::core::types::Cycles;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Time quantum, in steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum {
    units: Cycles,
}

impl TimeQuantum {
    /// Create new time quantum (must be positive)
    pub fn new(units: Cycles) -> SchedulerResult<Self> {
        if units == 0 {
            return Err(SchedulerError::invalid_argument(
                "time quantum must be at least one step",
            ));
        }
        Ok(Self { units })
    }

    #[inline(always)]
    pub const fn units(&self) -> Cycles {
        self.units
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self {
            units: DEFAULT_QUANTUM,
        }
    }
}

impl fmt::Display for TimeQuantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} steps", self.units)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let units = Cycles::deserialize(deserializer)?;
        Self::new(units).map_err(serde::de::Error::custom)
    }
}

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Preempt after a fixed number of steps and requeue at the tail
    RoundRobin { quantum: TimeQuantum },
    /// Never preempt; each dispatch runs until termination
    RunToCompletion,
}

impl SchedulingPolicy {
    #[inline]
    pub const fn round_robin(quantum: TimeQuantum) -> Self {
        Self::RoundRobin { quantum }
    }

    /// Parse from string representation
    pub fn from_str(s: &str) -> SchedulerResult<Self> {
        match s.to_lowercase().as_str() {
            "round_robin" | "roundrobin" | "rr" => Ok(Self::default()),
            "run_to_completion" | "fcfs" | "fifo" => Ok(Self::RunToCompletion),
            _ => Err(SchedulerError::invalid_argument(format!(
                "Invalid policy '{}'. Valid: round_robin, run_to_completion",
                s
            ))),
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin { .. } => "round_robin",
            Self::RunToCompletion => "run_to_completion",
        }
    }

    /// Steps granted per dispatch, `None` when unbounded
    #[inline]
    pub const fn time_slice(&self) -> Option<Cycles> {
        match self {
            Self::RoundRobin { quantum } => Some(quantum.units()),
            Self::RunToCompletion => None,
        }
    }

    /// Whether a record that has run `cycles` steps in this dispatch must yield
    #[inline]
    pub const fn quantum_expired(&self, cycles: Cycles) -> bool {
        match self {
            Self::RoundRobin { quantum } => cycles >= quantum.units(),
            Self::RunToCompletion => false,
        }
    }
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self::RoundRobin {
            quantum: TimeQuantum::default(),
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "round_robin({})", quantum),
            Self::RunToCompletion => f.write_str(self.as_str()),
        }
    }
}
