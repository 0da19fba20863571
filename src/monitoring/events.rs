/*!
 * Scheduler Events
 * Strongly-typed lifecycle events handed to reporters
 */

use crate::core::types::{Cycles, Pid};
use crate::process::core::types::ProcessSnapshot;
use serde::{Deserialize, Serialize};

/// Lifecycle event carrying a read-only snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SchedulerEvent {
    Admitted {
        snapshot: ProcessSnapshot,
    },
    Dispatched {
        snapshot: ProcessSnapshot,
    },
    Stepped {
        snapshot: ProcessSnapshot,
        /// Steps taken so far in the current dispatch
        cycle: Cycles,
    },
    Preempted {
        snapshot: ProcessSnapshot,
    },
    Retired {
        snapshot: ProcessSnapshot,
    },
    /// The run loop returned control to the driver
    RunFinished {
        steps: u64,
        cutoff: bool,
    },
}

impl SchedulerEvent {
    /// Process the event refers to, if any
    pub fn pid(&self) -> Option<Pid> {
        self.snapshot().map(|s| s.pid)
    }

    pub fn snapshot(&self) -> Option<&ProcessSnapshot> {
        match self {
            Self::Admitted { snapshot }
            | Self::Dispatched { snapshot }
            | Self::Stepped { snapshot, .. }
            | Self::Preempted { snapshot }
            | Self::Retired { snapshot } => Some(snapshot),
            Self::RunFinished { .. } => None,
        }
    }
}
