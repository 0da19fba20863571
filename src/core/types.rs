/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Units of simulated work
pub type Work = u64;

/// Number of consecutive steps granted to one dispatch
pub type Cycles = u32;
