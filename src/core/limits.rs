/*!
 * Simulator Defaults
 *
 * Default values read into explicit configuration at construction time.
 * Nothing here is mutable process-wide state.
 */

// =============================================================================
// SCHEDULING
// =============================================================================

/// Default round-robin time quantum, in steps
pub const DEFAULT_QUANTUM: u32 = 4;

// =============================================================================
// EXECUTION CONTEXT
// =============================================================================

/// Simulated general purpose registers per record
pub const DEFAULT_REGISTER_COUNT: usize = 8;

/// Simulated stack per record (1KB)
pub const DEFAULT_STACK_SIZE: usize = 1024;

// =============================================================================
// REFERENCE WORKLOAD
// =============================================================================

/// `(pid, work_total)` pairs admitted when no workload is configured
pub const REFERENCE_WORKLOAD: [(i64, i64); 3] = [(1, 11), (2, 16), (3, 13)];
