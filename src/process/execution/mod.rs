/*!
 * Process Execution
 * Run loop that steps dispatched records under the scheduling policy
 */

pub mod dispatcher;

// Re-export public types
pub use dispatcher::{Dispatcher, RunOutcome, RunSummary};
