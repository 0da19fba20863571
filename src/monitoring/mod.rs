/*!
 * Monitoring
 * Scheduler events, reporters, and tracing setup
 */

mod events;
mod reporter;
mod tracer;

pub use events::SchedulerEvent;
pub use reporter::{LogReporter, NullReporter, RecordingReporter, Reporter};
pub use tracer::{init_tracing, span_run};
