/*!
 * Process Core Types
 * Fundamental types shared by records, the scheduler and reporters
 */

pub mod types;

pub use types::*;
