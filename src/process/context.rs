/*!
 * Execution Context
 * Simulated register bank and stack owned by a single process record
 */

use crate::core::errors::{SchedulerError, SchedulerResult};
use crate::core::limits::{DEFAULT_REGISTER_COUNT, DEFAULT_STACK_SIZE};
use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// Size of a record's simulated context, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct ContextLayout {
    pub registers: usize,
    pub stack_size: usize,
}

impl ContextLayout {
    #[inline]
    #[must_use]
    pub const fn new(registers: usize, stack_size: usize) -> Self {
        Self {
            registers,
            stack_size,
        }
    }

    pub fn validate(&self) -> SchedulerResult<()> {
        if self.registers == 0 {
            return Err(SchedulerError::invalid_argument(
                "context layout needs at least one register",
            ));
        }
        if self.stack_size == 0 {
            return Err(SchedulerError::invalid_argument(
                "context layout needs a non-empty stack",
            ));
        }
        Ok(())
    }
}

impl Default for ContextLayout {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTER_COUNT, DEFAULT_STACK_SIZE)
    }
}

/// Simulated CPU context
///
/// Buffers are allocated once from a validated [`ContextLayout`] and are never
/// resized. Only [`ExecutionContext::advance`] mutates them.
#[derive(Debug, PartialEq, Eq)]
pub struct ExecutionContext {
    program_counter: u64,
    registers: Box<[i64]>,
    stack: Box<[u8]>,
}

impl ExecutionContext {
    pub(crate) fn new(layout: ContextLayout) -> SchedulerResult<Self> {
        layout.validate()?;
        Ok(Self {
            program_counter: 0,
            registers: vec![0; layout.registers].into_boxed_slice(),
            stack: vec![0; layout.stack_size].into_boxed_slice(),
        })
    }

    /// Execute one simulated instruction on behalf of `pid`
    pub(crate) fn advance(&mut self, pid: Pid) {
        self.program_counter += 1;
        self.registers[0] = self.registers[0].wrapping_add(i64::from(pid));

        let slot = (self.program_counter % self.stack.len() as u64) as usize;
        self.stack[slot] = self.program_counter as u8;
    }

    #[inline]
    pub fn program_counter(&self) -> u64 {
        self.program_counter
    }

    #[inline]
    pub fn registers(&self) -> &[i64] {
        &self.registers
    }

    /// Accumulator register
    #[inline]
    pub fn accumulator(&self) -> i64 {
        self.registers[0]
    }

    #[inline]
    pub fn stack(&self) -> &[u8] {
        &self.stack
    }

    #[inline]
    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    /// Offset of the top of the stack from its base
    #[inline]
    pub fn stack_top(&self) -> usize {
        self.stack.len() - 1
    }
}
