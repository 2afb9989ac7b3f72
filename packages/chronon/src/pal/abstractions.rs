use std::fmt::Debug;

use crate::{ClockId, Result};

/// Bindings for FFI calls and processor intrinsics that read clocks.
///
/// All clock reads go through this trait, enabling them to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    /// Reads an operating system clock as `seconds * 1e9 + nanoseconds`.
    ///
    /// Only called with ids for which [`ClockId::is_cpu_counter`] is false.
    fn clock_gettime_nanos(&self, clock: ClockId) -> Result<u64>;

    /// Bare cycle counter read, unordered with respect to surrounding instructions.
    fn read_counter(&self) -> u64;

    /// Serializing cycle counter read.
    fn read_counter_serialized(&self) -> u64;

    /// Serializing cycle counter read followed by a full memory fence.
    fn read_counter_fenced(&self) -> u64;
}
