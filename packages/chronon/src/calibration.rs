//! Calibration of CPU cycle counters against operating system clocks.

use std::num::NonZero;
use std::time::Duration;

use tracing::{debug, trace};

use crate::pal::{Bindings, BindingsFacade};
use crate::units::NANOS_PER_SECOND;
use crate::{ClockId, Result};

/// Calibration windows shorter than this give unreliable frequency estimates.
pub const MIN_CALIBRATION_WINDOW: Duration = Duration::from_millis(50);

const DEFAULT_OFFSET_SAMPLES: NonZero<usize> =
    const { NonZero::new(4).expect("literal is non-zero") };

/// Settings for measuring a CPU counter's frequency and epoch offset.
///
/// # Examples
///
/// ```
/// use std::num::NonZero;
/// use std::time::Duration;
///
/// use chronon::CalibrationConfig;
///
/// let config = CalibrationConfig::new()
///     .window(Duration::from_millis(200))
///     .offset_samples(NonZero::new(8).unwrap());
///
/// assert_eq!(config.window_duration(), Duration::from_millis(200));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CalibrationConfig {
    window: Duration,
    offset_samples: NonZero<usize>,
}

impl CalibrationConfig {
    /// The default configuration: a 50 ms frequency window and 4 offset sample pairs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window: MIN_CALIBRATION_WINDOW,
            offset_samples: DEFAULT_OFFSET_SAMPLES,
        }
    }

    /// Sets how long to spin while measuring the counter frequency.
    ///
    /// Longer windows give more precise estimates. Windows shorter than
    /// [`MIN_CALIBRATION_WINDOW`] are raised to it when calibration runs.
    #[must_use]
    pub const fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Sets how many sample pairs are taken in each read order when estimating the epoch offset.
    #[must_use]
    pub const fn offset_samples(mut self, samples: NonZero<usize>) -> Self {
        self.offset_samples = samples;
        self
    }

    /// The configured frequency window, before clamping.
    #[must_use]
    pub const fn window_duration(&self) -> Duration {
        self.window
    }

    /// The configured number of offset sample pairs per read order.
    #[must_use]
    pub const fn offset_sample_count(&self) -> NonZero<usize> {
        self.offset_samples
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The measured relation between a CPU counter and wall-clock time.
///
/// The counter frequency is assumed to be stable, so a calibration is measured once and then
/// reused for every reading of the counter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Calibration {
    ticks_per_second: f64,
    epoch_offset_nanos: i64,
}

impl Calibration {
    /// Measures the counter frequency and epoch offset of this processor.
    ///
    /// Blocks the calling thread for at least the configured window, spinning rather than
    /// sleeping.
    ///
    /// # Errors
    ///
    /// Returns an error if the monotonic or real-time operating system clock cannot be read.
    pub fn measure(config: &CalibrationConfig) -> Result<Self> {
        Self::measure_with(&BindingsFacade::real(), config)
    }

    pub(crate) fn measure_with(bindings: &BindingsFacade, config: &CalibrationConfig) -> Result<Self> {
        let ticks_per_second = frequency_with(bindings, config.window)?;
        let epoch_offset_nanos =
            epoch_offset_with(bindings, ticks_per_second, config.offset_samples)?;

        Ok(Self {
            ticks_per_second,
            epoch_offset_nanos,
        })
    }

    /// Creates a calibration from previously measured values.
    #[must_use]
    pub const fn from_parts(ticks_per_second: f64, epoch_offset_nanos: i64) -> Self {
        Self {
            ticks_per_second,
            epoch_offset_nanos,
        }
    }

    /// Counter ticks per second.
    #[must_use]
    pub const fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }

    /// Nanoseconds to add to counter-derived time to obtain nanoseconds since the Unix epoch.
    #[must_use]
    pub const fn epoch_offset_nanos(&self) -> i64 {
        self.epoch_offset_nanos
    }

    /// Converts a signed tick count into nanoseconds.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        reason = "precision is bounded by the frequency estimate anyway"
    )]
    pub fn ticks_to_nanos(&self, ticks: i64) -> i64 {
        (ticks as f64 / self.ticks_per_second * NANOS_PER_SECOND as f64).round() as i64
    }

    /// Converts a raw counter value into estimated nanoseconds since the Unix epoch.
    #[must_use]
    pub fn counter_to_wall_nanos(&self, counter: u64) -> i64 {
        counter_nanos(counter, self.ticks_per_second).wrapping_add(self.epoch_offset_nanos)
    }
}

/// Measures the CPU counter frequency in ticks per second.
///
/// Pairs a fenced counter read with a monotonic clock read, spins until the monotonic clock has
/// advanced by `window` (at least [`MIN_CALIBRATION_WINDOW`]) and then takes a second pair. The
/// thread spins instead of sleeping because a suspension would stretch the wall-clock delta
/// between the reads of a pair and bias the result.
///
/// # Errors
///
/// Returns an error if the monotonic clock cannot be read.
pub fn calibrate_frequency(window: Duration) -> Result<f64> {
    frequency_with(&BindingsFacade::real(), window)
}

/// Estimates the offset in nanoseconds between counter-derived time and the Unix epoch.
///
/// Reads 4 counter-then-clock pairs followed by 4 clock-then-counter pairs so the fixed latency
/// between the two reads cancels out, then subtracts the averaged counter time from the averaged
/// real-time clock reading. Expect an error in the order of microseconds.
///
/// # Errors
///
/// Returns an error if the real-time clock cannot be read.
pub fn epoch_offset(ticks_per_second: f64) -> Result<i64> {
    epoch_offset_with(
        &BindingsFacade::real(),
        ticks_per_second,
        DEFAULT_OFFSET_SAMPLES,
    )
}

#[cfg_attr(test, mutants::skip)] // Mutating the spin condition only changes how long we wait.
#[expect(
    clippy::cast_precision_loss,
    reason = "deltas over a calibration window are far below 2^52"
)]
fn frequency_with(bindings: &BindingsFacade, window: Duration) -> Result<f64> {
    let window = window.max(MIN_CALIBRATION_WINDOW);
    let window_nanos = u64::try_from(window.as_nanos()).unwrap_or(u64::MAX);

    let start_ticks = bindings.read_counter_fenced();
    let start_nanos = bindings.clock_gettime_nanos(ClockId::Monotonic)?;

    loop {
        let now = bindings.clock_gettime_nanos(ClockId::Monotonic)?;

        if now.saturating_sub(start_nanos) >= window_nanos {
            break;
        }
    }

    let end_ticks = bindings.read_counter_fenced();
    let end_nanos = bindings.clock_gettime_nanos(ClockId::Monotonic)?;

    let elapsed_ticks = end_ticks.wrapping_sub(start_ticks) as f64;
    let elapsed_nanos = end_nanos.saturating_sub(start_nanos) as f64;

    let ticks_per_second = elapsed_ticks / elapsed_nanos * NANOS_PER_SECOND as f64;

    debug!(
        ticks_per_second,
        window_nanos,
        elapsed_nanos,
        "calibrated CPU counter frequency"
    );

    Ok(ticks_per_second)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "averages of u64 readings fit in u64 and real-time nanoseconds fit in i64"
)]
fn epoch_offset_with(
    bindings: &BindingsFacade,
    ticks_per_second: f64,
    samples: NonZero<usize>,
) -> Result<i64> {
    let mut counter_sum: u128 = 0;
    let mut wall_sum: u128 = 0;

    for _ in 0..samples.get() {
        let counter = bindings.read_counter_fenced();
        let wall = bindings.clock_gettime_nanos(ClockId::Realtime)?;

        counter_sum = counter_sum.wrapping_add(u128::from(counter));
        wall_sum = wall_sum.wrapping_add(u128::from(wall));
    }

    for _ in 0..samples.get() {
        let wall = bindings.clock_gettime_nanos(ClockId::Realtime)?;
        let counter = bindings.read_counter_fenced();

        counter_sum = counter_sum.wrapping_add(u128::from(counter));
        wall_sum = wall_sum.wrapping_add(u128::from(wall));
    }

    let count = (samples.get() as u128).wrapping_mul(2);

    // Both sums are over at least two readings, so `count` is never zero.
    let counter_average = counter_sum.checked_div(count).unwrap_or_default() as u64;
    let wall_average = wall_sum.checked_div(count).unwrap_or_default() as u64 as i64;

    trace!(counter_average, wall_average, "averaged epoch offset samples");

    let offset = wall_average.wrapping_sub(counter_nanos(counter_average, ticks_per_second));

    debug!(
        epoch_offset_nanos = offset,
        ticks_per_second, "estimated CPU counter epoch offset"
    );

    Ok(offset)
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "counter values lose at most a few ticks of precision as f64"
)]
fn counter_nanos(counter: u64, ticks_per_second: f64) -> i64 {
    (counter as f64 / ticks_per_second * NANOS_PER_SECOND as f64).round() as i64
}
