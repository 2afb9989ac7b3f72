use tracing::debug;

use crate::pal::BindingsFacade;
use crate::units::NANOS_PER_SECOND;
use crate::{Calibration, CalibrationConfig, Moment, MomentDiff, Result, TickSource};

/// Reads ticks from the tick source `S`.
///
/// Operating system clocks tick in nanoseconds. CPU counter clocks tick at the processor's counter
/// frequency, which is calibrated once when the clock is created: expect construction of a CPU
/// counter clock to block the calling thread for at least 50 milliseconds.
///
/// The clock remembers the moment of its most recent read, which [`last()`][Self::last] returns
/// without touching the hardware. A clock is not meant to be shared between threads for reading;
/// create one per thread instead.
///
/// # Examples
///
/// ```
/// use chronon::{Clock, Realtime, Timestamp};
///
/// let mut clock = Clock::<Realtime>::new()?;
/// let now = clock.now()?;
///
/// let timestamp = Timestamp::new(clock.wall_nanos(now));
/// assert_eq!(timestamp.as_str().len(), Timestamp::LEN);
/// # Ok::<(), chronon::Error>(())
/// ```
#[derive(Debug)]
pub struct Clock<S: TickSource> {
    bindings: BindingsFacade,
    calibration: Option<Calibration>,
    last: Moment<S>,
}

impl<S: TickSource> Clock<S> {
    /// Creates a clock, calibrating it with the default [`CalibrationConfig`] if it reads a CPU
    /// counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock is not supported on this platform or cannot be read.
    pub fn new() -> Result<Self> {
        Self::with_config(&CalibrationConfig::new())
    }

    /// Creates a clock, calibrating it with `config` if it reads a CPU counter.
    ///
    /// Operating system clocks ignore the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the clock is not supported on this platform or cannot be read.
    pub fn with_config(config: &CalibrationConfig) -> Result<Self> {
        Self::from_bindings(BindingsFacade::real(), config)
    }

    pub(crate) fn from_bindings(bindings: BindingsFacade, config: &CalibrationConfig) -> Result<Self> {
        let calibration = if S::ID.is_cpu_counter() {
            Some(Calibration::measure_with(&bindings, config)?)
        } else {
            None
        };

        let last = Moment::from_ticks(bindings.read_ticks(S::ID)?);

        let clock = Self {
            bindings,
            calibration,
            last,
        };

        debug!(
            clock = ?S::ID,
            ticks_per_second = clock.ticks_per_second(),
            "created clock"
        );

        Ok(clock)
    }

    /// Reads the current moment and remembers it as the last one.
    ///
    /// # Errors
    ///
    /// Returns an error if the operating system fails to read the clock. CPU counter reads never
    /// fail.
    #[inline]
    pub fn now(&mut self) -> Result<Moment<S>> {
        self.last = Moment::from_ticks(self.bindings.read_ticks(S::ID)?);
        Ok(self.last)
    }

    /// The moment returned by the most recent [`now()`][Self::now], or the moment the clock was
    /// created if it has not been read since.
    #[must_use]
    #[inline]
    pub const fn last(&self) -> Moment<S> {
        self.last
    }

    /// How many ticks this clock advances per second.
    ///
    /// Exactly one billion for operating system clocks; the calibrated estimate for CPU counters.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "one billion is exactly representable"
    )]
    pub fn ticks_per_second(&self) -> f64 {
        self.calibration
            .map_or(NANOS_PER_SECOND as f64, |calibration| {
                calibration.ticks_per_second()
            })
    }

    /// The calibration of a CPU counter clock, or `None` for operating system clocks.
    #[must_use]
    pub const fn calibration(&self) -> Option<Calibration> {
        self.calibration
    }

    /// Converts a tick delta of this clock into nanoseconds.
    #[must_use]
    pub fn ticks_to_nanos(&self, diff: MomentDiff<S>) -> i64 {
        match self.calibration {
            Some(calibration) => calibration.ticks_to_nanos(diff.ticks()),
            None => diff.ticks(),
        }
    }

    /// Converts a moment of this clock into nanoseconds on the clock's own time scale.
    ///
    /// For CPU counter clocks this is the estimated number of nanoseconds since the Unix epoch.
    /// For operating system clocks it is the raw nanosecond reading, which is relative to the Unix
    /// epoch for the real-time clocks and to an unspecified starting point for the others.
    #[must_use]
    #[expect(
        clippy::cast_possible_wrap,
        reason = "nanosecond readings stay below i64::MAX until the year 2262"
    )]
    pub fn wall_nanos(&self, moment: Moment<S>) -> i64 {
        match self.calibration {
            Some(calibration) => calibration.counter_to_wall_nanos(moment.ticks()),
            None => moment.ticks() as i64,
        }
    }
}
