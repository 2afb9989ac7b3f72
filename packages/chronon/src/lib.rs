#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Nanosecond-precision time primitives for hot paths.
//!
//! The crate has two independent halves that meet only in the nanosecond count a caller passes
//! between them:
//!
//! * Reading time. A [`Clock`] reads one tick source, chosen at compile time by its type
//!   parameter: one of the operating system clocks ([`Realtime`], [`Monotonic`], ...) or the
//!   processor's cycle counter in one of three read modes ([`CpuCounter`],
//!   [`CpuCounterSerialized`], [`CpuCounterFenced`]). Readings are [`Moment`]s tagged with their
//!   tick source, so moments from different clocks cannot be mixed up. Cycle counter clocks are
//!   [calibrated][Calibration] against the operating system once, when created.
//! * Rendering time. The calendar functions convert between day numbers ([`RataDie`]) and
//!   [`Date`]s without tables or loops, and a [`Timestamp`] keeps a
//!   `yyyy-MM-ddThh:mm:ss.nnnnnnnnn` rendering of a nanosecond instant up to date, rewriting only
//!   the digits that changed.
//!
//! # Example
//!
//! ```
//! use chronon::{Clock, Realtime, Timestamp};
//!
//! let mut clock = Clock::<Realtime>::new()?;
//! let mut timestamp = Timestamp::new(clock.wall_nanos(clock.last()));
//!
//! for _ in 0..3 {
//!     let now = clock.now()?;
//!     timestamp.update(clock.wall_nanos(now));
//!
//!     println!("{timestamp}");
//! }
//! # Ok::<(), chronon::Error>(())
//! ```
//!
//! # Calibrating a cycle counter
//!
//! ```
//! use std::time::Duration;
//!
//! use chronon::{CalibrationConfig, Clock, CpuCounterFenced};
//!
//! let config = CalibrationConfig::new().window(Duration::from_millis(100));
//! let mut clock = Clock::<CpuCounterFenced>::with_config(&config)?;
//!
//! let start = clock.now()?;
//! let end = clock.now()?;
//!
//! println!(
//!     "{} ticks per second, two reads took {} ns",
//!     clock.ticks_per_second(),
//!     clock.ticks_to_nanos(end - start)
//! );
//! # Ok::<(), chronon::Error>(())
//! ```
//!
//! # Logging
//!
//! Calibration and clock creation emit `tracing` events at debug and trace level. Reads,
//! calendar conversions and timestamp updates never log.

mod pal;

mod calendar;
mod calibration;
mod clock;
mod clock_id;
mod date;
mod error;
mod moment;
mod timestamp;
mod units;
mod weekday;

pub mod stats;

pub use calendar::*;
pub use calibration::*;
pub use clock::*;
pub use clock_id::*;
pub use date::*;
pub use error::*;
pub use moment::*;
pub use timestamp::*;
pub use units::*;
pub use weekday::*;
