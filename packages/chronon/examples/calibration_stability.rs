//! Calibrates the CPU counter repeatedly and reports how much the estimates vary.
//!
//! Set `RUST_LOG=chronon=debug` to see the individual calibration results as they are measured.

use std::env;
use std::num::NonZero;
use std::time::Duration;

use chronon::stats;
use chronon::{Calibration, CalibrationConfig};
use tracing_subscriber::EnvFilter;

const DEFAULT_ROUNDS: usize = 10;

fn main() -> Result<(), chronon::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let rounds = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(DEFAULT_ROUNDS);

    for window_millis in [50, 100, 250] {
        let config = CalibrationConfig::new()
            .window(Duration::from_millis(window_millis))
            .offset_samples(NonZero::new(8).unwrap());

        let mut frequencies = Vec::with_capacity(rounds);
        let mut offsets = Vec::with_capacity(rounds);

        for _ in 0..rounds {
            let calibration = Calibration::measure(&config)?;

            frequencies.push(calibration.ticks_per_second());
            #[expect(
                clippy::cast_precision_loss,
                reason = "offsets are compared relative to each other"
            )]
            offsets.push(calibration.epoch_offset_nanos() as f64);
        }

        let frequency = stats::stdev(&frequencies);
        let offset = stats::stdev(&offsets);

        println!(
            "{window_millis:>4} ms window: {:.0} Hz ± {:.4} %, epoch offset spread {:.0} ns over {} rounds",
            frequency.mean(),
            frequency.relative_stdev() * 100.0,
            offset.stdev(),
            frequency.count()
        );
    }

    Ok(())
}
