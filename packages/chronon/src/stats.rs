//! Summary statistics over repeated measurements, such as a series of calibrations.

/// The count, mean and sample standard deviation of a set of measurements.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    count: usize,
    mean: f64,
    stdev: f64,
}

impl Summary {
    /// Number of measurements.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Arithmetic mean. NaN if there were no measurements.
    #[must_use]
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation. Zero for fewer than two measurements.
    #[must_use]
    pub const fn stdev(&self) -> f64 {
        self.stdev
    }

    /// Standard deviation relative to the mean.
    #[must_use]
    pub fn relative_stdev(&self) -> f64 {
        self.stdev / self.mean
    }
}

/// The arithmetic mean of `values`, or NaN if `values` is empty.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "sample counts are far below 2^52"
)]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Summarizes `values` with their mean and sample standard deviation.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    reason = "sample counts are far below 2^52"
)]
pub fn stdev(values: &[f64]) -> Summary {
    let mean = mean(values);

    let stdev = if values.len() < 2 {
        0.0
    } else {
        let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
        (squares / (values.len().saturating_sub(1)) as f64).sqrt()
    };

    Summary {
        count: values.len(),
        mean,
        stdev,
    }
}
