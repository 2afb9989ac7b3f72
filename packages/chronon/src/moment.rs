use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::TickSource;

/// A raw tick count read from a [`Clock`][crate::Clock] with tick source `S`.
///
/// Moments are only created by reading a clock. Two moments can be compared or subtracted only if
/// they come from the same tick source; this is enforced by the type system.
///
/// # Examples
///
/// ```
/// use chronon::{Clock, Monotonic};
///
/// let mut clock = Clock::<Monotonic>::new()?;
///
/// let start = clock.now()?;
/// let end = clock.now()?;
///
/// assert!(end >= start);
/// assert!((end - start).ticks() >= 0);
/// # Ok::<(), chronon::Error>(())
/// ```
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Moment<S: TickSource> {
    ticks: u64,
    _source: PhantomData<S>,
}

impl<S: TickSource> Moment<S> {
    pub(crate) const fn from_ticks(ticks: u64) -> Self {
        Self {
            ticks,
            _source: PhantomData,
        }
    }

    /// The raw tick count.
    ///
    /// For operating system clocks this is nanoseconds since the clock's own reference point.
    /// For CPU counters it is the counter value.
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.ticks
    }
}

impl<S: TickSource> fmt::Debug for Moment<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Moment")
            .field("source", &S::ID)
            .field("ticks", &self.ticks)
            .finish()
    }
}

/// A signed tick delta between two [`Moment`]s of the same tick source `S`.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MomentDiff<S: TickSource> {
    ticks: i64,
    _source: PhantomData<S>,
}

impl<S: TickSource> MomentDiff<S> {
    /// A zero-length delta.
    pub const ZERO: Self = Self::from_ticks(0);

    /// Creates a delta of `ticks` ticks of source `S`.
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self {
            ticks,
            _source: PhantomData,
        }
    }

    /// The signed tick count.
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }
}

impl<S: TickSource> fmt::Debug for MomentDiff<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MomentDiff")
            .field("source", &S::ID)
            .field("ticks", &self.ticks)
            .finish()
    }
}

// Tick arithmetic wraps: counters are free-running and a delta between two reads of the same
// counter is always representable, even across a wrap of the raw value.

impl<S: TickSource> Sub for Moment<S> {
    type Output = MomentDiff<S>;

    #[expect(
        clippy::cast_possible_wrap,
        reason = "two's complement reinterpretation gives the signed delta"
    )]
    fn sub(self, rhs: Self) -> MomentDiff<S> {
        MomentDiff::from_ticks(self.ticks.wrapping_sub(rhs.ticks) as i64)
    }
}

impl<S: TickSource> Add<MomentDiff<S>> for Moment<S> {
    type Output = Self;

    fn add(self, rhs: MomentDiff<S>) -> Self {
        Self::from_ticks(self.ticks.wrapping_add_signed(rhs.ticks))
    }
}

impl<S: TickSource> Sub<MomentDiff<S>> for Moment<S> {
    type Output = Self;

    fn sub(self, rhs: MomentDiff<S>) -> Self {
        Self::from_ticks(self.ticks.wrapping_add_signed(rhs.ticks.wrapping_neg()))
    }
}

impl<S: TickSource> AddAssign<MomentDiff<S>> for Moment<S> {
    fn add_assign(&mut self, rhs: MomentDiff<S>) {
        *self = *self + rhs;
    }
}

impl<S: TickSource> SubAssign<MomentDiff<S>> for Moment<S> {
    fn sub_assign(&mut self, rhs: MomentDiff<S>) {
        *self = *self - rhs;
    }
}

impl<S: TickSource> Add for MomentDiff<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_ticks(self.ticks.wrapping_add(rhs.ticks))
    }
}

impl<S: TickSource> Sub for MomentDiff<S> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_ticks(self.ticks.wrapping_sub(rhs.ticks))
    }
}

impl<S: TickSource> Neg for MomentDiff<S> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_ticks(self.ticks.wrapping_neg())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;
    use crate::{CpuCounter, Monotonic};

    assert_impl_all!(Moment<Monotonic>: Copy, Send, Sync, Ord);
    assert_impl_all!(MomentDiff<CpuCounter>: Copy, Send, Sync, Ord);
    assert_not_impl_any!(Moment<Monotonic>: Sub<Moment<CpuCounter>>, PartialEq<Moment<CpuCounter>>);

    #[test]
    fn subtracting_moments_gives_signed_diff() {
        let a = Moment::<Monotonic>::from_ticks(1_000);
        let b = Moment::<Monotonic>::from_ticks(1_250);

        assert_eq!((b - a).ticks(), 250);
        assert_eq!((a - b).ticks(), -250);
    }

    #[test]
    fn adding_diff_moves_moment() {
        let a = Moment::<CpuCounter>::from_ticks(1_000);

        assert_eq!((a + MomentDiff::from_ticks(24)).ticks(), 1_024);
        assert_eq!((a + MomentDiff::from_ticks(-24)).ticks(), 976);
        assert_eq!((a - MomentDiff::from_ticks(24)).ticks(), 976);

        let mut b = a;
        b += MomentDiff::from_ticks(5);
        b -= MomentDiff::from_ticks(2);
        assert_eq!(b.ticks(), 1_003);
    }

    #[test]
    fn diff_survives_counter_wrap() {
        let before = Moment::<CpuCounter>::from_ticks(u64::MAX - 9);
        let after = Moment::<CpuCounter>::from_ticks(10);

        let diff = after - before;
        assert_eq!(diff.ticks(), 20);
        assert_eq!(before + diff, after);
    }

    #[test]
    fn diff_arithmetic() {
        let a = MomentDiff::<Monotonic>::from_ticks(7);
        let b = MomentDiff::<Monotonic>::from_ticks(3);

        assert_eq!((a + b).ticks(), 10);
        assert_eq!((a - b).ticks(), 4);
        assert_eq!((-a).ticks(), -7);
        assert_eq!(MomentDiff::<Monotonic>::ZERO, MomentDiff::default());
    }

    #[test]
    fn debug_names_source() {
        let moment = Moment::<Monotonic>::from_ticks(42);

        let text = format!("{moment:?}");

        assert!(text.contains("Monotonic"));
        assert!(text.contains("42"));
    }
}
